#![forbid(unsafe_code)]

//! Categorical vertical axis.
//!
//! # Ordering
//!
//! Categories appear in **first-seen order**: the first record's category
//! gets the top band, the next new category the band below it, and so on.
//! This fixes the visual month order to the order the data source delivers.
//!
//! # Invariants
//!
//! 1. One band per distinct category.
//! 2. Bands partition `[0, inner_height)`: band `i` ends exactly where band
//!    `i + 1` starts, the first starts at 0 and the last ends at
//!    `inner_height`.
//! 3. Every record is assigned a [`CategoryIndex`] at build time, so a record
//!    without a band cannot exist.
//! 4. Per-category counts sum to the record count.
//!
//! # Failure Modes
//!
//! - Empty input: zero bands and a band width of 0. Layout is a no-op.

use std::collections::HashMap;

use beeswarm_core::geometry::Band;
use beeswarm_core::record::Record;

/// Index of a category (and its band) on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryIndex(u32);

impl CategoryIndex {
    /// Raw index.
    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// Ordered categories and their bands for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    names: Vec<String>,
    counts: Vec<usize>,
    assignments: Vec<CategoryIndex>,
    inner_height: f64,
}

impl CategoryAxis {
    /// Build the axis for `records` over `[0, inner_height)`.
    #[must_use]
    pub fn build(records: &[Record], inner_height: f64) -> Self {
        let mut lookup: HashMap<&str, CategoryIndex> = HashMap::new();
        let mut names = Vec::new();
        let mut counts = Vec::new();
        let mut assignments = Vec::with_capacity(records.len());

        for record in records {
            let idx = *lookup.entry(record.category.as_str()).or_insert_with(|| {
                names.push(record.category.clone());
                counts.push(0);
                CategoryIndex((names.len() - 1) as u32)
            });
            counts[idx.get()] += 1;
            assignments.push(idx);
        }

        Self {
            names,
            counts,
            assignments,
            inner_height: inner_height.max(0.0),
        }
    }

    /// Number of distinct categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the axis has no bands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Height the bands partition.
    #[inline]
    pub fn inner_height(&self) -> f64 {
        self.inner_height
    }

    /// Width of every band; 0 when there are no categories.
    pub fn band_width(&self) -> f64 {
        if self.names.is_empty() {
            0.0
        } else {
            self.inner_height / self.names.len() as f64
        }
    }

    /// Category names in axis order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Records per category, in axis order.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of records the axis was built from.
    pub fn record_count(&self) -> usize {
        self.assignments.len()
    }

    /// Band for `idx`.
    pub fn band(&self, idx: CategoryIndex) -> Band {
        Band::new(self.edge(idx.get()), self.edge(idx.get() + 1))
    }

    /// Category of the record at arena slot `record_index`.
    pub fn category_of(&self, record_index: usize) -> Option<CategoryIndex> {
        self.assignments.get(record_index).copied()
    }

    /// Category assignment for every record, in input order.
    pub fn assignments(&self) -> &[CategoryIndex] {
        &self.assignments
    }

    /// Look up a category by name.
    pub fn index_of(&self, name: &str) -> Option<CategoryIndex> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| CategoryIndex(i as u32))
    }

    /// `(index, name, band)` in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryIndex, &str, Band)> + '_ {
        self.names.iter().enumerate().map(|(i, name)| {
            let idx = CategoryIndex(i as u32);
            (idx, name.as_str(), self.band(idx))
        })
    }

    // Shared edge formula keeps neighbouring bands gap-free.
    fn edge(&self, i: usize) -> f64 {
        let n = self.names.len();
        if n == 0 || i == 0 {
            0.0
        } else if i >= n {
            self.inner_height
        } else {
            self.inner_height * i as f64 / n as f64
        }
    }
}
