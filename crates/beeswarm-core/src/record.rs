#![forbid(unsafe_code)]

//! Input records and their identity keys.
//!
//! Records are compared by identity, never by value: two records with equal
//! fields are still two points on the chart. A loaded dataset is stored as an
//! arena ([`Dataset`]) and every record is addressed by a [`RecordId`] that
//! pairs the arena slot with the dataset's generation. Ids handed out for one
//! dataset therefore never resolve against a later one.

use std::fmt;

/// One input data point.
///
/// Domain fields are immutable once loaded; layout state lives in the
/// simulation, not here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Record {
    /// Grouping key (e.g. a month label).
    #[cfg_attr(feature = "serde", serde(alias = "Month"))]
    pub category: String,
    /// Sentiment polarity in `[-1, 1]`.
    #[cfg_attr(feature = "serde", serde(alias = "Sentiment"))]
    pub sentiment: f64,
    /// Subjectivity in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(alias = "Subjectivity"))]
    pub subjectivity: f64,
    /// Opaque payload surfaced only for selected records.
    #[cfg_attr(feature = "serde", serde(alias = "RawTweet", alias = "rawText"))]
    pub raw_text: String,
}

impl Record {
    /// Create a new record.
    pub fn new(
        category: impl Into<String>,
        sentiment: f64,
        subjectivity: f64,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            sentiment,
            subjectivity,
            raw_text: raw_text.into(),
        }
    }
}

/// Identity key for a record inside a specific [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    generation: u32,
    index: u32,
}

impl RecordId {
    /// Dataset generation this id belongs to.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Arena slot (position in the input order).
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.generation, self.index)
    }
}

/// Arena of records for one loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    generation: u32,
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap `records` as generation `generation`.
    ///
    /// Input order is preserved and becomes the arena order.
    pub fn new(generation: u32, records: Vec<Record>) -> Self {
        debug_assert!(records.len() <= u32::MAX as usize);
        Self {
            generation,
            records,
        }
    }

    /// Generation stamp shared by every id of this dataset.
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id of the record at `index`, if it exists.
    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        (index < self.records.len()).then(|| RecordId {
            generation: self.generation,
            index: index as u32,
        })
    }

    /// Whether `id` was issued by this dataset.
    #[inline]
    pub fn contains(&self, id: RecordId) -> bool {
        id.generation == self.generation && id.index() < self.records.len()
    }

    /// Resolve an id. Ids from other datasets resolve to `None`.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        if id.generation != self.generation {
            return None;
        }
        self.records.get(id.index())
    }

    /// Records in input order.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// All ids in input order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = RecordId> + '_ {
        let generation = self.generation;
        (0..self.records.len() as u32).map(move |index| RecordId { generation, index })
    }

    /// `(id, record)` pairs in input order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (RecordId, &Record)> + '_ {
        self.ids().zip(self.records.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twins() -> Dataset {
        Dataset::new(
            7,
            vec![
                Record::new("Jan", 0.5, 0.5, "same"),
                Record::new("Jan", 0.5, 0.5, "same"),
            ],
        )
    }

    #[test]
    fn equal_records_get_distinct_ids() {
        let ds = twins();
        let ids: Vec<_> = ds.ids().collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(ds.get(ids[0]), ds.get(ids[1]));
    }

    #[test]
    fn ids_from_other_generation_do_not_resolve() {
        let old = twins();
        let new = Dataset::new(8, old.records().to_vec());
        let stale = old.id_at(0).unwrap();
        assert!(new.get(stale).is_none());
        assert!(!new.contains(stale));
        assert!(old.contains(stale));
    }

    #[test]
    fn id_at_out_of_range() {
        let ds = twins();
        assert!(ds.id_at(2).is_none());
        assert_eq!(ds.id_at(1).map(RecordId::index), Some(1));
    }

    #[test]
    fn iter_preserves_input_order() {
        let ds = Dataset::new(
            1,
            vec![
                Record::new("Feb", 0.0, 0.0, "x"),
                Record::new("Jan", 0.0, 0.0, "y"),
            ],
        );
        let texts: Vec<_> = ds.iter().map(|(_, r)| r.raw_text.as_str()).collect();
        assert_eq!(texts, ["x", "y"]);
    }

    #[test]
    fn display_shows_generation_and_slot() {
        let ds = twins();
        assert_eq!(ds.id_at(1).unwrap().to_string(), "7#1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_legacy_field_names() {
        let json = r#"{"Month":"March","Sentiment":-0.25,"Subjectivity":0.75,"RawTweet":"hello"}"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        assert_eq!(rec, Record::new("March", -0.25, 0.75, "hello"));
    }
}
