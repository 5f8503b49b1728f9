//! Property-based invariant tests for layout geometry and identity keys.
//!
//! 1. Distance is symmetric and non-negative.
//! 2. `p + (q - p) == q` within float error.
//! 3. Band center lies inside the band.
//! 4. Viewport inner size never goes negative.
//! 5. Record ids from one dataset never resolve in another generation.
//! 6. Encoding mode names round-trip through `FromStr`.

use beeswarm_core::event::EncodingMode;
use beeswarm_core::geometry::{Band, Margin, Point, Viewport};
use beeswarm_core::record::{Dataset, Record};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1e6f64..1e6, -1e6f64..1e6).prop_map(|(x, y)| Point::new(x, y))
}

fn records(n: usize) -> Vec<Record> {
    (0..n).map(|i| Record::new("Jan", 0.0, 0.0, format!("r{i}"))).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Distance symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distance_symmetric(a in point_strategy(), b in point_strategy()) {
        prop_assert_eq!(a.distance(b), b.distance(a));
        prop_assert!(a.distance(b) >= 0.0);
        prop_assert_eq!(a.distance(a), 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Point/vector arithmetic is consistent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_difference_returns_target(a in point_strategy(), b in point_strategy()) {
        let back = a + (b - a);
        prop_assert!((back.x - b.x).abs() < 1e-6, "{:?} vs {:?}", back, b);
        prop_assert!((back.y - b.y).abs() < 1e-6, "{:?} vs {:?}", back, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Band center
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn band_center_inside(start in -1e4f64..1e4, width in 1e-3f64..1e4) {
        let band = Band::new(start, start + width);
        prop_assert!(band.contains(band.center()));
        prop_assert!(band.contains(start));
        prop_assert!(!band.contains(start + width));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Viewport inner size
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inner_size_non_negative(
        w in 0.0f64..2000.0,
        h in 0.0f64..2000.0,
        (t, r, b, l) in (0.0f64..600.0, 0.0f64..600.0, 0.0f64..600.0, 0.0f64..600.0),
    ) {
        let vp = Viewport { width: w, height: h, margin: Margin::new(t, r, b, l) };
        prop_assert!(vp.inner_width() >= 0.0);
        prop_assert!(vp.inner_height() >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Identity keys are generation-scoped
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ids_do_not_cross_generations(n in 1usize..50, g in 0u32..1000, idx in 0usize..50) {
        let old = Dataset::new(g, records(n));
        let new = Dataset::new(g + 1, records(n));
        if let Some(id) = old.id_at(idx) {
            prop_assert!(old.get(id).is_some());
            prop_assert!(new.get(id).is_none());
        } else {
            prop_assert!(idx >= n);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Mode names round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mode_names_parse_back(upper in any::<bool>(), pick in 0usize..2) {
        let mode = EncodingMode::ALL[pick];
        let name = if upper { mode.as_str().to_uppercase() } else { mode.as_str().to_string() };
        prop_assert_eq!(name.parse::<EncodingMode>(), Ok(mode));
    }
}
