//! End-to-end scenarios against the public engine API.
//!
//! Each test drives an [`Engine`] with events the way a presentation layer
//! would and checks the resulting snapshots.

use beeswarm_core::event::{EncodingMode, Event};
use beeswarm_core::record::Record;
use beeswarm_layout::SimulationStatus;
use beeswarm_runtime::draw::{DrawCommand, diff};
use beeswarm_runtime::driver::run_until_settled;
use beeswarm_runtime::{Engine, EngineConfig, EngineError};
use beeswarm_style::Rgb;
use beeswarm_style::scale::{NEGATIVE, NEUTRAL, POSITIVE, SUBJECTIVE_BLUE};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn engine() -> Engine {
    Engine::with_config(EngineConfig::default().with_seed(2024)).unwrap()
}

fn two_jan() -> Vec<Record> {
    vec![
        Record::new("Jan", 1.0, 0.2, "a"),
        Record::new("Jan", -1.0, 0.9, "b"),
    ]
}

fn settled(records: Vec<Record>) -> Engine {
    let mut e = engine();
    e.load(records);
    run_until_settled(&mut e, |_| {});
    e
}

fn closer_to(c: Rgb, target: Rgb, other: Rgb) -> bool {
    c.distance_sq(target) < c.distance_sq(other)
}

// ============================================================================
// Two-record dataset
// ============================================================================

#[test]
fn two_jan_records_one_band_and_settle_apart() {
    let e = settled(two_jan());
    let snap = e.snapshot();

    assert_eq!(snap.category_labels.len(), 1);
    assert_eq!(snap.category_labels[0].name, "Jan");
    assert_eq!(snap.category_labels[0].y, 0.0);
    assert_eq!(snap.status, SimulationStatus::Settled);

    let [a, b] = [snap.marks[0].position, snap.marks[1].position];
    let min = e.simulation().min_separation();
    assert!(a.distance(b) >= min - 1e-3, "distance {}", a.distance(b));

    assert_eq!(snap.marks[0].fill, POSITIVE);
    assert_eq!(snap.marks[1].fill, NEGATIVE);
}

#[test]
fn switching_to_subjectivity_recolours_without_moving() {
    let mut e = settled(two_jan());
    let before = e.snapshot();
    let after = e.set_encoding_mode(EncodingMode::Subjectivity);

    let a = after.marks[0].fill;
    let b = after.marks[1].fill;
    assert!(closer_to(b, SUBJECTIVE_BLUE, NEUTRAL), "b={b}");
    assert!(closer_to(a, NEUTRAL, SUBJECTIVE_BLUE), "a={a}");

    assert_eq!(
        before.positions().collect::<Vec<_>>(),
        after.positions().collect::<Vec<_>>()
    );
    assert_eq!(after.status, before.status);
    assert_eq!(after.legend.entries[0].label, "Subjective");
    assert_eq!(after.legend.entries[19].label, "Objective");
}

#[test]
fn toggle_order_and_removal() {
    let mut e = settled(two_jan());
    let ids: Vec<_> = e.dataset().ids().collect();
    let (a, b) = (ids[0], ids[1]);

    e.toggle_selection(a);
    let snap = e.toggle_selection(b);
    assert_eq!(snap.selected_texts().collect::<Vec<_>>(), ["a", "b"]);
    assert!(snap.is_selected(a) && snap.is_selected(b));

    let snap = e.toggle_selection(a);
    assert_eq!(snap.selected, vec![(b, "b".to_string())]);
    assert!(!snap.is_selected(a));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn ticks_move_marks_until_settled() {
    let mut e = engine();
    let first = e.load(two_jan());
    let second = e.tick();
    assert_ne!(
        first.positions().collect::<Vec<_>>(),
        second.positions().collect::<Vec<_>>()
    );
    assert_eq!(second.tick, 1);

    run_until_settled(&mut e, |_| {});
    let done = e.snapshot();
    assert_eq!(e.tick(), done);
}

#[test]
fn single_record_converges() {
    let e = settled(vec![Record::new("Mar", 0.0, 0.5, "solo")]);
    let snap = e.snapshot();
    assert!(snap.is_settled());
    assert!(snap.marks[0].position.is_finite());
}

#[test]
fn empty_dataset_is_settled_on_load() {
    let mut e = engine();
    let snap = e.apply(Event::DatasetLoaded(Vec::new())).unwrap();
    assert!(snap.is_settled());
    assert!(snap.marks.is_empty());
    assert_eq!(snap.tick, 0);
}

#[test]
fn bands_follow_first_seen_order() {
    let e = settled(vec![
        Record::new("Mar", 0.0, 0.0, "1"),
        Record::new("Jan", 0.0, 0.0, "2"),
        Record::new("Mar", 0.0, 0.0, "3"),
    ]);
    let labels = e.snapshot().category_labels;
    let names: Vec<_> = labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Mar", "Jan"]);
    assert_eq!(labels[1].y, 205.0);
}

#[test]
fn new_dataset_replaces_old_drawing() {
    let mut e = engine();
    let old = e.load(two_jan());
    let new = e.load(vec![Record::new("Feb", 0.0, 0.0, "c")]);
    let commands = diff(Some(&old), &new);
    let removes = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Remove { .. }))
        .count();
    let creates = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Create { .. }))
        .count();
    assert_eq!((removes, creates), (2, 1));
}

#[test]
fn tick_diff_only_moves() {
    let mut e = engine();
    let first = e.load(two_jan());
    let next = e.tick();
    let commands = diff(Some(&first), &next);
    assert!(!commands.is_empty());
    assert!(commands.iter().all(|c| matches!(c, DrawCommand::Move { .. })));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_mode_keeps_previous() {
    let mut e = settled(two_jan());
    let before = e.snapshot();
    assert_eq!(
        e.select_encoding("volume"),
        Err(EngineError::UnknownEncodingMode("volume".into()))
    );
    assert_eq!(e.snapshot(), before);
}

#[test]
fn out_of_range_values_clamp() {
    let e = settled(vec![
        Record::new("Jan", 7.0, -3.0, "hot"),
        Record::new("Jan", -7.0, 3.0, "cold"),
    ]);
    let snap = e.snapshot();
    assert_eq!(snap.marks[0].fill, POSITIVE);
    assert_eq!(snap.marks[1].fill, NEGATIVE);
}

#[test]
fn records_are_never_mutated() {
    let mut e = engine();
    let input = two_jan();
    e.load(input.clone());
    run_until_settled(&mut e, |_| {});
    e.set_encoding_mode(EncodingMode::Subjectivity);
    let id = e.dataset().id_at(0).unwrap();
    e.toggle_selection(id);
    assert_eq!(e.dataset().records(), input.as_slice());
}
