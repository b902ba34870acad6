//! Branch Unit Tests.
//!
//! Covers the BTB, the saturating counter, every direction predictor and the
//! combined next-PC prediction used by fetch.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::config::{BranchPredictor, PipelineConfig};
use rvpipe_core::core::units::bru::btb::Btb;
use rvpipe_core::core::units::bru::counter::{CounterPredictor, SaturatingCounter};
use rvpipe_core::core::units::bru::gshare_tournament::GShareTournamentPredictor;
use rvpipe_core::core::units::bru::static_bp::StaticPredictor;
use rvpipe_core::core::units::bru::tournament::TournamentPredictor;
use rvpipe_core::core::units::bru::{BranchUnit, DirectionPredictor};

fn pipeline(bp: BranchPredictor) -> PipelineConfig {
    PipelineConfig {
        branch_predictor: bp,
        ..PipelineConfig::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. BTB
// ══════════════════════════════════════════════════════════

#[test]
fn btb_miss_when_empty() {
    let btb = Btb::new(16);
    assert_eq!(btb.len(), 16);
    assert_eq!(btb.lookup(0x100), None);
}

#[test]
fn btb_hit_after_update() {
    let mut btb = Btb::new(16);
    btb.update(0x100, 0x200);
    assert_eq!(btb.lookup(0x100), Some(0x200));
}

#[test]
fn btb_overwrites_same_pc() {
    let mut btb = Btb::new(16);
    btb.update(0x100, 0x200);
    btb.update(0x100, 0x300);
    assert_eq!(btb.lookup(0x100), Some(0x300));
}

#[test]
fn btb_aliases_never_return_foreign_target() {
    let mut btb = Btb::new(4);
    // 0x00 and 0x10 map to index 0.
    btb.update(0x00, 0x40);
    assert_eq!(btb.lookup(0x10), None);

    btb.update(0x10, 0x80);
    assert_eq!(btb.lookup(0x10), Some(0x80));
    assert_eq!(btb.lookup(0x00), None, "aliasing entry is evicted");
}

// ══════════════════════════════════════════════════════════
// 2. Saturating counter
// ══════════════════════════════════════════════════════════

#[test]
fn counter_saturates_at_both_ends() {
    let mut c = SaturatingCounter::new(0);
    c.decrement();
    assert_eq!(c.value(), 0);
    for _ in 0..10 {
        c.increment();
    }
    assert_eq!(c.value(), 3);
}

#[rstest]
#[case(0, false)]
#[case(1, false)]
#[case(2, true)]
#[case(3, true)]
fn counter_threshold(#[case] value: u8, #[case] set: bool) {
    assert_eq!(SaturatingCounter::new(value).is_set(), set);
}

#[test]
fn counter_new_clamps() {
    assert_eq!(SaturatingCounter::new(9).value(), 3);
}

// ══════════════════════════════════════════════════════════
// 3. Direction predictors
// ══════════════════════════════════════════════════════════

#[test]
fn static_never_predicts_taken() {
    let mut bp = StaticPredictor::new();
    for _ in 0..8 {
        bp.update(0x40, true);
    }
    assert!(!bp.predict(0x40));
}

#[test]
fn counter_predictor_starts_weakly_taken() {
    let bp = CounterPredictor::new(4);
    assert!(bp.predict(0x40));
    assert_eq!(bp.counter(0x40).value(), CounterPredictor::INITIAL);
}

#[test]
fn counter_predictor_flips_after_one_miss() {
    let mut bp = CounterPredictor::new(4);
    bp.update(0x40, false);
    assert!(!bp.predict(0x40));
    bp.update(0x40, true);
    assert!(bp.predict(0x40));
}

#[test]
fn counter_predictor_tables_are_per_pc() {
    let mut bp = CounterPredictor::new(4);
    bp.update(0x40, false);
    bp.update(0x40, false);
    assert!(!bp.predict(0x40));
    assert!(bp.predict(0x44));
}

#[test]
fn tournament_starts_not_taken_and_learns_bias() {
    let mut bp = TournamentPredictor::new(4, 4);
    assert!(!bp.predict(0x40));
    for _ in 0..8 {
        bp.update(0x40, true);
    }
    assert!(bp.predict(0x40));
    assert_eq!(bp.history(), 0xF);
}

#[test]
fn tournament_learns_alternating_pattern_through_history() {
    let mut bp = TournamentPredictor::new(4, 2);
    for _ in 0..20 {
        bp.update(0x40, true);
        bp.update(0x40, false);
    }
    assert!(bp.predict(0x40), "after N the next outcome is T");
    bp.update(0x40, true);
    assert!(!bp.predict(0x40), "after T the next outcome is N");
}

#[test]
fn gshare_tournament_learns_bias() {
    let mut bp = GShareTournamentPredictor::new(4, 4);
    assert!(bp.predict(0x10));
    for _ in 0..8 {
        bp.update(0x10, false);
    }
    assert!(!bp.predict(0x10));
    assert_eq!(bp.history(), 0);
}

#[test]
fn gshare_tournament_selector_moves_to_gshare_on_alternation() {
    let mut bp = GShareTournamentPredictor::new(4, 4);
    assert!(!bp.selector(0x10).is_set());
    for _ in 0..20 {
        bp.update(0x10, true);
        bp.update(0x10, false);
    }
    assert!(bp.selector(0x10).is_set());
    assert!(bp.predict(0x10));
    bp.update(0x10, true);
    assert!(!bp.predict(0x10));
}

#[test]
fn gshare_history_is_masked() {
    let mut bp = GShareTournamentPredictor::new(6, 3);
    for _ in 0..10 {
        bp.update(0x10, true);
    }
    assert_eq!(bp.history(), 0b111);
}

// ══════════════════════════════════════════════════════════
// 4. Branch unit
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(BranchPredictor::Static)]
#[case(BranchPredictor::Counter)]
#[case(BranchPredictor::Tournament)]
#[case(BranchPredictor::GShareTournament)]
fn cold_unit_falls_through(#[case] bp: BranchPredictor) {
    let unit = BranchUnit::new(&pipeline(bp));
    let p = unit.predict(0x80);
    assert_eq!(p.next_pc, 0x84);
    assert!(!p.btb_hit);
}

#[test]
fn taken_resolution_redirects_next_fetch() {
    let mut unit = BranchUnit::new(&pipeline(BranchPredictor::Counter));
    unit.resolve(0x80, true, 0x200);

    let p = unit.predict(0x80);
    assert!(p.btb_hit);
    assert!(p.taken);
    assert_eq!(p.next_pc, 0x200);
    assert_eq!(unit.btb().lookup(0x80), Some(0x200));
}

#[test]
fn not_taken_prediction_ignores_btb_hit() {
    let mut unit = BranchUnit::new(&pipeline(BranchPredictor::Counter));
    unit.resolve(0x80, true, 0x200);
    unit.resolve(0x80, false, 0x200);
    unit.resolve(0x80, false, 0x200);

    let p = unit.predict(0x80);
    assert!(p.btb_hit);
    assert!(!p.taken);
    assert_eq!(p.next_pc, 0x84);
}

#[test]
fn not_taken_resolution_leaves_btb_alone() {
    let mut unit = BranchUnit::new(&pipeline(BranchPredictor::Counter));
    unit.resolve(0x80, false, 0x200);
    assert_eq!(unit.btb().lookup(0x80), None);
}

#[test]
fn static_unit_never_uses_target() {
    let mut unit = BranchUnit::new(&pipeline(BranchPredictor::Static));
    unit.resolve(0x80, true, 0x200);
    let p = unit.predict(0x80);
    assert!(p.btb_hit);
    assert_eq!(p.next_pc, 0x84);
}

#[test]
fn btb_size_follows_config() {
    let config = PipelineConfig {
        btb_size: 8,
        ..PipelineConfig::default()
    };
    assert_eq!(BranchUnit::new(&config).btb().len(), 8);
}
