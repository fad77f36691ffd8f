mod common;

use prepflow_core::options::Framing;
use prepflow_core::resolve::resolve;

#[test]
fn test_resolve_is_idempotent() {
    for raw in common::config_grid() {
        let once = resolve(&raw);
        assert_eq!(resolve(&once), once, "raw: {raw:?}");
    }
}

#[test]
fn test_drizzle_and_debayer_never_both_on() {
    for raw in common::config_grid() {
        let eff = resolve(&raw);
        assert!(
            !(eff.registration.drizzle && eff.calibration.debayer),
            "raw: {raw:?}"
        );
    }
}

#[test]
fn test_single_pass_uses_current_framing() {
    for raw in common::config_grid()
        .into_iter()
        .filter(|c| !c.registration.two_pass)
    {
        assert_eq!(resolve(&raw).registration.framing, Framing::Current);
    }
}

#[test]
fn test_stitching_requires_max_framing() {
    for raw in common::config_grid() {
        let eff = resolve(&raw);
        if eff.registration.framing != Framing::Max {
            assert!(!eff.stacking.maximize_framing);
            assert_eq!(eff.stacking.feather, 0);
        }
        if !eff.stacking.maximize_framing {
            assert!(!eff.stacking.overlap_normalize);
        }
    }
}

#[test]
fn test_rejection_options_kept_in_storage() {
    let mut raw = common::customized();
    raw.stacking.method = prepflow_core::options::StackMethod::Sum;
    let eff = resolve(&raw);
    assert_eq!(eff.stacking.filters, raw.stacking.filters);
    assert_eq!(eff.stacking.rejection, raw.stacking.rejection);
    assert_eq!(eff.stacking.weighting, raw.stacking.weighting);
}

#[test]
fn test_two_pass_max_framing_untouched() {
    let raw = common::customized();
    let eff = resolve(&raw);
    assert_eq!(eff.registration.framing, Framing::Max);
    assert!(eff.stacking.maximize_framing);
    assert!(eff.stacking.overlap_normalize);
    assert_eq!(eff.stacking.feather, 30);
}
