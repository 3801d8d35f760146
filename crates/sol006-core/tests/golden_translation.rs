//! Golden tests for the translation engine
//!
//! Each IM fixture is translated and compared, order-insensitively, against
//! the hand-checked SOL006 document next to it.


use pretty_assertions::assert_eq;
use sol006_core::translate;
use test_support::{accept_all, canonical, load_fixture};

const VNFD_FIXTURES: &[(&str, &str)] = &[
    ("cirros_vnfd_im.yaml", "cirros_vnfd_sol006.yaml"),
    ("hackfest_charmed_vnfd_im.yaml", "hackfest_charmed_vnfd_sol006.yaml"),
    ("magma_knf_im.yaml", "magma_knf_sol006.yaml"),
];

const NSD_FIXTURES: &[(&str, &str)] = &[
    ("cirros_nsd_im.yaml", "cirros_nsd_sol006.yaml"),
    ("hackfest_charmed_nsd_im.yaml", "hackfest_charmed_nsd_sol006.yaml"),
];

fn check_fixture(im_file: &str, sol006_file: &str) {
    let im = load_fixture(im_file);
    let expected = load_fixture(sol006_file);
    let translated = translate(&im, &accept_all)
        .unwrap_or_else(|e| panic!("translation of {} failed: {}", im_file, e));
    assert_eq!(canonical(&expected), canonical(&translated), "fixture {}", im_file);
}

#[test]
fn golden_vnfd_fixtures() {
    for (im_file, sol006_file) in VNFD_FIXTURES {
        check_fixture(im_file, sol006_file);
    }
}

#[test]
fn golden_nsd_fixtures() {
    for (im_file, sol006_file) in NSD_FIXTURES {
        check_fixture(im_file, sol006_file);
    }
}

#[test]
fn golden_output_is_ordered_like_input() {
    // first-occurrence ordering makes output stable, not just set-equal
    let im = load_fixture("hackfest_charmed_vnfd_im.yaml");
    let expected = load_fixture("hackfest_charmed_vnfd_sol006.yaml");
    let translated = translate(&im, &accept_all).unwrap();
    assert_eq!(expected, translated);
}
