use rstest::rstest;

use super::*;

#[rstest]
#[case(0, "info")]
#[case(1, "debug")]
#[case(2, "trace")]
#[case(5, "trace")]
fn level_for_test(#[case] verbosity: u8, #[case] expected: &str) {
    assert_eq!(expected, level_for(verbosity));
}

#[test]
fn default_directives_test() {
    assert_eq!(
        "warn,kpool=info,kpool_common=info,kpool_config=info,kpool_kube=info",
        default_directives("kpool", 0)
    );
    assert!(default_directives("kpool", 1).contains("kpool_kube=debug"));
}
