use rstest::rstest;

use super::*;

#[rstest]
#[case(vec!["kpool", "version"], Some("config-ns"), Some("config-ns"))]
#[case(vec!["kpool", "version", "-n", "flag-ns"], Some("config-ns"), Some("flag-ns"))]
#[case(vec!["kpool", "-n", "flag-ns", "version"], None, Some("flag-ns"))]
#[case(vec!["kpool", "version"], None, None)]
fn namespace_test(
    #[case] args: Vec<&str>,
    #[case] default: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let args = Args::try_parse_from(args).unwrap();
    assert_eq!(expected, args.namespace(default));
}

#[test]
fn subcommands_test() {
    let args = Args::try_parse_from(["kpool", "-vv", "api-resources", "--namespaced"]).unwrap();
    assert_eq!(2, args.verbose);
    assert_eq!(Command::ApiResources { namespaced: true }, args.command);

    let args = Args::try_parse_from(["kpool", "lookup", "deploy.apps"]).unwrap();
    assert_eq!(
        Command::Lookup {
            kind: "deploy.apps".to_owned()
        },
        args.command
    );

    let args = Args::try_parse_from(["kpool", "get", "-f", "a.yaml", "-f", "-"]).unwrap();
    assert_eq!(
        Command::Get(Manifests {
            files: vec!["a.yaml".to_owned(), "-".to_owned()]
        }),
        args.command
    );
}

#[test]
fn manifests_are_required_test() {
    assert!(Args::try_parse_from(["kpool", "create"]).is_err());
    assert!(Args::try_parse_from(["kpool"]).is_err());
}

#[test]
fn insecure_test() {
    let args = Args::try_parse_from(["kpool", "version"]).unwrap();
    assert!(!args.insecure(false));
    assert!(args.insecure(true));

    let args = Args::try_parse_from(["kpool", "version", "--insecure"]).unwrap();
    assert!(args.insecure(false));
}
