use super::*;

#[test]
fn truncate_test() {
    assert_eq!("Hel", truncate("Hello", 3));
    assert_eq!("Hello", truncate("Hello", 10));
    assert_eq!("", truncate("Hello", 0));
}

#[test]
fn add_padding_test() {
    assert_eq!("pods  ", add_padding("pods", 6));
    assert_eq!("depl", add_padding("deployments", 4));
}

#[test]
fn render_table_test() {
    let rows = vec![vec!["pods", "v1", "Pod"], vec!["deployments", "apps/v1", "Deployment"]];
    let lines = render_table(&["NAME", "APIVERSION", "KIND"], &rows, 2);

    assert_eq!(3, lines.len());
    assert_eq!("NAME         APIVERSION  KIND", lines[0]);
    assert_eq!("pods         v1          Pod", lines[1]);
    assert_eq!("deployments  apps/v1     Deployment", lines[2]);
}

#[test]
fn render_table_no_rows_test() {
    let rows: Vec<Vec<String>> = Vec::new();
    let lines = render_table(&["NAME", "KIND"], &rows, 1);

    assert_eq!(vec!["NAME KIND".to_owned()], lines);
}
