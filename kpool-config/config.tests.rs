use std::path::PathBuf;

use super::*;

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{APP_NAME}-{}-{name}", std::process::id()))
        .join("config.yaml")
}

#[test]
fn deserialize_defaults_test() {
    let config: Config = serde_yaml::from_str("insecure: true\n").unwrap();

    assert_eq!(None, config.namespace);
    assert!(config.api_paths.is_empty());
    assert!(config.insecure);
}

#[test]
fn deserialize_namespace_test() {
    let config: Config = serde_yaml::from_str("namespace: kube-system\napi_paths:\n  apps: /custom\n").unwrap();

    assert_eq!(Some("kube-system"), config.namespace.as_deref());
    assert_eq!(Some("/custom"), config.api_paths.get("apps").map(String::as_str));
    assert!(!config.insecure);
}

#[test]
fn serialize_sorted_api_paths_test() {
    let mut config = Config::default();
    config.api_paths.insert("zeta.example.com".to_owned(), "/zeta".to_owned());
    config.api_paths.insert("".to_owned(), "/api".to_owned());
    config.api_paths.insert("apps".to_owned(), "/apis".to_owned());

    let serialized = serde_yaml::to_string(&config).unwrap();
    let core = serialized.find(": /api\n").unwrap();
    let apps = serialized.find("apps: /apis").unwrap();
    let zeta = serialized.find("zeta.example.com: /zeta").unwrap();

    assert!(core < apps && apps < zeta);
}

#[tokio::test]
async fn load_or_create_missing_file_test() {
    let path = temp_config_path("missing");
    let _ = tokio::fs::remove_file(&path).await;

    let config: Config = load_or_create_default(&path).await.unwrap();

    assert_eq!(Config::default(), config);
    assert!(path.exists());

    let reloaded = Config::load(&path).await.unwrap();
    assert_eq!(config, reloaded);

    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
}

#[tokio::test]
async fn load_or_create_malformed_file_test() {
    let path = temp_config_path("malformed");
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(&path, "namespace: [not, a, string").await.unwrap();

    let config: Config = load_or_create_default(&path).await.unwrap();
    assert_eq!(Config::default(), config);

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!("namespace: [not, a, string", content);

    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
}

#[tokio::test]
async fn load_or_create_unwritable_location_test() {
    let blocker = temp_config_path("unwritable");
    tokio::fs::create_dir_all(blocker.parent().unwrap()).await.unwrap();
    tokio::fs::write(&blocker, "").await.unwrap();
    let path = blocker.join("nested").join("config.yaml");

    let config: Config = load_or_create_default(&path).await.unwrap();

    assert_eq!(Config::default(), config);
    assert!(!path.exists());

    let _ = tokio::fs::remove_dir_all(blocker.parent().unwrap()).await;
}
