use super::*;

const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
clusters:
  - name: dev-cluster
    cluster:
      server: https://127.0.0.1:6443
  - name: prod-cluster
    cluster:
      server: https://10.0.0.1:6443
contexts:
  - name: dev
    context:
      cluster: dev-cluster
      user: dev-user
  - name: prod
    context:
      cluster: prod-cluster
      user: dev-user
      namespace: production
users:
  - name: dev-user
    user:
      token: secret
"#;

fn write_kubeconfig(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kpool-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config");
    std::fs::write(&path, KUBECONFIG).unwrap();
    path
}

#[test]
fn context_name_test() {
    let kube_config = Kubeconfig::from_yaml(KUBECONFIG).unwrap();

    assert_eq!("dev", context_name(&kube_config, None));
    assert_eq!("prod", context_name(&kube_config, Some("prod")));
}

#[tokio::test]
async fn get_config_current_context_test() {
    let options = ClientOptions {
        kube_config_path: Some(write_kubeconfig("current")),
        ..Default::default()
    };

    let (config, context) = get_config(&options).await.unwrap();

    assert_eq!("dev", context);
    assert_eq!("https://127.0.0.1:6443/", config.cluster_url.to_string());
    assert_eq!("default", config.default_namespace);
    assert!(!config.accept_invalid_certs);
}

#[tokio::test]
async fn get_config_explicit_context_test() {
    let options = ClientOptions {
        kube_config_path: Some(write_kubeconfig("explicit")),
        context: Some("prod".to_owned()),
        allow_insecure: true,
    };

    let (config, context) = get_config(&options).await.unwrap();

    assert_eq!("prod", context);
    assert_eq!("https://10.0.0.1:6443/", config.cluster_url.to_string());
    assert_eq!("production", config.default_namespace);
    assert!(config.accept_invalid_certs);
}

#[tokio::test]
async fn get_config_unknown_context_test() {
    let options = ClientOptions {
        kube_config_path: Some(write_kubeconfig("unknown")),
        context: Some("missing".to_owned()),
        ..Default::default()
    };

    assert!(matches!(get_config(&options).await, Err(ClientError::KubeconfigError(_))));
}
