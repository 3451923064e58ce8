use kube::Config;
use kube::config::{KubeConfigOptions, Kubeconfig};
use std::path::PathBuf;

#[cfg(test)]
#[path = "./client.tests.rs"]
mod client_tests;

/// Possible errors from building kubernetes configuration.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Failed to process kube configuration.
    #[error("failed to process kube configuration: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),

    /// Failed to infer kube configuration from the environment.
    #[error("failed to infer kube configuration: {0}")]
    InferConfigError(#[from] kube::config::InferConfigError),

    /// Failed to build kubernetes client.
    #[error("failed to build kubernetes client: {0}")]
    KubeError(#[from] kube::Error),
}

/// Options used to locate kube configuration.
#[derive(Default, Debug, Clone)]
pub struct ClientOptions {
    /// Path to the kubeconfig file, environment and default locations are used if not set.
    pub kube_config_path: Option<PathBuf>,

    /// Kube context to use instead of the current one.
    pub context: Option<String>,

    /// Accept invalid TLS certificates of the API server.
    pub allow_insecure: bool,
}

/// Builds kubernetes [`Config`] together with the name of the context it was built for.\
/// **Note** that context name is empty when configuration was inferred from the in-cluster environment.
pub async fn get_config(options: &ClientOptions) -> Result<(Config, String), ClientError> {
    let (mut config, context) = match (&options.kube_config_path, &options.context) {
        (Some(path), context) => {
            let kube_config = Kubeconfig::read_from(path)?;
            let context = context_name(&kube_config, context.as_deref());
            let config = Config::from_custom_kubeconfig(kube_config, &kube_config_options(context.as_str())).await?;
            (config, context)
        },
        (None, Some(context)) => {
            let config = Config::from_kubeconfig(&kube_config_options(context)).await?;
            (config, context.clone())
        },
        (None, None) => {
            let context = Kubeconfig::read()
                .ok()
                .and_then(|kube_config| kube_config.current_context)
                .unwrap_or_default();
            (Config::infer().await?, context)
        },
    };

    if options.allow_insecure {
        tracing::warn!("TLS certificate verification is disabled");
        config.accept_invalid_certs = true;
    }

    tracing::debug!("Using kube context '{}' for {}", context, config.cluster_url);
    Ok((config, context))
}

/// Returns name of the context that will be used from `kube_config`.
fn context_name(kube_config: &Kubeconfig, context: Option<&str>) -> String {
    context
        .map(String::from)
        .or_else(|| kube_config.current_context.clone())
        .unwrap_or_default()
}

fn kube_config_options(context: &str) -> KubeConfigOptions {
    KubeConfigOptions {
        context: (!context.is_empty()).then(|| context.to_owned()),
        cluster: None,
        user: None,
    }
}
