use anyhow::Result;
use kpool_config::Config;
use kpool_kube::client::{ClientOptions, get_config};
use kpool_kube::manifest::parse_objects;
use kpool_kube::{ClientPool, ClusterDiscovery, MemCachedDiscovery, overriding_api_path_resolver};
use kube::Client;
use kube::api::DynamicObject;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::cli::{Args, Command};

pub use self::discovery::{api_resources, api_versions, lookup, version};
pub use self::objects::{create, delete, get, resolve};

mod discovery;
mod objects;

/// Connection to the cluster shared by all commands.
pub struct Session {
    pub context: String,
    pub namespace: String,
    pub discovery: MemCachedDiscovery<ClusterDiscovery>,
    pub pool: ClientPool,
}

impl Session {
    /// Creates new [`Session`] instance for the cluster selected by `args` and `config`.\
    /// **Note** that namespace is taken from the command line, then from the configuration file
    /// and finally from the kube context.
    pub async fn connect(args: &Args, config: &Config) -> Result<Self> {
        let options = ClientOptions {
            kube_config_path: args.kube_config.as_ref().map(PathBuf::from),
            context: args.context.clone(),
            allow_insecure: args.insecure(config.insecure),
        };

        let (kube_config, context) = get_config(&options).await?;
        let namespace = args
            .namespace(config.namespace.as_deref())
            .unwrap_or(&kube_config.default_namespace)
            .to_owned();

        let client = Client::try_from(kube_config.clone())?;
        let pool = ClientPool::new(&kube_config, overriding_api_path_resolver(config.api_paths.clone()));

        Ok(Self {
            context,
            namespace,
            discovery: MemCachedDiscovery::new(ClusterDiscovery::new(client)),
            pool,
        })
    }
}

/// Runs the command selected in `args`.
pub async fn run(args: &Args, config: &Config) -> Result<()> {
    let session = Session::connect(args, config).await?;
    tracing::info!("Connected using context '{}', namespace '{}'", session.context, session.namespace);

    match &args.command {
        Command::Version => version(&session).await,
        Command::ApiVersions => api_versions(&session).await,
        Command::ApiResources { namespaced } => api_resources(&session, *namespaced).await,
        Command::Lookup { kind } => lookup(&session, kind).await,
        Command::Resolve(manifests) => resolve(&session, &read_objects(&manifests.files).await?).await,
        Command::Get(manifests) => get(&session, &read_objects(&manifests.files).await?).await,
        Command::Create(manifests) => create(&session, &read_objects(&manifests.files).await?).await,
        Command::Delete(manifests) => delete(&session, &read_objects(&manifests.files).await?).await,
    }
}

/// Reads and parses all manifest `files`, `-` stands for the standard input.
async fn read_objects(files: &[String]) -> Result<Vec<DynamicObject>> {
    let mut objects = Vec::new();

    for file in files {
        let content = if file == "-" {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            content
        } else {
            tokio::fs::read_to_string(file)
                .await
                .map_err(|error| anyhow::anyhow!("cannot read '{}': {}", file, error))?
        };

        let parsed = parse_objects(&content).map_err(|error| anyhow::anyhow!("cannot parse '{}': {}", file, error))?;
        tracing::debug!("Read {} objects from '{}'", parsed.len(), file);
        objects.extend(parsed);
    }

    Ok(objects)
}
