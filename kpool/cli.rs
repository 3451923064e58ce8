use clap::{Args as ClapArgs, Parser, Subcommand};

#[cfg(test)]
#[path = "./cli.tests.rs"]
mod cli_tests;

/// kpool resolves kubernetes manifests to their REST endpoints using cached API discovery.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the kubeconfig file (defaults to $HOME/.kube/config).
    #[arg(long, env = "KUBECONFIG", global = true)]
    pub kube_config: Option<String>,

    /// Context to use from the kubeconfig file.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Namespace for objects that do not specify one.
    #[arg(long, short, global = true)]
    pub namespace: Option<String>,

    /// Skip TLS certificate verification (insecure).
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Increase logging verbosity (-v debug, -vv trace).
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Returns namespace or `default` if namespace is `None`.
    pub fn namespace<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        if self.namespace.is_some() {
            self.namespace.as_deref()
        } else {
            default
        }
    }

    /// Returns `true` if TLS verification should be skipped.
    pub fn insecure(&self, default: bool) -> bool {
        self.insecure || default
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print client and server versions.
    Version,

    /// Print API versions served by the cluster, one per line.
    ApiVersions,

    /// Print preferred API resources served by the cluster.
    ApiResources {
        /// Show only namespace scoped resources.
        #[arg(long)]
        namespaced: bool,
    },

    /// Find the resource for a kind in the form name[.group][/version].
    Lookup {
        /// Kind, plural, singular or short name of the resource.
        kind: String,
    },

    /// Print REST endpoints of objects from manifests.
    Resolve(Manifests),

    /// Fetch objects from manifests and print them as YAML.
    Get(Manifests),

    /// Create objects from manifests.
    Create(Manifests),

    /// Delete objects from manifests.
    Delete(Manifests),
}

#[derive(ClapArgs, Debug, PartialEq)]
pub struct Manifests {
    /// Manifest files to read, `-` reads standard input.
    #[arg(long = "filename", short = 'f', required = true)]
    pub files: Vec<String>,
}
