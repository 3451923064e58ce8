pub use self::core::{API_PATH, APIS_PATH, CORE_VERSION, Kind, format_gvk, group_of, gvk_of};
pub use self::discovery::{
    CachedDiscoveryClient, ClusterDiscovery, DiscoveryClient, DiscoveryError, MemCachedDiscovery, preferred_resources,
};
pub use self::pool::{
    ApiPathResolver, ClientPool, DynamicClient, PoolError, ResourceClient, legacy_api_path_resolver,
    overriding_api_path_resolver, resource_url_path,
};
pub use self::resolve::{ResolveError, client_for_resource, server_resource_for_group_version_kind, split_resource_name};

pub mod client;
pub mod lookup;
pub mod manifest;
pub mod utils;

mod core;
mod discovery;
mod pool;
mod resolve;
