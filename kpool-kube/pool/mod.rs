pub use self::client_pool::{
    ApiPathResolver, ClientPool, DynamicClient, PoolError, legacy_api_path_resolver, overriding_api_path_resolver,
};
pub use self::resource_client::{ResourceClient, resource_url_path};

mod client_pool;
mod resource_client;
