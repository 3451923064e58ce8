pub use self::config::{APP_NAME, APP_VERSION, Config, load_or_create_default};
pub use self::errors::ConfigError;
pub use self::persistable::Persistable;

mod config;
mod errors;
mod persistable;
mod utils;
