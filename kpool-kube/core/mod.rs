pub const CORE_VERSION: &str = "v1";
pub const API_PATH: &str = "/api";
pub const APIS_PATH: &str = "/apis";

pub use self::gvk::{format_gvk, group_of, gvk_of};
pub use self::kind::Kind;

mod gvk;
mod kind;
