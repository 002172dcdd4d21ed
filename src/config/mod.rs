mod defaults;
mod io;
mod schema;
mod validate;

pub use io::load_config;
#[allow(unused_imports)]
pub use schema::{Assets, Backoff, Commemoration, Config, SourceConfig, SourceKind};
pub use validate::ConfigError;
