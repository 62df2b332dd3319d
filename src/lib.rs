pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod probe;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use api::build_router;
pub use config::ServiceConfig;
pub use domain::model::ServiceIdentity;
pub use utils::error::{BenchError, Result};
