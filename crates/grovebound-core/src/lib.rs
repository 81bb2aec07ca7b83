pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use config::GameConfig;
pub use error::ConfigError;
