pub mod config;
pub mod env_json;

pub use config::*;
pub use env_json::*;
