pub mod config;
pub mod preset;
pub mod settings;

pub use config::*;
pub use preset::*;
pub use settings::*;
