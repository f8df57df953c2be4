//! Data models for the 2ly runtime

pub mod configuration;
pub mod env_file;

pub use configuration::*;
pub use env_file::{EnvFile, EnvFileError};
