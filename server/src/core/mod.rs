//! Core application infrastructure

pub(crate) mod banner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod display;
pub mod shell;
pub mod storage;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands, SecretsCommands};
pub use config::AppConfig;
pub use storage::AppStorage;
