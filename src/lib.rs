pub mod record;
pub mod generator;
pub mod sink;
pub mod reporter;
pub mod runner;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
#[cfg(feature = "elasticsearch")]
pub mod readiness;

pub mod backend;
pub mod config;
pub mod console;
pub mod env;
pub mod file;
pub mod init;
pub mod noop_sink;
