pub mod build_info;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod resolver;
pub mod ui;
pub mod version;
pub mod writer;

pub use error::{Result, VersionerError};
