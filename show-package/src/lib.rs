pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod flags;
pub mod logging;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod session;
pub mod staging;
pub mod templates;
pub mod util;

pub use error::{Error, Result};
