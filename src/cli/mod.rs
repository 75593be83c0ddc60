//! Command-line interface module.

mod args;
pub mod bundle;
pub mod publish;
pub mod query;

pub use args::{Cli, Commands, PublishArgs};
