//! Utility modules shared by the publisher and the resolver.

pub mod path;
mod plural;

pub use plural::plural_count;
