//! Asset bundles and their resolution to URLs.

mod bundle;
mod convert;
mod resolve;
pub mod version;

pub use bundle::{AssetBundle, BundleFactory, BundleRegistry};
pub use convert::{AssetConverter, ExtensionConverter, PassthroughConverter};
pub use resolve::AssetResolver;
pub use version::timestamped_url;
