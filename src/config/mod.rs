pub mod cli;
pub mod site;

pub use cli::{CliConfig, LocalStorage, ResolvedSettings};
pub use site::SiteConfig;
