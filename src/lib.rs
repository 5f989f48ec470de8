pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{CliConfig, LocalStorage, ResolvedSettings, SiteConfig};
pub use crate::core::fetch::HttpContentSource;
pub use crate::core::page::{Page, PageConfig, SectionResources};
pub use crate::utils::error::{FolioError, Result};
