use crate::config::site::SiteConfig;
use crate::domain::ports::{FragmentSink, SiteSettings};
use crate::utils::error::{FolioError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Prerender portfolio content sections from JSON resources")]
pub struct CliConfig {
    #[arg(long, help = "Path to a site.toml configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Content base URL (overrides the config file)")]
    pub base_url: Option<String>,

    #[arg(long, default_value = "./dist")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the site config (if any), applies CLI overrides, validates.
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let mut site = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            site.content.base_url = base_url.clone();
        }
        if site.content.base_url.is_empty() {
            return Err(FolioError::MissingConfig {
                field: "base_url".to_string(),
            });
        }

        site.validate()?;

        Ok(ResolvedSettings {
            site,
            output_path: self.output_path.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub site: SiteConfig,
    pub output_path: String,
}

impl SiteSettings for ResolvedSettings {
    fn base_url(&self) -> &str {
        &self.site.content.base_url
    }

    fn technologies_resource(&self) -> &str {
        &self.site.content.technologies
    }

    fn projects_resource(&self) -> &str {
        &self.site.content.projects
    }

    fn experience_resource(&self) -> &str {
        &self.site.content.experience
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

/// Writes fragments under a base directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl FragmentSink for LocalStorage {
    async fn write_fragment(&self, name: &str, html: &str) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, html)?;
        Ok(())
    }
}
