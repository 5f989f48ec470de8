use crate::core::contact::{ContactForm, HttpNotifier};
use crate::core::page::{PageConfig, SectionResources};
use crate::core::reveal::{Margin, RevealConfig};
use crate::core::typewriter::Typewriter;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_fraction, validate_non_empty_string, validate_positive_millis, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Site configuration file (`site.toml`). Every field has a default so a
/// minimal file only needs `[content] base_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub content: ContentConfig,
    pub animation: AnimationConfig,
    pub contact: Option<ContactConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub base_url: String,
    pub technologies: String,
    pub projects: String,
    pub experience: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        let resources = SectionResources::default();
        Self {
            base_url: String::new(),
            technologies: resources.technologies,
            projects: resources.projects,
            experience: resources.experience,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub counter_duration_ms: u64,
    pub reveal_threshold: f64,
    pub reveal_margin: String,
    pub stats_threshold: f64,
    pub typewriter_speed_ms: u64,
    pub typewriter_phrases: Vec<String>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: 2000,
            reveal_threshold: 0.1,
            reveal_margin: "0px 0px -50px 0px".to_string(),
            stats_threshold: 0.5,
            typewriter_speed_ms: 80,
            typewriter_phrases: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub feedback_delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            feedback_delay_ms: 3000,
        }
    }
}

impl SiteConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    pub fn resources(&self) -> SectionResources {
        SectionResources {
            technologies: self.content.technologies.clone(),
            projects: self.content.projects.clone(),
            experience: self.content.experience.clone(),
        }
    }

    pub fn page_config(&self) -> Result<PageConfig> {
        let margin = Margin::parse(&self.animation.reveal_margin)?;
        Ok(PageConfig {
            reveal: RevealConfig {
                threshold: self.animation.reveal_threshold,
                margin,
            },
            stats: RevealConfig {
                threshold: self.animation.stats_threshold,
                margin: Margin::default(),
            },
            counter_duration: Duration::from_millis(self.animation.counter_duration_ms),
        })
    }

    pub fn typewriter(&self) -> Typewriter {
        Typewriter::new(
            self.animation.typewriter_phrases.clone(),
            Duration::from_millis(self.animation.typewriter_speed_ms),
        )
    }

    /// Contact form wired to the configured messaging endpoint, when one is
    /// configured at all.
    pub fn contact_form(&self) -> Option<ContactForm<HttpNotifier>> {
        self.contact.as_ref().map(|contact| {
            ContactForm::with_feedback_delay(
                HttpNotifier::new(contact.endpoint.clone()),
                Duration::from_millis(contact.feedback_delay_ms),
            )
        })
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_url("content.base_url", &self.content.base_url)?;
        validate_non_empty_string("content.technologies", &self.content.technologies)?;
        validate_non_empty_string("content.projects", &self.content.projects)?;
        validate_non_empty_string("content.experience", &self.content.experience)?;
        validate_fraction("animation.reveal_threshold", self.animation.reveal_threshold)?;
        validate_fraction("animation.stats_threshold", self.animation.stats_threshold)?;
        validate_positive_millis(
            "animation.counter_duration_ms",
            self.animation.counter_duration_ms,
        )?;
        validate_positive_millis(
            "animation.typewriter_speed_ms",
            self.animation.typewriter_speed_ms,
        )?;
        Margin::parse(&self.animation.reveal_margin)?;
        if let Some(contact) = &self.contact {
            validate_url("contact.endpoint", &contact.endpoint)?;
            validate_positive_millis("contact.feedback_delay_ms", contact.feedback_delay_ms)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [content]
            base_url = "https://example.com/data"
            "#,
        )
        .unwrap();

        assert_eq!(config.content.base_url, "https://example.com/data");
        assert_eq!(config.content.technologies, "technologies.json");
        assert_eq!(config.animation.counter_duration_ms, 2000);
        assert_eq!(config.animation.reveal_margin, "0px 0px -50px 0px");
        assert!(config.contact.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_round_trip() {
        let config: SiteConfig = toml::from_str(
            r#"
            [content]
            base_url = "https://example.com"
            projects = "data/projects.json"

            [animation]
            counter_duration_ms = 1000
            reveal_threshold = 0.25
            typewriter_phrases = ["Building things", "Shipping things"]

            [contact]
            endpoint = "https://hooks.example.com/notify"
            "#,
        )
        .unwrap();

        assert_eq!(config.resources().projects, "data/projects.json");
        assert_eq!(config.animation.typewriter_phrases.len(), 2);
        assert_eq!(config.contact.as_ref().unwrap().feedback_delay_ms, 3000);

        let page = config.page_config().unwrap();
        assert_eq!(page.reveal.threshold, 0.25);
        assert_eq!(page.counter_duration, Duration::from_millis(1000));
        assert!(!config.typewriter().is_empty());
        assert!(config.contact_form().is_some());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut config = SiteConfig::default();
        config.content.base_url = "https://example.com".to_string();
        config.animation.reveal_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_margin_rejected() {
        let mut config = SiteConfig::default();
        config.content.base_url = "https://example.com".to_string();
        config.animation.reveal_margin = "fifty".to_string();
        assert!(config.validate().is_err());
        assert!(config.page_config().is_err());
    }
}
