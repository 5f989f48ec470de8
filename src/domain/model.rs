use serde::{Deserialize, Serialize};

// Content documents fetched from the three JSON resources. Every field is
// defaulted: a missing field renders as empty content, it never fails the
// whole section.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyCatalog {
    #[serde(default)]
    pub categories: Vec<TechnologyCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIndex {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "liveLink")]
    pub live_link: String,
    #[serde(default, rename = "githubLink")]
    pub github_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceLog {
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
}

/// The four free-text fields collected by the contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub subject: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Submit-control state. `Sent` and `Failed` are transient feedback states
/// that revert to `Ready` after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Ready,
    Sending,
    Sent,
    Failed,
}
