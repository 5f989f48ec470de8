use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Failed to fetch {resource}: {source}")]
    Fetch {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {resource}")]
    Status {
        resource: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Message submission failed: {message}")]
    Submission { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfig { field: String },
}

pub type Result<T> = std::result::Result<T, FolioError>;
