use crate::domain::ports::ContentSource;
use crate::utils::error::{FolioError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Fetches JSON resources relative to a base URL. Non-2xx responses and
/// malformed bodies are surfaced as errors; callers decide whether a failed
/// section is fatal (the page orchestrator logs and moves on).
pub struct HttpContentSource {
    client: Client,
    base_url: String,
}

impl HttpContentSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn load(&self, resource: &str) -> Result<serde_json::Value> {
        let url = self.resource_url(resource);
        tracing::debug!("Fetching resource: {}", url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|source| FolioError::Fetch {
                    resource: resource.to_string(),
                    source,
                })?;

        let status = response.status();
        tracing::debug!("Resource {} responded with {}", resource, status);

        if !status.is_success() {
            return Err(FolioError::Status {
                resource: resource.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FolioError::Fetch {
                resource: resource.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| FolioError::Parse {
            resource: resource.to_string(),
            source,
        })
    }
}

/// Loads a resource and deserializes it into its document type.
pub async fn dataset<T, S>(source: &S, resource: &str) -> Result<T>
where
    T: DeserializeOwned,
    S: ContentSource + ?Sized,
{
    let value = source.load(resource).await?;
    serde_json::from_value(value).map_err(|source| FolioError::Parse {
        resource: resource.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ProjectIndex;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_load_successful_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/projects.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "projects": [{ "title": "One" }] }));
        });

        let source = HttpContentSource::new(server.base_url());
        let index: ProjectIndex = dataset(&source, "projects.json").await.unwrap();

        mock.assert();
        assert_eq!(index.projects.len(), 1);
        assert_eq!(index.projects[0].title, "One");
    }

    #[tokio::test]
    async fn test_load_joins_paths_without_double_slash() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/data/projects.json");
            then.status(200).json_body(serde_json::json!({}));
        });

        let source = HttpContentSource::new(format!("{}/data/", server.base_url()));
        source.load("/projects.json").await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_load_server_error_is_status_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/technologies.json");
            then.status(500);
        });

        let source = HttpContentSource::new(server.base_url());
        let err = source.load("technologies.json").await.unwrap_err();

        match err {
            FolioError::Status { resource, status } => {
                assert_eq!(resource, "technologies.json");
                assert_eq!(status.as_u16(), 500);
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_malformed_body_is_parse_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/experience.json");
            then.status(200).body("not json at all");
        });

        let source = HttpContentSource::new(server.base_url());
        let err = source.load("experience.json").await.unwrap_err();

        assert!(matches!(err, FolioError::Parse { .. }));
    }
}
