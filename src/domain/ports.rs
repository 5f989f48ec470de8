use crate::utils::error::Result;
use async_trait::async_trait;

/// Loads a named JSON resource. The HTTP adapter lives in `core::fetch`;
/// tests substitute in-memory sources.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn load(&self, resource: &str) -> Result<serde_json::Value>;
}

/// One-way outbound message delivery (contact form). Success or failure only
/// affects local submit-control state; nothing is retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

/// Destination for prerendered HTML fragments.
pub trait FragmentSink: Send + Sync {
    fn write_fragment(
        &self,
        name: &str,
        html: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait SiteSettings: Send + Sync {
    fn base_url(&self) -> &str;
    fn technologies_resource(&self) -> &str;
    fn projects_resource(&self) -> &str;
    fn experience_resource(&self) -> &str;
    fn output_path(&self) -> &str;
}
