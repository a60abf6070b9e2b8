//! Data sources views load from.

use async_trait::async_trait;
use elimu_model::NormalizedResource;

use crate::cancel::CancellationToken;
use crate::client::ApiClient;
use crate::error::Result;

/// Something that can list normalized resources.
///
/// Views depend on this rather than on [`ApiClient`] so they can be rendered
/// against canned data.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// List every resource, abandoning the work when `cancel` fires.
    async fn list_resources(&self, cancel: &CancellationToken) -> Result<Vec<NormalizedResource>>;
}

#[async_trait]
impl ResourceSource for ApiClient {
    async fn list_resources(&self, cancel: &CancellationToken) -> Result<Vec<NormalizedResource>> {
        self.fetch_resources_cancellable(cancel).await
    }
}
