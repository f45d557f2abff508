//! Opening pages in the default browser

use async_trait::async_trait;
use jarvis::{CapabilityError, CapabilityResult, WebOpener};

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

#[async_trait]
impl WebOpener for BrowserOpener {
    async fn open(&self, url: &str) -> CapabilityResult<()> {
        if url.trim().is_empty() {
            return Err(CapabilityError::MissingParameter("url".into()));
        }

        tracing::info!("Opening {}", url);
        let target = url.to_string();
        tokio::task::spawn_blocking(move || open::that(&target))
            .await
            .map_err(|e| CapabilityError::failed(format!("Failed to open {}: {}", url, e)))?
            .map_err(|e| CapabilityError::failed(format!("Failed to open {}: {}", url, e)))
    }
}
