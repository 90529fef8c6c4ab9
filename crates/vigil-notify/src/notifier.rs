use anyhow::Result;
use async_trait::async_trait;

/// Seam for delivering a rendered report document.
///
/// Delivery failure is an error: when sending is enabled there is no
/// fallback channel, so the caller treats it as fatal.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the rendered document.
    async fn send(&self, subject: &str, html_body: &str) -> Result<()>;

    /// Notifier name for logging.
    fn name(&self) -> &str;

    /// Whether this notifier should be used at all.
    fn is_enabled(&self) -> bool {
        true
    }
}
