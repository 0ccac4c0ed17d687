//! Shared utilities for use cases.
//!
//! Contains the per-call timeout helper and the best-effort diagnostic
//! channel used by every stage.

use crate::ports::publisher::{DeliveryError, Publisher};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Raw news output quoted in diagnostics, in characters.
pub const NEWS_LOG_PREFIX_CHARS: usize = 1000;
/// Prompt and raw quiz output quoted in diagnostics, in characters.
pub const QUIZ_LOG_PREFIX_CHARS: usize = 500;

/// Run an external call, mapping an elapsed `limit` to `on_timeout`.
pub(crate) async fn bounded<T, E>(
    limit: Duration,
    call: impl Future<Output = Result<T, E>>,
    on_timeout: E,
) -> Result<T, E> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout),
    }
}

/// Best-effort side channel for operator-facing notifications.
///
/// [`notify`](Self::notify) never fails: a delivery problem is logged and
/// swallowed so that it cannot mask the error being reported.
#[derive(Clone)]
pub struct DiagnosticChannel {
    publisher: Option<Arc<dyn Publisher>>,
    destination: Option<String>,
    timeout: Duration,
}

impl DiagnosticChannel {
    pub fn new(
        publisher: Arc<dyn Publisher>,
        destination: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            publisher: Some(publisher),
            destination,
            timeout,
        }
    }

    /// A channel that only logs.
    pub fn log_only() -> Self {
        Self {
            publisher: None,
            destination: None,
            timeout: Duration::ZERO,
        }
    }

    pub async fn notify(&self, text: &str) {
        info!("Diagnostic: {}", text);

        let (Some(publisher), Some(destination)) = (&self.publisher, &self.destination) else {
            return;
        };

        let result = bounded(
            self.timeout,
            publisher.send_text(destination, text),
            DeliveryError::Timeout,
        )
        .await;

        if let Err(e) = result {
            warn!("Failed to deliver diagnostic to {}: {}", destination, e);
        }
    }
}

impl std::fmt::Debug for DiagnosticChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticChannel")
            .field("enabled", &self.publisher.is_some())
            .field("destination", &self.destination)
            .finish()
    }
}
