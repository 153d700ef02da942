//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::db::Storage;
use crate::services::email::Notifier;

/// Default bound on the review confirmation send when SMTP is not configured.
const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like storage and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog, loaded once at startup
    /// * `storage` - User, review and contact persistence
    /// * `notifier` - Review confirmation sender
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                storage,
                notifier,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.inner.storage.as_ref()
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    /// How long a review confirmation may take before it is abandoned.
    #[must_use]
    pub fn notify_timeout(&self) -> Duration {
        self.inner
            .config
            .email
            .as_ref()
            .map_or(DEFAULT_NOTIFY_TIMEOUT, |email| email.timeout)
    }
}
