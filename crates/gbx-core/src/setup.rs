//! One-time installation setup status.
//!
//! The status starts unresolved, is fetched from the server at most once
//! per process, and is memoized for the rest of the process lifetime.
//! Concurrent callers attach to the single in-flight fetch instead of
//! starting their own.

use std::sync::{Arc, PoisonError, RwLock};

use crate::api::ApiClient;

/// Resolved setup state. The unresolved state is the absent value in
/// [`SetupStatusCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    /// First-run setup has not been completed; only setup destinations
    /// are reachable.
    Required,
    /// Setup is done; normal routing applies.
    Complete,
}

/// Single-flight, memoized resolver for the setup status.
#[derive(Debug, Default)]
pub struct SetupStatusCache {
    status: Arc<RwLock<Option<SetupStatus>>>,
    fetch: tokio::sync::Mutex<()>,
}

impl SetupStatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resolved status without suspending, if known.
    pub fn current(&self) -> Option<SetupStatus> {
        *self.status.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forces the status to `Complete` without another remote round trip
    /// (the local setup wizard finished).
    pub fn mark_complete(&self) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) =
            Some(SetupStatus::Complete);
    }

    /// Resolves the setup status, fetching it from the server on first use.
    ///
    /// At most one fetch is in flight at any time; callers arriving while
    /// it runs wait on the same fetch and observe its result. A failed
    /// fetch resolves to `Required` so an unreachable status endpoint
    /// never unlocks protected destinations.
    pub async fn check(&self, api: &ApiClient) -> SetupStatus {
        if let Some(status) = self.current() {
            return status;
        }

        let _guard = self.fetch.lock().await;
        // Another caller may have resolved the status while we waited.
        if let Some(status) = self.current() {
            return status;
        }

        // The fetch runs detached so an abandoned navigation cannot cancel
        // it; the result lands in the shared cache either way and benefits
        // every later navigation.
        let api = api.clone();
        let cell = Arc::clone(&self.status);
        let handle = tokio::spawn(async move {
            let status = match api.setup_status().await {
                Ok(response) if response.is_admin_registered => SetupStatus::Complete,
                Ok(_) => SetupStatus::Required,
                Err(err) => {
                    tracing::warn!("setup status check failed, assuming setup is required: {err}");
                    SetupStatus::Required
                }
            };
            *cell.write().unwrap_or_else(PoisonError::into_inner) = Some(status);
            status
        });

        match handle.await {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!("setup status task failed, assuming setup is required: {err}");
                *self.status.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(SetupStatus::Required);
                SetupStatus::Required
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::credentials::CredentialStore;

    fn api_for(uri: &str, dir: &std::path::Path) -> ApiClient {
        let store = Arc::new(CredentialStore::open_at(dir.join("credentials.json")));
        ApiClient::new(uri, store)
    }

    fn status_body(registered: bool) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "is_admin_registered": registered }))
    }

    /// Test: the payload maps to Required/Complete as documented.
    #[tokio::test]
    async fn test_status_mapping() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(status_body(false))
            .mount(&server)
            .await;

        let cache = SetupStatusCache::new();
        assert_eq!(cache.current(), None);
        assert_eq!(
            cache.check(&api_for(&server.uri(), dir.path())).await,
            SetupStatus::Required
        );

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(status_body(true))
            .mount(&server)
            .await;

        let cache = SetupStatusCache::new();
        assert_eq!(
            cache.check(&api_for(&server.uri(), dir.path())).await,
            SetupStatus::Complete
        );
    }

    /// Test: two concurrent checks produce exactly one outbound fetch
    /// (single-flight), and both observe the same result.
    #[tokio::test]
    async fn test_single_flight() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(status_body(true).set_delay(Duration::from_millis(100)))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server.uri(), dir.path());
        let cache = SetupStatusCache::new();

        let (first, second) = tokio::join!(cache.check(&api), cache.check(&api));
        assert_eq!(first, SetupStatus::Complete);
        assert_eq!(second, SetupStatus::Complete);

        server.verify().await;
    }

    /// Test: a resolved status is returned without further fetches.
    #[tokio::test]
    async fn test_resolution_is_memoized() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(status_body(false))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server.uri(), dir.path());
        let cache = SetupStatusCache::new();

        assert_eq!(cache.check(&api).await, SetupStatus::Required);
        assert_eq!(cache.check(&api).await, SetupStatus::Required);
        assert_eq!(cache.current(), Some(SetupStatus::Required));

        server.verify().await;
    }

    /// Test: a server error resolves to Required, never Complete
    /// (fail-closed).
    #[tokio::test]
    async fn test_fail_closed_on_server_error() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let cache = SetupStatusCache::new();
        assert_eq!(
            cache.check(&api_for(&server.uri(), dir.path())).await,
            SetupStatus::Required
        );
        assert_eq!(cache.current(), Some(SetupStatus::Required));
    }

    /// Test: an unreachable endpoint also resolves to Required
    /// (fail-closed).
    #[tokio::test]
    async fn test_fail_closed_on_unreachable_server() {
        let dir = tempdir().unwrap();
        let cache = SetupStatusCache::new();
        // Nothing listens on this port.
        let api = api_for("http://127.0.0.1:9/api/v1", dir.path());
        assert_eq!(cache.check(&api).await, SetupStatus::Required);
    }

    /// Test: abandoning a caller mid-fetch does not cancel the fetch; the
    /// result still lands in the shared cache.
    #[tokio::test]
    async fn test_abandoned_check_still_resolves() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(status_body(true).set_delay(Duration::from_millis(100)))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server.uri(), dir.path());
        let cache = SetupStatusCache::new();

        {
            let check = cache.check(&api);
            tokio::pin!(check);
            // Poll long enough to start the fetch, then drop the caller.
            let _ = tokio::time::timeout(Duration::from_millis(10), &mut check).await;
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(cache.current(), Some(SetupStatus::Complete));

        server.verify().await;
    }

    /// Test: mark_complete overrides a Required resolution locally.
    #[tokio::test]
    async fn test_mark_complete_overrides() {
        let dir = tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/status"))
            .respond_with(status_body(false))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server.uri(), dir.path());
        let cache = SetupStatusCache::new();

        assert_eq!(cache.check(&api).await, SetupStatus::Required);
        cache.mark_complete();
        assert_eq!(cache.current(), Some(SetupStatus::Complete));
        // No second fetch: the override is local and final.
        assert_eq!(cache.check(&api).await, SetupStatus::Complete);

        server.verify().await;
    }
}
