//! Settings synchronization
//!
//! Draft / snapshot lifecycle for the delivery settings document, plus the
//! persistence boundary it talks to. The draft is mutated freely while the
//! operator works; the snapshot only moves on a successful load or save,
//! and the dirty flag is a deep comparison of the two.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use shared::{DeliverySettings, SaveSettingsResponse};

use crate::error::{EditorError, EditorResult};
use crate::validate::validate_settings;

/// Settings API endpoint path
const SETTINGS_PATH: &str = "api/delivery/settings";

/// Configuration for the settings API client
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Bearer token for authenticated deployments
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | DELIVERY_API_URL | http://localhost:3000 |
    /// | DELIVERY_API_TOKEN | unset |
    /// | DELIVERY_API_TIMEOUT | 30 |
    pub fn from_env() -> Self {
        let base_url = std::env::var("DELIVERY_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let mut config = Self::new(base_url);
        if let Ok(token) = std::env::var("DELIVERY_API_TOKEN") {
            config.token = Some(token);
        }
        if let Ok(timeout) = std::env::var("DELIVERY_API_TIMEOUT")
            && let Ok(seconds) = timeout.parse()
        {
            config.timeout = seconds;
        }
        config
    }
}

/// Persistence boundary for the delivery settings document
#[async_trait]
pub trait SettingsApi {
    async fn fetch_settings(&self) -> EditorResult<DeliverySettings>;
    async fn save_settings(
        &self,
        settings: &DeliverySettings,
    ) -> EditorResult<SaveSettingsResponse>;
}

/// HTTP implementation of [`SettingsApi`]
#[derive(Debug, Clone)]
pub struct HttpSettingsApi {
    client: reqwest::Client,
    config: SyncConfig,
}

impl HttpSettingsApi {
    pub fn new(config: SyncConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> Option<String> {
        self.config.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    /// Decode a response, mapping non-2xx statuses to a persistence error
    /// that carries the server message when one is present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> EditorResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServerMessage>(&body)
            .map(|payload| payload.message)
            .unwrap_or_else(|_| format!("request failed with status {}", status));
        Err(EditorError::persistence(message))
    }
}

#[async_trait]
impl SettingsApi for HttpSettingsApi {
    async fn fetch_settings(&self) -> EditorResult<DeliverySettings> {
        let mut request = self.client.get(self.url(SETTINGS_PATH));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn save_settings(
        &self,
        settings: &DeliverySettings,
    ) -> EditorResult<SaveSettingsResponse> {
        let mut request = self.client.post(self.url(SETTINGS_PATH)).json(settings);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }
}

/// Error payload shape used by the administration API
#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: String,
}

/// Draft settings plus the last known good snapshot
#[derive(Debug, Clone, Default)]
pub struct SettingsSync {
    draft: DeliverySettings,
    snapshot: DeliverySettings,
}

impl SettingsSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DeliverySettings {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DeliverySettings {
        &mut self.draft
    }

    /// Last loaded-or-saved state
    pub fn snapshot(&self) -> &DeliverySettings {
        &self.snapshot
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.snapshot
    }

    /// Load settings, hydrating draft and snapshot in one step.
    ///
    /// A load failure is logged and leaves the defaults in place so the
    /// page still renders instead of crashing.
    pub async fn load(&mut self, api: &impl SettingsApi) -> &DeliverySettings {
        match api.fetch_settings().await {
            Ok(settings) => {
                self.draft = settings.clone();
                self.snapshot = settings;
                tracing::info!(zones = self.draft.zones.len(), "delivery settings loaded");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load delivery settings, using defaults");
            }
        }
        &self.draft
    }

    /// Persist the draft if it changed.
    ///
    /// Returns `Ok(false)` when the draft was clean and no request was
    /// made. Validation failures and persistence failures leave draft and
    /// snapshot untouched, so the operator can correct and retry.
    pub async fn save(&mut self, api: &impl SettingsApi) -> EditorResult<bool> {
        if !self.is_dirty() {
            tracing::debug!("settings unchanged, skipping save");
            return Ok(false);
        }

        let violations = validate_settings(&self.draft);
        if !violations.is_empty() {
            return Err(EditorError::Validation(violations));
        }

        let response = api.save_settings(&self.draft).await?;
        if !response.success {
            return Err(EditorError::persistence("server rejected the settings update"));
        }

        self.snapshot = self.draft.clone();
        tracing::info!(zones = self.draft.zones.len(), "delivery settings saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Recording double for the persistence boundary
    #[derive(Default)]
    struct RecordingApi {
        stored: Mutex<Option<DeliverySettings>>,
        saves: Mutex<u32>,
        reject: bool,
    }

    #[async_trait]
    impl SettingsApi for RecordingApi {
        async fn fetch_settings(&self) -> EditorResult<DeliverySettings> {
            match self.stored.lock().unwrap().clone() {
                Some(settings) => Ok(settings),
                None => Err(EditorError::persistence("settings unavailable")),
            }
        }

        async fn save_settings(
            &self,
            settings: &DeliverySettings,
        ) -> EditorResult<SaveSettingsResponse> {
            *self.saves.lock().unwrap() += 1;
            if self.reject {
                return Ok(SaveSettingsResponse { success: false });
            }
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(SaveSettingsResponse { success: true })
        }
    }

    fn valid_draft() -> DeliverySettings {
        DeliverySettings {
            default_price: 100.0,
            ..DeliverySettings::default()
        }
    }

    #[tokio::test]
    async fn test_load_hydrates_draft_and_snapshot() {
        let api = RecordingApi::default();
        *api.stored.lock().unwrap() = Some(valid_draft());

        let mut sync = SettingsSync::new();
        sync.load(&api).await;

        assert_eq!(sync.draft().default_price, 100.0);
        assert!(!sync.is_dirty());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_defaults() {
        let api = RecordingApi::default();
        let mut sync = SettingsSync::new();
        sync.load(&api).await;

        assert_eq!(sync.draft(), &DeliverySettings::default());
        assert!(!sync.is_dirty());
    }

    #[tokio::test]
    async fn test_clean_save_is_noop() {
        let api = RecordingApi::default();
        let mut sync = SettingsSync::new();

        assert!(!sync.save(&api).await.unwrap());
        assert_eq!(*api.saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_settings_abort_before_network() {
        let api = RecordingApi::default();
        let mut sync = SettingsSync::new();
        sync.draft_mut().default_price = 100.0;
        sync.draft_mut().is_free_delivery = true;
        sync.draft_mut().free_delivery_threshold = 0.0;

        let err = sync.save(&api).await.unwrap_err();
        assert!(!err.violations().is_empty());
        assert_eq!(*api.saves.lock().unwrap(), 0);
        assert!(sync.is_dirty());
    }

    #[tokio::test]
    async fn test_successful_save_moves_snapshot() {
        let api = RecordingApi::default();
        let mut sync = SettingsSync::new();
        *sync.draft_mut() = valid_draft();
        assert!(sync.is_dirty());

        assert!(sync.save(&api).await.unwrap());
        assert!(!sync.is_dirty());
        assert_eq!(*api.saves.lock().unwrap(), 1);

        // a second save with no further edits stays local
        assert!(!sync.save(&api).await.unwrap());
        assert_eq!(*api.saves.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_dirty_state() {
        let api = RecordingApi { reject: true, ..RecordingApi::default() };
        let mut sync = SettingsSync::new();
        *sync.draft_mut() = valid_draft();

        assert!(sync.save(&api).await.is_err());
        assert!(sync.is_dirty());
    }
}
