//! API response envelopes

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by `POST settings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSettingsResponse {
    pub success: bool,
}
