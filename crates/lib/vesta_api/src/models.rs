//! API-specific response models.

use serde::{Deserialize, Serialize};

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. `not_found`).
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}
