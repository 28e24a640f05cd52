//! Request models carried inside decrypted envelopes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Device verification request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct VerifyRequest {
    /// Client device identifier
    #[validate(length(min = 1, max = 64))]
    pub device_id: Option<String>,

    /// Account identifier bound to the device
    #[validate(length(min = 1, max = 64))]
    pub account_id: Option<String>,
}

/// Token issuance request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct TokenRequest {
    /// Client device identifier
    #[validate(length(min = 1, max = 64))]
    pub device_id: String,

    /// Account identifier to issue the token for
    #[validate(length(min = 1, max = 64))]
    pub account_id: Option<String>,
}
