//! Business-logic collaborators behind the secure pipeline.
//!
//! These implement the format-level rules only: device and account
//! registries live outside this crate and a full deployment would back
//! the calls below with one. The pipeline neither knows nor cares — it
//! hands over a decrypted payload and encrypts whatever comes back.

use std::sync::LazyLock;

use regex::Regex;
use sealbox_core::{SecureService, ServiceResponse};
use serde_json::{Map, Value};

use crate::models::{TokenRequest, VerifyRequest};

static DEVICE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-_]{8,64}$").expect("device id pattern is valid"));

static ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("account id pattern is valid"));

/// Validates a device presented by a client, optionally against a
/// bearer token carried in the payload's `authorization` field.
pub struct VerifyService;

impl SecureService for VerifyService {
    fn handle(
        &self,
        payload: Map<String, Value>,
        authorization: Option<String>,
    ) -> ServiceResponse {
        let request: VerifyRequest = match serde_json::from_value(Value::Object(payload)) {
            Ok(request) => request,
            Err(_) => return ServiceResponse::new(212, "request fields malformed"),
        };
        verify(&request, authorization.as_deref())
    }
}

pub(crate) fn verify(request: &VerifyRequest, authorization: Option<&str>) -> ServiceResponse {
    let Some(device_id) = request.device_id.as_deref() else {
        return ServiceResponse::new(212, "device id is required");
    };
    if !DEVICE_ID_RE.is_match(device_id) {
        return ServiceResponse::new(212, "device id format invalid");
    }

    match authorization {
        Some(header) => {
            let Some(token) = header.strip_prefix("Bearer ") else {
                tracing::warn!("verification rejected: authorization is not a Bearer header");
                return ServiceResponse::new(202, "authorization must use the Bearer scheme");
            };
            let token = token.trim();
            if token.is_empty() {
                return ServiceResponse::new(203, "token must not be empty");
            }

            tracing::info!(device_id, "device verified with token");
            ServiceResponse::new(100, "verification succeeded")
                .with_token(token)
                .with_data(Map::from_iter([(
                    "device_id".to_string(),
                    Value::from(device_id),
                )]))
        }
        None => {
            tracing::info!(device_id, "device verified");
            ServiceResponse::new(101, "welcome").with_data(Map::from_iter([(
                "device_id".to_string(),
                Value::from(device_id),
            )]))
        }
    }
}

/// Issues access tokens for a device/account pairing.
pub struct TokenService;

impl SecureService for TokenService {
    fn handle(
        &self,
        payload: Map<String, Value>,
        _authorization: Option<String>,
    ) -> ServiceResponse {
        let request: TokenRequest = match serde_json::from_value(Value::Object(payload)) {
            Ok(request) => request,
            Err(_) => return ServiceResponse::new(212, "request fields malformed"),
        };
        issue_token(&request)
    }
}

pub(crate) fn issue_token(request: &TokenRequest) -> ServiceResponse {
    if !DEVICE_ID_RE.is_match(&request.device_id) {
        return ServiceResponse::new(212, "device id format invalid");
    }
    let Some(account_id) = request.account_id.as_deref() else {
        return ServiceResponse::new(213, "account id is required");
    };
    if !ACCOUNT_ID_RE.is_match(account_id) {
        return ServiceResponse::new(213, "account id must be 16 digits");
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    tracing::info!(device_id = %request.device_id, "token issued");
    ServiceResponse::new(100, "token issued")
        .with_token(token)
        .with_data(Map::from_iter([(
            "account_id".to_string(),
            Value::from(account_id),
        )]))
}

#[cfg(test)]
mod tests {
    use sealbox_core::SecureService;
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[test]
    fn verify_without_token_greets_the_device() {
        let response = VerifyService.handle(payload(json!({"device_id": "device-0001"})), None);
        assert_eq!(response.status, 101);
        assert_eq!(response.data.unwrap()["device_id"], "device-0001");
    }

    #[test]
    fn verify_with_bearer_token_succeeds() {
        let response = VerifyService.handle(
            payload(json!({"device_id": "device-0001"})),
            Some("Bearer tok-123".to_string()),
        );
        assert_eq!(response.status, 100);
        assert_eq!(response.token.as_deref(), Some("tok-123"));
    }

    #[test]
    fn verify_rejects_non_bearer_authorization() {
        let response = VerifyService.handle(
            payload(json!({"device_id": "device-0001"})),
            Some("Token tok-123".to_string()),
        );
        assert_eq!(response.status, 202);
    }

    #[test]
    fn verify_rejects_empty_token() {
        let response = VerifyService.handle(
            payload(json!({"device_id": "device-0001"})),
            Some("Bearer    ".to_string()),
        );
        assert_eq!(response.status, 203);
    }

    #[test]
    fn verify_rejects_malformed_device_id() {
        let response = VerifyService.handle(payload(json!({"device_id": "short"})), None);
        assert_eq!(response.status, 212);

        let response = VerifyService.handle(payload(json!({"device_id": "has spaces!"})), None);
        assert_eq!(response.status, 212);
    }

    #[test]
    fn verify_requires_device_id() {
        let response = VerifyService.handle(payload(json!({})), None);
        assert_eq!(response.status, 212);
    }

    #[test]
    fn token_issuance_succeeds_for_valid_pairing() {
        let response = TokenService.handle(
            payload(json!({"device_id": "device-0001", "account_id": "1234567890123456"})),
            None,
        );
        assert_eq!(response.status, 100);
        assert_eq!(response.token.unwrap().len(), 32);
        assert_eq!(response.data.unwrap()["account_id"], "1234567890123456");
    }

    #[test]
    fn token_issuance_rejects_bad_account_id() {
        let response = TokenService.handle(
            payload(json!({"device_id": "device-0001", "account_id": "123"})),
            None,
        );
        assert_eq!(response.status, 213);
    }

    #[test]
    fn token_issuance_requires_account_id() {
        let response = TokenService.handle(payload(json!({"device_id": "device-0001"})), None);
        assert_eq!(response.status, 213);
    }

    #[test]
    fn token_issuance_rejects_missing_device_id() {
        let response = TokenService.handle(payload(json!({"account_id": "1234567890123456"})), None);
        assert_eq!(response.status, 212);
    }
}
