//! Transient request/response DTOs. Nothing here outlives a single request.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `POST /auth/bot/create-verification/`.
///
/// Required string fields use `#[serde(default)]` so an absent field fails
/// validation (400) instead of JSON deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVerificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,
    pub chat_id: Option<i64>,
}

/// Body of `POST /auth/bot/check/`.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckVerificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
}

/// Body of `PATCH /users/update_profile/`. Only fields the client actually
/// sent are forwarded upstream.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

/// Body of `POST /payments/topup/`.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TopupRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "amount must be a positive integer"))]
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_phone_number_fails_validation() {
        let request: CreateVerificationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_code_fails_validation() {
        let request: CheckVerificationRequest =
            serde_json::from_value(serde_json::json!({"phone_number": "+996700000000", "code": ""}))
                .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn profile_update_drops_null_fields() {
        let request = UpdateProfileRequest {
            first_name: Some("Aibek".to_string()),
            last_name: None,
            middle_name: None,
            email: None,
            birth_date: None,
        };
        let forwarded = serde_json::to_value(&request).unwrap();
        assert_eq!(forwarded, serde_json::json!({"first_name": "Aibek"}));
    }

    #[test]
    fn zero_amount_fails_validation() {
        let request: TopupRequest =
            serde_json::from_value(serde_json::json!({"amount": 0})).unwrap();
        assert!(request.validate().is_err());
    }
}
