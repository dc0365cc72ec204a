//! The `{Info, Value}` envelope every response is wrapped in.

use serde::{Deserialize, Serialize};

use crate::codec::lenient_int;

crate::open_string! {
    /// Outcome code reported in `Info.Code`.
    pub struct ResponseCode {
        SUCCESS = "Success",
        WARNINGS_FOUND_DURING_PARSING = "WarningsFoundDuringParsing",
        POSSIBLE_TRUNCATION_FROM_TIMEOUT = "PossibleTruncationFromTimeout",
        SOME_ERRORS = "SomeErrors",
        MISSING_PARAMETER = "MissingParameter",
        INVALID_PARAMETER = "InvalidParameter",
        INSUFFICIENT_DATA = "InsufficientData",
        DATA_NOT_FOUND = "DataNotFound",
        COORDINATES_NOT_FOUND = "CoordinatesNotFound",
        CONSTRAINT_ERROR = "ConstraintError",
        AUTHENTICATION_ERROR = "AuthenticationError",
        UNAUTHORIZED = "Unauthorized",
        DUPLICATE_ASSET = "DuplicateAsset",
        CONVERSION_EXCEPTION = "ConversionException",
        TIMEOUT = "Timeout",
        TRIAL_EXPIRED = "TrialExpired",
        INSUFFICIENT_CREDITS = "InsufficientCredits",
        UNHANDLED_EXCEPTION = "UnhandledException",
    }
}

impl ResponseCode {
    /// Codes that mean the transaction produced a usable value.
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
            || *self == Self::WARNINGS_FOUND_DURING_PARSING
            || *self == Self::POSSIBLE_TRUNCATION_FROM_TIMEOUT
            || *self == Self::SOME_ERRORS
    }
}

/// Code and message only. Used for the secondary step results inside a
/// parse response and as the fallback when a full envelope cannot be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponseInfoLite {
    #[serde(default)]
    pub code: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponseInfoLite {
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }
}

/// Account snapshot returned with every transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "IPAddress", default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub credits_remaining: f64,
    #[serde(default, with = "lenient_int")]
    pub credits_used: i64,
    #[serde(default, with = "lenient_int")]
    pub maximum_concurrent_requests: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// Full transaction info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponseInfo {
    #[serde(default)]
    pub code: ResponseCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, with = "lenient_int")]
    pub total_elapsed_milliseconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<AccountInfo>,
}

impl ApiResponseInfo {
    pub fn lite(&self) -> ApiResponseInfoLite {
        ApiResponseInfoLite {
            code: self.code.clone(),
            message: self.message.clone(),
        }
    }
}

/// The envelope around every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponse<T> {
    pub info: ApiResponseInfo,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
}

/// Envelope read when the typed one does not fit, e.g. on an error status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub info: Option<ErrorInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ErrorInfo {
    #[serde(default)]
    pub code: ResponseCode,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl ErrorInfo {
    pub fn lite(&self) -> ApiResponseInfoLite {
        ApiResponseInfoLite {
            code: self.code.clone(),
            message: self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_class_codes() {
        for code in ["Success", "WarningsFoundDuringParsing", "PossibleTruncationFromTimeout", "SomeErrors"] {
            assert!(ResponseCode::new(code).is_success(), "{code}");
        }
        for code in ["DataNotFound", "success", "", "SomethingNew"] {
            assert!(!ResponseCode::new(code).is_success(), "{code}");
        }
    }

    #[test]
    fn envelope_reads_info_and_value() {
        let body = r#"{
            "Info": {
                "Code": "Success",
                "Message": "ok",
                "TransactionId": "abc",
                "TotalElapsedMilliseconds": 12.0,
                "CustomerDetails": {"AccountId": "1234", "IPAddress": "10.0.0.1", "CreditsRemaining": 99.5, "CreditsUsed": 3.0, "MaximumConcurrentRequests": 4}
            },
            "Value": [1, 2, 3]
        }"#;
        let env: ApiResponse<Vec<i32>> = serde_json::from_str(body).unwrap();
        assert_eq!(env.info.code, ResponseCode::SUCCESS);
        assert_eq!(env.info.total_elapsed_milliseconds, 12);
        let account = env.info.customer_details.unwrap();
        assert_eq!(account.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(account.credits_used, 3);
        assert_eq!(env.value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn envelope_without_value() {
        let env: ApiResponse<Vec<i32>> =
            serde_json::from_str(r#"{"Info":{"Code":"DataNotFound","Message":"gone"}}"#).unwrap();
        assert!(env.value.is_none());
        assert_eq!(env.info.lite().message.as_deref(), Some("gone"));
    }

    #[test]
    fn error_envelope_tolerates_missing_info() {
        let env: ErrorEnvelope = serde_json::from_str("{}").unwrap();
        assert!(env.info.is_none());
        let env: ErrorEnvelope =
            serde_json::from_str(r#"{"Info":{"Code":"Unauthorized"},"Value":"whatever"}"#).unwrap();
        assert_eq!(env.info.unwrap().code, ResponseCode::UNAUTHORIZED);
    }
}
