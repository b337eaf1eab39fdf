use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// JSON body returned by the booking endpoint for every non-preflight request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub booking_id: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, booking_id: impl Into<String>) -> Self {
        ApiResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            booking_id: Some(booking_id.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            status: ResponseStatus::Error,
            message: message.into(),
            booking_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_has_no_booking_id() {
        let json = serde_json::to_value(ApiResponse::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "nope" }));
    }

    #[test]
    fn success_body_uses_camel_case_id() {
        let json = serde_json::to_value(ApiResponse::success("ok", "abc")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["bookingId"], "abc");
    }
}
