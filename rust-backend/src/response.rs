use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

/// Uniform success wrapper returned by every endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> HttpResponse {
        Self::new(StatusCode::OK, data, message).into_response()
    }

    pub fn created(data: T, message: impl Into<String>) -> HttpResponse {
        Self::new(StatusCode::CREATED, data, message).into_response()
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}

/// Payload for operations whose success carries no data.
pub fn empty() -> serde_json::Value {
    serde_json::json!({})
}
