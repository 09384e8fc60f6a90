use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Body;
use hyper::{Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::AppError;

/// Request bodies above this size are refused.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read the whole body and parse it as JSON.
pub async fn read_json<T, B>(body: B) -> Result<T, AppError>
where
    T: DeserializeOwned,
    B: Body,
    B::Error: Into<BoxError>,
{
    let bytes = Limited::new(body, MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read body: {}", e)))?
        .to_bytes();

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

/// Serialize any `Serialize` type and deliver it as a JSON response.
pub fn deliver_serialized_json<T: Serialize>(data: &T, status: StatusCode) -> Response<Full<Bytes>> {
    match serde_json::to_vec(data) {
        Ok(json) => {
            debug!("Delivering serialized JSON response, size: {} bytes", json.len());
            build_json(status, Bytes::from(json))
        }
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            deliver_error(&AppError::Internal(e.into()))
        }
    }
}

/// Deliver `err` as the standard `{status, code, message}` envelope.
pub fn deliver_error(err: &AppError) -> Response<Full<Bytes>> {
    let status = err.status();
    if err.is_client_error() {
        warn!("Request failed: {} ({})", err.to_code(), status.as_u16());
    }

    let body = serde_json::to_vec(&err.to_response()).unwrap_or_else(|e| {
        error!("Failed to serialize error response: {}", e);
        br#"{"status":"error","code":"INTERNAL_ERROR","message":"internal error"}"#.to_vec()
    });

    build_json(status, Bytes::from(body))
}

fn build_json(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
