use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Request, Response, StatusCode};
use shared::types::{SignUpData, SignUpResponse};
use tracing::info;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::http::utils::{BoxError, deliver_serialized_json, read_json};

/// POST /users
pub async fn handle_sign_up<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, AppError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    info!("Processing sign-up request");

    let data: SignUpData = read_json(req.into_body()).await?;
    let credential = state
        .auth
        .sign_up(&data.user_name, &data.email, &data.password)
        .await?;

    let response = SignUpResponse {
        username: credential.username,
        email: credential.email,
    };
    Ok(deliver_serialized_json(&response, StatusCode::CREATED))
}
