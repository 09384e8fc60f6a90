use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Request, Response, StatusCode};
use shared::types::SignInData;
use tracing::info;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::http::utils::{BoxError, deliver_serialized_json, read_json};

/// POST /login
pub async fn handle_sign_in<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, AppError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    info!("Processing sign-in request");

    let data: SignInData = read_json(req.into_body()).await?;
    let signed_in = state.auth.sign_in(&data.email, &data.password).await?;

    Ok(deliver_serialized_json(&signed_in, StatusCode::OK))
}
