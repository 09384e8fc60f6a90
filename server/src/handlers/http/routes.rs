use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Method, Request, Response, StatusCode};
use tracing::info;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::http::utils::{BoxError, deliver_error, deliver_serialized_json};
use crate::handlers::http::{auth, towns};

// ---------------------------------------------------------------------------
// Route table
//
//   Open:  POST /users, POST /login, GET /health
//   Gated: POST /towns, POST /sessions   (identity required)
//          GET  /towns                   (identity optional)
//
// Gating happens inside the town service, so every entry point to a town
// operation goes through the same decision.
// ---------------------------------------------------------------------------

/// Dispatch one request. Never fails: errors become JSON error responses.
pub async fn route<B>(req: Request<B>, state: AppState) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    info!("{} {}", method, path);

    let result = match (&method, path.as_str()) {
        (&Method::GET, "/health") => Ok(deliver_serialized_json(
            &serde_json::json!({ "status": "ok" }),
            StatusCode::OK,
        )),
        (&Method::POST, "/users") => auth::handle_sign_up(req, &state).await,
        (&Method::POST, "/login") => auth::handle_sign_in(req, &state).await,
        (&Method::POST, "/towns") => towns::handle_create_town(req, &state).await,
        (&Method::GET, "/towns") => towns::handle_list_towns(req, &state).await,
        (&Method::POST, "/sessions") => towns::handle_join_town(req, &state).await,
        _ => Err(AppError::NotFound("route")),
    };

    Ok(result.unwrap_or_else(|e| deliver_error(&e)))
}
