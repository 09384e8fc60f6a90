use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Request, Response, StatusCode};
use shared::types::{TownCreateData, TownJoinData};
use tracing::info;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::http::utils::{
    BoxError, deliver_serialized_json, extract_access_token, get_bearer_token, read_json,
};

/// POST /towns
pub async fn handle_create_town<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, AppError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    info!("Processing town create request");

    let (parts, body) = req.into_parts();
    let mut data: TownCreateData = read_json(body).await?;
    data.access_token = extract_access_token(data.access_token.take(), &parts.headers);

    let created = state.towns.create_town(data).await?;
    Ok(deliver_serialized_json(&created, StatusCode::CREATED))
}

/// POST /sessions
pub async fn handle_join_town<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, AppError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    info!("Processing town join request");

    let (parts, body) = req.into_parts();
    let mut data: TownJoinData = read_json(body).await?;
    data.access_token = extract_access_token(data.access_token.take(), &parts.headers);

    let joined = state.towns.join_town(data).await?;
    Ok(deliver_serialized_json(&joined, StatusCode::OK))
}

/// GET /towns
pub async fn handle_list_towns<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, AppError> {
    let token = get_bearer_token(req.headers());
    let listing = state.towns.list_towns(token.as_deref()).await?;
    Ok(deliver_serialized_json(&listing, StatusCode::OK))
}
