use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::document::{Document, RequestDocument, ResourceObject, JSONAPI_MEDIA_TYPE, RESOURCE_TYPE};
use super::error::ApiError;
use super::AppState;
use crate::error::ReunionError;
use crate::model::{Id, Reunion};
use crate::ops::reunion_ops::{self, ReunionParams};
use crate::queries::reunion_queries;

type HandlerResult = Result<Response, ApiError>;

pub async fn index(State(state): State<AppState>) -> HandlerResult {
    let reunions = state
        .with_conn(|conn| Ok(reunion_queries::kept_reunions(conn)?))
        .await?;
    Ok(collection(&reunions))
}

pub async fn with_soft_delete(State(state): State<AppState>) -> HandlerResult {
    let reunions = state
        .with_conn(|conn| Ok(reunion_queries::reunions_with_soft_delete(conn)?))
        .await?;
    Ok(collection(&reunions))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let id = parse_id(&id)?;
    let reunion = state
        .with_conn(move |conn| Ok(reunion_ops::get_reunion(conn, id)?))
        .await?;
    Ok(single(&reunion))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RequestDocument>, JsonRejection>,
) -> HandlerResult {
    let params = read_params(payload.map(|Json(doc)| doc).map_err(ApiError::from))?;
    let reunion = state
        .with_conn(move |conn| Ok(reunion_ops::create_reunion(conn, &params)?))
        .await?;
    Ok(single(&reunion))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RequestDocument>, JsonRejection>,
) -> HandlerResult {
    let id = parse_id(&id)?;
    let payload = payload.map(|Json(doc)| doc).map_err(ApiError::from);
    let reunion = state
        .with_conn(move |conn| {
            // Missing and discarded records are rejected before the body is looked at.
            reunion_ops::get_reunion(conn, id)?;
            let params = read_params(payload)?;
            Ok(reunion_ops::update_reunion(conn, id, &params)?)
        })
        .await?;
    Ok(single(&reunion))
}

pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let id = parse_id(&id)?;
    let reunion = state
        .with_conn(move |conn| Ok(reunion_ops::discard_reunion(conn, id)?))
        .await?;
    Ok(single(&reunion))
}

pub async fn publish(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let id = parse_id(&id)?;
    let reunion = state
        .with_conn(move |conn| Ok(reunion_ops::publish_reunion(conn, id)?))
        .await?;
    Ok(single(&reunion))
}

/// Path segments that are not reunion ids can never name a record.
fn parse_id(raw: &str) -> Result<Id<Reunion>, ApiError> {
    raw.parse().map_err(|_| ReunionError::not_found(raw).into())
}

fn read_params(payload: Result<RequestDocument, ApiError>) -> Result<ReunionParams, ApiError> {
    let data = payload?.data;
    if let Some(kind) = data.kind.filter(|kind| kind != RESOURCE_TYPE) {
        return Err(ApiError::ResourceType(kind));
    }
    data.attributes
        .into_params()
        .map_err(|errors| ReunionError::Validation(errors).into())
}

fn single(reunion: &Reunion) -> Response {
    jsonapi(Document {
        data: ResourceObject::from(reunion),
    })
}

fn collection(reunions: &[Reunion]) -> Response {
    jsonapi(Document {
        data: reunions.iter().map(ResourceObject::from).collect::<Vec<_>>(),
    })
}

fn jsonapi<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)], Json(body)).into_response()
}
