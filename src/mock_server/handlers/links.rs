//! Link endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{session_token, unauthorized};
use crate::mock_server::state::MockState;
use crate::LinkFields;

/// Editable link fields as posted by the client.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinkForm {
    pub name: Option<String>,
    pub url: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
}

impl From<LinkForm> for LinkFields {
    fn from(form: LinkForm) -> Self {
        LinkFields {
            name: form.name,
            url: form.url,
            price: form.price,
            description: form.description,
            ..Default::default()
        }
    }
}

/// Reject the request unless it carries the token of an open session.
async fn authorize(state: &RwLock<MockState>, headers: &HeaderMap) -> Result<(), Response> {
    let token = session_token(headers).ok_or_else(unauthorized)?;
    if state.read().await.has_session(&token) {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

fn link_not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": format!("No link found with id: {}", id)
        })),
    )
        .into_response()
}

/// GET /links
pub async fn list_links(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers).await {
        return rejection;
    }

    let state = state.read().await;
    Json(serde_json::json!({ "success": true, "links": state.list_links() })).into_response()
}

/// POST /links
pub async fn create_link(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Form(form): Form<LinkForm>,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers).await {
        return rejection;
    }

    let mut state = state.write().await;
    let link = state.create_link(form.into());
    Json(serde_json::json!({ "success": true, "link": link })).into_response()
}

/// GET /links/{id}
pub async fn get_link(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers).await {
        return rejection;
    }

    let state = state.read().await;
    match state.get_link(&id) {
        Some(link) => Json(serde_json::json!({ "success": true, "link": link })).into_response(),
        None => link_not_found(&id),
    }
}

/// PUT /links/{id}
pub async fn update_link(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<LinkForm>,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers).await {
        return rejection;
    }

    let mut state = state.write().await;
    match state.update_link(&id, form.into()) {
        Some(link) => Json(serde_json::json!({ "success": true, "link": link })).into_response(),
        None => link_not_found(&id),
    }
}

/// DELETE /links/{id}
pub async fn delete_link(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = authorize(&state, &headers).await {
        return rejection;
    }

    let mut state = state.write().await;
    match state.delete_link(&id) {
        Some(_) => Json(serde_json::json!({
            "success": true,
            "message": "The link was deleted successfully."
        }))
        .into_response(),
        None => link_not_found(&id),
    }
}
