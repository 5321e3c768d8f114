//! Session endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{session_token, unauthorized};
use crate::mock_server::state::MockState;

/// Credentials posted to open a session.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionForm {
    pub email: String,
    pub password: String,
}

/// POST /sessions
pub async fn create_session(
    State(state): State<Arc<RwLock<MockState>>>,
    Form(form): Form<SessionForm>,
) -> Response {
    let mut state = state.write().await;

    match state.open_session(&form.email, &form.password) {
        Some(token) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "token": token })),
        )
            .into_response(),
        None => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": false,
                "message": "Invalid email or password"
            })),
        )
            .into_response(),
    }
}

/// DELETE /sessions
pub async fn delete_session(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let Some(token) = session_token(&headers) else {
        return unauthorized();
    };

    let mut state = state.write().await;
    if !state.close_session(&token) {
        return unauthorized();
    }

    Json(serde_json::json!({ "success": true, "message": "Session closed" })).into_response()
}
