//! Shared helpers for the integration tests.
//!
//! `GumroadClient` is blocking, so tests build and drive it on tokio's
//! blocking pool while wiremock serves requests on the async side.

#![allow(dead_code)]

use std::collections::HashMap;

use gumroad::GumroadClient;
use serde_json::{json, Value};

/// Run `f` on the blocking pool and wait for it.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// Client pointed at a mock server.
pub fn client(uri: &str) -> GumroadClient {
    GumroadClient::with_endpoint(uri).expect("Failed to build client")
}

/// Client pointed at a mock server, already holding `token`.
pub fn authenticated_client(uri: &str, token: &str) -> GumroadClient {
    let mut client = client(uri);
    client.set_token(Some(token.to_string()));
    client
}

/// Decode a form-encoded request body.
pub fn form_fields(body: &[u8]) -> HashMap<String, String> {
    serde_qs::from_bytes(body).expect("Failed to decode form body")
}

/// A complete link object as the API returns it.
pub fn link_json(id: &str, name: &str, price: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "url": format!("https://example.com/{id}"),
        "price": price,
        "description": format!("About {name}"),
        "currency": "usd",
        "short_url": format!("https://gum.co/{id}"),
        "views": 40,
        "preview_url": format!("https://example.com/{id}/preview.png"),
        "purchases": 4,
        "balance": "$36"
    })
}
