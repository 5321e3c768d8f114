//! Mock Gumroad API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Gumroad
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps sessions and links across
//! requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use gumroad::mock_server::{MockServer, SELLER_EMAIL, SELLER_PASSWORD};
//! use gumroad::GumroadClient;
//!
//! #[tokio::test(flavor = "multi_thread")]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let url = server.url().to_string();
//!
//!     let links = tokio::task::spawn_blocking(move || {
//!         let mut client = GumroadClient::with_endpoint(&url).unwrap();
//!         client.authenticate(SELLER_EMAIL, SELLER_PASSWORD).unwrap();
//!         client.get_links().unwrap()
//!     })
//!     .await
//!     .unwrap();
//!     assert_eq!(links[0].name, "Ebook");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, SELLER_EMAIL, SELLER_PASSWORD};
pub use server::MockServer;
pub use state::MockState;
