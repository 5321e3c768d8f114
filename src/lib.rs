//! Gumroad API client library.
//!
//! A blocking Rust client for the Gumroad API: session authentication and
//! create/read/update/delete operations on links (Gumroad's sellable product
//! listings).
//!
//! # Quick Start
//!
//! ```no_run
//! use gumroad::{GumroadClient, Link};
//!
//! fn main() -> gumroad::Result<()> {
//!     let mut client = GumroadClient::from_env()?;
//!     client.authenticate("seller@example.com", "secret")?;
//!
//!     // Create a link; the server's copy is written back into `link`
//!     let mut link = Link::new("Ebook", "https://example.com/book.pdf", 900);
//!     client.create_link(&mut link)?;
//!     println!("Created {} ({})", link.name, link.short_url);
//!
//!     // List all links
//!     for link in client.get_links()? {
//!         println!("  - {} ({} purchases)", link.name, link.purchases);
//!     }
//!
//!     client.deauthenticate()?;
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation returns [`Result`]. [`GumroadError`] separates transport
//! failures, network-level failures (HTTP 403/404/500 or an unusable body),
//! API rejections (`success: false`, with the server's message) and payloads
//! that do not decode into a [`Link`]. Nothing is retried.
//!
//! # Configuration
//!
//! [`GumroadClient::from_env`] reads:
//!
//! - `GUMROAD_API_URL` (optional) - Base URL (defaults to `https://gumroad.com/api/v1`)
//! - `GUMROAD_TIMEOUT_MS` (optional) - Request timeout in milliseconds (defaults to 2000)

mod client;
mod envelope;
mod error;
mod models;
mod timeout;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{GumroadClient, DEFAULT_ENDPOINT};
pub use error::{ErrorKind, GumroadError, Result, NETWORK_ERROR_MESSAGE, UNKNOWN_ERROR_MESSAGE};
pub use timeout::{TimeoutValue, DEFAULT_TIMEOUT_MS};

// Re-export models
pub use models::{Link, LinkFields};
