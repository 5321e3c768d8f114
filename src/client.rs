//! Gumroad API client.
//!
//! Owns the session state (endpoint, token, timeout), issues one blocking
//! HTTP request per operation and classifies the response envelope.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use serde::Serialize;

use crate::envelope::{self, Envelope};
use crate::error::{GumroadError, Result};
use crate::models::{Link, LinkParams};
use crate::timeout::{self, TimeoutValue, DEFAULT_TIMEOUT_MS};

/// Base URL of the public Gumroad API.
pub const DEFAULT_ENDPOINT: &str = "https://gumroad.com/api/v1";
const USER_AGENT: &str = concat!("gumroad-rs/", env!("CARGO_PKG_VERSION"));

const NO_PARAMS: &[(&str, &str)] = &[];

/// Blocking Gumroad API client.
///
/// Holds the session token once [`authenticate`](Self::authenticate)
/// succeeds and sends it as the Basic auth username on every later request.
///
/// Operations that change session state take `&mut self`, so a client has a
/// single owner. Use one client per thread, or wrap it in your own lock.
///
/// # Example
///
/// ```no_run
/// use gumroad::{GumroadClient, Link};
///
/// # fn example() -> gumroad::Result<()> {
/// let mut client = GumroadClient::new()?;
/// client.set_timeout(5000).authenticate("seller@example.com", "secret")?;
///
/// let mut link = Link::new("Ebook", "https://example.com/book.pdf", 900);
/// client.create_link(&mut link)?;
/// println!("created {:?} at {}", link.id, link.short_url);
/// # Ok(())
/// # }
/// ```
pub struct GumroadClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
    timeout: u64,
}

impl std::fmt::Debug for GumroadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GumroadClient")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GumroadClient {
    /// Create an unauthenticated client for the public API.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::Transport`] if the HTTP stack cannot be
    /// initialized.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create an unauthenticated client for a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::Transport`] if the HTTP stack cannot be
    /// initialized.
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            // One exchange per call; a 3xx is classified like any other response
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(GumroadError::Transport)?;

        Ok(Self {
            http,
            endpoint: normalize_endpoint(endpoint),
            token: None,
            timeout: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Create a client from environment variables.
    ///
    /// Uses `GUMROAD_API_URL` for the base URL (defaults to
    /// `https://gumroad.com/api/v1`) and `GUMROAD_TIMEOUT_MS` for the
    /// timeout. A non-numeric timeout is ignored.
    pub fn from_env() -> Result<Self> {
        let endpoint =
            env::var("GUMROAD_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let mut client = Self::with_endpoint(&endpoint)?;
        if let Ok(timeout) = env::var("GUMROAD_TIMEOUT_MS") {
            client.set_timeout(timeout);
        }
        Ok(client)
    }

    /// Get the base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Point the client at a different base URL.
    pub fn set_endpoint(&mut self, endpoint: &str) -> &mut Self {
        self.endpoint = normalize_endpoint(endpoint);
        self
    }

    /// The current session token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the session token, e.g. with one restored from a credential
    /// store. `None` makes the client unauthenticated.
    pub fn set_token(&mut self, token: Option<String>) -> &mut Self {
        self.token = token;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Request timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Set the request timeout in milliseconds.
    ///
    /// Non-numeric input leaves the timeout unchanged. Zero or negative
    /// values become 1; fractions are truncated.
    pub fn set_timeout<T: TimeoutValue>(&mut self, value: T) -> &mut Self {
        match timeout::normalize(&value) {
            Some(millis) => self.timeout = millis,
            None => tracing::debug!("ignoring non-numeric timeout"),
        }
        self
    }

    /// URL of the session endpoint.
    pub fn authenticate_url(&self) -> String {
        format!("{}/sessions", self.endpoint)
    }

    /// URL of the link collection, or of one link when `id` is non-empty.
    pub fn link_url(&self, id: &str) -> String {
        let mut url = format!("{}/links", self.endpoint);
        if !id.is_empty() {
            url.push('/');
            url.push_str(id);
        }
        url
    }

    /// Open a session and keep its token.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::Api`] with the server's message when the
    /// credentials are rejected, or any other error from the request.
    #[tracing::instrument(skip(self, password))]
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<&mut Self> {
        let url = self.authenticate_url();
        let params = [("email", email), ("password", password)];

        let mut envelope = self.request(Method::POST, &url, &params)?;
        self.token = envelope.take_optional("token")?;

        if self.token.is_some() {
            tracing::debug!("session established");
        } else {
            tracing::warn!("session response carried no token");
        }
        Ok(self)
    }

    /// Close the session on the server, then forget the token.
    ///
    /// If the request fails the token is kept.
    #[tracing::instrument(skip(self))]
    pub fn deauthenticate(&mut self) -> Result<&mut Self> {
        let url = self.authenticate_url();
        self.request(Method::DELETE, &url, NO_PARAMS)?;
        self.token = None;

        tracing::debug!("session closed");
        Ok(self)
    }

    /// Create `link` on the server and overwrite every field of it with the
    /// server's copy, including the new id.
    ///
    /// On error `link` is left untouched.
    #[tracing::instrument(skip(self, link), fields(name = %link.name))]
    pub fn create_link(&self, link: &mut Link) -> Result<&Self> {
        let url = self.link_url("");
        let mut envelope = self.request(Method::POST, &url, &LinkParams::from(&*link))?;
        *link = envelope.take("link")?;
        Ok(self)
    }

    /// Send the editable fields of `link` to the server.
    ///
    /// `link` is not refreshed from the response.
    #[tracing::instrument(skip(self, link), fields(id = link.id_or_empty()))]
    pub fn update_link(&self, link: &Link) -> Result<&Self> {
        let url = self.link_url(link.id_or_empty());
        self.request(Method::PUT, &url, &LinkParams::from(link))?;
        Ok(self)
    }

    /// Delete `link` on the server.
    #[tracing::instrument(skip(self, link), fields(id = link.id_or_empty()))]
    pub fn delete_link(&self, link: &Link) -> Result<&Self> {
        let url = self.link_url(link.id_or_empty());
        // The editable fields ride along; the server only needs the id.
        self.request(Method::DELETE, &url, &LinkParams::from(link))?;
        Ok(self)
    }

    /// Fetch one link by id.
    #[tracing::instrument(skip(self))]
    pub fn get_link(&self, id: &str) -> Result<Link> {
        let url = self.link_url(id);
        let mut envelope = self.request(Method::GET, &url, NO_PARAMS)?;
        envelope.take("link")
    }

    /// Fetch every link, in the order the server lists them.
    #[tracing::instrument(skip(self))]
    pub fn get_links(&self) -> Result<Vec<Link>> {
        let url = self.link_url("");
        let mut envelope = self.request(Method::GET, &url, NO_PARAMS)?;
        let links: Vec<Link> = envelope.take("links")?;

        tracing::debug!(count = links.len(), "fetched links");
        Ok(links)
    }

    /// Issue one request and classify the response.
    ///
    /// GET sends `params` in the query string; every other method sends them
    /// as a form body.
    fn request<P: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        params: &P,
    ) -> Result<Envelope> {
        tracing::debug!(%method, url, authenticated = self.token.is_some(), "sending request");

        let mut builder = self
            .http
            .request(method.clone(), url)
            .timeout(Duration::from_millis(self.timeout));

        builder = if method == Method::GET {
            builder.query(params)
        } else {
            builder.form(params)
        };

        if let Some(token) = &self.token {
            builder = builder.basic_auth(token, None::<&str>);
        }

        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        envelope::check_status(status)?;

        let body = response.text().map_err(transport_error)?;
        Envelope::parse(status, &body)
    }
}

fn transport_error(e: reqwest::Error) -> GumroadError {
    tracing::warn!(error = %e, "transport error");
    GumroadError::Transport(e)
}

fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}
