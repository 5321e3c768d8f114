//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Gumroad API server.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Link, LinkFields};

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for access from request handlers.
#[derive(Debug, Default)]
pub struct MockState {
    /// Account passwords indexed by email.
    pub accounts: HashMap<String, String>,

    /// Tokens of open sessions.
    pub sessions: HashSet<String>,

    /// Links in creation order.
    pub links: Vec<Link>,

    next_link_id: u64,
    next_token: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an account that can open sessions.
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Add an already open session.
    pub fn with_session(mut self, token: &str) -> Self {
        self.sessions.insert(token.to_string());
        self
    }

    /// Add a link. Links without an id get the next sequential one.
    pub fn with_link(mut self, mut link: Link) -> Self {
        match link.id.as_deref().map(str::parse::<u64>) {
            // Keep generated ids clear of numeric fixture ids
            Some(Ok(n)) => self.next_link_id = self.next_link_id.max(n),
            Some(Err(_)) => {}
            None => link.id = Some(self.allocate_link_id()),
        }
        self.links.push(link);
        self
    }

    /// Check credentials and open a session, returning its token.
    pub fn open_session(&mut self, email: &str, password: &str) -> Option<String> {
        if self.accounts.get(email).map(String::as_str) != Some(password) {
            return None;
        }
        self.next_token += 1;
        let token = format!("mock-token-{}", self.next_token);
        self.sessions.insert(token.clone());
        Some(token)
    }

    /// Close a session. Returns false if it was not open.
    pub fn close_session(&mut self, token: &str) -> bool {
        self.sessions.remove(token)
    }

    /// Whether `token` belongs to an open session.
    pub fn has_session(&self, token: &str) -> bool {
        self.sessions.contains(token)
    }

    /// Create a link from the editable fields and fill in server-owned ones.
    pub fn create_link(&mut self, fields: LinkFields) -> &Link {
        let id = self.allocate_link_id();
        let mut link = Link {
            currency: "usd".to_string(),
            short_url: format!("https://gum.co/{id}"),
            balance: "$0".to_string(),
            id: Some(id),
            ..Link::default()
        };
        link.apply(LinkFields {
            id: None,
            currency: None,
            short_url: None,
            views: None,
            preview_url: None,
            purchases: None,
            balance: None,
            ..fields
        });
        self.links.push(link);
        &self.links[self.links.len() - 1]
    }

    /// Get a link by id.
    pub fn get_link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id.as_deref() == Some(id))
    }

    /// All links in creation order.
    pub fn list_links(&self) -> &[Link] {
        &self.links
    }

    /// Overlay `fields` onto a link and return the updated version.
    pub fn update_link(&mut self, id: &str, fields: LinkFields) -> Option<&Link> {
        let link = self
            .links
            .iter_mut()
            .find(|l| l.id.as_deref() == Some(id))?;
        link.apply(LinkFields { id: None, ..fields });
        Some(&*link)
    }

    /// Remove a link and return it.
    pub fn delete_link(&mut self, id: &str) -> Option<Link> {
        let index = self
            .links
            .iter()
            .position(|l| l.id.as_deref() == Some(id))?;
        Some(self.links.remove(index))
    }

    fn allocate_link_id(&mut self) -> String {
        self.next_link_id += 1;
        self.next_link_id.to_string()
    }
}
