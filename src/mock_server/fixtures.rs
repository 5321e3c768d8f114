//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::Link;

/// Email of the account in the default scenario.
pub const SELLER_EMAIL: &str = "seller@example.com";
/// Password of the account in the default scenario.
pub const SELLER_PASSWORD: &str = "hunter2";

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// Data loaded into a default mock server.
pub struct DefaultScenario {
    /// `(email, password)` pairs.
    pub accounts: Vec<(String, String)>,
    pub links: Vec<Link>,
}

impl Fixtures {
    /// Create an unsaved link with the editable fields set.
    pub fn minimal_link(name: &str, price: i64) -> Link {
        Link {
            name: name.to_string(),
            url: format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
            price,
            ..Link::default()
        }
    }

    /// Create a persisted link that has seen some traffic.
    pub fn selling_link(id: &str, name: &str, price: i64, purchases: u64) -> Link {
        let mut link = Self::minimal_link(name, price);
        link.id = Some(id.to_string());
        link.description = format!("{name}, ready to download");
        link.currency = "usd".to_string();
        link.short_url = format!("https://gum.co/{id}");
        link.views = purchases * 10;
        link.purchases = purchases;
        link.balance = format!("${}", price * purchases as i64 / 100);
        link
    }

    /// One seller account and two links.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            accounts: vec![(SELLER_EMAIL.to_string(), SELLER_PASSWORD.to_string())],
            links: vec![
                Self::selling_link("1", "Ebook", 900, 3),
                Self::selling_link("2", "Icon Pack", 1500, 0),
            ],
        }
    }
}
