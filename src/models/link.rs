//! Link model and partial construction.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::error::Result;

/// A Gumroad link: one sellable product listing.
///
/// Every field has an empty/zero default. The server owns `id`; it is `None`
/// until the link has been created remotely.
///
/// Deserializes from the wire shape (`short_url`, `preview_url`). A `null`
/// in a non-nullable field decodes to that field's default.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    /// Server-assigned identifier. Numeric ids are kept in their string form.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Option<String>,

    /// Product name.
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,

    /// URL of the content being sold.
    #[serde_as(as = "DefaultOnNull")]
    pub url: String,

    /// Price in minor currency units (cents).
    #[serde_as(as = "DefaultOnNull")]
    pub price: i64,

    #[serde_as(as = "DefaultOnNull")]
    pub description: String,

    /// Currency code, e.g. `usd`.
    #[serde_as(as = "DefaultOnNull")]
    pub currency: String,

    /// Public short URL on the Gumroad domain.
    #[serde(alias = "shortUrl")]
    #[serde_as(as = "DefaultOnNull")]
    pub short_url: String,

    #[serde_as(as = "DefaultOnNull")]
    pub views: u64,

    #[serde(alias = "previewUrl")]
    pub preview_url: Option<String>,

    #[serde_as(as = "DefaultOnNull")]
    pub purchases: u64,

    /// Earnings, already formatted by the server (e.g. `"$12"`).
    #[serde_as(as = "DefaultOnNull")]
    pub balance: String,
}

/// Wire names paired with their camelCase spellings.
const FIELD_ALIASES: [(&str, &str); 2] = [
    ("short_url", "shortUrl"),
    ("preview_url", "previewUrl"),
];

/// Accept the id as a string or a bare number.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    }))
}

/// A partial [`Link`]: only the fields that are `Some` are applied.
///
/// Deserializing ignores keys that do not name a link field, so an arbitrary
/// JSON object can be turned into a `LinkFields` without failing on extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkFields {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub currency: Option<String>,
    #[serde(alias = "shortUrl")]
    pub short_url: Option<String>,
    pub views: Option<u64>,
    #[serde(alias = "previewUrl")]
    pub preview_url: Option<String>,
    pub purchases: Option<u64>,
    pub balance: Option<String>,
}

impl Link {
    /// Create an unsaved link with the fields needed to create it remotely.
    pub fn new(name: impl Into<String>, url: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            price,
            ..Self::default()
        }
    }

    /// Build a link from a map of named fields.
    ///
    /// Unknown keys are ignored; fields that are not supplied keep their
    /// defaults. `shortUrl` and `previewUrl` are accepted as well, but lose to
    /// `short_url` and `preview_url` when both spellings are present.
    ///
    /// # Errors
    ///
    /// Returns [`GumroadError::Decode`](crate::GumroadError::Decode) if
    /// `fields` is not an object or a known key holds a value of the wrong
    /// type.
    pub fn from_fields(mut fields: Value) -> Result<Self> {
        if let Some(map) = fields.as_object_mut() {
            for (name, alias) in FIELD_ALIASES {
                if map.contains_key(name) {
                    map.remove(alias);
                }
            }
        }
        let fields: LinkFields = serde_json::from_value(fields)?;
        Ok(Self::from(fields))
    }

    /// Overlay the supplied fields onto this link.
    pub fn apply(&mut self, fields: LinkFields) -> &mut Self {
        let LinkFields {
            id,
            name,
            url,
            price,
            description,
            currency,
            short_url,
            views,
            preview_url,
            purchases,
            balance,
        } = fields;

        if id.is_some() {
            self.id = id;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(currency) = currency {
            self.currency = currency;
        }
        if let Some(short_url) = short_url {
            self.short_url = short_url;
        }
        if let Some(views) = views {
            self.views = views;
        }
        if preview_url.is_some() {
            self.preview_url = preview_url;
        }
        if let Some(purchases) = purchases {
            self.purchases = purchases;
        }
        if let Some(balance) = balance {
            self.balance = balance;
        }
        self
    }

    /// Whether the server has assigned this link an id.
    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// The id as used in URLs; empty when the link is not persisted.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

impl From<LinkFields> for Link {
    fn from(fields: LinkFields) -> Self {
        let mut link = Link::default();
        link.apply(fields);
        link
    }
}

/// Form parameters sent for create, update and delete.
#[derive(Debug, Serialize)]
pub(crate) struct LinkParams<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub price: i64,
    pub description: &'a str,
}

impl<'a> From<&'a Link> for LinkParams<'a> {
    fn from(link: &'a Link) -> Self {
        Self {
            name: &link.name,
            url: &link.url,
            price: link.price,
            description: &link.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_shape() {
        let link = Link::default();
        assert_eq!(link.id, None);
        assert_eq!(link.name, "");
        assert_eq!(link.url, "");
        assert_eq!(link.price, 0);
        assert_eq!(link.description, "");
        assert_eq!(link.currency, "");
        assert_eq!(link.short_url, "");
        assert_eq!(link.views, 0);
        assert_eq!(link.preview_url, None);
        assert_eq!(link.purchases, 0);
        assert_eq!(link.balance, "");
        assert!(!link.is_persisted());
    }

    #[test]
    fn test_from_fields_overlays_only_supplied() {
        let link = Link::from_fields(json!({"name": "Foo", "price": 500})).unwrap();
        assert_eq!(
            link,
            Link {
                name: "Foo".to_string(),
                price: 500,
                ..Link::default()
            }
        );
    }

    #[test]
    fn test_from_fields_ignores_unknown_keys() {
        let link = Link::from_fields(json!({"bogus": 1})).unwrap();
        assert_eq!(link, Link::default());
    }

    #[test]
    fn test_from_fields_accepts_camel_case_names() {
        let link = Link::from_fields(json!({
            "shortUrl": "https://gum.co/abc",
            "previewUrl": "https://example.com/preview.png"
        }))
        .unwrap();
        assert_eq!(link.short_url, "https://gum.co/abc");
        assert_eq!(
            link.preview_url.as_deref(),
            Some("https://example.com/preview.png")
        );
    }

    #[test]
    fn test_from_fields_prefers_snake_case_when_both_given() {
        let link = Link::from_fields(json!({
            "short_url": "https://gum.co/a",
            "shortUrl": "https://gum.co/b",
            "previewUrl": "https://example.com/preview.png"
        }))
        .unwrap();
        assert_eq!(link.short_url, "https://gum.co/a");
        assert_eq!(
            link.preview_url.as_deref(),
            Some("https://example.com/preview.png")
        );
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let link: Link = serde_json::from_value(json!({"id": 42, "name": "Ebook"})).unwrap();
        assert_eq!(link.id.as_deref(), Some("42"));

        let link = Link::from_fields(json!({"id": 7})).unwrap();
        assert_eq!(link.id_or_empty(), "7");

        let link: Link = serde_json::from_value(json!({"id": null})).unwrap();
        assert_eq!(link.id, None);
    }

    #[test]
    fn test_from_fields_rejects_wrong_type() {
        let err = Link::from_fields(json!({"price": "cheap"})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Decode);
    }

    #[test]
    fn test_apply_keeps_existing_values() {
        let mut link = Link::new("Ebook", "https://example.com/book.pdf", 900);
        link.apply(LinkFields {
            description: Some("Second edition".to_string()),
            ..Default::default()
        });
        assert_eq!(link.name, "Ebook");
        assert_eq!(link.price, 900);
        assert_eq!(link.description, "Second edition");
    }

    #[test]
    fn test_deserialize_wire_shape_with_nulls() {
        let link: Link = serde_json::from_value(json!({
            "id": "a1b2",
            "name": "Ebook",
            "url": "https://example.com/book.pdf",
            "price": 900,
            "description": null,
            "currency": "usd",
            "short_url": "https://gum.co/a1b2",
            "views": 12,
            "preview_url": null,
            "purchases": 3,
            "balance": "$27"
        }))
        .unwrap();

        assert_eq!(link.id.as_deref(), Some("a1b2"));
        assert_eq!(link.description, "");
        assert_eq!(link.short_url, "https://gum.co/a1b2");
        assert_eq!(link.views, 12);
        assert_eq!(link.preview_url, None);
        assert_eq!(link.balance, "$27");
        assert!(link.is_persisted());
    }

    #[test]
    fn test_link_params_borrow_editable_fields() {
        let mut link = Link::new("Ebook", "https://example.com/book.pdf", 900);
        link.currency = "usd".to_string();
        let encoded = serde_qs::to_string(&LinkParams::from(&link)).unwrap();
        let decoded: std::collections::HashMap<String, String> =
            serde_qs::from_str(&encoded).unwrap();

        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded["name"], "Ebook");
        assert_eq!(decoded["price"], "900");
        assert_eq!(decoded["description"], "");
        assert!(!decoded.contains_key("currency"));
    }
}
