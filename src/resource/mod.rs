//! Resource definitions
//!
//! Each back-office screen is the same list-plus-create-form component. A
//! `Resource` supplies everything that differs between them: the entity
//! type, the endpoint pair, the form schema, the create payload and how one
//! entity is drawn as a card.

pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

pub use orders::Orders;
pub use products::Products;
pub use reviews::Reviews;
pub use users::Users;

use std::fmt;
use std::str::FromStr;

use ratatui::text::Line;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::form::{FieldSpec, FormState};

/// User-visible strings of a screen
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub title: &'static str,
    /// Shown when a required field is empty
    pub validation: &'static str,
    pub fetch_failed: &'static str,
    pub create_failed: &'static str,
    pub submit_label: &'static str,
    /// Submit label while a request is in flight
    pub busy_label: Option<&'static str>,
    /// Placeholder for an empty list
    pub empty_list: Option<&'static str>,
    /// Placeholder for the list while a request is in flight
    pub loading_list: Option<&'static str>,
}

pub trait Resource: Send + Sync + 'static {
    type Entity: DeserializeOwned + Clone + fmt::Debug + Send + 'static;
    type Payload: Serialize + fmt::Debug;

    const KIND: ResourceKind;
    const LIST_PATH: &'static str;
    const CREATE_PATH: &'static str;
    const FIELDS: &'static [FieldSpec];
    const MESSAGES: Messages;
    /// Whether the submit action is disabled while a request is in flight
    const GUARDS_SUBMIT: bool;

    /// Build the create payload from a complete form
    fn payload(form: &FormState) -> Self::Payload;

    /// Draw one entity as the lines of a card
    fn card(entity: &Self::Entity) -> Vec<Line<'static>>;
}

/// The four screens of the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Orders,
    Products,
    Reviews,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Orders,
        ResourceKind::Products,
        ResourceKind::Reviews,
        ResourceKind::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "orders",
            ResourceKind::Products => "products",
            ResourceKind::Reviews => "reviews",
            ResourceKind::Users => "users",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Orders => Orders::MESSAGES.title,
            ResourceKind::Products => Products::MESSAGES.title,
            ResourceKind::Reviews => Reviews::MESSAGES.title,
            ResourceKind::Users => Users::MESSAGES.title,
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "orders" | "order" => Ok(ResourceKind::Orders),
            "products" | "product" => Ok(ResourceKind::Products),
            "reviews" | "review" => Ok(ResourceKind::Reviews),
            "users" | "user" => Ok(ResourceKind::Users),
            other => Err(format!(
                "Unsupported resource: {}. Supported resources: orders, products, reviews, users",
                other
            )),
        }
    }
}

/// Flatten card lines into plain text, one string per line
pub fn plain_text(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!("Orders".parse::<ResourceKind>(), Ok(ResourceKind::Orders));
        assert_eq!("user".parse::<ResourceKind>(), Ok(ResourceKind::Users));
        assert!("carts".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_resource_kind_cycles() {
        assert_eq!(ResourceKind::Users.next(), ResourceKind::Orders);
        assert_eq!(ResourceKind::Orders.previous(), ResourceKind::Users);
        assert_eq!(ResourceKind::Products.next(), ResourceKind::Reviews);
    }

    #[test]
    fn test_every_screen_has_distinct_endpoints() {
        let paths = [
            (Orders::LIST_PATH, Orders::CREATE_PATH),
            (Products::LIST_PATH, Products::CREATE_PATH),
            (Reviews::LIST_PATH, Reviews::CREATE_PATH),
            (Users::LIST_PATH, Users::CREATE_PATH),
        ];
        for (list, create) in paths {
            assert!(list.starts_with('/'));
            assert!(create.starts_with("/create"));
        }
    }
}
