//! Non-interactive list and create commands
//!
//! These drive the same `ResourceScreen` flow as the TUI and return the
//! refreshed list as printable lines.

use anyhow::{anyhow, Result};
use tracing::info;

use crate::client::DataClient;
use crate::resource::{plain_text, Orders, Products, Resource, ResourceKind, Reviews, Users};
use crate::screen::ResourceScreen;

/// Fetch a resource's list and format each entity as one line.
pub async fn list(kind: ResourceKind, client: &dyn DataClient) -> Result<Vec<String>> {
    match kind {
        ResourceKind::Orders => list_resource::<Orders>(client).await,
        ResourceKind::Products => list_resource::<Products>(client).await,
        ResourceKind::Reviews => list_resource::<Reviews>(client).await,
        ResourceKind::Users => list_resource::<Users>(client).await,
    }
}

/// Fill the create form from `key=value` pairs, submit it and return the refreshed list.
pub async fn create(
    kind: ResourceKind,
    fields: &[(String, String)],
    client: &dyn DataClient,
) -> Result<Vec<String>> {
    match kind {
        ResourceKind::Orders => create_resource::<Orders>(fields, client).await,
        ResourceKind::Products => create_resource::<Products>(fields, client).await,
        ResourceKind::Reviews => create_resource::<Reviews>(fields, client).await,
        ResourceKind::Users => create_resource::<Users>(fields, client).await,
    }
}

/// Keys accepted by `create` for a resource
pub fn field_keys(kind: ResourceKind) -> Vec<&'static str> {
    let fields = match kind {
        ResourceKind::Orders => Orders::FIELDS,
        ResourceKind::Products => Products::FIELDS,
        ResourceKind::Reviews => Reviews::FIELDS,
        ResourceKind::Users => Users::FIELDS,
    };
    fields.iter().map(|f| f.key).collect()
}

async fn list_resource<R: Resource>(client: &dyn DataClient) -> Result<Vec<String>> {
    let mut screen = ResourceScreen::<R>::new();
    if let Some(effect) = screen.mount() {
        screen.run(client, effect).await;
    }
    finish(&screen)
}

async fn create_resource<R: Resource>(
    fields: &[(String, String)],
    client: &dyn DataClient,
) -> Result<Vec<String>> {
    let mut screen = ResourceScreen::<R>::new();
    for (key, value) in fields {
        if !screen.state.form.set(key, value) {
            return Err(anyhow!(
                "Unknown field '{}' for {}. Supported fields: {}",
                key,
                R::KIND,
                field_keys(R::KIND).join(", ")
            ));
        }
    }

    if let Some(effect) = screen.submit() {
        screen.run(client, effect).await;
        info!("Create flow for {} finished", R::KIND);
    }
    finish(&screen)
}

fn finish<R: Resource>(screen: &ResourceScreen<R>) -> Result<Vec<String>> {
    if let Some(error) = &screen.state.error {
        return Err(anyhow!("{}", error));
    }

    if screen.state.items.is_empty() {
        if let Some(empty) = R::MESSAGES.empty_list {
            return Ok(vec![empty.to_string()]);
        }
    }

    Ok(screen
        .state
        .items
        .iter()
        .map(|entity| plain_text(&R::card(entity)).join(" | "))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{status_error, Call, RecordingClient};
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_formats_cards() {
        let client = RecordingClient::new().with_get(Ok(json!([
            {"product_id": 1, "product_name": "Mug", "description": "Ceramic", "price": 4.5, "stock": 10}
        ])));
        let lines = list(ResourceKind::Products, &client).await.unwrap();
        assert_eq!(lines, vec!["Mug | Ceramic | Price: $4.5 | Stock: 10"]);
    }

    #[tokio::test]
    async fn test_list_empty_placeholder() {
        let client = RecordingClient::new();
        let lines = list(ResourceKind::Users, &client).await.unwrap();
        assert_eq!(lines, vec!["No users found"]);
    }

    #[tokio::test]
    async fn test_list_failure_is_an_error() {
        let client = RecordingClient::new().with_get(Err(status_error("/orders", 500)));
        let err = list(ResourceKind::Orders, &client).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch orders");
    }

    #[tokio::test]
    async fn test_create_order_posts_and_refreshes() {
        let client = RecordingClient::new();
        let fields = pairs(&[("user_id", "2"), ("total_amount", "9.99"), ("status", "shipped")]);
        create(ResourceKind::Orders, &fields, &client).await.unwrap();

        assert_eq!(
            client.calls(),
            vec![
                Call::Post(
                    "/createOrders".to_string(),
                    json!({"user_id": 2, "total_amount": 9.99, "status": "shipped"})
                ),
                Call::Get("/orders".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_with_missing_field_fails_without_request() {
        let client = RecordingClient::new();
        let fields = pairs(&[("name", "ada")]);
        let err = create(ResourceKind::Users, &fields, &client).await.unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_non_numeric_id_fails_without_request() {
        let client = RecordingClient::new();
        let fields = pairs(&[("user_id", "abc"), ("total_amount", "5"), ("status", "pending")]);
        let err = create(ResourceKind::Orders, &fields, &client).await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_unknown_field() {
        let client = RecordingClient::new();
        let fields = pairs(&[("username", "ada")]);
        let err = create(ResourceKind::Users, &fields, &client).await.unwrap_err();
        assert!(err.to_string().contains("name, email, password"));
    }
}
