//! Generic list-plus-create-form screen
//!
//! `ResourceScreen<R>` owns the state of one screen and turns user intents
//! (mount, submit) into reducer actions and network effects. The
//! effects themselves are executed by `execute`, which needs no access to
//! the screen so callers can run it on another task.

use std::marker::PhantomData;

use tracing::{debug, info, warn};

use crate::client::{fetch_list, DataClient};
use crate::resource::Resource;
use crate::state::{Action, Effect, Phase, ScreenState};

pub struct ResourceScreen<R: Resource> {
    pub state: ScreenState<R::Entity>,
    mounted: bool,
    _resource: PhantomData<R>,
}

impl<R: Resource> Default for ResourceScreen<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceScreen<R> {
    pub fn new() -> Self {
        Self {
            state: ScreenState::new(R::FIELDS),
            mounted: false,
            _resource: PhantomData,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// First display of the screen loads its list; later ones do nothing.
    pub fn mount(&mut self) -> Option<Effect> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(Effect::Fetch)
    }

    /// Whether the submit action is currently disabled
    pub fn submit_disabled(&self) -> bool {
        R::GUARDS_SUBMIT && self.state.phase() == Phase::Loading
    }

    /// Label of the submit button for the current phase
    pub fn submit_label(&self) -> &'static str {
        match R::MESSAGES.busy_label {
            Some(busy) if self.state.is_loading() => busy,
            _ => R::MESSAGES.submit_label,
        }
    }

    /// Validate the form and produce the create request, or reject it.
    pub fn submit(&mut self) -> Option<Effect> {
        if self.submit_disabled() {
            debug!("{} submit ignored while loading", R::KIND);
            return None;
        }

        if let Some(missing) = self.state.form.first_missing() {
            debug!("{} submit rejected, '{}' is empty", R::KIND, missing.key);
            self.state.apply(Action::Rejected(R::MESSAGES.validation.to_string()));
            return None;
        }

        let payload = R::payload(&self.state.form);
        debug!("{} create payload: {:?}", R::KIND, payload);
        match serde_json::to_value(&payload) {
            Ok(body) => Some(Effect::Create(body)),
            Err(e) => {
                warn!("Failed to encode {} payload: {}", R::KIND, e);
                self.state.apply(Action::Rejected(R::MESSAGES.create_failed.to_string()));
                None
            }
        }
    }

    /// Record that an effect is about to run.
    pub fn begin(&mut self, effect: &Effect) {
        let started = match effect {
            Effect::Fetch => Action::FetchStarted,
            Effect::Create(_) => Action::SubmitStarted,
        };
        self.state.apply(started);
    }

    pub fn apply(&mut self, action: Action<R::Entity>) -> Option<Effect> {
        self.state.apply(action)
    }

    /// Perform the request for an effect and report its outcome as an action.
    pub async fn execute(client: &dyn DataClient, effect: Effect) -> Action<R::Entity> {
        match effect {
            Effect::Fetch => match fetch_list::<R::Entity>(client, R::LIST_PATH).await {
                Ok(items) => {
                    info!("Fetched {} {}", items.len(), R::KIND);
                    Action::Fetched(items)
                }
                Err(e) => {
                    warn!("Fetching {} failed: {}", R::KIND, e);
                    Action::FetchFailed(e.user_message(R::MESSAGES.fetch_failed))
                }
            },
            Effect::Create(body) => match client.post_json(R::CREATE_PATH, &body).await {
                Ok(()) => {
                    info!("Created {} entry", R::KIND);
                    Action::Created
                }
                Err(e) => {
                    warn!("Creating {} entry failed: {}", R::KIND, e);
                    Action::CreateFailed(e.user_message(R::MESSAGES.create_failed))
                }
            },
        }
    }

    /// Run an effect and every follow-up it triggers, in order.
    pub async fn run(&mut self, client: &dyn DataClient, effect: Effect) {
        let mut next = Some(effect);
        while let Some(effect) = next {
            self.begin(&effect);
            let action = Self::execute(client, effect).await;
            next = self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{status_error, Call, RecordingClient};
    use crate::client::ClientError;
    use crate::resource::{Orders, Products, Reviews, Users};
    use serde_json::json;

    fn order_json() -> serde_json::Value {
        json!([{
            "order_id": 1,
            "user_id": 2,
            "total_amount": 9.99,
            "status": "shipped",
            "order_date": "2024-01-01T00:00:00Z"
        }])
    }

    async fn submit_empty<R: Resource>() {
        let client = RecordingClient::new();
        let mut screen = ResourceScreen::<R>::new();
        if let Some(effect) = screen.submit() {
            screen.run(&client, effect).await;
        }
        assert!(client.calls().is_empty(), "{} issued a request", R::KIND);
        assert_eq!(screen.state.error.as_deref(), Some(R::MESSAGES.validation));
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_the_network() {
        submit_empty::<Orders>().await;
        submit_empty::<Products>().await;
        submit_empty::<Reviews>().await;
        submit_empty::<Users>().await;
    }

    #[tokio::test]
    async fn test_one_missing_field_is_rejected() {
        let client = RecordingClient::new();
        let mut screen = ResourceScreen::<Orders>::new();
        screen.state.form.set("user_id", "2");
        screen.state.form.set("status", "pending");

        assert!(screen.submit().is_none());
        assert_eq!(client.post_count(), 0);
        assert_eq!(screen.state.error.as_deref(), Some("Please fill in all fields"));
    }

    #[tokio::test]
    async fn test_unparsable_numbers_never_reach_the_network() {
        let client = RecordingClient::new();
        let mut screen = ResourceScreen::<Orders>::new();
        screen.state.form.set("user_id", "-");
        screen.state.form.set("total_amount", ".");
        screen.state.form.set("status", "pending");

        if let Some(effect) = screen.submit() {
            screen.run(&client, effect).await;
        }
        assert!(client.calls().is_empty());
        assert_eq!(screen.state.error.as_deref(), Some("Please fill in all fields"));
    }

    #[tokio::test]
    async fn test_mount_renders_server_list_in_order() {
        let client = RecordingClient::new().with_get(Ok(json!([
            {"user_id": 3, "username": "c", "email": "c@x"},
            {"user_id": 1, "username": "a", "email": "a@x"}
        ])));
        let mut screen = ResourceScreen::<Users>::new();

        let effect = screen.mount().unwrap();
        screen.run(&client, effect).await;

        let ids: Vec<i64> = screen.state.items.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(client.calls(), vec![Call::Get("/users".to_string())]);
        assert!(screen.mount().is_none());
    }

    #[tokio::test]
    async fn test_orders_fetch_failure_keeps_list() {
        let client = RecordingClient::new()
            .with_get(Ok(order_json()))
            .with_get(Err(status_error("/orders", 500)));
        let mut screen = ResourceScreen::<Orders>::new();

        screen.run(&client, Effect::Fetch).await;
        screen.run(&client, Effect::Fetch).await;

        assert_eq!(screen.state.items.len(), 1);
        assert_eq!(screen.state.items[0].user_id, 2);
        assert_eq!(screen.state.error.as_deref(), Some("Failed to fetch orders"));
    }

    #[tokio::test]
    async fn test_list_with_mixed_number_shapes_is_kept() {
        let client = RecordingClient::new().with_get(Ok(json!([
            {"order_id": 1, "user_id": 2, "total_amount": 9.99, "status": "shipped"},
            {"order_id": 2, "user_id": 3, "total_amount": "12.50", "status": "pending"}
        ])));
        let mut screen = ResourceScreen::<Orders>::new();

        screen.run(&client, Effect::Fetch).await;

        assert!(screen.state.error.is_none());
        assert_eq!(screen.state.items.len(), 2);
        let card = crate::resource::plain_text(&Orders::card(&screen.state.items[1]));
        assert_eq!(card[1], "Total: $12.50");
    }

    #[tokio::test]
    async fn test_loading_flag_clears_on_failure() {
        let client = RecordingClient::new()
            .with_get(Err(status_error("/reviews", 503)))
            .with_get(Err(ClientError::from_status("/users", 500, r#"{"error":"db down"}"#)));

        let mut reviews = ResourceScreen::<Reviews>::new();
        reviews.run(&client, Effect::Fetch).await;
        assert!(!reviews.state.is_loading());
        assert_eq!(reviews.state.error.as_deref(), Some("Failed to fetch reviews"));

        let mut users = ResourceScreen::<Users>::new();
        users.run(&client, Effect::Fetch).await;
        assert!(!users.state.is_loading());
        assert_eq!(users.state.error.as_deref(), Some("db down"));
    }

    #[tokio::test]
    async fn test_review_create_posts_integer_rating_and_refetches_once() {
        let client = RecordingClient::new();
        let mut screen = ResourceScreen::<Reviews>::new();
        screen.state.form.set("user_id", "2");
        screen.state.form.set("product_id", "4");
        screen.state.form.set("rating", "5");
        screen.state.form.set("review_text", "Great");

        let effect = screen.submit().unwrap();
        screen.run(&client, effect).await;

        assert_eq!(
            client.calls(),
            vec![
                Call::Post(
                    "/createReviews".to_string(),
                    json!({"user_id": 2, "product_id": 4, "rating": 5, "review_text": "Great"})
                ),
                Call::Get("/reviews".to_string()),
            ]
        );
        assert_eq!(client.get_count(), 1);
        assert_eq!(screen.state.form, crate::form::FormState::new(Reviews::FIELDS));
        assert!(screen.state.error.is_none());
        assert!(!screen.state.is_loading());
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form_and_skips_refresh() {
        let client = RecordingClient::new().with_post(Err(status_error("/createProducts", 400)));
        let mut screen = ResourceScreen::<Products>::new();
        screen.state.form.set("name", "Mug");
        screen.state.form.set("description", "Ceramic");
        screen.state.form.set("price", "3");
        screen.state.form.set("stock", "1");

        let effect = screen.submit().unwrap();
        screen.run(&client, effect).await;

        assert_eq!(client.get_count(), 0);
        assert_eq!(screen.state.form.value("name"), "Mug");
        assert_eq!(screen.state.error.as_deref(), Some("Failed to create product"));
    }

    #[tokio::test]
    async fn test_successful_create_clears_previous_error() {
        let client = RecordingClient::new();
        let mut screen = ResourceScreen::<Users>::new();
        assert!(screen.submit().is_none());
        assert!(screen.state.error.is_some());

        screen.state.form.set("name", "ada");
        screen.state.form.set("email", "ada@example.com");
        screen.state.form.set("password", "pw");
        let effect = screen.submit().unwrap();
        screen.run(&client, effect).await;

        assert!(screen.state.error.is_none());
        assert_eq!(screen.state.form.value("name"), "");
        assert_eq!(
            client.calls()[0],
            Call::Post(
                "/createUsers".to_string(),
                json!({"name": "ada", "email": "ada@example.com", "password": "pw"})
            )
        );
    }

    #[test]
    fn test_guarded_screens_disable_submit_while_loading() {
        let mut users = ResourceScreen::<Users>::new();
        users.begin(&Effect::Fetch);
        assert!(users.submit_disabled());
        assert_eq!(users.submit_label(), "Processing...");
        assert!(users.submit().is_none());
        assert!(users.state.error.is_none());

        let mut orders = ResourceScreen::<Orders>::new();
        orders.begin(&Effect::Fetch);
        assert!(!orders.submit_disabled());
        assert_eq!(orders.submit_label(), "Create Order");
    }
}
