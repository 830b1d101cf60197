use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{Messages, Resource, ResourceKind};
use crate::form::{FieldKind, FieldSpec, FormState};
use crate::models::{NewUser, User};

pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Payload = NewUser;

    const KIND: ResourceKind = ResourceKind::Users;
    const LIST_PATH: &'static str = "/users";
    const CREATE_PATH: &'static str = "/createUsers";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "name", FieldKind::Text),
        FieldSpec::new("email", "email", FieldKind::Text),
        FieldSpec::new("password", "password", FieldKind::Secret),
    ];
    const MESSAGES: Messages = Messages {
        title: "User Management",
        validation: "All fields are required",
        fetch_failed: "Error fetching users",
        create_failed: "Error creating user",
        submit_label: "Create User",
        busy_label: Some("Processing..."),
        empty_list: Some("No users found"),
        loading_list: Some("Loading..."),
    };
    const GUARDS_SUBMIT: bool = true;

    // The list endpoint answers with `username`; the create endpoint takes `name`.
    fn payload(form: &FormState) -> NewUser {
        NewUser {
            name: form.value("name").to_string(),
            email: form.value("email").to_string(),
            password: form.value("password").to_string(),
        }
    }

    fn card(user: &User) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                user.username.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(user.email.clone(), Style::default().fg(Color::Gray))),
        ]
    }
}
