use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::{Messages, Resource, ResourceKind};
use crate::form::{FieldKind, FieldSpec, FormState, SelectOption};
use crate::models::{display_timestamp, parse_int, NewReview, Review};

const RATING_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "1", label: "1 ★" },
    SelectOption { value: "2", label: "2 ★★" },
    SelectOption { value: "3", label: "3 ★★★" },
    SelectOption { value: "4", label: "4 ★★★★" },
    SelectOption { value: "5", label: "5 ★★★★★" },
];

pub struct Reviews;

impl Resource for Reviews {
    type Entity = Review;
    type Payload = NewReview;

    const KIND: ResourceKind = ResourceKind::Reviews;
    const LIST_PATH: &'static str = "/reviews";
    const CREATE_PATH: &'static str = "/createReviews";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("product_id", "Product ID", FieldKind::Integer)
            .with_placeholder("Product ID"),
        FieldSpec::new("user_id", "User ID", FieldKind::Integer).with_placeholder("User ID"),
        FieldSpec::new("rating", "Rating", FieldKind::Select(RATING_OPTIONS))
            .with_placeholder("Select Rating"),
        FieldSpec::new("review_text", "Review", FieldKind::TextArea)
            .with_placeholder("Write your review..."),
    ];
    const MESSAGES: Messages = Messages {
        title: "Reviews",
        validation: "Please fill in all fields",
        fetch_failed: "Failed to fetch reviews",
        create_failed: "Error creating review",
        submit_label: "Submit Review",
        busy_label: None,
        empty_list: None,
        loading_list: None,
    };
    const GUARDS_SUBMIT: bool = true;

    fn payload(form: &FormState) -> NewReview {
        NewReview {
            user_id: parse_int(form.value("user_id")),
            product_id: parse_int(form.value("product_id")),
            rating: parse_int(form.value("rating")),
            review_text: form.value("review_text").to_string(),
        }
    }

    fn card(review: &Review) -> Vec<Line<'static>> {
        let muted = Style::default().fg(Color::DarkGray);
        vec![
            Line::from(vec![
                Span::styled(format!("User #{}", review.user_id), muted),
                Span::raw("  "),
                Span::styled("★".repeat(review.stars()), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(review.review_text.clone()),
            Line::from(Span::styled(
                format!(
                    "Product #{} • {}",
                    review.product_id,
                    display_timestamp(&review.created_at, false)
                ),
                muted,
            )),
        ]
    }
}
