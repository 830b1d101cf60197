use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{Messages, Resource, ResourceKind};
use crate::form::{FieldKind, FieldSpec, FormState, SelectOption};
use crate::models::{display_timestamp, parse_int, parse_number, NewOrder, Order, OrderStatus};

const STATUS_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "pending", label: "Pending" },
    SelectOption { value: "shipped", label: "Shipped" },
    SelectOption { value: "delivered", label: "Delivered" },
];

pub struct Orders;

impl Resource for Orders {
    type Entity = Order;
    type Payload = NewOrder;

    const KIND: ResourceKind = ResourceKind::Orders;
    const LIST_PATH: &'static str = "/orders";
    const CREATE_PATH: &'static str = "/createOrders";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("user_id", "User ID", FieldKind::Integer).with_placeholder("User ID"),
        FieldSpec::new("total_amount", "Total Amount", FieldKind::Decimal)
            .with_placeholder("Total Amount"),
        FieldSpec::new("status", "Status", FieldKind::Select(STATUS_OPTIONS))
            .with_placeholder("Select Order Status"),
    ];
    const MESSAGES: Messages = Messages {
        title: "Orders",
        validation: "Please fill in all fields",
        fetch_failed: "Failed to fetch orders",
        create_failed: "Failed to create order",
        submit_label: "Create Order",
        busy_label: None,
        empty_list: Some("No orders found"),
        loading_list: None,
    };
    const GUARDS_SUBMIT: bool = false;

    fn payload(form: &FormState) -> NewOrder {
        NewOrder {
            user_id: parse_int(form.value("user_id")),
            total_amount: parse_number(form.value("total_amount")),
            status: form.value("status").to_string(),
        }
    }

    fn card(order: &Order) -> Vec<Line<'static>> {
        vec![
            Line::from(vec![
                Span::styled("User ID:", Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {}", order.user_id)),
            ]),
            Line::from(Span::styled(
                format!("Total: ${}", order.total_amount),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Status: {}", order.status),
                Style::default().fg(status_color(&order.status)),
            )),
            Line::from(Span::styled(
                display_timestamp(&order.order_date, true),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

/// Display color of an order status
pub fn status_color(status: &OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::Shipped => Color::Blue,
        OrderStatus::Delivered => Color::Green,
        OrderStatus::Other(_) => Color::Gray,
    }
}
