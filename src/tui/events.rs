//! Event handling for the back-office TUI

use crate::models::{Order, Product, Review, User};
use crate::state::Action;

/// Outcomes of background requests, delivered to the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Orders(Action<Order>),
    Products(Action<Product>),
    Reviews(Action<Review>),
    Users(Action<User>),
}
