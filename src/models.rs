use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub user_id: i64,
    pub total_amount: Numeric,
    pub status: OrderStatus,
    #[serde(default)]
    pub order_date: String,
}

/// Order status as reported by the server. Unknown values are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Other(s) => s,
        }
    }

    /// Statuses offered by the create form, in display order.
    pub fn selectable() -> [OrderStatus; 3] {
        [OrderStatus::Pending, OrderStatus::Shipped, OrderStatus::Delivered]
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number as the server sent it. Decimal columns often arrive as strings
/// (`"12.50"`), so those are kept verbatim rather than failing the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Integer(n) => Some(*n as f64),
            Numeric::Float(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(n) => write!(f, "{}", n),
            Numeric::Float(n) => write!(f, "{}", n),
            Numeric::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub price: Numeric,
    pub stock: Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub rating: Numeric,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_at: String,
}

impl Review {
    /// Number of stars to draw, clamped to the 0..=5 range.
    pub fn stars(&self) -> usize {
        self.rating
            .as_f64()
            .map(|r| r.clamp(0.0, 5.0) as usize)
            .unwrap_or(0)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

// Keeps the password out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub user_id: Option<i64>,
    pub total_amount: serde_json::Value,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub product_name: String,
    pub description: String,
    pub price: serde_json::Value,
    pub stock: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub user_id: Option<i64>,
    pub product_id: Option<i64>,
    pub rating: Option<i64>,
    pub review_text: String,
}

/// Create payload for `/createUsers`. The server lists users back with a
/// `username` key; the create shape uses `name`.
#[derive(Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Parse an integer the way a number input is coerced before sending:
/// fractional input is truncated, garbage yields `None` (sent as `null`).
pub fn parse_int(input: &str) -> Option<i64> {
    let value: f64 = input.trim().parse().ok()?;
    if value.is_finite() {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// Parse a number into a JSON value, keeping integral values as integers.
pub fn parse_number(input: &str) -> serde_json::Value {
    let Ok(value) = input.trim().parse::<f64>() else {
        return serde_json::Value::Null;
    };
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Render a server timestamp in local time, or as-is when it does not parse.
pub fn display_timestamp(raw: &str, with_time: bool) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => {
            let local = parsed.with_timezone(&Local);
            if with_time {
                local.format("%Y-%m-%d %H:%M:%S").to_string()
            } else {
                local.format("%Y-%m-%d").to_string()
            }
        }
        Err(_) => raw.to_string(),
    }
}
