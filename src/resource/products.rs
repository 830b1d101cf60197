use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{Messages, Resource, ResourceKind};
use crate::form::{FieldKind, FieldSpec, FormState};
use crate::models::{parse_number, NewProduct, Product};

pub struct Products;

impl Resource for Products {
    type Entity = Product;
    type Payload = NewProduct;

    const KIND: ResourceKind = ResourceKind::Products;
    const LIST_PATH: &'static str = "/products";
    const CREATE_PATH: &'static str = "/createProducts";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Product Name", FieldKind::Text).with_placeholder("Product Name"),
        FieldSpec::new("description", "Description", FieldKind::TextArea)
            .with_placeholder("Description"),
        FieldSpec::new("price", "Price", FieldKind::Decimal).with_placeholder("Price"),
        FieldSpec::new("stock", "Stock", FieldKind::Integer).with_placeholder("Stock"),
    ];
    const MESSAGES: Messages = Messages {
        title: "Products",
        validation: "All fields are required",
        fetch_failed: "Failed to load products",
        create_failed: "Failed to create product",
        submit_label: "Create Product",
        busy_label: None,
        empty_list: None,
        loading_list: None,
    };
    const GUARDS_SUBMIT: bool = false;

    fn payload(form: &FormState) -> NewProduct {
        NewProduct {
            product_name: form.value("name").to_string(),
            description: form.value("description").to_string(),
            price: parse_number(form.value("price")),
            stock: parse_number(form.value("stock")),
        }
    }

    fn card(product: &Product) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                product.product_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                product.description.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("Price: ${}", product.price),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Stock: {}", product.stock),
                Style::default().fg(Color::Yellow),
            )),
        ]
    }
}
