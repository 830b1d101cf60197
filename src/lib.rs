//! Terminal back-office client for the orders, products, reviews and users
//! endpoints of a REST API.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod form;
pub mod models;
pub mod resource;
pub mod screen;
pub mod state;
pub mod tui;
