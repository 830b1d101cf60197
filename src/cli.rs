use clap::{Parser, Subcommand};

use crate::resource::ResourceKind;

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(about = "Terminal back office for orders, products, reviews and users")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui {
        /// Screen to open first (orders, products, reviews, users)
        #[arg(short, long, default_value = "orders")]
        screen: ResourceKind,
    },

    /// Fetch and print a resource list
    List {
        /// Resource to list (orders, products, reviews, users)
        resource: ResourceKind,
    },

    /// Create an entry, then print the refreshed list
    Create {
        /// Resource to create (orders, products, reviews, users)
        resource: ResourceKind,

        /// Form field as key=value, repeatable (e.g. --field user_id=2)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

impl Commands {
    /// Whether this command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Tui { .. })
    }
}

/// Parse a `key=value` pair
pub fn parse_field(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Expected key=value, got '{}'", input)),
    }
}
