//! Reusable UI components for the back-office TUI

pub mod form_field;
