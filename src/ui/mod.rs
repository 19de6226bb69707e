//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_error, display_status,
    display_success, display_version_transition,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Default is "no": only "y" or "yes" (case-insensitive) confirms.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Prompts user to confirm an action, defaulting to yes.
///
/// Only an explicit "n" or "no" declines.
pub fn confirm_proceed(prompt: &str) -> Result<bool> {
    print!("\n{} (Y/n): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(!(response == "n" || response == "no"))
}
