//! Error display for the CLI.

use colored::Colorize;
use keptn_api::ApiError;

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<ApiError>().and_then(hint_for) {
        eprintln!("\n{}", hint.yellow());
    }
}

fn hint_for(err: &ApiError) -> Option<&'static str> {
    match err {
        ApiError::Remote { status: 401, .. } => {
            Some("Hint: Check the API token (--token or KEPTN_API_TOKEN).")
        }
        ApiError::Remote { status: 403, .. } => {
            Some("Hint: The token may be sent in the wrong header. Try --auth-header.")
        }
        ApiError::Transport(_) => {
            Some("Hint: Check your network connection and the endpoint (--endpoint).")
        }
        ApiError::Config(_) => Some("Hint: Check the KEPTN_* environment variables."),
        ApiError::InvalidPageKey(_) => {
            Some("Hint: Use --pages to limit how many pages are fetched.")
        }
        _ => None,
    }
}
