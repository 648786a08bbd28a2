//! CLI command handlers.

mod list_default;
mod upload;

pub use list_default::run_list_default;
pub use upload::{collect_requests, run_upload, validate_address};

#[cfg(test)]
pub use upload::execute;

/// Separator line used around the batch output.
pub fn rule() -> String {
    "=".repeat(60)
}
