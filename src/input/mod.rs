//! Input processing module
//! Detects file types, extracts text and validates documents before analysis

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use file_detector::FileType;
pub use manager::InputManager;

use crate::error::{AdvisorError, Result};

/// Reject documents with no analyzable text
pub fn require_text<'t>(label: &str, text: &'t str) -> Result<&'t str> {
    if text.trim().is_empty() {
        return Err(AdvisorError::InvalidInput(format!("{} is empty", label)));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Resume", "Rust developer").unwrap(), "Rust developer");
        assert!(matches!(
            require_text("Job description", "  \n\t"),
            Err(AdvisorError::InvalidInput(msg)) if msg == "Job description is empty"
        ));
    }
}
