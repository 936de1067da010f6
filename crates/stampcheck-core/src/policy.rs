//! Overwrite gate policy
//!
//! Deciding whether an existing data file may be replaced is a pure
//! function of "does it exist" and "what did the user answer". Asking the
//! question is delegated to a [`ConfirmOverwrite`] implementation so the
//! writer can be driven without a terminal.

use std::path::Path;

/// What the writer should do with the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// File is absent: create it and write
    Create,
    /// File exists and the user agreed to replace it
    Overwrite,
    /// File exists and the user declined; leave it untouched
    Skip,
}

/// Decide the overwrite outcome
///
/// `answer` is only consulted when the file exists.
///
/// # Example
/// ```
/// use stampcheck_core::policy::{decide_overwrite, OverwriteDecision};
///
/// assert_eq!(decide_overwrite(false, None), OverwriteDecision::Create);
/// assert_eq!(decide_overwrite(true, Some("y")), OverwriteDecision::Overwrite);
/// assert_eq!(decide_overwrite(true, Some("n")), OverwriteDecision::Skip);
/// ```
pub fn decide_overwrite(exists: bool, answer: Option<&str>) -> OverwriteDecision {
    if !exists {
        return OverwriteDecision::Create;
    }
    match answer {
        Some(answer) if is_affirmative(answer) => OverwriteDecision::Overwrite,
        _ => OverwriteDecision::Skip,
    }
}

/// Only a single `Y`/`y` confirms; the line terminator is ignored
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y")
}

/// Source of the user's answer to the overwrite question
pub trait ConfirmOverwrite {
    /// Ask whether `path` may be replaced and return the raw answer
    ///
    /// # Errors
    ///
    /// I/O failures while asking.
    fn confirm_overwrite(&mut self, path: &Path) -> std::io::Result<String>;
}

/// Always gives the same answer; used by `--yes` and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAnswer(pub String);

impl FixedAnswer {
    pub fn yes() -> Self {
        Self("Y".to_string())
    }

    pub fn no() -> Self {
        Self("n".to_string())
    }
}

impl ConfirmOverwrite for FixedAnswer {
    fn confirm_overwrite(&mut self, _path: &Path) -> std::io::Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_created_without_answer() {
        assert_eq!(decide_overwrite(false, None), OverwriteDecision::Create);
        assert_eq!(decide_overwrite(false, Some("n")), OverwriteDecision::Create);
    }

    #[test]
    fn test_existing_file_needs_yes() {
        assert_eq!(decide_overwrite(true, Some("Y")), OverwriteDecision::Overwrite);
        assert_eq!(decide_overwrite(true, Some("y\n")), OverwriteDecision::Overwrite);
        assert_eq!(decide_overwrite(true, Some("Y\r\n")), OverwriteDecision::Overwrite);
    }

    #[test]
    fn test_anything_else_skips() {
        for answer in ["", "n", "N", "yes", " y", "Y Y", "\n"] {
            assert_eq!(
                decide_overwrite(true, Some(answer)),
                OverwriteDecision::Skip,
                "answer {:?}",
                answer
            );
        }
        assert_eq!(decide_overwrite(true, None), OverwriteDecision::Skip);
    }

    #[test]
    fn test_fixed_answer() {
        let path = Path::new("data.json");
        assert_eq!(FixedAnswer::yes().confirm_overwrite(path).unwrap(), "Y");
        assert_eq!(FixedAnswer::no().confirm_overwrite(path).unwrap(), "n");
    }
}
