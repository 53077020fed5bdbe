//! Input validation for values that end up in request URLs.

use codelearn_api::types::Difficulty;

use crate::error::CodeLearnError;
use crate::filters::SearchKind;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Strip ASCII control characters (0x00-0x1F and 0x7F), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, CodeLearnError> {
    if input.len() > max_len {
        return Err(CodeLearnError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_control()).collect();
    Ok(cleaned.trim().to_string())
}

/// Validates a search keyword typed by the user. Empty keywords are rejected.
pub fn validate_search(input: &str) -> Result<String, CodeLearnError> {
    let sanitized = sanitize_text(input, MAX_SEARCH_LENGTH)?;
    if sanitized.is_empty() {
        return Err(CodeLearnError::InvalidInput(
            "search keyword cannot be empty".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Lenient form of [`validate_search`] for keywords read from a URL:
/// overlong input is cut at a character boundary, empty input becomes `None`.
pub fn normalize_keyword(input: &str) -> Option<String> {
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_control()).collect();
    let mut keyword = cleaned.trim().to_string();
    if keyword.len() > MAX_SEARCH_LENGTH {
        let mut end = MAX_SEARCH_LENGTH;
        while !keyword.is_char_boundary(end) {
            end -= 1;
        }
        keyword.truncate(end);
        keyword = keyword.trim_end().to_string();
    }
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

/// Parses a difficulty name, case-insensitively.
pub fn validate_difficulty(input: &str) -> Result<Difficulty, CodeLearnError> {
    input
        .trim()
        .to_ascii_lowercase()
        .parse::<Difficulty>()
        .map_err(|_| {
            CodeLearnError::InvalidInput(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                input
            ))
        })
}

pub fn validate_search_kind(input: &str) -> Result<SearchKind, CodeLearnError> {
    input.trim().to_ascii_lowercase().parse::<SearchKind>().map_err(|_| {
        CodeLearnError::InvalidInput(format!(
            "unknown search type '{}', expected course, practice, contest or class",
            input
        ))
    })
}

pub fn validate_page_size(page_size: u32) -> Result<u32, CodeLearnError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(CodeLearnError::InvalidInput(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(sanitize_text("  rust\u{0}\n ", 100).unwrap(), "rust");
    }

    #[test]
    fn sanitize_rejects_long_input() {
        let long = "a".repeat(101);
        assert!(sanitize_text(&long, 100).is_err());
    }

    #[test]
    fn empty_search_is_rejected() {
        assert!(validate_search("   ").is_err());
        assert_eq!(validate_search(" two sum ").unwrap(), "two sum");
    }

    #[test]
    fn normalize_keyword_truncates_and_empties() {
        assert_eq!(normalize_keyword(""), None);
        assert_eq!(normalize_keyword(" \t "), None);
        let long = "é".repeat(80);
        let out = normalize_keyword(&long).unwrap();
        assert!(out.len() <= MAX_SEARCH_LENGTH);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn page_size_bounds() {
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
        assert_eq!(validate_page_size(6).unwrap(), 6);
    }

    #[test]
    fn difficulty_and_search_kind_parse_case_insensitively() {
        assert_eq!(validate_difficulty(" HARD ").unwrap(), Difficulty::Hard);
        assert!(validate_difficulty("extreme").is_err());
        assert_eq!(validate_search_kind("Contest").unwrap(), SearchKind::Contest);
        assert!(validate_search_kind("lesson").is_err());
    }
}
