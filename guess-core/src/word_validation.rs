use crate::SessionError;

/// Checks a raw guess before anything else looks at it.
///
/// The word is returned untouched: duplicates are matched on the exact text
/// the player typed, so no trimming or case folding happens here.
pub fn validate_guess(word: &str) -> Result<&str, SessionError> {
    if is_blank(word) {
        return Err(SessionError::InvalidInput);
    }
    Ok(word)
}

pub fn is_blank(word: &str) -> bool {
    word.chars().all(char::is_whitespace)
}
