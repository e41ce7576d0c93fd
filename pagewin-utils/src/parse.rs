/// Why a numeric text input was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CountError {
    #[error("not a whole number")]
    NotANumber,
    #[error("larger than {max}")]
    TooLarge { max: usize },
}

/// Parse a non-negative count typed by a user, bounded by `max`.
///
/// Surrounding whitespace and `_`/`,` digit separators are ignored.
pub fn parse_count(raw: &str, max: usize) -> Result<usize, CountError> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ','))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CountError::NotANumber);
    }

    match digits.parse::<usize>() {
        Ok(value) if value <= max => Ok(value),
        // All digits, so the only parse failure left is overflow.
        _ => Err(CountError::TooLarge { max }),
    }
}

/// Split the argument tail of a message command on whitespace.
pub fn split_args(raw: Option<&str>) -> Vec<&str> {
    raw.map(|value| value.split_whitespace().collect())
        .unwrap_or_default()
}
