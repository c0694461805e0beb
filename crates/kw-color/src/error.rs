use thiserror::Error;

/// Failure of a color operation.
///
/// Both variants carry the offending input verbatim so the caller can
/// report it or substitute a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color: {0}")]
    InvalidColor(String),

    #[error("invalid opacity value: {0}")]
    InvalidOpacity(String),
}

#[cfg(test)]
mod tests {
    use super::ColorError;

    #[test]
    fn messages_name_the_input() {
        let err = ColorError::InvalidColor("#GGG".to_string());
        assert_eq!(err.to_string(), "invalid hex color: #GGG");

        let err = ColorError::InvalidOpacity("NaN".to_string());
        assert_eq!(err.to_string(), "invalid opacity value: NaN");
    }
}
