//! Common error types for SkillBloom components.

use thiserror::Error;

/// Common errors across SkillBloom components
#[derive(Debug, Error)]
pub enum BloomError {
    /// Catalog could not be loaded or is inconsistent
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// State token could not be produced
    #[error("State encoding error: {0}")]
    StateEncoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_source() {
        assert_eq!(
            BloomError::Catalog("duplicate challenge id ch1".into()).to_string(),
            "Catalog error: duplicate challenge id ch1"
        );
        assert!(
            BloomError::StateEncoding("too long".into())
                .to_string()
                .starts_with("State encoding error")
        );
    }
}
