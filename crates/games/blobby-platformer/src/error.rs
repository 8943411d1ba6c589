/// Precondition violations detected when a level is started.
///
/// Under-generation is not an error: it is reported through
/// [`GenerationReport`](crate::level_gen::GenerationReport).
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// Configuration values are inconsistent (e.g. a platform tier above the jump apex).
    InvalidConfig(String),
    /// Derived world parameters are out of range (e.g. non-positive width).
    InvalidWorld(String),
    /// Level parameters supplied by the host are out of range.
    InvalidParams(String),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(m) => write!(f, "invalid config: {m}"),
            Self::InvalidWorld(m) => write!(f, "invalid world: {m}"),
            Self::InvalidParams(m) => write!(f, "invalid level params: {m}"),
        }
    }
}

impl std::error::Error for LevelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = LevelError::InvalidWorld("width must be positive".to_string());
        assert_eq!(err.to_string(), "invalid world: width must be positive");
    }
}
