//! Configuration errors.
//!
//! The engine itself has no failure modes once configured; everything that can
//! go wrong is rejected here, at construction or setter time.

/// Errors raised while building or configuring a simulation
#[derive(Debug)]
pub enum ConfigError {
    /// Grid dimensions must both be positive
    InvalidDimensions { width: usize, height: usize },
    /// Age variance must be a finite fraction in [0, 1]
    InvalidAgeVariance(f64),
    /// Neighbourhood name not recognised
    UnknownNeighbourhood(String),
    /// Any other rejected value
    Invalid(String),
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions {}x{}: both must be > 0", width, height)
            }
            Self::InvalidAgeVariance(v) => {
                write!(f, "Invalid age variance {}: must be within 0.0 - 1.0", v)
            }
            Self::UnknownNeighbourhood(name) => {
                write!(f, "Unknown neighbourhood '{}' (expected 'neumann' or 'moore')", name)
            }
            Self::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Yaml(e) => write!(f, "YAML error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConfigError::InvalidDimensions { width: 0, height: 5 };
        assert!(err.to_string().contains("0x5"));

        let err = ConfigError::UnknownNeighbourhood("hex".to_string());
        assert!(err.to_string().contains("hex"));
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;

        let err: ConfigError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(ConfigError::InvalidAgeVariance(2.0).source().is_none());
    }
}
