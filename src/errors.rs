use thiserror::Error;

/// An error from operating on the register.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// A bad qubit index, qubit list, amplitude vector or operator shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A request the register deliberately does not handle.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The qubit to container mapping is inconsistent. This is a defect, not a usage error.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// A collapse onto an outcome with zero probability.
    #[error("non-physical state: {0}")]
    NonPhysicalState(String),
}

impl RegisterError {
    /// Construct a new `InvalidArgument` error.
    pub fn invalid<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(msg.into())
    }

    /// Construct a new `Unsupported` error.
    pub fn unsupported<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Unsupported(msg.into())
    }

    /// Construct a new `InvariantViolation` error.
    pub fn invariant<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvariantViolation(msg.into())
    }

    /// Construct a new `NonPhysicalState` error.
    pub fn non_physical<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::NonPhysicalState(msg.into())
    }
}

/// A result which may contain a register error.
pub type RegisterResult<T> = Result<T, RegisterError>;

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RegisterError::invalid("bad qubit: 7");
        assert_eq!(err.to_string(), "invalid argument: bad qubit: 7");
        let err = RegisterError::unsupported("2 containers affected");
        assert_eq!(err.to_string(), "unsupported: 2 containers affected");
    }
}
