/// Convenience result type used across the motion layer.
pub type MotionResult<T> = Result<T, MotionError>;

/// Error taxonomy for the motion layer.
///
/// None of these are fatal to a running page: callers log them and skip the enhancement.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required element could not be resolved on the surface.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// The routing layer rejected a navigation.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// A scheduled task failed while running.
    #[error("task error: {0}")]
    Task(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::MissingElement`] value.
    pub fn missing_element(msg: impl Into<String>) -> Self {
        Self::MissingElement(msg.into())
    }

    /// Build a [`MotionError::Navigation`] value.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`MotionError::Task`] value.
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
