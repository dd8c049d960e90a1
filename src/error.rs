pub type InviewResult<T> = Result<T, InviewError>;

#[derive(thiserror::Error, Debug)]
pub enum InviewError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("policy error: {0}")]
    Policy(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InviewError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn policy(msg: impl Into<String>) -> Self {
        Self::Policy(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
