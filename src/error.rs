//! Application-level error type.
//!
//! Exit code conventions:
//!
//! - 2: usage / configuration / input errors
//! - 3: the external optimizer could not be launched or waited on
//! - 4: the optimizer or an LLM endpoint ran but produced unusable output
//! - 5: the optimizer exceeded its deadline

use crate::bridge::BridgeError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<BridgeError> for AppError {
    fn from(err: BridgeError) -> Self {
        let exit_code = match &err {
            BridgeError::Serialize { .. } => 2,
            BridgeError::Spawn { .. } | BridgeError::Wait { .. } => 3,
            BridgeError::NoOutput { .. }
            | BridgeError::InvalidOutput { .. }
            | BridgeError::NonZeroExit { .. } => 4,
            BridgeError::Timeout { .. } => 5,
        };
        AppError::new(exit_code, err.to_string())
    }
}
