use conform_alpaca::AlpacaError;
use conform_ascom::AscomError;
use serde_json::Value;
use thiserror::Error;

/// Error reported by the transport underneath a facade, passed through as is
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Alpaca(#[from] AlpacaError),

    #[error(transparent)]
    Com(#[from] AscomError),
}

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Unable to create driver for {device}: {reason}")]
    Activation { device: String, reason: String },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("{member} returned {value}, expected {expected}")]
    UnexpectedValue {
        member: String,
        expected: &'static str,
        value: Value,
    },

    #[error("Facade has been disposed")]
    Disposed,
}

impl FacadeError {
    /// ASCOM error number carried by a driver exception, if any
    pub fn driver_error_code(&self) -> Option<i32> {
        match self {
            FacadeError::Driver(DriverError::Alpaca(e)) => e.device_error_code(),
            FacadeError::Driver(DriverError::Com(AscomError::DriverException { code, .. })) => Some(*code),
            _ => None,
        }
    }
}

pub type FacadeResult<T> = Result<T, FacadeError>;
