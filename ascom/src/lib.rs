//! ASCOM COM Interface
//!
//! Activates locally registered ASCOM component drivers by ProgID and
//! forwards member reads, writes and method calls to them by name. COM
//! objects are apartment threaded, so every driver lives on its own worker
//! thread (see [`ComDriver`]); callers only ever see a `Send + Sync` handle.
//!
//! Real activation is only possible on Windows. Elsewhere
//! [`SystemActivator`] reports [`AscomError::Unavailable`], and an alternative
//! [`ComActivator`] can be supplied instead.

mod driver;
#[cfg(windows)]
mod windows_impl;

pub use driver::ComDriver;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while activating or talking to a COM driver
#[derive(Debug, Clone, Error)]
pub enum AscomError {
    #[error("COM drivers are not available: {0}")]
    Unavailable(String),

    #[error("Failed to activate {prog_id}: {reason}")]
    Activation { prog_id: String, reason: String },

    #[error("COM error (HRESULT {hresult:#X}) calling {member}: {message}")]
    ComError {
        member: String,
        hresult: i32,
        message: String,
    },

    /// Exception thrown by the driver itself
    #[error("ASCOM exception (code {code:#X}) from {origin}: {description}")]
    DriverException {
        code: i32,
        origin: String,
        description: String,
    },

    #[error("Member {0} is not implemented by the driver")]
    UnknownMember(String),

    #[error("Cannot convert value: {0}")]
    Conversion(String),

    #[error("COM worker thread has stopped")]
    WorkerStopped,

    #[error("Driver has been released")]
    Released,
}

/// Result type for ASCOM operations
pub type AscomResult<T> = Result<T, AscomError>;

/// A live driver object, addressed by member name.
///
/// Arguments are positional, in the order the interface declares them.
/// Implementations are only ever used from the thread that created them.
pub trait DispatchObject {
    /// Read a property, or call a read-only method when `args` is not empty
    fn get(&mut self, member: &str, args: &[Value]) -> AscomResult<Value>;

    /// Write a property
    fn set(&mut self, member: &str, value: &Value) -> AscomResult<()>;

    /// Call a method
    fn call(&mut self, member: &str, args: &[Value]) -> AscomResult<Value>;
}

/// Strategy for turning a ProgID into a [`DispatchObject`].
///
/// `enter_thread` and `leave_thread` bracket the lifetime of the worker
/// thread that owns the object.
pub trait ComActivator: Send + Sync {
    fn enter_thread(&self) -> AscomResult<()> {
        Ok(())
    }

    fn leave_thread(&self) {}

    fn activate(&self, prog_id: &str) -> AscomResult<Box<dyn DispatchObject>>;
}

/// Activates drivers registered with the operating system's COM runtime
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemActivator;

#[cfg(windows)]
impl ComActivator for SystemActivator {
    fn enter_thread(&self) -> AscomResult<()> {
        windows_impl::init_com()
    }

    fn leave_thread(&self) {
        windows_impl::uninit_com();
    }

    fn activate(&self, prog_id: &str) -> AscomResult<Box<dyn DispatchObject>> {
        Ok(Box::new(windows_impl::ComObject::create(prog_id)?))
    }
}

#[cfg(not(windows))]
impl ComActivator for SystemActivator {
    fn activate(&self, prog_id: &str) -> AscomResult<Box<dyn DispatchObject>> {
        Err(AscomError::Unavailable(format!(
            "cannot activate {}: COM component drivers require Windows",
            prog_id
        )))
    }
}

/// JSON form of a double returned by a driver.
///
/// JSON has no NaN or infinities, so those travel as the strings `"NaN"`,
/// `"Infinity"` and `"-Infinity"`.
pub fn double_value(f: f64) -> Value {
    match serde_json::Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::String("NaN".to_string()),
        None if f > 0.0 => Value::String("Infinity".to_string()),
        None => Value::String("-Infinity".to_string()),
    }
}

/// Check if COM activation is possible on this platform
pub fn is_available() -> bool {
    cfg!(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(windows))]
    fn test_system_activator_unavailable() {
        assert!(!is_available());
        match SystemActivator.activate("ASCOM.Simulator.Telescope") {
            Err(AscomError::Unavailable(msg)) => assert!(msg.contains("ASCOM.Simulator.Telescope")),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("activation should fail off Windows"),
        }
    }

    #[test]
    fn test_non_finite_doubles_are_named() {
        assert_eq!(double_value(2.5), Value::from(2.5));
        assert_eq!(double_value(f64::NAN), Value::from("NaN"));
        assert_eq!(double_value(f64::INFINITY), Value::from("Infinity"));
        assert_eq!(double_value(f64::NEG_INFINITY), Value::from("-Infinity"));
    }

    #[test]
    fn test_error_messages() {
        let e = AscomError::DriverException {
            code: 0x80040400u32 as i32,
            origin: "ASCOM.Simulator.Telescope".to_string(),
            description: "Property read SiteElevation is not implemented".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("0x80040400"));
        assert!(msg.contains("SiteElevation"));
    }
}
