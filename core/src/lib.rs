//! Conform Core
//!
//! Configuration and device access for the ASCOM conformance checker.
//!
//! - [`configuration`]: the single live [`Settings`] record, loaded from and
//!   saved to `conform.settings`, with change notification.
//! - [`facade`]: one facade per ASCOM device category. A facade forwards each
//!   interface member to a COM driver or an Alpaca device, whichever the
//!   settings selected when it was built.
//! - [`logging`]: tracing subscriber setup.

#[macro_use]
pub mod value;

pub mod configuration;
pub mod error;
pub mod facade;
pub mod interfaces;
pub mod logging;
pub mod settings;
pub mod transport;

pub use configuration::{ConformConfiguration, SubscriptionId};
pub use error::{DriverError, FacadeError, FacadeResult};
pub use facade::{DeviceFacade, FacadeBase};
pub use settings::{ComDevice, CurrentDeviceType, DeviceTechnology, DeviceType, Settings, ValidationError};
pub use transport::{DriverHandle, DriverTarget};
pub use value::{FromDriverValue, ToDriverValue};

pub use conform_alpaca::AlpacaDevice;
pub use conform_ascom::{ComActivator, DispatchObject};
