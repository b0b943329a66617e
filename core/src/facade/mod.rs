//! Device facades
//!
//! Each facade implements one capability interface by forwarding every
//! member, unchanged, to the driver handle held by its [`FacadeBase`].

/// Declare a facade struct bound to one device category
macro_rules! facade {
    ($(#[$meta:meta])* $name:ident, $device_type:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            base: $crate::facade::FacadeBase,
        }

        impl $name {
            pub fn new(settings: &$crate::settings::Settings) -> $crate::error::FacadeResult<Self> {
                Ok(Self {
                    base: $crate::facade::FacadeBase::new(settings, $device_type)?,
                })
            }

            pub fn with_activator(
                settings: &$crate::settings::Settings,
                activator: std::sync::Arc<dyn conform_ascom::ComActivator>,
            ) -> $crate::error::FacadeResult<Self> {
                Ok(Self {
                    base: $crate::facade::FacadeBase::with_activator(settings, $device_type, activator)?,
                })
            }

            /// Release the driver. Safe to call more than once.
            pub async fn dispose(&self) {
                self.base.dispose().await
            }
        }

        impl $crate::facade::Facade for $name {
            fn base(&self) -> &$crate::facade::FacadeBase {
                &self.base
            }
        }
    };
}

mod base;
mod camera;
mod covercalibrator;
mod dome;
mod filterwheel;
mod focuser;
mod observingconditions;
mod rotator;
mod safetymonitor;
mod switch;
mod telescope;

pub use base::FacadeBase;
pub use camera::CameraFacade;
pub use covercalibrator::CoverCalibratorFacade;
pub use dome::DomeFacade;
pub use filterwheel::FilterWheelFacade;
pub use focuser::FocuserFacade;
pub use observingconditions::ObservingConditionsFacade;
pub use rotator::RotatorFacade;
pub use safetymonitor::SafetyMonitorFacade;
pub use switch::SwitchFacade;
pub use telescope::{AxisRatesFacade, TelescopeFacade, TrackingRatesFacade};

use std::sync::Arc;

use async_trait::async_trait;
use conform_ascom::{ComActivator, SystemActivator};

use crate::error::{FacadeError, FacadeResult};
use crate::interfaces::Device;
use crate::params;
use crate::settings::{DeviceType, Settings};

/// Access to the shared base of a facade
pub trait Facade: Send + Sync {
    fn base(&self) -> &FacadeBase;
}

#[async_trait]
impl<F: Facade> Device for F {
    async fn action(&self, action_name: &str, action_parameters: &str) -> FacadeResult<String> {
        self.base()
            .call("Action", &params!["Action" => action_name, "Parameters" => action_parameters])
            .await
    }

    async fn command_blind(&self, command: &str, raw: bool) -> FacadeResult<()> {
        self.base()
            .call("CommandBlind", &params!["Command" => command, "Raw" => raw])
            .await
    }

    async fn command_bool(&self, command: &str, raw: bool) -> FacadeResult<bool> {
        self.base()
            .call("CommandBool", &params!["Command" => command, "Raw" => raw])
            .await
    }

    async fn command_string(&self, command: &str, raw: bool) -> FacadeResult<String> {
        self.base()
            .call("CommandString", &params!["Command" => command, "Raw" => raw])
            .await
    }

    async fn connected(&self) -> FacadeResult<bool> {
        self.base().get("Connected").await
    }

    async fn set_connected(&self, connected: bool) -> FacadeResult<()> {
        self.base().set("Connected", &connected).await
    }

    async fn description(&self) -> FacadeResult<String> {
        self.base().get("Description").await
    }

    async fn driver_info(&self) -> FacadeResult<String> {
        self.base().get("DriverInfo").await
    }

    async fn driver_version(&self) -> FacadeResult<String> {
        self.base().get("DriverVersion").await
    }

    async fn interface_version(&self) -> FacadeResult<i16> {
        self.base().get("InterfaceVersion").await
    }

    async fn name(&self) -> FacadeResult<String> {
        self.base().get("Name").await
    }

    async fn supported_actions(&self) -> FacadeResult<Vec<String>> {
        self.base().get("SupportedActions").await
    }
}

/// Facade for whichever category the settings select
#[derive(Debug)]
pub enum DeviceFacade {
    Camera(CameraFacade),
    CoverCalibrator(CoverCalibratorFacade),
    Dome(DomeFacade),
    FilterWheel(FilterWheelFacade),
    Focuser(FocuserFacade),
    ObservingConditions(ObservingConditionsFacade),
    Rotator(RotatorFacade),
    SafetyMonitor(SafetyMonitorFacade),
    Switch(SwitchFacade),
    Telescope(TelescopeFacade),
}

impl DeviceFacade {
    /// Build the facade for `CurrentDeviceType`.
    ///
    /// A stored category with no facade is a configuration error.
    pub fn open(settings: &Settings) -> FacadeResult<Self> {
        Self::open_with_activator(settings, Arc::new(SystemActivator))
    }

    pub fn open_with_activator(settings: &Settings, activator: Arc<dyn ComActivator>) -> FacadeResult<Self> {
        let device_type = settings.current_device_type.supported().ok_or_else(|| {
            FacadeError::Configuration(format!(
                "Device type is not supported: '{}'",
                settings.current_device_type
            ))
        })?;
        let facade = match device_type {
            DeviceType::Camera => DeviceFacade::Camera(CameraFacade::with_activator(settings, activator)?),
            DeviceType::CoverCalibrator => {
                DeviceFacade::CoverCalibrator(CoverCalibratorFacade::with_activator(settings, activator)?)
            }
            DeviceType::Dome => DeviceFacade::Dome(DomeFacade::with_activator(settings, activator)?),
            DeviceType::FilterWheel => DeviceFacade::FilterWheel(FilterWheelFacade::with_activator(settings, activator)?),
            DeviceType::Focuser => DeviceFacade::Focuser(FocuserFacade::with_activator(settings, activator)?),
            DeviceType::ObservingConditions => {
                DeviceFacade::ObservingConditions(ObservingConditionsFacade::with_activator(settings, activator)?)
            }
            DeviceType::Rotator => DeviceFacade::Rotator(RotatorFacade::with_activator(settings, activator)?),
            DeviceType::SafetyMonitor => {
                DeviceFacade::SafetyMonitor(SafetyMonitorFacade::with_activator(settings, activator)?)
            }
            DeviceType::Switch => DeviceFacade::Switch(SwitchFacade::with_activator(settings, activator)?),
            DeviceType::Telescope => DeviceFacade::Telescope(TelescopeFacade::with_activator(settings, activator)?),
        };
        Ok(facade)
    }

    fn facade(&self) -> &dyn Facade {
        match self {
            DeviceFacade::Camera(f) => f,
            DeviceFacade::CoverCalibrator(f) => f,
            DeviceFacade::Dome(f) => f,
            DeviceFacade::FilterWheel(f) => f,
            DeviceFacade::Focuser(f) => f,
            DeviceFacade::ObservingConditions(f) => f,
            DeviceFacade::Rotator(f) => f,
            DeviceFacade::SafetyMonitor(f) => f,
            DeviceFacade::Switch(f) => f,
            DeviceFacade::Telescope(f) => f,
        }
    }

    /// Common members, whatever the category
    pub fn device(&self) -> &dyn Device {
        match self {
            DeviceFacade::Camera(f) => f,
            DeviceFacade::CoverCalibrator(f) => f,
            DeviceFacade::Dome(f) => f,
            DeviceFacade::FilterWheel(f) => f,
            DeviceFacade::Focuser(f) => f,
            DeviceFacade::ObservingConditions(f) => f,
            DeviceFacade::Rotator(f) => f,
            DeviceFacade::SafetyMonitor(f) => f,
            DeviceFacade::Switch(f) => f,
            DeviceFacade::Telescope(f) => f,
        }
    }

    pub fn base(&self) -> &FacadeBase {
        self.facade().base()
    }

    pub fn device_type(&self) -> DeviceType {
        self.base().device_type()
    }

    pub async fn dispose(&self) {
        self.base().dispose().await
    }
}
