//! Device capability interfaces
//!
//! One async trait per ASCOM device category, plus [`Device`] for the members
//! every category shares. Member names follow the ASCOM interface members in
//! snake_case and keep their parameter order.

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
mod types;

pub use camera::Camera;
pub use covercalibrator::CoverCalibrator;
pub use dome::Dome;
pub use filterwheel::FilterWheel;
pub use focuser::Focuser;
pub use observingconditions::ObservingConditions;
pub use rotator::Rotator;
pub use safetymonitor::SafetyMonitor;
pub use switch::Switch;
pub use telescope::Telescope;
pub use types::*;

use async_trait::async_trait;

use crate::error::FacadeResult;

/// Members common to every ASCOM device
#[async_trait]
pub trait Device: Send + Sync {
    /// Invoke a device-specific named action
    async fn action(&self, action_name: &str, action_parameters: &str) -> FacadeResult<String>;

    async fn command_blind(&self, command: &str, raw: bool) -> FacadeResult<()>;

    async fn command_bool(&self, command: &str, raw: bool) -> FacadeResult<bool>;

    async fn command_string(&self, command: &str, raw: bool) -> FacadeResult<String>;

    async fn connected(&self) -> FacadeResult<bool>;

    async fn set_connected(&self, connected: bool) -> FacadeResult<()>;

    async fn description(&self) -> FacadeResult<String>;

    async fn driver_info(&self) -> FacadeResult<String>;

    async fn driver_version(&self) -> FacadeResult<String>;

    async fn interface_version(&self) -> FacadeResult<i16>;

    async fn name(&self) -> FacadeResult<String>;

    /// Actions accepted by [`Device::action`]
    async fn supported_actions(&self) -> FacadeResult<Vec<String>>;
}
