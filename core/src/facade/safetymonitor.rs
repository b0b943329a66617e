use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::SafetyMonitor;
use crate::settings::DeviceType;

facade!(
    /// Safety monitor reached over COM or Alpaca
    SafetyMonitorFacade,
    DeviceType::SafetyMonitor
);

#[async_trait]
impl SafetyMonitor for SafetyMonitorFacade {
    async fn is_safe(&self) -> FacadeResult<bool> {
        self.base.get("IsSafe").await
    }
}
