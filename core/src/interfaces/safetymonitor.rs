use async_trait::async_trait;

use super::Device;
use crate::error::FacadeResult;

/// ISafetyMonitor
#[async_trait]
pub trait SafetyMonitor: Device {
    async fn is_safe(&self) -> FacadeResult<bool>;
}
