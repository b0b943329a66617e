use async_trait::async_trait;

use super::Device;
use crate::error::FacadeResult;

/// IFilterWheelV2
#[async_trait]
pub trait FilterWheel: Device {
    /// Focus offset of each filter, in focuser steps
    async fn focus_offsets(&self) -> FacadeResult<Vec<i32>>;

    async fn names(&self) -> FacadeResult<Vec<String>>;

    /// Current slot, or -1 while the wheel is moving
    async fn position(&self) -> FacadeResult<i16>;

    async fn set_position(&self, position: i16) -> FacadeResult<()>;
}
