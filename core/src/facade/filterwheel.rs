use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::FilterWheel;
use crate::settings::DeviceType;

facade!(
    /// Filter wheel reached over COM or Alpaca
    FilterWheelFacade,
    DeviceType::FilterWheel
);

#[async_trait]
impl FilterWheel for FilterWheelFacade {
    async fn focus_offsets(&self) -> FacadeResult<Vec<i32>> {
        self.base.get("FocusOffsets").await
    }

    async fn names(&self) -> FacadeResult<Vec<String>> {
        self.base.get("Names").await
    }

    async fn position(&self) -> FacadeResult<i16> {
        self.base.get("Position").await
    }

    async fn set_position(&self, position: i16) -> FacadeResult<()> {
        self.base.set("Position", &position).await
    }
}
