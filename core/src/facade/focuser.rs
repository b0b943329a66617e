use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::Focuser;
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Focuser reached over COM or Alpaca
    FocuserFacade,
    DeviceType::Focuser
);

#[async_trait]
impl Focuser for FocuserFacade {
    async fn absolute(&self) -> FacadeResult<bool> {
        self.base.get("Absolute").await
    }

    async fn is_moving(&self) -> FacadeResult<bool> {
        self.base.get("IsMoving").await
    }

    async fn link(&self) -> FacadeResult<bool> {
        self.base.get("Link").await
    }

    async fn set_link(&self, link: bool) -> FacadeResult<()> {
        self.base.set("Link", &link).await
    }

    async fn max_increment(&self) -> FacadeResult<i32> {
        self.base.get("MaxIncrement").await
    }

    async fn max_step(&self) -> FacadeResult<i32> {
        self.base.get("MaxStep").await
    }

    async fn position(&self) -> FacadeResult<i32> {
        self.base.get("Position").await
    }

    async fn step_size(&self) -> FacadeResult<f64> {
        self.base.get("StepSize").await
    }

    async fn temp_comp(&self) -> FacadeResult<bool> {
        self.base.get("TempComp").await
    }

    async fn set_temp_comp(&self, temp_comp: bool) -> FacadeResult<()> {
        self.base.set("TempComp", &temp_comp).await
    }

    async fn temp_comp_available(&self) -> FacadeResult<bool> {
        self.base.get("TempCompAvailable").await
    }

    async fn temperature(&self) -> FacadeResult<f64> {
        self.base.get("Temperature").await
    }

    async fn halt(&self) -> FacadeResult<()> {
        self.base.call("Halt", &[]).await
    }

    async fn move_to(&self, position: i32) -> FacadeResult<()> {
        self.base.call("Move", &params!["Position" => position]).await
    }
}
