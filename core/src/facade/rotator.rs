use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::Rotator;
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Rotator reached over COM or Alpaca
    RotatorFacade,
    DeviceType::Rotator
);

#[async_trait]
impl Rotator for RotatorFacade {
    async fn can_reverse(&self) -> FacadeResult<bool> {
        self.base.get("CanReverse").await
    }

    async fn is_moving(&self) -> FacadeResult<bool> {
        self.base.get("IsMoving").await
    }

    async fn mechanical_position(&self) -> FacadeResult<f64> {
        self.base.get("MechanicalPosition").await
    }

    async fn position(&self) -> FacadeResult<f64> {
        self.base.get("Position").await
    }

    async fn reverse(&self) -> FacadeResult<bool> {
        self.base.get("Reverse").await
    }

    async fn set_reverse(&self, reverse: bool) -> FacadeResult<()> {
        self.base.set("Reverse", &reverse).await
    }

    async fn step_size(&self) -> FacadeResult<f64> {
        self.base.get("StepSize").await
    }

    async fn target_position(&self) -> FacadeResult<f64> {
        self.base.get("TargetPosition").await
    }

    async fn halt(&self) -> FacadeResult<()> {
        self.base.call("Halt", &[]).await
    }

    async fn move_by(&self, position: f64) -> FacadeResult<()> {
        self.base.call("Move", &params!["Position" => position]).await
    }

    async fn move_absolute(&self, position: f64) -> FacadeResult<()> {
        self.base.call("MoveAbsolute", &params!["Position" => position]).await
    }

    async fn move_mechanical(&self, position: f64) -> FacadeResult<()> {
        self.base.call("MoveMechanical", &params!["Position" => position]).await
    }

    async fn sync(&self, position: f64) -> FacadeResult<()> {
        self.base.call("Sync", &params!["Position" => position]).await
    }
}
