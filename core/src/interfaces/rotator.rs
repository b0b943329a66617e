use async_trait::async_trait;

use super::Device;
use crate::error::FacadeResult;

/// IRotatorV3
#[async_trait]
pub trait Rotator: Device {
    async fn can_reverse(&self) -> FacadeResult<bool>;

    async fn is_moving(&self) -> FacadeResult<bool>;

    async fn mechanical_position(&self) -> FacadeResult<f64>;

    async fn position(&self) -> FacadeResult<f64>;

    async fn reverse(&self) -> FacadeResult<bool>;

    async fn set_reverse(&self, reverse: bool) -> FacadeResult<()>;

    async fn step_size(&self) -> FacadeResult<f64>;

    async fn target_position(&self) -> FacadeResult<f64>;

    async fn halt(&self) -> FacadeResult<()>;

    /// Move by a relative angle
    async fn move_by(&self, position: f64) -> FacadeResult<()>;

    async fn move_absolute(&self, position: f64) -> FacadeResult<()>;

    async fn move_mechanical(&self, position: f64) -> FacadeResult<()>;

    async fn sync(&self, position: f64) -> FacadeResult<()>;
}
