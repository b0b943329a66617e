use async_trait::async_trait;

use super::Device;
use crate::error::FacadeResult;

/// IFocuserV3
#[async_trait]
pub trait Focuser: Device {
    async fn absolute(&self) -> FacadeResult<bool>;

    async fn is_moving(&self) -> FacadeResult<bool>;

    /// Deprecated IFocuserV1 alias of `Connected`, still forwarded for older drivers
    async fn link(&self) -> FacadeResult<bool>;

    async fn set_link(&self, link: bool) -> FacadeResult<()>;

    async fn max_increment(&self) -> FacadeResult<i32>;

    async fn max_step(&self) -> FacadeResult<i32>;

    async fn position(&self) -> FacadeResult<i32>;

    /// Step size in microns
    async fn step_size(&self) -> FacadeResult<f64>;

    async fn temp_comp(&self) -> FacadeResult<bool>;

    async fn set_temp_comp(&self, temp_comp: bool) -> FacadeResult<()>;

    async fn temp_comp_available(&self) -> FacadeResult<bool>;

    async fn temperature(&self) -> FacadeResult<f64>;

    async fn halt(&self) -> FacadeResult<()>;

    /// Move to an absolute position, or by a relative amount on relative focusers
    async fn move_to(&self, position: i32) -> FacadeResult<()>;
}
