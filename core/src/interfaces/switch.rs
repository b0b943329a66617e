use async_trait::async_trait;

use super::Device;
use crate::error::FacadeResult;

/// ISwitchV2. Switches are numbered from 0 to `max_switch() - 1`.
#[async_trait]
pub trait Switch: Device {
    async fn max_switch(&self) -> FacadeResult<i16>;

    async fn can_write(&self, id: i16) -> FacadeResult<bool>;

    async fn get_switch(&self, id: i16) -> FacadeResult<bool>;

    async fn get_switch_description(&self, id: i16) -> FacadeResult<String>;

    async fn get_switch_name(&self, id: i16) -> FacadeResult<String>;

    async fn get_switch_value(&self, id: i16) -> FacadeResult<f64>;

    async fn max_switch_value(&self, id: i16) -> FacadeResult<f64>;

    async fn min_switch_value(&self, id: i16) -> FacadeResult<f64>;

    async fn set_switch(&self, id: i16, state: bool) -> FacadeResult<()>;

    async fn set_switch_name(&self, id: i16, name: &str) -> FacadeResult<()>;

    async fn set_switch_value(&self, id: i16, value: f64) -> FacadeResult<()>;

    async fn switch_step(&self, id: i16) -> FacadeResult<f64>;
}
