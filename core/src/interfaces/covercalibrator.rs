use async_trait::async_trait;

use super::{CalibratorStatus, CoverStatus, Device};
use crate::error::FacadeResult;

/// ICoverCalibratorV1
#[async_trait]
pub trait CoverCalibrator: Device {
    async fn brightness(&self) -> FacadeResult<i32>;

    async fn calibrator_state(&self) -> FacadeResult<CalibratorStatus>;

    async fn cover_state(&self) -> FacadeResult<CoverStatus>;

    async fn max_brightness(&self) -> FacadeResult<i32>;

    async fn calibrator_off(&self) -> FacadeResult<()>;

    async fn calibrator_on(&self, brightness: i32) -> FacadeResult<()>;

    async fn close_cover(&self) -> FacadeResult<()>;

    async fn halt_cover(&self) -> FacadeResult<()>;

    async fn open_cover(&self) -> FacadeResult<()>;
}
