use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::{CalibratorStatus, CoverCalibrator, CoverStatus};
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Cover calibrator reached over COM or Alpaca
    CoverCalibratorFacade,
    DeviceType::CoverCalibrator
);

#[async_trait]
impl CoverCalibrator for CoverCalibratorFacade {
    async fn brightness(&self) -> FacadeResult<i32> {
        self.base.get("Brightness").await
    }

    async fn calibrator_state(&self) -> FacadeResult<CalibratorStatus> {
        self.base.get("CalibratorState").await
    }

    async fn cover_state(&self) -> FacadeResult<CoverStatus> {
        self.base.get("CoverState").await
    }

    async fn max_brightness(&self) -> FacadeResult<i32> {
        self.base.get("MaxBrightness").await
    }

    async fn calibrator_off(&self) -> FacadeResult<()> {
        self.base.call("CalibratorOff", &[]).await
    }

    async fn calibrator_on(&self, brightness: i32) -> FacadeResult<()> {
        self.base.call("CalibratorOn", &params!["Brightness" => brightness]).await
    }

    async fn close_cover(&self) -> FacadeResult<()> {
        self.base.call("CloseCover", &[]).await
    }

    async fn halt_cover(&self) -> FacadeResult<()> {
        self.base.call("HaltCover", &[]).await
    }

    async fn open_cover(&self) -> FacadeResult<()> {
        self.base.call("OpenCover", &[]).await
    }
}
