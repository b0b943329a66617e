use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::{Camera, CameraState, GuideDirection, ImageArray, SensorType};
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Camera reached over COM or Alpaca
    CameraFacade,
    DeviceType::Camera
);

#[async_trait]
impl Camera for CameraFacade {
    async fn bayer_offset_x(&self) -> FacadeResult<i16> {
        self.base.get("BayerOffsetX").await
    }

    async fn bayer_offset_y(&self) -> FacadeResult<i16> {
        self.base.get("BayerOffsetY").await
    }

    async fn bin_x(&self) -> FacadeResult<i16> {
        self.base.get("BinX").await
    }

    async fn set_bin_x(&self, bin: i16) -> FacadeResult<()> {
        self.base.set("BinX", &bin).await
    }

    async fn bin_y(&self) -> FacadeResult<i16> {
        self.base.get("BinY").await
    }

    async fn set_bin_y(&self, bin: i16) -> FacadeResult<()> {
        self.base.set("BinY", &bin).await
    }

    async fn camera_state(&self) -> FacadeResult<CameraState> {
        self.base.get("CameraState").await
    }

    async fn camera_x_size(&self) -> FacadeResult<i32> {
        self.base.get("CameraXSize").await
    }

    async fn camera_y_size(&self) -> FacadeResult<i32> {
        self.base.get("CameraYSize").await
    }

    async fn can_abort_exposure(&self) -> FacadeResult<bool> {
        self.base.get("CanAbortExposure").await
    }

    async fn can_asymmetric_bin(&self) -> FacadeResult<bool> {
        self.base.get("CanAsymmetricBin").await
    }

    async fn can_fast_readout(&self) -> FacadeResult<bool> {
        self.base.get("CanFastReadout").await
    }

    async fn can_get_cooler_power(&self) -> FacadeResult<bool> {
        self.base.get("CanGetCoolerPower").await
    }

    async fn can_pulse_guide(&self) -> FacadeResult<bool> {
        self.base.get("CanPulseGuide").await
    }

    async fn can_set_ccd_temperature(&self) -> FacadeResult<bool> {
        self.base.get("CanSetCCDTemperature").await
    }

    async fn can_stop_exposure(&self) -> FacadeResult<bool> {
        self.base.get("CanStopExposure").await
    }

    async fn ccd_temperature(&self) -> FacadeResult<f64> {
        self.base.get("CCDTemperature").await
    }

    async fn cooler_on(&self) -> FacadeResult<bool> {
        self.base.get("CoolerOn").await
    }

    async fn set_cooler_on(&self, on: bool) -> FacadeResult<()> {
        self.base.set("CoolerOn", &on).await
    }

    async fn cooler_power(&self) -> FacadeResult<f64> {
        self.base.get("CoolerPower").await
    }

    async fn electrons_per_adu(&self) -> FacadeResult<f64> {
        self.base.get("ElectronsPerADU").await
    }

    async fn exposure_max(&self) -> FacadeResult<f64> {
        self.base.get("ExposureMax").await
    }

    async fn exposure_min(&self) -> FacadeResult<f64> {
        self.base.get("ExposureMin").await
    }

    async fn exposure_resolution(&self) -> FacadeResult<f64> {
        self.base.get("ExposureResolution").await
    }

    async fn fast_readout(&self) -> FacadeResult<bool> {
        self.base.get("FastReadout").await
    }

    async fn set_fast_readout(&self, fast: bool) -> FacadeResult<()> {
        self.base.set("FastReadout", &fast).await
    }

    async fn full_well_capacity(&self) -> FacadeResult<f64> {
        self.base.get("FullWellCapacity").await
    }

    async fn gain(&self) -> FacadeResult<i16> {
        self.base.get("Gain").await
    }

    async fn set_gain(&self, gain: i16) -> FacadeResult<()> {
        self.base.set("Gain", &gain).await
    }

    async fn gain_max(&self) -> FacadeResult<i16> {
        self.base.get("GainMax").await
    }

    async fn gain_min(&self) -> FacadeResult<i16> {
        self.base.get("GainMin").await
    }

    async fn gains(&self) -> FacadeResult<Vec<String>> {
        self.base.get("Gains").await
    }

    async fn has_shutter(&self) -> FacadeResult<bool> {
        self.base.get("HasShutter").await
    }

    async fn heat_sink_temperature(&self) -> FacadeResult<f64> {
        self.base.get("HeatSinkTemperature").await
    }

    async fn image_array(&self) -> FacadeResult<ImageArray<i32>> {
        self.base.get("ImageArray").await
    }

    async fn image_array_variant(&self) -> FacadeResult<ImageArray<f64>> {
        self.base.get("ImageArrayVariant").await
    }

    async fn image_ready(&self) -> FacadeResult<bool> {
        self.base.get("ImageReady").await
    }

    async fn is_pulse_guiding(&self) -> FacadeResult<bool> {
        self.base.get("IsPulseGuiding").await
    }

    async fn last_exposure_duration(&self) -> FacadeResult<f64> {
        self.base.get("LastExposureDuration").await
    }

    async fn last_exposure_start_time(&self) -> FacadeResult<String> {
        self.base.get("LastExposureStartTime").await
    }

    async fn max_adu(&self) -> FacadeResult<i32> {
        self.base.get("MaxADU").await
    }

    async fn max_bin_x(&self) -> FacadeResult<i16> {
        self.base.get("MaxBinX").await
    }

    async fn max_bin_y(&self) -> FacadeResult<i16> {
        self.base.get("MaxBinY").await
    }

    async fn num_x(&self) -> FacadeResult<i32> {
        self.base.get("NumX").await
    }

    async fn set_num_x(&self, num_x: i32) -> FacadeResult<()> {
        self.base.set("NumX", &num_x).await
    }

    async fn num_y(&self) -> FacadeResult<i32> {
        self.base.get("NumY").await
    }

    async fn set_num_y(&self, num_y: i32) -> FacadeResult<()> {
        self.base.set("NumY", &num_y).await
    }

    async fn offset(&self) -> FacadeResult<i32> {
        self.base.get("Offset").await
    }

    async fn set_offset(&self, offset: i32) -> FacadeResult<()> {
        self.base.set("Offset", &offset).await
    }

    async fn offset_max(&self) -> FacadeResult<i32> {
        self.base.get("OffsetMax").await
    }

    async fn offset_min(&self) -> FacadeResult<i32> {
        self.base.get("OffsetMin").await
    }

    async fn offsets(&self) -> FacadeResult<Vec<String>> {
        self.base.get("Offsets").await
    }

    async fn percent_completed(&self) -> FacadeResult<i16> {
        self.base.get("PercentCompleted").await
    }

    async fn pixel_size_x(&self) -> FacadeResult<f64> {
        self.base.get("PixelSizeX").await
    }

    async fn pixel_size_y(&self) -> FacadeResult<f64> {
        self.base.get("PixelSizeY").await
    }

    async fn readout_mode(&self) -> FacadeResult<i16> {
        self.base.get("ReadoutMode").await
    }

    async fn set_readout_mode(&self, mode: i16) -> FacadeResult<()> {
        self.base.set("ReadoutMode", &mode).await
    }

    async fn readout_modes(&self) -> FacadeResult<Vec<String>> {
        self.base.get("ReadoutModes").await
    }

    async fn sensor_name(&self) -> FacadeResult<String> {
        self.base.get("SensorName").await
    }

    async fn sensor_type(&self) -> FacadeResult<SensorType> {
        self.base.get("SensorType").await
    }

    async fn set_ccd_temperature(&self) -> FacadeResult<f64> {
        self.base.get("SetCCDTemperature").await
    }

    async fn set_set_ccd_temperature(&self, celsius: f64) -> FacadeResult<()> {
        self.base.set("SetCCDTemperature", &celsius).await
    }

    async fn start_x(&self) -> FacadeResult<i32> {
        self.base.get("StartX").await
    }

    async fn set_start_x(&self, start_x: i32) -> FacadeResult<()> {
        self.base.set("StartX", &start_x).await
    }

    async fn start_y(&self) -> FacadeResult<i32> {
        self.base.get("StartY").await
    }

    async fn set_start_y(&self, start_y: i32) -> FacadeResult<()> {
        self.base.set("StartY", &start_y).await
    }

    async fn sub_exposure_duration(&self) -> FacadeResult<f64> {
        self.base.get("SubExposureDuration").await
    }

    async fn set_sub_exposure_duration(&self, seconds: f64) -> FacadeResult<()> {
        self.base.set("SubExposureDuration", &seconds).await
    }

    async fn abort_exposure(&self) -> FacadeResult<()> {
        self.base.call("AbortExposure", &[]).await
    }

    async fn pulse_guide(&self, direction: GuideDirection, duration: i32) -> FacadeResult<()> {
        self.base
            .call("PulseGuide", &params!["Direction" => direction, "Duration" => duration])
            .await
    }

    async fn start_exposure(&self, duration: f64, light: bool) -> FacadeResult<()> {
        self.base
            .call("StartExposure", &params!["Duration" => duration, "Light" => light])
            .await
    }

    async fn stop_exposure(&self) -> FacadeResult<()> {
        self.base.call("StopExposure", &[]).await
    }
}
