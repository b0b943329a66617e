use async_trait::async_trait;

use super::{CameraState, Device, GuideDirection, ImageArray, SensorType};
use crate::error::FacadeResult;

/// ICameraV3
#[async_trait]
pub trait Camera: Device {
    async fn bayer_offset_x(&self) -> FacadeResult<i16>;

    async fn bayer_offset_y(&self) -> FacadeResult<i16>;

    async fn bin_x(&self) -> FacadeResult<i16>;

    async fn set_bin_x(&self, bin: i16) -> FacadeResult<()>;

    async fn bin_y(&self) -> FacadeResult<i16>;

    async fn set_bin_y(&self, bin: i16) -> FacadeResult<()>;

    async fn camera_state(&self) -> FacadeResult<CameraState>;

    async fn camera_x_size(&self) -> FacadeResult<i32>;

    async fn camera_y_size(&self) -> FacadeResult<i32>;

    async fn can_abort_exposure(&self) -> FacadeResult<bool>;

    async fn can_asymmetric_bin(&self) -> FacadeResult<bool>;

    async fn can_fast_readout(&self) -> FacadeResult<bool>;

    async fn can_get_cooler_power(&self) -> FacadeResult<bool>;

    async fn can_pulse_guide(&self) -> FacadeResult<bool>;

    async fn can_set_ccd_temperature(&self) -> FacadeResult<bool>;

    async fn can_stop_exposure(&self) -> FacadeResult<bool>;

    async fn ccd_temperature(&self) -> FacadeResult<f64>;

    async fn cooler_on(&self) -> FacadeResult<bool>;

    async fn set_cooler_on(&self, on: bool) -> FacadeResult<()>;

    async fn cooler_power(&self) -> FacadeResult<f64>;

    async fn electrons_per_adu(&self) -> FacadeResult<f64>;

    async fn exposure_max(&self) -> FacadeResult<f64>;

    async fn exposure_min(&self) -> FacadeResult<f64>;

    async fn exposure_resolution(&self) -> FacadeResult<f64>;

    async fn fast_readout(&self) -> FacadeResult<bool>;

    async fn set_fast_readout(&self, fast: bool) -> FacadeResult<()>;

    async fn full_well_capacity(&self) -> FacadeResult<f64>;

    async fn gain(&self) -> FacadeResult<i16>;

    async fn set_gain(&self, gain: i16) -> FacadeResult<()>;

    async fn gain_max(&self) -> FacadeResult<i16>;

    async fn gain_min(&self) -> FacadeResult<i16>;

    async fn gains(&self) -> FacadeResult<Vec<String>>;

    async fn has_shutter(&self) -> FacadeResult<bool>;

    async fn heat_sink_temperature(&self) -> FacadeResult<f64>;

    async fn image_array(&self) -> FacadeResult<ImageArray<i32>>;

    async fn image_array_variant(&self) -> FacadeResult<ImageArray<f64>>;

    async fn image_ready(&self) -> FacadeResult<bool>;

    async fn is_pulse_guiding(&self) -> FacadeResult<bool>;

    async fn last_exposure_duration(&self) -> FacadeResult<f64>;

    /// FITS-style `CCYY-MM-DDThh:mm:ss[.sss...]` start time
    async fn last_exposure_start_time(&self) -> FacadeResult<String>;

    async fn max_adu(&self) -> FacadeResult<i32>;

    async fn max_bin_x(&self) -> FacadeResult<i16>;

    async fn max_bin_y(&self) -> FacadeResult<i16>;

    async fn num_x(&self) -> FacadeResult<i32>;

    async fn set_num_x(&self, num_x: i32) -> FacadeResult<()>;

    async fn num_y(&self) -> FacadeResult<i32>;

    async fn set_num_y(&self, num_y: i32) -> FacadeResult<()>;

    async fn offset(&self) -> FacadeResult<i32>;

    async fn set_offset(&self, offset: i32) -> FacadeResult<()>;

    async fn offset_max(&self) -> FacadeResult<i32>;

    async fn offset_min(&self) -> FacadeResult<i32>;

    async fn offsets(&self) -> FacadeResult<Vec<String>>;

    async fn percent_completed(&self) -> FacadeResult<i16>;

    async fn pixel_size_x(&self) -> FacadeResult<f64>;

    async fn pixel_size_y(&self) -> FacadeResult<f64>;

    async fn readout_mode(&self) -> FacadeResult<i16>;

    async fn set_readout_mode(&self, mode: i16) -> FacadeResult<()>;

    async fn readout_modes(&self) -> FacadeResult<Vec<String>>;

    async fn sensor_name(&self) -> FacadeResult<String>;

    async fn sensor_type(&self) -> FacadeResult<SensorType>;

    /// Cooler set point, degrees Celsius
    async fn set_ccd_temperature(&self) -> FacadeResult<f64>;

    async fn set_set_ccd_temperature(&self, celsius: f64) -> FacadeResult<()>;

    async fn start_x(&self) -> FacadeResult<i32>;

    async fn set_start_x(&self, start_x: i32) -> FacadeResult<()>;

    async fn start_y(&self) -> FacadeResult<i32>;

    async fn set_start_y(&self, start_y: i32) -> FacadeResult<()>;

    async fn sub_exposure_duration(&self) -> FacadeResult<f64>;

    async fn set_sub_exposure_duration(&self, seconds: f64) -> FacadeResult<()>;

    async fn abort_exposure(&self) -> FacadeResult<()>;

    async fn pulse_guide(&self, direction: GuideDirection, duration: i32) -> FacadeResult<()>;

    async fn start_exposure(&self, duration: f64, light: bool) -> FacadeResult<()>;

    async fn stop_exposure(&self) -> FacadeResult<()>;
}
