use async_trait::async_trait;

use super::Device;
use crate::error::FacadeResult;

/// IObservingConditions
#[async_trait]
pub trait ObservingConditions: Device {
    /// Averaging period in hours
    async fn average_period(&self) -> FacadeResult<f64>;

    async fn set_average_period(&self, hours: f64) -> FacadeResult<()>;

    async fn cloud_cover(&self) -> FacadeResult<f64>;

    async fn dew_point(&self) -> FacadeResult<f64>;

    async fn humidity(&self) -> FacadeResult<f64>;

    async fn pressure(&self) -> FacadeResult<f64>;

    async fn rain_rate(&self) -> FacadeResult<f64>;

    async fn sky_brightness(&self) -> FacadeResult<f64>;

    async fn sky_quality(&self) -> FacadeResult<f64>;

    async fn sky_temperature(&self) -> FacadeResult<f64>;

    async fn star_fwhm(&self) -> FacadeResult<f64>;

    async fn temperature(&self) -> FacadeResult<f64>;

    async fn wind_direction(&self) -> FacadeResult<f64>;

    async fn wind_gust(&self) -> FacadeResult<f64>;

    async fn wind_speed(&self) -> FacadeResult<f64>;

    async fn refresh(&self) -> FacadeResult<()>;

    async fn sensor_description(&self, property_name: &str) -> FacadeResult<String>;

    /// Seconds since the named sensor was last updated
    async fn time_since_last_update(&self, property_name: &str) -> FacadeResult<f64>;
}
