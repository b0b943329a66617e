use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::ObservingConditions;
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Observing conditions device reached over COM or Alpaca
    ObservingConditionsFacade,
    DeviceType::ObservingConditions
);

#[async_trait]
impl ObservingConditions for ObservingConditionsFacade {
    async fn average_period(&self) -> FacadeResult<f64> {
        self.base.get("AveragePeriod").await
    }

    async fn set_average_period(&self, hours: f64) -> FacadeResult<()> {
        self.base.set("AveragePeriod", &hours).await
    }

    async fn cloud_cover(&self) -> FacadeResult<f64> {
        self.base.get("CloudCover").await
    }

    async fn dew_point(&self) -> FacadeResult<f64> {
        self.base.get("DewPoint").await
    }

    async fn humidity(&self) -> FacadeResult<f64> {
        self.base.get("Humidity").await
    }

    async fn pressure(&self) -> FacadeResult<f64> {
        self.base.get("Pressure").await
    }

    async fn rain_rate(&self) -> FacadeResult<f64> {
        self.base.get("RainRate").await
    }

    async fn sky_brightness(&self) -> FacadeResult<f64> {
        self.base.get("SkyBrightness").await
    }

    async fn sky_quality(&self) -> FacadeResult<f64> {
        self.base.get("SkyQuality").await
    }

    async fn sky_temperature(&self) -> FacadeResult<f64> {
        self.base.get("SkyTemperature").await
    }

    async fn star_fwhm(&self) -> FacadeResult<f64> {
        self.base.get("StarFWHM").await
    }

    async fn temperature(&self) -> FacadeResult<f64> {
        self.base.get("Temperature").await
    }

    async fn wind_direction(&self) -> FacadeResult<f64> {
        self.base.get("WindDirection").await
    }

    async fn wind_gust(&self) -> FacadeResult<f64> {
        self.base.get("WindGust").await
    }

    async fn wind_speed(&self) -> FacadeResult<f64> {
        self.base.get("WindSpeed").await
    }

    async fn refresh(&self) -> FacadeResult<()> {
        self.base.call("Refresh", &[]).await
    }

    async fn sensor_description(&self, property_name: &str) -> FacadeResult<String> {
        self.base
            .get_with("SensorDescription", &params!["SensorName" => property_name])
            .await
    }

    async fn time_since_last_update(&self, property_name: &str) -> FacadeResult<f64> {
        self.base
            .get_with("TimeSinceLastUpdate", &params!["SensorName" => property_name])
            .await
    }
}
