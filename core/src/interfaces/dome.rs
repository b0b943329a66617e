use async_trait::async_trait;

use super::{Device, ShutterState};
use crate::error::FacadeResult;

/// IDomeV2
#[async_trait]
pub trait Dome: Device {
    async fn altitude(&self) -> FacadeResult<f64>;

    async fn at_home(&self) -> FacadeResult<bool>;

    async fn at_park(&self) -> FacadeResult<bool>;

    async fn azimuth(&self) -> FacadeResult<f64>;

    async fn can_find_home(&self) -> FacadeResult<bool>;

    async fn can_park(&self) -> FacadeResult<bool>;

    async fn can_set_altitude(&self) -> FacadeResult<bool>;

    async fn can_set_azimuth(&self) -> FacadeResult<bool>;

    async fn can_set_park(&self) -> FacadeResult<bool>;

    async fn can_set_shutter(&self) -> FacadeResult<bool>;

    async fn can_slave(&self) -> FacadeResult<bool>;

    async fn can_sync_azimuth(&self) -> FacadeResult<bool>;

    async fn shutter_status(&self) -> FacadeResult<ShutterState>;

    async fn slaved(&self) -> FacadeResult<bool>;

    async fn set_slaved(&self, slaved: bool) -> FacadeResult<()>;

    async fn slewing(&self) -> FacadeResult<bool>;

    async fn abort_slew(&self) -> FacadeResult<()>;

    async fn close_shutter(&self) -> FacadeResult<()>;

    async fn find_home(&self) -> FacadeResult<()>;

    async fn open_shutter(&self) -> FacadeResult<()>;

    async fn park(&self) -> FacadeResult<()>;

    async fn set_park(&self) -> FacadeResult<()>;

    async fn slew_to_altitude(&self, altitude: f64) -> FacadeResult<()>;

    async fn slew_to_azimuth(&self, azimuth: f64) -> FacadeResult<()>;

    async fn sync_to_azimuth(&self, azimuth: f64) -> FacadeResult<()>;
}
