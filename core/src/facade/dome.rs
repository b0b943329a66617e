use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::{Dome, ShutterState};
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Dome reached over COM or Alpaca
    DomeFacade,
    DeviceType::Dome
);

#[async_trait]
impl Dome for DomeFacade {
    async fn altitude(&self) -> FacadeResult<f64> {
        self.base.get("Altitude").await
    }

    async fn at_home(&self) -> FacadeResult<bool> {
        self.base.get("AtHome").await
    }

    async fn at_park(&self) -> FacadeResult<bool> {
        self.base.get("AtPark").await
    }

    async fn azimuth(&self) -> FacadeResult<f64> {
        self.base.get("Azimuth").await
    }

    async fn can_find_home(&self) -> FacadeResult<bool> {
        self.base.get("CanFindHome").await
    }

    async fn can_park(&self) -> FacadeResult<bool> {
        self.base.get("CanPark").await
    }

    async fn can_set_altitude(&self) -> FacadeResult<bool> {
        self.base.get("CanSetAltitude").await
    }

    async fn can_set_azimuth(&self) -> FacadeResult<bool> {
        self.base.get("CanSetAzimuth").await
    }

    async fn can_set_park(&self) -> FacadeResult<bool> {
        self.base.get("CanSetPark").await
    }

    async fn can_set_shutter(&self) -> FacadeResult<bool> {
        self.base.get("CanSetShutter").await
    }

    async fn can_slave(&self) -> FacadeResult<bool> {
        self.base.get("CanSlave").await
    }

    async fn can_sync_azimuth(&self) -> FacadeResult<bool> {
        self.base.get("CanSyncAzimuth").await
    }

    async fn shutter_status(&self) -> FacadeResult<ShutterState> {
        self.base.get("ShutterStatus").await
    }

    async fn slaved(&self) -> FacadeResult<bool> {
        self.base.get("Slaved").await
    }

    async fn set_slaved(&self, slaved: bool) -> FacadeResult<()> {
        self.base.set("Slaved", &slaved).await
    }

    async fn slewing(&self) -> FacadeResult<bool> {
        self.base.get("Slewing").await
    }

    async fn abort_slew(&self) -> FacadeResult<()> {
        self.base.call("AbortSlew", &[]).await
    }

    async fn close_shutter(&self) -> FacadeResult<()> {
        self.base.call("CloseShutter", &[]).await
    }

    async fn find_home(&self) -> FacadeResult<()> {
        self.base.call("FindHome", &[]).await
    }

    async fn open_shutter(&self) -> FacadeResult<()> {
        self.base.call("OpenShutter", &[]).await
    }

    async fn park(&self) -> FacadeResult<()> {
        self.base.call("Park", &[]).await
    }

    async fn set_park(&self) -> FacadeResult<()> {
        self.base.call("SetPark", &[]).await
    }

    async fn slew_to_altitude(&self, altitude: f64) -> FacadeResult<()> {
        self.base.call("SlewToAltitude", &params!["Altitude" => altitude]).await
    }

    async fn slew_to_azimuth(&self, azimuth: f64) -> FacadeResult<()> {
        self.base.call("SlewToAzimuth", &params!["Azimuth" => azimuth]).await
    }

    async fn sync_to_azimuth(&self, azimuth: f64) -> FacadeResult<()> {
        self.base.call("SyncToAzimuth", &params!["Azimuth" => azimuth]).await
    }
}
