use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::FacadeResult;
use crate::interfaces::{
    AlignmentMode, DriveRate, EquatorialCoordinateType, GuideDirection, PierSide, Rate, Telescope, TelescopeAxis,
};
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Telescope reached over COM or Alpaca
    TelescopeFacade,
    DeviceType::Telescope
);

/// Rates for one axis, as reported by the driver when
/// [`Telescope::axis_rates`] was called
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRatesFacade {
    axis: TelescopeAxis,
    rates: Vec<Rate>,
}

impl AxisRatesFacade {
    pub fn axis(&self) -> TelescopeAxis {
        self.axis
    }

    pub fn count(&self) -> usize {
        self.rates.len()
    }

    /// Rate at a 1-based position
    pub fn item(&self, index: usize) -> Option<&Rate> {
        index.checked_sub(1).and_then(|i| self.rates.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rate> {
        self.rates.iter()
    }
}

impl<'a> IntoIterator for &'a AxisRatesFacade {
    type Item = &'a Rate;
    type IntoIter = std::slice::Iter<'a, Rate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.iter()
    }
}

/// Drive rates supported by the mount, as reported by the driver when
/// [`Telescope::tracking_rates`] was called
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRatesFacade {
    rates: Vec<DriveRate>,
}

impl TrackingRatesFacade {
    pub fn count(&self) -> usize {
        self.rates.len()
    }

    /// Drive rate at a 1-based position
    pub fn item(&self, index: usize) -> Option<DriveRate> {
        index.checked_sub(1).and_then(|i| self.rates.get(i)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DriveRate> + '_ {
        self.rates.iter().copied()
    }
}

impl<'a> IntoIterator for &'a TrackingRatesFacade {
    type Item = DriveRate;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DriveRate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.iter().copied()
    }
}

#[async_trait]
impl Telescope for TelescopeFacade {
    async fn alignment_mode(&self) -> FacadeResult<AlignmentMode> {
        self.base.get("AlignmentMode").await
    }

    async fn altitude(&self) -> FacadeResult<f64> {
        self.base.get("Altitude").await
    }

    async fn aperture_area(&self) -> FacadeResult<f64> {
        self.base.get("ApertureArea").await
    }

    async fn aperture_diameter(&self) -> FacadeResult<f64> {
        self.base.get("ApertureDiameter").await
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

    async fn can_pulse_guide(&self) -> FacadeResult<bool> {
        self.base.get("CanPulseGuide").await
    }

    async fn can_set_declination_rate(&self) -> FacadeResult<bool> {
        self.base.get("CanSetDeclinationRate").await
    }

    async fn can_set_guide_rates(&self) -> FacadeResult<bool> {
        self.base.get("CanSetGuideRates").await
    }

    async fn can_set_park(&self) -> FacadeResult<bool> {
        self.base.get("CanSetPark").await
    }

    async fn can_set_pier_side(&self) -> FacadeResult<bool> {
        self.base.get("CanSetPierSide").await
    }

    async fn can_set_right_ascension_rate(&self) -> FacadeResult<bool> {
        self.base.get("CanSetRightAscensionRate").await
    }

    async fn can_set_tracking(&self) -> FacadeResult<bool> {
        self.base.get("CanSetTracking").await
    }

    async fn can_slew(&self) -> FacadeResult<bool> {
        self.base.get("CanSlew").await
    }

    async fn can_slew_alt_az(&self) -> FacadeResult<bool> {
        self.base.get("CanSlewAltAz").await
    }

    async fn can_slew_alt_az_async(&self) -> FacadeResult<bool> {
        self.base.get("CanSlewAltAzAsync").await
    }

    async fn can_slew_async(&self) -> FacadeResult<bool> {
        self.base.get("CanSlewAsync").await
    }

    async fn can_sync(&self) -> FacadeResult<bool> {
        self.base.get("CanSync").await
    }

    async fn can_sync_alt_az(&self) -> FacadeResult<bool> {
        self.base.get("CanSyncAltAz").await
    }

    async fn can_unpark(&self) -> FacadeResult<bool> {
        self.base.get("CanUnpark").await
    }

    async fn declination(&self) -> FacadeResult<f64> {
        self.base.get("Declination").await
    }

    async fn declination_rate(&self) -> FacadeResult<f64> {
        self.base.get("DeclinationRate").await
    }

    async fn set_declination_rate(&self, rate: f64) -> FacadeResult<()> {
        self.base.set("DeclinationRate", &rate).await
    }

    async fn does_refraction(&self) -> FacadeResult<bool> {
        self.base.get("DoesRefraction").await
    }

    async fn set_does_refraction(&self, does_refraction: bool) -> FacadeResult<()> {
        self.base.set("DoesRefraction", &does_refraction).await
    }

    async fn equatorial_system(&self) -> FacadeResult<EquatorialCoordinateType> {
        self.base.get("EquatorialSystem").await
    }

    async fn focal_length(&self) -> FacadeResult<f64> {
        self.base.get("FocalLength").await
    }

    async fn guide_rate_declination(&self) -> FacadeResult<f64> {
        self.base.get("GuideRateDeclination").await
    }

    async fn set_guide_rate_declination(&self, rate: f64) -> FacadeResult<()> {
        self.base.set("GuideRateDeclination", &rate).await
    }

    async fn guide_rate_right_ascension(&self) -> FacadeResult<f64> {
        self.base.get("GuideRateRightAscension").await
    }

    async fn set_guide_rate_right_ascension(&self, rate: f64) -> FacadeResult<()> {
        self.base.set("GuideRateRightAscension", &rate).await
    }

    async fn is_pulse_guiding(&self) -> FacadeResult<bool> {
        self.base.get("IsPulseGuiding").await
    }

    async fn right_ascension(&self) -> FacadeResult<f64> {
        self.base.get("RightAscension").await
    }

    async fn right_ascension_rate(&self) -> FacadeResult<f64> {
        self.base.get("RightAscensionRate").await
    }

    async fn set_right_ascension_rate(&self, rate: f64) -> FacadeResult<()> {
        self.base.set("RightAscensionRate", &rate).await
    }

    async fn side_of_pier(&self) -> FacadeResult<PierSide> {
        self.base.get("SideOfPier").await
    }

    async fn set_side_of_pier(&self, side: PierSide) -> FacadeResult<()> {
        self.base.set("SideOfPier", &side).await
    }

    async fn sidereal_time(&self) -> FacadeResult<f64> {
        self.base.get("SiderealTime").await
    }

    async fn site_elevation(&self) -> FacadeResult<f64> {
        self.base.get("SiteElevation").await
    }

    async fn set_site_elevation(&self, elevation: f64) -> FacadeResult<()> {
        self.base.set("SiteElevation", &elevation).await
    }

    async fn site_latitude(&self) -> FacadeResult<f64> {
        self.base.get("SiteLatitude").await
    }

    async fn set_site_latitude(&self, latitude: f64) -> FacadeResult<()> {
        self.base.set("SiteLatitude", &latitude).await
    }

    async fn site_longitude(&self) -> FacadeResult<f64> {
        self.base.get("SiteLongitude").await
    }

    async fn set_site_longitude(&self, longitude: f64) -> FacadeResult<()> {
        self.base.set("SiteLongitude", &longitude).await
    }

    async fn slewing(&self) -> FacadeResult<bool> {
        self.base.get("Slewing").await
    }

    async fn slew_settle_time(&self) -> FacadeResult<i16> {
        self.base.get("SlewSettleTime").await
    }

    async fn set_slew_settle_time(&self, seconds: i16) -> FacadeResult<()> {
        self.base.set("SlewSettleTime", &seconds).await
    }

    async fn target_declination(&self) -> FacadeResult<f64> {
        self.base.get("TargetDeclination").await
    }

    async fn set_target_declination(&self, declination: f64) -> FacadeResult<()> {
        self.base.set("TargetDeclination", &declination).await
    }

    async fn target_right_ascension(&self) -> FacadeResult<f64> {
        self.base.get("TargetRightAscension").await
    }

    async fn set_target_right_ascension(&self, right_ascension: f64) -> FacadeResult<()> {
        self.base.set("TargetRightAscension", &right_ascension).await
    }

    async fn tracking(&self) -> FacadeResult<bool> {
        self.base.get("Tracking").await
    }

    async fn set_tracking(&self, tracking: bool) -> FacadeResult<()> {
        self.base.set("Tracking", &tracking).await
    }

    async fn tracking_rate(&self) -> FacadeResult<DriveRate> {
        self.base.get("TrackingRate").await
    }

    async fn set_tracking_rate(&self, rate: DriveRate) -> FacadeResult<()> {
        self.base.set("TrackingRate", &rate).await
    }

    async fn tracking_rates(&self) -> FacadeResult<TrackingRatesFacade> {
        let rates = self.base.get("TrackingRates").await?;
        Ok(TrackingRatesFacade { rates })
    }

    async fn utc_date(&self) -> FacadeResult<DateTime<Utc>> {
        self.base.get("UTCDate").await
    }

    async fn set_utc_date(&self, date: DateTime<Utc>) -> FacadeResult<()> {
        self.base.set("UTCDate", &date).await
    }

    async fn abort_slew(&self) -> FacadeResult<()> {
        self.base.call("AbortSlew", &[]).await
    }

    async fn axis_rates(&self, axis: TelescopeAxis) -> FacadeResult<AxisRatesFacade> {
        let rates = self.base.get_with("AxisRates", &params!["Axis" => axis]).await?;
        Ok(AxisRatesFacade { axis, rates })
    }

    async fn can_move_axis(&self, axis: TelescopeAxis) -> FacadeResult<bool> {
        self.base.get_with("CanMoveAxis", &params!["Axis" => axis]).await
    }

    async fn destination_side_of_pier(&self, right_ascension: f64, declination: f64) -> FacadeResult<PierSide> {
        self.base
            .get_with(
                "DestinationSideOfPier",
                &params!["RightAscension" => right_ascension, "Declination" => declination],
            )
            .await
    }

    async fn find_home(&self) -> FacadeResult<()> {
        self.base.call("FindHome", &[]).await
    }

    async fn move_axis(&self, axis: TelescopeAxis, rate: f64) -> FacadeResult<()> {
        self.base
            .call("MoveAxis", &params!["Axis" => axis, "Rate" => rate])
            .await
    }

    async fn park(&self) -> FacadeResult<()> {
        self.base.call("Park", &[]).await
    }

    async fn pulse_guide(&self, direction: GuideDirection, duration: i32) -> FacadeResult<()> {
        self.base
            .call("PulseGuide", &params!["Direction" => direction, "Duration" => duration])
            .await
    }

    async fn set_park(&self) -> FacadeResult<()> {
        self.base.call("SetPark", &[]).await
    }

    async fn slew_to_alt_az(&self, azimuth: f64, altitude: f64) -> FacadeResult<()> {
        self.base
            .call("SlewToAltAz", &params!["Azimuth" => azimuth, "Altitude" => altitude])
            .await
    }

    async fn slew_to_alt_az_async(&self, azimuth: f64, altitude: f64) -> FacadeResult<()> {
        self.base
            .call("SlewToAltAzAsync", &params!["Azimuth" => azimuth, "Altitude" => altitude])
            .await
    }

    async fn slew_to_coordinates(&self, right_ascension: f64, declination: f64) -> FacadeResult<()> {
        self.base
            .call(
                "SlewToCoordinates",
                &params!["RightAscension" => right_ascension, "Declination" => declination],
            )
            .await
    }

    async fn slew_to_coordinates_async(&self, right_ascension: f64, declination: f64) -> FacadeResult<()> {
        self.base
            .call(
                "SlewToCoordinatesAsync",
                &params!["RightAscension" => right_ascension, "Declination" => declination],
            )
            .await
    }

    async fn slew_to_target(&self) -> FacadeResult<()> {
        self.base.call("SlewToTarget", &[]).await
    }

    async fn slew_to_target_async(&self) -> FacadeResult<()> {
        self.base.call("SlewToTargetAsync", &[]).await
    }

    async fn sync_to_alt_az(&self, azimuth: f64, altitude: f64) -> FacadeResult<()> {
        self.base
            .call("SyncToAltAz", &params!["Azimuth" => azimuth, "Altitude" => altitude])
            .await
    }

    async fn sync_to_coordinates(&self, right_ascension: f64, declination: f64) -> FacadeResult<()> {
        self.base
            .call(
                "SyncToCoordinates",
                &params!["RightAscension" => right_ascension, "Declination" => declination],
            )
            .await
    }

    async fn sync_to_target(&self) -> FacadeResult<()> {
        self.base.call("SyncToTarget", &[]).await
    }

    async fn unpark(&self) -> FacadeResult<()> {
        self.base.call("UnPark", &[]).await
    }
}
