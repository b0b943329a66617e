use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{AlignmentMode, Device, DriveRate, EquatorialCoordinateType, GuideDirection, PierSide, TelescopeAxis};
use crate::error::FacadeResult;
use crate::facade::{AxisRatesFacade, TrackingRatesFacade};

/// ITelescopeV3
///
/// Coordinates are in hours (right ascension, sidereal time) and degrees
/// (declination, altitude, azimuth, site position). Rates are in the units
/// ASCOM defines for each member.
#[async_trait]
pub trait Telescope: Device {
    async fn alignment_mode(&self) -> FacadeResult<AlignmentMode>;

    async fn altitude(&self) -> FacadeResult<f64>;

    async fn aperture_area(&self) -> FacadeResult<f64>;

    async fn aperture_diameter(&self) -> FacadeResult<f64>;

    async fn at_home(&self) -> FacadeResult<bool>;

    async fn at_park(&self) -> FacadeResult<bool>;

    async fn azimuth(&self) -> FacadeResult<f64>;

    async fn can_find_home(&self) -> FacadeResult<bool>;

    async fn can_park(&self) -> FacadeResult<bool>;

    async fn can_pulse_guide(&self) -> FacadeResult<bool>;

    async fn can_set_declination_rate(&self) -> FacadeResult<bool>;

    async fn can_set_guide_rates(&self) -> FacadeResult<bool>;

    async fn can_set_park(&self) -> FacadeResult<bool>;

    async fn can_set_pier_side(&self) -> FacadeResult<bool>;

    async fn can_set_right_ascension_rate(&self) -> FacadeResult<bool>;

    async fn can_set_tracking(&self) -> FacadeResult<bool>;

    async fn can_slew(&self) -> FacadeResult<bool>;

    async fn can_slew_alt_az(&self) -> FacadeResult<bool>;

    async fn can_slew_alt_az_async(&self) -> FacadeResult<bool>;

    async fn can_slew_async(&self) -> FacadeResult<bool>;

    async fn can_sync(&self) -> FacadeResult<bool>;

    async fn can_sync_alt_az(&self) -> FacadeResult<bool>;

    async fn can_unpark(&self) -> FacadeResult<bool>;

    async fn declination(&self) -> FacadeResult<f64>;

    async fn declination_rate(&self) -> FacadeResult<f64>;

    async fn set_declination_rate(&self, rate: f64) -> FacadeResult<()>;

    async fn does_refraction(&self) -> FacadeResult<bool>;

    async fn set_does_refraction(&self, does_refraction: bool) -> FacadeResult<()>;

    async fn equatorial_system(&self) -> FacadeResult<EquatorialCoordinateType>;

    async fn focal_length(&self) -> FacadeResult<f64>;

    async fn guide_rate_declination(&self) -> FacadeResult<f64>;

    async fn set_guide_rate_declination(&self, rate: f64) -> FacadeResult<()>;

    async fn guide_rate_right_ascension(&self) -> FacadeResult<f64>;

    async fn set_guide_rate_right_ascension(&self, rate: f64) -> FacadeResult<()>;

    async fn is_pulse_guiding(&self) -> FacadeResult<bool>;

    async fn right_ascension(&self) -> FacadeResult<f64>;

    async fn right_ascension_rate(&self) -> FacadeResult<f64>;

    async fn set_right_ascension_rate(&self, rate: f64) -> FacadeResult<()>;

    async fn side_of_pier(&self) -> FacadeResult<PierSide>;

    async fn set_side_of_pier(&self, side: PierSide) -> FacadeResult<()>;

    async fn sidereal_time(&self) -> FacadeResult<f64>;

    async fn site_elevation(&self) -> FacadeResult<f64>;

    async fn set_site_elevation(&self, elevation: f64) -> FacadeResult<()>;

    async fn site_latitude(&self) -> FacadeResult<f64>;

    async fn set_site_latitude(&self, latitude: f64) -> FacadeResult<()>;

    async fn site_longitude(&self) -> FacadeResult<f64>;

    async fn set_site_longitude(&self, longitude: f64) -> FacadeResult<()>;

    async fn slewing(&self) -> FacadeResult<bool>;

    /// Settle time after a slew, in seconds
    async fn slew_settle_time(&self) -> FacadeResult<i16>;

    async fn set_slew_settle_time(&self, seconds: i16) -> FacadeResult<()>;

    async fn target_declination(&self) -> FacadeResult<f64>;

    async fn set_target_declination(&self, declination: f64) -> FacadeResult<()>;

    async fn target_right_ascension(&self) -> FacadeResult<f64>;

    async fn set_target_right_ascension(&self, right_ascension: f64) -> FacadeResult<()>;

    async fn tracking(&self) -> FacadeResult<bool>;

    async fn set_tracking(&self, tracking: bool) -> FacadeResult<()>;

    async fn tracking_rate(&self) -> FacadeResult<DriveRate>;

    async fn set_tracking_rate(&self, rate: DriveRate) -> FacadeResult<()>;

    /// Drive rates the mount supports, read once per call
    async fn tracking_rates(&self) -> FacadeResult<TrackingRatesFacade>;

    async fn utc_date(&self) -> FacadeResult<DateTime<Utc>>;

    async fn set_utc_date(&self, date: DateTime<Utc>) -> FacadeResult<()>;

    async fn abort_slew(&self) -> FacadeResult<()>;

    /// Rates at which `axis` can be moved with [`Telescope::move_axis`], read once per call
    async fn axis_rates(&self, axis: TelescopeAxis) -> FacadeResult<AxisRatesFacade>;

    async fn can_move_axis(&self, axis: TelescopeAxis) -> FacadeResult<bool>;

    async fn destination_side_of_pier(&self, right_ascension: f64, declination: f64) -> FacadeResult<PierSide>;

    async fn find_home(&self) -> FacadeResult<()>;

    async fn move_axis(&self, axis: TelescopeAxis, rate: f64) -> FacadeResult<()>;

    async fn park(&self) -> FacadeResult<()>;

    /// Guide for `duration` milliseconds
    async fn pulse_guide(&self, direction: GuideDirection, duration: i32) -> FacadeResult<()>;

    async fn set_park(&self) -> FacadeResult<()>;

    async fn slew_to_alt_az(&self, azimuth: f64, altitude: f64) -> FacadeResult<()>;

    async fn slew_to_alt_az_async(&self, azimuth: f64, altitude: f64) -> FacadeResult<()>;

    async fn slew_to_coordinates(&self, right_ascension: f64, declination: f64) -> FacadeResult<()>;

    async fn slew_to_coordinates_async(&self, right_ascension: f64, declination: f64) -> FacadeResult<()>;

    async fn slew_to_target(&self) -> FacadeResult<()>;

    async fn slew_to_target_async(&self) -> FacadeResult<()>;

    async fn sync_to_alt_az(&self, azimuth: f64, altitude: f64) -> FacadeResult<()>;

    async fn sync_to_coordinates(&self, right_ascension: f64, declination: f64) -> FacadeResult<()>;

    async fn sync_to_target(&self) -> FacadeResult<()>;

    async fn unpark(&self) -> FacadeResult<()>;
}
