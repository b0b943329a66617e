//! Value types shared by the device interfaces

use serde_json::Value;

use crate::value::FromDriverValue;

ascom_enum! {
    /// Telescope mount geometry
    pub enum AlignmentMode {
        AltAz = 0,
        Polar = 1,
        GermanPolar = 2,
    }
}

ascom_enum! {
    pub enum EquatorialCoordinateType {
        Other = 0,
        Topocentric = 1,
        J2000 = 2,
        J2050 = 3,
        B1950 = 4,
    }
}

ascom_enum! {
    /// Pointing state of a German equatorial mount
    pub enum PierSide {
        Unknown = -1,
        East = 0,
        West = 1,
    }
}

ascom_enum! {
    pub enum DriveRate {
        Sidereal = 0,
        Lunar = 1,
        Solar = 2,
        King = 3,
    }
}

ascom_enum! {
    pub enum TelescopeAxis {
        Primary = 0,
        Secondary = 1,
        Tertiary = 2,
    }
}

ascom_enum! {
    pub enum GuideDirection {
        North = 0,
        South = 1,
        East = 2,
        West = 3,
    }
}

ascom_enum! {
    pub enum CameraState {
        Idle = 0,
        Waiting = 1,
        Exposing = 2,
        Reading = 3,
        Download = 4,
        Error = 5,
    }
}

ascom_enum! {
    pub enum SensorType {
        Monochrome = 0,
        Color = 1,
        RGGB = 2,
        CMYG = 3,
        CMYG2 = 4,
        LRGB = 5,
    }
}

ascom_enum! {
    pub enum ShutterState {
        Open = 0,
        Closed = 1,
        Opening = 2,
        Closing = 3,
        Error = 4,
    }
}

ascom_enum! {
    pub enum CalibratorStatus {
        NotPresent = 0,
        Off = 1,
        NotReady = 2,
        Ready = 3,
        Unknown = 4,
        Error = 5,
    }
}

ascom_enum! {
    pub enum CoverStatus {
        NotPresent = 0,
        Closed = 1,
        Moving = 2,
        Open = 3,
        Unknown = 4,
        Error = 5,
    }
}

/// One range of axis rates, in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    pub minimum: f64,
    pub maximum: f64,
}

impl FromDriverValue for Rate {
    const EXPECTED: &'static str = "rate";

    fn from_driver_value(value: &Value) -> Option<Self> {
        Some(Rate {
            minimum: value.get("Minimum")?.as_f64()?,
            maximum: value.get("Maximum")?.as_f64()?,
        })
    }
}

/// Camera image, indexed `[x][y]` or `[x][y][plane]`
#[derive(Debug, Clone, PartialEq)]
pub enum ImageArray<T = i32> {
    Mono(Vec<Vec<T>>),
    Colour(Vec<Vec<Vec<T>>>),
}

impl<T> ImageArray<T> {
    /// Width, height and number of planes
    pub fn dimensions(&self) -> (usize, usize, usize) {
        match self {
            ImageArray::Mono(columns) => (columns.len(), columns.first().map_or(0, Vec::len), 1),
            ImageArray::Colour(columns) => {
                let height = columns.first().map_or(0, Vec::len);
                let planes = columns.first().and_then(|c| c.first()).map_or(0, Vec::len);
                (columns.len(), height, planes)
            }
        }
    }

    /// Array rank as reported by ASCOM, 2 or 3
    pub fn rank(&self) -> u8 {
        match self {
            ImageArray::Mono(_) => 2,
            ImageArray::Colour(_) => 3,
        }
    }
}

impl<T: FromDriverValue> FromDriverValue for ImageArray<T> {
    const EXPECTED: &'static str = "image array";

    fn from_driver_value(value: &Value) -> Option<Self> {
        let third_level_is_array = value
            .get(0)
            .and_then(|column| column.get(0))
            .map_or(false, Value::is_array);

        if third_level_is_array {
            Vec::from_driver_value(value).map(ImageArray::Colour)
        } else {
            Vec::from_driver_value(value).map(ImageArray::Mono)
        }
    }
}
