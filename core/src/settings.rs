//! Persisted Conform settings
//!
//! A flat record describing the device under test and the test options. The
//! JSON field names are PascalCase so existing `conform.settings` files load
//! unchanged; missing or `null` fields take their defaults and unknown fields
//! are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use conform_alpaca::{AlpacaDevice, AlpacaDeviceType as DeviceType};

use conform_alpaca::null_as_default;

/// Device name meaning "nothing chosen yet"
pub const NO_DEVICE_SELECTED: &str = "No device selected";

pub const TECHNOLOGY_ALPACA: &str = "Alpaca";
pub const TECHNOLOGY_COM: &str = "COM";

/// How the device under test is reached.
///
/// Stored as a plain string. Anything other than `Alpaca` or `COM` is kept
/// verbatim so that validation, not parsing, reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceTechnology {
    #[default]
    Alpaca,
    Com,
    Unrecognised(String),
}

impl DeviceTechnology {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceTechnology::Alpaca => TECHNOLOGY_ALPACA,
            DeviceTechnology::Com => TECHNOLOGY_COM,
            DeviceTechnology::Unrecognised(s) => s,
        }
    }
}

impl From<String> for DeviceTechnology {
    fn from(s: String) -> Self {
        match s.as_str() {
            TECHNOLOGY_ALPACA => DeviceTechnology::Alpaca,
            TECHNOLOGY_COM => DeviceTechnology::Com,
            _ => DeviceTechnology::Unrecognised(s),
        }
    }
}

impl From<DeviceTechnology> for String {
    fn from(t: DeviceTechnology) -> Self {
        match t {
            DeviceTechnology::Unrecognised(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DeviceTechnology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `CurrentDeviceType` as stored.
///
/// Categories with no facade (`Video`, or anything else a front end wrote)
/// are kept verbatim so the file round-trips and validation reports them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum CurrentDeviceType {
    Supported(DeviceType),
    Unsupported(String),
}

impl CurrentDeviceType {
    /// The category, when a facade exists for it
    pub fn supported(&self) -> Option<DeviceType> {
        match self {
            CurrentDeviceType::Supported(t) => Some(*t),
            CurrentDeviceType::Unsupported(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CurrentDeviceType::Supported(t) => t.type_name(),
            CurrentDeviceType::Unsupported(s) => s,
        }
    }
}

impl Default for CurrentDeviceType {
    fn default() -> Self {
        CurrentDeviceType::Supported(DeviceType::Telescope)
    }
}

impl From<DeviceType> for CurrentDeviceType {
    fn from(t: DeviceType) -> Self {
        CurrentDeviceType::Supported(t)
    }
}

impl From<Option<String>> for CurrentDeviceType {
    fn from(raw: Option<String>) -> Self {
        match raw {
            None => CurrentDeviceType::default(),
            Some(s) if s.is_empty() => CurrentDeviceType::default(),
            Some(s) => match DeviceType::from_str(&s) {
                Some(t) => CurrentDeviceType::Supported(t),
                None => CurrentDeviceType::Unsupported(s),
            },
        }
    }
}

impl From<CurrentDeviceType> for String {
    fn from(t: CurrentDeviceType) -> Self {
        match t {
            CurrentDeviceType::Unsupported(s) => s,
            supported => supported.as_str().to_string(),
        }
    }
}

impl PartialEq<DeviceType> for CurrentDeviceType {
    fn eq(&self, other: &DeviceType) -> bool {
        self.supported() == Some(*other)
    }
}

impl std::fmt::Display for CurrentDeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a COM component driver
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ComDevice {
    #[serde(deserialize_with = "null_as_default")]
    pub prog_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// First inconsistency found by [`Settings::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No device has been selected.")]
    NoDeviceSelected,

    #[error("Device type is not supported: '{0}'")]
    UnsupportedDeviceType(String),

    #[error("Technology type is not Alpaca or COM: '{0}'")]
    UnrecognisedTechnology(String),

    #[error("CurrentComDevice.ProgId is empty.")]
    EmptyProgId,

    #[error("CurrentAlpacaDevice has no network address.")]
    NoAlpacaAddress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    #[serde(deserialize_with = "null_as_default")]
    pub current_alpaca_device: AlpacaDevice,
    #[serde(deserialize_with = "null_as_default")]
    pub current_com_device: ComDevice,
    #[serde(deserialize_with = "null_as_default")]
    pub current_device_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_device_technology: DeviceTechnology,
    pub current_device_type: CurrentDeviceType,
    pub debug: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub device_camera: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_cover_calibrator: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_dome: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_filter_wheel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_focuser: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_observing_conditions: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_rotator: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_safety_monitor: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_switch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_telescope: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_video: String,
    pub display_method_calls: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub log_file_folder: String,
    pub test_properties: bool,
    pub test_methods: bool,
    pub test_performance: bool,
    pub test_side_of_pier_read: bool,
    pub test_side_of_pier_write: bool,
    pub update_check: bool,
    #[serde(with = "update_date")]
    pub update_date: Option<DateTime<Utc>>,
    pub warning_message_displayed: bool,
    /// Flat `CurrentDeviceProgId` written by older releases, folded into
    /// `current_com_device` on load
    #[serde(rename = "CurrentDeviceProgId", skip_serializing, deserialize_with = "null_as_default")]
    legacy_prog_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_alpaca_device: AlpacaDevice::default(),
            current_com_device: ComDevice::default(),
            current_device_name: NO_DEVICE_SELECTED.to_string(),
            current_device_technology: DeviceTechnology::Alpaca,
            current_device_type: CurrentDeviceType::default(),
            debug: false,
            device_camera: String::new(),
            device_cover_calibrator: String::new(),
            device_dome: String::new(),
            device_filter_wheel: String::new(),
            device_focuser: String::new(),
            device_observing_conditions: String::new(),
            device_rotator: String::new(),
            device_safety_monitor: String::new(),
            device_switch: String::new(),
            device_telescope: String::new(),
            device_video: String::new(),
            display_method_calls: false,
            log_file_folder: String::new(),
            test_properties: true,
            test_methods: true,
            test_performance: false,
            test_side_of_pier_read: false,
            test_side_of_pier_write: false,
            update_check: true,
            update_date: None,
            warning_message_displayed: false,
            legacy_prog_id: String::new(),
        }
    }
}

impl Settings {
    /// Check the selection is usable. Reports only the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current_device_name == NO_DEVICE_SELECTED {
            return Err(ValidationError::NoDeviceSelected);
        }

        match &self.current_device_technology {
            DeviceTechnology::Unrecognised(other) => {
                Err(ValidationError::UnrecognisedTechnology(other.clone()))
            }
            DeviceTechnology::Com if self.current_com_device.prog_id.is_empty() => {
                Err(ValidationError::EmptyProgId)
            }
            DeviceTechnology::Alpaca if !self.current_alpaca_device.has_address() => {
                Err(ValidationError::NoAlpacaAddress)
            }
            _ => match &self.current_device_type {
                CurrentDeviceType::Unsupported(other) => Err(ValidationError::UnsupportedDeviceType(other.clone())),
                CurrentDeviceType::Supported(_) => Ok(()),
            },
        }
    }

    /// Fold fields written by older releases into their current form
    pub(crate) fn upgrade_legacy_fields(&mut self) {
        let legacy = std::mem::take(&mut self.legacy_prog_id);
        if self.current_com_device.prog_id.is_empty() && !legacy.is_empty() {
            self.current_com_device.prog_id = legacy;
        }
    }

    /// Device remembered for a category
    pub fn device_selection(&self, device_type: DeviceType) -> &str {
        match device_type {
            DeviceType::Camera => &self.device_camera,
            DeviceType::CoverCalibrator => &self.device_cover_calibrator,
            DeviceType::Dome => &self.device_dome,
            DeviceType::FilterWheel => &self.device_filter_wheel,
            DeviceType::Focuser => &self.device_focuser,
            DeviceType::ObservingConditions => &self.device_observing_conditions,
            DeviceType::Rotator => &self.device_rotator,
            DeviceType::SafetyMonitor => &self.device_safety_monitor,
            DeviceType::Switch => &self.device_switch,
            DeviceType::Telescope => &self.device_telescope,
        }
    }

    pub fn set_device_selection(&mut self, device_type: DeviceType, device: impl Into<String>) {
        let slot = match device_type {
            DeviceType::Camera => &mut self.device_camera,
            DeviceType::CoverCalibrator => &mut self.device_cover_calibrator,
            DeviceType::Dome => &mut self.device_dome,
            DeviceType::FilterWheel => &mut self.device_filter_wheel,
            DeviceType::Focuser => &mut self.device_focuser,
            DeviceType::ObservingConditions => &mut self.device_observing_conditions,
            DeviceType::Rotator => &mut self.device_rotator,
            DeviceType::SafetyMonitor => &mut self.device_safety_monitor,
            DeviceType::Switch => &mut self.device_switch,
            DeviceType::Telescope => &mut self.device_telescope,
        };
        *slot = device.into();
    }

    /// Select a COM driver as the device under test
    pub fn select_com_device(&mut self, device_type: DeviceType, prog_id: &str, display_name: &str) {
        self.current_device_technology = DeviceTechnology::Com;
        self.current_device_type = device_type.into();
        self.current_device_name = display_name.to_string();
        self.current_com_device = ComDevice {
            prog_id: prog_id.to_string(),
            display_name: display_name.to_string(),
        };
        self.set_device_selection(device_type, prog_id);
    }

    /// Select an Alpaca device as the device under test
    pub fn select_alpaca_device(&mut self, device: AlpacaDevice) {
        self.current_device_technology = DeviceTechnology::Alpaca;
        self.current_device_type = device.device_type.into();
        self.current_device_name = device.display_name();
        self.set_device_selection(device.device_type, device.display_name());
        self.current_alpaca_device = device;
    }
}

/// `UpdateDate` is optional. Files written by older releases hold the
/// minimum date-time, without an offset, to mean "never checked".
mod update_date {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(when) => serializer.serialize_str(&when.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        let raw = match raw {
            Some(s) if !s.is_empty() && !s.starts_with("0001-01-01") => s,
            _ => return Ok(None),
        };

        if let Ok(when) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(when.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Some(naive.and_utc()))
            .map_err(|e| serde::de::Error::custom(format!("invalid UpdateDate '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn alpaca_device() -> AlpacaDevice {
        AlpacaDevice {
            device_type: DeviceType::Telescope,
            device_number: 0,
            ip_address: "192.168.1.40".to_string(),
            ip_port: 11111,
            device_name: "Simulator Telescope".to_string(),
            unique_id: "b3a53bd3-7a0e-4a9c-9f31-d2d2d2d2d2d2".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.current_device_name, NO_DEVICE_SELECTED);
        assert_eq!(s.current_device_technology, DeviceTechnology::Alpaca);
        assert_eq!(s.current_device_type, DeviceType::Telescope);
        assert!(s.test_properties && s.test_methods && s.update_check);
        assert!(!s.test_performance && !s.display_method_calls);
        assert_eq!(s.update_date, None);
    }

    #[test]
    fn test_validate_no_device_takes_precedence() {
        let mut s = Settings::default();
        s.current_device_technology = DeviceTechnology::Unrecognised("Serial".to_string());
        s.current_com_device.prog_id.clear();
        assert_eq!(s.validate(), Err(ValidationError::NoDeviceSelected));
        assert_eq!(s.validate().unwrap_err().to_string(), "No device has been selected.");
    }

    #[test]
    fn test_validate_unrecognised_technology() {
        let mut s = Settings::default();
        s.current_device_name = "Scope".to_string();
        s.current_device_technology = DeviceTechnology::from("Serial".to_string());
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "Technology type is not Alpaca or COM: 'Serial'"
        );
    }

    #[test]
    fn test_validate_com_requires_prog_id() {
        let mut s = Settings::default();
        s.current_device_name = "Simulator".to_string();
        s.current_device_technology = DeviceTechnology::Com;
        let message = s.validate().unwrap_err().to_string();
        assert!(message.contains("ProgId"));

        s.current_com_device.prog_id = "ASCOM.Simulator.Telescope".to_string();
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_validate_alpaca_requires_address() {
        let mut s = Settings::default();
        s.current_device_name = "Simulator Telescope".to_string();
        assert_eq!(s.validate(), Err(ValidationError::NoAlpacaAddress));

        s.current_alpaca_device = alpaca_device();
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_technology_strings() {
        assert_eq!(serde_json::to_value(DeviceTechnology::Com).unwrap(), "COM");
        assert_eq!(serde_json::to_value(DeviceTechnology::Alpaca).unwrap(), "Alpaca");
        let t: DeviceTechnology = serde_json::from_str("\"com\"").unwrap();
        assert_eq!(t, DeviceTechnology::Unrecognised("com".to_string()));
        assert_eq!(serde_json::to_value(&t).unwrap(), "com");
    }

    #[test]
    fn test_round_trip() {
        let mut s = Settings::default();
        s.select_alpaca_device(alpaca_device());
        s.current_com_device.prog_id = "ASCOM.Simulator.Dome".to_string();
        s.debug = true;
        s.device_video = "ASCOM.Simulator.Video".to_string();
        s.log_file_folder = "/var/log/conform".to_string();
        s.test_side_of_pier_write = true;
        s.update_date = Some(Utc.with_ymd_and_hms(2024, 3, 9, 21, 15, 0).unwrap());

        let json = serde_json::to_string_pretty(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        for key in [
            "CurrentAlpacaDevice",
            "CurrentComDevice",
            "CurrentDeviceName",
            "CurrentDeviceTechnology",
            "CurrentDeviceType",
            "DeviceCoverCalibrator",
            "DeviceVideo",
            "DisplayMethodCalls",
            "TestSideOfPierRead",
            "UpdateDate",
            "WarningMessageDisplayed",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["CurrentComDevice"]["ProgId"], "");
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let s: Settings = serde_json::from_str(
            r#"{"CurrentDeviceName":"Dome Sim","CurrentDeviceTechnology":"COM","SomethingNew":1,
                "UpdateDate":"0001-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(s.current_device_name, "Dome Sim");
        assert_eq!(s.current_device_technology, DeviceTechnology::Com);
        assert!(s.test_methods);
        assert_eq!(s.update_date, None);
    }

    #[test]
    fn test_null_members_take_defaults() {
        let s: Settings = serde_json::from_str(
            r#"{"CurrentDeviceName":"X","DeviceCoverCalibrator":null,"CurrentAlpacaDevice":null,
                "CurrentDeviceTechnology":null,"CurrentDeviceType":null,"LogFileFolder":null}"#,
        )
        .unwrap();
        assert_eq!(s.current_device_name, "X");
        assert_eq!(s.device_cover_calibrator, "");
        assert_eq!(s.current_alpaca_device, AlpacaDevice::default());
        assert_eq!(s.current_device_technology, DeviceTechnology::Alpaca);
        assert_eq!(s.current_device_type, DeviceType::Telescope);
    }

    #[test]
    fn test_unsupported_device_type_is_kept() {
        let mut s: Settings =
            serde_json::from_str(r#"{"CurrentDeviceName":"Video Simulator","CurrentDeviceType":"Video"}"#).unwrap();
        assert_eq!(s.current_device_type, CurrentDeviceType::Unsupported("Video".to_string()));
        assert_eq!(s.current_device_type.supported(), None);
        assert_eq!(serde_json::to_value(&s).unwrap()["CurrentDeviceType"], "Video");

        s.current_alpaca_device = alpaca_device();
        assert_eq!(s.validate(), Err(ValidationError::UnsupportedDeviceType("Video".to_string())));
        assert_eq!(s.validate().unwrap_err().to_string(), "Device type is not supported: 'Video'");

        let s: Settings = serde_json::from_str(r#"{"CurrentDeviceType":"CoverCalibrator"}"#).unwrap();
        assert_eq!(s.current_device_type, DeviceType::CoverCalibrator);
        assert_eq!(serde_json::to_value(&s).unwrap()["CurrentDeviceType"], "CoverCalibrator");
    }

    #[test]
    fn test_legacy_prog_id_is_adopted() {
        let mut s: Settings = serde_json::from_str(
            r#"{"CurrentDeviceName":"Dome Sim","CurrentDeviceTechnology":"COM",
                "CurrentDeviceProgId":"ASCOM.Simulator.Dome"}"#,
        )
        .unwrap();
        s.upgrade_legacy_fields();
        assert_eq!(s.current_com_device.prog_id, "ASCOM.Simulator.Dome");
        assert_eq!(s.validate(), Ok(()));

        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("CurrentDeviceProgId").is_none());
        let mut back: Settings = serde_json::from_value(json).unwrap();
        back.upgrade_legacy_fields();
        assert_eq!(back, s);
    }

    #[test]
    fn test_naive_update_date() {
        let s: Settings = serde_json::from_str(r#"{"UpdateDate":"2023-11-02T08:30:00.5"}"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2023, 11, 2, 8, 30, 0).unwrap() + chrono::Duration::milliseconds(500);
        assert_eq!(s.update_date, Some(expected));
    }

    #[test]
    fn test_device_selection_slots() {
        let mut s = Settings::default();
        for t in DeviceType::ALL {
            s.set_device_selection(t, format!("ASCOM.Simulator.{:?}", t));
        }
        assert_eq!(s.device_selection(DeviceType::FilterWheel), "ASCOM.Simulator.FilterWheel");
        assert_eq!(s.device_observing_conditions, "ASCOM.Simulator.ObservingConditions");
        assert_eq!(s.device_video, "");
    }

    #[test]
    fn test_select_com_device() {
        let mut s = Settings::default();
        s.select_com_device(DeviceType::Focuser, "ASCOM.Simulator.Focuser", "Focuser Simulator");
        assert_eq!(s.current_device_technology, DeviceTechnology::Com);
        assert_eq!(s.current_device_type, DeviceType::Focuser);
        assert_eq!(s.current_device_name, "Focuser Simulator");
        assert_eq!(s.device_focuser, "ASCOM.Simulator.Focuser");
        assert_eq!(s.validate(), Ok(()));
    }
}
