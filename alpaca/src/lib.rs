//! Alpaca Protocol Client
//!
//! Implements the transport side of the ASCOM Alpaca REST API: the identity
//! record of a network device and an HTTP client that forwards member reads,
//! writes and method calls to it. Values travel as loosely typed JSON; callers
//! narrow them to the types their interface declares.

mod client;

pub use client::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Alpaca API version
pub const ALPACA_API_VERSION: u32 = 1;

/// Default Alpaca API port
pub const ALPACA_DEFAULT_PORT: u16 = 11111;

/// ASCOM device categories reachable over Alpaca
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlpacaDeviceType {
    Camera,
    CoverCalibrator,
    Dome,
    FilterWheel,
    Focuser,
    ObservingConditions,
    Rotator,
    SafetyMonitor,
    Switch,
    #[default]
    Telescope,
}

impl AlpacaDeviceType {
    /// Every category, in alphabetical order
    pub const ALL: [AlpacaDeviceType; 10] = [
        AlpacaDeviceType::Camera,
        AlpacaDeviceType::CoverCalibrator,
        AlpacaDeviceType::Dome,
        AlpacaDeviceType::FilterWheel,
        AlpacaDeviceType::Focuser,
        AlpacaDeviceType::ObservingConditions,
        AlpacaDeviceType::Rotator,
        AlpacaDeviceType::SafetyMonitor,
        AlpacaDeviceType::Switch,
        AlpacaDeviceType::Telescope,
    ];

    /// Name used in Alpaca URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            AlpacaDeviceType::Camera => "camera",
            AlpacaDeviceType::CoverCalibrator => "covercalibrator",
            AlpacaDeviceType::Dome => "dome",
            AlpacaDeviceType::FilterWheel => "filterwheel",
            AlpacaDeviceType::Focuser => "focuser",
            AlpacaDeviceType::ObservingConditions => "observingconditions",
            AlpacaDeviceType::Rotator => "rotator",
            AlpacaDeviceType::SafetyMonitor => "safetymonitor",
            AlpacaDeviceType::Switch => "switch",
            AlpacaDeviceType::Telescope => "telescope",
        }
    }

    /// Name used in settings files and the management API, e.g. `CoverCalibrator`
    pub fn type_name(&self) -> &'static str {
        match self {
            AlpacaDeviceType::Camera => "Camera",
            AlpacaDeviceType::CoverCalibrator => "CoverCalibrator",
            AlpacaDeviceType::Dome => "Dome",
            AlpacaDeviceType::FilterWheel => "FilterWheel",
            AlpacaDeviceType::Focuser => "Focuser",
            AlpacaDeviceType::ObservingConditions => "ObservingConditions",
            AlpacaDeviceType::Rotator => "Rotator",
            AlpacaDeviceType::SafetyMonitor => "SafetyMonitor",
            AlpacaDeviceType::Switch => "Switch",
            AlpacaDeviceType::Telescope => "Telescope",
        }
    }

    /// Case-insensitive lookup by URL or type name
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == lower)
    }

    /// Get a display name for the device type
    pub fn display_name(&self) -> &'static str {
        match self {
            AlpacaDeviceType::Camera => "Camera",
            AlpacaDeviceType::CoverCalibrator => "Cover Calibrator",
            AlpacaDeviceType::Dome => "Dome",
            AlpacaDeviceType::FilterWheel => "Filter Wheel",
            AlpacaDeviceType::Focuser => "Focuser",
            AlpacaDeviceType::ObservingConditions => "Observing Conditions",
            AlpacaDeviceType::Rotator => "Rotator",
            AlpacaDeviceType::SafetyMonitor => "Safety Monitor",
            AlpacaDeviceType::Switch => "Switch",
            AlpacaDeviceType::Telescope => "Telescope",
        }
    }
}

impl std::fmt::Display for AlpacaDeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Identity of an Alpaca device as recorded in the Conform settings file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AlpacaDevice {
    #[serde(rename = "AscomDeviceType", deserialize_with = "lenient_device_type")]
    pub device_type: AlpacaDeviceType,
    #[serde(rename = "AlpacaDeviceNumber")]
    pub device_number: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub host_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ip_address: String,
    pub ip_port: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub server_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub manufacturer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub manufacturer_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "AscomDeviceName", deserialize_with = "null_as_default")]
    pub device_name: String,
    #[serde(rename = "UniqueId", deserialize_with = "null_as_default")]
    pub unique_id: String,
    pub interface_version: i32,
}

/// Read a JSON `null` as the type's default.
///
/// Settings files written by .NET serialise unset strings and records as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Device type by name, falling back to the default for `null`, numbers and
/// names outside the Alpaca categories
fn lenient_device_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AlpacaDeviceType, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(AlpacaDeviceType::from_str)
        .unwrap_or_default())
}

impl AlpacaDevice {
    /// Host used to reach the device, preferring the resolved IP address
    pub fn host(&self) -> &str {
        if self.ip_address.is_empty() {
            &self.host_name
        } else {
            &self.ip_address
        }
    }

    /// Whether the record carries enough information to build a URL
    pub fn has_address(&self) -> bool {
        !self.host().is_empty() && self.ip_port != 0
    }

    /// Base URL of the Alpaca server hosting this device
    pub fn base_url(&self) -> String {
        let host = self.host();
        // Bare IPv6 literals need brackets inside a URL
        if host.contains(':') && !host.starts_with('[') {
            format!("http://[{}]:{}", host, self.ip_port)
        } else {
            format!("http://{}:{}", host, self.ip_port)
        }
    }

    /// Get a unique identifier for this device
    pub fn id(&self) -> String {
        format!("alpaca:{}:{}:{}", self.base_url(), self.device_type.as_str(), self.device_number)
    }

    /// Get a display name combining device name and type
    pub fn display_name(&self) -> String {
        if self.device_name.is_empty() {
            format!("{} #{}", self.device_type.display_name(), self.device_number)
        } else {
            self.device_name.clone()
        }
    }
}

impl std::fmt::Display for AlpacaDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.display_name(), self.base_url())
    }
}
