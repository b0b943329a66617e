//! Transport selection
//!
//! A facade talks to exactly one [`DriverHandle`], either a COM driver or an
//! Alpaca client. Which one is decided once, from the settings snapshot, by
//! [`DriverTarget::from_settings`] and [`DriverHandle::open`].

use std::sync::Arc;

use conform_alpaca::{AlpacaClient, AlpacaDevice};
use conform_ascom::{ComActivator, ComDriver};
use serde_json::Value;

use crate::error::{DriverError, FacadeError};
use crate::settings::{DeviceTechnology, DeviceType, Settings};

/// The driver a facade will talk to
#[derive(Debug, Clone, PartialEq)]
pub enum DriverTarget {
    Com { prog_id: String },
    Alpaca(AlpacaDevice),
}

impl DriverTarget {
    /// Resolve the target for `device_type` from the current selection
    pub fn from_settings(settings: &Settings, device_type: DeviceType) -> Result<Self, FacadeError> {
        match &settings.current_device_technology {
            DeviceTechnology::Com => Ok(DriverTarget::Com {
                prog_id: settings.current_com_device.prog_id.clone(),
            }),
            DeviceTechnology::Alpaca => {
                let mut device = settings.current_alpaca_device.clone();
                device.device_type = device_type;
                Ok(DriverTarget::Alpaca(device))
            }
            DeviceTechnology::Unrecognised(other) => Err(FacadeError::Configuration(format!(
                "Technology type is not Alpaca or COM: '{}'",
                other
            ))),
        }
    }

    pub fn technology(&self) -> DeviceTechnology {
        match self {
            DriverTarget::Com { .. } => DeviceTechnology::Com,
            DriverTarget::Alpaca(_) => DeviceTechnology::Alpaca,
        }
    }

    /// Short description for logs and errors
    pub fn describe(&self) -> String {
        match self {
            DriverTarget::Com { prog_id } => format!("COM driver {}", prog_id),
            DriverTarget::Alpaca(device) => format!(
                "Alpaca {} #{} at {}",
                device.device_type.as_str(),
                device.device_number,
                device.base_url()
            ),
        }
    }
}

/// Live connection to a driver
#[derive(Debug)]
pub enum DriverHandle {
    Com(ComDriver),
    Alpaca(AlpacaClient),
}

impl DriverHandle {
    /// Create the handle for `target`.
    ///
    /// Alpaca only builds an HTTP client; COM activates the driver on its
    /// own apartment thread.
    pub async fn open(target: &DriverTarget, activator: Arc<dyn ComActivator>) -> Result<Self, DriverError> {
        match target {
            DriverTarget::Com { prog_id } => Ok(DriverHandle::Com(ComDriver::activate(prog_id, activator).await?)),
            DriverTarget::Alpaca(device) => Ok(DriverHandle::Alpaca(AlpacaClient::new(device)?)),
        }
    }

    pub fn technology(&self) -> DeviceTechnology {
        match self {
            DriverHandle::Com(_) => DeviceTechnology::Com,
            DriverHandle::Alpaca(_) => DeviceTechnology::Alpaca,
        }
    }

    /// Read a property, or a member that takes parameters but changes nothing
    pub async fn get(&self, member: &str, params: &[(&str, Value)]) -> Result<Value, DriverError> {
        match self {
            DriverHandle::Com(driver) => Ok(driver.get(member, positional(params)).await?),
            DriverHandle::Alpaca(client) => Ok(client.get(member, params).await?),
        }
    }

    /// Write a property
    pub async fn set(&self, member: &str, value: Value) -> Result<(), DriverError> {
        match self {
            DriverHandle::Com(driver) => Ok(driver.set(member, value).await?),
            DriverHandle::Alpaca(client) => {
                client.put(member, &[(member, value)]).await?;
                Ok(())
            }
        }
    }

    /// Call a method
    pub async fn call(&self, member: &str, params: &[(&str, Value)]) -> Result<Value, DriverError> {
        match self {
            DriverHandle::Com(driver) => Ok(driver.call(member, positional(params)).await?),
            DriverHandle::Alpaca(client) => Ok(client.put_long(member, params).await?),
        }
    }

    /// Let go of the driver. Only COM holds anything worth releasing.
    pub async fn release(&self) -> Result<(), DriverError> {
        match self {
            DriverHandle::Com(driver) => Ok(driver.release().await?),
            DriverHandle::Alpaca(_) => Ok(()),
        }
    }
}

/// COM takes arguments by position
fn positional(params: &[(&str, Value)]) -> Vec<Value> {
    params.iter().map(|(_, v)| v.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_settings() {
        let mut settings = Settings::default();
        settings.current_alpaca_device.ip_address = "10.0.0.5".to_string();
        settings.current_alpaca_device.ip_port = 11111;
        settings.current_alpaca_device.device_type = DeviceType::Telescope;

        match DriverTarget::from_settings(&settings, DeviceType::Dome).unwrap() {
            DriverTarget::Alpaca(device) => {
                assert_eq!(device.device_type, DeviceType::Dome);
                assert_eq!(device.base_url(), "http://10.0.0.5:11111");
            }
            other => panic!("unexpected target {:?}", other),
        }

        settings.current_device_technology = DeviceTechnology::Com;
        settings.current_com_device.prog_id = "ASCOM.Simulator.Dome".to_string();
        let target = DriverTarget::from_settings(&settings, DeviceType::Dome).unwrap();
        assert_eq!(target, DriverTarget::Com { prog_id: "ASCOM.Simulator.Dome".to_string() });
        assert_eq!(target.describe(), "COM driver ASCOM.Simulator.Dome");

        settings.current_device_technology = DeviceTechnology::Unrecognised("INDI".to_string());
        assert!(matches!(
            DriverTarget::from_settings(&settings, DeviceType::Dome),
            Err(FacadeError::Configuration(_))
        ));
    }

    #[test]
    fn test_positional_keeps_order() {
        let params = [("RightAscension", Value::from(5.5)), ("Declination", Value::from(-20.0))];
        assert_eq!(positional(&params), vec![Value::from(5.5), Value::from(-20.0)]);
    }
}
