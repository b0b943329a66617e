//! Shared plumbing for every device facade
//!
//! `FacadeBase` holds the settings snapshot a facade was built from and,
//! once the first member is used, the one [`DriverHandle`] it forwards to.

use std::sync::Arc;

use conform_ascom::{ComActivator, SystemActivator};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, info, trace};

use crate::error::{FacadeError, FacadeResult};
use crate::settings::{DeviceTechnology, DeviceType, Settings};
use crate::transport::{DriverHandle, DriverTarget};
use crate::value::{FromDriverValue, ToDriverValue};

enum DriverState {
    Pending,
    Open(Arc<DriverHandle>),
    /// Activation failed; the reason is reported on every later use
    Failed(String),
    Released,
}

pub struct FacadeBase {
    device_type: DeviceType,
    target: DriverTarget,
    display_method_calls: bool,
    activator: Arc<dyn ComActivator>,
    state: Mutex<DriverState>,
}

impl std::fmt::Debug for FacadeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacadeBase")
            .field("device_type", &self.device_type)
            .field("target", &self.target)
            .finish()
    }
}

impl FacadeBase {
    pub fn new(settings: &Settings, device_type: DeviceType) -> FacadeResult<Self> {
        Self::with_activator(settings, device_type, Arc::new(SystemActivator))
    }

    /// Use `activator` to create COM drivers instead of the system COM runtime
    pub fn with_activator(
        settings: &Settings,
        device_type: DeviceType,
        activator: Arc<dyn ComActivator>,
    ) -> FacadeResult<Self> {
        let target = DriverTarget::from_settings(settings, device_type)?;
        debug!("{} facade targets {}", device_type, target.describe());

        Ok(Self {
            device_type,
            target,
            display_method_calls: settings.display_method_calls,
            activator,
            state: Mutex::new(DriverState::Pending),
        })
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn target(&self) -> &DriverTarget {
        &self.target
    }

    /// Technology fixed when the facade was built
    pub fn technology(&self) -> DeviceTechnology {
        self.target.technology()
    }

    /// The driver handle, created on first use
    pub async fn handle(&self) -> FacadeResult<Arc<DriverHandle>> {
        let mut state = self.state.lock().await;
        match &*state {
            DriverState::Open(handle) => return Ok(handle.clone()),
            DriverState::Failed(reason) => {
                return Err(FacadeError::Activation {
                    device: self.target.describe(),
                    reason: reason.clone(),
                })
            }
            DriverState::Released => return Err(FacadeError::Disposed),
            DriverState::Pending => {}
        }

        match DriverHandle::open(&self.target, self.activator.clone()).await {
            Ok(handle) => {
                info!("Created driver for {}", self.target.describe());
                let handle = Arc::new(handle);
                *state = DriverState::Open(handle.clone());
                Ok(handle)
            }
            Err(e) => {
                let reason = e.to_string();
                error!("Unable to create driver for {}: {}", self.target.describe(), reason);
                *state = DriverState::Failed(reason.clone());
                Err(FacadeError::Activation {
                    device: self.target.describe(),
                    reason,
                })
            }
        }
    }

    /// Whether a driver handle currently exists
    pub async fn is_open(&self) -> bool {
        matches!(*self.state.lock().await, DriverState::Open(_))
    }

    /// Release the driver handle. Later calls are no-ops.
    pub async fn dispose(&self) {
        let previous = std::mem::replace(&mut *self.state.lock().await, DriverState::Released);
        if let DriverState::Open(handle) = previous {
            debug!("Releasing driver for {}", self.target.describe());
            if let Err(e) = handle.release().await {
                error!("Error releasing driver for {}: {}", self.target.describe(), e);
            }
        }
    }

    pub async fn get<T: FromDriverValue>(&self, member: &str) -> FacadeResult<T> {
        self.get_with(member, &[]).await
    }

    pub async fn get_with<T: FromDriverValue>(&self, member: &str, params: &[(&str, Value)]) -> FacadeResult<T> {
        self.log_call("Get", member, params);
        let handle = self.handle().await?;
        let value = handle.get(member, params).await?;
        narrow(member, value)
    }

    pub async fn set<V: ToDriverValue + ?Sized>(&self, member: &str, value: &V) -> FacadeResult<()> {
        let value = value.to_driver_value();
        self.log_call("Set", member, &[(member, value.clone())]);
        let handle = self.handle().await?;
        Ok(handle.set(member, value).await?)
    }

    pub async fn call<T: FromDriverValue>(&self, member: &str, params: &[(&str, Value)]) -> FacadeResult<T> {
        self.log_call("Call", member, params);
        let handle = self.handle().await?;
        let value = handle.call(member, params).await?;
        narrow(member, value)
    }

    fn log_call(&self, access: &str, member: &str, params: &[(&str, Value)]) {
        if self.display_method_calls {
            info!("{} {} {} {:?}", self.device_type, access, member, params);
        } else {
            trace!("{} {} {} {:?}", self.device_type, access, member, params);
        }
    }
}

fn narrow<T: FromDriverValue>(member: &str, value: Value) -> FacadeResult<T> {
    T::from_driver_value(&value).ok_or_else(|| FacadeError::UnexpectedValue {
        member: member.to_string(),
        expected: T::EXPECTED,
        value,
    })
}

/// Build a parameter list from `(name, value)` pairs
#[macro_export]
macro_rules! params {
    ($($name:literal => $value:expr),* $(,)?) => {
        [$(($name, $crate::value::ToDriverValue::to_driver_value(&$value))),*]
    };
}
