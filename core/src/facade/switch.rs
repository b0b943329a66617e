use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::interfaces::Switch;
use crate::params;
use crate::settings::DeviceType;

facade!(
    /// Switch device reached over COM or Alpaca
    SwitchFacade,
    DeviceType::Switch
);

#[async_trait]
impl Switch for SwitchFacade {
    async fn max_switch(&self) -> FacadeResult<i16> {
        self.base.get("MaxSwitch").await
    }

    async fn can_write(&self, id: i16) -> FacadeResult<bool> {
        self.base.get_with("CanWrite", &params!["Id" => id]).await
    }

    async fn get_switch(&self, id: i16) -> FacadeResult<bool> {
        self.base.get_with("GetSwitch", &params!["Id" => id]).await
    }

    async fn get_switch_description(&self, id: i16) -> FacadeResult<String> {
        self.base.get_with("GetSwitchDescription", &params!["Id" => id]).await
    }

    async fn get_switch_name(&self, id: i16) -> FacadeResult<String> {
        self.base.get_with("GetSwitchName", &params!["Id" => id]).await
    }

    async fn get_switch_value(&self, id: i16) -> FacadeResult<f64> {
        self.base.get_with("GetSwitchValue", &params!["Id" => id]).await
    }

    async fn max_switch_value(&self, id: i16) -> FacadeResult<f64> {
        self.base.get_with("MaxSwitchValue", &params!["Id" => id]).await
    }

    async fn min_switch_value(&self, id: i16) -> FacadeResult<f64> {
        self.base.get_with("MinSwitchValue", &params!["Id" => id]).await
    }

    async fn set_switch(&self, id: i16, state: bool) -> FacadeResult<()> {
        self.base
            .call("SetSwitch", &params!["Id" => id, "State" => state])
            .await
    }

    async fn set_switch_name(&self, id: i16, name: &str) -> FacadeResult<()> {
        self.base
            .call("SetSwitchName", &params!["Id" => id, "Name" => name])
            .await
    }

    async fn set_switch_value(&self, id: i16, value: f64) -> FacadeResult<()> {
        self.base
            .call("SetSwitchValue", &params!["Id" => id, "Value" => value])
            .await
    }

    async fn switch_step(&self, id: i16) -> FacadeResult<f64> {
        self.base.get_with("SwitchStep", &params!["Id" => id]).await
    }
}
