mod common;

use common::{alpaca_settings, FakeAlpaca};
use conform_alpaca::AlpacaError;
use conform_core::facade::{CameraFacade, DeviceFacade, Facade, ObservingConditionsFacade, TelescopeFacade};
use conform_core::interfaces::{
    Camera, Device, DriveRate, ObservingConditions, PierSide, Telescope, TelescopeAxis,
};
use conform_core::settings::{DeviceTechnology, DeviceType};
use conform_core::{DriverError, FacadeError};
use serde_json::json;

#[tokio::test]
async fn test_properties_are_read_from_device() {
    let alpaca = FakeAlpaca::with_values(json!({
        "Name": "Alpaca Telescope",
        "Connected": true,
        "Declination": -12.75,
        "SideOfPier": -1,
        "TrackingRates": [0, 3],
    }));
    let device = alpaca.spawn(DeviceType::Telescope, 2).await;
    let scope = TelescopeFacade::new(&alpaca_settings(device)).unwrap();

    assert_eq!(scope.base().technology(), DeviceTechnology::Alpaca);
    assert_eq!(scope.name().await.unwrap(), "Alpaca Telescope");
    assert!(scope.connected().await.unwrap());
    assert_eq!(scope.declination().await.unwrap(), -12.75);
    assert_eq!(scope.side_of_pier().await.unwrap(), PierSide::Unknown);

    let rates = scope.tracking_rates().await.unwrap();
    assert_eq!(rates.item(2), Some(DriveRate::King));

    let requests = alpaca.requests();
    assert!(requests.iter().all(|r| r.device_type == "telescope" && r.device_number == 2));
    assert_eq!(requests[0].member, "name");
    assert_eq!(requests[0].method, "GET");
}

#[tokio::test]
async fn test_property_write_sends_member_as_form_field() {
    let alpaca = FakeAlpaca::default();
    let device = alpaca.spawn(DeviceType::Telescope, 0).await;
    let scope = TelescopeFacade::new(&alpaca_settings(device)).unwrap();

    scope.set_tracking(true).await.unwrap();
    scope.set_target_declination(22.5).await.unwrap();
    scope.set_tracking_rate(DriveRate::Lunar).await.unwrap();

    assert_eq!(alpaca.value("Tracking"), Some(json!(true)));
    assert_eq!(alpaca.value("TargetDeclination"), Some(json!(22.5)));
    assert_eq!(alpaca.value("TrackingRate"), Some(json!(1)));

    let requests = alpaca.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].params.get("Tracking").map(String::as_str), Some("True"));
    assert!(requests[0].params.contains_key("ClientTransactionID"));
}

#[tokio::test]
async fn test_parameters_are_named() {
    let alpaca = FakeAlpaca::with_values(json!({
        "AxisRates": [{"Minimum": 0.0, "Maximum": 3.0}],
        "commandstring#result": "J2000",
    }));
    let device = alpaca.spawn(DeviceType::Telescope, 0).await;
    let scope = TelescopeFacade::new(&alpaca_settings(device)).unwrap();

    let rates = scope.axis_rates(TelescopeAxis::Tertiary).await.unwrap();
    assert_eq!(rates.count(), 1);
    scope.move_axis(TelescopeAxis::Primary, 1.5).await.unwrap();
    assert_eq!(scope.command_string(":GE#", true).await.unwrap(), "J2000");

    let requests = alpaca.requests();
    assert_eq!(requests[0].member, "axisrates");
    assert_eq!(requests[0].params.get("Axis").map(String::as_str), Some("2"));

    assert_eq!(requests[1].member, "moveaxis");
    assert_eq!(requests[1].params.get("Axis").map(String::as_str), Some("0"));
    assert_eq!(requests[1].params.get("Rate").map(String::as_str), Some("1.5"));

    assert_eq!(requests[2].params.get("Command").map(String::as_str), Some(":GE#"));
    assert_eq!(requests[2].params.get("Raw").map(String::as_str), Some("True"));
}

#[tokio::test]
async fn test_device_error_is_propagated() {
    let alpaca = FakeAlpaca::default();
    let device = alpaca.spawn(DeviceType::Telescope, 0).await;
    let scope = TelescopeFacade::new(&alpaca_settings(device)).unwrap();

    let err = scope.aperture_area().await.unwrap_err();
    assert_eq!(err.driver_error_code(), Some(1024));
    match err {
        FacadeError::Driver(DriverError::Alpaca(AlpacaError::DeviceError { code, message })) => {
            assert_eq!(code, 1024);
            assert!(message.contains("aperturearea"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_device_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut settings = alpaca_settings(FakeAlpaca::default().spawn(DeviceType::Telescope, 0).await);
    settings.current_alpaca_device.ip_port = port;
    let scope = TelescopeFacade::new(&settings).unwrap();

    let err = scope.name().await.unwrap_err();
    assert!(matches!(err, FacadeError::Driver(DriverError::Alpaca(_))));
    assert_eq!(err.driver_error_code(), None);
}

#[tokio::test]
async fn test_facade_category_sets_endpoint() {
    let alpaca = FakeAlpaca::with_values(json!({"CameraXSize": 4096}));
    let device = alpaca.spawn(DeviceType::Telescope, 1).await;
    let camera = CameraFacade::new(&alpaca_settings(device)).unwrap();

    assert_eq!(camera.camera_x_size().await.unwrap(), 4096);
    let requests = alpaca.requests();
    assert_eq!(requests[0].device_type, "camera");
    assert_eq!(requests[0].device_number, 1);
}

#[tokio::test]
async fn test_sensor_queries_name_the_sensor() {
    let alpaca = FakeAlpaca::with_values(json!({
        "Temperature": 8.5,
        "SensorDescription": "Boltwood II",
    }));
    let device = alpaca.spawn(DeviceType::ObservingConditions, 0).await;
    let conditions = ObservingConditionsFacade::new(&alpaca_settings(device)).unwrap();

    assert_eq!(conditions.temperature().await.unwrap(), 8.5);
    assert_eq!(conditions.sensor_description("Temperature").await.unwrap(), "Boltwood II");

    let requests = alpaca.requests();
    assert_eq!(requests[1].member, "sensordescription");
    assert_eq!(requests[1].params.get("SensorName").map(String::as_str), Some("Temperature"));
}

#[tokio::test]
async fn test_open_uses_selected_alpaca_device() {
    let alpaca = FakeAlpaca::with_values(json!({"Description": "Simulated dome"}));
    let device = alpaca.spawn(DeviceType::Dome, 0).await;

    let facade = DeviceFacade::open(&alpaca_settings(device)).unwrap();

    assert_eq!(facade.device_type(), DeviceType::Dome);
    assert!(matches!(facade, DeviceFacade::Dome(_)));
    assert_eq!(facade.device().description().await.unwrap(), "Simulated dome");

    facade.dispose().await;
    assert!(matches!(facade.device().description().await, Err(FacadeError::Disposed)));
    assert_eq!(alpaca.requests().len(), 1);
}
