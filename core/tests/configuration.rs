use std::fs;
use std::sync::{Arc, Mutex};

use conform_core::configuration::{
    ConformConfiguration, STATUS_CORRUPTED, STATUS_FIRST_USE, STATUS_READ_FAILED, STATUS_READ_OK,
};
use conform_core::settings::{CurrentDeviceType, DeviceTechnology, DeviceType, Settings, NO_DEVICE_SELECTED};
use tempfile::TempDir;

fn read_back(path: &std::path::Path) -> Settings {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_first_use_creates_file_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform").join("conform.settings");

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_FIRST_USE);
    assert!(path.exists());
    assert_eq!(read_back(&path), Settings::default());
    assert_eq!(config.settings(), &Settings::default());
    assert_eq!(config.last_persist_error(), None);
}

#[test]
fn test_corrupted_file_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::write(&path, "{ \"CurrentDeviceName\": ").unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_CORRUPTED);
    assert_eq!(config.settings(), &Settings::default());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"CurrentDeviceName\": ");
}

#[test]
fn test_existing_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::write(
        &path,
        r#"{
            "CurrentDeviceTechnology": "COM",
            "CurrentDeviceType": "Focuser",
            "CurrentDeviceName": "Focuser Simulator",
            "CurrentComDevice": { "ProgId": "ASCOM.Simulator.Focuser", "DisplayName": "Focuser Simulator" },
            "DisplayMethodCalls": true,
            "UpdateDate": "0001-01-01T00:00:00"
        }"#,
    )
    .unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_READ_OK);
    let settings = config.settings();
    assert_eq!(settings.current_device_technology, DeviceTechnology::Com);
    assert_eq!(settings.current_device_type, DeviceType::Focuser);
    assert_eq!(settings.current_com_device.prog_id, "ASCOM.Simulator.Focuser");
    assert!(settings.display_method_calls);
    // Members missing from the file keep their defaults
    assert!(settings.test_properties);
    assert_eq!(settings.update_date, None);
    assert_eq!(config.validate(), "");
}

#[test]
fn test_null_member_is_read_as_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::write(&path, r#"{"CurrentDeviceName":"X","DeviceCoverCalibrator":null}"#).unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_READ_OK);
    assert_eq!(config.settings().current_device_name, "X");
    assert_eq!(config.settings().device_cover_calibrator, "");
}

#[test]
fn test_file_written_by_desktop_conform_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::write(
        &path,
        r#"{
  "CurrentAlpacaDevice": {
    "AscomDeviceType": null,
    "AlpacaDeviceNumber": 0,
    "AlpacaDeviceName": null,
    "AscomDeviceName": null,
    "DeviceNumber": 0,
    "HostName": null,
    "IpAddress": null,
    "IpPort": 0,
    "ServerName": null,
    "Manufacturer": null,
    "ManufacturerVersion": null,
    "Location": null,
    "InterfaceVersion": 0,
    "UniqueId": null
  },
  "CurrentComDevice": {
    "ProgId": null,
    "DisplayName": null
  },
  "CurrentDeviceProgId": "ASCOM.Simulator.Focuser",
  "CurrentDeviceName": "Focuser Simulator",
  "CurrentDeviceTechnology": "COM",
  "CurrentDeviceType": "Focuser",
  "Debug": false,
  "DeviceCamera": null,
  "DeviceCoverCalibrator": null,
  "DeviceDome": "ASCOM.Simulator.Dome",
  "DeviceFilterWheel": null,
  "DeviceFocuser": "ASCOM.Simulator.Focuser",
  "DeviceObservingConditions": null,
  "DeviceRotator": null,
  "DeviceSafetyMonitor": null,
  "DeviceSwitch": null,
  "DeviceTelescope": "ASCOM.Simulator.Telescope",
  "DeviceVideo": null,
  "DisplayMethodCalls": false,
  "LogFileFolder": null,
  "TestProperties": true,
  "TestMethods": true,
  "TestPerformance": false,
  "TestSideOfPierRead": false,
  "TestSideOfPierWrite": false,
  "UpdateCheck": true,
  "UpdateDate": "0001-01-01T00:00:00",
  "WarningMessageDisplayed": true
}"#,
    )
    .unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_READ_OK);
    let settings = config.settings();
    assert_eq!(settings.current_device_technology, DeviceTechnology::Com);
    assert_eq!(settings.current_device_type, DeviceType::Focuser);
    assert_eq!(settings.current_com_device.prog_id, "ASCOM.Simulator.Focuser");
    assert_eq!(settings.current_com_device.display_name, "");
    assert_eq!(settings.current_alpaca_device.device_type, DeviceType::Telescope);
    assert_eq!(settings.current_alpaca_device.ip_address, "");
    assert_eq!(settings.device_dome, "ASCOM.Simulator.Dome");
    assert_eq!(settings.device_camera, "");
    assert_eq!(settings.log_file_folder, "");
    assert_eq!(settings.update_date, None);
    assert!(settings.warning_message_displayed);
    assert_eq!(config.validate(), "");
}

#[test]
fn test_unsupported_device_type_is_loaded_and_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::write(
        &path,
        r#"{"CurrentDeviceName":"Video Simulator","CurrentDeviceTechnology":"COM",
            "CurrentDeviceType":"Video","CurrentComDevice":{"ProgId":"ASCOM.Simulator.Video","DisplayName":null}}"#,
    )
    .unwrap();

    let mut config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_READ_OK);
    assert_eq!(
        config.settings().current_device_type,
        CurrentDeviceType::Unsupported("Video".to_string())
    );
    assert_eq!(config.validate(), "Device type is not supported: 'Video'");

    // The unknown name survives a save
    config.save();
    assert!(fs::read_to_string(&path).unwrap().contains("\"CurrentDeviceType\": \"Video\""));
}

#[test]
fn test_undecodable_file_is_corrupted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    let bytes = [0xFF, 0xFE, b'{', 0x00, b'}'];
    fs::write(&path, bytes).unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_CORRUPTED);
    assert_eq!(config.settings(), &Settings::default());
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_byte_order_mark_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::write(&path, b"\xEF\xBB\xBF{\"CurrentDeviceName\":\"Dome Simulator\"}").unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_READ_OK);
    assert_eq!(config.settings().current_device_name, "Dome Simulator");
}

#[test]
fn test_unreadable_path_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    fs::create_dir(&path).unwrap();

    let config = ConformConfiguration::with_path(&path);

    assert_eq!(config.status(), STATUS_READ_FAILED);
    assert_eq!(config.settings(), &Settings::default());
}

#[test]
fn test_save_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");

    let mut config = ConformConfiguration::with_path(&path);
    config
        .settings_mut()
        .select_com_device(DeviceType::Dome, "ASCOM.Simulator.Dome", "Dome Simulator");
    config.settings_mut().test_performance = true;
    config.save();

    assert!(config.status().starts_with("Settings saved at "));
    assert!(config.status().ends_with('.'));

    let reloaded = ConformConfiguration::with_path(&path);
    assert_eq!(reloaded.status(), STATUS_READ_OK);
    assert_eq!(reloaded.settings(), config.settings());
    assert_eq!(reloaded.settings().device_dome, "ASCOM.Simulator.Dome");
}

#[test]
fn test_reset_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");

    let mut config = ConformConfiguration::with_path(&path);
    config.settings_mut().debug = true;
    config.save();

    config.reset();
    let first = fs::read_to_string(&path).unwrap();
    assert!(config.status().starts_with("Settings reset at "));
    config.reset();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(config.settings(), &Settings::default());
}

#[test]
fn test_subscribers_run_in_order_after_file_is_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conform.settings");
    let mut config = ConformConfiguration::with_path(&path);

    let seen = Arc::new(Mutex::new(Vec::new()));
    for index in 0..3 {
        let seen = seen.clone();
        let path = path.clone();
        config.subscribe(move |settings: &Settings| {
            let on_disk = read_back(&path);
            seen.lock().unwrap().push((
                index,
                settings.current_device_technology.clone(),
                on_disk.current_device_technology,
            ));
        });
    }

    config
        .settings_mut()
        .select_com_device(DeviceType::Switch, "ASCOM.Simulator.Switch", "Switch Simulator");
    config.save();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (0, DeviceTechnology::Com, DeviceTechnology::Com),
            (1, DeviceTechnology::Com, DeviceTechnology::Com),
            (2, DeviceTechnology::Com, DeviceTechnology::Com),
        ]
    );
}

#[test]
fn test_unsubscribed_callback_is_not_run() {
    let dir = TempDir::new().unwrap();
    let mut config = ConformConfiguration::with_path(dir.path().join("conform.settings"));

    let count = Arc::new(Mutex::new(0));
    let counter = count.clone();
    let id = config.subscribe(move |_: &Settings| *counter.lock().unwrap() += 1);

    config.save();
    assert!(config.unsubscribe(id));
    assert!(!config.unsubscribe(id));
    config.reset();

    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_write_failure_still_notifies() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("conform.settings");

    let mut config = ConformConfiguration::with_path(&path);
    assert_eq!(config.status(), STATUS_READ_FAILED);

    let notified = Arc::new(Mutex::new(false));
    let flag = notified.clone();
    config.subscribe(move |_: &Settings| *flag.lock().unwrap() = true);
    config.save();

    assert!(config.last_persist_error().is_some());
    assert!(config.status().starts_with("Settings saved at "));
    assert!(*notified.lock().unwrap());
}

#[test]
fn test_validate_reports_first_problem() {
    let dir = TempDir::new().unwrap();
    let mut config = ConformConfiguration::with_path(dir.path().join("conform.settings"));

    assert_eq!(config.settings().current_device_name, NO_DEVICE_SELECTED);
    assert_eq!(config.validate(), "No device has been selected.");

    config.settings_mut().current_device_name = "Something".to_string();
    config.settings_mut().current_device_technology = DeviceTechnology::Com;
    assert_eq!(config.validate(), "CurrentComDevice.ProgId is empty.");

    config.settings_mut().current_device_technology = DeviceTechnology::Unrecognised("Serial".to_string());
    assert_eq!(config.validate(), "Technology type is not Alpaca or COM: 'Serial'");

    config
        .settings_mut()
        .select_com_device(DeviceType::Camera, "ASCOM.Simulator.Camera", "Camera Simulator");
    assert_eq!(config.validate(), "");
}
