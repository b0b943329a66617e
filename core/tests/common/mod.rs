//! Test doubles shared by the integration tests: an in-memory COM driver and
//! an in-process Alpaca server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use conform_core::settings::{AlpacaDevice, DeviceType, Settings};
use conform_core::{ComActivator, DispatchObject};
use conform_ascom::{AscomError, AscomResult};
use serde_json::{json, Value};

pub const NOT_IMPLEMENTED: i32 = 0x80040400u32 as i32;

#[derive(Debug, Default)]
pub struct FakeDriverState {
    pub properties: HashMap<String, Value>,
    /// (access, member, arguments) in arrival order
    pub calls: Vec<(String, String, Vec<Value>)>,
    pub attempts: usize,
    pub released: usize,
}

/// Activates an in-memory driver for the ProgIDs it knows about
#[derive(Clone)]
pub struct FakeComActivator {
    pub state: Arc<Mutex<FakeDriverState>>,
    registered: Vec<String>,
}

impl FakeComActivator {
    pub fn new(prog_id: &str, properties: Value) -> Self {
        let properties = properties
            .as_object()
            .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Self {
            state: Arc::new(Mutex::new(FakeDriverState {
                properties,
                ..Default::default()
            })),
            registered: vec![prog_id.to_string()],
        }
    }

    pub fn arc(&self) -> Arc<dyn ComActivator> {
        Arc::new(self.clone())
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }

    pub fn released(&self) -> usize {
        self.state.lock().unwrap().released
    }

    pub fn calls(&self) -> Vec<(String, String, Vec<Value>)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn property(&self, member: &str) -> Option<Value> {
        self.state.lock().unwrap().properties.get(member).cloned()
    }

    /// Wait for the worker thread to let go of the driver
    pub async fn wait_released(&self, expected: usize) -> bool {
        for _ in 0..100 {
            if self.released() >= expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

impl ComActivator for FakeComActivator {
    fn activate(&self, prog_id: &str) -> AscomResult<Box<dyn DispatchObject>> {
        self.state.lock().unwrap().attempts += 1;
        if !self.registered.iter().any(|p| p == prog_id) {
            return Err(AscomError::Activation {
                prog_id: prog_id.to_string(),
                reason: "Invalid class string".to_string(),
            });
        }
        Ok(Box::new(FakeComDriver {
            prog_id: prog_id.to_string(),
            state: self.state.clone(),
        }))
    }
}

struct FakeComDriver {
    prog_id: String,
    state: Arc<Mutex<FakeDriverState>>,
}

impl DispatchObject for FakeComDriver {
    fn get(&mut self, member: &str, args: &[Value]) -> AscomResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(("get".to_string(), member.to_string(), args.to_vec()));
        state.properties.get(member).cloned().ok_or_else(|| AscomError::DriverException {
            code: NOT_IMPLEMENTED,
            origin: self.prog_id.clone(),
            description: format!("Property read {} is not implemented in this driver.", member),
        })
    }

    fn set(&mut self, member: &str, value: &Value) -> AscomResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(("set".to_string(), member.to_string(), vec![value.clone()]));
        state.properties.insert(member.to_string(), value.clone());
        Ok(())
    }

    fn call(&mut self, member: &str, args: &[Value]) -> AscomResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(("call".to_string(), member.to_string(), args.to_vec()));
        Ok(state.properties.get(member).cloned().unwrap_or(Value::Null))
    }
}

impl Drop for FakeComDriver {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.released += 1;
        }
    }
}

/// Settings selecting a COM driver
pub fn com_settings(device_type: DeviceType, prog_id: &str) -> Settings {
    let mut settings = Settings::default();
    settings.select_com_device(device_type, prog_id, "Fake device");
    settings
}

/// Settings selecting an Alpaca device
pub fn alpaca_settings(device: AlpacaDevice) -> Settings {
    let mut settings = Settings::default();
    settings.select_alpaca_device(device);
    settings
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: &'static str,
    pub device_type: String,
    pub device_number: u32,
    pub member: String,
    pub params: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct FakeAlpaca {
    pub values: Arc<Mutex<HashMap<String, Value>>>,
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeAlpaca {
    pub fn with_values(values: Value) -> Self {
        let fake = FakeAlpaca::default();
        if let Some(map) = values.as_object() {
            let mut stored = fake.values.lock().unwrap();
            for (k, v) in map {
                stored.insert(k.to_lowercase(), v.clone());
            }
        }
        fake
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn value(&self, member: &str) -> Option<Value> {
        self.values.lock().unwrap().get(&member.to_lowercase()).cloned()
    }

    /// Serve on an ephemeral local port and return the device record for it
    pub async fn spawn(&self, device_type: DeviceType, device_number: u32) -> AlpacaDevice {
        let app = Router::new()
            .route("/api/v1/:device_type/:number/:member", get(handle_get).put(handle_put))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        AlpacaDevice {
            device_type,
            device_number,
            ip_address: "127.0.0.1".to_string(),
            ip_port: port,
            device_name: format!("Fake {}", device_type),
            ..Default::default()
        }
    }
}

fn envelope(value: Option<Value>, member: &str) -> Json<Value> {
    match value {
        Some(v) => Json(json!({
            "Value": v,
            "ClientTransactionID": 1,
            "ServerTransactionID": 1,
            "ErrorNumber": 0,
            "ErrorMessage": "",
        })),
        None => Json(json!({
            "ClientTransactionID": 1,
            "ServerTransactionID": 1,
            "ErrorNumber": 1024,
            "ErrorMessage": format!("{} is not implemented", member),
        })),
    }
}

async fn handle_get(
    State(fake): State<FakeAlpaca>,
    Path((device_type, device_number, member)): Path<(String, u32, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    fake.seen.lock().unwrap().push(SeenRequest {
        method: "GET",
        device_type,
        device_number,
        member: member.clone(),
        params,
    });
    let value = fake.values.lock().unwrap().get(&member).cloned();
    envelope(value, &member)
}

async fn handle_put(
    State(fake): State<FakeAlpaca>,
    Path((device_type, device_number, member)): Path<(String, u32, String)>,
    Form(params): Form<HashMap<String, String>>,
) -> Json<Value> {
    let written = params
        .iter()
        .find(|(k, _)| k.to_lowercase() == member)
        .map(|(_, v)| parse_form_value(v));
    fake.seen.lock().unwrap().push(SeenRequest {
        method: "PUT",
        device_type,
        device_number,
        member: member.clone(),
        params,
    });

    let mut values = fake.values.lock().unwrap();
    if let Some(v) = written {
        values.insert(member.clone(), v);
    }
    Json(json!({
        "Value": values.get(&format!("{}#result", member)).cloned().unwrap_or(Value::Null),
        "ClientTransactionID": 1,
        "ServerTransactionID": 1,
        "ErrorNumber": 0,
        "ErrorMessage": "",
    }))
}

fn parse_form_value(raw: &str) -> Value {
    match raw {
        "True" => Value::Bool(true),
        "False" => Value::Bool(false),
        _ => raw
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<f64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}
