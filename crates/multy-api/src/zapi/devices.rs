// ZAPI network-device endpoints
//
// Clients known to the router: the device table, per-device traffic
// statistics and the friendly name shown in the router UI.

use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

const DEVICES_ROOT: &str = "network-devices";

impl MultyClient {
    /// Traffic counters per connected device.
    pub async fn get_device_statistics(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::NETWORK_DEVICE, "get-device-statistics", None)
            .await
    }

    /// Every device the router has seen.
    ///
    /// Returns the list under `device`; a reply without one yields an empty
    /// list.
    pub async fn get_network_devices(&self) -> Result<Vec<Value>, Error> {
        let payload = self.get_config(ns::NETWORK_DEVICE, DEVICES_ROOT).await?;
        let devices = device_list(payload);
        debug!(count = devices.len(), "listed network devices");
        Ok(devices)
    }

    /// Give device `id` a friendly name.
    pub async fn set_device_name(&self, id: &str, name: &str) -> Result<Value, Error> {
        debug!(id, name, "renaming network device");
        self.call(
            Operation::Rpc,
            ns::NETWORK_DEVICE,
            "set-device-name",
            Some(json!({ "input": { "id": id, "name": name } })),
        )
        .await
    }
}

fn device_list(payload: Value) -> Vec<Value> {
    match payload {
        Value::Object(mut map) => match map.remove("device") {
            Some(Value::Array(devices)) => devices,
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![single],
        },
        _ => Vec::new(),
    }
}
