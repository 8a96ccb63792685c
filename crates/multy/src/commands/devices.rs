//! Network device command handlers.

use multy_api::MultyClient;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Connection")]
    connection: String,
    #[tabled(rename = "Online")]
    online: String,
}

fn field<'a>(device: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| device.get(*k).filter(|v| !v.is_null() && v.as_str() != Some("")))
}

fn text(device: &Value, keys: &[&str]) -> String {
    field(device, keys).map(output::scalar).unwrap_or_default()
}

/// `alive-status` comes as a bool on some firmware and a word on others.
fn is_online(device: &Value) -> bool {
    match device.get("alive-status") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.to_ascii_lowercase().as_str(),
            "online" | "true" | "1" | "alive"
        ),
        _ => false,
    }
}

impl From<&Value> for DeviceRow {
    fn from(d: &Value) -> Self {
        let mac = text(d, &["al-mac", "mac", "id"]);
        let name = field(d, &["device-name", "host-name", "name"])
            .map_or_else(|| mac.clone(), output::scalar);
        Self {
            name,
            mac,
            ip: text(d, &["ipv4-address", "ip-address"]),
            connection: text(d, &["connection-type"]),
            online: (if is_online(d) { "yes" } else { "no" }).into(),
        }
    }
}

pub async fn handle(
    client: &MultyClient,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices = client.get_network_devices().await?;
            let out = output::render_list(global.output, &devices, DeviceRow::from)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Stats => {
            let payload = client.get_device_statistics().await?;
            output::print_value(global.output, &payload, global.quiet)
        }

        DevicesCommand::Rename { id, name } => {
            client.set_device_name(&id, &name).await?;
            util::done(&format!("Device {id} renamed to '{name}'"), global);
            Ok(())
        }

        DevicesCommand::Block { mac, minutes } => {
            client.block_device(&mac, minutes).await?;
            let until = if minutes == 0 {
                "until unblocked".to_owned()
            } else {
                format!("for {minutes} minutes")
            };
            util::done(&format!("Device {mac} blocked {until}"), global);
            Ok(())
        }

        DevicesCommand::Unblock { index } => {
            client.unblock_device(&index).await?;
            util::done(&format!("Block rule {index} removed"), global);
            Ok(())
        }
    }
}
