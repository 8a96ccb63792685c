//! Wi-Fi command handlers.

use multy_api::{MultyClient, WifiSettings};
use serde_json::json;

use crate::cli::{GlobalOpts, WifiArgs, WifiCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: WifiArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WifiCommand::Status => {
            let wan = client.is_wan_connected().await?;
            let internet = client.get_internet_status().await?;
            let status = json!({ "wan": wan, "internet": internet });
            output::print_value(global.output, &status, global.quiet)
        }

        WifiCommand::Show { network } => {
            let payload = client.get_wifi_config(&network).await?;
            output::print_value(global.output, &payload, global.quiet)
        }

        WifiCommand::Set {
            network,
            ssid,
            ssid_5g,
            password,
        } => {
            let mut settings = WifiSettings::for_network(network);
            if let Some(ssid) = ssid {
                settings = settings.ssid(ssid);
            }
            if let Some(ssid) = ssid_5g {
                settings = settings.ssid_5g(ssid);
            }
            if password {
                let pass = rpassword::prompt_password("New Wi-Fi password: ")?;
                if pass.len() < 8 {
                    return Err(CliError::Validation {
                        field: "password".into(),
                        reason: "WPA passphrases need at least 8 characters".into(),
                    });
                }
                settings = settings.password(pass);
            }

            if settings.ssid.is_none() && settings.ssid_5g.is_none() && settings.psk.is_none() {
                return Err(CliError::Validation {
                    field: "wifi".into(),
                    reason: "nothing to change; pass --ssid, --ssid-5g or --password".into(),
                });
            }

            client.set_wifi(&settings).await?;
            util::done(
                &format!("Wi-Fi network '{}' updated", settings.network),
                global,
            );
            Ok(())
        }
    }
}
