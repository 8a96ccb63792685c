//! System command handlers.

use multy_api::MultyClient;

use crate::cli::{GlobalOpts, SystemArgs, SystemCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: SystemArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let payload = match args.command {
        SystemCommand::Info => client.get_system_info().await?,
        SystemCommand::State => client.get_system_state().await?,
        SystemCommand::Version => client.get_api_version().await?,
        SystemCommand::Bandwidth => client.get_current_bandwidth().await?,
        SystemCommand::Ports => client.get_port_state().await?,

        SystemCommand::Restart => {
            if !util::confirm("Reboot the router?", global)? {
                return Ok(());
            }
            client.system_restart().await?;
            util::done("Router restart initiated", global);
            return Ok(());
        }

        SystemCommand::Shutdown => {
            if !util::confirm(
                "Power off the router? It cannot be turned back on remotely.",
                global,
            )? {
                return Ok(());
            }
            client.system_shutdown().await?;
            util::done("Router shutdown initiated", global);
            return Ok(());
        }

        SystemCommand::Wol { mac } => {
            client.wake_on_lan(&mac).await?;
            util::done(&format!("Wake-on-LAN sent to {mac}"), global);
            return Ok(());
        }
    };

    output::print_value(global.output, &payload, global.quiet)
}
