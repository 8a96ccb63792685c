//! Mesh node command handlers.

use multy_api::{LedState, MultyClient};

use crate::cli::{GlobalOpts, LedArg, MeshArgs, MeshCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: MeshArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MeshCommand::List => {
            let payload = client.get_mesh_devices_state().await?;
            output::print_value(global.output, &payload, global.quiet)
        }

        MeshCommand::Restart { mac } => {
            if !util::confirm(&format!("Reboot mesh node {mac}?"), global)? {
                return Ok(());
            }
            client.restart_mesh_node(&mac).await?;
            util::done(&format!("Mesh node {mac} restarting"), global);
            Ok(())
        }

        MeshCommand::Led {
            mac,
            state,
            brightness,
        } => {
            let state = match state {
                LedArg::On => LedState::On,
                LedArg::Off => LedState::Off,
            };
            let brightness = brightness.unwrap_or(match state {
                LedState::On => 100,
                LedState::Off => 0,
            });
            client.switch_led(&mac, state, brightness).await?;
            util::done(&format!("LED on {mac} switched {state}"), global);
            Ok(())
        }

        MeshCommand::Rename { mac, name } => {
            client.rename_mesh_node(&mac, &name).await?;
            util::done(&format!("Mesh node {mac} renamed to '{name}'"), global);
            Ok(())
        }
    }
}
