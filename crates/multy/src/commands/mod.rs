//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod firmware;
pub mod mesh;
pub mod nat;
pub mod parental;
pub mod raw;
pub mod speedtest;
pub mod system;
pub mod util;
pub mod wifi;

use multy_api::MultyClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &MultyClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::System(args) => system::handle(client, args, global).await,
        Command::Wifi(args) => wifi::handle(client, args, global).await,
        Command::Speedtest(args) => speedtest::handle(client, args, global).await,
        Command::Devices(args) => devices::handle(client, args, global).await,
        Command::Nat(args) => nat::handle(client, args, global).await,
        Command::Parental(args) => parental::handle(client, args, global).await,
        Command::Mesh(args) => mesh::handle(client, args, global).await,
        Command::Firmware(args) => firmware::handle(client, args, global).await,
        Command::Raw(args) => raw::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not talk to a router".into(),
        }),
    }
}
