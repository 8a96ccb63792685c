//! Firmware command handlers.

use multy_api::MultyClient;

use crate::cli::{FirmwareArgs, FirmwareCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: FirmwareArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let payload = match args.command {
        FirmwareCommand::Check => client.firmware_check().await?,
        FirmwareCommand::CheckStatus => client.firmware_check_status().await?,
        FirmwareCommand::DownloadStatus => client.firmware_download_status().await?,
        FirmwareCommand::UpgradeStatus => client.firmware_upgrade_status().await?,

        FirmwareCommand::Download => {
            client.firmware_download().await?;
            util::done("Firmware download started", global);
            return Ok(());
        }

        FirmwareCommand::Upgrade => {
            if !util::confirm(
                "Flash the downloaded firmware? The router reboots when done.",
                global,
            )? {
                return Ok(());
            }
            client.firmware_upgrade().await?;
            util::done("Firmware upgrade started", global);
            return Ok(());
        }
    };

    output::print_value(global.output, &payload, global.quiet)
}
