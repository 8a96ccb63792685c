//! Speed test command handlers.

use multy_api::MultyClient;

use crate::cli::{GlobalOpts, SpeedtestArgs, SpeedtestCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: SpeedtestArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let payload = match args.command {
        SpeedtestCommand::Start => {
            client.start_speed_test().await?;
            util::done(
                "Speed test started; check `multy speedtest result` in a minute",
                global,
            );
            return Ok(());
        }
        SpeedtestCommand::Result => client.get_speed_test_result().await?,
        SpeedtestCommand::History => client.get_speed_test_history().await?,
    };

    output::print_value(global.output, &payload, global.quiet)
}
