//! Parental control command handlers.

use multy_api::MultyClient;

use crate::cli::{GlobalOpts, ParentalArgs, ParentalCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: ParentalArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ParentalCommand::Block { profile } => {
            client.parental_block(&profile).await?;
            util::done(&format!("Profile {profile} blocked"), global);
        }
        ParentalCommand::Unblock { profile } => {
            client.parental_unblock(&profile).await?;
            util::done(&format!("Profile {profile} unblocked"), global);
        }
        ParentalCommand::Bonus { profile, minutes } => {
            client.parental_bonus(&profile, minutes).await?;
            util::done(
                &format!("Profile {profile} granted {minutes} extra minutes"),
                global,
            );
        }
    }
    Ok(())
}
