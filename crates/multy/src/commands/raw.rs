//! Raw ZAPI request handlers.

use multy_api::MultyClient;

use crate::cli::{GlobalOpts, RawArgs, RawCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &MultyClient,
    args: RawArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let payload = match args.command {
        RawCommand::Rpc {
            namespace,
            root,
            payload,
        } => {
            let payload = util::parse_payload(payload.as_deref())?;
            client.rpc(&namespace, &root, payload).await?
        }
        RawCommand::GetConfig { namespace, root } => client.get_config(&namespace, &root).await?,
        RawCommand::EditConfig {
            namespace,
            root,
            payload,
        } => {
            let payload = util::parse_payload(payload.as_deref())?;
            client.edit_config(&namespace, &root, payload).await?
        }
    };

    output::print_value(global.output, &payload, global.quiet)
}
