//! Port forwarding command handlers.

use multy_api::{ForwardProtocol, MultyClient, PortForwardRule};

use crate::cli::{GlobalOpts, NatArgs, NatCommand, ProtocolArg};
use crate::error::CliError;

use super::util;

impl From<ProtocolArg> for ForwardProtocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Tcp => Self::Tcp,
            ProtocolArg::Udp => Self::Udp,
            ProtocolArg::All => Self::All,
        }
    }
}

pub async fn handle(
    client: &MultyClient,
    args: NatArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NatCommand::Add {
            service,
            protocol,
            external_port,
            external_port_end,
            internal_port,
            local_ip,
        } => {
            if let Some(end) = external_port_end {
                if end < external_port {
                    return Err(CliError::Validation {
                        field: "external-port-end".into(),
                        reason: format!("{end} is below the start port {external_port}"),
                    });
                }
            }

            let rule = PortForwardRule {
                service,
                protocol: protocol.into(),
                external_port,
                external_port_end,
                internal_port,
                local_ip,
            };
            client.add_port_forward(&rule).await?;
            util::done(
                &format!(
                    "Forwarding port {} to {}:{}",
                    rule.external_port, rule.local_ip, rule.internal_port
                ),
                global,
            );
        }

        NatCommand::Remove { index } => {
            client.remove_port_forward(index).await?;
            util::done(&format!("Port forward rule {index} removed"), global);
        }
    }
    Ok(())
}
