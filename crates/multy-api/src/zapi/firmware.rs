// ZAPI firmware endpoints
//
// Online upgrade runs in three asynchronous stages on the router: check,
// download, upgrade. Each stage is started by one RPC and polled through
// its `-status` companion.

use serde_json::Value;
use tracing::{debug, info};

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

impl MultyClient {
    /// Ask the router to look for a newer firmware online.
    pub async fn firmware_check(&self) -> Result<Value, Error> {
        debug!("checking for firmware updates");
        self.query(Operation::Rpc, ns::FIRMWARE, "on-line-check", None)
            .await
    }

    pub async fn firmware_check_status(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::FIRMWARE, "on-line-check-status", None)
            .await
    }

    pub async fn firmware_download(&self) -> Result<Value, Error> {
        info!("starting firmware download");
        self.call(Operation::Rpc, ns::FIRMWARE, "on-line-download", None)
            .await
    }

    pub async fn firmware_download_status(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::FIRMWARE, "on-line-download-status", None)
            .await
    }

    /// Flash the downloaded image. The router reboots when done.
    pub async fn firmware_upgrade(&self) -> Result<Value, Error> {
        info!("starting firmware upgrade");
        self.call(Operation::Rpc, ns::FIRMWARE, "on-line-upgrade", None)
            .await
    }

    pub async fn firmware_upgrade_status(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::FIRMWARE, "on-line-upgrade-status", None)
            .await
    }
}
