// ZAPI speed-test endpoints

use chrono::Utc;
use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

impl MultyClient {
    /// Start a WAN speed test. The run is identified by the current Unix
    /// time; poll [`get_speed_test_result`](Self::get_speed_test_result)
    /// for the outcome.
    pub async fn start_speed_test(&self) -> Result<Value, Error> {
        let test_id = Utc::now().timestamp().to_string();
        debug!(%test_id, "starting speed test");
        self.call(
            Operation::Rpc,
            ns::SPEED_TEST,
            "speed-test",
            Some(json!({
                "input": {
                    "originator": 1,
                    "device-mac": "",
                    "test-id": test_id,
                    "target": "Internet",
                }
            })),
        )
        .await
    }

    pub async fn get_speed_test_result(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::SPEED_TEST, "test-result", None)
            .await
    }

    pub async fn get_speed_test_history(&self) -> Result<Value, Error> {
        self.query(Operation::Rpc, ns::SPEED_TEST, "test-history", None)
            .await
    }
}
