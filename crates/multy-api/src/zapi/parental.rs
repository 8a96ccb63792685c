// ZAPI parental-control endpoints
//
// Profiles are addressed by their index in the router's profile table,
// sent as a string.

use serde_json::{Value, json};
use tracing::debug;

use super::client::MultyClient;
use super::envelope::Operation;
use super::ns;
use crate::error::Error;

impl MultyClient {
    pub async fn parental_block(&self, profile: &str) -> Result<Value, Error> {
        debug!(profile, "blocking parental profile");
        self.profile_action("block", json!({ "index": profile }))
            .await
    }

    pub async fn parental_unblock(&self, profile: &str) -> Result<Value, Error> {
        debug!(profile, "unblocking parental profile");
        self.profile_action("unblock", json!({ "index": profile }))
            .await
    }

    /// Grant `minutes` of extra time to `profile`.
    pub async fn parental_bonus(&self, profile: &str, minutes: u32) -> Result<Value, Error> {
        debug!(profile, minutes, "granting parental bonus time");
        self.profile_action("bonus", json!({ "index": profile, "minute": minutes }))
            .await
    }

    async fn profile_action(&self, root: &str, input: Value) -> Result<Value, Error> {
        self.call(
            Operation::Rpc,
            ns::PARENTAL,
            root,
            Some(json!({ "input": input })),
        )
        .await
    }
}
