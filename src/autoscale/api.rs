// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Group, GroupEnvelope, GroupState, Groups, StateEnvelope};
use crate::client::{parse_json, ApiClient, Call, ClientConfig, Transport};
use crate::error::Result;

/// Scaling groups of one Rackspace tenant.
#[derive(Debug)]
pub struct AutoscaleApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> AutoscaleApi<T> {
    /// `config` points at the tenant endpoint, for example
    /// `https://ord.autoscale.api.rackspacecloud.com/v1.0/829409`.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            client: ApiClient::new(transport, config),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Groups with their state; configurations are not included.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        self.client
            .list_or_empty(&Call::get(&["groups"]), |body| {
                Ok(parse_json::<Groups>(body)?.groups)
            })
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_group(&self, id: &str) -> Result<Option<Group>> {
        self.client
            .get_or_none(&Call::get(&["groups", id]), |body| {
                Ok(parse_json::<GroupEnvelope>(body)?.group)
            })
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_group_state(&self, id: &str) -> Result<Option<GroupState>> {
        self.client
            .get_or_none(&Call::get(&["groups", id, "state"]), |body| {
                Ok(parse_json::<StateEnvelope>(body)?.group)
            })
            .await
    }

    /// Stop scaling policies from executing.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn pause_group(&self, id: &str) -> Result<bool> {
        self.client.succeeded(&Call::post(&["groups", id, "pause"])).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn resume_group(&self, id: &str) -> Result<bool> {
        self.client.succeeded(&Call::post(&["groups", id, "resume"])).await
    }

    /// Delete an empty group; `false` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any other provider fault, including a group that
    /// still has servers.
    pub async fn delete_group(&self, id: &str) -> Result<bool> {
        self.client.succeeded(&Call::delete(&["groups", id])).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn execute_policy(&self, group: &str, policy: &str) -> Result<bool> {
        let call = Call::post(&["groups", group, "policies", policy, "execute"]);
        self.client.succeeded(&call).await
    }
}
