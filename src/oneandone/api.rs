// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{ActionMethod, Server, ServerAction, StatusAction};
use crate::client::{parse_json, to_json, ApiClient, Call, ClientConfig, Transport};
use crate::error::Result;

/// Servers of one 1&1 account.
#[derive(Debug)]
pub struct OneAndOneApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> OneAndOneApi<T> {
    /// `config` points at the API root, for example
    /// `https://cloudpanel-api.1and1.com/v1`, with the `x-token` header set.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            client: ApiClient::new(transport, config),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_servers(&self) -> Result<Vec<Server>> {
        self.client
            .list_or_empty(&Call::get(&["servers"]), parse_json::<Vec<Server>>)
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_server(&self, id: &str) -> Result<Option<Server>> {
        self.client
            .get_or_none(&Call::get(&["servers", id]), parse_json::<Server>)
            .await
    }

    /// `false` when the server does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any other provider fault.
    pub async fn delete_server(&self, id: &str) -> Result<bool> {
        self.client.succeeded(&Call::delete(&["servers", id])).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn power_on(&self, id: &str) -> Result<bool> {
        self.update_status(id, ServerAction::PowerOn, ActionMethod::Software)
            .await
    }

    /// Graceful power off.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn power_off(&self, id: &str) -> Result<bool> {
        self.update_status(id, ServerAction::PowerOff, ActionMethod::Software)
            .await
    }

    /// Request a power transition; `false` when the server does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault other than 404.
    pub async fn update_status(
        &self,
        id: &str,
        action: ServerAction,
        method: ActionMethod,
    ) -> Result<bool> {
        let body = to_json(&StatusAction { action, method })?;
        let call = Call::put(&["servers", id, "status", "action"]).with_json(body);
        self.client.succeeded(&call).await
    }
}
