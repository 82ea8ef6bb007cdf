// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::azure::{
    CaptureParams, PostShutdownAction, Role, RoleOperation, PERSISTENT_VM_ROLE,
};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

/// Virtual machine roles of one deployment.
#[derive(Debug)]
pub struct VirtualMachineApi<'a, T> {
    client: &'a ApiClient<T>,
    service: &'a str,
    deployment: &'a str,
}

impl<'a, T: Transport> VirtualMachineApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>, service: &'a str, deployment: &'a str) -> Self {
        Self {
            client,
            service,
            deployment,
        }
    }

    fn role_path<'p>(&'p self, collection: &'p str, role: &'p str) -> [&'p str; 7] {
        [
            "services",
            "hostedservices",
            self.service,
            "deployments",
            self.deployment,
            collection,
            role,
        ]
    }

    /// Declared configuration of a role, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, role: &str) -> Result<Option<Role>> {
        self.client
            .get_or_none(&Call::get(&self.role_path("roles", role)), |body| {
                xml::parse_as::<Role>(body, PERSISTENT_VM_ROLE)
            })
            .await
    }

    /// Post a lifecycle operation to a role instance. `None` if the role
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn execute(&self, role: &str, operation: &RoleOperation) -> Result<Option<String>> {
        let mut segments = self.role_path("roleinstances", role).to_vec();
        segments.push("Operations");
        let call = Call::post(&segments).with_xml(operation.to_xml()?);
        self.client.accepted_or_none(&call).await
    }

    /// # Errors
    ///
    /// See [`VirtualMachineApi::execute`].
    pub async fn start(&self, role: &str) -> Result<Option<String>> {
        self.execute(role, &RoleOperation::Start).await
    }

    /// Shut a role down, keeping its compute resources allocated.
    ///
    /// # Errors
    ///
    /// See [`VirtualMachineApi::execute`].
    pub async fn shutdown(&self, role: &str) -> Result<Option<String>> {
        self.shutdown_with(role, PostShutdownAction::Stopped).await
    }

    /// # Errors
    ///
    /// See [`VirtualMachineApi::execute`].
    pub async fn shutdown_with(
        &self,
        role: &str,
        action: PostShutdownAction,
    ) -> Result<Option<String>> {
        self.execute(role, &RoleOperation::Shutdown(action)).await
    }

    /// # Errors
    ///
    /// See [`VirtualMachineApi::execute`].
    pub async fn restart(&self, role: &str) -> Result<Option<String>> {
        self.execute(role, &RoleOperation::Restart).await
    }

    /// Capture the role's OS disk into an OS image.
    ///
    /// # Errors
    ///
    /// See [`VirtualMachineApi::execute`].
    pub async fn capture(&self, role: &str, params: CaptureParams) -> Result<Option<String>> {
        self.execute(role, &RoleOperation::Capture(params)).await
    }

    /// Delete a role and its VHD blobs. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, role: &str) -> Result<Option<String>> {
        let call = Call::delete(&self.role_path("roles", role)).with_query("comp", "media");
        self.client.accepted_or_none(&call).await
    }
}
