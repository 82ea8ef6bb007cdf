// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reserved IPs, network security groups and virtual networks.

use crate::azure::network::subnet_association_xml;
use crate::azure::{
    NetworkSecurityGroup, NetworkSecurityGroupParams, ReservedIPAddress, ReservedIPAddressParams,
    RuleParams, VirtualNetworkSite,
};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

const RESERVED_IPS: [&str; 3] = ["services", "networking", "reservedips"];
const SECURITY_GROUPS: [&str; 3] = ["services", "networking", "networksecuritygroups"];
const VIRTUAL_NETWORKS: [&str; 3] = ["services", "networking", "virtualnetwork"];

fn path<'p>(base: &[&'p str], tail: &[&'p str]) -> Vec<&'p str> {
    base.iter().chain(tail).copied().collect()
}

/// Reserved public IP addresses.
#[derive(Debug)]
pub struct ReservedIPAddressApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ReservedIPAddressApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<ReservedIPAddress>> {
        self.client
            .list_or_empty(&Call::get(&RESERVED_IPS), xml::parse_list::<ReservedIPAddress>)
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<ReservedIPAddress>> {
        self.client
            .get_or_none(
                &Call::get(&path(&RESERVED_IPS, &[name])),
                xml::parse::<ReservedIPAddress>,
            )
            .await
    }

    /// Reserve an address; returns the request id.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn create(&self, params: &ReservedIPAddressParams) -> Result<String> {
        let call = Call::post(&RESERVED_IPS).with_xml(params.to_xml()?);
        self.client.accepted(&call).await
    }

    /// Release an address. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault, for example an address in use.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        self.client
            .accepted_or_none(&Call::delete(&path(&RESERVED_IPS, &[name])))
            .await
    }
}

/// Network security groups and their rules.
#[derive(Debug)]
pub struct NetworkSecurityGroupApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> NetworkSecurityGroupApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Groups without their rules.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<NetworkSecurityGroup>> {
        self.client
            .list_or_empty(
                &Call::get(&SECURITY_GROUPS),
                xml::parse_list::<NetworkSecurityGroup>,
            )
            .await
    }

    /// A group with its rules (`detaillevel=Full`).
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<NetworkSecurityGroup>> {
        let call = Call::get(&path(&SECURITY_GROUPS, &[name])).with_query("detaillevel", "Full");
        self.client
            .get_or_none(&call, xml::parse::<NetworkSecurityGroup>)
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn create(&self, params: &NetworkSecurityGroupParams) -> Result<String> {
        let call = Call::post(&SECURITY_GROUPS).with_xml(params.to_xml()?);
        self.client.accepted(&call).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        self.client
            .accepted_or_none(&Call::delete(&path(&SECURITY_GROUPS, &[name])))
            .await
    }

    /// Add or replace a rule of a group. `None` if the group does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule is invalid or on a provider fault.
    pub async fn set_rule(
        &self,
        group: &str,
        rule: &str,
        params: &RuleParams,
    ) -> Result<Option<String>> {
        let call = Call::put(&path(&SECURITY_GROUPS, &[group, "rules", rule]))
            .with_xml(params.to_xml()?);
        self.client.accepted_or_none(&call).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete_rule(&self, group: &str, rule: &str) -> Result<Option<String>> {
        self.client
            .accepted_or_none(&Call::delete(&path(&SECURITY_GROUPS, &[group, "rules", rule])))
            .await
    }

    /// The group associated with a subnet; `None` when the subnet has none.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn for_subnet(
        &self,
        virtual_network: &str,
        subnet: &str,
    ) -> Result<Option<NetworkSecurityGroup>> {
        let call = Call::get(&subnet_path(virtual_network, subnet));
        self.client
            .get_or_none(&call, xml::parse::<NetworkSecurityGroup>)
            .await
    }

    /// Associate a group with a subnet. `None` if the subnet does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn add_to_subnet(
        &self,
        virtual_network: &str,
        subnet: &str,
        group: &str,
    ) -> Result<Option<String>> {
        let call = Call::post(&subnet_path(virtual_network, subnet))
            .with_xml(subnet_association_xml(group)?);
        self.client.accepted_or_none(&call).await
    }
}

fn subnet_path<'p>(virtual_network: &'p str, subnet: &'p str) -> Vec<&'p str> {
    path(
        &VIRTUAL_NETWORKS,
        &[virtual_network, "subnets", subnet, "networksecuritygroups"],
    )
}

/// Virtual network sites of the subscription.
#[derive(Debug)]
pub struct VirtualNetworkApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> VirtualNetworkApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<VirtualNetworkSite>> {
        self.client
            .list_or_empty(
                &Call::get(&VIRTUAL_NETWORKS),
                xml::parse_list::<VirtualNetworkSite>,
            )
            .await
    }
}
