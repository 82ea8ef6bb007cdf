// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declared configuration of a virtual machine role.
//!
//! A role arrives either inside a deployment's `RoleList` or on its own as a
//! `PersistentVMRole` document; both carry the same children.

use url::Url;

use super::common::{HostCaching, OsType};
use super::role_size::RoleSizeType;
use crate::error::Result;
use crate::xml::{Field, FromRecord, Record, Schema, XmlEntity};

/// Root element of a role fetched on its own.
pub const PERSISTENT_VM_ROLE: &str = "PersistentVMRole";

// ============================================================================
// Network configuration
// ============================================================================

const INPUT_ENDPOINT: Schema = Schema {
    name: "InputEndpoint",
    fields: &[
        Field::text("LocalPort"),
        Field::text("Name"),
        Field::text("Port"),
        Field::text("Protocol"),
        Field::text("Vip"),
        Field::text("EnableDirectServerReturn"),
        Field::text("LoadBalancedEndpointSetName"),
        Field::text("IdleTimeoutInMinutes"),
    ],
};

/// An externally reachable port mapped onto the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEndpoint {
    pub name: String,
    pub local_port: Option<u16>,
    pub port: Option<u16>,
    pub protocol: Option<String>,
    pub vip: Option<String>,
    pub enable_direct_server_return: Option<bool>,
    pub load_balanced_endpoint_set_name: Option<String>,
    pub idle_timeout_in_minutes: Option<u32>,
}

impl InputEndpoint {
    /// Endpoint forwarding `port` to `local_port` over `protocol`.
    #[must_use]
    pub fn new(name: impl Into<String>, protocol: impl Into<String>, local_port: u16, port: u16) -> Self {
        Self {
            name: name.into(),
            local_port: Some(local_port),
            port: Some(port),
            protocol: Some(protocol.into()),
            vip: None,
            enable_direct_server_return: None,
            load_balanced_endpoint_set_name: None,
            idle_timeout_in_minutes: None,
        }
    }
}

impl FromRecord for InputEndpoint {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            local_port: record.number("LocalPort")?,
            port: record.number("Port")?,
            protocol: record.string("Protocol"),
            vip: record.string("Vip"),
            enable_direct_server_return: record.boolean("EnableDirectServerReturn")?,
            load_balanced_endpoint_set_name: record.string("LoadBalancedEndpointSetName"),
            idle_timeout_in_minutes: record.number("IdleTimeoutInMinutes")?,
        })
    }
}

const PUBLIC_IP: Schema = Schema {
    name: "PublicIP",
    fields: &[Field::text("Name"), Field::text("IdleTimeoutInMinutes")],
};

/// Instance-level public address requested for the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicIP {
    pub name: String,
    pub idle_timeout_in_minutes: Option<u32>,
}

impl FromRecord for PublicIP {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            idle_timeout_in_minutes: record.number("IdleTimeoutInMinutes")?,
        })
    }
}

const CONFIGURATION_SET: Schema = Schema {
    name: "ConfigurationSet",
    fields: &[
        Field::text("ConfigurationSetType"),
        Field::list("InputEndpoints", &INPUT_ENDPOINT),
        Field::texts("SubnetNames", "SubnetName"),
        Field::text("StaticVirtualNetworkIPAddress"),
        Field::list("PublicIPs", &PUBLIC_IP),
        Field::text("NetworkSecurityGroup"),
        Field::text("HostName"),
        Field::text("UserName"),
        Field::text("DisableSshPasswordAuthentication"),
        Field::text("ComputerName"),
        Field::text("AdminUsername"),
    ],
};

/// One configuration set: network layout or OS provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationSet {
    /// `NetworkConfiguration`, `LinuxProvisioningConfiguration` or
    /// `WindowsProvisioningConfiguration`.
    pub configuration_set_type: Option<String>,
    pub input_endpoints: Vec<InputEndpoint>,
    pub subnet_names: Vec<String>,
    pub static_virtual_network_ip_address: Option<String>,
    pub public_ips: Vec<PublicIP>,
    pub network_security_group: Option<String>,
    pub host_name: Option<String>,
    pub user_name: Option<String>,
    pub disable_ssh_password_authentication: Option<bool>,
    pub computer_name: Option<String>,
    pub admin_username: Option<String>,
}

impl FromRecord for ConfigurationSet {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            configuration_set_type: record.string("ConfigurationSetType"),
            input_endpoints: record.list("InputEndpoints")?,
            subnet_names: record.texts("SubnetNames"),
            static_virtual_network_ip_address: record.string("StaticVirtualNetworkIPAddress"),
            public_ips: record.list("PublicIPs")?,
            network_security_group: record.string("NetworkSecurityGroup"),
            host_name: record.string("HostName"),
            user_name: record.string("UserName"),
            disable_ssh_password_authentication: record
                .boolean("DisableSshPasswordAuthentication")?,
            computer_name: record.string("ComputerName"),
            admin_username: record.string("AdminUsername"),
        })
    }
}

// ============================================================================
// Extensions
// ============================================================================

const RESOURCE_EXTENSION_PARAMETER_VALUE: Schema = Schema {
    name: "ResourceExtensionParameterValue",
    fields: &[Field::text("Key"), Field::text("Value"), Field::text("Type")],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceExtensionParameterValue {
    pub key: String,
    pub value: Option<String>,
    /// `Public` or `Private`.
    pub kind: Option<String>,
}

impl FromRecord for ResourceExtensionParameterValue {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            key: record.required("Key")?,
            value: record.string("Value"),
            kind: record.string("Type"),
        })
    }
}

const RESOURCE_EXTENSION_REFERENCE: Schema = Schema {
    name: "ResourceExtensionReference",
    fields: &[
        Field::text("ReferenceName"),
        Field::text("Publisher"),
        Field::text("Name"),
        Field::text("Version"),
        Field::list(
            "ResourceExtensionParameterValues",
            &RESOURCE_EXTENSION_PARAMETER_VALUE,
        ),
        Field::text("State"),
    ],
};

/// An extension installed on the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceExtensionReference {
    pub reference_name: Option<String>,
    pub publisher: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub parameter_values: Vec<ResourceExtensionParameterValue>,
    pub state: Option<String>,
}

impl FromRecord for ResourceExtensionReference {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            reference_name: record.string("ReferenceName"),
            publisher: record.string("Publisher"),
            name: record.required("Name")?,
            version: record.string("Version"),
            parameter_values: record.list("ResourceExtensionParameterValues")?,
            state: record.string("State"),
        })
    }
}

// ============================================================================
// Disks
// ============================================================================

const DATA_VIRTUAL_HARD_DISK: Schema = Schema {
    name: "DataVirtualHardDisk",
    fields: &[
        Field::text("HostCaching"),
        Field::text("DiskLabel"),
        Field::text("DiskName"),
        Field::text("Lun"),
        Field::text("LogicalDiskSizeInGB"),
        Field::text("MediaLink"),
        Field::text("IOType"),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataVirtualHardDisk {
    pub host_caching: Option<HostCaching>,
    pub disk_label: Option<String>,
    pub disk_name: Option<String>,
    pub lun: Option<u32>,
    pub logical_disk_size_in_gb: Option<u32>,
    pub media_link: Option<Url>,
    pub io_type: Option<String>,
}

impl FromRecord for DataVirtualHardDisk {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            host_caching: record.enumeration("HostCaching"),
            disk_label: record.string("DiskLabel"),
            disk_name: record.string("DiskName"),
            lun: record.number("Lun")?,
            logical_disk_size_in_gb: record.number("LogicalDiskSizeInGB")?,
            media_link: record.uri("MediaLink")?,
            io_type: record.string("IOType"),
        })
    }
}

const OS_VIRTUAL_HARD_DISK: Schema = Schema {
    name: "OSVirtualHardDisk",
    fields: &[
        Field::text("HostCaching"),
        Field::text("DiskLabel"),
        Field::text("DiskName"),
        Field::text("MediaLink"),
        Field::text("SourceImageName"),
        Field::text("OS"),
        Field::text("RemoteSourceImageLink"),
        Field::text("ResizedSizeInGB"),
        Field::text("IOType"),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OSVirtualHardDisk {
    pub host_caching: Option<HostCaching>,
    pub disk_label: Option<String>,
    pub disk_name: Option<String>,
    pub media_link: Option<Url>,
    pub source_image_name: Option<String>,
    pub os: Option<OsType>,
    pub remote_source_image_link: Option<Url>,
    pub resized_size_in_gb: Option<u32>,
    pub io_type: Option<String>,
}

impl FromRecord for OSVirtualHardDisk {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            host_caching: record.enumeration("HostCaching"),
            disk_label: record.string("DiskLabel"),
            disk_name: record.string("DiskName"),
            media_link: record.uri("MediaLink")?,
            source_image_name: record.string("SourceImageName"),
            os: record.enumeration("OS"),
            remote_source_image_link: record.uri("RemoteSourceImageLink")?,
            resized_size_in_gb: record.number("ResizedSizeInGB")?,
            io_type: record.string("IOType"),
        })
    }
}

// ============================================================================
// Role
// ============================================================================

pub(crate) const ROLE: Schema = Schema {
    name: "Role",
    fields: &[
        Field::text("RoleName"),
        Field::text("OsVersion"),
        Field::text("RoleType"),
        Field::list("ConfigurationSets", &CONFIGURATION_SET),
        Field::list(
            "ResourceExtensionReferences",
            &RESOURCE_EXTENSION_REFERENCE,
        ),
        Field::text("AvailabilitySetName"),
        Field::list("DataVirtualHardDisks", &DATA_VIRTUAL_HARD_DISK),
        Field::entity("OSVirtualHardDisk", &OS_VIRTUAL_HARD_DISK),
        Field::text("RoleSize"),
        Field::text("ProvisionGuestAgent"),
        Field::text("DefaultWinRmCertificateThumbprint"),
    ],
};

/// Declared configuration of one virtual machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub role_name: String,
    pub os_version: Option<String>,
    pub role_type: Option<String>,
    pub configuration_sets: Vec<ConfigurationSet>,
    pub resource_extension_references: Vec<ResourceExtensionReference>,
    pub availability_set_name: Option<String>,
    pub data_virtual_hard_disks: Vec<DataVirtualHardDisk>,
    pub os_virtual_hard_disk: Option<OSVirtualHardDisk>,
    pub role_size: Option<RoleSizeType>,
    pub provision_guest_agent: Option<bool>,
    pub default_win_rm_certificate_thumbprint: Option<String>,
}

impl FromRecord for Role {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            role_name: record.required("RoleName")?,
            os_version: record.string("OsVersion"),
            role_type: record.string("RoleType"),
            configuration_sets: record.list("ConfigurationSets")?,
            resource_extension_references: record.list("ResourceExtensionReferences")?,
            availability_set_name: record.string("AvailabilitySetName"),
            data_virtual_hard_disks: record.list("DataVirtualHardDisks")?,
            os_virtual_hard_disk: record.child("OSVirtualHardDisk")?,
            role_size: record.enumeration("RoleSize"),
            provision_guest_agent: record.boolean("ProvisionGuestAgent")?,
            default_win_rm_certificate_thumbprint: record
                .string("DefaultWinRmCertificateThumbprint"),
        })
    }
}

impl XmlEntity for Role {
    const SCHEMA: &'static Schema = &ROLE;
}
