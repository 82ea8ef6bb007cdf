// SPDX-License-Identifier: MIT OR Apache-2.0

//! Azure classic Service Management (compute) domain.
//!
//! Every response document maps onto an immutable value type. Repeating
//! groups default to empty vectors, optional scalars to `None`, and enum
//! text the library does not know to the `Unrecognized` variant. Request
//! payloads are rendered by the `*Params` builders.
//!
//! [`AzureComputeApi`] binds the types to their REST operations.

mod affinity_group;
pub mod api;
mod certificate;
mod cloud_service;
mod common;
mod deployment;
mod disk;
mod error;
mod image;
mod location;
mod network;
mod operation;
mod role;
mod role_size;
mod storage;
mod traffic_manager;
mod virtual_machine;

pub use affinity_group::{AffinityGroup, AffinityGroupParams, ServiceReference};
pub use api::AzureComputeApi;
pub use certificate::ServiceCertificate;
pub use cloud_service::{Availability, CloudService, CloudServiceParams, CloudServiceProperties};
pub use common::{HostCaching, OsType, ServiceStatus};
pub use deployment::{
    Deployment, DeploymentParams, DeploymentSlot, DeploymentStatus, InstanceEndpoint,
    InstanceStatus, PowerState, RoleInstance, VirtualIP,
};
pub use disk::{Attachment, Disk, DiskParams};
pub use error::{Error, ErrorCode};
pub use image::{
    DataDiskConfiguration, ImageCategory, OSDiskConfiguration, OSImage, OSImageParams, OSState,
    VMImage,
};
pub use location::{ComputeCapabilities, Location};
pub use network::{
    AddressSpace, NetworkSecurityGroup, NetworkSecurityGroupParams, ReservedIPAddress,
    ReservedIPAddressParams, ReservedIPState, Rule, RuleAction, RuleParams, RuleProtocol,
    RuleType, Subnet, VirtualNetworkSite,
};
pub use operation::{Operation, OperationStatus};
pub use role::{
    ConfigurationSet, DataVirtualHardDisk, InputEndpoint, OSVirtualHardDisk, PublicIP,
    ResourceExtensionParameterValue, ResourceExtensionReference, Role, PERSISTENT_VM_ROLE,
};
pub use role_size::{RoleSize, RoleSizeType};
pub use storage::{
    AccountType, RegionStatus, StorageService, StorageServiceKeys, StorageServiceParams,
    StorageServiceProperties,
};
pub use traffic_manager::{
    DefinitionSummary, EndpointType, LoadBalancingMethod, MonitorStatus, Profile,
    ProfileDefinition, ProfileDefinitionEndpoint, ProfileDefinitionMonitor, ProfileStatus,
};
pub use virtual_machine::{CaptureParams, PostCaptureAction, PostShutdownAction, RoleOperation};
