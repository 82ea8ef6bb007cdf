// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::xml::{xml_enum, Field, FromRecord, Record, Schema, XmlCollection, XmlEntity};

xml_enum! {
    /// Virtual machine sizes offered by Service Management.
    pub enum RoleSizeType {
        ExtraSmall => "ExtraSmall",
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
        ExtraLarge => "ExtraLarge",
        A5 => "A5",
        A6 => "A6",
        A7 => "A7",
        A8 => "A8",
        A9 => "A9",
        A10 => "A10",
        A11 => "A11",
        BasicA0 => "Basic_A0",
        BasicA1 => "Basic_A1",
        BasicA2 => "Basic_A2",
        BasicA3 => "Basic_A3",
        BasicA4 => "Basic_A4",
        StandardD1 => "Standard_D1",
        StandardD2 => "Standard_D2",
        StandardD3 => "Standard_D3",
        StandardD4 => "Standard_D4",
        StandardD11 => "Standard_D11",
        StandardD12 => "Standard_D12",
        StandardD13 => "Standard_D13",
        StandardD14 => "Standard_D14",
        StandardD1V2 => "Standard_D1_v2",
        StandardD2V2 => "Standard_D2_v2",
        StandardD3V2 => "Standard_D3_v2",
        StandardD4V2 => "Standard_D4_v2",
        StandardD5V2 => "Standard_D5_v2",
        StandardD11V2 => "Standard_D11_v2",
        StandardD12V2 => "Standard_D12_v2",
        StandardD13V2 => "Standard_D13_v2",
        StandardD14V2 => "Standard_D14_v2",
        StandardDs1 => "Standard_DS1",
        StandardDs2 => "Standard_DS2",
        StandardDs3 => "Standard_DS3",
        StandardDs4 => "Standard_DS4",
        StandardDs11 => "Standard_DS11",
        StandardDs12 => "Standard_DS12",
        StandardDs13 => "Standard_DS13",
        StandardDs14 => "Standard_DS14",
        StandardG1 => "Standard_G1",
        StandardG2 => "Standard_G2",
        StandardG3 => "Standard_G3",
        StandardG4 => "Standard_G4",
        StandardG5 => "Standard_G5",
    }
}

const ROLE_SIZE: Schema = Schema {
    name: "RoleSize",
    fields: &[
        Field::text("Name"),
        Field::text("Label"),
        Field::text("Cores"),
        Field::text("MemoryInMb"),
        Field::text("SupportedByWebWorkerRoles"),
        Field::text("SupportedByVirtualMachines"),
        Field::text("MaxDataDiskCount"),
        Field::text("WebWorkerResourceDiskSizeInMb"),
        Field::text("VirtualMachineResourceDiskSizeInMb"),
    ],
};

/// Capacity of one role size, as listed for the subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSize {
    pub name: RoleSizeType,
    pub label: Option<String>,
    pub cores: Option<u32>,
    pub memory_in_mb: Option<u32>,
    pub supported_by_web_worker_roles: Option<bool>,
    pub supported_by_virtual_machines: Option<bool>,
    pub max_data_disk_count: Option<u32>,
    pub web_worker_resource_disk_size_in_mb: Option<u32>,
    pub virtual_machine_resource_disk_size_in_mb: Option<u32>,
}

impl FromRecord for RoleSize {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record
                .enumeration("Name")
                .unwrap_or(RoleSizeType::Unrecognized),
            label: record.string("Label"),
            cores: record.number("Cores")?,
            memory_in_mb: record.number("MemoryInMb")?,
            supported_by_web_worker_roles: record.boolean("SupportedByWebWorkerRoles")?,
            supported_by_virtual_machines: record.boolean("SupportedByVirtualMachines")?,
            max_data_disk_count: record.number("MaxDataDiskCount")?,
            web_worker_resource_disk_size_in_mb: record.number("WebWorkerResourceDiskSizeInMb")?,
            virtual_machine_resource_disk_size_in_mb: record
                .number("VirtualMachineResourceDiskSizeInMb")?,
        })
    }
}

impl XmlEntity for RoleSize {
    const SCHEMA: &'static Schema = &ROLE_SIZE;
}

impl XmlCollection for RoleSize {
    const COLLECTION: &'static str = "RoleSizes";
}
