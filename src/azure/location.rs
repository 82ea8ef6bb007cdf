// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::xml::{Field, FromRecord, Record, Schema, XmlCollection, XmlEntity};

const COMPUTE_CAPABILITIES: Schema = Schema {
    name: "ComputeCapabilities",
    fields: &[
        Field::texts("VirtualMachinesRoleSizes", "RoleSize"),
        Field::texts("WebWorkerRoleSizes", "RoleSize"),
    ],
};

/// Role sizes offered in a location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputeCapabilities {
    pub virtual_machine_role_sizes: Vec<String>,
    pub web_worker_role_sizes: Vec<String>,
}

impl FromRecord for ComputeCapabilities {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            virtual_machine_role_sizes: record.texts("VirtualMachinesRoleSizes"),
            web_worker_role_sizes: record.texts("WebWorkerRoleSizes"),
        })
    }
}

const LOCATION: Schema = Schema {
    name: "Location",
    fields: &[
        Field::text("Name"),
        Field::text("DisplayName"),
        Field::texts("AvailableServices", "AvailableService"),
        Field::entity("ComputeCapabilities", &COMPUTE_CAPABILITIES),
    ],
};

/// A data center region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub display_name: Option<String>,
    /// Service families such as `Compute`, `Storage` or `PersistentVMRole`.
    pub available_services: Vec<String>,
    pub compute_capabilities: Option<ComputeCapabilities>,
}

impl FromRecord for Location {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            display_name: record.string("DisplayName"),
            available_services: record.texts("AvailableServices"),
            compute_capabilities: record.child("ComputeCapabilities")?,
        })
    }
}

impl XmlEntity for Location {
    const SCHEMA: &'static Schema = &LOCATION;
}

impl XmlCollection for Location {
    const COLLECTION: &'static str = "Locations";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_list;

    #[test]
    fn test_parse_locations_fixture() {
        let locations: Vec<Location> =
            parse_list(include_bytes!("../../tests/fixtures/azure/locations.xml")).unwrap();
        assert_eq!(
            locations,
            vec![
                Location {
                    name: "West Europe".to_string(),
                    display_name: Some("West Europe".to_string()),
                    available_services: vec![
                        "Compute".to_string(),
                        "Storage".to_string(),
                        "PersistentVMRole".to_string(),
                        "HighMemory".to_string(),
                    ],
                    compute_capabilities: Some(ComputeCapabilities {
                        virtual_machine_role_sizes: vec![
                            "A5".to_string(),
                            "Basic_A0".to_string(),
                            "Standard_D1".to_string(),
                        ],
                        web_worker_role_sizes: vec!["A5".to_string(), "Small".to_string()],
                    }),
                },
                Location {
                    name: "Brazil South".to_string(),
                    display_name: Some("Brazil South".to_string()),
                    available_services: vec!["Compute".to_string()],
                    compute_capabilities: None,
                },
            ]
        );
    }
}
