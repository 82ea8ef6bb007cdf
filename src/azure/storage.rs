// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage accounts.
//!
//! Storage documents carry their timestamps with fractional seconds, so they
//! are read with [`TimestampFormat::DateOrSeconds`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use url::Url;

use super::common::{extended_properties, write_extended_properties, ServiceStatus, EXTENDED_PROPERTY};
use crate::error::{CloudError, Result};
use crate::xml::{
    xml_enum, Field, FromRecord, Record, Schema, TimestampFormat, XmlCollection, XmlEntity,
    XmlEnum, XmlPayload,
};

xml_enum! {
    /// Replication scheme of a storage account.
    pub enum AccountType {
        StandardLrs => "Standard_LRS",
        StandardZrs => "Standard_ZRS",
        StandardGrs => "Standard_GRS",
        StandardRagrs => "Standard_RAGRS",
        PremiumLrs => "Premium_LRS",
    }
}

xml_enum! {
    /// Availability of the primary or secondary region.
    pub enum RegionStatus {
        Available => "Available",
        Unavailable => "Unavailable",
    }
}

const STORAGE_SERVICE_PROPERTIES: Schema = Schema {
    name: "StorageServiceProperties",
    fields: &[
        Field::text("Description"),
        Field::text("AffinityGroup"),
        Field::text("Location"),
        Field::text("Label"),
        Field::text("Status"),
        Field::texts("Endpoints", "Endpoint"),
        Field::text("GeoReplicationEnabled"),
        Field::text("GeoPrimaryRegion"),
        Field::text("StatusOfPrimary"),
        Field::text("LastGeoFailoverTime"),
        Field::text("GeoSecondaryRegion"),
        Field::text("StatusOfSecondary"),
        Field::text("CreationTime"),
        Field::text("AccountType"),
    ],
};

/// Descriptive state of a storage account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageServiceProperties {
    pub description: Option<String>,
    pub affinity_group: Option<String>,
    pub location: Option<String>,
    /// Decoded from base64.
    pub label: Option<String>,
    pub status: Option<ServiceStatus>,
    /// Blob, queue, table and file endpoints.
    pub endpoints: Vec<Url>,
    pub geo_replication_enabled: Option<bool>,
    pub geo_primary_region: Option<String>,
    pub status_of_primary: Option<RegionStatus>,
    pub last_geo_failover: Option<DateTime<Utc>>,
    pub geo_secondary_region: Option<String>,
    pub status_of_secondary: Option<RegionStatus>,
    pub created: Option<DateTime<Utc>>,
    pub account_type: Option<AccountType>,
}

impl FromRecord for StorageServiceProperties {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            description: record.string("Description"),
            affinity_group: record.string("AffinityGroup"),
            location: record.string("Location"),
            label: record.label("Label")?,
            status: record.enumeration("Status"),
            endpoints: record.uris("Endpoints")?,
            geo_replication_enabled: record.boolean("GeoReplicationEnabled")?,
            geo_primary_region: record.string("GeoPrimaryRegion"),
            status_of_primary: record.enumeration("StatusOfPrimary"),
            last_geo_failover: record
                .timestamp("LastGeoFailoverTime", TimestampFormat::DateOrSeconds)?,
            geo_secondary_region: record.string("GeoSecondaryRegion"),
            status_of_secondary: record.enumeration("StatusOfSecondary"),
            created: record.timestamp("CreationTime", TimestampFormat::DateOrSeconds)?,
            account_type: record.enumeration("AccountType"),
        })
    }
}

const STORAGE_SERVICE: Schema = Schema {
    name: "StorageService",
    fields: &[
        Field::text("Url"),
        Field::text("ServiceName"),
        Field::entity("StorageServiceProperties", &STORAGE_SERVICE_PROPERTIES),
        Field::list("ExtendedProperties", &EXTENDED_PROPERTY),
    ],
};

/// A storage account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageService {
    pub name: String,
    pub url: Option<Url>,
    pub properties: StorageServiceProperties,
    pub extended_properties: BTreeMap<String, String>,
}

impl FromRecord for StorageService {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("ServiceName")?,
            url: record.uri("Url")?,
            properties: StorageServiceProperties::from_record(
                record.section("StorageServiceProperties"),
            )?,
            extended_properties: extended_properties(record)?,
        })
    }
}

impl XmlEntity for StorageService {
    const SCHEMA: &'static Schema = &STORAGE_SERVICE;
}

impl XmlCollection for StorageService {
    const COLLECTION: &'static str = "StorageServices";
}

// ============================================================================
// Access keys
// ============================================================================

const KEYS: Schema = Schema {
    name: "StorageServiceKeys",
    fields: &[Field::text("Primary"), Field::text("Secondary")],
};

const STORAGE_SERVICE_KEYS: Schema = Schema {
    name: "StorageService",
    fields: &[
        Field::text("Url"),
        Field::entity("StorageServiceKeys", &KEYS),
    ],
};

/// Access keys of a storage account. The document shares its
/// `StorageService` root with the account itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageServiceKeys {
    pub url: Option<Url>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl FromRecord for StorageServiceKeys {
    fn from_record(record: &Record) -> Result<Self> {
        let keys = record.section("StorageServiceKeys");
        Ok(Self {
            url: record.uri("Url")?,
            primary: keys.string("Primary"),
            secondary: keys.string("Secondary"),
        })
    }
}

impl XmlEntity for StorageServiceKeys {
    const SCHEMA: &'static Schema = &STORAGE_SERVICE_KEYS;
}

// ============================================================================
// Create request
// ============================================================================

/// Parameters of a new storage account, placed either in a location or in
/// an affinity group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageServiceParams {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub affinity_group: Option<String>,
    pub account_type: AccountType,
    pub extended_properties: BTreeMap<String, String>,
}

impl StorageServiceParams {
    /// Locally redundant account in `location`, labelled with its name.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            description: None,
            location: Some(location.into()),
            affinity_group: None,
            account_type: AccountType::StandardLrs,
            extended_properties: BTreeMap::new(),
        }
    }

    /// Place the account in an affinity group instead of a location.
    #[must_use]
    pub fn in_affinity_group(mut self, affinity_group: impl Into<String>) -> Self {
        self.location = None;
        self.affinity_group = Some(affinity_group.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    #[must_use]
    pub fn with_extended_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extended_properties.insert(name.into(), value.into());
        self
    }

    /// Render the `CreateStorageServiceInput` payload.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Validation`] for an unrecognized account type, or
    /// an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        if !self.account_type.is_recognized() {
            return Err(CloudError::Validation(
                "storage account type must be a known replication scheme".to_string(),
            ));
        }
        let mut payload = XmlPayload::new("CreateStorageServiceInput")?;
        payload
            .element("ServiceName", &self.name)?
            .optional("Description", self.description.as_deref())?
            .label("Label", &self.label)?
            .optional("AffinityGroup", self.affinity_group.as_deref())?
            .optional("Location", self.location.as_deref())?;
        write_extended_properties(&mut payload, &self.extended_properties)?;
        payload.element("AccountType", self.account_type.as_str())?;
        payload.finish()
    }
}
