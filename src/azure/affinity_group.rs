// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::Result;
use crate::xml::{
    Field, FromRecord, Record, Schema, TimestampFormat, XmlCollection, XmlEntity, XmlPayload,
};

const REFERENCE_FIELDS: &[Field] = &[Field::text("Url"), Field::text("ServiceName")];

const HOSTED_SERVICE_REFERENCE: Schema = Schema {
    name: "HostedService",
    fields: REFERENCE_FIELDS,
};

const STORAGE_SERVICE_REFERENCE: Schema = Schema {
    name: "StorageService",
    fields: REFERENCE_FIELDS,
};

/// Hosted or storage service placed in an affinity group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReference {
    pub url: Option<Url>,
    pub name: Option<String>,
}

impl FromRecord for ServiceReference {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            url: record.uri("Url")?,
            name: record.string("ServiceName"),
        })
    }
}

const AFFINITY_GROUP: Schema = Schema {
    name: "AffinityGroup",
    fields: &[
        Field::text("Name"),
        Field::text("Label"),
        Field::text("Description"),
        Field::text("Location"),
        Field::list("HostedServices", &HOSTED_SERVICE_REFERENCE),
        Field::list("StorageServices", &STORAGE_SERVICE_REFERENCE),
        Field::texts("Capabilities", "Capability"),
        Field::text("CreatedTime"),
    ],
};

/// A named placement constraint keeping services close to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityGroup {
    pub name: String,
    /// Decoded from base64.
    pub label: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub hosted_services: Vec<ServiceReference>,
    pub storage_services: Vec<ServiceReference>,
    pub capabilities: Vec<String>,
    pub created: Option<DateTime<Utc>>,
}

impl FromRecord for AffinityGroup {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            label: record.label("Label")?,
            description: record.string("Description"),
            location: record.string("Location"),
            hosted_services: record.list("HostedServices")?,
            storage_services: record.list("StorageServices")?,
            capabilities: record.texts("Capabilities"),
            created: record.timestamp("CreatedTime", TimestampFormat::DateOrSeconds)?,
        })
    }
}

impl XmlEntity for AffinityGroup {
    const SCHEMA: &'static Schema = &AFFINITY_GROUP;
}

impl XmlCollection for AffinityGroup {
    const COLLECTION: &'static str = "AffinityGroups";
}

/// Parameters of a new affinity group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityGroupParams {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub location: String,
}

impl AffinityGroupParams {
    /// Group labelled with its name.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            description: None,
            location: location.into(),
        }
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

    /// Render the `CreateAffinityGroup` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("CreateAffinityGroup")?;
        payload
            .element("Name", &self.name)?
            .label("Label", &self.label)?
            .optional("Description", self.description.as_deref())?
            .element("Location", &self.location)?;
        payload.finish()
    }
}
