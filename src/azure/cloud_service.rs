// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted (cloud) services.
//!
//! The list and get documents nest the descriptive fields inside a
//! `HostedServiceProperties` wrapper; the value types flatten it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use url::Url;

use super::common::{extended_properties, write_extended_properties, ServiceStatus, EXTENDED_PROPERTY};
use super::deployment::{Deployment, DEPLOYMENT};
use crate::error::{CloudError, Result};
use crate::xml::{
    Field, FromRecord, Record, Schema, TimestampFormat, XmlCollection, XmlEntity, XmlPayload,
};

const HOSTED_SERVICE_PROPERTIES: Schema = Schema {
    name: "HostedServiceProperties",
    fields: &[
        Field::text("Description"),
        Field::text("AffinityGroup"),
        Field::text("Location"),
        Field::text("Label"),
        Field::text("Status"),
        Field::text("DateCreated"),
        Field::text("DateLastModified"),
        Field::list("ExtendedProperties", &EXTENDED_PROPERTY),
    ],
};

const HOSTED_SERVICE: Schema = Schema {
    name: "HostedService",
    fields: &[
        Field::text("Url"),
        Field::text("ServiceName"),
        Field::entity("HostedServiceProperties", &HOSTED_SERVICE_PROPERTIES),
        Field::list("Deployments", &DEPLOYMENT),
    ],
};

/// Fields every hosted service document carries in its properties wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Properties {
    description: Option<String>,
    affinity_group: Option<String>,
    location: Option<String>,
    label: Option<String>,
    status: Option<ServiceStatus>,
    created: Option<DateTime<Utc>>,
    last_modified: Option<DateTime<Utc>>,
    extended_properties: BTreeMap<String, String>,
}

impl FromRecord for Properties {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            description: record.string("Description"),
            affinity_group: record.string("AffinityGroup"),
            location: record.string("Location"),
            label: record.label("Label")?,
            status: record.enumeration("Status"),
            created: record.timestamp("DateCreated", TimestampFormat::Seconds)?,
            last_modified: record.timestamp("DateLastModified", TimestampFormat::Seconds)?,
            extended_properties: extended_properties(record)?,
        })
    }
}

/// A hosted service as listed for the subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudService {
    pub name: String,
    pub location: Option<String>,
    pub affinity_group: Option<String>,
    /// Decoded from base64.
    pub label: Option<String>,
    pub description: Option<String>,
    pub status: Option<ServiceStatus>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub extended_properties: BTreeMap<String, String>,
}

impl FromRecord for CloudService {
    fn from_record(record: &Record) -> Result<Self> {
        let properties = Properties::from_record(record.section("HostedServiceProperties"))?;
        Ok(Self {
            name: record.required("ServiceName")?,
            location: properties.location,
            affinity_group: properties.affinity_group,
            label: properties.label,
            description: properties.description,
            status: properties.status,
            created: properties.created,
            last_modified: properties.last_modified,
            extended_properties: properties.extended_properties,
        })
    }
}

impl XmlEntity for CloudService {
    const SCHEMA: &'static Schema = &HOSTED_SERVICE;
}

impl XmlCollection for CloudService {
    const COLLECTION: &'static str = "HostedServices";
}

/// A hosted service with its deployments (`embed-detail=true`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudServiceProperties {
    pub service_name: String,
    pub url: Option<Url>,
    pub location: Option<String>,
    pub affinity_group: Option<String>,
    /// Decoded from base64.
    pub label: Option<String>,
    pub description: Option<String>,
    pub status: Option<ServiceStatus>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub extended_properties: BTreeMap<String, String>,
    pub deployments: Vec<Deployment>,
}

impl FromRecord for CloudServiceProperties {
    fn from_record(record: &Record) -> Result<Self> {
        let properties = Properties::from_record(record.section("HostedServiceProperties"))?;
        Ok(Self {
            service_name: record.required("ServiceName")?,
            url: record.uri("Url")?,
            location: properties.location,
            affinity_group: properties.affinity_group,
            label: properties.label,
            description: properties.description,
            status: properties.status,
            created: properties.created,
            last_modified: properties.last_modified,
            extended_properties: properties.extended_properties,
            deployments: record.list("Deployments")?,
        })
    }
}

impl XmlEntity for CloudServiceProperties {
    const SCHEMA: &'static Schema = &HOSTED_SERVICE;
}

// ============================================================================
// Name availability
// ============================================================================

const AVAILABILITY_RESPONSE: Schema = Schema {
    name: "AvailabilityResponse",
    fields: &[Field::text("Result"), Field::text("Reason")],
};

/// Answer of a name availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub result: bool,
    pub reason: Option<String>,
}

impl FromRecord for Availability {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            result: record.boolean("Result")?.ok_or(CloudError::MissingField {
                entity: "AvailabilityResponse",
                field: "Result",
            })?,
            reason: record.string("Reason"),
        })
    }
}

impl XmlEntity for Availability {
    const SCHEMA: &'static Schema = &AVAILABILITY_RESPONSE;
}

// ============================================================================
// Create request
// ============================================================================

/// Parameters of a new hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudServiceParams {
    pub name: String,
    pub label: String,
    pub location: String,
    pub description: Option<String>,
    pub extended_properties: BTreeMap<String, String>,
}

impl CloudServiceParams {
    /// Service whose label is its name.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            location: location.into(),
            description: None,
            extended_properties: BTreeMap::new(),
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

    #[must_use]
    pub fn with_extended_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extended_properties.insert(name.into(), value.into());
        self
    }

    /// Render the `CreateHostedService` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("CreateHostedService")?;
        payload
            .element("ServiceName", &self.name)?
            .label("Label", &self.label)?
            .optional("Description", self.description.as_deref())?
            .element("Location", &self.location)?;
        write_extended_properties(&mut payload, &self.extended_properties)?;
        payload.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::xml::{parse, parse_list};

    fn service(name: &str, created: DateTime<Utc>, modified: DateTime<Utc>) -> CloudService {
        CloudService {
            name: name.to_string(),
            location: Some("West Europe".to_string()),
            affinity_group: None,
            label: Some(name.to_string()),
            description: None,
            status: Some(ServiceStatus::Created),
            created: Some(created),
            last_modified: Some(modified),
            extended_properties: BTreeMap::new(),
        }
    }

    #[test]
    fn test_parse_hosted_services_fixture() {
        let services: Vec<CloudService> =
            parse_list(include_bytes!("../../tests/fixtures/azure/hostedservices.xml")).unwrap();
        assert_eq!(
            services,
            vec![
                service(
                    "neotys",
                    Utc.with_ymd_and_hms(2015, 3, 9, 15, 36, 33).unwrap(),
                    Utc.with_ymd_and_hms(2015, 3, 9, 15, 36, 33).unwrap(),
                ),
                service(
                    "neotys3",
                    Utc.with_ymd_and_hms(2015, 3, 12, 13, 47, 11).unwrap(),
                    Utc.with_ymd_and_hms(2015, 3, 12, 13, 47, 11).unwrap(),
                ),
            ]
        );
    }

    #[test]
    fn test_parse_service_details_fixture() {
        let details: CloudServiceProperties =
            parse(include_bytes!("../../tests/fixtures/azure/hostedservice_details.xml")).unwrap();

        assert_eq!(details.service_name, "neotys");
        assert_eq!(
            details.url.as_ref().map(Url::as_str),
            Some("https://management.core.windows.net/eb0347c3-68d4-4550-9b39-5e7e0f92f7db/services/hostedservices/neotys")
        );
        assert_eq!(details.label.as_deref(), Some("neotys"));
        assert_eq!(details.status, Some(ServiceStatus::Created));
        assert_eq!(
            details.extended_properties.get("ResourceGroup").map(String::as_str),
            Some("neotys")
        );
        assert_eq!(details.deployments.len(), 1);
        assert_eq!(details.deployments[0].name, "neotys");
        assert_eq!(details.deployments[0].roles[0].role_name, "neotys");
    }

    #[test]
    fn test_invalid_label_is_hard_error() {
        let err = parse_list::<CloudService>(
            b"<HostedServices><HostedService><ServiceName>s</ServiceName>\
              <HostedServiceProperties><Label>%%%</Label></HostedServiceProperties>\
              </HostedService></HostedServices>",
        )
        .unwrap_err();
        assert!(matches!(err, CloudError::InvalidValue { field: "Label", .. }));
    }

    #[test]
    fn test_availability() {
        let availability: Availability = parse(
            b"<AvailabilityResponse xmlns=\"http://schemas.microsoft.com/windowsazure\">\
              <Result>false</Result><Reason>The name is not available.</Reason></AvailabilityResponse>",
        )
        .unwrap();
        assert!(!availability.result);
        assert_eq!(availability.reason.as_deref(), Some("The name is not available."));

        assert!(parse::<Availability>(b"<AvailabilityResponse/>").is_err());
    }

    #[test]
    fn test_create_payload() {
        let xml = CloudServiceParams::new("myservice", "West Europe")
            .with_description("my description")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<CreateHostedService xmlns=\"http://schemas.microsoft.com/windowsazure\">\
             <ServiceName>myservice</ServiceName><Label>bXlzZXJ2aWNl</Label>\
             <Description>my description</Description><Location>West Europe</Location>\
             </CreateHostedService>"
        );
    }
}
