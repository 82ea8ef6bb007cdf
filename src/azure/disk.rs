// SPDX-License-Identifier: MIT OR Apache-2.0

use url::Url;

use super::common::OsType;
use crate::error::Result;
use crate::xml::{
    Field, FromRecord, Record, Schema, XmlCollection, XmlEntity, XmlEnum, XmlPayload,
};

const ATTACHED_TO: Schema = Schema {
    name: "AttachedTo",
    fields: &[
        Field::text("HostedServiceName"),
        Field::text("DeploymentName"),
        Field::text("RoleName"),
    ],
};

/// Role a disk is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub hosted_service: Option<String>,
    pub deployment: Option<String>,
    pub role: Option<String>,
}

impl FromRecord for Attachment {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            hosted_service: record.string("HostedServiceName"),
            deployment: record.string("DeploymentName"),
            role: record.string("RoleName"),
        })
    }
}

const DISK: Schema = Schema {
    name: "Disk",
    fields: &[
        Field::entity("AttachedTo", &ATTACHED_TO),
        Field::text("OS"),
        Field::text("Location"),
        Field::text("AffinityGroup"),
        Field::text("LogicalDiskSizeInGB"),
        Field::text("Description"),
        Field::text("Label"),
        Field::text("MediaLink"),
        Field::text("Name"),
        Field::text("SourceImageName"),
        Field::text("IsCorrupted"),
        Field::text("IsPremium"),
        Field::text("IOType"),
    ],
};

/// A virtual hard disk registered with the subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    pub name: String,
    pub attached_to: Option<Attachment>,
    pub os: Option<OsType>,
    pub location: Option<String>,
    pub affinity_group: Option<String>,
    pub logical_size_in_gb: Option<u32>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub media_link: Option<Url>,
    pub source_image_name: Option<String>,
    pub is_corrupted: Option<bool>,
    pub is_premium: Option<bool>,
    pub io_type: Option<String>,
}

impl FromRecord for Disk {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            attached_to: record.child("AttachedTo")?,
            os: record.enumeration("OS"),
            location: record.string("Location"),
            affinity_group: record.string("AffinityGroup"),
            logical_size_in_gb: record.number("LogicalDiskSizeInGB")?,
            description: record.string("Description"),
            label: record.string("Label"),
            media_link: record.uri("MediaLink")?,
            source_image_name: record.string("SourceImageName"),
            is_corrupted: record.boolean("IsCorrupted")?,
            is_premium: record.boolean("IsPremium")?,
            io_type: record.string("IOType"),
        })
    }
}

impl XmlEntity for Disk {
    const SCHEMA: &'static Schema = &DISK;
}

impl XmlCollection for Disk {
    const COLLECTION: &'static str = "Disks";
}

/// Parameters for registering an uploaded VHD as a disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskParams {
    pub name: String,
    pub label: String,
    pub media_link: Url,
    pub os: Option<OsType>,
}

impl DiskParams {
    /// A data disk; call [`DiskParams::with_os`] for an OS disk.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, media_link: Url) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            media_link,
            os: None,
        }
    }

    #[must_use]
    pub fn with_os(mut self, os: OsType) -> Self {
        self.os = Some(os);
        self
    }

    /// Render the `Disk` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("Disk")?;
        payload
            .optional("OS", self.os.map(|os| os.as_str()))?
            .element("Label", &self.label)?
            .element("MediaLink", self.media_link.as_str())?
            .element("Name", &self.name)?;
        payload.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_list;

    #[test]
    fn test_parse_disks_fixture() {
        let disks: Vec<Disk> =
            parse_list(include_bytes!("../../tests/fixtures/azure/disks.xml")).unwrap();
        assert_eq!(
            disks,
            vec![
                Disk {
                    name: "neotys-neotys-0-201503091536310412".to_string(),
                    attached_to: Some(Attachment {
                        hosted_service: Some("neotys".to_string()),
                        deployment: Some("neotys".to_string()),
                        role: Some("neotys".to_string()),
                    }),
                    os: Some(OsType::Linux),
                    location: Some("West Europe".to_string()),
                    affinity_group: None,
                    logical_size_in_gb: Some(30),
                    description: None,
                    label: None,
                    media_link: Some(
                        Url::parse("https://neotysss.blob.core.windows.net/vhds/neotys-neotys-2015-03-09.vhd")
                            .unwrap()
                    ),
                    source_image_name: Some(
                        "b39f27a8b8c64d52b05eac6a62ebad85__Ubuntu-14_04_1-LTS-amd64-server-20150123-en-us-30GB"
                            .to_string()
                    ),
                    is_corrupted: None,
                    is_premium: Some(false),
                    io_type: Some("Standard".to_string()),
                },
                Disk {
                    name: "testimage2-testimage2-0-20120817095145".to_string(),
                    attached_to: None,
                    os: Some(OsType::Windows),
                    location: None,
                    affinity_group: Some("Affinity1".to_string()),
                    logical_size_in_gb: Some(30),
                    description: None,
                    label: Some("testimage2-testimage2-0-20120817095145".to_string()),
                    media_link: Some(
                        Url::parse("http://blobs/disks/neotysss/MSFT__Win2K8R2SP1-ABCD-en-us-30GB.vhd")
                            .unwrap()
                    ),
                    source_image_name: None,
                    is_corrupted: Some(true),
                    is_premium: None,
                    io_type: None,
                },
            ]
        );
    }

    #[test]
    fn test_add_disk_payload() {
        let xml = DiskParams::new(
            "data1",
            "data one",
            Url::parse("https://store.blob.core.windows.net/vhds/data1.vhd").unwrap(),
        )
        .to_xml()
        .unwrap();
        assert_eq!(
            xml,
            "<Disk xmlns=\"http://schemas.microsoft.com/windowsazure\"><Label>data one</Label>\
             <MediaLink>https://store.blob.core.windows.net/vhds/data1.vhd</MediaLink>\
             <Name>data1</Name></Disk>"
        );
    }
}
