// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform and user images.
//!
//! `OSImage` is the classic generalized VHD image. `VMImage` captures a whole
//! role, OS disk plus data disks, and uses the permissive timestamp layout.

use chrono::{DateTime, Utc};
use url::Url;

use super::common::{HostCaching, OsType};
use crate::error::Result;
use crate::xml::{
    parse_uri, xml_enum, Field, FromRecord, Record, Schema, TimestampFormat, XmlCollection,
    XmlEntity, XmlEnum, XmlPayload,
};

// ============================================================================
// OS images
// ============================================================================

xml_enum! {
    /// Visibility of an image.
    pub enum ImageCategory {
        Public => "Public",
        Private => "Private",
        User => "User",
    }
}

const OS_IMAGE: Schema = Schema {
    name: "OSImage",
    fields: &[
        Field::text("AffinityGroup"),
        Field::text("Category"),
        Field::text("Label"),
        Field::text("Location"),
        Field::text("LogicalSizeInGB"),
        Field::text("MediaLink"),
        Field::text("Name"),
        Field::text("OS"),
        Field::text("Eula"),
        Field::text("Description"),
        Field::text("ImageFamily"),
        Field::text("PublisherName"),
        Field::text("RecommendedVMSize"),
        Field::text("IsPremium"),
    ],
};

/// An OS image available to the subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct OSImage {
    pub name: String,
    pub category: Option<ImageCategory>,
    pub label: Option<String>,
    pub affinity_group: Option<String>,
    /// Split from the `;` separated `Location` element.
    pub locations: Vec<String>,
    pub logical_size_in_gb: Option<f64>,
    pub media_link: Option<Url>,
    pub os: Option<OsType>,
    /// Split from the `;` separated `Eula` element.
    pub eulas: Vec<Url>,
    pub description: Option<String>,
    pub image_family: Option<String>,
    pub publisher: Option<String>,
    pub recommended_size: Option<String>,
    pub is_premium: Option<bool>,
}

impl FromRecord for OSImage {
    fn from_record(record: &Record) -> Result<Self> {
        let eulas = record
            .split("Eula", ';')
            .iter()
            .map(|eula| parse_uri("Eula", eula))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: record.required("Name")?,
            category: record.enumeration("Category"),
            label: record.string("Label"),
            affinity_group: record.string("AffinityGroup"),
            locations: record.split("Location", ';'),
            logical_size_in_gb: record.number("LogicalSizeInGB")?,
            media_link: record.uri("MediaLink")?,
            os: record.enumeration("OS"),
            eulas,
            description: record.string("Description"),
            image_family: record.string("ImageFamily"),
            publisher: record.string("PublisherName"),
            recommended_size: record.string("RecommendedVMSize"),
            is_premium: record.boolean("IsPremium")?,
        })
    }
}

impl XmlEntity for OSImage {
    const SCHEMA: &'static Schema = &OS_IMAGE;
}

impl XmlCollection for OSImage {
    const COLLECTION: &'static str = "Images";
}

/// Parameters for registering an uploaded, generalized VHD as an OS image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OSImageParams {
    pub name: String,
    pub label: String,
    pub media_link: Url,
    pub os: OsType,
}

impl OSImageParams {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, media_link: Url, os: OsType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            media_link,
            os,
        }
    }

    /// Render the `OSImage` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let mut payload = XmlPayload::new("OSImage")?;
        payload
            .element("Label", &self.label)?
            .element("MediaLink", self.media_link.as_str())?
            .element("Name", &self.name)?
            .element("OS", self.os.as_str())?;
        payload.finish()
    }
}

// ============================================================================
// VM images
// ============================================================================

xml_enum! {
    /// Whether the OS disk was generalized before capture.
    pub enum OSState {
        Generalized => "Generalized",
        Specialized => "Specialized",
    }
}

const OS_DISK_CONFIGURATION: Schema = Schema {
    name: "OSDiskConfiguration",
    fields: &[
        Field::text("Name"),
        Field::text("HostCaching"),
        Field::text("OSState"),
        Field::text("OS"),
        Field::text("MediaLink"),
        Field::text("LogicalDiskSizeInGB"),
        Field::text("IOType"),
    ],
};

/// OS disk captured in a VM image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OSDiskConfiguration {
    pub name: Option<String>,
    pub host_caching: Option<HostCaching>,
    pub os_state: Option<OSState>,
    pub os: Option<OsType>,
    pub media_link: Option<Url>,
    pub logical_size_in_gb: Option<u32>,
    pub io_type: Option<String>,
}

impl FromRecord for OSDiskConfiguration {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.string("Name"),
            host_caching: record.enumeration("HostCaching"),
            os_state: record.enumeration("OSState"),
            os: record.enumeration("OS"),
            media_link: record.uri("MediaLink")?,
            logical_size_in_gb: record.number("LogicalDiskSizeInGB")?,
            io_type: record.string("IOType"),
        })
    }
}

const DATA_DISK_CONFIGURATION: Schema = Schema {
    name: "DataDiskConfiguration",
    fields: &[
        Field::text("Name"),
        Field::text("HostCaching"),
        Field::text("Lun"),
        Field::text("MediaLink"),
        Field::text("LogicalDiskSizeInGB"),
        Field::text("IOType"),
    ],
};

/// Data disk captured in a VM image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDiskConfiguration {
    pub name: Option<String>,
    pub host_caching: Option<HostCaching>,
    pub lun: Option<u32>,
    pub media_link: Option<Url>,
    pub logical_size_in_gb: Option<u32>,
    pub io_type: Option<String>,
}

impl FromRecord for DataDiskConfiguration {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.string("Name"),
            host_caching: record.enumeration("HostCaching"),
            lun: record.number("Lun")?,
            media_link: record.uri("MediaLink")?,
            logical_size_in_gb: record.number("LogicalDiskSizeInGB")?,
            io_type: record.string("IOType"),
        })
    }
}

const VM_IMAGE: Schema = Schema {
    name: "VMImage",
    fields: &[
        Field::text("Name"),
        Field::text("Label"),
        Field::text("Category"),
        Field::text("Description"),
        Field::entity("OSDiskConfiguration", &OS_DISK_CONFIGURATION),
        Field::list("DataDiskConfigurations", &DATA_DISK_CONFIGURATION),
        Field::text("ServiceName"),
        Field::text("DeploymentName"),
        Field::text("RoleName"),
        Field::text("Location"),
        Field::text("AffinityGroup"),
        Field::text("CreatedTime"),
        Field::text("ModifiedTime"),
        Field::text("Language"),
        Field::text("ImageFamily"),
        Field::text("RecommendedVMSize"),
        Field::text("IsPremium"),
        Field::text("Eula"),
        Field::text("IconUri"),
        Field::text("SmallIconUri"),
        Field::text("PrivacyUri"),
        Field::text("PublishedDate"),
    ],
};

/// A captured virtual machine image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VMImage {
    pub name: String,
    pub label: Option<String>,
    pub category: Option<ImageCategory>,
    pub description: Option<String>,
    pub os_disk: Option<OSDiskConfiguration>,
    pub data_disks: Vec<DataDiskConfiguration>,
    pub service_name: Option<String>,
    pub deployment_name: Option<String>,
    pub role_name: Option<String>,
    pub location: Option<String>,
    pub affinity_group: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub image_family: Option<String>,
    pub recommended_size: Option<String>,
    pub is_premium: Option<bool>,
    pub eula: Option<String>,
    pub icon_uri: Option<String>,
    pub small_icon_uri: Option<String>,
    pub privacy_uri: Option<Url>,
    pub published: Option<DateTime<Utc>>,
}

impl FromRecord for VMImage {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.required("Name")?,
            label: record.string("Label"),
            category: record.enumeration("Category"),
            description: record.string("Description"),
            os_disk: record.child("OSDiskConfiguration")?,
            data_disks: record.list("DataDiskConfigurations")?,
            service_name: record.string("ServiceName"),
            deployment_name: record.string("DeploymentName"),
            role_name: record.string("RoleName"),
            location: record.string("Location"),
            affinity_group: record.string("AffinityGroup"),
            created: record.timestamp("CreatedTime", TimestampFormat::DateOrSeconds)?,
            modified: record.timestamp("ModifiedTime", TimestampFormat::DateOrSeconds)?,
            language: record.string("Language"),
            image_family: record.string("ImageFamily"),
            recommended_size: record.string("RecommendedVMSize"),
            is_premium: record.boolean("IsPremium")?,
            eula: record.string("Eula"),
            icon_uri: record.string("IconUri"),
            small_icon_uri: record.string("SmallIconUri"),
            privacy_uri: record.uri("PrivacyUri")?,
            published: record.timestamp("PublishedDate", TimestampFormat::DateOrSeconds)?,
        })
    }
}

impl XmlEntity for VMImage {
    const SCHEMA: &'static Schema = &VM_IMAGE;
}

impl XmlCollection for VMImage {
    const COLLECTION: &'static str = "VMImages";
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::xml::parse_list;

    #[test]
    fn test_parse_images_fixture() {
        let images: Vec<OSImage> =
            parse_list(include_bytes!("../../tests/fixtures/azure/images.xml")).unwrap();
        assert_eq!(images.len(), 2);

        let ubuntu = &images[0];
        assert_eq!(
            ubuntu.name,
            "b39f27a8b8c64d52b05eac6a62ebad85__Ubuntu-14_04_1-LTS-amd64-server-20150123-en-us-30GB"
        );
        assert_eq!(ubuntu.category, Some(ImageCategory::Public));
        assert_eq!(ubuntu.os, Some(OsType::Linux));
        assert_eq!(
            ubuntu.locations,
            vec!["East Asia", "Southeast Asia", "West Europe"]
        );
        assert_eq!(
            ubuntu.eulas,
            vec![
                Url::parse("http://www.ubuntu.com/project/about-ubuntu/licensing").unwrap(),
                Url::parse("http://www.ubuntu.com/aboutus/privacypolicy").unwrap(),
            ]
        );
        assert_eq!(ubuntu.logical_size_in_gb, Some(30.0));
        assert_eq!(ubuntu.image_family.as_deref(), Some("Ubuntu Server 14.04 LTS"));
        assert_eq!(ubuntu.is_premium, Some(false));

        let user = &images[1];
        assert_eq!(user.name, "myimage");
        assert_eq!(user.category, Some(ImageCategory::User));
        assert_eq!(user.os, Some(OsType::Windows));
        assert!(user.locations.is_empty());
        assert!(user.eulas.is_empty());
        assert_eq!(
            user.media_link,
            Some(Url::parse("https://neotysss.blob.core.windows.net/vhds/myimage.vhd").unwrap())
        );
    }

    #[test]
    fn test_unknown_category_is_unrecognized() {
        let images: Vec<OSImage> = parse_list(
            b"<Images><OSImage><Name>a</Name><Category>Marketplace</Category></OSImage></Images>",
        )
        .unwrap();
        assert_eq!(images[0].category, Some(ImageCategory::Unrecognized));
    }

    #[test]
    fn test_parse_vm_images_fixture() {
        let images: Vec<VMImage> =
            parse_list(include_bytes!("../../tests/fixtures/azure/vmimages.xml")).unwrap();
        assert_eq!(
            images,
            vec![VMImage {
                name: "test-vm-image".to_string(),
                label: Some("test-vm-image".to_string()),
                category: Some(ImageCategory::User),
                description: None,
                os_disk: Some(OSDiskConfiguration {
                    name: Some("test-vm-image-os-2015-03-12".to_string()),
                    host_caching: Some(HostCaching::ReadWrite),
                    os_state: Some(OSState::Specialized),
                    os: Some(OsType::Linux),
                    media_link: Some(
                        Url::parse("https://neotysss.blob.core.windows.net/vhds/test-os.vhd")
                            .unwrap()
                    ),
                    logical_size_in_gb: Some(30),
                    io_type: Some("Standard".to_string()),
                }),
                data_disks: vec![DataDiskConfiguration {
                    name: Some("test-vm-image-datadisk-0".to_string()),
                    host_caching: Some(HostCaching::None),
                    lun: Some(0),
                    media_link: Some(
                        Url::parse("https://neotysss.blob.core.windows.net/vhds/test-data.vhd")
                            .unwrap()
                    ),
                    logical_size_in_gb: Some(100),
                    io_type: None,
                }],
                service_name: Some("neotys".to_string()),
                deployment_name: Some("neotys".to_string()),
                role_name: Some("neotys".to_string()),
                location: Some("West Europe".to_string()),
                affinity_group: None,
                created: Some(Utc.with_ymd_and_hms(2015, 3, 12, 13, 50, 42).unwrap()
                    + chrono::Duration::milliseconds(187)),
                modified: Some(Utc.with_ymd_and_hms(2015, 3, 12, 13, 50, 42).unwrap()),
                language: None,
                image_family: None,
                recommended_size: None,
                is_premium: Some(false),
                eula: None,
                icon_uri: None,
                small_icon_uri: None,
                privacy_uri: None,
                published: Some(Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap()),
            }]
        );
    }

    #[test]
    fn test_add_os_image_payload() {
        let xml = OSImageParams::new(
            "myimage",
            "my image",
            Url::parse("https://store.blob.core.windows.net/vhds/myimage.vhd").unwrap(),
            OsType::Linux,
        )
        .to_xml()
        .unwrap();
        assert_eq!(
            xml,
            "<OSImage xmlns=\"http://schemas.microsoft.com/windowsazure\"><Label>my image</Label>\
             <MediaLink>https://store.blob.core.windows.net/vhds/myimage.vhd</MediaLink>\
             <Name>myimage</Name><OS>Linux</OS></OSImage>"
        );
    }
}
