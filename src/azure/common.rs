// SPDX-License-Identifier: MIT OR Apache-2.0

//! Labels and element groups shared by several Service Management documents.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::xml::{xml_enum, Field, FromRecord, Record, Schema, XmlPayload};

xml_enum! {
    /// Operating system family of a disk or image.
    pub enum OsType {
        Linux => "Linux",
        Windows => "Windows",
    }
}

xml_enum! {
    /// Caching behaviour of a virtual hard disk.
    pub enum HostCaching {
        None => "None",
        ReadOnly => "ReadOnly",
        ReadWrite => "ReadWrite",
    }
}

xml_enum! {
    /// Provisioning state of a hosted or storage service.
    pub enum ServiceStatus {
        Creating => "Creating",
        Created => "Created",
        Deleting => "Deleting",
        Deleted => "Deleted",
        Changing => "Changing",
        ResolvingDns => "ResolvingDns",
    }
}

pub(crate) const EXTENDED_PROPERTY: Schema = Schema {
    name: "ExtendedProperty",
    fields: &[Field::text("Name"), Field::text("Value")],
};

struct ExtendedProperty(String, String);

impl FromRecord for ExtendedProperty {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self(
            record.required("Name")?,
            record.string("Value").unwrap_or_default(),
        ))
    }
}

/// Collect an `ExtendedProperties` group into a map, empty when absent.
pub(crate) fn extended_properties(record: &Record) -> Result<BTreeMap<String, String>> {
    Ok(record
        .list::<ExtendedProperty>("ExtendedProperties")?
        .into_iter()
        .map(|ExtendedProperty(name, value)| (name, value))
        .collect())
}

/// Render an `ExtendedProperties` group; nothing is written for an empty map.
pub(crate) fn write_extended_properties(
    payload: &mut XmlPayload,
    properties: &BTreeMap<String, String>,
) -> Result<()> {
    if properties.is_empty() {
        return Ok(());
    }
    payload.start("ExtendedProperties")?;
    for (name, value) in properties {
        payload
            .start("ExtendedProperty")?
            .element("Name", name)?
            .element("Value", value)?
            .end()?;
    }
    payload.end()?;
    Ok(())
}
