// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema-driven XML parsing.
//!
//! Entities describe themselves with a `const` [`Schema`] and assemble
//! themselves from a [`Record`] via [`FromRecord`]. One generic walker
//! consumes any schema:
//!
//! ```
//! use cloudlabs_api_rs::azure::Error;
//! use cloudlabs_api_rs::xml;
//!
//! let body = br#"<Error xmlns="http://schemas.microsoft.com/windowsazure">
//!   <Code>ResourceNotFound</Code><Message>gone</Message></Error>"#;
//! let error: Error = xml::parse(body).unwrap();
//! assert_eq!(error.message, "gone");
//! ```

mod coerce;
mod record;
mod schema;
mod walker;
mod writer;

pub(crate) use coerce::xml_enum;
pub use coerce::{decode_base64, encode_base64, parse_timestamp, parse_uri, TimestampFormat, XmlEnum};
pub use record::{FromRecord, Node, Record};
pub use schema::{Field, Kind, Schema};
pub use writer::{XmlPayload, AZURE_NAMESPACE};

use crate::error::Result;
use walker::Walker;

/// An entity carried as the root of a response document.
pub trait XmlEntity: FromRecord {
    const SCHEMA: &'static Schema;
}

/// An entity returned inside a collection document such as
/// `<HostedServices><HostedService>..</HostedService></HostedServices>`.
pub trait XmlCollection: XmlEntity {
    const COLLECTION: &'static str;
}

/// Parse a document whose root element is the entity itself.
///
/// # Errors
///
/// Returns a malformed-document error when the body is not well formed, has
/// a different root, or a present field does not conform to its type.
pub fn parse<T: XmlEntity>(body: &[u8]) -> Result<T> {
    parse_as(body, T::SCHEMA.name)
}

/// Parse an entity whose root element name differs from its schema name.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_as<T: XmlEntity>(body: &[u8], root: &'static str) -> Result<T> {
    let node = Walker::new(root, Kind::Entity(T::SCHEMA)).run(body)?;
    T::from_record(&node.into_record())
}

/// Parse a collection document, preserving document order.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_list<T: XmlCollection>(body: &[u8]) -> Result<Vec<T>> {
    Walker::new(T::COLLECTION, Kind::List(T::SCHEMA))
        .run(body)?
        .into_items()
        .iter()
        .filter_map(|node| match node {
            Node::Record(record) => Some(T::from_record(record)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tag {
        name: String,
        size: Option<u32>,
    }

    const TAG: Schema = Schema {
        name: "Tag",
        fields: &[Field::text("Name"), Field::text("Size")],
    };

    impl FromRecord for Tag {
        fn from_record(record: &Record) -> Result<Self> {
            Ok(Self {
                name: record.required("Name")?,
                size: record.number("Size")?,
            })
        }
    }

    impl XmlEntity for Tag {
        const SCHEMA: &'static Schema = &TAG;
    }

    impl XmlCollection for Tag {
        const COLLECTION: &'static str = "Tags";
    }

    #[test]
    fn test_parse_single() {
        let tag: Tag = parse(b"<?xml version=\"1.0\"?><Tag><Name>a</Name><Size>3</Size></Tag>").unwrap();
        assert_eq!(
            tag,
            Tag {
                name: "a".to_string(),
                size: Some(3)
            }
        );
    }

    #[test]
    fn test_parse_list_order_and_empty() {
        let tags: Vec<Tag> =
            parse_list(b"<Tags><Tag><Name>z</Name></Tag><Tag><Name>a</Name></Tag></Tags>").unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);

        assert!(parse_list::<Tag>(b"<Tags/>").unwrap().is_empty());
        assert!(parse_list::<Tag>(b"<Tags>\n</Tags>").unwrap().is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let body = b"<Tags><Tag><Name>x</Name><Size>1</Size></Tag></Tags>";
        assert_eq!(
            parse_list::<Tag>(body).unwrap(),
            parse_list::<Tag>(body).unwrap()
        );
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse::<Tag>(b"<Tag><Size>1</Size></Tag>").unwrap_err();
        assert!(err.is_malformed_document());
    }

    #[test]
    fn test_not_xml() {
        let err = parse::<Tag>(b"{\"name\": \"json\"}").unwrap_err();
        assert!(err.is_malformed_document());
    }
}
