// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partially built entities produced by the walker.
//!
//! A [`Record`] holds the children observed for one entity element, keyed by
//! tag. Typed accessors apply the coercions entities need when they are
//! assembled: absent scalars become `None` and absent repeating groups become
//! empty vectors.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use url::Url;

use super::coerce::{decode_base64, parse_timestamp, parse_uri, TimestampFormat, XmlEnum};
use crate::error::{CloudError, Result};

static EMPTY: Record = Record {
    name: "",
    fields: BTreeMap::new(),
};

/// Value accumulated for one recognised element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Trimmed, non-empty text of a scalar element.
    Text(String),
    /// Nested entity.
    Record(Record),
    /// Items of a repeating group, in document order.
    List(Vec<Node>),
}

impl Node {
    /// The record carried by this node, or an empty one.
    #[must_use]
    pub fn into_record(self) -> Record {
        match self {
            Node::Record(record) => record,
            _ => Record::default(),
        }
    }

    /// The items carried by this node, or none.
    #[must_use]
    pub fn into_items(self) -> Vec<Node> {
        match self {
            Node::List(items) => items,
            _ => Vec::new(),
        }
    }
}

/// Children observed for one entity element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    name: &'static str,
    fields: BTreeMap<&'static str, Node>,
}

/// Assemble a value object from its record.
pub trait FromRecord: Sized {
    /// # Errors
    ///
    /// Returns an error when a present field does not conform to its type or a
    /// guaranteed field is missing.
    fn from_record(record: &Record) -> Result<Self>;
}

impl Record {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: BTreeMap::new(),
        }
    }

    /// A repeated group element extends the items already collected.
    pub(crate) fn insert(&mut self, tag: &'static str, node: Node) {
        match (self.fields.get_mut(tag), node) {
            (Some(Node::List(items)), Node::List(more)) => items.extend(more),
            (_, node) => {
                self.fields.insert(tag, node);
            }
        }
    }

    /// Element name of the entity.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the element carried the given child.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.fields.contains_key(tag)
    }

    /// Number of recognised children observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no recognised child was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text of a scalar child.
    #[must_use]
    pub fn text(&self, tag: &str) -> Option<&str> {
        match self.fields.get(tag) {
            Some(Node::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Owned text of a scalar child.
    #[must_use]
    pub fn string(&self, tag: &str) -> Option<String> {
        self.text(tag).map(str::to_string)
    }

    /// Text of a child the provider always sends.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::MissingField`] when the child is absent or empty.
    pub fn required(&self, tag: &'static str) -> Result<String> {
        self.string(tag).ok_or(CloudError::MissingField {
            entity: self.name,
            field: tag,
        })
    }

    /// Numeric (or any `FromStr`) child.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidValue`] when present text does not parse.
    pub fn number<N>(&self, tag: &'static str) -> Result<Option<N>>
    where
        N: FromStr,
        N::Err: Display,
    {
        self.text(tag)
            .map(|text| {
                text.parse::<N>().map_err(|e| CloudError::InvalidValue {
                    field: tag,
                    value: text.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Boolean child, `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidValue`] for any other text.
    pub fn boolean(&self, tag: &'static str) -> Result<Option<bool>> {
        self.number::<bool>(tag)
    }

    /// Enum child; unknown labels map to the `Unrecognized` variant.
    #[must_use]
    pub fn enumeration<E: XmlEnum>(&self, tag: &str) -> Option<E> {
        self.text(tag).map(E::from_value)
    }

    /// Timestamp child parsed with the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidTimestamp`] when present text does not conform.
    pub fn timestamp(
        &self,
        tag: &'static str,
        format: TimestampFormat,
    ) -> Result<Option<DateTime<Utc>>> {
        self.text(tag)
            .map(|text| parse_timestamp(tag, text, format))
            .transpose()
    }

    /// Absolute URI child.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidUri`] when present text is not a URI.
    pub fn uri(&self, tag: &'static str) -> Result<Option<Url>> {
        self.text(tag).map(|text| parse_uri(tag, text)).transpose()
    }

    /// Base64 encoded label child, decoded.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidValue`] when present text is not base64 UTF-8.
    pub fn label(&self, tag: &'static str) -> Result<Option<String>> {
        self.text(tag)
            .map(|text| decode_base64(tag, text))
            .transpose()
    }

    /// Nested record, if the element was present.
    #[must_use]
    pub fn record(&self, tag: &str) -> Option<&Record> {
        match self.fields.get(tag) {
            Some(Node::Record(record)) => Some(record),
            _ => None,
        }
    }

    /// Nested wrapper record, empty when the element was absent.
    #[must_use]
    pub fn section(&self, tag: &str) -> &Record {
        self.record(tag).unwrap_or(&EMPTY)
    }

    /// Nested entity.
    ///
    /// # Errors
    ///
    /// Propagates the nested entity's assembly error.
    pub fn child<T: FromRecord>(&self, tag: &str) -> Result<Option<T>> {
        self.record(tag).map(T::from_record).transpose()
    }

    /// Repeating group of entities, empty when absent.
    ///
    /// # Errors
    ///
    /// Propagates the first item's assembly error.
    pub fn list<T: FromRecord>(&self, tag: &str) -> Result<Vec<T>> {
        self.items(tag)
            .filter_map(|node| match node {
                Node::Record(record) => Some(T::from_record(record)),
                _ => None,
            })
            .collect()
    }

    /// Repeating group of scalars, empty when absent.
    #[must_use]
    pub fn texts(&self, tag: &str) -> Vec<String> {
        self.items(tag)
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Repeating group of enum labels, empty when absent.
    #[must_use]
    pub fn enumerations<E: XmlEnum>(&self, tag: &str) -> Vec<E> {
        self.items(tag)
            .filter_map(|node| match node {
                Node::Text(text) => Some(E::from_value(text)),
                _ => None,
            })
            .collect()
    }

    /// Repeating group of URIs, empty when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidUri`] for the first malformed item.
    pub fn uris(&self, tag: &'static str) -> Result<Vec<Url>> {
        self.items(tag)
            .filter_map(|node| match node {
                Node::Text(text) => Some(parse_uri(tag, text)),
                _ => None,
            })
            .collect()
    }

    /// Scalar holding a `separator` delimited list, empty when absent.
    #[must_use]
    pub fn split(&self, tag: &str, separator: char) -> Vec<String> {
        self.text(tag)
            .map(|text| {
                text.split(separator)
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn items<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a Node> + 'a {
        let items: &'a [Node] = match self.fields.get(tag) {
            Some(Node::List(items)) => items,
            _ => &[],
        };
        items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::coerce::xml_enum;

    xml_enum! {
        enum Mode {
            On => "On",
            Off => "Off",
        }
    }

    #[derive(Debug, PartialEq)]
    struct Pair {
        name: String,
        value: Option<String>,
    }

    impl FromRecord for Pair {
        fn from_record(record: &Record) -> Result<Self> {
            Ok(Self {
                name: record.required("Name")?,
                value: record.string("Value"),
            })
        }
    }

    fn sample() -> Record {
        let mut pair = Record::new("Pair");
        pair.insert("Name", Node::Text("a".to_string()));

        let mut record = Record::new("Sample");
        record.insert("Count", Node::Text("42".to_string()));
        record.insert("Flag", Node::Text("true".to_string()));
        record.insert("Mode", Node::Text("Standby".to_string()));
        record.insert("Pairs", Node::List(vec![Node::Record(pair)]));
        record.insert(
            "Tags",
            Node::List(vec![
                Node::Text("x".to_string()),
                Node::Text("y".to_string()),
            ]),
        );
        record.insert("Locations", Node::Text("East US; West US;".to_string()));
        record
    }

    #[test]
    fn test_scalar_accessors() {
        let record = sample();
        assert_eq!(record.number::<u32>("Count").unwrap(), Some(42));
        assert_eq!(record.boolean("Flag").unwrap(), Some(true));
        assert_eq!(record.number::<u32>("Missing").unwrap(), None);
        assert_eq!(record.enumeration::<Mode>("Mode"), Some(Mode::Unrecognized));
        assert_eq!(record.string("Missing"), None);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let mut record = Record::new("Sample");
        record.insert("Port", Node::Text("eighty".to_string()));
        let err = record.number::<u16>("Port").unwrap_err();
        assert!(matches!(err, CloudError::InvalidValue { field: "Port", .. }));
    }

    #[test]
    fn test_required_field() {
        let record = sample();
        let err = record.required("Name").unwrap_err();
        assert!(matches!(
            err,
            CloudError::MissingField {
                entity: "Sample",
                field: "Name"
            }
        ));
    }

    #[test]
    fn test_repeating_groups_default_to_empty() {
        let record = sample();
        let pairs: Vec<Pair> = record.list("Pairs").unwrap();
        assert_eq!(
            pairs,
            vec![Pair {
                name: "a".to_string(),
                value: None
            }]
        );
        assert!(record.list::<Pair>("Absent").unwrap().is_empty());
        assert_eq!(record.texts("Tags"), vec!["x", "y"]);
        assert!(record.texts("Absent").is_empty());
        assert!(record.uris("Absent").unwrap().is_empty());
    }

    #[test]
    fn test_split_list() {
        let record = sample();
        assert_eq!(record.split("Locations", ';'), vec!["East US", "West US"]);
        assert!(record.split("Absent", ';').is_empty());
    }

    #[test]
    fn test_section_defaults_to_empty() {
        let record = sample();
        assert!(record.section("Properties").is_empty());
        assert_eq!(record.section("Properties").string("Anything"), None);
    }
}
