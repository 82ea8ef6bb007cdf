// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request payload rendering for the Service Management API.

use std::fmt;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::coerce::encode_base64;
use crate::error::{CloudError, Result};

/// Default namespace of every Service Management payload.
pub const AZURE_NAMESPACE: &str = "http://schemas.microsoft.com/windowsazure";

/// Streaming builder for one XML request body.
///
/// Elements are closed in reverse order of opening; [`XmlPayload::finish`]
/// closes whatever is still open, including the root.
pub struct XmlPayload {
    writer: Writer<Vec<u8>>,
    open: Vec<&'static str>,
}

impl fmt::Debug for XmlPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlPayload")
            .field("open", &self.open)
            .field("written", &self.writer.get_ref().len())
            .finish_non_exhaustive()
    }
}

impl XmlPayload {
    /// Start a document whose root carries the Azure namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the root element cannot be written.
    pub fn new(root: &'static str) -> Result<Self> {
        let mut payload = Self {
            writer: Writer::new(Vec::new()),
            open: Vec::new(),
        };
        let mut start = BytesStart::new(root);
        start.push_attribute(("xmlns", AZURE_NAMESPACE));
        payload.write(Event::Start(start))?;
        payload.open.push(root);
        Ok(payload)
    }

    /// Open a nested element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be written.
    pub fn start(&mut self, tag: &'static str) -> Result<&mut Self> {
        self.write(Event::Start(BytesStart::new(tag)))?;
        self.open.push(tag);
        Ok(self)
    }

    /// Close the innermost open element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be written.
    pub fn end(&mut self) -> Result<&mut Self> {
        if let Some(tag) = self.open.pop() {
            self.write(Event::End(BytesEnd::new(tag)))?;
        }
        Ok(self)
    }

    /// Write `<tag>text</tag>`, escaping the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be written.
    pub fn element(&mut self, tag: &'static str, text: impl AsRef<str>) -> Result<&mut Self> {
        self.write(Event::Start(BytesStart::new(tag)))?;
        self.write(Event::Text(BytesText::new(text.as_ref())))?;
        self.write(Event::End(BytesEnd::new(tag)))?;
        Ok(self)
    }

    /// Write the element only when a value is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be written.
    pub fn optional<V: AsRef<str>>(
        &mut self,
        tag: &'static str,
        value: Option<V>,
    ) -> Result<&mut Self> {
        match value {
            Some(value) => self.element(tag, value),
            None => Ok(self),
        }
    }

    /// Write a base64 encoded label.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be written.
    pub fn label(&mut self, tag: &'static str, text: &str) -> Result<&mut Self> {
        self.element(tag, encode_base64(text))
    }

    /// Close every open element and return the document text.
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be written.
    pub fn finish(mut self) -> Result<String> {
        while !self.open.is_empty() {
            self.end()?;
        }
        String::from_utf8(self.writer.into_inner()).map_err(|e| CloudError::Xml {
            position: 0,
            message: e.to_string(),
        })
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        let position = self.writer.get_ref().len() as u64;
        self.writer
            .write_event(event)
            .map_err(|e| CloudError::Xml {
                position,
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_payload() {
        let mut payload = XmlPayload::new("CreateHostedService").unwrap();
        payload
            .element("ServiceName", "svc")
            .unwrap()
            .label("Label", "neotys")
            .unwrap()
            .optional("Description", None::<&str>)
            .unwrap()
            .start("ExtendedProperties")
            .unwrap()
            .start("ExtendedProperty")
            .unwrap()
            .element("Name", "k")
            .unwrap()
            .end()
            .unwrap();
        let xml = payload.finish().unwrap();
        assert_eq!(
            xml,
            "<CreateHostedService xmlns=\"http://schemas.microsoft.com/windowsazure\">\
             <ServiceName>svc</ServiceName><Label>bmVvdHlz</Label>\
             <ExtendedProperties><ExtendedProperty><Name>k</Name></ExtendedProperty>\
             </ExtendedProperties></CreateHostedService>"
        );
    }

    #[test]
    fn test_debug_shows_open_elements() {
        let mut payload = XmlPayload::new("Disk").unwrap();
        payload.start("OS").unwrap();
        let debug = format!("{payload:?}");
        assert!(debug.starts_with("XmlPayload"), "{debug}");
        assert!(debug.contains(r#"open: ["Disk", "OS"]"#), "{debug}");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut payload = XmlPayload::new("Rule").unwrap();
        payload.element("Name", "a<b&c").unwrap();
        assert!(payload
            .finish()
            .unwrap()
            .contains("<Name>a&lt;b&amp;c</Name>"));
    }
}
