// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frame-stack state machine over `quick-xml` pull events.
//!
//! Each open, recognised element owns one [`Frame`]. Closing an element pops
//! its frame and folds the finished node into the parent frame under the tag
//! it was bound to. Unrecognised elements and everything below them are
//! skipped, as are elements marked `i:nil="true"`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace};

use super::record::{Node, Record};
use super::schema::{Kind, Schema};
use crate::error::{CloudError, Result};

#[derive(Debug)]
enum Frame {
    Record {
        tag: &'static str,
        schema: &'static Schema,
        record: Record,
    },
    List {
        tag: &'static str,
        item: &'static Schema,
        items: Vec<Node>,
    },
    Texts {
        tag: &'static str,
        item: &'static str,
        items: Vec<Node>,
    },
    Text {
        tag: &'static str,
        buffer: String,
    },
}

impl Frame {
    fn open(tag: &'static str, kind: Kind) -> Self {
        match kind {
            Kind::Text => Frame::Text {
                tag,
                buffer: String::new(),
            },
            Kind::Entity(schema) => Frame::Record {
                tag,
                schema,
                record: Record::new(schema.name),
            },
            Kind::List(item) => Frame::List {
                tag,
                item,
                items: Vec::new(),
            },
            Kind::Texts(item) => Frame::Texts {
                tag,
                item,
                items: Vec::new(),
            },
        }
    }

    /// Binding for a child element of this frame, if recognised.
    fn child(&self, name: &str) -> Option<(&'static str, Kind)> {
        match self {
            Frame::Record { schema, .. } => schema.field(name).map(|field| (field.tag, field.kind)),
            Frame::List { item, .. } => (item.name == name).then_some((item.name, Kind::Entity(item))),
            Frame::Texts { item, .. } => (*item == name).then_some((*item, Kind::Text)),
            Frame::Text { .. } => None,
        }
    }

    fn finish(self) -> (&'static str, Option<Node>) {
        match self {
            Frame::Record { tag, record, .. } => (tag, Some(Node::Record(record))),
            Frame::List { tag, items, .. } | Frame::Texts { tag, items, .. } => {
                (tag, Some(Node::List(items)))
            }
            Frame::Text { tag, buffer } => {
                let text = buffer.trim();
                (tag, (!text.is_empty()).then(|| Node::Text(text.to_string())))
            }
        }
    }

    fn attach(&mut self, tag: &'static str, node: Node) {
        match self {
            Frame::Record { record, .. } => record.insert(tag, node),
            Frame::List { items, .. } | Frame::Texts { items, .. } => items.push(node),
            Frame::Text { .. } => {}
        }
    }
}

/// Walks one document against a root binding.
#[derive(Debug)]
pub(crate) struct Walker {
    root_tag: &'static str,
    root_kind: Kind,
    stack: Vec<Frame>,
    skipping: usize,
}

impl Walker {
    pub(crate) fn new(root_tag: &'static str, root_kind: Kind) -> Self {
        Self {
            root_tag,
            root_kind,
            stack: Vec::new(),
            skipping: 0,
        }
    }

    /// Consume a complete document and return the root node.
    pub(crate) fn run(mut self, body: &[u8]) -> Result<Node> {
        let mut reader = Reader::from_reader(body);

        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(reader.buffer_position() as u64, e))?;
            let finished = match event {
                Event::Start(ref start) => {
                    self.open(start)?;
                    None
                }
                Event::Empty(ref start) => {
                    self.open(start)?;
                    self.close()
                }
                Event::End(_) => self.close(),
                Event::Text(ref text) => {
                    if self.wants_text() {
                        let text = text
                            .unescape()
                            .map_err(|e| malformed(reader.buffer_position() as u64, e))?;
                        self.characters(&text);
                    }
                    None
                }
                Event::CData(ref data) => {
                    if self.wants_text() {
                        let text = std::str::from_utf8(data)
                            .map_err(|e| malformed(reader.buffer_position() as u64, e))?;
                        self.characters(text);
                    }
                    None
                }
                Event::Eof => {
                    return Err(malformed(
                        reader.buffer_position() as u64,
                        format!("document ended before </{}>", self.root_tag),
                    ));
                }
                _ => None,
            };

            if let Some(node) = finished {
                self.trailing(&mut reader)?;
                debug!(root = self.root_tag, "parsed document");
                return Ok(node);
            }
        }
    }

    /// Only comments, processing instructions and whitespace may follow the
    /// root element.
    fn trailing(&self, reader: &mut Reader<&[u8]>) -> Result<()> {
        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(reader.buffer_position() as u64, e))?;
            match event {
                Event::Eof => return Ok(()),
                Event::Comment(_) | Event::PI(_) => {}
                Event::Text(ref text) if text.iter().all(u8::is_ascii_whitespace) => {}
                _ => {
                    return Err(malformed(
                        reader.buffer_position() as u64,
                        format!("content after </{}>", self.root_tag),
                    ));
                }
            }
        }
    }

    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        if self.skipping > 0 {
            self.skipping += 1;
            return Ok(());
        }

        let local = start.local_name();
        let name = std::str::from_utf8(local.as_ref()).map_err(|e| malformed(0, e))?;

        let Some(top) = self.stack.last() else {
            if name != self.root_tag {
                return Err(CloudError::UnexpectedRoot {
                    expected: self.root_tag,
                    found: name.to_string(),
                });
            }
            self.stack.push(Frame::open(self.root_tag, self.root_kind));
            return Ok(());
        };

        match top.child(name) {
            Some(_) if is_nil(start) => {
                trace!(element = name, "skipping nil element");
                self.skipping = 1;
            }
            Some((tag, kind)) => self.stack.push(Frame::open(tag, kind)),
            None => {
                trace!(element = name, "skipping unrecognized element");
                self.skipping = 1;
            }
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) {
        if let Some(Frame::Text { buffer, .. }) = self.stack.last_mut() {
            buffer.push_str(text);
        }
    }

    /// Close the current element; returns the root node once it closes.
    fn close(&mut self) -> Option<Node> {
        if self.skipping > 0 {
            self.skipping -= 1;
            return None;
        }

        let (tag, node) = self.stack.pop()?.finish();
        match self.stack.last_mut() {
            Some(parent) => {
                if let Some(node) = node {
                    parent.attach(tag, node);
                }
                None
            }
            None => Some(node.unwrap_or(Node::Record(Record::new(tag)))),
        }
    }

    fn wants_text(&self) -> bool {
        self.skipping == 0 && matches!(self.stack.last(), Some(Frame::Text { .. }))
    }
}

fn is_nil(start: &BytesStart<'_>) -> bool {
    start.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true"
    })
}

fn malformed(position: u64, error: impl std::fmt::Display) -> CloudError {
    CloudError::Xml {
        position,
        message: error.to_string(),
    }
}
