// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative element tables consumed by the document walker.
//!
//! Every entity is described by one [`Schema`]: the name of the element that
//! carries it and the fixed set of child tags it recognises. Anything not
//! listed is skipped by the walker.

/// How the walker treats a recognised child element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Scalar element; its text content is buffered.
    Text,
    /// Nested entity parsed with the given schema.
    Entity(&'static Schema),
    /// Container of repeated entities whose element name is the schema name.
    List(&'static Schema),
    /// Container of repeated scalar elements with the given tag.
    Texts(&'static str),
}

/// One recognised child tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub tag: &'static str,
    pub kind: Kind,
}

impl Field {
    #[must_use]
    pub const fn text(tag: &'static str) -> Self {
        Self {
            tag,
            kind: Kind::Text,
        }
    }

    #[must_use]
    pub const fn entity(tag: &'static str, schema: &'static Schema) -> Self {
        Self {
            tag,
            kind: Kind::Entity(schema),
        }
    }

    #[must_use]
    pub const fn list(tag: &'static str, item: &'static Schema) -> Self {
        Self {
            tag,
            kind: Kind::List(item),
        }
    }

    #[must_use]
    pub const fn texts(tag: &'static str, item: &'static str) -> Self {
        Self {
            tag,
            kind: Kind::Texts(item),
        }
    }
}

/// Element table of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Element name the entity is carried in.
    pub name: &'static str,
    /// Recognised children.
    pub fields: &'static [Field],
}

impl Schema {
    /// Look up the binding for a child element.
    #[must_use]
    pub fn field(&self, tag: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.tag == tag)
    }
}
