//! Field kinds for the entity-factory framework.
//!
//! This module defines `FieldKind`, the value domain of an entity attribute.
//! The generator crate produces one random value per kind; `FieldKind::matches`
//! tells whether an arbitrary value lies inside a kind's domain.

use crate::schema::EntitySchema;
use crate::values::FieldValue;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// Character set used when generating strings.
///
/// # YAML Format
///
/// ```yaml
/// type:
///   type: string
///   charset: alpha
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// ASCII letters
    Alpha,
    /// ASCII letters and digits
    Alphanumeric,
    /// ASCII digits
    Numeric,
    /// Latin-1 supplement letters
    Latin1,
    /// Printable code points from several scripts
    #[default]
    Utf8,
    /// CJK unified ideographs
    Cjk,
    /// Alphabetic text wrapped in an HTML tag
    Html,
}

impl Charset {
    /// Every charset, in declaration order.
    pub const ALL: [Charset; 7] = [
        Charset::Alpha,
        Charset::Alphanumeric,
        Charset::Numeric,
        Charset::Latin1,
        Charset::Utf8,
        Charset::Cjk,
        Charset::Html,
    ];

    /// Lowercase charset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Alphanumeric => "alphanumeric",
            Self::Numeric => "numeric",
            Self::Latin1 => "latin1",
            Self::Utf8 => "utf8",
            Self::Cjk => "cjk",
            Self::Html => "html",
        }
    }
}

/// Lower bound of an integer field without an explicit range.
pub const DEFAULT_INTEGER_MIN: i64 = i32::MIN as i64;

/// Upper bound of an integer field without an explicit range.
pub const DEFAULT_INTEGER_MAX: i64 = i32::MAX as i64;

/// Inclusive length range, counted in characters or list elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `len` lies inside the range.
    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }

    /// Whether the range contains at least one length.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Charset and length of a string or text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSpec {
    pub charset: Charset,
    pub length: LengthRange,
}

impl StringSpec {
    /// Short string: utf8, 1 to 30 characters.
    pub const fn string() -> Self {
        Self {
            charset: Charset::Utf8,
            length: LengthRange::new(1, 30),
        }
    }

    /// Long text: utf8, 1 to 300 characters.
    pub const fn text() -> Self {
        Self {
            charset: Charset::Utf8,
            length: LengthRange::new(1, 300),
        }
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length = LengthRange::new(min, max);
        self
    }
}

/// Value domain of an entity attribute.
///
/// Reference kinds hold the referenced schema itself, so a resolved kind can
/// never point at a missing entity.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Short printable string
    String(StringSpec),

    /// Long printable string
    Text(StringSpec),

    /// Signed integer in an inclusive range
    Integer {
        min: i64,
        max: i64,
    },

    /// True or false
    Boolean,

    /// One of a fixed set of literals
    Choice {
        values: Vec<FieldValue>,
    },

    /// A single instance of another entity
    OneToOne {
        entity: Arc<EntitySchema>,
    },

    /// Zero or more instances of another entity
    OneToMany {
        entity: Arc<EntitySchema>,
    },

    /// Zero or more values of an element kind
    List {
        element: Box<FieldKind>,
        length: LengthRange,
    },

    Email,
    IpAddress,
    MacAddress,
    Url,

    /// Calendar date (YYYY-MM-DD)
    Date,

    /// UTC timestamp
    DateTime,
}

impl FieldKind {
    pub fn string() -> Self {
        Self::String(StringSpec::string())
    }

    pub fn text() -> Self {
        Self::Text(StringSpec::text())
    }

    /// Integer over the signed 32-bit range.
    pub fn integer() -> Self {
        Self::Integer {
            min: DEFAULT_INTEGER_MIN,
            max: DEFAULT_INTEGER_MAX,
        }
    }

    pub fn integer_range(min: i64, max: i64) -> Self {
        Self::Integer { min, max }
    }

    pub fn choice<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        Self::Choice {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn one_to_one(entity: &Arc<EntitySchema>) -> Self {
        Self::OneToOne {
            entity: Arc::clone(entity),
        }
    }

    pub fn one_to_many(entity: &Arc<EntitySchema>) -> Self {
        Self::OneToMany {
            entity: Arc::clone(entity),
        }
    }

    /// List of 0 to 3 elements.
    pub fn list(element: FieldKind) -> Self {
        Self::List {
            element: Box::new(element),
            length: LengthRange::new(0, 3),
        }
    }

    /// Kind name as written in schema files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Text(_) => "text",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
            Self::Choice { .. } => "choice",
            Self::OneToOne { .. } => "one_to_one",
            Self::OneToMany { .. } => "one_to_many",
            Self::List { .. } => "list",
            Self::Email => "email",
            Self::IpAddress => "ip_address",
            Self::MacAddress => "mac_address",
            Self::Url => "url",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    /// The schema a reference kind points at.
    pub fn referenced_entity(&self) -> Option<&Arc<EntitySchema>> {
        match self {
            Self::OneToOne { entity } | Self::OneToMany { entity } => Some(entity),
            Self::List { element, .. } => element.referenced_entity(),
            _ => None,
        }
    }

    /// Whether `value` lies inside this kind's domain.
    ///
    /// Only the shape is checked for references: a one-to-one value must be an
    /// attribute map, a one-to-many value a list of attribute maps.
    pub fn matches(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::String(spec) | Self::Text(spec), FieldValue::String(s)) => {
                spec.length.contains(s.chars().count())
            }
            (Self::Integer { min, max }, FieldValue::Int(i)) => (*min..=*max).contains(i),
            (Self::Boolean, FieldValue::Bool(_)) => true,
            (Self::Choice { values }, v) => values.contains(v),
            (Self::OneToOne { .. }, FieldValue::Entity(_)) => true,
            (Self::OneToMany { .. }, FieldValue::List(items)) => {
                items.iter().all(|item| matches!(item, FieldValue::Entity(_)))
            }
            (Self::List { element, .. }, FieldValue::List(items)) => {
                items.iter().all(|item| element.matches(item))
            }
            (Self::Email, FieldValue::String(s)) => is_email(s),
            (Self::IpAddress, FieldValue::String(s)) => s.parse::<IpAddr>().is_ok(),
            (Self::MacAddress, FieldValue::String(s)) => is_mac_address(s),
            (Self::Url, FieldValue::String(s)) => is_url(s),
            (Self::Date, FieldValue::Date(_)) => true,
            (Self::DateTime, FieldValue::DateTime(_)) => true,
            _ => false,
        }
    }
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn is_mac_address(s: &str) -> bool {
    let octets: Vec<&str> = s.split(':').collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_url(s: &str) -> bool {
    match s.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphabetic())
                && !rest.is_empty()
        }
        None => false,
    }
}
