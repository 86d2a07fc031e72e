//! Entity catalogs loaded from YAML.
//!
//! A schema file declares a list of entities. Entities reference each other by
//! name (`extends`, `one_to_one`, `one_to_many`); the catalog resolves those
//! names into shared [`EntitySchema`] objects, parents and referenced entities
//! first.
//!
//! # YAML Format
//!
//! ```yaml
//! version: 1
//! entities:
//!   - name: Organization
//!     fields:
//!       - name: name
//!         type:
//!           type: string
//!           charset: alpha
//!         required: true
//!
//!   - name: Host
//!     api_names:
//!       organization: organization_id
//!     fields:
//!       - name: organization
//!         type:
//!           type: one_to_one
//!           entity: Organization
//!         required: true
//!       - name: mac
//!         type: mac_address
//! ```

use crate::kinds::{
    Charset, FieldKind, LengthRange, StringSpec, DEFAULT_INTEGER_MAX, DEFAULT_INTEGER_MIN,
};
use crate::schema::{EntitySchema, FieldDescriptor, SchemaError};
use crate::values::FieldValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// File Types
// ============================================================================

fn default_version() -> u32 {
    1
}

/// Top-level schema document.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFile {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Entity definitions
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

/// One entity as written in a schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityDefinition {
    /// Entity name
    pub name: String,

    /// Name of the parent entity whose fields are inherited
    #[serde(default)]
    pub extends: Option<String>,

    /// Field definitions
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    /// Canonical name to REST name
    #[serde(default)]
    pub api_names: BTreeMap<String, String>,

    /// Canonical name to CLI option name
    #[serde(default)]
    pub cli_names: BTreeMap<String, String>,
}

/// One field as written in a schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Field kind, with references still given by entity name
    #[serde(rename = "type")]
    pub kind: KindDefinition,

    /// Whether the field is always populated
    #[serde(default)]
    pub required: bool,

    /// Value used instead of a generated one
    #[serde(default)]
    pub default: Option<serde_yaml::Value>,
}

/// Unresolved field kind.
///
/// Simple kinds can be specified as strings:
/// ```yaml
/// type: email
/// type: boolean
/// ```
///
/// Parameterised kinds use object format:
/// ```yaml
/// type:
///   type: integer
///   min: 1
///   max: 1000
/// type:
///   type: one_to_many
///   entity: Location
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum KindDefinition {
    String {
        charset: Charset,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Text {
        charset: Charset,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Boolean,
    Choice {
        values: Vec<serde_yaml::Value>,
    },
    OneToOne {
        entity: String,
    },
    OneToMany {
        entity: String,
    },
    List {
        element: Box<KindDefinition>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Email,
    IpAddress,
    MacAddress,
    Url,
    Date,
    DateTime,
}

fn simple_kind(name: &str) -> Option<KindDefinition> {
    match name {
        "string" | "str" => Some(KindDefinition::String {
            charset: Charset::default(),
            min_length: None,
            max_length: None,
        }),
        "text" => Some(KindDefinition::Text {
            charset: Charset::default(),
            min_length: None,
            max_length: None,
        }),
        "integer" | "int" => Some(KindDefinition::Integer {
            min: None,
            max: None,
        }),
        "boolean" | "bool" => Some(KindDefinition::Boolean),
        "email" => Some(KindDefinition::Email),
        "ip_address" | "ipaddr" => Some(KindDefinition::IpAddress),
        "mac_address" | "mac" => Some(KindDefinition::MacAddress),
        "url" => Some(KindDefinition::Url),
        "date" => Some(KindDefinition::Date),
        "datetime" | "date_time" => Some(KindDefinition::DateTime),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for KindDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct KindVisitor;

        impl<'de> Visitor<'de> for KindVisitor {
            type Value = KindDefinition;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string or map representing a field kind")
            }

            // Handle string format: "email", "boolean", etc.
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                simple_kind(value).ok_or_else(|| E::custom(format!("unknown simple kind: {value}")))
            }

            // Handle map format: {"type": "one_to_one", "entity": "Organization"}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "string" | "str" => Ok(KindDefinition::String {
                        charset: get_field(&fields, "charset")?.unwrap_or_default(),
                        min_length: get_field(&fields, "min_length")?,
                        max_length: get_field(&fields, "max_length")?,
                    }),
                    "text" => Ok(KindDefinition::Text {
                        charset: get_field(&fields, "charset")?.unwrap_or_default(),
                        min_length: get_field(&fields, "min_length")?,
                        max_length: get_field(&fields, "max_length")?,
                    }),
                    "integer" | "int" => Ok(KindDefinition::Integer {
                        min: get_field(&fields, "min")?,
                        max: get_field(&fields, "max")?,
                    }),
                    "choice" => {
                        let values = get_field_required(&fields, "values")?;
                        Ok(KindDefinition::Choice { values })
                    }
                    "one_to_one" => {
                        let entity = get_field_required(&fields, "entity")?;
                        Ok(KindDefinition::OneToOne { entity })
                    }
                    "one_to_many" => {
                        let entity = get_field_required(&fields, "entity")?;
                        Ok(KindDefinition::OneToMany { entity })
                    }
                    "list" => {
                        let element: KindDefinition = get_field_required(&fields, "element")?;
                        Ok(KindDefinition::List {
                            element: Box::new(element),
                            min_length: get_field(&fields, "min_length")?,
                            max_length: get_field(&fields, "max_length")?,
                        })
                    }
                    other => simple_kind(other)
                        .ok_or_else(|| M::Error::custom(format!("unknown kind: {other}"))),
                }
            }
        }

        deserializer.deserialize_any(KindVisitor)
    }
}

// Helper functions for deserialization
fn get_field<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Result<Option<T>, E> {
    fields
        .get(key)
        .map(|value| {
            serde_yaml::from_value(value.clone())
                .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
        })
        .transpose()
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

// ============================================================================
// Catalog
// ============================================================================

/// Named set of resolved entity schemas.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    version: u32,
    entities: BTreeMap<String, Arc<EntitySchema>>,
}

impl EntityCatalog {
    /// Load a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: SchemaFile = serde_yaml::from_str(yaml)?;
        Self::from_schema_file(&file)
    }

    /// Resolve every entity of an already parsed schema file.
    pub fn from_schema_file(file: &SchemaFile) -> Result<Self, SchemaError> {
        let mut definitions = HashMap::with_capacity(file.entities.len());
        for entity in &file.entities {
            if definitions.insert(entity.name.as_str(), entity).is_some() {
                return Err(SchemaError::DuplicateEntity(entity.name.clone()));
            }
        }

        let mut resolver = Resolver {
            definitions,
            resolved: BTreeMap::new(),
            visiting: Vec::new(),
        };
        for entity in &file.entities {
            resolver.resolve(&entity.name)?;
        }

        Ok(Self {
            version: file.version,
            entities: resolver.resolved,
        })
    }

    /// Schema file version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Get an entity schema by name.
    pub fn get(&self, name: &str) -> Option<&Arc<EntitySchema>> {
        self.entities.get(name)
    }

    /// Get an entity schema by name, failing when it is missing.
    pub fn require(&self, name: &str) -> Result<Arc<EntitySchema>, SchemaError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| SchemaError::EntityNotFound(name.to_string()))
    }

    /// Get all entity names in the catalog.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Depth-first resolution of entity names into schemas.
struct Resolver<'a> {
    definitions: HashMap<&'a str, &'a EntityDefinition>,
    resolved: BTreeMap<String, Arc<EntitySchema>>,
    visiting: Vec<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, name: &str) -> Result<Arc<EntitySchema>, SchemaError> {
        if let Some(schema) = self.resolved.get(name) {
            return Ok(Arc::clone(schema));
        }
        if self.visiting.iter().any(|n| n == name) {
            return Err(SchemaError::Cycle(name.to_string()));
        }
        let definition = *self
            .definitions
            .get(name)
            .ok_or_else(|| SchemaError::EntityNotFound(name.to_string()))?;

        self.visiting.push(name.to_string());

        let mut builder = EntitySchema::builder(&definition.name);
        if let Some(parent) = &definition.extends {
            if !self.definitions.contains_key(parent.as_str()) {
                return Err(SchemaError::UnknownParent {
                    entity: definition.name.clone(),
                    parent: parent.clone(),
                });
            }
            let parent = self.resolve(parent)?;
            builder = builder.extends(&parent);
        }

        for field in &definition.fields {
            let kind = self.resolve_kind(&field.kind, definition, &field.name)?;
            let mut descriptor = if field.required {
                FieldDescriptor::required(kind)
            } else {
                FieldDescriptor::new(kind)
            };
            if let Some(yaml) = &field.default {
                let value = default_from_yaml(yaml, descriptor.kind());
                if !value.is_null() && !descriptor.kind().matches(&value) {
                    return Err(SchemaError::InvalidDefault {
                        entity: definition.name.clone(),
                        field: field.name.clone(),
                        kind: descriptor.kind().name(),
                    });
                }
                descriptor = descriptor.with_default(value);
            }
            builder = builder.field(&field.name, descriptor);
        }

        for (canonical, remapped) in &definition.api_names {
            builder = builder.api_name(canonical, remapped);
        }
        for (canonical, remapped) in &definition.cli_names {
            builder = builder.cli_name(canonical, remapped);
        }

        self.visiting.pop();

        let schema = builder.build();
        self.resolved
            .insert(definition.name.clone(), Arc::clone(&schema));
        Ok(schema)
    }

    fn resolve_kind(
        &mut self,
        kind: &KindDefinition,
        entity: &EntityDefinition,
        field: &str,
    ) -> Result<FieldKind, SchemaError> {
        let resolved = match kind {
            KindDefinition::String {
                charset,
                min_length,
                max_length,
            } => FieldKind::String(StringSpec {
                charset: *charset,
                length: length_range(StringSpec::string().length, *min_length, *max_length),
            }),
            KindDefinition::Text {
                charset,
                min_length,
                max_length,
            } => FieldKind::Text(StringSpec {
                charset: *charset,
                length: length_range(StringSpec::text().length, *min_length, *max_length),
            }),
            KindDefinition::Integer { min, max } => FieldKind::integer_range(
                min.unwrap_or(DEFAULT_INTEGER_MIN),
                max.unwrap_or(DEFAULT_INTEGER_MAX),
            ),
            KindDefinition::Boolean => FieldKind::Boolean,
            KindDefinition::Choice { values } => FieldKind::Choice {
                values: values.iter().map(FieldValue::from_yaml).collect(),
            },
            KindDefinition::OneToOne { entity: target } => FieldKind::OneToOne {
                entity: self.resolve_reference(entity, field, target)?,
            },
            KindDefinition::OneToMany { entity: target } => FieldKind::OneToMany {
                entity: self.resolve_reference(entity, field, target)?,
            },
            KindDefinition::List {
                element,
                min_length,
                max_length,
            } => {
                let element = self.resolve_kind(element, entity, field)?;
                FieldKind::List {
                    element: Box::new(element),
                    length: length_range(LengthRange::new(0, 3), *min_length, *max_length),
                }
            }
            KindDefinition::Email => FieldKind::Email,
            KindDefinition::IpAddress => FieldKind::IpAddress,
            KindDefinition::MacAddress => FieldKind::MacAddress,
            KindDefinition::Url => FieldKind::Url,
            KindDefinition::Date => FieldKind::Date,
            KindDefinition::DateTime => FieldKind::DateTime,
        };
        check_length(&resolved, entity, field)?;
        Ok(resolved)
    }

    fn resolve_reference(
        &mut self,
        entity: &EntityDefinition,
        field: &str,
        target: &str,
    ) -> Result<Arc<EntitySchema>, SchemaError> {
        if !self.definitions.contains_key(target) {
            return Err(SchemaError::UnknownReference {
                entity: entity.name.clone(),
                field: field.to_string(),
                target: target.to_string(),
            });
        }
        self.resolve(target)
    }
}

/// Fill in missing bounds from `default`. A missing maximum never drops below
/// the given minimum.
fn length_range(
    default: LengthRange,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> LengthRange {
    let min = min_length.unwrap_or(default.min);
    let max = max_length.unwrap_or(default.max.max(min));
    LengthRange::new(min, max)
}

/// Reject length ranges no value can satisfy: inverted ranges everywhere, and
/// `max_length: 0` for strings, which are never empty.
fn check_length(
    kind: &FieldKind,
    entity: &EntityDefinition,
    field: &str,
) -> Result<(), SchemaError> {
    let (length, least_max) = match kind {
        FieldKind::String(spec) | FieldKind::Text(spec) => (spec.length, 1),
        FieldKind::List { length, .. } => (*length, 0),
        _ => return Ok(()),
    };
    if !length.is_valid() || length.max < least_max {
        return Err(SchemaError::InvalidLength {
            entity: entity.name.clone(),
            field: field.to_string(),
            min: length.min,
            max: length.max,
        });
    }
    Ok(())
}

/// Convert a YAML default, parsing date strings for temporal kinds.
fn default_from_yaml(yaml: &serde_yaml::Value, kind: &FieldKind) -> FieldValue {
    match (kind, yaml) {
        (FieldKind::Date, serde_yaml::Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(FieldValue::Date)
            .unwrap_or_else(|_| FieldValue::String(s.clone())),
        (FieldKind::DateTime, serde_yaml::Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc)))
            .unwrap_or_else(|_| FieldValue::String(s.clone())),
        (FieldKind::List { element, .. }, serde_yaml::Value::Sequence(items)) => FieldValue::List(
            items
                .iter()
                .map(|item| default_from_yaml(item, element))
                .collect(),
        ),
        _ => FieldValue::from_yaml(yaml),
    }
}

// ============================================================================
// Tests
// ============================================================================
