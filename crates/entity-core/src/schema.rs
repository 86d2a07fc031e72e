//! Schema definitions for the entity-factory framework.
//!
//! ## Type Hierarchy
//!
//! - `FieldDescriptor` - Kind, requiredness and default of one attribute
//! - `EntitySchema` - Named descriptors, rename tables and an optional parent
//! - `EntitySchemaBuilder` - Declarative construction of an `EntitySchema`
//!
//! Schemas are immutable once built and are shared through `Arc`; tests that
//! need different rename tables build a fresh schema instead of mutating one.

use crate::interface::Interface;
use crate::kinds::FieldKind;
use crate::values::FieldValue;
use std::collections::BTreeMap;
use std::sync::Arc;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Entity not found in catalog
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Two entities share a name
    #[error("Entity '{0}' is defined more than once")]
    DuplicateEntity(String),

    /// `extends` names an entity that does not exist
    #[error("Entity '{entity}' extends unknown entity '{parent}'")]
    UnknownParent { entity: String, parent: String },

    /// A reference kind names an entity that does not exist
    #[error("Field '{field}' of entity '{entity}' references unknown entity '{target}'")]
    UnknownReference {
        entity: String,
        field: String,
        target: String,
    },

    /// Parents or references loop back to an entity being resolved
    #[error("Entity '{0}' is part of an inheritance or reference cycle")]
    Cycle(String),

    /// A length range that no value can satisfy
    #[error("Field '{field}' of entity '{entity}' has an unsatisfiable length range {min}..={max}")]
    InvalidLength {
        entity: String,
        field: String,
        min: usize,
        max: usize,
    },

    /// A declared default lies outside its field's domain
    #[error("Default for field '{field}' of entity '{entity}' is not a valid {kind} value")]
    InvalidDefault {
        entity: String,
        field: String,
        kind: &'static str,
    },
}

// ============================================================================
// Field Descriptor
// ============================================================================

/// Metadata for one attribute of an entity.
///
/// Descriptors are shared through `Arc<FieldDescriptor>`; two descriptors built
/// from equal parameters are still distinct objects, so identity is compared
/// with `Arc::ptr_eq`.
#[derive(Debug)]
pub struct FieldDescriptor {
    kind: FieldKind,
    required: bool,
    default: Option<FieldValue>,
}

impl FieldDescriptor {
    /// Create an optional field.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
        }
    }

    /// Create a required field.
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            default: None,
        }
    }

    /// Supply a value used instead of a generated one.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The pre-supplied value, if any. A null default counts as absent.
    pub fn default_value(&self) -> Option<&FieldValue> {
        self.default.as_ref().filter(|v| !v.is_null())
    }
}

/// Field name to descriptor, the shape `get_fields` returns.
pub type FieldMap = BTreeMap<String, Arc<FieldDescriptor>>;

// ============================================================================
// Entity Schema
// ============================================================================

/// Declarative description of an entity's attributes.
#[derive(Debug)]
pub struct EntitySchema {
    name: String,
    fields: FieldMap,
    api_names: BTreeMap<String, String>,
    cli_names: BTreeMap<String, String>,
    parent: Option<Arc<EntitySchema>>,
}

impl EntitySchema {
    /// Start declaring a schema.
    pub fn builder(name: impl Into<String>) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            name: name.into(),
            fields: FieldMap::new(),
            api_names: BTreeMap::new(),
            cli_names: BTreeMap::new(),
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<EntitySchema>> {
        self.parent.as_ref()
    }

    /// Every field of this schema, inherited ones included.
    ///
    /// Ancestors are merged first so a field declared on this schema replaces
    /// an inherited field of the same name.
    pub fn get_fields(&self) -> FieldMap {
        let mut fields = match &self.parent {
            Some(parent) => parent.get_fields(),
            None => FieldMap::new(),
        };
        for (name, descriptor) in &self.fields {
            fields.insert(name.clone(), Arc::clone(descriptor));
        }
        fields
    }

    /// Look up one field by canonical name, searching ancestors too.
    pub fn get_field(&self, name: &str) -> Option<Arc<FieldDescriptor>> {
        match self.fields.get(name) {
            Some(descriptor) => Some(Arc::clone(descriptor)),
            None => self.parent.as_ref().and_then(|p| p.get_field(name)),
        }
    }

    /// Get all canonical field names, inherited ones included.
    pub fn field_names(&self) -> Vec<String> {
        self.get_fields().into_keys().collect()
    }

    /// Merged `api_names` table (own entries win over inherited ones).
    pub fn api_names(&self) -> BTreeMap<String, String> {
        self.merged_names(|schema| &schema.api_names)
    }

    /// Merged `cli_names` table (own entries win over inherited ones).
    pub fn cli_names(&self) -> BTreeMap<String, String> {
        self.merged_names(|schema| &schema.cli_names)
    }

    /// The rename table for an interface; empty for `Interface::Default`.
    pub fn renames(&self, interface: Interface) -> BTreeMap<String, String> {
        match interface {
            Interface::Default => BTreeMap::new(),
            Interface::Api => self.api_names(),
            Interface::Cli => self.cli_names(),
        }
    }

    fn merged_names(
        &self,
        table: fn(&EntitySchema) -> &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        let mut names = match &self.parent {
            Some(parent) => parent.merged_names(table),
            None => BTreeMap::new(),
        };
        names.extend(
            table(self)
                .iter()
                .map(|(canonical, remapped)| (canonical.clone(), remapped.clone())),
        );
        names
    }
}

/// Builder for [`EntitySchema`].
#[derive(Debug)]
pub struct EntitySchemaBuilder {
    name: String,
    fields: FieldMap,
    api_names: BTreeMap<String, String>,
    cli_names: BTreeMap<String, String>,
    parent: Option<Arc<EntitySchema>>,
}

impl EntitySchemaBuilder {
    /// Inherit the fields and rename tables of `parent`.
    pub fn extends(mut self, parent: &Arc<EntitySchema>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Declare a field. Declaring the same name twice keeps the last one.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), Arc::new(descriptor));
        self
    }

    /// Name `canonical` as `remapped` under the API interface.
    pub fn api_name(mut self, canonical: impl Into<String>, remapped: impl Into<String>) -> Self {
        self.api_names.insert(canonical.into(), remapped.into());
        self
    }

    /// Name `canonical` as `remapped` under the CLI interface.
    pub fn cli_name(mut self, canonical: impl Into<String>, remapped: impl Into<String>) -> Self {
        self.cli_names.insert(canonical.into(), remapped.into());
        self
    }

    pub fn build(self) -> Arc<EntitySchema> {
        Arc::new(EntitySchema {
            name: self.name,
            fields: self.fields,
            api_names: self.api_names,
            cli_names: self.cli_names,
            parent: self.parent,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn non_empty_entity() -> Arc<EntitySchema> {
        EntitySchema::builder("NonEmptyEntity")
            .field("name", FieldDescriptor::required(FieldKind::string()))
            .field("cost", FieldDescriptor::new(FieldKind::integer()))
            .build()
    }

    #[test]
    fn test_empty_schema_has_no_fields() {
        let schema = EntitySchema::builder("EmptyEntity").build();
        assert!(schema.get_fields().is_empty());
        assert!(schema.field_names().is_empty());
    }

    #[test]
    fn test_is_required() {
        assert!(!FieldDescriptor::new(FieldKind::Boolean).is_required());
        assert!(FieldDescriptor::required(FieldKind::Boolean).is_required());
    }

    #[test]
    fn test_null_default_counts_as_absent() {
        let descriptor = FieldDescriptor::new(FieldKind::string()).with_default(FieldValue::Null);
        assert!(descriptor.default_value().is_none());

        let descriptor = FieldDescriptor::new(FieldKind::string()).with_default("x");
        assert_eq!(descriptor.default_value(), Some(&FieldValue::from("x")));
    }

    #[test]
    fn test_get_fields() {
        let schema = non_empty_entity();
        let fields = schema.get_fields();
        assert_eq!(fields.len(), 2);
        assert!(fields["name"].is_required());
        assert!(!fields["cost"].is_required());
    }

    #[test]
    fn test_descriptors_are_distinct_objects() {
        let first = non_empty_entity();
        let second = non_empty_entity();
        assert!(!Arc::ptr_eq(
            &first.get_fields()["name"],
            &second.get_fields()["name"]
        ));
        assert!(Arc::ptr_eq(
            &first.get_fields()["name"],
            &first.get_field("name").unwrap()
        ));
    }

    #[test]
    fn test_inherited_fields_merge() {
        let base = non_empty_entity();
        let derived = EntitySchema::builder("Derived")
            .extends(&base)
            .field("cost", FieldDescriptor::required(FieldKind::integer_range(0, 10)))
            .field("label", FieldDescriptor::new(FieldKind::string()))
            .build();

        let fields = derived.get_fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("label"));
        // Derived definition wins
        assert!(fields["cost"].is_required());
        assert!(matches!(
            fields["cost"].kind(),
            FieldKind::Integer { min: 0, max: 10 }
        ));

        // Parent is untouched
        assert_eq!(base.get_fields().len(), 2);
        assert!(!base.get_fields()["cost"].is_required());
    }

    #[test]
    fn test_rename_tables_merge() {
        let base = EntitySchema::builder("Base")
            .api_name("name", "base_name")
            .api_name("organization", "organization_id")
            .build();
        let derived = EntitySchema::builder("Derived")
            .extends(&base)
            .api_name("name", "derived_name")
            .cli_name("name", "new-name")
            .build();

        let api = derived.renames(Interface::Api);
        assert_eq!(api["name"], "derived_name");
        assert_eq!(api["organization"], "organization_id");
        assert_eq!(derived.renames(Interface::Cli)["name"], "new-name");
        assert!(derived.renames(Interface::Default).is_empty());
    }
}
