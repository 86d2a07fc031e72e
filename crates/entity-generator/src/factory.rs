//! Attribute factory: schema + interface + overrides -> attribute mapping.

use crate::generators::{generate_value, FieldContext};
use entity_core::{
    AttributeMap, EntitySchema, FieldDescriptor, FieldMap, FieldValue, Interface,
    InvalidInterfaceError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{btree_map, BTreeMap};
use std::sync::Arc;

/// Error type for factory operations.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// An override names a field that is not in the interface view
    #[error("Unknown field '{field}' for entity '{entity}' under the {interface} interface")]
    UnknownField {
        entity: String,
        field: String,
        interface: Interface,
    },

    /// The generator cannot produce a value for a field's kind
    #[error("Cannot generate {kind} value for field '{field}' of entity '{entity}': {reason}")]
    UnsupportedFieldKind {
        entity: String,
        field: String,
        kind: &'static str,
        reason: String,
    },

    #[error(transparent)]
    InvalidInterface(#[from] InvalidInterfaceError),
}

/// Caller-supplied field values, keyed by interface-specific field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    values: BTreeMap<String, FieldValue>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, FieldValue> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.values
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (name, value) in iter {
            overrides.insert(name, value);
        }
        overrides
    }
}

/// Whether a field appears in the attribute mapping.
///
/// Required fields, overridden fields and fields with a non-null default are
/// populated; every other optional field is left out.
pub fn should_populate(descriptor: &FieldDescriptor, override_present: bool) -> bool {
    descriptor.is_required() || override_present || descriptor.default_value().is_some()
}

/// Builds attribute mappings for one entity schema under one interface.
///
/// A factory holds no state between calls. Without a seed every call draws
/// from the thread-local RNG; with a seed every call starts from a fresh
/// `StdRng`, so identical overrides produce identical mappings.
#[derive(Debug, Clone)]
pub struct Factory {
    schema: Arc<EntitySchema>,
    interface: Interface,
    seed: Option<u64>,
}

impl Factory {
    /// Factory using canonical field names.
    pub fn new(schema: Arc<EntitySchema>) -> Self {
        Self::with_interface(schema, Interface::Default)
    }

    pub fn with_interface(schema: Arc<EntitySchema>, interface: Interface) -> Self {
        Self {
            schema,
            interface,
            seed: None,
        }
    }

    /// Factory for an interface given by name (`default`, `api` or `cli`).
    pub fn for_interface(schema: Arc<EntitySchema>, interface: &str) -> Result<Self, FactoryError> {
        let interface = interface.parse::<Interface>()?;
        Ok(Self::with_interface(schema, interface))
    }

    /// Make generation deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn schema(&self) -> &Arc<EntitySchema> {
        &self.schema
    }

    pub fn interface(&self) -> Interface {
        self.interface
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Rename the keys of `fields` for this factory's interface.
    ///
    /// Rename entries whose canonical name is not in `fields` are ignored.
    /// Renamed entries are inserted after the pass-through ones, so a rename
    /// that lands on another field's canonical name replaces that field.
    pub fn customize_field_names(&self, fields: FieldMap) -> FieldMap {
        let renames = self.schema.renames(self.interface);
        if renames.is_empty() {
            return fields;
        }

        let mut customized = FieldMap::new();
        let mut renamed = Vec::new();
        for (name, descriptor) in fields {
            match renames.get(&name) {
                Some(remapped) => renamed.push((remapped.clone(), descriptor)),
                None => {
                    customized.insert(name, descriptor);
                }
            }
        }
        customized.extend(renamed);
        customized
    }

    /// The schema's fields under this factory's interface names.
    pub fn fields(&self) -> FieldMap {
        self.customize_field_names(self.schema.get_fields())
    }

    /// Attribute mapping with every value generated or defaulted.
    pub fn attributes(&self) -> Result<AttributeMap, FactoryError> {
        self.attributes_with(Overrides::new())
    }

    /// Attribute mapping with `overrides` applied.
    ///
    /// Override keys use the interface names (`customized`, not `name`, when
    /// the API table renames `name`).
    pub fn attributes_with(&self, overrides: Overrides) -> Result<AttributeMap, FactoryError> {
        match self.seed {
            Some(seed) => self.attributes_with_rng(&mut StdRng::seed_from_u64(seed), overrides),
            None => self.attributes_with_rng(&mut rand::rng(), overrides),
        }
    }

    /// Attribute mapping drawing generated values from `rng`.
    pub fn attributes_with_rng<R: Rng>(
        &self,
        rng: &mut R,
        overrides: Overrides,
    ) -> Result<AttributeMap, FactoryError> {
        let fields = self.fields();

        if let Some(unknown) = overrides.keys().find(|name| !fields.contains_key(*name)) {
            return Err(FactoryError::UnknownField {
                entity: self.schema.name().to_string(),
                field: unknown.clone(),
                interface: self.interface,
            });
        }

        let mut overrides = overrides.into_inner();
        let mut attributes = AttributeMap::new();
        for (name, descriptor) in &fields {
            let override_value = overrides.remove(name);
            if !should_populate(descriptor, override_value.is_some()) {
                continue;
            }

            let value = match (override_value, descriptor.default_value()) {
                (Some(value), _) => value,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    let context = FieldContext {
                        entity: self.schema.name(),
                        field: name,
                    };
                    generate_value(descriptor.kind(), context, self.interface, rng)?
                }
            };
            attributes.insert(name.clone(), value);
        }

        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_core::FieldKind;

    fn empty_entity() -> Arc<EntitySchema> {
        EntitySchema::builder("EmptyEntity").build()
    }

    fn non_empty_entity() -> Arc<EntitySchema> {
        EntitySchema::builder("NonEmptyEntity")
            .field("name", FieldDescriptor::required(FieldKind::string()))
            .field("cost", FieldDescriptor::new(FieldKind::integer()))
            .build()
    }

    fn remapped_entity() -> Arc<EntitySchema> {
        EntitySchema::builder("NonEmptyEntity")
            .field("name", FieldDescriptor::required(FieldKind::string()))
            .field("cost", FieldDescriptor::new(FieldKind::integer()))
            .api_name("name", "customized")
            .cli_name("cost", "field_names")
            .build()
    }

    #[test]
    fn test_customize_field_names_empty_entity() {
        for interface in Interface::ALL {
            let factory = Factory::with_interface(empty_entity(), interface);
            assert!(factory.customize_field_names(FieldMap::new()).is_empty());
        }
    }

    #[test]
    fn test_customize_field_names_ignores_unknown_renames() {
        let schema = EntitySchema::builder("EmptyEntity")
            .api_name("name", "customized")
            .cli_name("cost", "field_names")
            .build();

        for interface in Interface::ALL {
            let factory = Factory::with_interface(Arc::clone(&schema), interface);
            assert!(factory.fields().is_empty());
            assert!(factory.attributes().unwrap().is_empty());
        }
    }

    #[test]
    fn test_customize_field_names_api() {
        let factory = Factory::with_interface(remapped_entity(), Interface::Api);
        let names: Vec<String> = factory.fields().into_keys().collect();
        assert_eq!(names, vec!["cost", "customized"]);
    }

    #[test]
    fn test_customize_field_names_cli() {
        let factory = Factory::with_interface(remapped_entity(), Interface::Cli);
        let names: Vec<String> = factory.fields().into_keys().collect();
        assert_eq!(names, vec!["field_names", "name"]);
    }

    #[test]
    fn test_customize_field_names_default() {
        let factory = Factory::new(remapped_entity());
        let names: Vec<String> = factory.fields().into_keys().collect();
        assert_eq!(names, vec!["cost", "name"]);
    }

    #[test]
    fn test_customize_keeps_descriptor_identity() {
        let schema = remapped_entity();
        let canonical = schema.get_field("name").unwrap();

        let fields = Factory::with_interface(schema, Interface::Api).fields();
        assert!(Arc::ptr_eq(&fields["customized"], &canonical));
    }

    #[test]
    fn test_rename_onto_existing_name_wins() {
        let schema = EntitySchema::builder("Collision")
            .field("name", FieldDescriptor::required(FieldKind::string()))
            .field("title", FieldDescriptor::required(FieldKind::Boolean))
            .api_name("title", "name")
            .build();

        let fields = Factory::with_interface(schema, Interface::Api).fields();
        assert_eq!(fields.len(), 1);
        assert!(matches!(fields["name"].kind(), FieldKind::Boolean));
    }

    #[test]
    fn test_attributes_required_only() {
        let attrs = Factory::new(non_empty_entity()).attributes().unwrap();

        assert_eq!(attrs.len(), 1);
        let name = attrs.get("name").and_then(FieldValue::as_str).unwrap();
        assert!(!name.is_empty());
    }

    #[test]
    fn test_attributes_with_overrides() {
        let attrs = Factory::new(non_empty_entity())
            .attributes_with(Overrides::new().set("name", "x").set("cost", 5))
            .unwrap();

        let expected: AttributeMap = [
            ("name".to_string(), FieldValue::from("x")),
            ("cost".to_string(), FieldValue::Int(5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(attrs, expected);
    }

    #[test]
    fn test_attributes_api_remap() {
        let attrs = Factory::with_interface(remapped_entity(), Interface::Api)
            .attributes()
            .unwrap();

        assert!(attrs.contains_key("customized"));
        assert!(!attrs.contains_key("name"));
        assert!(!attrs.contains_key("cost"));
    }

    #[test]
    fn test_attributes_cli_override_uses_remapped_name() {
        let factory = Factory::with_interface(remapped_entity(), Interface::Cli);

        let attrs = factory
            .attributes_with(Overrides::new().set("field_names", 12))
            .unwrap();
        assert_eq!(attrs.get("field_names"), Some(&FieldValue::Int(12)));
        assert!(attrs.contains_key("name"));

        let result = factory.attributes_with(Overrides::new().set("cost", 12));
        assert!(matches!(result, Err(FactoryError::UnknownField { .. })));
    }

    #[test]
    fn test_unknown_field_error() {
        let result = Factory::new(empty_entity())
            .attributes_with(Overrides::new().set("no_such_field", "x"));

        match result {
            Err(FactoryError::UnknownField {
                entity,
                field,
                interface,
            }) => {
                assert_eq!(entity, "EmptyEntity");
                assert_eq!(field, "no_such_field");
                assert_eq!(interface, Interface::Default);
            }
            other => panic!("Expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_default_is_used_and_overridden() {
        let schema = EntitySchema::builder("Repository")
            .field(
                "content_type",
                FieldDescriptor::new(FieldKind::choice(["yum", "puppet"])).with_default("yum"),
            )
            .field("url", FieldDescriptor::new(FieldKind::Url))
            .build();
        let factory = Factory::new(schema);

        let attrs = factory.attributes().unwrap();
        assert_eq!(attrs.get("content_type"), Some(&FieldValue::from("yum")));
        assert!(!attrs.contains_key("url"));

        let attrs = factory
            .attributes_with(Overrides::new().set("content_type", "puppet"))
            .unwrap();
        assert_eq!(attrs.get("content_type"), Some(&FieldValue::from("puppet")));
    }

    #[test]
    fn test_should_populate() {
        let optional = FieldDescriptor::new(FieldKind::Boolean);
        let required = FieldDescriptor::required(FieldKind::Boolean);
        let defaulted = FieldDescriptor::new(FieldKind::Boolean).with_default(true);
        let null_default = FieldDescriptor::new(FieldKind::Boolean).with_default(FieldValue::Null);

        assert!(!should_populate(&optional, false));
        assert!(should_populate(&optional, true));
        assert!(should_populate(&required, false));
        assert!(should_populate(&defaulted, false));
        assert!(!should_populate(&null_default, false));
    }

    #[test]
    fn test_for_interface() {
        let factory = Factory::for_interface(non_empty_entity(), "API").unwrap();
        assert_eq!(factory.interface(), Interface::Api);

        let result = Factory::for_interface(non_empty_entity(), "ui");
        match result {
            Err(FactoryError::InvalidInterface(err)) => assert_eq!(err.0, "ui"),
            other => panic!("Expected InvalidInterface, got {other:?}"),
        }
    }

    #[test]
    fn test_seeded_factory_is_idempotent() {
        let factory = Factory::new(non_empty_entity()).with_seed(42);
        assert_eq!(factory.attributes().unwrap(), factory.attributes().unwrap());
    }

    #[test]
    fn test_unsupported_kind_propagates() {
        let schema = EntitySchema::builder("Broken")
            .field(
                "mode",
                FieldDescriptor::required(FieldKind::Choice { values: vec![] }),
            )
            .build();

        let result = Factory::new(schema).attributes();
        assert!(matches!(
            result,
            Err(FactoryError::UnsupportedFieldKind { kind: "choice", .. })
        ));
    }
}
