//! Behavioural tests for schemas, factories and the data factory.

use entity_core::{
    Charset, EntityCatalog, EntitySchema, FieldDescriptor, FieldKind, FieldMap, FieldValue,
    Interface, SchemaError, StringSpec,
};
use entity_generator::datafactory::{invalid_values_list, valid_data_list};
use entity_generator::{Factory, FactoryError, Overrides};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn empty_entity() -> Arc<EntitySchema> {
    EntitySchema::builder("EmptyEntity").build()
}

fn non_empty_entity() -> Arc<EntitySchema> {
    EntitySchema::builder("NonEmptyEntity")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .field("cost", FieldDescriptor::new(FieldKind::integer()))
        .build()
}

#[test]
fn test_empty_schema_yields_empty_mapping() {
    for interface in Interface::ALL {
        let factory = Factory::with_interface(empty_entity(), interface);
        assert!(factory.attributes().unwrap().is_empty());
        assert!(factory.customize_field_names(FieldMap::new()).is_empty());
    }
}

#[test]
fn test_required_fields_are_generated_in_domain() {
    let schema = EntitySchema::builder("Everything")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .field("notes", FieldDescriptor::required(FieldKind::text()))
        .field("count", FieldDescriptor::required(FieldKind::integer_range(1, 9)))
        .field("enabled", FieldDescriptor::required(FieldKind::Boolean))
        .field("kind", FieldDescriptor::required(FieldKind::choice(["a", "b"])))
        .field("mail", FieldDescriptor::required(FieldKind::Email))
        .field("ip", FieldDescriptor::required(FieldKind::IpAddress))
        .field("mac", FieldDescriptor::required(FieldKind::MacAddress))
        .field("url", FieldDescriptor::required(FieldKind::Url))
        .field("day", FieldDescriptor::required(FieldKind::Date))
        .field("at", FieldDescriptor::required(FieldKind::DateTime))
        .build();
    let factory = Factory::new(Arc::clone(&schema));
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let attrs = factory
            .attributes_with_rng(&mut rng, Overrides::new())
            .unwrap();
        assert_eq!(attrs.len(), 11);
        for (name, descriptor) in schema.get_fields() {
            let value = attrs.get(&name).unwrap();
            assert!(
                descriptor.kind().matches(value),
                "{name}: {value:?} is not a valid {}",
                descriptor.kind().name()
            );
        }
    }
}

#[test]
fn test_optional_fields_are_omitted() {
    let attrs = Factory::new(non_empty_entity()).attributes().unwrap();
    assert!(!attrs.contains_key("cost"));
}

#[test]
fn test_overrides_always_win() {
    let schema = EntitySchema::builder("Defaults")
        .field(
            "name",
            FieldDescriptor::required(FieldKind::string()).with_default("fallback"),
        )
        .build();

    let attrs = Factory::new(schema)
        .attributes_with(Overrides::new().set("name", "chosen"))
        .unwrap();
    assert_eq!(attrs.get("name"), Some(&FieldValue::from("chosen")));
}

#[test]
fn test_overrides_are_not_validated() {
    let attrs = Factory::new(non_empty_entity())
        .attributes_with(Overrides::new().set("name", "").set("cost", "many"))
        .unwrap();
    assert_eq!(attrs.get("name"), Some(&FieldValue::from("")));
    assert_eq!(attrs.get("cost"), Some(&FieldValue::from("many")));
}

#[test]
fn test_api_remap() {
    let schema = EntitySchema::builder("NonEmptyEntity")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .field("cost", FieldDescriptor::new(FieldKind::integer()))
        .api_name("name", "customized")
        .build();

    let attrs = Factory::with_interface(schema, Interface::Api)
        .attributes()
        .unwrap();
    assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["customized"]);
}

#[test]
fn test_unknown_override_fails() {
    let result = Factory::new(empty_entity())
        .attributes_with(Overrides::new().set("no_such_field", "x"));
    assert!(matches!(result, Err(FactoryError::UnknownField { .. })));
}

#[test]
fn test_renames_for_missing_fields_are_ignored() {
    let schema = EntitySchema::builder("EmptyEntity")
        .api_name("name", "customized")
        .cli_name("cost", "field_names")
        .build();

    for interface in Interface::ALL {
        let factory = Factory::with_interface(Arc::clone(&schema), interface);
        assert!(factory.customize_field_names(schema.get_fields()).is_empty());
    }
}

#[test]
fn test_non_empty_entity_scenario() {
    let factory = Factory::new(non_empty_entity());

    let attrs = factory.attributes().unwrap();
    assert_eq!(attrs.len(), 1);
    let name = attrs.get("name").and_then(FieldValue::as_str).unwrap();
    assert!(!name.is_empty());

    let attrs = factory
        .attributes_with(Overrides::new().set("name", "x").set("cost", 5))
        .unwrap();
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("name"), Some(&FieldValue::from("x")));
    assert_eq!(attrs.get("cost"), Some(&FieldValue::Int(5)));
}

#[test]
fn test_same_seed_same_mapping() {
    let schema = EntitySchema::builder("Seeded")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .field("mac", FieldDescriptor::required(FieldKind::MacAddress))
        .build();

    let first = Factory::new(Arc::clone(&schema)).with_seed(99).attributes().unwrap();
    let second = Factory::new(schema).with_seed(99).attributes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_derived_schema_inherits_and_overrides() {
    let base = EntitySchema::builder("Base")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .field("description", FieldDescriptor::new(FieldKind::text()))
        .api_name("name", "base_name")
        .build();
    let derived = EntitySchema::builder("Derived")
        .extends(&base)
        .field(
            "description",
            FieldDescriptor::required(FieldKind::String(
                StringSpec::string().with_charset(Charset::Numeric),
            )),
        )
        .build();

    let attrs = Factory::with_interface(derived, Interface::Api)
        .attributes()
        .unwrap();
    assert!(attrs.contains_key("base_name"));
    let description = attrs.get("description").and_then(FieldValue::as_str).unwrap();
    assert!(description.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_nested_references_follow_interface() {
    let organization = EntitySchema::builder("Organization")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .cli_name("name", "org-name")
        .build();
    let product = EntitySchema::builder("Product")
        .field("name", FieldDescriptor::required(FieldKind::string()))
        .field(
            "organization",
            FieldDescriptor::required(FieldKind::one_to_one(&organization)),
        )
        .build();

    let attrs = Factory::with_interface(product, Interface::Cli)
        .attributes()
        .unwrap();
    let nested = attrs.get("organization").and_then(FieldValue::as_entity).unwrap();
    assert!(nested.contains_key("org-name"));
}

#[test]
fn test_catalog_rejects_bad_references() {
    let unknown_parent = r#"
entities:
  - name: Host
    extends: Missing
"#;
    assert!(matches!(
        EntityCatalog::from_yaml(unknown_parent),
        Err(SchemaError::UnknownParent { .. })
    ));

    let unknown_reference = r#"
entities:
  - name: Host
    fields:
      - name: organization
        type:
          type: one_to_one
          entity: Missing
"#;
    assert!(matches!(
        EntityCatalog::from_yaml(unknown_reference),
        Err(SchemaError::UnknownReference { .. })
    ));

    let cycle = r#"
entities:
  - name: A
    fields:
      - name: b
        type: { type: one_to_one, entity: B }
  - name: B
    fields:
      - name: a
        type: { type: one_to_many, entity: A }
"#;
    assert!(matches!(
        EntityCatalog::from_yaml(cycle),
        Err(SchemaError::Cycle(_))
    ));
}

#[test]
fn test_min_length_only_fields_generate() {
    let yaml = r#"
entities:
  - name: Host
    fields:
      - name: name
        type: { type: string, charset: alpha, min_length: 40 }
        required: true
      - name: tags
        type: { type: list, element: boolean, min_length: 5 }
        required: true
"#;
    let catalog = EntityCatalog::from_yaml(yaml).unwrap();
    let factory = Factory::new(catalog.require("Host").unwrap()).with_seed(42);

    let attrs = factory.attributes().unwrap();
    let name = attrs.get("name").and_then(FieldValue::as_str).unwrap();
    assert_eq!(name.chars().count(), 40);
    assert_eq!(attrs.get("tags").and_then(FieldValue::as_list).unwrap().len(), 5);
}

#[test]
fn test_data_factory_lists() {
    let mut rng = StdRng::seed_from_u64(42);

    let valid = valid_data_list(&mut rng);
    assert_eq!(valid.len(), Charset::ALL.len());
    assert!(valid.iter().all(|s| !s.is_empty()));

    let invalid = invalid_values_list(&mut rng);
    assert!(invalid.contains(&String::new()));
    assert!(invalid.contains(&" ".to_string()));
    assert!(invalid.iter().any(|s| s.chars().count() > 255));
}

#[test]
fn test_factory_is_shareable_across_threads() {
    let factory = Factory::new(non_empty_entity());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = factory.clone();
            std::thread::spawn(move || factory.attributes().unwrap())
        })
        .collect();

    for handle in handles {
        let attrs = handle.join().unwrap();
        assert!(attrs.contains_key("name"));
    }
}
