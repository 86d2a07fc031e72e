//! Attribute factory for the entity-factory framework.
//!
//! This crate provides the [`Factory`] which turns an [`EntitySchema`], an
//! [`Interface`] and a set of explicit overrides into a flat
//! [`AttributeMap`]. Values for fields the caller did not supply come from the
//! per-kind generators in [`generators`].
//!
//! # Architecture
//!
//! ```text
//! EntitySchema ──┐
//! Interface ─────┤
//!                ▼
//!        ┌───────────────┐
//!        │    Factory    │
//!        │               │
//!        │ - remap names │
//!        │ - check keys  │
//!        │ - generate    │
//!        └───────┬───────┘
//!                │
//!                ▼
//!   AttributeMap { name -> FieldValue }
//! ```
//!
//! # Example
//!
//! ```rust
//! use entity_core::{EntitySchema, FieldDescriptor, FieldKind, FieldValue, Interface};
//! use entity_generator::{Factory, Overrides};
//!
//! let schema = EntitySchema::builder("NonEmptyEntity")
//!     .field("name", FieldDescriptor::required(FieldKind::string()))
//!     .field("cost", FieldDescriptor::new(FieldKind::integer()))
//!     .api_name("name", "customized")
//!     .build();
//!
//! let attrs = Factory::with_interface(schema.clone(), Interface::Api)
//!     .attributes()
//!     .unwrap();
//! assert!(attrs.contains_key("customized"));
//! assert!(!attrs.contains_key("cost"));
//!
//! let attrs = Factory::new(schema)
//!     .attributes_with(Overrides::new().set("name", "x").set("cost", 5))
//!     .unwrap();
//! assert_eq!(attrs.get("cost"), Some(&FieldValue::Int(5)));
//! ```
//!
//! # Generators
//!
//! One generator exists per field kind:
//!
//! - `string` / `text` - Printable strings in a charset (`alpha`, `utf8`, `cjk`, ...)
//! - `integer` - Uniform integer in the declared range
//! - `boolean` - Fair coin
//! - `choice` - One of the declared literals
//! - `one_to_one` / `one_to_many` - Unpersisted instances of the referenced entity
//! - `list` - Values of the element kind
//! - `email`, `ip_address`, `mac_address`, `url` - Syntactically valid addresses
//! - `date`, `datetime` - Between 2000-01-01 and 2030-12-31

pub mod datafactory;
pub mod factory;
pub mod generators;

// Re-exports for convenience
pub use entity_core::{AttributeMap, EntitySchema, FieldValue, Interface};
pub use factory::{should_populate, Factory, FactoryError, Overrides};
