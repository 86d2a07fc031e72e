//! Core types for the entity-factory framework.
//!
//! This crate provides the declarative half of the framework:
//!
//! - [`FieldKind`] - Value domain of a single entity attribute
//! - [`FieldDescriptor`] - Kind, requiredness and default of one attribute
//! - [`EntitySchema`] - Named set of descriptors plus per-interface renames
//! - [`Interface`] - Naming convention a consumer expects (default, API, CLI)
//! - [`FieldValue`] / [`AttributeMap`] - Values handed to the transports
//! - [`EntityCatalog`] - Schemas loaded from a YAML document
//!
//! # Architecture
//!
//! ```text
//! entity-core (this crate)
//!    │
//!    └─── entity-generator  (value generators and the Factory)
//! ```
//!
//! # Example
//!
//! ```rust
//! use entity_core::{EntitySchema, FieldDescriptor, FieldKind, Interface};
//!
//! let schema = EntitySchema::builder("NonEmptyEntity")
//!     .field("name", FieldDescriptor::required(FieldKind::string()))
//!     .field("cost", FieldDescriptor::new(FieldKind::integer()))
//!     .api_name("name", "customized")
//!     .build();
//!
//! assert_eq!(schema.get_fields().len(), 2);
//! assert_eq!(
//!     schema.renames(Interface::Api).get("name").map(String::as_str),
//!     Some("customized")
//! );
//! ```

pub mod catalog;
pub mod interface;
pub mod kinds;
pub mod schema;
pub mod values;

// Re-exports for convenience
pub use catalog::{EntityCatalog, EntityDefinition, FieldDefinition, KindDefinition, SchemaFile};
pub use interface::{Interface, InvalidInterfaceError};
pub use kinds::{Charset, FieldKind, LengthRange, StringSpec};
pub use schema::{EntitySchema, EntitySchemaBuilder, FieldDescriptor, FieldMap, SchemaError};
pub use values::{AttributeMap, FieldValue};
