//! Entity Factory Library
//!
//! Declarative entity schemas and attribute factories for end-to-end test
//! suites that drive a product through its web UI, command-line client and
//! REST API.
//!
//! # Crates
//!
//! - `entity_core` - Field kinds, values, descriptors, schemas and YAML catalogs
//! - `entity_generator` - Per-kind value generators, the `Factory` and the data factory
//!
//! # CLI Usage
//!
//! ```bash
//! # REST request body for a repository, with a fixed name
//! entity-factory attributes --schema schemas/foreman.yaml --entity Repository \
//!   --interface api --set name=zoo
//!
//! # Options for the command-line client
//! entity-factory attributes --schema schemas/foreman.yaml --entity Host \
//!   --interface cli --format cli --seed 42
//!
//! # Field names under the API interface
//! entity-factory fields --schema schemas/foreman.yaml --entity Host --interface api
//!
//! # Values a name field must reject
//! entity-factory strings --kind invalid
//! ```

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{AttributesArgs, FieldsArgs, OutputFormat, SchemaOpts, StringListKind, StringsArgs};
pub use entity_core::{EntityCatalog, Interface};
pub use entity_generator::{Factory, Overrides};
