//! Reference generators: unpersisted instances of another entity.

use crate::factory::{Factory, FactoryError, Overrides};
use entity_core::{EntitySchema, FieldValue, Interface};
use rand::Rng;
use std::sync::Arc;

/// Most instances a one-to-many field generates.
pub const MAX_RELATED_INSTANCES: usize = 3;

/// Build one default instance of `entity`.
pub fn generate_one_to_one<R: Rng>(
    entity: &Arc<EntitySchema>,
    interface: Interface,
    rng: &mut R,
) -> Result<FieldValue, FactoryError> {
    let attributes = Factory::with_interface(Arc::clone(entity), interface)
        .attributes_with_rng(rng, Overrides::new())?;
    Ok(FieldValue::Entity(attributes))
}

/// Build zero to [`MAX_RELATED_INSTANCES`] default instances of `entity`.
pub fn generate_one_to_many<R: Rng>(
    entity: &Arc<EntitySchema>,
    interface: Interface,
    rng: &mut R,
) -> Result<FieldValue, FactoryError> {
    let count = rng.random_range(0..=MAX_RELATED_INSTANCES);
    let instances = (0..count)
        .map(|_| generate_one_to_one(entity, interface, rng))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldValue::List(instances))
}
