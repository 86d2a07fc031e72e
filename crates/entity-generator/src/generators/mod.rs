//! Individual value generators for the different field kinds.
//!
//! This module provides the generation logic for each kind based on the
//! descriptor from the schema.

pub mod network;
pub mod numeric;
pub mod reference;
pub mod string;
pub mod temporal;

use crate::factory::FactoryError;
use entity_core::{FieldKind, FieldValue, Interface, LengthRange};
use rand::Rng;

/// Entity and field a value is being generated for, used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub entity: &'a str,
    pub field: &'a str,
}

impl FieldContext<'_> {
    fn unsupported(&self, kind: &FieldKind, reason: impl Into<String>) -> FactoryError {
        FactoryError::UnsupportedFieldKind {
            entity: self.entity.to_string(),
            field: self.field.to_string(),
            kind: kind.name(),
            reason: reason.into(),
        }
    }
}

/// Generate a value for `kind`.
///
/// Reference kinds build nested instances under the same `interface`, so their
/// keys match the names the transport expects.
pub fn generate_value<R: Rng>(
    kind: &FieldKind,
    context: FieldContext<'_>,
    interface: Interface,
    rng: &mut R,
) -> Result<FieldValue, FactoryError> {
    let value = match kind {
        FieldKind::String(spec) | FieldKind::Text(spec) => {
            if !spec.length.is_valid() {
                return Err(context.unsupported(
                    kind,
                    format!("inverted length range {}..={}", spec.length.min, spec.length.max),
                ));
            }
            if spec.length.max == 0 {
                return Err(context.unsupported(kind, "length range admits no non-empty string"));
            }
            string::generate_string_field(rng, spec)
        }

        FieldKind::Integer { min, max } => {
            if min > max {
                return Err(context.unsupported(kind, format!("empty range {min}..={max}")));
            }
            numeric::generate_integer(rng, *min, *max)
        }

        FieldKind::Boolean => FieldValue::Bool(rng.random_bool(0.5)),

        FieldKind::Choice { values } => {
            if values.is_empty() {
                return Err(context.unsupported(kind, "no literals to choose from"));
            }
            values[rng.random_range(0..values.len())].clone()
        }

        FieldKind::OneToOne { entity } => reference::generate_one_to_one(entity, interface, rng)?,

        FieldKind::OneToMany { entity } => {
            reference::generate_one_to_many(entity, interface, rng)?
        }

        FieldKind::List { element, length } => {
            if !length.is_valid() {
                return Err(context.unsupported(
                    kind,
                    format!("inverted length range {}..={}", length.min, length.max),
                ));
            }
            generate_list(element, *length, context, interface, rng)?
        }

        FieldKind::Email => network::generate_email(rng),
        FieldKind::IpAddress => network::generate_ipv4(rng),
        FieldKind::MacAddress => network::generate_mac(rng),
        FieldKind::Url => network::generate_url(rng),

        FieldKind::Date => temporal::generate_date(rng),
        FieldKind::DateTime => temporal::generate_datetime(rng),
    };
    Ok(value)
}

fn generate_list<R: Rng>(
    element: &FieldKind,
    length: LengthRange,
    context: FieldContext<'_>,
    interface: Interface,
    rng: &mut R,
) -> Result<FieldValue, FactoryError> {
    let count = rng.random_range(length.min..=length.max);
    let items = (0..count)
        .map(|_| generate_value(element, context, interface, rng))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldValue::List(items))
}
