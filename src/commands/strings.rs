//! Strings command handler.

use crate::cli::{StringListKind, StringsArgs};
use entity_generator::datafactory::{invalid_values_list, valid_data_list};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run the strings command.
pub fn run_strings(args: &StringsArgs) -> anyhow::Result<String> {
    tracing::info!("Generating {:?} string list", args.kind);

    let values = match args.seed {
        Some(seed) => string_list(args.kind, &mut StdRng::seed_from_u64(seed)),
        None => string_list(args.kind, &mut rand::rng()),
    };
    Ok(serde_json::to_string_pretty(&values)?)
}

fn string_list<R: Rng>(kind: StringListKind, rng: &mut R) -> Vec<String> {
    match kind {
        StringListKind::Valid => valid_data_list(rng),
        StringListKind::Invalid => invalid_values_list(rng),
    }
}
