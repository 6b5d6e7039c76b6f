use crate::errors::{SpeciesDataError, SpeciesDataResult};
use schema::SpeciesData;
use std::collections::HashMap;
use std::sync::LazyLock;

const SPECIES_RON: &str = include_str!("../data/species.ron");

// Keyed by lowercase species name.
static SPECIES_DATA: LazyLock<SpeciesDataResult<HashMap<String, SpeciesData>>> =
    LazyLock::new(|| parse_species_table(SPECIES_RON));

pub fn parse_species_table(source: &str) -> SpeciesDataResult<HashMap<String, SpeciesData>> {
    let entries: Vec<SpeciesData> = ron::from_str(source)
        .map_err(|err| SpeciesDataError::MalformedData(err.to_string()))?;

    let mut table = HashMap::with_capacity(entries.len());
    for entry in entries {
        if entry.types.is_empty() {
            return Err(SpeciesDataError::MalformedData(format!(
                "{} has no types",
                entry.name
            )));
        }
        table.insert(entry.name.to_lowercase(), entry);
    }
    Ok(table)
}

/// Look up a species by name (case-insensitive).
pub fn get_species_data(name: &str) -> SpeciesDataResult<&'static SpeciesData> {
    let table = (*SPECIES_DATA).as_ref().map_err(Clone::clone)?;
    table
        .get(&name.to_lowercase())
        .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
}
