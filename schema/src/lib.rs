// Turn Engine Schema - Shared reference-data definitions
// This crate holds the read-only data types (types, moves, species, items)
// that the engine consumes and that the RON tables under `data/` describe.

pub use battle_data::*;
pub use items::*;
pub use move_types::*;
pub use moves::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod items;
pub mod move_types;
pub mod moves;
pub mod pokemon_types;
pub mod species_data;
