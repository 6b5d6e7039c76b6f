use crate::errors::{MoveDataError, MoveDataResult};
use schema::{Move, MoveData};
use std::collections::HashMap;
use std::sync::LazyLock;

const MOVES_RON: &str = include_str!("../data/moves.ron");

// Global move table - parsed once on first access
static MOVE_DATA: LazyLock<MoveDataResult<HashMap<Move, MoveData>>> =
    LazyLock::new(|| parse_move_table(MOVES_RON));

/// Parse a RON move table. Unknown effect kinds and duplicate entries are rejected.
pub fn parse_move_table(source: &str) -> MoveDataResult<HashMap<Move, MoveData>> {
    let entries: Vec<MoveData> =
        ron::from_str(source).map_err(|err| MoveDataError::MalformedData(err.to_string()))?;

    let mut table = HashMap::with_capacity(entries.len());
    for entry in entries {
        if let Some(effect) = entry
            .effects
            .iter()
            .find(|effect| !(0.0..=1.0).contains(&effect.probability))
        {
            return Err(MoveDataError::MalformedData(format!(
                "{:?} has an effect with probability {}",
                entry.id, effect.probability
            )));
        }
        let id = entry.id;
        if table.insert(id, entry).is_some() {
            return Err(MoveDataError::MalformedData(format!(
                "{:?} is defined more than once",
                id
            )));
        }
    }

    log::debug!("Loaded {} moves", table.len());
    Ok(table)
}

/// Get move data for a specific move from the global table
pub fn get_move_data(move_: Move) -> MoveDataResult<&'static MoveData> {
    let table = (*MOVE_DATA).as_ref().map_err(Clone::clone)?;
    table.get(&move_).ok_or(MoveDataError::MoveNotFound(move_))
}

/// Get max PP for a specific move
pub fn get_move_max_pp(move_: Move) -> MoveDataResult<u8> {
    get_move_data(move_).map(|data| data.pp)
}
