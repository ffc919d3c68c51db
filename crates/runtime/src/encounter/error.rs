//! Errors returned by encounter operations.

use arena_core::{CharacterId, CombatError, ErrorSeverity, GameError, ItemId};
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum EncounterError {
    /// The action was rejected by the combat rules. Already reported.
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0} is not part of this encounter")]
    NotInEncounter(CharacterId),

    #[error("{0} is not part of this encounter")]
    ItemNotInEncounter(ItemId),

    #[error("{0} has no equipment")]
    NoEquipment(CharacterId),
}

impl EncounterError {
    /// The combat rejection, if that is what this is.
    pub fn as_combat(&self) -> Option<&CombatError> {
        match self {
            EncounterError::Combat(err) => Some(err),
            _ => None,
        }
    }
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EncounterError::Combat(err) => err.severity(),
            EncounterError::Repository(err) => err.severity(),
            EncounterError::NotInEncounter(_)
            | EncounterError::ItemNotInEncounter(_)
            | EncounterError::NoEquipment(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EncounterError::Combat(err) => err.error_code(),
            EncounterError::Repository(err) => err.error_code(),
            EncounterError::NotInEncounter(_) => "ENCOUNTER_UNKNOWN_CHARACTER",
            EncounterError::ItemNotInEncounter(_) => "ENCOUNTER_UNKNOWN_ITEM",
            EncounterError::NoEquipment(_) => "ENCOUNTER_NO_EQUIPMENT",
        }
    }
}
