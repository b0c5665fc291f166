//! Character record (API shape) and row (persisted shape), plus the mapping between them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Table holding one row per character.
pub const CHARACTER_TABLE: &str = "character";

/// Column list in storage order.
pub const CHARACTER_COLUMNS: &str =
    "id, name, health, level, strength, charisma, intelligence, wisdom, constitution, dexterity";

/// Character sheet exchanged over the API. Missing fields default to 0 / "".
/// `id` is assigned by the store; any value sent on create is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CharacterRecord {
    pub id: i32,
    pub name: String,
    pub health: i32,
    pub level: i32,
    pub strength: i32,
    pub charisma: i32,
    #[serde(alias = "intelegence")]
    pub intelligence: i32,
    #[serde(alias = "wisdome")]
    pub wisdom: i32,
    pub constitution: i32,
    #[serde(alias = "dextarity")]
    pub dexterity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CharacterRow {
    pub id: i32,
    pub name: String,
    pub health: i32,
    pub level: i32,
    pub strength: i32,
    pub charisma: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub constitution: i32,
    pub dexterity: i32,
}

impl CharacterRow {
    /// Row carrying every field of `record` under the given id.
    pub fn from_record(id: i32, record: &CharacterRecord) -> Self {
        CharacterRow {
            id,
            name: record.name.clone(),
            health: record.health,
            level: record.level,
            strength: record.strength,
            charisma: record.charisma,
            intelligence: record.intelligence,
            wisdom: record.wisdom,
            constitution: record.constitution,
            dexterity: record.dexterity,
        }
    }

    pub fn into_record(self) -> CharacterRecord {
        CharacterRecord {
            id: self.id,
            name: self.name,
            health: self.health,
            level: self.level,
            strength: self.strength,
            charisma: self.charisma,
            intelligence: self.intelligence,
            wisdom: self.wisdom,
            constitution: self.constitution,
            dexterity: self.dexterity,
        }
    }
}

impl From<CharacterRow> for CharacterRecord {
    fn from(row: CharacterRow) -> Self {
        row.into_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aria() -> CharacterRecord {
        CharacterRecord {
            id: 0,
            name: "Aria".into(),
            health: 30,
            level: 1,
            strength: 10,
            charisma: 8,
            intelligence: 12,
            wisdom: 9,
            constitution: 14,
            dexterity: 11,
        }
    }

    #[test]
    fn from_record_takes_id_from_argument() {
        let mut record = aria();
        record.id = 99;
        let row = CharacterRow::from_record(7, &record);
        assert_eq!(row.id, 7);
        assert_eq!(row.name, "Aria");
        assert_eq!(row.dexterity, 11);
    }

    #[test]
    fn into_record_copies_every_field() {
        let row = CharacterRow::from_record(3, &aria());
        let record: CharacterRecord = row.into();
        assert_eq!(record, CharacterRecord { id: 3, ..aria() });
    }

    #[test]
    fn missing_fields_default() {
        let record: CharacterRecord = serde_json::from_str(r#"{"name":"Bo","level":2}"#).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.name, "Bo");
        assert_eq!(record.level, 2);
        assert_eq!(record.health, 0);
    }

    #[test]
    fn empty_object_is_a_blank_sheet() {
        let record: CharacterRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, CharacterRecord::default());
        assert_eq!(record.name, "");
    }

    #[test]
    fn legacy_spellings_are_accepted() {
        let record: CharacterRecord =
            serde_json::from_str(r#"{"intelegence":4,"wisdome":5,"dextarity":6}"#).unwrap();
        assert_eq!((record.intelligence, record.wisdom, record.dexterity), (4, 5, 6));
    }

    #[test]
    fn serializes_with_canonical_names() {
        let value = serde_json::to_value(CharacterRecord { id: 1, ..aria() }).unwrap();
        assert_eq!(value["intelligence"], 12);
        assert_eq!(value["wisdom"], 9);
        assert_eq!(value["dexterity"], 11);
        assert!(value.get("intelegence").is_none());
    }
}
