//! Entity-kind descriptors.
//!
//! Each of the four record schemas is described by an
//! [`EntityDescriptor`]: the target collection and the ordered natural-key
//! fields. The synchronization engine is generic over this descriptor
//! rather than over the concrete record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key::{KeyValue, NaturalKey};

/// A stored document: a JSON object holding every field of a record.
pub type Document = serde_json::Map<String, Value>;

/// The four record schemas a columnar file can be decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// One row per player per season.
    Roster,
    /// One row per scheduled or played game.
    Game,
    /// Season aggregates per player and season type.
    SeasonalStat,
    /// One row per player per week.
    WeeklyStat,
}

/// Value type of a natural-key component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Text; an empty string counts as absent.
    Text,
    /// Integer; only `null` or a missing field counts as absent.
    Int,
}

/// One natural-key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyField {
    /// Document field name.
    pub name: &'static str,
    /// Expected value type.
    pub kind: KeyKind,
}

impl KeyField {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: KeyKind::Text,
        }
    }

    const fn int(name: &'static str) -> Self {
        Self {
            name,
            kind: KeyKind::Int,
        }
    }
}

/// `{key fields, target collection}` for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// The entity kind described.
    pub kind: EntityKind,
    /// Target collection name.
    pub collection: &'static str,
    /// Natural-key fields, in key order.
    pub key_fields: &'static [KeyField],
}

const ROSTER: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Roster,
    collection: "players",
    key_fields: &[KeyField::text("player_id"), KeyField::int("season")],
};

const GAME: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Game,
    collection: "games",
    key_fields: &[KeyField::text("game_id")],
};

const SEASONAL_STAT: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::SeasonalStat,
    collection: "player_stats",
    key_fields: &[
        KeyField::text("player_id"),
        KeyField::int("season"),
        KeyField::text("season_type"),
    ],
};

const WEEKLY_STAT: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::WeeklyStat,
    collection: "player_weekly_stats",
    key_fields: &[
        KeyField::text("player_id"),
        KeyField::int("season"),
        KeyField::int("week"),
    ],
};

impl EntityKind {
    /// All entity kinds, in load order.
    pub const ALL: [Self; 4] = [
        Self::Game,
        Self::Roster,
        Self::SeasonalStat,
        Self::WeeklyStat,
    ];

    /// Returns the static descriptor for this kind.
    #[must_use]
    pub const fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            Self::Roster => &ROSTER,
            Self::Game => &GAME,
            Self::SeasonalStat => &SEASONAL_STAT,
            Self::WeeklyStat => &WEEKLY_STAT,
        }
    }

    /// Stable snake-case name, as used in manifests and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::Game => "game",
            Self::SeasonalStat => "seasonal_stat",
            Self::WeeklyStat => "weekly_stat",
        }
    }

    /// Whether decoding this kind needs a caller-supplied season.
    #[must_use]
    pub const fn requires_season(self) -> bool {
        !matches!(self, Self::Game)
    }

    /// Whether decoding this kind needs a caller-supplied season type.
    #[must_use]
    pub const fn requires_season_type(self) -> bool {
        matches!(self, Self::SeasonalStat)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "roster" | "players" => Ok(Self::Roster),
            "game" | "games" | "schedules" => Ok(Self::Game),
            "seasonal_stat" | "player_stats" => Ok(Self::SeasonalStat),
            "weekly_stat" | "player_weekly_stats" => Ok(Self::WeeklyStat),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}

impl EntityDescriptor {
    /// Extracts the natural key from a document.
    ///
    /// Returns `None` when any component is absent: a missing field, a
    /// `null`, an empty string for text components, or a value of the
    /// wrong type. Such a document cannot be reconciled.
    #[must_use]
    pub fn extract_key(&self, document: &Document) -> Option<NaturalKey> {
        let mut components = Vec::with_capacity(self.key_fields.len());
        for field in self.key_fields {
            let value = match (field.kind, document.get(field.name)?) {
                (KeyKind::Text, Value::String(s)) if !s.is_empty() => KeyValue::Text(s.clone()),
                (KeyKind::Int, Value::Number(n)) => KeyValue::Int(n.as_i64()?),
                _ => return None,
            };
            components.push((field.name, value));
        }
        Some(NaturalKey::new(components))
    }
}
