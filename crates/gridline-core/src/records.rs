//! The four season-level record schemas.
//!
//! Records are built only by the columnar decoder, are immutable once
//! decoded, and are written to a store as whole documents. Season and
//! season type are operational context supplied by the caller at decode
//! time, except for [`Game`], whose season is part of the file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Document, EntityDescriptor, EntityKind};

/// Season type for aggregates spanning regular season and postseason.
pub const REGPOST: &str = "REGPOST";

/// A decoded record that can be reconciled into a collection.
pub trait Record: Serialize {
    /// Entity kind of this record type.
    const KIND: EntityKind;

    /// Returns the descriptor for [`Self::KIND`].
    #[must_use]
    fn descriptor() -> &'static EntityDescriptor {
        Self::KIND.descriptor()
    }

    /// Serializes the full field set into a document.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error if the record does not serialize to a
    /// JSON object.
    fn to_document(&self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "{} record serialized to non-object value {other}",
                Self::KIND
            ))),
        }
    }
}

/// One player on one season's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// League-wide player identifier (GSIS id).
    pub player_id: String,
    /// Season, supplied by the caller.
    pub season: i32,
    /// Full display name.
    pub name: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Team abbreviation.
    pub team: String,
    /// Roster position.
    pub position: String,
    /// Depth-chart position.
    pub depth_chart_position: String,
    /// Jersey number (0 when unknown).
    pub jersey_number: i32,
    /// Roster status (ACT, RES, ...).
    pub status: String,
    /// Height as published.
    pub height: String,
    /// Weight in pounds.
    pub weight: i32,
    /// College.
    pub college: String,
    /// Birth date as published.
    pub birth_date: String,
    /// Years of experience.
    pub years_exp: i32,
    /// Headshot image URL.
    pub headshot_url: String,
    /// ESPN player id.
    pub espn_id: String,
    /// Sportradar player id.
    pub sportradar_id: String,
    /// Pro Football Reference id.
    pub pfr_id: String,
}

impl Record for RosterEntry {
    const KIND: EntityKind = EntityKind::Roster;
}

/// One scheduled or played game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Game identifier, e.g. `2024_01_BAL_KC`.
    pub game_id: String,
    /// Season, read from the file.
    pub season: i32,
    /// REG, WC, DIV, CON or SB.
    pub game_type: String,
    /// Week number.
    pub week: i32,
    /// Game date.
    pub gameday: String,
    /// Kickoff time.
    pub gametime: String,
    /// Away team abbreviation.
    pub away_team: String,
    /// Home team abbreviation.
    pub home_team: String,
    /// Away score; `None` until the game is played.
    pub away_score: Option<i32>,
    /// Home score; `None` until the game is played.
    pub home_score: Option<i32>,
    /// Home minus away score.
    pub result: Option<i32>,
    /// Combined score.
    pub total: Option<i32>,
    /// Whether the game went to overtime.
    pub overtime: bool,
    /// Home or Neutral.
    pub location: String,
    /// Roof type.
    pub roof: String,
    /// Playing surface.
    pub surface: String,
    /// Temperature (F); `None` for domes and unplayed games.
    pub temp: Option<i32>,
    /// Wind speed (mph).
    pub wind: Option<i32>,
    /// Closing spread from the home team's perspective.
    pub spread_line: f64,
    /// Closing over/under.
    pub total_line: f64,
    /// Away moneyline.
    pub away_moneyline: i32,
    /// Home moneyline.
    pub home_moneyline: i32,
    /// Divisional matchup.
    pub div_game: bool,
    /// Stadium name.
    pub stadium: String,
    /// Away starting quarterback.
    pub away_qb_name: String,
    /// Home starting quarterback.
    pub home_qb_name: String,
    /// Away head coach.
    pub away_coach: String,
    /// Home head coach.
    pub home_coach: String,
    /// Referee.
    pub referee: String,
}

impl Record for Game {
    const KIND: EntityKind = EntityKind::Game;
}

/// Box-score totals shared by seasonal and weekly statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    /// Pass completions.
    pub completions: i32,
    /// Pass attempts.
    pub attempts: i32,
    /// Passing yards.
    pub passing_yards: f64,
    /// Passing touchdowns.
    pub passing_tds: i32,
    /// Interceptions thrown.
    pub interceptions: i32,
    /// Sacks taken.
    pub sacks: f64,
    /// Rushing attempts.
    pub carries: i32,
    /// Rushing yards.
    pub rushing_yards: f64,
    /// Rushing touchdowns.
    pub rushing_tds: i32,
    /// Receptions.
    pub receptions: i32,
    /// Targets.
    pub targets: i32,
    /// Receiving yards.
    pub receiving_yards: f64,
    /// Receiving touchdowns.
    pub receiving_tds: i32,
    /// Standard fantasy points.
    pub fantasy_points: f64,
    /// PPR fantasy points.
    pub fantasy_points_ppr: f64,
}

/// Season aggregate for one player and season type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalStat {
    /// Player identifier.
    pub player_id: String,
    /// Short player name.
    pub player_name: String,
    /// Position.
    pub position: String,
    /// Position group.
    pub position_group: String,
    /// Most recent team.
    pub team: String,
    /// Season, supplied by the caller.
    pub season: i32,
    /// Season type, supplied by the caller.
    pub season_type: String,
    /// Games played.
    pub games: i32,
    /// Box-score totals.
    #[serde(flatten)]
    pub stats: StatLine,
}

impl Record for SeasonalStat {
    const KIND: EntityKind = EntityKind::SeasonalStat;
}

/// One player's line for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStat {
    /// Player identifier.
    pub player_id: String,
    /// Short player name.
    pub player_name: String,
    /// Position.
    pub position: String,
    /// Position group.
    pub position_group: String,
    /// Team played for.
    pub team: String,
    /// Opponent.
    pub opponent_team: String,
    /// Season, supplied by the caller.
    pub season: i32,
    /// Week number; `None` when the file has no value, which leaves the
    /// record without a natural key.
    pub week: Option<i32>,
    /// REG or POST, as published.
    pub season_type: String,
    /// Box-score totals.
    #[serde(flatten)]
    pub stats: StatLine,
}

impl Record for WeeklyStat {
    const KIND: EntityKind = EntityKind::WeeklyStat;
}
