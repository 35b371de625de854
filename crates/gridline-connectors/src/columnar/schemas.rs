//! Column layouts and row mappings for the four record schemas.
//!
//! Required columns are the identifier plus the fields without which a
//! row is meaningless; everything else reads as a zero value when the
//! file predates or omits it. Aliases cover upstream column renames.

use gridline_core::{Game, RosterEntry, SeasonalStat, StatLine, WeeklyStat};

use super::decoder::{DecodeContext, FromRow};
use super::layout::{ColumnSpec, ColumnType};
use super::row::Row;

use ColumnType::{Flag, Float, Int, Text};

const ROSTER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("gsis_id", Text),
    ColumnSpec::required("full_name", Text).or(&["player_name"]),
    ColumnSpec::required("team", Text),
    ColumnSpec::required("position", Text),
    ColumnSpec::optional("first_name", Text),
    ColumnSpec::optional("last_name", Text),
    ColumnSpec::optional("depth_chart_position", Text),
    ColumnSpec::optional("jersey_number", Int),
    ColumnSpec::optional("status", Text),
    ColumnSpec::optional("height", Text),
    ColumnSpec::optional("weight", Int),
    ColumnSpec::optional("college", Text),
    ColumnSpec::optional("birth_date", Text),
    ColumnSpec::optional("years_exp", Int),
    ColumnSpec::optional("headshot_url", Text),
    ColumnSpec::optional("espn_id", Text),
    ColumnSpec::optional("sportradar_id", Text),
    ColumnSpec::optional("pfr_id", Text),
];

const GAME_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("game_id", Text),
    ColumnSpec::required("season", Int),
    ColumnSpec::required("week", Int),
    ColumnSpec::required("away_team", Text),
    ColumnSpec::required("home_team", Text),
    ColumnSpec::optional("game_type", Text),
    ColumnSpec::optional("gameday", Text),
    ColumnSpec::optional("gametime", Text),
    ColumnSpec::optional("away_score", Int),
    ColumnSpec::optional("home_score", Int),
    ColumnSpec::optional("result", Int),
    ColumnSpec::optional("total", Int),
    ColumnSpec::optional("overtime", Flag),
    ColumnSpec::optional("location", Text),
    ColumnSpec::optional("roof", Text),
    ColumnSpec::optional("surface", Text),
    ColumnSpec::optional("temp", Int),
    ColumnSpec::optional("wind", Int),
    ColumnSpec::optional("spread_line", Float),
    ColumnSpec::optional("total_line", Float),
    ColumnSpec::optional("away_moneyline", Int),
    ColumnSpec::optional("home_moneyline", Int),
    ColumnSpec::optional("div_game", Flag),
    ColumnSpec::optional("stadium", Text),
    ColumnSpec::optional("away_qb_name", Text),
    ColumnSpec::optional("home_qb_name", Text),
    ColumnSpec::optional("away_coach", Text),
    ColumnSpec::optional("home_coach", Text),
    ColumnSpec::optional("referee", Text),
];

const PLAYER_STAT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("player_id", Text),
    ColumnSpec::required("player_name", Text),
    ColumnSpec::optional("position", Text),
    ColumnSpec::optional("position_group", Text),
    ColumnSpec::optional("team", Text).or(&["recent_team"]),
];

const SEASONAL_ONLY_COLUMNS: &[ColumnSpec] = &[ColumnSpec::optional("games", Int)];

const WEEKLY_ONLY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("week", Int),
    ColumnSpec::optional("season_type", Text),
    ColumnSpec::optional("opponent_team", Text).or(&["opponent"]),
];

const STAT_LINE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::optional("completions", Int),
    ColumnSpec::optional("attempts", Int),
    ColumnSpec::optional("passing_yards", Float),
    ColumnSpec::optional("passing_tds", Int),
    ColumnSpec::optional("interceptions", Int).or(&["passing_interceptions"]),
    ColumnSpec::optional("sacks", Float).or(&["sacks_suffered"]),
    ColumnSpec::optional("carries", Int),
    ColumnSpec::optional("rushing_yards", Float),
    ColumnSpec::optional("rushing_tds", Int),
    ColumnSpec::optional("receptions", Int),
    ColumnSpec::optional("targets", Int),
    ColumnSpec::optional("receiving_yards", Float),
    ColumnSpec::optional("receiving_tds", Int),
    ColumnSpec::optional("fantasy_points", Float),
    ColumnSpec::optional("fantasy_points_ppr", Float),
];

/// Season type recorded for weekly rows whose file has no such column.
const DEFAULT_WEEKLY_SEASON_TYPE: &str = "REG";

fn stat_line(row: &Row<'_>) -> StatLine {
    StatLine {
        completions: row.int32("completions"),
        attempts: row.int32("attempts"),
        passing_yards: row.float("passing_yards"),
        passing_tds: row.int32("passing_tds"),
        interceptions: row.int32("interceptions"),
        sacks: row.float("sacks"),
        carries: row.int32("carries"),
        rushing_yards: row.float("rushing_yards"),
        rushing_tds: row.int32("rushing_tds"),
        receptions: row.int32("receptions"),
        targets: row.int32("targets"),
        receiving_yards: row.float("receiving_yards"),
        receiving_tds: row.int32("receiving_tds"),
        fantasy_points: row.float("fantasy_points"),
        fantasy_points_ppr: row.float("fantasy_points_ppr"),
    }
}

impl FromRow for RosterEntry {
    fn columns() -> Vec<ColumnSpec> {
        ROSTER_COLUMNS.to_vec()
    }

    fn from_row(row: &Row<'_>, ctx: &DecodeContext) -> Self {
        Self {
            player_id: row.text("gsis_id"),
            season: ctx.season_or_default(),
            name: row.text("full_name"),
            first_name: row.text("first_name"),
            last_name: row.text("last_name"),
            team: row.text("team"),
            position: row.text("position"),
            depth_chart_position: row.text("depth_chart_position"),
            jersey_number: row.int32("jersey_number"),
            status: row.text("status"),
            height: row.text("height"),
            weight: row.int32("weight"),
            college: row.text("college"),
            birth_date: row.text("birth_date"),
            years_exp: row.int32("years_exp"),
            headshot_url: row.text("headshot_url"),
            espn_id: row.text("espn_id"),
            sportradar_id: row.text("sportradar_id"),
            pfr_id: row.text("pfr_id"),
        }
    }
}

impl FromRow for Game {
    fn columns() -> Vec<ColumnSpec> {
        GAME_COLUMNS.to_vec()
    }

    fn from_row(row: &Row<'_>, _ctx: &DecodeContext) -> Self {
        Self {
            game_id: row.text("game_id"),
            season: row.int32("season"),
            game_type: row.text("game_type"),
            week: row.int32("week"),
            gameday: row.text("gameday"),
            gametime: row.text("gametime"),
            away_team: row.text("away_team"),
            home_team: row.text("home_team"),
            away_score: row.opt_int32("away_score"),
            home_score: row.opt_int32("home_score"),
            result: row.opt_int32("result"),
            total: row.opt_int32("total"),
            overtime: row.flag("overtime"),
            location: row.text("location"),
            roof: row.text("roof"),
            surface: row.text("surface"),
            temp: row.opt_int32("temp"),
            wind: row.opt_int32("wind"),
            spread_line: row.float("spread_line"),
            total_line: row.float("total_line"),
            away_moneyline: row.int32("away_moneyline"),
            home_moneyline: row.int32("home_moneyline"),
            div_game: row.flag("div_game"),
            stadium: row.text("stadium"),
            away_qb_name: row.text("away_qb_name"),
            home_qb_name: row.text("home_qb_name"),
            away_coach: row.text("away_coach"),
            home_coach: row.text("home_coach"),
            referee: row.text("referee"),
        }
    }
}

impl FromRow for SeasonalStat {
    fn columns() -> Vec<ColumnSpec> {
        [PLAYER_STAT_COLUMNS, SEASONAL_ONLY_COLUMNS, STAT_LINE_COLUMNS].concat()
    }

    fn from_row(row: &Row<'_>, ctx: &DecodeContext) -> Self {
        Self {
            player_id: row.text("player_id"),
            player_name: row.text("player_name"),
            position: row.text("position"),
            position_group: row.text("position_group"),
            team: row.text("team"),
            season: ctx.season_or_default(),
            season_type: ctx.season_type_or_default(),
            games: row.int32("games"),
            stats: stat_line(row),
        }
    }
}

impl FromRow for WeeklyStat {
    fn columns() -> Vec<ColumnSpec> {
        [PLAYER_STAT_COLUMNS, WEEKLY_ONLY_COLUMNS, STAT_LINE_COLUMNS].concat()
    }

    fn from_row(row: &Row<'_>, ctx: &DecodeContext) -> Self {
        let season_type = match row.text("season_type") {
            s if s.is_empty() => DEFAULT_WEEKLY_SEASON_TYPE.to_string(),
            s => s,
        };
        Self {
            player_id: row.text("player_id"),
            player_name: row.text("player_name"),
            position: row.text("position"),
            position_group: row.text("position_group"),
            team: row.text("team"),
            opponent_team: row.text("opponent_team"),
            season: ctx.season_or_default(),
            week: row.opt_int32("week"),
            season_type,
            stats: stat_line(row),
        }
    }
}
