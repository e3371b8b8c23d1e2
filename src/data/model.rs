use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// RawRow – one parsed input row, before cleaning
// ---------------------------------------------------------------------------

/// A single row as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Team identifier (`posteam`); `None` when the cell is missing.
    pub team: Option<String>,
    pub year: i32,
    /// `None` when the cell is missing; such rows are left unranked.
    pub total_passing_yards: Option<f64>,
}

#[cfg(test)]
impl RawRow {
    pub fn new(team: Option<&str>, year: i32, total_passing_yards: f64) -> Self {
        Self {
            team: team.map(str::to_string),
            year,
            total_passing_yards: Some(total_passing_yards),
        }
    }
}

// ---------------------------------------------------------------------------
// YearlyTeamRecord – one cleaned, ranked row
// ---------------------------------------------------------------------------

/// A team's passing total for one season together with its rank that season.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyTeamRecord {
    pub team: String,
    pub year: i32,
    pub total_passing_yards: f64,
    /// Descending rank within `year`; ties share the mean position (e.g. 1.5).
    pub rank: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The cleaned, rank-augmented records, in input order.
///
/// Built once by [`super::rank::prepare`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<YearlyTeamRecord>,
    /// Sorted distinct team identifiers (dropdown options).
    teams: Vec<String>,
    /// Rows discarded because their team or yardage was missing.
    dropped_rows: usize,
}

impl Dataset {
    pub(crate) fn new(records: Vec<YearlyTeamRecord>, dropped_rows: usize) -> Self {
        let teams: BTreeSet<&str> = records.iter().map(|r| r.team.as_str()).collect();
        let teams = teams.into_iter().map(str::to_string).collect();
        Self {
            records,
            teams,
            dropped_rows,
        }
    }

    #[cfg(test)]
    pub fn records(&self) -> &[YearlyTeamRecord] {
        &self.records
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.teams.binary_search_by(|t| t.as_str().cmp(team)).is_ok()
    }

    /// All records of `team`, sorted by year ascending.
    ///
    /// Unknown teams give an empty series.
    pub fn series(&self, team: &str) -> Vec<&YearlyTeamRecord> {
        let mut series: Vec<&YearlyTeamRecord> =
            self.records.iter().filter(|r| r.team == team).collect();
        series.sort_by_key(|r| r.year);
        series
    }
}
