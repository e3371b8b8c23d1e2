use std::collections::BTreeMap;

use super::model::{Dataset, RawRow, YearlyTeamRecord};

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Descending 1-based rank of every value; equal values share the mean of
/// the positions they occupy (`[4000, 4000, 3000]` → `[1.5, 1.5, 3.0]`).
pub fn average_rank_descending(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start+1 ..= end share their mean.
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}

/// Clean and rank raw rows.
///
/// Rows without a team or without yardage are dropped, so they take no
/// position in their year; the rest are ranked by `total_passing_yards`
/// within their year. Input order is preserved.
pub fn prepare(rows: Vec<RawRow>) -> Dataset {
    let mut missing_team = 0;
    let mut missing_yards = 0;
    let kept: Vec<(String, i32, f64)> = rows
        .into_iter()
        .filter_map(|r| match (r.team, r.total_passing_yards) {
            (None, _) => {
                missing_team += 1;
                None
            }
            (Some(_), None) => {
                missing_yards += 1;
                None
            }
            (Some(team), Some(yards)) => Some((team, r.year, yards)),
        })
        .collect();
    let dropped = missing_team + missing_yards;
    if dropped > 0 {
        log::debug!(
            "Dropped {missing_team} rows with a missing team and {missing_yards} with missing yardage"
        );
    }

    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, (_, year, _)) in kept.iter().enumerate() {
        by_year.entry(*year).or_default().push(idx);
    }

    let mut ranks = vec![0.0; kept.len()];
    for indices in by_year.values() {
        let yards: Vec<f64> = indices.iter().map(|&i| kept[i].2).collect();
        for (&idx, rank) in indices.iter().zip(average_rank_descending(&yards)) {
            ranks[idx] = rank;
        }
    }

    let records = kept
        .into_iter()
        .zip(ranks)
        .map(|((team, year, total_passing_yards), rank)| YearlyTeamRecord {
            team,
            year,
            total_passing_yards,
            rank,
        })
        .collect();

    Dataset::new(records, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_of(ds: &Dataset, team: &str, year: i32) -> f64 {
        ds.records()
            .iter()
            .find(|r| r.team == team && r.year == year)
            .map(|r| r.rank)
            .unwrap()
    }

    #[test]
    fn ranks_each_year_independently() {
        let ds = prepare(vec![
            RawRow::new(Some("KC"), 2016, 4000.0),
            RawRow::new(Some("BUF"), 2016, 3000.0),
            RawRow::new(Some("KC"), 2017, 4500.0),
            RawRow::new(Some("BUF"), 2017, 4600.0),
        ]);
        assert_eq!(rank_of(&ds, "KC", 2016), 1.0);
        assert_eq!(rank_of(&ds, "BUF", 2016), 2.0);
        assert_eq!(rank_of(&ds, "KC", 2017), 2.0);
        assert_eq!(rank_of(&ds, "BUF", 2017), 1.0);
    }

    #[test]
    fn ties_share_the_mean_position() {
        let ds = prepare(vec![
            RawRow::new(Some("KC"), 2016, 4000.0),
            RawRow::new(Some("BUF"), 2016, 4000.0),
        ]);
        assert_eq!(rank_of(&ds, "KC", 2016), 1.5);
        assert_eq!(rank_of(&ds, "BUF", 2016), 1.5);

        assert_eq!(
            average_rank_descending(&[10.0, 30.0, 30.0, 30.0, 5.0]),
            vec![4.0, 2.0, 2.0, 2.0, 5.0]
        );
    }

    #[test]
    fn missing_team_is_excluded_from_ranks_and_teams() {
        let ds = prepare(vec![
            RawRow::new(Some("KC"), 2016, 4000.0),
            RawRow::new(None, 2016, 9000.0),
            RawRow::new(Some("BUF"), 2016, 3000.0),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows(), 1);
        assert_eq!(ds.teams(), ["BUF".to_string(), "KC".to_string()]);
        // The 9000-yard row does not push KC down.
        assert_eq!(rank_of(&ds, "KC", 2016), 1.0);
    }

    #[test]
    fn missing_yardage_is_left_out_of_the_year() {
        let ds = prepare(vec![
            RawRow {
                team: Some("KC".into()),
                year: 2016,
                total_passing_yards: None,
            },
            RawRow::new(Some("BUF"), 2016, 3000.0),
            RawRow::new(Some("NE"), 2016, 3500.0),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows(), 1);
        assert_eq!(rank_of(&ds, "NE", 2016), 1.0);
        assert_eq!(rank_of(&ds, "BUF", 2016), 2.0);
        assert!(ds.series("KC").is_empty());
    }

    #[test]
    fn ranks_per_year_sum_like_a_permutation() {
        let yards = [4100.0, 3900.0, 3900.0, 4500.0, 3000.0, 4100.0, 3500.0];
        let teams = ["A", "B", "C", "D", "E", "F", "G"];
        let mut rows = Vec::new();
        for year in 2016..=2018 {
            for (i, team) in teams.iter().enumerate() {
                let y = yards[(i + year as usize) % yards.len()];
                rows.push(RawRow::new(Some(*team), year, y));
            }
        }
        let ds = prepare(rows);

        for year in 2016..=2018 {
            let ranks: Vec<f64> = ds
                .records()
                .iter()
                .filter(|r| r.year == year)
                .map(|r| r.rank)
                .collect();
            let k = ranks.len() as f64;
            assert_eq!(ranks.iter().sum::<f64>(), k * (k + 1.0) / 2.0);
            assert!(ranks.iter().all(|&r| (1.0..=k).contains(&r)));
        }
    }

    #[test]
    fn preserves_input_order() {
        let ds = prepare(vec![
            RawRow::new(Some("BUF"), 2017, 1.0),
            RawRow::new(Some("KC"), 2016, 2.0),
            RawRow::new(Some("BUF"), 2016, 3.0),
        ]);
        let order: Vec<(&str, i32)> = ds
            .records()
            .iter()
            .map(|r| (r.team.as_str(), r.year))
            .collect();
        assert_eq!(order, vec![("BUF", 2017), ("KC", 2016), ("BUF", 2016)]);
    }

    #[test]
    fn prepare_is_idempotent() {
        let rows = vec![
            RawRow::new(Some("KC"), 2016, 4000.0),
            RawRow::new(None, 2016, 1.0),
            RawRow::new(Some("BUF"), 2016, 4000.0),
            RawRow::new(Some("NE"), 2016, 3800.0),
        ];
        assert_eq!(prepare(rows.clone()), prepare(rows));
    }
}
