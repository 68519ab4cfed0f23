//! Score table - one best score per name

use std::collections::BTreeMap;

use crate::entry::{LeaderboardEntry, ScoreSubmission, SubmitOutcome, SubmitResponse};

/// Best score per player name
///
/// Names are kept in a `BTreeMap`, so ranking ties come out in ascending
/// name order without a secondary sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    scores: BTreeMap<String, u32>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, keeping the highest score for repeated names
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut scores = BTreeMap::new();
        for LeaderboardEntry { name, score } in entries {
            let best = scores.entry(name).or_insert(score);
            *best = (*best).max(score);
        }
        Self { scores }
    }

    /// Insert, raise, or leave the stored score
    ///
    /// A name's stored score never decreases.
    pub fn submit(&mut self, submission: &ScoreSubmission) -> SubmitResponse {
        let score = submission.score();
        match self.scores.get_mut(submission.name()) {
            None => {
                self.scores.insert(submission.name().to_string(), score);
                SubmitResponse {
                    outcome: SubmitOutcome::Inserted,
                    score,
                }
            }
            Some(best) if score > *best => {
                *best = score;
                SubmitResponse {
                    outcome: SubmitOutcome::Updated,
                    score,
                }
            }
            Some(best) => SubmitResponse {
                outcome: SubmitOutcome::Unchanged,
                score: *best,
            },
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Up to `n` entries, highest score first, ties by name
    pub fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<_> = self.scores.iter().collect();
        // Stable sort keeps the map's name order within equal scores.
        ranked.sort_by(|a, b| b.1.cmp(a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(name, &score)| LeaderboardEntry::new(name.clone(), score))
            .collect()
    }

    /// Every entry in name order
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.scores
            .iter()
            .map(|(name, &score)| LeaderboardEntry::new(name.clone(), score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(table: &mut ScoreTable, name: &str, score: u32) -> SubmitResponse {
        table.submit(&ScoreSubmission::new(name, score).unwrap())
    }

    #[test]
    fn test_upsert_if_greater() {
        let mut table = ScoreTable::new();
        assert_eq!(submit(&mut table, "Ada", 50).outcome, SubmitOutcome::Inserted);

        let lower = submit(&mut table, "Ada", 30);
        assert_eq!(lower.outcome, SubmitOutcome::Unchanged);
        assert_eq!(lower.score, 50);
        assert_eq!(table.get("Ada"), Some(50));

        assert_eq!(submit(&mut table, "Ada", 50).outcome, SubmitOutcome::Unchanged);

        let higher = submit(&mut table, "Ada", 80);
        assert_eq!(higher.outcome, SubmitOutcome::Updated);
        assert_eq!(table.get("Ada"), Some(80));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_top_orders_by_score() {
        let table = ScoreTable::from_entries([
            LeaderboardEntry::new("A", 10),
            LeaderboardEntry::new("B", 30),
            LeaderboardEntry::new("C", 20),
            LeaderboardEntry::new("D", 5),
        ]);
        assert_eq!(
            table.top(3),
            vec![
                LeaderboardEntry::new("B", 30),
                LeaderboardEntry::new("C", 20),
                LeaderboardEntry::new("A", 10),
            ]
        );
        assert_eq!(table.top(10).len(), 4);
        assert!(table.top(0).is_empty());
    }

    #[test]
    fn test_ties_break_by_name() {
        let table = ScoreTable::from_entries([
            LeaderboardEntry::new("zed", 40),
            LeaderboardEntry::new("amy", 40),
            LeaderboardEntry::new("kim", 40),
        ]);
        let names: Vec<_> = table.top(3).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["amy", "kim", "zed"]);
    }

    #[test]
    fn test_from_entries_keeps_best_duplicate() {
        let table = ScoreTable::from_entries([
            LeaderboardEntry::new("Ada", 10),
            LeaderboardEntry::new("Ada", 70),
            LeaderboardEntry::new("Ada", 20),
        ]);
        assert_eq!(table.entries(), vec![LeaderboardEntry::new("Ada", 70)]);
    }
}
