use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Entries kept per difficulty.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub difficulty: Difficulty,
    pub time_secs: u32,
    pub won: bool,
    /// Milliseconds since the epoch, as supplied by the caller.
    pub recorded_at: u64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_games: u32,
    pub games_won: u32,
    /// Rounded percentage.
    pub win_rate: u32,
    pub best_time: Option<u32>,
    /// Rounded mean of winning times.
    pub average_time: Option<u32>,
}

/// Finished games per difficulty, best first.
///
/// Each list is ordered with wins before losses, wins by ascending time and losses in the order
/// they were recorded, and is truncated to [`HISTORY_LIMIT`]. Custom boards have no difficulty and
/// are not recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHistory {
    entries: HashMap<Difficulty, Vec<HistoryEntry>>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the game was recorded.
    pub fn record(&mut self, end: GameEnd, recorded_at: u64) -> bool {
        let Some(difficulty) = end.difficulty else {
            return false;
        };

        let entries = self.entries.entry(difficulty).or_default();
        entries.push(HistoryEntry {
            difficulty,
            time_secs: end.elapsed_secs,
            won: end.won,
            recorded_at,
        });
        entries.sort_by(rank);
        entries.truncate(HISTORY_LIMIT);

        log::debug!(
            "Recorded {} game on {} in {}s",
            if end.won { "won" } else { "lost" },
            difficulty,
            end.elapsed_secs
        );
        true
    }

    pub fn entries(&self, difficulty: Difficulty) -> &[HistoryEntry] {
        self.entries
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn top_times(&self, difficulty: Difficulty, limit: usize) -> Vec<HistoryEntry> {
        self.entries(difficulty)
            .iter()
            .filter(|entry| entry.won)
            .take(limit)
            .copied()
            .collect()
    }

    pub fn statistics(&self, difficulty: Difficulty) -> Statistics {
        let entries = self.entries(difficulty);
        let total = entries.len() as u32;
        let (won, time_sum) = entries
            .iter()
            .filter(|entry| entry.won)
            .fold((0u32, 0u64), |(won, sum), entry| {
                (won + 1, sum + u64::from(entry.time_secs))
            });

        Statistics {
            total_games: total,
            games_won: won,
            win_rate: if total == 0 {
                0
            } else {
                round_div(u64::from(won) * 100, u64::from(total))
            },
            best_time: entries.first().filter(|entry| entry.won).map(|entry| entry.time_secs),
            average_time: (won > 0).then(|| round_div(time_sum, u64::from(won))),
        }
    }

    pub fn clear(&mut self, difficulty: Difficulty) {
        self.entries.remove(&difficulty);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Loads a history, restoring the ordering and limit of every list.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut history: Self = serde_json::from_str(json)?;
        for entries in history.entries.values_mut() {
            entries.sort_by(rank);
            entries.truncate(HISTORY_LIMIT);
        }
        Ok(history)
    }
}

fn rank(a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
    match (a.won, b.won) {
        (true, true) => a.time_secs.cmp(&b.time_secs),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// `numerator / denominator` rounded half up; `denominator` must be non-zero.
fn round_div(numerator: u64, denominator: u64) -> u32 {
    ((numerator * 2 + denominator) / (denominator * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(difficulty: Difficulty, elapsed_secs: u32, won: bool) -> GameEnd {
        GameEnd {
            difficulty: Some(difficulty),
            elapsed_secs,
            won,
        }
    }

    #[test]
    fn custom_games_are_not_recorded() {
        let mut history = GameHistory::new();

        let recorded = history.record(
            GameEnd {
                difficulty: None,
                elapsed_secs: 10,
                won: true,
            },
            0,
        );

        assert!(!recorded);
        assert_eq!(history, GameHistory::default());
    }

    #[test]
    fn wins_sort_by_time_before_losses() {
        let mut history = GameHistory::new();
        history.record(end(Difficulty::Easy, 30, false), 1);
        history.record(end(Difficulty::Easy, 50, true), 2);
        history.record(end(Difficulty::Easy, 12, false), 3);
        history.record(end(Difficulty::Easy, 20, true), 4);

        let order: Vec<_> = history
            .entries(Difficulty::Easy)
            .iter()
            .map(|entry| (entry.won, entry.recorded_at))
            .collect();

        assert_eq!(order, [(true, 4), (true, 2), (false, 1), (false, 3)]);
    }

    #[test]
    fn difficulties_are_kept_apart() {
        let mut history = GameHistory::new();
        history.record(end(Difficulty::Easy, 30, true), 1);
        history.record(end(Difficulty::Hard, 300, true), 2);

        assert_eq!(history.entries(Difficulty::Easy).len(), 1);
        assert_eq!(history.entries(Difficulty::Hard)[0].time_secs, 300);
        assert!(history.entries(Difficulty::Medium).is_empty());
    }

    #[test]
    fn list_is_capped_keeping_best() {
        let mut history = GameHistory::new();
        for time in 0..60 {
            history.record(end(Difficulty::Medium, 100 - time, true), u64::from(time));
        }
        history.record(end(Difficulty::Medium, 1, false), 99);

        let entries = history.entries(Difficulty::Medium);
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries[0].time_secs, 41);
        assert_eq!(entries[HISTORY_LIMIT - 1].time_secs, 90);
        assert!(entries.iter().all(|entry| entry.won));
    }

    #[test]
    fn top_times_lists_only_wins() {
        let mut history = GameHistory::new();
        history.record(end(Difficulty::Easy, 9, false), 1);
        history.record(end(Difficulty::Easy, 40, true), 2);
        history.record(end(Difficulty::Easy, 25, true), 3);
        history.record(end(Difficulty::Easy, 33, true), 4);

        let times: Vec<_> = history
            .top_times(Difficulty::Easy, 2)
            .iter()
            .map(|entry| entry.time_secs)
            .collect();

        assert_eq!(times, [25, 33]);
        assert!(history.top_times(Difficulty::Huge, 10).is_empty());
    }

    #[test]
    fn statistics_round_rate_and_average() {
        let mut history = GameHistory::new();
        history.record(end(Difficulty::Hard, 10, true), 1);
        history.record(end(Difficulty::Hard, 13, true), 2);
        history.record(end(Difficulty::Hard, 70, false), 3);

        assert_eq!(
            history.statistics(Difficulty::Hard),
            Statistics {
                total_games: 3,
                games_won: 2,
                win_rate: 67,
                best_time: Some(10),
                average_time: Some(12),
            }
        );
    }

    #[test]
    fn statistics_without_wins() {
        let mut history = GameHistory::new();
        assert_eq!(history.statistics(Difficulty::Easy), Statistics::default());

        history.record(end(Difficulty::Easy, 5, false), 1);

        let stats = history.statistics(Difficulty::Easy);
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.win_rate, 0);
        assert_eq!(stats.best_time, None);
        assert_eq!(stats.average_time, None);
    }

    #[test]
    fn clear_drops_one_difficulty() {
        let mut history = GameHistory::new();
        history.record(end(Difficulty::Easy, 5, true), 1);
        history.record(end(Difficulty::Extreme, 500, true), 2);

        history.clear(Difficulty::Easy);

        assert!(history.entries(Difficulty::Easy).is_empty());
        assert_eq!(history.entries(Difficulty::Extreme).len(), 1);
    }

    #[test]
    fn json_keys_by_difficulty_name() {
        let mut history = GameHistory::new();
        history.record(end(Difficulty::Huge, 321, true), 1_700_000_000_000);

        let json = history.to_json().unwrap();

        assert!(json.starts_with("{\"huge\":["));
        assert_eq!(GameHistory::from_json(&json).unwrap(), history);
    }

    #[test]
    fn loaded_history_is_reordered() {
        let json = r#"{"easy":[
            {"difficulty":"easy","time_secs":9,"won":false,"recorded_at":1},
            {"difficulty":"easy","time_secs":40,"won":true,"recorded_at":2},
            {"difficulty":"easy","time_secs":25,"won":true,"recorded_at":3}
        ]}"#;

        let history = GameHistory::from_json(json).unwrap();

        let times: Vec<_> = history
            .entries(Difficulty::Easy)
            .iter()
            .map(|entry| entry.time_secs)
            .collect();
        assert_eq!(times, [25, 40, 9]);
        assert!(GameHistory::from_json("{\"novice\":[]}").is_err());
    }
}
