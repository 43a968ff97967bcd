use alloc::vec::Vec;
use core::iter;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: PlayerName,
    pub score: Score,
    pub role: Role,
}

impl ScoreEntry {
    pub fn new(identity: &Identity, score: Score) -> Self {
        Self {
            name: identity.name.clone(),
            score,
            role: identity.role,
        }
    }
}

/// Best score per `(name, role)`, cut to the top entries of each role.
///
/// Entries are stored with the role of the most recent finisher first; `top` gives a role-only view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    depth: usize,
}

impl Leaderboard {
    pub const DEFAULT_DEPTH: usize = 3;

    pub fn with_depth(depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of `role`, highest score first.
    pub fn top(&self, role: Role) -> impl Iterator<Item = &ScoreEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.role == role)
            .take(self.depth)
    }

    #[cfg(test)]
    fn best_for(&self, name: &PlayerName, role: Role) -> Option<Score> {
        self.entries
            .iter()
            .find(|entry| entry.role == role && entry.name == *name)
            .map(|entry| entry.score)
    }

    /// Merges a finished round, keeping only the higher score for a repeated `(name, role)`.
    pub fn fold(&mut self, finished: ScoreEntry) {
        let finishing_role = finished.role;

        let mut best: Vec<ScoreEntry> = Vec::with_capacity(self.entries.len() + 1);
        let mut slots: HashMap<(PlayerName, Role), usize> = HashMap::new();
        for candidate in self.entries.drain(..).chain(iter::once(finished)) {
            match slots.entry((candidate.name.clone(), candidate.role)) {
                Entry::Occupied(slot) => {
                    let kept = &mut best[*slot.get()];
                    if candidate.score > kept.score {
                        *kept = candidate;
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(best.len());
                    best.push(candidate);
                }
            }
        }

        let (mut same_role, mut other_role): (Vec<_>, Vec<_>) = best
            .into_iter()
            .partition(|entry| entry.role == finishing_role);
        for ranked in [&mut same_role, &mut other_role] {
            // stable, so equal scores keep their earlier position
            ranked.sort_by(|a, b| b.score.cmp(&a.score));
            ranked.truncate(self.depth);
        }

        same_role.append(&mut other_role);
        self.entries = same_role;
        log::debug!("leaderboard now holds {} entries", self.entries.len());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::with_depth(Self::DEFAULT_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(name: &str, score: Score, role: Role) -> ScoreEntry {
        ScoreEntry {
            name: PlayerName::sanitize(name),
            score,
            role,
        }
    }

    fn names(board: &Leaderboard, role: Role) -> Vec<&str> {
        board.top(role).map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn higher_score_wins_for_same_identity() {
        let mut board = Leaderboard::default();
        board.fold(entry("Ada", 10, Role::Goddess));
        board.fold(entry("Ada", 7, Role::Goddess));

        assert_eq!(board.entries(), [entry("Ada", 10, Role::Goddess)]);

        board.fold(entry("Ada", 12, Role::Goddess));
        assert_eq!(board.best_for(&PlayerName::sanitize("Ada"), Role::Goddess), Some(12));
        assert_eq!(board.entries().len(), 1);
    }

    #[test]
    fn same_name_in_both_roles_is_kept_separately() {
        let mut board = Leaderboard::default();
        board.fold(entry("Ada", 10, Role::Goddess));
        board.fold(entry("Ada", 4, Role::Servant));

        assert_eq!(names(&board, Role::Goddess), ["Ada"]);
        assert_eq!(names(&board, Role::Servant), ["Ada"]);
    }

    #[test]
    fn each_role_is_cut_to_top_three() {
        let mut board = Leaderboard::default();
        for (name, score) in [("A", 5), ("B", 9), ("C", 1), ("D", 7), ("E", 3)] {
            board.fold(entry(name, score, Role::Servant));
        }
        board.fold(entry("G", 2, Role::Goddess));

        assert_eq!(names(&board, Role::Servant), ["B", "D", "A"]);
        assert_eq!(names(&board, Role::Goddess), ["G"]);
        assert_eq!(board.entries().len(), 4);
    }

    #[test]
    fn dropped_entries_do_not_come_back() {
        let mut board = Leaderboard::default();
        for (name, score) in [("A", 5), ("B", 9), ("C", 8), ("D", 7)] {
            board.fold(entry(name, score, Role::Servant));
        }
        board.fold(entry("E", 1, Role::Servant));

        assert_eq!(names(&board, Role::Servant), ["B", "C", "D"]);
        assert_eq!(board.best_for(&PlayerName::sanitize("A"), Role::Servant), None);
    }

    #[test]
    fn finishing_role_is_stored_first() {
        let mut board = Leaderboard::default();
        board.fold(entry("G", 2, Role::Goddess));
        board.fold(entry("S", 1, Role::Servant));

        let roles: Vec<Role> = board.entries().iter().map(|entry| entry.role).collect();
        assert_eq!(roles, vec![Role::Servant, Role::Goddess]);
    }

    #[test]
    fn ties_keep_earlier_entries_first() {
        let mut board = Leaderboard::default();
        board.fold(entry("First", 4, Role::Goddess));
        board.fold(entry("Second", 4, Role::Goddess));
        board.fold(entry("Third", 4, Role::Goddess));
        board.fold(entry("Fourth", 4, Role::Goddess));

        assert_eq!(names(&board, Role::Goddess), ["First", "Second", "Third"]);
    }

    #[test]
    fn leaderboard_serializes_entries_and_depth() {
        let mut board = Leaderboard::default();
        board.fold(entry("Ada", 10, Role::Goddess));

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r#"{"entries":[{"name":"Ada","score":10,"role":"Goddess"}],"depth":3}"#
        );
    }
}
