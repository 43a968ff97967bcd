use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Players who found the hidden title button, in the order they found it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverLog {
    names: Vec<PlayerName>,
}

impl SolverLog {
    /// Returns `true` when `name` was not logged before.
    pub fn record(&mut self, name: PlayerName) -> bool {
        if name.is_empty() || self.contains(&name) {
            return false;
        }

        log::info!("new solver: {}", name);
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &PlayerName) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerName> + '_ {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
