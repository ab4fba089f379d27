//! Golden predictor selection

use super::RosterEntry;

/// Which roster entry is golden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// No evaluation cycle has completed
    #[default]
    Uninitialized,
    Selected { index: usize },
}

impl Selection {
    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::Uninitialized => None,
            Selection::Selected { index } => Some(*index),
        }
    }
}

/// Index of the highest accuracy; the earliest entry wins a tie
pub fn select_golden(roster: &[RosterEntry]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, entry) in roster.iter().enumerate() {
        match best {
            Some((_, accuracy)) if entry.accuracy <= accuracy => {}
            _ => best = Some((index, entry.accuracy)),
        }
    }
    best.map(|(index, _)| index)
}
