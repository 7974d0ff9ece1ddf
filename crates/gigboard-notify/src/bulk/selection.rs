//! Selection state of the bulk-action UI.

use serde::Serialize;

/// `Idle → Selecting(ids) → Executing(ids) → Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "ids", rename_all = "snake_case")]
pub enum SelectionState<Id> {
    /// Nothing selected.
    Idle,
    /// The user is picking items, in selection order.
    Selecting(Vec<Id>),
    /// A run over these ids is in progress.
    Executing(Vec<Id>),
}

impl<Id> Default for SelectionState<Id> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<Id: Clone + PartialEq> SelectionState<Id> {
    /// Currently selected or executing ids.
    pub fn ids(&self) -> &[Id] {
        match self {
            Self::Idle => &[],
            Self::Selecting(ids) | Self::Executing(ids) => ids,
        }
    }

    /// Whether a run is in progress.
    pub fn is_executing(&self) -> bool {
        matches!(self, Self::Executing(_))
    }

    /// Add `id` to the selection, keeping first-selection order.
    pub(crate) fn add(&mut self, id: Id) {
        match self {
            Self::Idle => *self = Self::Selecting(vec![id]),
            Self::Selecting(ids) => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            Self::Executing(_) => {}
        }
    }

    /// Remove `id`; an emptied selection falls back to `Idle`.
    pub(crate) fn remove(&mut self, id: &Id) {
        if let Self::Selecting(ids) = self {
            ids.retain(|x| x != id);
            if ids.is_empty() {
                *self = Self::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove_cycle() {
        let mut state: SelectionState<&str> = SelectionState::default();
        state.add("a");
        state.add("b");
        state.add("a");
        assert_eq!(state, SelectionState::Selecting(vec!["a", "b"]));
        state.remove(&"a");
        state.remove(&"b");
        assert_eq!(state, SelectionState::Idle);
    }

    #[test]
    fn test_executing_ignores_edits() {
        let mut state = SelectionState::Executing(vec!["a"]);
        state.add("b");
        state.remove(&"a");
        assert_eq!(state.ids(), &["a"]);
        assert!(state.is_executing());
    }
}
