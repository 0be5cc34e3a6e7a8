/// Interaction Matrix
///
/// Dense user × item presence matrix built from interaction facts.
/// Rows and columns are kept in ascending identifier order.
use crate::models::{InteractionFact, InteractionSource, User};
use ndarray::{Array2, ArrayView1};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    users: Vec<String>,
    items: Vec<String>,
    user_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    cells: Array2<f64>,
}

impl InteractionMatrix {
    /// Build the matrix. A cell is 1.0 when the pair has at least one fact
    /// with non-zero strength. Zero-strength facts still register their
    /// user and item.
    pub fn from_facts(facts: &[InteractionFact]) -> Self {
        let users: Vec<String> = facts
            .iter()
            .map(|f| f.user_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let items: Vec<String> = facts
            .iter()
            .map(|f| f.item_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index = index_of(&users);
        let item_index = index_of(&items);

        let mut cells = Array2::<f64>::zeros((users.len(), items.len()));
        for fact in facts {
            if fact.strength == 0 {
                continue;
            }
            let row = user_index[&fact.user_id];
            let col = item_index[&fact.item_id];
            // presence, not count
            cells[[row, col]] = 1.0;
        }

        Self {
            users,
            items,
            user_index,
            item_index,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_index.contains_key(user_id)
    }

    /// Cell value; 0 for identifiers the matrix has never seen.
    pub fn value(&self, user_id: &str, item_id: &str) -> u8 {
        match (self.user_index.get(user_id), self.item_index.get(item_id)) {
            (Some(&row), Some(&col)) if self.cells[[row, col]] > 0.0 => 1,
            _ => 0,
        }
    }

    /// Items the user has a non-zero cell for, in column order
    pub fn interacted_items(&self, user_id: &str) -> Vec<&str> {
        let Some(&row) = self.user_index.get(user_id) else {
            return Vec::new();
        };

        self.cells
            .row(row)
            .iter()
            .zip(&self.items)
            .filter(|(cell, _)| **cell > 0.0)
            .map(|(_, item)| item.as_str())
            .collect()
    }

    pub(crate) fn row_index(&self, user_id: &str) -> Option<usize> {
        self.user_index.get(user_id).copied()
    }

    pub(crate) fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.cells.row(index)
    }
}

fn index_of(ids: &[String]) -> HashMap<String, usize> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect()
}

/// Interaction facts for a user record: history entries first, then saves.
/// Duplicates are kept; the matrix clamps them to presence.
pub fn derive_facts(user: &User) -> Vec<InteractionFact> {
    let history = user
        .history
        .iter()
        .map(|item| InteractionFact::new(&user.id, item, InteractionSource::History));
    let saved = user
        .save_list
        .iter()
        .map(|item| InteractionFact::new(&user.id, item, InteractionSource::SaveList));

    history.chain(saved).collect()
}
