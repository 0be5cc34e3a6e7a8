use super::interaction_matrix::derive_facts;
use crate::models::{InteractionFact, Item, User};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Source of the current company catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn items(&self) -> Result<Vec<Item>>;
}

/// Source of the cross-user interaction corpus
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn facts(&self) -> Result<Vec<InteractionFact>>;
}

/// Catalog snapshot kept in memory, keyed by company id
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: DashMap<String, Item>,
}

impl InMemoryCatalog {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let catalog = Self::default();
        catalog.replace(items);
        catalog
    }

    /// Swap the whole snapshot
    pub fn replace(&self, items: impl IntoIterator<Item = Item>) {
        self.items.clear();
        for item in items {
            self.items.insert(item.id.clone(), item);
        }
    }

    pub fn upsert(&self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn items(&self) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self.items.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}

/// Per-user interaction facts kept in memory
#[derive(Debug, Default)]
pub struct InMemoryInteractionStore {
    facts: DashMap<String, Vec<InteractionFact>>,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive a user's facts from their current record
    pub fn upsert_user(&self, user: &User) {
        let facts = derive_facts(user);
        if facts.is_empty() {
            self.facts.remove(&user.id);
        } else {
            self.facts.insert(user.id.clone(), facts);
        }
    }

    pub fn remove_user(&self, user_id: &str) -> bool {
        self.facts.remove(user_id).is_some()
    }

    pub fn user_count(&self) -> usize {
        self.facts.len()
    }
}

#[async_trait]
impl InteractionStore for InMemoryInteractionStore {
    async fn facts(&self) -> Result<Vec<InteractionFact>> {
        let mut users: Vec<String> = self.facts.iter().map(|entry| entry.key().clone()).collect();
        users.sort();

        let facts = users
            .iter()
            .filter_map(|user_id| self.facts.get(user_id).map(|facts| facts.value().clone()))
            .flatten()
            .collect();
        Ok(facts)
    }
}
