//! Authoritative placed-tower storage.

use data_defence_core::{PlacedTower, Tower, TowerId};

/// Registry that stores placed towers in insertion order and allocates identifiers.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: Vec<PlacedTower>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Appends a tower and returns the identifier allocated to it.
    pub(crate) fn insert(&mut self, tower: Tower) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().wrapping_add(1));
        self.entries.push(PlacedTower { id, tower });
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&Tower> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.tower)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.tower)
    }

    /// Removes a tower while preserving the order of the remaining entries.
    pub(crate) fn remove(&mut self, id: TowerId) -> Option<Tower> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).tower)
    }

    pub(crate) fn as_slice(&self) -> &[PlacedTower] {
        &self.entries
    }
}
