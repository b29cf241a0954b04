//! Character store - value source/sink for the raw snapshot

use super::raw::{CharacterPatch, RawCharacter};

/// Holds the current raw snapshot and accepts partial updates
pub trait CharacterStore {
    /// Current snapshot
    fn character(&self) -> &RawCharacter;

    /// Merge a partial update into the snapshot
    fn update(&mut self, patch: CharacterPatch);
}

/// Store that keeps the snapshot in memory, replacing it on every update
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    current: RawCharacter,
    revision: u64,
}

impl MemoryStore {
    pub fn new(character: RawCharacter) -> Self {
        MemoryStore {
            current: character,
            revision: 0,
        }
    }

    /// Number of snapshot replacements so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_inner(self) -> RawCharacter {
        self.current
    }
}

impl CharacterStore for MemoryStore {
    fn character(&self) -> &RawCharacter {
        &self.current
    }

    fn update(&mut self, patch: CharacterPatch) {
        if patch.is_empty() {
            return;
        }
        self.current = self.current.with_patch(patch);
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_snapshot() {
        let mut store = MemoryStore::new(RawCharacter::default());
        let before = store.character().clone();
        store.update(CharacterPatch::current_luck(3));

        assert_eq!(store.character().current_luck(), 3);
        assert_eq!(store.revision(), 1);
        assert_eq!(before.current_luck(), 5);
    }

    #[test]
    fn test_empty_patch_is_ignored() {
        let mut store = MemoryStore::new(RawCharacter::default());
        store.update(CharacterPatch::default());
        assert_eq!(store.revision(), 0);
    }
}
