// ============================================================
// Layer 3 — Vocabulary
// ============================================================
// Maps token strings to the integer indices that select rows
// of the embedding table.
//
// Index layout:
//   0  → padding / mask sentinel, never assigned to a token
//   1  → "<unk>" when the vocabulary was built from a corpus
//   2… → tokens in order of first appearance
//
// A vocabulary can also be given explicitly (token → index),
// in which case there is no "<unk>" entry unless the caller
// provides one, and unknown tokens encode to padding.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Index reserved for padding. Masked out by the model.
pub const PAD_ID: u32 = 0;

/// Index of the unknown-token entry in a built vocabulary.
pub const UNK_ID: u32 = 1;

pub const UNK_TOKEN: &str = "<unk>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    ids:     HashMap<String, u32>,
    unk_id:  Option<u32>,
    next_id: u32,
}

impl Vocabulary {
    /// An empty vocabulary holding only the "<unk>" entry.
    pub fn new() -> Self {
        let mut ids = HashMap::new();
        ids.insert(UNK_TOKEN.to_string(), UNK_ID);
        Self { ids, unk_id: Some(UNK_ID), next_id: UNK_ID + 1 }
    }

    /// Build from an explicit token → index mapping.
    ///
    /// Indices must be unique and non-zero (0 is padding).
    pub fn from_map(ids: HashMap<String, u32>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(ids.len());
        for (token, &id) in &ids {
            if id == PAD_ID {
                bail!("token '{token}' uses the reserved padding index {PAD_ID}");
            }
            if !seen.insert(id) {
                bail!("index {id} is assigned to more than one token");
            }
        }
        let unk_id  = ids.get(UNK_TOKEN).copied();
        let Some(next_id) = ids.values().copied().max().unwrap_or(PAD_ID).checked_add(1) else {
            bail!("index {} leaves no room for new tokens", u32::MAX);
        };
        Ok(Self { ids, unk_id, next_id })
    }

    /// Return the index of `token`, assigning the next free one if new.
    pub fn insert(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = self.next_id;
        self.ids.insert(token.to_string(), id);
        self.next_id += 1;
        id
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    /// Index for `token`, falling back to "<unk>" (or padding when the
    /// vocabulary has no unknown entry).
    pub fn encode(&self, token: &str) -> u32 {
        self.id(token)
            .or(self.unk_id)
            .unwrap_or(PAD_ID)
    }

    /// Number of embedding rows needed: highest index + 1.
    pub fn len(&self) -> usize {
        self.next_id as usize
    }

    /// Number of distinct tokens (excluding padding).
    pub fn token_count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reserves_padding_and_unknown() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.id(UNK_TOKEN), Some(UNK_ID));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_insert_assigns_first_appearance_order() {
        let mut vocab = Vocabulary::new();
        assert_eq!(vocab.insert("good"), 2);
        assert_eq!(vocab.insert("bad"), 3);
        // Re-inserting returns the existing index
        assert_eq!(vocab.insert("good"), 2);
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn test_unknown_tokens_encode_to_unk() {
        let mut vocab = Vocabulary::new();
        vocab.insert("good");
        assert_eq!(vocab.encode("never-seen"), UNK_ID);
    }

    #[test]
    fn test_explicit_map_without_unk_encodes_unknown_as_padding() {
        let map = HashMap::from([
            ("good".to_string(), 1),
            ("bad".to_string(),  2),
            ("ok".to_string(),   3),
        ]);
        let vocab = Vocabulary::from_map(map).unwrap();
        assert_eq!(vocab.encode("good"), 1);
        assert_eq!(vocab.encode("meh"), PAD_ID);
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn test_explicit_map_rejects_padding_index_and_duplicates() {
        let zero = HashMap::from([("a".to_string(), 0)]);
        assert!(Vocabulary::from_map(zero).is_err());

        let dup = HashMap::from([("a".to_string(), 1), ("b".to_string(), 1)]);
        assert!(Vocabulary::from_map(dup).is_err());
    }

    #[test]
    fn test_explicit_map_rejects_highest_possible_index() {
        let full = HashMap::from([("a".to_string(), u32::MAX)]);
        assert!(Vocabulary::from_map(full).is_err());
    }
}
