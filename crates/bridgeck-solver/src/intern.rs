//! Type interning for structural deduplication.
//!
//! Converts `TypeData` keys into lightweight `TypeId` handles:
//! - O(1) type identity (compare `TypeId` values)
//! - each distinct structure stored once
//! - safe to use from many resolver threads at once
//!
//! The registry is frozen after the build phase, but substitution keeps
//! producing new instantiations during resolution (e.g. `Iterator<Var(E)>`
//! for a receiver nobody flattened before). The interner is therefore the
//! one append-only structure shared by all workers.

use crate::types::{TypeData, TypeId, TypeListId};
use bridgeck_common::{Atom, ShardedInterner};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

const SHARD_BITS: u32 = 5;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 32 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeData, u32>>,
    index_to_key: RwLock<Vec<TypeData>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: &[T]) -> u32
    where
        T: Clone,
    {
        if items.is_empty() {
            return 0;
        }

        if let Some(&id) = self.map.get(items) {
            return id;
        }

        let arc: Arc<[T]> = Arc::from(items);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }

    fn empty(&self) -> Arc<[T]> {
        self.items[0].clone()
    }
}

/// Type interning table.
/// Thread-safe via per-shard `RwLock`s.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// Names of declarations, members and type variables.
    pub names: ShardedInterner,
    type_lists: RwLock<SliceInterner<TypeId>>,
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            names: {
                let names = ShardedInterner::new();
                names.intern_common();
                names
            },
            type_lists: RwLock::new(SliceInterner::new()),
        }
    }

    #[inline]
    pub fn intern_name(&self, s: &str) -> Atom {
        self.names.intern(s)
    }

    /// Look a name up without interning it.
    #[inline]
    pub fn lookup_name(&self, s: &str) -> Option<Atom> {
        self.names.get(s)
    }

    #[inline]
    pub fn resolve_name(&self, atom: Atom) -> Arc<str> {
        self.names.resolve(atom)
    }

    /// Intern a type key.
    pub fn intern(&self, key: TypeData) -> TypeId {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard
                .key_to_index
                .read()
                .expect("shard key_to_index lock poisoned");
            if let Some(&local_index) = map.get(&key) {
                return Self::make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard
            .key_to_index
            .write()
            .expect("shard key_to_index lock poisoned");
        let mut storage = shard
            .index_to_key
            .write()
            .expect("shard index_to_key lock poisoned");

        if let Some(&local_index) = map.get(&key) {
            return Self::make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        storage.push(key);
        map.insert(key, local_index);
        Self::make_id(local_index, shard_idx as u32)
    }

    /// Look up the structure behind a `TypeId`.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        let shard_idx = (id.0 & SHARD_MASK) as usize;
        let local_index = (id.0 >> SHARD_BITS) as usize;
        let shard = self.shards.get(shard_idx)?;
        let storage = shard
            .index_to_key
            .read()
            .expect("shard index_to_key lock poisoned");
        storage.get(local_index).copied()
    }

    pub fn intern_type_list(&self, items: &[TypeId]) -> TypeListId {
        if items.is_empty() {
            return TypeListId::EMPTY;
        }
        let mut lists = self.type_lists.write().expect("type_lists lock poisoned");
        TypeListId(lists.intern(items))
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        let lists = self.type_lists.read().expect("type_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    /// Intern `decl<args...>`.
    pub fn named(&self, decl: crate::DeclId, args: &[TypeId]) -> TypeId {
        let args = self.intern_type_list(args);
        self.intern(TypeData::Named { decl, args })
    }

    pub fn param(&self, owner: crate::DeclId, index: u32) -> TypeId {
        self.intern(TypeData::Param { owner, index })
    }

    pub fn var(&self, name: Atom) -> TypeId {
        self.intern(TypeData::Var(name))
    }

    #[inline]
    fn make_id(local_index: u32, shard_idx: u32) -> TypeId {
        TypeId((local_index << SHARD_BITS) | (shard_idx & SHARD_MASK))
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
