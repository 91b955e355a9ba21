use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

use ahash::RandomState;
use hashbrown::hash_table::Entry;
use hashbrown::HashTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interned(NonZeroUsize);

impl Interned {
    /// Position of the entry in first-occurrence order.
    pub fn index(self) -> usize {
        self.0.get() - 1
    }
}

/// Stores each distinct value once, remembering the order in which values were
/// first seen.
pub struct Interner<T> {
    random_state: RandomState,
    lookup: HashTable<Index>,

    interned_entries: Vec<T>,
}

impl<T> Default for Interner<T> {
    fn default() -> Self {
        Self {
            random_state: RandomState::new(),
            lookup: HashTable::new(),
            interned_entries: vec![],
        }
    }
}

impl<T> Interner<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if the number of entries overflows `usize`.
    pub fn intern<Q>(&mut self, key: &Q) -> Interned
    where
        Q: ToOwned<Owned = T> + Hash + Eq + ?Sized,
        T: Borrow<Q>,
    {
        let hash = self.random_state.hash_one(key);

        let entry = self.lookup.entry(
            hash,
            |&index| self.interned_entries[index.index].borrow() == key,
            |&index| index.hash,
        );

        let index = match entry {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = Index {
                    index: self.interned_entries.len(),
                    hash,
                };

                self.interned_entries.push(key.to_owned());
                entry.insert(index);

                index
            }
        };

        Interned(NonZeroUsize::new(index.index.wrapping_add(1)).unwrap())
    }

    #[inline]
    pub fn get(&self, interned: Interned) -> Option<&T> {
        self.interned_entries.get(interned.index())
    }

    pub fn len(&self) -> usize {
        self.interned_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interned_entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.interned_entries.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Interner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.interned_entries).finish()
    }
}

impl<'a, T> IntoIterator for &'a Interner<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serialize")]
impl<T: serde::Serialize> serde::Serialize for Interner<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(&self.interned_entries)
    }
}

#[derive(Clone, Copy)]
struct Index {
    index: usize,
    hash: u64,
}

#[cfg(test)]
mod tests {
    use super::Interner;

    #[test]
    fn first_occurrence_wins() {
        let mut interner: Interner<String> = Interner::new();

        let a = interner.intern("a");
        let b = interner.intern("b");
        let a2 = interner.intern("a");

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.iter().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(interner.get(b).map(String::as_str), Some("b"));
    }

    #[test]
    fn empty() {
        let interner: Interner<String> = Interner::default();
        assert!(interner.is_empty());
        assert_eq!(interner.iter().next(), None);
    }
}
