//! Bounded generational slot table backing every registry of the library.
//!
//! A [`Handle`] names a slot together with the generation it was issued in;
//! once the slot is freed the old handle stops resolving, even if the slot is
//! reused later.

use crate::error::{Error, Result};

/// Opaque reference into a [`SlotTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Slot index, stable for the handle's lifetime.
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A fixed-capacity table of values addressed by [`Handle`]s.
#[derive(Debug, Clone)]
pub struct SlotTable<T> {
    slots: Vec<Slot<T>>,
    capacity: usize,
    name: &'static str,
}

impl<T> SlotTable<T> {
    /// Create an empty table. `name` labels [`Error::RegistryFull`].
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            name,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether another value fits.
    pub fn has_room(&self) -> bool {
        self.slots.len() < self.capacity || self.slots.iter().any(|s| s.value.is_none())
    }

    /// Fails with [`Error::RegistryFull`] when no slot is free.
    pub fn reserve(&self) -> Result<()> {
        if self.has_room() {
            Ok(())
        } else {
            Err(Error::RegistryFull(self.name))
        }
    }

    /// Store `value` in the lowest free slot.
    pub fn insert(&mut self, value: T) -> Result<Handle> {
        if let Some(index) = self.slots.iter().position(|s| s.value.is_none()) {
            let slot = &mut self.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            return Ok(Handle {
                index: index as u32,
                generation: slot.generation,
            });
        }
        if self.slots.len() >= self.capacity {
            return Err(Error::RegistryFull(self.name));
        }
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Ok(Handle {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        })
    }

    fn slot(&self, h: Handle) -> Option<&Slot<T>> {
        self.slots
            .get(h.index())
            .filter(|s| s.generation == h.generation)
    }

    pub fn contains(&self, h: Handle) -> bool {
        self.get(h).is_some()
    }

    pub fn get(&self, h: Handle) -> Option<&T> {
        self.slot(h).and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, h: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(h.index())
            .filter(|s| s.generation == h.generation)
            .and_then(|s| s.value.as_mut())
    }

    /// Free the slot, returning its value if the handle was live.
    pub fn remove(&mut self, h: Handle) -> Option<T> {
        self.slots
            .get_mut(h.index())
            .filter(|s| s.generation == h.generation)
            .and_then(|s| s.value.take())
    }

    /// Free every slot. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for s in &mut self.slots {
            s.value = None;
        }
    }

    /// Iterate over live `(handle, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|v| {
                (
                    Handle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut t = SlotTable::new("grid", 4);
        let a = t.insert("a").unwrap();
        let b = t.insert("b").unwrap();
        assert_eq!(t.get(a), Some(&"a"));
        assert_eq!(t.len(), 2);
        assert_eq!(t.remove(a), Some("a"));
        assert!(!t.contains(a));
        assert_eq!(t.get(b), Some(&"b"));
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut t = SlotTable::new("path", 1);
        let a = t.insert(1).unwrap();
        t.remove(a);
        let b = t.insert(2).unwrap();
        assert_eq!(a.index(), b.index(), "slot should be reused");
        assert_eq!(t.get(a), None, "old handle must not see the new value");
        assert_eq!(t.get(b), Some(&2));
        assert_eq!(t.remove(a), None);
    }

    #[test]
    fn test_capacity_bound() {
        let mut t = SlotTable::new("projection", 2);
        t.insert(()).unwrap();
        let h = t.insert(()).unwrap();
        assert!(!t.has_room());
        assert_eq!(t.insert(()), Err(Error::RegistryFull("projection")));
        assert_eq!(t.reserve(), Err(Error::RegistryFull("projection")));
        t.remove(h);
        assert!(t.reserve().is_ok());
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut t = SlotTable::new("grid", 3);
        let hs: Vec<_> = (0..3).map(|i| t.insert(i).unwrap()).collect();
        t.clear();
        assert!(t.is_empty());
        assert!(hs.iter().all(|&h| !t.contains(h)));
        assert_eq!(t.iter().count(), 0);
    }
}
