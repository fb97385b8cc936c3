//! Typed session handles for host processes.
//!
//! Embedders (FFI bindings, scripting hosts) frequently cannot hold a
//! [`MediaSession`](crate::MediaSession) directly and instead pass an opaque
//! token across the boundary. [`SessionTable`] owns the sessions and hands
//! out generation-checked [`Handle`]s: a stale or fabricated token resolves
//! to `None` instead of aliasing whatever session later reuses the slot.
//! Raw addresses never cross the boundary.

use crate::session::MediaSession;

/// An opaque, copyable token identifying an entry in a [`HandleTable`].
///
/// A handle is only meaningful to the table that issued it. After the entry
/// is removed the handle goes stale permanently; the slot is reused under a
/// new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A generation-checked table of owned values addressed by [`Handle`].
///
/// Slots are recycled through a free list; each reuse bumps the slot's
/// generation so outstanding handles to the old occupant stop resolving.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

/// The table a host process keeps its open sessions in.
pub type SessionTable = HandleTable<MediaSession>;

/// Handle type re-exported under the name hosts see.
pub type SessionHandle = Handle;

impl<T> HandleTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a value and return its handle.
    pub fn insert(&mut self, value: T) -> Handle {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                Handle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                Handle {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Resolve a handle to a shared reference.
    ///
    /// Returns `None` for stale or fabricated handles.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Resolve a handle to an exclusive reference.
    ///
    /// Returns `None` for stale or fabricated handles.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Remove and return the value behind a handle.
    ///
    /// The handle (and any copy of it) goes permanently stale; the slot is
    /// recycled under a new generation. Removing twice is a no-op.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(value)
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_resolve() {
        let mut table = HandleTable::new();
        let a = table.insert("alpha");
        let b = table.insert("beta");

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(a), Some(&"alpha"));
        assert_eq!(table.get(b), Some(&"beta"));
    }

    #[test]
    fn removed_handles_go_stale() {
        let mut table = HandleTable::new();
        let handle = table.insert(42);

        assert_eq!(table.remove(handle), Some(42));
        assert_eq!(table.get(handle), None);
        assert_eq!(table.remove(handle), None);
        assert!(table.is_empty());
    }

    #[test]
    fn recycled_slot_does_not_resurrect_old_handle() {
        let mut table = HandleTable::new();
        let old = table.insert("first");
        table.remove(old);

        let new = table.insert("second");
        assert_ne!(old, new);
        assert_eq!(table.get(old), None);
        assert_eq!(table.get(new), Some(&"second"));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = HandleTable::new();
        let handle = table.insert(String::from("a"));
        table.get_mut(handle).unwrap().push('b');
        assert_eq!(table.get(handle).map(String::as_str), Some("ab"));
    }

    #[test]
    fn fabricated_handle_on_empty_table() {
        let table: HandleTable<u8> = HandleTable::new();
        let bogus = Handle {
            index: 7,
            generation: 0,
        };
        assert_eq!(table.get(bogus), None);
    }
}
