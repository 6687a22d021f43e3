/*!
 * Process Arena
 * Owns every live process; queues refer to processes by handle
 */

use super::types::Location;
use crate::core::types::Pid;
use crate::process::Process;
use ahash::AHashMap;

/// Stable reference to a process slot
///
/// Slots are never reused within a run, so a handle cannot alias a later
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct Handle(usize);

impl Handle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot {
    process: Process,
    location: Location,
}

#[derive(Default)]
pub(super) struct ProcessArena {
    slots: Vec<Option<Slot>>,
    // pid -> handle index for O(1) lookup
    by_pid: AHashMap<Pid, Handle>,
}

impl ProcessArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a process; `None` if its pid is already live
    pub fn insert(&mut self, process: Process, location: Location) -> Option<Handle> {
        let pid = process.pid();
        if self.by_pid.contains_key(&pid) {
            return None;
        }

        let handle = Handle(self.slots.len());
        self.slots.push(Some(Slot { process, location }));
        self.by_pid.insert(pid, handle);
        Some(handle)
    }

    pub fn remove(&mut self, handle: Handle) -> Option<Process> {
        let slot = self.slots.get_mut(handle.0)?.take()?;
        self.by_pid.remove(&slot.process.pid());
        Some(slot.process)
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&Process> {
        self.slot(handle).map(|s| &s.process)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Process> {
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .map(|s| &mut s.process)
    }

    pub fn handle_of(&self, pid: Pid) -> Option<Handle> {
        self.by_pid.get(&pid).copied()
    }

    pub fn location(&self, handle: Handle) -> Option<Location> {
        self.slot(handle).map(|s| s.location)
    }

    /// Returns false when the handle is stale
    pub fn set_location(&mut self, handle: Handle, location: Location) -> bool {
        match self.slots.get_mut(handle.0).and_then(Option::as_mut) {
            Some(slot) => {
                slot.location = location;
                true
            }
            None => false,
        }
    }

    /// Live processes with their locations
    pub fn iter(&self) -> impl Iterator<Item = (&Process, Location)> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| (&slot.process, slot.location))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_pid.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_pid.is_empty()
    }

    fn slot(&self, handle: Handle) -> Option<&Slot> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }
}
