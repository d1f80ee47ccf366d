//! Element Registry - arena of host node handles.
//!
//! VNodes do not hold host nodes directly. They hold an [`ElementId`] that
//! points into this registry:
//! - Free index pool for O(1) reuse
//! - Generation per slot so ids of released slots go stale instead of
//!   aliasing the next occupant
//! - Exactly one live id per mounted element

use crate::types::ElementId;

// =============================================================================
// Slots
// =============================================================================

#[derive(Debug)]
struct Slot<N> {
    generation: u32,
    node: Option<N>,
}

/// Arena mapping [`ElementId`]s to host nodes.
#[derive(Debug)]
pub struct ElementRegistry<N> {
    slots: Vec<Slot<N>>,
    free: Vec<usize>,
    allocated: usize,
}

impl<N> Default for ElementRegistry<N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            allocated: 0,
        }
    }
}

impl<N> ElementRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Store a host node and return its id.
    ///
    /// Reuses a freed slot if one is available.
    pub fn allocate(&mut self, node: N) -> ElementId {
        self.allocated += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return ElementId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        ElementId { index, generation: 0 }
    }

    /// Release an id, returning its node.
    ///
    /// Stale or unknown ids return `None` and leave the registry untouched.
    pub fn release(&mut self, id: ElementId) -> Option<N> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.allocated -= 1;
        Some(node)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get(&self, id: ElementId) -> Option<&N> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn is_allocated(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.allocated
    }

    pub fn is_empty(&self) -> bool {
        self.allocated == 0
    }

    /// Number of slots ever created (live + free).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate() {
        let mut registry = ElementRegistry::new();

        let a = registry.allocate("a");
        let b = registry.allocate("b");

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.get(a), Some(&"a"));
        assert_eq!(registry.get(b), Some(&"b"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_release_and_reuse() {
        let mut registry = ElementRegistry::new();

        let a = registry.allocate("a");
        let _b = registry.allocate("b");

        assert_eq!(registry.release(a), Some("a"));
        assert!(!registry.is_allocated(a));
        assert_eq!(registry.len(), 1);

        // Slot is reused with a new generation
        let c = registry.allocate("c");
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(registry.capacity(), 2);
    }

    #[test]
    fn test_stale_id_does_not_alias() {
        let mut registry = ElementRegistry::new();

        let a = registry.allocate("a");
        registry.release(a);
        let _c = registry.allocate("c");

        assert_eq!(registry.get(a), None);
        assert_eq!(registry.release(a), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_double_release() {
        let mut registry = ElementRegistry::new();

        let a = registry.allocate("a");
        assert_eq!(registry.release(a), Some("a"));
        assert_eq!(registry.release(a), None);
        assert!(registry.is_empty());
    }
}
