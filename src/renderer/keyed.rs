//! Keyed children reconciliation.
//!
//! # Algorithm
//!
//! 1. Sync the common prefix (same logical node at the same index)
//! 2. Sync the common suffix, scanning from both ends inward
//! 3. Only a middle window is left on each side:
//!    - old window empty: mount the new window before the first suffix node
//!    - new window empty: unmount the old window
//!    - otherwise: match old children to new ones by key (keyless children
//!      by position among keyless siblings of the same type), unmount the
//!      unmatched, then walk the new window backwards mounting new children
//!      and moving matched children that are not part of the longest
//!      increasing run of old positions
//!
//! ```text
//! old: a b [c d e] f g
//! new: a b [e c d h] f g
//!           ^ window after prefix/suffix sync
//! c, d keep their relative order (increasing run) → no move
//! e moves before c, h is mounted before f
//! ```
//!
//! Walking backwards guarantees that the anchor (the next new sibling) is
//! already in its final place when it is used.

use std::collections::HashMap;

use super::Renderer;
use crate::host::HostAdapter;
use crate::types::Key;
use crate::vnode::{is_same_vnode, VNode};

impl<H: HostAdapter> Renderer<H> {
    pub(super) fn patch_keyed_children(
        &mut self,
        c1: &[VNode],
        c2: &[VNode],
        parent: &H::Node,
    ) -> Result<(), H::Error> {
        let mut start = 0;
        // Exclusive ends of the unsynced windows.
        let mut e1 = c1.len();
        let mut e2 = c2.len();

        // 1. Common prefix
        while start < e1 && start < e2 && is_same_vnode(&c1[start], &c2[start]) {
            self.patch(Some(&c1[start]), &c2[start], parent)?;
            start += 1;
        }

        // 2. Common suffix
        while start < e1 && start < e2 && is_same_vnode(&c1[e1 - 1], &c2[e2 - 1]) {
            self.patch(Some(&c1[e1 - 1]), &c2[e2 - 1], parent)?;
            e1 -= 1;
            e2 -= 1;
        }

        // 3a. Pure insertion
        if start >= e1 {
            if start < e2 {
                let anchor = c2.get(e2).and_then(|next| self.node_of(next));
                for child in &c2[start..e2] {
                    self.mount(child, parent, anchor.as_ref())?;
                }
            }
            return Ok(());
        }

        // 3b. Pure removal
        if start >= e2 {
            for child in &c1[start..e1] {
                self.unmount(child)?;
            }
            return Ok(());
        }

        // 3c. Unknown sequence
        self.patch_unknown_sequence(&c1[..e1], &c2[..e2], start, c2, parent)
    }

    /// Reconcile `old[start..]` against `new[start..]`.
    ///
    /// `full_new` is the complete new child list, used to find anchors past
    /// the window.
    fn patch_unknown_sequence(
        &mut self,
        old: &[VNode],
        new: &[VNode],
        start: usize,
        full_new: &[VNode],
        parent: &H::Node,
    ) -> Result<(), H::Error> {
        let to_be_patched = new.len() - start;

        // Key -> index in `new`. First occurrence wins.
        let mut key_to_new_index: HashMap<&Key, usize> = HashMap::with_capacity(to_be_patched);
        for (index, child) in new.iter().enumerate().skip(start) {
            let Some(key) = child.key() else { continue };
            if key_to_new_index.contains_key(key) {
                log::warn!("duplicate key `{key}` among siblings; only the first occurrence is matched");
                continue;
            }
            key_to_new_index.insert(key, index);
        }

        // Window offset -> old index + 1 (0 = no match yet).
        let mut new_index_to_old_index = vec![0usize; to_be_patched];
        let mut patched = 0;
        let mut moved = false;
        let mut max_new_index_so_far = 0;

        for (old_index, prev) in old.iter().enumerate().skip(start) {
            if patched >= to_be_patched {
                // Every new child is matched; the rest can only go.
                self.unmount(prev)?;
                continue;
            }

            let candidate = match prev.key() {
                Some(key) => key_to_new_index.get(key).copied(),
                None => (start..new.len()).find(|&index| {
                    new_index_to_old_index[index - start] == 0
                        && new[index].key().is_none()
                        && is_same_vnode(prev, &new[index])
                }),
            };
            let matched = candidate.filter(|&index| {
                new_index_to_old_index[index - start] == 0 && is_same_vnode(prev, &new[index])
            });

            let Some(new_index) = matched else {
                self.unmount(prev)?;
                continue;
            };

            new_index_to_old_index[new_index - start] = old_index + 1;
            if new_index >= max_new_index_so_far {
                max_new_index_so_far = new_index;
            } else {
                moved = true;
            }
            self.patch(Some(prev), &new[new_index], parent)?;
            patched += 1;
        }

        // Children on the longest increasing run stay where they are.
        let stable = if moved {
            longest_increasing_subsequence(&new_index_to_old_index)
        } else {
            Vec::new()
        };
        let mut stable = stable.iter().rev().peekable();

        for offset in (0..to_be_patched).rev() {
            let index = start + offset;
            let child = &new[index];
            let anchor = full_new.get(index + 1).and_then(|next| self.node_of(next));

            if new_index_to_old_index[offset] == 0 {
                self.mount(child, parent, anchor.as_ref())?;
            } else if moved && stable.next_if_eq(&&offset).is_none() {
                self.move_node(child, parent, anchor.as_ref())?;
            }
        }

        Ok(())
    }

    /// Re-insert an already mounted child before `anchor`.
    fn move_node(
        &mut self,
        vnode: &VNode,
        parent: &H::Node,
        anchor: Option<&H::Node>,
    ) -> Result<(), H::Error> {
        let Some(node) = self.node_of(vnode) else {
            return Ok(());
        };
        log::trace!("move key={:?} before {anchor:?}", vnode.key());
        self.host.insert(&node, parent, anchor)
    }
}

// =============================================================================
// Longest Increasing Subsequence
// =============================================================================

/// Indices of a longest strictly increasing subsequence of `seq`.
///
/// Zero entries mean "no value" and are skipped. O(n log n).
pub(crate) fn longest_increasing_subsequence(seq: &[usize]) -> Vec<usize> {
    let mut predecessors = vec![0usize; seq.len()];
    // tails[k] = index of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();

    for (index, &value) in seq.iter().enumerate() {
        if value == 0 {
            continue;
        }
        let position = tails.partition_point(|&tail| seq[tail] < value);
        if position > 0 {
            predecessors[index] = tails[position - 1];
        }
        if position == tails.len() {
            tails.push(index);
        } else {
            tails[position] = index;
        }
    }

    let mut result = tails.clone();
    if let Some(&last) = tails.last() {
        let mut current = last;
        for slot in result.iter_mut().rev() {
            *slot = current;
            current = predecessors[current];
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::longest_increasing_subsequence;

    #[test]
    fn test_lis_basic() {
        assert_eq!(longest_increasing_subsequence(&[4, 1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(longest_increasing_subsequence(&[1, 2, 3]), vec![0, 1, 2]);
        assert_eq!(longest_increasing_subsequence(&[3, 2, 1]).len(), 1);
    }

    #[test]
    fn test_lis_skips_unmatched() {
        assert_eq!(longest_increasing_subsequence(&[0, 2, 0, 3]), vec![1, 3]);
        assert!(longest_increasing_subsequence(&[0, 0]).is_empty());
        assert!(longest_increasing_subsequence(&[]).is_empty());
    }

    #[test]
    fn test_lis_reconstructs_a_valid_run() {
        let seq = [5, 3, 4, 8, 6, 7, 1, 2];
        let run = longest_increasing_subsequence(&seq);

        assert_eq!(run.len(), 4);
        assert!(run.windows(2).all(|w| w[0] < w[1] && seq[w[0]] < seq[w[1]]));
    }
}
