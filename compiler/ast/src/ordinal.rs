// Copyright (C) 2021-2026 The Avail Team.
// This file is part of the Avail message splitter.

// Licensed under the BSD 3-Clause License. See the LICENSE file in the
// repository root for the full license text, or
// <https://opensource.org/licenses/BSD-3-Clause>.

use serde::{Deserialize, Serialize};

/// Sentinel meaning "no explicit ordinal was given" (§3: `explicitOrdinal`
/// is "−1 or 1..50").
pub const NO_ORDINAL: i32 = -1;

/// The tri-state a [`crate::Sequence`] is in with respect to argument
/// reordering (§3 invariant 2, §4.2 "Numbered argument consistency"):
/// either every reorderable child carries an explicit ordinal, or none do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReorderMode {
    /// No reorderable child has been seen yet.
    #[default]
    Unset,
    /// Every reorderable child seen so far carries an explicit ordinal.
    AllNumbered,
    /// No reorderable child seen so far carries an explicit ordinal.
    NoneNumbered,
}

impl ReorderMode {
    /// Folds in the next reorderable child's ordinal, returning the updated
    /// mode, or `None` if this child is inconsistent with the mode chosen by
    /// earlier children (§4.2: "Any later child that violates the chosen
    /// mode is rejected").
    pub fn admit(self, ordinal: i32) -> Option<ReorderMode> {
        let this_is_numbered = ordinal != NO_ORDINAL;
        match self {
            ReorderMode::Unset => {
                Some(if this_is_numbered { ReorderMode::AllNumbered } else { ReorderMode::NoneNumbered })
            }
            ReorderMode::AllNumbered if this_is_numbered => Some(ReorderMode::AllNumbered),
            ReorderMode::NoneNumbered if !this_is_numbered => Some(ReorderMode::NoneNumbered),
            _ => None,
        }
    }
}

/// Checks that `ordinals` (in child order) form a permutation of `1..=n`
/// that is not the identity, per §3 invariant 3 and §4.2
/// `checkForConsistentOrdinals`. Returns the zero-based permutation (i.e.
/// `permutedArguments[i] = ordinals[i] - 1`) on success.
pub fn permutation_from_ordinals(ordinals: &[i32]) -> Option<Vec<usize>> {
    let n = ordinals.len();
    if n < 2 {
        return None;
    }
    let mut seen = vec![false; n];
    let mut perm = Vec::with_capacity(n);
    for &ord in ordinals {
        if ord < 1 || ord as usize > n {
            return None;
        }
        let idx = (ord - 1) as usize;
        if seen[idx] {
            return None;
        }
        seen[idx] = true;
        perm.push(idx);
    }
    let is_identity = perm.iter().enumerate().all(|(i, &p)| i == p);
    if is_identity {
        return None;
    }
    Some(perm)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn admit_tracks_consistent_mode() {
        let mode = ReorderMode::Unset.admit(NO_ORDINAL).unwrap();
        assert_eq!(mode, ReorderMode::NoneNumbered);
        assert_eq!(mode.admit(NO_ORDINAL), Some(ReorderMode::NoneNumbered));
        assert_eq!(mode.admit(1), None);
    }

    #[test]
    fn permutation_rejects_identity() {
        assert_eq!(permutation_from_ordinals(&[1, 2]), None);
        assert_eq!(permutation_from_ordinals(&[2, 1]), Some(vec![1, 0]));
    }

    #[test]
    fn permutation_rejects_duplicates_and_out_of_range() {
        assert_eq!(permutation_from_ordinals(&[1, 1]), None);
        assert_eq!(permutation_from_ordinals(&[1, 3]), None);
    }

    #[test]
    fn scenario_g_registers_two_one() {
        // spec.md §8 scenario G requires the globally registered permutation
        // for a two-argument reordering to be `(2, 1)`: ordinals `[2, 1]` in
        // child order swap the two arguments and are accepted.
        assert_eq!(permutation_from_ordinals(&[2, 1]), Some(vec![1, 0]));
    }
}
