//! Included/excluded position sets and their combination rules.

use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

/// A partial selection along one axis, as positions.
///
/// `included` lists the selected positions in output order; `excluded` lists
/// positions that must not appear. `None` leaves that side unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    included: Option<Vec<usize>>,
    excluded: Option<Vec<usize>>,
}

impl LabelSet {
    /// A set constrained on neither side.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Select exactly `positions`, in that order. Repeated positions keep
    /// their first occurrence.
    pub fn include(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            included: Some(dedup(positions)),
            excluded: None,
        }
    }

    /// Select everything except `positions`.
    pub fn exclude(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            included: None,
            excluded: Some(dedup(positions)),
        }
    }

    /// Select the positions where `mask` is true.
    pub fn from_mask(mask: &[bool]) -> Self {
        Self::include(
            mask.iter()
                .enumerate()
                .filter_map(|(i, keep)| keep.then_some(i)),
        )
    }

    /// Included positions, if constrained.
    pub fn included(&self) -> Option<&[usize]> {
        self.included.as_deref()
    }

    /// Excluded positions, if constrained.
    pub fn excluded(&self) -> Option<&[usize]> {
        self.excluded.as_deref()
    }

    /// Intersection. Included positions keep the right-hand order; excluded
    /// positions are the union of both sides and win over inclusion.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        let mut included = combine(&self.included, &other.included, intersect);
        let excluded = combine(&self.excluded, &other.excluded, union);
        if let (Some(inc), Some(exc)) = (included.as_mut(), excluded.as_ref()) {
            inc.retain(|i| !exc.contains(i));
        }
        Self { included, excluded }
    }

    /// Union. Included positions keep the left-hand order followed by new
    /// right-hand positions; excluded positions are the intersection of both
    /// sides and lose to inclusion.
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        let included = combine(&self.included, &other.included, union);
        let mut excluded = combine(&self.excluded, &other.excluded, intersect);
        if let (Some(inc), Some(exc)) = (included.as_ref(), excluded.as_mut()) {
            exc.retain(|i| !inc.contains(i));
        }
        Self { included, excluded }
    }

    /// Swap included and excluded positions.
    #[must_use]
    pub fn not(&self) -> Self {
        Self {
            included: self.excluded.clone(),
            excluded: self.included.clone(),
        }
    }

    /// The selected positions of an axis with `len` labels, in output order.
    pub fn apply(&self, len: usize) -> Vec<usize> {
        let excluded = self.excluded.as_deref().unwrap_or_default();
        match &self.included {
            Some(included) => included
                .iter()
                .copied()
                .filter(|i| *i < len && !excluded.contains(i))
                .collect(),
            None => (0..len).filter(|i| !excluded.contains(i)).collect(),
        }
    }
}

fn dedup(positions: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut out = Vec::new();
    for pos in positions {
        if !out.contains(&pos) {
            out.push(pos);
        }
    }
    out
}

fn combine(
    left: &Option<Vec<usize>>,
    right: &Option<Vec<usize>>,
    both: fn(&[usize], &[usize]) -> Vec<usize>,
) -> Option<Vec<usize>> {
    match (left, right) {
        (None, None) => None,
        (Some(side), None) | (None, Some(side)) => Some(side.clone()),
        (Some(l), Some(r)) => Some(both(l, r)),
    }
}

/// Positions of `right` also in `left`, in `right` order.
fn intersect(left: &[usize], right: &[usize]) -> Vec<usize> {
    right.iter().copied().filter(|i| left.contains(i)).collect()
}

/// `left` followed by the positions of `right` not in `left`.
fn union(left: &[usize], right: &[usize]) -> Vec<usize> {
    left.iter()
        .copied()
        .chain(right.iter().copied().filter(|i| !left.contains(i)))
        .collect()
}

impl BitAnd for LabelSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(&rhs)
    }
}

impl BitOr for LabelSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(&rhs)
    }
}

impl Not for LabelSet {
    type Output = Self;

    fn not(self) -> Self {
        LabelSet::not(&self)
    }
}
