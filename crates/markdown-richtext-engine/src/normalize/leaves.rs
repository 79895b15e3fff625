//! Leaf run normalization.
//!
//! A run is a sequence of leaves bounded on each side either by the edge of
//! the block or by an inline element. Normalizing a run:
//!
//! 1. drops empty leaves,
//! 2. collapses a whitespace-only run to nothing unless an inline element
//!    bounds it,
//! 3. coalesces neighbours with identical marks,
//! 4. extracts each whitespace run that crosses a leaf boundary into a leaf of
//!    its own (exact length kept, marks = intersection of every leaf touched),
//! 5. coalesces again.
//!
//! A whitespace-only leaf whose marks differ from one of its neighbours is
//! *pinned*: it marks a formatting boundary and never coalesces. That is what
//! keeps `["alpha", "   ", "bravo"(italic)]` stable across repeated passes.
//!
//! `Code` leaves are raw content. Their whitespace is part of the code, so
//! they never give up or absorb a crossing run and never count as loose
//! whitespace.

use std::iter::Peekable;

use crate::models::{Leaf, Mark, leaf::intersect};

/// Which sides of a run touch an inline element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunBounds {
    pub element_before: bool,
    pub element_after: bool,
}

impl RunBounds {
    fn any(self) -> bool {
        self.element_before || self.element_after
    }
}

/// Normalizes a free-standing leaf run (block edges on both sides).
///
/// Never returns an empty vector: a run that normalizes away becomes the
/// canonical empty leaf.
pub fn normalize_leaves(leaves: Vec<Leaf>) -> Vec<Leaf> {
    let out = normalize_run(leaves, RunBounds::default());
    if out.is_empty() {
        vec![Leaf::empty()]
    } else {
        out
    }
}

/// Normalizes one run. May return an empty vector; the caller decides
/// whether an empty run needs a placeholder leaf.
pub fn normalize_run(leaves: Vec<Leaf>, bounds: RunBounds) -> Vec<Leaf> {
    let leaves: Vec<Leaf> = leaves.into_iter().filter(|l| !l.text.is_empty()).collect();
    if leaves.is_empty() {
        return leaves;
    }

    let all_whitespace = leaves.iter().all(is_loose_whitespace);
    if all_whitespace && !bounds.any() {
        log::trace!("collapsing whitespace-only run of {} leaves", leaves.len());
        return Vec::new();
    }

    let leaves = coalesce(leaves);
    let leaves = extract_crossing_whitespace(leaves);
    coalesce(leaves)
}

/// Merges neighbours with identical marks unless either one is pinned.
fn coalesce(leaves: Vec<Leaf>) -> Vec<Leaf> {
    let pinned: Vec<bool> = (0..leaves.len()).map(|i| is_pinned(&leaves, i)).collect();

    let mut out: Vec<Leaf> = Vec::with_capacity(leaves.len());
    let mut last_pinned = false;
    for (leaf, pin) in leaves.into_iter().zip(pinned) {
        if let Some(prev) = out.last_mut()
            && !last_pinned
            && !pin
            && prev.marks == leaf.marks
        {
            prev.text.push_str(&leaf.text);
            continue;
        }
        out.push(leaf);
        last_pinned = pin;
    }
    out
}

/// Whitespace-only text outside a code span.
pub(crate) fn is_loose_whitespace(leaf: &Leaf) -> bool {
    !leaf.has(Mark::Code) && leaf.is_whitespace_only()
}

fn opens_with_loose_whitespace(leaf: &Leaf) -> bool {
    !leaf.has(Mark::Code) && leaf.starts_with_whitespace()
}

/// A whitespace-only leaf whose marks differ from a neighbour's.
pub(crate) fn is_pinned(leaves: &[Leaf], i: usize) -> bool {
    let leaf = &leaves[i];
    if !is_loose_whitespace(leaf) {
        return false;
    }
    let differs = |j: usize| leaves.get(j).is_some_and(|n| n.marks != leaf.marks);
    (i > 0 && differs(i - 1)) || differs(i + 1)
}

/// Pulls every whitespace run that spans a leaf boundary out into its own leaf.
fn extract_crossing_whitespace(leaves: Vec<Leaf>) -> Vec<Leaf> {
    let mut out = Vec::with_capacity(leaves.len());
    let mut iter = leaves.into_iter().peekable();
    let mut current = iter.next();

    while let Some(leaf) = current.take() {
        let crosses = !leaf.has(Mark::Code)
            && leaf.ends_with_whitespace()
            && iter.peek().is_some_and(opens_with_loose_whitespace);
        if !crosses {
            out.push(leaf);
            current = iter.next();
            continue;
        }

        let (head, tail) = leaf.split_trailing_whitespace();
        let mut run = Leaf::with_marks(tail, head.marks.clone());
        if !head.text.is_empty() {
            out.push(head);
        }
        current = absorb_run(&mut run, &mut iter);
        out.push(run);
        if current.is_none() {
            current = iter.next();
        }
    }
    out
}

/// Extends `run` through the leading whitespace of the following leaves.
///
/// Returns the remainder of the leaf where the run stopped, if that leaf has
/// non-whitespace text left.
fn absorb_run<I>(run: &mut Leaf, iter: &mut Peekable<I>) -> Option<Leaf>
where
    I: Iterator<Item = Leaf>,
{
    while let Some(next) = iter.next() {
        let (lead, rest) = next.split_leading_whitespace();
        run.text.push_str(&lead);
        run.marks = intersect(&run.marks, &rest.marks);
        if !rest.text.is_empty() {
            return Some(rest);
        }
        if !iter.peek().is_some_and(opens_with_loose_whitespace) {
            return None;
        }
    }
    None
}
