//! # Segmentation Lattice
//!
//! A per-call arena of best-path entries, indexed by normalized byte offset.
//! Edges are relaxed in a single forward pass; the best path is recovered
//! by walking predecessor offsets back from the end.

use crate::{
    alloc::vec::Vec,
    errors::{PMError, PMResult},
    segmenters::{Segment, push_segment},
    types::TokenType,
};

const UNREACHED: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct LatticeEntry<T> {
    score: f32,
    start: usize,
    piece: Option<T>,
}

impl<T> LatticeEntry<T> {
    const fn unreached() -> Self {
        Self {
            score: f32::NEG_INFINITY,
            start: UNREACHED,
            piece: None,
        }
    }
}

/// Best-score / best-predecessor arena over ``0..=len`` byte offsets.
///
/// Offset 0 is reachable with score 0. An edge ``start -> end`` with
/// `score` improves ``end`` when it beats the recorded total; on an
/// exact tie the longer edge wins.
///
/// ## Style Hints
/// Instance names should prefer `lattice`.
#[derive(Debug, Clone)]
pub struct SegmentationLattice<T: TokenType> {
    entries: Vec<LatticeEntry<T>>,
}

impl<T: TokenType> SegmentationLattice<T> {
    /// Create a lattice over text of `len` bytes.
    pub fn new(len: usize) -> Self {
        let mut entries = Vec::with_capacity(len + 1);
        entries.push(LatticeEntry {
            score: 0.0,
            start: 0,
            piece: None,
        });
        entries.resize(len + 1, LatticeEntry::unreached());
        Self { entries }
    }

    /// The text length, in bytes.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    /// Is the text empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is some path known to reach `position`?
    #[inline(always)]
    pub fn is_reachable(
        &self,
        position: usize,
    ) -> bool {
        self.entries
            .get(position)
            .is_some_and(|e| e.start != UNREACHED)
    }

    /// The best total score reaching `position`, if reachable.
    pub fn score_at(
        &self,
        position: usize,
    ) -> Option<f32> {
        if self.is_reachable(position) {
            Some(self.entries[position].score)
        } else {
            None
        }
    }

    /// Relax the edge ``start -> end``.
    ///
    /// ## Arguments
    /// * `start` - The edge start; ignored unless reachable.
    /// * `end` - The edge end, ``start < end <= len``.
    /// * `score` - The edge weight.
    /// * `piece` - The edge piece; `None` for an unknown edge.
    ///
    /// ## Returns
    /// `true` if the edge became the best edge into `end`.
    #[inline]
    pub fn relax(
        &mut self,
        start: usize,
        end: usize,
        score: f32,
        piece: Option<T>,
    ) -> bool {
        if start >= end || end >= self.entries.len() || !self.is_reachable(start) {
            return false;
        }
        let candidate = self.entries[start].score + score;

        let target = &mut self.entries[end];
        let improves = target.start == UNREACHED
            || candidate > target.score
            || (candidate == target.score && start < target.start);
        if improves {
            *target = LatticeEntry {
                score: candidate,
                start,
                piece,
            };
        }
        improves
    }

    /// Recover the best path to the end of the text.
    ///
    /// ## Returns
    /// The path segments, in text order, with adjacent unknown edges
    /// merged; or [`PMError::Unreachable`] when no path reaches the end.
    pub fn best_path(&self) -> PMResult<Vec<Segment<T>>> {
        let mut reversed = Vec::new();
        let mut end = self.len();
        while end > 0 {
            let entry = &self.entries[end];
            if entry.start == UNREACHED || entry.start >= end {
                return Err(PMError::Unreachable { position: end });
            }
            reversed.push(Segment::new(entry.start..end, entry.piece));
            end = entry.start;
        }

        let mut path = Vec::with_capacity(reversed.len());
        for segment in reversed.into_iter().rev() {
            push_segment(&mut path, segment);
        }
        Ok(path)
    }
}
