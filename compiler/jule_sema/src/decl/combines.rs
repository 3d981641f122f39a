//! Per-declaration record of generic combinations.

use rustc_hash::FxHashMap;

use jule_types::{Combination, TypeKind};

/// Ordered, append-only, deduplicated list of combinations.
///
/// Positions are stable: the n-th recorded combination keeps index n for the
/// rest of the compilation.
#[derive(Clone, Debug, Default)]
pub struct Combines {
    list: Vec<Combination>,
    positions: FxHashMap<Combination, usize>,
}

impl Combines {
    /// No combinations: a generic declaration that was never invoked.
    pub fn new() -> Self {
        Self::default()
    }

    /// The single empty combination of a non-generic declaration.
    pub fn synthetic() -> Self {
        let mut combines = Self::new();
        combines.record(Vec::new());
        combines
    }

    /// Record a combination, returning its position and whether it was new.
    pub fn record(&mut self, combination: Combination) -> (usize, bool) {
        if let Some(&index) = self.positions.get(&combination) {
            return (index, false);
        }
        let index = self.list.len();
        self.positions.insert(combination.clone(), index);
        self.list.push(combination);
        (index, true)
    }

    /// Like [`Combines::record`], but refuses a new combination once `limit`
    /// are recorded (0 = unlimited). The error carries the limit.
    pub fn try_record(
        &mut self,
        combination: Combination,
        limit: usize,
    ) -> Result<(usize, bool), usize> {
        if let Some(&index) = self.positions.get(&combination) {
            return Ok((index, false));
        }
        if limit > 0 && self.list.len() >= limit {
            return Err(limit);
        }
        Ok(self.record(combination))
    }

    pub fn position(&self, combination: &[TypeKind]) -> Option<usize> {
        self.positions.get(combination).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Combination> {
        self.list.get(index)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.list.iter()
    }
}

#[cfg(test)]
mod tests;
