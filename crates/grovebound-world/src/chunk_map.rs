use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use grovebound_core::types::ChunkCoord;

use crate::chunk::ChunkFeatures;

type Slot = Arc<OnceLock<Arc<ChunkFeatures>>>;

/// Append-only cache of generated chunks.
///
/// Each coordinate owns a once-cell slot: concurrent callers asking for the
/// same chunk block on that slot while exactly one of them generates it.
/// Entries are never evicted or regenerated.
#[derive(Default)]
pub struct ChunkMap {
    slots: RwLock<HashMap<ChunkCoord, Slot>>,
    /// Number of times a generator closure actually ran.
    generated: AtomicU64,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached chunk, running `generate` only on the first request.
    pub fn get_or_generate<F>(&self, coord: ChunkCoord, generate: F) -> Arc<ChunkFeatures>
    where
        F: FnOnce(ChunkCoord) -> ChunkFeatures,
    {
        let slot = self.slot(coord);
        slot.get_or_init(|| {
            let features = generate(coord);
            self.generated.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "generated chunk ({}, {}): {} trees, {} pond tiles, {} bushes",
                coord.x,
                coord.y,
                features.trees.len(),
                features.ponds.len(),
                features.bushes.len()
            );
            Arc::new(features)
        })
        .clone()
    }

    /// Cached chunk, if it has finished generating.
    pub fn get(&self, coord: &ChunkCoord) -> Option<Arc<ChunkFeatures>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(coord).and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Number of chunks generated so far.
    pub fn generation_count(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    /// Number of chunks resident in the cache.
    pub fn loaded_count(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Coordinates of every resident chunk, sorted row-major.
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut coords: Vec<ChunkCoord> = slots
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(coord, _)| *coord)
            .collect();
        coords.sort_by_key(|c| (c.y, c.x));
        coords
    }

    /// Find or insert the slot for `coord`. The map lock is released before
    /// generation, so slow chunks never block lookups of other coordinates.
    fn slot(&self, coord: ChunkCoord) -> Slot {
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get(&coord) {
                return slot.clone();
            }
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(coord).or_default().clone()
    }
}
