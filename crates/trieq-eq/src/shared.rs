//! Lock-free parameter handoff between a control thread and the audio thread.
//!
//! `SharedParams` holds the seven parameter values as atomic `u32`
//! (f32 bit-cast) plus a generation counter bumped on every write. A control
//! thread (UI, automation, file watcher) writes; the audio thread polls the
//! generation once per block and snapshots the values only when it moved.
//!
//! Each field is individually atomic. A snapshot taken while a writer is
//! mid-update may mix old and new fields; the next block picks up the rest.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::params::{EqParams, PARAM_COUNT, descriptor};

struct SharedParamsData {
    values: [AtomicU32; PARAM_COUNT],
    generation: AtomicU32,
}

/// Parameter values shared across threads.
///
/// Cheap to clone: clones share the same storage.
///
/// # Example
///
/// ```rust
/// use trieq_eq::{SharedParams, params};
///
/// let shared = SharedParams::default();
/// let control = shared.clone();
/// let before = shared.generation();
///
/// control.set(params::HIGH_GAIN, -6.0);
///
/// assert_ne!(shared.generation(), before);
/// assert_eq!(shared.snapshot().high_gain, -6.0);
/// ```
#[derive(Clone)]
pub struct SharedParams {
    inner: Arc<SharedParamsData>,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(&EqParams::default())
    }
}

impl core::fmt::Debug for SharedParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedParams")
            .field("generation", &self.generation())
            .field("values", &self.snapshot())
            .finish()
    }
}

impl SharedParams {
    /// Creates shared storage initialised from `params` (clamped).
    pub fn new(params: &EqParams) -> Self {
        let values = params.clamped().to_values().map(|v| AtomicU32::new(v.to_bits()));
        Self {
            inner: Arc::new(SharedParamsData {
                values,
                generation: AtomicU32::new(0),
            }),
        }
    }

    /// Read one value (lock-free).
    pub fn get(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write one value (lock-free), clamped to its descriptor range.
    ///
    /// Returns `false` and changes nothing for an unknown index.
    pub fn set(&self, index: usize, value: f32) -> bool {
        let Some((atomic, desc)) = self.inner.values.get(index).zip(descriptor(index)) else {
            return false;
        };
        atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
        self.inner.generation.fetch_add(1, Ordering::Release);
        true
    }

    /// Write all seven values, then bump the generation once.
    pub fn set_all(&self, params: &EqParams) {
        for (atomic, value) in self.inner.values.iter().zip(params.clamped().to_values()) {
            atomic.store(value.to_bits(), Ordering::Release);
        }
        self.inner.generation.fetch_add(1, Ordering::Release);
    }

    /// Change counter. Wraps on overflow; only equality is meaningful.
    pub fn generation(&self) -> u32 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Reads all seven values.
    pub fn snapshot(&self) -> EqParams {
        let mut values = [0.0; PARAM_COUNT];
        for (value, atomic) in values.iter_mut().zip(self.inner.values.iter()) {
            *value = f32::from_bits(atomic.load(Ordering::Acquire));
        }
        EqParams::from_values(&values)
    }
}
