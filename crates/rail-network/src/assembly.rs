//! Matching a train's demanded vehicle kinds against a station pool.
//!
//! Assembly walks the demanded list once, in order.  Each demand is satisfied
//! by withdrawing any vehicle of that kind from the pool; a demand that cannot
//! be met is skipped and left in the list for the next attempt.  Vehicles that
//! were matched stay connected even when other demands fail, so a train builds
//! up across retries instead of starting over.
//!
//! Disassembly is the inverse and cannot fail: every connected vehicle goes
//! back to the pool, one at a time, in connection order.

use tracing::trace;

use crate::{Train, VehiclePool};

/// Outcome of one assembly attempt.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Assembly {
    /// Every demand is satisfied.
    Complete,
    /// `missing` demands remain; acquired vehicles stay connected.
    Partial { missing: usize },
}

impl Assembly {
    #[inline]
    pub fn is_complete(self) -> bool {
        matches!(self, Assembly::Complete)
    }
}

/// Try to satisfy every outstanding demand of `train` from `pool`.
pub fn assemble(train: &mut Train, pool: &mut VehiclePool) -> Assembly {
    let mut index = 0;
    while index < train.demanded.len() {
        let kind = train.demanded[index];
        match pool.take_kind(kind) {
            Some(vehicle) => {
                trace!(train = train.number().0, vehicle = vehicle.id.0, %kind, "assembly.matched");
                train.demanded.remove(index);
                train.connected.push(vehicle);
            }
            None => index += 1,
        }
    }

    match train.demanded.len() {
        0 => Assembly::Complete,
        missing => Assembly::Partial { missing },
    }
}

/// Return every connected vehicle of `train` to `pool`.  Returns the number of
/// vehicles moved.
pub fn disassemble(train: &mut Train, pool: &mut VehiclePool) -> usize {
    let moved = train.connected.len();
    for vehicle in train.connected.drain(..) {
        pool.put(vehicle);
    }
    moved
}
