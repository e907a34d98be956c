use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable handle into one of the model registries.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Create an Id for the next slot of a registry holding `len` entries.
    pub fn next_for(len: usize) -> Self {
        Self::from_index(len as u32)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as a slice position.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type MaterialId = Id;
pub type ConstructionId = Id;
pub type BlindId = Id;
pub type ScreenId = Id;
pub type SurfaceId = Id;
pub type ZoneId = Id;
pub type GainId = Id;
/// Index into the shared air node table.
pub type NodeId = Id;
/// Index into the schedule table.
pub type ScheduleId = Id;
/// Index into the zone equipment configuration table.
pub type ControlledZoneId = Id;
/// Opaque handle handed back to callers of an equipment adapter.
pub type CompIndex = Id;
