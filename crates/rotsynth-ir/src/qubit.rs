//! Qubit handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to one quantum register slot.
///
/// Handles are issued by the front end; pipeline stages only observe the
/// allocate and deallocate events that reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
