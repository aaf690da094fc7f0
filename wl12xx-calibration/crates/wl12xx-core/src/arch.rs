//! Chip architecture (generation) identifiers.

use std::fmt;

use crate::layout::{WL1271_NVS_FILE_SIZE, WL128X_NVS_FILE_SIZE};

/// Supported chip generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// wl1271 / wl127x family.
    Wl1271,
    /// wl128x family (TCXO clocking, FEM vendor options).
    Wl128x,
}

impl Arch {
    /// Map a complete NVS blob size to the architecture that produces it.
    pub fn from_nvs_size(size: usize) -> Option<Self> {
        match size {
            WL1271_NVS_FILE_SIZE => Some(Self::Wl1271),
            WL128X_NVS_FILE_SIZE => Some(Self::Wl128x),
            _ => None,
        }
    }

    /// Size in bytes of a complete NVS blob for this architecture.
    pub fn nvs_size(self) -> usize {
        match self {
            Self::Wl1271 => WL1271_NVS_FILE_SIZE,
            Self::Wl128x => WL128X_NVS_FILE_SIZE,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wl1271 => write!(f, "127x"),
            Self::Wl128x => write!(f, "128x"),
        }
    }
}
