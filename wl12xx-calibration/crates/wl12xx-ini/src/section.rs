//! Section detection and the per-session section cursor.

use std::fmt;

use wl12xx_core::Arch;

use crate::error::IniError;
use crate::tables::*;

/// Frequency band of a FEM section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Band2,
    Band5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    General,
    FemVendor,
    Band2,
    Band5,
    Fem0Band2,
    Fem1Band2,
    Fem0Band5,
    Fem1Band5,
}

/// First key of each section.
const SECTION_MARKERS: &[(&str, Section)] = &[
    ("TXBiPFEMAutoDetect", Section::General),
    ("RxTraceInsertionLoss_2_4G", Section::Band2),
    ("FemVendorAndOptions", Section::FemVendor),
    ("RxTraceInsertionLoss_5G", Section::Band5),
    ("FEM0_TXBiPReferencePDvoltage_2_4G", Section::Fem0Band2),
    ("FEM0_TxBiPReferencePDvoltage_2_4G", Section::Fem0Band2),
    ("FEM1_TXBiPReferencePDvoltage_2_4G", Section::Fem1Band2),
    ("FEM1_TxBiPReferencePDvoltage_2_4G", Section::Fem1Band2),
    ("FEM0_TXBiPReferencePDvoltage_5G", Section::Fem0Band5),
    ("FEM0_TxBiPReferencePDvoltage_5G", Section::Fem0Band5),
    ("FEM1_TXBiPReferencePDvoltage_5G", Section::Fem1Band5),
    ("FEM1_TxBiPReferencePDvoltage_5G", Section::Fem1Band5),
];

impl Section {
    /// The section a marker key opens, if any.
    pub fn from_marker(key: &str) -> Option<Self> {
        SECTION_MARKERS
            .iter()
            .find(|(marker, _)| *marker == key)
            .map(|&(_, section)| section)
    }

    /// FEM slot and band for FEM sections.
    pub fn fem(self) -> Option<(usize, Band)> {
        match self {
            Self::Fem0Band2 => Some((0, Band::Band2)),
            Self::Fem1Band2 => Some((1, Band::Band2)),
            Self::Fem0Band5 => Some((0, Band::Band5)),
            Self::Fem1Band5 => Some((1, Band::Band5)),
            _ => None,
        }
    }

    /// Number of lines the section holds on `arch`, `None` where it does not exist.
    pub fn line_count(self, arch: Arch) -> Option<usize> {
        let count = match (arch, self) {
            (Arch::Wl1271, Self::General) => WL1271_GENERAL.len(),
            (Arch::Wl128x, Self::General) => WL128X_GENERAL.len(),
            (Arch::Wl1271, Self::FemVendor) => return None,
            (Arch::Wl128x, Self::FemVendor) => WL128X_FEM_VENDOR.len(),
            (Arch::Wl1271, Self::Band2) => WL1271_BAND2.len(),
            (Arch::Wl128x, Self::Band2) => WL128X_BAND2.len(),
            (Arch::Wl1271, Self::Band5) => WL1271_BAND5.len(),
            (Arch::Wl128x, Self::Band5) => WL128X_BAND5.len(),
            (Arch::Wl1271, s) => match s.fem() {
                Some((_, Band::Band2)) => WL1271_FEM2.len(),
                _ => WL1271_FEM5.len(),
            },
            (Arch::Wl128x, s) => match s.fem() {
                Some((_, Band::Band2)) => WL128X_FEM2.len(),
                _ => WL128X_FEM5.len(),
            },
        };
        Some(count)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::FemVendor => write!(f, "FEM vendor"),
            Self::Band2 => write!(f, "band 2.4GHz"),
            Self::Band5 => write!(f, "band 5GHz"),
            Self::Fem0Band2 => write!(f, "FEM0 band 2.4GHz"),
            Self::Fem1Band2 => write!(f, "FEM1 band 2.4GHz"),
            Self::Fem0Band5 => write!(f, "FEM0 band 5GHz"),
            Self::Fem1Band5 => write!(f, "FEM1 band 5GHz"),
        }
    }
}

/// Which section the parser is in and how many of its lines are still due.
///
/// Owned by the caller for the length of one parse session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionCursor {
    section: Option<Section>,
    remaining: usize,
}

impl SectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True when the next line must open a new section.
    pub fn needs_section(&self) -> bool {
        self.remaining == 0
    }

    /// Open the section started by `key`.
    pub fn enter(&mut self, key: &str, arch: Arch) -> Result<Section, IniError> {
        let section =
            Section::from_marker(key).ok_or_else(|| IniError::UnknownSection(key.to_string()))?;
        let count = section
            .line_count(arch)
            .ok_or_else(|| IniError::UnsupportedSection {
                section: section.to_string(),
                arch,
            })?;
        log::debug!("entering {section} section ({count} lines)");
        self.section = Some(section);
        self.remaining = count;
        Ok(section)
    }

    /// Record one successfully dispatched line.
    pub fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IniErrorKind;

    #[test]
    fn test_markers_accept_both_spellings() {
        assert_eq!(
            Section::from_marker("FEM0_TXBiPReferencePDvoltage_2_4G"),
            Some(Section::Fem0Band2)
        );
        assert_eq!(
            Section::from_marker("FEM0_TxBiPReferencePDvoltage_2_4G"),
            Some(Section::Fem0Band2)
        );
        assert_eq!(
            Section::from_marker("FEM1_TxBiPReferencePDvoltage_5G"),
            Some(Section::Fem1Band5)
        );
        assert_eq!(Section::from_marker("RefClk"), None);
    }

    #[test]
    fn test_line_counts() {
        use Arch::*;
        assert_eq!(Section::General.line_count(Wl1271), Some(12));
        assert_eq!(Section::General.line_count(Wl128x), Some(17));
        assert_eq!(Section::FemVendor.line_count(Wl1271), None);
        assert_eq!(Section::FemVendor.line_count(Wl128x), Some(1));
        assert_eq!(Section::Fem1Band2.line_count(Wl1271), Some(13));
        assert_eq!(Section::Fem0Band2.line_count(Wl128x), Some(15));
        assert_eq!(Section::Fem0Band5.line_count(Wl1271), Some(12));
        assert_eq!(Section::Fem1Band5.line_count(Wl128x), Some(14));
    }

    #[test]
    fn test_cursor_enter_and_consume() {
        let mut cursor = SectionCursor::new();
        assert!(cursor.needs_section());
        cursor.enter("RxTraceInsertionLoss_2_4G", Arch::Wl128x).unwrap();
        assert_eq!(cursor.section(), Some(Section::Band2));
        assert_eq!(cursor.remaining(), 2);
        cursor.consume();
        cursor.consume();
        assert!(cursor.needs_section());
        cursor.consume();
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_cursor_rejects_unknown_and_unsupported() {
        let mut cursor = SectionCursor::new();
        let err = cursor.enter("RefClk", Arch::Wl1271).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::UnknownSection);
        let err = cursor.enter("FemVendorAndOptions", Arch::Wl1271).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::UnsupportedSection);
        assert_eq!(cursor.section(), None);
    }
}
