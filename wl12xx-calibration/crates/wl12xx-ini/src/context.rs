//! Parse session state shared by the detector, the section cursor and the
//! field tables.

use wl12xx_core::{Arch, IniRecord};

use crate::decode::split_line;
use crate::error::IniError;
use crate::section::{Section, SectionCursor};
use crate::tables::*;

const AUTO_FEM_KEY: &str = "TXBiPFEMAutoDetect";

/// Caller-owned state for reading one calibration file.
///
/// The bound architecture is the variant of the held record; it is set once
/// and never changes for the lifetime of the context.
#[derive(Debug, Clone, Default)]
pub struct CommonContext {
    record: Option<IniRecord>,
    /// FEM0 band sections seen in the current session.
    pub fem0_bands: u32,
    /// FEM1 band sections seen in the current session.
    pub fem1_bands: u32,
    /// Mirror of `TXBiPFEMAutoDetect` from the general section.
    pub auto_fem: bool,
}

impl CommonContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context already bound to `arch`.
    pub fn with_arch(arch: Arch) -> Self {
        Self {
            record: Some(IniRecord::new(arch)),
            ..Self::default()
        }
    }

    pub fn arch(&self) -> Option<Arch> {
        self.record.as_ref().map(IniRecord::arch)
    }

    pub fn record(&self) -> Option<&IniRecord> {
        self.record.as_ref()
    }

    pub fn into_record(self) -> Option<IniRecord> {
        self.record
    }

    /// Bind the session to `arch`, allocating a zeroed record on first use.
    pub fn bind_arch(&mut self, arch: Arch) -> Result<(), IniError> {
        match &self.record {
            Some(record) if record.arch() != arch => Err(IniError::ArchitectureConflict {
                bound: record.arch(),
                found: arch,
            }),
            Some(_) => Ok(()),
            None => {
                self.record = Some(IniRecord::new(arch));
                Ok(())
            }
        }
    }

    /// Clear the per-session counters; the bound architecture is kept.
    pub fn reset_session(&mut self) {
        self.fem0_bands = 0;
        self.fem1_bands = 0;
        self.auto_fem = false;
    }

    /// Dispatch one cleaned line, opening a new section when the cursor's
    /// current one is exhausted.
    pub fn parse_line(&mut self, cursor: &mut SectionCursor, line: &str) -> Result<(), IniError> {
        let (key, value) = split_line(line)?;
        let arch = self.arch().ok_or(IniError::ArchitectureUnresolved)?;

        let section = match cursor.section() {
            Some(section) if !cursor.needs_section() => section,
            _ => {
                let section = cursor.enter(key, arch)?;
                match section.fem() {
                    Some((0, _)) => self.fem0_bands += 1,
                    Some(_) => self.fem1_bands += 1,
                    None => {}
                }
                section
            }
        };

        self.dispatch(section, key, value)?;
        cursor.consume();
        Ok(())
    }

    fn dispatch(&mut self, section: Section, key: &str, value: &str) -> Result<(), IniError> {
        let record = self
            .record
            .as_mut()
            .ok_or(IniError::ArchitectureUnresolved)?;
        let slot = section.fem().map_or(0, |(slot, _)| slot);

        let result = match record {
            IniRecord::Wl1271(ini) => match section {
                Section::General => decode_field(WL1271_GENERAL, key, value, &mut ini.general_params),
                Section::FemVendor => Err(IniError::UnsupportedSection {
                    section: section.to_string(),
                    arch: Arch::Wl1271,
                }),
                Section::Band2 => {
                    decode_field(WL1271_BAND2, key, value, &mut ini.stat_radio_params_2)
                }
                Section::Band5 => {
                    decode_field(WL1271_BAND5, key, value, &mut ini.stat_radio_params_5)
                }
                Section::Fem0Band2 | Section::Fem1Band2 => strip_fem_prefix(key, slot).and_then(
                    |field| decode_field(WL1271_FEM2, field, value, &mut ini.dyn_radio_params_2[slot]),
                ),
                Section::Fem0Band5 | Section::Fem1Band5 => strip_fem_prefix(key, slot).and_then(
                    |field| decode_field(WL1271_FEM5, field, value, &mut ini.dyn_radio_params_5[slot]),
                ),
            },
            IniRecord::Wl128x(ini) => match section {
                Section::General => decode_field(WL128X_GENERAL, key, value, &mut ini.general_params),
                Section::FemVendor => decode_field(WL128X_FEM_VENDOR, key, value, &mut **ini),
                Section::Band2 => {
                    decode_field(WL128X_BAND2, key, value, &mut ini.stat_radio_params_2)
                }
                Section::Band5 => {
                    decode_field(WL128X_BAND5, key, value, &mut ini.stat_radio_params_5)
                }
                Section::Fem0Band2 | Section::Fem1Band2 => strip_fem_prefix(key, slot).and_then(
                    |field| decode_field(WL128X_FEM2, field, value, &mut ini.dyn_radio_params_2[slot]),
                ),
                Section::Fem0Band5 | Section::Fem1Band5 => strip_fem_prefix(key, slot).and_then(
                    |field| decode_field(WL128X_FEM5, field, value, &mut ini.dyn_radio_params_5[slot]),
                ),
            },
        };

        // Report the key as written in the file, prefix included.
        result.map_err(|err| match err {
            IniError::UnknownField(_) => IniError::UnknownField(key.to_string()),
            err => err,
        })?;

        if section == Section::General && key == AUTO_FEM_KEY {
            self.auto_fem = record.auto_fem_detect() != 0;
        }
        Ok(())
    }
}

fn strip_fem_prefix(key: &str, slot: usize) -> Result<&str, IniError> {
    let prefix = if slot == 0 { "FEM0_" } else { "FEM1_" };
    key.strip_prefix(prefix)
        .ok_or_else(|| IniError::UnknownField(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IniErrorKind;

    fn feed(ctx: &mut CommonContext, cursor: &mut SectionCursor, lines: &[&str]) {
        for line in lines {
            ctx.parse_line(cursor, line).unwrap();
        }
    }

    #[test]
    fn test_bind_arch_idempotent() {
        let mut ctx = CommonContext::new();
        assert_eq!(ctx.arch(), None);
        ctx.bind_arch(Arch::Wl128x).unwrap();
        ctx.bind_arch(Arch::Wl128x).unwrap();
        assert_eq!(ctx.arch(), Some(Arch::Wl128x));

        let err = ctx.bind_arch(Arch::Wl1271).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::ArchitectureConflict);
        assert_eq!(ctx.arch(), Some(Arch::Wl128x));
    }

    #[test]
    fn test_rebind_keeps_record() {
        let mut ctx = CommonContext::with_arch(Arch::Wl1271);
        let mut cursor = SectionCursor::new();
        feed(&mut ctx, &mut cursor, &["TXBiPFEMAutoDetect = 01"]);
        ctx.bind_arch(Arch::Wl1271).unwrap();
        assert_eq!(ctx.record().unwrap().auto_fem_detect(), 1);
    }

    #[test]
    fn test_dispatch_requires_arch() {
        let mut ctx = CommonContext::new();
        let mut cursor = SectionCursor::new();
        let err = ctx.parse_line(&mut cursor, "RefClk = 01").unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::ArchitectureUnresolved);
    }

    #[test]
    fn test_auto_fem_mirrored() {
        let mut ctx = CommonContext::with_arch(Arch::Wl128x);
        let mut cursor = SectionCursor::new();
        feed(&mut ctx, &mut cursor, &["TXBiPFEMAutoDetect = 01"]);
        assert!(ctx.auto_fem);
        assert_eq!(cursor.section(), Some(Section::General));
        assert_eq!(cursor.remaining(), 16);
    }

    #[test]
    fn test_fem_section_counted_once() {
        let mut ctx = CommonContext::with_arch(Arch::Wl1271);
        let mut cursor = SectionCursor::new();
        feed(
            &mut ctx,
            &mut cursor,
            &[
                "FEM0_TXBiPReferencePDvoltage_2_4G = 0200",
                "FEM0_TxBiPReferencePower_2_4G = 80",
                "FEM0_TxBiPOffsetdB_2_4G = 00",
            ],
        );
        assert_eq!(ctx.fem0_bands, 1);
        assert_eq!(ctx.fem1_bands, 0);
        assert_eq!(cursor.remaining(), 10);
        if let Some(IniRecord::Wl1271(ini)) = ctx.record() {
            assert_eq!(ini.dyn_radio_params_2[0].tx_bip_ref_pd_voltage, 0x0200);
            assert_eq!(ini.dyn_radio_params_2[0].tx_bip_ref_power, 0x80);
        } else {
            panic!("expected wl1271 record");
        }
    }

    #[test]
    fn test_fem_key_for_other_slot_rejected() {
        let mut ctx = CommonContext::with_arch(Arch::Wl128x);
        let mut cursor = SectionCursor::new();
        feed(&mut ctx, &mut cursor, &["FEM1_TxBiPReferencePDvoltage_5G = 1 2 3 4 5 6 7"]);
        assert_eq!(ctx.fem1_bands, 1);
        let err = ctx
            .parse_line(&mut cursor, "FEM0_TxBiPReferencePower_5G = 1 2 3 4 5 6 7")
            .unwrap_err();
        assert!(matches!(&err, IniError::UnknownField(k) if k == "FEM0_TxBiPReferencePower_5G"));
    }

    #[test]
    fn test_fem_vendor_section() {
        let mut ctx = CommonContext::with_arch(Arch::Wl128x);
        let mut cursor = SectionCursor::new();
        feed(&mut ctx, &mut cursor, &["FemVendorAndOptions = 5a"]);
        assert!(cursor.needs_section());
        match ctx.record() {
            Some(IniRecord::Wl128x(ini)) => assert_eq!(ini.fem_vendor_and_options, 0x5a),
            _ => panic!("expected wl128x record"),
        }

        let mut ctx = CommonContext::with_arch(Arch::Wl1271);
        let mut cursor = SectionCursor::new();
        let err = ctx
            .parse_line(&mut cursor, "FemVendorAndOptions = 5a")
            .unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::UnsupportedSection);
    }

    #[test]
    fn test_section_exhaustion_forces_new_marker() {
        let mut ctx = CommonContext::with_arch(Arch::Wl128x);
        let mut cursor = SectionCursor::new();
        feed(
            &mut ctx,
            &mut cursor,
            &["RxTraceInsertionLoss_2_4G = 01", "TxTraceLoss_2_4G = 0 1 2 3 4 5 6 7 8 9 a b c d"],
        );
        let err = ctx.parse_line(&mut cursor, "TxTraceLoss_2_4G = 0").unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::UnknownSection);
    }
}
