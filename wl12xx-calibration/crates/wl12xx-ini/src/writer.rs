//! Render a calibration record back to INI text.
//!
//! Keys and value widths come from the same field tables the parser uses, so
//! the output reads back into an identical record for every rendered field.

use wl12xx_core::{IniRecord, FEM_MODULE_COUNT};

use crate::error::IniError;
use crate::tables::*;

const GENERAL: &str = "1.1: General parameters";
const BAND2: &str = "1.2.1: 2.4G parameters";
const BAND5: &str = "1.2.2: 5G parameters";
const FEM_VENDOR: &str = "2.1: FEM parameters";
const FEM_BAND2: &str = "2.1.1: 2.4G parameters";
const FEM_BAND5: &str = "2.1.2: 5G parameters";

/// FEM slots to show: both when auto-detect is on, otherwise the selected one.
pub fn fem_slots(record: &IniRecord) -> Result<Vec<usize>, IniError> {
    if record.auto_fem_detect() != 0 {
        return Ok((0..FEM_MODULE_COUNT).collect());
    }
    let manuf = record.fem_manufacturer();
    if manuf as usize >= FEM_MODULE_COUNT {
        log::error!("FEM index out of bounds ({manuf} >= {FEM_MODULE_COUNT})");
        return Err(IniError::FemIndex(manuf));
    }
    Ok(vec![manuf as usize])
}

pub fn render_ini(record: &IniRecord) -> Result<String, IniError> {
    let slots = fem_slots(record)?;
    let dual = record.dual_mode();
    let mut out = String::new();

    out.push_str(&format!("#Chip is {}\n", record.arch()));
    match record {
        IniRecord::Wl1271(ini) => {
            write_section(&mut out, GENERAL, "", WL1271_GENERAL, &ini.general_params);
            write_section(&mut out, BAND2, "", WL1271_BAND2, &ini.stat_radio_params_2);
            if dual {
                write_section(&mut out, BAND5, "", WL1271_BAND5, &ini.stat_radio_params_5);
            }
            write_fem_header(&mut out, record);
            for &slot in &slots {
                let prefix = fem_prefix(slot);
                let fem2 = &ini.dyn_radio_params_2[slot];
                write_section(&mut out, FEM_BAND2, &prefix, WL1271_FEM2, fem2);
                if dual {
                    let fem5 = &ini.dyn_radio_params_5[slot];
                    write_section(&mut out, FEM_BAND5, &prefix, WL1271_FEM5, fem5);
                }
            }
        }
        IniRecord::Wl128x(ini) => {
            write_section(&mut out, GENERAL, "", WL128X_GENERAL, &ini.general_params);
            write_section(&mut out, BAND2, "", WL128X_BAND2, &ini.stat_radio_params_2);
            if dual {
                write_section(&mut out, BAND5, "", WL128X_BAND5, &ini.stat_radio_params_5);
            }
            write_section(&mut out, FEM_VENDOR, "", WL128X_FEM_VENDOR, &**ini);
            write_fem_header(&mut out, record);
            for &slot in &slots {
                let prefix = fem_prefix(slot);
                let fem2 = &ini.dyn_radio_params_2[slot];
                write_section(&mut out, FEM_BAND2, &prefix, WL128X_FEM2, fem2);
                if dual {
                    let fem5 = &ini.dyn_radio_params_5[slot];
                    write_section(&mut out, FEM_BAND5, &prefix, WL128X_FEM5, fem5);
                }
            }
        }
    }
    Ok(out)
}

fn fem_prefix(slot: usize) -> String {
    format!("FEM{slot}_")
}

fn write_fem_header(out: &mut String, record: &IniRecord) {
    if record.auto_fem_detect() != 0 {
        out.push_str("#Fem autodetect is on. Showing both FEM datas\n\n");
    } else {
        out.push_str(&format!(
            "#Fem autodetect is off. Fem nr used is {}\n\n",
            record.fem_manufacturer()
        ));
    }
}

fn write_section<T>(
    out: &mut String,
    title: &str,
    prefix: &str,
    table: &[FieldSpec<T>],
    block: &T,
) {
    out.push_str(&format!("# SECTION {title}\n"));
    for spec in table {
        out.push_str(&format!("{prefix}{} = {}\n", spec.key(), spec.format(block)));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CommonContext;
    use crate::error::IniErrorKind;
    use crate::parser::read_ini_from;
    use crate::reader::IniOptions;
    use std::io::Cursor;
    use wl12xx_core::Arch;

    fn reparse(text: &str) -> IniRecord {
        let mut ctx = CommonContext::new();
        read_ini_from(Cursor::new(text.as_bytes()), &mut ctx, &IniOptions::default()).unwrap();
        ctx.into_record().unwrap()
    }

    #[test]
    fn test_render_wl1271_reads_back() {
        let mut record = IniRecord::new(Arch::Wl1271);
        if let IniRecord::Wl1271(ini) = &mut record {
            ini.general_params.ref_clock = 0x1a;
            ini.general_params.dual_mode_select = 1;
            ini.general_params.tx_bip_fem_auto_detect = 1;
            ini.general_params.srf2[3] = 0xee;
            ini.stat_radio_params_2.rx_rssi_process_compens[14] = 0x3c;
            ini.stat_radio_params_5.tx_trace_loss = [1, 2, 3, 4, 5, 6, 7];
            ini.dyn_radio_params_2[1].tx_bip_ref_pd_voltage = 0x01c4;
            ini.dyn_radio_params_5[0].tx_bip_ref_pd_voltage[3] = 0x0120;
            ini.dyn_radio_params_5[1].rx_fem_insertion_loss[6] = 0x10;
        }

        let text = render_ini(&record).unwrap();
        assert!(text.contains("RefClk = 1A"));
        assert!(text.contains("FEM1_TXBiPReferencePDvoltage_2_4G = 01C4"));
        assert_eq!(reparse(&text), record);
    }

    #[test]
    fn test_render_wl128x_reads_back() {
        let mut record = IniRecord::new(Arch::Wl128x);
        if let IniRecord::Wl128x(ini) = &mut record {
            ini.general_params.tcxo_ref_clock = 0x05;
            ini.general_params.general_settings = [1, 2, 3, 4];
            ini.general_params.tx_bip_fem_manufacturer = 1;
            ini.general_params.dual_mode_select = 1;
            ini.fem_vendor_and_options = 0x22;
            ini.stat_radio_params_2.tx_trace_loss[13] = 0x0d;
            ini.stat_radio_params_5.tx_trace_loss[34] = 0x22;
            ini.dyn_radio_params_2[1].tx_pd_vs_temperature = [0x11, 0x22];
            ini.dyn_radio_params_2[1].tx_ibias[7] = 0x0f;
            let fem5 = &mut ini.dyn_radio_params_5[1];
            fem5.tx_bip_ref_pd_voltage[6] = 0x0205;
            fem5.tx_per_chan_pwr_limits_ofdm[0] = 0x50;
            fem5.tx_pd_vs_temperature[13] = 0x07;
            fem5.normal_to_degraded_high_thr = 0x2d;
        }

        let text = render_ini(&record).unwrap();
        assert!(text.contains("TCXO_Clk = 05"));
        assert!(text.contains("FemVendorAndOptions = 22"));
        assert!(!text.contains("FEM0_"));
        assert!(text.contains("FEM1_TxBiPReferencePDvoltage_5G = "));
        let fem5_lines = text
            .lines()
            .filter(|line| line.starts_with("FEM1_") && line.contains("_5G"))
            .count();
        assert_eq!(fem5_lines, WL128X_FEM5.len());
        assert_eq!(reparse(&text), record);
    }

    #[test]
    fn test_single_band_skips_5g() {
        let record = IniRecord::new(Arch::Wl1271);
        let text = render_ini(&record).unwrap();
        assert!(!text.contains("RxTraceInsertionLoss_5G"));
        assert!(text.contains("FEM0_RxFemInsertionLoss_2_4G = 00"));
        assert!(!text.contains("FEM1_"));
    }

    #[test]
    fn test_fem_index_out_of_range() {
        let mut record = IniRecord::new(Arch::Wl128x);
        record.set_fem_manufacturer(2);
        assert_eq!(render_ini(&record).unwrap_err().kind(), IniErrorKind::FemIndex);

        record.set_auto_fem_detect(1);
        assert_eq!(fem_slots(&record).unwrap(), vec![0, 1]);
    }
}
