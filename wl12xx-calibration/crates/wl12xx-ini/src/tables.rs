//! Field tables: INI key names mapped to destinations inside the parameter
//! blocks, one table per (architecture, section).
//!
//! Every entry's first key is the one written back out by the renderer; any
//! further keys are accepted spellings. The number of entries in a table is
//! the number of lines its section holds.

use std::slice;

use wl12xx_core::*;

use crate::decode::{parse_u16_array, parse_u8_array};
use crate::error::IniError;

/// Accessors for one field of a parameter block.
pub enum Field<T> {
    Bytes {
        get: fn(&T) -> &[u8],
        get_mut: fn(&mut T) -> &mut [u8],
    },
    Words {
        get: fn(&T) -> &[u16],
        get_mut: fn(&mut T) -> &mut [u16],
    },
}

pub struct FieldSpec<T> {
    pub keys: &'static [&'static str],
    pub field: Field<T>,
}

impl<T> FieldSpec<T> {
    pub fn key(&self) -> &'static str {
        self.keys[0]
    }

    pub fn matches(&self, key: &str) -> bool {
        self.keys.iter().any(|k| *k == key)
    }

    pub fn decode(&self, value: &str, block: &mut T) -> Result<(), IniError> {
        match &self.field {
            Field::Bytes { get_mut, .. } => parse_u8_array(self.key(), value, get_mut(block)),
            Field::Words { get_mut, .. } => parse_u16_array(self.key(), value, get_mut(block)),
        }
    }

    /// Values formatted as space-separated upper-case hex.
    pub fn format(&self, block: &T) -> String {
        match &self.field {
            Field::Bytes { get, .. } => join_hex(get(block).iter().map(|v| format!("{v:02X}"))),
            Field::Words { get, .. } => join_hex(get(block).iter().map(|v| format!("{v:04X}"))),
        }
    }
}

fn join_hex(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(" ")
}

/// Find the entry for `key` and decode `value` into `block`.
pub fn decode_field<T>(
    table: &[FieldSpec<T>],
    key: &str,
    value: &str,
    block: &mut T,
) -> Result<(), IniError> {
    let spec = table
        .iter()
        .find(|spec| spec.matches(key))
        .ok_or_else(|| IniError::UnknownField(key.to_string()))?;
    spec.decode(value, block)
}

macro_rules! byte {
    ($keys:expr, $f:ident) => {
        FieldSpec {
            keys: $keys,
            field: Field::Bytes {
                get: |p| slice::from_ref(&p.$f),
                get_mut: |p| slice::from_mut(&mut p.$f),
            },
        }
    };
}

macro_rules! bytes {
    ($keys:expr, $f:ident) => {
        FieldSpec {
            keys: $keys,
            field: Field::Bytes {
                get: |p| &p.$f[..],
                get_mut: |p| &mut p.$f[..],
            },
        }
    };
}

macro_rules! word {
    ($keys:expr, $f:ident) => {
        FieldSpec {
            keys: $keys,
            field: Field::Words {
                get: |p| slice::from_ref(&p.$f),
                get_mut: |p| slice::from_mut(&mut p.$f),
            },
        }
    };
}

macro_rules! words {
    ($keys:expr, $f:ident) => {
        FieldSpec {
            keys: $keys,
            field: Field::Words {
                get: |p| &p.$f[..],
                get_mut: |p| &mut p.$f[..],
            },
        }
    };
}

// ─── General ────────────────────────────────────────────────────────────────

pub static WL1271_GENERAL: &[FieldSpec<Wl1271GeneralParams>] = &[
    byte!(&["TXBiPFEMAutoDetect"], tx_bip_fem_auto_detect),
    byte!(&["TXBiPFEMManufacturer"], tx_bip_fem_manufacturer),
    byte!(&["RefClk"], ref_clock),
    byte!(&["SettlingTime"], settling_time),
    byte!(&["ClockValidOnWakeup"], clk_valid_on_wakeup),
    byte!(&["DC2DCMode"], dc2dc_mode),
    byte!(&["Single_Dual_Band_Solution"], dual_mode_select),
    byte!(&["Settings"], general_settings),
    byte!(&["SRState"], sr_state),
    bytes!(&["SRF1"], srf1),
    bytes!(&["SRF2"], srf2),
    bytes!(&["SRF3"], srf3),
];

pub static WL128X_GENERAL: &[FieldSpec<Wl128xGeneralParams>] = &[
    byte!(&["TXBiPFEMAutoDetect"], tx_bip_fem_auto_detect),
    byte!(&["TXBiPFEMManufacturer"], tx_bip_fem_manufacturer),
    byte!(&["RefClk"], ref_clock),
    byte!(&["SettlingTime"], settling_time),
    byte!(&["ClockValidOnWakeup"], clk_valid_on_wakeup),
    byte!(&["TCXO_Clk"], tcxo_ref_clock),
    byte!(&["TCXO_SettlingTime"], tcxo_settling_time),
    byte!(&["TCXO_ClockValidOnWakeup"], tcxo_valid_on_wakeup),
    byte!(&["TCXO_LDO_Voltage"], tcxo_ldo_voltage),
    byte!(&["Platform_configuration"], platform_conf),
    byte!(&["Single_Dual_Band_Solution"], dual_mode_select),
    bytes!(&["Settings"], general_settings),
    byte!(&["XTALItrimVal"], xtal_itrim_val),
    byte!(&["SRState"], sr_state),
    bytes!(&["SRF1"], srf1),
    bytes!(&["SRF2"], srf2),
    bytes!(&["SRF3"], srf3),
];

pub static WL128X_FEM_VENDOR: &[FieldSpec<Wl128xIni>] =
    &[byte!(&["FemVendorAndOptions"], fem_vendor_and_options)];

// ─── Static band parameters ─────────────────────────────────────────────────

pub static WL1271_BAND2: &[FieldSpec<Wl1271Band2Params>] = &[
    byte!(&["RxTraceInsertionLoss_2_4G"], rx_trace_insertion_loss),
    byte!(&["TXTraceLoss_2_4G", "TxTraceLoss_2_4G"], tx_trace_loss),
    bytes!(&["RxRssiAndProcessCompensation_2_4G"], rx_rssi_process_compens),
];

pub static WL128X_BAND2: &[FieldSpec<Wl128xBand2Params>] = &[
    byte!(&["RxTraceInsertionLoss_2_4G"], rx_trace_insertion_loss),
    bytes!(&["TxTraceLoss_2_4G", "TXTraceLoss_2_4G"], tx_trace_loss),
];

pub static WL1271_BAND5: &[FieldSpec<Wl1271Band5Params>] = &[
    bytes!(&["RxTraceInsertionLoss_5G"], rx_trace_insertion_loss),
    bytes!(&["TXTraceLoss_5G", "TxTraceLoss_5G"], tx_trace_loss),
    bytes!(&["RxRssiAndProcessCompensation_5G"], rx_rssi_process_compens),
];

pub static WL128X_BAND5: &[FieldSpec<Wl128xBand5Params>] = &[
    bytes!(&["RxTraceInsertionLoss_5G"], rx_trace_insertion_loss),
    bytes!(&["TxTraceLoss_5G", "TXTraceLoss_5G"], tx_trace_loss),
];

// ─── FEM parameters (keys without the FEMn_ prefix) ─────────────────────────

pub static WL1271_FEM2: &[FieldSpec<Wl1271Fem2Params>] = &[
    word!(
        &["TXBiPReferencePDvoltage_2_4G", "TxBiPReferencePDvoltage_2_4G"],
        tx_bip_ref_pd_voltage
    ),
    byte!(&["TxBiPReferencePower_2_4G"], tx_bip_ref_power),
    byte!(&["TxBiPOffsetdB_2_4G"], tx_bip_ref_offset),
    bytes!(&["TxPerRatePowerLimits_2_4G_Normal"], tx_per_rate_pwr_limits_normal),
    bytes!(&["TxPerRatePowerLimits_2_4G_Degraded"], tx_per_rate_pwr_limits_degraded),
    bytes!(&["TxPerRatePowerLimits_2_4G_Extreme"], tx_per_rate_pwr_limits_extreme),
    byte!(&["DegradedLowToNormalThr_2_4G"], degraded_low_to_normal_thr),
    byte!(&["NormalToDegradedHighThr_2_4G"], normal_to_degraded_high_thr),
    bytes!(&["TxPerChannelPowerLimits_2_4G_11b"], tx_per_chan_pwr_limits_11b),
    bytes!(&["TxPerChannelPowerLimits_2_4G_OFDM"], tx_per_chan_pwr_limits_ofdm),
    bytes!(&["TxPDVsRateOffsets_2_4G"], tx_pd_vs_rate_offsets),
    bytes!(&["TxIbiasTable_2_4G"], tx_ibias),
    byte!(&["RxFemInsertionLoss_2_4G"], rx_fem_insertion_loss),
];

pub static WL128X_FEM2: &[FieldSpec<Wl128xFem2Params>] = &[
    word!(
        &["TxBiPReferencePDvoltage_2_4G", "TXBiPReferencePDvoltage_2_4G"],
        tx_bip_ref_pd_voltage
    ),
    byte!(&["TxBiPReferencePower_2_4G"], tx_bip_ref_power),
    byte!(&["TxBiPOffsetdB_2_4G"], tx_bip_ref_offset),
    bytes!(&["TxPerRatePowerLimits_2_4G_Normal"], tx_per_rate_pwr_limits_normal),
    bytes!(&["TxPerRatePowerLimits_2_4G_Degraded"], tx_per_rate_pwr_limits_degraded),
    bytes!(&["TxPerRatePowerLimits_2_4G_Extreme"], tx_per_rate_pwr_limits_extreme),
    byte!(&["DegradedLowToNormalThr_2_4G"], degraded_low_to_normal_thr),
    byte!(&["NormalToDegradedHighThr_2_4G"], normal_to_degraded_high_thr),
    bytes!(&["TxPerChannelPowerLimits_2_4G_11b"], tx_per_chan_pwr_limits_11b),
    bytes!(&["TxPerChannelPowerLimits_2_4G_OFDM"], tx_per_chan_pwr_limits_ofdm),
    bytes!(&["TxPDVsRateOffsets_2_4G"], tx_pd_vs_rate_offsets),
    bytes!(&["TxPDVsChannelOffsets_2_4G"], tx_pd_vs_chan_offsets),
    bytes!(&["TxPDVsTemperature_2_4G"], tx_pd_vs_temperature),
    bytes!(&["TxIbiasTable_2_4G"], tx_ibias),
    byte!(&["RxFemInsertionLoss_2_4G"], rx_fem_insertion_loss),
];

pub static WL1271_FEM5: &[FieldSpec<Wl1271Fem5Params>] = &[
    words!(
        &["TXBiPReferencePDvoltage_5G", "TxBiPReferencePDvoltage_5G"],
        tx_bip_ref_pd_voltage
    ),
    bytes!(&["TxBiPReferencePower_5G"], tx_bip_ref_power),
    bytes!(&["TxBiPOffsetdB_5G"], tx_bip_ref_offset),
    bytes!(&["TxPerRatePowerLimits_5G_Normal"], tx_per_rate_pwr_limits_normal),
    bytes!(&["TxPerRatePowerLimits_5G_Degraded"], tx_per_rate_pwr_limits_degraded),
    bytes!(&["TxPerRatePowerLimits_5G_Extreme"], tx_per_rate_pwr_limits_extreme),
    byte!(&["DegradedLowToNormalThr_5G"], degraded_low_to_normal_thr),
    byte!(&["NormalToDegradedHighThr_5G"], normal_to_degraded_high_thr),
    bytes!(&["TxPerChannelPowerLimits_5G_OFDM"], tx_per_chan_pwr_limits_ofdm),
    bytes!(&["TxPDVsRateOffsets_5G"], tx_pd_vs_rate_offsets),
    bytes!(&["TxIbiasTable_5G"], tx_ibias),
    bytes!(&["RxFemInsertionLoss_5G"], rx_fem_insertion_loss),
];

pub static WL128X_FEM5: &[FieldSpec<Wl128xFem5Params>] = &[
    words!(
        &["TxBiPReferencePDvoltage_5G", "TXBiPReferencePDvoltage_5G"],
        tx_bip_ref_pd_voltage
    ),
    bytes!(&["TxBiPReferencePower_5G"], tx_bip_ref_power),
    bytes!(&["TxBiPOffsetdB_5G"], tx_bip_ref_offset),
    bytes!(&["TxPerRatePowerLimits_5G_Normal"], tx_per_rate_pwr_limits_normal),
    bytes!(&["TxPerRatePowerLimits_5G_Degraded"], tx_per_rate_pwr_limits_degraded),
    bytes!(&["TxPerRatePowerLimits_5G_Extreme"], tx_per_rate_pwr_limits_extreme),
    byte!(&["DegradedLowToNormalThr_5G"], degraded_low_to_normal_thr),
    byte!(&["NormalToDegradedHighThr_5G"], normal_to_degraded_high_thr),
    bytes!(&["TxPerChannelPowerLimits_5G_OFDM"], tx_per_chan_pwr_limits_ofdm),
    bytes!(&["TxPDVsRateOffsets_5G"], tx_pd_vs_rate_offsets),
    bytes!(&["TxPDVsChannelOffsets_5G"], tx_pd_vs_chan_offsets),
    bytes!(&["TxPDVsTemperature_5G"], tx_pd_vs_temperature),
    bytes!(&["TxIbiasTable_5G"], tx_ibias),
    bytes!(&["RxFemInsertionLoss_5G"], rx_fem_insertion_loss),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IniErrorKind;

    fn keys<T>(table: &[FieldSpec<T>]) -> Vec<&'static str> {
        table.iter().flat_map(|spec| spec.keys.iter().copied()).collect()
    }

    #[test]
    fn test_section_lengths() {
        assert_eq!(WL1271_GENERAL.len(), 12);
        assert_eq!(WL128X_GENERAL.len(), 17);
        assert_eq!(WL128X_FEM_VENDOR.len(), 1);
        assert_eq!(WL1271_BAND2.len(), 3);
        assert_eq!(WL128X_BAND2.len(), 2);
        assert_eq!(WL1271_BAND5.len(), 3);
        assert_eq!(WL128X_BAND5.len(), 2);
        assert_eq!(WL1271_FEM2.len(), 13);
        assert_eq!(WL128X_FEM2.len(), 15);
        assert_eq!(WL1271_FEM5.len(), 12);
        assert_eq!(WL128X_FEM5.len(), 14);
    }

    #[test]
    fn test_keys_unique_within_table() {
        fn check<T>(table: &[FieldSpec<T>]) {
            let mut all = keys(table);
            let total = all.len();
            all.sort_unstable();
            all.dedup();
            assert_eq!(all.len(), total);
        }
        check(WL1271_GENERAL);
        check(WL128X_GENERAL);
        check(WL1271_BAND2);
        check(WL128X_BAND5);
        check(WL1271_FEM2);
        check(WL128X_FEM2);
        check(WL1271_FEM5);
        check(WL128X_FEM5);
    }

    #[test]
    fn test_field_lengths_follow_layout() {
        let gp = Wl1271GeneralParams::default();
        let srf = WL1271_GENERAL.iter().find(|s| s.matches("SRF2")).unwrap();
        assert_eq!(srf.format(&gp).split(' ').count(), SMART_REFLEX_PARAM_COUNT);

        let fem = Wl128xFem5Params::default();
        let temp = WL128X_FEM5
            .iter()
            .find(|s| s.matches("TxPDVsTemperature_5G"))
            .unwrap();
        assert_eq!(temp.format(&fem).split(' ').count(), 14);
    }

    #[test]
    fn test_decode_field_by_synonym() {
        let mut fem = Wl1271Fem2Params::default();
        decode_field(WL1271_FEM2, "TxBiPReferencePDvoltage_2_4G", "01a4", &mut fem).unwrap();
        assert_eq!(fem.tx_bip_ref_pd_voltage, 0x01a4);
        decode_field(WL1271_FEM2, "TXBiPReferencePDvoltage_2_4G", "0200", &mut fem).unwrap();
        assert_eq!(fem.tx_bip_ref_pd_voltage, 0x0200);
    }

    #[test]
    fn test_decode_field_unknown_key() {
        let mut gp = Wl1271GeneralParams::default();
        let err = decode_field(WL1271_GENERAL, "FooBar", "1", &mut gp).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::UnknownField);
        let err = decode_field(WL1271_GENERAL, "refclk", "1", &mut gp).unwrap_err();
        assert_eq!(err.kind(), IniErrorKind::UnknownField);
    }

    #[test]
    fn test_format_values() {
        let mut band = Wl128xBand2Params::default();
        band.tx_trace_loss[0] = 0xab;
        let spec = &WL128X_BAND2[1];
        assert!(spec.format(&band).starts_with("AB 00 00"));

        let fem = Wl1271Fem5Params {
            tx_bip_ref_pd_voltage: [0x1f4; SUB_BAND_COUNT_5],
            ..Default::default()
        };
        assert!(WL1271_FEM5[0].format(&fem).starts_with("01F4 01F4"));
    }
}
