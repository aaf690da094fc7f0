//! Radio calibration parameter blocks for both chip generations.
//!
//! Field order matches the packed NVS layout; see [`crate::layout`] for the
//! byte encoding. All multi-byte values are little-endian on the wire.

// ─── Dimensions ─────────────────────────────────────────────────────────────

/// Smart-reflex coefficient count per SRF array.
pub const SMART_REFLEX_PARAM_COUNT: usize = 16;
/// General settings bytes on wl128x.
pub const WL128X_SETTINGS_COUNT: usize = 4;
/// RSSI / process compensation table length (wl1271).
pub const RSSI_PROCESS_COMPENS_SIZE: usize = 15;
/// Channels in the 2.4 GHz band.
pub const CHANNEL_COUNT_2: usize = 14;
/// Channels in the 5 GHz band.
pub const CHANNEL_COUNT_5: usize = 35;
/// Sub-bands in the 5 GHz band.
pub const SUB_BAND_COUNT_5: usize = 7;
/// Rate groups for per-rate power limits (wl1271).
pub const WL1271_RATE_GROUP_COUNT: usize = 6;
/// Rate groups for per-rate power limits (wl128x).
pub const WL128X_RATE_GROUP_COUNT: usize = 7;
/// TX bias table length, 2.4 GHz wl128x.
pub const WL128X_IBIAS_COUNT_2: usize = 8;
/// Temperature ranges for PD compensation (wl128x).
pub const PD_VS_TEMPERATURE_RANGES: usize = 2;
/// FEM slots present in every record.
pub const FEM_MODULE_COUNT: usize = 2;

// ─── wl1271 ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl1271GeneralParams {
    pub ref_clock: u8,
    pub settling_time: u8,
    pub clk_valid_on_wakeup: u8,
    pub dc2dc_mode: u8,
    pub dual_mode_select: u8,
    pub tx_bip_fem_auto_detect: u8,
    pub tx_bip_fem_manufacturer: u8,
    pub general_settings: u8,
    pub sr_state: u8,
    pub srf1: [u8; SMART_REFLEX_PARAM_COUNT],
    pub srf2: [u8; SMART_REFLEX_PARAM_COUNT],
    pub srf3: [u8; SMART_REFLEX_PARAM_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl1271Band2Params {
    pub rx_trace_insertion_loss: u8,
    pub tx_trace_loss: u8,
    pub rx_rssi_process_compens: [u8; RSSI_PROCESS_COMPENS_SIZE],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl1271Band5Params {
    pub rx_trace_insertion_loss: [u8; SUB_BAND_COUNT_5],
    pub tx_trace_loss: [u8; SUB_BAND_COUNT_5],
    pub rx_rssi_process_compens: [u8; RSSI_PROCESS_COMPENS_SIZE],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl1271Fem2Params {
    pub tx_bip_ref_pd_voltage: u16,
    pub tx_bip_ref_power: u8,
    pub tx_bip_ref_offset: u8,
    pub tx_per_rate_pwr_limits_normal: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_degraded: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_extreme: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_per_chan_pwr_limits_11b: [u8; CHANNEL_COUNT_2],
    pub tx_per_chan_pwr_limits_ofdm: [u8; CHANNEL_COUNT_2],
    pub tx_pd_vs_rate_offsets: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_ibias: [u8; WL1271_RATE_GROUP_COUNT],
    pub rx_fem_insertion_loss: u8,
    pub degraded_low_to_normal_thr: u8,
    pub normal_to_degraded_high_thr: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wl1271Fem5Params {
    pub tx_bip_ref_pd_voltage: [u16; SUB_BAND_COUNT_5],
    pub tx_bip_ref_power: [u8; SUB_BAND_COUNT_5],
    pub tx_bip_ref_offset: [u8; SUB_BAND_COUNT_5],
    pub tx_per_rate_pwr_limits_normal: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_degraded: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_extreme: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_per_chan_pwr_limits_ofdm: [u8; CHANNEL_COUNT_5],
    pub tx_pd_vs_rate_offsets: [u8; WL1271_RATE_GROUP_COUNT],
    pub tx_ibias: [u8; WL1271_RATE_GROUP_COUNT],
    pub rx_fem_insertion_loss: [u8; SUB_BAND_COUNT_5],
    pub degraded_low_to_normal_thr: u8,
    pub normal_to_degraded_high_thr: u8,
}

impl Default for Wl1271Fem5Params {
    fn default() -> Self {
        Self {
            tx_bip_ref_pd_voltage: [0; SUB_BAND_COUNT_5],
            tx_bip_ref_power: [0; SUB_BAND_COUNT_5],
            tx_bip_ref_offset: [0; SUB_BAND_COUNT_5],
            tx_per_rate_pwr_limits_normal: [0; WL1271_RATE_GROUP_COUNT],
            tx_per_rate_pwr_limits_degraded: [0; WL1271_RATE_GROUP_COUNT],
            tx_per_rate_pwr_limits_extreme: [0; WL1271_RATE_GROUP_COUNT],
            tx_per_chan_pwr_limits_ofdm: [0; CHANNEL_COUNT_5],
            tx_pd_vs_rate_offsets: [0; WL1271_RATE_GROUP_COUNT],
            tx_ibias: [0; WL1271_RATE_GROUP_COUNT],
            rx_fem_insertion_loss: [0; SUB_BAND_COUNT_5],
            degraded_low_to_normal_thr: 0,
            normal_to_degraded_high_thr: 0,
        }
    }
}

/// Complete wl1271 radio parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wl1271Ini {
    pub general_params: Wl1271GeneralParams,
    pub stat_radio_params_2: Wl1271Band2Params,
    pub dyn_radio_params_2: [Wl1271Fem2Params; FEM_MODULE_COUNT],
    pub stat_radio_params_5: Wl1271Band5Params,
    pub dyn_radio_params_5: [Wl1271Fem5Params; FEM_MODULE_COUNT],
}

// ─── wl128x ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl128xGeneralParams {
    pub ref_clock: u8,
    pub settling_time: u8,
    pub clk_valid_on_wakeup: u8,
    pub tcxo_ref_clock: u8,
    pub tcxo_settling_time: u8,
    pub tcxo_valid_on_wakeup: u8,
    pub tcxo_ldo_voltage: u8,
    pub xtal_itrim_val: u8,
    pub platform_conf: u8,
    pub dual_mode_select: u8,
    pub tx_bip_fem_auto_detect: u8,
    pub tx_bip_fem_manufacturer: u8,
    pub general_settings: [u8; WL128X_SETTINGS_COUNT],
    pub sr_state: u8,
    pub srf1: [u8; SMART_REFLEX_PARAM_COUNT],
    pub srf2: [u8; SMART_REFLEX_PARAM_COUNT],
    pub srf3: [u8; SMART_REFLEX_PARAM_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl128xBand2Params {
    pub rx_trace_insertion_loss: u8,
    pub tx_trace_loss: [u8; CHANNEL_COUNT_2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wl128xBand5Params {
    pub rx_trace_insertion_loss: [u8; SUB_BAND_COUNT_5],
    pub tx_trace_loss: [u8; CHANNEL_COUNT_5],
}

impl Default for Wl128xBand5Params {
    fn default() -> Self {
        Self {
            rx_trace_insertion_loss: [0; SUB_BAND_COUNT_5],
            tx_trace_loss: [0; CHANNEL_COUNT_5],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wl128xFem2Params {
    pub tx_bip_ref_pd_voltage: u16,
    pub tx_bip_ref_power: u8,
    pub tx_bip_ref_offset: u8,
    pub tx_per_rate_pwr_limits_normal: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_degraded: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_extreme: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_per_chan_pwr_limits_11b: [u8; CHANNEL_COUNT_2],
    pub tx_per_chan_pwr_limits_ofdm: [u8; CHANNEL_COUNT_2],
    pub tx_pd_vs_rate_offsets: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_ibias: [u8; WL128X_IBIAS_COUNT_2],
    pub tx_pd_vs_chan_offsets: [u8; CHANNEL_COUNT_2],
    pub tx_pd_vs_temperature: [u8; PD_VS_TEMPERATURE_RANGES],
    pub rx_fem_insertion_loss: u8,
    pub degraded_low_to_normal_thr: u8,
    pub normal_to_degraded_high_thr: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wl128xFem5Params {
    pub tx_bip_ref_pd_voltage: [u16; SUB_BAND_COUNT_5],
    pub tx_bip_ref_power: [u8; SUB_BAND_COUNT_5],
    pub tx_bip_ref_offset: [u8; SUB_BAND_COUNT_5],
    pub tx_per_rate_pwr_limits_normal: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_degraded: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_per_rate_pwr_limits_extreme: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_per_chan_pwr_limits_ofdm: [u8; CHANNEL_COUNT_5],
    pub tx_pd_vs_rate_offsets: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_ibias: [u8; WL128X_RATE_GROUP_COUNT],
    pub tx_pd_vs_chan_offsets: [u8; CHANNEL_COUNT_5],
    pub tx_pd_vs_temperature: [u8; SUB_BAND_COUNT_5 * PD_VS_TEMPERATURE_RANGES],
    pub rx_fem_insertion_loss: [u8; SUB_BAND_COUNT_5],
    pub degraded_low_to_normal_thr: u8,
    pub normal_to_degraded_high_thr: u8,
}

impl Default for Wl128xFem5Params {
    fn default() -> Self {
        Self {
            tx_bip_ref_pd_voltage: [0; SUB_BAND_COUNT_5],
            tx_bip_ref_power: [0; SUB_BAND_COUNT_5],
            tx_bip_ref_offset: [0; SUB_BAND_COUNT_5],
            tx_per_rate_pwr_limits_normal: [0; WL128X_RATE_GROUP_COUNT],
            tx_per_rate_pwr_limits_degraded: [0; WL128X_RATE_GROUP_COUNT],
            tx_per_rate_pwr_limits_extreme: [0; WL128X_RATE_GROUP_COUNT],
            tx_per_chan_pwr_limits_ofdm: [0; CHANNEL_COUNT_5],
            tx_pd_vs_rate_offsets: [0; WL128X_RATE_GROUP_COUNT],
            tx_ibias: [0; WL128X_RATE_GROUP_COUNT],
            tx_pd_vs_chan_offsets: [0; CHANNEL_COUNT_5],
            tx_pd_vs_temperature: [0; SUB_BAND_COUNT_5 * PD_VS_TEMPERATURE_RANGES],
            rx_fem_insertion_loss: [0; SUB_BAND_COUNT_5],
            degraded_low_to_normal_thr: 0,
            normal_to_degraded_high_thr: 0,
        }
    }
}

/// Complete wl128x radio parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wl128xIni {
    pub general_params: Wl128xGeneralParams,
    pub fem_vendor_and_options: u8,
    pub stat_radio_params_2: Wl128xBand2Params,
    pub dyn_radio_params_2: [Wl128xFem2Params; FEM_MODULE_COUNT],
    pub stat_radio_params_5: Wl128xBand5Params,
    pub dyn_radio_params_5: [Wl128xFem5Params; FEM_MODULE_COUNT],
}
