//! Summary of one parsed calibration INI file.
//!
//! Printed by `calibrator check`, either as aligned text or as JSON for
//! production-line scripts.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use wl12xx_core::NVS_SECTION_SIZE;
use wl12xx_ini::CommonContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    /// INI file that was read
    pub source: String,
    /// Chip family, "127x" or "128x"
    pub arch: String,
    /// 2.4 GHz + 5 GHz operation
    pub dual_mode: bool,
    /// FEM auto-detection enabled in the general section
    pub auto_fem: bool,
    /// FEM used when auto-detection is off
    pub fem_manufacturer: u8,
    /// FEM0 band sections read
    pub fem0_bands: u32,
    /// FEM1 band sections read
    pub fem1_bands: u32,
    /// Size of the NVS blob this record packs into
    pub nvs_size: usize,
    pub generated: DateTime<Local>,
}

impl ParseReport {
    /// Build a report from a finished parse; `None` when nothing was bound.
    pub fn from_context(source: &str, ctx: &CommonContext) -> Option<Self> {
        let record = ctx.record()?;
        Some(Self {
            source: source.to_string(),
            arch: record.arch().to_string(),
            dual_mode: record.dual_mode(),
            auto_fem: ctx.auto_fem,
            fem_manufacturer: record.fem_manufacturer(),
            fem0_bands: ctx.fem0_bands,
            fem1_bands: ctx.fem1_bands,
            nvs_size: NVS_SECTION_SIZE + record.packed_size(),
            generated: Local::now(),
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("  Source:      {}\n", self.source));
        out.push_str(&format!("  Chip:        {}\n", self.arch));
        out.push_str(&format!(
            "  Bands:       {}\n",
            if self.dual_mode { "2.4G + 5G" } else { "2.4G" }
        ));
        if self.auto_fem {
            out.push_str("  FEM:         auto-detect\n");
        } else {
            out.push_str(&format!("  FEM:         {}\n", self.fem_manufacturer));
        }
        out.push_str(&format!(
            "  FEM bands:   FEM0 {}, FEM1 {}\n",
            self.fem0_bands, self.fem1_bands
        ));
        out.push_str(&format!("  NVS size:    {} bytes\n", self.nvs_size));
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
