use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "calibrator",
    version,
    about = "Production-line calibration tool for wl12xx/wl128x WiFi chips"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a calibration INI file and report what it contains
    Check {
        /// Calibration INI file
        ini: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build an NVS blob from a calibration INI file
    #[command(name = "ini2nvs")]
    Ini2Nvs {
        /// Calibration INI file
        ini: String,
        /// Output NVS file
        #[arg(short, long, default_value = "wl1271-nvs.bin")]
        out: String,
        /// Existing NVS file whose NVS section is kept
        #[arg(short, long)]
        reference: Option<String>,
        /// MAC address to store (aa:bb:cc:dd:ee:ff)
        #[arg(short, long)]
        mac: Option<String>,
    },

    /// Print an NVS blob's version, MAC and radio parameters
    Info {
        /// NVS file
        nvs: String,
    },

    /// Hex dump of an NVS blob
    Dump {
        /// NVS file
        nvs: String,
    },

    /// Set the FEM auto-detect flag of an NVS blob in place
    #[command(name = "set-autofem")]
    SetAutoFem {
        /// NVS file
        nvs: String,
        /// New value, hex
        value: String,
    },

    /// Set the FEM manufacturer of an NVS blob in place
    #[command(name = "set-fem-manuf")]
    SetFemManuf {
        /// NVS file
        nvs: String,
        /// New value, hex
        value: String,
    },

    /// Store a MAC address in an NVS blob in place
    #[command(name = "set-mac")]
    SetMac {
        /// NVS file
        nvs: String,
        /// MAC address (aa:bb:cc:dd:ee:ff)
        mac: String,
    },
}
