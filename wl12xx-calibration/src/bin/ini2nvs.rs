//! ini2nvs: Convert a wl12xx/wl128x calibration INI file to an NVS blob.

use clap::Parser;
use std::path::Path;

use wl12xx_nvs::{parse_mac, write_nvs, NvsFile};

#[derive(Parser)]
#[command(
    name = "ini2nvs",
    version,
    about = "Convert a wl12xx/wl128x calibration INI file to an NVS blob"
)]
struct Cli {
    /// Input calibration INI file
    #[arg(short, long)]
    r#in: String,

    /// Output NVS file
    #[arg(short, long, default_value = "wl1271-nvs.bin")]
    out: String,

    /// Existing NVS file whose NVS section is kept
    #[arg(short, long)]
    reference: Option<String>,

    /// MAC address to store (aa:bb:cc:dd:ee:ff)
    #[arg(short, long)]
    mac: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let mut nvs = NvsFile::from_ini(&cli.r#in, cli.reference.as_deref().map(Path::new))?;
    if let Some(mac) = &cli.mac {
        nvs.set_mac(parse_mac(mac)?);
    }

    write_nvs(&cli.out, &nvs)?;
    log::info!("Wrote {} NVS file {} ({} bytes)", nvs.arch(), cli.out, nvs.size());
    Ok(())
}
