//! nvs2ini: Print the radio parameters of an NVS blob as calibration INI text.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use wl12xx_nvs::read_nvs;

#[derive(Parser)]
#[command(
    name = "nvs2ini",
    version,
    about = "Print the radio parameters of an NVS blob as calibration INI text"
)]
struct Cli {
    /// Input NVS file
    #[arg(short, long)]
    r#in: String,

    /// Output INI file (or - for stdout)
    #[arg(short, long, default_value = "-")]
    out: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let nvs = read_nvs(&cli.r#in)?;
    let text = nvs.info()?;

    if cli.out == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        out.write_all(text.as_bytes())?;
        out.flush()?;
    } else {
        let mut out = BufWriter::new(File::create(&cli.out)?);
        out.write_all(text.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}
