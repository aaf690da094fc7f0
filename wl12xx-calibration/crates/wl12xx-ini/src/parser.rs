//! Top-level file reading and architecture detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use wl12xx_core::Arch;

use crate::context::CommonContext;
use crate::decode::split_line;
use crate::error::IniError;
use crate::reader::{IniOptions, LineReader};
use crate::section::SectionCursor;

/// Key that only appears in wl128x calibration files.
const WL128X_MARKER_KEY: &str = "TCXO_Clk";

/// Read a calibration INI file into `ctx` with default options.
pub fn read_ini<P: AsRef<Path>>(path: P, ctx: &mut CommonContext) -> Result<(), IniError> {
    read_ini_with(path, ctx, &IniOptions::default())
}

pub fn read_ini_with<P: AsRef<Path>>(
    path: P,
    ctx: &mut CommonContext,
    opts: &IniOptions,
) -> Result<(), IniError> {
    let path = path.as_ref();
    ctx.reset_session();
    let file = File::open(path).map_err(|source| {
        log::error!("Unable to open file {}: {source}", path.display());
        IniError::FileOpen {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse_stream(BufReader::new(file), ctx, opts)
}

/// Read calibration INI text from any seekable stream.
pub fn read_ini_from<R: BufRead + Seek>(
    reader: R,
    ctx: &mut CommonContext,
    opts: &IniOptions,
) -> Result<(), IniError> {
    ctx.reset_session();
    parse_stream(reader, ctx, opts)
}

fn parse_stream<R: BufRead + Seek>(
    mut reader: R,
    ctx: &mut CommonContext,
    opts: &IniOptions,
) -> Result<(), IniError> {
    detect_arch(&mut reader, ctx, opts)?;

    let mut lines = LineReader::with_options(reader, opts);
    let mut cursor = SectionCursor::new();
    while let Some(line) = lines.next_line()? {
        if let Err(err) = ctx.parse_line(&mut cursor, &line) {
            let number = lines.line_number();
            log::error!("Unable to parse line {number}: ({line}): {err}");
            return Err(IniError::AtLine {
                number,
                text: line,
                source: Box::new(err),
            });
        }
    }

    log::debug!(
        "parsed {} lines, FEM0 bands: {}, FEM1 bands: {}",
        lines.line_number(),
        ctx.fem0_bands,
        ctx.fem1_bands
    );
    Ok(())
}

/// Scan the stream for a wl128x-only key, bind the result and rewind.
///
/// Files without the key are wl1271 files.
pub fn detect_arch<R: BufRead + Seek>(
    reader: &mut R,
    ctx: &mut CommonContext,
    opts: &IniOptions,
) -> Result<Arch, IniError> {
    let mut arch = Arch::Wl1271;
    let mut lines = LineReader::with_options(&mut *reader, opts);
    while let Some(line) = lines.next_line()? {
        if let Ok((WL128X_MARKER_KEY, _)) = split_line(&line) {
            arch = Arch::Wl128x;
            break;
        }
    }
    reader.seek(SeekFrom::Start(0))?;

    ctx.bind_arch(arch)?;
    log::info!("Detected {arch} architecture");
    Ok(arch)
}

/// Bind the architecture implied by an NVS blob of `size` bytes.
pub fn nvs_get_arch(size: usize, ctx: &mut CommonContext) -> Result<Arch, IniError> {
    let arch = Arch::from_nvs_size(size).ok_or_else(|| {
        log::error!("Unknown NVS file size {size}");
        IniError::UnknownArchitecture(size)
    })?;
    ctx.bind_arch(arch)?;
    Ok(arch)
}

/// Whether the parsed record enables the 5 GHz band.
pub fn ini_get_dual_mode(ctx: &CommonContext) -> bool {
    ctx.record().is_some_and(|record| record.dual_mode())
}
