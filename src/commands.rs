//! Subcommand handlers.

use std::path::Path;

use wl12xx_ini::{read_ini, CommonContext};
use wl12xx_nvs::{hex_dump, modify_nvs, parse_mac, read_nvs, read_nvs_bytes, write_nvs, NvsFile};

use crate::cli::Command;
use crate::error::{parse_hex_u8, CalError};
use crate::report::ParseReport;

pub fn run(command: Command) -> Result<(), CalError> {
    match command {
        Command::Check { ini, json } => check(&ini, json),
        Command::Ini2Nvs {
            ini,
            out,
            reference,
            mac,
        } => {
            ini2nvs(&ini, &out, reference.as_deref(), mac.as_deref())?;
            Ok(())
        }
        Command::Info { nvs } => {
            print!("{}", read_nvs(&nvs)?.info()?);
            Ok(())
        }
        Command::Dump { nvs } => {
            print!("{}", hex_dump(&read_nvs_bytes(&nvs)?));
            Ok(())
        }
        Command::SetAutoFem { nvs, value } => {
            let value = parse_hex_u8(&value)?;
            modify_nvs(&nvs, |f| f.set_auto_fem(value))?;
            Ok(())
        }
        Command::SetFemManuf { nvs, value } => {
            let value = parse_hex_u8(&value)?;
            modify_nvs(&nvs, |f| f.set_fem_manufacturer(value))?;
            Ok(())
        }
        Command::SetMac { nvs, mac } => {
            let mac = parse_mac(&mac)?;
            modify_nvs(&nvs, |f| f.set_mac(mac))?;
            Ok(())
        }
    }
}

fn check(path: &str, json: bool) -> Result<(), CalError> {
    let mut ctx = CommonContext::new();
    read_ini(path, &mut ctx)?;
    let report =
        ParseReport::from_context(path, &ctx).ok_or_else(|| CalError::EmptyIni(path.into()))?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

/// Build an NVS blob from `ini_path` and write it to `out`.
pub fn ini2nvs(
    ini_path: &str,
    out: &str,
    reference: Option<&str>,
    mac: Option<&str>,
) -> Result<NvsFile, CalError> {
    let mut nvs = NvsFile::from_ini(ini_path, reference.map(Path::new))?;
    if let Some(mac) = mac {
        nvs.set_mac(parse_mac(mac)?);
    }

    write_nvs(out, &nvs)?;
    log::info!("Wrote {} NVS file {} ({} bytes)", nvs.arch(), out, nvs.size());
    Ok(nvs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use wl12xx_core::Arch;
    use wl12xx_ini::IniErrorKind;
    use wl12xx_nvs::{MacAddr, NvsError};

    const GENERAL_128X: &str = "\
TXBiPFEMAutoDetect = 01
TXBiPFEMManufacturer = 00
RefClk = 05
SettlingTime = 5A
ClockValidOnWakeup = 00
TCXO_Clk = 05
TCXO_SettlingTime = 5A
TCXO_ClockValidOnWakeup = 00
TCXO_LDO_Voltage = 00
Platform_configuration = 00
Single_Dual_Band_Solution = 00
Settings = 00 00 00 00
XTALItrimVal = 04
SRState = 00
SRF1 = 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
SRF2 = 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
SRF3 = 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
";

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("calibrator-{}-{name}", std::process::id()))
    }

    fn write_ini(name: &str, text: &str) -> String {
        let path = temp_path(name);
        fs::write(&path, text).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_ini2nvs_default_section() {
        let ini = write_ini("default.ini", GENERAL_128X);
        let out = temp_path("default.bin").to_string_lossy().into_owned();

        let nvs = ini2nvs(&ini, &out, None, Some("08:00:28:12:34:56")).unwrap();
        let written = read_nvs(&out).unwrap();
        fs::remove_file(&ini).unwrap();
        fs::remove_file(&out).unwrap();

        assert_eq!(nvs.arch(), Arch::Wl128x);
        assert_eq!(written, nvs);
        assert_eq!(written.size(), 1083);
        assert_eq!(written.ini.auto_fem_detect(), 1);
        assert_eq!(written.mac(), MacAddr([0x08, 0x00, 0x28, 0x12, 0x34, 0x56]));
    }

    #[test]
    fn test_ini2nvs_keeps_reference_section() {
        let ini = write_ini("ref.ini", GENERAL_128X);
        let reference = temp_path("ref-in.bin").to_string_lossy().into_owned();
        let out = temp_path("ref-out.bin").to_string_lossy().into_owned();

        let mut old = NvsFile::new_default(wl12xx_core::IniRecord::new(Arch::Wl1271));
        old.set_mac(MacAddr([1, 2, 3, 4, 5, 6]));
        write_nvs(&reference, &old).unwrap();

        let nvs = ini2nvs(&ini, &out, Some(&reference), None).unwrap();
        for path in [&ini, &reference, &out] {
            fs::remove_file(path).unwrap();
        }

        assert_eq!(nvs.section(), old.section());
        assert_eq!(nvs.arch(), Arch::Wl128x);
    }

    #[test]
    fn test_ini2nvs_reports_bad_line() {
        let ini = write_ini("bad.ini", "TXBiPFEMAutoDetect = 01\nBogusKey = 00\n");
        let out = temp_path("bad.bin").to_string_lossy().into_owned();

        let err = ini2nvs(&ini, &out, None, None).unwrap_err();
        fs::remove_file(&ini).unwrap();

        match err {
            CalError::Nvs(NvsError::Ini(e)) => {
                assert_eq!(e.kind(), IniErrorKind::UnknownField);
                assert_eq!(e.line_number(), Some(2));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!temp_path("bad.bin").exists());
    }

    #[test]
    fn test_patch_commands() {
        let path = temp_path("patch.bin");
        let nvs = path.to_string_lossy().into_owned();
        write_nvs(&path, &NvsFile::new_default(wl12xx_core::IniRecord::new(Arch::Wl1271))).unwrap();

        run(Command::SetAutoFem {
            nvs: nvs.clone(),
            value: "1".into(),
        })
        .unwrap();
        run(Command::SetFemManuf {
            nvs: nvs.clone(),
            value: "0x01".into(),
        })
        .unwrap();
        run(Command::SetMac {
            nvs: nvs.clone(),
            mac: "aa:bb:cc:dd:ee:ff".into(),
        })
        .unwrap();
        let bad = run(Command::SetAutoFem {
            nvs: nvs.clone(),
            value: "zz".into(),
        });

        let patched = read_nvs(&nvs).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(matches!(bad, Err(CalError::InvalidHex(_))));
        assert_eq!(patched.ini.auto_fem_detect(), 1);
        assert_eq!(patched.ini.fem_manufacturer(), 1);
        assert_eq!(patched.mac().to_string(), "aa:bb:cc:dd:ee:ff");
    }
}
