//! Complete NVS blobs: NVS section plus packed radio parameters.

use std::fs;
use std::path::Path;

use wl12xx_core::{Arch, IniRecord, NVS_SECTION_SIZE};
use wl12xx_ini::{nvs_get_arch, read_ini, render_ini, CommonContext, IniError};

use crate::error::NvsError;
use crate::mac::{read_mac, write_mac, MacAddr};
use crate::section::{default_nvs_section, format_version, nvs_version, parse_tlvs, Tlv};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NvsFile {
    section: Vec<u8>,
    pub ini: IniRecord,
}

impl NvsFile {
    /// A new blob with a default NVS section.
    pub fn new_default(ini: IniRecord) -> Self {
        Self {
            section: default_nvs_section(),
            ini,
        }
    }

    /// A new blob reusing the NVS section of an existing one.
    pub fn with_reference(reference: &[u8], ini: IniRecord) -> Result<Self, NvsError> {
        if reference.len() < NVS_SECTION_SIZE {
            return Err(NvsError::TooShort(reference.len()));
        }
        Ok(Self {
            section: reference[..NVS_SECTION_SIZE].to_vec(),
            ini,
        })
    }

    /// Parse the calibration INI file at `ini` into a blob. With `reference`,
    /// the NVS section of that existing blob is kept.
    pub fn from_ini<P: AsRef<Path>>(ini: P, reference: Option<&Path>) -> Result<Self, NvsError> {
        let mut ctx = CommonContext::new();
        read_ini(ini, &mut ctx)?;
        let record = ctx.into_record().ok_or(IniError::ArchitectureUnresolved)?;
        match reference {
            Some(path) => Self::with_reference(&read_nvs_bytes(path)?, record),
            None => Ok(Self::new_default(record)),
        }
    }

    /// Decode a blob; the architecture follows from its size.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NvsError> {
        let mut ctx = CommonContext::new();
        let arch = nvs_get_arch(bytes.len(), &mut ctx)?;
        let mut radio = &bytes[NVS_SECTION_SIZE..];
        Ok(Self {
            section: bytes[..NVS_SECTION_SIZE].to_vec(),
            ini: IniRecord::read_from(arch, &mut radio)?,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size());
        buf.extend_from_slice(&self.section);
        // Writing into a Vec cannot fail.
        let _ = self.ini.write_to(&mut buf);
        buf
    }

    pub fn arch(&self) -> Arch {
        self.ini.arch()
    }

    pub fn size(&self) -> usize {
        NVS_SECTION_SIZE + self.ini.packed_size()
    }

    pub fn section(&self) -> &[u8] {
        &self.section
    }

    pub fn mac(&self) -> MacAddr {
        read_mac(&self.section)
    }

    pub fn set_mac(&mut self, mac: MacAddr) {
        write_mac(&mut self.section, mac);
    }

    pub fn tlvs(&self) -> Vec<Tlv<'_>> {
        parse_tlvs(&self.section)
    }

    pub fn version(&self) -> Option<u32> {
        nvs_version(&self.section)
    }

    pub fn set_auto_fem(&mut self, value: u8) {
        self.ini.set_auto_fem_detect(value);
    }

    pub fn set_fem_manufacturer(&mut self, value: u8) {
        self.ini.set_fem_manufacturer(value);
    }

    /// Human-readable summary followed by the radio parameters as INI text.
    pub fn info(&self) -> Result<String, NvsError> {
        let mut text = String::new();
        if let Some(version) = self.version() {
            text.push_str(&format!("#NVS version {}\n", format_version(version)));
        }
        text.push_str(&format!("#MAC address {}\n", self.mac()));
        for tlv in self.tlvs() {
            text.push_str(&format!(
                "#TLV {:02x} ({} bytes)\n",
                tlv.kind as u8,
                tlv.data.len()
            ));
        }
        text.push_str(&render_ini(&self.ini)?);
        Ok(text)
    }
}

pub fn read_nvs_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, NvsError> {
    Ok(fs::read(path.as_ref())?)
}

pub fn read_nvs<P: AsRef<Path>>(path: P) -> Result<NvsFile, NvsError> {
    NvsFile::from_bytes(&read_nvs_bytes(path)?)
}

pub fn write_nvs<P: AsRef<Path>>(path: P, nvs: &NvsFile) -> Result<(), NvsError> {
    fs::write(path.as_ref(), nvs.to_bytes())?;
    Ok(())
}

/// Read the blob at `path`, apply `edit` and write it back in place.
pub fn modify_nvs<P, F>(path: P, edit: F) -> Result<NvsFile, NvsError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut NvsFile),
{
    let path = path.as_ref();
    let mut nvs = read_nvs(path)?;
    edit(&mut nvs);
    write_nvs(path, &nvs)?;
    log::info!("Updated {} ({} bytes)", path.display(), nvs.size());
    Ok(nvs)
}
