//! The NVS section: burst header followed by TLV-encoded calibration data.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use wl12xx_core::NVS_SECTION_SIZE;

// ─── Layout constants ───────────────────────────────────────────────────────

/// Burst header: two register writes carrying the MAC address.
pub const NVS_BURST_HEADER_LENGTH: usize = 14;
pub const NVS_END_BURST_TRANSACTION_LENGTH: usize = 7;
pub const NVS_ALIGN_TLV_START_ADDRESS_LENGTH: usize = 3;
/// Offset of the first TLV.
pub const NVS_TLV_START: usize =
    NVS_BURST_HEADER_LENGTH + NVS_END_BURST_TRANSACTION_LENGTH + NVS_ALIGN_TLV_START_ADDRESS_LENGTH;
/// Type byte plus little-endian 16-bit length.
pub const TLV_HEADER_LENGTH: usize = 3;
pub const NVS_TX_PARAM_LENGTH: u16 = 409;
pub const NVS_RX_PARAM_LENGTH: u16 = 19;
pub const NVS_VERSION_PARAMETER_LENGTH: u16 = 3;

/// Placeholder MAC written into freshly created blobs.
pub const DEFAULT_MAC: [u8; 6] = [0x0b, 0xad, 0xde, 0xad, 0xbe, 0xef];
const DEFAULT_EFUSE_VALUE: u8 = 0;

/// TLV tags found in the NVS section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TlvType {
    RadioTxParameters = 0x01,
    RadioRxParameters = 0x02,
    Version = 0xaa,
    Last = 0xff,
}

impl TlvType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(Self::RadioTxParameters),
            0x02 => Some(Self::RadioRxParameters),
            0xaa => Some(Self::Version),
            0xff => Some(Self::Last),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub kind: TlvType,
    pub data: &'a [u8],
}

/// Build a default NVS section: placeholder MAC, zeroed TX/RX calibration,
/// version 0.0.0.
pub fn default_nvs_section() -> Vec<u8> {
    let mut buf = Vec::with_capacity(NVS_SECTION_SIZE);
    let m = DEFAULT_MAC;

    buf.extend_from_slice(&[0x01, 0x6d, 0x54, m[5], m[4], m[3], m[2]]);
    buf.extend_from_slice(&[0x01, 0x71, 0x54, m[1], m[0], 0x00, 0x00]);
    buf.resize(NVS_TLV_START, 0);

    push_tlv(&mut buf, TlvType::RadioTxParameters, NVS_TX_PARAM_LENGTH, 0);
    push_tlv(&mut buf, TlvType::RadioRxParameters, NVS_RX_PARAM_LENGTH, DEFAULT_EFUSE_VALUE);
    push_tlv(&mut buf, TlvType::Version, NVS_VERSION_PARAMETER_LENGTH, 0);

    buf.extend_from_slice(&[TlvType::Last as u8, TlvType::Last as u8, 0x00, 0x00]);
    buf
}

fn push_tlv(buf: &mut Vec<u8>, kind: TlvType, len: u16, fill: u8) {
    buf.push(kind as u8);
    // Writing into a Vec cannot fail.
    let _ = buf.write_u16::<LittleEndian>(len);
    buf.resize(buf.len() + len as usize, fill);
}

/// Walk the TLVs of an NVS section up to the end tag or the first unknown tag.
pub fn parse_tlvs(section: &[u8]) -> Vec<Tlv<'_>> {
    let mut tlvs = Vec::new();
    let mut idx = NVS_TLV_START;

    while idx + TLV_HEADER_LENGTH <= section.len() {
        let kind = match TlvType::from_u8(section[idx]) {
            Some(TlvType::Last) | None => break,
            Some(kind) => kind,
        };
        let len = LittleEndian::read_u16(&section[idx + 1..idx + 3]) as usize;
        let start = idx + TLV_HEADER_LENGTH;
        let end = (start + len).min(section.len());
        tlvs.push(Tlv {
            kind,
            data: &section[start..end],
        });
        idx = start + len;
    }
    tlvs
}

/// NVS version from the version TLV, most significant byte first.
pub fn nvs_version(section: &[u8]) -> Option<u32> {
    parse_tlvs(section)
        .into_iter()
        .find(|tlv| tlv.kind == TlvType::Version)
        .map(|tlv| tlv.data.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// Render a version as `major.minor.patch`.
pub fn format_version(version: u32) -> String {
    format!(
        "{}.{}.{}",
        (version >> 16) & 0xff,
        (version >> 8) & 0xff,
        version & 0xff
    )
}
