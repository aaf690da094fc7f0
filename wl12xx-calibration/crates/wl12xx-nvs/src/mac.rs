//! MAC address handling in the NVS burst header.

use std::fmt;

use crate::error::NvsError;

/// Byte offsets in the burst header holding mac[0]..mac[5].
const MAC_OFFSETS: [usize; 6] = [11, 10, 6, 5, 4, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// True when the NIC part cannot provide a second consecutive address.
    pub fn nic_wraps(&self) -> bool {
        let m = self.0;
        let lower = (m[3] as u32) << 16 | (m[4] as u32) << 8 | m[5] as u32;
        lower == 0xff_ffff
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

/// Parse `aa:bb:cc:dd:ee:ff` (one or two hex digits per octet).
pub fn parse_mac(text: &str) -> Result<MacAddr, NvsError> {
    let invalid = || NvsError::InvalidMac(text.to_string());
    let mut mac = [0u8; 6];
    let mut parts = text.trim().split(':');
    for octet in mac.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(MacAddr(mac))
}

/// Read the MAC address stored in an NVS section.
pub fn read_mac(section: &[u8]) -> MacAddr {
    let mut mac = [0u8; 6];
    for (octet, &offset) in mac.iter_mut().zip(MAC_OFFSETS.iter()) {
        *octet = section.get(offset).copied().unwrap_or_default();
    }
    MacAddr(mac)
}

/// Store `mac` into an NVS section's burst header.
pub fn write_mac(section: &mut [u8], mac: MacAddr) {
    if mac.nic_wraps() {
        log::warn!("NIC part of the MAC address wraps around!");
    }
    for (&octet, &offset) in mac.0.iter().zip(MAC_OFFSETS.iter()) {
        if let Some(slot) = section.get_mut(offset) {
            *slot = octet;
        }
    }
}
