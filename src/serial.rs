//! Board serial number derived from the hardware unique ID.
//!
//! The RP2040 has no on-die serial; the 64-bit unique ID of the QSPI
//! flash serves instead. It is rendered once at startup as 16 uppercase
//! hex digits and patched into the string table before enumeration, so
//! every board enumerates with a stable, distinct serial.

use heapless::String;

/// Number of bytes in the hardware unique identifier.
pub const UNIQUE_ID_LEN: usize = 8;

/// Serial number length: two hex digits per identifier byte.
pub const SERIAL_LEN: usize = 2 * UNIQUE_ID_LEN;

/// USB serial number string (16 uppercase hex digits).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialNumber(String<SERIAL_LEN>);

impl SerialNumber {
    /// All-zero-digit placeholder used until the hardware ID is read.
    pub fn placeholder() -> Self {
        let mut s = String::new();
        for _ in 0..SERIAL_LEN {
            let _ = s.push('0');
        }
        Self(s)
    }

    /// Render the 8-byte hardware ID as hex, two digits per byte, in
    /// order. Deterministic; same ID always yields the same serial.
    pub fn from_hardware_id(id: &[u8; UNIQUE_ID_LEN]) -> Self {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        let mut s = String::new();
        for &byte in id {
            let _ = s.push(HEX[(byte >> 4) as usize] as char);
            let _ = s.push(HEX[(byte & 0x0F) as usize] as char);
        }
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for SerialNumber {
    fn default() -> Self {
        Self::placeholder()
    }
}
