//! USB string descriptor table and synthesis.
//!
//! The table holds four logical entries: the language-ID pseudo-string,
//! product, manufacturer, and serial number. Only the serial entry is
//! mutable, patched exactly once before enumeration starts. Descriptors
//! are synthesised on demand into a shared scratch buffer.

use crate::config;
use crate::serial::SerialNumber;
use crate::usb::descriptors::DESC_TYPE_STRING;

// String descriptor indices as referenced by the device descriptor.
pub const STRID_LANGID: u8 = 0;
pub const STRID_PRODUCT: u8 = 1;
pub const STRID_MANUFACTURER: u8 = 2;
pub const STRID_SERIAL: u8 = 3;

/// Number of entries in the string table.
pub const STRING_COUNT: u8 = 4;

/// Logical string table.
pub struct StringTable {
    serial: SerialNumber,
}

impl StringTable {
    pub fn new() -> Self {
        Self {
            serial: SerialNumber::placeholder(),
        }
    }

    /// Patch the serial entry. Happens once, before the polling loop
    /// starts servicing host requests.
    pub fn set_serial(&mut self, serial: SerialNumber) {
        self.serial = serial;
    }

    pub fn serial(&self) -> &str {
        self.serial.as_str()
    }

    fn entry(&self, index: u8) -> Option<&str> {
        match index {
            STRID_PRODUCT => Some(config::USB_PRODUCT),
            STRID_MANUFACTURER => Some(config::USB_MANUFACTURER),
            STRID_SERIAL => Some(self.serial.as_str()),
            // Unknown index, including the 0xEE Microsoft OS descriptor
            // probe: absent, which the stack answers with a stall.
            _ => None,
        }
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Scratch buffer a string descriptor is synthesised into.
///
/// Reused for every request: the returned slice is overwritten by the
/// next call, so it must be consumed before another request is issued.
/// The stack consumes descriptors synchronously, which makes the single
/// buffer safe.
pub struct StringDescriptorBuffer {
    units: [u16; config::MAX_STRING_CHARS + 1],
}

impl StringDescriptorBuffer {
    pub const fn new() -> Self {
        Self {
            units: [0; config::MAX_STRING_CHARS + 1],
        }
    }

    /// Build the descriptor for `index`.
    ///
    /// Index 0 always carries the supported-language pair; the language
    /// requested by the host is accepted but ignored.
    pub fn synthesize(
        &mut self,
        table: &StringTable,
        index: u8,
        _langid: u16,
    ) -> Option<&[u16]> {
        if index == STRID_LANGID {
            self.units[1] = config::USB_LANGID_EN_US;
            self.units[0] = header(1);
            Some(&self.units[..2])
        } else {
            let s = table.entry(index)?;
            Some(self.encode(s))
        }
    }

    /// Encode an ASCII string into descriptor layout: header code unit,
    /// then one zero-extended byte per character. Strings longer than
    /// the buffer are silently truncated.
    pub fn encode(&mut self, s: &str) -> &[u16] {
        let n = s.len().min(config::MAX_STRING_CHARS);
        for (i, byte) in s.bytes().take(n).enumerate() {
            self.units[1 + i] = u16::from(byte);
        }
        self.units[0] = header(n);
        &self.units[..n + 1]
    }
}

impl Default for StringDescriptorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptor header: total byte length (including the header itself)
/// in the low byte, descriptor type in the high byte.
fn header(chr_count: usize) -> u16 {
    (u16::from(DESC_TYPE_STRING) << 8) | (2 * chr_count as u16 + 2)
}
