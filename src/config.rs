//! Application-wide constants and compile-time configuration.
//!
//! All USB identity values, buffer sizes, and timing parameters live
//! here so they can be tuned in one place.

// USB identity

/// USB vendor ID.
pub const USB_VID: u16 = 0xCAFE;

// Interface classes folded into the product ID bitmap. Only the HID
// transport is built in; the others are listed so the PID stays stable
// if a CDC console or vendor interface is ever added.
const ITF_CDC: bool = false;
const ITF_MSC: bool = false;
const ITF_HID: bool = true;
const ITF_MIDI: bool = false;
const ITF_VENDOR: bool = false;

/// USB product ID: 0x4000 base with one bit per enabled interface
/// class, so each interface combination enumerates with a distinct PID.
pub const fn usb_pid() -> u16 {
    0x4000
        | (ITF_CDC as u16)
        | ((ITF_MSC as u16) << 1)
        | ((ITF_HID as u16) << 2)
        | ((ITF_MIDI as u16) << 3)
        | ((ITF_VENDOR as u16) << 4)
}

/// USB device strings.
pub const USB_MANUFACTURER: &str = "pico-debug";
pub const USB_PRODUCT: &str = "CMSIS-DAP";

/// Device release number (bcdDevice).
pub const USB_DEVICE_RELEASE: u16 = 0x0100;

/// Supported string-descriptor language: US English.
pub const USB_LANGID_EN_US: u16 = 0x0409;

/// Endpoint 0 max packet size.
pub const USB_EP0_MAX_PACKET: u8 = 64;

/// Configured max power draw (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

/// USB HID polling interval (ms). 1 ms keeps probe round-trip latency
/// at the bus minimum.
pub const USB_HID_POLL_MS: u8 = 1;

// HID transport

/// HID report payload size; one debug-probe packet per report.
pub const REPORT_SIZE: usize = 64;

/// Longest string a string descriptor can carry (code units).
pub const MAX_STRING_CHARS: usize = 31;
