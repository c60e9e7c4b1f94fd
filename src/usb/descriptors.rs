//! USB descriptor tables.
//!
//! Built once at compile time by `const fn` builders and immutable
//! thereafter. Byte layouts follow USB 2.0 §9.6 and HID 1.11 §6.2; every
//! descriptor opens with its own length followed by its type code, and
//! multi-byte fields are little-endian.

use crate::config;

// Descriptor type codes.
pub const DESC_TYPE_DEVICE: u8 = 0x01;
pub const DESC_TYPE_CONFIGURATION: u8 = 0x02;
pub const DESC_TYPE_STRING: u8 = 0x03;
pub const DESC_TYPE_INTERFACE: u8 = 0x04;
pub const DESC_TYPE_ENDPOINT: u8 = 0x05;
pub const DESC_TYPE_HID: u8 = 0x21;
pub const DESC_TYPE_HID_REPORT: u8 = 0x22;

const CLASS_HID: u8 = 0x03;
const TRANSFER_INTERRUPT: u8 = 0x03;
const ATTR_BUS_POWERED: u8 = 0x80;
const ATTR_REMOTE_WAKEUP: u8 = 0x20;

/// Endpoint number used by the probe interface.
const EP_NUM: u8 = 0x01;
pub const EP_OUT_ADDR: u8 = EP_NUM;
pub const EP_IN_ADDR: u8 = 0x80 | EP_NUM;

// String table indices referenced by the device descriptor live in
// `usb::strings`.
use super::strings::{STRID_MANUFACTURER, STRID_PRODUCT, STRID_SERIAL};

/// Device descriptor: USB 2.0, class deferred to the interface, one
/// configuration.
pub const DEVICE_DESCRIPTOR: [u8; 18] = device_descriptor();

const fn device_descriptor() -> [u8; 18] {
    let vid = config::USB_VID.to_le_bytes();
    let pid = config::usb_pid().to_le_bytes();
    let release = config::USB_DEVICE_RELEASE.to_le_bytes();
    [
        18,                       // bLength
        DESC_TYPE_DEVICE,         // bDescriptorType
        0x00, 0x02,               // bcdUSB 2.00
        0x00,                     // bDeviceClass (per interface)
        0x00,                     // bDeviceSubClass
        0x00,                     // bDeviceProtocol
        config::USB_EP0_MAX_PACKET, // bMaxPacketSize0
        vid[0], vid[1],           // idVendor
        pid[0], pid[1],           // idProduct
        release[0], release[1],   // bcdDevice
        STRID_MANUFACTURER,       // iManufacturer
        STRID_PRODUCT,            // iProduct
        STRID_SERIAL,             // iSerialNumber
        0x01,                     // bNumConfigurations
    ]
}

/// HID report descriptor: one vendor-defined report, input and output,
/// `REPORT_SIZE` bytes each way, no report IDs.
pub const HID_REPORT_DESCRIPTOR: [u8; 34] = hid_report_descriptor(config::REPORT_SIZE as u8);

const fn hid_report_descriptor(report_size: u8) -> [u8; 34] {
    [
        0x06, 0x00, 0xFF, // Usage Page (Vendor Defined 0xFF00)
        0x09, 0x01,       // Usage (0x01)
        0xA1, 0x01,       // Collection (Application)
        //
        //   - Input report -
        0x09, 0x02,       //   Usage (0x02)
        0x15, 0x00,       //   Logical Minimum (0)
        0x26, 0xFF, 0x00, //   Logical Maximum (255)
        0x75, 0x08,       //   Report Size (8)
        0x95, report_size, //  Report Count
        0x81, 0x02,       //   Input (Data, Variable, Absolute)
        //
        //   - Output report -
        0x09, 0x03,       //   Usage (0x03)
        0x15, 0x00,       //   Logical Minimum (0)
        0x26, 0xFF, 0x00, //   Logical Maximum (255)
        0x75, 0x08,       //   Report Size (8)
        0x95, report_size, //  Report Count
        0x91, 0x02,       //   Output (Data, Variable, Absolute)
        //
        0xC0, // End Collection
    ]
}

const CONFIG_DESC_LEN: usize = 9;
const INTERFACE_DESC_LEN: usize = 9;
const HID_DESC_LEN: usize = 9;
const ENDPOINT_DESC_LEN: usize = 7;
const CONFIG_TOTAL_LEN: usize =
    CONFIG_DESC_LEN + INTERFACE_DESC_LEN + HID_DESC_LEN + 2 * ENDPOINT_DESC_LEN;

/// Configuration descriptor: one HID interface with an interrupt
/// IN/OUT endpoint pair, remote wakeup, 100 mA.
pub const CONFIGURATION_DESCRIPTOR: [u8; CONFIG_TOTAL_LEN] = configuration_descriptor();

const fn configuration_descriptor() -> [u8; CONFIG_TOTAL_LEN] {
    let total = (CONFIG_TOTAL_LEN as u16).to_le_bytes();
    let report_len = (HID_REPORT_DESCRIPTOR.len() as u16).to_le_bytes();
    let ep_size = (config::REPORT_SIZE as u16).to_le_bytes();
    [
        // Configuration
        CONFIG_DESC_LEN as u8,    // bLength
        DESC_TYPE_CONFIGURATION,  // bDescriptorType
        total[0], total[1],       // wTotalLength
        0x01,                     // bNumInterfaces
        0x01,                     // bConfigurationValue
        0x00,                     // iConfiguration
        ATTR_BUS_POWERED | ATTR_REMOTE_WAKEUP, // bmAttributes
        (config::USB_MAX_POWER_MA / 2) as u8,  // bMaxPower (2 mA units)
        // Interface
        INTERFACE_DESC_LEN as u8, // bLength
        DESC_TYPE_INTERFACE,      // bDescriptorType
        0x00,                     // bInterfaceNumber
        0x00,                     // bAlternateSetting
        0x02,                     // bNumEndpoints
        CLASS_HID,                // bInterfaceClass
        0x00,                     // bInterfaceSubClass (no boot protocol)
        0x00,                     // bInterfaceProtocol
        0x00,                     // iInterface
        // HID class
        HID_DESC_LEN as u8,       // bLength
        DESC_TYPE_HID,            // bDescriptorType
        0x11, 0x01,               // bcdHID 1.11
        0x00,                     // bCountryCode
        0x01,                     // bNumDescriptors
        DESC_TYPE_HID_REPORT,     // bDescriptorType (report)
        report_len[0], report_len[1], // wDescriptorLength
        // Endpoint OUT
        ENDPOINT_DESC_LEN as u8,
        DESC_TYPE_ENDPOINT,
        EP_OUT_ADDR,
        TRANSFER_INTERRUPT,
        ep_size[0], ep_size[1],
        config::USB_HID_POLL_MS,
        // Endpoint IN
        ENDPOINT_DESC_LEN as u8,
        DESC_TYPE_ENDPOINT,
        EP_IN_ADDR,
        TRANSFER_INTERRUPT,
        ep_size[0], ep_size[1],
        config::USB_HID_POLL_MS,
    ]
}
