//! Device context: all mutable probe state in one place.

use crate::dap::{DapCommandProcessor, ReportRelay};
use crate::serial::{SerialNumber, UNIQUE_ID_LEN};
use crate::usb::descriptors;
use crate::usb::strings::{StringDescriptorBuffer, StringTable};

/// Owns every piece of state the USB callbacks touch: the string table
/// (serial number included), the string scratch buffer, the report
/// relay, the command processor, and the measured core clock.
///
/// Single-writer by construction: mutated during [`initialize`] and
/// afterwards driven only from the one USB polling context, so none of
/// it needs locking.
///
/// [`initialize`]: DeviceContext::initialize
pub struct DeviceContext<P> {
    processor: P,
    relay: ReportRelay,
    strings: StringTable,
    scratch: StringDescriptorBuffer,
    cpu_hz: u32,
}

impl<P: DapCommandProcessor> DeviceContext<P> {
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            relay: ReportRelay::new(),
            strings: StringTable::new(),
            scratch: StringDescriptorBuffer::new(),
            cpu_hz: 0,
        }
    }

    /// One-time startup: derive the serial number from the hardware ID,
    /// record the measured core clock, and let the processor set itself
    /// up. Must complete before the device is handed to the USB stack,
    /// so host requests never observe a half-initialised serial.
    pub fn initialize(&mut self, hardware_id: &[u8; UNIQUE_ID_LEN], cpu_hz: u32) {
        self.strings
            .set_serial(SerialNumber::from_hardware_id(hardware_id));
        self.cpu_hz = cpu_hz;
        self.processor.setup();
    }

    /// Measured system clock, for diagnostics.
    pub fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }

    pub fn serial_number(&self) -> &str {
        self.strings.serial()
    }

    // USB callback surface

    pub fn device_descriptor(&self) -> &'static [u8] {
        &descriptors::DEVICE_DESCRIPTOR
    }

    /// Only one configuration exists; the index is accepted for hosts
    /// that probe further and ignored.
    pub fn configuration_descriptor(&self, _index: u8) -> &'static [u8] {
        &descriptors::CONFIGURATION_DESCRIPTOR
    }

    pub fn hid_report_descriptor(&self) -> &'static [u8] {
        &descriptors::HID_REPORT_DESCRIPTOR
    }

    /// Synthesise the string descriptor for `index` into the shared
    /// scratch buffer. `None` for unknown indices.
    pub fn string_descriptor(&mut self, index: u8, langid: u16) -> Option<&[u16]> {
        self.scratch.synthesize(&self.strings, index, langid)
    }

    /// GET_REPORT is not implemented; zero length tells the stack to
    /// stall the request.
    pub fn get_report(&mut self, _buffer: &mut [u8], _reqlen: usize) -> usize {
        0
    }

    /// SET_REPORT: run the command through the processor and return the
    /// response to transmit as the next input report.
    pub fn set_report(&mut self, data: &[u8]) -> &[u8] {
        self.relay.relay(&mut self.processor, data)
    }
}
