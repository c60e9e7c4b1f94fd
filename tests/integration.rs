//! Integration tests for the host-testable probe transport.

use std::sync::atomic::{AtomicUsize, Ordering};

use pico_dap::dap::{DapCommandProcessor, PACKET_SIZE};
use pico_dap::device::DeviceContext;
use pico_dap::usb::strings::{STRID_LANGID, STRID_MANUFACTURER, STRID_PRODUCT, STRID_SERIAL};

static SETUP_CALLS: AtomicUsize = AtomicUsize::new(0);

/// Probe double that records setup and answers with a fixed status frame.
struct ScriptedProbe;

impl DapCommandProcessor for ScriptedProbe {
    fn setup(&mut self) {
        SETUP_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn process_command(&mut self, request: &[u8], response: &mut [u8; PACKET_SIZE]) {
        response[0] = request[0]; // echo command ID
        response[1] = 0x00; // status OK
    }
}

#[test]
fn startup_enumeration_and_command_round_trip() {
    let mut ctx = DeviceContext::new(ScriptedProbe);
    ctx.initialize(&[0x1A, 0x00, 0xFF, 0x02, 0x03, 0x04, 0x05, 0x06], 125_000_000);

    assert_eq!(SETUP_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.serial_number(), "1A00FF0203040506");
    assert_eq!(ctx.cpu_hz(), 125_000_000);

    // Host fetches the descriptor set.
    assert_eq!(ctx.device_descriptor().len(), 18);
    assert_eq!(ctx.configuration_descriptor(0), ctx.configuration_descriptor(1));
    assert!(!ctx.hid_report_descriptor().is_empty());
    for index in [STRID_LANGID, STRID_PRODUCT, STRID_MANUFACTURER, STRID_SERIAL] {
        assert!(ctx.string_descriptor(index, 0x0409).is_some());
    }

    // First command exchange.
    let mut request = [0u8; PACKET_SIZE];
    request[0] = 0x02; // connect
    let response = ctx.set_report(&request);
    assert_eq!(response.len(), PACKET_SIZE);
    assert_eq!(response[0], 0x02);
    assert_eq!(response[1], 0x00);
}

/// Probe double with no setup bookkeeping.
struct QuietProbe;

impl DapCommandProcessor for QuietProbe {
    fn process_command(&mut self, _request: &[u8], response: &mut [u8; PACKET_SIZE]) {
        response[0] = 0x00;
    }
}

#[test]
fn string_descriptors_follow_usb_wire_format() {
    let mut ctx = DeviceContext::new(QuietProbe);
    ctx.initialize(&[0; 8], 125_000_000);

    let desc = ctx.string_descriptor(STRID_PRODUCT, 0x0409).unwrap();
    assert_eq!(desc[0] >> 8, 0x03); // string descriptor type
    assert_eq!((desc[0] & 0x00FF) as usize, 2 * desc.len());

    let text: String = desc[1..].iter().map(|&u| char::from(u as u8)).collect();
    assert_eq!(text, "CMSIS-DAP");
}
