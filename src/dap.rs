//! Bridge between HID reports and the debug-probe command processor.
//!
//! The probe engine itself lives behind [`DapCommandProcessor`]; this
//! module only moves bytes: one output report in, one command processed,
//! one input report back.

use crate::config;

/// One debug-probe packet per HID report.
pub const PACKET_SIZE: usize = config::REPORT_SIZE;

/// Response ID a probe returns for a command it does not recognise.
pub const DAP_RESPONSE_INVALID: u8 = 0xFF;

/// Debug-probe command processor.
///
/// Receives one raw command packet per call and must fill the response
/// buffer before returning. Length framing is part of the command
/// protocol itself, so the transport hands the full buffer back to the
/// host rather than second-guessing the used length.
pub trait DapCommandProcessor {
    /// One-time hardware/protocol setup, called before USB enumeration.
    fn setup(&mut self) {}

    /// Process a single command packet into `response`.
    fn process_command(&mut self, request: &[u8], response: &mut [u8; PACKET_SIZE]);
}

/// Relays HID output reports to the processor and hands back the bytes
/// to transmit as the next input report.
///
/// Owns the single response buffer. The relay runs only on the USB
/// polling context, one report at a time, so the buffer needs no lock;
/// its contents are valid only until the next report arrives.
pub struct ReportRelay {
    response: [u8; PACKET_SIZE],
}

impl ReportRelay {
    pub const fn new() -> Self {
        Self {
            response: [0; PACKET_SIZE],
        }
    }

    /// Feed one incoming report through `processor`.
    ///
    /// The returned slice is pinned to `min(PACKET_SIZE, request.len())`
    /// bytes; a processor whose real output is shorter still gets a
    /// full-length frame on the wire.
    pub fn relay<'a, P: DapCommandProcessor>(
        &'a mut self,
        processor: &mut P,
        request: &[u8],
    ) -> &'a [u8] {
        let len = request.len().min(PACKET_SIZE);
        processor.process_command(request, &mut self.response);
        &self.response[..len]
    }
}

impl Default for ReportRelay {
    fn default() -> Self {
        Self::new()
    }
}

/// Stand-in processor that rejects every command.
///
/// Keeps the transport enumerable and testable while the probe engine
/// proper is developed out of tree; hosts see the invalid-command
/// marker in response to anything they send.
pub struct NullProbe;

impl DapCommandProcessor for NullProbe {
    fn process_command(&mut self, _request: &[u8], response: &mut [u8; PACKET_SIZE]) {
        response[0] = DAP_RESPONSE_INVALID;
    }
}
