//! Embassy USB glue for the RP2040.
//!
//! Brings up the HID device on the hardware USB controller and services
//! it forever from a single task. Command reports arrive on the
//! interrupt OUT endpoint, go through the relay, and the response is
//! written back on the interrupt IN endpoint.

use defmt::{info, warn};
use embassy_futures::join::join;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::{FLASH, USB};
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_time::Timer;
use embassy_usb::class::hid::{
    Config as HidConfig, HidReaderWriter, ReadError, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, Handler};
use static_cell::StaticCell;

use crate::config;
use crate::dap::NullProbe;
use crate::device::DeviceContext;
use crate::serial::{SerialNumber, UNIQUE_ID_LEN};
use crate::usb::descriptors;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// External QSPI flash size (Pico reference board).
const FLASH_SIZE: usize = 2 * 1024 * 1024;

static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static HID_STATE: StaticCell<State> = StaticCell::new();
static SERIAL: StaticCell<SerialNumber> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<ProbeRequestHandler> = StaticCell::new();
static BUS_HANDLER: StaticCell<BusEventHandler> = StaticCell::new();

/// HID class control requests.
struct ProbeRequestHandler;

impl RequestHandler for ProbeRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        // Not implemented; the stack stalls the request.
        warn!("GET_REPORT rejected");
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        // Commands travel over the interrupt OUT endpoint; control-pipe
        // reports are acknowledged and dropped.
        warn!("SET_REPORT on control pipe ignored");
        OutResponse::Accepted
    }
}

/// Logs bus-level state changes.
struct BusEventHandler;

impl Handler for BusEventHandler {
    fn enabled(&mut self, enabled: bool) {
        info!("usb: enabled={}", enabled);
    }

    fn configured(&mut self, configured: bool) {
        info!("usb: configured={}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        info!("usb: suspended={}", suspended);
    }
}

/// Probe worker: derive the board identity, bring up the USB device and
/// service it forever. Owns core 1 exclusively; never returns.
#[embassy_executor::task]
pub async fn probe_task(usb: USB, flash: FLASH) {
    let cpu_hz = clk_sys_freq();

    // The flash unique ID is the only serial source; a board that
    // cannot read it must not enumerate.
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    let mut hardware_id = [0u8; UNIQUE_ID_LEN];
    defmt::unwrap!(flash.blocking_unique_id(&mut hardware_id));

    let mut ctx = DeviceContext::new(NullProbe);
    ctx.initialize(&hardware_id, cpu_hz);
    info!("clk_sys {} Hz, serial {}", ctx.cpu_hz(), ctx.serial_number());

    let serial = SERIAL.init(SerialNumber::from_hardware_id(&hardware_id));

    let driver = Driver::new(usb, Irqs);

    let mut usb_config = Config::new(config::USB_VID, config::usb_pid());
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(serial.as_str());
    usb_config.device_release = config::USB_DEVICE_RELEASE;
    usb_config.max_packet_size_0 = config::USB_EP0_MAX_PACKET;
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.supports_remote_wakeup = true;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        MSOS_DESC.init([0; 256]),
        CTRL_BUF.init([0; 128]),
    );

    builder.handler(BUS_HANDLER.init(BusEventHandler));

    let hid_config = HidConfig {
        report_descriptor: &descriptors::HID_REPORT_DESCRIPTOR,
        request_handler: Some(REQUEST_HANDLER.init(ProbeRequestHandler)),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: config::REPORT_SIZE as u16,
    };
    let hid = HidReaderWriter::<_, { config::REPORT_SIZE }, { config::REPORT_SIZE }>::new(
        &mut builder,
        HID_STATE.init(State::new()),
        hid_config,
    );

    let mut usb_device = builder.build();
    let (mut reader, mut writer) = hid.split();

    let relay = async {
        let mut request = [0u8; config::REPORT_SIZE];
        loop {
            match reader.read(&mut request).await {
                Ok(len) => {
                    let response = ctx.set_report(&request[..len]);
                    if writer.write(response).await.is_err() {
                        warn!("response dropped: endpoint disabled");
                    }
                }
                Err(ReadError::Disabled) => Timer::after_millis(10).await,
                Err(_) => warn!("malformed output report discarded"),
            }
        }
    };

    join(usb_device.run(), relay).await;
}
