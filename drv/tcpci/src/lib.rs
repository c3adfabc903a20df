// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type-C Port Manager driver for TCPCI-compliant port controllers.
//!
//! This crate sits between a USB-PD protocol task and one or more TCPC
//! chips reached over I2C, translating PD-stack requests (read the CC
//! lines, set pulls, transmit a message, service an alert) into the TCPCI
//! register protocol. It works with both the 1.0 and 2.0 revisions of the
//! register interface; the revision is a per-port flag because boards mix
//! chips.
//!
//! # Contexts
//!
//! Two execution contexts touch a port: the PD task, which calls the
//! operations in [`TcpmDriver`], and the alert path, which services the
//! chip's interrupt line and may run in interrupt context if the bus driver
//! allows I2C there. The only data structure shared between the two is the
//! per-port receive queue (see [`queue`]); everything else the alert path
//! touches is either chip registers or the VBUS shadow bit.
//!
//! # Collaborators
//!
//! The actual bus, the low-power coordinator, and the PD stack proper are
//! reached through the [`TcpcBus`] and [`PdStack`] traits, so the driver
//! itself stays portable across boards and schedulers. Chip-specific
//! drivers (for controllers with vendor quirks) wrap [`Tcpci`] and
//! substitute individual operations, using the public register helpers and
//! cached-state accessors here for the rest.

#![cfg_attr(not(test), no_std)]

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU16, AtomicU8, Ordering};

use bitflags::bitflags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

pub mod mux;
pub mod queue;
pub mod registers;

mod alert;
mod ops;

#[cfg(test)]
mod testutil;

pub use queue::{Message, MAX_DATA_OBJECTS, MAX_PAYLOAD_BYTES, RX_QUEUE_DEPTH};

use registers::Register;

/// Errors surfaced to the PD stack. The stack treats these as opaque
/// failure codes; the distinctions exist for debugging.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u32)]
pub enum Error {
    /// Bad argument from the caller (e.g. undersized payload).
    Param = 1,
    /// Port index out of range.
    Inval = 2,
    /// Initialization wait exhausted.
    Timeout = 3,
    /// Bus failure or framing-size violation.
    Unknown = 4,
    /// Receive queue full.
    Overflow = 5,
    /// Receive queue empty.
    Busy = 6,
    /// Write to a protected region refused.
    AccessDenied = 7,
}

/// Rp current advertisement, in ROLE_CONTROL encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum RpValue {
    Usb = 0,
    Rp1A5 = 1,
    Rp3A0 = 2,
}

/// CC line pull selection, in ROLE_CONTROL encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum CcPull {
    Ra = 0,
    Rp = 1,
    Rd = 2,
    Open = 3,
}

/// Voltage status of one CC line as reported by `get_cc`: the raw
/// CC_STATUS state in the low two bits, and bit 2 set when this end is
/// presenting Rd.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum CcVoltage {
    Open = 0,
    Ra = 1,
    Rd = 2,
    RpDefault = 5,
    Rp1A5 = 6,
    Rp3A0 = 7,
}

impl CcVoltage {
    fn from_state(state: u8, presenting_rd: bool) -> Self {
        let bits = (state & 0x3) | ((presenting_rd as u8) << 2);
        // Reserved encodings read back as open.
        Self::from_u8(bits).unwrap_or(CcVoltage::Open)
    }

    pub fn presenting_rd(self) -> bool {
        self as u8 & 0b100 != 0
    }

    pub fn is_open(self) -> bool {
        self == CcVoltage::Open
    }
}

/// Connection polarity, including the debug-accessory (DTS) variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum Polarity {
    Cc1 = 0,
    Cc2 = 1,
    Cc1Dts = 2,
    Cc2Dts = 3,
}

impl Polarity {
    /// Strips the debug-accessory flag, leaving which line is CC.
    pub fn rm_dts(self) -> Polarity {
        match self {
            Polarity::Cc1 | Polarity::Cc1Dts => Polarity::Cc1,
            Polarity::Cc2 | Polarity::Cc2Dts => Polarity::Cc2,
        }
    }
}

/// Power role advertised in transmitted message headers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PowerRole {
    Sink = 0,
    Source = 1,
}

/// Data role advertised in transmitted message headers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum DataRole {
    Ufp = 0,
    Dfp = 1,
}

/// Frame types for `transmit`, in TRANSMIT register encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum TxType {
    Sop = 0,
    SopPrime = 1,
    SopPrimePrime = 2,
    SopDebugPrime = 3,
    SopDebugPrimePrime = 4,
    HardReset = 5,
    CableReset = 6,
    BistMode2 = 7,
}

impl TxType {
    /// True for the five SOP* types that carry a staged message.
    pub fn is_sop_star(self) -> bool {
        self as u8 <= TxType::SopDebugPrimePrime as u8
    }
}

/// Transmit outcome reported to the protocol layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TxStatus {
    Success,
    Failed,
}

bitflags! {
    /// Events posted to the PD task.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Event: u32 {
        /// Something happened; run the state machine.
        const WAKE = 1 << 0;
        /// CC line state changed.
        const CC = 1 << 1;
        /// The TCPC reset behind our back; re-run `init`.
        const TCPC_RESET = 1 << 2;
    }
}

bitflags! {
    /// Per-port controller description flags.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct TcpcFlags: u32 {
        /// Chip implements TCPCI revision 2.0 framing.
        const TCPCI_V2_0 = 1 << 0;
    }
}

bitflags! {
    /// Segment delimiters for raw bus transfers.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct XferFlags: u8 {
        const START = 1 << 0;
        const STOP = 1 << 1;
    }
}

impl XferFlags {
    /// A complete single-segment transaction.
    pub const SINGLE: XferFlags = XferFlags::START.union(XferFlags::STOP);
}

/// Action for the masked read-modify-write bus helpers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MaskUpdate {
    Set,
    Clear,
    Write,
    Toggle,
}

impl MaskUpdate {
    pub fn apply8(self, value: u8, mask: u8) -> u8 {
        match self {
            MaskUpdate::Set => value | mask,
            MaskUpdate::Clear => value & !mask,
            MaskUpdate::Write => mask,
            MaskUpdate::Toggle => value ^ mask,
        }
    }

    pub fn apply16(self, value: u16, mask: u16) -> u16 {
        match self {
            MaskUpdate::Set => value | mask,
            MaskUpdate::Clear => value & !mask,
            MaskUpdate::Write => mask,
            MaskUpdate::Toggle => value ^ mask,
        }
    }
}

/// Byte-level access to the I2C segment the TCPCs sit on.
///
/// Implementations are expected to lock the bus internally for the simple
/// register operations. `xfer_unlocked` is the exception: it issues one
/// segment of a larger transaction and must be bracketed by `lock` calls
/// from the caller.
pub trait TcpcBus {
    fn read8(&self, addr: u8, reg: u8) -> Result<u8, Error>;
    fn write8(&self, addr: u8, reg: u8, value: u8) -> Result<(), Error>;
    /// 16-bit registers transfer low byte first.
    fn read16(&self, addr: u8, reg: u8) -> Result<u16, Error>;
    fn write16(&self, addr: u8, reg: u8, value: u16) -> Result<(), Error>;
    fn read_block(&self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Error>;
    fn write_block(&self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Error>;
    /// One segment of a transaction: write `out`, then read `input.len()`
    /// bytes, delimited per `flags`. Caller must hold the bus lock.
    fn xfer_unlocked(
        &self,
        addr: u8,
        out: &[u8],
        input: &mut [u8],
        flags: XferFlags,
    ) -> Result<(), Error>;
    /// Takes or releases the bus lock around a multi-segment transaction.
    fn lock(&self, locked: bool);

    /// Masked read-modify-write of an 8-bit register. Implementations that
    /// can hold the bus across the pair should override this.
    fn update8(&self, addr: u8, reg: u8, mask: u8, action: MaskUpdate) -> Result<(), Error> {
        let value = self.read8(addr, reg)?;
        self.write8(addr, reg, action.apply8(value, mask))
    }

    /// Masked read-modify-write of a 16-bit register.
    fn update16(&self, addr: u8, reg: u8, mask: u16, action: MaskUpdate) -> Result<(), Error> {
        let value = self.read16(addr, reg)?;
        self.write16(addr, reg, action.apply16(value, mask))
    }
}

impl<T: TcpcBus + ?Sized> TcpcBus for &T {
    fn read8(&self, addr: u8, reg: u8) -> Result<u8, Error> {
        (**self).read8(addr, reg)
    }
    fn write8(&self, addr: u8, reg: u8, value: u8) -> Result<(), Error> {
        (**self).write8(addr, reg, value)
    }
    fn read16(&self, addr: u8, reg: u8) -> Result<u16, Error> {
        (**self).read16(addr, reg)
    }
    fn write16(&self, addr: u8, reg: u8, value: u16) -> Result<(), Error> {
        (**self).write16(addr, reg, value)
    }
    fn read_block(&self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_block(addr, reg, buf)
    }
    fn write_block(&self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Error> {
        (**self).write_block(addr, reg, data)
    }
    fn xfer_unlocked(
        &self,
        addr: u8,
        out: &[u8],
        input: &mut [u8],
        flags: XferFlags,
    ) -> Result<(), Error> {
        (**self).xfer_unlocked(addr, out, input, flags)
    }
    fn lock(&self, locked: bool) {
        (**self).lock(locked)
    }
    fn update8(&self, addr: u8, reg: u8, mask: u8, action: MaskUpdate) -> Result<(), Error> {
        (**self).update8(addr, reg, mask, action)
    }
    fn update16(&self, addr: u8, reg: u8, mask: u16, action: MaskUpdate) -> Result<(), Error> {
        (**self).update16(addr, reg, mask, action)
    }
}

/// Hooks into the PD stack and platform, keyed by port number.
pub trait PdStack {
    /// Blocks until the port's TCPC has been wakened from low-power mode
    /// and will answer bus traffic.
    fn wait_exit_low_power(&self, port: usize);
    /// Restarts the idle timer that arms low-power entry.
    fn device_accessed(&self, port: usize);
    /// Outcome of the transmission most recently staged via `transmit`.
    fn transmit_complete(&self, port: usize, status: TxStatus);
    /// The port partner signaled a hard reset.
    fn execute_hard_reset(&self, port: usize);
    /// The TCPC saw a fast-role-swap signal.
    fn got_frs_signal(&self, port: usize);
    /// Suspends or resumes PD processing for the port.
    fn set_suspend(&self, port: usize, suspend: bool);
    /// Schedules a resume for a port suspended by the driver.
    fn deferred_resume(&self, port: usize);
    /// Connection polarity, if the stack has resolved one.
    fn polarity(&self, port: usize) -> Option<Polarity>;
    /// Posts events to the port's PD task.
    fn set_event(&self, port: usize, event: Event);
    /// VBUS presence changed; default ignores it for boards without a
    /// charger subsystem.
    fn vbus_change(&self, _port: usize, _present: bool) {}
    /// Delay helper used by the init poll loop.
    fn sleep_ms(&self, ms: u64);
}

impl<T: PdStack + ?Sized> PdStack for &T {
    fn wait_exit_low_power(&self, port: usize) {
        (**self).wait_exit_low_power(port)
    }
    fn device_accessed(&self, port: usize) {
        (**self).device_accessed(port)
    }
    fn transmit_complete(&self, port: usize, status: TxStatus) {
        (**self).transmit_complete(port, status)
    }
    fn execute_hard_reset(&self, port: usize) {
        (**self).execute_hard_reset(port)
    }
    fn got_frs_signal(&self, port: usize) {
        (**self).got_frs_signal(port)
    }
    fn set_suspend(&self, port: usize, suspend: bool) {
        (**self).set_suspend(port, suspend)
    }
    fn deferred_resume(&self, port: usize) {
        (**self).deferred_resume(port)
    }
    fn polarity(&self, port: usize) -> Option<Polarity> {
        (**self).polarity(port)
    }
    fn set_event(&self, port: usize, event: Event) {
        (**self).set_event(port, event)
    }
    fn vbus_change(&self, port: usize, present: bool) {
        (**self).vbus_change(port, present)
    }
    fn sleep_ms(&self, ms: u64) {
        (**self).sleep_ms(ms)
    }
}

/// Build-time configuration: which optional behaviors this image carries.
/// Every field replaces a conditional compile of the corresponding code
/// path.
#[derive(Copy, Clone, Debug, Default)]
pub struct DriverConfig {
    /// VBUS presence detection is delegated to the TCPC.
    pub vbus_detect_tcpc: bool,
    /// Decode SOP'/SOP'' frames (VCONN-source builds).
    pub decode_sop: bool,
    /// TCPC low-power mode is managed; every bus access must first wake
    /// the chip and afterwards refresh its idle timer.
    pub low_power: bool,
    /// Sink fast-role-swap signaling is wired up.
    pub fast_role_swap: bool,
    /// A charger subsystem consumes VBUS notifications.
    pub usb_charger: bool,
}

impl DriverConfig {
    pub const fn new() -> Self {
        Self {
            vbus_detect_tcpc: false,
            decode_sop: false,
            low_power: false,
            fast_role_swap: false,
            usb_charger: false,
        }
    }
}

/// Static description of one port's TCPC.
#[derive(Copy, Clone, Debug)]
pub struct PortConfig {
    /// 7-bit bus address of the TCPC.
    pub addr: u8,
    pub flags: TcpcFlags,
    /// Bus address of a standalone TCPCI-register mux, when the mux is not
    /// the TCPC itself.
    pub mux_addr: Option<u8>,
}

/// Identification registers, cached at init time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChipInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub device_id: u16,
    /// `None` until a chip-specific driver supplies a real value.
    pub fw_version: Option<u32>,
}

const FW_VERSION_UNKNOWN: i32 = -1;

/// Per-port driver state. One of these per physical port, typically in a
/// `static` array handed to [`Tcpci::new`].
///
/// The shadow cells are written from PD-task context, except
/// `vbus_present`, which the alert path updates; all are atomics because
/// both contexts hold `&Port`.
pub struct Port {
    config: PortConfig,
    cached_rp: AtomicU8,
    cached_pull: AtomicU8,
    vbus_present: AtomicBool,
    vconn_enabled: AtomicBool,
    rx_enabled: AtomicBool,
    vendor_id: AtomicU16,
    product_id: AtomicU16,
    device_id: AtomicU16,
    fw_version: AtomicI32,
    rx: queue::RxQueue,
}

impl Port {
    pub const fn new(config: PortConfig) -> Self {
        Self {
            config,
            cached_rp: AtomicU8::new(RpValue::Usb as u8),
            cached_pull: AtomicU8::new(CcPull::Ra as u8),
            vbus_present: AtomicBool::new(false),
            vconn_enabled: AtomicBool::new(false),
            rx_enabled: AtomicBool::new(false),
            vendor_id: AtomicU16::new(0),
            product_id: AtomicU16::new(0),
            device_id: AtomicU16::new(0),
            fw_version: AtomicI32::new(FW_VERSION_UNKNOWN),
            rx: queue::RxQueue::new(),
        }
    }

    pub fn config(&self) -> &PortConfig {
        &self.config
    }

    fn rp(&self) -> RpValue {
        RpValue::from_u8(self.cached_rp.load(Ordering::Relaxed)).unwrap_or(RpValue::Usb)
    }

    fn pull(&self) -> CcPull {
        CcPull::from_u8(self.cached_pull.load(Ordering::Relaxed)).unwrap_or(CcPull::Open)
    }

    fn chip_info(&self) -> ChipInfo {
        ChipInfo {
            vendor_id: self.vendor_id.load(Ordering::Relaxed),
            product_id: self.product_id.load(Ordering::Relaxed),
            device_id: self.device_id.load(Ordering::Relaxed),
            fw_version: match self.fw_version.load(Ordering::Relaxed) {
                v if v < 0 => None,
                v => Some(v as u32),
            },
        }
    }
}

/// The TCPCI driver. One instance serves every port on the board; PD-facing
/// operations take the port number and report `Inval` when it is out of
/// range.
pub struct Tcpci<'a, B, P> {
    config: DriverConfig,
    bus: B,
    pd: P,
    ports: &'a [Port],
}

impl<'a, B: TcpcBus, P: PdStack> Tcpci<'a, B, P> {
    pub fn new(config: DriverConfig, bus: B, pd: P, ports: &'a [Port]) -> Self {
        Self {
            config,
            bus,
            pd,
            ports,
        }
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    fn port(&self, port: usize) -> Result<&Port, Error> {
        self.ports.get(port).ok_or(Error::Inval)
    }

    fn wake(&self, port: usize) {
        if self.config.low_power {
            self.pd.wait_exit_low_power(port);
        }
    }

    fn accessed(&self, port: usize) {
        if self.config.low_power {
            self.pd.device_accessed(port);
        }
    }

    /// Reads an 8-bit register at an explicit bus address. Public for
    /// chip-specific drivers that address secondary register pages.
    pub fn addr_read8(&self, port: usize, addr: u8, reg: Register) -> Result<u8, Error> {
        self.wake(port);
        let r = self.bus.read8(addr, reg as u8);
        self.accessed(port);
        r
    }

    pub fn addr_write8(&self, port: usize, addr: u8, reg: Register, value: u8) -> Result<(), Error> {
        self.wake(port);
        let r = self.bus.write8(addr, reg as u8, value);
        self.accessed(port);
        r
    }

    pub fn addr_read16(&self, port: usize, addr: u8, reg: Register) -> Result<u16, Error> {
        self.wake(port);
        let r = self.bus.read16(addr, reg as u8);
        self.accessed(port);
        r
    }

    pub fn addr_write16(
        &self,
        port: usize,
        addr: u8,
        reg: Register,
        value: u16,
    ) -> Result<(), Error> {
        self.wake(port);
        let r = self.bus.write16(addr, reg as u8, value);
        self.accessed(port);
        r
    }

    /// Reads an 8-bit register on the port's TCPC.
    pub fn reg_read8(&self, port: usize, reg: Register) -> Result<u8, Error> {
        let addr = self.port(port)?.config.addr;
        self.addr_read8(port, addr, reg)
    }

    pub fn reg_write8(&self, port: usize, reg: Register, value: u8) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.addr_write8(port, addr, reg, value)
    }

    pub fn reg_read16(&self, port: usize, reg: Register) -> Result<u16, Error> {
        let addr = self.port(port)?.config.addr;
        self.addr_read16(port, addr, reg)
    }

    pub fn reg_write16(&self, port: usize, reg: Register, value: u16) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.addr_write16(port, addr, reg, value)
    }

    pub fn reg_read_block(&self, port: usize, reg: Register, buf: &mut [u8]) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.wake(port);
        let r = self.bus.read_block(addr, reg as u8, buf);
        self.accessed(port);
        r
    }

    pub fn reg_write_block(&self, port: usize, reg: Register, data: &[u8]) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.wake(port);
        let r = self.bus.write_block(addr, reg as u8, data);
        self.accessed(port);
        r
    }

    /// Masked read-modify-write of an 8-bit register on the port's TCPC.
    pub fn reg_update8(
        &self,
        port: usize,
        reg: Register,
        mask: u8,
        action: MaskUpdate,
    ) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.wake(port);
        let r = self.bus.update8(addr, reg as u8, mask, action);
        self.accessed(port);
        r
    }

    pub fn reg_update16(
        &self,
        port: usize,
        reg: Register,
        mask: u16,
        action: MaskUpdate,
    ) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.wake(port);
        let r = self.bus.update16(addr, reg as u8, mask, action);
        self.accessed(port);
        r
    }

    /// One segment of a locked transaction against the port's TCPC.
    pub fn xfer_unlocked(
        &self,
        port: usize,
        out: &[u8],
        input: &mut [u8],
        flags: XferFlags,
    ) -> Result<(), Error> {
        let addr = self.port(port)?.config.addr;
        self.wake(port);
        let r = self.bus.xfer_unlocked(addr, out, input, flags);
        self.accessed(port);
        r
    }

    /// Brackets a multi-segment transaction.
    pub fn tcpc_lock(&self, _port: usize, locked: bool) {
        self.bus.lock(locked);
    }
}

/// Number of 32-bit data objects a PD message header announces.
pub const fn pd_header_count(header: u16) -> usize {
    ((header >> 12) & 0x7) as usize
}

/// Frame-type tag for the top nibble of a stored message header.
pub const fn pd_header_sop(frame_type: u8) -> u32 {
    ((frame_type & 0xf) as u32) << 28
}

/// The operation set a TCPC driver exposes to the PD stack.
///
/// [`Tcpci`] implements the whole set against the TCPCI register protocol.
/// Chip-specific drivers embed a `Tcpci` and forward most operations,
/// re-implementing the few their silicon handles differently.
pub trait TcpmDriver {
    fn init(&self, port: usize) -> Result<(), Error>;
    fn release(&self, port: usize) -> Result<(), Error>;
    /// Reads both CC lines. Callers treat a failure as both lines open.
    fn get_cc(&self, port: usize) -> Result<(CcVoltage, CcVoltage), Error>;
    /// Last VBUS presence reported by the chip.
    fn get_vbus_level(&self, port: usize) -> bool;
    /// Records the Rp level to apply on the next `set_cc`; no chip I/O.
    fn select_rp_value(&self, port: usize, rp: RpValue) -> Result<(), Error>;
    fn set_cc(&self, port: usize, pull: CcPull) -> Result<(), Error>;
    fn set_polarity(&self, port: usize, polarity: Option<Polarity>) -> Result<(), Error>;
    fn set_vconn(&self, port: usize, enable: bool) -> Result<(), Error>;
    fn set_msg_header(&self, port: usize, power: PowerRole, data: DataRole) -> Result<(), Error>;
    fn set_rx_enable(&self, port: usize, enable: bool) -> Result<(), Error>;
    /// Reads one message straight out of the chip, bypassing the queue.
    fn get_message_raw(&self, port: usize) -> Result<Message, Error>;
    fn transmit(&self, port: usize, ty: TxType, header: u16, data: &[u32]) -> Result<(), Error>;
    /// Services an assertion of the alert line. Infallible; faults are
    /// logged and cleared.
    fn alert(&self, port: usize);
    fn discharge_vbus(&self, port: usize, enable: bool) -> Result<(), Error>;
    fn enable_auto_discharge_disconnect(&self, port: usize, enable: bool) -> Result<(), Error>;
    /// Hands connection detection to the TCPC (TCPCI 2.0 DRP toggling).
    fn drp_toggle(&self, port: usize) -> Result<(), Error>;
    fn get_chip_info(&self, port: usize, live: bool) -> Result<ChipInfo, Error>;
    fn set_snk_ctrl(&self, port: usize, enable: bool) -> Result<(), Error>;
    fn set_src_ctrl(&self, port: usize, enable: bool) -> Result<(), Error>;
    fn enter_low_power_mode(&self, port: usize) -> Result<(), Error>;
    fn fast_role_swap_enable(&self, port: usize, enable: bool) -> Result<(), Error>;
}
