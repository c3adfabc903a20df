// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test fixtures: a scriptable fake bus and a recording fake PD stack.
//!
//! Both log every call with a timestamp from a shared counter, so tests
//! can assert not just what happened but in what order across the two
//! interfaces (e.g. that events are posted only after the last register
//! access).

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::registers::Register;
use crate::{
    Error, Event, PdStack, Polarity, Port, PortConfig, TcpcBus, TcpcFlags, TxStatus, XferFlags,
};

pub const TCPC_ADDR: u8 = 0x28;
pub const MUX_ADDR: u8 = 0x42;

/// Shared monotonic counter ordering bus traffic against PD hook calls.
pub type Clock = Rc<Cell<u32>>;

fn tick(clock: &Clock) -> u32 {
    let t = clock.get();
    clock.set(t + 1);
    t
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusOp {
    Read8(u8, u8),
    Write8(u8, u8, u8),
    Read16(u8, u8),
    Write16(u8, u8, u16),
    ReadBlock(u8, u8, usize),
    WriteBlock(u8, u8, Vec<u8>),
    Xfer {
        addr: u8,
        out: Vec<u8>,
        in_len: usize,
        flags: XferFlags,
    },
    Lock(bool),
}

#[derive(Default)]
struct BusState {
    reg8: HashMap<u8, u8>,
    reg16: HashMap<u8, u16>,
    blocks: HashMap<u8, Vec<u8>>,
    /// Scripted responses for 16-bit ALERT reads; the last value sticks.
    alert_reads: VecDeque<u16>,
    fail_read8: HashSet<u8>,
    fail_read16: HashSet<u8>,
    fail_xfer: bool,
    /// Read data handed out by successive reading `xfer_unlocked` calls.
    xfer_reads: VecDeque<Vec<u8>>,
    log: Vec<(u32, BusOp)>,
}

pub struct FakeBus {
    clock: Clock,
    state: RefCell<BusState>,
}

impl FakeBus {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            state: RefCell::new(BusState::default()),
        }
    }

    pub fn set_reg8(&self, reg: Register, value: u8) {
        self.state.borrow_mut().reg8.insert(reg as u8, value);
    }

    pub fn set_reg16(&self, reg: Register, value: u16) {
        self.state.borrow_mut().reg16.insert(reg as u8, value);
    }

    pub fn set_block(&self, reg: Register, data: &[u8]) {
        self.state.borrow_mut().blocks.insert(reg as u8, data.to_vec());
    }

    /// Queues ALERT register read results; once the script runs dry the
    /// final value repeats.
    pub fn script_alert_reads(&self, values: &[u16]) {
        self.state.borrow_mut().alert_reads = values.iter().copied().collect();
    }

    pub fn fail_read8(&self, reg: Register) {
        self.state.borrow_mut().fail_read8.insert(reg as u8);
    }

    pub fn fail_read16(&self, reg: Register) {
        self.state.borrow_mut().fail_read16.insert(reg as u8);
    }

    pub fn fail_xfers(&self) {
        self.state.borrow_mut().fail_xfer = true;
    }

    /// Queues read data for the next reading `xfer_unlocked` segment.
    pub fn push_xfer_read(&self, data: &[u8]) {
        self.state.borrow_mut().xfer_reads.push_back(data.to_vec());
    }

    pub fn log(&self) -> Vec<BusOp> {
        self.state
            .borrow()
            .log
            .iter()
            .map(|(_, op)| op.clone())
            .collect()
    }

    pub fn timed_log(&self) -> Vec<(u32, BusOp)> {
        self.state.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    /// Values written to an 8-bit register, in order.
    pub fn writes8(&self, reg: Register) -> Vec<u8> {
        self.log()
            .into_iter()
            .filter_map(|op| match op {
                BusOp::Write8(_, r, v) if r == reg as u8 => Some(v),
                _ => None,
            })
            .collect()
    }

    /// Values written to a 16-bit register, in order.
    pub fn writes16(&self, reg: Register) -> Vec<u16> {
        self.log()
            .into_iter()
            .filter_map(|op| match op {
                BusOp::Write16(_, r, v) if r == reg as u8 => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn read8_count(&self, reg: Register) -> usize {
        self.log()
            .iter()
            .filter(|op| matches!(op, BusOp::Read8(_, r) if *r == reg as u8))
            .count()
    }

    fn record(&self, op: BusOp) -> u32 {
        let t = tick(&self.clock);
        self.state.borrow_mut().log.push((t, op));
        t
    }
}

impl TcpcBus for FakeBus {
    fn read8(&self, addr: u8, reg: u8) -> Result<u8, Error> {
        self.record(BusOp::Read8(addr, reg));
        let state = self.state.borrow();
        if state.fail_read8.contains(&reg) {
            return Err(Error::Unknown);
        }
        Ok(state.reg8.get(&reg).copied().unwrap_or(0))
    }

    fn write8(&self, addr: u8, reg: u8, value: u8) -> Result<(), Error> {
        self.record(BusOp::Write8(addr, reg, value));
        self.state.borrow_mut().reg8.insert(reg, value);
        Ok(())
    }

    fn read16(&self, addr: u8, reg: u8) -> Result<u16, Error> {
        self.record(BusOp::Read16(addr, reg));
        let mut state = self.state.borrow_mut();
        if state.fail_read16.contains(&reg) {
            return Err(Error::Unknown);
        }
        if reg == Register::Alert as u8 && !state.alert_reads.is_empty() {
            let value = if state.alert_reads.len() > 1 {
                state.alert_reads.pop_front().unwrap()
            } else {
                state.alert_reads[0]
            };
            return Ok(value);
        }
        Ok(state.reg16.get(&reg).copied().unwrap_or(0))
    }

    fn write16(&self, addr: u8, reg: u8, value: u16) -> Result<(), Error> {
        self.record(BusOp::Write16(addr, reg, value));
        self.state.borrow_mut().reg16.insert(reg, value);
        Ok(())
    }

    fn read_block(&self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.record(BusOp::ReadBlock(addr, reg, buf.len()));
        let state = self.state.borrow();
        if state.fail_read8.contains(&reg) {
            return Err(Error::Unknown);
        }
        buf.fill(0);
        if let Some(data) = state.blocks.get(&reg) {
            let n = buf.len().min(data.len());
            buf[..n].copy_from_slice(&data[..n]);
        }
        Ok(())
    }

    fn write_block(&self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Error> {
        self.record(BusOp::WriteBlock(addr, reg, data.to_vec()));
        Ok(())
    }

    fn xfer_unlocked(
        &self,
        addr: u8,
        out: &[u8],
        input: &mut [u8],
        flags: XferFlags,
    ) -> Result<(), Error> {
        self.record(BusOp::Xfer {
            addr,
            out: out.to_vec(),
            in_len: input.len(),
            flags,
        });
        let mut state = self.state.borrow_mut();
        if state.fail_xfer {
            return Err(Error::Unknown);
        }
        if !input.is_empty() {
            input.fill(0);
            if let Some(data) = state.xfer_reads.pop_front() {
                let n = input.len().min(data.len());
                input[..n].copy_from_slice(&data[..n]);
            }
        }
        Ok(())
    }

    fn lock(&self, locked: bool) {
        self.record(BusOp::Lock(locked));
    }
}

#[derive(Default)]
struct PdState {
    polarity: Option<Polarity>,
    events: Vec<(u32, usize, Event)>,
    tx_complete: Vec<(usize, TxStatus)>,
    hard_resets: Vec<usize>,
    frs_signals: Vec<usize>,
    suspends: Vec<(usize, bool)>,
    deferred_resumes: Vec<usize>,
    vbus_changes: Vec<(usize, bool)>,
    sleeps: Vec<u64>,
    low_power_waits: usize,
    accesses: usize,
}

pub struct FakePd {
    clock: Clock,
    state: RefCell<PdState>,
}

impl FakePd {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            state: RefCell::new(PdState::default()),
        }
    }

    pub fn set_polarity(&self, polarity: Option<Polarity>) {
        self.state.borrow_mut().polarity = polarity;
    }

    pub fn events(&self) -> Vec<(usize, Event)> {
        self.state
            .borrow()
            .events
            .iter()
            .map(|&(_, port, ev)| (port, ev))
            .collect()
    }

    pub fn timed_events(&self) -> Vec<(u32, usize, Event)> {
        self.state.borrow().events.clone()
    }

    pub fn tx_complete(&self) -> Vec<(usize, TxStatus)> {
        self.state.borrow().tx_complete.clone()
    }

    pub fn hard_resets(&self) -> Vec<usize> {
        self.state.borrow().hard_resets.clone()
    }

    pub fn frs_signals(&self) -> Vec<usize> {
        self.state.borrow().frs_signals.clone()
    }

    pub fn suspends(&self) -> Vec<(usize, bool)> {
        self.state.borrow().suspends.clone()
    }

    pub fn deferred_resumes(&self) -> Vec<usize> {
        self.state.borrow().deferred_resumes.clone()
    }

    pub fn vbus_changes(&self) -> Vec<(usize, bool)> {
        self.state.borrow().vbus_changes.clone()
    }

    pub fn sleeps(&self) -> Vec<u64> {
        self.state.borrow().sleeps.clone()
    }

    pub fn low_power_waits(&self) -> usize {
        self.state.borrow().low_power_waits
    }

    pub fn accesses(&self) -> usize {
        self.state.borrow().accesses
    }
}

impl PdStack for FakePd {
    fn wait_exit_low_power(&self, _port: usize) {
        self.state.borrow_mut().low_power_waits += 1;
    }

    fn device_accessed(&self, _port: usize) {
        self.state.borrow_mut().accesses += 1;
    }

    fn transmit_complete(&self, port: usize, status: TxStatus) {
        self.state.borrow_mut().tx_complete.push((port, status));
    }

    fn execute_hard_reset(&self, port: usize) {
        self.state.borrow_mut().hard_resets.push(port);
    }

    fn got_frs_signal(&self, port: usize) {
        self.state.borrow_mut().frs_signals.push(port);
    }

    fn set_suspend(&self, port: usize, suspend: bool) {
        self.state.borrow_mut().suspends.push((port, suspend));
    }

    fn deferred_resume(&self, port: usize) {
        self.state.borrow_mut().deferred_resumes.push(port);
    }

    fn polarity(&self, _port: usize) -> Option<Polarity> {
        self.state.borrow().polarity
    }

    fn set_event(&self, port: usize, event: Event) {
        let t = tick(&self.clock);
        self.state.borrow_mut().events.push((t, port, event));
    }

    fn vbus_change(&self, port: usize, present: bool) {
        self.state.borrow_mut().vbus_changes.push((port, present));
    }

    fn sleep_ms(&self, ms: u64) {
        self.state.borrow_mut().sleeps.push(ms);
    }
}

/// A clock plus the two fakes wired to it.
pub fn fixture() -> (Clock, FakeBus, FakePd) {
    let clock: Clock = Rc::new(Cell::new(0));
    (clock.clone(), FakeBus::new(clock.clone()), FakePd::new(clock))
}

/// A single port at [`TCPC_ADDR`] with the given flags.
pub fn one_port(flags: TcpcFlags) -> [Port; 1] {
    [Port::new(PortConfig {
        addr: TCPC_ADDR,
        flags,
        mux_addr: None,
    })]
}

/// A single port whose mux is a standalone device at [`MUX_ADDR`].
pub fn one_port_with_mux() -> [Port; 1] {
    [Port::new(PortConfig {
        addr: TCPC_ADDR,
        flags: TcpcFlags::empty(),
        mux_addr: Some(MUX_ADDR),
    })]
}
