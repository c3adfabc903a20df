// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Servicing of the TCPC alert line.

use core::sync::atomic::Ordering;

use ringbuf::{ringbuf, ringbuf_entry};

use crate::registers::{Alert, AlertExtended, PowerStatus, Register};
use crate::{Error, Event, PdStack, TcpcBus, Tcpci, TxStatus};

/// Cap on consecutive drain-loop failures before the port is parked. We
/// typically have one or two messages waiting, so hitting this means the
/// chip is wedged.
const MAX_ALLOWED_FAILED_RX_READS: u8 = 10;

#[derive(Copy, Clone, PartialEq)]
enum Trace {
    None,
    Fault(u8, u8),
    FaultCleared(u8, u8),
    RxDrainAbandoned(u8),
}

ringbuf!(Trace, 32, Trace::None);

impl<B: TcpcBus, P: PdStack> Tcpci<'_, B, P> {
    fn alert_status(&self, port: usize) -> Result<Alert, Error> {
        self.reg_read16(port, Register::Alert)
            .map(Alert::from_bits_retain)
    }

    fn alert_ext_status(&self, port: usize) -> Result<AlertExtended, Error> {
        self.reg_read8(port, Register::AlertExtended)
            .map(AlertExtended::from_bits_retain)
    }

    /// Services an assertion of the alert line. Runs in whatever context
    /// the board delivers alerts from, which may be the interrupt itself
    /// when the bus driver tolerates that.
    ///
    /// Infallible from the caller's perspective: faults are logged and
    /// cleared, bus errors are swallowed, and a wedged chip suspends the
    /// port rather than erroring out.
    pub fn alert(&self, port: usize) {
        let Ok(p) = self.port(port) else { return };

        let mut status = self.alert_status(port).unwrap_or(Alert::empty());

        let mut alert_ext = AlertExtended::empty();
        if status.contains(Alert::ALERT_EXTENDED) {
            alert_ext = self.alert_ext_status(port).unwrap_or(AlertExtended::empty());
        }

        let mut pd_event = Event::empty();

        if status.contains(Alert::FAULT) {
            if let Ok(fault) = self.reg_read8(port, Register::FaultStatus) {
                ringbuf_entry!(Trace::Fault(port as u8, fault));
                // FAULT_STATUS is write-one-to-clear.
                if self.reg_write8(port, Register::FaultStatus, fault).is_ok() {
                    ringbuf_entry!(Trace::FaultCleared(port as u8, fault));
                }
            }
        }

        // The protocol state machine blocks on transmit completion, so
        // report it before anything else, whatever other bits are set.
        if status.intersects(Alert::TX_COMPLETE) {
            let outcome = if status.contains(Alert::TX_SUCCESS) {
                TxStatus::Success
            } else {
                TxStatus::Failed
            };
            self.pd.transmit_complete(port, outcome);
        }

        // Pull every pending message out of the chip. Each successful
        // enqueue acknowledges RX_STATUS, so re-reading ALERT tells us
        // whether more are waiting.
        let mut failed_attempts = 0u8;
        while status.contains(Alert::RX_STATUS) {
            if self.enqueue_message(port).is_err() {
                failed_attempts += 1;
            }
            match self.alert_status(port) {
                Ok(s) => status = s,
                Err(_) => failed_attempts += 1,
            }
            if failed_attempts >= MAX_ALLOWED_FAILED_RX_READS {
                ringbuf_entry!(Trace::RxDrainAbandoned(port as u8));
                // The port is in a bad state; park it instead of letting
                // it monopolize the event loop, and come back later.
                self.pd.set_suspend(port, true);
                self.pd.deferred_resume(port);
                return;
            }
        }

        // Acknowledge everything we saw (write-one-to-clear).
        if !status.is_empty() {
            let _ = self.reg_write16(port, Register::Alert, status.bits());
        }

        if status.contains(Alert::CC_STATUS) {
            pd_event |= Event::CC;
        }

        if status.contains(Alert::POWER_STATUS) {
            let power = self
                .reg_read8(port, Register::PowerStatus)
                .map(PowerStatus::from_bits_retain)
                .unwrap_or(PowerStatus::empty());
            let vbus = power.contains(PowerStatus::VBUS_PRESENT);
            p.vbus_present.store(vbus, Ordering::Relaxed);
            if self.config.vbus_detect_tcpc && self.config.usb_charger {
                self.pd.vbus_change(port, vbus);
                pd_event |= Event::WAKE;
            }
        }

        if status.contains(Alert::RX_HARD_RESET) {
            self.pd.execute_hard_reset(port);
            pd_event |= Event::WAKE;
        }

        if self.config.fast_role_swap && alert_ext.contains(AlertExtended::SNK_FAST_ROLE_SWAP) {
            self.pd.got_frs_signal(port);
        }

        if !self.config.low_power && self.register_mask_reset(port) {
            pd_event |= Event::TCPC_RESET;
        }

        // Post events only after the last chip access above, so that the
        // PD task cannot wake up and drop the chip back into low power
        // while this handler is still mid-transaction.
        if !pd_event.is_empty() {
            self.pd.set_event(port, pd_event);
        }
    }

    /// An all-ones mask register means the TCPC reset behind our back.
    /// Only consulted when low-power management is compiled out; a
    /// low-power exit re-initializes the chip anyway.
    fn register_mask_reset(&self, port: usize) -> bool {
        if self.reg_read16(port, Register::AlertMask).unwrap_or(0) == Alert::MASK_ALL.bits() {
            return true;
        }
        if self.reg_read8(port, Register::PowerStatusMask).unwrap_or(0)
            == PowerStatus::MASK_ALL.bits()
        {
            return true;
        }
        false
    }
}
