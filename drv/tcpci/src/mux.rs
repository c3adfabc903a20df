// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! USB mux control through the TCPCI CONFIG_STANDARD_OUTPUT register.
//!
//! Some boards route SuperSpeed/DisplayPort muxing through the TCPC, some
//! through a separate chip that still speaks the TCPCI register layout. In
//! the first case the mux shares the TCPC's address and its init and
//! low-power handling are covered by the main driver; in the second the
//! mux has its own address ([`crate::PortConfig::mux_addr`]) and needs the
//! same boot wait and alert masking a TCPC does.
//!
//! Mux traffic goes straight to the bus rather than through the low-power
//! access wrapper: a standalone mux is not part of the port's low-power
//! protocol.

use bitflags::bitflags;

use crate::ops::{INIT_POLL_MS, INIT_TRIES};
use crate::registers::{Alert, Command, ConfigStdOutput, PowerStatus, Register};
use crate::{Error, PdStack, TcpcBus, Tcpci};

bitflags! {
    /// Requested mux routing.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct MuxState: u8 {
        const USB_ENABLED = 1 << 0;
        const DP_ENABLED = 1 << 1;
        const POLARITY_INVERTED = 1 << 2;
    }
}

/// The operation set a USB mux driver exposes; implemented here against
/// the TCPCI register layout.
pub trait UsbMuxDriver {
    fn mux_init(&self, port: usize) -> Result<(), Error>;
    fn mux_set(&self, port: usize, state: MuxState) -> Result<(), Error>;
    fn mux_get(&self, port: usize) -> Result<MuxState, Error>;
    fn mux_enter_low_power(&self, port: usize) -> Result<(), Error>;
}

impl<B: TcpcBus, P: PdStack> Tcpci<'_, B, P> {
    /// The mux's bus address, and whether it is a standalone device
    /// rather than the TCPC itself.
    fn mux_addr(&self, port: usize) -> Result<(u8, bool), Error> {
        let p = self.port(port)?;
        Ok(match p.config().mux_addr {
            Some(addr) => (addr, true),
            None => (p.config().addr, false),
        })
    }

    /// Initializes a standalone mux the way `init` does a TCPC. When the
    /// mux is the TCPC, `init` already covered it.
    pub fn mux_init(&self, port: usize) -> Result<(), Error> {
        let (addr, standalone) = self.mux_addr(port)?;
        if !standalone {
            return Ok(());
        }

        let mut tries = INIT_TRIES;
        loop {
            let read = self.bus.read8(addr, Register::PowerStatus as u8);
            if let Ok(v) = read {
                if !PowerStatus::from_bits_retain(v).contains(PowerStatus::UNINITIALIZED) {
                    break;
                }
            }
            tries -= 1;
            if tries == 0 {
                return Err(read.err().unwrap_or(Error::Timeout));
            }
            self.pd.sleep_ms(INIT_POLL_MS);
        }

        // Mask every alert source and acknowledge anything pending; the
        // mux never gets an alert handler.
        let masks = self
            .bus
            .write16(addr, Register::AlertMask as u8, 0)
            .and(self.bus.write16(addr, Register::Alert as u8, Alert::MASK_ALL.bits()));
        masks.map_err(|_| Error::Unknown)
    }

    pub fn mux_set(&self, port: usize, state: MuxState) -> Result<(), Error> {
        let (addr, _) = self.mux_addr(port)?;

        let reg = self.bus.read8(addr, Register::ConfigStdOutput as u8)?;
        let mut out = ConfigStdOutput::from_bits_retain(reg);
        out.remove(ConfigStdOutput::MUX_MASK | ConfigStdOutput::CONNECTOR_FLIPPED);
        if state.contains(MuxState::USB_ENABLED) {
            out |= ConfigStdOutput::MUX_USB;
        }
        if state.contains(MuxState::DP_ENABLED) {
            out |= ConfigStdOutput::MUX_DP;
        }
        if state.contains(MuxState::POLARITY_INVERTED) {
            out |= ConfigStdOutput::CONNECTOR_FLIPPED;
        }

        self.bus
            .write8(addr, Register::ConfigStdOutput as u8, out.bits())
    }

    pub fn mux_get(&self, port: usize) -> Result<MuxState, Error> {
        let (addr, _) = self.mux_addr(port)?;

        let reg = self.bus.read8(addr, Register::ConfigStdOutput as u8)?;
        let out = ConfigStdOutput::from_bits_retain(reg);

        let mut state = MuxState::empty();
        if out.contains(ConfigStdOutput::MUX_USB) {
            state |= MuxState::USB_ENABLED;
        }
        if out.contains(ConfigStdOutput::MUX_DP) {
            state |= MuxState::DP_ENABLED;
        }
        if out.contains(ConfigStdOutput::CONNECTOR_FLIPPED) {
            state |= MuxState::POLARITY_INVERTED;
        }
        Ok(state)
    }

    /// Idles a standalone mux; a shared mux follows the TCPC's own
    /// low-power entry.
    pub fn mux_enter_low_power(&self, port: usize) -> Result<(), Error> {
        let (addr, standalone) = self.mux_addr(port)?;
        if !standalone {
            return Ok(());
        }
        self.bus
            .write8(addr, Register::Command as u8, Command::I2cIdle as u8)
    }
}

impl<B: TcpcBus, P: PdStack> UsbMuxDriver for Tcpci<'_, B, P> {
    fn mux_init(&self, port: usize) -> Result<(), Error> {
        Tcpci::mux_init(self, port)
    }
    fn mux_set(&self, port: usize, state: MuxState) -> Result<(), Error> {
        Tcpci::mux_set(self, port, state)
    }
    fn mux_get(&self, port: usize) -> Result<MuxState, Error> {
        Tcpci::mux_get(self, port)
    }
    fn mux_enter_low_power(&self, port: usize) -> Result<(), Error> {
        Tcpci::mux_enter_low_power(self, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{fixture, one_port, one_port_with_mux, BusOp, MUX_ADDR, TCPC_ADDR};
    use crate::{DriverConfig, TcpcFlags};

    #[test]
    fn shared_mux_init_and_low_power_are_no_ops() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port(TcpcFlags::empty());
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        tcpci.mux_init(0).unwrap();
        tcpci.mux_enter_low_power(0).unwrap();

        assert!(bus.log().is_empty());
    }

    #[test]
    fn standalone_mux_init_waits_then_masks() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port_with_mux();
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        tcpci.mux_init(0).unwrap();

        let log = bus.log();
        assert_eq!(
            log[0],
            BusOp::Read8(MUX_ADDR, Register::PowerStatus as u8)
        );
        assert_eq!(
            log[1],
            BusOp::Write16(MUX_ADDR, Register::AlertMask as u8, 0)
        );
        assert_eq!(
            log[2],
            BusOp::Write16(MUX_ADDR, Register::Alert as u8, 0xffff)
        );
    }

    #[test]
    fn standalone_mux_init_times_out() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port_with_mux();
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        bus.set_reg8(Register::PowerStatus, PowerStatus::UNINITIALIZED.bits());

        assert_eq!(tcpci.mux_init(0), Err(Error::Timeout));
        assert_eq!(pd.sleeps().len(), 29);
    }

    #[test]
    fn mux_set_rewrites_only_the_routing_bits() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port(TcpcFlags::empty());
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        // Unrelated output bits stay put.
        bus.set_reg8(Register::ConfigStdOutput, 0xf0);
        tcpci
            .mux_set(0, MuxState::USB_ENABLED | MuxState::POLARITY_INVERTED)
            .unwrap();

        assert_eq!(bus.writes8(Register::ConfigStdOutput), vec![0xf5]);
        // The shared mux is addressed as the TCPC.
        assert!(bus
            .log()
            .iter()
            .all(|op| !matches!(op, BusOp::Read8(a, _) | BusOp::Write8(a, _, _) if *a != TCPC_ADDR)));
    }

    #[test]
    fn mux_get_decodes_the_routing_bits() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port(TcpcFlags::empty());
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        bus.set_reg8(
            Register::ConfigStdOutput,
            (ConfigStdOutput::MUX_DP | ConfigStdOutput::CONNECTOR_FLIPPED).bits(),
        );

        assert_eq!(
            tcpci.mux_get(0).unwrap(),
            MuxState::DP_ENABLED | MuxState::POLARITY_INVERTED
        );
    }

    #[test]
    fn standalone_mux_enters_low_power_by_command() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port_with_mux();
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        tcpci.mux_enter_low_power(0).unwrap();

        assert_eq!(
            bus.log(),
            vec![BusOp::Write8(
                MUX_ADDR,
                Register::Command as u8,
                Command::I2cIdle as u8
            )]
        );
    }

    #[test]
    fn mux_round_trips_its_own_settings() {
        let (_clock, bus, pd) = fixture();
        let ports = one_port(TcpcFlags::empty());
        let tcpci = Tcpci::new(DriverConfig::new(), &bus, &pd, &ports);

        for state in [
            MuxState::empty(),
            MuxState::USB_ENABLED,
            MuxState::USB_ENABLED | MuxState::DP_ENABLED,
            MuxState::DP_ENABLED | MuxState::POLARITY_INVERTED,
        ] {
            tcpci.mux_set(0, state).unwrap();
            assert_eq!(tcpci.mux_get(0).unwrap(), state);
        }
    }
}
