// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The PD-facing port-manager operations.

use core::sync::atomic::Ordering;

use ringbuf::{ringbuf, ringbuf_entry};

use crate::queue::{Message, MAX_PAYLOAD_BYTES};
use crate::registers::{
    transmit_with_retry, transmit_without_retry, Alert, AlertExtended, CcStatus, Command,
    MessageHeaderInfo, PowerControl, PowerStatus, Register, RegisterSize, RoleControl, RxDetect,
    TcpcControl, DUMP_REGISTERS, PD_REV_2_0,
};
use crate::{
    pd_header_count, pd_header_sop, CcPull, CcVoltage, ChipInfo, DataRole, Error, Event,
    MaskUpdate, PdStack, Polarity, PowerRole, RpValue, TcpcBus, TcpcFlags, Tcpci, TcpmDriver,
    TxType, XferFlags, FW_VERSION_UNKNOWN,
};

/// How long to keep polling POWER_STATUS for the chip to finish booting.
pub(crate) const INIT_TRIES: u32 = 30;
pub(crate) const INIT_POLL_MS: u64 = 10;

#[derive(Copy, Clone, PartialEq)]
enum Trace {
    None,
    QueueFull(u8),
    QueueEmpty(u8),
    RxReadError(u8, Error),
    TcpcCtrlInitError(u8),
}

ringbuf!(Trace, 32, Trace::None);

impl<B: TcpcBus, P: PdStack> Tcpci<'_, B, P> {
    /// Brings the TCPC to an operational state: waits out its boot,
    /// acknowledges stale alerts, programs the masks, seeds the VBUS
    /// shadow, and caches the identification registers.
    pub fn init(&self, port: usize) -> Result<(), Error> {
        let p = self.port(port)?;

        // Until the stack tells us otherwise, the connection is unknown.
        p.cached_pull.store(CcPull::Open as u8, Ordering::Relaxed);

        // The chip needs time to boot (or reboot) before it will answer
        // sensibly; UNINITIALIZED clears when it is ready.
        let mut tries = INIT_TRIES;
        let power_status = loop {
            let read = self.reg_read8(port, Register::PowerStatus);
            if let Ok(v) = read {
                let status = PowerStatus::from_bits_retain(v);
                if !status.contains(PowerStatus::UNINITIALIZED) {
                    break status;
                }
            }
            tries -= 1;
            if tries == 0 {
                return Err(read.err().unwrap_or(Error::Timeout));
            }
            self.pd.sleep_ms(INIT_POLL_MS);
        };

        // TCPCI 2.0 suppresses Looking4Connection alerts unless asked.
        if p.config.flags.contains(TcpcFlags::TCPCI_V2_0) {
            let r = self.reg_read8(port, Register::TcpcCtrl).and_then(|v| {
                self.reg_write8(
                    port,
                    Register::TcpcCtrl,
                    v | TcpcControl::EN_LOOK4CONNECTION_ALERT.bits(),
                )
            });
            if r.is_err() {
                ringbuf_entry!(Trace::TcpcCtrlInitError(port as u8));
            }
        }

        let _ = self.reg_write16(port, Register::Alert, Alert::MASK_ALL.bits());
        let _ = self.init_power_status_mask(port);

        let vbus = power_status.contains(PowerStatus::VBUS_PRESENT);
        p.vbus_present.store(vbus, Ordering::Relaxed);
        if self.config.vbus_detect_tcpc && self.config.usb_charger {
            // In case the chip never raises a power-status alert for the
            // state it booted into.
            self.pd.vbus_change(port, vbus);
        }

        self.init_alert_mask(port)?;

        // The chip is known awake right now; warm the info cache.
        let _ = self.get_chip_info(port, true);

        Ok(())
    }

    fn init_power_status_mask(&self, port: usize) -> Result<(), Error> {
        let mask = if self.config.vbus_detect_tcpc {
            PowerStatus::VBUS_PRESENT
        } else {
            PowerStatus::empty()
        };
        self.reg_write8(port, Register::PowerStatusMask, mask.bits())
    }

    fn init_alert_mask(&self, port: usize) -> Result<(), Error> {
        // Alert events that should assert the alert line.
        let mut mask = Alert::TX_SUCCESS
            | Alert::TX_FAILED
            | Alert::TX_DISCARDED
            | Alert::RX_STATUS
            | Alert::RX_HARD_RESET
            | Alert::CC_STATUS;
        if self.config.vbus_detect_tcpc {
            mask |= Alert::POWER_STATUS;
        }
        self.reg_write16(port, Register::AlertMask, mask.bits())?;

        if self.config.fast_role_swap {
            // Sink fast role swap allowed.
            self.reg_write8(
                port,
                Register::AlertExtended,
                AlertExtended::SNK_FAST_ROLE_SWAP.bits(),
            )?;
        }
        Ok(())
    }

    /// Dissociates from the TCPC: masks every alert source and
    /// acknowledges anything pending. Shadow state is left in place.
    pub fn release(&self, port: usize) -> Result<(), Error> {
        self.port(port)?;
        self.reg_write16(port, Register::AlertMask, 0)?;
        self.reg_write8(port, Register::PowerStatusMask, 0)?;
        self.reg_write16(port, Register::Alert, Alert::MASK_ALL.bits())
    }

    /// Reads both CC lines, deriving the presenting-Rd flag from
    /// ConnectResult while DRP is toggling and from the commanded
    /// ROLE_CONTROL pulls otherwise.
    pub fn get_cc(&self, port: usize) -> Result<(CcVoltage, CcVoltage), Error> {
        self.port(port)?;

        let role = RoleControl(self.reg_read8(port, Register::RoleCtrl)?);
        let status = CcStatus(self.reg_read8(port, Register::CcStatus)?);

        let cc1_state = status.cc1_state();
        let cc2_state = status.cc2_state();

        let (cc1_rd, cc2_rd) = if role.drp() {
            // The toggle owns the pulls; ConnectResult says where it
            // landed.
            let term = status.connect_result();
            (cc1_state != 0 && term, cc2_state != 0 && term)
        } else {
            (
                cc1_state != 0 && role.cc1() == CcPull::Rd as u8,
                cc2_state != 0 && role.cc2() == CcPull::Rd as u8,
            )
        };

        Ok((
            CcVoltage::from_state(cc1_state, cc1_rd),
            CcVoltage::from_state(cc2_state, cc2_rd),
        ))
    }

    /// Records the Rp level for the next `set_cc`; no chip I/O happens
    /// here.
    pub fn select_rp_value(&self, port: usize, rp: RpValue) -> Result<(), Error> {
        self.set_cached_rp(port, rp)
    }

    pub fn set_cached_rp(&self, port: usize, rp: RpValue) -> Result<(), Error> {
        self.port(port)?.cached_rp.store(rp as u8, Ordering::Relaxed);
        Ok(())
    }

    pub fn get_cached_rp(&self, port: usize) -> Result<RpValue, Error> {
        Ok(self.port(port)?.rp())
    }

    pub fn set_cached_pull(&self, port: usize, pull: CcPull) -> Result<(), Error> {
        self.port(port)?
            .cached_pull
            .store(pull as u8, Ordering::Relaxed);
        Ok(())
    }

    pub fn get_cached_pull(&self, port: usize) -> Result<CcPull, Error> {
        Ok(self.port(port)?.pull())
    }

    /// Commands the CC pulls, using the cached Rp level. While the
    /// polarity is known only the attached line is driven; the other is
    /// opened so the chip behaves across partner disconnects.
    pub fn set_cc(&self, port: usize, pull: CcPull) -> Result<(), Error> {
        let p = self.port(port)?;
        p.cached_pull.store(pull as u8, Ordering::Relaxed);

        let (mut cc1, mut cc2) = (pull, pull);
        match self.pd.polarity(port) {
            Some(Polarity::Cc1) => cc2 = CcPull::Open,
            Some(Polarity::Cc2) => cc1 = CcPull::Open,
            // Unknown or debug accessory: drive both lines.
            _ => {}
        }

        self.reg_write8(
            port,
            Register::RoleCtrl,
            RoleControl::encode(false, p.rp(), cc1, cc2),
        )
    }

    /// Applies the connection polarity: re-asserts the pulls (so the
    /// one-line rule above takes effect) and then points the chip at the
    /// right CC line.
    pub fn set_polarity(&self, port: usize, polarity: Option<Polarity>) -> Result<(), Error> {
        let p = self.port(port)?;
        self.set_cc(port, p.pull())?;

        let Some(polarity) = polarity else {
            return Ok(());
        };

        self.reg_update8(
            port,
            Register::TcpcCtrl,
            TcpcControl::PLUG_ORIENTATION.bits(),
            if polarity.rm_dts() == Polarity::Cc2 {
                MaskUpdate::Set
            } else {
                MaskUpdate::Clear
            },
        )
    }

    pub fn set_vconn(&self, port: usize, enable: bool) -> Result<(), Error> {
        let p = self.port(port)?;
        let reg = self.reg_read8(port, Register::PowerCtrl)?;

        if self.config.decode_sop {
            p.vconn_enabled.store(enable, Ordering::Relaxed);

            // Only the VCONN source may talk to the cable plugs; track the
            // grant in RX_DETECT while reception is on.
            if p.rx_enabled.load(Ordering::Relaxed) {
                let detect = if enable {
                    RxDetect::SOP_SOPP_SOPPP_HRST
                } else {
                    RxDetect::SOP_HRST
                };
                let _ = self.reg_write8(port, Register::RxDetect, detect.bits());
            }
        }

        let mut ctrl = PowerControl::from_bits_retain(reg);
        ctrl.set(PowerControl::ENABLE_VCONN, enable);
        self.reg_write8(port, Register::PowerCtrl, ctrl.bits())
    }

    pub fn set_msg_header(
        &self,
        port: usize,
        power: PowerRole,
        data: DataRole,
    ) -> Result<(), Error> {
        self.port(port)?;
        let mut info = MessageHeaderInfo(0);
        info.set_power_role(power == PowerRole::Source);
        info.set_pd_rev(PD_REV_2_0);
        info.set_data_role(data == DataRole::Dfp);
        self.reg_write8(port, Register::MsgHdrInfo, info.0)
    }

    pub fn set_rx_enable(&self, port: usize, enable: bool) -> Result<(), Error> {
        let p = self.port(port)?;
        let mut detect = RxDetect::empty();

        if enable {
            detect = RxDetect::SOP_HRST;
            if self.config.decode_sop {
                p.rx_enabled.store(enable, Ordering::Relaxed);
                if p.vconn_enabled.load(Ordering::Relaxed) {
                    detect = RxDetect::SOP_SOPP_SOPPP_HRST;
                }
            }
        }

        self.reg_write8(port, Register::RxDetect, detect.bits())
    }

    /// Stages and fires one PD message. The data-object count comes from
    /// the header, as the chip's own framing does.
    pub fn transmit(
        &self,
        port: usize,
        ty: TxType,
        header: u16,
        data: &[u32],
    ) -> Result<(), Error> {
        let p = self.port(port)?;

        if !ty.is_sop_star() {
            // Hard reset, cable reset, BIST: nothing to stage, and the
            // retry field is ignored for these types anyway.
            return self.reg_write8(port, Register::Transmit, transmit_without_retry(ty));
        }

        let obj_count = pd_header_count(header);
        if data.len() < obj_count {
            return Err(Error::Param);
        }
        let cnt = 4 * obj_count;

        let mut buf = [0u8; MAX_PAYLOAD_BYTES];
        for (chunk, obj) in buf.chunks_exact_mut(4).zip(data.iter()) {
            chunk.copy_from_slice(&obj.to_le_bytes());
        }
        let payload = &buf[..cnt];

        if p.config.flags.contains(TcpcFlags::TCPCI_V2_0) {
            // TX_BYTE_CNT and the buffer bytes share one register window;
            // the whole frame goes out as a single locked transaction.
            self.tcpc_lock(port, true);
            let mut rv = self.xfer_unlocked(
                port,
                &[Register::TX_BUFFER as u8],
                &mut [],
                XferFlags::START,
            );
            // The byte count covers the header as well.
            rv = rv.and(self.xfer_unlocked(
                port,
                &[(cnt + 2) as u8],
                &mut [],
                XferFlags::empty(),
            ));
            rv = rv.and(self.xfer_unlocked(port, &header.to_le_bytes(), &mut [], XferFlags::empty()));
            rv = rv.and(self.xfer_unlocked(port, payload, &mut [], XferFlags::STOP));
            self.tcpc_lock(port, false);
            rv?;
        } else {
            let r1 = self.reg_write8(port, Register::TxByteCnt, (cnt + 2) as u8);
            let r2 = self.reg_write16(port, Register::TxHdr, header);
            r1.and(r2)?;
            if cnt > 0 {
                self.reg_write_block(port, Register::TxData, payload)?;
            }
        }

        // A discarded SOP is resent by the protocol layer, but a discarded
        // SOP' is not; keep the chip from retrying those on its own.
        let encoded = if ty == TxType::SopPrime {
            transmit_without_retry(ty)
        } else {
            transmit_with_retry(ty)
        };
        self.reg_write8(port, Register::Transmit, encoded)
    }

    /// Reads one message straight out of the chip. Every path through
    /// here, error or not, acknowledges ALERT.RX_STATUS.
    pub fn get_message_raw(&self, port: usize) -> Result<Message, Error> {
        let p = self.port(port)?;
        let v2 = p.config.flags.contains(TcpcFlags::TCPCI_V2_0);
        let mut msg = Message::empty();
        self.fetch_message(port, v2, &mut msg)?;
        Ok(msg)
    }

    pub(crate) fn fetch_message(
        &self,
        port: usize,
        v2: bool,
        msg: &mut Message,
    ) -> Result<(), Error> {
        if v2 {
            self.fetch_message_v2(port, msg)
        } else {
            self.fetch_message_v1(port, msg)
        }
    }

    fn fetch_message_v1(&self, port: usize, msg: &mut Message) -> Result<(), Error> {
        let result = self.read_message_v1(port, msg);
        // Read complete; acknowledge the RX alert no matter how it went.
        let _ = self.reg_write16(port, Register::Alert, Alert::RX_STATUS.bits());
        result
    }

    fn read_message_v1(&self, port: usize, msg: &mut Message) -> Result<(), Error> {
        let cnt = match self.reg_read8(port, Register::RxByteCnt) {
            Ok(v) => v as usize,
            Err(_) => return Err(Error::Unknown),
        };
        // The count includes the frame-type byte and two header bytes.
        if cnt < 3 {
            return Err(Error::Unknown);
        }
        let cnt = cnt - 3;
        if cnt > MAX_PAYLOAD_BYTES {
            return Err(Error::Unknown);
        }

        let mut frame_type = 0;
        if self.config.decode_sop {
            frame_type = match self.reg_read8(port, Register::RxBufFrameType) {
                Ok(v) => v,
                Err(_) => return Err(Error::Unknown),
            };
        }

        let header = self.reg_read16(port, Register::RxHdr)?;
        msg.header = if self.config.decode_sop {
            // Frame type rides in the top nibble of the stored header.
            u32::from(header) | pd_header_sop(frame_type & 7)
        } else {
            u32::from(header)
        };

        if cnt > 0 {
            let mut buf = [0u8; MAX_PAYLOAD_BYTES];
            let _ = self.reg_read_block(port, Register::RxData, &mut buf[..cnt]);
            copy_payload(msg, &buf[..cnt]);
        }
        Ok(())
    }

    fn fetch_message_v2(&self, port: usize, msg: &mut Message) -> Result<(), Error> {
        self.tcpc_lock(port, true);
        let result = self.read_message_v2(port, msg);
        self.tcpc_lock(port, false);
        let _ = self.reg_write16(port, Register::Alert, Alert::RX_STATUS.bits());
        result
    }

    fn read_message_v2(&self, port: usize, msg: &mut Message) -> Result<(), Error> {
        // The buffer window leads with the readable byte count and the
        // frame type.
        let mut lead = [0u8; 2];
        if self
            .xfer_unlocked(port, &[Register::RX_BUFFER as u8], &mut lead, XferFlags::START)
            .is_err()
        {
            return Err(Error::Unknown);
        }
        let frame_type = lead[1];
        // The count includes the frame-type byte and two header bytes.
        let cnt = i32::from(lead[0]) - 3;
        if cnt > MAX_PAYLOAD_BYTES as i32 {
            return Err(Error::Unknown);
        }

        let mut hdr = [0u8; 2];
        let flags = if cnt != 0 {
            XferFlags::empty()
        } else {
            XferFlags::STOP
        };
        let rv = self.xfer_unlocked(port, &[], &mut hdr, flags);

        msg.header = u32::from(u16::from_le_bytes(hdr)) | pd_header_sop(frame_type & 7);

        if rv.is_ok() && cnt > 0 {
            let mut buf = [0u8; MAX_PAYLOAD_BYTES];
            let _ = self.xfer_unlocked(port, &[], &mut buf[..cnt as usize], XferFlags::STOP);
            copy_payload(msg, &buf[..cnt as usize]);
        }
        rv
    }

    /// Producer side of the receive queue; safe to call from the alert
    /// path. On success the PD task is woken to come collect.
    pub fn enqueue_message(&self, port: usize) -> Result<(), Error> {
        let p = self.port(port)?;
        let v2 = p.config.flags.contains(TcpcFlags::TCPCI_V2_0);

        let result = p.rx.enqueue_with(|slot| self.fetch_message(port, v2, slot));
        match result {
            Ok(()) => {
                self.pd.set_event(port, Event::WAKE);
                Ok(())
            }
            Err(Error::Overflow) => {
                // Leave the message in the chip; RX_STATUS stays asserted
                // and the alert will re-fire once there is room.
                ringbuf_entry!(Trace::QueueFull(port as u8));
                Err(Error::Overflow)
            }
            Err(e) => {
                ringbuf_entry!(Trace::RxReadError(port as u8, e));
                Err(e)
            }
        }
    }

    pub fn has_pending_message(&self, port: usize) -> bool {
        self.port(port).map(|p| p.rx.has_pending()).unwrap_or(false)
    }

    /// Consumer side of the receive queue; PD-task context.
    pub fn dequeue_message(&self, port: usize) -> Result<Message, Error> {
        let p = self.port(port)?;
        p.rx.dequeue().map_err(|e| {
            ringbuf_entry!(Trace::QueueEmpty(port as u8));
            e
        })
    }

    pub fn clear_pending_messages(&self, port: usize) {
        if let Ok(p) = self.port(port) {
            p.rx.clear();
        }
    }

    pub fn discharge_vbus(&self, port: usize, enable: bool) -> Result<(), Error> {
        self.port(port)?;
        self.reg_update8(
            port,
            Register::PowerCtrl,
            PowerControl::FORCE_DISCHARGE.bits(),
            set_or_clear(enable),
        )
    }

    /// Auto discharge disconnect is turned on once attached and off again
    /// after the disconnect has dropped VBUS to vSafe0V.
    pub fn enable_auto_discharge_disconnect(
        &self,
        port: usize,
        enable: bool,
    ) -> Result<(), Error> {
        self.port(port)?;
        self.reg_update8(
            port,
            Register::PowerCtrl,
            PowerControl::AUTO_DISCHARGE_DISCONNECT.bits(),
            set_or_clear(enable),
        )
    }

    pub fn fast_role_swap_enable(&self, port: usize, enable: bool) -> Result<(), Error> {
        self.port(port)?;
        self.reg_update8(
            port,
            Register::PowerCtrl,
            PowerControl::FAST_ROLE_SWAP_ENABLE.bits(),
            set_or_clear(enable),
        )
    }

    /// Hands connection detection to the chip: advertise Rp USB, present
    /// Rd, and kick off Look4Connection.
    pub fn drp_toggle(&self, port: usize) -> Result<(), Error> {
        self.port(port)?;
        let role = RoleControl::encode(true, RpValue::Usb, CcPull::Rd, CcPull::Rd);
        let rv = self.reg_write8(port, Register::RoleCtrl, role);
        let cmd = self.reg_write8(port, Register::Command, Command::Look4Connection as u8);
        rv.and(cmd)
    }

    pub fn set_snk_ctrl(&self, port: usize, enable: bool) -> Result<(), Error> {
        self.port(port)?;
        let cmd = if enable {
            Command::SinkVbus
        } else {
            Command::DisableSinkVbus
        };
        self.reg_write8(port, Register::Command, cmd as u8)
    }

    pub fn set_src_ctrl(&self, port: usize, enable: bool) -> Result<(), Error> {
        self.port(port)?;
        let cmd = if enable {
            Command::SourceVbusDefault
        } else {
            Command::DisableSourceVbus
        };
        self.reg_write8(port, Register::Command, cmd as u8)
    }

    pub fn enter_low_power_mode(&self, port: usize) -> Result<(), Error> {
        self.port(port)?;
        self.reg_write8(port, Register::Command, Command::I2cIdle as u8)
    }

    pub fn get_vbus_level(&self, port: usize) -> bool {
        self.port(port)
            .map(|p| p.vbus_present.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Returns the identification registers, reading them from the chip
    /// when asked for live data or when nothing is cached yet.
    pub fn get_chip_info(&self, port: usize, live: bool) -> Result<ChipInfo, Error> {
        let p = self.port(port)?;

        if !live && p.vendor_id.load(Ordering::Relaxed) != 0 {
            return Ok(p.chip_info());
        }

        let vendor = self.reg_read16(port, Register::VendorId)?;
        p.vendor_id.store(vendor, Ordering::Relaxed);
        let product = self.reg_read16(port, Register::ProductId)?;
        p.product_id.store(product, Ordering::Relaxed);
        let device = self.reg_read16(port, Register::BcdDev)?;
        p.device_id.store(device, Ordering::Relaxed);

        // Chip-specific drivers overwrite this when they can do better.
        p.fw_version.store(FW_VERSION_UNKNOWN, Ordering::Relaxed);

        Ok(p.chip_info())
    }

    /// Overrides the cached firmware version; for chip-specific drivers
    /// that know how to read one.
    pub fn set_cached_fw_version(&self, port: usize, version: u32) -> Result<(), Error> {
        self.port(port)?
            .fw_version
            .store(version as i32, Ordering::Relaxed);
        Ok(())
    }

    /// Reads every register in [`DUMP_REGISTERS`] and hands the values to
    /// `sink`; registers that fail to read are skipped.
    pub fn dump_registers<F>(&self, port: usize, mut sink: F) -> Result<(), Error>
    where
        F: FnMut(Register, RegisterSize, u16),
    {
        self.port(port)?;
        for &(reg, size) in DUMP_REGISTERS {
            match size {
                RegisterSize::Byte => {
                    if let Ok(v) = self.reg_read8(port, reg) {
                        sink(reg, size, u16::from(v));
                    }
                }
                RegisterSize::Word => {
                    if let Ok(v) = self.reg_read16(port, reg) {
                        sink(reg, size, v);
                    }
                }
            }
        }
        Ok(())
    }
}

fn set_or_clear(enable: bool) -> MaskUpdate {
    if enable {
        MaskUpdate::Set
    } else {
        MaskUpdate::Clear
    }
}

fn copy_payload(msg: &mut Message, bytes: &[u8]) {
    for (i, chunk) in bytes.chunks(4).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        msg.payload[i] = u32::from_le_bytes(word);
    }
}

impl<B: TcpcBus, P: PdStack> TcpmDriver for Tcpci<'_, B, P> {
    fn init(&self, port: usize) -> Result<(), Error> {
        Tcpci::init(self, port)
    }
    fn release(&self, port: usize) -> Result<(), Error> {
        Tcpci::release(self, port)
    }
    fn get_cc(&self, port: usize) -> Result<(CcVoltage, CcVoltage), Error> {
        Tcpci::get_cc(self, port)
    }
    fn get_vbus_level(&self, port: usize) -> bool {
        Tcpci::get_vbus_level(self, port)
    }
    fn select_rp_value(&self, port: usize, rp: RpValue) -> Result<(), Error> {
        Tcpci::select_rp_value(self, port, rp)
    }
    fn set_cc(&self, port: usize, pull: CcPull) -> Result<(), Error> {
        Tcpci::set_cc(self, port, pull)
    }
    fn set_polarity(&self, port: usize, polarity: Option<Polarity>) -> Result<(), Error> {
        Tcpci::set_polarity(self, port, polarity)
    }
    fn set_vconn(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::set_vconn(self, port, enable)
    }
    fn set_msg_header(&self, port: usize, power: PowerRole, data: DataRole) -> Result<(), Error> {
        Tcpci::set_msg_header(self, port, power, data)
    }
    fn set_rx_enable(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::set_rx_enable(self, port, enable)
    }
    fn get_message_raw(&self, port: usize) -> Result<Message, Error> {
        Tcpci::get_message_raw(self, port)
    }
    fn transmit(&self, port: usize, ty: TxType, header: u16, data: &[u32]) -> Result<(), Error> {
        Tcpci::transmit(self, port, ty, header, data)
    }
    fn alert(&self, port: usize) {
        Tcpci::alert(self, port)
    }
    fn discharge_vbus(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::discharge_vbus(self, port, enable)
    }
    fn enable_auto_discharge_disconnect(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::enable_auto_discharge_disconnect(self, port, enable)
    }
    fn drp_toggle(&self, port: usize) -> Result<(), Error> {
        Tcpci::drp_toggle(self, port)
    }
    fn get_chip_info(&self, port: usize, live: bool) -> Result<ChipInfo, Error> {
        Tcpci::get_chip_info(self, port, live)
    }
    fn set_snk_ctrl(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::set_snk_ctrl(self, port, enable)
    }
    fn set_src_ctrl(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::set_src_ctrl(self, port, enable)
    }
    fn enter_low_power_mode(&self, port: usize) -> Result<(), Error> {
        Tcpci::enter_low_power_mode(self, port)
    }
    fn fast_role_swap_enable(&self, port: usize, enable: bool) -> Result<(), Error> {
        Tcpci::fast_role_swap_enable(self, port, enable)
    }
}
