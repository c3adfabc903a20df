// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCPCI register map.
//!
//! Addresses and bit assignments follow the USB-IF Type-C Port Controller
//! Interface specification; both the 1.0 and 2.0 revisions use this layout.
//! All 16-bit registers are little-endian on the wire.

use bitfield::bitfield;
use bitflags::bitflags;
use num_derive::FromPrimitive;

use crate::{CcPull, RpValue, TxType};

#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum Register {
    VendorId = 0x00,
    ProductId = 0x02,
    BcdDev = 0x04,
    TcRev = 0x06,
    PdRev = 0x08,
    PdIntRev = 0x0a,
    Alert = 0x10,
    AlertMask = 0x12,
    PowerStatusMask = 0x14,
    FaultStatusMask = 0x15,
    ExtendedStatusMask = 0x16,
    AlertExtendedMask = 0x17,
    ConfigStdOutput = 0x18,
    TcpcCtrl = 0x19,
    RoleCtrl = 0x1a,
    FaultCtrl = 0x1b,
    PowerCtrl = 0x1c,
    CcStatus = 0x1d,
    PowerStatus = 0x1e,
    FaultStatus = 0x1f,
    ExtendedStatus = 0x20,
    AlertExtended = 0x21,
    Command = 0x23,
    DevCap1 = 0x24,
    DevCap2 = 0x26,
    StdInputCap = 0x28,
    StdOutputCap = 0x29,
    ConfigExt1 = 0x2a,
    MsgHdrInfo = 0x2e,
    RxDetect = 0x2f,
    RxByteCnt = 0x30,
    RxBufFrameType = 0x31,
    RxHdr = 0x32,
    RxData = 0x34,
    Transmit = 0x50,
    TxByteCnt = 0x51,
    TxHdr = 0x52,
    TxData = 0x54,
    VbusVoltage = 0x70,
    VbusSinkDisconnectThresh = 0x72,
    VbusStopDischargeThresh = 0x74,
    VbusVoltageAlarmHiCfg = 0x76,
    VbusVoltageAlarmLoCfg = 0x78,
}

impl Register {
    /// In TCPCI 2.0 the readable-byte-count register doubles as a window
    /// onto the whole receive buffer.
    pub const RX_BUFFER: Register = Register::RxByteCnt;
    /// Likewise for the transmit side.
    pub const TX_BUFFER: Register = Register::TxByteCnt;
}

bitflags! {
    /// ALERT and ALERT_MASK bit assignments. ALERT is write-one-to-clear.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Alert: u16 {
        const CC_STATUS = 1 << 0;
        const POWER_STATUS = 1 << 1;
        const RX_STATUS = 1 << 2;
        const RX_HARD_RESET = 1 << 3;
        const TX_FAILED = 1 << 4;
        const TX_DISCARDED = 1 << 5;
        const TX_SUCCESS = 1 << 6;
        const VBUS_ALARM_HI = 1 << 7;
        const VBUS_ALARM_LO = 1 << 8;
        const FAULT = 1 << 9;
        const RX_BUFFER_OVERFLOW = 1 << 10;
        const VBUS_SINK_DISCONNECT = 1 << 11;
        const BEGINNING_SOP_MESSAGE = 1 << 12;
        const EXTENDED_STATUS = 1 << 13;
        const ALERT_EXTENDED = 1 << 14;
        const VENDOR_DEFINED = 1 << 15;
    }
}

impl Alert {
    /// Any transmit outcome.
    pub const TX_COMPLETE: Alert = Alert::TX_SUCCESS
        .union(Alert::TX_FAILED)
        .union(Alert::TX_DISCARDED);
    /// ALERT_MASK value after chip reset.
    pub const MASK_ALL: Alert = Alert::all();
}

bitflags! {
    /// ALERT_EXTENDED bit assignments (also write-one-to-clear).
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct AlertExtended: u8 {
        const SNK_FAST_ROLE_SWAP = 1 << 0;
        const SRC_FAST_ROLE_SWAP = 1 << 1;
        const TIMER_EXPIRED = 1 << 2;
    }
}

bitflags! {
    /// POWER_STATUS and POWER_STATUS_MASK bit assignments.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct PowerStatus: u8 {
        const SINKING_VBUS = 1 << 0;
        const VCONN_PRESENT = 1 << 1;
        const VBUS_PRESENT = 1 << 2;
        const VBUS_DETECT_ENABLED = 1 << 3;
        const SOURCING_VBUS = 1 << 4;
        const SOURCING_HIGH_VOLTAGE = 1 << 5;
        const UNINITIALIZED = 1 << 6;
        const DEBUG_ACCESSORY = 1 << 7;
    }
}

impl PowerStatus {
    /// POWER_STATUS_MASK value after chip reset.
    pub const MASK_ALL: PowerStatus = PowerStatus::all();
}

bitflags! {
    /// TCPC_CONTROL bits this driver touches.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct TcpcControl: u8 {
        /// Set when the connection is on CC2.
        const PLUG_ORIENTATION = 1 << 0;
        /// TCPCI 2.0: raise ALERT.CC_STATUS on Looking4Connection changes.
        const EN_LOOK4CONNECTION_ALERT = 1 << 6;
        const _ = !0;
    }
}

bitflags! {
    /// POWER_CONTROL bit assignments.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct PowerControl: u8 {
        const ENABLE_VCONN = 1 << 0;
        const VCONN_POWER_SUPPORTED = 1 << 1;
        const FORCE_DISCHARGE = 1 << 2;
        const BLEED_DISCHARGE = 1 << 3;
        const AUTO_DISCHARGE_DISCONNECT = 1 << 4;
        const DISABLE_VOLTAGE_ALARMS = 1 << 5;
        const VBUS_MONITOR_DISABLED = 1 << 6;
        const FAST_ROLE_SWAP_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// RX_DETECT: which frame types the TCPC receives.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct RxDetect: u8 {
        const SOP = 1 << 0;
        const SOP_PRIME = 1 << 1;
        const SOP_PRIME_PRIME = 1 << 2;
        const SOP_DEBUG_PRIME = 1 << 3;
        const SOP_DEBUG_PRIME_PRIME = 1 << 4;
        const HARD_RESET = 1 << 5;
        const CABLE_RESET = 1 << 6;
    }
}

impl RxDetect {
    /// Listening set when we are not the VCONN source.
    pub const SOP_HRST: RxDetect = RxDetect::SOP.union(RxDetect::HARD_RESET);
    /// Listening set when we source VCONN and may address the cable plugs.
    pub const SOP_SOPP_SOPPP_HRST: RxDetect = RxDetect::SOP_HRST
        .union(RxDetect::SOP_PRIME)
        .union(RxDetect::SOP_PRIME_PRIME);
}

bitflags! {
    /// CONFIG_STANDARD_OUTPUT bits used by the mux surface.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct ConfigStdOutput: u8 {
        const CONNECTOR_FLIPPED = 1 << 0;
        const MUX_USB = 1 << 2;
        const MUX_DP = 1 << 3;
        const _ = !0;
    }
}

impl ConfigStdOutput {
    pub const MUX_MASK: ConfigStdOutput =
        ConfigStdOutput::MUX_USB.union(ConfigStdOutput::MUX_DP);
}

bitfield! {
    /// ROLE_CONTROL: commanded pulls, Rp level, and DRP toggling.
    pub struct RoleControl(u8);
    pub u8, cc1, set_cc1: 1, 0;
    pub u8, cc2, set_cc2: 3, 2;
    pub u8, rp, set_rp: 5, 4;
    pub drp, set_drp: 6;
}

impl RoleControl {
    pub fn encode(drp: bool, rp: RpValue, cc1: CcPull, cc2: CcPull) -> u8 {
        let mut role = RoleControl(0);
        role.set_drp(drp);
        role.set_rp(rp as u8);
        role.set_cc1(cc1 as u8);
        role.set_cc2(cc2 as u8);
        role.0
    }
}

bitfield! {
    /// CC_STATUS: per-line termination state plus the DRP outcome bits.
    pub struct CcStatus(u8);
    pub u8, cc1_state, _: 1, 0;
    pub u8, cc2_state, _: 3, 2;
    /// Set when the TCPC latched presenting Rd.
    pub connect_result, _: 4;
    pub looking4connection, _: 5;
}

bitfield! {
    /// MESSAGE_HEADER_INFO: roles and PD revision used in GoodCRC replies.
    pub struct MessageHeaderInfo(u8);
    pub power_role, set_power_role: 0;
    pub u8, pd_rev, set_pd_rev: 2, 1;
    pub data_role, set_data_role: 3;
    pub cable_plug, set_cable_plug: 4;
}

/// MESSAGE_HEADER_INFO revision encoding for PD 2.0.
pub const PD_REV_2_0: u8 = 0b01;

/// COMMAND register opcodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    WakeI2c = 0x11,
    DisableVbusDetect = 0x22,
    EnableVbusDetect = 0x33,
    DisableSinkVbus = 0x44,
    SinkVbus = 0x55,
    DisableSourceVbus = 0x66,
    SourceVbusDefault = 0x77,
    SourceVbusHighVoltage = 0x88,
    Look4Connection = 0x99,
    RxOneMore = 0xaa,
    I2cIdle = 0xff,
}

/// TRANSMIT register encoding: three automatic retries.
pub const fn transmit_with_retry(ty: TxType) -> u8 {
    (3 << 4) | ty as u8
}

/// TRANSMIT register encoding: no retry field set.
pub const fn transmit_without_retry(ty: TxType) -> u8 {
    ty as u8
}

/// Width of a register in the dump table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegisterSize {
    Byte,
    Word,
}

/// Registers worth showing in a debug dump, in address order. Write-only
/// and buffer registers are left out.
pub const DUMP_REGISTERS: &[(Register, RegisterSize)] = &[
    (Register::VendorId, RegisterSize::Word),
    (Register::ProductId, RegisterSize::Word),
    (Register::BcdDev, RegisterSize::Word),
    (Register::TcRev, RegisterSize::Word),
    (Register::PdRev, RegisterSize::Word),
    (Register::PdIntRev, RegisterSize::Word),
    (Register::Alert, RegisterSize::Word),
    (Register::AlertMask, RegisterSize::Word),
    (Register::PowerStatusMask, RegisterSize::Byte),
    (Register::FaultStatusMask, RegisterSize::Byte),
    (Register::ExtendedStatusMask, RegisterSize::Byte),
    (Register::AlertExtendedMask, RegisterSize::Byte),
    (Register::ConfigStdOutput, RegisterSize::Byte),
    (Register::TcpcCtrl, RegisterSize::Byte),
    (Register::RoleCtrl, RegisterSize::Byte),
    (Register::FaultCtrl, RegisterSize::Byte),
    (Register::PowerCtrl, RegisterSize::Byte),
    (Register::CcStatus, RegisterSize::Byte),
    (Register::PowerStatus, RegisterSize::Byte),
    (Register::FaultStatus, RegisterSize::Byte),
    (Register::AlertExtended, RegisterSize::Byte),
    (Register::DevCap1, RegisterSize::Word),
    (Register::DevCap2, RegisterSize::Word),
    (Register::StdInputCap, RegisterSize::Byte),
    (Register::StdOutputCap, RegisterSize::Byte),
    (Register::ConfigExt1, RegisterSize::Byte),
    (Register::MsgHdrInfo, RegisterSize::Byte),
    (Register::RxDetect, RegisterSize::Byte),
    (Register::RxByteCnt, RegisterSize::Byte),
    (Register::RxBufFrameType, RegisterSize::Byte),
    (Register::Transmit, RegisterSize::Byte),
    (Register::VbusVoltage, RegisterSize::Word),
    (Register::VbusSinkDisconnectThresh, RegisterSize::Word),
    (Register::VbusStopDischargeThresh, RegisterSize::Word),
    (Register::VbusVoltageAlarmHiCfg, RegisterSize::Word),
    (Register::VbusVoltageAlarmLoCfg, RegisterSize::Word),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_control_encoding() {
        // DRP toggling from Rd with the weakest Rp advertisement.
        assert_eq!(
            RoleControl::encode(true, RpValue::Usb, CcPull::Rd, CcPull::Rd),
            0b0100_1010
        );
        // Plain Rp presentation at 3.0 A on both lines.
        assert_eq!(
            RoleControl::encode(false, RpValue::Rp3A0, CcPull::Rp, CcPull::Rp),
            0b0010_0101
        );
    }

    #[test]
    fn cc_status_fields() {
        let status = CcStatus(0b01_0110);
        assert_eq!(status.cc1_state(), 0b10);
        assert_eq!(status.cc2_state(), 0b01);
        assert!(status.connect_result());
        assert!(!status.looking4connection());
    }

    #[test]
    fn transmit_encoding() {
        assert_eq!(transmit_with_retry(TxType::Sop), 0x30);
        assert_eq!(transmit_without_retry(TxType::HardReset), 0x05);
    }

    #[test]
    fn rx_detect_masks() {
        assert_eq!(RxDetect::SOP_HRST.bits(), 0x21);
        assert_eq!(RxDetect::SOP_SOPP_SOPPP_HRST.bits(), 0x27);
    }

    #[test]
    fn dump_table_is_sorted_and_unique() {
        let mut last = None;
        for &(reg, _) in DUMP_REGISTERS {
            if let Some(prev) = last {
                assert!((reg as u8) > prev, "{reg:?} out of order");
            }
            last = Some(reg as u8);
        }
    }
}
