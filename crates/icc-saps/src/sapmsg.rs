use core::fmt::Display;

use icc_core::Sap;
use icc_core::icc_entities::IccEntity;

use crate::cbs::{CbsMessageInd, CbsPageInd};
use crate::control::IccControl;
use crate::ef::{EfConf, EfReq};
use crate::sim_io::{SimIoReq, SimIoRsp};
use crate::sms::{SmsDeliverInd, SmsPduInd, SmsSendReq, SmsStatusReportInd, SmsSubmitConf, SmsSubmitReq};
use crate::stk::{StkCommandInd, StkProactiveCmdInd, StkTerminalRsp, StkTerminalRspReq};

/// Exhaustive list of primitives for use in the SapMsg struct
#[derive(Debug)]
pub enum SapMsgInner {
    // SIM-IO SAP
    SimIoReq(SimIoReq),
    SimIoRsp(SimIoRsp),

    // EF SAP
    EfReq(EfReq),
    EfConf(EfConf),

    // STK SAP
    StkProactiveCmdInd(StkProactiveCmdInd),
    StkCommandInd(StkCommandInd),
    StkTerminalRspReq(StkTerminalRspReq),
    StkTerminalRsp(StkTerminalRsp),

    // CBS SAP
    CbsPageInd(CbsPageInd),
    CbsMessageInd(CbsMessageInd),

    // SMS SAP
    SmsPduInd(SmsPduInd),
    SmsDeliverInd(SmsDeliverInd),
    SmsStatusReportInd(SmsStatusReportInd),
    SmsSubmitReq(SmsSubmitReq),
    SmsSubmitConf(SmsSubmitConf),
    SmsSendReq(SmsSendReq),

    IccControl(IccControl),
}

impl Display for SapMsgInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SapMsgInner::SimIoReq(_) => write!(f, "SimIoReq"),
            SapMsgInner::SimIoRsp(_) => write!(f, "SimIoRsp"),

            SapMsgInner::EfReq(_) => write!(f, "EfReq"),
            SapMsgInner::EfConf(_) => write!(f, "EfConf"),

            SapMsgInner::StkProactiveCmdInd(_) => write!(f, "StkProactiveCmdInd"),
            SapMsgInner::StkCommandInd(_) => write!(f, "StkCommandInd"),
            SapMsgInner::StkTerminalRspReq(_) => write!(f, "StkTerminalRspReq"),
            SapMsgInner::StkTerminalRsp(_) => write!(f, "StkTerminalRsp"),

            SapMsgInner::CbsPageInd(_) => write!(f, "CbsPageInd"),
            SapMsgInner::CbsMessageInd(_) => write!(f, "CbsMessageInd"),

            SapMsgInner::SmsPduInd(_) => write!(f, "SmsPduInd"),
            SapMsgInner::SmsDeliverInd(_) => write!(f, "SmsDeliverInd"),
            SapMsgInner::SmsStatusReportInd(_) => write!(f, "SmsStatusReportInd"),
            SapMsgInner::SmsSubmitReq(_) => write!(f, "SmsSubmitReq"),
            SapMsgInner::SmsSubmitConf(_) => write!(f, "SmsSubmitConf"),
            SapMsgInner::SmsSendReq(_) => write!(f, "SmsSendReq"),

            SapMsgInner::IccControl(_) => write!(f, "IccControl"),
        }
    }
}

#[derive(Debug)]
pub struct SapMsg {
    pub sap: Sap,
    pub src: IccEntity,
    pub dest: IccEntity,
    pub msg: SapMsgInner,
}

impl SapMsg {
    pub fn new(sap: Sap, src: IccEntity, dest: IccEntity, msg: SapMsgInner) -> Self {
        Self { sap, src, dest, msg }
    }

    pub fn get_source(&self) -> &IccEntity {
        &self.src
    }
    pub fn get_dest(&self) -> &IccEntity {
        &self.dest
    }
    pub fn get_sap(&self) -> &Sap {
        &self.sap
    }
}
