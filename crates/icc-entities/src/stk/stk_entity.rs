use icc_config::SharedConfig;
use icc_core::icc_entities::IccEntity;
use icc_core::{IccErr, Sap};
use icc_pdus::stk::fields::command_details::CommandDetails;
use icc_pdus::stk::fields::stk_value::StkValue;
use icc_pdus::stk::pdus::stk_command::{StkCommand, StkCommandParams};
use icc_pdus::stk::pdus::terminal_response::TerminalResponse;
use icc_pdus::tlv::ber_tlv::BerTlv;
use icc_pdus::tlv::comprehension_tlv::search_for_tag;
use icc_pdus::tlv::enums::comprehension_tag::ComprehensionTag;
use icc_saps::control::IccControl;
use icc_saps::stk::{StkCommandInd, StkProactiveCmdInd, StkTerminalRsp, StkTerminalRspReq};
use icc_saps::{SapMsg, SapMsgInner};

use crate::stk::cmd_factory::{build_command, refresh_file_ids};
use crate::{IccEntityTrait, MessageQueue};

/// Turns proactive commands from the card into typed commands for the user layer and
/// carries terminal responses back
pub struct StkEntity {
    config: SharedConfig,
}

impl StkEntity {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Decode a raw proactive command, tag 0xD0
    pub fn decode(pdu: &[u8]) -> Result<(BerTlv, CommandDetails), IccErr> {
        let ber = BerTlv::from_bytes(pdu)?;
        let chain = ber.comprehension_tlvs().ok_or(IccErr::MalformedTlv { reason: "not a proactive command" })?;
        let details = match search_for_tag(chain, ComprehensionTag::CommandDetails).map(|c| &c.value) {
            Some(StkValue::CommandDetails(details)) => *details,
            _ => return Err(IccErr::MalformedTlv { reason: "proactive command without command details" }),
        };
        Ok((ber, details))
    }

    fn send_terminal_response(queue: &mut MessageQueue, response: TerminalResponse) {
        match response.to_bytes() {
            Ok(pdu) => {
                tracing::debug!("terminal response {} for {}", response.result, response.command_details);
                let msg = SapMsgInner::StkTerminalRsp(StkTerminalRsp { response, pdu });
                queue.push_back(SapMsg::new(Sap::StkSap, IccEntity::Stk, IccEntity::Ril, msg));
            }
            Err(e) => tracing::error!("cannot encode terminal response: {}", e),
        }
    }

    fn rx_proactive_cmd(&mut self, queue: &mut MessageQueue, ind: StkProactiveCmdInd) {
        let (ber, details) = match Self::decode(&ind.pdu) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!("dropping proactive command: {}", e);
                return;
            }
        };
        let chain = ber.comprehension_tlvs().unwrap_or_default();

        match build_command(details, chain) {
            Ok(Some(command)) => self.deliver(queue, command),
            Ok(None) => tracing::debug!("{} yields no command", details),
            Err(rejected) => {
                tracing::warn!("rejecting {}: {}", details, rejected.error);
                if self.config.config().stk.terminal_response_on_missing {
                    Self::send_terminal_response(queue, rejected.terminal_response());
                }
            }
        }
    }

    fn deliver(&mut self, queue: &mut MessageQueue, command: StkCommand) {
        if let StkCommandParams::Refresh(refresh) = &command.params {
            if let Some(list) = &refresh.file_list {
                let files = refresh_file_ids(list);
                let msg = SapMsgInner::IccControl(IccControl::FilesChanged(files));
                queue.push_back(SapMsg::new(Sap::Control, IccEntity::Stk, IccEntity::IccIo, msg));
            }
        }
        tracing::info!("{}", command);
        let msg = SapMsgInner::StkCommandInd(StkCommandInd { command });
        queue.push_back(SapMsg::new(Sap::StkSap, IccEntity::Stk, IccEntity::User, msg));
    }
}

impl IccEntityTrait for StkEntity {
    fn entity(&self) -> IccEntity {
        IccEntity::Stk
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {}", message.msg);
        match message.msg {
            SapMsgInner::StkProactiveCmdInd(ind) => self.rx_proactive_cmd(queue, ind),
            SapMsgInner::StkTerminalRspReq(StkTerminalRspReq { response }) => {
                Self::send_terminal_response(queue, response);
            }
            other => {
                tracing::warn!("unexpected primitive {} from {:?}", other, message.src);
            }
        }
    }
}
