use icc_config::SharedConfig;
use icc_core::icc_entities::IccEntity;
use icc_core::{IccErr, Sap};
use icc_pdus::sms::pdus::sms_message::{SmsMessage, SmsTpdu};
use icc_pdus::sms::pdus::sms_submit::{encode_submit, segment_text};
use icc_saps::sms::{SmsDeliverInd, SmsPduInd, SmsSendReq, SmsStatusReportInd, SmsSubmitConf, SmsSubmitReq};
use icc_saps::{SapMsg, SapMsgInner};

use crate::{IccEntityTrait, MessageQueue};

/// Decodes incoming SMS and encodes outgoing texts into SUBMIT TPDUs
pub struct SmsEntity {
    config: SharedConfig,
    /// Concatenation reference of the next multi segment message
    next_segment_ref: u16,
}

impl SmsEntity {
    pub fn new(config: SharedConfig) -> Self {
        Self { config, next_segment_ref: 0 }
    }

    /// Encode `text` into one TPDU per segment
    pub fn encode_text(&mut self, number: &str, text: &str) -> Result<Vec<Vec<u8>>, IccErr> {
        let cfg = self.config.config();
        let segment_ref = if cfg.sms.segment_ref_16bit { self.next_segment_ref } else { self.next_segment_ref & 0xFF };
        let segments = segment_text(number, text, segment_ref, cfg.sms.segment_ref_16bit);
        if segments.len() > 1 {
            self.next_segment_ref = self.next_segment_ref.wrapping_add(1);
        }

        let mut tpdus = Vec::with_capacity(segments.len());
        for mut options in segments {
            options.request_status_report = cfg.sms.status_report_request;
            tpdus.push(encode_submit(&options)?);
        }
        Ok(tpdus)
    }

    fn rx_pdu(&mut self, queue: &mut MessageQueue, ind: SmsPduInd) {
        let message = match SmsMessage::from_bytes(&ind.pdu) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("dropping sms pdu: {}", e);
                return;
            }
        };
        tracing::info!("{}", message);
        let msg = match message.tpdu {
            SmsTpdu::Deliver(_) => SapMsgInner::SmsDeliverInd(SmsDeliverInd { message }),
            SmsTpdu::StatusReport(_) => SapMsgInner::SmsStatusReportInd(SmsStatusReportInd { message }),
            SmsTpdu::Submit(_) => {
                tracing::warn!("SMS-SUBMIT received from the network, ignoring");
                return;
            }
        };
        queue.push_back(SapMsg::new(Sap::SmsSap, IccEntity::Sms, IccEntity::User, msg));
    }

    fn rx_submit_req(&mut self, queue: &mut MessageQueue, src: IccEntity, req: SmsSubmitReq) {
        let result = self.encode_text(&req.number, &req.text).and_then(|tpdus| {
            let count = u8::try_from(tpdus.len()).map_err(|_| IccErr::OutOfBounds { field: Some("segment_count") })?;
            for (i, tpdu) in tpdus.into_iter().enumerate() {
                let send = SmsSendReq { handle: req.handle, segment_seq: i as u8 + 1, segment_count: count, tpdu };
                queue.push_back(SapMsg::new(Sap::SmsSap, IccEntity::Sms, IccEntity::Ril, SapMsgInner::SmsSendReq(send)));
            }
            Ok(count)
        });
        if let Err(e) = &result {
            tracing::warn!("cannot send sms {}: {}", req.handle, e);
        }
        let conf = SmsSubmitConf { handle: req.handle, result };
        queue.push_back(SapMsg::new(Sap::SmsSap, IccEntity::Sms, src, SapMsgInner::SmsSubmitConf(conf)));
    }
}

impl IccEntityTrait for SmsEntity {
    fn entity(&self) -> IccEntity {
        IccEntity::Sms
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {}", message.msg);
        let src = message.src;
        match message.msg {
            SapMsgInner::SmsPduInd(ind) => self.rx_pdu(queue, ind),
            SapMsgInner::SmsSubmitReq(req) => self.rx_submit_req(queue, src, req),
            other => {
                tracing::warn!("unexpected primitive {} from {:?}", other, src);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::CardAppType;
    use icc_core::debug;

    #[test]
    fn test_long_text_segments() {
        debug::setup_logging_verbose();
        let mut entity = SmsEntity::new(SharedConfig::new(CardAppType::Usim));
        let text = "a".repeat(200);
        let tpdus = entity.encode_text("+31612345678", &text).unwrap();
        assert_eq!(tpdus.len(), 2);
        // UDHI set in the first octet of each segment
        assert!(tpdus.iter().all(|t| t[0] & 0x40 != 0));
        assert_eq!(entity.next_segment_ref, 1);
    }

    #[test]
    fn test_short_text_single_tpdu() {
        debug::setup_logging_verbose();
        let mut entity = SmsEntity::new(SharedConfig::new(CardAppType::Usim));
        let tpdus = entity.encode_text("12345", "hello").unwrap();
        assert_eq!(tpdus.len(), 1);
        assert_eq!(tpdus[0][0] & 0x40, 0);
        assert_eq!(entity.next_segment_ref, 0);
    }
}
