mod common;

use icc_core::gsm_alphabet::NL_IDENTIFIER_DEFAULT;
use icc_core::icc_entities::IccEntity;
use icc_core::{CardAppType, OctetBuffer, Sap, debug};
use icc_pdus::cbs::pdus::cb_message::CB_PAGE_INFO_SIZE;
use icc_pdus::sms::pdus::sms_message::{SmsMessage, SmsTpdu};
use icc_saps::cbs::CbsPageInd;
use icc_saps::sms::{SmsPduInd, SmsSubmitReq};
use icc_saps::{SapMsg, SapMsgInner};

use common::{ComponentTest, default_test_config};

const DELIVER_HELLO: &str = "07917283010010F5040BC87238880900F10000993092516195800AE8329BFD4697D9EC37";
const STATUS_REPORT: &str = "0006050B914121436587F921801241907520218012419075200000";

/// GSM page of message id 0x0032, serial 0x4011, padded with CR
fn gsm_page(page: u8, text: &str) -> Vec<u8> {
    let mut buf = OctetBuffer::new();
    buf.write_octets(&[0x40, 0x11, 0x00, 0x32, 0x01, page]);
    let septets = CB_PAGE_INFO_SIZE * 8 / 7;
    let padded = format!("{}{}", text, "\r".repeat(septets - text.chars().count()));
    buf.write_septets(&padded, 0, NL_IDENTIFIER_DEFAULT, NL_IDENTIFIER_DEFAULT).unwrap();
    buf.into_bytes()
}

fn page_ind(pdu: Vec<u8>) -> SapMsg {
    SapMsg::new(Sap::CbsSap, IccEntity::Ril, IccEntity::Cbs, SapMsgInner::CbsPageInd(CbsPageInd { pdu }))
}

fn sms_test() -> ComponentTest {
    let mut test = ComponentTest::new(default_test_config(CardAppType::Usim));
    test.populate_entities(vec![IccEntity::Sms, IccEntity::Cbs], vec![IccEntity::User, IccEntity::Ril]);
    test
}

#[test]
fn test_cb_pages_reassembled() {
    debug::setup_logging_verbose();
    let mut test = sms_test();
    test.submit_message(page_ind(gsm_page(0x22, "second")));
    test.run_until_idle();
    assert!(test.dump_sinks().is_empty());

    test.submit_message(page_ind(gsm_page(0x12, "first ")));
    test.run_until_idle();
    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].dest, IccEntity::User);
    let SapMsgInner::CbsMessageInd(ind) = &msgs[0].msg else {
        panic!("unexpected {}", msgs[0].msg);
    };
    assert_eq!(ind.message.message_id, 0x0032);
    assert_eq!(ind.message.language.as_deref(), Some("en"));
    assert_eq!(ind.message.body.as_deref(), Some("first second"));
}

#[test]
fn test_cb_garbage_dropped() {
    debug::setup_logging_verbose();
    let mut test = sms_test();
    test.submit_message(page_ind(vec![0x00, 0x11, 0x00]));
    test.submit_message(page_ind(vec![0u8; 89]));
    test.run_until_idle();
    assert!(test.dump_sinks().is_empty());
}

#[test]
fn test_sms_deliver_and_status_report() {
    debug::setup_logging_verbose();
    let mut test = sms_test();
    for hex in [DELIVER_HELLO, STATUS_REPORT] {
        let pdu = icc_core::octet_buffer::hex_to_bytes(hex).unwrap();
        let msg = SapMsgInner::SmsPduInd(SmsPduInd { pdu });
        test.submit_message(SapMsg::new(Sap::SmsSap, IccEntity::Ril, IccEntity::Sms, msg));
    }
    test.run_until_idle();

    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 2);
    let SapMsgInner::SmsDeliverInd(deliver) = &msgs[0].msg else {
        panic!("unexpected {}", msgs[0].msg);
    };
    assert_eq!(deliver.message.tpdu.body(), Some("hellohello"));
    let SapMsgInner::SmsStatusReportInd(report) = &msgs[1].msg else {
        panic!("unexpected {}", msgs[1].msg);
    };
    let SmsTpdu::StatusReport(report) = &report.message.tpdu else {
        panic!("expected status report");
    };
    assert_eq!(report.message_reference, 5);
}

#[test]
fn test_sms_submit_segmented() {
    debug::setup_logging_verbose();
    let mut test = sms_test();
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(4);
    let req = SmsSubmitReq { handle: 11, number: "+31612345678".to_string(), text: text.clone() };
    test.submit_message(SapMsg::new(Sap::SmsSap, IccEntity::User, IccEntity::Sms, SapMsgInner::SmsSubmitReq(req)));
    test.run_until_idle();

    let msgs = test.dump_sinks();
    let mut sends = Vec::new();
    let mut confs = Vec::new();
    for msg in msgs {
        match msg.msg {
            SapMsgInner::SmsSendReq(send) => {
                assert_eq!(msg.dest, IccEntity::Ril);
                sends.push(send);
            }
            SapMsgInner::SmsSubmitConf(conf) => confs.push(conf),
            other => panic!("unexpected {}", other),
        }
    }
    assert_eq!(confs.len(), 1);
    assert_eq!(confs[0].handle, 11);
    assert_eq!(confs[0].result, Ok(2));
    assert_eq!(sends.len(), 2);

    let mut joined = String::new();
    for (i, send) in sends.iter().enumerate() {
        assert_eq!(send.segment_seq as usize, i + 1);
        assert_eq!(send.segment_count, 2);
        // Prefix an empty SMSC address to decode the bare TPDU
        let mut pdu = vec![0x00];
        pdu.extend_from_slice(&send.tpdu);
        let message = SmsMessage::from_bytes(&pdu).unwrap();
        let SmsTpdu::Submit(submit) = &message.tpdu else {
            panic!("expected submit");
        };
        assert_eq!(submit.destination_address.address, "+31612345678");
        assert!(!submit.status_report_request);
        let concat = submit.user_data.header.as_ref().and_then(|h| h.concatenation).unwrap();
        assert_eq!((concat.reference, concat.seq, concat.max_seq), (0, i as u8 + 1, 2));
        joined.push_str(submit.user_data.body.as_deref().unwrap_or_default());
    }
    assert_eq!(joined, text);
}

#[test]
fn test_sms_status_report_requested() {
    debug::setup_logging_verbose();
    let mut config = default_test_config(CardAppType::Usim);
    config.sms.status_report_request = true;
    let mut test = ComponentTest::new(config);
    test.populate_entities(vec![IccEntity::Sms], vec![IccEntity::User, IccEntity::Ril]);

    let req = SmsSubmitReq { handle: 1, number: "12345".to_string(), text: "ping".to_string() };
    test.submit_message(SapMsg::new(Sap::SmsSap, IccEntity::User, IccEntity::Sms, SapMsgInner::SmsSubmitReq(req)));
    test.run_until_idle();

    let send = test
        .dump_sinks()
        .into_iter()
        .find_map(|m| match m.msg {
            SapMsgInner::SmsSendReq(send) => Some(send),
            _ => None,
        })
        .unwrap();
    // TP-MTI submit with TP-SRR
    assert_eq!(send.tpdu[0] & 0x23, 0x21);
}
