mod common;

use icc_core::icc_entities::IccEntity;
use icc_core::{CardAppType, IccErr, Sap, debug};
use icc_pdus::icc::ef_ids::{EF_ADN, EF_FDN, EF_ICCID, EF_PBR};
use icc_pdus::icc::enums::ef_structure::EfStructure;
use icc_saps::control::IccControl;
use icc_saps::ef::{EfConf, EfData, EfOp, EfReq};
use icc_saps::{SapMsg, SapMsgInner};

use common::{CardBuilder, ComponentTest, adn_record, default_test_config};

fn ef_req(handle: u32, file_id: u16, op: EfOp) -> SapMsg {
    SapMsg::new(Sap::EfSap, IccEntity::User, IccEntity::IccIo, SapMsgInner::EfReq(EfReq { handle, file_id, op }))
}

fn confirmations(msgs: Vec<SapMsg>) -> Vec<EfConf> {
    msgs.into_iter()
        .filter_map(|m| match m.msg {
            SapMsgInner::EfConf(conf) => Some(conf),
            _ => None,
        })
        .collect()
}

fn sim_test() -> ComponentTest {
    let card = CardBuilder::new(CardAppType::Sim)
        .with_basics(&[])
        .linear_fixed(EF_ADN, 30, 4, &[adn_record("Alice", "0612345678", 30), adn_record("Bob", "+3170123", 30)])
        .linear_fixed(EF_FDN, 30, 2, &[])
        .pin2(EF_FDN, "4321")
        .build();
    let mut test = ComponentTest::new(default_test_config(CardAppType::Sim));
    test.populate_entities(vec![IccEntity::IccIo], vec![IccEntity::User]);
    test.insert_card(card);
    test
}

#[test]
fn test_read_transparent() {
    debug::setup_logging_verbose();
    let mut test = sim_test();
    test.submit_message(ef_req(7, EF_ICCID, EfOp::LoadTransparent));
    test.run_until_idle();

    let confs = confirmations(test.dump_sinks());
    assert_eq!(confs.len(), 1);
    assert_eq!(confs[0].handle, 7);
    assert_eq!(confs[0].file_id, EF_ICCID);
    let Ok(EfData::Transparent(data)) = &confs[0].result else {
        panic!("unexpected {:?}", confs[0].result);
    };
    assert_eq!(data.len(), 10);
    assert_eq!(data[0], 0x98);
}

#[test]
fn test_read_all_records() {
    debug::setup_logging_verbose();
    let mut test = sim_test();
    test.submit_message(ef_req(1, EF_ADN, EfOp::LoadAllRecords));
    test.run_until_idle();

    let confs = confirmations(test.dump_sinks());
    let Ok(EfData::Records(records)) = &confs[0].result else {
        panic!("unexpected {:?}", confs[0].result);
    };
    assert_eq!(records.len(), 4);
    assert_eq!(records[0], adn_record("Alice", "0612345678", 30));
    assert!(records[3].iter().all(|&b| b == 0xFF));

    // GET RESPONSE once, then one READ RECORD per record
    assert_eq!(test.card().history().len(), 5);
}

#[test]
fn test_descriptor_cached() {
    debug::setup_logging_verbose();
    let mut test = sim_test();
    test.submit_message(ef_req(1, EF_ADN, EfOp::GetDescriptor));
    test.run_until_idle();
    let confs = confirmations(test.dump_sinks());
    let Ok(EfData::Descriptor(descriptor)) = &confs[0].result else {
        panic!("unexpected {:?}", confs[0].result);
    };
    assert_eq!(descriptor.structure, EfStructure::LinearFixed);
    assert_eq!(descriptor.record_size, 30);
    assert_eq!(descriptor.record_count, 4);

    test.card().clear_history();
    test.submit_message(ef_req(2, EF_ADN, EfOp::LoadLinearFixed { record: Some(2) }));
    test.run_until_idle();
    let confs = confirmations(test.dump_sinks());
    assert_eq!(confs[0].result, Ok(EfData::Record { record: 2, data: adn_record("Bob", "+3170123", 30) }));
    // Only the READ RECORD reaches the card
    assert_eq!(test.card().history().len(), 1);
}

#[test]
fn test_update_needs_pin2() {
    debug::setup_logging_verbose();
    let mut test = sim_test();
    let record = adn_record("Emergency", "112", 30);
    test.submit_message(ef_req(1, EF_FDN, EfOp::UpdateLinearFixed { record: 1, data: record.clone(), pin2: None }));
    test.run_until_idle();
    let confs = confirmations(test.dump_sinks());
    assert_eq!(confs[0].result, Err(IccErr::ChannelError { file_id: EF_FDN, sw1: 0x69, sw2: 0x82 }));

    test.submit_message(ef_req(2, EF_FDN, EfOp::UpdateLinearFixed { record: 1, data: record.clone(), pin2: Some("4321".to_string()) }));
    test.run_until_idle();
    let confs = confirmations(test.dump_sinks());
    assert_eq!(confs[0].result, Ok(EfData::Updated));
    assert_eq!(test.card().record("3F007F10", EF_FDN, 1), Some(record.as_slice()));
}

#[test]
fn test_find_free_record() {
    debug::setup_logging_verbose();
    let mut test = sim_test();
    test.submit_message(ef_req(1, EF_ADN, EfOp::FindFreeRecord));
    test.run_until_idle();
    let confs = confirmations(test.dump_sinks());
    assert_eq!(confs[0].result, Ok(EfData::FreeRecord(3)));
}

#[test]
fn test_unknown_record() {
    debug::setup_logging_verbose();
    let mut test = sim_test();
    test.submit_message(ef_req(1, EF_ADN, EfOp::LoadLinearFixed { record: Some(9) }));
    test.run_until_idle();
    let confs = confirmations(test.dump_sinks());
    assert_eq!(confs[0].result, Err(IccErr::OutOfBounds { field: Some("record") }));
}

#[test]
fn test_switch_app() {
    debug::setup_logging_verbose();
    let card = CardBuilder::new(CardAppType::Usim)
        .linear_fixed(EF_PBR, 20, 1, &[vec![0xA8, 0x05, 0xC0, 0x03, 0x4F, 0x3A, 0x01]])
        .build();
    let mut test = ComponentTest::new(default_test_config(CardAppType::Sim));
    test.populate_entities(vec![IccEntity::IccIo], vec![IccEntity::User]);
    test.insert_card(card);

    // EF_PBR lives in DF_PHONEBOOK whatever the application; the USIM card answers with FCP
    let control = SapMsgInner::IccControl(IccControl::SwitchApp(CardAppType::Usim));
    test.submit_message(SapMsg::new(Sap::Control, IccEntity::User, IccEntity::IccIo, control));
    test.submit_message(ef_req(1, EF_PBR, EfOp::LoadLinearFixed { record: Some(1) }));
    test.run_until_idle();

    assert_eq!(test.get_shared_config().state_read().app_type, CardAppType::Usim);
    let confs = confirmations(test.dump_sinks());
    let Ok(EfData::Record { data, .. }) = &confs[0].result else {
        panic!("unexpected {:?}", confs[0].result);
    };
    assert_eq!(&data[..2], &[0xA8, 0x05]);
}
