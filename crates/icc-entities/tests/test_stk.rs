mod common;

use icc_core::icc_entities::IccEntity;
use icc_core::octet_buffer::{bytes_to_hex, hex_to_bytes};
use icc_core::{CardAppType, Sap, debug};
use icc_pdus::stk::enums::result_code::StkResultCode;
use icc_pdus::stk::fields::command_details::CommandDetails;
use icc_pdus::stk::pdus::stk_command::StkCommandParams;
use icc_pdus::stk::pdus::terminal_response::TerminalResponse;
use icc_saps::control::IccControl;
use icc_saps::stk::{StkProactiveCmdInd, StkTerminalRspReq};
use icc_saps::{SapMsg, SapMsgInner};

use common::{ComponentTest, default_test_config};

const DISPLAY_TEXT: &str = "D01A8103012181820281028D0F04546F6F6C6B697420546573742031";
const POLL_INTERVAL_NO_DURATION: &str = "D009810301030082028182";
/// REFRESH file change notification for 3F00/7FFF/6F07
const REFRESH_FILE_CHANGE: &str = "D0128103010101820281829207013F007FFF6F07";

fn stk_test(terminal_response_on_missing: bool) -> ComponentTest {
    let mut config = default_test_config(CardAppType::Usim);
    config.stk.terminal_response_on_missing = terminal_response_on_missing;
    let mut test = ComponentTest::new(config);
    test.populate_entities(vec![IccEntity::Stk], vec![IccEntity::User, IccEntity::Ril, IccEntity::IccIo]);
    test
}

fn proactive(hex: &str) -> SapMsg {
    let ind = StkProactiveCmdInd { pdu: hex_to_bytes(hex).unwrap() };
    SapMsg::new(Sap::StkSap, IccEntity::Ril, IccEntity::Stk, SapMsgInner::StkProactiveCmdInd(ind))
}

#[test]
fn test_display_text_to_user() {
    debug::setup_logging_verbose();
    let mut test = stk_test(true);
    test.submit_message(proactive(DISPLAY_TEXT));
    test.run_until_idle();

    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].dest, IccEntity::User);
    let SapMsgInner::StkCommandInd(ind) = &msgs[0].msg else {
        panic!("unexpected {}", msgs[0].msg);
    };
    assert_eq!(ind.command.details.command_number, 1);
    let StkCommandParams::DisplayText(params) = &ind.command.params else {
        panic!("unexpected {:?}", ind.command.params);
    };
    assert_eq!(params.text, "Toolkit Test 1");
}

#[test]
fn test_missing_value_answered() {
    debug::setup_logging_verbose();
    let mut test = stk_test(true);
    test.submit_message(proactive(POLL_INTERVAL_NO_DURATION));
    test.run_until_idle();

    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].dest, IccEntity::Ril);
    let SapMsgInner::StkTerminalRsp(rsp) = &msgs[0].msg else {
        panic!("unexpected {}", msgs[0].msg);
    };
    assert_eq!(rsp.response.result, StkResultCode::RequiredValuesMissing);
    assert_eq!(bytes_to_hex(&rsp.pdu), "810301030082028281830136");
}

#[test]
fn test_missing_value_silent() {
    debug::setup_logging_verbose();
    let mut test = stk_test(false);
    test.submit_message(proactive(POLL_INTERVAL_NO_DURATION));
    test.run_until_idle();
    assert!(test.dump_sinks().is_empty());
}

#[test]
fn test_refresh_notifies_icc_io() {
    debug::setup_logging_verbose();
    let mut test = stk_test(true);
    test.submit_message(proactive(REFRESH_FILE_CHANGE));
    test.run_until_idle();

    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 2);
    let command = msgs
        .iter()
        .find_map(|m| match &m.msg {
            SapMsgInner::StkCommandInd(ind) => Some(&ind.command),
            _ => None,
        })
        .unwrap();
    let StkCommandParams::Refresh(refresh) = &command.params else {
        panic!("unexpected {:?}", command.params);
    };
    assert_eq!(refresh.refresh_type, 0x01);
    assert_eq!(refresh.file_list.as_ref().map(|l| l.num_files), Some(1));

    let control = msgs.iter().find(|m| m.dest == IccEntity::IccIo).unwrap();
    let SapMsgInner::IccControl(IccControl::FilesChanged(files)) = &control.msg else {
        panic!("unexpected {}", control.msg);
    };
    assert_eq!(files, &vec![0x6F07]);
}

#[test]
fn test_garbage_dropped() {
    debug::setup_logging_verbose();
    let mut test = stk_test(true);
    // Not a proactive command template
    test.submit_message(proactive("8103012180"));
    test.run_until_idle();
    assert!(test.dump_sinks().is_empty());
}

#[test]
fn test_terminal_response_from_user() {
    debug::setup_logging_verbose();
    let mut test = stk_test(true);
    let details = CommandDetails { command_number: 1, type_of_command: 0x21, qualifier: 0x80 };
    let response = TerminalResponse::new(details, StkResultCode::Ok);
    let msg = SapMsgInner::StkTerminalRspReq(StkTerminalRspReq { response });
    test.submit_message(SapMsg::new(Sap::StkSap, IccEntity::User, IccEntity::Stk, msg));
    test.run_until_idle();

    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 1);
    let SapMsgInner::StkTerminalRsp(rsp) = &msgs[0].msg else {
        panic!("unexpected {}", msgs[0].msg);
    };
    assert_eq!(bytes_to_hex(&rsp.pdu), "810301218082028281830100");
}
