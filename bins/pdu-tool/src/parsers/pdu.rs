use icc_entities::stk::StkEntity;
use icc_entities::stk::cmd_factory::build_command;
use icc_pdus::PduMessage;
use icc_pdus::sms::pdus::sms_message::SmsTpdu;
use icc_pdus::tlv::ber_tlv::BerTlv;

/// Network and card PDU parser for standalone debugging
pub struct PduParser;

impl PduParser {
    /// Parse an SMS with leading SMSC address and print the result
    pub fn parse_sms(pdu: &[u8]) {
        println!("=== SMS Parser ===");
        let message = match PduMessage::decode_sms(pdu) {
            Ok(PduMessage::Sms(message)) => message,
            Ok(other) => {
                println!("[!] Unexpected message: {}", other);
                return;
            }
            Err(e) => {
                println!("[!] Failed to parse: {}", e);
                return;
            }
        };
        println!("{}", message);
        if let Some(smsc) = &message.smsc {
            println!("SMSC: {}", smsc.address);
        }
        match &message.tpdu {
            SmsTpdu::Deliver(deliver) => {
                println!("Type: SMS-DELIVER from {}", deliver.originating_address.address);
                println!("Timestamp: {}", deliver.service_centre_timestamp);
            }
            SmsTpdu::Submit(submit) => {
                println!("Type: SMS-SUBMIT to {}, reference {}", submit.destination_address.address, submit.message_reference);
            }
            SmsTpdu::StatusReport(report) => {
                println!("Type: SMS-STATUS-REPORT for reference {}: {:?}", report.message_reference, report.delivery_status());
            }
        }
        match message.tpdu.body() {
            Some(body) => println!("Body: {:?}", body),
            None => println!("Body: <none>"),
        }
    }

    /// Parse a GSM, ETWS primary notification or UMTS cell broadcast PDU
    pub fn parse_cb(pdu: &[u8]) {
        println!("=== Cell Broadcast Parser ===");
        println!("Length: {} octets", pdu.len());
        let message = match PduMessage::decode_cell_broadcast(pdu) {
            Ok(PduMessage::CellBroadcast(message)) => message,
            Ok(other) => {
                println!("[!] Unexpected message: {}", other);
                return;
            }
            Err(e) => {
                println!("[!] Failed to parse: {}", e);
                return;
            }
        };
        println!("{}", message);
        println!("Geographical scope: {:?}", message.serial.geographical_scope());
        println!("Message class: {:?}", message.message_class());
        if let Some(etws) = &message.etws {
            println!("ETWS: {:?}", etws);
        }
    }

    /// Parse a proactive command and show the command the user layer would receive
    pub fn parse_proactive(pdu: &[u8]) {
        println!("=== Proactive Command Parser ===");
        let (ber, details) = match StkEntity::decode(pdu) {
            Ok(decoded) => decoded,
            Err(e) => {
                println!("[!] Failed to parse: {}", e);
                return;
            }
        };
        println!("{}", ber);
        println!("{}", details);
        let chain = ber.comprehension_tlvs().unwrap_or_default();
        match build_command(details, chain) {
            Ok(Some(command)) => println!("{}", command),
            Ok(None) => println!("No command for the user layer"),
            Err(rejected) => {
                println!("[!] Rejected: {}", rejected.error);
                match rejected.terminal_response().to_bytes() {
                    Ok(rsp) => println!("Terminal response: {}", icc_core::octet_buffer::bytes_to_hex(&rsp)),
                    Err(e) => println!("[!] Cannot encode terminal response: {}", e),
                }
            }
        }
    }

    /// Parse any BER-TLV the codec knows: FCP templates and proactive commands
    pub fn parse_ber(pdu: &[u8]) {
        println!("=== BER-TLV Parser ===");
        match BerTlv::from_bytes(pdu) {
            Ok(ber) => println!("{}", ber),
            Err(e) => println!("[!] Failed to parse: {}", e),
        }
    }
}
