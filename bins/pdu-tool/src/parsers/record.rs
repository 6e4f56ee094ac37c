use icc_pdus::icc::enums::pbr_file_type::PbrFileType;
use icc_pdus::icc::records::adn_record::AdnRecord;
use icc_pdus::icc::records::anr_record::read_anr_record;
use icc_pdus::icc::records::email_record::read_email_record;
use icc_pdus::icc::records::ext_record::read_ext_record;
use icc_pdus::icc::records::iccid::read_iccid;
use icc_pdus::icc::records::pbr::Pbr;
use icc_pdus::icc::records::pnn::PnnRecord;
use icc_pdus::icc::records::sms_record::SmsRecord;
use icc_pdus::icc::records::spn::ServiceProviderName;

/// EF record types the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Adn,
    Ext,
    Pbr,
    Email,
    Anr,
    Spn,
    Iccid,
    Pnn,
    Sms,
}

impl RecordType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "adn" | "fdn" | "sdn" | "msisdn" => Some(RecordType::Adn),
            "ext" | "ext1" | "ext2" | "ext3" => Some(RecordType::Ext),
            "pbr" => Some(RecordType::Pbr),
            "email" => Some(RecordType::Email),
            "anr" => Some(RecordType::Anr),
            "spn" => Some(RecordType::Spn),
            "iccid" => Some(RecordType::Iccid),
            "pnn" => Some(RecordType::Pnn),
            "sms" => Some(RecordType::Sms),
            _ => None,
        }
    }
}

/// EF record parser for standalone debugging
pub struct RecordParser;

impl RecordParser {
    pub fn parse(record_type: RecordType, record: &[u8]) {
        println!("=== EF Record Parser ===");
        println!("Record type: {:?}", record_type);
        println!("Length: {} octets", record.len());

        match record_type {
            RecordType::Adn => match AdnRecord::from_bytes(record) {
                Ok(adn) if adn.is_contact() => println!("{}", adn),
                Ok(_) => println!("Empty record"),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Ext => match read_ext_record(record) {
                Ok(digits) => println!("Extension digits: {:?}, next record: {:02X}", digits, record.last().copied().unwrap_or(0xFF)),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Pbr => match Pbr::from_records(&[record.to_vec()]) {
                Ok(pbr) => println!("{}", pbr),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Email => {
                // Type 1 and type 2 differ only in the trailing ADN link
                println!("Email (type 1): {:?}", read_email_record(record, PbrFileType::Type1));
                println!("Email (type 2): {:?}", read_email_record(record, PbrFileType::Type2));
            }
            RecordType::Anr => match read_anr_record(record) {
                Ok(number) => println!("Additional number: {:?}", number),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Spn => match ServiceProviderName::from_bytes(record) {
                Ok(spn) => {
                    println!("{}", spn);
                    println!("Show PLMN in home network: {}", spn.show_plmn_in_home());
                    println!("Show SPN when roaming: {}", spn.show_spn_when_roaming());
                }
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Iccid => match read_iccid(record) {
                Ok(iccid) => println!("ICCID: {}", iccid),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Pnn => match PnnRecord::from_bytes(record) {
                Ok(pnn) => println!("{:?}", pnn),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
            RecordType::Sms => match SmsRecord::from_bytes(record) {
                Ok(sms) => println!("{}", sms),
                Err(e) => println!("[!] Failed to parse: {}", e),
            },
        }
    }
}
