use clap::Parser;

use icc_core::octet_buffer::hex_to_bytes;

mod parsers;
use parsers::pdu::PduParser;
use parsers::record::{RecordParser, RecordType};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ICC PDU and EF record decoder",
    long_about = "Decodes a hex string as an SMS, cell broadcast page, proactive command, BER-TLV or EF record"
)]
struct Args {
    /// What to decode
    #[arg(
        help = "Kind: [ sms | cb | stk | ber | ef ]"
    )]
    kind: String,

    /// Hex encoded PDU or record
    #[arg(
        help = "Hex string to parse, whitespace is ignored"
    )]
    hex: String,

    #[arg(
        short = 'r',
        long = "record",
        default_value = "adn",
        help = "Record type (for ef): [ adn | ext | pbr | email | anr | spn | iccid | pnn | sms ]"
    )]
    record: String,

    #[arg(short = 'v', long = "verbose", help = "Log codec internals to stdout")]
    verbose: bool,
}

fn main() {
    eprintln!("[+] ICC PDU decoding tool");

    let args = Args::parse();
    if args.verbose {
        icc_core::debug::setup_logging_verbose();
    }

    let hex: String = args.hex.chars().filter(|c| !c.is_whitespace()).collect();
    let data = match hex_to_bytes(&hex) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: invalid hex string: {}", e);
            std::process::exit(1);
        }
    };

    match args.kind.to_lowercase().as_str() {
        "sms" => PduParser::parse_sms(&data),
        "cb" | "cbs" => PduParser::parse_cb(&data),
        "stk" => PduParser::parse_proactive(&data),
        "ber" | "tlv" => PduParser::parse_ber(&data),
        "ef" => {
            let Some(record_type) = RecordType::from_name(&args.record) else {
                eprintln!("Error: Unsupported record type '{}'. Use: adn, ext, pbr, email, anr, spn, iccid, pnn, sms", args.record);
                std::process::exit(1);
            };
            RecordParser::parse(record_type, &data);
        }
        _ => {
            eprintln!("Error: Unsupported kind '{}'", args.kind);
            eprintln!("Supported: sms cb stk ber ef");
            std::process::exit(1);
        }
    };
}
