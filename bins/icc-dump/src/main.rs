use clap::Parser;

use icc_config::{SharedConfig, toml_config};
use icc_core::{CardAppType, debug};
use icc_entities::contacts::{ContactHelper, ContactType};
use icc_entities::io::card_image::CardImage;
use icc_entities::io::icc_channel::EfDriver;
use icc_entities::records::sim_records::{SimRecords, read_isim_identity_records, read_sms_records};

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

fn load_card_image(path: &str) -> CardImage {
    match CardImage::from_file(path) {
        Ok(image) => image,
        Err(e) => {
            println!("Failed to load card image from {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn dump_records(records: &SimRecords) {
    println!("=== Records ===");
    println!("ICCID:       {}", records.iccid.as_deref().unwrap_or("-"));
    println!("MSISDN:      {}", records.msisdn.as_deref().unwrap_or("-"));
    if let Some(plmn) = &records.home_plmn {
        println!("Home PLMN:   {}", plmn);
    }
    if let Some(spn) = &records.spn {
        println!("SPN:         {}", spn);
    }
    for plmn in &records.spdi {
        println!("SPDI PLMN:   {}", plmn);
    }
    for (i, pnn) in records.pnn.iter().enumerate() {
        println!("PNN {}:       {:?}", i + 1, pnn);
    }
    for entry in records.opl.iter().flatten() {
        println!("OPL:         {}", entry);
    }
    if let Some(ons) = &records.ons {
        println!("CPHS ONS:    {} ({})", ons, records.ons_short.as_deref().unwrap_or("-"));
    }
    if let Some(mailbox) = &records.mailbox {
        println!("Mailbox:     {}", mailbox);
    }
    if let Some(mwis) = &records.mwis {
        println!("Voicemail:   active {} count {:?}", mwis.active, mwis.message_count);
    }
    if let Some(cfis) = &records.cfis {
        println!("Forwarding:  active {} to {}", cfis.unconditional_voice_active(), cfis.number);
    }
    for range in &records.cb_ranges {
        println!("CB ids:      {}..={}", range.start, range.end - 1);
    }
}

fn dump_contacts(io: &mut EfDriver<CardImage>) {
    let mut helper = ContactHelper::new();
    for contact_type in [ContactType::Adn, ContactType::Fdn, ContactType::Sdn] {
        println!("=== {:?} ===", contact_type);
        match helper.read_contacts(io, contact_type) {
            Ok(contacts) => {
                for contact in contacts {
                    println!("{}", contact);
                }
            }
            Err(e) => println!("[!] {}", e),
        }
        if let Ok(count) = helper.max_contact_count(io, contact_type) {
            println!("Capacity: {}", count);
        }
    }
}

fn dump_sms(io: &mut EfDriver<CardImage>) {
    println!("=== SMS ===");
    match read_sms_records(io) {
        Ok(messages) => {
            for (record, sms) in messages {
                println!("{}: {}", record, sms);
            }
        }
        Err(e) => println!("[!] {}", e),
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ICC card image dump",
    long_about = "Reads records, phonebook and messages from a card image the way the ICC stack does"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with application type and codec options")]
    config: String,

    /// Card image (required)
    #[arg(help = "TOML card image with transparent and linear fixed EFs")]
    card: String,

    #[arg(long = "imsi", help = "IMSI for deriving the home PLMN")]
    imsi: Option<String>,

    #[arg(long = "no-contacts", help = "Skip the phonebook")]
    no_contacts: bool,
}

fn main() {
    eprintln!("[+] ICC card image dump");

    let args = Args::parse();
    let cfg = load_config_from_toml(&args.config);
    let _log_guard = debug::setup_logging_default(cfg.config().debug_log.clone());
    let image = load_card_image(&args.card);

    let app_type = cfg.state_read().app_type;
    tracing::info!("dumping {} card image {}", app_type, args.card);
    let mut io = EfDriver::new(cfg, image);

    if app_type == CardAppType::Isim {
        match read_isim_identity_records(&mut io) {
            Ok(identity) => println!("{:?}", identity),
            Err(e) => println!("[!] {}", e),
        }
        return;
    }

    let records = SimRecords::fetch(&mut io, args.imsi.as_deref());
    dump_records(&records);
    if !args.no_contacts {
        dump_contacts(&mut io);
    }
    dump_sms(&mut io);
}
