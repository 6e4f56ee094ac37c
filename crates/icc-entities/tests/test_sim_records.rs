mod common;

use icc_config::SharedConfig;
use icc_core::octet_buffer::hex_to_bytes;
use icc_core::{CardAppType, debug};
use icc_entities::io::card_image::CardImage;
use icc_entities::io::icc_channel::{EfDriver, EfIo};
use icc_core::IccErr;
use icc_entities::records::sim_records::{
    SimRecords, SpnDisplay, is_service_available, read_cfis, read_cphs_cff, read_img, read_mwis, read_sim_phase,
    update_cfis, update_cphs_cff, update_mwis,
};
use icc_pdus::icc::ef_ids::{
    EF_AD, EF_CBMI, EF_CBMIR, EF_CFIS, EF_CPHS_CFF, EF_CPHS_INFO, EF_CPHS_MBN, EF_CPHS_ONS, EF_CPHS_ONSF, EF_ICCID,
    EF_IMG, EF_MBDN, EF_MSISDN, EF_MWIS, EF_PHASE, EF_SPDI, EF_SPN,
};
use icc_pdus::icc::fields::plmn::Plmn;
use icc_pdus::icc::records::service_table::IccService;

use common::{CardBuilder, adn_record};

const IMSI: &str = "310410123456789";

fn spn(name: &str, display_condition: u8) -> Vec<u8> {
    let mut data = vec![display_condition];
    data.extend_from_slice(name.as_bytes());
    data.resize(17, 0xFF);
    data
}

fn sim_card() -> CardImage {
    CardBuilder::new(CardAppType::Sim)
        .with_basics(&[
            IccService::Msisdn,
            IccService::Spn,
            IccService::Spdi,
            IccService::Mwis,
            IccService::Cbmi,
            IccService::Cbmir,
        ])
        .linear_fixed(EF_MSISDN, 28, 2, &[adn_record("Me", "+31612345678", 28)])
        .transparent(EF_AD, vec![0x00, 0x00, 0x00, 0x03])
        .transparent(EF_SPN, spn("Telco", 0x01))
        .transparent(EF_SPDI, hex_to_bytes("A30B800964F010FFFFFF130014FFFF").unwrap())
        .linear_fixed(EF_MWIS, 5, 1, &[vec![0x01, 0x03, 0x00, 0x00, 0x00]])
        .transparent(EF_CBMI, vec![0x00, 0x32, 0x11, 0x12, 0xFF, 0xFF])
        .transparent(EF_CBMIR, vec![0x11, 0x20, 0x11, 0x2F, 0xFF, 0xFF, 0xFF, 0xFF])
        .build()
}

fn driver(image: CardImage, app_type: CardAppType) -> EfDriver<CardImage> {
    EfDriver::new(SharedConfig::new(app_type), image)
}

#[test]
fn test_fetch_sim_records() {
    debug::setup_logging_verbose();
    let mut io = driver(sim_card(), CardAppType::Sim);
    let records = SimRecords::fetch(&mut io, Some(IMSI));

    assert_eq!(records.iccid.as_deref(), Some("89441234567890123456"));
    assert_eq!(io.config().state_read().iccid.as_deref(), Some("89441234567890123456"));
    assert!(is_service_available(io.config(), IccService::Spn));
    assert!(!is_service_available(io.config(), IccService::Fdn));

    assert_eq!(records.msisdn.as_deref(), Some("+31612345678"));
    assert_eq!(records.admin_data.as_ref().and_then(|ad| ad.mnc_length), Some(3));
    assert_eq!(records.home_plmn, Some(Plmn::new("310", "410")));
    assert_eq!(records.spn.as_ref().map(|s| s.name.as_str()), Some("Telco"));
    assert_eq!(records.spdi, vec![Plmn::new("460", "01"), Plmn::new("310", "410")]);
    assert_eq!(records.mwis.as_ref().map(|m| (m.active, m.message_count)), Some((true, Some(3))));
    assert_eq!(records.cb_ranges, vec![50..51, 0x1112..0x1113, 0x1120..0x1130]);

    // Neither PNN nor OPL is in the service table
    assert!(records.pnn.is_empty());
    assert_eq!(records.opl, None);
    assert_eq!(records.network_name("310", "410", 1), None);
}

#[test]
fn test_spn_display_rules() {
    debug::setup_logging_verbose();
    let mut io = driver(sim_card(), CardAppType::Sim);
    let records = SimRecords::fetch(&mut io, Some(IMSI));

    let home = SpnDisplay { network_name_required: true, spn_required: true };
    assert_eq!(records.spn_display("310", "410"), home);
    // Listed in EF_SPDI counts as home
    assert_eq!(records.spn_display("460", "01"), home);
    assert_eq!(records.spn_display("262", "01"), SpnDisplay { network_name_required: true, spn_required: true });
}

#[test]
fn test_fetch_without_service_table() {
    debug::setup_logging_verbose();
    let mut card = CardImage::new(false);
    card.add_transparent("3F00", EF_ICCID, vec![0x98, 0x10, 0x14, 0x30, 0x12, 0x11, 0x81, 0x15, 0x70, 0xF0]);
    card.add_transparent("3F007F20", EF_SPN, spn("Hidden", 0x00));
    let mut io = driver(card, CardAppType::Sim);
    let records = SimRecords::fetch(&mut io, None);

    assert_eq!(records.iccid.as_deref(), Some("8901410321111851070"));
    assert_eq!(records.spn, None);
    assert_eq!(records.admin_data, None);
    assert!(records.cb_ranges.is_empty());
    assert_eq!(records.spn_display("310", "410"), SpnDisplay { network_name_required: true, spn_required: false });
}

#[test]
fn test_update_mwis() {
    debug::setup_logging_verbose();
    let mut io = driver(sim_card(), CardAppType::Sim);
    let mwis = read_mwis(&mut io).unwrap();
    update_mwis(&mut io, &mwis, false, None).unwrap();

    assert_eq!(io.channel().record("3F007F20", EF_MWIS, 1), Some(&[0x00, 0x00, 0x00, 0x00, 0x00][..]));
    let mwis = read_mwis(&mut io).unwrap();
    assert!(!mwis.active);
    assert_eq!(mwis.message_count, Some(0));
}

fn operator_name(name: &str, size: usize) -> Vec<u8> {
    let mut data = name.as_bytes().to_vec();
    data.resize(size, 0xFF);
    data
}

/// CPHS phase 2 with CSP, MBN and ONSF activated
fn cphs_card(services: &[IccService], mbdn: Option<Vec<u8>>) -> CardImage {
    let mut builder = CardBuilder::new(CardAppType::Sim)
        .with_basics(services)
        .transparent(EF_PHASE, vec![0x02])
        .transparent(EF_CPHS_INFO, vec![0x02, 0xF3, 0x00])
        .transparent(EF_CPHS_ONS, operator_name("Telco Network", 20))
        .transparent(EF_CPHS_ONSF, operator_name("Telco", 10))
        .transparent(EF_CPHS_CFF, vec![0x5A, 0x55])
        .linear_fixed(EF_CPHS_MBN, 28, 2, &[adn_record("Voicemail", "+31612000000", 28)]);
    if let Some(record) = mbdn {
        builder = builder.linear_fixed(EF_MBDN, 28, 1, &[record]);
    }
    builder.build()
}

#[test]
fn test_fetch_cphs_records() {
    debug::setup_logging_verbose();
    let mut io = driver(cphs_card(&[], None), CardAppType::Sim);
    let records = SimRecords::fetch(&mut io, None);

    assert_eq!(records.phase.map(|p| p.profile_download_required()), Some(false));
    assert_eq!(records.cphs_info.as_ref().map(|i| i.phase), Some(2));
    assert_eq!(records.ons.as_deref(), Some("Telco Network"));
    assert_eq!(records.ons_short.as_deref(), Some("Telco"));
    // No MBDN service, the CPHS mailbox is used
    let mailbox = records.mailbox.unwrap();
    assert_eq!(mailbox.alpha_id, "Voicemail");
    assert_eq!(mailbox.number, "+31612000000");
}

#[test]
fn test_mbdn_before_cphs_mailbox() {
    debug::setup_logging_verbose();
    let mbdn = adn_record("Mailbox", "+31612999999", 28);
    let mut io = driver(cphs_card(&[IccService::Mdn], Some(mbdn)), CardAppType::Sim);
    let records = SimRecords::fetch(&mut io, None);
    assert_eq!(records.mailbox.map(|m| m.number).as_deref(), Some("+31612999999"));

    // Empty EF_MBDN record falls back to EF_CPHS_MBN
    let mut io = driver(cphs_card(&[IccService::Mdn], Some(vec![0xFF; 28])), CardAppType::Sim);
    let records = SimRecords::fetch(&mut io, None);
    assert_eq!(records.mailbox.map(|m| m.number).as_deref(), Some("+31612000000"));
}

#[test]
fn test_update_cphs_cff() {
    debug::setup_logging_verbose();
    let mut io = driver(cphs_card(&[], None), CardAppType::Sim);
    let cff = read_cphs_cff(&mut io).unwrap();
    assert!(!cff.voice_forwarding_active());

    let cff = update_cphs_cff(&mut io, &cff, true).unwrap();
    assert!(cff.voice_forwarding_active());
    assert_eq!(io.channel().content("3F007F20", EF_CPHS_CFF), Some(&[0xAA, 0x55][..]));
    assert!(read_cphs_cff(&mut io).unwrap().voice_forwarding_active());
}

#[test]
fn test_cfis_read_and_update() {
    debug::setup_logging_verbose();
    let card = CardBuilder::new(CardAppType::Usim)
        .with_basics(&[IccService::Cfis])
        .linear_fixed(EF_CFIS, 16, 1, &[hex_to_bytes("0100FFFFFFFFFFFFFFFFFFFFFFFFFFFF").unwrap()])
        .build();
    let mut io = driver(card, CardAppType::Usim);
    let records = SimRecords::fetch(&mut io, None);
    let cfis = records.cfis.unwrap();
    assert!(!cfis.unconditional_voice_active());

    let updated = update_cfis(&mut io, &cfis, true, "+31612345678").unwrap();
    assert!(updated.unconditional_voice_active());
    let stored = read_cfis(&mut io).unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.number, "+31612345678");
    assert_eq!(io.channel().record("3F007FFF", EF_CFIS, 1).map(|r| r[1]), Some(0x01));
}

#[test]
fn test_invalid_cfis_left_empty() {
    debug::setup_logging_verbose();
    let card = CardBuilder::new(CardAppType::Sim)
        .with_basics(&[IccService::Cfis])
        .linear_fixed(EF_CFIS, 16, 1, &[hex_to_bytes("0001FFFFFFFFFFFFFFFFFFFFFFFFFFFF").unwrap()])
        .build();
    let mut io = driver(card, CardAppType::Sim);
    assert_eq!(SimRecords::fetch(&mut io, None).cfis, None);
    assert!(matches!(read_cfis(&mut io), Err(IccErr::InvalidValue { field: "cfis_msp", value: 0 })));
}

#[test]
fn test_sim_phase() {
    debug::setup_logging_verbose();
    let card = CardBuilder::new(CardAppType::Sim).with_basics(&[]).transparent(EF_PHASE, vec![0x03]).build();
    let mut io = driver(card, CardAppType::Sim);
    assert!(read_sim_phase(&mut io).unwrap().profile_download_required());

    let mut io = driver(CardBuilder::new(CardAppType::Usim).with_basics(&[]).build(), CardAppType::Usim);
    assert_eq!(read_sim_phase(&mut io), Err(IccErr::RequestNotSupported));
}

#[test]
fn test_read_img() {
    debug::setup_logging_verbose();
    // One basic 8x8 instance in 4F01 at offset 0
    let record = hex_to_bytes("010808114F010000000AFFFF").unwrap();
    let mut card = CardBuilder::new(CardAppType::Sim).with_basics(&[IccService::Img]).linear_fixed(EF_IMG, 12, 1, &[record]).build();
    card.add_transparent("3F007F105F50", 0x4F01, vec![0x08, 0x08, 0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81]);
    let mut io = driver(card, CardAppType::Sim);

    let instances = read_img(&mut io, 1).unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!((instances[0].width, instances[0].height), (8, 8));
    assert_eq!(instances[0].body, vec![0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81]);

    // Instance file missing from DF_GRAPHICS
    let record = hex_to_bytes("010808114F020000000AFFFF").unwrap();
    let card = CardBuilder::new(CardAppType::Sim).with_basics(&[]).linear_fixed(EF_IMG, 12, 1, &[record]).build();
    let mut io = driver(card, CardAppType::Sim);
    assert!(read_img(&mut io, 1).is_err());
}
