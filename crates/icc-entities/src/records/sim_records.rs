//! Reading the card's subscriber records, and the display rules derived from them

use std::ops::Range;

use icc_config::SharedConfig;
use icc_core::{CardAppType, FileId, IccErr};
use icc_pdus::icc::ef_ids::*;
use icc_pdus::icc::fields::plmn::Plmn;
use icc_pdus::icc::records::admin_data::AdminData;
use icc_pdus::icc::records::adn_record::AdnRecord;
use icc_pdus::icc::records::cb_identifiers::{read_cb_identifier_ranges, read_cb_identifiers};
use icc_pdus::icc::records::cfis::Cfis;
use icc_pdus::icc::records::cphs::{CphsCff, CphsInfo, CphsService, read_operator_name};
use icc_pdus::icc::records::iccid;
use icc_pdus::icc::records::img::{ImageInstance, read_img_record};
use icc_pdus::icc::records::isim::read_isim_identity;
use icc_pdus::icc::records::mwis::Mwis;
use icc_pdus::icc::records::opl::OplEntry;
use icc_pdus::icc::records::pnn::PnnRecord;
use icc_pdus::icc::records::service_table::{IccService, ServiceTable};
use icc_pdus::icc::records::sim_phase::SimPhase;
use icc_pdus::icc::records::sms_record::SmsRecord;
use icc_pdus::icc::records::spdi;
use icc_pdus::icc::records::spn::ServiceProviderName;

use crate::io::icc_channel::EfIo;

/// Service table of the active application, once read
pub fn service_table(config: &SharedConfig) -> Option<ServiceTable> {
    let state = config.state_read();
    state.service_table.as_ref().map(|table| ServiceTable::new(state.app_type, table))
}

pub fn is_service_available(config: &SharedConfig, service: IccService) -> bool {
    service_table(config).is_some_and(|table| table.is_available(service))
}

fn service_table_file(app_type: CardAppType) -> FileId {
    match app_type {
        CardAppType::Sim => EF_SST,
        CardAppType::Usim => EF_UST,
        CardAppType::Ruim => EF_CSIM_CST,
        CardAppType::Isim => EF_ISIM_IST,
    }
}

/// Read EF_SST, EF_UST, EF_CST or EF_IST and keep it in the shared state
pub fn read_service_table(io: &mut impl EfIo) -> Result<ServiceTable, IccErr> {
    let app_type = io.config().state_read().app_type;
    let data = io.load_transparent(service_table_file(app_type))?;
    tracing::debug!("service table: {:02X?}", data);
    io.config().state_write().service_table = Some(data.clone());
    Ok(ServiceTable::new(app_type, &data))
}

pub fn read_iccid(io: &mut impl EfIo) -> Result<String, IccErr> {
    let data = io.load_transparent(EF_ICCID)?;
    let iccid = iccid::read_iccid(&data)?;
    tracing::info!("ICCID: {}", iccid);
    io.config().state_write().iccid = Some(iccid.clone());
    Ok(iccid)
}

/// Subscriber number from the first EF_MSISDN record
pub fn read_msisdn(io: &mut impl EfIo) -> Result<Option<AdnRecord>, IccErr> {
    let record = io.load_record(EF_MSISDN, 1)?;
    let msisdn = AdnRecord::from_bytes(&record)?;
    Ok(msisdn.is_contact().then_some(msisdn))
}

pub fn read_ad(io: &mut impl EfIo) -> Result<AdminData, IccErr> {
    Ok(AdminData::from_bytes(&io.load_transparent(EF_AD)?))
}

pub fn read_spn(io: &mut impl EfIo) -> Result<ServiceProviderName, IccErr> {
    let file_id = match io.config().state_read().app_type {
        CardAppType::Ruim => EF_CSIM_SPN,
        _ => EF_SPN,
    };
    ServiceProviderName::from_bytes(&io.load_transparent(file_id)?)
}

pub fn read_spdi(io: &mut impl EfIo) -> Result<Vec<Plmn>, IccErr> {
    spdi::read_spdi(&io.load_transparent(EF_SPDI)?)
}

/// All EF_PNN records. Records that fail to decode are kept empty so record numbers from
/// EF_OPL still line up.
pub fn read_pnn(io: &mut impl EfIo) -> Result<Vec<PnnRecord>, IccErr> {
    let records = io.load_all_records(EF_PNN)?;
    Ok(records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            PnnRecord::from_bytes(record).unwrap_or_else(|e| {
                tracing::warn!("PNN record {}: {}", i + 1, e);
                PnnRecord::default()
            })
        })
        .collect())
}

pub fn read_opl(io: &mut impl EfIo) -> Result<Vec<OplEntry>, IccErr> {
    let records = io.load_all_records(EF_OPL)?;
    let mut entries = Vec::new();
    for record in &records {
        if let Some(entry) = OplEntry::from_bytes(record)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Message identifier ranges to receive, merged from EF_CBMI, EF_CBMID and EF_CBMIR as far as
/// the service table allows. A file failing to read contributes nothing.
pub fn read_cb_ranges(io: &mut impl EfIo) -> Vec<Range<u32>> {
    let config = io.config().clone();
    let mut ranges = Vec::new();
    let sources: [(IccService, FileId, fn(&[u8]) -> Vec<Range<u32>>); 3] = [
        (IccService::Cbmi, EF_CBMI, read_cb_identifiers),
        (IccService::DataDownloadSmsCb, EF_CBMID, read_cb_identifiers),
        (IccService::Cbmir, EF_CBMIR, read_cb_identifier_ranges),
    ];
    for (service, file_id, decode) in sources {
        if !is_service_available(&config, service) {
            tracing::debug!("{} not available", ef_name(file_id));
            continue;
        }
        match io.load_transparent(file_id) {
            Ok(data) => ranges.extend(decode(&data)),
            Err(e) => tracing::warn!("reading {}: {}", ef_name(file_id), e),
        }
    }
    ranges
}

pub fn read_mwis(io: &mut impl EfIo) -> Result<Mwis, IccErr> {
    Mwis::from_bytes(&io.load_record(EF_MWIS, 1)?)
}

/// Write the voicemail indication, keeping the other indications of `mwis`
pub fn update_mwis(io: &mut impl EfIo, mwis: &Mwis, active: bool, message_count: Option<u8>) -> Result<(), IccErr> {
    io.update_record(EF_MWIS, 1, mwis.with_voicemail(active, message_count), None)
}

/// EF_PHASE, present on SIM applications only
pub fn read_sim_phase(io: &mut impl EfIo) -> Result<SimPhase, IccErr> {
    if io.config().state_read().app_type != CardAppType::Sim {
        return Err(IccErr::RequestNotSupported);
    }
    let phase = SimPhase::from_bytes(&io.load_transparent(EF_PHASE)?)?;
    if phase.profile_download_required() {
        tracing::info!("SIM phase {:02X}, profile download required", phase.0);
    }
    Ok(phase)
}

/// Mailbox number from the first EF_MBDN record. When that record is empty or unreadable
/// and CPHS lists its mailbox numbers, EF_CPHS_MBN is read instead.
pub fn read_mbdn(io: &mut impl EfIo, cphs: Option<&CphsInfo>) -> Result<Option<AdnRecord>, IccErr> {
    let mbdn = io.load_record(EF_MBDN, 1).and_then(|record| AdnRecord::from_bytes(&record));
    let cphs_mbn = cphs.is_some_and(|info| info.is_available(CphsService::Mbn));
    match mbdn {
        Ok(mbdn) if mbdn.is_contact() => Ok(Some(mbdn)),
        Ok(_) if cphs_mbn => read_cphs_mbn(io),
        Ok(_) => Ok(None),
        Err(e) if cphs_mbn => {
            tracing::debug!("MBDN: {}, trying CPHS mailbox", e);
            read_cphs_mbn(io)
        }
        Err(e) => Err(e),
    }
}

/// First EF_CPHS_MBN record, laid out like EF_ADN
pub fn read_cphs_mbn(io: &mut impl EfIo) -> Result<Option<AdnRecord>, IccErr> {
    let mbn = AdnRecord::from_bytes(&io.load_record(EF_CPHS_MBN, 1)?)?;
    Ok(mbn.is_contact().then_some(mbn))
}

pub fn read_cfis(io: &mut impl EfIo) -> Result<Cfis, IccErr> {
    Cfis::from_bytes(&io.load_record(EF_CFIS, 1)?)
}

/// Write the unconditional voice forwarding state of `cfis`. Returns the record as written.
pub fn update_cfis(io: &mut impl EfIo, cfis: &Cfis, active: bool, number: &str) -> Result<Cfis, IccErr> {
    let (updated, record) = cfis.with_voice_forwarding(active, number)?;
    io.update_record(EF_CFIS, 1, record, None)?;
    Ok(updated)
}

pub fn read_cphs_info(io: &mut impl EfIo) -> Result<CphsInfo, IccErr> {
    let info = CphsInfo::from_bytes(&io.load_transparent(EF_CPHS_INFO)?)?;
    tracing::debug!("CPHS phase {} service table {:02X?}", info.phase, info.service_table);
    Ok(info)
}

pub fn read_cphs_ons(io: &mut impl EfIo) -> Result<String, IccErr> {
    Ok(read_operator_name(&io.load_transparent(EF_CPHS_ONS)?))
}

pub fn read_cphs_onsf(io: &mut impl EfIo) -> Result<String, IccErr> {
    Ok(read_operator_name(&io.load_transparent(EF_CPHS_ONSF)?))
}

pub fn read_cphs_cff(io: &mut impl EfIo) -> Result<CphsCff, IccErr> {
    CphsCff::from_bytes(&io.load_transparent(EF_CPHS_CFF)?)
}

/// Set or clear the voice forwarding flag. The rest of the file is written back unchanged.
pub fn update_cphs_cff(io: &mut impl EfIo, cff: &CphsCff, active: bool) -> Result<CphsCff, IccErr> {
    let data = cff.with_voice_forwarding(active);
    io.update_transparent(EF_CPHS_CFF, data.clone())?;
    CphsCff::from_bytes(&data)
}

/// Every instance of the icon described by EF_IMG record `record`, read from the image
/// instance data files. Fails on the first instance that cannot be read.
pub fn read_img(io: &mut impl EfIo, record: u8) -> Result<Vec<ImageInstance>, IccErr> {
    let descriptors = read_img_record(&io.load_record(EF_IMG, record)?)?;
    let mut instances = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let data = io.load_image_instance(descriptor.file_id)?;
        instances.push(ImageInstance::from_iidf(&data, descriptor)?);
    }
    tracing::debug!("EF_IMG record {}: {} instances", record, instances.len());
    Ok(instances)
}

/// Stored short messages with their record numbers. Free records are skipped.
pub fn read_sms_records(io: &mut impl EfIo) -> Result<Vec<(u8, SmsRecord)>, IccErr> {
    let records = io.load_all_records(EF_SMS)?;
    let mut messages = Vec::new();
    for (record_id, record) in (1..=u8::MAX).zip(records.iter()) {
        match SmsRecord::from_bytes(record) {
            Ok(sms) if sms.message.is_some() => messages.push((record_id, sms)),
            Ok(_) => {}
            Err(e) => tracing::warn!("SMS record {}: {}", record_id, e),
        }
    }
    Ok(messages)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsimIdentity {
    pub impi: Option<String>,
    pub domain: Option<String>,
    pub impus: Vec<String>,
}

pub fn read_isim_identity_records(io: &mut impl EfIo) -> Result<IsimIdentity, IccErr> {
    let impi = read_isim_identity(&io.load_transparent(EF_ISIM_IMPI)?)?;
    let domain = read_isim_identity(&io.load_transparent(EF_ISIM_DOMAIN)?)?;
    let mut impus = Vec::new();
    for record in io.load_all_records(EF_ISIM_IMPU)? {
        if let Some(impu) = read_isim_identity(&record)? {
            impus.push(impu);
        }
    }
    Ok(IsimIdentity { impi, domain, impus })
}

/// Which names to show while registered, 3GPP TS 22.101 Annex A
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpnDisplay {
    pub network_name_required: bool,
    pub spn_required: bool,
}

/// Records of the active application as read at startup
#[derive(Debug, Clone, Default)]
pub struct SimRecords {
    pub iccid: Option<String>,
    pub msisdn: Option<String>,
    pub admin_data: Option<AdminData>,
    pub home_plmn: Option<Plmn>,
    pub spn: Option<ServiceProviderName>,
    pub spdi: Vec<Plmn>,
    pub pnn: Vec<PnnRecord>,
    /// None when EF_OPL is not an available service
    pub opl: Option<Vec<OplEntry>>,
    pub cb_ranges: Vec<Range<u32>>,
    pub mwis: Option<Mwis>,
    /// SIM only
    pub phase: Option<SimPhase>,
    pub cphs_info: Option<CphsInfo>,
    /// CPHS operator name string and its short form
    pub ons: Option<String>,
    pub ons_short: Option<String>,
    /// From EF_MBDN, or EF_CPHS_MBN as fallback
    pub mailbox: Option<AdnRecord>,
    pub cfis: Option<Cfis>,
}

impl SimRecords {
    /// Read every record the service table makes available. Failures are logged and leave
    /// the field empty.
    pub fn fetch(io: &mut impl EfIo, imsi: Option<&str>) -> Self {
        let mut records = SimRecords::default();
        let config = io.config().clone();

        records.iccid = read_iccid(io).inspect_err(|e| tracing::warn!("ICCID: {}", e)).ok();
        if let Err(e) = read_service_table(io) {
            tracing::warn!("service table: {}", e);
            return records;
        }
        let available = |service| is_service_available(&config, service);

        let app_type = config.state_read().app_type;
        if app_type == CardAppType::Sim {
            records.phase = read_sim_phase(io).inspect_err(|e| tracing::debug!("phase: {}", e)).ok();
        }
        if matches!(app_type, CardAppType::Sim | CardAppType::Usim) {
            // CPHS files are optional
            records.cphs_info = read_cphs_info(io).inspect_err(|e| tracing::debug!("CPHS info: {}", e)).ok();
            records.ons = read_cphs_ons(io).inspect_err(|e| tracing::debug!("CPHS ONS: {}", e)).ok();
        }
        let cphs_available = |info: &Option<CphsInfo>, service| info.as_ref().is_some_and(|i| i.is_available(service));

        if available(IccService::Msisdn) {
            records.msisdn = match read_msisdn(io) {
                Ok(msisdn) => msisdn.map(|m| m.number),
                Err(e) => {
                    tracing::warn!("MSISDN: {}", e);
                    None
                }
            };
        }
        records.admin_data = read_ad(io).inspect_err(|e| tracing::warn!("AD: {}", e)).ok();
        if let (Some(ad), Some(imsi)) = (&records.admin_data, imsi) {
            records.home_plmn = ad.mcc_mnc_from_imsi(imsi).map(|(mcc, mnc)| Plmn::new(&mcc, &mnc));
        }
        if available(IccService::Spn) {
            records.spn = read_spn(io).inspect_err(|e| tracing::warn!("SPN: {}", e)).ok();
        }
        if available(IccService::Mdn) {
            records.mailbox = read_mbdn(io, records.cphs_info.as_ref())
                .inspect_err(|e| tracing::warn!("MBDN: {}", e))
                .ok()
                .flatten();
        } else if cphs_available(&records.cphs_info, CphsService::Mbn) {
            records.mailbox = read_cphs_mbn(io).inspect_err(|e| tracing::warn!("CPHS MBN: {}", e)).ok().flatten();
        }
        if available(IccService::Mwis) {
            records.mwis = read_mwis(io).inspect_err(|e| tracing::warn!("MWIS: {}", e)).ok();
        }
        if cphs_available(&records.cphs_info, CphsService::Onsf) {
            records.ons_short = read_cphs_onsf(io).inspect_err(|e| tracing::warn!("CPHS ONSF: {}", e)).ok();
        }
        if available(IccService::Spdi) {
            records.spdi = read_spdi(io).inspect_err(|e| tracing::warn!("SPDI: {}", e)).unwrap_or_default();
        }
        if available(IccService::Pnn) {
            records.pnn = read_pnn(io).inspect_err(|e| tracing::warn!("PNN: {}", e)).unwrap_or_default();
        }
        if available(IccService::Opl) {
            records.opl = Some(read_opl(io).inspect_err(|e| tracing::warn!("OPL: {}", e)).unwrap_or_default());
        }
        if available(IccService::Cfis) {
            records.cfis = read_cfis(io).inspect_err(|e| tracing::warn!("CFIS: {}", e)).ok();
        }
        records.cb_ranges = read_cb_ranges(io);
        records
    }

    /// Network name from EF_OPL and EF_PNN for the serving cell, as (full, short).
    /// Without EF_OPL the first PNN record names the home network only.
    pub fn network_name(&self, mcc: &str, mnc: &str, lac: u16) -> Option<(String, String)> {
        if self.pnn.is_empty() {
            return None;
        }
        let entry = match &self.opl {
            None => {
                let home = self.home_plmn.as_ref()?;
                if home.mcc != mcc || home.mnc != mnc {
                    return None;
                }
                self.pnn.first()?
            }
            Some(opl) => {
                let matching = opl.iter().find(|entry| entry.matches(mcc, mnc, lac))?;
                // Zero: the name comes from other sources
                if matching.pnn_record_id == 0 {
                    return None;
                }
                self.pnn.get(matching.pnn_record_id as usize - 1)?
            }
        };
        let full = entry.full_name.as_ref().map(|n| n.name.clone()).unwrap_or_default();
        let short = entry.short_name.as_ref().map(|n| n.name.clone()).unwrap_or_default();
        Some((full, short))
    }

    /// Display rules for the service provider name while registered on `mcc`/`mnc`
    pub fn spn_display(&self, mcc: &str, mnc: &str) -> SpnDisplay {
        let Some(spn) = &self.spn else {
            return SpnDisplay { network_name_required: true, spn_required: false };
        };
        let on_home = self.home_plmn.as_ref().is_some_and(|home| home.mcc == mcc && home.mnc == mnc);
        let in_spdi = self.spdi.iter().any(|plmn| plmn.mcc == mcc && plmn.mnc == mnc);
        if on_home || in_spdi {
            SpnDisplay { network_name_required: spn.show_plmn_in_home(), spn_required: true }
        } else {
            SpnDisplay { network_name_required: true, spn_required: spn.show_spn_when_roaming() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_pdus::icc::fields::network_name::NetworkName;

    fn pnn(full: &str) -> PnnRecord {
        PnnRecord { full_name: Some(NetworkName { name: full.to_string(), add_country_initials: false }), short_name: None }
    }

    fn records() -> SimRecords {
        SimRecords {
            home_plmn: Some(Plmn::new("310", "410")),
            pnn: vec![pnn("Home"), pnn("Partner")],
            ..Default::default()
        }
    }

    #[test]
    fn test_network_name_without_opl() {
        debug::setup_logging_verbose();
        let records = records();
        assert_eq!(records.network_name("310", "410", 1), Some(("Home".to_string(), String::new())));
        assert_eq!(records.network_name("310", "260", 1), None);
    }

    #[test]
    fn test_network_name_with_opl() {
        let mut records = records();
        records.opl = Some(vec![
            OplEntry { plmn: Plmn::new("310", "DD0"), lac_start: 0x0000, lac_end: 0x00FF, pnn_record_id: 2 },
            OplEntry { plmn: Plmn::new("310", "410"), lac_start: 0x0000, lac_end: 0xFFFE, pnn_record_id: 0 },
        ]);
        assert_eq!(records.network_name("310", "260", 0x0010), Some(("Partner".to_string(), String::new())));
        // Record id zero defers to other sources
        assert_eq!(records.network_name("310", "410", 0x1000), None);
        assert_eq!(records.network_name("311", "480", 0x0010), None);
    }

    #[test]
    fn test_spn_display() {
        let mut records = records();
        assert_eq!(records.spn_display("310", "410"), SpnDisplay { network_name_required: true, spn_required: false });

        records.spn = Some(ServiceProviderName { display_condition: 0x01, name: "Telco".to_string() });
        records.spdi = vec![Plmn::new("310", "260")];
        assert_eq!(records.spn_display("310", "410"), SpnDisplay { network_name_required: true, spn_required: true });
        assert_eq!(records.spn_display("310", "260"), SpnDisplay { network_name_required: true, spn_required: true });

        records.spn = Some(ServiceProviderName { display_condition: 0x02, name: "Telco".to_string() });
        assert_eq!(records.spn_display("310", "410"), SpnDisplay { network_name_required: false, spn_required: true });
        assert_eq!(records.spn_display("208", "01"), SpnDisplay { network_name_required: true, spn_required: false });
    }
}
