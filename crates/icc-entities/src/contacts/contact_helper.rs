use icc_config::SharedConfig;
use icc_core::{CardAppType, FileId, IccErr};
use icc_pdus::icc::ef_ids::{EF_ADN, EF_EXT1, EF_EXT2, EF_EXT3, EF_FDN, EF_PBR, EF_SDN, ef_name};
use icc_pdus::icc::enums::pbr_file_type::PbrFileType;
use icc_pdus::icc::fields::dialling_number::{EXT_MAX_NUMBER_DIGITS, split_number};
use icc_pdus::icc::records::adn_record::AdnRecord;
use icc_pdus::icc::records::anr_record::{read_anr_record, write_anr_record};
use icc_pdus::icc::records::email_record::{read_email_record, write_email_record};
use icc_pdus::icc::records::ext_record::{EXT_RECORD_SIZE, read_ext_record, write_ext_record};
use icc_pdus::icc::records::icc_contact::IccContact;
use icc_pdus::icc::records::pbr::{Pbr, PbrField, PbrFile, PbrSet};
use icc_pdus::icc::records::service_table::IccService;

use crate::io::icc_channel::EfIo;
use crate::records::sim_records::is_service_available;

/// Auxiliary fields read and written along with each USIM contact
const USIM_CONTACT_FIELDS: [PbrField; 2] = [PbrField::Email, PbrField::Anr(0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Adn,
    /// Fixed dialling numbers, updates need PIN2
    Fdn,
    /// Service dialling numbers, read only
    Sdn,
}

/// Whether ADN contacts live in DF_PHONEBOOK, described by EF_PBR
pub fn has_df_phonebook(config: &SharedConfig) -> bool {
    match config.state_read().app_type {
        CardAppType::Usim => true,
        CardAppType::Ruim => is_service_available(config, IccService::EnhancedPhonebook),
        CardAppType::Sim | CardAppType::Isim => false,
    }
}

fn ext_file_if(config: &SharedConfig, service: IccService, file_id: FileId) -> Option<FileId> {
    is_service_available(config, service).then_some(file_id)
}

fn is_unused_record_id(record_id: u8) -> bool {
    record_id == 0 || record_id == 0xFF
}

/// Decode every contact of an ADN-like EF. Extension digits are appended when `ext_file_id`
/// is given; a failing extension leaves the base number.
pub fn read_adn_like(io: &mut impl EfIo, file_id: FileId, ext_file_id: Option<FileId>) -> Result<Vec<IccContact>, IccErr> {
    let records = io.load_all_records(file_id)?;
    let mut contacts = Vec::new();
    for (record_id, record) in (1..=u8::MAX).zip(records.iter()) {
        let adn = match AdnRecord::from_bytes(record) {
            Ok(adn) => adn,
            Err(e) => {
                tracing::warn!("{} record {}: {}", ef_name(file_id), record_id, e);
                continue;
            }
        };
        if !adn.is_contact() {
            continue;
        }
        let mut number = adn.number;
        if let (Some(ext_file_id), Some(ext_record_id)) = (ext_file_id, adn.ext_record_id) {
            match io.load_record(ext_file_id, ext_record_id).and_then(|r| read_ext_record(&r)) {
                Ok(digits) => number.push_str(&digits),
                Err(e) => tracing::debug!("extension record {} of {}: {}", ext_record_id, ef_name(file_id), e),
            }
        }
        contacts.push(IccContact { record_id, alpha_id: adn.alpha_id, number, ..Default::default() });
    }
    tracing::debug!("{} contacts in {}", contacts.len(), ef_name(file_id));
    Ok(contacts)
}

/// Write a contact into an ADN-like EF, keeping its extension record in sync. Returns the
/// contact as stored.
pub fn update_adn_like(
    io: &mut impl EfIo,
    file_id: FileId,
    ext_file_id: Option<FileId>,
    contact: &IccContact,
    pin2: Option<&str>,
) -> Result<IccContact, IccErr> {
    if contact.record_id == 0 {
        return Err(IccErr::InvalidArguments { reason: "contact without record id" });
    }
    let record_size = io.descriptor(file_id)?.record_size;
    let (main_number, overflow) = split_number(&contact.number);
    let mut adn = AdnRecord::new(&contact.alpha_id, &main_number);
    let mut stored_number = main_number;

    match ext_file_id {
        Some(ext_file_id) => {
            let current = AdnRecord::from_bytes(&io.load_record(file_id, contact.record_id)?)
                .ok()
                .and_then(|a| a.ext_record_id);
            match (overflow, current) {
                (Some(digits), current) => {
                    let ext_record = match current {
                        Some(record) => Ok(record),
                        None => io.find_free_record(ext_file_id),
                    };
                    match ext_record {
                        Ok(record) => {
                            let written = write_ext_record(&digits)
                                .and_then(|data| io.update_record(ext_file_id, record, data, pin2));
                            match written {
                                Ok(()) => {
                                    adn.ext_record_id = Some(record);
                                    stored_number.extend(digits.chars().take(EXT_MAX_NUMBER_DIGITS));
                                }
                                Err(e) => {
                                    // Base record goes out without extension pointer
                                    tracing::warn!("extension record {} of {} not written: {}", record, ef_name(ext_file_id), e);
                                    if let Err(e) = io.update_record(ext_file_id, record, vec![0xFF; EXT_RECORD_SIZE], pin2) {
                                        tracing::debug!("cleaning extension record {}: {}", record, e);
                                    }
                                }
                            }
                        }
                        Err(e) => tracing::warn!("extension digits of record {} dropped: {}", contact.record_id, e),
                    }
                }
                (None, Some(record)) => {
                    tracing::debug!("cleaning extension record {} of {}", record, ef_name(ext_file_id));
                    io.update_record(ext_file_id, record, vec![0xFF; EXT_RECORD_SIZE], pin2)?;
                }
                (None, None) => {}
            }
        }
        None => {
            if overflow.is_some() {
                tracing::debug!("no extension file for {}, number truncated", ef_name(file_id));
            }
        }
    }

    let (record, alpha_id) = adn.to_bytes(record_size)?;
    io.update_record(file_id, contact.record_id, record, pin2)?;
    Ok(IccContact { alpha_id, number: stored_number, ..contact.clone() })
}

/// Phonebook access on top of EF access: ADN, FDN, SDN and the USIM phonebook sets
#[derive(Debug, Default)]
pub struct ContactHelper {
    /// Decoded EF_PBR and the application generation it was read under
    pbr: Option<(u32, Pbr)>,
    /// Phonebook set to search first for a free ADN record
    free_pbr_index: usize,
}

impl ContactHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_pbr(&mut self, io: &mut impl EfIo) -> Result<Pbr, IccErr> {
        let generation = io.config().state_read().app_generation;
        if let Some((cached_generation, pbr)) = &self.pbr {
            if *cached_generation == generation {
                return Ok(pbr.clone());
            }
        }
        let records = io.load_all_records(EF_PBR)?;
        let pbr = Pbr::from_records(&records)?;
        tracing::debug!("{}", pbr);
        self.pbr = Some((generation, pbr.clone()));
        self.free_pbr_index = 0;
        Ok(pbr)
    }

    pub fn read_contacts(&mut self, io: &mut impl EfIo, contact_type: ContactType) -> Result<Vec<IccContact>, IccErr> {
        let config = io.config().clone();
        match contact_type {
            ContactType::Adn if has_df_phonebook(&config) => self.read_usim_contacts(io),
            ContactType::Adn => read_adn_like(io, EF_ADN, ext_file_if(&config, IccService::Ext1, EF_EXT1)),
            ContactType::Fdn => {
                if !is_service_available(&config, IccService::Fdn) {
                    return Err(IccErr::ContactTypeNotSupported);
                }
                read_adn_like(io, EF_FDN, ext_file_if(&config, IccService::Ext2, EF_EXT2))
            }
            ContactType::Sdn => {
                if !is_service_available(&config, IccService::Sdn) {
                    return Err(IccErr::ContactTypeNotSupported);
                }
                read_adn_like(io, EF_SDN, ext_file_if(&config, IccService::Ext3, EF_EXT3))
            }
        }
    }

    fn read_usim_contacts(&mut self, io: &mut impl EfIo) -> Result<Vec<IccContact>, IccErr> {
        let pbr = match self.read_pbr(io) {
            Ok(pbr) => pbr,
            Err(e) => {
                tracing::warn!("EF_PBR unusable ({}), reading EF_ADN", e);
                return read_adn_like(io, EF_ADN, None);
            }
        };
        let mut contacts = Vec::new();
        for (index, set) in pbr.sets.iter().enumerate() {
            let mut set_contacts = self.read_phonebook_set(io, set)?;
            for contact in set_contacts.iter_mut() {
                contact.pbr_index = Some(index);
            }
            contacts.append(&mut set_contacts);
        }
        Ok(contacts)
    }

    fn read_phonebook_set(&mut self, io: &mut impl EfIo, set: &PbrSet) -> Result<Vec<IccContact>, IccErr> {
        let adn = set.adn().ok_or(IccErr::CannotAccessPhonebook)?;
        let ext1 = set.get(PbrField::Ext1).map(|f| f.file_id);
        let mut contacts = read_adn_like(io, adn.file_id, ext1)?;

        for field in USIM_CONTACT_FIELDS {
            let Some(file) = set.get(field).copied() else {
                continue;
            };
            for contact in contacts.iter_mut() {
                let record_id = field_record_id(io, set, &file, contact.record_id)?;
                if is_unused_record_id(record_id) {
                    continue;
                }
                let record = io.load_record(file.file_id, record_id)?;
                match field {
                    PbrField::Email => {
                        let email = read_email_record(&record, file.file_type);
                        if !email.is_empty() {
                            contact.emails.push(email);
                        }
                    }
                    _ => {
                        let anr = read_anr_record(&record)?;
                        if !anr.is_empty() {
                            contact.anrs.push(anr);
                        }
                    }
                }
            }
        }
        Ok(contacts)
    }

    /// Number of contacts the card can hold
    pub fn max_contact_count(&mut self, io: &mut impl EfIo, contact_type: ContactType) -> Result<usize, IccErr> {
        let file_id = match contact_type {
            ContactType::Adn if has_df_phonebook(io.config()) => {
                let pbr = self.read_pbr(io)?;
                let mut total = 0;
                for set in &pbr.sets {
                    let adn = set.adn().ok_or(IccErr::CannotAccessPhonebook)?;
                    total += io.descriptor(adn.file_id)?.record_count;
                }
                return Ok(total);
            }
            ContactType::Adn => EF_ADN,
            ContactType::Fdn => EF_FDN,
            ContactType::Sdn => EF_SDN,
        };
        Ok(io.descriptor(file_id)?.record_count)
    }

    /// Free record for a new contact, with its phonebook set on USIM
    pub fn find_free_contact(
        &mut self,
        io: &mut impl EfIo,
        contact_type: ContactType,
    ) -> Result<(u8, Option<usize>), IccErr> {
        match contact_type {
            ContactType::Adn if has_df_phonebook(io.config()) => self.find_usim_free_adn_record(io),
            ContactType::Adn => Ok((io.find_free_record(EF_ADN)?, None)),
            ContactType::Fdn => Ok((io.find_free_record(EF_FDN)?, None)),
            ContactType::Sdn => Err(IccErr::ContactTypeNotSupported),
        }
    }

    /// Cycle through the phonebook sets starting at the last one with room
    fn find_usim_free_adn_record(&mut self, io: &mut impl EfIo) -> Result<(u8, Option<usize>), IccErr> {
        let pbr = self.read_pbr(io)?;
        let total = pbr.sets.len();
        let start = self.free_pbr_index % total;
        let mut index = start;
        loop {
            let adn = pbr.sets[index].adn().ok_or(IccErr::CannotAccessPhonebook)?;
            match io.find_free_record(adn.file_id) {
                Ok(record) => {
                    self.free_pbr_index = index;
                    return Ok((record, Some(index)));
                }
                Err(IccErr::NoFreeRecord { file_id }) => {
                    index = (index + 1) % total;
                    if index == start {
                        self.free_pbr_index = 0;
                        return Err(IccErr::NoFreeRecord { file_id });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Store a new contact in a free record. Returns the contact as stored.
    pub fn add_contact(
        &mut self,
        io: &mut impl EfIo,
        contact_type: ContactType,
        contact: &IccContact,
        pin2: Option<&str>,
    ) -> Result<IccContact, IccErr> {
        if contact_type == ContactType::Fdn && pin2.is_none() {
            return Err(IccErr::Pin2Required);
        }
        let (record_id, pbr_index) = self.find_free_contact(io, contact_type)?;
        let contact = IccContact { record_id, pbr_index, ..contact.clone() };
        self.update_contact(io, contact_type, &contact, pin2)
    }

    /// Overwrite the contact at its record id. Returns the contact as stored.
    pub fn update_contact(
        &mut self,
        io: &mut impl EfIo,
        contact_type: ContactType,
        contact: &IccContact,
        pin2: Option<&str>,
    ) -> Result<IccContact, IccErr> {
        let config = io.config().clone();
        match contact_type {
            ContactType::Adn if has_df_phonebook(&config) => self.update_usim_contact(io, contact),
            ContactType::Adn => {
                update_adn_like(io, EF_ADN, ext_file_if(&config, IccService::Ext1, EF_EXT1), contact, None)
            }
            ContactType::Fdn => {
                let Some(pin2) = pin2 else {
                    return Err(IccErr::Pin2Required);
                };
                if !is_service_available(&config, IccService::Fdn) {
                    return Err(IccErr::ContactTypeNotSupported);
                }
                update_adn_like(io, EF_FDN, ext_file_if(&config, IccService::Ext2, EF_EXT2), contact, Some(pin2))
            }
            ContactType::Sdn => Err(IccErr::ContactTypeNotSupported),
        }
    }

    /// Clear the contact's record. Extension and auxiliary records are released as well.
    pub fn remove_contact(
        &mut self,
        io: &mut impl EfIo,
        contact_type: ContactType,
        contact: &IccContact,
        pin2: Option<&str>,
    ) -> Result<(), IccErr> {
        let empty = IccContact { record_id: contact.record_id, pbr_index: contact.pbr_index, ..Default::default() };
        self.update_contact(io, contact_type, &empty, pin2).map(|_| ())
    }

    fn update_usim_contact(&mut self, io: &mut impl EfIo, contact: &IccContact) -> Result<IccContact, IccErr> {
        let pbr = self.read_pbr(io)?;
        let set = contact.pbr_index.and_then(|i| pbr.sets.get(i)).ok_or(IccErr::CannotAccessPhonebook)?;
        let adn = set.adn().ok_or(IccErr::CannotAccessPhonebook)?;
        let ext1 = set.get(PbrField::Ext1).map(|f| f.file_id);
        let mut stored = update_adn_like(io, adn.file_id, ext1, contact, None)?;
        stored.emails.clear();
        stored.anrs.clear();

        for field in USIM_CONTACT_FIELDS {
            let Some(file) = set.get(field).copied() else {
                continue;
            };
            let value = match field {
                PbrField::Email => contact.email(),
                _ => contact.anr(),
            };
            match update_field(io, set, &file, field, contact.record_id, adn.sfi, value.unwrap_or("")) {
                Ok(Some(written)) if field == PbrField::Email => stored.emails.push(written),
                Ok(Some(written)) => stored.anrs.push(written),
                Ok(None) => {}
                Err(IccErr::NoFreeRecord { file_id }) => {
                    tracing::warn!("no room for {} of contact {} in {:04X}", field, contact.record_id, file_id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(stored)
    }
}

/// Record of `file` holding the field of ADN record `adn_record_id`
fn field_record_id(io: &mut impl EfIo, set: &PbrSet, file: &PbrFile, adn_record_id: u8) -> Result<u8, IccErr> {
    match file.file_type {
        PbrFileType::Type1 => Ok(adn_record_id),
        PbrFileType::Type2 => {
            let iap = set.get(PbrField::Iap).ok_or(IccErr::CannotAccessPhonebook)?;
            let index = file.index_in_iap.ok_or(IccErr::CannotAccessPhonebook)?;
            let record = io.load_record(iap.file_id, adn_record_id)?;
            Ok(record.get(index).copied().unwrap_or(0xFF))
        }
        PbrFileType::Type3 => Err(IccErr::RequestNotSupported),
    }
}

/// Write one auxiliary field. Type 2 fields without a record get a free one, linked from
/// EF_IAP. Returns the value as stored, None when nothing is stored.
fn update_field(
    io: &mut impl EfIo,
    set: &PbrSet,
    file: &PbrFile,
    field: PbrField,
    adn_record_id: u8,
    adn_sfi: Option<u8>,
    value: &str,
) -> Result<Option<String>, IccErr> {
    let record_id = match file.file_type {
        PbrFileType::Type1 => adn_record_id,
        PbrFileType::Type2 => {
            let iap_file = set.get(PbrField::Iap).ok_or(IccErr::CannotAccessPhonebook)?;
            let index = file.index_in_iap.ok_or(IccErr::CannotAccessPhonebook)?;
            let mut iap = io.load_record(iap_file.file_id, adn_record_id)?;
            let current = iap.get(index).copied().unwrap_or(0xFF);
            if !is_unused_record_id(current) {
                current
            } else {
                if value.is_empty() {
                    return Ok(None);
                }
                if index >= iap.len() {
                    return Err(IccErr::InvalidValue { field: "index_in_iap", value: index as u64 });
                }
                let record_id = io.find_free_record(file.file_id)?;
                let written = write_field(io, file, field, record_id, adn_sfi, adn_record_id, value)?;
                iap[index] = record_id;
                io.update_record(iap_file.file_id, adn_record_id, iap, None)?;
                return Ok(written);
            }
        }
        PbrFileType::Type3 => return Err(IccErr::RequestNotSupported),
    };
    write_field(io, file, field, record_id, adn_sfi, adn_record_id, value)
}

fn write_field(
    io: &mut impl EfIo,
    file: &PbrFile,
    field: PbrField,
    record_id: u8,
    adn_sfi: Option<u8>,
    adn_record_id: u8,
    value: &str,
) -> Result<Option<String>, IccErr> {
    let record_size = io.descriptor(file.file_id)?.record_size;
    match field {
        PbrField::Email => {
            let (record, written) = write_email_record(record_size, value, file.file_type, adn_sfi, adn_record_id)?;
            io.update_record(file.file_id, record_id, record, None)?;
            Ok((!written.is_empty()).then_some(written))
        }
        _ => {
            let record = write_anr_record(record_size, value, file.file_type, adn_sfi, adn_record_id)?;
            io.update_record(file.file_id, record_id, record, None)?;
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
    }
}
