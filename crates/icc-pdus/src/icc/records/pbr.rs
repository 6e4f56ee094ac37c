//! EF_PBR phonebook reference file, 3GPP TS 31.102 clause 4.4.2.1

use core::fmt;
use std::collections::BTreeMap;

use icc_core::{FileId, IccErr, OctetBuffer};

use crate::icc::enums::pbr_file_type::PbrFileType;

/// Unused remainder of a PBR record
const PBR_TAG_END: u8 = 0xFF;

/// Phonebook file referenced from EF_PBR
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PbrField {
    Adn,
    Iap,
    Ext1,
    Sne,
    /// Additional number files, numbered in order of appearance
    Anr(u8),
    Pbc,
    Grp,
    Aas,
    Gas,
    Uid,
    Email,
    Ccp1,
}

impl PbrField {
    /// Map a file tag, 0xC0..=0xCB. `anr_index` numbers successive 0xC4 tags.
    pub fn from_tag(tag: u8, anr_index: u8) -> Option<Self> {
        Some(match tag {
            0xC0 => PbrField::Adn,
            0xC1 => PbrField::Iap,
            0xC2 => PbrField::Ext1,
            0xC3 => PbrField::Sne,
            0xC4 => PbrField::Anr(anr_index),
            0xC5 => PbrField::Pbc,
            0xC6 => PbrField::Grp,
            0xC7 => PbrField::Aas,
            0xC8 => PbrField::Gas,
            0xC9 => PbrField::Uid,
            0xCA => PbrField::Email,
            0xCB => PbrField::Ccp1,
            _ => return None,
        })
    }
}

impl fmt::Display for PbrField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PbrField::Adn => write!(f, "adn"),
            PbrField::Iap => write!(f, "iap"),
            PbrField::Ext1 => write!(f, "ext1"),
            PbrField::Sne => write!(f, "sne"),
            PbrField::Anr(i) => write!(f, "anr{}", i),
            PbrField::Pbc => write!(f, "pbc"),
            PbrField::Grp => write!(f, "grp"),
            PbrField::Aas => write!(f, "aas"),
            PbrField::Gas => write!(f, "gas"),
            PbrField::Uid => write!(f, "uid"),
            PbrField::Email => write!(f, "email"),
            PbrField::Ccp1 => write!(f, "ccp1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PbrFile {
    pub file_type: PbrFileType,
    pub file_id: FileId,
    /// Short file identifier, absent when the TLV holds only the file id
    pub sfi: Option<u8>,
    /// Position of this file's record number within EF_IAP, Type 2 only
    pub index_in_iap: Option<usize>,
}

/// One EF_PBR record, describing one phonebook set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PbrSet {
    pub files: BTreeMap<PbrField, PbrFile>,
}

impl PbrSet {
    /// Decode one record. Returns None for an unused record.
    pub fn from_record(record: &[u8]) -> Result<Option<Self>, IccErr> {
        let mut buf = OctetBuffer::from_bytes(record);
        let mut set = PbrSet::default();
        let mut anr_index = 0u8;

        while let Some(tag) = buf.peek_octet() {
            if tag == PBR_TAG_END {
                break;
            }
            buf.skip(1)?;
            let length = buf.read_field("pbr_length")? as usize;
            let value = buf.read_slice(length)?;
            let Ok(file_type) = PbrFileType::try_from(tag as u64) else {
                tracing::debug!("skipping PBR tag 0x{:02x}", tag);
                continue;
            };

            let mut inner = OctetBuffer::from_bytes(value);
            let mut position = 0;
            while inner.get_len_remaining() > 0 {
                let file_tag = inner.read_field("pbr_file_tag")?;
                let file_len = inner.read_field("pbr_file_length")? as usize;
                let file_value = inner.read_slice(file_len)?;
                let index = position;
                position += 1;

                let Some(field) = PbrField::from_tag(file_tag, anr_index) else {
                    tracing::debug!("skipping PBR file tag 0x{:02x}", file_tag);
                    continue;
                };
                if let PbrField::Anr(_) = field {
                    anr_index += 1;
                }
                if file_value.len() < 2 {
                    return Err(IccErr::MalformedTlv { reason: "PBR file reference too short" });
                }
                let file = PbrFile {
                    file_type,
                    file_id: u16::from_be_bytes([file_value[0], file_value[1]]),
                    sfi: file_value.get(2).copied(),
                    index_in_iap: (file_type == PbrFileType::Type2).then_some(index),
                };
                tracing::trace!("PBR {} {} file {:04X}", field, file_type, file.file_id);
                set.files.insert(field, file);
            }
        }
        Ok(if set.files.is_empty() { None } else { Some(set) })
    }

    pub fn get(&self, field: PbrField) -> Option<&PbrFile> {
        self.files.get(&field)
    }

    pub fn adn(&self) -> Option<&PbrFile> {
        self.get(PbrField::Adn)
    }
}

/// All phonebook sets of the USIM, one per used EF_PBR record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pbr {
    pub sets: Vec<PbrSet>,
}

impl Pbr {
    /// Decode all EF_PBR records. A set without EF_ADN makes the phonebook inaccessible.
    pub fn from_records(records: &[Vec<u8>]) -> Result<Self, IccErr> {
        let mut sets = Vec::new();
        for record in records {
            if let Some(set) = PbrSet::from_record(record)? {
                if set.adn().is_none() {
                    tracing::warn!("PBR record without EF_ADN reference");
                    return Err(IccErr::CannotAccessPhonebook);
                }
                sets.push(set);
            }
        }
        if sets.is_empty() {
            return Err(IccErr::CannotAccessPhonebook);
        }
        Ok(Pbr { sets })
    }
}

impl fmt::Display for Pbr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pbr {{")?;
        for (i, set) in self.sets.iter().enumerate() {
            write!(f, " {}: [", i)?;
            for (field, file) in &set.files {
                write!(f, " {}={:04X}/{}", field, file.file_id, file.file_type)?;
            }
            write!(f, " ]")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_adn_only() {
        debug::setup_logging_verbose();
        let record = hex_to_bytes("A805C0034F3A01FFFFFFFF").unwrap();
        let pbr = Pbr::from_records(&[record]).unwrap();
        tracing::info!("{}", pbr);
        let set = &pbr.sets[0];
        assert_eq!(set.files.len(), 1);
        assert_eq!(set.adn().map(|f| f.file_id), Some(0x4F3A));
        assert_eq!(set.adn().and_then(|f| f.sfi), Some(0x01));
        assert!(set.get(PbrField::Email).is_none());
        assert!(set.get(PbrField::Iap).is_none());
    }

    #[test]
    fn test_type1_and_type2() {
        // Type 1: ADN, IAP, ANR; Type 2: EMAIL, ANR
        let record = hex_to_bytes("A80FC0034F3A02C1034F2503C4034F1104A90AC4034F1205CA034F5006FFFF").unwrap();
        let pbr = Pbr::from_records(&[record, vec![0xFF; 20]]).unwrap();
        assert_eq!(pbr.sets.len(), 1);
        let set = &pbr.sets[0];

        let anr0 = set.get(PbrField::Anr(0)).unwrap();
        assert_eq!(anr0.file_type, PbrFileType::Type1);
        assert_eq!(anr0.index_in_iap, None);

        let anr1 = set.get(PbrField::Anr(1)).unwrap();
        assert_eq!(anr1.file_type, PbrFileType::Type2);
        assert_eq!(anr1.index_in_iap, Some(0));

        let email = set.get(PbrField::Email).unwrap();
        assert_eq!(email.file_id, 0x4F50);
        assert_eq!(email.index_in_iap, Some(1));
    }

    #[test]
    fn test_missing_adn() {
        let record = hex_to_bytes("A805CA034F5001").unwrap();
        assert_eq!(Pbr::from_records(&[record]), Err(IccErr::CannotAccessPhonebook));
        assert_eq!(Pbr::from_records(&[vec![0xFF; 8]]), Err(IccErr::CannotAccessPhonebook));
    }
}
