//! In-memory card answering SIM IO from a set of EFs, for tests and offline dumps

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use icc_core::icc_entities::IccEntity;
use icc_core::octet_buffer::hex_to_bytes;
use icc_core::{FileId, Sap};
use icc_pdus::icc::enums::ef_structure::EfStructure;
use icc_pdus::icc::enums::icc_command::{IccCommand, P2_RECORD_ABSOLUTE};
use icc_pdus::icc::fields::file_descriptor::EfDescriptor;
use icc_saps::sim_io::{SimIoReq, SimIoRsp};
use icc_saps::{SapMsg, SapMsgInner};

use crate::io::icc_channel::IccChannel;
use crate::{IccEntityTrait, MessageQueue};

/// ETSI TS 102.221 clause 10.2.1 status words
const SW_WRONG_LENGTH: (u8, u8) = (0x67, 0x00);
const SW_SECURITY_STATUS: (u8, u8) = (0x69, 0x82);
const SW_FILE_NOT_FOUND: (u8, u8) = (0x6A, 0x82);
const SW_RECORD_NOT_FOUND: (u8, u8) = (0x6A, 0x83);
const SW_INCORRECT_P1_P2: (u8, u8) = (0x6A, 0x86);

#[derive(Debug, Clone)]
struct CardFile {
    descriptor: EfDescriptor,
    content: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct CardImage {
    /// Answer GET RESPONSE with a FCP template instead of the SIM format
    pub fcp: bool,
    pin2: Option<String>,
    files: BTreeMap<(String, FileId), CardFile>,
    pin2_files: HashSet<FileId>,
    history: Vec<SimIoReq>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageFile {
    fcp: Option<bool>,
    pin2: Option<String>,
    #[serde(default)]
    transparent: Vec<ImageTransparent>,
    #[serde(default)]
    linear_fixed: Vec<ImageLinearFixed>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageTransparent {
    path: String,
    file_id: FileId,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageLinearFixed {
    path: String,
    file_id: FileId,
    record_size: usize,
    /// Records beyond the listed ones are empty (all 0xFF)
    record_count: Option<usize>,
    #[serde(default)]
    records: Vec<String>,
    #[serde(default)]
    pin2_protected: bool,
}

impl CardImage {
    pub fn new(fcp: bool) -> Self {
        Self { fcp, ..Default::default() }
    }

    /// Parse a card image:
    /// ```toml
    /// fcp = false
    /// pin2 = "1234"
    ///
    /// [[transparent]]
    /// path = "3F00"
    /// file_id = 0x2FE2
    /// content = "981010325476981032F4"
    ///
    /// [[linear_fixed]]
    /// path = "3F007F10"
    /// file_id = 0x6F3A
    /// record_size = 30
    /// record_count = 10
    /// records = ["4A6F686EFFFF..."]
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let root: ImageFile = toml::from_str(toml_str)?;
        let mut image = CardImage::new(root.fcp.unwrap_or(false));
        image.pin2 = root.pin2;
        for file in root.transparent {
            image.add_transparent(&file.path, file.file_id, hex_to_bytes(&file.content)?);
        }
        for file in root.linear_fixed {
            let records = file.records.iter().map(|r| hex_to_bytes(r)).collect::<Result<Vec<_>, _>>()?;
            let record_count = file.record_count.unwrap_or(records.len()).max(records.len());
            image.add_linear_fixed(&file.path, file.file_id, file.record_size, record_count, &records);
            if file.pin2_protected {
                image.pin2_files.insert(file.file_id);
            }
        }
        Ok(image)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn add_transparent(&mut self, path: &str, file_id: FileId, content: Vec<u8>) {
        let descriptor = EfDescriptor {
            file_id,
            structure: EfStructure::Transparent,
            record_size: 0,
            record_count: 0,
            file_size: content.len(),
            path: path.to_string(),
        };
        self.files.insert((path.to_string(), file_id), CardFile { descriptor, content });
    }

    /// Add a linear fixed EF of `record_count` records. Given records are padded with 0xFF,
    /// missing ones are empty.
    pub fn add_linear_fixed(
        &mut self,
        path: &str,
        file_id: FileId,
        record_size: usize,
        record_count: usize,
        records: &[Vec<u8>],
    ) {
        let mut content = vec![0xFF; record_size * record_count];
        for (i, record) in records.iter().take(record_count).enumerate() {
            let len = record.len().min(record_size);
            content[i * record_size..i * record_size + len].copy_from_slice(&record[..len]);
        }
        let descriptor = EfDescriptor {
            file_id,
            structure: EfStructure::LinearFixed,
            record_size,
            record_count,
            file_size: content.len(),
            path: path.to_string(),
        };
        self.files.insert((path.to_string(), file_id), CardFile { descriptor, content });
    }

    /// Require PIN2 for updates of `file_id`
    pub fn protect_with_pin2(&mut self, file_id: FileId, pin2: &str) {
        self.pin2 = Some(pin2.to_string());
        self.pin2_files.insert(file_id);
    }

    pub fn content(&self, path: &str, file_id: FileId) -> Option<&[u8]> {
        self.files.get(&(path.to_string(), file_id)).map(|f| f.content.as_slice())
    }

    /// Record `record`, starting at 1
    pub fn record(&self, path: &str, file_id: FileId, record: u8) -> Option<&[u8]> {
        let file = self.files.get(&(path.to_string(), file_id))?;
        let size = file.descriptor.record_size;
        let start = (record as usize).checked_sub(1)? * size;
        file.content.get(start..start + size)
    }

    /// All requests received so far
    pub fn history(&self) -> &[SimIoReq] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn get_response(&self, file: &CardFile) -> Vec<u8> {
        if self.fcp { fcp_response(&file.descriptor) } else { file.descriptor.to_classic_response() }
    }

    fn answer(&mut self, req: &SimIoReq) -> Result<Vec<u8>, (u8, u8)> {
        let pin2_ok = !self.pin2_files.contains(&req.file_id) || (self.pin2.is_some() && req.pin2 == self.pin2);
        let key = (req.path.clone(), req.file_id);
        let Some(file) = self.files.get(&key) else {
            return Err(SW_FILE_NOT_FOUND);
        };
        let record_size = file.descriptor.record_size;
        let record_range = |p1: u8| -> Result<std::ops::Range<usize>, (u8, u8)> {
            if req.p2 != P2_RECORD_ABSOLUTE {
                return Err(SW_INCORRECT_P1_P2);
            }
            if p1 == 0 || p1 as usize > file.descriptor.record_count {
                return Err(SW_RECORD_NOT_FOUND);
            }
            let start = (p1 as usize - 1) * record_size;
            Ok(start..start + record_size)
        };

        match req.command {
            IccCommand::GetResponse => Ok(self.get_response(file)),
            IccCommand::ReadBinary => {
                let offset = ((req.p1 as usize) << 8) | req.p2 as usize;
                let len = if req.p3 == 0 { file.content.len().saturating_sub(offset) } else { req.p3 as usize };
                file.content.get(offset..offset + len).map(<[u8]>::to_vec).ok_or(SW_WRONG_LENGTH)
            }
            IccCommand::ReadRecord => {
                let range = record_range(req.p1)?;
                Ok(file.content[range].to_vec())
            }
            IccCommand::UpdateBinary => {
                let offset = ((req.p1 as usize) << 8) | req.p2 as usize;
                let data = req.data.clone().unwrap_or_default();
                if !pin2_ok {
                    return Err(SW_SECURITY_STATUS);
                }
                let end = offset + data.len();
                if end > file.content.len() {
                    return Err(SW_WRONG_LENGTH);
                }
                if let Some(file) = self.files.get_mut(&key) {
                    file.content[offset..end].copy_from_slice(&data);
                }
                Ok(Vec::new())
            }
            IccCommand::UpdateRecord => {
                let range = record_range(req.p1)?;
                let data = req.data.clone().unwrap_or_default();
                if data.len() != record_size {
                    return Err(SW_WRONG_LENGTH);
                }
                if !pin2_ok {
                    return Err(SW_SECURITY_STATUS);
                }
                if let Some(file) = self.files.get_mut(&key) {
                    file.content[range].copy_from_slice(&data);
                }
                Ok(Vec::new())
            }
        }
    }
}

impl IccChannel for CardImage {
    fn transmit(&mut self, req: &SimIoReq) -> SimIoRsp {
        self.history.push(req.clone());
        match self.answer(req) {
            Ok(data) => SimIoRsp::ok(req.key, data),
            Err((sw1, sw2)) => {
                tracing::debug!(key = req.key, "card: {} {}/{:04X} -> {:02X}{:02X}", req.command, req.path, req.file_id, sw1, sw2);
                SimIoRsp::failed(req.key, sw1, sw2)
            }
        }
    }
}

/// ETSI TS 102.221 clause 11.1.1.3 FCP template with descriptor, identifier and size
fn fcp_response(d: &EfDescriptor) -> Vec<u8> {
    let mut inner = Vec::new();
    let size = d.file_size as u16;
    match d.structure {
        EfStructure::Transparent => inner.extend([0x82, 0x02, 0x41, 0x21]),
        EfStructure::LinearFixed | EfStructure::Cyclic => {
            let descriptor = if d.structure == EfStructure::Cyclic { 0x46 } else { 0x42 };
            let record_size = d.record_size as u16;
            inner.extend([0x82, 0x05, descriptor, 0x21, (record_size >> 8) as u8, record_size as u8, d.record_count as u8]);
        }
    }
    inner.extend([0x83, 0x02, (d.file_id >> 8) as u8, d.file_id as u8]);
    inner.extend([0x80, 0x02, (size >> 8) as u8, size as u8]);
    let mut rsp = vec![0x62, inner.len() as u8];
    rsp.extend(inner);
    rsp
}

/// Stands in for the radio interface layer, answering SimIoReq from a card image
pub struct CardEntity {
    pub image: CardImage,
}

impl CardEntity {
    pub fn new(image: CardImage) -> Self {
        Self { image }
    }
}

impl IccEntityTrait for CardEntity {
    fn entity(&self) -> IccEntity {
        IccEntity::Ril
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {}", message.msg);
        match message.msg {
            SapMsgInner::SimIoReq(req) => {
                let rsp = self.image.transmit(&req);
                queue.push_back(SapMsg::new(Sap::SimIoSap, IccEntity::Ril, message.src, SapMsgInner::SimIoRsp(rsp)));
            }
            other => {
                tracing::warn!("card: ignoring {}", other);
            }
        }
    }
}
