use icc_core::CardAppType;
use icc_core::FileId;
use icc_entities::io::card_image::CardImage;
use icc_entities::io::ef_path::ef_path;
use icc_pdus::icc::ef_ids::{EF_CSIM_CST, EF_ICCID, EF_SST};
use icc_pdus::icc::records::adn_record::AdnRecord;
use icc_pdus::icc::records::service_table::IccService;

/// Service table bytes with `services` available
pub fn service_table(app_type: CardAppType, services: &[IccService]) -> Vec<u8> {
    let mut table = vec![0u8; 16];
    for service in services {
        let n = (service.service_number(app_type).unwrap() - 1) as usize;
        match app_type {
            CardAppType::Sim | CardAppType::Ruim => table[n / 4] |= 0x03 << ((n % 4) * 2),
            _ => table[n / 8] |= 1 << (n % 8),
        }
    }
    table
}

pub fn adn_record(alpha_id: &str, number: &str, record_size: usize) -> Vec<u8> {
    AdnRecord::new(alpha_id, number).to_bytes(record_size).unwrap().0
}

/// Builds an in-memory card, placing each EF in the DF the application expects it in
pub struct CardBuilder {
    app_type: CardAppType,
    image: CardImage,
}

impl CardBuilder {
    pub fn new(app_type: CardAppType) -> Self {
        Self { app_type, image: CardImage::new(app_type == CardAppType::Usim) }
    }

    /// ICCID 8944 1234 5678 9012 3456 and a service table
    pub fn with_basics(self, services: &[IccService]) -> Self {
        let table = service_table(self.app_type, services);
        let table_file = if self.app_type == CardAppType::Ruim { EF_CSIM_CST } else { EF_SST };
        self.transparent(EF_ICCID, vec![0x98, 0x44, 0x21, 0x43, 0x65, 0x87, 0x09, 0x21, 0x43, 0x65])
            .transparent(table_file, table)
    }

    pub fn transparent(mut self, file_id: FileId, content: Vec<u8>) -> Self {
        let path = ef_path(self.app_type, file_id).unwrap();
        self.image.add_transparent(path, file_id, content);
        self
    }

    pub fn linear_fixed(mut self, file_id: FileId, record_size: usize, record_count: usize, records: &[Vec<u8>]) -> Self {
        let path = ef_path(self.app_type, file_id).unwrap();
        self.image.add_linear_fixed(path, file_id, record_size, record_count, records);
        self
    }

    pub fn pin2(mut self, file_id: FileId, pin2: &str) -> Self {
        self.image.protect_with_pin2(file_id, pin2);
        self
    }

    pub fn build(self) -> CardImage {
        self.image
    }
}
