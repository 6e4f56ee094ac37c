//! EF_IMG image descriptors and the image instance data files they point to,
//! 3GPP TS 51.011 clause 10.6.1 and Annex G

use icc_core::{FileId, IccErr, OctetBuffer};

pub const IMG_CODING_SCHEME_BASIC: u8 = 0x11;
pub const IMG_CODING_SCHEME_COLOR: u8 = 0x21;
pub const IMG_CODING_SCHEME_COLOR_TRANSPARENCY: u8 = 0x22;

const IMG_DESCRIPTOR_SIZE: usize = 9;
/// Width and height
const IMG_HEADER_SIZE_BASIC: usize = 2;
/// Width, height, bits per point, CLUT entry count and CLUT offset
const IMG_HEADER_SIZE_COLOR: usize = 6;
/// Red, green and blue
const CLUT_ENTRY_SIZE: usize = 3;

/// One instance of an icon, as listed in an EF_IMG record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub width: u8,
    pub height: u8,
    pub coding_scheme: u8,
    /// Image instance data file, 0x4Fxx
    pub file_id: FileId,
    pub offset: u16,
    pub data_len: u16,
}

/// Decode an EF_IMG record: the instance count, then one descriptor per instance
pub fn read_img_record(record: &[u8]) -> Result<Vec<ImageDescriptor>, IccErr> {
    let mut buf = OctetBuffer::from_bytes(record);
    let count = buf.read_field("img_num_instances")? as usize;
    if record.len() < IMG_DESCRIPTOR_SIZE * count + 1 {
        tracing::debug!("EF_IMG record of {} octets lists {} instances", record.len(), count);
        return Err(IccErr::MalformedPdu { field: "img_num_instances", reason: "more instances than record holds" });
    }
    let mut descriptors = Vec::with_capacity(count);
    for _ in 0..count {
        descriptors.push(ImageDescriptor {
            width: buf.read_field("img_width")?,
            height: buf.read_field("img_height")?,
            coding_scheme: buf.read_field("img_coding_scheme")?,
            file_id: buf.read_u16("img_file_id")?,
            offset: buf.read_u16("img_offset")?,
            data_len: buf.read_u16("img_data_len")?,
        });
    }
    Ok(descriptors)
}

/// Image body read from an instance data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInstance {
    pub width: u8,
    pub height: u8,
    pub coding_scheme: u8,
    /// Color schemes only
    pub bits_per_point: Option<u8>,
    pub body: Vec<u8>,
    /// Color look up table, three octets per entry
    pub clut: Option<Vec<u8>>,
}

impl ImageInstance {
    /// Extract the instance `descriptor` points to from the content of its data file
    pub fn from_iidf(data: &[u8], descriptor: &ImageDescriptor) -> Result<Self, IccErr> {
        let offset = descriptor.offset as usize;
        let data_len = descriptor.data_len as usize;
        if data.len() < offset + data_len {
            return Err(IccErr::MalformedPdu { field: "img_data_len", reason: "instance beyond end of file" });
        }

        let mut buf = OctetBuffer::from_bytes(&data[offset..offset + data_len]);
        let width = buf.read_field("iidf_width")?;
        let height = buf.read_field("iidf_height")?;
        match descriptor.coding_scheme {
            IMG_CODING_SCHEME_BASIC => {
                let body = buf.read_octets(data_len.saturating_sub(IMG_HEADER_SIZE_BASIC))?;
                Ok(ImageInstance {
                    width,
                    height,
                    coding_scheme: descriptor.coding_scheme,
                    bits_per_point: None,
                    body,
                    clut: None,
                })
            }
            IMG_CODING_SCHEME_COLOR | IMG_CODING_SCHEME_COLOR_TRANSPARENCY => {
                let bits_per_point = buf.read_field("iidf_bits_per_point")?;
                // Zero codes 256 entries
                let entries = match buf.read_field("iidf_clut_entries")? {
                    0 => 0x100,
                    n => n as usize,
                };
                let clut_offset = buf.read_u16("iidf_clut_offset")? as usize;
                let body = buf.read_octets(data_len.saturating_sub(IMG_HEADER_SIZE_COLOR))?;
                let clut_end = clut_offset + entries * CLUT_ENTRY_SIZE;
                let Some(clut) = data.get(clut_offset..clut_end) else {
                    return Err(IccErr::MalformedPdu { field: "iidf_clut_offset", reason: "clut beyond end of file" });
                };
                Ok(ImageInstance {
                    width,
                    height,
                    coding_scheme: descriptor.coding_scheme,
                    bits_per_point: Some(bits_per_point),
                    body,
                    clut: Some(clut.to_vec()),
                })
            }
            other => Err(IccErr::InvalidValue { field: "img_coding_scheme", value: other as u64 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;
    use icc_core::octet_buffer::hex_to_bytes;

    #[test]
    fn test_img_record() {
        debug::setup_logging_verbose();
        // 8x8 basic at 4F01 offset 0, 16x16 color at 4F02 offset 4
        let record = hex_to_bytes("020808114F010000000A1010214F0200040026FFFF").unwrap();
        let descriptors = read_img_record(&record).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(
            descriptors[0],
            ImageDescriptor { width: 8, height: 8, coding_scheme: 0x11, file_id: 0x4F01, offset: 0, data_len: 10 }
        );
        assert_eq!(descriptors[1].file_id, 0x4F02);
        assert_eq!((descriptors[1].offset, descriptors[1].data_len), (4, 0x26));

        assert!(read_img_record(&[0x02, 0x08, 0x08, 0x11, 0x4F, 0x01, 0x00, 0x00, 0x00, 0x0A]).is_err());
        assert!(read_img_record(&[]).is_err());
    }

    #[test]
    fn test_basic_instance() {
        let descriptor = ImageDescriptor { width: 8, height: 8, coding_scheme: 0x11, file_id: 0x4F01, offset: 2, data_len: 10 };
        let mut data = vec![0xEE, 0xEE, 0x08, 0x08];
        data.extend_from_slice(&[0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81]);
        let image = ImageInstance::from_iidf(&data, &descriptor).unwrap();
        assert_eq!((image.width, image.height), (8, 8));
        assert_eq!(image.body, vec![0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81]);
        assert_eq!(image.clut, None);

        let short = ImageDescriptor { data_len: 11, ..descriptor };
        assert!(matches!(ImageInstance::from_iidf(&data, &short), Err(IccErr::MalformedPdu { field: "img_data_len", .. })));
    }

    #[test]
    fn test_color_instance() {
        // 2x1 image, 2 bits per point, two CLUT entries after the body
        let descriptor = ImageDescriptor { width: 2, height: 1, coding_scheme: 0x21, file_id: 0x4F02, offset: 0, data_len: 7 };
        let data = [0x02, 0x01, 0x02, 0x02, 0x00, 0x07, 0x40, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF];
        let image = ImageInstance::from_iidf(&data, &descriptor).unwrap();
        assert_eq!(image.bits_per_point, Some(2));
        assert_eq!(image.body, vec![0x40]);
        assert_eq!(image.clut, Some(vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF]));

        // Zero entries means 256, more than the file holds
        let mut data = data.to_vec();
        data[3] = 0x00;
        assert!(matches!(
            ImageInstance::from_iidf(&data, &descriptor),
            Err(IccErr::MalformedPdu { field: "iidf_clut_offset", .. })
        ));

        let unknown = ImageDescriptor { coding_scheme: 0x31, ..descriptor };
        assert!(matches!(ImageInstance::from_iidf(&data, &unknown), Err(IccErr::InvalidValue { value: 0x31, .. })));
    }
}
