use core::fmt;

use icc_core::{IccErr, OctetBuffer};

/// CMAS message identifier of a geo-fencing trigger, 3GPP TS 23.041 clause 9.4.1.2.2
pub const CB_CMAS_MESSAGE_ID_GEO_FENCING_TRIGGER: u16 = 0x1130;

/// Maximum wait time value when the warning area carries none
pub const GEO_FENCING_MAXIMUM_WAIT_TIME_NOT_SET: u8 = 255;

const GEO_FENCING_MAXIMUM_WAIT_TIME: u8 = 0x01;
const GEO_FENCING_POLYGON: u8 = 0x02;
const GEO_FENCING_CIRCLE: u8 = 0x03;

/// Type, length and two spare bits
const GEO_ELEMENT_HEADER_SIZE: usize = 2;
/// ATIS-0700041 5.2.4, 22 bit latitude followed by 22 bit longitude
const COORDINATE_BITS: usize = 44;

/// MSB first bit reader over a slice
struct BitCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_field(&mut self, num_bits: usize, field: &'static str) -> Result<u32, IccErr> {
        if self.pos + num_bits > self.data.len() * 8 {
            return Err(IccErr::OutOfBounds { field: Some(field) });
        }
        let mut value = 0u32;
        for _ in 0..num_bits {
            let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 0x01;
            value = (value << 1) | bit as u32;
            self.pos += 1;
        }
        Ok(value)
    }

    fn seek_octet(&mut self, octet: usize) {
        self.pos = octet * 8;
    }
}

/// Point of a warning area, kept in its coded form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WacCoordinate {
    pub raw_lat: u32,
    pub raw_lng: u32,
}

impl WacCoordinate {
    fn read(bits: &mut BitCursor) -> Result<Self, IccErr> {
        let raw_lat = bits.read_field(22, "wac_latitude")?;
        let raw_lng = bits.read_field(22, "wac_longitude")?;
        Ok(WacCoordinate { raw_lat, raw_lng })
    }

    /// Degrees, -90 to 90
    pub fn latitude(&self) -> f64 {
        self.raw_lat as f64 * 180.0 / (1u32 << 22) as f64 - 90.0
    }

    /// Degrees, -180 to 180
    pub fn longitude(&self) -> f64 {
        self.raw_lng as f64 * 360.0 / (1u32 << 22) as f64 - 180.0
    }
}

impl fmt::Display for WacCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude(), self.longitude())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WacGeometry {
    Polygon(Vec<WacCoordinate>),
    /// Radius coded in 1/64 km
    Circle { center: WacCoordinate, raw_radius: u32 },
}

impl WacGeometry {
    /// Radius of a circle in meters, None for polygons
    pub fn radius_meters(&self) -> Option<f64> {
        match self {
            WacGeometry::Circle { raw_radius, .. } => Some(*raw_radius as f64 / 64.0 * 1000.0),
            WacGeometry::Polygon(_) => None,
        }
    }
}

/// Warning Area Coordinates following the last page of a UMTS CMAS message, ATIS-0700041 clause 5.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningAreaCoordinates {
    pub max_wait_time_sec: u8,
    pub geometries: Vec<WacGeometry>,
}

impl WarningAreaCoordinates {
    /// Reads the little endian data length and the geometry elements it covers
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let lo = buf.read_field("wac_data_length")? as usize;
        let hi = buf.read_field("wac_data_length")? as usize;
        let length = (hi << 8) | lo;
        if length > buf.get_len_remaining() {
            tracing::debug!("wac data of {} octets, {} available", length, buf.get_len_remaining());
            return Err(IccErr::MalformedPdu { field: "wac_data_length", reason: "longer than remaining pdu" });
        }

        let data = buf.read_slice(length)?;
        let mut bits = BitCursor::new(data);
        let mut max_wait_time_sec = GEO_FENCING_MAXIMUM_WAIT_TIME_NOT_SET;
        let mut geometries = Vec::new();
        let mut start = 0;

        while start < length {
            let geo_type = bits.read_field(4, "wac_geo_type")? as u8;
            let geo_length = bits.read_field(10, "wac_geo_length")? as usize;
            bits.read_field(2, "wac_spare")?;
            if geo_length < GEO_ELEMENT_HEADER_SIZE || start + geo_length > length {
                return Err(IccErr::MalformedPdu { field: "wac_geo_length", reason: "outside wac data" });
            }

            match geo_type {
                GEO_FENCING_MAXIMUM_WAIT_TIME => {
                    max_wait_time_sec = bits.read_field(8, "wac_max_wait_time")? as u8;
                }
                GEO_FENCING_POLYGON => {
                    let count = (geo_length - GEO_ELEMENT_HEADER_SIZE) * 8 / COORDINATE_BITS;
                    let points = (0..count).map(|_| WacCoordinate::read(&mut bits)).collect::<Result<Vec<_>, _>>()?;
                    geometries.push(WacGeometry::Polygon(points));
                }
                GEO_FENCING_CIRCLE => {
                    let center = WacCoordinate::read(&mut bits)?;
                    let raw_radius = bits.read_field(20, "wac_radius")?;
                    geometries.push(WacGeometry::Circle { center, raw_radius });
                }
                _ => {
                    return Err(IccErr::InvalidValue { field: "wac_geo_type", value: geo_type as u64 });
                }
            }

            // Padding of odd coordinate counts included
            start += geo_length;
            bits.seek_octet(start);
        }

        Ok(WarningAreaCoordinates { max_wait_time_sec, geometries })
    }
}

/// Broadcast message a geo-fencing trigger refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CbIdentity {
    pub message_id: u16,
    pub serial_number: u16,
}

/// CMAS geo-fencing trigger, ATIS-0700041 clause 5.1.6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoFencingTrigger {
    pub trigger_type: u8,
    pub identities: Vec<CbIdentity>,
}

impl GeoFencingTrigger {
    pub fn from_octetbuf(buf: &mut OctetBuffer) -> Result<Self, IccErr> {
        let header = buf.read_u16("geo_fencing_header")?;
        // Type in 4 bits, length in 7 bits, 5 bits spare
        let trigger_type = (header >> 12) as u8;
        let length = ((header >> 5) & 0x7F) as usize;
        if length < GEO_ELEMENT_HEADER_SIZE {
            return Err(IccErr::MalformedPdu { field: "geo_fencing_length", reason: "shorter than its header" });
        }

        let count = (length - GEO_ELEMENT_HEADER_SIZE) / 4;
        let mut identities = Vec::with_capacity(count);
        for _ in 0..count {
            let message_id = buf.read_u16("geo_fencing_message_id")?;
            let serial_number = buf.read_u16("geo_fencing_serial")?;
            identities.push(CbIdentity { message_id, serial_number });
        }
        Ok(GeoFencingTrigger { trigger_type, identities })
    }
}
