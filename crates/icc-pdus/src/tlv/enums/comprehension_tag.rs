/// Comprehension required flag of a single octet tag
pub const COMPREHENSION_TLV_FLAG_CR: u8 = 0x80;

/// ETSI TS 102.223 clause 9.3 COMPREHENSION-TLV tag values, without the CR flag
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComprehensionTag {
    CommandDetails = 0x01,
    DeviceId = 0x02,
    Result = 0x03,
    Duration = 0x04,
    AlphaId = 0x05,
    Address = 0x06,
    CapabilityConfig = 0x07,
    Subaddress = 0x08,
    SsString = 0x09,
    UssdString = 0x0A,
    SmsTpdu = 0x0B,
    /// Cell Broadcast page, ENVELOPE (CELL BROADCAST DOWNLOAD)
    CbPage = 0x0C,
    TextString = 0x0D,
    Tone = 0x0E,
    Item = 0x0F,
    ItemId = 0x10,
    ResponseLength = 0x11,
    FileList = 0x12,
    LocationInfo = 0x13,
    Imei = 0x14,
    HelpRequest = 0x15,
    NetworkMeasurementResults = 0x16,
    DefaultText = 0x17,
    NextActionIndicator = 0x18,
    EventList = 0x19,
    Cause = 0x1A,
    LocationStatus = 0x1B,
    TransactionId = 0x1C,
    IconId = 0x1E,
    IconIdList = 0x1F,
    TimerIdentifier = 0x24,
    TimerValue = 0x25,
    DateTimeZone = 0x26,
    ImmediateResponse = 0x2B,
    DtmfString = 0x2C,
    Language = 0x2D,
    Url = 0x31,
    BearerDescription = 0x35,
    ChannelData = 0x36,
    ChannelDataLength = 0x37,
    BufferSize = 0x39,
    /// UICC/terminal interface transport level
    TransportLevel = 0x3C,
    /// Data destination address
    OtherAddress = 0x3E,
}

impl std::convert::TryFrom<u64> for ComprehensionTag {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0x01 => Ok(ComprehensionTag::CommandDetails),
            0x02 => Ok(ComprehensionTag::DeviceId),
            0x03 => Ok(ComprehensionTag::Result),
            0x04 => Ok(ComprehensionTag::Duration),
            0x05 => Ok(ComprehensionTag::AlphaId),
            0x06 => Ok(ComprehensionTag::Address),
            0x07 => Ok(ComprehensionTag::CapabilityConfig),
            0x08 => Ok(ComprehensionTag::Subaddress),
            0x09 => Ok(ComprehensionTag::SsString),
            0x0A => Ok(ComprehensionTag::UssdString),
            0x0B => Ok(ComprehensionTag::SmsTpdu),
            0x0C => Ok(ComprehensionTag::CbPage),
            0x0D => Ok(ComprehensionTag::TextString),
            0x0E => Ok(ComprehensionTag::Tone),
            0x0F => Ok(ComprehensionTag::Item),
            0x10 => Ok(ComprehensionTag::ItemId),
            0x11 => Ok(ComprehensionTag::ResponseLength),
            0x12 => Ok(ComprehensionTag::FileList),
            0x13 => Ok(ComprehensionTag::LocationInfo),
            0x14 => Ok(ComprehensionTag::Imei),
            0x15 => Ok(ComprehensionTag::HelpRequest),
            0x16 => Ok(ComprehensionTag::NetworkMeasurementResults),
            0x17 => Ok(ComprehensionTag::DefaultText),
            0x18 => Ok(ComprehensionTag::NextActionIndicator),
            0x19 => Ok(ComprehensionTag::EventList),
            0x1A => Ok(ComprehensionTag::Cause),
            0x1B => Ok(ComprehensionTag::LocationStatus),
            0x1C => Ok(ComprehensionTag::TransactionId),
            0x1E => Ok(ComprehensionTag::IconId),
            0x1F => Ok(ComprehensionTag::IconIdList),
            0x24 => Ok(ComprehensionTag::TimerIdentifier),
            0x25 => Ok(ComprehensionTag::TimerValue),
            0x26 => Ok(ComprehensionTag::DateTimeZone),
            0x2B => Ok(ComprehensionTag::ImmediateResponse),
            0x2C => Ok(ComprehensionTag::DtmfString),
            0x2D => Ok(ComprehensionTag::Language),
            0x31 => Ok(ComprehensionTag::Url),
            0x35 => Ok(ComprehensionTag::BearerDescription),
            0x36 => Ok(ComprehensionTag::ChannelData),
            0x37 => Ok(ComprehensionTag::ChannelDataLength),
            0x39 => Ok(ComprehensionTag::BufferSize),
            0x3C => Ok(ComprehensionTag::TransportLevel),
            0x3E => Ok(ComprehensionTag::OtherAddress),
            _ => Err(()),
        }
    }
}

impl ComprehensionTag {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            ComprehensionTag::CommandDetails => 0x01,
            ComprehensionTag::DeviceId => 0x02,
            ComprehensionTag::Result => 0x03,
            ComprehensionTag::Duration => 0x04,
            ComprehensionTag::AlphaId => 0x05,
            ComprehensionTag::Address => 0x06,
            ComprehensionTag::CapabilityConfig => 0x07,
            ComprehensionTag::Subaddress => 0x08,
            ComprehensionTag::SsString => 0x09,
            ComprehensionTag::UssdString => 0x0A,
            ComprehensionTag::SmsTpdu => 0x0B,
            ComprehensionTag::CbPage => 0x0C,
            ComprehensionTag::TextString => 0x0D,
            ComprehensionTag::Tone => 0x0E,
            ComprehensionTag::Item => 0x0F,
            ComprehensionTag::ItemId => 0x10,
            ComprehensionTag::ResponseLength => 0x11,
            ComprehensionTag::FileList => 0x12,
            ComprehensionTag::LocationInfo => 0x13,
            ComprehensionTag::Imei => 0x14,
            ComprehensionTag::HelpRequest => 0x15,
            ComprehensionTag::NetworkMeasurementResults => 0x16,
            ComprehensionTag::DefaultText => 0x17,
            ComprehensionTag::NextActionIndicator => 0x18,
            ComprehensionTag::EventList => 0x19,
            ComprehensionTag::Cause => 0x1A,
            ComprehensionTag::LocationStatus => 0x1B,
            ComprehensionTag::TransactionId => 0x1C,
            ComprehensionTag::IconId => 0x1E,
            ComprehensionTag::IconIdList => 0x1F,
            ComprehensionTag::TimerIdentifier => 0x24,
            ComprehensionTag::TimerValue => 0x25,
            ComprehensionTag::DateTimeZone => 0x26,
            ComprehensionTag::ImmediateResponse => 0x2B,
            ComprehensionTag::DtmfString => 0x2C,
            ComprehensionTag::Language => 0x2D,
            ComprehensionTag::Url => 0x31,
            ComprehensionTag::BearerDescription => 0x35,
            ComprehensionTag::ChannelData => 0x36,
            ComprehensionTag::ChannelDataLength => 0x37,
            ComprehensionTag::BufferSize => 0x39,
            ComprehensionTag::TransportLevel => 0x3C,
            ComprehensionTag::OtherAddress => 0x3E,
        }
    }

    /// Tag octet with the comprehension required flag set
    pub fn with_cr(self) -> u8 {
        self.into_raw() as u8 | COMPREHENSION_TLV_FLAG_CR
    }
}

impl From<ComprehensionTag> for u64 {
    fn from(e: ComprehensionTag) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for ComprehensionTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ComprehensionTag::CommandDetails => write!(f, "CommandDetails"),
            ComprehensionTag::DeviceId => write!(f, "DeviceId"),
            ComprehensionTag::Result => write!(f, "Result"),
            ComprehensionTag::Duration => write!(f, "Duration"),
            ComprehensionTag::AlphaId => write!(f, "AlphaId"),
            ComprehensionTag::Address => write!(f, "Address"),
            ComprehensionTag::CapabilityConfig => write!(f, "CapabilityConfig"),
            ComprehensionTag::Subaddress => write!(f, "Subaddress"),
            ComprehensionTag::SsString => write!(f, "SsString"),
            ComprehensionTag::UssdString => write!(f, "UssdString"),
            ComprehensionTag::SmsTpdu => write!(f, "SmsTpdu"),
            ComprehensionTag::CbPage => write!(f, "CbPage"),
            ComprehensionTag::TextString => write!(f, "TextString"),
            ComprehensionTag::Tone => write!(f, "Tone"),
            ComprehensionTag::Item => write!(f, "Item"),
            ComprehensionTag::ItemId => write!(f, "ItemId"),
            ComprehensionTag::ResponseLength => write!(f, "ResponseLength"),
            ComprehensionTag::FileList => write!(f, "FileList"),
            ComprehensionTag::LocationInfo => write!(f, "LocationInfo"),
            ComprehensionTag::Imei => write!(f, "Imei"),
            ComprehensionTag::HelpRequest => write!(f, "HelpRequest"),
            ComprehensionTag::NetworkMeasurementResults => write!(f, "NetworkMeasurementResults"),
            ComprehensionTag::DefaultText => write!(f, "DefaultText"),
            ComprehensionTag::NextActionIndicator => write!(f, "NextActionIndicator"),
            ComprehensionTag::EventList => write!(f, "EventList"),
            ComprehensionTag::Cause => write!(f, "Cause"),
            ComprehensionTag::LocationStatus => write!(f, "LocationStatus"),
            ComprehensionTag::TransactionId => write!(f, "TransactionId"),
            ComprehensionTag::IconId => write!(f, "IconId"),
            ComprehensionTag::IconIdList => write!(f, "IconIdList"),
            ComprehensionTag::TimerIdentifier => write!(f, "TimerIdentifier"),
            ComprehensionTag::TimerValue => write!(f, "TimerValue"),
            ComprehensionTag::DateTimeZone => write!(f, "DateTimeZone"),
            ComprehensionTag::ImmediateResponse => write!(f, "ImmediateResponse"),
            ComprehensionTag::DtmfString => write!(f, "DtmfString"),
            ComprehensionTag::Language => write!(f, "Language"),
            ComprehensionTag::Url => write!(f, "Url"),
            ComprehensionTag::BearerDescription => write!(f, "BearerDescription"),
            ComprehensionTag::ChannelData => write!(f, "ChannelData"),
            ComprehensionTag::ChannelDataLength => write!(f, "ChannelDataLength"),
            ComprehensionTag::BufferSize => write!(f, "BufferSize"),
            ComprehensionTag::TransportLevel => write!(f, "TransportLevel"),
            ComprehensionTag::OtherAddress => write!(f, "OtherAddress"),
        }
    }
}
