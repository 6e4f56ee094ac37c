//! Elementary and dedicated file identifiers, 3GPP TS 51.011, TS 31.102, TS 31.103 and 3GPP2 C.S0065

use icc_core::FileId;

pub const EF_ICCID: FileId = 0x2FE2;
pub const EF_IMG: FileId = 0x4F20;
pub const EF_PBR: FileId = 0x4F30;

pub const EF_ISIM_IMPI: FileId = 0x6F02;
pub const EF_ISIM_DOMAIN: FileId = 0x6F03;
pub const EF_ISIM_IMPU: FileId = 0x6F04;
pub const EF_ISIM_IST: FileId = 0x6F07;
pub const EF_ISIM_PCSCF: FileId = 0x6F09;

/// CPHS 4.2 section B, DF_GSM
pub const EF_CPHS_CFF: FileId = 0x6F13;
pub const EF_CPHS_ONS: FileId = 0x6F14;
pub const EF_CPHS_INFO: FileId = 0x6F16;
pub const EF_CPHS_MBN: FileId = 0x6F17;
pub const EF_CPHS_ONSF: FileId = 0x6F18;
pub const EF_CSIM_IMSI_M: FileId = 0x6F22;
pub const EF_CSIM_CDMAHOME: FileId = 0x6F28;
pub const EF_PLMN_SEL: FileId = 0x6F30;
pub const EF_CSIM_CST: FileId = 0x6F32;
/// EF_SST on SIM, EF_UST on USIM
pub const EF_SST: FileId = 0x6F38;
pub const EF_UST: FileId = 0x6F38;
pub const EF_ADN: FileId = 0x6F3A;
pub const EF_FDN: FileId = 0x6F3B;
pub const EF_SMS: FileId = 0x6F3C;
pub const EF_GID1: FileId = 0x6F3E;
pub const EF_GID2: FileId = 0x6F3F;
pub const EF_MSISDN: FileId = 0x6F40;
pub const EF_CSIM_SPN: FileId = 0x6F41;
pub const EF_CBMI: FileId = 0x6F45;
pub const EF_SPN: FileId = 0x6F46;
pub const EF_CBMID: FileId = 0x6F48;
pub const EF_SDN: FileId = 0x6F49;
pub const EF_EXT1: FileId = 0x6F4A;
pub const EF_EXT2: FileId = 0x6F4B;
pub const EF_EXT3: FileId = 0x6F4C;
pub const EF_CBMIR: FileId = 0x6F50;
pub const EF_AD: FileId = 0x6FAD;
pub const EF_PHASE: FileId = 0x6FAE;
pub const EF_PNN: FileId = 0x6FC5;
pub const EF_OPL: FileId = 0x6FC6;
pub const EF_MBDN: FileId = 0x6FC7;
pub const EF_MWIS: FileId = 0x6FCA;
pub const EF_CFIS: FileId = 0x6FCB;
pub const EF_SPDI: FileId = 0x6FCD;

pub const MF: &str = "3F00";
pub const DF_TELECOM: &str = "7F10";
pub const DF_GSM: &str = "7F20";
pub const DF_CDMA: &str = "7F25";
pub const DF_PHONEBOOK: &str = "5F3A";
pub const DF_GRAPHICS: &str = "5F50";
/// Current ADF, selected by AID
pub const ADF_USIM: &str = "7FFF";
pub const ADF_ISIM: &str = "7FFF";

/// Human readable name for logging
pub fn ef_name(file_id: FileId) -> &'static str {
    match file_id {
        EF_ICCID => "EF_ICCID",
        EF_IMG => "EF_IMG",
        EF_PBR => "EF_PBR",
        EF_ISIM_IMPI => "EF_IMPI",
        EF_ISIM_DOMAIN => "EF_DOMAIN",
        EF_ISIM_IMPU => "EF_IMPU",
        EF_ISIM_IST => "EF_IST",
        EF_ISIM_PCSCF => "EF_PCSCF",
        EF_CPHS_CFF => "EF_CPHS_CFF",
        EF_CPHS_ONS => "EF_CPHS_ONS",
        EF_CPHS_INFO => "EF_CPHS_INFO",
        EF_CPHS_MBN => "EF_CPHS_MBN",
        EF_CPHS_ONSF => "EF_CPHS_ONSF",
        EF_CSIM_IMSI_M => "EF_CSIM_IMSI_M",
        EF_CSIM_CDMAHOME => "EF_CSIM_CDMAHOME",
        EF_PLMN_SEL => "EF_PLMNsel",
        EF_CSIM_CST => "EF_CST",
        EF_SST => "EF_SST",
        EF_ADN => "EF_ADN",
        EF_FDN => "EF_FDN",
        EF_SMS => "EF_SMS",
        EF_GID1 => "EF_GID1",
        EF_GID2 => "EF_GID2",
        EF_MSISDN => "EF_MSISDN",
        EF_CSIM_SPN => "EF_CSIM_SPN",
        EF_CBMI => "EF_CBMI",
        EF_SPN => "EF_SPN",
        EF_CBMID => "EF_CBMID",
        EF_SDN => "EF_SDN",
        EF_EXT1 => "EF_EXT1",
        EF_EXT2 => "EF_EXT2",
        EF_EXT3 => "EF_EXT3",
        EF_CBMIR => "EF_CBMIR",
        EF_AD => "EF_AD",
        EF_PHASE => "EF_PHASE",
        EF_PNN => "EF_PNN",
        EF_OPL => "EF_OPL",
        EF_MBDN => "EF_MBDN",
        EF_MWIS => "EF_MWIS",
        EF_CFIS => "EF_CFIS",
        EF_SPDI => "EF_SPDI",
        _ => "EF_?",
    }
}
