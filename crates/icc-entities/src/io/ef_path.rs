//! Parent DF path of every EF the stack accesses, per card application

use icc_core::{CardAppType, FileId, IccErr};
use icc_pdus::icc::ef_ids::*;

const PATH_MF: &str = "3F00";
const PATH_TELECOM: &str = "3F007F10";
const PATH_PHONEBOOK: &str = "3F007F105F3A";
const PATH_GRAPHICS: &str = "3F007F105F50";
const PATH_GSM: &str = "3F007F20";
const PATH_CDMA: &str = "3F007F25";
const PATH_ADF_USIM: &str = "3F007FFF";
const PATH_ADF_ISIM: &str = "3F007FFF";

/// Files at the same location for every application
fn common_path(file_id: FileId) -> Option<&'static str> {
    match file_id {
        EF_ICCID => Some(PATH_MF),
        EF_ADN | EF_SDN => Some(PATH_TELECOM),
        EF_PBR => Some(PATH_PHONEBOOK),
        EF_IMG => Some(PATH_GRAPHICS),
        _ => None,
    }
}

fn sim_path(file_id: FileId) -> Option<&'static str> {
    match file_id {
        EF_FDN | EF_MSISDN | EF_SMS | EF_EXT1 | EF_EXT2 | EF_EXT3 => Some(PATH_TELECOM),
        EF_AD | EF_MBDN | EF_MWIS | EF_CFIS | EF_PLMN_SEL | EF_SPN | EF_SPDI | EF_SST | EF_PHASE | EF_CBMI
        | EF_CBMID | EF_CBMIR | EF_OPL | EF_PNN | EF_GID1 | EF_GID2 | EF_CPHS_CFF | EF_CPHS_INFO | EF_CPHS_MBN
        | EF_CPHS_ONS | EF_CPHS_ONSF => Some(PATH_GSM),
        _ => None,
    }
}

/// Phonebook files are referenced from EF_PBR, any id not known to the ADF is looked up in DF_PHONEBOOK
fn usim_path(file_id: FileId) -> Option<&'static str> {
    match file_id {
        EF_AD | EF_FDN | EF_MBDN | EF_MWIS | EF_CFIS | EF_UST | EF_MSISDN | EF_SPN | EF_SPDI | EF_CBMI | EF_CBMID
        | EF_CBMIR | EF_OPL | EF_PNN | EF_SMS | EF_GID1 | EF_GID2 => Some(PATH_ADF_USIM),
        // CPHS files are placed in the ADF as well
        EF_CPHS_CFF | EF_CPHS_INFO | EF_CPHS_MBN | EF_CPHS_ONS | EF_CPHS_ONSF => Some(PATH_ADF_USIM),
        _ => Some(PATH_PHONEBOOK),
    }
}

fn ruim_path(file_id: FileId) -> Option<&'static str> {
    match file_id {
        EF_CSIM_IMSI_M | EF_CSIM_CDMAHOME | EF_CSIM_CST | EF_CSIM_SPN => Some(PATH_CDMA),
        EF_FDN | EF_EXT1 | EF_EXT2 | EF_EXT3 => Some(PATH_TELECOM),
        _ => None,
    }
}

fn isim_path(file_id: FileId) -> Option<&'static str> {
    match file_id {
        EF_ISIM_IMPI | EF_ISIM_DOMAIN | EF_ISIM_IMPU | EF_ISIM_IST | EF_ISIM_PCSCF => Some(PATH_ADF_ISIM),
        _ => None,
    }
}

/// Hex path of the DF holding `file_id` on an application of type `app_type`
pub fn ef_path(app_type: CardAppType, file_id: FileId) -> Result<&'static str, IccErr> {
    let path = common_path(file_id).or_else(|| match app_type {
        CardAppType::Sim => sim_path(file_id),
        CardAppType::Usim => usim_path(file_id),
        CardAppType::Ruim => ruim_path(file_id),
        CardAppType::Isim => isim_path(file_id),
    });
    match path {
        Some(path) => Ok(path),
        None => {
            tracing::warn!("no path for {} ({:04X}) on {}", ef_name(file_id), file_id, app_type);
            Err(IccErr::UnknownFile { file_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icc_core::debug;

    #[test]
    fn test_common_files() {
        debug::setup_logging_verbose();
        for app in [CardAppType::Sim, CardAppType::Usim, CardAppType::Ruim, CardAppType::Isim] {
            assert_eq!(ef_path(app, EF_ICCID), Ok("3F00"));
            assert_eq!(ef_path(app, EF_ADN), Ok("3F007F10"));
            assert_eq!(ef_path(app, EF_PBR), Ok("3F007F105F3A"));
        }
    }

    #[test]
    fn test_per_application() {
        assert_eq!(ef_path(CardAppType::Sim, EF_SPN), Ok("3F007F20"));
        assert_eq!(ef_path(CardAppType::Usim, EF_SPN), Ok("3F007FFF"));
        assert_eq!(ef_path(CardAppType::Sim, EF_MSISDN), Ok("3F007F10"));
        assert_eq!(ef_path(CardAppType::Ruim, EF_CSIM_SPN), Ok("3F007F25"));
        assert_eq!(ef_path(CardAppType::Isim, EF_ISIM_IMPU), Ok("3F007FFF"));
        assert_eq!(ef_path(CardAppType::Sim, EF_CPHS_ONSF), Ok("3F007F20"));
        assert_eq!(ef_path(CardAppType::Usim, EF_CPHS_CFF), Ok("3F007FFF"));
        assert_eq!(ef_path(CardAppType::Sim, EF_IMG), Ok("3F007F105F50"));
    }

    #[test]
    fn test_usim_extension_files() {
        debug::setup_logging_verbose();
        // Not part of the ADF list, resolved like phonebook files
        assert_eq!(ef_path(CardAppType::Usim, EF_EXT2), Ok("3F007F105F3A"));
        assert_eq!(ef_path(CardAppType::Usim, EF_EXT3), Ok("3F007F105F3A"));
        assert_eq!(ef_path(CardAppType::Sim, EF_EXT2), Ok("3F007F10"));
    }

    #[test]
    fn test_unknown_file() {
        // USIM phonebook files referenced through EF_PBR
        assert_eq!(ef_path(CardAppType::Usim, 0x4F3A), Ok("3F007F105F3A"));
        assert_eq!(ef_path(CardAppType::Sim, 0x4F3A), Err(IccErr::UnknownFile { file_id: 0x4F3A }));
        assert_eq!(ef_path(CardAppType::Isim, EF_SPN), Err(IccErr::UnknownFile { file_id: EF_SPN }));
    }
}
