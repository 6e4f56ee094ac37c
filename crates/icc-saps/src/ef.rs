// EF SAP, between upper layers and the ICC IO entity
use icc_core::{FileId, IccErr};
use icc_pdus::icc::fields::file_descriptor::EfDescriptor;

/// Logical operation on one EF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EfOp {
    LoadTransparent,
    /// Image instance data file (0x4Fxx), read from the DF holding EF_IMG
    LoadImageInstance,
    /// Record number defaults to 1
    LoadLinearFixed { record: Option<u8> },
    LoadAllRecords,
    /// Only resolves the descriptor of a linear fixed EF
    GetDescriptor,
    UpdateTransparent { data: Vec<u8> },
    UpdateLinearFixed { record: u8, data: Vec<u8>, pin2: Option<String> },
    FindFreeRecord,
}

#[derive(Debug, Clone)]
pub struct EfReq {
    /// Chosen by the requester, echoed in the EfConf
    pub handle: u32,
    pub file_id: FileId,
    pub op: EfOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EfData {
    Transparent(Vec<u8>),
    Record { record: u8, data: Vec<u8> },
    /// Record 1 first
    Records(Vec<Vec<u8>>),
    Descriptor(EfDescriptor),
    Updated,
    FreeRecord(u8),
}

#[derive(Debug, Clone)]
pub struct EfConf {
    pub handle: u32,
    pub file_id: FileId,
    pub result: Result<EfData, IccErr>,
}
