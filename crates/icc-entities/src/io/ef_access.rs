use std::collections::HashMap;

use icc_config::SharedConfig;
use icc_core::{FileId, IccErr, IoKey};
use icc_pdus::icc::ef_ids::{EF_IMG, ef_name};
use icc_pdus::icc::enums::ef_structure::EfStructure;
use icc_pdus::icc::enums::icc_command::{GET_RESPONSE_LENGTH, IccCommand, P2_RECORD_ABSOLUTE};
use icc_pdus::icc::fields::file_descriptor::EfDescriptor;
use icc_saps::ef::{EfConf, EfData, EfOp, EfReq};
use icc_saps::sim_io::{SimIoReq, SimIoRsp};

use crate::io::ef_path::ef_path;

/// State of one logical EF operation between two SIM IO exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfState {
    AwaitingGetResponse,
    AwaitingRecord,
    AwaitingBinary,
    AwaitingUpdate,
}

/// What the caller must do next for an operation
#[derive(Debug)]
pub enum EfStep {
    /// Send this request to the card, then feed the response to `on_response`
    Io(SimIoReq),
    /// The operation completed, successfully or not
    Done(EfConf),
}

/// Outcome of one state transition
enum Progress {
    Io(SimIoReq),
    Done(EfData),
}

struct PendingOp {
    req: EfReq,
    path: &'static str,
    state: EfState,
    descriptor: Option<EfDescriptor>,
    /// Record of the READ RECORD in flight
    record: u8,
    /// Where a free record search started
    first_record: u8,
    records: Vec<Vec<u8>>,
}

impl PendingOp {
    fn new(req: EfReq, path: &'static str) -> Self {
        Self {
            req,
            path,
            state: EfState::AwaitingGetResponse,
            descriptor: None,
            record: 0,
            first_record: 0,
            records: Vec::new(),
        }
    }

    fn command(&self, key: IoKey, command: IccCommand, p1: u8, p2: u8, p3: u8) -> SimIoReq {
        tracing::debug!(
            key,
            "-> {} {} ({:04X}) path {} p1 {} p2 {} p3 {}",
            command,
            ef_name(self.req.file_id),
            self.req.file_id,
            self.path,
            p1,
            p2,
            p3
        );
        SimIoReq {
            key,
            command,
            file_id: self.req.file_id,
            path: self.path.to_string(),
            p1,
            p2,
            p3,
            data: None,
            pin2: None,
        }
    }

    fn read_record(&self, key: IoKey, record_size: u8) -> SimIoReq {
        self.command(key, IccCommand::ReadRecord, self.record, P2_RECORD_ABSOLUTE, record_size)
    }
}

/// Record number an operation is serialized on. Whole file operations use 0.
fn record_key(op: &EfOp) -> u8 {
    match op {
        EfOp::LoadLinearFixed { record } => record.unwrap_or(1),
        EfOp::UpdateLinearFixed { record, .. } => *record,
        _ => 0,
    }
}

fn expected_structure(op: &EfOp) -> EfStructure {
    match op {
        EfOp::LoadTransparent | EfOp::LoadImageInstance | EfOp::UpdateTransparent { .. } => EfStructure::Transparent,
        _ => EfStructure::LinearFixed,
    }
}

/// P3 of a transparent access. Zero requests the whole file from the card.
fn transparent_length(file_size: usize) -> u8 {
    u8::try_from(file_size).unwrap_or(0)
}

/// Record size and count of a record based EF, both addressable in a single octet
fn record_layout(descriptor: &EfDescriptor) -> Result<(u8, u8), IccErr> {
    let size = u8::try_from(descriptor.record_size)
        .map_err(|_| IccErr::InvalidValue { field: "record_size", value: descriptor.record_size as u64 })?;
    let count = u8::try_from(descriptor.record_count)
        .map_err(|_| IccErr::InvalidValue { field: "record_count", value: descriptor.record_count as u64 })?;
    Ok((size, count))
}

fn check_record(descriptor: &EfDescriptor, record: u8) -> Result<(), IccErr> {
    if record == 0 || record as usize > descriptor.record_count {
        tracing::warn!("record {} outside 1..={} of {:04X}", record, descriptor.record_count, descriptor.file_id);
        return Err(IccErr::OutOfBounds { field: Some("record") });
    }
    Ok(())
}

/// Pad with 0xFF or truncate to exactly `size` octets
fn fit_to_size(data: &[u8], size: usize) -> Vec<u8> {
    let mut data = data.to_vec();
    if data.len() > size {
        tracing::debug!("truncating {} octets to {}", data.len(), size);
    }
    data.resize(size, 0xFF);
    data
}

/// Request/response state machine sequencing GET RESPONSE, READ and UPDATE commands for
/// logical EF operations. Performs no IO itself: every step yields the next SimIoReq,
/// to be answered through `on_response`.
pub struct EfAccess {
    config: SharedConfig,
    next_key: IoKey,
    pending: HashMap<IoKey, PendingOp>,
    descriptors: HashMap<FileId, EfDescriptor>,
    free_hints: HashMap<FileId, u8>,
    /// Application generation the caches were filled under
    generation: u32,
}

impl EfAccess {
    pub fn new(config: SharedConfig) -> Self {
        let generation = config.state_read().app_generation;
        Self {
            config,
            next_key: 1,
            pending: HashMap::new(),
            descriptors: HashMap::new(),
            free_hints: HashMap::new(),
            generation,
        }
    }

    /// Drop cached descriptors and free record hints
    pub fn invalidate(&mut self) {
        tracing::debug!("dropping {} descriptors and {} free record hints", self.descriptors.len(), self.free_hints.len());
        self.descriptors.clear();
        self.free_hints.clear();
    }

    /// Drop cached state of files changed on the card
    pub fn invalidate_files(&mut self, files: &[FileId]) {
        for file_id in files {
            self.descriptors.remove(file_id);
            self.free_hints.remove(file_id);
        }
    }

    pub fn cached_descriptor(&self, file_id: FileId) -> Option<&EfDescriptor> {
        self.descriptors.get(&file_id)
    }

    pub fn free_record_hint(&self, file_id: FileId) -> Option<u8> {
        self.free_hints.get(&file_id).copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn check_generation(&mut self) {
        let generation = self.config.state_read().app_generation;
        if generation != self.generation {
            tracing::info!("card application switched, generation {} -> {}", self.generation, generation);
            self.generation = generation;
            self.invalidate();
        }
    }

    fn alloc_key(&mut self) -> IoKey {
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1).max(1);
        key
    }

    /// Begin a logical operation. Returns the key correlating all of its SIM IO exchanges
    /// and the first step.
    pub fn start(&mut self, req: EfReq) -> (IoKey, EfStep) {
        self.check_generation();
        let key = self.alloc_key();
        let file_id = req.file_id;
        tracing::debug!(key, "start {:?} on {} ({:04X})", req.op, ef_name(file_id), file_id);

        let app_type = self.config.state_read().app_type;
        let path = match req.op {
            EfOp::LoadImageInstance if file_id >> 8 != 0x4F => {
                Err(IccErr::InvalidArguments { reason: "image instance file id outside 0x4Fxx" })
            }
            EfOp::LoadImageInstance => ef_path(app_type, EF_IMG),
            _ => ef_path(app_type, file_id),
        };
        let path = match path {
            Ok(path) => path,
            Err(e) => return (key, EfStep::Done(EfConf { handle: req.handle, file_id, result: Err(e) })),
        };

        let record = record_key(&req.op);
        if self.pending.values().any(|op| op.req.file_id == file_id && record_key(&op.req.op) == record) {
            tracing::warn!(key, "{} ({:04X}) record {} already pending", ef_name(file_id), file_id, record);
            let result = Err(IccErr::OperationPending { file_id, record });
            return (key, EfStep::Done(EfConf { handle: req.handle, file_id, result }));
        }
        if let EfOp::UpdateLinearFixed { record: 0, .. } = req.op {
            let result = Err(IccErr::InvalidArguments { reason: "record number required" });
            return (key, EfStep::Done(EfConf { handle: req.handle, file_id, result }));
        }

        let mut op = PendingOp::new(req, path);
        let cached = match expected_structure(&op.req.op) {
            EfStructure::Transparent => None,
            _ => self.descriptors.get(&file_id).cloned(),
        };
        let progress = match cached {
            Some(descriptor) => {
                tracing::trace!(key, "descriptor of {:04X} cached", file_id);
                self.after_descriptor(key, &mut op, descriptor)
            }
            None => Ok(Progress::Io(op.command(key, IccCommand::GetResponse, 0, 0, GET_RESPONSE_LENGTH))),
        };
        (key, self.finish_step(key, op, progress))
    }

    /// Feed the card's answer to a request issued by this state machine. Returns None for
    /// an unknown key.
    pub fn on_response(&mut self, rsp: SimIoRsp) -> Option<EfStep> {
        let key = rsp.key;
        let Some(mut op) = self.pending.remove(&key) else {
            tracing::warn!(key, "response without pending operation");
            return None;
        };
        tracing::debug!(key, "<- sw {:02X}{:02X} {} octets in {:?}", rsp.sw1, rsp.sw2, rsp.data.len(), op.state);

        let progress = if rsp.error {
            Err(IccErr::ChannelError { file_id: op.req.file_id, sw1: rsp.sw1, sw2: rsp.sw2 })
        } else {
            self.advance(key, &mut op, rsp.data)
        };
        Some(self.finish_step(key, op, progress))
    }

    fn finish_step(&mut self, key: IoKey, op: PendingOp, progress: Result<Progress, IccErr>) -> EfStep {
        let handle = op.req.handle;
        let file_id = op.req.file_id;
        match progress {
            Ok(Progress::Io(req)) => {
                self.pending.insert(key, op);
                EfStep::Io(req)
            }
            Ok(Progress::Done(data)) => {
                tracing::debug!(key, "done {} ({:04X})", ef_name(file_id), file_id);
                EfStep::Done(EfConf { handle, file_id, result: Ok(data) })
            }
            Err(e) => {
                tracing::warn!(key, "failed {} ({:04X}): {}", ef_name(file_id), file_id, e);
                EfStep::Done(EfConf { handle, file_id, result: Err(e) })
            }
        }
    }

    fn advance(&mut self, key: IoKey, op: &mut PendingOp, data: Vec<u8>) -> Result<Progress, IccErr> {
        match op.state {
            EfState::AwaitingGetResponse => {
                let file_id = op.req.file_id;
                let descriptor =
                    EfDescriptor::from_get_response(&data, file_id, expected_structure(&op.req.op), op.path)?;
                if descriptor.structure.is_record_based() {
                    self.descriptors.insert(file_id, descriptor.clone());
                }
                self.after_descriptor(key, op, descriptor)
            }
            EfState::AwaitingBinary => Ok(Progress::Done(EfData::Transparent(data))),
            EfState::AwaitingUpdate => Ok(Progress::Done(EfData::Updated)),
            EfState::AwaitingRecord => self.after_record(key, op, data),
        }
    }

    fn after_descriptor(
        &mut self,
        key: IoKey,
        op: &mut PendingOp,
        descriptor: EfDescriptor,
    ) -> Result<Progress, IccErr> {
        let file_id = op.req.file_id;
        let ef_op = op.req.op.clone();
        let (record_size, record_count) = match descriptor.structure.is_record_based() {
            true => record_layout(&descriptor)?,
            false => (0, 0),
        };
        op.descriptor = Some(descriptor.clone());

        match ef_op {
            EfOp::GetDescriptor => Ok(Progress::Done(EfData::Descriptor(descriptor))),
            EfOp::LoadTransparent | EfOp::LoadImageInstance => {
                op.state = EfState::AwaitingBinary;
                let p3 = transparent_length(descriptor.file_size);
                Ok(Progress::Io(op.command(key, IccCommand::ReadBinary, 0, 0, p3)))
            }
            EfOp::UpdateTransparent { data } => {
                op.state = EfState::AwaitingUpdate;
                let p3 = transparent_length(descriptor.file_size);
                let mut req = op.command(key, IccCommand::UpdateBinary, 0, 0, p3);
                req.data = Some(fit_to_size(&data, descriptor.file_size));
                Ok(Progress::Io(req))
            }
            EfOp::LoadLinearFixed { record } => {
                let record = record.unwrap_or(1);
                check_record(&descriptor, record)?;
                op.record = record;
                op.state = EfState::AwaitingRecord;
                Ok(Progress::Io(op.read_record(key, record_size)))
            }
            EfOp::LoadAllRecords => {
                if record_count == 0 {
                    return Ok(Progress::Done(EfData::Records(Vec::new())));
                }
                op.record = 1;
                op.state = EfState::AwaitingRecord;
                Ok(Progress::Io(op.read_record(key, record_size)))
            }
            EfOp::UpdateLinearFixed { record, data, pin2 } => {
                check_record(&descriptor, record)?;
                op.record = record;
                op.state = EfState::AwaitingUpdate;
                let mut req = op.command(
                    key,
                    IccCommand::UpdateRecord,
                    record,
                    P2_RECORD_ABSOLUTE,
                    record_size,
                );
                req.data = Some(fit_to_size(&data, descriptor.record_size));
                req.pin2 = pin2;
                Ok(Progress::Io(req))
            }
            EfOp::FindFreeRecord => {
                if record_count == 0 {
                    return Err(IccErr::NoFreeRecord { file_id });
                }
                let start = self
                    .free_hints
                    .get(&file_id)
                    .copied()
                    .filter(|&hint| hint >= 1 && hint <= record_count)
                    .unwrap_or(1);
                op.first_record = start;
                op.record = start;
                op.state = EfState::AwaitingRecord;
                Ok(Progress::Io(op.read_record(key, record_size)))
            }
        }
    }

    fn after_record(&mut self, key: IoKey, op: &mut PendingOp, data: Vec<u8>) -> Result<Progress, IccErr> {
        let file_id = op.req.file_id;
        let (record_size, total) = match &op.descriptor {
            Some(d) => record_layout(d)?,
            None => return Err(IccErr::InvalidArguments { reason: "record read without descriptor" }),
        };

        match op.req.op {
            EfOp::LoadLinearFixed { .. } => Ok(Progress::Done(EfData::Record { record: op.record, data })),
            EfOp::LoadAllRecords => {
                op.records.push(data);
                match op.record.checked_add(1).filter(|&next| next <= total) {
                    Some(next) => {
                        op.record = next;
                        Ok(Progress::Io(op.read_record(key, record_size)))
                    }
                    None => Ok(Progress::Done(EfData::Records(std::mem::take(&mut op.records)))),
                }
            }
            EfOp::FindFreeRecord => {
                let next = if op.record >= total { 1 } else { op.record + 1 };
                if data.iter().all(|&b| b == 0xFF) {
                    tracing::debug!(key, "record {} of {:04X} is free", op.record, file_id);
                    self.free_hints.insert(file_id, next);
                    Ok(Progress::Done(EfData::FreeRecord(op.record)))
                } else if next == op.first_record {
                    self.free_hints.remove(&file_id);
                    Err(IccErr::NoFreeRecord { file_id })
                } else {
                    op.record = next;
                    Ok(Progress::Io(op.read_record(key, record_size)))
                }
            }
            _ => Err(IccErr::InvalidArguments { reason: "record read for a non-record operation" }),
        }
    }
}
