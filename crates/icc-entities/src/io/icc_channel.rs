use icc_config::SharedConfig;
use icc_core::{FileId, IccErr};
use icc_pdus::icc::fields::file_descriptor::EfDescriptor;
use icc_saps::ef::{EfData, EfOp, EfReq};
use icc_saps::sim_io::{SimIoReq, SimIoRsp};

use crate::io::ef_access::{EfAccess, EfStep};

/// Link to the card answering SIM IO requests in place
pub trait IccChannel {
    fn transmit(&mut self, req: &SimIoReq) -> SimIoRsp;
}

fn unexpected(file_id: FileId, data: &EfData) -> IccErr {
    tracing::error!("unexpected confirmation for {:04X}: {:?}", file_id, data);
    IccErr::InvalidArguments { reason: "unexpected EF confirmation" }
}

/// Blocking EF access, used by the record and contact helpers
pub trait EfIo {
    fn config(&self) -> &SharedConfig;

    /// Run one logical operation to completion
    fn execute(&mut self, file_id: FileId, op: EfOp) -> Result<EfData, IccErr>;

    fn load_transparent(&mut self, file_id: FileId) -> Result<Vec<u8>, IccErr> {
        match self.execute(file_id, EfOp::LoadTransparent)? {
            EfData::Transparent(data) => Ok(data),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn load_image_instance(&mut self, file_id: FileId) -> Result<Vec<u8>, IccErr> {
        match self.execute(file_id, EfOp::LoadImageInstance)? {
            EfData::Transparent(data) => Ok(data),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn load_record(&mut self, file_id: FileId, record: u8) -> Result<Vec<u8>, IccErr> {
        match self.execute(file_id, EfOp::LoadLinearFixed { record: Some(record) })? {
            EfData::Record { data, .. } => Ok(data),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn load_all_records(&mut self, file_id: FileId) -> Result<Vec<Vec<u8>>, IccErr> {
        match self.execute(file_id, EfOp::LoadAllRecords)? {
            EfData::Records(records) => Ok(records),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn descriptor(&mut self, file_id: FileId) -> Result<EfDescriptor, IccErr> {
        match self.execute(file_id, EfOp::GetDescriptor)? {
            EfData::Descriptor(descriptor) => Ok(descriptor),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn update_transparent(&mut self, file_id: FileId, data: Vec<u8>) -> Result<(), IccErr> {
        match self.execute(file_id, EfOp::UpdateTransparent { data })? {
            EfData::Updated => Ok(()),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn update_record(&mut self, file_id: FileId, record: u8, data: Vec<u8>, pin2: Option<&str>) -> Result<(), IccErr> {
        let op = EfOp::UpdateLinearFixed { record, data, pin2: pin2.map(str::to_string) };
        match self.execute(file_id, op)? {
            EfData::Updated => Ok(()),
            other => Err(unexpected(file_id, &other)),
        }
    }

    fn find_free_record(&mut self, file_id: FileId) -> Result<u8, IccErr> {
        match self.execute(file_id, EfOp::FindFreeRecord)? {
            EfData::FreeRecord(record) => Ok(record),
            other => Err(unexpected(file_id, &other)),
        }
    }
}

/// Drives the EF access state machine over a synchronous channel
pub struct EfDriver<C: IccChannel> {
    config: SharedConfig,
    access: EfAccess,
    channel: C,
    next_handle: u32,
}

impl<C: IccChannel> EfDriver<C> {
    pub fn new(config: SharedConfig, channel: C) -> Self {
        Self { access: EfAccess::new(config.clone()), config, channel, next_handle: 0 }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn access(&mut self) -> &mut EfAccess {
        &mut self.access
    }
}

impl<C: IccChannel> EfIo for EfDriver<C> {
    fn config(&self) -> &SharedConfig {
        &self.config
    }

    fn execute(&mut self, file_id: FileId, op: EfOp) -> Result<EfData, IccErr> {
        self.next_handle = self.next_handle.wrapping_add(1);
        let (key, mut step) = self.access.start(EfReq { handle: self.next_handle, file_id, op });
        loop {
            match step {
                EfStep::Done(conf) => return conf.result,
                EfStep::Io(req) => {
                    let mut rsp = self.channel.transmit(&req);
                    if rsp.key != key {
                        tracing::warn!(key, "channel answered with key {}", rsp.key);
                        rsp.key = key;
                    }
                    step = match self.access.on_response(rsp) {
                        Some(step) => step,
                        None => return Err(IccErr::ChannelError { file_id, sw1: 0x6F, sw2: 0x00 }),
                    };
                }
            }
        }
    }
}
