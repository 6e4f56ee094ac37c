use std::collections::HashMap;

use icc_config::SharedConfig;
use icc_core::icc_entities::IccEntity;
use icc_core::{IoKey, Sap};
use icc_saps::control::IccControl;
use icc_saps::ef::{EfConf, EfReq};
use icc_saps::sim_io::SimIoRsp;
use icc_saps::{SapMsg, SapMsgInner};

use crate::io::ef_access::{EfAccess, EfStep};
use crate::{IccEntityTrait, MessageQueue};

/// Serves logical EF operations from upper entities, exchanging SIM IO with the radio
/// interface layer
pub struct IccIoEntity {
    config: SharedConfig,
    access: EfAccess,
    /// Entity to confirm each in-flight operation to
    requesters: HashMap<IoKey, IccEntity>,
}

impl IccIoEntity {
    pub fn new(config: SharedConfig) -> Self {
        Self { access: EfAccess::new(config.clone()), config, requesters: HashMap::new() }
    }

    pub fn access(&self) -> &EfAccess {
        &self.access
    }

    fn forward(&mut self, queue: &mut MessageQueue, key: IoKey, requester: IccEntity, step: EfStep) {
        match step {
            EfStep::Io(req) => {
                self.requesters.insert(key, requester);
                queue.push_back(SapMsg::new(Sap::SimIoSap, IccEntity::IccIo, IccEntity::Ril, SapMsgInner::SimIoReq(req)));
            }
            EfStep::Done(conf) => Self::confirm(queue, requester, conf),
        }
    }

    fn confirm(queue: &mut MessageQueue, requester: IccEntity, conf: EfConf) {
        queue.push_back(SapMsg::new(Sap::EfSap, IccEntity::IccIo, requester, SapMsgInner::EfConf(conf)));
    }

    fn rx_ef_req(&mut self, queue: &mut MessageQueue, src: IccEntity, req: EfReq) {
        tracing::trace!("rx_ef_req from {:?}: {:04X} {:?}", src, req.file_id, req.op);
        let (key, step) = self.access.start(req);
        self.forward(queue, key, src, step);
    }

    fn rx_sim_io_rsp(&mut self, queue: &mut MessageQueue, rsp: SimIoRsp) {
        let key = rsp.key;
        let Some(requester) = self.requesters.remove(&key) else {
            tracing::warn!(key, "SIM IO response without requester");
            return;
        };
        match self.access.on_response(rsp) {
            Some(step) => self.forward(queue, key, requester, step),
            None => tracing::warn!(key, "SIM IO response not matching any operation"),
        }
    }

    fn rx_control(&mut self, control: IccControl) {
        match control {
            IccControl::SwitchApp(app_type) => {
                tracing::info!("switching card application to {}", app_type);
                self.config.state_write().switch_app_type(app_type);
                self.access.invalidate();
            }
            IccControl::FilesChanged(files) => {
                tracing::debug!("files changed on card: {:04X?}", files);
                self.access.invalidate_files(&files);
            }
        }
    }
}

impl IccEntityTrait for IccIoEntity {
    fn entity(&self) -> IccEntity {
        IccEntity::IccIo
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.access = EfAccess::new(config.clone());
        self.config = config;
        self.requesters.clear();
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {}", message.msg);
        let src = message.src;
        match message.msg {
            SapMsgInner::EfReq(req) => self.rx_ef_req(queue, src, req),
            SapMsgInner::SimIoRsp(rsp) => self.rx_sim_io_rsp(queue, rsp),
            SapMsgInner::IccControl(control) => self.rx_control(control),
            other => {
                tracing::warn!("unexpected primitive {} from {:?}", other, src);
            }
        }
    }
}
