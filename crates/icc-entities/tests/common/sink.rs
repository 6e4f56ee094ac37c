use icc_core::icc_entities::IccEntity;
use icc_entities::{IccEntityTrait, MessageQueue};
use icc_saps::SapMsg;

/// An ICC stack component sink for testing purposes
/// Collects all received SapMsg messages for later inspection
pub struct Sink {
    component: IccEntity,
    msgqueue: Vec<SapMsg>,
}

impl Sink {
    pub fn new(component: IccEntity) -> Self {
        Self { component, msgqueue: vec![] }
    }

    pub fn take_msgqueue(&mut self) -> Vec<SapMsg> {
        std::mem::take(&mut self.msgqueue)
    }
}

impl IccEntityTrait for Sink {
    fn entity(&self) -> IccEntity {
        self.component
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {:?}", message);
        self.msgqueue.push(message);
    }
}
