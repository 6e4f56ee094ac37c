use std::collections::{HashMap, VecDeque};

use icc_config::SharedConfig;
use icc_core::icc_entities::IccEntity;
use icc_saps::SapMsg;

use crate::IccEntityTrait;

/// Upper bound on deliveries per run, guards against entities answering each other forever
const MAX_DELIVERIES_PER_RUN: usize = 100_000;

#[derive(Default)]
pub enum MessagePrio {
    Immediate,
    #[default]
    Normal,
}

#[derive(Default)]
pub struct MessageQueue {
    messages: VecDeque<SapMsg>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self { messages: VecDeque::new() }
    }

    pub fn push_back(&mut self, message: SapMsg) {
        self.messages.push_back(message);
    }

    pub fn push_prio(&mut self, message: SapMsg, prio: MessagePrio) {
        match prio {
            MessagePrio::Immediate => {
                // Insert at the front for immediate processing
                self.messages.push_front(message);
            }
            MessagePrio::Normal => {
                self.messages.push_back(message);
            }
        }
    }

    pub fn pop_front(&mut self) -> Option<SapMsg> {
        self.messages.pop_front()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub struct MessageRouter {
    /// Unused by the router itself, kept for entities created later on
    _config: SharedConfig,
    entities: HashMap<IccEntity, Box<dyn IccEntityTrait>>,
    msg_queue: MessageQueue,
}

impl MessageRouter {
    pub fn new(config: SharedConfig) -> Self {
        Self { entities: HashMap::new(), msg_queue: MessageQueue::new(), _config: config }
    }

    pub fn register_entity(&mut self, entity: Box<dyn IccEntityTrait>) {
        let comp_type = entity.entity();
        tracing::debug!("register_entity {:?}", comp_type);
        self.entities.insert(comp_type, entity);
    }

    /// Returns a mut ref to a component of the requested type
    pub fn get_entity(&mut self, comp: IccEntity) -> Option<&mut dyn IccEntityTrait> {
        self.entities.get_mut(&comp).map(|entity| entity.as_mut())
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        tracing::debug!("submit_message {:?}: {:?} -> {:?}", message.get_sap(), message.get_source(), message.get_dest());
        self.msg_queue.push_back(message);
    }

    pub fn deliver_message(&mut self) {
        let Some(message) = self.msg_queue.pop_front() else {
            return;
        };
        tracing::debug!(
            "deliver_message: got {:?}: {:?} -> {:?} {}",
            message.get_sap(),
            message.get_source(),
            message.get_dest(),
            message.msg
        );

        // Check if the destination entity registered and deliver if found
        let dest = *message.get_dest();
        if let Some(entity) = self.entities.get_mut(&dest) {
            entity.rx_prim(&mut self.msg_queue, message);
        } else {
            tracing::warn!(
                "deliver_message: entity {:?} not found for {:?}: {:?} -> {:?}",
                dest,
                message.get_sap(),
                message.get_source(),
                message.get_dest()
            );
        }
    }

    pub fn deliver_all_messages(&mut self) {
        while !self.msg_queue.is_empty() {
            self.deliver_message();
        }
    }

    pub fn get_msgqueue_len(&self) -> usize {
        self.msg_queue.len()
    }

    /// Delivers messages until every entity is idle. Returns the number of deliveries.
    pub fn run_until_idle(&mut self) -> usize {
        let mut delivered = 0;
        while !self.msg_queue.is_empty() {
            if delivered >= MAX_DELIVERIES_PER_RUN {
                tracing::error!("run_until_idle: still {} messages queued after {} deliveries", self.msg_queue.len(), delivered);
                break;
            }
            self.deliver_message();
            delivered += 1;
        }
        delivered
    }
}
