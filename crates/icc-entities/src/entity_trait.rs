use as_any::AsAny;
use icc_config::SharedConfig;
use icc_core::icc_entities::IccEntity;
use icc_saps::SapMsg;

use crate::MessageQueue;

/// Trait for ICC stack entities
/// Used by MessageRouter for passing messages between entities
pub trait IccEntityTrait: Send + AsAny {
    /// Returns the entity type identifier
    fn entity(&self) -> IccEntity;

    /// Handle incoming SAP primitive
    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg);

    /// Update configuration (optional)
    #[allow(dead_code)]
    fn set_config(&mut self, _config: SharedConfig) {}
}
