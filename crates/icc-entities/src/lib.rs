#![allow(dead_code)]

pub mod entity_trait;
pub mod messagerouter;

pub mod cbs;
pub mod contacts;
pub mod io;
pub mod records;
pub mod sms;
pub mod stk;

// Re-export commonly used items from router
pub use entity_trait::IccEntityTrait;
pub use messagerouter::{MessagePrio, MessageQueue, MessageRouter};
