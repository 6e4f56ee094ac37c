pub mod cmd_factory;
pub mod stk_entity;

pub use stk_entity::StkEntity;
