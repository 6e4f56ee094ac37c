pub mod cbs_entity;

pub use cbs_entity::{CbReassembler, CbsEntity};
