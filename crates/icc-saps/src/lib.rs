#![allow(dead_code)]

/// Custom definitions for stack control
pub mod control;

pub mod cbs;
pub mod ef;
pub mod sapmsg;
pub mod sim_io;
pub mod sms;
pub mod stk;

pub use sapmsg::*;
