//! Core utilities for the ICC protocol stack
//!
//! This crate provides fundamental types and utilities used across the ICC stack:
//! - OctetBuffer, the codec cursor for octet-level PDU and EF record manipulation
//! - BCD, GSM 7-bit, 8-bit unpacked and UCS2 text codecs
//! - GSM national language locking and single shift tables
//! - Entity, SAP and card application identifiers
//! - Common error type, macros and debug utilities

pub mod bcd;
pub mod debug;
pub mod gsm_alphabet;
pub mod icc_common;
pub mod icc_entities;
pub mod icc_error;
pub mod octet_buffer;
pub mod text_codec;

// Re-export commonly used items
pub use icc_common::*;
pub use icc_entities::IccEntity;
pub use icc_error::IccErr;
pub use octet_buffer::OctetBuffer;

/// Correlation key carried by SIM-IO primitives, assigned by the ICC IO entity
pub type IoKey = u32;

/// EF identifier, e.g. 0x6F3A for EF_ADN
pub type FileId = u16;
