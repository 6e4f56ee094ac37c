pub mod pdu;
pub mod record;
