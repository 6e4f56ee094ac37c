pub mod sms_entity;

pub use sms_entity::SmsEntity;
