pub mod contact_helper;

pub use contact_helper::{ContactHelper, ContactType};
