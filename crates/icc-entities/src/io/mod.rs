pub mod card_image;
pub mod ef_access;
pub mod ef_path;
pub mod icc_channel;
pub mod icc_io_entity;
