#![allow(dead_code)]

pub mod card_builder;
pub mod component_test;
pub mod sink;

pub use card_builder::*;
pub use component_test::*;
pub use sink::*;
