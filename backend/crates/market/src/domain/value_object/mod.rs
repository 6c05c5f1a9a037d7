//! Value Object Module

pub mod category;
pub mod mod_status;
pub mod pricing;
