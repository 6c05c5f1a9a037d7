//! Domain Services

pub mod payment;
