//! Core constants

pub mod constants;
