//! Runtime services

pub mod logging;
