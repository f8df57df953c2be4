//! # 2ly Runtime Core
//!
//! Runtime identity resolution, ambient settings and logging shared by the
//! runtime binaries.

pub mod identity;
pub mod models;
pub mod services;
