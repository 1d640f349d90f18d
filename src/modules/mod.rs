//! Modules layer - Infrastructure components shared by features
//!
//! Contains adapters for external resources like file storage.

pub mod storage;
