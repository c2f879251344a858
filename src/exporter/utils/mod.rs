//! Shared helpers for downloading, hashing, and file handling.

pub mod checksum;
pub mod fs;
pub mod http;
