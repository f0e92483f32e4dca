//! Encryption gateway library — cipher, config and the HTTP route table.
//! The `encryptor` binary in `main.rs` only wires these together.

pub mod cipher;
pub mod config;
pub mod routes;
