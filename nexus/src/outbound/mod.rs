//! Adapters implementing the domain ports.

pub mod catalogue;
pub mod codes;
pub mod credentials;
pub mod storage;
pub mod transport;
