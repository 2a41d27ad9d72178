//! Json wire format of catalog entities

pub mod decode;
pub mod error;
pub mod serialize;
