//! Live check-in backend over HTTP

pub mod gateway;
mod status;
mod wire;
