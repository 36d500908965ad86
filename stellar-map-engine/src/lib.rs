//! Stellar map engine: an orbital 3D map of a three-level knowledge
//! hierarchy, rendered with Bevy and driven over a JSON-RPC bridge.

pub mod constants;
pub mod engine;
pub mod rpc;
pub mod tools;
