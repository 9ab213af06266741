//! Inbound adapters translating external requests into domain port calls.
//!
//! HTTP handlers live under [`http`]; they depend only on the driving ports
//! and keep framework types at the edge.

pub mod http;
