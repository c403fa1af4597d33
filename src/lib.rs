//! Student record-management service.
//!
//! The crate is organised as a hexagon: `domain` holds the transport-agnostic
//! model and the repository port, `inbound::http` adapts it to Actix Web, and
//! `outbound::persistence` provides the PostgreSQL and in-memory
//! implementations of the port.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
