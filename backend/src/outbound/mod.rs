//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **finding**: reqwest-backed client for the marketplace Finding service
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no business logic.

pub mod finding;
