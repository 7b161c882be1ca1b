//! Service layer: membership lifecycle and message routing.
//!
//! Connection tasks talk to the relay exclusively through
//! [`RelayService`].

pub mod relay_service;

pub use relay_service::RelayService;
