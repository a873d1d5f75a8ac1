//! Infrastructure layer: DTOs and concrete transports for the domain traits.

pub mod connector;
pub mod dto;
pub mod publisher;
