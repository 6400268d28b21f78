//! Shared types for the sales domain.

pub mod types;

pub use types::{EntityId, IdGenerator, SequentialIdGenerator, UuidGenerator};
