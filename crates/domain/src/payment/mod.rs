//! Payment entity and related types.

mod entity;
pub mod errors;
mod events;
mod method;
mod status;
mod value_objects;

pub use entity::{Payment, PaymentSnapshot};
pub use events::{PaymentApprovedData, PaymentEvent, PaymentRefusedData};
pub use method::PaymentMethod;
pub use status::PaymentStatus;
pub use value_objects::{Money, OrderId};
