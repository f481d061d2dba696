//! Identity entity and role enumeration.

pub mod model;
pub mod role;

pub use model::Identity;
pub use role::GrantRole;
