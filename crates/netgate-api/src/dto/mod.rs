//! Request and response DTOs for the HTTP API.

pub mod request;
pub mod response;

pub use request::AdmissionRequest;
pub use response::{
    AdmissionResponse, GrantEntryResponse, PortalHandoff, UserProfile,
};
