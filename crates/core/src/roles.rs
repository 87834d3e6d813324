//! Well-known role name constants.
//!
//! The service has a single implicit role; it is embedded in every access
//! token so that clients and future policies can rely on the claim.

pub const ROLE_USER: &str = "user";
