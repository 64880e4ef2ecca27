pub mod branch;
pub mod role;
pub mod user;

pub use branch::{Branch, BranchLookup};
pub use role::{normalize_role, CallerRole};
pub use user::{CallerProfile, CurrentUser, UserRecord, UserScope, UserView};
