//! Repository implementations, one per aggregate.

pub mod invitation;
pub mod member;
pub mod org_role;
pub mod organization;
pub mod session;
pub mod user;
