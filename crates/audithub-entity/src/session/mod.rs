//! Session entity.

pub mod model;
pub mod token;

pub use model::{CreateSession, Session};
pub use token::SessionToken;
