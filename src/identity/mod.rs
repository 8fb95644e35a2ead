//! Identity capability.
//!
//! Authentication happens elsewhere; this crate only needs to know who the
//! signed-in user is, if anyone, to stamp board membership and to scope
//! board listings.

mod provider;
mod user;

pub use provider::{IdentityProvider, StaticIdentityProvider};
pub use user::UserId;

#[cfg(test)]
pub use provider::MockIdentityProvider;
