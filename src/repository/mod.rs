//! The user store seam.
//!
//! Persisting users is the caller's business; the actions only need to look
//! a user up by name and to create one with an already-hashed credential.
//! Implement [`UserRepository`] over whatever database the application uses.
//!
//! Enable the `mocks` feature for [`MockUserRepository`], an in-memory
//! implementation for tests.

mod user;

#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use user::{AuthUser, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
