//! The request-level flows: register, log in, authenticate, log out.
//!
//! Each action owns its collaborators and exposes a single `execute`.

pub mod authenticate;
pub mod login;
pub mod logout;
pub mod prune_expired;
pub mod signup;

pub use authenticate::AuthenticateAction;
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use prune_expired::PruneExpiredSessionsAction;
pub use signup::SignupAction;
