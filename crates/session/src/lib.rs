//! `fiesta-session` — the authentication boundary.
//!
//! **Responsibility:** the minimal capability surface the application needs
//! from the hosted auth service: who is signed in, and signing out. No
//! token issuance, refresh, or protocol internals live here.

pub mod fixed;
pub mod provider;
pub mod remote;
pub mod user;

pub use fixed::StaticSessionProvider;
pub use provider::SessionProvider;
pub use remote::RemoteSessionProvider;
pub use user::User;
