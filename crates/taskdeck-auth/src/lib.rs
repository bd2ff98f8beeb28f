pub mod client;
pub mod session;
pub mod token;

pub use client::{AuthApi, AuthClient, AuthSession, User};
pub use session::{Authenticated, AuthGateway};
pub use token::TokenStore;
