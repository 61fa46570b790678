pub mod account;
pub mod credentials;
pub mod validate;

pub use credentials::{CredentialStore, Credentials};
