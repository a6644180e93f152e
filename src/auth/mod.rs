//! Authentication and authorization.
//!
//! Bearer tokens, identity resolution, the per-request gate, the
//! owner-or-admin policy and account registration.

mod gate;
pub mod identity;
mod password;
mod permission;
mod registration;
mod token;

pub use gate::{AuthState, AuthenticationGate};
pub use identity::{Identity, IdentityDirectory, IdentityResolver};
pub use password::{
    hash_password, password_length_ok, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use permission::{authorize_mutation, can_mutate, require_admin, require_identity};
pub use registration::{login, register, RegistrationRequest, MAX_DISPLAY_NAME_LENGTH};
pub use token::{Claims, TokenCodec, TokenError};
