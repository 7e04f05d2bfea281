//! Key identity, credential shapes, and signing-key providers.

pub mod config;
pub mod credentials;
pub mod id;
pub mod key;
pub mod key_type;

pub use config::*;
pub use credentials::*;
pub use id::*;
pub use key::*;
pub use key_type::*;
