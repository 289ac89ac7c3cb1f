//! Form entity, registry and the submission state machine.

pub use optin_forms::*;
