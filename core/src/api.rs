//! Flat re-exports of the public surface.

pub use crate::dependencies::{
    depend, evaluate_injected, BoxInjected, Context, ContextId, Depend, Get, Injected, Map,
    Provide, Provider,
};
pub use crate::environment::Environment;
pub use crate::errors::InjectError;
