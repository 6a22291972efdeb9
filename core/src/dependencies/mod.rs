//! # DEPENDENCIES MODULE
//!
//! **CONTEXTS, THE INJECTION ALGEBRA, AND THE EVALUATOR**
//!
//! - [`Context`] - unforgeable key with a static default
//! - [`Injected`] - deferred computation awaiting an environment
//! - [`depend`] / [`Get`] / [`Provide`] - scoped reads and overrides
//! - [`evaluate_injected`] - runs a computation against the empty root

pub mod context;
pub mod resolver;
pub mod types;

pub use context::Context;
pub use resolver::{depend, evaluate_injected, Depend, Get, Provide};
pub use types::{BoxInjected, ContextId, Injected, Map, Provider};
