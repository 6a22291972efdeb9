//! # READER-INJECT
//!
//! **TYPE-SAFE DEPENDENCY INJECTION OVER AN IMMUTABLE, DYNAMICALLY SCOPED ENVIRONMENT**
//!
//! A computation declares the values it depends on as [`Context`] keys and
//! reads them through a scoped [`Get`]. Callers override keys for a nested
//! scope with [`Provide`]; anything never provided resolves to the key's
//! default. Nothing runs until [`evaluate_injected`] supplies the empty root
//! environment.
//!
//! ```
//! use reader_inject::{depend, evaluate_injected, Context};
//!
//! let state = &Context::new(100);
//!
//! let print_state = &depend(|get, _| format!("state = {}", get.get(state)));
//!
//! let run_with_state = |value: i32| {
//!     depend(move |_, provide| provide.provide([state.provide(value)]).get(print_state))
//! };
//!
//! assert_eq!(evaluate_injected(print_state), "state = 100");
//! assert_eq!(evaluate_injected(&run_with_state(500)), "state = 500");
//! ```

pub mod api;
pub mod dependencies;
pub mod environment;
pub mod errors;

pub use api::*;
