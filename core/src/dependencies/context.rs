//! Dependency keys.

use crate::dependencies::types::{ContextId, Injected, Provider};
use crate::environment::{Entry, Environment};
use crate::errors::InjectError;
use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// **DEPENDENCY KEY**
///
/// **PURPOSE**: Declares one injectable value together with the default
/// used wherever nothing was provided for it
/// **GUARANTEE**: Identity is fixed at construction. Two contexts built by
/// separate [`Context::new`] calls never compare equal, whatever their
/// defaults; a clone shares the identity of its source
///
/// ```
/// use reader_inject::{depend, evaluate_injected, Context};
///
/// let retries = Context::new(3_u32);
/// let read = depend(|get, _| get.get(&retries));
/// assert_eq!(evaluate_injected(&read), 3);
/// ```
pub struct Context<A> {
    id: ContextId,
    default: Arc<A>,
}

impl<A> Context<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Allocate a fresh key with `default` as its fallback value.
    pub fn new(default: A) -> Self {
        let id = ContextId::next();

        #[cfg(debug_assertions)]
        log::trace!("Allocated context {} for {}", id, type_name::<A>());

        Self {
            id,
            default: Arc::new(default),
        }
    }

    /// The value provided in `env`, or the default when `env` has no entry
    /// for this key.
    pub fn get(&self, env: &Environment) -> A {
        match self.lookup(env) {
            Ok(value) => value,
            Err(InjectError::NotProvided { .. }) => A::clone(&self.default),
            Err(err) => {
                log::warn!("Falling back to default: {err}");
                A::clone(&self.default)
            }
        }
    }

    /// Build a provider that sets this key to `value`.
    pub fn provide(&self, value: A) -> Provider {
        let id = self.id;
        let entry = Entry::new(value);
        Provider::from_fn(move |env| env.with_entry(id, entry.clone()))
    }

    /// The provided value only, without falling back to the default.
    ///
    /// # Errors
    ///
    /// [`InjectError::NotProvided`] when `env` has no entry for this key, and
    /// [`InjectError::DowncastFailed`] when the entry is not an `A`.
    pub fn lookup(&self, env: &Environment) -> Result<A, InjectError> {
        let entry = env.entry(self.id).ok_or(InjectError::NotProvided { context: self.id })?;
        entry
            .value
            .downcast_ref::<A>()
            .cloned()
            .ok_or(InjectError::DowncastFailed {
                context: self.id,
                required_type: type_name::<A>(),
                actual_type: entry.type_name,
            })
    }

    /// True when `env` holds an entry for this key.
    pub fn is_provided(&self, env: &Environment) -> bool {
        env.contains(self.id)
    }
}

impl<A> Context<A> {
    /// Identity of this key.
    pub const fn id(&self) -> ContextId {
        self.id
    }

    /// The fallback value.
    pub fn default_value(&self) -> &A {
        &self.default
    }
}

impl<A> Injected for Context<A>
where
    A: Clone + Send + Sync + 'static,
{
    type Output = A;

    fn evaluate(&self, env: &Environment) -> A {
        self.get(env)
    }
}

impl<A> Clone for Context<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            default: Arc::clone(&self.default),
        }
    }
}

impl<A> PartialEq for Context<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for Context<A> {}

impl<A> Hash for Context<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<A: fmt::Debug> fmt::Debug for Context<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_default_on_empty_environment() {
        let ctx = Context::new(100_i32);
        assert_eq!(ctx.get(&Environment::empty()), 100);
    }

    #[test]
    fn test_get_returns_provided_value() {
        let ctx = Context::new(100_i32);
        let env = ctx.provide(500).apply(Environment::empty());
        assert_eq!(ctx.get(&env), 500);
    }

    #[test]
    fn test_falsy_values_count_as_provided() {
        let number = Context::new(7_i32);
        let flag = Context::new(true);
        let text = Context::new(String::from("default"));
        let maybe = Context::new(Some(1_u8));

        let env = [
            number.provide(0),
            flag.provide(false),
            text.provide(String::new()),
            maybe.provide(None),
        ]
        .iter()
        .fold(Environment::empty(), |env, p| p.apply(env));

        assert_eq!(number.get(&env), 0);
        assert!(!flag.get(&env));
        assert_eq!(text.get(&env), "");
        assert_eq!(maybe.get(&env), None);
    }

    #[test]
    fn test_lookup_distinguishes_absent_from_present() {
        let ctx = Context::new(0_u64);
        let empty = Environment::empty();

        match ctx.lookup(&empty) {
            Err(InjectError::NotProvided { context }) => assert_eq!(context, ctx.id()),
            other => panic!("Expected NotProvided, got {other:?}"),
        }
        assert!(!ctx.is_provided(&empty));

        let env = ctx.provide(0).apply(empty);
        assert_eq!(ctx.lookup(&env), Ok(0));
        assert!(ctx.is_provided(&env));
    }

    #[test]
    fn test_lookup_reports_mismatched_entry() {
        let ctx = Context::new(1_u16);
        let env = Environment::empty().with_entry(ctx.id(), Entry::new("not a number"));

        let err = ctx.lookup(&env).unwrap_err();
        assert_eq!(err.code(), "INJECT_DOWNCAST_FAILED");
        assert_eq!(err.context(), ctx.id());
        assert!(err.to_string().contains("u16"));
        assert_eq!(ctx.get(&env), 1);
    }

    #[test]
    fn test_equal_defaults_are_distinct_keys() {
        let a = Context::new(1_i32);
        let b = Context::new(1_i32);
        assert_ne!(a, b);

        let env = a.provide(2).apply(Environment::empty());
        assert_eq!(a.get(&env), 2);
        assert_eq!(b.get(&env), 1);
    }

    #[test]
    fn test_clone_shares_identity() {
        let a = Context::new(String::from("x"));
        let b = a.clone();
        assert_eq!(a, b);

        let env = a.provide(String::from("y")).apply(Environment::empty());
        assert_eq!(b.get(&env), "y");
    }

    #[test]
    fn test_provide_does_not_mutate_input() {
        let ctx = Context::new(1_i32);
        let base = Environment::empty();
        let derived = ctx.provide(9).apply(base.clone());

        assert!(base.is_empty());
        assert_eq!(ctx.get(&base), 1);
        assert_eq!(ctx.get(&derived), 9);
    }

    #[test]
    fn test_default_value_accessor() {
        let ctx = Context::new(vec![1, 2, 3]);
        assert_eq!(ctx.default_value(), &vec![1, 2, 3]);
    }
}
