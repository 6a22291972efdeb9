//! Identities, the `Injected` trait and its combinators, and providers.

use crate::environment::Environment;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Identity counter for every context ever constructed in this process
static CONTEXT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opaque identity of a [`Context`](super::Context).
///
/// Only the crate can mint one, and every mint is distinct for the lifetime
/// of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(u64);

impl ContextId {
    pub(crate) fn next() -> Self {
        Self(CONTEXT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// **INJECTED COMPUTATION**
///
/// **PURPOSE**: A deferred computation that produces a value once it is
/// handed an environment
/// **GUARANTEE**: Holds no environment and caches nothing; every call to
/// [`evaluate`](Injected::evaluate) runs the computation again
pub trait Injected {
    /// Value produced by evaluation.
    type Output;

    /// Run the computation against `env`.
    fn evaluate(&self, env: &Environment) -> Self::Output;

    /// Transform the produced value, evaluated in the same environment.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> B,
    {
        Map { inner: self, f }
    }

    /// Erase the concrete type of this computation.
    fn boxed<'a>(self) -> BoxInjected<'a, Self::Output>
    where
        Self: Sized + 'a,
    {
        BoxInjected(Box::new(self))
    }
}

impl<I: Injected + ?Sized> Injected for &I {
    type Output = I::Output;

    fn evaluate(&self, env: &Environment) -> Self::Output {
        (**self).evaluate(env)
    }
}

impl<I: Injected + ?Sized> Injected for Box<I> {
    type Output = I::Output;

    fn evaluate(&self, env: &Environment) -> Self::Output {
        (**self).evaluate(env)
    }
}

impl<I: Injected + ?Sized> Injected for Arc<I> {
    type Output = I::Output;

    fn evaluate(&self, env: &Environment) -> Self::Output {
        (**self).evaluate(env)
    }
}

impl<I: Injected + ?Sized> Injected for Rc<I> {
    type Output = I::Output;

    fn evaluate(&self, env: &Environment) -> Self::Output {
        (**self).evaluate(env)
    }
}

/// Result of [`Injected::map`].
#[derive(Clone)]
pub struct Map<I, F> {
    inner: I,
    f: F,
}

impl<I, F, B> Injected for Map<I, F>
where
    I: Injected,
    F: Fn(I::Output) -> B,
{
    type Output = B;

    fn evaluate(&self, env: &Environment) -> B {
        (self.f)(self.inner.evaluate(env))
    }
}

/// Type-erased injected computation, see [`Injected::boxed`].
pub struct BoxInjected<'a, A>(Box<dyn Injected<Output = A> + 'a>);

impl<A> Injected for BoxInjected<'_, A> {
    type Output = A;

    fn evaluate(&self, env: &Environment) -> A {
        self.0.evaluate(env)
    }
}

type Transform = dyn Fn(Environment) -> Environment + Send + Sync;

/// **ENVIRONMENT TRANSFORMER**
///
/// Built by [`Context::provide`](super::Context::provide) and applied in
/// order by [`Provide::provide`](super::Provide::provide).
#[derive(Clone)]
pub struct Provider {
    transform: Arc<Transform>,
}

impl Provider {
    /// Wrap an arbitrary environment transformer.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Environment) -> Environment + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(f),
        }
    }

    /// Apply this provider to `env`, returning the derived environment.
    pub fn apply(&self, env: Environment) -> Environment {
        (self.transform)(env)
    }

    /// Chain `next` after `self`; entries written by `next` win.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self::from_fn(move |env| next.apply(self.apply(env)))
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").finish_non_exhaustive()
    }
}
