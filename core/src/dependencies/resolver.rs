//! Scoped `Get`/`Provide`, `depend`, and the evaluator.

use crate::dependencies::types::{Injected, Provider};
use crate::environment::Environment;

/// **SCOPED GET**
///
/// **PURPOSE**: Evaluates injected computations (including plain contexts)
/// against the one environment it was created for
#[derive(Clone, Debug)]
pub struct Get {
    env: Environment,
}

impl Get {
    fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Evaluate `injected` in this scope.
    pub fn get<I: Injected + ?Sized>(&self, injected: &I) -> I::Output {
        injected.evaluate(&self.env)
    }

    /// The environment this scope reads from.
    pub const fn environment(&self) -> &Environment {
        &self.env
    }
}

/// **SCOPED PROVIDE**
///
/// **PURPOSE**: Derives narrower scopes from the environment it was created for
/// **GUARANTEE**: Never changes what the enclosing [`Get`] or any sibling
/// scope observes
#[derive(Clone, Debug)]
pub struct Provide {
    env: Environment,
}

impl Provide {
    fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Apply `providers` left to right and return a [`Get`] over the result.
    ///
    /// A later provider for the same context overwrites an earlier one. An
    /// empty list yields a scope equivalent to the current one.
    pub fn provide<P>(&self, providers: P) -> Get
    where
        P: IntoIterator<Item = Provider>,
    {
        let mut count = 0_usize;
        let env = providers.into_iter().fold(self.env.clone(), |env, provider| {
            count += 1;
            provider.apply(env)
        });

        log::trace!(
            "Derived environment from {} provider(s): {} -> {} entries",
            count,
            self.env.len(),
            env.len()
        );

        Get::new(env)
    }

    /// Shorthand for `self.provide(providers).get(injected)`.
    pub fn run<P, I>(&self, providers: P, injected: &I) -> I::Output
    where
        P: IntoIterator<Item = Provider>,
        I: Injected + ?Sized,
    {
        self.provide(providers).get(injected)
    }

    /// The environment new scopes are derived from.
    pub const fn environment(&self) -> &Environment {
        &self.env
    }
}

/// Injected computation built by [`depend`].
#[derive(Clone)]
pub struct Depend<F> {
    f: F,
}

impl<F, A> Injected for Depend<F>
where
    F: Fn(Get, Provide) -> A,
{
    type Output = A;

    fn evaluate(&self, env: &Environment) -> A {
        (self.f)(Get::new(env.clone()), Provide::new(env.clone()))
    }
}

/// **DECLARE DEFERRED COMPUTATION**
///
/// Wrap `f` so that it runs once per evaluation, receiving a [`Get`] and a
/// [`Provide`] bound to the evaluating environment.
///
/// ```
/// use reader_inject::{depend, evaluate_injected, Context};
///
/// let state = Context::new(100);
/// let print_state = depend(|get, _| get.get(&state));
/// let with_state = depend(|_, provide| provide.run([state.provide(500)], &print_state));
///
/// assert_eq!(evaluate_injected(&print_state), 100);
/// assert_eq!(evaluate_injected(&with_state), 500);
/// ```
pub fn depend<A, F>(f: F) -> Depend<F>
where
    F: Fn(Get, Provide) -> A,
{
    Depend { f }
}

/// **FORCE EVALUATION**
///
/// Evaluate `injected` against the empty root environment. Panics and
/// returned errors from user callbacks pass through unchanged.
pub fn evaluate_injected<I: Injected + ?Sized>(injected: &I) -> I::Output {
    log::debug!("Evaluating injected computation against empty environment");
    injected.evaluate(&Environment::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::Context;
    use std::cell::RefCell;

    #[test]
    fn test_depend_receives_scope_of_evaluating_environment() {
        let ctx = Context::new(1_i32);
        let read = depend(|get, _| get.get(&ctx));
        let env = ctx.provide(5).apply(Environment::empty());

        assert_eq!(read.evaluate(&Environment::empty()), 1);
        assert_eq!(read.evaluate(&env), 5);
    }

    #[test]
    fn test_provide_with_no_providers_keeps_scope() {
        let ctx = Context::new(3_i32);
        let read = depend(|get, provide| {
            let inner = provide.provide([]);
            (get.get(&ctx), inner.get(&ctx), inner.environment().len())
        });

        assert_eq!(evaluate_injected(&read), (3, 3, 0));
    }

    #[test]
    fn test_provide_last_write_wins() {
        let ctx = Context::new(0_i32);
        let read = depend(|_, provide| provide.provide([ctx.provide(1), ctx.provide(2)]).get(&ctx));
        assert_eq!(evaluate_injected(&read), 2);
    }

    #[test]
    fn test_provide_accepts_vec_and_iterators() {
        let ctx = Context::new(0_u32);
        let read = depend(|_, provide| {
            let from_vec = provide.run(vec![ctx.provide(4)], &ctx);
            let from_iter = provide.run((1..=3).map(|v| ctx.provide(v)), &ctx);
            (from_vec, from_iter)
        });
        assert_eq!(evaluate_injected(&read), (4, 3));
    }

    #[test]
    fn test_callback_runs_once_per_evaluation() {
        let calls = RefCell::new(0_u32);
        let counted = depend(|_, _| *calls.borrow_mut() += 1);

        evaluate_injected(&counted);
        evaluate_injected(&counted);
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_scoped_get_environment_is_parent_of_provided_scope() {
        let ctx = Context::new('a');
        let read = depend(|get, provide| {
            let inner = provide.provide([ctx.provide('b')]);
            (get.environment().len(), inner.environment().len(), provide.environment().len())
        });
        assert_eq!(evaluate_injected(&read), (0, 1, 0));
    }
}
