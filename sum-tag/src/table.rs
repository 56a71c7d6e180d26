use std::fmt;

use crate::Tagged;

/// A handler table that can turn any value of `E` into an output.
///
/// Generated tables implement this only once every variant has a handler;
/// [`Partial`] implements it for any subset of handlers plus a fallback.
pub trait Table<E> {
    type Output;

    fn apply(&self, value: E) -> Self::Output;
}

impl<E, T> Table<E> for &T
where
    T: Table<E> + ?Sized,
{
    type Output = T::Output;

    fn apply(&self, value: E) -> Self::Output {
        (**self).apply(value)
    }
}

/// A handler table that may leave some variants unhandled.
///
/// `try_apply` returns `None` exactly when the value's variant has no
/// handler; it never inspects what a handler returns.
pub trait Arms<E> {
    type Output;

    fn try_apply(&self, value: E) -> Option<Self::Output>;
}

/// One entry of a handler table, either [`Missing`] or a [`Handler`].
pub trait Slot<P, R> {
    fn call(&self, payload: P) -> Option<R>;
}

/// An entry with no handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Missing;

impl<P, R> Slot<P, R> for Missing {
    fn call(&self, _payload: P) -> Option<R> {
        None
    }
}

/// An entry holding the handler for one variant.
#[derive(Clone, Copy)]
pub struct Handler<F>(F);

impl<F> Handler<F> {
    pub fn new(f: F) -> Self {
        Handler(f)
    }

    pub fn invoke<P, R>(&self, payload: P) -> R
    where
        F: Fn(P) -> R,
    {
        (self.0)(payload)
    }
}

impl<F> fmt::Debug for Handler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

impl<P, R, F> Slot<P, R> for Handler<F>
where
    F: Fn(P) -> R,
{
    fn call(&self, payload: P) -> Option<R> {
        Some(self.invoke(payload))
    }
}

/// A table in partial mode: the handlers in `arms` plus a fallback for every
/// variant they leave out.
///
/// Whatever a registered handler returns is the result, including an `Err`
/// when the output is a `Result`. The fallback only runs for variants without
/// a handler.
#[derive(Clone, Copy)]
pub struct Partial<A, D> {
    arms: A,
    fallback: D,
}

impl<A, D> Partial<A, D> {
    pub fn new(arms: A, fallback: D) -> Self {
        Partial { arms, fallback }
    }

    /// The registered handlers, without the fallback.
    pub fn arms(&self) -> &A {
        &self.arms
    }
}

impl<A: fmt::Debug, D> fmt::Debug for Partial<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partial")
            .field("arms", &self.arms)
            .finish_non_exhaustive()
    }
}

impl<E, A, D> Table<E> for Partial<A, D>
where
    E: Tagged,
    A: Arms<E>,
    D: Fn() -> A::Output,
{
    type Output = A::Output;

    fn apply(&self, value: E) -> Self::Output {
        let tag = value.tag();
        match self.arms.try_apply(value) {
            Some(output) => output,
            None => {
                tracing::trace!(?tag, "no handler for variant, running fallback");
                (self.fallback)()
            }
        }
    }
}

/// Runs `table` against `value`.
pub fn dispatch<E, T>(value: E, table: &T) -> T::Output
where
    T: Table<E> + ?Sized,
{
    table.apply(value)
}

/// [`dispatch`] with the table applied first, for use in iterator chains.
pub fn curried_dispatch<E, T>(table: T) -> impl Fn(E) -> T::Output
where
    T: Table<E>,
{
    move |value| table.apply(value)
}
