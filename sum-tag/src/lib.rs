//! Runtime half of `sum-macros`.
//!
//! An enum annotated with `#[sum_type]` gets a tag enum, one marker type per
//! variant and a handler table builder. The traits those items implement live
//! here, together with the three operations every sum type supports:
//!
//! - [`construct`] / [`construct_with`] build a value from a variant marker,
//! - [`dispatch`] runs a handler table against a value,
//! - [`curried_dispatch`] turns a table into a plain `Fn(Enum) -> R`.
//!
//! A table is either exhaustive (every variant has a handler) or partial with
//! a fallback ([`Partial`]). The mode is part of the table's type, so nothing
//! is decided by inspecting the table at runtime.

mod error;
mod table;

pub use error::ParseTagError;
pub use table::{curried_dispatch, dispatch, Arms, Handler, Missing, Partial, Slot, Table};

use std::fmt::Debug;

/// Payload of a variant that carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Unit;

/// A closed sum type whose values expose a tag.
pub trait Tagged: Sized {
    type Tag: Copy + Eq + Debug + 'static;

    /// Every tag of the sum type, in declaration order.
    const TAGS: &'static [Self::Tag];

    fn tag(&self) -> Self::Tag;
}

/// Marker for one variant of a [`Tagged`] enum.
///
/// `V::project(v.inject(p))` is `Ok(p)`, and `project` hands back any value
/// whose tag is not [`VariantOf::TAG`].
pub trait VariantOf: Sized {
    type Enum: Tagged;
    type Payload;

    const TAG: <Self::Enum as Tagged>::Tag;

    fn inject(self, payload: Self::Payload) -> Self::Enum;

    fn project(value: Self::Enum) -> Result<Self::Payload, Self::Enum>;
}

/// Builds a value of a variant that carries no data.
pub fn construct<V>(variant: V) -> V::Enum
where
    V: VariantOf<Payload = Unit>,
{
    variant.inject(Unit)
}

/// Builds a value of `variant` carrying `payload`.
pub fn construct_with<V: VariantOf>(variant: V, payload: V::Payload) -> V::Enum {
    variant.inject(payload)
}

#[cfg(test)]
pub(crate) mod fixture {
    //! A hand-expanded sum type, shaped like the macro output, so the runtime
    //! crate can be tested on its own.

    use crate::{Arms, Handler, Missing, Partial, Slot, Table, Tagged, Unit, VariantOf};
    use std::marker::PhantomData;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Shape {
        Empty,
        Circle(f64),
        Rect(f64, f64),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ShapeTag {
        Empty,
        Circle,
        Rect,
    }

    impl Tagged for Shape {
        type Tag = ShapeTag;
        const TAGS: &'static [ShapeTag] =
            &[ShapeTag::Empty, ShapeTag::Circle, ShapeTag::Rect];

        fn tag(&self) -> ShapeTag {
            match self {
                Shape::Empty => ShapeTag::Empty,
                Shape::Circle(..) => ShapeTag::Circle,
                Shape::Rect(..) => ShapeTag::Rect,
            }
        }
    }

    pub struct ShapeEmpty;
    pub struct ShapeCircle;
    pub struct ShapeRect;

    impl VariantOf for ShapeEmpty {
        type Enum = Shape;
        type Payload = Unit;
        const TAG: ShapeTag = ShapeTag::Empty;

        fn inject(self, _: Unit) -> Shape {
            Shape::Empty
        }

        fn project(value: Shape) -> Result<Unit, Shape> {
            match value {
                Shape::Empty => Ok(Unit),
                other => Err(other),
            }
        }
    }

    impl VariantOf for ShapeCircle {
        type Enum = Shape;
        type Payload = f64;
        const TAG: ShapeTag = ShapeTag::Circle;

        fn inject(self, radius: f64) -> Shape {
            Shape::Circle(radius)
        }

        fn project(value: Shape) -> Result<f64, Shape> {
            match value {
                Shape::Circle(radius) => Ok(radius),
                other => Err(other),
            }
        }
    }

    impl VariantOf for ShapeRect {
        type Enum = Shape;
        type Payload = (f64, f64);
        const TAG: ShapeTag = ShapeTag::Rect;

        fn inject(self, (w, h): (f64, f64)) -> Shape {
            Shape::Rect(w, h)
        }

        fn project(value: Shape) -> Result<(f64, f64), Shape> {
            match value {
                Shape::Rect(w, h) => Ok((w, h)),
                other => Err(other),
            }
        }
    }

    pub struct ShapeCases<R, E = Missing, C = Missing, Rc = Missing> {
        pub empty: E,
        pub circle: C,
        pub rect: Rc,
        pub _output: PhantomData<fn() -> R>,
    }

    impl<R> ShapeCases<R> {
        pub fn new() -> Self {
            ShapeCases {
                empty: Missing,
                circle: Missing,
                rect: Missing,
                _output: PhantomData,
            }
        }
    }

    impl<R, E, C, Rc> ShapeCases<R, E, C, Rc> {
        pub fn empty<F: Fn(Unit) -> R>(self, f: F) -> ShapeCases<R, Handler<F>, C, Rc> {
            ShapeCases {
                empty: Handler::new(f),
                circle: self.circle,
                rect: self.rect,
                _output: PhantomData,
            }
        }

        pub fn circle<F: Fn(f64) -> R>(self, f: F) -> ShapeCases<R, E, Handler<F>, Rc> {
            ShapeCases {
                empty: self.empty,
                circle: Handler::new(f),
                rect: self.rect,
                _output: PhantomData,
            }
        }

        pub fn rect<F: Fn((f64, f64)) -> R>(self, f: F) -> ShapeCases<R, E, C, Handler<F>> {
            ShapeCases {
                empty: self.empty,
                circle: self.circle,
                rect: Handler::new(f),
                _output: PhantomData,
            }
        }

        pub fn otherwise<D: Fn() -> R>(self, fallback: D) -> Partial<Self, D> {
            Partial::new(self, fallback)
        }
    }

    impl<R, E, C, Rc> Arms<Shape> for ShapeCases<R, E, C, Rc>
    where
        E: Slot<Unit, R>,
        C: Slot<f64, R>,
        Rc: Slot<(f64, f64), R>,
    {
        type Output = R;

        fn try_apply(&self, value: Shape) -> Option<R> {
            match value {
                Shape::Empty => self.empty.call(Unit),
                Shape::Circle(r) => self.circle.call(r),
                Shape::Rect(w, h) => self.rect.call((w, h)),
            }
        }
    }

    impl<R, E, C, Rc> Table<Shape> for ShapeCases<R, Handler<E>, Handler<C>, Handler<Rc>>
    where
        E: Fn(Unit) -> R,
        C: Fn(f64) -> R,
        Rc: Fn((f64, f64)) -> R,
    {
        type Output = R;

        fn apply(&self, value: Shape) -> R {
            match value {
                Shape::Empty => self.empty.invoke(Unit),
                Shape::Circle(r) => self.circle.invoke(r),
                Shape::Rect(w, h) => self.rect.invoke((w, h)),
            }
        }
    }
}
