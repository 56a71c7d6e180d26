use proc_macro::TokenStream;
use syn::{parse_macro_input, Result};

mod common;

mod cases;
mod sum_type;
mod tagged;
mod variant_of;

#[inline]
fn result_of(doit: Result<impl Into<TokenStream>>) -> TokenStream {
    match doit {
        Ok(token_stream) => token_stream.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Turns an enum into a closed sum type with handler tables.
///
/// The enum is emitted unchanged. Next to it the macro generates (for an enum
/// `List`, with the default names):
/// - `ListTag`, a fieldless copy of the variant names with `ALL`, `name()`,
///   `Display` and `FromStr`, and `impl sum_tag::Tagged for List`;
/// - one unit struct per variant (`ListNil`, `ListCons`, ...) implementing
///   `sum_tag::VariantOf`, for use with `sum_tag::construct` and
///   `sum_tag::construct_with`;
/// - `ListCases<R, ..>`, a handler table builder with one method per variant
///   (the variant name in snake_case) and `otherwise(fallback)`, plus the
///   `List::cases()` shorthand.
///
/// A variant's payload is `sum_tag::Unit` if it has no fields, the field's
/// type if it has one, and a tuple of the field types (in declaration order)
/// otherwise.
///
/// Takes arguments in the same format as other proc_macro_attribute, eg.
/// `#[sum_type(prefix = "", suffix(Case), tag(generate(Kind)), cases(ListArms))]`.
///
/// Valid arguments:
/// - `prefix`: prepended to the marker struct names, defaults to the enum name.
/// - `suffix`: appended to the marker struct names.
/// - `tag`: one of
///     - `tag(generate())`: the default, generates `<Enum>Tag`
///     - `tag(generate(Name))`: generates the tag enum under another name
///     - `tag(path::To::Existing)`: reuses an existing fieldless enum with the
///       same variant names; nothing is generated for it. It must be
///       `Copy + Eq + Debug + 'static`, as `sum_tag::Tagged::Tag` requires.
/// - `cases`: name of the table builder, defaults to `<Enum>Cases`.
///
/// The generated names must not clash with each other or with the enum, and
/// `#[cfg]` is not supported on variants or their fields; both are reported
/// as errors on the offending item.
///
/// ```
/// use sum_macros::sum_type;
/// use sum_tag::{construct, construct_with, dispatch};
///
/// #[sum_type]
/// #[derive(Debug, PartialEq)]
/// enum List {
///     Nil,
///     Cons(i32, Box<List>),
/// }
///
/// let list = construct_with(ListCons, (1, Box::new(construct(ListNil))));
/// let head = List::cases().nil(|_| 0).cons(|(h, _)| h);
/// assert_eq!(dispatch(list, &head), 1);
///
/// let or_minus_one = List::cases().cons(|(h, _)| h).otherwise(|| -1);
/// assert_eq!(dispatch(construct(ListNil), &or_minus_one), -1);
/// ```
///
/// A table with a missing handler and no fallback is not a `Table`:
///
/// ```compile_fail
/// use sum_macros::sum_type;
/// use sum_tag::{construct, dispatch};
///
/// #[sum_type]
/// enum List {
///     Nil,
///     Cons(i32, Box<List>),
/// }
///
/// let head = List::cases().cons(|(h, _)| h);
/// dispatch(construct(ListNil), &head);
/// ```
#[proc_macro_attribute]
pub fn sum_type(args: TokenStream, input: TokenStream) -> TokenStream {
    result_of(sum_type::doit(args.into(), parse_macro_input!(input)))
}
