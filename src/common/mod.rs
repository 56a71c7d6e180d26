use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{
    ext::IdentExt, punctuated::Punctuated, visit_mut::VisitMut, Error, Expr, ExprLit, Fields,
    Lit, Meta, MetaList, MetaNameValue, Result, Token, Type, Variant,
};

pub type Args = Punctuated<Meta, Token![,]>;
pub fn ident(arg: &Meta) -> Result<&Ident> {
    let path = arg.path();
    path.get_ident()
        .ok_or_else(|| Error::new_spanned(path, "must be a bare identifier"))
}

pub fn fill_empty_or_else<T>(
    opt: &mut Option<T>,
    new: T,
    err: impl FnOnce(&T, T) -> Error,
) -> Result<()> {
    match opt {
        Some(old) => Err(err(old, new)),
        None => {
            *opt = Some(new);
            Ok(())
        }
    }
}

/// Accepts `name(Ident)` or `name = "Ident"`, the two spellings every naming
/// parameter supports.
pub fn ident_value(arg: Meta, allow_empty: bool) -> Result<String> {
    let name = ident(&arg)?.to_string();
    let error = |tokens: &dyn ToTokens| {
        Error::new_spanned(
            tokens,
            format!(r#"valid forms are `{name}(Ident)` or `{name} = "Ident"`"#),
        )
    };
    match &arg {
        Meta::List(MetaList { tokens, .. }) => {
            let id: Ident = syn::parse2(tokens.clone()).map_err(|mut err| {
                err.combine(error(tokens));
                err
            })?;
            Ok(id.unraw().to_string())
        }
        Meta::NameValue(MetaNameValue {
            value: Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }),
            ..
        }) => {
            let value = s.value();
            let valid = if value.is_empty() {
                allow_empty
            } else {
                syn::parse_str::<Ident>(&value).is_ok()
            };
            if valid {
                Ok(value)
            } else {
                Err(Error::new_spanned(s, format!("`{value}` is not a valid identifier")))
            }
        }
        _ => Err(error(&arg)),
    }
}

/// How a variant's fields map onto its payload.
///
/// The same binder tokens are used as a pattern and as an expression: `Unit`
/// for no fields, `__f0` for one, `(__f0, __f1, ..)` for several.
pub struct VariantShape {
    pub ident: Ident,
    pub payload_ty: Type,
    /// `Enum::Variant(__f0, ..)` or `Enum::Variant { a: __f0, .. }`.
    pub constructor: TokenStream,
    pub payload: TokenStream,
}

impl VariantShape {
    pub fn new(enum_ident: &Ident, variant: &Variant) -> Self {
        let id = variant.ident.clone();
        let bindings: Vec<Ident> = (0..variant.fields.len())
            .map(|i| format_ident!("__f{}", i))
            .collect();

        let mut types: Vec<Type> = variant.fields.iter().map(|f| f.ty.clone()).collect();
        let mut replace = ReplaceSelf(enum_ident);
        types.iter_mut().for_each(|ty| replace.visit_type_mut(ty));

        let constructor = match &variant.fields {
            Fields::Unit => quote!(#enum_ident::#id),
            Fields::Unnamed(_) => quote!(#enum_ident::#id(#(#bindings),*)),
            Fields::Named(named) => {
                let names = named.named.iter().map(|f| &f.ident);
                quote!(#enum_ident::#id { #(#names: #bindings),* })
            }
        };

        let (payload_ty, payload) = match types.len() {
            0 => (syn::parse_quote!(::sum_tag::Unit), quote!(::sum_tag::Unit)),
            1 => (types.remove(0), bindings[0].to_token_stream()),
            _ => (syn::parse_quote!((#(#types),*)), quote!((#(#bindings),*))),
        };

        VariantShape {
            ident: id,
            payload_ty,
            constructor,
            payload,
        }
    }

    /// Name of the table method that registers this variant's handler.
    pub fn method(&self) -> Result<Ident> {
        let snake = snake_case(&self.ident.unraw().to_string());
        let span = self.ident.span();
        match snake.as_str() {
            "self" | "super" | "crate" | "_" => Err(Error::new(
                span,
                format!("variant name maps to reserved method name `{snake}`"),
            )),
            s if is_keyword(s) => Ok(Ident::new_raw(s, span)),
            s => Ok(Ident::new(s, span)),
        }
    }
}

/// `Self` inside a variant's field types means the enum, but the generated
/// impls are for other types.
struct ReplaceSelf<'a>(&'a Ident);
impl VisitMut for ReplaceSelf<'_> {
    fn visit_ident_mut(&mut self, i: &mut Ident) {
        if i == "Self" {
            *i = Ident::new(&self.0.to_string(), i.span());
        }
    }
}

pub fn snake_case(camel: &str) -> String {
    let chars: Vec<char> = camel.chars().collect();
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) => p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()),
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// syn refuses to parse keywords, reserved words included, as an `Ident`.
fn is_keyword(s: &str) -> bool {
    syn::parse_str::<Ident>(s).is_err()
}
