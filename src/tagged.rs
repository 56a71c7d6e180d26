use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, ToTokens};
use syn::{ext::IdentExt, ItemEnum, Meta, MetaList, Path, Result, Visibility};

use crate::common::VariantShape;

const TAG_VALID_FORMS: &str =
    "valid forms are `tag(PathTo::ExistingEnum)`, `tag(generate())`, or `tag(generate(NameOfEnumToBeGenerated))`";

pub enum Tag {
    Generate(Ident),
    Existing(Path),
}
impl ToTokens for Tag {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Tag::Generate(ident) => ident.to_tokens(tokens),
            Tag::Existing(path) => path.to_tokens(tokens),
        }
    }
}

/// What `tag(...)` asked for; `Generate(None)` keeps the default name.
pub enum TagParam {
    Generate(Option<Ident>),
    Existing(Path),
}

impl TagParam {
    pub fn parse(arg: Meta) -> Result<Self> {
        let error = |tokens: &dyn ToTokens| syn::Error::new_spanned(tokens, TAG_VALID_FORMS);
        let MetaList { tokens, .. } = match arg {
            Meta::List(list) => list,
            other => return Err(error(&other)),
        };
        match syn::parse2::<Meta>(tokens.clone()).map_err(|_| error(&tokens))? {
            Meta::Path(path) => Ok(TagParam::Existing(path)),
            Meta::List(MetaList { path, tokens, .. }) => {
                if !path.is_ident("generate") {
                    return Err(error(&path));
                }
                if tokens.is_empty() {
                    Ok(TagParam::Generate(None))
                } else {
                    let ident: Ident = syn::parse2(tokens.clone()).map_err(|_| {
                        syn::Error::new_spanned(&tokens, "must be a bare identifier")
                    })?;
                    Ok(TagParam::Generate(Some(ident)))
                }
            }
            other => Err(error(&other)),
        }
    }

    pub fn resolve(param: Option<TagParam>, item_enum: &ItemEnum) -> Tag {
        match param {
            Some(TagParam::Existing(path)) => Tag::Existing(path),
            Some(TagParam::Generate(Some(ident))) => Tag::Generate(ident),
            Some(TagParam::Generate(None)) | None => Tag::Generate(Ident::new(
                &format!("{}Tag", item_enum.ident),
                Span::call_site(),
            )),
        }
    }
}

pub fn generate(
    tag: &Tag,
    vis: &Visibility,
    item_enum: &ItemEnum,
    shapes: &[VariantShape],
) -> TokenStream {
    let ident = &item_enum.ident;
    let variant_ids: Vec<&Ident> = shapes.iter().map(|shape| &shape.ident).collect();
    let count = variant_ids.len();

    let generated_tag = match tag {
        Tag::Generate(tag_ident) => {
            let names: Vec<String> = variant_ids
                .iter()
                .map(|id| id.unraw().to_string())
                .collect();
            let sum_name = ident.to_string();
            let doc = format!("Tag of [`{ident}`].");
            quote! {
                #[doc = #doc]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
                #vis enum #tag_ident {
                    #(#variant_ids),*
                }

                impl #tag_ident {
                    /// Every tag, in declaration order.
                    #vis const ALL: [#tag_ident; #count] = [#(#tag_ident::#variant_ids),*];

                    /// The variant identifier this tag stands for.
                    #vis const fn name(self) -> &'static str {
                        match self {
                            #(#tag_ident::#variant_ids => #names),*
                        }
                    }
                }

                impl ::core::fmt::Display for #tag_ident {
                    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                        f.write_str(self.name())
                    }
                }

                impl ::core::str::FromStr for #tag_ident {
                    type Err = ::sum_tag::ParseTagError;

                    fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                        match s {
                            #(#names => ::core::result::Result::Ok(#tag_ident::#variant_ids),)*
                            _ => ::core::result::Result::Err(
                                ::sum_tag::ParseTagError::new(#sum_name, s),
                            ),
                        }
                    }
                }
            }
        }
        Tag::Existing(_) => quote!(),
    };

    let patterns = variant_ids.iter().map(|id| quote!(#ident::#id { .. }));
    quote! {
        #generated_tag

        impl ::sum_tag::Tagged for #ident {
            type Tag = #tag;

            const TAGS: &'static [#tag] = &[#(#tag::#variant_ids),*];

            fn tag(&self) -> #tag {
                match self {
                    #(#patterns => #tag::#variant_ids),*
                }
            }
        }
    }
}
