use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{Attribute, ItemEnum, Visibility};

use crate::{common::VariantShape, tagged::Tag};

/// One zero-sized marker per variant, implementing `VariantOf`.
pub fn generate(
    tag: &Tag,
    vis: &Visibility,
    item_enum: &ItemEnum,
    shapes: &[VariantShape],
    map_ident: &dyn Fn(&Ident) -> Ident,
) -> TokenStream {
    let ident = &item_enum.ident;

    let markers = item_enum.variants.iter().zip(shapes).map(|(variant, shape)| {
        let VariantShape {
            ident: id,
            payload_ty,
            constructor,
            payload,
        } = shape;
        let marker = map_ident(id);
        let docs = variant
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .collect::<Vec<&Attribute>>();

        quote! {
            #(#docs)*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            #vis struct #marker;

            impl ::sum_tag::VariantOf for #marker {
                type Enum = #ident;
                type Payload = #payload_ty;

                const TAG: #tag = #tag::#id;

                fn inject(self, payload: #payload_ty) -> #ident {
                    let #payload = payload;
                    #constructor
                }

                #[allow(unreachable_patterns)]
                fn project(value: #ident) -> ::core::result::Result<#payload_ty, #ident> {
                    match value {
                        #constructor => ::core::result::Result::Ok(#payload),
                        other => ::core::result::Result::Err(other),
                    }
                }
            }
        }
    });

    quote!(#(#markers)*)
}
