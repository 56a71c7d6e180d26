//! The handler table builder.
//!
//! `ListCases<__R, __SlotNil, __SlotCons>` starts with every slot set to
//! `Missing`. Each builder method swaps one slot for a `Handler`; `Table` is
//! only implemented once no slot is `Missing`, and `otherwise` wraps any
//! builder into a `Partial` table.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{ItemEnum, Result, Visibility};

use crate::common::VariantShape;

pub fn generate(
    cases: &Ident,
    vis: &Visibility,
    item_enum: &ItemEnum,
    shapes: &[VariantShape],
) -> Result<TokenStream> {
    let ident = &item_enum.ident;

    let methods = shapes
        .iter()
        .map(VariantShape::method)
        .collect::<Result<Vec<_>>>()?;
    check_method_names(&methods)?;

    let slots: Vec<Ident> = shapes
        .iter()
        .map(|shape| format_ident!("__Slot{}", shape.ident))
        .collect();
    let payload_tys: Vec<_> = shapes.iter().map(|shape| &shape.payload_ty).collect();
    let constructors: Vec<_> = shapes.iter().map(|shape| &shape.constructor).collect();
    let payloads: Vec<_> = shapes.iter().map(|shape| &shape.payload).collect();

    let doc = format!(
        "Handler table for [`{ident}`]. Fill every slot for an exhaustive table, \
         or finish with `otherwise` for a table with a fallback."
    );

    let setters = methods.iter().enumerate().map(|(i, method)| {
        let payload_ty = payload_tys[i];
        let result_slots = slots.iter().enumerate().map(|(j, slot)| {
            if i == j {
                quote!(::sum_tag::Handler<__F>)
            } else {
                quote!(#slot)
            }
        });
        let fields = methods.iter().enumerate().map(|(j, field)| {
            if i == j {
                quote!(#field: ::sum_tag::Handler::new(handler))
            } else {
                quote!(#field: self.#field)
            }
        });
        quote! {
            #vis fn #method<__F>(self, handler: __F) -> #cases<__R, #(#result_slots),*>
            where
                __F: Fn(#payload_ty) -> __R,
            {
                #cases {
                    #(#fields,)*
                    __output: ::core::marker::PhantomData,
                }
            }
        }
    });

    Ok(quote! {
        #[doc = #doc]
        #vis struct #cases<__R, #(#slots = ::sum_tag::Missing),*> {
            #(#methods: #slots,)*
            __output: ::core::marker::PhantomData<fn() -> __R>,
        }

        impl<__R> #cases<__R> {
            #vis fn new() -> Self {
                #cases {
                    #(#methods: ::sum_tag::Missing,)*
                    __output: ::core::marker::PhantomData,
                }
            }
        }

        impl<__R> ::core::default::Default for #cases<__R> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<__R, #(#slots),*> #cases<__R, #(#slots),*> {
            #(#setters)*

            /// Finishes the table with `fallback` for every variant left without a handler.
            #vis fn otherwise<__D>(self, fallback: __D) -> ::sum_tag::Partial<Self, __D>
            where
                __D: Fn() -> __R,
            {
                ::sum_tag::Partial::new(self, fallback)
            }
        }

        impl<__R, #(#slots),*> ::sum_tag::Arms<#ident> for #cases<__R, #(#slots),*>
        where
            #(#slots: ::sum_tag::Slot<#payload_tys, __R>,)*
        {
            type Output = __R;

            fn try_apply(&self, value: #ident) -> ::core::option::Option<__R> {
                match value {
                    #(#constructors => ::sum_tag::Slot::call(&self.#methods, #payloads),)*
                }
            }
        }

        impl<__R, #(#slots),*> ::sum_tag::Table<#ident>
            for #cases<__R, #(::sum_tag::Handler<#slots>),*>
        where
            #(#slots: Fn(#payload_tys) -> __R,)*
        {
            type Output = __R;

            fn apply(&self, value: #ident) -> __R {
                match value {
                    #(#constructors => self.#methods.invoke(#payloads),)*
                }
            }
        }

        impl #ident {
            /// An empty handler table for this type.
            #vis fn cases<__R>() -> #cases<__R> {
                #cases::new()
            }
        }
    })
}

/// Builder methods share one namespace with `new` and `otherwise`.
fn check_method_names(methods: &[Ident]) -> Result<()> {
    let mut seen: Vec<String> = Vec::with_capacity(methods.len());
    for method in methods {
        let name = method.to_string();
        if matches!(name.as_str(), "new" | "otherwise") {
            return Err(syn::Error::new(
                method.span(),
                format!("variant maps to table method `{name}`, which the table already defines"),
            ));
        }
        if seen.contains(&name) {
            return Err(syn::Error::new(
                method.span(),
                format!("two variants map to the same table method `{name}`"),
            ));
        }
        seen.push(name);
    }
    Ok(())
}
