use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{parse::Parser, Error, ItemEnum, Result};

use tap::prelude::*;

use crate::{
    cases,
    common::{fill_empty_or_else, ident, ident_value, Args, VariantShape},
    tagged::{self, Tag, TagParam},
    variant_of,
};

pub fn doit(args: TokenStream, item_enum: ItemEnum) -> Result<TokenStream> {
    let params = Args::parse_terminated
        .parse2(args)?
        .pipe(Params::try_from)?;
    validate(&item_enum)?;
    let Config {
        map_ident,
        tag,
        cases,
    } = Config::new(params, &item_enum);
    check_type_names(&item_enum, &tag, &cases, &*map_ident)?;

    let ItemEnum {
        vis,
        ident,
        variants,
        ..
    } = &item_enum;

    let shapes: Vec<VariantShape> = variants
        .iter()
        .map(|variant| VariantShape::new(ident, variant))
        .collect();

    let tagged = tagged::generate(&tag, vis, &item_enum, &shapes);
    let markers = variant_of::generate(&tag, vis, &item_enum, &shapes, &*map_ident);
    let table = cases::generate(&cases, vis, &item_enum, &shapes)?;

    Ok(quote! {
        #item_enum
        #tagged
        #markers
        #table
    })
}

fn validate(item_enum: &ItemEnum) -> Result<()> {
    let generics = &item_enum.generics;
    if generics.lt_token.is_some() || generics.where_clause.is_some() {
        return Err(Error::new_spanned(
            generics,
            "`sum_type` does not support generic parameters",
        ));
    }
    if item_enum.variants.is_empty() {
        return Err(Error::new_spanned(
            &item_enum.ident,
            "`sum_type` needs at least one variant",
        ));
    }
    for variant in &item_enum.variants {
        let cfg = variant
            .attrs
            .iter()
            .chain(variant.fields.iter().flat_map(|field| &field.attrs))
            .find(|attr| attr.path().is_ident("cfg"));
        if let Some(attr) = cfg {
            return Err(Error::new_spanned(
                attr,
                "`sum_type` does not support `#[cfg]` on variants or their fields; gate the whole enum instead",
            ));
        }
    }
    Ok(())
}

/// The enum, its tag, its table and every marker live in one type namespace.
fn check_type_names(
    item_enum: &ItemEnum,
    tag: &Tag,
    cases: &Ident,
    map_ident: &dyn Fn(&Ident) -> Ident,
) -> Result<()> {
    let enum_ident = &item_enum.ident;
    let mut taken: Vec<(String, String)> =
        vec![(enum_ident.to_string(), format!("the enum `{enum_ident}`"))];
    let mut claim = |name: Ident, what: &str, at: &dyn ToTokens| -> Result<()> {
        let key = name.to_string();
        if let Some((_, owner)) = taken.iter().find(|(other, _)| *other == key) {
            return Err(Error::new_spanned(
                at,
                format!("{what} `{key}` collides with {owner}"),
            ));
        }
        taken.push((key, format!("{what} `{name}`")));
        Ok(())
    };

    match tag {
        Tag::Generate(tag_ident) => claim(tag_ident.clone(), "generated tag enum", enum_ident)?,
        Tag::Existing(path) => {
            if let Some(tag_ident) = path.get_ident() {
                claim(tag_ident.clone(), "tag enum", path)?;
            }
        }
    }
    claim(cases.clone(), "generated table", enum_ident)?;
    for variant in &item_enum.variants {
        claim(map_ident(&variant.ident), "marker", &variant.ident)?;
    }
    Ok(())
}

struct Config {
    map_ident: Box<dyn Fn(&Ident) -> Ident>,
    tag: Tag,
    cases: Ident,
}
impl Config {
    fn new(
        Params {
            prefix,
            suffix,
            tag,
            cases,
        }: Params,
        item_enum: &ItemEnum,
    ) -> Self {
        let prefix = prefix.unwrap_or_else(|| item_enum.ident.to_string());
        let suffix = suffix.unwrap_or_default();
        Self {
            map_ident: Box::new(move |vid| format_ident!("{}{}{}", prefix, vid, suffix)),
            tag: TagParam::resolve(tag, item_enum),
            cases: cases
                .map(|name| format_ident!("{}", name))
                .unwrap_or_else(|| format_ident!("{}Cases", item_enum.ident)),
        }
    }
}

#[derive(Default)]
struct Params {
    /// Prepended to the variant ident to name its marker. Defaults to the
    /// enum ident; `prefix = ""` drops it.
    prefix: Option<String>,
    suffix: Option<String>,
    tag: Option<TagParam>,
    cases: Option<String>,
}

impl TryFrom<Args> for Params {
    type Error = Error;
    fn try_from(args: Args) -> std::result::Result<Self, Self::Error> {
        let mut params = Params::default();
        for arg in args {
            let key = ident(&arg)?.clone();
            match key.to_string().as_str() {
                "prefix" => fill_empty_or_else(
                    &mut params.prefix,
                    ident_value(arg, true)?,
                    duplicate(&key),
                )?,
                "suffix" => fill_empty_or_else(
                    &mut params.suffix,
                    ident_value(arg, true)?,
                    duplicate(&key),
                )?,
                "cases" => fill_empty_or_else(
                    &mut params.cases,
                    ident_value(arg, false)?,
                    duplicate(&key),
                )?,
                "tag" => {
                    fill_empty_or_else(&mut params.tag, TagParam::parse(arg)?, duplicate(&key))?
                }
                _ => Err(Error::new_spanned(
                    &key,
                    "sum_type: unrecognized parameter",
                ))?,
            }
        }
        Ok(params)
    }
}

fn duplicate<T>(key: &Ident) -> impl FnOnce(&T, T) -> Error + '_ {
    move |_, _| Error::new_spanned(key, "duplicate parameter")
}
