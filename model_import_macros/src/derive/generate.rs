//! Token generation for `#[derive(Importable)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::crate_path;
use super::parse::{DateAttr, ImportField, ImportInput, RenameAll};

/// Emit the `Importable`, `Coerce` and (unless opted out) `ImportHooks`
/// implementations for `input`.
pub(crate) fn importable_impls(input: &ImportInput) -> TokenStream {
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let ident = &input.ident;
    let steps = input
        .fields
        .iter()
        .filter(|field| !field.attrs.skip)
        .map(|field| describe_step(field, input.attrs.rename_all, &krate));
    let hooks = (!input.attrs.hooks).then(|| quote! { impl #krate::ImportHooks for #ident {} });

    quote! {
        impl #krate::Importable for #ident {
            fn describe() -> #krate::DescriptorBuilder<Self> {
                #krate::DescriptorBuilder::new()
                    #( #steps )*
            }
        }

        impl #krate::Coerce for #ident {
            fn semantic_type() -> #krate::SemanticType {
                #krate::SemanticType::Object(::core::stringify!(#ident))
            }

            fn coerce(
                value: &#krate::serde_json::Value,
                ctx: &#krate::ImportContext<'_>,
            ) -> #krate::ImportResult<#krate::Coercion<Self>> {
                #krate::coerce_object::<Self>(value, ctx)
            }
        }

        #hooks
    }
}

/// One builder call: `.flatten(..)` or `.property(..)`.
fn describe_step(field: &ImportField, rename_all: Option<RenameAll>, krate: &TokenStream) -> TokenStream {
    let member = &field.ident;
    let access = quote! { |this: &mut Self| &mut this.#member };
    if field.attrs.flatten {
        return quote! { .flatten(#access) };
    }

    let name = &field.name;
    let constructor = field.attrs.with.as_ref().map_or_else(
        || quote! { #krate::Property::new(#name, #access) },
        |hook| quote! { #krate::Property::with_hook(#name, #access, #hook) },
    );
    let primary = field.attrs.key.as_ref().map_or_else(
        || rename_all.map_or_else(|| name.clone(), |rule| rule.apply(name)),
        syn::LitStr::value,
    );
    let aliases = field.attrs.aliases.iter().map(syn::LitStr::value);
    let date = field.attrs.date.as_ref().map(|date| {
        let strategy = date_strategy(date, krate);
        quote! { .date_strategy(#strategy) }
    });

    quote! {
        .property(
            #constructor
                .key(#primary)
                #( .key(#aliases) )*
                #date
        )
    }
}

fn date_strategy(date: &DateAttr, krate: &TokenStream) -> TokenStream {
    match date {
        DateAttr::Iso8601 => quote! { #krate::DateStrategy::Iso8601 },
        DateAttr::EpochSeconds => quote! { #krate::DateStrategy::EpochSeconds },
        DateAttr::EpochMilliseconds => quote! { #krate::DateStrategy::EpochMilliseconds },
        DateAttr::Format(format) => {
            quote! { #krate::DateStrategy::Format(::std::string::String::from(#format)) }
        }
    }
}
