//! Input parsing for the `Importable` derive macro.
//!
//! Gathers the struct identifier, its fields, and all attribute metadata in
//! one pass so expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, ImportField, ImportInput, parse_field_attrs, parse_struct_attrs};

/// Validate `input` and collect everything code generation needs.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ImportInput> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Importable cannot be derived for generic structs",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Importable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Importable can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let field_attrs: FieldAttrs = parse_field_attrs(field)?;
        fields.push(ImportField {
            name: field_ident.unraw().to_string(),
            ident: field_ident,
            attrs: field_attrs,
        });
    }
    Ok(ImportInput {
        ident,
        attrs,
        fields,
    })
}
