//! Expansion pipeline for `#[derive(Importable)]`: parse, then generate.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;
#[cfg(test)]
mod tests;

/// Expand the derive input into the trait implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::importable_impls(&parsed))
}
