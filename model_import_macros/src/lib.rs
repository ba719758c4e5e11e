//! Procedural macros for `model_import`.
//!
//! `#[derive(Importable)]` turns a struct with named fields into an
//! importable model: each field becomes a property of the type descriptor,
//! in declaration order, keyed by the field name unless `#[import(...)]`
//! attributes say otherwise. The derive also implements `Coerce`, so the
//! struct can nest inside other models, and an empty `ImportHooks` impl
//! unless the struct opts out with `#[import(hooks)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `model_import::Importable`.
///
/// Struct attributes: `rename_all = "..."`, `hooks`, `crate = "..."`.
/// Field attributes: `key = "..."`, `alias = "..."`, `skip`, `flatten`,
/// `date = "iso8601" | "epoch_seconds" | "epoch_milliseconds"`,
/// `date_format = "..."`, `with = "path::to::hook"`.
#[proc_macro_derive(Importable, attributes(import))]
pub fn derive_importable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
