//! Literal parsing helpers for `#[import(...)]` attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitBool, LitStr, Token};

/// Parse the literal after `key =`, rejecting other literal kinds with a
/// message naming `expected`.
fn parse_lit<T, F>(meta: &ParseNestedMeta, key: &str, expected: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses `key = "..."`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a bare flag (`hooks`) or an explicit `hooks = true`.
pub(crate) fn flag(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if !meta.input.peek(Token![=]) {
        return Ok(true);
    }
    parse_lit(meta, key, "boolean", |lit| match lit {
        Lit::Bool(LitBool { value, .. }) => Some(value),
        _ => None,
    })
}

/// Parses `key = "path::to::item"` into a path.
pub(crate) fn lit_path(meta: &ParseNestedMeta, key: &str) -> syn::Result<syn::Path> {
    let s = lit_str(meta, key)?;
    s.parse::<syn::Path>()
        .map_err(|err| syn::Error::new(s.span(), format!("{key} must name a path: {err}")))
}
