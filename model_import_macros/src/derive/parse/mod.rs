//! Parsing of `#[import(...)]` attributes for the `Importable` derive.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

mod input;
mod literals;
mod rename;

pub(crate) use input::parse_input;
use literals::{flag, lit_path, lit_str};
pub(crate) use rename::RenameAll;

/// A struct accepted by the derive, with its attributes resolved.
pub(crate) struct ImportInput {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<ImportField>,
}

/// One named field and its attributes.
pub(crate) struct ImportField {
    pub ident: syn::Ident,
    /// Field name with any raw-identifier prefix removed.
    pub name: String,
    pub attrs: FieldAttrs,
}

#[derive(Default)]
pub(crate) struct StructAttrs {
    pub rename_all: Option<RenameAll>,
    /// The user implements `ImportHooks` by hand.
    pub hooks: bool,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Date handling requested on a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DateAttr {
    Iso8601,
    EpochSeconds,
    EpochMilliseconds,
    Format(String),
}

impl DateAttr {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "iso8601" => Ok(Self::Iso8601),
            "epoch_seconds" => Ok(Self::EpochSeconds),
            "epoch_milliseconds" => Ok(Self::EpochMilliseconds),
            other => Err(syn::Error::new(
                value.span(),
                format!(
                    "unknown date strategy '{other}'; expected one of \"iso8601\", \
\"epoch_seconds\", or \"epoch_milliseconds\", or use date_format"
                ),
            )),
        }
    }
}

/// Field-level attributes recognised by `#[derive(Importable)]`.
///
/// - `key` replaces the default JSON key; `alias` adds further candidates.
/// - `skip` leaves the field out of the descriptor.
/// - `flatten` merges the field type's descriptor into this one.
/// - `date` / `date_format` choose how date strings and numbers are parsed.
/// - `with` names a custom coercion hook.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub key: Option<LitStr>,
    pub aliases: Vec<LitStr>,
    pub skip: bool,
    pub flatten: bool,
    pub date: Option<DateAttr>,
    pub with: Option<syn::Path>,
}

/// Iterate all `#[import(...)]` attributes once and apply a callback.
fn parse_import<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("import")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn attr_name(meta: &ParseNestedMeta) -> Option<String> {
    meta.path.get_ident().map(ToString::to_string)
}

/// Extracts `#[import(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_import(attrs, |meta| match attr_name(meta).as_deref() {
        Some("rename_all") => {
            out.rename_all = Some(RenameAll::parse(&lit_str(meta, "rename_all")?)?);
            Ok(())
        }
        Some("hooks") => {
            out.hooks = flag(meta, "hooks")?;
            Ok(())
        }
        Some("crate") => {
            out.crate_path = Some(lit_path(meta, "crate")?);
            Ok(())
        }
        _ => Err(meta.error("unknown struct attribute; expected rename_all, hooks, or crate")),
    })?;
    Ok(out)
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    match attr_name(meta).as_deref() {
        Some("key") => out.key = Some(lit_str(meta, "key")?),
        Some("alias") => out.aliases.push(lit_str(meta, "alias")?),
        Some("skip") => out.skip = flag(meta, "skip")?,
        Some("flatten") => out.flatten = flag(meta, "flatten")?,
        Some("date") => set_date(out, meta, DateAttr::parse(&lit_str(meta, "date")?)?)?,
        Some("date_format") => {
            let format = lit_str(meta, "date_format")?;
            set_date(out, meta, DateAttr::Format(format.value()))?;
        }
        Some("with") => out.with = Some(lit_path(meta, "with")?),
        _ => {
            return Err(meta.error(
                "unknown field attribute; expected key, alias, skip, flatten, date, date_format, or with",
            ));
        }
    }
    Ok(())
}

fn set_date(out: &mut FieldAttrs, meta: &ParseNestedMeta, date: DateAttr) -> syn::Result<()> {
    if out.date.is_some() {
        return Err(meta.error("date and date_format may only be given once per field"));
    }
    out.date = Some(date);
    Ok(())
}

/// Parses field-level `#[import(...)]` attributes and rejects combinations
/// that cannot be honoured.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_import(&field.attrs, |meta| apply_field_attr(meta, &mut out))?;
    let keyed = out.key.is_some() || !out.aliases.is_empty();
    if out.flatten && (keyed || out.with.is_some() || out.date.is_some()) {
        return Err(syn::Error::new_spanned(
            field,
            "flatten cannot be combined with key, alias, with, date, or date_format",
        ));
    }
    if out.skip && (out.flatten || keyed || out.with.is_some() || out.date.is_some()) {
        return Err(syn::Error::new_spanned(
            field,
            "skip cannot be combined with other import attributes",
        ));
    }
    Ok(out)
}
