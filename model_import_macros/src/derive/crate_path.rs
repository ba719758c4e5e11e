//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[import(crate = "...")]` attribute value into the
//! tokens that prefix every runtime path in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the runtime crate path, defaulting to `model_import`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::model_import }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    use super::resolve;

    #[rstest]
    #[case::default(None, ":: model_import")]
    #[case::custom(Some("importer"), "importer")]
    #[case::nested(Some("deps::model_import"), "deps :: model_import")]
    fn resolve_produces_expected_tokens(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input
            .map(syn::parse_str::<syn::Path>)
            .transpose()
            .map_err(|err| anyhow!(err))?;
        let tokens = resolve(parsed.as_ref());
        ensure!(tokens.to_string() == expected, "got {tokens}");
        Ok(())
    }
}
