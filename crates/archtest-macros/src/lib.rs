//! # archtest-macros
//!
//! Procedural macros for running archtest under `cargo test`.
//!
//! Use through the facade crate as `archtest::check!()`.

#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, Lit, LitStr, MetaNameValue, Token};

/// Generates a `#[test]` that validates the configured patterns and rules.
///
/// Accepted arguments, all optional:
///
/// - `config = "path/to/archtest.toml"`: relative to the workspace root
/// - `fail_on = "error" | "warning" | "info"`: overrides the config threshold
///
/// ```rust,ignore
/// // tests/architecture.rs
/// archtest::check!();
/// archtest::check!(config = "arch/strict.toml", fail_on = "warning");
/// ```
#[proc_macro]
pub fn check(input: TokenStream) -> TokenStream {
    match expand_check(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[derive(Debug, Default)]
struct CheckArgs {
    config: Option<LitStr>,
    fail_on: Option<LitStr>,
}

fn parse_args(input: TokenStream2) -> syn::Result<CheckArgs> {
    let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(input)?;
    let mut args = CheckArgs::default();
    for pair in pairs {
        let value = match &pair.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => s.clone(),
            other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
        };
        let slot = if pair.path.is_ident("config") {
            &mut args.config
        } else if pair.path.is_ident("fail_on") {
            &mut args.fail_on
        } else {
            return Err(syn::Error::new_spanned(
                &pair.path,
                "unknown argument, expected `config` or `fail_on`",
            ));
        };
        if slot.is_some() {
            return Err(syn::Error::new_spanned(&pair.path, "duplicate argument"));
        }
        *slot = Some(value);
    }
    Ok(args)
}

fn optional(value: Option<&LitStr>) -> TokenStream2 {
    match value {
        Some(s) => quote!(::core::option::Option::Some(#s)),
        None => quote!(::core::option::Option::None),
    }
}

fn expand_check(input: TokenStream2) -> syn::Result<TokenStream2> {
    let args = parse_args(input)?;
    let config = optional(args.config.as_ref());
    let fail_on = optional(args.fail_on.as_ref());
    Ok(quote! {
        #[test]
        fn archtest_check() {
            ::archtest::__internal::run_check(#config, #fail_on);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_uses_defaults() {
        let args = parse_args(TokenStream2::new()).unwrap();
        assert!(args.config.is_none());
        assert!(args.fail_on.is_none());
    }

    #[test]
    fn both_arguments_with_trailing_comma() {
        let args = parse_args(quote!(config = "a.toml", fail_on = "warning",)).unwrap();
        assert_eq!(args.config.unwrap().value(), "a.toml");
        assert_eq!(args.fail_on.unwrap().value(), "warning");
    }

    #[test]
    fn rejects_unknown_duplicate_and_non_string() {
        assert!(parse_args(quote!(preset = "strict")).is_err());
        assert!(parse_args(quote!(config = "a", config = "b")).is_err());
        assert!(parse_args(quote!(fail_on = 3)).is_err());
    }

    #[test]
    fn expansion_calls_runner() {
        let out = expand_check(quote!(fail_on = "info")).unwrap().to_string();
        assert!(out.contains("fn archtest_check"));
        assert!(out.contains("run_check"));
        assert!(out.contains("\"info\""));
    }
}
