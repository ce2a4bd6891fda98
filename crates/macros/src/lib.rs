use proc_macro::TokenStream;
use quote::quote;
use sqlguard_core::{batch::prepare, guard::KeywordGuard, splitter::split};
use syn::{parse_macro_input, LitStr};

/// Splits a SQL string literal at compile time.
///
/// Expands to a `[&'static str; N]` of normalized statements. Compilation
/// fails if the literal holds no statements, ends inside an open quote,
/// comment or dollar-quoted block, or contains a forbidden keyword.
#[proc_macro]
pub fn statements(input: TokenStream) -> TokenStream {
    let literal = parse_macro_input!(input as LitStr);

    match expand(&literal) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(literal: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let sql = literal.value();
    let split = split(&sql);

    if let Some(context) = split.open_context() {
        return Err(syn::Error::new(
            literal.span(),
            format!("{} at end of SQL literal", context),
        ));
    }

    let statements = prepare(split.statements(), &KeywordGuard::default())
        .map_err(|err| syn::Error::new(literal.span(), err.to_string()))?;
    let texts = statements.iter().map(|statement| statement.as_str());

    Ok(quote! {
        [#(#texts),*]
    })
}
