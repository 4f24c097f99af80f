use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, LitStr, Token};

/// Macro input representation:
/// include_lexicon!("path/to/words.txt", has_freq = false)
struct IncludeLexiconArgs {
    path: LitStr,
    assignments: Vec<(Ident, Expr)>,
}

impl Parse for IncludeLexiconArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let path: LitStr = input.parse()?;

        let mut assignments = Vec::new();

        // Optional comma separated `name = literal` assignments
        while input.parse::<Token![,]>().is_ok() {
            if input.is_empty() {
                break;
            }
            let ident: Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;
            let value: Expr = input.parse()?;
            assignments.push((ident, value));
        }

        Ok(IncludeLexiconArgs { path, assignments })
    }
}

fn bool_literal(ident: &Ident, expr: &Expr) -> syn::Result<bool> {
    match expr {
        Expr::Lit(el) => match &el.lit {
            syn::Lit::Bool(lb) => Ok(lb.value),
            other => Err(syn::Error::new_spanned(
                other,
                format!("{} must be a boolean literal", ident),
            )),
        },
        other => Err(syn::Error::new_spanned(
            other,
            format!("{} must be a boolean literal expression", ident),
        )),
    }
}

/// include_lexicon!("path/to/words.txt", has_freq = false)
///
/// Reads a word list at compile time (path relative to the calling crate's
/// `CARGO_MANIFEST_DIR`) and expands to a `::symptips::Lexicon` built from
/// an embedded `phf` map of lowercased word -> frequency.
///
/// - `has_freq` (default false): lines are `word count` instead of `word`
///
/// Blank lines and lines starting with `#` are skipped; duplicate words sum
/// their frequencies.
#[proc_macro]
pub fn include_lexicon(input: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(input as IncludeLexiconArgs);
    match expand(&args) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn expand(args: &IncludeLexiconArgs) -> syn::Result<proc_macro2::TokenStream> {
    let mut has_freq = false;

    for (ident, expr) in args.assignments.iter() {
        match ident.to_string().as_str() {
            "has_freq" => has_freq = bool_literal(ident, expr)?,
            name => {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("unknown argument to include_lexicon: {}", name),
                ))
            }
        }
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
        syn::Error::new(
            Span::call_site(),
            "CARGO_MANIFEST_DIR environment variable not set",
        )
    })?;
    let file_path = Path::new(&manifest_dir).join(args.path.value());

    let file = File::open(&file_path).map_err(|e| {
        syn::Error::new_spanned(
            &args.path,
            format!(
                "include_lexicon!: failed to open word list '{}': {}",
                file_path.display(),
                e
            ),
        )
    })?;

    // word -> freq (BTreeMap for deterministic order)
    let mut dict: BTreeMap<String, usize> = BTreeMap::new();

    for (lineno, line_res) in io::BufReader::new(file).lines().enumerate() {
        let line = line_res.map_err(|e| {
            syn::Error::new_spanned(
                &args.path,
                format!(
                    "include_lexicon!: error reading line {} of {}: {}",
                    lineno + 1,
                    file_path.display(),
                    e
                ),
            )
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (word, freq) = if has_freq {
            let mut parts = trimmed.split_whitespace();
            let word = parts.next().unwrap_or_default();
            let freq = parts
                .next()
                .and_then(|f| f.parse::<usize>().ok())
                .ok_or_else(|| {
                    syn::Error::new_spanned(
                        &args.path,
                        format!(
                            "include_lexicon!: invalid frequency on line {}: {}",
                            lineno + 1,
                            trimmed
                        ),
                    )
                })?;
            (word.to_lowercase(), freq)
        } else {
            (trimmed.to_lowercase(), 1usize)
        };

        *dict.entry(word).or_insert(0) += freq;
    }

    let entries = dict.iter().map(|(k, v)| {
        let key = syn::LitStr::new(k, Span::call_site());
        let val = syn::LitInt::new(&v.to_string(), Span::call_site());
        quote! {
            #key => #val
        }
    });

    // Track the file so edits to the word list trigger a rebuild.
    let path_lit = syn::LitStr::new(&file_path.display().to_string(), Span::call_site());

    Ok(quote! {
        {
            const _: &[u8] = include_bytes!(#path_lit);

            static LEXICON_PHF: ::phf::Map<&'static str, usize> = ::phf::phf_map! {
                #(#entries, )*
            };

            ::symptips::Lexicon::from_static(&LEXICON_PHF)
        }
    })
}
