use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, Lit, LitStr, Token};

/// Macro input representation:
/// include_corpus!("path/to/corpus.txt", max_distance = 2, weighted = true, lowercase = true, verbose = false)
struct IncludeCorpusArgs {
    path: LitStr,
    assignments: Vec<(Ident, Expr)>,
}

impl Parse for IncludeCorpusArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let path: LitStr = input.parse()?;

        let mut assignments = Vec::new();
        while input.parse::<Token![,]>().is_ok() {
            // trailing comma
            if input.is_empty() {
                break;
            }
            let ident: Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;
            let value: Expr = input.parse()?;
            assignments.push((ident, value));
        }
        if !input.is_empty() {
            return Err(input.error("expected `, name = value`"));
        }

        Ok(IncludeCorpusArgs { path, assignments })
    }
}

struct Options {
    max_distance: u8,
    weighted: bool,
    lowercase: bool,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_distance: 2,
            weighted: true,
            lowercase: true,
            verbose: false,
        }
    }
}

impl Options {
    fn from_assignments(assignments: &[(Ident, Expr)]) -> syn::Result<Self> {
        let mut options = Options::default();
        for (ident, expr) in assignments {
            match ident.to_string().as_str() {
                "max_distance" => options.max_distance = int_literal(ident, expr)?,
                "weighted" => options.weighted = bool_literal(ident, expr)?,
                "lowercase" => options.lowercase = bool_literal(ident, expr)?,
                "verbose" => options.verbose = bool_literal(ident, expr)?,
                name => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown argument to include_corpus: {}", name),
                    ))
                }
            }
        }
        Ok(options)
    }
}

fn int_literal(ident: &Ident, expr: &Expr) -> syn::Result<u8> {
    match expr {
        Expr::Lit(el) => match &el.lit {
            Lit::Int(li) => li.base10_parse::<u8>(),
            other => Err(syn::Error::new_spanned(
                other,
                format!("{} must be an integer literal", ident),
            )),
        },
        other => Err(syn::Error::new_spanned(
            other,
            format!("{} must be an integer literal", ident),
        )),
    }
}

fn bool_literal(ident: &Ident, expr: &Expr) -> syn::Result<bool> {
    match expr {
        Expr::Lit(el) => match &el.lit {
            Lit::Bool(lb) => Ok(lb.value),
            other => Err(syn::Error::new_spanned(
                other,
                format!("{} must be a boolean literal", ident),
            )),
        },
        other => Err(syn::Error::new_spanned(
            other,
            format!("{} must be a boolean literal", ident),
        )),
    }
}

/// Read the corpus into `line -> weight`, using the same rules as
/// `fuzzylex::corpus::read_corpus`.
fn read_corpus(path: &Path, weighted: bool) -> Result<BTreeMap<String, usize>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to open corpus file '{}': {}", path.display(), e))?;

    let mut corpus: BTreeMap<String, usize> = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (body, weight) = if weighted {
            let (body, weight) = trimmed
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| format!("line {}: missing weight", lineno + 1))?;
            let weight = weight
                .parse::<usize>()
                .map_err(|_| format!("line {}: invalid weight {:?}", lineno + 1, weight))?;
            (body.trim_end(), weight)
        } else {
            (trimmed, 1usize)
        };

        let slot = corpus.entry(body.to_string()).or_insert(0);
        *slot = slot.saturating_add(weight);
    }
    Ok(corpus)
}

fn expand(args: IncludeCorpusArgs) -> syn::Result<TokenStream2> {
    let options = Options::from_assignments(&args.assignments)?;

    // Resolve the corpus path relative to the crate invoking the macro.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
        syn::Error::new_spanned(&args.path, "CARGO_MANIFEST_DIR environment variable not set")
    })?;
    let file_path = Path::new(&manifest_dir).join(args.path.value());

    let corpus = read_corpus(&file_path, options.weighted)
        .map_err(|message| syn::Error::new_spanned(&args.path, format!("include_corpus!: {}", message)))?;

    // BTreeMap iteration keeps the expansion deterministic.
    let entries = corpus.iter().map(|(line, weight)| {
        let key = LitStr::new(line, Span::call_site());
        quote! { #key => #weight }
    });

    let max_distance = options.max_distance;
    let lowercase = options.lowercase;
    let policy = if options.verbose {
        quote! { ::fuzzylex::BackrefPolicy::RetainAll }
    } else {
        quote! { ::fuzzylex::BackrefPolicy::Lowest }
    };

    Ok(quote! {
        {
            static CORPUS_PHF: ::phf::Map<&'static str, usize> = ::phf::phf_map! {
                #(#entries, )*
            };

            let config = ::fuzzylex::LexiconConfig::default()
                .with_max_distance(#max_distance)
                .with_lowercase(#lowercase)
                .with_policy(#policy);
            ::fuzzylex::Lexicon::from_iter(config, CORPUS_PHF.entries().map(|(line, weight)| (*line, *weight)))
        }
    })
}

/// include_corpus!("path/to/corpus.txt", max_distance = 2, weighted = true, lowercase = true, verbose = false)
///
/// Reads a training corpus at compile time, embeds it as a
/// `::phf::Map<&'static str, usize>` (line -> weight) and expands to an
/// expression that builds a `fuzzylex::Lexicon` from it at runtime. The calling
/// crate must depend on `phf`.
///
/// - `weighted = true`: each line is `<text> <weight>`; `false` gives every line weight 1.
/// - `lowercase`, `max_distance` and `verbose` (keep every backref) map onto
///   `fuzzylex::LexiconConfig`.
///
/// The path is relative to `CARGO_MANIFEST_DIR`. Blank lines and lines starting
/// with `#` are ignored. An unreadable file or a malformed weight is a compile error.
#[proc_macro]
pub fn include_corpus(input: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(input as IncludeCorpusArgs);
    expand(args)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
