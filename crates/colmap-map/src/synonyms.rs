//! Static synonym table used during normalization.
//!
//! Each entry rewrites any of its variant phrases to the canonical phrase.
//! Phrases are whitespace-separated tokens; matching is longest-first.

use std::sync::LazyLock;

/// `(canonical, variants)` pairs.
pub const SYNONYM_GROUPS: &[(&str, &[&str])] = &[
    (
        "phone",
        &["telephone", "tel", "mobile", "cell", "cellphone", "phone no"],
    ),
    ("email", &["e mail", "mail"]),
    (
        "zip",
        &["postal code", "postcode", "post code", "zip code", "zipcode"],
    ),
    (
        "first name",
        &["firstname", "given name", "forename", "fname"],
    ),
    (
        "last name",
        &["lastname", "surname", "family name", "lname"],
    ),
    (
        "date of birth",
        &["dob", "birth date", "birthdate", "birthday"],
    ),
    ("address", &["addr", "street address"]),
    ("company", &["organization", "organisation", "org"]),
    ("description", &["desc", "descr"]),
    ("number", &["no", "num", "nbr"]),
    ("quantity", &["qty"]),
    ("amount", &["amt"]),
    ("id", &["identifier"]),
];

struct Rewrite {
    variant: Vec<&'static str>,
    canonical: Vec<&'static str>,
}

static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    let mut rewrites: Vec<Rewrite> = SYNONYM_GROUPS
        .iter()
        .flat_map(|(canonical, variants)| {
            variants.iter().map(move |variant| Rewrite {
                variant: variant.split_whitespace().collect(),
                canonical: canonical.split_whitespace().collect(),
            })
        })
        .collect();
    // Longest phrase first so "phone no" wins over "no".
    rewrites.sort_by(|a, b| b.variant.len().cmp(&a.variant.len()));
    rewrites
});

/// Rewrites lowercase tokens through the synonym table.
pub fn apply_synonyms(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut idx = 0;
    'tokens: while idx < tokens.len() {
        for rewrite in REWRITES.iter() {
            let end = idx + rewrite.variant.len();
            if end <= tokens.len()
                && tokens[idx..end]
                    .iter()
                    .zip(&rewrite.variant)
                    .all(|(token, variant)| token == variant)
            {
                out.extend(rewrite.canonical.iter().map(|t| (*t).to_string()));
                idx = end;
                continue 'tokens;
            }
        }
        out.push(tokens[idx].clone());
        idx += 1;
    }
    out
}
