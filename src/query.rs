//! Query normalization ahead of embedding.
//!
//! Stopwords in natural-language questions ("does my policy cover…") add
//! noise to sentence embeddings of short queries, so they are stripped
//! before encoding. This is deliberately shallow: exact token matching
//! against a small configured set, no stemming, no phrase handling. The
//! one punctuation case handled is stopword entries that are themselves
//! punctuation (the default set contains `"?"`), which are stripped from
//! token ends so `"theft?"` reduces to `"theft"`.

use crate::config::QueryConfig;

/// Lower-case `query`, drop tokens matching the configured stopword set,
/// and rejoin the rest with single spaces.
///
/// Punctuation-only stopword entries are also trimmed from the ends of
/// surviving tokens; a token reduced to nothing is dropped.
///
/// # Examples
///
/// ```
/// use lexsmith::config::QueryConfig;
/// use lexsmith::query::reformulate_query;
///
/// let config = QueryConfig::default();
/// assert_eq!(
///     reformulate_query("Does my policy cover theft?", &config),
///     "policy cover theft",
/// );
/// ```
pub fn reformulate_query(query: &str, config: &QueryConfig) -> String {
    let punctuation: Vec<&str> = config
        .stopwords
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty() && !s.chars().any(char::is_alphanumeric))
        .collect();

    query
        .to_lowercase()
        .split_whitespace()
        .filter_map(|word| {
            let mut word = word;
            loop {
                let before = word.len();
                for p in &punctuation {
                    word = word.trim_end_matches(p);
                }
                if word.len() == before {
                    break;
                }
            }
            if word.is_empty() || config.stopwords.iter().any(|stop| stop == word) {
                None
            } else {
                Some(word.to_string())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ──────────────────────────────────────────────────────────────
