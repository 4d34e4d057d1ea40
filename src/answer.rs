//! Quality gating for candidate answers.

/// Literal marker substrings that indicate a degenerate extractive answer:
/// leaked encoder control tokens or a truncation ellipsis.
const UNSATISFACTORY_MARKERS: [&str; 3] = ["[SEP]", "[CLS]", "..."];

/// Returns `true` when a candidate answer should not be shown to a user.
///
/// An answer is unsatisfactory when it is empty or contains any of the
/// literal markers `[SEP]`, `[CLS]`, or `...`. Pure predicate; callers use
/// it to decide whether to retry or fall back.
///
/// # Examples
///
/// ```
/// use lexsmith::answer::is_unsatisfactory;
///
/// assert!(is_unsatisfactory(""));
/// assert!(is_unsatisfactory("foo [SEP] bar"));
/// assert!(!is_unsatisfactory("The answer is 42."));
/// ```
#[must_use]
pub fn is_unsatisfactory(answer: &str) -> bool {
    answer.is_empty()
        || UNSATISFACTORY_MARKERS
            .iter()
            .any(|marker| answer.contains(marker))
}
