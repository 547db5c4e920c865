//! The collocational window engine.
//!
//! A window places a candidate at the head position of a token sequence and
//! keeps up to `left` tokens before it and up to `right` tokens after it:
//!
//! ```text
//! tokens:  the  cat  perched  on  the  mat      head = 2
//! (1, 2):       cat  sat      on  the           "cat sat on the"
//! (5, 0):  the  cat  sat                        "the cat sat", begins sentence
//! ```
//!
//! Each window reports whether it reaches the first and last token, so a
//! language model can score it with the right sentence-boundary markers.
//!
//! The *pop* variants model robustness to a neighbouring word being deleted:
//! the window is built over copies of the sequence with the token left of
//! the head, right of the head, or both, removed.
//!
//! A collocational feature sweeps every `(i, j)` with `i <= left` and
//! `j <= right`, `i` outermost; [`spans`] fixes that order.

use itertools::iproduct;

/// A windowed n-gram and its sentence-boundary flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ngram {
    /// Space-delimited n-gram text.
    pub text: String,
    /// The window reaches the first token of the sequence.
    pub begins_sentence: bool,
    /// The window reaches the last token of the sequence.
    pub ends_sentence: bool,
}

/// Every `(left, right)` span of a sweep, left span outermost.
pub fn spans(left: usize, right: usize) -> impl Iterator<Item = (usize, usize)> {
    iproduct!(0..=left, 0..=right)
}

/// Build the window around `head` with `candidate` substituted in.
///
/// `head` must index into `tokens`. Spans larger than the sequence are
/// clipped, so `usize::MAX` on both sides yields the whole sentence.
pub fn window<S: AsRef<str>>(
    candidate: &str,
    tokens: &[S],
    head: usize,
    left: usize,
    right: usize,
) -> Ngram {
    debug_assert!(head < tokens.len(), "head {head} outside {} tokens", tokens.len());

    let start = head.saturating_sub(left);
    let end = head.saturating_add(right).saturating_add(1).min(tokens.len());

    let words: Vec<&str> = tokens[start..head]
        .iter()
        .map(AsRef::as_ref)
        .chain(std::iter::once(candidate))
        .chain(tokens[head + 1..end].iter().map(AsRef::as_ref))
        .collect();

    Ngram {
        text: words.join(" "),
        begins_sentence: start == 0,
        ends_sentence: end == tokens.len(),
    }
}

/// A token sequence with one or both neighbours of the head removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopContext<'a> {
    pub tokens: Vec<&'a str>,
    pub head: usize,
}

/// Enumerate the deletion contexts of `head`: left neighbour removed, right
/// neighbour removed, then both, each only when the neighbours exist.
pub fn pop_contexts<S: AsRef<str>>(tokens: &[S], head: usize) -> Vec<PopContext<'_>> {
    let words: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    let has_left = head > 0;
    let has_right = head + 1 < words.len();

    let mut contexts = Vec::with_capacity(3);
    if has_left {
        contexts.push(PopContext {
            tokens: without(&words, &[head - 1]),
            head: head - 1,
        });
    }
    if has_right {
        contexts.push(PopContext {
            tokens: without(&words, &[head + 1]),
            head,
        });
    }
    if has_left && has_right {
        contexts.push(PopContext {
            tokens: without(&words, &[head - 1, head + 1]),
            head: head - 1,
        });
    }
    contexts
}

fn without<'a>(words: &[&'a str], skip: &[usize]) -> Vec<&'a str> {
    words
        .iter()
        .enumerate()
        .filter(|(index, _)| !skip.contains(index))
        .map(|(_, word)| *word)
        .collect()
}

/// Windows over every deletion context of `head`.
///
/// With `left = right = 0` no contexts are generated and the single window
/// is the candidate alone, flagged against the unmodified sequence. A
/// sequence with no neighbours to delete also falls back to the unmodified
/// window.
pub fn pop_windows<S: AsRef<str>>(
    candidate: &str,
    tokens: &[S],
    head: usize,
    left: usize,
    right: usize,
) -> Vec<Ngram> {
    if left == 0 && right == 0 {
        return vec![window(candidate, tokens, head, 0, 0)];
    }
    let contexts = pop_contexts(tokens, head);
    if contexts.is_empty() {
        return vec![window(candidate, tokens, head, left, right)];
    }
    contexts
        .iter()
        .map(|context| window(candidate, &context.tokens, context.head, left, right))
        .collect()
}
