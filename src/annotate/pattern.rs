//! Lexical pattern cascade — place-name and calendar-year detection
//!
//! Four independent passes scan a text string and emit candidate spans:
//! place names, decades ("1850s"), era-marked years ("44 BC"), and plain
//! years. Each pass is an explicit character-class scanner rather than a
//! regex, so the accepted language and the numeric bounds are literal in
//! the code. All passes are pure; empty or whitespace-only input yields
//! an empty candidate list, never an error.

use super::span::{Span, YearInfo};

/// Upper bound for decade matches ("2030s" is not a decade yet).
pub const DECADE_MAX: i32 = 2025;
/// Inclusive range for plain year matches.
pub const YEAR_MIN: i32 = -10_000;
pub const YEAR_MAX: i32 = 2025;
/// Largest magnitude accepted for era-marked years.
pub const BC_MAGNITUDE_MAX: i32 = 10_000;

/// Most continuation tokens a place name may carry after its start word.
const MAX_CONTINUATIONS: usize = 3;

/// Lowercase linking particles allowed inside a multi-word place name
/// ("Rio de Janeiro", "Frankfurt am Main").
const LINKING_PARTICLES: &[&str] = &[
    "de", "del", "di", "da", "von", "van", "am", "auf", "la", "le", "el", "al", "der", "den",
    "das", "du", "des", "do", "of", "on", "in", "by", "sur", "sous", "aux",
];

/// Capitalized words that open sentences far more often than they open
/// place names. A word in this set never starts a place span. Deliberately
/// excludes genuine place leads such as "New" or "San".
const SENTENCE_STARTERS: &[&str] = &[
    "The", "This", "That", "These", "Those", "There", "Here", "When", "Where", "Which", "While",
    "With", "From", "Into", "Upon", "About", "After", "Before", "During", "Between", "Through",
    "Against", "Without", "Within", "Along", "Beyond", "Under", "Above", "Below", "Behind",
    "Also", "Even", "Just", "Only", "Some", "Many", "Much", "Most", "Other", "Such", "Each",
    "Every", "Both", "Either", "Neither", "More", "Less", "And", "But", "For", "Nor", "Not",
    "Yet", "His", "Her", "Its", "Our", "Your", "Their", "Who", "How", "Why", "Can", "May",
    "Will", "Shall", "Should", "Would", "Could", "Must", "Has", "Have", "Had", "Was", "Were",
    "Been", "Being", "Are", "Now", "Then", "Thus", "Still", "Like", "Over", "See", "Visit",
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
];

/// Era markers accepted case-insensitively after a digit run.
/// Longer markers are listed before their prefixes.
const ERA_MARKERS: &[&str] = &["BCE", "BC", "A.C.", "AEC"];

/// Year sub-passes with explicit priority. A lower-priority candidate
/// overlapping a higher-priority span is discarded, independent of the
/// order the passes run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearPass {
    Decade,
    BcEra,
    Standard,
}

impl YearPass {
    fn priority(self) -> u8 {
        match self {
            YearPass::Decade | YearPass::BcEra => 2,
            YearPass::Standard => 1,
        }
    }
}

/// Run every pattern pass over `text` and return the concatenated
/// candidates, unordered. Callers resolve them with [`super::resolve`].
///
/// Year spans shadow overlapping place candidates, the same way the
/// year cascade shadows internally: a case-variant era marker like
/// "Bce" shapes like a capitalized word, and without the filter the
/// place pass would claim it a second time.
pub fn detect(text: &str) -> Vec<Span> {
    let years = detect_years(text);
    let mut candidates: Vec<Span> = detect_places(text)
        .into_iter()
        .filter(|place| !years.iter().any(|year| year.overlaps(place)))
        .collect();
    candidates.extend(years);
    candidates
}

// ---------------------------------------------------------------------------
// Shared character machinery
// ---------------------------------------------------------------------------

/// A word character in the sense of the token boundaries below.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Indexed view over the input: char values plus their byte offsets.
struct Chars<'a> {
    text: &'a str,
    items: Vec<(usize, char)>,
}

impl<'a> Chars<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            items: text.char_indices().collect(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn at(&self, i: usize) -> Option<char> {
        self.items.get(i).map(|&(_, c)| c)
    }

    /// Byte offset where char `i` starts; `text.len()` past the end.
    fn byte_start(&self, i: usize) -> usize {
        self.items
            .get(i)
            .map(|&(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Byte offset just past char `i - 1` (exclusive end for `..i`).
    fn byte_end(&self, i: usize) -> usize {
        self.byte_start(i)
    }

    fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.text[self.byte_start(from)..self.byte_end(to)]
    }

    /// No word character immediately before char `i`.
    fn clean_left(&self, i: usize) -> bool {
        i == 0 || !is_word_char(self.items[i - 1].1)
    }

    /// No word character at char `i` (or past the end).
    fn clean_right(&self, i: usize) -> bool {
        self.at(i).map(|c| !is_word_char(c)).unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// Place-name pass
// ---------------------------------------------------------------------------

/// A maximal run of ASCII letters with word-boundary-clean edges.
#[derive(Debug, Clone, Copy)]
struct WordToken {
    start: usize,
    end: usize,
    clean: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenRole {
    /// Capital + at least two lowercase letters; may start a span.
    StartWord,
    /// Capital + at least one lowercase letter; continuation only.
    CapWord,
    /// Member of the linking-particle set; continuation only,
    /// never the final token.
    Particle,
    Other,
}

fn letter_tokens(chars: &Chars) -> Vec<WordToken> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars.at(i).map(|c| c.is_ascii_alphabetic()).unwrap_or(false) {
            let start = i;
            while i < chars.len() && chars.at(i).map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
            {
                i += 1;
            }
            let clean = chars.clean_left(start) && chars.clean_right(i);
            tokens.push(WordToken {
                start,
                end: i,
                clean,
            });
        } else {
            i += 1;
        }
    }
    tokens
}

fn token_role(chars: &Chars, token: &WordToken) -> TokenRole {
    if !token.clean {
        return TokenRole::Other;
    }
    let text = chars.slice(token.start, token.end);
    let mut cs = text.chars();
    let first = match cs.next() {
        Some(c) => c,
        None => return TokenRole::Other,
    };
    let lowercase_tail = cs.clone().all(|c| c.is_ascii_lowercase());
    if first.is_ascii_uppercase() && lowercase_tail {
        let tail_len = text.len() - 1;
        if tail_len >= 2 {
            return TokenRole::StartWord;
        }
        if tail_len >= 1 {
            return TokenRole::CapWord;
        }
        return TokenRole::Other;
    }
    if LINKING_PARTICLES.contains(&text) {
        return TokenRole::Particle;
    }
    TokenRole::Other
}

/// True when the characters strictly between two tokens are whitespace
/// and there is at least one of them.
fn whitespace_gap(chars: &Chars, from: usize, to: usize) -> bool {
    if from >= to {
        return false;
    }
    (from..to).all(|i| chars.at(i).map(|c| c.is_whitespace()).unwrap_or(false))
}

/// Detect place-name candidates.
///
/// A candidate is a start word (capital + >= 2 lowercase letters, not in
/// the sentence-starter set) followed by up to three whitespace-separated
/// continuations, each a capitalized word or a linking particle. Trailing
/// particles are backtracked so a span never ends on one: "Paris in the"
/// yields just "Paris", while "Rio de Janeiro" survives intact.
pub fn detect_places(text: &str) -> Vec<Span> {
    let chars = Chars::new(text);
    let tokens = letter_tokens(&chars);
    let roles: Vec<TokenRole> = tokens.iter().map(|t| token_role(&chars, t)).collect();

    let mut spans = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if roles[i] != TokenRole::StartWord
            || SENTENCE_STARTERS.contains(&chars.slice(tokens[i].start, tokens[i].end))
        {
            i += 1;
            continue;
        }

        let mut last = i;
        while last - i < MAX_CONTINUATIONS && last + 1 < tokens.len() {
            let next = &tokens[last + 1];
            let linked = matches!(
                roles[last + 1],
                TokenRole::StartWord | TokenRole::CapWord | TokenRole::Particle
            );
            if linked && whitespace_gap(&chars, tokens[last].end, next.start) {
                last += 1;
            } else {
                break;
            }
        }
        // Never end on a particle.
        while last > i && roles[last] == TokenRole::Particle {
            last -= 1;
        }

        let start = chars.byte_start(tokens[i].start);
        let end = chars.byte_end(tokens[last].end);
        spans.push(Span::place(&text[start..end], start, end));
        i = last + 1;
    }
    spans
}

// ---------------------------------------------------------------------------
// Year passes
// ---------------------------------------------------------------------------

/// A maximal run of ASCII digits.
#[derive(Debug, Clone, Copy)]
struct DigitRun {
    start: usize,
    end: usize,
}

fn digit_runs(chars: &Chars) -> Vec<DigitRun> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars.at(i).map(|c| c.is_ascii_digit()).unwrap_or(false) {
            let start = i;
            while i < chars.len() && chars.at(i).map(|c| c.is_ascii_digit()).unwrap_or(false) {
                i += 1;
            }
            runs.push(DigitRun { start, end: i });
        } else {
            i += 1;
        }
    }
    runs
}

fn parse_digits(chars: &Chars, run: &DigitRun) -> Option<i32> {
    chars.slice(run.start, run.end).parse().ok()
}

fn decade_pass(chars: &Chars, runs: &[DigitRun], out: &mut Vec<(YearPass, Span)>) {
    for run in runs {
        let len = run.end - run.start;
        if !(2..=4).contains(&len) || !chars.clean_left(run.start) {
            continue;
        }
        if chars.at(run.end) != Some('s') || !chars.clean_right(run.end + 1) {
            continue;
        }
        let Some(value) = parse_digits(chars, run) else {
            continue;
        };
        if !(0..=DECADE_MAX).contains(&value) {
            continue;
        }
        let start = chars.byte_start(run.start);
        let end = chars.byte_end(run.end + 1);
        let span = Span::year(
            &chars.text[start..end],
            start,
            end,
            YearInfo::decade(value),
        );
        out.push((YearPass::Decade, span));
    }
}

/// Match one era marker case-insensitively at char position `i`.
/// Returns the char position just past the marker.
fn match_era_marker(chars: &Chars, i: usize) -> Option<usize> {
    'markers: for marker in ERA_MARKERS {
        let mut pos = i;
        for mc in marker.chars() {
            match chars.at(pos) {
                Some(c) if c.eq_ignore_ascii_case(&mc) => pos += 1,
                _ => continue 'markers,
            }
        }
        // The marker must not run into a larger word.
        if chars.clean_right(pos) {
            return Some(pos);
        }
    }
    None
}

fn bc_era_pass(chars: &Chars, runs: &[DigitRun], out: &mut Vec<(YearPass, Span)>) {
    for run in runs {
        let len = run.end - run.start;
        if !(1..=5).contains(&len) || !chars.clean_left(run.start) {
            continue;
        }
        let mut pos = run.end;
        while chars.at(pos).map(|c| c.is_whitespace()).unwrap_or(false) {
            pos += 1;
        }
        let Some(marker_end) = match_era_marker(chars, pos) else {
            continue;
        };
        let Some(magnitude) = parse_digits(chars, run) else {
            continue;
        };
        if !(0..=BC_MAGNITUDE_MAX).contains(&magnitude) {
            continue;
        }
        let start = chars.byte_start(run.start);
        let end = chars.byte_end(marker_end);
        let span = Span::year(
            &chars.text[start..end],
            start,
            end,
            YearInfo::bc_era(magnitude),
        );
        out.push((YearPass::BcEra, span));
    }
}

fn standard_pass(chars: &Chars, runs: &[DigitRun], out: &mut Vec<(YearPass, Span)>) {
    for run in runs {
        let len = run.end - run.start;
        if !(1..=5).contains(&len) || !chars.clean_left(run.start) || !chars.clean_right(run.end)
        {
            continue;
        }
        // A leading minus participates only when it is itself delimited,
        // so "-500" in running text is negative but "x-500" yields 500.
        let mut start_char = run.start;
        let mut negative = false;
        if run.start > 0 && chars.at(run.start - 1) == Some('-') {
            let before_minus = run.start - 1;
            if before_minus == 0 || !is_word_char(chars.items[before_minus - 1].1) {
                start_char = before_minus;
                negative = true;
            }
        }
        let Some(magnitude) = parse_digits(chars, run) else {
            continue;
        };
        let value = if negative { -magnitude } else { magnitude };
        if !(YEAR_MIN..=YEAR_MAX).contains(&value) {
            continue;
        }
        let start = chars.byte_start(start_char);
        let end = chars.byte_end(run.end);
        let span = Span::year(
            &chars.text[start..end],
            start,
            end,
            YearInfo::standard(value),
        );
        out.push((YearPass::Standard, span));
    }
}

/// Detect year candidates across the decade, era-marked, and plain-year
/// passes. Overlaps are resolved by the explicit pass priority: a plain
/// year never survives on offsets already claimed by a decade or an
/// era-marked match.
pub fn detect_years(text: &str) -> Vec<Span> {
    let chars = Chars::new(text);
    let runs = digit_runs(&chars);

    let mut candidates: Vec<(YearPass, Span)> = Vec::new();
    decade_pass(&chars, &runs, &mut candidates);
    bc_era_pass(&chars, &runs, &mut candidates);
    standard_pass(&chars, &runs, &mut candidates);

    // Priority-based shadowing instead of pass execution order: a candidate
    // is dropped when any strictly higher-priority candidate claims an
    // overlapping range. Reordering the passes above cannot change the result.
    let keep: Vec<bool> = candidates
        .iter()
        .map(|(pass, span)| {
            !candidates.iter().any(|(other, existing)| {
                other.priority() > pass.priority() && existing.overlaps(span)
            })
        })
        .collect();
    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|((_, span), keep)| keep.then_some(span))
        .collect()
}
