use regex::Regex;
use std::sync::LazyLock;

/// A leading run of word characters followed by trailing ASCII punctuation.
static WORD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)([[:punct:]]*)$").unwrap());

/// A token split into its replaceable core and the text shape around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordShape<'a> {
    pub word: &'a str,
    pub punctuation: &'a str,
    pub capitalized: bool,
}

/// Split a non-empty token into word, trailing punctuation and capitalization.
/// Tokens that do not fit the shape (`"--"`, `"'quoted'"`, `"don't"`) are
/// kept whole with no punctuation.
pub fn extract(token: &str) -> WordShape<'_> {
    let (word, punctuation) = match WORD_SHAPE.captures(token) {
        Some(caps) => (
            caps.get(1).map_or(token, |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => (token, ""),
    };
    WordShape {
        word,
        punctuation,
        capitalized: word.chars().next().is_some_and(char::is_uppercase),
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrite a line word by word.
///
/// Splits on single spaces so runs of spaces survive as empty tokens and
/// the output keeps the input's spacing. Each word is lowercased before
/// `replace` sees it, and the first character of the result is
/// re-capitalized when the original word was.
pub fn transform_line(line: &str, mut replace: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(line.len());

    for (i, token) in line.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if token.is_empty() {
            continue;
        }

        let shape = extract(token);
        let replaced = replace(&shape.word.to_lowercase());
        if shape.capitalized {
            out.push_str(&capitalize_first(&replaced));
        } else {
            out.push_str(&replaced);
        }
        out.push_str(shape.punctuation);
    }

    out
}
