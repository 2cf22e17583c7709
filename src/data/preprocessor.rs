// ============================================================
// Layer 4 — Tweet Preprocessor
// ============================================================
// Normalises raw tweet text and splits it into tokens.
//
// Tweets are noisy in ways that waste vocabulary space:
//   - every @handle is a different token but carries no sentiment
//   - every link is unique
//   - "Great", "great" and "great!!" should be the same word
//
// Cleaning steps (applied in order):
//   1. Replace control / invisible characters with spaces
//   2. Lowercase
//   3. Per whitespace-separated word:
//        @handle           → "@user"
//        http(s)://…, www. → "url"
//        strip punctuation from both edges, keeping '#' and '\''
//        words made only of punctuation ("!!!", ":)") are kept as-is

pub const USER_TOKEN: &str = "@user";
pub const URL_TOKEN:  &str = "url";

pub struct TweetPreprocessor;

impl TweetPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean `text` and return its tokens in order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalised: String = text
            .chars()
            .map(|c| match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect::<String>()
            .to_lowercase();

        normalised
            .split_whitespace()
            .map(normalise_word)
            .collect()
    }
}

impl Default for TweetPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn normalise_word(word: &str) -> String {
    if word.starts_with('@') && word.len() > 1 {
        return USER_TOKEN.to_string();
    }
    if word.starts_with("http://") || word.starts_with("https://") || word.starts_with("www.") {
        return URL_TOKEN.to_string();
    }

    let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '#' && c != '\'');
    if trimmed.is_empty() {
        word.to_string()
    } else {
        trimmed.to_string()
    }
}
