//! Guess extraction: turns a raw chat line into a guess word.
//!
//! The algorithm is deterministic and side-effect free:
//!
//! 1. Trim and uppercase.
//! 2. A line starting with `!` is a command and never a guess.
//! 3. Lines shorter than 3 or longer than `max_raw_length` characters are ignored.
//! 4. The line with all whitespace removed is the guess if it is 4 to 8 letters.
//! 5. Otherwise the line is split on whitespace, `.`, `,`, `!` and `?`, and the
//!    rightmost token of 4 to 8 letters is the guess.

pub const DEFAULT_MAX_RAW_LENGTH: usize = 50;

const MIN_RAW_LENGTH: usize = 3;
const MIN_WORD_LENGTH: usize = 4;
const MAX_WORD_LENGTH: usize = 8;

/// What a chat line means to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatIntent {
    /// Uppercased text starting with `!`
    Command(String),
    /// Validated guess word
    Guess(String),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessExtractor {
    max_raw_length: usize,
}

impl Default for GuessExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RAW_LENGTH)
    }
}

impl GuessExtractor {
    pub fn new(max_raw_length: usize) -> Self {
        Self { max_raw_length }
    }

    pub fn max_raw_length(&self) -> usize {
        self.max_raw_length
    }

    /// Classify a raw chat line as a command, a guess, or nothing.
    pub fn classify(&self, raw_text: &str) -> ChatIntent {
        let normalized = raw_text.trim().to_uppercase();

        if normalized.starts_with('!') {
            return ChatIntent::Command(normalized);
        }

        match self.extract_normalized(&normalized) {
            Some(word) => ChatIntent::Guess(word),
            None => ChatIntent::Nothing,
        }
    }

    /// Extract a guess word, ignoring the command path.
    ///
    /// Command lines yield `None`.
    pub fn extract(&self, raw_text: &str) -> Option<String> {
        match self.classify(raw_text) {
            ChatIntent::Guess(word) => Some(word),
            ChatIntent::Command(_) | ChatIntent::Nothing => None,
        }
    }

    fn extract_normalized(&self, normalized: &str) -> Option<String> {
        let length = normalized.chars().count();
        if length > self.max_raw_length || length < MIN_RAW_LENGTH {
            return None;
        }

        let collapsed: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
        if is_valid_word(&collapsed) {
            return Some(collapsed);
        }

        normalized
            .split(is_separator)
            .rev()
            .find(|token| is_valid_word(token))
            .map(str::to_string)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?')
}

/// 4 to 8 characters, all `A-Z`.
pub fn is_valid_word(word: &str) -> bool {
    (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.len())
        && word.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> GuessExtractor {
        GuessExtractor::default()
    }

    #[test]
    fn test_single_word_is_uppercased() {
        // テスト項目: 単語 1 つのコメントは大文字化されて推測語になる
        // given (前提条件):
        let raw = "  apple ";

        // when (操作):
        let result = extractor().classify(raw);

        // then (期待する結果):
        assert_eq!(result, ChatIntent::Guess("APPLE".to_string()));
    }

    #[test]
    fn test_command_bypasses_extraction() {
        // テスト項目: ! で始まるコメントはコマンドとして大文字化されたまま返される
        // given (前提条件):
        let raw = " !myrank please ";

        // when (操作):
        let result = extractor().classify(raw);

        // then (期待する結果):
        assert_eq!(result, ChatIntent::Command("!MYRANK PLEASE".to_string()));
        assert_eq!(extractor().extract(raw), None);
    }

    #[test]
    fn test_command_ignores_length_limit() {
        // テスト項目: コマンドは最大長の制限を受けない
        // given (前提条件):
        let raw = format!("!{}", "x".repeat(80));

        // when (操作):
        let result = GuessExtractor::new(20).classify(&raw);

        // then (期待する結果):
        assert_eq!(result, ChatIntent::Command(raw.to_uppercase()));
    }

    #[test]
    fn test_collapsed_form_takes_precedence() {
        // テスト項目: 空白を除去した形が有効なら、後方のトークンより優先される
        // given (前提条件): "AP PLE" -> "APPLE" (5 文字)
        let raw = "ap ple";

        // when (操作):
        let result = extractor().extract(raw);

        // then (期待する結果):
        assert_eq!(result, Some("APPLE".to_string()));
    }

    #[test]
    fn test_rightmost_token_wins() {
        // テスト項目: 複数の有効トークンがある場合は最後のものが選ばれる
        // given (前提条件):
        let raw = "nice try APPLE";

        // when (操作):
        let result = extractor().extract(raw);

        // then (期待する結果):
        assert_eq!(result, Some("APPLE".to_string()));
    }

    #[test]
    fn test_scan_skips_invalid_trailing_tokens() {
        // テスト項目: 後方の無効なトークンを飛ばして有効なトークンを探す
        // given (前提条件): "try" と "go" は短すぎる
        let raw = "melon, try go!";

        // when (操作):
        let result = extractor().extract(raw);

        // then (期待する結果):
        assert_eq!(result, Some("MELON".to_string()));
    }

    #[test]
    fn test_leading_valid_token_found_when_nothing_follows() {
        // テスト項目: 後方に有効トークンがなければ先頭側のトークンが選ばれる
        // given (前提条件):
        let raw = "APPLE nice try";

        // when (操作):
        let result = extractor().extract(raw);

        // then (期待する結果): "NICE" は 4 文字で有効なので最後の有効トークン
        assert_eq!(result, Some("NICE".to_string()));
    }

    #[test]
    fn test_punctuation_separators() {
        // テスト項目: . , ! ? で区切られる
        // given (前提条件):
        let raw = "hi?banana.ok";

        // when (操作):
        let result = extractor().extract(raw);

        // then (期待する結果):
        assert_eq!(result, Some("BANANA".to_string()));
    }

    #[test]
    fn test_digits_and_symbols_yield_nothing() {
        // テスト項目: 数字や記号だけのコメントは推測語にならない
        // given (前提条件):
        let inputs = ["12345", "@@@@@", "abc1", "a1b2c3d4", "🙂🙂🙂🙂"];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert_eq!(extractor().classify(input), ChatIntent::Nothing, "{input}");
        }
    }

    #[test]
    fn test_length_bounds() {
        // テスト項目: 3 文字未満、または最大長を超えるコメントは無視される
        // given (前提条件):
        let extractor = GuessExtractor::new(20);
        let too_long = format!("{} apple", "x".repeat(20));

        // when (操作) / then (期待する結果):
        assert_eq!(extractor.extract("ab"), None);
        assert_eq!(extractor.extract(&too_long), None);
        assert_eq!(extractor.extract("a very long APPLE"), Some("APPLE".to_string()));
    }

    #[test]
    fn test_word_length_window() {
        // テスト項目: 推測語は 4〜8 文字に限られる
        // given (前提条件):
        let short = "cat";
        let long = "pineapples";

        // when (操作) / then (期待する結果):
        assert_eq!(extractor().extract(short), None);
        assert_eq!(extractor().extract(long), None);
        assert_eq!(extractor().extract("pineapple"), None);
        assert_eq!(extractor().extract("mangoes"), Some("MANGOES".to_string()));
    }

    #[test]
    fn test_is_valid_word() {
        // テスト項目: is_valid_word は A-Z のみ 4〜8 文字を許可する
        // given (前提条件) / when (操作) / then (期待する結果):
        assert!(is_valid_word("ABCD"));
        assert!(is_valid_word("ABCDEFGH"));
        assert!(!is_valid_word("ABC"));
        assert!(!is_valid_word("ABCDEFGHI"));
        assert!(!is_valid_word("abcd"));
        assert!(!is_valid_word("ÄBCD"));
    }
}
