//! Banned-word moderation for guess words.
//!
//! A word is rejected when it *contains* any banned entry, so a banned root
//! padded with extra letters is still caught. Legitimate words that happen to
//! embed a banned root are rejected too.

/// Entries shipped with the relay. Matching is on uppercased text.
pub const DEFAULT_BANNED_WORDS: &[&str] = &[
    "BUNUH", "MATI", "NAJIS", "ANJING", "BABI", "KONTOL", "MEMEK", "JEMBUT", "NGENTOT", "TOLOL",
    "BEGO", "GOBLOK", "SETAN", "IBLIS", "DADAH", "MAMPUS", "***",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedWords {
    entries: Vec<String>,
}

impl Default for BannedWords {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS.iter().copied())
    }
}

impl BannedWords {
    /// Build a filter from arbitrary entries. Entries are trimmed and
    /// uppercased; blank entries are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self {
            entries: Vec::new(),
        };
        filter.extend(entries);
        filter
    }

    /// Add entries to the list, skipping blanks and duplicates.
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let entry = entry.as_ref().trim().to_uppercase();
            if !entry.is_empty() && !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
    }

    /// Parse a word list file: one entry per line, `#` starts a comment line.
    pub fn parse_list(content: &str) -> Vec<&str> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn is_allowed(&self, word: &str) -> bool {
        let word = word.to_uppercase();
        !self.entries.iter().any(|banned| word.contains(banned.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_word_is_allowed() {
        // テスト項目: 禁止語を含まない単語は許可される
        // given (前提条件):
        let filter = BannedWords::default();

        // when (操作) / then (期待する結果):
        assert!(filter.is_allowed("APPLE"));
        assert!(filter.is_allowed("KUCING"));
    }

    #[test]
    fn test_exact_banned_word_is_rejected() {
        // テスト項目: 禁止語そのものは拒否される
        // given (前提条件):
        let filter = BannedWords::default();

        // when (操作) / then (期待する結果):
        assert!(!filter.is_allowed("SETAN"));
        assert!(!filter.is_allowed("BABI"));
    }

    #[test]
    fn test_embedded_banned_root_is_rejected() {
        // テスト項目: 余分な文字で囲まれた禁止語も部分一致で拒否される
        // given (前提条件):
        let filter = BannedWords::default();

        // when (操作) / then (期待する結果):
        assert!(!filter.is_allowed("XSETANXX"));
        assert!(!filter.is_allowed("KEMATIAN"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        // テスト項目: 大文字小文字を区別せずに判定される
        // given (前提条件):
        let filter = BannedWords::new(["babi"]);

        // when (操作) / then (期待する結果):
        assert!(!filter.is_allowed("babiku"));
        assert!(!filter.is_allowed("BABIKU"));
    }

    #[test]
    fn test_extend_skips_blank_and_duplicates() {
        // テスト項目: 追加時に空エントリと重複は無視される
        // given (前提条件):
        let mut filter = BannedWords::new(["SETAN"]);

        // when (操作):
        filter.extend(["setan", "  ", "racun"]);

        // then (期待する結果):
        assert_eq!(filter.len(), 2);
        assert!(!filter.is_allowed("RACUN"));
    }

    #[test]
    fn test_parse_list_ignores_comments_and_blank_lines() {
        // テスト項目: ファイル形式のリストからコメントと空行が除かれる
        // given (前提条件):
        let content = "# custom list\nracun\n\n  tipu  \n#skip\n";

        // when (操作):
        let entries = BannedWords::parse_list(content);

        // then (期待する結果):
        assert_eq!(entries, vec!["racun", "tipu"]);
    }
}
