//! Gift streak suppression.
//!
//! Some gift types can be sent as a combo: the upstream emits one event per
//! tap with a growing repeat count and a final event flagged `repeat_end`.
//! Only the final event of such a combo is relayed.

use std::collections::BTreeSet;

/// Gift type id the upstream uses for combo-capable gifts
pub const DEFAULT_STREAK_GIFT_TYPE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakPolicy {
    streak_types: BTreeSet<i32>,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self::new([DEFAULT_STREAK_GIFT_TYPE])
    }
}

impl StreakPolicy {
    pub fn new(streak_types: impl IntoIterator<Item = i32>) -> Self {
        Self {
            streak_types: streak_types.into_iter().collect(),
        }
    }

    pub fn is_streak_capable(&self, gift_type: i32) -> bool {
        self.streak_types.contains(&gift_type)
    }

    /// `true` while a combo-capable gift has not reached its final event.
    pub fn is_mid_streak(&self, gift_type: i32, repeat_end: bool) -> bool {
        self.is_streak_capable(gift_type) && !repeat_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_gift_mid_combo_is_suppressed() {
        // テスト項目: コンボ可能なギフトはコンボ終了前なら抑制対象
        // given (前提条件):
        let policy = StreakPolicy::default();

        // when (操作) / then (期待する結果):
        assert!(policy.is_mid_streak(1, false));
        assert!(!policy.is_mid_streak(1, true));
    }

    #[test]
    fn test_non_streak_gift_is_never_mid_streak() {
        // テスト項目: コンボ不可能なギフトは repeat_end に関係なく抑制されない
        // given (前提条件):
        let policy = StreakPolicy::default();

        // when (操作) / then (期待する結果):
        assert!(!policy.is_mid_streak(2, false));
        assert!(!policy.is_mid_streak(2, true));
    }

    #[test]
    fn test_custom_streak_types() {
        // テスト項目: 設定したギフト種別だけがコンボ可能として扱われる
        // given (前提条件):
        let policy = StreakPolicy::new([3, 7]);

        // when (操作) / then (期待する結果):
        assert!(policy.is_streak_capable(7));
        assert!(!policy.is_streak_capable(1));
    }
}
