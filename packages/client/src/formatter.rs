//! Event formatting for the terminal.

use tebak_server::infrastructure::dto::websocket::{ServerMessage, StatusType};
use tebak_shared::time::timestamp_to_local_clock;

/// Event formatter for client display
pub struct EventFormatter;

impl EventFormatter {
    /// Format one relay frame, stamped with the time it was received
    pub fn format(message: &ServerMessage, received_at: i64) -> String {
        let clock = timestamp_to_local_clock(received_at);
        let body = match message {
            ServerMessage::Status(status) => {
                let marker = match status.r#type {
                    StatusType::Warning => "!",
                    StatusType::Success => "*",
                    StatusType::Error => "x",
                };
                format!("[{}] {}", marker, status.msg)
            }
            ServerMessage::NewGuess(guess) if guess.word.starts_with('!') => {
                format!("{} ({}) ran {}", guess.nickname, guess.unique_id, guess.word)
            }
            ServerMessage::NewGuess(guess) => {
                format!("{} ({}) guessed {}", guess.nickname, guess.unique_id, guess.word)
            }
            ServerMessage::GiftEvent(gift) => format!(
                "{} ({}) sent {} x{}",
                gift.nickname, gift.unique_id, gift.gift_name, gift.amount
            ),
            ServerMessage::Like(like) => format!(
                "{} ({}) liked x{} (total {})",
                like.nickname, like.unique_id, like.like_count, like.total_like_count
            ),
        };
        format!("\n{} {}\n", clock, body)
    }

    /// Format a raw text frame (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tebak_server::infrastructure::dto::websocket::{
        GiftEventPayload, LikePayload, NewGuessPayload, StatusPayload,
    };

    fn guess(word: &str) -> ServerMessage {
        ServerMessage::NewGuess(NewGuessPayload {
            unique_id: "budi_01".to_string(),
            nickname: "Budi".to_string(),
            word: word.to_string(),
            picture: String::new(),
        })
    }

    #[test]
    fn test_format_status() {
        // テスト項目: ステータスがマーカー付きで表示される
        // given (前提条件):
        let message = ServerMessage::Status(StatusPayload {
            r#type: StatusType::Success,
            msg: "LIVE: @alice".to_string(),
        });

        // when (操作):
        let result = EventFormatter::format(&message, 1672531200000);

        // then (期待する結果):
        assert!(result.contains("[*] LIVE: @alice"));
    }

    #[test]
    fn test_format_guess() {
        // テスト項目: 推測語が送信者とともに表示される
        // given (前提条件):
        let message = guess("APPLE");

        // when (操作):
        let result = EventFormatter::format(&message, 1672531200000);

        // then (期待する結果):
        assert!(result.contains("Budi (budi_01) guessed APPLE"));
    }

    #[test]
    fn test_format_command() {
        // テスト項目: ! で始まる語はコマンドとして表示される
        // given (前提条件):
        let message = guess("!MYRANK");

        // when (操作):
        let result = EventFormatter::format(&message, 1672531200000);

        // then (期待する結果):
        assert!(result.contains("ran !MYRANK"));
    }

    #[test]
    fn test_format_gift_and_like() {
        // テスト項目: ギフトといいねの個数が表示される
        // given (前提条件):
        let gift = ServerMessage::GiftEvent(GiftEventPayload {
            unique_id: "sari".to_string(),
            nickname: "Sari".to_string(),
            gift_name: "Rose".to_string(),
            amount: 5,
        });
        let like = ServerMessage::Like(LikePayload {
            unique_id: "dewi".to_string(),
            nickname: "Dewi".to_string(),
            like_count: 10,
            total_like_count: 250,
        });

        // when (操作):
        let gift_line = EventFormatter::format(&gift, 1672531200000);
        let like_line = EventFormatter::format(&like, 1672531200000);

        // then (期待する結果):
        assert!(gift_line.contains("sent Rose x5"));
        assert!(like_line.contains("liked x10 (total 250)"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 解析できないフレームはそのまま表示される
        // given (前提条件):
        let text = "unknown frame";

        // when (操作):
        let result = EventFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("Received: unknown frame"));
    }
}
