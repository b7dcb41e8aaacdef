//! WebSocket message DTOs.
//!
//! Every frame is a JSON object with a snake_case `"type"` discriminant:
//!
//! ```text
//! {"type":"draw","x0":0,"y0":0,"x1":10,"y1":10,"color":"#000","width":3}
//! {"type":"clear_canvas"}
//! {"type":"offer","payload":{"sdp":"..."}}
//! {"type":"send_message","text":"hello"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line segment on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawMessage {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: String,
    pub width: f64,
}

/// Client → server messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Draw(DrawMessage),
    ClearCanvas,
    Offer { payload: Value },
    Answer { payload: Value },
    IceCandidate { payload: Value },
    SendMessage { text: String },
}

impl ClientMessage {
    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::Draw(_) => "draw",
            ClientMessage::ClearCanvas => "clear_canvas",
            ClientMessage::Offer { .. } => "offer",
            ClientMessage::Answer { .. } => "answer",
            ClientMessage::IceCandidate { .. } => "ice_candidate",
            ClientMessage::SendMessage { .. } => "send_message",
        }
    }
}

/// Server → client messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Draw(DrawMessage),
    ClearCanvas,
    Offer { payload: Value },
    Answer { payload: Value },
    IceCandidate { payload: Value },
    ReceiveMessage { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_draw_message_with_integer_coordinates() {
        // テスト項目: 整数で送られてきた座標も数値として受け付ける
        // given (前提条件):
        let text = r##"{"type":"draw","x0":0,"y0":0,"x1":10,"y1":10,"color":"#000","width":3}"##;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Draw(DrawMessage {
                x0: 0.0,
                y0: 0.0,
                x1: 10.0,
                y1: 10.0,
                color: "#000".to_string(),
                width: 3.0,
            })
        );
    }

    #[test]
    fn test_parse_clear_canvas_ignores_extra_fields() {
        // テスト項目: clear_canvas はペイロードを持たず、余分なフィールドは無視される
        // given (前提条件):
        let text = r#"{"type":"clear_canvas","by":"someone"}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(message, ClientMessage::ClearCanvas);
    }

    #[test]
    fn test_parse_offer_keeps_payload_opaque() {
        // テスト項目: offer のペイロードは解釈されずそのまま保持される
        // given (前提条件):
        let text = r#"{"type":"offer","payload":{"sdp":"X","type":"offer","extra":[1,2]}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Offer {
                payload: json!({"sdp": "X", "type": "offer", "extra": [1, 2]})
            }
        );
    }

    #[test]
    fn test_malformed_messages_are_rejected() {
        // テスト項目: 型が違う・フィールドが欠けている・未知の type はパースエラー
        // given (前提条件):
        let inputs = [
            r##"{"type":"draw","x0":"a","y0":0,"x1":1,"y1":1,"color":"#000","width":3}"##,
            r#"{"type":"draw","x0":0,"y0":0}"#,
            r#"{"type":"offer"}"#,
            r#"{"type":"teleport"}"#,
            r#"{"x0":0}"#,
            "not json",
        ];

        for input in inputs {
            // when (操作):
            let result = serde_json::from_str::<ClientMessage>(input);

            // then (期待する結果):
            assert!(result.is_err(), "expected parse error for {input}");
        }
    }

    #[test]
    fn test_serialize_server_messages() {
        // テスト項目: サーバーからのメッセージが type 付きの JSON になる
        // given (前提条件):
        let clear = ServerMessage::ClearCanvas;
        let chat = ServerMessage::ReceiveMessage {
            text: "hi".to_string(),
        };
        let candidate = ServerMessage::IceCandidate {
            payload: json!({"candidate": "c1"}),
        };

        // when (操作):
        let clear = serde_json::to_value(&clear).unwrap();
        let chat = serde_json::to_value(&chat).unwrap();
        let candidate = serde_json::to_value(&candidate).unwrap();

        // then (期待する結果):
        assert_eq!(clear, json!({"type": "clear_canvas"}));
        assert_eq!(chat, json!({"type": "receive_message", "text": "hi"}));
        assert_eq!(
            candidate,
            json!({"type": "ice_candidate", "payload": {"candidate": "c1"}})
        );
    }
}
