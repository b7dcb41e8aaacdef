//! Value Object 定義
//!
//! 不変で、値そのものによって同一性が決まるドメインの型。
//! 生成時にバリデーションを行い、不正な値はドメインに入れない。

use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a stroke color string (in characters)
pub const STROKE_COLOR_MAX_CHARS: usize = 32;

/// Maximum length of a chat message (in characters)
pub const CHAT_TEXT_MAX_CHARS: usize = 1000;

// ========================================
// ConnectionId
// ========================================

/// 接続 ID（トランスポート層が接続時に払い出す不透明な識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ConnectionId の生成器
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 から新しい ConnectionId を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(uuid::Uuid::new_v4().to_string())
    }
}

// ========================================
// Timestamp
// ========================================

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

// ========================================
// Stroke
// ========================================

/// キャンバス上の座標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, ValueObjectError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValueObjectError::NonFiniteCoordinate);
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// 線の色（16 進カラーコードや色名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeColor(String);

impl StrokeColor {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyStrokeColor);
        }
        if value.chars().count() > STROKE_COLOR_MAX_CHARS {
            return Err(ValueObjectError::StrokeColorTooLong(STROKE_COLOR_MAX_CHARS));
        }
        if value.chars().any(char::is_control) {
            return Err(ValueObjectError::InvalidStrokeColor(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StrokeColor {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 線の太さ（正の有限値）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWidth(f64);

impl StrokeWidth {
    pub fn new(value: f64) -> Result<Self, ValueObjectError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValueObjectError::InvalidStrokeWidth(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

// ========================================
// ChatText
// ========================================

/// チャットメッセージの本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatText(String);

impl ChatText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyChatText);
        }
        if value.chars().count() > CHAT_TEXT_MAX_CHARS {
            return Err(ValueObjectError::ChatTextTooLong(CHAT_TEXT_MAX_CHARS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChatText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
