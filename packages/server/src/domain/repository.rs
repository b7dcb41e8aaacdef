//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Connection, DrawAction},
    value_object::ConnectionId,
};

/// Connection Registry
///
/// 現在開いている接続の集合。エラー条件はなく、未知の ID に対する操作は no-op。
/// 変更は後続の `all` / `all_except` に即座に反映される。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録する。同じ ID が既に存在する場合は何もしない。
    ///
    /// 新規に追加した場合は `true` を返す。
    async fn register(&self, connection: Connection) -> bool;

    /// 接続を登録解除し、削除したエントリを返す。
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// 接続が登録されているか
    async fn contains(&self, connection_id: &ConnectionId) -> bool;

    /// 全接続の ID（登録順）
    async fn all(&self) -> Vec<ConnectionId>;

    /// 指定した接続以外の全接続の ID（登録順）
    async fn all_except(&self, connection_id: &ConnectionId) -> Vec<ConnectionId>;

    /// 全接続のエントリ（登録順）
    async fn connections(&self) -> Vec<Connection>;

    /// 接続数
    async fn count(&self) -> usize;
}

/// Whiteboard Repository
///
/// ホワイトボードログへのアクセスをこのインターフェースだけに限定する。
#[async_trait]
pub trait WhiteboardRepository: Send + Sync {
    /// 線分を末尾に追加
    async fn append(&self, action: DrawAction);

    /// ログを全消去
    async fn reset(&self);

    /// 現在のログ（到着順）
    async fn snapshot(&self) -> Vec<DrawAction>;

    /// 現在の線分の数
    async fn stroke_count(&self) -> usize;
}
