//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **RunDate**: 処理対象日（クエリ範囲とオブジェクトキーの両方の元）
//! - **LogPayload**: 集計ログの生データ

pub mod log_payload;
pub mod run_date;
