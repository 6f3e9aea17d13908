//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - フレームワークに依存しない
//! - Quay や Azure について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（RunDate, LogPayload）
//! - **errors**: パイプラインのエラー分類
//! - **repositories**: Repository trait（インターフェース定義のみ）

pub mod entities;
pub mod errors;
pub mod repositories;
