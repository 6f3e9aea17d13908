//! # Run Date Entity
//!
//! 処理対象日（実行日の前日）を表すエンティティ

use chrono::{Local, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::errors::PipelineError;

/// クエリ文字列の値として安全な文字（英数字と `-_.~`）以外をエスケープする
const QUERY_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 処理対象日
///
/// クエリの日付範囲とアップロード先のオブジェクトキーは、どちらも
/// 同じ `RunDate` から導出する。同じ日に再実行すると同じキーを上書きする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDate(NaiveDate);

impl RunDate {
    /// `today` の前日を処理対象日にする
    ///
    /// # Errors
    ///
    /// `today` が表現可能な最小の日付の場合にエラーを返す
    pub fn yesterday_from(today: NaiveDate) -> Result<Self, PipelineError> {
        today
            .pred_opt()
            .map(Self)
            .ok_or(PipelineError::DateOutOfRange(today))
    }

    /// ローカル時刻の今日から処理対象日を求める
    pub fn yesterday() -> Result<Self, PipelineError> {
        Self::yesterday_from(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Quay API が受け付ける `M/D/YYYY` 形式（ゼロ埋めなし）
    pub fn query_date(&self) -> String {
        self.0.format("%-m/%-d/%Y").to_string()
    }

    /// クエリパラメータ用にエスケープした日付（`3%2F14%2F2021`）
    pub fn escaped_query_date(&self) -> String {
        utf8_percent_encode(&self.query_date(), QUERY_COMPONENT_ENCODE_SET).to_string()
    }

    /// アップロード先のオブジェクトキー（`YYYY-MM-DD.json`）
    pub fn object_key(&self) -> String {
        self.0.format("%Y-%m-%d.json").to_string()
    }
}
