//! イベント予約（カレンダー）の集約
//!
//! フォームから届く生の文字列を `EventFields` で受け取り、
//! `EventFields::validate` で保存可能な `EventDraft` に変換します。

use crate::errors::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event の識別子（SQLite の rowid）
pub type EventId = i64;

/// 日付の入出力フォーマット
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 名前系の列の最大文字数
pub const MAX_NAME_CHARS: usize = 200;

/// 保存済みのイベント予約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub customer_name: String,
    pub name: String,
    pub date: NaiveDate,
    pub advance_payment: f64,
    pub total_payment: f64,
    pub full_day: bool,
}

impl Event {
    /// 採番済みの ID と検証済みの内容からイベントを組み立てます。
    pub fn from_draft(id: EventId, draft: &EventDraft) -> Self {
        Self {
            id,
            customer_name: draft.customer_name.clone(),
            name: draft.name.clone(),
            date: draft.date,
            advance_payment: draft.advance_payment,
            total_payment: draft.total_payment,
            full_day: draft.full_day,
        }
    }
}

/// 作成・更新リクエストの生の入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub customer_name: String,
    pub date: String,
    pub advance_payment: String,
    pub total_payment: String,
    pub full_day: bool,
}

/// 検証済みで保存可能なイベント内容
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub customer_name: String,
    pub name: String,
    pub date: NaiveDate,
    pub advance_payment: f64,
    pub total_payment: f64,
    pub full_day: bool,
}

impl EventFields {
    /// 入力を検証して `EventDraft` を返します。
    /// 最初に見つかった不備を `DomainError` として返します。
    pub fn validate(&self) -> Result<EventDraft, DomainError> {
        let name = require_name("event_name", &self.name)?;
        let customer_name = require_name("customer_name", &self.customer_name)?;
        let date = parse_date(&self.date)?;
        let advance_payment = parse_payment("advance_payment", &self.advance_payment)?;
        let total_payment = parse_payment("total_payment", &self.total_payment)?;

        Ok(EventDraft {
            customer_name,
            name,
            date,
            advance_payment,
            total_payment,
            full_day: self.full_day,
        })
    }
}

fn require_name(field: &'static str, raw: &str) -> Result<String, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    if raw.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::TooLong {
            field,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(raw.to_string())
}

/// `YYYY-MM-DD` 形式の日付を解析します。
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

fn parse_payment(field: &'static str, raw: &str) -> Result<f64, DomainError> {
    let invalid = || DomainError::InvalidPayment {
        field,
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    // NaN / inf / 負数は金額として扱わない
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// 日付の並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSort {
    Asc,
    Desc,
}

impl DateSort {
    /// `asc` / `desc` のみ受け付けます（大文字小文字を区別）。
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(DateSort::Asc),
            "desc" => Some(DateSort::Desc),
            _ => None,
        }
    }
}

/// 一覧取得の条件
///
/// `full_day` が `Some` のときはその値で絞り込み、
/// `sort` が `Some` のときは日付で並べ替えます。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub full_day: Option<bool>,
    pub sort: Option<DateSort>,
}

impl EventQuery {
    /// クエリ文字列の値から条件を組み立てます。
    /// 認識できない値は「指定なし」として扱います。
    pub fn from_params(filter_full_day: Option<&str>, sort_date: Option<&str>) -> Self {
        Self {
            full_day: filter_full_day.and_then(parse_full_day_filter),
            sort: sort_date.and_then(DateSort::parse),
        }
    }
}

fn parse_full_day_filter(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedding() -> EventFields {
        EventFields {
            name: "Wedding".into(),
            customer_name: "Alice".into(),
            date: "2024-06-01".into(),
            advance_payment: "100.0".into(),
            total_payment: "500".into(),
            full_day: true,
        }
    }

    #[test]
    fn validate_parses_date_and_payments() {
        let draft = wedding().validate().unwrap();
        assert_eq!(draft.name, "Wedding");
        assert_eq!(draft.customer_name, "Alice");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(draft.advance_payment, 100.0);
        assert_eq!(draft.total_payment, 500.0);
        assert!(draft.full_day);
    }

    #[test]
    fn validate_rejects_malformed_date() {
        let mut fields = wedding();
        fields.date = "01/06/2024".into();
        assert_eq!(
            fields.validate().unwrap_err(),
            DomainError::InvalidDate("01/06/2024".into())
        );

        fields.date = "2024-02-30".into();
        assert!(matches!(fields.validate(), Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn validate_rejects_empty_names() {
        let mut fields = wedding();
        fields.customer_name = " ".into();
        assert_eq!(
            fields.validate().unwrap_err(),
            DomainError::EmptyField("customer_name")
        );

        let mut fields = wedding();
        fields.name = String::new();
        assert_eq!(
            fields.validate().unwrap_err(),
            DomainError::EmptyField("event_name")
        );
    }

    #[test]
    fn validate_rejects_bad_payments() {
        for bad in ["", "abc", "-1", "NaN", "inf"] {
            let mut fields = wedding();
            fields.advance_payment = bad.into();
            assert!(
                matches!(
                    fields.validate(),
                    Err(DomainError::InvalidPayment { field: "advance_payment", .. })
                ),
                "accepted advance_payment={bad:?}"
            );
        }
    }

    #[test]
    fn total_below_advance_is_not_rejected() {
        // 前払い > 総額 の整合性チェックは行わない
        let mut fields = wedding();
        fields.advance_payment = "900".into();
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn query_filter_is_case_insensitive() {
        assert_eq!(EventQuery::from_params(Some("TRUE"), None).full_day, Some(true));
        assert_eq!(EventQuery::from_params(Some("False"), None).full_day, Some(false));
        assert_eq!(EventQuery::from_params(Some("bogus"), None).full_day, None);
        assert_eq!(EventQuery::from_params(None, None), EventQuery::default());
    }

    #[test]
    fn query_sort_accepts_only_exact_values() {
        assert_eq!(EventQuery::from_params(None, Some("asc")).sort, Some(DateSort::Asc));
        assert_eq!(EventQuery::from_params(None, Some("desc")).sort, Some(DateSort::Desc));
        assert_eq!(EventQuery::from_params(None, Some("DESC")).sort, None);
        assert_eq!(EventQuery::from_params(None, Some("")).sort, None);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // true/false 以外の値は常にフィルタなし
            #[test]
            fn unknown_filter_values_are_ignored(s in "[a-z]{0,8}") {
                prop_assume!(s != "true" && s != "false");
                prop_assert_eq!(EventQuery::from_params(Some(&s), None).full_day, None);
            }

            #[test]
            fn non_negative_payments_round_trip(v in 0.0f64..1.0e9) {
                let mut fields = wedding();
                fields.total_payment = v.to_string();
                prop_assert_eq!(fields.validate().unwrap().total_payment, v);
            }
        }
    }
}
