//! 日记接口的数据结构
//!
//! 日记接口沿用服务端的 snake_case 字段名，日期格式为 `YYYY-MM-DD`

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `diary/list` 返回的一条日记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryResponse {
    pub entry_id: i64,
    pub user_id: u32,
    pub entry_date: NaiveDate,
    pub mood_code: String,
    pub content: String,
    /// 服务端生成的时间戳，原样保留
    pub created_at: String,
}

/// 新建或修改日记时提交的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub entry_date: NaiveDate,
    pub mood_code: String,
    pub content: String,
}

/// `diary/create` 的返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDiary {
    pub entry_id: i64,
    pub user_id: u32,
    pub entry_date: NaiveDate,
    pub mood_code: String,
    pub content: String,
}

impl From<DiaryResponse> for DiaryEntry {
    fn from(res: DiaryResponse) -> Self {
        Self {
            entry_date: res.entry_date,
            mood_code: res.mood_code,
            content: res.content,
        }
    }
}

/// 按日期整理日记列表，同一天有多条时保留后出现的一条
pub fn entries_by_date(list: Vec<DiaryResponse>) -> BTreeMap<NaiveDate, DiaryEntry> {
    list.into_iter()
        .map(|res| (res.entry_date, DiaryEntry::from(res)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_entry_wire_shape() {
        let entry = DiaryEntry {
            entry_date: date("2025-11-09"),
            mood_code: "행복함".to_string(),
            content: "좋은 날이었다.".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            serde_json::json!({
                "entry_date": "2025-11-09",
                "mood_code": "행복함",
                "content": "좋은 날이었다."
            })
        );
    }

    #[test]
    fn test_entries_by_date_keeps_last() {
        let list: Vec<DiaryResponse> = serde_json::from_str(
            r#"[
                {"entry_id": 1, "user_id": 2, "entry_date": "2025-11-02", "mood_code": "우울함", "content": "a", "created_at": "2025-11-02T21:00:00"},
                {"entry_id": 2, "user_id": 2, "entry_date": "2025-11-01", "mood_code": "보통", "content": "b", "created_at": "2025-11-01T21:00:00"},
                {"entry_id": 3, "user_id": 2, "entry_date": "2025-11-02", "mood_code": "행복함", "content": "c", "created_at": "2025-11-02T22:00:00"}
            ]"#,
        )
        .unwrap();

        let by_date = entries_by_date(list);
        assert_eq!(by_date.len(), 2);
        assert_eq!(by_date[&date("2025-11-02")].content, "c");
        assert_eq!(by_date.keys().next(), Some(&date("2025-11-01")));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let res = serde_json::from_str::<ResultDiary>(
            r#"{"entry_id": 1, "user_id": 2, "entry_date": "11/09/2025", "mood_code": "보통", "content": ""}"#,
        );
        assert!(res.is_err());
    }
}
