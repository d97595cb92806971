use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 最近一次检查的记录（用于折线图）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSession {
    pub session_id: i64,
    #[serde(deserialize_with = "deserialize_finished_at")]
    pub finished_at: DateTime<Utc>,
    pub total_score: f64,
}

/// `cognitive/submit` 的响应：检查结果
///
/// 只读快照，图表渲染所需的数据形状。`recent_sessions` 经过
/// [`ResultSummary::normalized`] 之后按 `finished_at` 从旧到新排列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total_score: f64,
    #[serde(default)]
    pub category_average: BTreeMap<String, f64>,
    #[serde(default)]
    pub recent_sessions: Vec<RecentSession>,
    pub summary: String,
    pub grade: String,
    /// 旧版本服务端返回的逐题得分
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_question: Option<BTreeMap<u32, f64>>,
}

impl ResultSummary {
    /// 将 `recent_sessions` 统一为从旧到新
    pub fn normalized(mut self) -> Self {
        self.recent_sessions.sort_by_key(|s| s.finished_at);
        self
    }

    /// 最近的一次检查
    pub fn latest_session(&self) -> Option<&RecentSession> {
        self.recent_sessions.iter().max_by_key(|s| s.finished_at)
    }

    /// 平均分最高的分类
    pub fn strongest_category(&self) -> Option<(&str, f64)> {
        self.category_average
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// 平均分最低的分类
    pub fn weakest_category(&self) -> Option<(&str, f64)> {
        self.category_average
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, v)| (k.as_str(), *v))
    }
}

// 服务端有时返回不带时区的 ISO 8601 时间，按 UTC 处理
fn deserialize_finished_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct FinishedAtVisitor;

    impl<'de> Visitor<'de> for FinishedAtVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an ISO 8601 timestamp")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
                return Ok(dt.with_timezone(&Utc));
            }
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Utc.from_utc_datetime(&naive))
                .map_err(|e| E::custom(format!("invalid finishedAt '{}': {}", value, e)))
        }
    }

    deserializer.deserialize_str(FinishedAtVisitor)
}
