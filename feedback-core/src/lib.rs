//! Logic lõi tính toán hiển thị cho widget phản hồi đánh giá.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cấu hình điều chỉnh hành vi quét DOM và hiển thị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackConfig {
    /// Điểm tối đa dùng khi phần tử không khai báo `data-max-score`.
    pub default_max_score: f64,
    /// Độ trễ (ms) trước khi quét lại DOM sau tín hiệu re-render của host.
    pub rescan_delay_ms: i32,
    /// Giá trị trường `type` của thông điệp host kích hoạt quét lại.
    pub render_message_type: String,
    /// Màu nền khi di chuột qua một mục bằng chứng.
    pub evidence_highlight_color: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            default_max_score: 5.0,
            rescan_delay_ms: 100,
            render_message_type: "streamlit:render".to_string(),
            evidence_highlight_color: "#f0f4ff".to_string(),
        }
    }
}

/// Cấu hình từng phần do host cung cấp; trường vắng mặt giữ giá trị mặc định.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FeedbackConfigOverrides {
    #[serde(default)]
    pub default_max_score: Option<f64>,
    #[serde(default)]
    pub rescan_delay_ms: Option<i32>,
    #[serde(default)]
    pub render_message_type: Option<String>,
    #[serde(default)]
    pub evidence_highlight_color: Option<String>,
}

impl From<FeedbackConfigOverrides> for FeedbackConfig {
    fn from(overrides: FeedbackConfigOverrides) -> Self {
        let mut base = FeedbackConfig::default();
        if let Some(max_score) = overrides.default_max_score {
            base.default_max_score = max_score;
        }
        if let Some(delay) = overrides.rescan_delay_ms {
            base.rescan_delay_ms = delay;
        }
        if let Some(message_type) = overrides.render_message_type {
            base.render_message_type = message_type;
        }
        if let Some(color) = overrides.evidence_highlight_color {
            base.evidence_highlight_color = color;
        }
        base
    }
}

/// Bậc chất lượng điểm quyết định màu thanh điểm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    /// Chọn bậc theo phần trăm, xét ngưỡng cao trước.
    /// NaN không vượt qua ngưỡng nào nên rơi xuống `Poor`.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreTier::Excellent
        } else if percentage >= 60.0 {
            ScoreTier::Good
        } else if percentage >= 40.0 {
            ScoreTier::Fair
        } else {
            ScoreTier::Poor
        }
    }

    /// Gradient CSS 90 độ tương ứng với bậc.
    pub fn gradient(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "linear-gradient(90deg, #48bb78 0%, #38a169 100%)",
            ScoreTier::Good => "linear-gradient(90deg, #4299e1 0%, #3182ce 100%)",
            ScoreTier::Fair => "linear-gradient(90deg, #ecc94b 0%, #d69e2e 100%)",
            ScoreTier::Poor => "linear-gradient(90deg, #f56565 0%, #e53e3e 100%)",
        }
    }

    /// Tên bậc viết thường, dùng cho thuộc tính `data-tier`.
    pub fn level(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::Poor => "poor",
        }
    }
}

/// Phần trăm lấp đầy của thanh điểm. Nhân trước chia sau để `4/5` ra đúng `80`.
/// Không kẹp về `[0, 100]`; giá trị ngoài khoảng và NaN giữ nguyên.
pub fn score_percentage(score: f64, max_score: f64) -> f64 {
    score * 100.0 / max_score
}

/// Chuỗi width CSS từ phần trăm (`"80%"`, kể cả `"NaN%"`).
pub fn width_style(percentage: f64) -> String {
    format!("{percentage}%")
}

/// Đọc thuộc tính điểm; thiếu hoặc sai định dạng cho ra NaN.
pub fn parse_score_attr(raw: Option<&str>) -> f64 {
    raw.and_then(|text| text.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Đọc thuộc tính điểm tối đa. Thiếu hoặc rỗng dùng giá trị mặc định;
/// có mặt nhưng sai định dạng cho ra NaN.
pub fn parse_max_score_attr(raw: Option<&str>, default: f64) -> f64 {
    match raw {
        None => default,
        Some(text) if text.is_empty() => default,
        Some(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Payload thông báo gửi về host khi một lựa chọn phản hồi thay đổi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackSelection {
    pub group: String,
    pub value: Option<String>,
}

/// Vỏ thông điệp từ host; chỉ trường `type` được đọc.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HostEnvelope {
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
}

impl HostEnvelope {
    /// Thông điệp có kích hoạt quét lại hay không.
    pub fn triggers_rescan(&self, config: &FeedbackConfig) -> bool {
        self.message_type.as_deref() == Some(config.render_message_type.as_str())
    }
}

/// Một thanh điểm đã tính sẵn thông số hiển thị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBar {
    pub label: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub tier: ScoreTier,
    pub width: String,
    pub gradient: String,
}

impl ScoreBar {
    /// Dựng thanh điểm với các trường dẫn xuất đã tính.
    pub fn new(label: impl Into<String>, score: f64, max_score: f64) -> Self {
        let percentage = score_percentage(score, max_score);
        let tier = ScoreTier::from_percentage(percentage);
        Self {
            label: label.into(),
            score,
            max_score,
            percentage,
            tier,
            width: width_style(percentage),
            gradient: tier.gradient().to_string(),
        }
    }
}

/// Tổng hợp scorecard sau khi tính toán.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScorecardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub overall_score: Option<f64>,
    pub bars: Vec<ScoreBar>,
}

impl ScorecardSnapshot {
    /// Khởi tạo snapshot từ các thanh điểm đã dựng, giữ nguyên thứ tự khai báo.
    pub fn new(overall_score: Option<f64>, bars: Vec<ScoreBar>) -> Self {
        Self {
            generated_at: Utc::now(),
            overall_score,
            bars,
        }
    }

    /// Danh sách thanh điểm theo thứ tự tiêu chí.
    pub fn bars(&self) -> &[ScoreBar] {
        &self.bars
    }

    /// Số thanh điểm thuộc một bậc.
    pub fn count_in_tier(&self, tier: ScoreTier) -> usize {
        self.bars.iter().filter(|bar| bar.tier == tier).count()
    }
}

/// Lỗi chung khi dựng scorecard.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Dữ liệu đầu vào thiếu thông tin tối thiểu")]
    MissingData,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Lỗi khác: {0}")]
    Other(String),
}

/// Tiện ích dựng snapshot rỗng (dùng cho mock/testing).
pub fn empty_scorecard() -> ScorecardSnapshot {
    ScorecardSnapshot {
        generated_at: Utc::now(),
        overall_score: None,
        bars: Vec::new(),
    }
}
