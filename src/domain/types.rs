// ==========================================
// 冷柜/饮水机工厂生产看板 - 领域类型定义
// ==========================================
// 职责: 强类型键 (型号/区域/月份) 与产品线枚举
// 红线: 计划/实绩按强类型键存取,不使用裸字符串字典
// ==========================================

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 产品线 (Product Line)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductLine {
    ChestFreezer,   // 冷柜总装
    WaterDispenser, // 饮水机
    PartsSupply,    // CRF 零部件
}

impl ProductLine {
    /// 全部产品线 (固定顺序: CRF → 冷柜 → 饮水机)
    pub const ALL: [ProductLine; 3] = [
        ProductLine::PartsSupply,
        ProductLine::ChestFreezer,
        ProductLine::WaterDispenser,
    ];

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProductLine::ChestFreezer => "CHEST_FREEZER",
            ProductLine::WaterDispenser => "WATER_DISPENSER",
            ProductLine::PartsSupply => "PARTS_SUPPLY",
        }
    }

    /// 界面显示名称
    pub fn label(&self) -> &'static str {
        match self {
            ProductLine::ChestFreezer => "Chest Freezer",
            ProductLine::WaterDispenser => "Water Dispenser",
            ProductLine::PartsSupply => "CRF Parts",
        }
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl FromStr for ProductLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(&[' ', '-'][..], "_").as_str() {
            "CHEST_FREEZER" | "CF" => Ok(ProductLine::ChestFreezer),
            "WATER_DISPENSER" | "WD" => Ok(ProductLine::WaterDispenser),
            "PARTS_SUPPLY" | "CRF" | "CRF_PARTS" => Ok(ProductLine::PartsSupply),
            other => Err(format!("未知产品线: {}", other)),
        }
    }
}

// ==========================================
// 型号标识 (Model Id)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        ModelId::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        ModelId::new(s)
    }
}

// ==========================================
// 生产区域标识 (Area Id)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(String);

impl AreaId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaId {
    fn from(s: &str) -> Self {
        AreaId::new(s)
    }
}

impl From<String> for AreaId {
    fn from(s: String) -> Self {
        AreaId::new(s)
    }
}

// ==========================================
// 计划月份 (Period, YYYY-MM)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// 创建月份,月份越界返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// 取日期所在月份
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 当月第一天
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// 当月最后一天
    pub fn last_day(&self) -> NaiveDate {
        self.first_day() + chrono::Duration::days(i64::from(self.days_in_month()) - 1)
    }

    /// 当月天数
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
            Some(next) => (next - self.first_day()).num_days() as u32,
            None => 31,
        }
    }

    /// 日期是否落在本月
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (y, m) = raw
            .split_once('-')
            .ok_or_else(|| format!("月份格式错误 (应为 YYYY-MM): {}", raw))?;
        let year: i32 = y
            .parse()
            .map_err(|_| format!("月份年份无效: {}", raw))?;
        let month: u32 = m
            .parse()
            .map_err(|_| format!("月份月值无效: {}", raw))?;
        Period::new(year, month).ok_or_else(|| format!("月份超出范围: {}", raw))
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

// ==========================================
// 时间戳工具
// ==========================================

/// 截断到分钟 (生产记录时间粒度)
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// 生产记录时间戳的文本格式
pub const ENTRY_TS_FORMAT: &str = "%Y-%m-%d %H:%M";
