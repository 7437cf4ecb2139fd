// ==========================================
// 冷柜/饮水机工厂生产看板 - 产线布局
// ==========================================
// 职责: 产品线 → 有序生产区域序列 (唯一权威布局)
// 红线: 区域顺序为固定配置,不从数据推导
// 红线: CRF 零部件线始终是单区域产线
// ==========================================

use crate::domain::types::{AreaId, ProductLine};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const AREA_CRF: &str = "CRF";
pub const AREA_PRE_ASSEMBLY: &str = "Pre-Assembly";
pub const AREA_CABINET_FOAMING: &str = "Cabinet Foaming";
pub const AREA_DOOR_FOAMING: &str = "Door Foaming";
pub const AREA_CF_FINAL_LINE: &str = "CF Final Line";
pub const AREA_WD_FINAL_LINE: &str = "WD Final Line";

// ==========================================
// LayoutConfig - 布局配置 (config_kv: plant_layout)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub parts_supply_area: String,
    pub chest_freezer_areas: Vec<String>,
    pub water_dispenser_areas: Vec<String>,
    /// CRF 是否并入冷柜 WIP 流水线 (作为首道工序)
    #[serde(default)]
    pub crf_in_cf_pipeline: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            parts_supply_area: AREA_CRF.to_string(),
            chest_freezer_areas: vec![
                AREA_PRE_ASSEMBLY.to_string(),
                AREA_CABINET_FOAMING.to_string(),
                AREA_DOOR_FOAMING.to_string(),
                AREA_CF_FINAL_LINE.to_string(),
            ],
            water_dispenser_areas: vec![AREA_WD_FINAL_LINE.to_string()],
            crf_in_cf_pipeline: false,
        }
    }
}

// ==========================================
// DivisionKind - 报表事业部
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DivisionKind {
    Crf,        // CRF 零部件
    CfAssembly, // 冷柜总装
    Wd,         // 饮水机
}

impl DivisionKind {
    pub const ALL: [DivisionKind; 3] = [DivisionKind::Crf, DivisionKind::CfAssembly, DivisionKind::Wd];

    pub fn label(&self) -> &'static str {
        match self {
            DivisionKind::Crf => "CRF Division",
            DivisionKind::CfAssembly => "CF Assembly Division",
            DivisionKind::Wd => "WD Division",
        }
    }
}

impl fmt::Display for DivisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DivisionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(&[' ', '-'][..], "_");
        match key.trim_end_matches("_division") {
            "crf" => Ok(DivisionKind::Crf),
            "cf" | "cf_assembly" => Ok(DivisionKind::CfAssembly),
            "wd" => Ok(DivisionKind::Wd),
            _ => Err(format!("未知事业部: {}", s)),
        }
    }
}

// ==========================================
// Division - 事业部 (报表用流水线)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub kind: DivisionKind,
    /// 参与计划汇总的产品线
    pub lines: Vec<ProductLine>,
    /// 有序区域序列
    pub areas: Vec<AreaId>,
}

impl Division {
    pub fn covers_line(&self, line: ProductLine) -> bool {
        self.lines.contains(&line)
    }

    pub fn covers_area(&self, area: &AreaId) -> bool {
        self.areas.contains(area)
    }
}

// ==========================================
// PlantLayout - 产线布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantLayout {
    parts_supply: Vec<AreaId>,
    chest_freezer: Vec<AreaId>,
    water_dispenser: Vec<AreaId>,
    crf_in_cf_pipeline: bool,
}

impl Default for PlantLayout {
    fn default() -> Self {
        // 默认配置必定合法
        Self::build(&LayoutConfig::default())
    }
}

impl PlantLayout {
    /// 从配置构建布局
    ///
    /// # 验证规则
    /// 1. CRF 区域名称非空
    /// 2. 冷柜/饮水机至少各有一个区域
    /// 3. 全厂区域名称唯一
    pub fn from_config(config: &LayoutConfig) -> Result<Self, String> {
        if config.parts_supply_area.trim().is_empty() {
            return Err("CRF 区域名称不能为空".to_string());
        }
        if config.chest_freezer_areas.is_empty() {
            return Err("冷柜产线至少需要一个区域".to_string());
        }
        if config.water_dispenser_areas.is_empty() {
            return Err("饮水机产线至少需要一个区域".to_string());
        }

        let mut seen = HashSet::new();
        let all = std::iter::once(&config.parts_supply_area)
            .chain(config.chest_freezer_areas.iter())
            .chain(config.water_dispenser_areas.iter());
        for name in all {
            let name = name.trim();
            if name.is_empty() {
                return Err("区域名称不能为空".to_string());
            }
            if !seen.insert(name.to_string()) {
                return Err(format!("区域名称重复: {}", name));
            }
        }

        Ok(Self::build(config))
    }

    fn build(config: &LayoutConfig) -> Self {
        let to_ids = |names: &[String]| names.iter().map(|n| AreaId::new(n.as_str())).collect();
        Self {
            parts_supply: vec![AreaId::new(config.parts_supply_area.as_str())],
            chest_freezer: to_ids(&config.chest_freezer_areas),
            water_dispenser: to_ids(&config.water_dispenser_areas),
            crf_in_cf_pipeline: config.crf_in_cf_pipeline,
        }
    }

    /// 产品线自身的有序区域
    pub fn areas_of(&self, line: ProductLine) -> &[AreaId] {
        match line {
            ProductLine::PartsSupply => &self.parts_supply,
            ProductLine::ChestFreezer => &self.chest_freezer,
            ProductLine::WaterDispenser => &self.water_dispenser,
        }
    }

    /// 区域所属产品线
    pub fn line_of_area(&self, area: &AreaId) -> Option<ProductLine> {
        ProductLine::ALL
            .into_iter()
            .find(|line| self.areas_of(*line).contains(area))
    }

    /// 产品线末道工序 (月度实绩优先取数区域)
    pub fn terminal_area(&self, line: ProductLine) -> Option<&AreaId> {
        self.areas_of(line).last()
    }

    /// 全厂区域 (CRF → 冷柜 → 饮水机)
    pub fn all_areas(&self) -> Vec<AreaId> {
        ProductLine::ALL
            .into_iter()
            .flat_map(|line| self.areas_of(line).iter().cloned())
            .collect()
    }

    pub fn is_known_area(&self, area: &AreaId) -> bool {
        self.line_of_area(area).is_some()
    }

    pub fn crf_in_cf_pipeline(&self) -> bool {
        self.crf_in_cf_pipeline
    }

    /// 取指定事业部
    pub fn division(&self, kind: DivisionKind) -> Division {
        match kind {
            DivisionKind::Crf => Division {
                kind,
                lines: vec![ProductLine::PartsSupply],
                areas: self.parts_supply.clone(),
            },
            DivisionKind::CfAssembly => {
                if self.crf_in_cf_pipeline {
                    Division {
                        kind,
                        lines: vec![ProductLine::PartsSupply, ProductLine::ChestFreezer],
                        areas: self
                            .parts_supply
                            .iter()
                            .chain(self.chest_freezer.iter())
                            .cloned()
                            .collect(),
                    }
                } else {
                    Division {
                        kind,
                        lines: vec![ProductLine::ChestFreezer],
                        areas: self.chest_freezer.clone(),
                    }
                }
            }
            DivisionKind::Wd => Division {
                kind,
                lines: vec![ProductLine::WaterDispenser],
                areas: self.water_dispenser.clone(),
            },
        }
    }
}
