// ==========================================
// 冷柜/饮水机工厂生产看板 - 录入校验器
// ==========================================
// 职责: 生产录入批次的区域/型号/类别/数量校验, 输入文本解析
// 红线: 任一行不合法 → 整批拒绝, 返回逐行原因
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, EntryViolation};
use crate::domain::layout::{DivisionKind, PlantLayout};
use crate::domain::production::StagedEntry;
use crate::domain::registry::RegistrySnapshot;
use crate::domain::types::{AreaId, Period, ProductLine};

// ==========================================
// EntryValidator - 录入校验器
// ==========================================

/// 录入校验器
///
/// 职责：
/// 1. 区域必须是布局中的已知区域
/// 2. 班组长非空, 数量 > 0
/// 3. 型号已注册、已启用、且属于区域所在产品线
/// 4. 类别属于区域所在产品线
pub struct EntryValidator {
    layout: Arc<PlantLayout>,
}

impl EntryValidator {
    pub fn new(layout: Arc<PlantLayout>) -> Self {
        Self { layout }
    }

    /// 校验区域并返回其产品线
    pub fn validate_area(&self, area: &AreaId) -> ApiResult<ProductLine> {
        self.layout.line_of_area(area).ok_or_else(|| {
            ApiError::ValidationError(format!("未知生产区域: {}", area))
        })
    }

    /// 单行校验, 返回该行全部违规
    pub fn check_entry(
        &self,
        index: usize,
        line: ProductLine,
        entry: &StagedEntry,
        registry: &RegistrySnapshot,
    ) -> Vec<EntryViolation> {
        let mut violations = Vec::new();
        let mut push = |violation_type: &str, reason: String| {
            violations.push(EntryViolation {
                index,
                violation_type: violation_type.to_string(),
                reason,
            });
        };

        if entry.supervisor.trim().is_empty() {
            push("SUPERVISOR", "班组长姓名不能为空".to_string());
        }
        if entry.quantity == 0 {
            push("QUANTITY", "生产数量必须大于 0".to_string());
        }

        match registry.find_model(&entry.model) {
            None => push("MODEL", format!("未注册型号: {}", entry.model)),
            Some(m) if !m.active => push("MODEL", format!("型号已停用: {}", entry.model)),
            Some(m) if m.line != line => push(
                "MODEL",
                format!("型号 {} 不属于产品线 {}", entry.model, line.label()),
            ),
            Some(_) => {}
        }

        if !registry.category_allowed(&entry.category, line) {
            push(
                "CATEGORY",
                format!("类别 '{}' 不属于产品线 {}", entry.category.trim(), line.label()),
            );
        }

        violations
    }

    /// 整批校验
    ///
    /// # 返回
    /// - Ok(ProductLine): 区域所在产品线
    /// - Err(ValidationError): 区域未知
    /// - Err(EntryValidationError): 任一行不合法
    pub fn validate_batch(
        &self,
        area: &AreaId,
        entries: &[StagedEntry],
        registry: &RegistrySnapshot,
    ) -> ApiResult<ProductLine> {
        let line = self.validate_area(area)?;

        let violations: Vec<EntryViolation> = entries
            .iter()
            .enumerate()
            .flat_map(|(i, e)| self.check_entry(i, line, e, registry))
            .collect();

        if !violations.is_empty() {
            let mut rows: Vec<usize> = violations.iter().map(|v| v.index).collect();
            rows.dedup();
            return Err(ApiError::EntryValidationError {
                reason: format!("{}行录入不合法 (区域 {})", rows.len(), area),
                violations,
            });
        }

        Ok(line)
    }
}

// ==========================================
// 输入解析
// ==========================================

/// 解析月份 (YYYY-MM)
pub fn parse_period(raw: &str) -> ApiResult<Period> {
    raw.trim()
        .parse::<Period>()
        .map_err(|e| ApiError::ValidationError(format!("月份格式错误 '{}': {}", raw, e)))
}

/// 解析日期 (YYYY-MM-DD)
pub fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ApiError::ValidationError(format!("日期格式错误 '{}': {}", raw, e)))
}

/// 解析事业部
pub fn parse_division(raw: &str) -> ApiResult<DivisionKind> {
    raw.parse::<DivisionKind>()
        .map_err(ApiError::InvalidInput)
}

/// 解析产品线
pub fn parse_line(raw: &str) -> ApiResult<ProductLine> {
    raw.parse::<ProductLine>().map_err(ApiError::InvalidInput)
}

/// 解析区域过滤条件 ("All" 或空表示不过滤)
pub fn parse_area_filter(layout: &PlantLayout, raw: Option<&str>) -> ApiResult<Option<AreaId>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => {
            let area = AreaId::new(s);
            if layout.is_known_area(&area) {
                Ok(Some(area))
            } else {
                Err(ApiError::InvalidInput(format!("未知生产区域: {}", s)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::{default_categories, default_models};

    fn validator() -> EntryValidator {
        EntryValidator::new(Arc::new(PlantLayout::default()))
    }

    fn registry() -> RegistrySnapshot {
        let mut models = default_models();
        models[3].active = false; // CF-Model-200
        RegistrySnapshot::new(models, default_categories())
    }

    #[test]
    fn test_valid_batch_returns_line() {
        let line = validator()
            .validate_batch(
                &AreaId::from("Door Foaming"),
                &[StagedEntry::new("Ravi", "Chest Freezer", "CF-Model-100", 3)],
                &registry(),
            )
            .unwrap();
        assert_eq!(line, ProductLine::ChestFreezer);
    }

    #[test]
    fn test_unknown_area_rejected() {
        let err = validator()
            .validate_batch(&AreaId::from("Paint Shop"), &[], &registry())
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[test]
    fn test_collects_every_violation() {
        let entries = vec![
            StagedEntry::new("", "Chest Freezer", "CF-Model-100", 0),
            StagedEntry::new("Ravi", "Chest Freezer", "CF-Model-200", 1),
            StagedEntry::new("Ravi", "CRF Parts", "CRF-Part-A", 1),
        ];
        let err = validator()
            .validate_batch(&AreaId::from("Pre-Assembly"), &entries, &registry())
            .unwrap_err();

        match err {
            ApiError::EntryValidationError { violations, .. } => {
                let kinds: Vec<(usize, &str)> = violations
                    .iter()
                    .map(|v| (v.index, v.violation_type.as_str()))
                    .collect();
                assert_eq!(
                    kinds,
                    vec![
                        (0, "SUPERVISOR"),
                        (0, "QUANTITY"),
                        (1, "MODEL"),
                        (2, "MODEL"),
                        (2, "CATEGORY"),
                    ]
                );
            }
            other => panic!("Expected EntryValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_period("2025-11").unwrap(), Period::new(2025, 11).unwrap());
        assert!(matches!(
            parse_period("2025-13"),
            Err(ApiError::ValidationError(_))
        ));
        assert!(parse_date("2025-11-31").is_err());

        let layout = PlantLayout::default();
        assert_eq!(parse_area_filter(&layout, Some("All")).unwrap(), None);
        assert_eq!(
            parse_area_filter(&layout, Some("CRF")).unwrap(),
            Some(AreaId::from("CRF"))
        );
        assert!(parse_area_filter(&layout, Some("Nowhere")).is_err());
    }
}
