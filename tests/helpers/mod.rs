// ==========================================
// 集成测试辅助工具
// ==========================================
// api_test_helper: 测试环境 (内存 / 临时 SQLite 文件)
// test_data_builder: 录入批次与计划场景构造
// ==========================================

#![allow(dead_code)]

pub mod api_test_helper;
pub mod test_data_builder;
