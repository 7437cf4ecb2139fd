// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 红线: 报表渲染显式传入语言, 不依赖全局 locale
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 规范化语言代码, 未知语言回退到英文
pub fn normalize_locale(raw: &str) -> &'static str {
    let key = raw.trim().to_lowercase().replace('_', "-");
    match key.as_str() {
        "zh" | "zh-cn" | "zh-hans" => "zh-CN",
        _ => "en",
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use cr_plant_dashboard::i18n::tr;
/// let header = tr("en", "report.wip.area");
/// ```
pub fn tr(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = normalize_locale(locale)).to_string()
}

/// 翻译消息（带参数, 占位符为 %{name}）
///
/// # 示例
/// ```no_run
/// use cr_plant_dashboard::i18n::tr_with_args;
/// let msg = tr_with_args("en", "report.wip.empty", &[("division", "WD Division")]);
/// ```
pub fn tr_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = tr(locale, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh_CN"), "zh-CN");
        assert_eq!(normalize_locale("ZH"), "zh-CN");
        assert_eq!(normalize_locale("fr"), "en");
    }

    #[test]
    fn test_translate_simple() {
        assert_eq!(tr("en", "report.not_available"), "N/A");
        assert_eq!(tr("en", "report.monthly.variance"), "Variance");
        assert_eq!(tr("zh-CN", "report.monthly.variance"), "差异");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = tr_with_args("en", "report.wip.empty", &[("division", "WD Division")]);
        assert!(msg.contains("WD Division"));
        assert!(msg.contains("No production data"));

        let msg = tr_with_args("zh-CN", "report.wip.empty", &[("division", "WD Division")]);
        assert!(msg.contains("WD Division"));
        assert!(msg.contains("无生产记录"));
    }
}
