// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// 用途: 把判定原因代码 (reason code) 渲染为用户可读消息
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 已登记译文的判定原因代码全集
///
/// 与 domain::promotion::reason 及 locales/ 目录保持一致；
/// 新增 reason code 时必须同步登记到这里和两份语言文件
const REGISTERED_REASON_CODES: &[&str] = &[
    crate::domain::promotion::reason::NO_FAILURES,
    crate::domain::promotion::reason::FAIL_COUNT_MEETS_THRESHOLD,
    crate::domain::promotion::reason::FINAL_YEAR_NO_CARRY,
    crate::domain::promotion::reason::CORE_SUBJECT_FAILED_BLOCKS_CARRY,
    crate::domain::promotion::reason::FAIL_COUNT_EXCEEDS_CARRY_LIMIT,
    crate::domain::promotion::reason::CARRIED_WITHIN_LIMIT,
    crate::domain::promotion::reason::NOTE_HAS_ABSENCE_BLOCKED,
];

/// 渲染判定原因代码
///
/// # 参数
/// - code: PromotionDecision.reason / notes 中的代码（如 "no_failures"）
///
/// # 返回
/// - 当前语言下的可读消息；未登记的代码原样返回（不经过 t! 的缺失回落）
pub fn reason_message(code: &str) -> String {
    if !REGISTERED_REASON_CODES.contains(&code) {
        return code.to_string();
    }
    let key = format!("promotion.reason.{}", code);
    rust_i18n::t!(&key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_reason_message_known_code() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let msg = reason_message("no_failures");
        assert_ne!(msg, "no_failures"); // 已登记的代码必须有译文
    }

    #[test]
    fn test_reason_message_unknown_code_passthrough() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let msg = reason_message("not_a_real_code");
        assert_eq!(msg, "not_a_real_code");
    }

    #[test]
    fn test_all_registered_codes_have_translations() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        for locale in ["zh-CN", "en"] {
            set_locale(locale);
            for code in REGISTERED_REASON_CODES {
                let msg = reason_message(code);
                assert_ne!(msg, *code, "{} 缺少 {} 译文", code, locale);
            }
        }
    }

    #[test]
    fn test_locale_switch() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(current_locale(), "en");
        let en = reason_message("carried_within_limit");
        set_locale("zh-CN");
        let zh = reason_message("carried_within_limit");
        assert_ne!(en, zh);
    }
}
