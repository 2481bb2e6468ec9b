// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 各书写系统十进制数字 `0` 的码位，每段连续 10 个
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0xFF10,
];

/// 十进制数字（含全角、阿拉伯-印度等）映射为 ASCII 数字
fn decimal_digit(c: char) -> Option<char> {
    let code = c as u32;
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// 将格式松散的数字文本转换为可比较的数值
///
/// 去除所有非数字、非小数点的字符（千分位逗号、货币符号等）后解析。
/// 非 ASCII 的十进制数字按数值保留，上标、分数等其他数字字符被丢弃。
/// 剩余内容为空或无法解析时返回 `0`，该函数对任何输入都不会失败。
///
/// # 参数
///
/// * `value` - 原始文本，例如 `"1,234"`
///
/// # 返回值
///
/// 非负数值，失败时为 `0.0`
pub fn clean_number(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter_map(|c| if c == '.' { Some(c) } else { decimal_digit(c) })
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned.parse::<f64>().unwrap_or(0.0)
}
