/// 分值之和与总分比较时允许的误差
pub const PORTION_TOLERANCE: f64 = 1e-3;

/// 两个分值之差小于误差时视为相等
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < PORTION_TOLERANCE
}

/// 求和时使用 Kahan 补偿，避免多项小数累加的误差
pub fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for value in values {
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

/// 提交的原始文件名只保留最后一段，去掉首尾空白
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if last.is_empty() || last == "." || last == ".." {
        None
    } else {
        Some(last.to_string())
    }
}
