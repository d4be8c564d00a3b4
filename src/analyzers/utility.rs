/// Chart colours assigned to ranked entries by position.
pub const CHART_COLORS: [&str; 10] = [
    "#3b82f6", // blue
    "#10b981", // emerald
    "#8b5cf6", // purple
    "#f59e0b", // amber
    "#06b6d4", // cyan
    "#f43f5e", // rose
    "#ec4899", // pink
    "#84cc16", // lime
    "#14b8a6", // teal
    "#a855f7", // violet
];

/// Colour for the `index`-th ranked entry, wrapping around the palette.
pub fn chart_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

/// Percentage of `part` in `total`. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Integer mean rounded to the nearest whole number. Returns 0 for `count == 0`.
pub fn rounded_mean(sum: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i64
}
