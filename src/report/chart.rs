//! Text bar charts for the reports screen

use rust_decimal::prelude::*;

const BAR: char = '█';

/// Render horizontal bars scaled to the largest value
///
/// Each line is `<label padded>  <bar>`; the caller appends any value
/// annotation. Non-positive values draw no bar.
pub fn bar_chart(rows: &[(String, Decimal)], width: usize) -> Vec<String> {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(Decimal::ZERO);

    rows.iter()
        .map(|(label, value)| {
            let len = bar_length(*value, max, width);
            format!(
                "{:<label_width$}  {}",
                label,
                BAR.to_string().repeat(len),
                label_width = label_width
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// Bar length for `value` on a scale where `max` fills `width`
fn bar_length(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO || width == 0 {
        return 0;
    }
    let scaled = (value / max * Decimal::from(width as u64)).round();
    // Any positive value stays visible
    scaled.to_usize().unwrap_or(0).clamp(1, width)
}
