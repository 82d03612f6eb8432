//! Console table rendering

use crate::scan::ScanResult;
use rust_decimal::Decimal;

fn cell(value: Option<Decimal>, dp: u32) -> String {
    value
        .map(|v| v.round_dp(dp).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format the top `max_rows` ranked rows for CLI output
pub fn format_table(result: &ScanResult, max_rows: usize) -> String {
    let rows: String = result
        .iter()
        .take(max_rows)
        .enumerate()
        .map(|(i, record)| {
            format!(
                "{:>4}  {:<8} {:>15} {:>15} {:>12}\n",
                i + 1,
                record.ticker.as_str(),
                cell(record.near_price, 2),
                cell(record.far_price, 2),
                cell(record.ratio, 4),
            )
        })
        .collect();

    let hidden = result.len().saturating_sub(max_rows);
    let overflow = if hidden > 0 {
        format!("  ... {} more rows\n", hidden)
    } else {
        String::new()
    };

    format!(
        r#"══════════════════════════════════════════════════════
               DIAGONAL SPREAD SCAN
══════════════════════════════════════════════════════
{:>4}  {:<8} {:>15} {:>15} {:>12}
───────────────────────────────────────────────────────
{}{}───────────────────────────────────────────────────────
Ranked tickers:   {}
══════════════════════════════════════════════════════"#,
        "#",
        "Ticker",
        "Week_Last_Price",
        "Year_Last_Price",
        "Spread_Ratio",
        rows,
        overflow,
        result.len(),
    )
}
