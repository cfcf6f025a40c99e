use divfolio_core::portfolio::performance::PositionSummary;
use rust_decimal::Decimal;
use std::fmt::Write;

const DATE_FORMAT: &str = "%d.%m.%Y";

fn money(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "n/a".to_string(),
    }
}

/// Plain text rendering of a summary, one figure per line.
pub fn render_text(summary: &PositionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dividends for {}", summary.ticker);
    for payment in &summary.payments {
        let _ = writeln!(
            out,
            "  {}  {:>8} x {:<10} = {:.2}",
            payment.date.format(DATE_FORMAT),
            payment.shares_quantity,
            payment.dividend_per_share,
            payment.total
        );
    }
    let _ = writeln!(out, "Payments total:            {:.2}", summary.payments_total);
    let _ = writeln!(out, "Profit:                    {:.2}", summary.profit);
    let _ = writeln!(out, "Average invested amount:   {}", money(summary.average_amount));
    let _ = writeln!(
        out,
        "Inflation-adjusted amount: {}",
        money(summary.inflation_adjusted_amount)
    );
    let _ = writeln!(out, "Shares balance:            {}", summary.shares_balance);
    let _ = writeln!(
        out,
        "First trade:               {}",
        summary.first_trade_date.format(DATE_FORMAT)
    );
    let _ = writeln!(
        out,
        "Last trade:                {}",
        summary.last_trade_date.format(DATE_FORMAT)
    );
    let _ = writeln!(
        out,
        "Annual percentage yield:   {}",
        money(summary.annual_percentage_yield)
    );
    let _ = writeln!(
        out,
        "Average share price:       {}",
        money(summary.average_share_price)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use divfolio_core::portfolio::performance::PaymentSummary;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_text() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let summary = PositionSummary {
            ticker: "SBER".to_string(),
            payments: vec![PaymentSummary {
                date,
                shares_quantity: 100,
                dividend_per_share: dec!(3),
                tax_percent: dec!(13),
                total: dec!(261),
            }],
            payments_total: dec!(261),
            profit: dec!(-1005),
            average_amount: Some(dec!(1005)),
            inflation_adjusted_amount: Some(dec!(744)),
            shares_balance: 100,
            first_trade_date: date,
            last_trade_date: date,
            annual_percentage_yield: None,
            average_share_price: Some(dec!(7.44)),
        };

        let text = render_text(&summary);
        assert!(text.contains("01.06.2020"));
        assert!(text.contains("Payments total:            261.00"));
        assert!(text.contains("Profit:                    -1005.00"));
        assert!(text.contains("Annual percentage yield:   n/a"));
        assert!(text.contains("Average share price:       7.44"));
    }
}
