use crate::application::collect::collect_unique_company_ids;
use crate::application::investments::fetch_investments;
use crate::domain::error::AdminError;
use crate::domain::model::{CompanyRecord, Investment, UNKNOWN_HOLDING_NAME};
use crate::state::AppState;
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Write;

pub const REPORT_HEADER: &str = "|User|First Name|Last Name|Date|Holding|Value|";

/// Fetch investments, resolve every referenced company and render the report.
///
/// Company lookups that fail show up as "Unknown Holding" rows. A failure to
/// fetch or decode the investments aborts the whole report.
pub async fn generate_report(state: &AppState) -> Result<String, AdminError> {
    let investments = fetch_investments(state).await?;
    let ids = collect_unique_company_ids(&investments);
    tracing::info!(
        investments = investments.len(),
        companies = ids.len(),
        "generating holdings report"
    );

    let companies = state.resolver.resolve_all(ids).await;
    Ok(render_report(&investments, &companies))
}

/// Render one row per (investment, holding) pair under [`REPORT_HEADER`].
pub fn render_report(
    investments: &[Investment],
    companies: &HashMap<String, CompanyRecord>,
) -> String {
    let mut csv = String::new();
    writeln!(csv, "{}", REPORT_HEADER).ok();

    for investment in investments {
        for holding in &investment.holdings {
            let company_name = companies
                .get(&holding.id)
                .map(|company| company.name.as_str())
                .unwrap_or(UNKNOWN_HOLDING_NAME);
            let value = investment.investment_total * holding.investment_percentage;

            writeln!(
                csv,
                "|{}|{}|{}|{}|{}|{}|",
                investment.user_id,
                investment.first_name,
                investment.last_name,
                investment.date,
                company_name,
                format_value(value)
            )
            .ok();
        }
    }

    csv
}

/// Format `value` with exactly two decimals, the way JavaScript's `toFixed(2)` does.
///
/// Rounding looks at the exact binary value, so `1.005` (really `1.00499...`)
/// gives `1.00`, while exact ties such as `0.125` round away from zero to `0.13`.
/// `-0.0` has no sign; other negatives keep theirs, even when they round to zero.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // Every finite f64 has a terminating expansion within 1074 fractional digits.
    let exact = format!("{:.1074}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().collect();
    digits.extend(fraction.bytes().chain(std::iter::repeat(b'0')).take(2));

    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let whole: String = digits[..split].iter().map(|d| char::from(*d)).collect();
    let cents: String = digits[split..].iter().map(|d| char::from(*d)).collect();
    format!("{}{}.{}", sign, whole, cents)
}

/// Push a rendered report to the investments service export endpoint.
pub async fn export_report(state: &AppState, csv: &str) -> Result<(), AdminError> {
    let url = state.config.export_url();
    state.fetcher.post_json(&url, &json!({ "csv": csv })).await?;
    tracing::info!(%url, bytes = csv.len(), "report exported");
    Ok(())
}
