use crate::domain::model::Investment;
use std::collections::HashSet;

/// Distinct company ids referenced by the holdings of `investments`.
pub fn collect_unique_company_ids(investments: &[Investment]) -> HashSet<String> {
    investments
        .iter()
        .flat_map(|investment| investment.holdings.iter())
        .map(|holding| holding.id.clone())
        .collect()
}
