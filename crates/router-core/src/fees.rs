//! Fee breakdown of a route for display.

use router_types::{format_usd, parse_usd, FeeBreakdownLine, FeeKind, Route};
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown when a route carries no cost data at all.
pub const NO_FEE_DATA: &str = "—";

/// Shown for positive amounts that round to zero at four decimals.
pub const BELOW_DISPLAY_PRECISION: &str = "<$0.0001";

const APPROVE_GAS_TYPE: &str = "APPROVE";

struct CostLine {
	label: String,
	usd: Decimal,
	kind: FeeKind,
}

/// Breaks a route's costs into labelled lines.
///
/// Every fee and gas cost with a positive USD value becomes one line. The
/// route-level gas total is only added when no step reported gas, so gas is
/// never counted twice.
pub fn fee_breakdown(route: &Route) -> Vec<FeeBreakdownLine> {
	cost_lines(route)
		.into_iter()
		.map(|line| FeeBreakdownLine {
			label: line.label,
			amount_usd: display_usd(line.usd),
			kind: line.kind,
		})
		.collect()
}

/// Total cost of a route as `"$X.XXXX"`, or [`NO_FEE_DATA`].
///
/// Uses the route-level gas total when it is present and positive, else the
/// sum of the breakdown. Never renders a zero total.
pub fn total_fees_usd(route: &Route) -> String {
	let total = match positive_usd(route.gas_cost_usd.as_deref()) {
		Some(route_total) => route_total,
		None => cost_lines(route).iter().map(|line| line.usd).sum(),
	};

	if total > Decimal::ZERO {
		display_usd(total)
	} else {
		NO_FEE_DATA.to_string()
	}
}

fn cost_lines(route: &Route) -> Vec<CostLine> {
	let mut lines = Vec::new();

	for estimate in route.steps.iter().filter_map(|s| s.estimate.as_ref()) {
		for fee in estimate.fee_costs.iter().flatten() {
			let Some(usd) = positive_usd(fee.amount_usd.as_deref()) else {
				continue;
			};
			lines.push(CostLine {
				label: fee.name.clone().unwrap_or_else(|| "Fee".to_string()),
				usd,
				kind: classify_fee(fee.name.as_deref()),
			});
		}

		for gas in estimate.gas_costs.iter().flatten() {
			let Some(usd) = positive_usd(gas.amount_usd.as_deref()) else {
				continue;
			};
			let label = if gas.gas_type.as_deref() == Some(APPROVE_GAS_TYPE) {
				"Gas (approve)"
			} else {
				"Gas"
			};
			lines.push(CostLine {
				label: label.to_string(),
				usd,
				kind: FeeKind::Gas,
			});
		}
	}

	if !lines.iter().any(|l| l.kind == FeeKind::Gas) {
		if let Some(usd) = positive_usd(route.gas_cost_usd.as_deref()) {
			lines.push(CostLine {
				label: "Gas".to_string(),
				usd,
				kind: FeeKind::Gas,
			});
		}
	}

	lines
}

/// Formats a positive amount, never as `$0.0000`.
fn display_usd(usd: Decimal) -> String {
	if usd
		.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
		.is_zero()
	{
		BELOW_DISPLAY_PRECISION.to_string()
	} else {
		format_usd(usd)
	}
}

fn classify_fee(name: Option<&str>) -> FeeKind {
	let name = name.unwrap_or_default().to_lowercase();
	if name.contains("bridge") {
		FeeKind::Bridge
	} else if name.contains("swap") {
		FeeKind::Swap
	} else {
		FeeKind::Other
	}
}

fn positive_usd(value: Option<&str>) -> Option<Decimal> {
	value
		.and_then(parse_usd)
		.filter(|usd| *usd > Decimal::ZERO)
}
