//! Display views derived from a route.

use router_types::{shorten_address, ApprovalInfo, Route, StepDetail, Token};

const MISSING: &str = "—";

/// Approval the user must grant before the route's first step, if any.
///
/// Taken from the first step's `approvalAddress` unless the step says the
/// approval can be skipped.
pub fn approval_info(route: &Route) -> ApprovalInfo {
	let Some(step) = route.first_step() else {
		return ApprovalInfo::default();
	};
	let Some(estimate) = step.estimate.as_ref() else {
		return ApprovalInfo::default();
	};
	let Some(spender) = estimate.approval_address.as_deref().filter(|a| !a.is_empty()) else {
		return ApprovalInfo::default();
	};
	if estimate.skip_approval.unwrap_or(false) {
		return ApprovalInfo::default();
	}

	let token_symbol = step
		.action
		.as_ref()
		.and_then(|a| a.from_token.as_ref())
		.and_then(|t| t.symbol.clone())
		.unwrap_or_else(|| ApprovalInfo::default().token_symbol);

	ApprovalInfo {
		required: true,
		token_symbol,
		spender_address: shorten_address(spender),
		amount: estimate.from_amount.clone().unwrap_or_default(),
	}
}

/// One flattened entry per route step.
pub fn step_details(route: &Route) -> Vec<StepDetail> {
	route
		.steps
		.iter()
		.map(|step| {
			let action = step.action.as_ref();
			let details = step.tool_details.as_ref();
			let symbol = |token: Option<&Token>| {
				token
					.and_then(|t| t.symbol.clone())
					.unwrap_or_else(|| MISSING.to_string())
			};

			StepDetail {
				step_type: step.step_type.clone().unwrap_or_else(|| "unknown".to_string()),
				from_chain_id: action.and_then(|a| a.from_chain_id).unwrap_or(0),
				to_chain_id: action.and_then(|a| a.to_chain_id).unwrap_or(0),
				token_in: symbol(action.and_then(|a| a.from_token.as_ref())),
				token_out: symbol(action.and_then(|a| a.to_token.as_ref())),
				tool_name: details
					.and_then(|d| d.name.clone())
					.or_else(|| step.tool.clone())
					.unwrap_or_else(|| MISSING.to_string()),
				tool_key: details
					.and_then(|d| d.key.clone())
					.or_else(|| step.tool.clone())
					.unwrap_or_default(),
				execution_duration_sec: step.estimate.as_ref().and_then(|e| e.execution_duration),
			}
		})
		.collect()
}
