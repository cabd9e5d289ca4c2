//! Ranking of candidate routes.
//!
//! Pure functions over an already-fetched route list. Destination amounts are
//! compared as `U256` since base-unit values routinely exceed 2^53.

use router_types::{Route, RouteLabel, RouteRankings, RECOMMENDED_TAG};

/// Finds the fastest, cheapest and simplest routes.
///
/// - fastest: lowest first-step execution duration; a missing duration counts
///   as zero
/// - cheapest: highest destination amount; unparseable amounts count as zero
/// - simplest: fewest steps
///
/// The first occurrence wins ties. The recommended route is the first one
/// the provider tagged, falling back to the cheapest. An empty list yields
/// all-zero indices.
pub fn compute_rankings(routes: &[Route]) -> RouteRankings {
	let Some(first) = routes.first() else {
		return RouteRankings::default();
	};

	let mut rankings = RouteRankings::default();
	let mut min_time = first.first_step_duration();
	let mut max_receive = first.to_amount_value();
	let mut min_steps = first.steps.len();

	for (i, route) in routes.iter().enumerate().skip(1) {
		let time = route.first_step_duration();
		if time < min_time {
			min_time = time;
			rankings.fastest_index = i;
		}
		let receive = route.to_amount_value();
		if receive > max_receive {
			max_receive = receive;
			rankings.cheapest_index = i;
		}
		if route.steps.len() < min_steps {
			min_steps = route.steps.len();
			rankings.simplest_index = i;
		}
	}

	rankings.recommended_index = routes
		.iter()
		.position(|r| r.has_tag(RECOMMENDED_TAG))
		.unwrap_or(rankings.cheapest_index);
	rankings
}

/// Labels of the route at `index`, most important first.
pub fn route_labels(index: usize, rankings: &RouteRankings) -> Vec<RouteLabel> {
	[
		(rankings.recommended_index, RouteLabel::Recommended),
		(rankings.fastest_index, RouteLabel::Fastest),
		(rankings.cheapest_index, RouteLabel::Cheapest),
		(rankings.simplest_index, RouteLabel::Simplest),
	]
	.into_iter()
	.filter(|(ranked, _)| *ranked == index)
	.map(|(_, label)| label)
	.collect()
}

/// One-line reason for showing the route at `index`.
pub fn route_explanation(index: usize, rankings: &RouteRankings) -> &'static str {
	let labels = route_labels(index, rankings);
	if labels.contains(&RouteLabel::Recommended) {
		"Best net received amount."
	} else if labels.contains(&RouteLabel::Cheapest) {
		"Highest amount you receive after fees."
	} else if labels.contains(&RouteLabel::Fastest) {
		"Fastest estimated execution."
	} else if labels.contains(&RouteLabel::Simplest) {
		"Fewest steps (simplest path)."
	} else {
		"Alternative route."
	}
}
