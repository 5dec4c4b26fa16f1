use tracing::{error, info};

use crate::api::TravelApi;
use crate::models::ItineraryRequest;

pub const ITINERARY_FAILURE: &str = "Failed to fetch itinerary.";

/// One itinerary round trip. Never fails: any error is logged and replaced by
/// [`ITINERARY_FAILURE`].
pub async fn fetch_itinerary<A: TravelApi>(
    api: &A,
    start: &str,
    end: &str,
    stops: &[String],
) -> String {
    let request = ItineraryRequest {
        start_location: start.to_string(),
        end_location: end.to_string(),
        stops: stops.to_vec(),
    };
    info!("Planning itinerary {start} → {end} via {} stop(s)", stops.len());

    match api.plan_itinerary(&request).await {
        Ok(plan) => plan,
        Err(e) => {
            error!("Error fetching itinerary: {e}");
            ITINERARY_FAILURE.to_string()
        }
    }
}

/// Splits the bullet text the planner returns into display lines.
pub fn plan_lines(plan: &str) -> Vec<&str> {
    plan.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}
