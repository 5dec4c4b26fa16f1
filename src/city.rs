//! City detail page.

use percent_encoding::percent_decode_str;
use tracing::{error, info};

use crate::api::TravelApi;
use crate::config::encode_segment;
use crate::errors::ApiError;
use crate::models::CityData;

pub const INVALID_CITY: &str = "Invalid city name.";
pub const CITY_LOAD_FAILURE: &str = "Failed to load city data. Please try again later.";
pub const CITY_NOT_FOUND: &str = "City not found.";

/// Route of the detail page for `name`.
pub fn route_for(name: &str) -> String {
    format!("/city/{}", encode_segment(name))
}

/// Undoes the route encoding. Invalid UTF-8 is replaced, not rejected.
pub fn decode_route_name(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().trim().to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub enum CityState {
    Loading,
    Loaded(CityData),
    NotFound,
    Failed(String),
}

/// Owns the fetched record for as long as the page is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPage {
    pub city_name: String,
    pub state: CityState,
}

impl CityPage {
    /// Starts the page for a raw route parameter. An empty name fails
    /// immediately without a request.
    pub fn open(route_param: &str) -> Self {
        let city_name = decode_route_name(route_param);
        let state = if city_name.is_empty() {
            CityState::Failed(INVALID_CITY.to_string())
        } else {
            CityState::Loading
        };
        Self { city_name, state }
    }

    /// The name to request, while a request is due.
    pub fn pending_request(&self) -> Option<&str> {
        matches!(self.state, CityState::Loading).then_some(self.city_name.as_str())
    }

    /// Folds the outcome in. Results for another city, or after the page has
    /// settled, are dropped.
    pub fn apply(&mut self, requested: &str, result: Result<CityData, ApiError>) {
        if requested != self.city_name || !matches!(self.state, CityState::Loading) {
            info!("Dropping stale city result for {requested}");
            return;
        }
        self.state = match result {
            Ok(data) => CityState::Loaded(data),
            Err(e) if e.is_not_found() => CityState::NotFound,
            Err(e) => {
                error!("Error fetching city data for {requested}: {e}");
                CityState::Failed(CITY_LOAD_FAILURE.to_string())
            }
        };
    }

    pub async fn load<A: TravelApi>(api: &A, route_param: &str) -> Self {
        let mut page = Self::open(route_param);
        if let Some(name) = page.pending_request().map(str::to_string) {
            let result = api.city_data(&name).await;
            page.apply(&name, result);
        }
        page
    }

    pub fn data(&self) -> Option<&CityData> {
        match &self.state {
            CityState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_city, Call, FakeApi};

    #[test]
    fn route_round_trips_names_with_spaces() {
        let route = route_for("Mexico City");
        assert_eq!(route, "/city/Mexico%20City");
        assert_eq!(decode_route_name(route.trim_start_matches("/city/")), "Mexico City");
    }

    #[test]
    fn empty_name_fails_without_a_request() {
        let page = CityPage::open("%20");
        assert_eq!(page.state, CityState::Failed(INVALID_CITY.to_string()));
        assert_eq!(page.pending_request(), None);
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut page = CityPage::open("Rome");
        page.apply("Paris", Ok(sample_city("Paris")));
        assert_eq!(page.state, CityState::Loading);

        page.apply("Rome", Ok(sample_city("Rome")));
        page.apply("Rome", Err(ApiError::Status { status: 500 }));
        assert_eq!(page.data().unwrap().city_name, "Rome");
    }

    #[tokio::test]
    async fn load_posts_the_decoded_name() {
        let api = FakeApi { city: Ok(sample_city("New York")), ..FakeApi::default() };
        let page = CityPage::load(&api, "New%20York").await;
        assert_eq!(api.calls(), vec![Call::City("New York".into())]);
        assert_eq!(page.data().unwrap().description, "New York is lovely.");
    }

    #[tokio::test]
    async fn server_failure_shows_the_error_state() {
        let api = FakeApi { city: Err(ApiError::Status { status: 500 }), ..FakeApi::default() };
        let page = CityPage::load(&api, "Rome").await;
        assert_eq!(page.state, CityState::Failed(CITY_LOAD_FAILURE.to_string()));
    }

    #[tokio::test]
    async fn missing_city_is_not_found() {
        let api = FakeApi { city: Err(ApiError::Status { status: 404 }), ..FakeApi::default() };
        let page = CityPage::load(&api, "Atlantis").await;
        assert_eq!(page.state, CityState::NotFound);
    }
}
