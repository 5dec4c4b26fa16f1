//! Backend gateway.
//!
//! Screens talk to the backend only through [`TravelApi`]. The native build
//! ships [`http::HttpTravelApi`] on top of `reqwest`; the web app supplies its
//! own `gloo-net` implementation. Futures are not required to be `Send` so the
//! same trait fits both the browser event loop and a tokio runtime.

#![allow(async_fn_in_trait)]

#[cfg(feature = "native")]
pub mod http;

use crate::errors::ApiError;
use crate::models::{
    AlertReceipt, AlertRequest, BucketListItem, CityData, Coordinates, EmergencyNumbers,
    ItineraryRequest, ProfileUpdate, UserProfile,
};

/// One method per backend endpoint. Implementations do a single attempt and
/// report failures as [`ApiError`]; turning those into screen text is the
/// caller's job.
pub trait TravelApi {
    /// `POST /chatbot`, returns the `response` field.
    async fn chat(&self, query: &str) -> Result<String, ApiError>;

    /// `POST /plan_itinerary`, returns the `response` field.
    async fn plan_itinerary(&self, request: &ItineraryRequest) -> Result<String, ApiError>;

    /// `POST /api/get_city_data`.
    async fn city_data(&self, city_name: &str) -> Result<CityData, ApiError>;

    /// `POST /api/get_emergency_numbers`.
    async fn emergency_numbers(&self, position: Coordinates) -> Result<EmergencyNumbers, ApiError>;

    /// `POST /api/send_emergency_alert`. Only the status matters.
    async fn send_alert(&self, alert: &AlertRequest) -> Result<AlertReceipt, ApiError>;

    /// `GET /api/user/{id}`.
    async fn user(&self, user_id: &str) -> Result<UserProfile, ApiError>;

    /// `POST /api/user/{id}` as multipart.
    async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;

    /// `POST /api/user/{id}/bucket-list`.
    async fn add_bucket_item(&self, user_id: &str, item: &BucketListItem) -> Result<UserProfile, ApiError>;

    /// `DELETE /api/user/{id}/bucket-list/{name}`.
    async fn remove_bucket_item(&self, user_id: &str, name: &str) -> Result<UserProfile, ApiError>;
}
