//! In-memory [`TravelApi`] for unit tests.

use std::cell::RefCell;

use crate::api::TravelApi;
use crate::errors::ApiError;
use crate::models::{
    AlertReceipt, AlertRequest, BucketListItem, CityData, Coordinates, EmergencyNumberSet,
    EmergencyNumbers, ItineraryRequest, ProfileUpdate, UserProfile,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Chat(String),
    Itinerary(ItineraryRequest),
    City(String),
    Numbers(Coordinates),
    Alert(AlertRequest),
    User(String),
    Update(String, ProfileUpdate),
    AddBucket(String, BucketListItem),
    RemoveBucket(String, String),
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: "user123".into(),
        profile_picture: None,
        name: "Test User".into(),
        bio: "This is a test user.".into(),
        age: 25,
        height: "5'8\"".into(),
        weight: "150lbs".into(),
        trips: 5,
        countries: 3,
        bucket_list: Vec::new(),
    }
}

pub fn sample_city(name: &str) -> CityData {
    CityData {
        city_name: name.into(),
        safety_score: "8".into(),
        description: format!("{name} is lovely."),
        safety_description: "Mind your pockets.".into(),
        image_url: Some(format!("https://images.test/{name}.jpg")),
    }
}

pub fn sample_numbers() -> EmergencyNumbers {
    EmergencyNumbers {
        country: "Japan".into(),
        emergency_numbers: EmergencyNumberSet {
            police: "110".into(),
            ambulance: "119".into(),
            fire: "119".into(),
        },
    }
}

/// Canned outcome per endpoint plus a log of every call. Bucket-list writes
/// act on an in-memory list so their responses reflect earlier calls.
pub struct FakeApi {
    pub chat: Result<String, ApiError>,
    pub itinerary: Result<String, ApiError>,
    pub city: Result<CityData, ApiError>,
    pub numbers: Result<EmergencyNumbers, ApiError>,
    pub alert: Result<AlertReceipt, ApiError>,
    pub profile: Result<UserProfile, ApiError>,
    pub update: Result<UserProfile, ApiError>,
    pub bucket_failure: Option<ApiError>,
    pub(crate) bucket: RefCell<Vec<BucketListItem>>,
    pub(crate) calls: RefCell<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            chat: Ok("ok".into()),
            itinerary: Ok("• plan".into()),
            city: Ok(sample_city("Tokyo")),
            numbers: Ok(sample_numbers()),
            alert: Ok(AlertReceipt::default()),
            profile: Ok(sample_profile()),
            update: Ok(sample_profile()),
            bucket_failure: None,
            bucket: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn chat_calls(&self) -> usize {
        self.calls.borrow().iter().filter(|c| matches!(c, Call::Chat(_))).count()
    }

    pub fn itinerary_calls(&self) -> Vec<ItineraryRequest> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Itinerary(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn bucket_profile(&self) -> UserProfile {
        UserProfile { bucket_list: self.bucket.borrow().clone(), ..sample_profile() }
    }
}

impl TravelApi for FakeApi {
    async fn chat(&self, query: &str) -> Result<String, ApiError> {
        self.record(Call::Chat(query.to_string()));
        self.chat.clone()
    }

    async fn plan_itinerary(&self, request: &ItineraryRequest) -> Result<String, ApiError> {
        self.record(Call::Itinerary(request.clone()));
        self.itinerary.clone()
    }

    async fn city_data(&self, city_name: &str) -> Result<CityData, ApiError> {
        self.record(Call::City(city_name.to_string()));
        self.city.clone()
    }

    async fn emergency_numbers(&self, position: Coordinates) -> Result<EmergencyNumbers, ApiError> {
        self.record(Call::Numbers(position));
        self.numbers.clone()
    }

    async fn send_alert(&self, alert: &AlertRequest) -> Result<AlertReceipt, ApiError> {
        self.record(Call::Alert(alert.clone()));
        self.alert.clone()
    }

    async fn user(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.record(Call::User(user_id.to_string()));
        self.profile.clone()
    }

    async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.record(Call::Update(user_id.to_string(), update.clone()));
        self.update.clone()
    }

    async fn add_bucket_item(&self, user_id: &str, item: &BucketListItem) -> Result<UserProfile, ApiError> {
        self.record(Call::AddBucket(user_id.to_string(), item.clone()));
        if let Some(err) = &self.bucket_failure {
            return Err(err.clone());
        }
        self.bucket.borrow_mut().push(item.clone());
        Ok(self.bucket_profile())
    }

    async fn remove_bucket_item(&self, user_id: &str, name: &str) -> Result<UserProfile, ApiError> {
        self.record(Call::RemoveBucket(user_id.to_string(), name.to_string()));
        if let Some(err) = &self.bucket_failure {
            return Err(err.clone());
        }
        self.bucket.borrow_mut().retain(|item| item.name != name);
        Ok(self.bucket_profile())
    }
}
