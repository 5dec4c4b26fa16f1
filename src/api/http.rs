use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::TravelApi;
use crate::config::ApiConfig;
use crate::errors::{ApiError, AppError};
use crate::models::{
    AlertReceipt, AlertRequest, AssistantReply, BucketListItem, ChatQuery, CityData, CityRequest,
    Coordinates, EmergencyNumbers, ItineraryRequest, ProfileUpdate, UserProfile, PICTURE_FIELD,
};

/// [`TravelApi`] over plain HTTP with `reqwest`. One attempt per call, bounded
/// by the configured timeout.
#[derive(Clone)]
pub struct HttpTravelApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTravelApi {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, url: String, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = send(self.client.post(&url).json(body), &url).await?;
        decode(resp).await
    }
}

async fn send(builder: RequestBuilder, url: &str) -> Result<reqwest::Response, ApiError> {
    debug!("→ {url}");
    let resp = builder.send().await.map_err(|e| {
        warn!("Request to {url} failed: {e}");
        ApiError::network(e)
    })?;

    let status = resp.status();
    if !status.is_success() {
        warn!("Request to {url} returned {status}");
        return Err(ApiError::Status { status: status.as_u16() });
    }
    Ok(resp)
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await.map_err(ApiError::network)?;
    serde_json::from_slice(&bytes).map_err(ApiError::decode)
}

impl TravelApi for HttpTravelApi {
    async fn chat(&self, query: &str) -> Result<String, ApiError> {
        let body = ChatQuery { query: query.to_string() };
        let reply: AssistantReply = self.post_json(self.config.chatbot_url(), &body).await?;
        Ok(reply.response)
    }

    async fn plan_itinerary(&self, request: &ItineraryRequest) -> Result<String, ApiError> {
        let reply: AssistantReply = self.post_json(self.config.itinerary_url(), request).await?;
        Ok(reply.response)
    }

    async fn city_data(&self, city_name: &str) -> Result<CityData, ApiError> {
        let body = CityRequest { city_name: city_name.to_string() };
        self.post_json(self.config.city_data_url(), &body).await
    }

    async fn emergency_numbers(&self, position: Coordinates) -> Result<EmergencyNumbers, ApiError> {
        self.post_json(self.config.emergency_numbers_url(), &position).await
    }

    async fn send_alert(&self, alert: &AlertRequest) -> Result<AlertReceipt, ApiError> {
        let url = self.config.alert_url();
        let resp = send(self.client.post(&url).json(alert), &url).await?;
        // Status is what counts; the body is informational.
        Ok(decode(resp).await.unwrap_or_else(|e| {
            debug!("Alert receipt not decoded: {e}");
            AlertReceipt::default()
        }))
    }

    async fn user(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let url = self.config.user_url(user_id);
        let resp = send(self.client.get(&url), &url).await?;
        decode(resp).await
    }

    async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let mut form = Form::new();
        for (name, value) in &update.fields {
            form = form.text(*name, value.clone());
        }
        if let Some(picture) = &update.picture {
            let mut part = Part::bytes(picture.bytes.clone()).file_name(picture.file_name.clone());
            if let Some(content_type) = &picture.content_type {
                part = part.mime_str(content_type).map_err(ApiError::encode)?;
            }
            form = form.part(PICTURE_FIELD, part);
        }

        let url = self.config.user_url(user_id);
        let resp = send(self.client.post(&url).multipart(form), &url).await?;
        decode(resp).await
    }

    async fn add_bucket_item(&self, user_id: &str, item: &BucketListItem) -> Result<UserProfile, ApiError> {
        self.post_json(self.config.bucket_list_url(user_id), item).await
    }

    async fn remove_bucket_item(&self, user_id: &str, name: &str) -> Result<UserProfile, ApiError> {
        let url = self.config.bucket_item_url(user_id, name);
        let resp = send(self.client.delete(&url), &url).await?;
        decode(resp).await
    }
}
