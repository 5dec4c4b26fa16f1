use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

use artemis::api::TravelApi;
use artemis::config::ApiConfig;
use artemis::errors::ApiError;
use artemis::models::{
    AlertReceipt, AlertRequest, AssistantReply, BucketListItem, ChatQuery, CityData, CityRequest,
    Coordinates, EmergencyNumbers, ItineraryRequest, PICTURE_FIELD, ProfileUpdate, UserProfile,
};

/// Browser implementation of the backend gateway on top of `fetch`.
#[derive(Debug, Clone)]
pub struct GlooTravelApi {
    config: ApiConfig,
}

/// Aborts the attached request when the timeout elapses. Dropping it disarms the timer.
struct Deadline {
    _timer: Option<Timeout>,
}

impl GlooTravelApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn with_deadline(&self, builder: RequestBuilder) -> (RequestBuilder, Deadline) {
        let Ok(controller) = AbortController::new() else {
            return (builder, Deadline { _timer: None });
        };
        let builder = builder.abort_signal(Some(&controller.signal()));
        let millis = u32::try_from(self.config.timeout.as_millis()).unwrap_or(u32::MAX);
        let timer = Timeout::new(millis, move || controller.abort());
        (builder, Deadline { _timer: Some(timer) })
    }

    async fn send(request: Request) -> Result<Response, ApiError> {
        let url = request.url();
        let resp = request.send().await.map_err(|e| {
            log::warn!("Request to {url} failed: {e}");
            ApiError::network(e)
        })?;

        if !resp.ok() {
            log::warn!("Request to {url} returned {}", resp.status());
            return Err(ApiError::Status { status: resp.status() });
        }
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(ApiError::decode)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let (builder, _deadline) = self.with_deadline(Request::get(url));
        let request = builder.build().map_err(ApiError::encode)?;
        Self::decode(Self::send(request).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T, ApiError> {
        let (builder, _deadline) = self.with_deadline(Request::post(url));
        let request = builder.json(body).map_err(ApiError::encode)?;
        Self::decode(Self::send(request).await?).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let (builder, _deadline) = self.with_deadline(Request::delete(url));
        let request = builder.build().map_err(ApiError::encode)?;
        Self::decode(Self::send(request).await?).await
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::encode(format!("{value:?}"))
}

/// Text fields plus the optional picture, as the browser would post a form.
fn form_data(update: &ProfileUpdate) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in &update.fields {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    if let Some(picture) = &update.picture {
        let bytes = js_sys::Uint8Array::from(picture.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        if let Some(content_type) = &picture.content_type {
            options.set_type(content_type);
        }
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
        form.append_with_blob_and_filename(PICTURE_FIELD, &blob, &picture.file_name)
            .map_err(js_error)?;
    }
    Ok(form)
}

impl TravelApi for GlooTravelApi {
    async fn chat(&self, query: &str) -> Result<String, ApiError> {
        let body = ChatQuery { query: query.to_string() };
        let reply: AssistantReply = self.post_json(&self.config.chatbot_url(), &body).await?;
        Ok(reply.response)
    }

    async fn plan_itinerary(&self, request: &ItineraryRequest) -> Result<String, ApiError> {
        let reply: AssistantReply = self.post_json(&self.config.itinerary_url(), request).await?;
        Ok(reply.response)
    }

    async fn city_data(&self, city_name: &str) -> Result<CityData, ApiError> {
        let body = CityRequest { city_name: city_name.to_string() };
        self.post_json(&self.config.city_data_url(), &body).await
    }

    async fn emergency_numbers(&self, position: Coordinates) -> Result<EmergencyNumbers, ApiError> {
        self.post_json(&self.config.emergency_numbers_url(), &position).await
    }

    async fn send_alert(&self, alert: &AlertRequest) -> Result<AlertReceipt, ApiError> {
        let url = self.config.alert_url();
        let (builder, _deadline) = self.with_deadline(Request::post(&url));
        let request = builder.json(alert).map_err(ApiError::encode)?;
        let resp = Self::send(request).await?;
        Ok(resp.json::<AlertReceipt>().await.unwrap_or_default())
    }

    async fn user(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.get_json(&self.config.user_url(user_id)).await
    }

    async fn update_user(&self, user_id: &str, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let url = self.config.user_url(user_id);
        let form = form_data(update)?;
        let (builder, _deadline) = self.with_deadline(Request::post(&url));
        let request = builder.body(form).map_err(ApiError::encode)?;
        Self::decode(Self::send(request).await?).await
    }

    async fn add_bucket_item(&self, user_id: &str, item: &BucketListItem) -> Result<UserProfile, ApiError> {
        self.post_json(&self.config.bucket_list_url(user_id), item).await
    }

    async fn remove_bucket_item(&self, user_id: &str, name: &str) -> Result<UserProfile, ApiError> {
        self.delete_json(&self.config.bucket_item_url(user_id, name)).await
    }
}
