use leptos::prelude::*;

use artemis::config::ApiConfig;

use crate::api::GlooTravelApi;

/// Shared application state, provided via Leptos context.
///
/// Screens keep their own state machines in local signals; only the gateway
/// and the signed-in user are global.
#[derive(Clone, Copy)]
pub struct AppState {
    pub api: StoredValue<GlooTravelApi>,
    pub user_id: StoredValue<String>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide(config: ApiConfig) -> Self {
        let user_id = StoredValue::new(config.user_id.clone());
        let state = Self {
            api: StoredValue::new(GlooTravelApi::new(config)),
            user_id,
        };
        provide_context(state);
        state
    }

    pub fn api(&self) -> GlooTravelApi {
        self.api.get_value()
    }

    pub fn user_id(&self) -> String {
        self.user_id.get_value()
    }

    /// URL for a server-relative asset such as an uploaded picture.
    pub fn asset_url(&self, path: &str) -> String {
        self.api.with_value(|api| api.config().asset_url(path))
    }
}
