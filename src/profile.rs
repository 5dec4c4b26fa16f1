#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use tracing::{error, info};

use crate::api::TravelApi;
use crate::errors::ApiError;
use crate::models::{PictureUpload, ProfileUpdate, UserProfile};

pub const PROFILE_LOAD_FAILURE: &str = "Could not load your profile.";

/// Text inputs of the edit form, kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub bio: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub trips: String,
    pub countries: String,
}

impl ProfileForm {
    pub const FIELD_NAMES: [&'static str; 7] =
        ["name", "bio", "age", "height", "weight", "trips", "countries"];

    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            bio: profile.bio.clone(),
            age: profile.age.to_string(),
            height: profile.height.clone(),
            weight: profile.weight.clone(),
            trips: profile.trips.to_string(),
            countries: profile.countries.to_string(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "name" => &self.name,
            "bio" => &self.bio,
            "age" => &self.age,
            "height" => &self.height,
            "weight" => &self.weight,
            "trips" => &self.trips,
            "countries" => &self.countries,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Updates one input by its form name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let slot = match field {
            "name" => &mut self.name,
            "bio" => &mut self.bio,
            "age" => &mut self.age,
            "height" => &mut self.height,
            "weight" => &mut self.weight,
            "trips" => &mut self.trips,
            "countries" => &mut self.countries,
            _ => return,
        };
        *slot = value.into();
    }

    /// Names of the inputs left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELD_NAMES
            .into_iter()
            .filter(|name| self.get(name).is_some_and(|v| v.trim().is_empty()))
            .collect()
    }

    pub fn fields(&self) -> Vec<(&'static str, String)> {
        Self::FIELD_NAMES
            .into_iter()
            .map(|name| (name, self.get(name).unwrap_or_default().trim().to_string()))
            .collect()
    }
}

/// The profile screen: cached record plus the edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user_id: String,
    pub user: Option<UserProfile>,
    pub loading: bool,
    pub load_error: Option<String>,
    pub editing: bool,
    pub saving: bool,
    pub form: ProfileForm,
    pub picture: Option<PictureUpload>,
    pub missing: Vec<&'static str>,
}

impl ProfileView {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user: None,
            loading: true,
            load_error: None,
            editing: false,
            saving: false,
            form: ProfileForm::default(),
            picture: None,
            missing: Vec::new(),
        }
    }

    pub fn apply_loaded(&mut self, result: Result<UserProfile, ApiError>) {
        self.loading = false;
        match result {
            Ok(profile) => {
                self.user = Some(profile);
                self.load_error = None;
            }
            Err(e) => {
                error!("Error fetching user {}: {e}", self.user_id);
                self.load_error = Some(PROFILE_LOAD_FAILURE.to_string());
            }
        }
    }

    pub fn start_editing(&mut self) {
        self.form = self.user.as_ref().map(ProfileForm::from_profile).unwrap_or_default();
        self.picture = None;
        self.missing.clear();
        self.editing = true;
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.saving = false;
        self.picture = None;
        self.missing.clear();
    }

    /// Builds the multipart payload. Returns `None` while a save is running or
    /// when required inputs are blank; the blanks land in `missing`.
    pub fn begin_save(&mut self) -> Option<ProfileUpdate> {
        if !self.editing || self.saving {
            return None;
        }
        self.missing = self.form.missing_fields();
        if !self.missing.is_empty() {
            return None;
        }
        self.saving = true;
        Some(ProfileUpdate { fields: self.form.fields(), picture: self.picture.clone() })
    }

    /// On success the server's record replaces the cache and the form closes.
    /// On failure the form stays open.
    pub fn finish_save(&mut self, result: Result<UserProfile, ApiError>) -> bool {
        self.saving = false;
        match result {
            Ok(profile) => {
                info!("Profile {} updated", profile.id);
                self.user = Some(profile);
                self.editing = false;
                self.picture = None;
                true
            }
            Err(e) => {
                error!("Error updating profile: {e}");
                false
            }
        }
    }

    pub async fn load<A: TravelApi>(&mut self, api: &A) {
        self.loading = true;
        let result = api.user(&self.user_id).await;
        self.apply_loaded(result);
    }

    pub async fn save<A: TravelApi>(&mut self, api: &A) -> bool {
        let Some(update) = self.begin_save() else {
            return false;
        };
        let result = api.update_user(&self.user_id, &update).await;
        self.finish_save(result)
    }
}
