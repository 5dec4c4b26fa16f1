#[cfg(test)]
#[path = "bucket_list_test.rs"]
mod bucket_list_test;

use tracing::{error, info};

use crate::api::TravelApi;
use crate::errors::ApiError;
use crate::models::{BucketListItem, UserProfile};

/// Clicks closer together than this are one gesture (double-click zoom).
pub const CLICK_DEBOUNCE_MS: f64 = 300.0;

/// Largest latitude the flat map can show.
pub const MAX_LATITUDE: f64 = 85.0;

/// Equirectangular projection of the map surface: x spans longitude
/// -180..180, y spans latitude 90..-90.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub width: f64,
    pub height: f64,
}

impl MapProjection {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel offset inside the surface to `(lat, lng)`. Returns `None` for an
    /// empty surface.
    pub fn to_coordinates(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = x.clamp(0.0, self.width);
        let y = y.clamp(0.0, self.height);
        let lng = x / self.width * 360.0 - 180.0;
        let lat = (90.0 - y / self.height * 180.0).clamp(-MAX_LATITUDE, MAX_LATITUDE);
        Some((lat, lng))
    }

    /// Marker placement as `(left %, top %)`, independent of the surface size.
    pub fn to_percent(lat: f64, lng: f64) -> (f64, f64) {
        let left = (lng.clamp(-180.0, 180.0) + 180.0) / 360.0 * 100.0;
        let top = (90.0 - lat.clamp(-90.0, 90.0)) / 180.0 * 100.0;
        (left, top)
    }
}

/// A click that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPin {
    pub item: BucketListItem,
    pub saving: bool,
}

/// The map widget. Clicks place or move one pending pin; only an explicit
/// confirm writes to the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketList {
    pub items: Vec<BucketListItem>,
    pub pending: Option<PendingPin>,
    pub removing: Option<String>,
    last_click_ms: Option<f64>,
}

impl BucketList {
    pub fn apply_profile(&mut self, result: Result<UserProfile, ApiError>) {
        match result {
            Ok(profile) => self.items = profile.bucket_list,
            Err(e) => error!("Error fetching bucket list: {e}"),
        }
    }

    /// Map click at `now_ms`. Returns whether the click was taken.
    pub fn click(&mut self, lat: f64, lng: f64, now_ms: f64) -> bool {
        if self.last_click_ms.is_some_and(|last| now_ms - last < CLICK_DEBOUNCE_MS) {
            return false;
        }
        self.last_click_ms = Some(now_ms);

        if let Some(pin) = self.pending.as_mut() {
            if pin.saving {
                return false;
            }
            pin.item.lat = lat;
            pin.item.lng = lng;
            return true;
        }

        let name = self.next_pin_name();
        self.pending = Some(PendingPin { item: BucketListItem { name, lat, lng }, saving: false });
        true
    }

    /// Smallest "Pinned Location n" not already on the list. Names identify
    /// items for removal, so they must stay unique.
    fn next_pin_name(&self) -> String {
        (1..)
            .map(|n| format!("Pinned Location {n}"))
            .find(|name| !self.items.iter().any(|i| &i.name == name))
            .unwrap_or_default()
    }

        pub fn rename_pending(&mut self, name: &str) {
        let name = name.trim();
        if let Some(pin) = self.pending.as_mut().filter(|p| !p.saving && !name.is_empty()) {
            pin.item.name = name.to_string();
        }
    }

    pub fn cancel(&mut self) {
        if self.pending.as_ref().is_some_and(|p| !p.saving) {
            self.pending = None;
        }
    }

    /// Locks the pending pin and returns the item to POST.
    pub fn confirm(&mut self) -> Option<BucketListItem> {
        let pin = self.pending.as_mut().filter(|p| !p.saving)?;
        pin.saving = true;
        Some(pin.item.clone())
    }

    /// On success the server's list replaces ours. On failure the pin stays
    /// so it can be confirmed again.
    pub fn finish_confirm(&mut self, result: Result<UserProfile, ApiError>) {
        match result {
            Ok(profile) => {
                info!("Bucket list now has {} item(s)", profile.bucket_list.len());
                self.items = profile.bucket_list;
                self.pending = None;
            }
            Err(e) => {
                error!("Error saving location: {e}");
                if let Some(pin) = self.pending.as_mut() {
                    pin.saving = false;
                }
            }
        }
    }

    /// Starts removing the item called `name`.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        if self.removing.is_some() || !self.items.iter().any(|i| i.name == name) {
            return None;
        }
        self.removing = Some(name.to_string());
        self.removing.clone()
    }

    pub fn finish_remove(&mut self, result: Result<UserProfile, ApiError>) {
        self.removing = None;
        match result {
            Ok(profile) => self.items = profile.bucket_list,
            Err(e) => error!("Error removing location: {e}"),
        }
    }

    pub async fn load<A: TravelApi>(&mut self, api: &A, user_id: &str) {
        let result = api.user(user_id).await;
        self.apply_profile(result);
    }

    pub async fn save_pending<A: TravelApi>(&mut self, api: &A, user_id: &str) -> bool {
        let Some(item) = self.confirm() else {
            return false;
        };
        let result = api.add_bucket_item(user_id, &item).await;
        let ok = result.is_ok();
        self.finish_confirm(result);
        ok
    }

    pub async fn delete<A: TravelApi>(&mut self, api: &A, user_id: &str, name: &str) -> bool {
        let Some(name) = self.remove(name) else {
            return false;
        };
        let result = api.remove_bucket_item(user_id, &name).await;
        let ok = result.is_ok();
        self.finish_remove(result);
        ok
    }
}
