//! Prayer-times handlers: cascading province/city pickers with persisted
//! selections, then the monthly schedule fetch.

use super::Effect;
use crate::api::prayer::MonthlySchedule;
use crate::app::state::{App, Screen};
use crate::store::{KEY_PRAYER_CITY, KEY_PRAYER_PROVINCE, KeyValueStore};
use tracing::{debug, warn};

fn load_persisted(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    let raw = store.get(key)?;
    match serde_json::from_str::<String>(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, "Failed to parse stored selection: {err}");
            None
        }
    }
}

fn persist(store: &dyn KeyValueStore, key: &str, value: &str) {
    match serde_json::to_string(value) {
        Ok(serialized) => store.set(key, &serialized),
        Err(err) => warn!(key, "Failed to serialize selection: {err}"),
    }
}

impl App {
    pub(super) fn open_prayer_times(&mut self, effects: &mut Vec<Effect>) {
        self.leave_reading_view();
        self.screen = Screen::PrayerTimes;
        if self.prayer.provinces.is_empty() && !self.prayer.loading {
            effects.push(Effect::FetchProvinces);
        }
    }

    pub(super) fn on_provinces_loaded(
        &mut self,
        request_id: u64,
        result: Result<Vec<String>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.prayer.request_id {
            debug!(request_id, "Ignoring stale province list");
            return;
        }
        self.prayer.loading = false;
        match result {
            Ok(provinces) => {
                // Prefer the persisted selection when it is still offered.
                let persisted = load_persisted(self.store.as_ref(), KEY_PRAYER_PROVINCE)
                    .filter(|p| provinces.iter().any(|offered| offered == p));
                let selected = persisted.or_else(|| provinces.first().cloned());
                self.prayer.provinces = provinces;
                if let Some(province) = selected {
                    self.prayer.selected_province = Some(province.clone());
                    effects.push(Effect::FetchCities { province });
                }
            }
            Err(err) => {
                warn!("Province fetch failed: {err}");
                self.prayer.error = Some(err);
            }
        }
    }

    pub(super) fn select_province(&mut self, province: String, effects: &mut Vec<Effect>) {
        if self.prayer.selected_province.as_deref() == Some(province.as_str()) {
            return;
        }
        persist(self.store.as_ref(), KEY_PRAYER_PROVINCE, &province);
        self.prayer.selected_province = Some(province.clone());
        self.prayer.selected_city = None;
        self.prayer.cities.clear();
        self.prayer.schedule = None;
        effects.push(Effect::FetchCities { province });
    }

    pub(super) fn on_cities_loaded(
        &mut self,
        request_id: u64,
        result: Result<Vec<String>, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.prayer.request_id {
            debug!(request_id, "Ignoring stale city list");
            return;
        }
        self.prayer.loading = false;
        match result {
            Ok(cities) => {
                let persisted = load_persisted(self.store.as_ref(), KEY_PRAYER_CITY)
                    .filter(|c| cities.iter().any(|offered| offered == c));
                let selected = self
                    .prayer
                    .selected_city
                    .clone()
                    .filter(|c| cities.iter().any(|offered| offered == c))
                    .or(persisted)
                    .or_else(|| cities.first().cloned());
                self.prayer.cities = cities;
                if let Some(city) = selected {
                    self.prayer.selected_city = Some(city.clone());
                    if let Some(province) = self.prayer.selected_province.clone() {
                        effects.push(Effect::FetchSchedule { province, city });
                    }
                }
            }
            Err(err) => {
                warn!("City fetch failed: {err}");
                self.prayer.error = Some(err);
            }
        }
    }

    pub(super) fn select_city(&mut self, city: String, effects: &mut Vec<Effect>) {
        if self.prayer.selected_city.as_deref() == Some(city.as_str()) {
            return;
        }
        persist(self.store.as_ref(), KEY_PRAYER_CITY, &city);
        self.prayer.selected_city = Some(city.clone());
        self.prayer.schedule = None;
        if let Some(province) = self.prayer.selected_province.clone() {
            effects.push(Effect::FetchSchedule { province, city });
        }
    }

    pub(super) fn on_schedule_loaded(
        &mut self,
        request_id: u64,
        result: Result<MonthlySchedule, String>,
    ) {
        if request_id != self.prayer.request_id {
            debug!(request_id, "Ignoring stale schedule");
            return;
        }
        self.prayer.loading = false;
        match result {
            Ok(schedule) => {
                self.prayer.schedule = Some(schedule);
                self.prayer.error = None;
            }
            Err(err) => {
                warn!("Schedule fetch failed: {err}");
                self.prayer.error = Some(err);
            }
        }
    }
}
