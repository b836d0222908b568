use crate::api::prayer::MonthlySchedule;

/// Prayer-times model: pickers plus the fetched monthly schedule.
pub struct PrayerState {
    pub(in crate::app) provinces: Vec<String>,
    pub(in crate::app) cities: Vec<String>,
    pub(in crate::app) selected_province: Option<String>,
    pub(in crate::app) selected_city: Option<String>,
    pub(in crate::app) schedule: Option<MonthlySchedule>,
    pub(in crate::app) loading: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) request_id: u64,
}

impl PrayerState {
    pub(in crate::app) fn new() -> Self {
        Self {
            provinces: Vec::new(),
            cities: Vec::new(),
            selected_province: None,
            selected_city: None,
            schedule: None,
            loading: false,
            error: None,
            request_id: 0,
        }
    }

    pub(in crate::app) fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }
}
