use crate::api::quran::SurahDetail;

/// Surah detail model for the reading view.
pub struct ReaderState {
    pub(in crate::app) detail: Option<SurahDetail>,
    pub(in crate::app) loading: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) request_id: u64,
}

impl ReaderState {
    pub(in crate::app) fn new() -> Self {
        Self {
            detail: None,
            loading: false,
            error: None,
            request_id: 0,
        }
    }

    pub(in crate::app) fn total_verses(&self) -> u32 {
        self.detail.as_ref().map(|d| d.jumlah_ayat).unwrap_or(0)
    }

    pub(in crate::app) fn reset_for(&mut self) {
        self.detail = None;
        self.loading = true;
        self.error = None;
    }
}
