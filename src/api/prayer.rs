//! Typed client for the equran.id v2 prayer-time endpoints.

use super::{ApiError, get_json, post_json};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// One day of the monthly schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct DaySchedule {
    /// Day of month as a string, e.g. "17".
    pub tanggal: String,
    #[serde(default)]
    pub tanggal_lengkap: String,
    #[serde(default)]
    pub hari: String,
    pub imsak: String,
    pub subuh: String,
    pub terbit: String,
    pub dhuha: String,
    pub dzuhur: String,
    pub ashar: String,
    pub maghrib: String,
    pub isya: String,
}

impl DaySchedule {
    pub fn day_of_month(&self) -> Option<u32> {
        self.tanggal.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySchedule {
    pub provinsi: String,
    pub kabkota: String,
    pub bulan: u32,
    pub tahun: u32,
    #[serde(default)]
    pub bulan_nama: String,
    #[serde(default)]
    pub jadwal: Vec<DaySchedule>,
}

impl MonthlySchedule {
    pub fn for_day(&self, day: u32) -> Option<&DaySchedule> {
        self.jadwal
            .iter()
            .find(|row| row.day_of_month() == Some(day))
    }
}

pub async fn fetch_provinces(base: &str) -> Result<Vec<String>, ApiError> {
    let url = format!("{base}/shalat/provinsi");
    let provinces: Vec<String> = get_json(&url).await?;
    info!(count = provinces.len(), "Fetched provinces");
    Ok(provinces)
}

pub async fn fetch_cities(base: &str, province: &str) -> Result<Vec<String>, ApiError> {
    let url = format!("{base}/shalat/kabkota");
    let cities: Vec<String> = post_json(&url, &json!({ "provinsi": province })).await?;
    info!(province, count = cities.len(), "Fetched cities");
    Ok(cities)
}

pub async fn fetch_monthly_schedule(
    base: &str,
    province: &str,
    city: &str,
    month: u32,
    year: u32,
) -> Result<MonthlySchedule, ApiError> {
    let url = format!("{base}/shalat");
    let schedule: MonthlySchedule = post_json(
        &url,
        &json!({
            "provinsi": province,
            "kabkota": city,
            "bulan": month,
            "tahun": year,
        }),
    )
    .await?;
    info!(
        province,
        city,
        month,
        year,
        days = schedule.jadwal.len(),
        "Fetched monthly schedule"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_payload;

    #[test]
    fn schedule_fixture_parses_and_finds_today() {
        let body = r#"{
            "code": 200,
            "data": {
                "provinsi": "DKI Jakarta",
                "kabkota": "Kota Jakarta",
                "bulan": 8,
                "tahun": 2026,
                "bulan_nama": "Agustus",
                "jadwal": [
                    {"tanggal": "1", "tanggal_lengkap": "2026-08-01", "hari": "Sabtu",
                     "imsak": "04:32", "subuh": "04:42", "terbit": "06:00",
                     "dhuha": "06:28", "dzuhur": "12:00", "ashar": "15:21",
                     "maghrib": "17:55", "isya": "19:06"},
                    {"tanggal": "2", "tanggal_lengkap": "2026-08-02", "hari": "Minggu",
                     "imsak": "04:32", "subuh": "04:42", "terbit": "06:00",
                     "dhuha": "06:28", "dzuhur": "12:00", "ashar": "15:21",
                     "maghrib": "17:55", "isya": "19:06"}
                ]
            }
        }"#;
        let schedule: MonthlySchedule =
            parse_payload("https://example/shalat", body).expect("schedule parses");
        assert_eq!(schedule.jadwal.len(), 2);
        assert_eq!(schedule.for_day(2).map(|d| d.hari.as_str()), Some("Minggu"));
        assert!(schedule.for_day(3).is_none());
    }

    #[test]
    fn province_list_parses() {
        let body = r#"{"code": 200, "data": ["Aceh", "Bali"]}"#;
        let provinces: Vec<String> =
            parse_payload("https://example/shalat/provinsi", body).expect("provinces parse");
        assert_eq!(provinces, vec!["Aceh".to_string(), "Bali".to_string()]);
    }

    #[test]
    fn malformed_schedule_is_a_parse_error() {
        let result: Result<MonthlySchedule, _> = parse_payload(
            "https://example/shalat",
            r#"{"code": 200, "data": {"jadwal": "not-a-list"}}"#,
        );
        assert!(matches!(result, Err(ApiError::Parse { .. })));
    }
}
