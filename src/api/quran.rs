//! Typed client for the equran.id v2 surah endpoints.

use super::{ApiError, get_json};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

/// Number of surahs in the mushaf; detail requests outside this range are
/// rejected locally instead of hitting the network.
pub const SURAH_COUNT: u32 = 114;

/// One row of the surah index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahSummary {
    pub nomor: u32,
    /// Arabic name.
    pub nama: String,
    pub nama_latin: String,
    pub jumlah_ayat: u32,
    /// Revelation place, e.g. "Mekah" or "Madinah".
    pub tempat_turun: String,
    /// Translated meaning of the name.
    pub arti: String,
}

/// Full surah detail, including verses and audio tracks keyed by reciter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahDetail {
    pub nomor: u32,
    pub nama: String,
    pub nama_latin: String,
    pub jumlah_ayat: u32,
    pub tempat_turun: String,
    pub arti: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub audio_full: BTreeMap<String, String>,
    #[serde(default)]
    pub ayat: Vec<Ayah>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    pub nomor_ayat: u32,
    pub teks_arab: String,
    pub teks_latin: String,
    pub teks_indonesia: String,
    #[serde(default)]
    pub audio: BTreeMap<String, String>,
}

impl SurahDetail {
    pub fn full_audio_url(&self, reciter: &str) -> Option<&str> {
        self.audio_full.get(reciter).map(String::as_str)
    }

    pub fn verse_audio_url(&self, verse: u32, reciter: &str) -> Option<&str> {
        self.ayat
            .iter()
            .find(|ayah| ayah.nomor_ayat == verse)
            .and_then(|ayah| ayah.audio.get(reciter))
            .map(String::as_str)
    }
}

pub async fn fetch_surah_list(base: &str) -> Result<Vec<SurahSummary>, ApiError> {
    let url = format!("{base}/surat");
    let list: Vec<SurahSummary> = get_json(&url).await?;
    info!(count = list.len(), "Fetched surah index");
    Ok(list)
}

pub async fn fetch_surah_detail(base: &str, nomor: u32) -> Result<SurahDetail, ApiError> {
    let url = format!("{base}/surat/{nomor}");
    let detail: SurahDetail = get_json(&url).await?;
    info!(
        surah = detail.nomor,
        verses = detail.ayat.len(),
        "Fetched surah detail"
    );
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_payload;

    const DETAIL_FIXTURE: &str = r#"{
        "code": 200,
        "message": "OK",
        "data": {
            "nomor": 36,
            "nama": "يس",
            "namaLatin": "Yasin",
            "jumlahAyat": 83,
            "tempatTurun": "Mekah",
            "arti": "Yasin",
            "deskripsi": "Surah ke-36",
            "audioFull": {"05": "https://cdn.example/full/36.mp3"},
            "ayat": [
                {
                    "nomorAyat": 1,
                    "teksArab": "يس",
                    "teksLatin": "yā sīn",
                    "teksIndonesia": "Ya Sin",
                    "audio": {"05": "https://cdn.example/36/1.mp3"}
                }
            ]
        }
    }"#;

    #[test]
    fn detail_fixture_parses_into_typed_struct() {
        let detail: SurahDetail =
            parse_payload("https://example/surat/36", DETAIL_FIXTURE).expect("fixture parses");
        assert_eq!(detail.nomor, 36);
        assert_eq!(detail.nama_latin, "Yasin");
        assert_eq!(detail.jumlah_ayat, 83);
        assert_eq!(
            detail.full_audio_url("05"),
            Some("https://cdn.example/full/36.mp3")
        );
        assert_eq!(
            detail.verse_audio_url(1, "05"),
            Some("https://cdn.example/36/1.mp3")
        );
        assert!(detail.verse_audio_url(2, "05").is_none());
        assert!(detail.verse_audio_url(1, "99").is_none());
    }

    #[test]
    fn shape_mismatch_is_a_parse_error() {
        let result: Result<SurahDetail, _> = parse_payload(
            "https://example/surat/36",
            r#"{"code": 200, "data": {"nomor": "thirty-six"}}"#,
        );
        assert!(matches!(result, Err(ApiError::Parse { .. })));
    }

    #[test]
    fn failing_payload_code_is_a_status_error() {
        let result: Result<SurahDetail, _> = parse_payload(
            "https://example/surat/900",
            r#"{"code": 404, "message": "not found", "data": null}"#,
        );
        assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
    }

    #[test]
    fn summary_list_parses() {
        let body = r#"{
            "code": 200,
            "data": [
                {"nomor": 1, "nama": "الفاتحة", "namaLatin": "Al-Fatihah",
                 "jumlahAyat": 7, "tempatTurun": "Mekah", "arti": "Pembukaan"}
            ]
        }"#;
        let list: Vec<SurahSummary> =
            parse_payload("https://example/surat", body).expect("list parses");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].nama_latin, "Al-Fatihah");
        assert_eq!(list[0].jumlah_ayat, 7);
    }
}
