use crate::api::quran::SurahSummary;
use std::fmt;

/// Sort orderings for the surah index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Number,
    Name,
    VerseCount,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Number => "Surah number",
            SortKey::Name => "Surah name",
            SortKey::VerseCount => "Verse count",
        };
        f.write_str(label)
    }
}

pub(crate) const SORT_KEYS: [SortKey; 3] = [SortKey::Number, SortKey::Name, SortKey::VerseCount];

/// Surah index model with view-local filter state.
pub struct LibraryState {
    pub(in crate::app) surahs: Vec<SurahSummary>,
    pub(in crate::app) loading: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) search: String,
    pub(in crate::app) place_filter: Option<String>,
    pub(in crate::app) sort_key: SortKey,
    pub(in crate::app) favorites_only: bool,
    pub(in crate::app) request_id: u64,
}

impl LibraryState {
    pub(in crate::app) fn new() -> Self {
        Self {
            surahs: Vec::new(),
            loading: false,
            error: None,
            search: String::new(),
            place_filter: None,
            sort_key: SortKey::Number,
            favorites_only: false,
            request_id: 0,
        }
    }

    /// Distinct revelation places, "mekah" sorted before the rest.
    pub(in crate::app) fn places(&self) -> Vec<String> {
        let mut places: Vec<String> = Vec::new();
        for surah in &self.surahs {
            if !places.iter().any(|p| p == &surah.tempat_turun) {
                places.push(surah.tempat_turun.clone());
            }
        }
        places.sort_by(|a, b| {
            let a_mekah = a.eq_ignore_ascii_case("mekah");
            let b_mekah = b.eq_ignore_ascii_case("mekah");
            b_mekah.cmp(&a_mekah).then_with(|| a.cmp(b))
        });
        places
    }

    pub(in crate::app) fn projection(
        &self,
        favorites_only: bool,
        is_favorite: impl Fn(u32) -> bool,
    ) -> Vec<&SurahSummary> {
        project(
            &self.surahs,
            &self.search,
            self.place_filter.as_deref(),
            self.sort_key,
            favorites_only,
            is_favorite,
        )
    }

    /// Projection for the favorites screen: search and place filters belong
    /// to the index screen and must not hide favorites here.
    pub(in crate::app) fn favorites_projection(
        &self,
        is_favorite: impl Fn(u32) -> bool,
    ) -> Vec<&SurahSummary> {
        project(&self.surahs, "", None, self.sort_key, true, is_favorite)
    }
}

/// Pure filtered-and-sorted projection of the surah index.
///
/// Search is a case-insensitive substring match against the latin name, the
/// arabic name, and the translated meaning (OR). The place filter and the
/// favorites flag compose with search by AND. Sorting always tiebreaks on
/// surah number so the ordering is deterministic.
pub fn project<'a>(
    surahs: &'a [SurahSummary],
    search: &str,
    place: Option<&str>,
    sort_key: SortKey,
    favorites_only: bool,
    is_favorite: impl Fn(u32) -> bool,
) -> Vec<&'a SurahSummary> {
    let term = search.trim().to_lowercase();
    let mut result: Vec<&SurahSummary> = surahs
        .iter()
        .filter(|surah| {
            if !term.is_empty() {
                let matched = surah.nama_latin.to_lowercase().contains(&term)
                    || surah.nama.to_lowercase().contains(&term)
                    || surah.arti.to_lowercase().contains(&term);
                if !matched {
                    return false;
                }
            }
            if let Some(place) = place {
                if !surah.tempat_turun.eq_ignore_ascii_case(place) {
                    return false;
                }
            }
            if favorites_only && !is_favorite(surah.nomor) {
                return false;
            }
            true
        })
        .collect();

    result.sort_by(|a, b| match sort_key {
        SortKey::Number => a.nomor.cmp(&b.nomor),
        SortKey::Name => a
            .nama_latin
            .to_lowercase()
            .cmp(&b.nama_latin.to_lowercase())
            .then_with(|| a.nomor.cmp(&b.nomor)),
        SortKey::VerseCount => b
            .jumlah_ayat
            .cmp(&a.jumlah_ayat)
            .then_with(|| a.nomor.cmp(&b.nomor)),
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surah(nomor: u32, latin: &str, arti: &str, ayat: u32, place: &str) -> SurahSummary {
        SurahSummary {
            nomor,
            nama: format!("arabic-{nomor}"),
            nama_latin: latin.to_string(),
            jumlah_ayat: ayat,
            tempat_turun: place.to_string(),
            arti: arti.to_string(),
        }
    }

    fn fixture() -> Vec<SurahSummary> {
        vec![
            surah(1, "Al-Fatihah", "Pembukaan", 7, "Mekah"),
            surah(2, "Al-Baqarah", "Sapi Betina", 286, "Madinah"),
            surah(26, "Asy-Syu'ara", "Para Penyair", 227, "Mekah"),
            surah(36, "Yasin", "Yasin", 83, "Mekah"),
            surah(110, "An-Nasr", "Pertolongan", 3, "Madinah"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let surahs = fixture();
        let result = project(&surahs, "yasin", None, SortKey::Number, false, |_| false);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].nama_latin, "Yasin");

        let result = project(&surahs, "YASIN", None, SortKey::Number, false, |_| false);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn search_matches_translation_field_too() {
        let surahs = fixture();
        let result = project(&surahs, "sapi", None, SortKey::Number, false, |_| false);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].nomor, 2);
    }

    #[test]
    fn verse_count_sort_is_descending() {
        let surahs = vec![
            surah(1, "A", "a", 7, "Mekah"),
            surah(2, "B", "b", 286, "Madinah"),
            surah(3, "C", "c", 200, "Mekah"),
        ];
        let result = project(&surahs, "", None, SortKey::VerseCount, false, |_| false);
        let counts: Vec<u32> = result.iter().map(|s| s.jumlah_ayat).collect();
        assert_eq!(counts, vec![286, 200, 7]);
    }

    #[test]
    fn name_sort_is_lexicographic_with_number_tiebreak() {
        let surahs = vec![
            surah(2, "Yasin", "y", 10, "Mekah"),
            surah(1, "Yasin", "y", 10, "Mekah"),
            surah(3, "Al-Fatihah", "a", 7, "Mekah"),
        ];
        let result = project(&surahs, "", None, SortKey::Name, false, |_| false);
        let numbers: Vec<u32> = result.iter().map(|s| s.nomor).collect();
        assert_eq!(numbers, vec![3, 1, 2]);
    }

    #[test]
    fn filters_compose_with_and() {
        let surahs = fixture();
        let result = project(&surahs, "a", Some("Mekah"), SortKey::Number, true, |id| {
            id == 36 || id == 2
        });
        // "a" matches broadly, place keeps Mekah, favorites keeps {2, 36}:
        // only 36 satisfies all three.
        let numbers: Vec<u32> = result.iter().map(|s| s.nomor).collect();
        assert_eq!(numbers, vec![36]);
    }

    #[test]
    fn default_sort_is_number_ascending() {
        let mut surahs = fixture();
        surahs.reverse();
        let result = project(&surahs, "", None, SortKey::Number, false, |_| false);
        let numbers: Vec<u32> = result.iter().map(|s| s.nomor).collect();
        assert_eq!(numbers, vec![1, 2, 26, 36, 110]);
    }

    #[test]
    fn favorites_projection_ignores_residual_index_filters() {
        let mut library = LibraryState::new();
        library.surahs = fixture();
        library.search = "baqarah".to_string();
        library.place_filter = Some("Madinah".to_string());

        let result = library.favorites_projection(|id| id == 36);
        let numbers: Vec<u32> = result.iter().map(|s| s.nomor).collect();
        assert_eq!(numbers, vec![36]);
    }

    #[test]
    fn places_put_mekah_first() {
        let mut library = LibraryState::new();
        library.surahs = fixture();
        assert_eq!(library.places(), vec!["Mekah".to_string(), "Madinah".to_string()]);
    }
}
