use super::messages::Message;
use super::state::{App, Screen, SORT_KEYS, VERSE_SCROLL_ID};
use super::update::ALL_PLACES;
use crate::api::quran::{Ayah, SurahDetail, SurahSummary};
use crate::config::ThemeMode;
use crate::text_utils::{capitalize_first, strip_html};
use chrono::Datelike;
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, checkbox, column, container, horizontal_space, pick_list, row, scrollable,
    slider, text, text_input,
};
use iced::{Element, Length};
use std::time::Duration;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.screen {
            Screen::Library => self.library_view(false),
            Screen::Favorites => self.library_view(true),
            Screen::Surah(_) => self.surah_view(),
            Screen::PrayerTimes => self.prayer_view(),
            Screen::NotFound(nomor) => self.not_found_view(nomor),
        };

        column![self.nav_bar(), content]
            .spacing(12)
            .padding(12)
            .into()
    }

    fn nav_bar(&self) -> Element<'_, Message> {
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        row![
            button("Surahs").on_press(Message::OpenLibrary),
            button("Favorites").on_press(Message::OpenFavorites),
            button("Prayer Times").on_press(Message::OpenPrayerTimes),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    /// Surah index; with `favorites_only` the same list pinned to favorites.
    fn library_view(&self, favorites_only: bool) -> Element<'_, Message> {
        let mut page = Column::new().spacing(12);

        if !favorites_only {
            if let Some(position) = self.last_read.position() {
                page = page.push(
                    row![
                        text(format!(
                            "Last read: {} — verse {}",
                            position.surah_name, position.ayah_number
                        )),
                        horizontal_space(),
                        button("Continue").on_press(Message::ContinueReading),
                        button("Clear").on_press(Message::ClearLastRead),
                    ]
                    .spacing(10)
                    .align_y(Vertical::Center),
                );
            }

            let mut place_options: Vec<String> = vec![ALL_PLACES.to_string()];
            place_options.extend(self.library.places());
            let selected_place = self
                .library
                .place_filter
                .clone()
                .unwrap_or_else(|| ALL_PLACES.to_string());

            page = page.push(
                row![
                    text_input("Search name or meaning...", &self.library.search)
                        .on_input(Message::SearchChanged)
                        .width(Length::FillPortion(2)),
                    pick_list(place_options, Some(selected_place), Message::PlaceFilterChanged),
                    pick_list(SORT_KEYS, Some(self.library.sort_key), Message::SortChanged),
                    checkbox("Favorites only", self.library.favorites_only)
                        .on_toggle(|_| Message::ToggleFavoritesOnly),
                ]
                .spacing(10)
                .align_y(Vertical::Center),
            );
        }

        if self.library.loading {
            page = page.push(text("Loading surahs..."));
        }
        if let Some(error) = &self.library.error {
            page = page.push(text(format!("Could not load surahs: {error}")));
        }

        let rows = if favorites_only {
            self.library
                .favorites_projection(|nomor| self.favorites.is_favorite(nomor))
        } else {
            self.library
                .projection(self.library.favorites_only, |nomor| {
                    self.favorites.is_favorite(nomor)
                })
        };

        if rows.is_empty() && favorites_only && !self.library.loading {
            page = page.push(text("No favorite surahs yet."));
        }

        let mut list = Column::new().spacing(8);
        for surah in rows {
            list = list.push(self.surah_card(surah));
        }

        page.push(scrollable(list).height(Length::Fill)).into()
    }

    fn surah_card<'a>(&'a self, surah: &'a SurahSummary) -> Element<'a, Message> {
        let star = if self.favorites.is_favorite(surah.nomor) {
            "★"
        } else {
            "☆"
        };
        container(
            row![
                button(star).on_press(Message::ToggleFavorite(surah.nomor)),
                button(
                    column![
                        text(format!("{}. {}", surah.nomor, surah.nama_latin)).size(18),
                        text(format!(
                            "{} · {} verses · {}",
                            surah.arti,
                            surah.jumlah_ayat,
                            capitalize_first(&surah.tempat_turun)
                        ))
                        .size(13),
                    ]
                    .spacing(2),
                )
                .on_press(Message::OpenSurah(surah.nomor))
                .width(Length::Fill),
                text(&surah.nama).size(20),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
        )
        .width(Length::Fill)
        .into()
    }

    fn surah_view(&self) -> Element<'_, Message> {
        if self.reader.loading {
            return text("Loading surah...").into();
        }
        if let Some(error) = &self.reader.error {
            return column![
                text(format!("Could not load surah: {error}")),
                button("Back to surahs").on_press(Message::OpenLibrary),
            ]
            .spacing(10)
            .into();
        }
        let Some(detail) = &self.reader.detail else {
            return text("Loading surah...").into();
        };

        let mut header = column![
            text(format!("{} ({})", detail.nama_latin, detail.nama)).size(24),
            text(format!(
                "{} · {} verses · {}",
                detail.arti,
                detail.jumlah_ayat,
                capitalize_first(&detail.tempat_turun)
            ))
            .size(14),
        ]
        .spacing(4);
        if !detail.deskripsi.is_empty() {
            header = header.push(text(strip_html(&detail.deskripsi)).size(13));
        }

        let mut verses = Column::new().spacing(14);
        for ayah in &detail.ayat {
            verses = verses.push(self.verse_block(ayah));
        }

        column![
            header,
            scrollable(verses.width(Length::Fill))
                .id(VERSE_SCROLL_ID.clone())
                .height(Length::Fill),
            self.player_bar(detail),
        ]
        .spacing(12)
        .into()
    }

    fn verse_block<'a>(&'a self, ayah: &'a Ayah) -> Element<'a, Message> {
        let marker = if self.playback.active_verse == Some(ayah.nomor_ayat) {
            format!("▶ {}", ayah.nomor_ayat)
        } else {
            format!("{}", ayah.nomor_ayat)
        };
        container(
            column![
                row![
                    text(marker).size(14),
                    horizontal_space(),
                    button("Play").on_press(Message::PlayVerse(ayah.nomor_ayat)),
                    button("Mark as last read").on_press(Message::MarkLastRead(ayah.nomor_ayat)),
                ]
                .spacing(8)
                .align_y(Vertical::Center),
                text(&ayah.teks_arab).size(self.config.arabic_font_size as f32),
                text(&ayah.teks_latin).size(14),
                text(&ayah.teks_indonesia).size(self.config.font_size as f32),
            ]
            .spacing(6),
        )
        .width(Length::Fill)
        .into()
    }

    fn player_bar<'a>(&'a self, detail: &'a SurahDetail) -> Element<'a, Message> {
        let play_label = if self.playback.is_playing() {
            "Pause"
        } else {
            "Play"
        };
        let duration_secs = self.playback.duration.as_secs_f32().max(1.0);
        let elapsed_secs = self.playback.elapsed.as_secs_f32().min(duration_secs);

        let auto_label = format!("Recite all {} verses", detail.jumlah_ayat);
        row![
            button(play_label).on_press(Message::TogglePlayPause),
            checkbox(auto_label, self.playback.auto_advance)
                .on_toggle(|_| Message::ToggleAutoAdvance),
            slider(0.0..=duration_secs, elapsed_secs, Message::SeekTo)
                .width(Length::Fill),
            text(format!(
                "{} / {}",
                format_clock(self.playback.elapsed),
                format_clock(self.playback.duration)
            ))
            .size(13),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .into()
    }

    fn prayer_view(&self) -> Element<'_, Message> {
        let mut page = Column::new().spacing(12);

        page = page.push(
            row![
                pick_list(
                    self.prayer.provinces.clone(),
                    self.prayer.selected_province.clone(),
                    Message::ProvinceSelected,
                ),
                pick_list(
                    self.prayer.cities.clone(),
                    self.prayer.selected_city.clone(),
                    Message::CitySelected,
                ),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
        );

        if self.prayer.loading {
            page = page.push(text("Loading prayer times..."));
        }
        if let Some(error) = &self.prayer.error {
            page = page.push(text(format!("Could not load prayer times: {error}")));
        }

        if let Some(schedule) = &self.prayer.schedule {
            let today = chrono::Local::now().day();
            if let Some(day) = schedule.for_day(today) {
                page = page.push(
                    column![
                        text(format!("Today, {} {}", day.hari, day.tanggal_lengkap)).size(18),
                        row![
                            text(format!("Imsak {}", day.imsak)),
                            text(format!("Subuh {}", day.subuh)),
                            text(format!("Dzuhur {}", day.dzuhur)),
                            text(format!("Ashar {}", day.ashar)),
                            text(format!("Maghrib {}", day.maghrib)),
                            text(format!("Isya {}", day.isya)),
                        ]
                        .spacing(12),
                    ]
                    .spacing(6),
                );
            }

            let mut table = Column::new().spacing(4);
            table = table.push(
                row![
                    text("Date").width(Length::FillPortion(2)),
                    text("Subuh").width(Length::FillPortion(1)),
                    text("Dzuhur").width(Length::FillPortion(1)),
                    text("Ashar").width(Length::FillPortion(1)),
                    text("Maghrib").width(Length::FillPortion(1)),
                    text("Isya").width(Length::FillPortion(1)),
                ]
                .spacing(8),
            );
            for day in &schedule.jadwal {
                table = table.push(
                    row![
                        text(format!("{} {}", day.hari, day.tanggal))
                            .width(Length::FillPortion(2)),
                        text(&day.subuh).width(Length::FillPortion(1)),
                        text(&day.dzuhur).width(Length::FillPortion(1)),
                        text(&day.ashar).width(Length::FillPortion(1)),
                        text(&day.maghrib).width(Length::FillPortion(1)),
                        text(&day.isya).width(Length::FillPortion(1)),
                    ]
                    .spacing(8),
                );
            }
            page = page.push(
                text(format!("{}, {}", schedule.kabkota, schedule.provinsi)).size(14),
            );
            page = page.push(scrollable(table).height(Length::Fill));
        }

        page.into()
    }

    fn not_found_view(&self, nomor: u32) -> Element<'_, Message> {
        column![
            text(format!("Surah {nomor} does not exist.")).size(20),
            text("Surah numbers run from 1 to 114."),
            button("Back to surahs").on_press(Message::OpenLibrary),
        ]
        .spacing(10)
        .into()
    }
}

fn format_clock(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
