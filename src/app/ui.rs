// src/app/ui.rs
use eframe::egui as eg;

use super::poster;
use super::types::{MovieCard, SearchState};
use super::FlickApp;

const POSTER_MAX_W: f32 = 300.0;

impl FlickApp {
    pub(crate) fn ui_render(&mut self, ctx: &eg::Context, ui: &mut eg::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.heading("Movie Search");
            ui.label("Search for your favorite movies and explore their details.");
            ui.add_space(8.0);
        });

        if self.ui_render_search_bar(ui) {
            self.submit_search();
        }

        ui.separator();

        match &mut self.state {
            SearchState::Idle => {}
            SearchState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.add(eg::Spinner::new().size(30.0));
                });
            }
            SearchState::Failed(msg) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.colored_label(eg::Color32::from_rgb(220, 80, 80), msg.as_str());
                });
            }
            SearchState::Success(card) => {
                Self::ui_render_card(ctx, ui, card);
            }
        }
    }

    /// Returns true when the user asked for a search (button or Enter).
    fn ui_render_search_bar(&mut self, ui: &mut eg::Ui) -> bool {
        let mut submitted = false;
        ui.horizontal(|ui| {
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.search_query)
                    .hint_text("Enter a movie title")
                    .desired_width((ui.available_width() - 90.0).max(120.0)),
            );
            if resp.lost_focus() && ui.input(|i| i.key_pressed(eg::Key::Enter)) {
                submitted = true;
            }
            if ui.button("Search").clicked() {
                submitted = true;
            }
        });
        submitted
    }

    fn ui_render_card(ctx: &eg::Context, ui: &mut eg::Ui, card: &mut MovieCard) {
        // Lazy texture upload, UI thread only.
        if card.tex.is_none() {
            if let Some(p) = &card.poster {
                card.tex = Some(poster::upload_poster(ctx, &card.record.title, p));
            }
        }

        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);

                    let avail_w = ui.available_width().clamp(120.0, POSTER_MAX_W);
                    let poster_size = eg::vec2(avail_w, avail_w * 1.5);
                    if let Some(tex) = &card.tex {
                        ui.image((tex.id(), poster_size));
                    } else {
                        // Sentinel "N/A" posters and failed downloads share
                        // the same painted placeholder.
                        let (rect, _resp) =
                            ui.allocate_exact_size(poster_size, eg::Sense::hover());
                        ui.painter().rect_filled(rect, 8.0, eg::Color32::from_gray(40));
                        ui.painter().text(
                            rect.center(),
                            eg::Align2::CENTER_CENTER,
                            "No poster",
                            eg::FontId::proportional(14.0),
                            eg::Color32::WHITE,
                        );
                    }

                    ui.add_space(8.0);
                    ui.heading(&card.record.title);
                    ui.label(eg::RichText::new(&card.record.plot).italics());

                    ui.add_space(6.0);
                    ui.label(
                        eg::RichText::new(format!(
                            "{}  •  ⭐ {}",
                            card.record.year, card.record.imdb_rating
                        ))
                        .weak(),
                    );

                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(6.0);

                    Self::ui_field_row(ui, "Genre", &card.record.genre);
                    Self::ui_field_row(ui, "Director", &card.record.director);
                    Self::ui_field_row(ui, "Actors", &card.record.actors);
                    Self::ui_field_row(ui, "Runtime", &card.record.runtime);
                    Self::ui_field_row(ui, "Released", &card.record.released);
                });
            });
    }

    fn ui_field_row(ui: &mut eg::Ui, label: &str, value: &str) {
        ui.horizontal_wrapped(|ui| {
            ui.label(eg::RichText::new(format!("{label}:")).strong());
            ui.label(value);
        });
    }
}
