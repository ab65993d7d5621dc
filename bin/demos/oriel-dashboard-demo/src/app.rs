// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::{data, paint};
use egui::RichText;
use oriel::{ChartKind, ChartView, Record, RecordSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Artificial fetch delay so the loading placeholders are visible.
const SIMULATED_FETCH_MS: f64 = 400.0;
const SYNTHETIC_RECORDS: usize = 400;
const SUMMARY_VALUE_MAX_CHARS: usize = 15;

const HEADER_COLOUR: egui::Color32 = egui::Color32::from_rgb(0x60, 0xa5, 0xfa);
const ERROR_COLOUR: egui::Color32 = egui::Color32::from_rgb(0xf8, 0x71, 0x71);
const CARD_COLOURS: [egui::Color32; 4] = [
    egui::Color32::from_rgb(0x25, 0x63, 0xeb),
    egui::Color32::from_rgb(0x16, 0xa3, 0x4a),
    egui::Color32::from_rgb(0x93, 0x33, 0xea),
    egui::Color32::from_rgb(0xea, 0x58, 0x0c),
];

#[derive(Debug, Clone, Default, PartialEq)]
struct FilterState {
    end_year: Option<String>,
    topic: Option<String>,
    sector: Option<String>,
    region: Option<String>,
    pestle: Option<String>,
    source: Option<String>,
    country: Option<String>,
}

impl FilterState {
    fn active_count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, record: &Record) -> bool {
        dimension_matches(&self.end_year, record.end_year())
            && dimension_matches(&self.topic, record.topic())
            && dimension_matches(&self.sector, record.sector())
            && dimension_matches(&self.region, record.region())
            && dimension_matches(&self.pestle, record.pestle())
            && dimension_matches(&self.source, record.source())
            && dimension_matches(&self.country, record.country())
    }

    fn entries(&self) -> [(&'static str, &Option<String>); 7] {
        [
            ("End year", &self.end_year),
            ("Topic", &self.topic),
            ("Sector", &self.sector),
            ("Region", &self.region),
            ("Pestle", &self.pestle),
            ("Source", &self.source),
            ("Country", &self.country),
        ]
    }
}

fn dimension_matches(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(value) => actual == Some(value.as_str()),
    }
}

/// Distinct non-blank values per filter dimension, derived from whatever
/// dataset is loaded rather than a hardcoded vocabulary.
#[derive(Debug, Clone, Default)]
struct FilterOptions {
    end_years: Vec<String>,
    topics: Vec<String>,
    sectors: Vec<String>,
    regions: Vec<String>,
    pestles: Vec<String>,
    sources: Vec<String>,
    countries: Vec<String>,
}

impl FilterOptions {
    fn from_records(records: &[Record]) -> Self {
        Self {
            end_years: distinct(records, Record::end_year),
            topics: distinct(records, Record::topic),
            sectors: distinct(records, Record::sector),
            regions: distinct(records, Record::region),
            pestles: distinct(records, Record::pestle),
            sources: distinct(records, Record::source),
            countries: distinct(records, Record::country),
        }
    }
}

fn distinct<'a>(
    records: &'a [Record],
    read: impl Fn(&'a Record) -> Option<&'a str>,
) -> Vec<String> {
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|record| read(record).map(str::to_string))
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Dataset-wide summary for the stat cards. Computed once per dataset,
/// never per filter change.
#[derive(Debug, Clone, Copy, Default)]
struct Stats {
    total: usize,
    avg_intensity: f64,
    avg_relevance: f64,
    avg_likelihood: f64,
}

impl Stats {
    fn over(records: &[Record]) -> Self {
        Self {
            total: records.len(),
            avg_intensity: mean(records.iter().filter_map(Record::intensity)),
            avg_relevance: mean(records.iter().filter_map(Record::relevance)),
            avg_likelihood: mean(records.iter().filter_map(Record::likelihood)),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub struct DashboardApp {
    dataset: RecordSet,
    filtered: RecordSet,
    filters: FilterState,
    options: FilterOptions,
    stats: Stats,
    source_name: String,
    last_path: Option<PathBuf>,
    seed: u64,
    error: Option<String>,
    loading_until: Option<f64>,
    needs_render: bool,
    bar: ChartView,
    donut: ChartView,
    bubble: ChartView,
    map: ChartView,
}

impl DashboardApp {
    pub fn new() -> Self {
        let seed = 7;
        let dataset = data::synthetic_records(SYNTHETIC_RECORDS, seed);
        Self {
            filtered: dataset.clone(),
            filters: FilterState::default(),
            options: FilterOptions::from_records(&dataset),
            stats: Stats::over(&dataset),
            dataset,
            source_name: format!("synthetic feed ({SYNTHETIC_RECORDS} records)"),
            last_path: None,
            seed,
            error: None,
            loading_until: None,
            needs_render: true,
            bar: ChartView::mount(ChartKind::SectorIntensity),
            donut: ChartView::mount(ChartKind::TopicCounts),
            bubble: ChartView::mount(ChartKind::ScatterSample),
            map: ChartView::mount(ChartKind::CountryCounts),
        }
    }

    fn is_loading(&self) -> bool {
        self.loading_until.is_some()
    }

    /// Swaps in a new dataset: options and stats are rebuilt, filters reset,
    /// and the charts go through a loading interval before re-rendering.
    fn adopt_dataset(&mut self, records: RecordSet, source_name: String, now_ms: f64) {
        self.options = FilterOptions::from_records(&records);
        self.stats = Stats::over(&records);
        self.dataset = records;
        self.source_name = source_name;
        self.filters.clear();
        self.error = None;
        self.begin_reload(now_ms);
    }

    /// Re-filters the dataset and puts every chart into its loading window.
    fn begin_reload(&mut self, now_ms: f64) {
        self.filtered = self
            .dataset
            .iter()
            .filter(|record| self.filters.matches(record))
            .cloned()
            .collect();
        for view in [
            &mut self.bar,
            &mut self.donut,
            &mut self.bubble,
            &mut self.map,
        ] {
            view.set_loading(true);
        }
        self.loading_until = Some(now_ms + SIMULATED_FETCH_MS);
        self.needs_render = true;
        info!(
            filtered = self.filtered.len(),
            total = self.dataset.len(),
            "Filter pass scheduled"
        );
    }

    fn finish_reload_if_due(&mut self, now_ms: f64) {
        if let Some(deadline) = self.loading_until {
            if now_ms >= deadline {
                self.loading_until = None;
                let Self {
                    filtered,
                    bar,
                    donut,
                    bubble,
                    map,
                    ..
                } = self;
                for view in [bar, donut, bubble, map] {
                    view.set_loading(false);
                    view.render(filtered, now_ms);
                }
                self.needs_render = false;
            }
        } else if self.needs_render {
            let Self {
                filtered,
                bar,
                donut,
                bubble,
                map,
                ..
            } = self;
            for view in [bar, donut, bubble, map] {
                view.render(filtered, now_ms);
            }
            self.needs_render = false;
        }
    }

    fn load_from_path(&mut self, path: &Path, now_ms: f64) {
        self.last_path = Some(path.to_path_buf());
        match data::load_records(path) {
            Ok(records) => {
                info!(records = records.len(), path = %path.display(), "Dataset loaded");
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                self.adopt_dataset(records, name, now_ms);
            }
            Err(error) => {
                warn!(%error, "Dataset load failed");
                self.error = Some(format!("{error:#}"));
            }
        }
    }

    fn retry(&mut self, now_ms: f64) {
        if let Some(path) = self.last_path.clone() {
            self.load_from_path(&path, now_ms);
        } else {
            let records = data::synthetic_records(SYNTHETIC_RECORDS, self.seed);
            self.adopt_dataset(
                records,
                format!("synthetic feed ({SYNTHETIC_RECORDS} records)"),
                now_ms,
            );
        }
    }

    fn header(&mut self, ctx: &egui::Context, now_ms: f64) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Insight Dashboard").color(HEADER_COLOUR));
                ui.separator();
                if ui.button("Open JSON feed...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON files", &["json"])
                        .pick_file()
                    {
                        self.load_from_path(&path, now_ms);
                    }
                }
                if ui.button("New synthetic feed").clicked() {
                    self.seed += 1;
                    self.last_path = None;
                    let records = data::synthetic_records(SYNTHETIC_RECORDS, self.seed);
                    self.adopt_dataset(
                        records,
                        format!("synthetic feed #{}", self.seed),
                        now_ms,
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(&self.source_name).weak());
                    ui.separator();
                    if self.is_loading() {
                        ui.label(RichText::new("Loading...").color(HEADER_COLOUR));
                        ui.spinner();
                        ui.separator();
                    }
                    ui.label(format!("{} insights loaded", self.filtered.len()));
                });
            });
            ui.add_space(4.0);
        });
    }

    fn sidebar(&mut self, ctx: &egui::Context, now_ms: f64) {
        egui::SidePanel::left("filters")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Filters").strong().size(16.0));
                        let active = self.filters.active_count();
                        if active > 0 {
                            ui.label(
                                RichText::new(format!("{active}"))
                                    .color(HEADER_COLOUR)
                                    .strong(),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui
                                        .button(RichText::new("Clear").color(ERROR_COLOUR))
                                        .clicked()
                                    {
                                        self.filters.clear();
                                        self.begin_reload(now_ms);
                                    }
                                },
                            );
                        }
                    });
                    if self.is_loading() {
                        ui.label(
                            RichText::new("Updating filters...")
                                .color(HEADER_COLOUR)
                                .small(),
                        );
                    }
                    ui.add_space(8.0);

                    let mut changed = false;
                    changed |= filter_combo(
                        ui,
                        "filter_end_year",
                        "End Year",
                        "Select year",
                        &mut self.filters.end_year,
                        &self.options.end_years,
                    );
                    changed |= filter_combo(
                        ui,
                        "filter_topic",
                        "Topic",
                        "All topics",
                        &mut self.filters.topic,
                        &self.options.topics,
                    );
                    changed |= filter_combo(
                        ui,
                        "filter_sector",
                        "Sector",
                        "All sectors",
                        &mut self.filters.sector,
                        &self.options.sectors,
                    );
                    changed |= filter_combo(
                        ui,
                        "filter_region",
                        "Region",
                        "All regions",
                        &mut self.filters.region,
                        &self.options.regions,
                    );
                    changed |= filter_combo(
                        ui,
                        "filter_pestle",
                        "PESTLE",
                        "All PESTLE factors",
                        &mut self.filters.pestle,
                        &self.options.pestles,
                    );
                    changed |= filter_combo(
                        ui,
                        "filter_source",
                        "Source",
                        "All sources",
                        &mut self.filters.source,
                        &self.options.sources,
                    );
                    changed |= filter_combo(
                        ui,
                        "filter_country",
                        "Country",
                        "All countries",
                        &mut self.filters.country,
                        &self.options.countries,
                    );
                    if changed {
                        self.begin_reload(now_ms);
                    }

                    ui.add_space(12.0);
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(RichText::new("Active Filters").strong());
                        if self.filters.active_count() == 0 {
                            ui.label(
                                RichText::new("No filters applied - showing all data")
                                    .small()
                                    .weak(),
                            );
                        } else {
                            for (name, value) in self.filters.entries() {
                                let Some(value) = value else { continue };
                                ui.horizontal(|ui| {
                                    ui.label(RichText::new(format!("{name}:")).small().weak());
                                    ui.label(
                                        RichText::new(truncate_summary(value)).small().strong(),
                                    );
                                });
                            }
                        }
                    });
                });
            });
    }

    fn stats_row(&self, ui: &mut egui::Ui) {
        let cards = [
            ("Total Insights", format!("{}", self.stats.total)),
            ("Avg Intensity", format!("{:.2}", self.stats.avg_intensity)),
            ("Avg Relevance", format!("{:.2}", self.stats.avg_relevance)),
            ("Avg Likelihood", format!("{:.2}", self.stats.avg_likelihood)),
        ];
        ui.columns(4, |columns| {
            for (column, ((title, value), colour)) in
                columns.iter_mut().zip(cards.into_iter().zip(CARD_COLOURS))
            {
                egui::Frame::group(column.style())
                    .fill(colour.gamma_multiply(0.25))
                    .show(column, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(title).small());
                        ui.label(RichText::new(value).strong().size(22.0));
                    });
            }
        });
    }

    fn error_banner(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        let Some(message) = self.error.clone() else {
            return;
        };
        egui::Frame::group(ui.style())
            .fill(ERROR_COLOUR.gamma_multiply(0.15))
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Error Loading Dashboard")
                        .color(ERROR_COLOUR)
                        .strong(),
                );
                ui.label(message);
                ui.horizontal(|ui| {
                    if ui.button("Retry").clicked() {
                        self.retry(now_ms);
                    }
                    if ui.button("Dismiss").clicked() {
                        self.error = None;
                    }
                });
            });
        ui.add_space(8.0);
    }

    fn charts_grid(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        ui.columns(2, |columns| {
            chart_card(
                &mut columns[0],
                "Average Intensity by Sector",
                &mut self.bar,
                now_ms,
            );
            chart_card(
                &mut columns[1],
                "Top Topics Distribution",
                &mut self.donut,
                now_ms,
            );
        });
        ui.add_space(10.0);
        ui.columns(2, |columns| {
            chart_card(
                &mut columns[0],
                "Relevance vs Likelihood",
                &mut self.bubble,
                now_ms,
            );
            chart_card(&mut columns[1], "Global Distribution", &mut self.map, now_ms);
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;
        self.finish_reload_if_due(now_ms);

        self.header(ctx, now_ms);
        self.sidebar(ctx, now_ms);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                self.error_banner(ui, now_ms);
                self.stats_row(ui);
                ui.add_space(10.0);
                self.charts_grid(ui, now_ms);
            });
        });

        let mut animating = false;
        for view in [
            &mut self.bar,
            &mut self.donut,
            &mut self.bubble,
            &mut self.map,
        ] {
            animating |= view.tick(now_ms);
        }
        if animating || self.is_loading() {
            ctx.request_repaint();
        }
    }
}

fn filter_combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    placeholder: &str,
    value: &mut Option<String>,
    options: &[String],
) -> bool {
    let mut changed = false;
    ui.label(RichText::new(label).small().strong());
    let selected = value.clone().unwrap_or_else(|| placeholder.to_string());
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(selected)
        .show_ui(ui, |ui| {
            if ui.selectable_label(value.is_none(), placeholder).clicked() && value.is_some() {
                *value = None;
                changed = true;
            }
            for option in options {
                let current = value.as_deref() == Some(option.as_str());
                if ui.selectable_label(current, option).clicked() && !current {
                    *value = Some(option.clone());
                    changed = true;
                }
            }
        });
    ui.add_space(8.0);
    changed
}

fn chart_card(ui: &mut egui::Ui, title: &str, view: &mut ChartView, now_ms: f64) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).strong().size(15.0));
        ui.add_space(4.0);
        paint::chart_canvas(ui, view, now_ms);
    });
}

/// Long filter values get shortened in the summary panel.
fn truncate_summary(value: &str) -> String {
    if value.chars().count() > SUMMARY_VALUE_MAX_CHARS {
        let head: String = value.chars().take(SUMMARY_VALUE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}
