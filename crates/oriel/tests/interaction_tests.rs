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

use oriel::{
    ChartConfig, ChartKind, ChartView, ConfigError, DashboardError, ElementId, ElementPhase,
    HitRegion, Margins, Record, Shape,
};

fn sector_record(sector: &str, intensity: f64) -> Record {
    Record {
        sector: Some(sector.to_string()),
        intensity: Some(intensity),
        ..Record::default()
    }
}

fn topic_record(topic: &str) -> Record {
    Record {
        topic: Some(topic.to_string()),
        ..Record::default()
    }
}

/// Centre of the first hit target in the scene at `now_ms`.
fn first_target_centre(view: &oriel::ChartView, now_ms: f64) -> (f32, f32) {
    let scene = view.scene_at(now_ms);
    match scene.hit_targets[0].region {
        HitRegion::Rect {
            x,
            y,
            width,
            height,
        } => (x + width / 2.0, y + height / 2.0),
        HitRegion::Circle { cx, cy, .. } => (cx, cy),
        HitRegion::Annulus {
            cx,
            cy,
            inner_radius,
            outer_radius,
            ..
        } => (cx, cy - (inner_radius + outer_radius) / 2.0),
    }
}

#[test]
fn test_unrendered_view_shows_no_data_placeholder() {
    let view = ChartView::mount(ChartKind::SectorIntensity);
    let scene = view.scene_at(0.0);
    assert_eq!(scene.text_contents(), vec!["No data available"]);
    assert!(scene.hit_targets.is_empty());
    assert!(!view.overlay().unwrap().is_visible());
}

#[test]
fn test_loading_placeholder_suppresses_rendering() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    view.set_loading(true);
    view.render(&[sector_record("Energy", 10.0)], 0.0);
    let scene = view.scene_at(0.0);
    assert_eq!(scene.text_contents(), vec!["Loading chart..."]);
    assert!(scene.hit_targets.is_empty());
    assert!(!view.is_animating(100.0), "nothing animates while loading");

    // The ignored render left nothing behind once loading clears.
    view.set_loading(false);
    assert_eq!(view.scene_at(0.0).text_contents(), vec!["No data available"]);
    view.render(&[sector_record("Energy", 10.0)], 0.0);
    assert_eq!(view.scene_at(1000.0).hit_targets.len(), 1);
}

#[test]
fn test_hover_drives_the_tooltip_lifecycle() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    view.render(&[sector_record("Energy", 10.0)], 0.0);
    let centre = first_target_centre(&view, 1000.0);

    view.pointer_moved(centre, 1000.0);
    let overlay = view.overlay().unwrap();
    assert!(overlay.is_visible());
    let content = overlay.content().unwrap();
    assert_eq!(content.title, "Energy");
    assert_eq!(content.lines, vec!["Avg Intensity: 10.00"]);
    assert_eq!(overlay.position(), (centre.0 + 10.0, centre.1 - 10.0));

    // Moving inside the same bar drags the tooltip along.
    view.pointer_moved((centre.0 + 1.0, centre.1 + 1.0), 1000.0);
    let overlay = view.overlay().unwrap();
    assert_eq!(overlay.position(), (centre.0 + 11.0, centre.1 - 9.0));

    // Leaving for the margin hides it.
    view.pointer_moved((1.0, 1.0), 1500.0);
    assert!(!view.overlay().unwrap().is_visible());
}

#[test]
fn test_hover_switches_between_neighbouring_bars() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    view.render(
        &[sector_record("Energy", 20.0), sector_record("Retail", 5.0)],
        0.0,
    );
    let scene = view.scene_at(1000.0);
    assert_eq!(scene.hit_targets.len(), 2);
    let centre_of = |target: &oriel::HitTarget| match target.region {
        HitRegion::Rect {
            x,
            y,
            width,
            height,
        } => (x + width / 2.0, y + height / 2.0),
        _ => panic!("bars must hit-test as rects"),
    };
    let first = centre_of(&scene.hit_targets[0]);
    let second = centre_of(&scene.hit_targets[1]);

    view.pointer_moved(first, 1000.0);
    assert_eq!(view.overlay().unwrap().content().unwrap().title, "Energy");
    view.pointer_moved(second, 1100.0);
    let overlay = view.overlay().unwrap();
    assert!(overlay.is_visible());
    assert_eq!(overlay.content().unwrap().title, "Retail");
}

#[test]
fn test_pointer_left_hides_the_tooltip() {
    let mut view = ChartView::mount(ChartKind::CountryCounts);
    view.render(
        &[Record {
            country: Some("India".to_string()),
            ..Record::default()
        }],
        0.0,
    );
    let centre = first_target_centre(&view, 2000.0);
    view.pointer_moved(centre, 2000.0);
    assert!(view.overlay().unwrap().is_visible());
    assert_eq!(
        view.overlay().unwrap().content().unwrap().lines,
        vec!["Insights: 1"]
    );
    view.pointer_left(2100.0);
    assert!(!view.overlay().unwrap().is_visible());
}

#[test]
fn test_teardown_releases_overlay_and_ignores_everything() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    view.render(&[sector_record("Energy", 10.0)], 0.0);
    view.teardown();

    assert!(view.overlay().is_none());
    let scene = view.scene_at(1000.0);
    assert!(scene.nodes.is_empty());
    assert!(scene.hit_targets.is_empty());

    // Post-teardown traffic is inert rather than a panic.
    view.render(&[sector_record("Energy", 10.0)], 2000.0);
    view.pointer_moved((100.0, 100.0), 2000.0);
    assert!(view.scene_at(3000.0).nodes.is_empty());
    assert!(!view.is_animating(2000.0));
}

#[test]
fn test_rerender_discards_hover_state() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    let records = [sector_record("Energy", 10.0)];
    view.render(&records, 0.0);
    view.pointer_moved(first_target_centre(&view, 1000.0), 1000.0);
    assert!(view.overlay().unwrap().is_visible());

    view.render(&records, 1000.0);
    assert!(
        !view.overlay().unwrap().is_visible(),
        "a new generation starts unhovered"
    );
}

#[test]
fn test_views_keep_distinct_overlay_identities() {
    let left = ChartView::mount(ChartKind::TopicCounts);
    let right = ChartView::mount(ChartKind::TopicCounts);
    assert_ne!(left.id(), right.id());
    assert_eq!(left.overlay().unwrap().chart(), left.id());
    assert_eq!(right.overlay().unwrap().chart(), right.id());
}

#[test]
fn test_element_phase_follows_the_enter_clock() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    assert_eq!(view.element_phase(ElementId(0), 0.0), None);

    view.render(&[sector_record("Energy", 10.0)], 0.0);
    assert_eq!(
        view.element_phase(ElementId(0), 100.0),
        Some(ElementPhase::Entering)
    );
    assert_eq!(
        view.element_phase(ElementId(0), 800.0),
        Some(ElementPhase::Steady)
    );
    assert_eq!(
        view.element_phase(ElementId(999), 800.0),
        Some(ElementPhase::Replaced)
    );
}

#[test]
fn test_midflight_rerender_restarts_entry_from_nothing() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    let records = [sector_record("Energy", 10.0)];
    view.render(&records, 0.0);
    view.render(&records, 400.0);
    let scene = view.scene_at(400.0);
    let bar = scene
        .nodes
        .iter()
        .find(|node| node.element.is_some())
        .unwrap();
    let Shape::Rect { height, .. } = bar.shape else {
        panic!("bars must be rects");
    };
    assert_eq!(height, 0.0, "the replacement generation enters from scratch");
}

#[test]
fn test_donut_hit_testing_respects_the_hole() {
    let mut view = ChartView::mount(ChartKind::TopicCounts);
    view.render(&[topic_record("oil")], 0.0);

    // Dead centre sits in the hole; no slice, no tooltip.
    view.pointer_moved((200.0, 150.0), 2000.0);
    assert!(!view.overlay().unwrap().is_visible());

    // Straight up from centre lands inside the single slice's ring.
    view.pointer_moved((200.0, 50.0), 2000.0);
    let overlay = view.overlay().unwrap();
    assert!(overlay.is_visible());
    let content = overlay.content().unwrap();
    assert_eq!(content.title, "oil");
    assert_eq!(content.lines, vec!["Count: 1", "Percentage: 100.0%"]);
}

#[test]
fn test_half_grown_bubbles_hit_test_at_their_current_size() {
    let mut view = ChartView::mount(ChartKind::ScatterSample);
    view.render(
        &[Record {
            relevance: Some(3.0),
            likelihood: Some(3.0),
            intensity: Some(5.0),
            ..Record::default()
        }],
        0.0,
    );
    // A point just off centre misses the zero-radius circle at t=0 but
    // sits well inside it once fully grown.
    let probe = {
        let scene = view.scene_at(1000.0);
        let HitRegion::Circle { cx, cy, .. } = scene.hit_targets[0].region else {
            panic!("bubbles must hit-test as circles");
        };
        (cx + 1.0, cy)
    };
    assert!(view.scene_at(0.0).hit_test(probe.0, probe.1).is_none());
    assert_eq!(
        view.scene_at(1000.0).hit_test(probe.0, probe.1),
        Some(ElementId(0))
    );
}

#[test]
fn test_is_animating_tracks_enter_and_hover_windows() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    view.render(&[sector_record("Energy", 10.0)], 0.0);
    assert!(view.is_animating(100.0));
    assert!(!view.is_animating(800.0), "entry ends at the configured 800ms");

    let centre = first_target_centre(&view, 800.0);
    view.pointer_moved(centre, 800.0);
    assert!(view.is_animating(900.0), "hover eases over 200ms");
    assert!(!view.is_animating(1000.0));
    assert!(!view.tick(1000.0));
}

#[test]
fn test_with_config_rejects_margins_that_eat_the_canvas() {
    let config = ChartConfig {
        margins: Margins::new(200.0, 300.0, 200.0, 300.0),
        ..ChartConfig::for_kind(ChartKind::SectorIntensity)
    };
    let outcome = ChartView::with_config(ChartKind::SectorIntensity, config);
    assert!(matches!(
        outcome,
        Err(DashboardError::Config(ConfigError::ValidationFailed { .. }))
    ));
}

#[test]
fn test_set_loading_discards_rendered_elements() {
    let mut view = ChartView::mount(ChartKind::SectorIntensity);
    view.render(&[sector_record("Energy", 10.0)], 0.0);
    assert_eq!(view.scene_at(1000.0).hit_targets.len(), 1);
    view.set_loading(true);
    view.set_loading(false);
    assert!(view.scene_at(1000.0).hit_targets.is_empty());
    assert_eq!(
        view.scene_at(1000.0).text_contents(),
        vec!["No data available"]
    );
}
