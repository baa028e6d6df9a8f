// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! End-to-end scanning behaviour driven through raw switch presses.

mod common;

use std::time::Duration;

use common::{Host, Rig};
use switchscan::{Channel, Mode, Target, TargetKind};

fn six_rows() -> Host {
    let host = Host::default();
    for row in ["r0", "r1", "r2", "r3", "r4", "r5"] {
        host.add_row(row, &["a", "b", "c", "d"]);
    }
    host
}

#[test]
fn short_presses_wrap_around_rows() {
    let mut rig = Rig::new(six_rows());

    let mut seen = vec![];
    for _ in 0..7 {
        rig.next();
        seen.push(rig.engine.context().row_index());
    }

    assert_eq!(seen, [1, 2, 3, 4, 5, 0, 1]);
    assert_eq!(rig.host.last_said().as_deref(), Some("r1"));
}

#[test]
fn press_held_exactly_short_min_advances() {
    let mut rig = Rig::new(six_rows());
    rig.press(Channel::Primary, 250);
    assert_eq!(rig.engine.context().row_index(), 1);
}

#[test]
fn press_just_under_short_min_is_ignored() {
    let mut rig = Rig::new(six_rows());
    rig.press(Channel::Primary, 249);
    assert_eq!(rig.engine.context().row_index(), 0);
    assert!(rig.host.said().is_empty());
}

#[test]
fn hold_to_reverse_then_release_does_nothing_more() {
    let mut rig = Rig::new(six_rows());

    rig.engine.on_channel_down(Channel::Primary, rig.now);
    rig.wait(2500);
    assert_eq!(rig.engine.context().row_index(), 5);

    rig.wait(300);
    rig.engine.on_channel_up(Channel::Primary, rig.now);
    assert_eq!(rig.engine.context().row_index(), 5);
    assert_eq!(rig.host.said(), ["r5"]);
}

#[test]
fn release_past_reverse_hold_before_any_tick_reverses() {
    let mut rig = Rig::new(six_rows());
    let t0 = rig.now;

    rig.engine.on_channel_down(Channel::Primary, t0);
    rig.engine.on_channel_up(Channel::Primary, t0 + Duration::from_millis(2505));

    assert_eq!(rig.engine.context().row_index(), 5);
    assert_eq!(rig.host.said(), ["r5"]);
}

#[test]
fn release_past_long_select_before_any_tick_does_not_activate() {
    let mut rig = Rig::new(six_rows());
    rig.select();
    assert_eq!(rig.engine.context().mode(), Mode::Items);
    let t0 = rig.now;

    rig.engine.on_channel_down(Channel::Secondary, t0);
    rig.engine.on_channel_up(Channel::Secondary, t0 + Duration::from_millis(3005));

    assert!(rig.host.activated().is_empty());
    assert_eq!(rig.engine.context().mode(), Mode::Rows);
    assert_eq!(rig.host.last_said().as_deref(), Some("rows"));
}

#[test]
fn select_enters_items_and_hold_select_returns_to_same_row() {
    let mut rig = Rig::new(six_rows());
    rig.next();
    rig.next();

    rig.select();
    assert_eq!(rig.engine.context().mode(), Mode::Items);
    assert_eq!(rig.engine.context().item_index(), 0);
    assert_eq!(rig.host.last_said().as_deref(), Some("a"));

    rig.hold_select();
    assert_eq!(rig.engine.context().mode(), Mode::Rows);
    assert_eq!(rig.engine.context().row_index(), 2);
    assert_eq!(rig.host.last_said().as_deref(), Some("rows"));
    assert!(rig.host.activated().is_empty());
}

#[test]
fn select_twice_within_cooldown_activates_once() {
    let host = six_rows();
    host.set_overlay(&["play", "next", "close"]);
    let mut rig = Rig::new(host);
    rig.engine.open_overlay(rig.now);
    rig.wait(200);

    rig.press(Channel::Secondary, 50);
    rig.wait(50);
    rig.press(Channel::Secondary, 50);

    assert_eq!(rig.host.activated(), ["play"]);
}

#[test]
fn overlay_advances_wrap_over_its_targets() {
    let host = six_rows();
    host.set_overlay(&["play", "next", "close"]);
    let mut rig = Rig::new(host);
    rig.engine.open_overlay(rig.now);
    rig.wait(200);

    let mut seen = vec![];
    for _ in 0..3 {
        rig.next();
        seen.push(rig.engine.context().overlay_index());
    }

    assert_eq!(seen, [1, 2, 0]);
    assert_eq!(rig.engine.context().row_index(), 0);
}

#[test]
fn overlay_round_trip_restores_position() {
    let host = six_rows();
    host.set_overlay(&["close"]);
    let mut rig = Rig::new(host);
    rig.next();
    rig.next();
    rig.select();
    rig.next();
    let before = rig.engine.context().clone();

    rig.engine.open_overlay(rig.now);
    rig.engine.close_overlay();

    let after = rig.engine.context();
    assert_eq!(after.mode(), before.mode());
    assert_eq!(after.row_index(), before.row_index());
    assert_eq!(after.item_index(), before.item_index());
    assert!(!after.overlay_active());
}

#[test]
fn holding_select_in_overlay_is_a_plain_select() {
    let host = six_rows();
    host.set_overlay(&["play", "close"]);
    let mut rig = Rig::new(host);
    rig.engine.open_overlay(rig.now);
    rig.wait(200);

    rig.press(Channel::Secondary, 4000);

    assert_eq!(rig.host.activated(), ["play"]);
    assert!(rig.engine.context().overlay_active());
}

#[test]
fn overlay_opened_mid_hold_still_selects_on_release() {
    let host = six_rows();
    host.set_overlay(&["play", "close"]);
    let mut rig = Rig::new(host);

    rig.engine.on_channel_down(Channel::Secondary, rig.now);
    rig.wait(1000);
    rig.engine.open_overlay(rig.now);
    rig.wait(2500);
    rig.engine.on_channel_up(Channel::Secondary, rig.now);

    assert_eq!(rig.host.activated(), ["play"]);
    assert!(rig.engine.context().overlay_active());
}

#[test]
fn hold_select_reads_predictions_one_per_second() {
    let host = Host::default();
    host.add_row("letters", &["a", "b"]);
    {
        let mut surface = host.0.borrow_mut();
        let pred = Target::new("pred", "predictive text", TargetKind::Predictive);
        surface.items.insert(
            pred.id.clone(),
            vec![Target::item("w0", "cat"), Target::item("w1", "car")],
        );
        surface.rows.push(pred);
    }
    let mut rig = Rig::new(host);

    rig.engine.on_channel_down(Channel::Secondary, rig.now);
    rig.wait(3000);
    assert_eq!(rig.engine.context().row_index(), 1);
    assert_eq!(rig.host.said(), ["cat"]);

    rig.wait(100);
    rig.engine.on_channel_up(Channel::Secondary, rig.now);
    rig.wait(1000);
    assert_eq!(rig.host.said(), ["cat", "car"]);
    assert_eq!(rig.engine.context().mode(), Mode::Rows);
}

#[test]
fn text_row_select_speaks_content() {
    let host = six_rows();
    host.0.borrow_mut().rows.insert(
        0,
        Target::new("text", "text", TargetKind::TextEntry { text: "hi there".to_string() }),
    );
    let mut rig = Rig::new(host);

    rig.select();

    assert_eq!(rig.engine.context().mode(), Mode::Rows);
    assert_eq!(rig.host.said(), ["hi there"]);
}

#[test]
fn repeated_refresh_has_no_further_effect() {
    let mut rig = Rig::new(six_rows());
    rig.next();

    rig.engine.refresh();
    let said = rig.host.said().len();
    rig.engine.refresh();

    assert_eq!(rig.host.said().len(), said);
}

#[test]
fn hidden_rows_clamp_focus_on_refresh() {
    let mut rig = Rig::new(six_rows());
    for _ in 0..5 {
        rig.next();
    }
    rig.host.0.borrow_mut().rows.truncate(3);

    rig.engine.refresh();

    assert_eq!(rig.engine.context().row_index(), 2);
    assert_eq!(rig.host.last_said().as_deref(), Some("r2"));
}

/// Small deterministic generator so the sequence is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

#[test]
fn indices_stay_within_live_list() {
    let host = Host::default();
    host.add_row("wide", &["1", "2", "3", "4", "5", "6", "7"]);
    host.add_row("narrow", &["x"]);
    host.add_row("empty", &[]);
    host.add_row("pair", &["p", "q"]);
    host.set_overlay(&["o1", "o2", "o3"]);
    let mut rig = Rig::new(host);
    let mut rng = Lcg(7);

    for _ in 0..400 {
        match rng.next(8) {
            0 | 1 => rig.press(Channel::Primary, 250 + rng.next(400)),
            2 => rig.press(Channel::Primary, 2500 + rng.next(800)),
            3 => rig.press(Channel::Secondary, 50 + rng.next(300)),
            4 => rig.press(Channel::Secondary, 3000 + rng.next(500)),
            5 => {
                if rig.engine.context().overlay_active() {
                    rig.engine.close_overlay();
                } else {
                    rig.engine.open_overlay(rig.now);
                }
            }
            6 => rig.engine.refresh(),
            _ => rig.wait(rng.next(700)),
        }

        let ctx = rig.engine.context();
        let surface = rig.host.0.borrow();
        assert!(ctx.row_index() < surface.rows.len());
        assert!(ctx.overlay_index() < surface.overlay.len());
        if ctx.mode() == Mode::Items {
            let row = &surface.rows[ctx.row_index()];
            let count = surface.items[&row.id].len();
            assert!(count == 0 || ctx.item_index() < count);
        }
    }
}
