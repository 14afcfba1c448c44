use super::*;
use crate::domain::{Cell, Hsl, Rgb};

const COLOR_A: Rgb = Rgb::new(230, 196, 25);
const COLOR_B: Rgb = Rgb::new(90, 60, 10);

fn count_occupied(world: &WorldCore) -> usize {
    world.grid.cells().iter().filter(|c| !c.is_empty()).count()
}

fn put(world: &mut WorldCore, x: u32, y: u32, color: Rgb) {
    assert!(world.grid.set_cell(x, y, Cell::occupied(color)));
}

#[test]
fn one_by_three_column_falls_one_row_per_tick() {
    let mut world = WorldCore::new(1, 3, 1);
    put(&mut world, 0, 0, COLOR_A);

    world.tick();
    assert_eq!(world.cell_at(0, 0), Cell::EMPTY);
    assert_eq!(world.cell_at(0, 1), Cell::occupied(COLOR_A));
    assert_eq!(world.cell_at(0, 2), Cell::EMPTY);

    world.tick();
    assert_eq!(world.cell_at(0, 1), Cell::EMPTY);
    assert_eq!(world.cell_at(0, 2), Cell::occupied(COLOR_A));

    // Resting on the floor from now on
    world.tick();
    assert_eq!(world.cell_at(0, 2), Cell::occupied(COLOR_A));
    assert_eq!(world.frame(), 3);
}

#[test]
fn stacked_particles_move_at_most_once_per_tick() {
    let mut world = WorldCore::new(1, 3, 1);
    put(&mut world, 0, 0, COLOR_A);
    put(&mut world, 0, 1, COLOR_B);

    world.tick();

    // The lower one drops to the floor, the upper one follows by exactly one row
    assert_eq!(world.cell_at(0, 0), Cell::EMPTY);
    assert_eq!(world.cell_at(0, 1), Cell::occupied(COLOR_A));
    assert_eq!(world.cell_at(0, 2), Cell::occupied(COLOR_B));
}

#[test]
fn falling_particle_does_not_pass_through_a_resting_one() {
    let mut world = WorldCore::new(1, 3, 1);
    put(&mut world, 0, 0, COLOR_A);
    put(&mut world, 0, 2, COLOR_B);

    world.tick();
    assert_eq!(world.cell_at(0, 1), Cell::occupied(COLOR_A));
    assert_eq!(world.cell_at(0, 2), Cell::occupied(COLOR_B));

    world.tick();
    assert_eq!(world.cell_at(0, 1), Cell::occupied(COLOR_A));
    assert_eq!(world.cell_at(0, 2), Cell::occupied(COLOR_B));
}

#[test]
fn blocked_particle_rolls_left_before_right() {
    let mut world = WorldCore::new(3, 2, 1);
    put(&mut world, 1, 0, COLOR_A);
    put(&mut world, 1, 1, COLOR_B);

    world.tick();

    assert_eq!(world.cell_at(0, 1), Cell::occupied(COLOR_A));
    assert_eq!(world.cell_at(2, 1), Cell::EMPTY);
    assert_eq!(world.cell_at(1, 0), Cell::EMPTY);
}

#[test]
fn edge_particles_do_not_wrap_around_rows() {
    let mut world = WorldCore::new(4, 3, 1);
    // Left edge particle sitting on a support, right side of it blocked
    put(&mut world, 0, 0, COLOR_A);
    put(&mut world, 0, 1, COLOR_B);
    put(&mut world, 1, 1, COLOR_B);
    // Right edge particle sitting on a support, left side of it blocked
    put(&mut world, 3, 0, COLOR_A);
    put(&mut world, 3, 1, COLOR_B);
    put(&mut world, 2, 1, COLOR_B);
    // Make the supports rest on a full floor
    for x in 0..4 {
        put(&mut world, x, 2, COLOR_B);
    }

    world.tick();

    assert_eq!(world.cell_at(0, 0), Cell::occupied(COLOR_A));
    assert_eq!(world.cell_at(3, 0), Cell::occupied(COLOR_A));
    assert_eq!(world.particle_count(), 10);
}

#[test]
fn floor_row_never_moves() {
    let mut world = WorldCore::new(8, 4, 1);
    let floor: Vec<(u32, Rgb)> = (0..8)
        .step_by(2)
        .map(|x| (x, Rgb::new(x as u8 * 10, 0, 0)))
        .collect();
    for &(x, c) in &floor {
        put(&mut world, x, 3, c);
    }
    world.set_seed(21);
    world.stamp(4, 0, &mut || COLOR_A, 2, 1.0);

    for _ in 0..10 {
        world.tick();
        for &(x, c) in &floor {
            assert_eq!(world.cell_at(x, 3), Cell::occupied(c));
        }
    }
}

#[test]
fn ticks_conserve_mass() {
    let mut world = WorldCore::new(120, 90, 3);
    world.set_seed(7);
    for (x, y) in [(10, 5), (60, 20), (119, 0), (0, 89), (70, 70)] {
        world.stamp_brush(x, y);
    }
    let before = count_occupied(&world);
    assert!(before > 0);

    for _ in 0..200 {
        world.tick();
        assert_eq!(count_occupied(&world), before);
        assert_eq!(world.particle_count() as usize, before);
    }
    assert!(world.grid.counters_consistent());
}

#[test]
fn column_of_sand_settles_into_a_pile() {
    let mut world = WorldCore::new(9, 8, 1);
    for y in 0..5 {
        put(&mut world, 4, y, COLOR_A);
    }
    world.enable_perf_metrics(true);

    let mut settled = false;
    for _ in 0..50 {
        world.tick();
        if world.get_perf_stats().particles_moved() == 0 {
            settled = true;
            break;
        }
    }
    assert!(settled, "pile never came to rest");

    let snapshot = world.grid.cells().to_vec();
    world.tick();
    assert_eq!(world.grid.cells(), snapshot.as_slice());
    assert_eq!(world.particle_count(), 5);
    // The pile spreads: more than one particle on the floor
    assert!(world.grid.row_occupied(7) > 1);
}

#[test]
fn clear_then_tick_stays_empty() {
    let mut world = WorldCore::new(50, 50, 1);
    world.set_seed(3);
    world.stamp_brush(25, 25);
    assert!(world.particle_count() > 0);

    world.clear();
    world.tick();

    assert_eq!(world.particle_count(), 0);
    assert_eq!(count_occupied(&world), 0);
    assert_eq!((world.width(), world.height()), (50, 50));
}

#[test]
fn configure_discards_every_particle() {
    let mut world = WorldCore::new(100, 100, 2);
    world.set_seed(5);
    world.stamp(50, 50, &mut || COLOR_A, 10, 1.0);
    assert!(world.particle_count() > 0);
    let generation = world.generation();

    world.configure(60, 30, 3);

    assert_eq!((world.width(), world.height(), world.particle_size()), (20, 10, 3));
    assert_eq!(world.particle_count(), 0);
    assert_eq!(count_occupied(&world), 0);
    assert_eq!(world.generation(), generation + 1);
    assert_eq!(world.frame(), 0);

    // Same dimensions still start a fresh, empty generation
    world.stamp(10, 10, &mut || COLOR_A, 2, 1.0);
    world.configure(60, 30, 3);
    assert_eq!(count_occupied(&world), 0);
}

#[test]
fn configure_clamps_degenerate_geometry() {
    let mut world = WorldCore::new(0, 0, 0);
    assert_eq!((world.width(), world.height(), world.particle_size()), (1, 1, 1));

    world.configure(10, 10, 0);
    assert_eq!(world.particle_size(), 1);
    assert_eq!(world.width(), 10);

    world.tick();
    world.stamp_brush(0, 0);
}

#[test]
fn resize_and_particle_size_rebuild_the_grid() {
    let mut world = WorldCore::new(400, 400, 4);
    world.stamp(200, 200, &mut || COLOR_A, 5, 1.0);

    world.set_particle_size(8);
    assert_eq!((world.width(), world.height()), (50, 50));
    assert_eq!(world.particle_count(), 0);

    world.stamp(200, 200, &mut || COLOR_A, 5, 1.0);
    world.resize(800, 160);
    assert_eq!((world.width(), world.height(), world.particle_size()), (100, 20, 8));
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn brush_near_edges_writes_only_inside_the_grid() {
    let mut world = WorldCore::new(64, 48, 4);
    world.set_seed(11);
    for (x, y) in [(0, 0), (63, 0), (0, 47), (63, 47), (-20, 24), (90, 24), (32, -15), (32, 70)] {
        world.stamp(x, y, &mut || COLOR_A, 5, 1.0);
    }
    assert_eq!(world.grid.cells().len(), 16 * 12);
    assert!(world.grid.counters_consistent());
    assert!(world.cell_at(0, 0) != Cell::EMPTY);
    assert!(world.cell_at(15, 11) != Cell::EMPTY);
    assert_eq!(world.cell_at(16, 0), Cell::EMPTY);
}

#[test]
fn stamp_brush_uses_jittered_base_color() {
    let mut world = WorldCore::new(100, 100, 1);
    world.set_seed(99);
    world.set_brush(BrushSettings {
        radius: 3,
        probability: 1.0,
        color: Hsl::new(200, 70, 40),
    });

    let n = world.stamp_brush(50, 50);
    assert_eq!(n, 29);
    assert_eq!(world.particle_count(), 29);

    let distinct: std::collections::HashSet<_> = world
        .grid
        .cells()
        .iter()
        .filter_map(|c| c.color())
        .collect();
    assert!(distinct.len() > 1, "jitter should vary colors");
}

#[test]
fn same_seed_gives_same_stamps() {
    let run = |seed: u32| {
        let mut world = WorldCore::new(80, 80, 2);
        world.set_seed(seed);
        world.stamp_brush(40, 40);
        world.stamp_brush(10, 70);
        world.tick();
        world.grid.cells().to_vec()
    };
    assert_eq!(run(1234), run(1234));
    assert_ne!(run(1234), run(4321));
}

#[test]
fn custom_random_source_drives_the_brush() {
    struct AlwaysLow;
    impl RandomSource for AlwaysLow {
        fn next_u32(&mut self) -> u32 {
            0
        }
    }

    let mut world = WorldCore::new(20, 20, 1);
    world.set_random_source(Box::new(AlwaysLow));
    // Every sample is 0.0, so even a tiny probability accepts every cell
    let n = world.stamp(10, 10, &mut || COLOR_B, 1, 0.01);
    assert_eq!(n, 5);
    assert_eq!(world.settings().seed, None);
}

#[test]
fn perf_stats_report_rows_and_moves() {
    let mut world = WorldCore::new(10, 10, 1);
    world.enable_perf_metrics(true);
    put(&mut world, 5, 2, COLOR_A);

    world.tick();
    let stats = world.get_perf_stats();
    assert_eq!(stats.particles_moved(), 1);
    assert_eq!(stats.rows_scanned(), 1);
    assert_eq!(stats.rows_skipped(), 9);
    assert_eq!(stats.particle_count(), 1);
    assert_eq!(stats.grid_size(), 100);
    assert!(stats.step_ms() >= 0.0);

    world.enable_perf_metrics(false);
    assert_eq!(world.get_perf_stats().particles_moved(), 0);
}

#[test]
fn settings_json_round_trips() {
    let mut world = WorldCore::new(300, 200, 5);
    world.set_seed(42);
    world.set_background(Rgb::new(10, 20, 30));

    let json = world.settings_json().expect("settings serialize");
    let parsed = SimulationSettings::from_json(&json).expect("settings parse");
    assert_eq!(parsed, world.settings());
    assert_eq!(parsed.seed, Some(42));
    assert!(json.contains("\"particleSize\":5"));
}

#[test]
fn applying_settings_rebuilds_only_on_geometry_change() {
    let mut world = WorldCore::new(400, 400, 4);
    world.stamp(200, 200, &mut || COLOR_A, 4, 1.0);
    let count = world.particle_count();

    world
        .apply_settings_json(r#"{"pixelWidth":400,"pixelHeight":400,"particleSize":4,"brush":{"radius":9,"probability":0.25}}"#)
        .expect("valid settings");
    assert_eq!(world.particle_count(), count);
    assert_eq!(world.brush().radius, 9);
    assert_eq!(world.brush().probability, 0.25);
    // Brush color was left out and keeps its value
    assert_eq!(world.brush().color, Hsl::new(50, 80, 50));

    world
        .apply_settings_json(r#"{"particleSize":2,"brush":{"probability":7.5}}"#)
        .expect("valid settings");
    assert_eq!((world.width(), world.height()), (200, 200));
    assert_eq!(world.particle_count(), 0);
    assert_eq!(world.brush().probability, 1.0);
    assert_eq!(world.brush().radius, 9);
}

#[test]
fn partial_settings_keep_everything_they_leave_out() {
    let mut world = WorldCore::new(800, 600, 4);
    world.set_brush(BrushSettings {
        radius: 3,
        probability: 0.8,
        color: Hsl::new(200, 60, 40),
    });
    world.set_background(Rgb::new(1, 2, 3));
    world.stamp(400, 300, &mut || COLOR_A, 4, 1.0);
    let count = world.particle_count();
    let generation = world.generation();

    world
        .apply_settings_json(r#"{"brush":{"radius":9}}"#)
        .expect("brush-only settings");

    assert_eq!(world.particle_count(), count);
    assert_eq!((world.width(), world.height()), (200, 150));
    assert_eq!((world.pixel_width(), world.pixel_height()), (800, 600));
    assert_eq!(world.generation(), generation);
    assert_eq!(world.brush().radius, 9);
    assert_eq!(world.brush().probability, 0.8);
    assert_eq!(world.brush().color, Hsl::new(200, 60, 40));
    assert_eq!(world.background(), Rgb::new(1, 2, 3));

    world
        .apply_settings_json(r#"{"background":{"r":9,"g":9,"b":9}}"#)
        .expect("background-only settings");
    assert_eq!(world.particle_count(), count);
    assert_eq!(world.brush().radius, 9);
    assert_eq!(world.background(), Rgb::new(9, 9, 9));
}

#[test]
fn reapplying_the_same_settings_keeps_the_grid() {
    let doc = r#"{"pixelWidth":100,"pixelHeight":100,"particleSize":0}"#;
    let mut world = WorldCore::new(400, 400, 4);

    world.apply_settings_json(doc).expect("zero particle size is clamped");
    assert_eq!((world.width(), world.height(), world.particle_size()), (100, 100, 1));
    let generation = world.generation();

    world.stamp(50, 50, &mut || COLOR_A, 2, 1.0);
    let count = world.particle_count();
    assert_eq!(count, 13);

    world.apply_settings_json(doc).expect("same settings again");
    assert_eq!(world.particle_count(), count);
    assert_eq!(world.generation(), generation);

    // Zero canvas extents clamp to 1 and compare equal on the second pass too
    let tiny = r#"{"pixelWidth":0,"pixelHeight":0,"particleSize":1}"#;
    world.apply_settings_json(tiny).expect("zero canvas is clamped");
    let generation = world.generation();
    world.apply_settings_json(tiny).expect("same settings again");
    assert_eq!(world.generation(), generation);
}

#[test]
fn seed_in_settings_is_not_reapplied_on_partial_updates() {
    let mut world = WorldCore::new(100, 100, 1);
    world.apply_settings_json(r#"{"seed":77}"#).expect("seed");
    world.stamp_brush(50, 50);
    let after_first = world.grid.cells().to_vec();

    // A brush-only update must not rewind the random source
    world.apply_settings_json(r#"{"brush":{"radius":5}}"#).expect("brush");
    world.clear();
    world.stamp_brush(50, 50);

    let mut fresh = WorldCore::new(100, 100, 1);
    fresh.set_seed(77);
    fresh.stamp_brush(50, 50);
    assert_eq!(fresh.grid.cells(), after_first.as_slice());
    assert_ne!(world.grid.cells(), after_first.as_slice());
}

#[test]
fn row_counters_survive_stamps_ticks_and_clears() {
    let mut world = WorldCore::new(60, 40, 2);
    world.set_seed(19);

    for round in 0..6 {
        world.stamp_brush(10 + round * 8, 5);
        assert!(world.grid.counters_consistent());
        world.tick();
        assert!(world.grid.counters_consistent());
        world.stamp(59, 39, &mut || COLOR_B, 3, 0.7);
        assert!(world.grid.counters_consistent());
        for _ in 0..3 {
            world.tick();
            assert!(world.grid.counters_consistent());
        }
        if round % 2 == 1 {
            world.clear();
            assert!(world.grid.counters_consistent());
            assert_eq!(world.particle_count(), 0);
            world.tick();
            assert!(world.grid.counters_consistent());
        }
        assert_eq!(world.particle_count() as usize, count_occupied(&world));
    }
}

#[test]
fn bad_settings_leave_the_world_untouched() {
    let mut world = WorldCore::new(100, 100, 2);
    world.stamp(50, 50, &mut || COLOR_A, 3, 1.0);
    let before = world.settings();
    let count = world.particle_count();

    assert!(world.apply_settings_json("{ not json").is_err());
    assert!(world.apply_settings_json(r#"{"particleSize":"big"}"#).is_err());
    let err = world
        .apply_settings_json(r#"{"pixelWidth":100000}"#)
        .expect_err("oversized canvas");
    assert!(err.contains("100000"));

    assert_eq!(world.settings(), before);
    assert_eq!(world.particle_count(), count);
}

#[test]
fn from_settings_applies_everything() {
    let settings = SimulationSettings {
        pixel_width: 90,
        pixel_height: 30,
        particle_size: 3,
        seed: Some(8),
        ..SimulationSettings::default()
    };
    let world = WorldCore::from_settings(&settings).expect("valid settings");
    assert_eq!((world.width(), world.height()), (30, 10));
    assert_eq!(world.settings(), settings);
}

#[test]
fn render_paints_scaled_blocks_over_background() {
    // 6x4 canvas with 2px cells -> 3x2 grid; one cell covers a 2x2 block
    let mut world = WorldCore::new(6, 4, 2);
    assert_eq!((world.width(), world.height()), (3, 2));
    world.set_background(Rgb::new(240, 240, 240));
    put(&mut world, 0, 0, COLOR_A);

    world.render_pixels();
    assert_eq!((world.render_width(), world.render_height()), (6, 4));
    assert_eq!(world.pixels_len(), 6 * 4 * 4);

    let px = |x: usize, y: usize| {
        let i = (y * 6 + x) * 4;
        world.pixels()[i..i + 4].to_vec()
    };
    let sand = vec![230, 196, 25, 255];
    let bg = vec![240, 240, 240, 255];
    assert_eq!(px(0, 0), sand);
    assert_eq!(px(1, 0), sand);
    assert_eq!(px(0, 1), sand);
    assert_eq!(px(1, 1), sand);
    assert_eq!(px(2, 0), bg);
    assert_eq!(px(0, 2), bg);
    assert_eq!(px(5, 3), bg);
}

#[test]
fn render_tracks_grid_changes() {
    let mut world = WorldCore::new(4, 4, 1);
    world.render_pixels();
    assert_eq!(world.pixels_len(), 64);

    world.configure(8, 2, 2);
    world.render_pixels();
    assert_eq!(world.pixels_len(), 8 * 2 * 4);
}
