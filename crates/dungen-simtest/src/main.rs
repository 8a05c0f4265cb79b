//! Dungen Headless Validation Harness
//!
//! Exercises grid generation, carving, linking, sessions, and persistence
//! end to end. Runs entirely in-process — no rendering, no assets.
//!
//! Usage:
//!   cargo run -p dungen-simtest
//!   cargo run -p dungen-simtest -- --verbose

use dungen_core::engine::{MapConfig, MapEngine};
use dungen_core::persistence::{load_map, save_map};
use dungen_logic::adjacency::build_links;
use dungen_logic::carve::connect;
use dungen_logic::direction::Direction;
use dungen_logic::generate::{create_grid, Seed};
use dungen_logic::grid::{Grid, GridPos};
use dungen_logic::region::RegionSpec;
use serde::Deserialize;

// ── Region fixture (same JSON a level designer would author) ────────────
const REGIONS_JSON: &str = include_str!("../../../data/regions.json");

#[derive(Debug, Deserialize)]
struct MapFixture {
    width: i32,
    height: i32,
    regions: Vec<RegionSpec>,
    corridors: Vec<(usize, usize)>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Dungen Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Region fixture validation
    let fixture = load_fixture(&mut results);

    // 2. Anchor placement sweep
    if let Some(fixture) = &fixture {
        results.extend(validate_placement(fixture));
    }

    // 3. Corridor carving properties
    results.extend(validate_carving());

    // 4. Adjacency linking
    if let Some(fixture) = &fixture {
        results.extend(validate_adjacency(fixture));
    }

    // 5. Engine, session walk, persistence
    if let Some(fixture) = &fixture {
        results.extend(validate_engine(fixture));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Region fixture ───────────────────────────────────────────────────

fn load_fixture(results: &mut Vec<TestResult>) -> Option<MapFixture> {
    println!("--- Region Fixture ---");

    let fixture: MapFixture = match serde_json::from_str(REGIONS_JSON) {
        Ok(f) => f,
        Err(e) => {
            results.push(check(
                "fixture_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return None;
        }
    };

    results.push(check(
        "fixture_dimensions",
        fixture.width > 0 && fixture.height > 0,
        format!("{}x{} grid", fixture.width, fixture.height),
    ));

    let mut names: Vec<&str> = fixture.regions.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    let unique = names.windows(2).all(|w| w[0] != w[1]);
    results.push(check(
        "fixture_unique_names",
        unique,
        format!("{} regions", fixture.regions.len()),
    ));

    let corridor_ok = fixture
        .corridors
        .iter()
        .all(|&(a, b)| a < fixture.regions.len() && b < fixture.regions.len());
    results.push(check(
        "fixture_corridor_indices",
        corridor_ok,
        format!("{} corridors", fixture.corridors.len()),
    ));

    let placeable = create_grid(
        fixture.width,
        fixture.height,
        &fixture.regions,
        Seed::Fixed(1),
    );
    results.push(check(
        "fixture_placeable",
        placeable.is_ok(),
        match &placeable {
            Ok(_) => "all regions placeable".into(),
            Err(e) => format!("{}", e),
        },
    ));

    Some(fixture)
}

// ── 2. Anchor placement ─────────────────────────────────────────────────

fn in_region(pos: GridPos, spec: &RegionSpec) -> bool {
    let x_ok = if spec.max.x > spec.min.x {
        pos.x >= spec.min.x && pos.x < spec.max.x
    } else {
        pos.x == spec.min.x
    };
    let y_ok = if spec.max.y > spec.min.y {
        pos.y >= spec.min.y && pos.y < spec.max.y
    } else {
        pos.y == spec.min.y
    };
    x_ok && y_ok
}

fn validate_placement(fixture: &MapFixture) -> Vec<TestResult> {
    println!("--- Anchor Placement ---");
    let mut results = Vec::new();

    let mut all_counted = true;
    let mut all_distinct = true;
    let mut all_in_region = true;
    for seed in 0..200 {
        let (_, anchors) = match create_grid(
            fixture.width,
            fixture.height,
            &fixture.regions,
            Seed::Fixed(seed),
        ) {
            Ok(r) => r,
            Err(_) => {
                all_counted = false;
                break;
            }
        };
        all_counted &= anchors.len() == fixture.regions.len();
        for i in 0..anchors.len() {
            all_in_region &= in_region(anchors[i], &fixture.regions[i]);
            for j in 0..i {
                all_distinct &= anchors[i] != anchors[j];
            }
        }
    }
    results.push(check(
        "placement_one_anchor_per_region",
        all_counted,
        "200 seeds".into(),
    ));
    results.push(check(
        "placement_anchors_distinct",
        all_distinct,
        "no shared positions".into(),
    ));
    results.push(check(
        "placement_anchors_in_region",
        all_in_region,
        "all anchors inside their rectangles".into(),
    ));

    let (_, a) = create_grid(
        fixture.width,
        fixture.height,
        &fixture.regions,
        Seed::Fixed(77),
    )
    .unwrap();
    let (_, b) = create_grid(
        fixture.width,
        fixture.height,
        &fixture.regions,
        Seed::Fixed(77),
    )
    .unwrap();
    results.push(check(
        "placement_deterministic",
        a == b,
        "same seed, same anchors".into(),
    ));

    let exhausted = create_grid(
        fixture.width,
        fixture.height,
        &[RegionSpec::at("x", 0, 0), RegionSpec::at("y", 0, 0)],
        Seed::Fixed(1),
    );
    results.push(check(
        "placement_exhaustion_detected",
        exhausted.is_err(),
        "duplicate pinned region fails instead of looping".into(),
    ));

    results
}

// ── 3. Corridor carving ─────────────────────────────────────────────────

fn validate_carving() -> Vec<TestResult> {
    println!("--- Corridor Carving ---");
    let mut results = Vec::new();

    let mut grid = Grid::new(4, 4).unwrap();
    connect(&mut grid, GridPos::new(0, 0), GridPos::new(3, 0)).unwrap();
    let horizontal = grid.cells().all(|c| {
        if c.position().y == 0 {
            c.mask() & 0b0101 == 0
        } else {
            c.mask() == 0
        }
    });
    results.push(check(
        "carve_horizontal_only",
        horizontal,
        "no vertical bits on a straight east corridor".into(),
    ));

    let mut grid = Grid::new(4, 4).unwrap();
    connect(&mut grid, GridPos::new(0, 0), GridPos::new(2, 3)).unwrap();
    let corner = grid.get_xy(2, 0).unwrap().mask();
    results.push(check(
        "carve_l_shape_corner",
        corner == 0b1001,
        format!("corner mask {:04b}", corner),
    ));

    let before: Vec<u8> = grid.cells().map(|c| c.mask()).collect();
    connect(&mut grid, GridPos::new(0, 0), GridPos::new(2, 3)).unwrap();
    let after: Vec<u8> = grid.cells().map(|c| c.mask()).collect();
    results.push(check(
        "carve_idempotent",
        before == after,
        "second identical connect changes nothing".into(),
    ));

    // Chain through a non-anchor junction cell.
    let mut grid = Grid::new(5, 5).unwrap();
    connect(&mut grid, GridPos::new(0, 2), GridPos::new(4, 2)).unwrap();
    connect(&mut grid, GridPos::new(2, 2), GridPos::new(2, 0)).unwrap();
    let junction = grid.get_xy(2, 2).unwrap().mask();
    results.push(check(
        "carve_branching_junction",
        junction == 0b1110,
        format!("junction mask {:04b}", junction),
    ));

    let mut grid = Grid::new(3, 3).unwrap();
    let oob = connect(&mut grid, GridPos::new(0, 0), GridPos::new(9, 9));
    let untouched = grid.cells().all(|c| c.mask() == 0);
    results.push(check(
        "carve_validates_before_mutating",
        oob.is_err() && untouched,
        "out-of-bounds endpoint leaves the grid untouched".into(),
    ));

    results
}

// ── 4. Adjacency linking ────────────────────────────────────────────────

fn validate_adjacency(fixture: &MapFixture) -> Vec<TestResult> {
    println!("--- Adjacency Linking ---");
    let mut results = Vec::new();

    let empty = build_links(&Grid::new(3, 3).unwrap());
    results.push(check(
        "links_exclude_empty_cells",
        empty.is_empty(),
        format!("{} cells linked on an untouched grid", empty.len()),
    ));

    let (mut grid, anchors) = create_grid(
        fixture.width,
        fixture.height,
        &fixture.regions,
        Seed::Fixed(5),
    )
    .unwrap();
    for &(a, b) in &fixture.corridors {
        connect(&mut grid, anchors[a], anchors[b]).unwrap();
    }

    let linked = build_links(&grid);
    let stable = linked == build_links(&grid);
    results.push(check(
        "links_stable_order",
        stable,
        format!("{} rooms, two identical passes", linked.len()),
    ));

    let row_major = linked
        .windows(2)
        .all(|w| (w[0].position.y, w[0].position.x) < (w[1].position.y, w[1].position.x));
    results.push(check(
        "links_row_major",
        row_major,
        "y-outer x-inner traversal".into(),
    ));

    let mut reciprocal = true;
    for (i, cell) in linked.iter().enumerate() {
        for direction in Direction::ALL {
            if let Some(j) = cell.neighbor_at(direction) {
                reciprocal &= linked[j].neighbor_at(direction.opposite()) == Some(i);
            }
        }
    }
    results.push(check(
        "links_reciprocal",
        reciprocal,
        "every link points back".into(),
    ));

    results
}

// ── 5. Engine, session, persistence ─────────────────────────────────────

fn validate_engine(fixture: &MapFixture) -> Vec<TestResult> {
    println!("--- Engine & Session ---");
    let mut results = Vec::new();

    let mut engine = MapEngine::new(MapConfig {
        width: fixture.width,
        height: fixture.height,
        regions: fixture.regions.clone(),
        corridors: fixture.corridors.clone(),
        seed: Seed::Fixed(13),
    });
    if let Err(e) = engine.generate() {
        results.push(check("engine_generate", false, format!("{}", e)));
        return results;
    }
    results.push(check(
        "engine_generate",
        true,
        format!("{} rooms instantiated", engine.session.as_ref().unwrap().rooms().len()),
    ));

    let session = engine.session.as_mut().unwrap();
    let start = session.rooms()[0];
    let activated = session.activate(start).is_ok();
    let ring = session.active_set();
    results.push(check(
        "session_activation_ring",
        activated && ring.contains(&start),
        format!("{} rooms active", ring.len()),
    ));

    // Walk one link out and back; activation must follow.
    let mut walked = true;
    let mut round_trip = true;
    'outer: for direction in Direction::ALL {
        if let Some(next) = session.activate_neighbor(direction) {
            walked = session.active() == Some(next);
            round_trip = session.activate_neighbor(direction.opposite()) == Some(start);
            break 'outer;
        }
    }
    results.push(check(
        "session_neighbor_walk",
        walked && round_trip,
        "neighbor activation is symmetric".into(),
    ));

    let grid = engine.grid.as_ref().unwrap();
    let mut buffer = Vec::new();
    let saved = save_map(grid, &mut buffer).is_ok();
    let reloaded = load_map(&mut buffer.as_slice());
    let matches = match &reloaded {
        Ok(loaded) => loaded.cells().zip(grid.cells()).all(|(a, b)| a == b),
        Err(_) => false,
    };
    results.push(check(
        "persistence_round_trip",
        saved && matches,
        format!("{} bytes", buffer.len()),
    ));

    results
}
