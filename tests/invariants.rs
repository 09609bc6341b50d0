//! Addressing and state-transition invariants.
//!
//! Each check is repeated over a handful of seeds and sizes so the
//! properties hold for more than one hand-picked world.

use std::cell::RefCell;
use std::collections::HashSet;

use tileview::rng::create_rng;
use tileview::view::View;
use tileview::world::World;

const SIZES: [(usize, usize); 5] = [(1, 1), (3, 7), (16, 16), (31, 2), (100, 100)];
const SEEDS: [u64; 4] = [0, 1, 42, 0xDEAD_BEEF];

#[test]
fn index_is_a_bijection_onto_storage() {
    for (w, h) in SIZES {
        let world = World::init(w, h, &mut create_rng(0)).expect("alloc");
        let mut seen = HashSet::new();
        for y in 0..h {
            for x in 0..w {
                let i = world.index(x, y).expect("in bounds");
                assert_eq!(i, y * w + x);
                assert!(i < w * h);
                assert!(seen.insert(i), "index {i} produced twice");
            }
        }
        assert_eq!(seen.len(), w * h);
        assert_eq!(world.len(), w * h);
    }
}

#[test]
fn iteration_visits_every_index_in_order() {
    for (w, h) in SIZES {
        let world = World::init(w, h, &mut create_rng(0)).expect("alloc");
        for (i, (tile, x, y)) in world.iter().enumerate() {
            assert_eq!(world.index(x, y), Some(i));
            assert_eq!(&world.tiles()[i], tile);
        }
    }
}

#[test]
fn recolor_changes_every_tile_and_keeps_size() {
    for seed in SEEDS {
        let mut rng = create_rng(seed);
        let mut world = World::init(32, 24, &mut rng).expect("alloc");
        let before = world.clone();
        world.recolor_all(&mut rng);

        assert_eq!((world.width(), world.height()), (32, 24));
        for (tile, x, y) in world.iter() {
            let old = before.tile(x, y).expect("in bounds");
            assert_ne!(tile.color, old.color, "seed {seed}: ({x}, {y}) unchanged");
        }
    }
}

#[test]
fn init_is_reproducible_per_seed() {
    for seed in SEEDS {
        let a = World::init(20, 20, &mut create_rng(seed)).expect("alloc");
        let b = World::init(20, 20, &mut create_rng(seed)).expect("alloc");
        assert_eq!(a, b);
    }
}

#[test]
fn init_colors_keep_coordinate_bits() {
    for seed in SEEDS {
        let world = World::init(40, 30, &mut create_rng(seed)).expect("alloc");
        for (tile, x, y) in world.iter() {
            assert_eq!(tile.color >> 18, y as u32);
            assert_eq!((tile.color >> 2) & 0xFFFF, x as u32);
        }
    }
}

#[test]
fn zoom_in_then_out_restores_edge() {
    let world = RefCell::new(World::init(4, 4, &mut create_rng(0)).expect("alloc"));
    for edge in [1, 2, 3, 25, 100, 639] {
        let mut view = View::attach(&world, 840, 640, edge, 0, 0);
        assert!(view.zoom_in(), "edge {edge} should be a valid zoom-in target");
        assert!(view.zoom_out());
        assert_eq!(view.edge(), edge);
    }
}

#[test]
fn repeated_zoom_is_geometric() {
    let world = RefCell::new(World::init(4, 4, &mut create_rng(0)).expect("alloc"));
    let mut view = View::attach(&world, 840, 640, 1, 0, 0);
    let mut edges = vec![view.edge()];
    while view.zoom_in() {
        edges.push(view.edge());
    }
    assert_eq!(edges, vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024]);

    while view.zoom_out() {}
    assert_eq!(view.edge(), 1);
}

#[test]
fn pan_round_trip_is_exact() {
    let world = RefCell::new(World::init(4, 4, &mut create_rng(0)).expect("alloc"));
    let mut view = View::attach(&world, 840, 640, 25, 0, 0);
    view.pan(13, -7);
    let start = view.offset();
    for (dx, dy) in [(1, 1), (-250, 375), (i32::MAX as i64, i32::MIN as i64), (0, 0)] {
        view.pan(dx, dy);
        view.pan(-dx, -dy);
        assert_eq!(view.offset(), start);
    }
}

#[test]
fn origin_is_always_contained() {
    for (w, h) in SIZES {
        let world = World::init(w, h, &mut create_rng(0)).expect("alloc");
        assert!(world.contains(0, 0), "{w}x{h}");
    }
}

#[test]
fn contains_covers_exactly_w_by_h_cells() {
    for (w, h) in SIZES {
        let world = World::init(w, h, &mut create_rng(0)).expect("alloc");
        let (wi, hi) = (w as i64, h as i64);
        let mut count = 0;
        for y in -hi - 2..hi + 2 {
            for x in -wi - 2..wi + 2 {
                if world.contains(x, y) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, w * h, "{w}x{h}");
    }
}
