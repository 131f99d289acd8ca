use tellus::config::WorldConfig;
use tellus::grid::{Chunk, ChunkStore};
use tellus::rng;
use tellus::terrain::{GenParams, TerrainField};

fn landy_store() -> ChunkStore {
    let config = WorldConfig {
        width: 63,
        height: 63,
        chunk_size: 21,
        land_ratio: 0.4,
    };
    let params = GenParams::from_config(&config).unwrap();
    let mut rng = rng::seeded(17);
    let (field, _) = TerrainField::generate(&params, &mut rng);
    ChunkStore::new(field, config.chunk_size)
}

#[test]
fn chunk_lookup_is_idempotent_and_cached() {
    let mut store = landy_store();
    assert_eq!(store.cached_chunk_count(), 0);

    let first = store.get_or_create_chunk(1, 1).unwrap() as *const Chunk;
    assert_eq!(store.cached_chunk_count(), 1);
    let second = store.get_or_create_chunk(1, 1).unwrap() as *const Chunk;
    assert_eq!(first, second, "repeated lookups must serve the cached chunk");
    assert_eq!(store.cached_chunk_count(), 1);
}

#[test]
fn local_coordinates_map_uniquely_to_global() {
    let mut store = landy_store();
    let size = store.chunk_size();
    let chunk = store.get_or_create_chunk(2, 1).unwrap();
    for ly in 0..size {
        for lx in 0..size {
            let cell = chunk.get(lx, ly).unwrap();
            assert_eq!(cell.x, 2 * size + lx);
            assert_eq!(cell.y, size + ly);
        }
    }
}

#[test]
fn cells_mirror_the_backing_terrain() {
    let mut store = landy_store();
    for y in 0..63 {
        for x in 0..63 {
            let expected = *store.terrain().get(x, y).unwrap();
            let cell = store.get_cell(x, y).unwrap();
            assert_eq!(cell.terrain, expected);
            // Fresh cells start with empty vegetation and mineral slots.
            assert!(cell.vegetation.current.is_none());
            assert!(cell.mineral.current.is_none());
        }
    }
}

#[test]
fn out_of_bounds_chunks_and_cells_are_absent() {
    let mut store = landy_store();
    assert!(store.get_or_create_chunk(3, 0).is_none());
    assert!(store.get_or_create_chunk(0, 3).is_none());
    assert!(store.get_cell(63, 0).is_none());
    assert!(store.get_cell(0, 100).is_none());
}

#[test]
fn non_divisible_dimensions_still_address_correctly() {
    let field = TerrainField::water(50, 30);
    let mut store = ChunkStore::new(field, 21);
    assert_eq!(store.chunks_wide(), 3);
    assert_eq!(store.chunks_high(), 2);

    // The far corner lives in a partial chunk but still resolves.
    let corner = store.get_cell(49, 29).unwrap();
    assert_eq!((corner.x, corner.y), (49, 29));

    // Slots past the field edge inside that chunk stay empty.
    let edge_chunk = store.get_or_create_chunk(2, 1).unwrap();
    assert!(edge_chunk.get(7, 8).is_some()); // global (49, 29)
    assert!(edge_chunk.get(8, 8).is_none()); // global (50, 29)
    assert!(edge_chunk.get(7, 9).is_none()); // global (49, 30)
}

#[test]
fn snapshot_round_trip_preserves_every_tile() {
    let mut original = landy_store();
    let snapshot = original.snapshot();

    let mut restored = ChunkStore::new(snapshot, original.chunk_size());
    for y in 0..63 {
        for x in 0..63 {
            let before = original.get_cell(x, y).unwrap().terrain;
            let after = restored.get_cell(x, y).unwrap().terrain;
            assert_eq!(before, after, "terrain mismatch at ({x}, {y})");
        }
    }
}

#[test]
fn loading_a_new_field_invalidates_the_cache() {
    let mut store = landy_store();
    store.get_or_create_chunk(0, 0);
    store.get_or_create_chunk(1, 0);
    assert_eq!(store.cached_chunk_count(), 2);

    let land_before = store.terrain().land_count();
    assert!(land_before > 0);

    store.load(TerrainField::water(63, 63));
    assert_eq!(store.cached_chunk_count(), 0);

    // Rebuilt chunks must reflect the new field, not the old land.
    let chunk = store.get_or_create_chunk(0, 0).unwrap();
    assert!(chunk.cells().all(|c| c.terrain.is_water()));
}
