#![allow(missing_docs)]

use kiln_core::TEXTURE_SIZE;
use kiln_core::color::Rgb;
use kiln_core::material::{Catalog, MaterialDescriptor, Pattern};
use kiln_core::pattern::compose;
use kiln_core::texture_batch::{MemoryTextureStore, TextureBatch, TextureStore};
use kiln_utils::random::PositionalRandom;
use kiln_utils::random::xoroshiro::XoroshiroSplitter;

fn descriptor(name: &str, base: Rgb, variation: f64, pattern: Pattern) -> MaterialDescriptor {
    MaterialDescriptor {
        name: name.to_owned(),
        base_color: base,
        variation,
        noise_scale: 0.2,
        pattern,
        recipe: String::new(),
    }
}

#[test]
fn builtin_catalog_batch_is_idempotent() {
    let catalog = Catalog::builtin().expect("builtin catalog loads");
    let batch = TextureBatch::new(2024);
    let mut store = MemoryTextureStore::new();

    let first = batch.run(&catalog, &mut store);
    assert_eq!(first.generated, catalog.len());
    assert!(first.is_success());
    for material in &catalog {
        let texture = store.get(&material.name).expect("texture was saved");
        assert_eq!(texture.width(), TEXTURE_SIZE);
        assert_eq!(texture.height(), TEXTURE_SIZE);
    }

    let writes = store.writes();
    let second = batch.run(&catalog, &mut store);
    assert_eq!(second.generated, 0);
    assert_eq!(second.skipped, catalog.len());
    assert_eq!(store.writes(), writes);
}

#[test]
fn partial_store_only_fills_gaps() {
    let catalog = Catalog::builtin().expect("builtin catalog loads");
    let batch = TextureBatch::new(7);
    let mut store = MemoryTextureStore::new();

    let grass = catalog.get("grass").expect("grass is stock");
    store.save("grass", &batch.render(grass)).expect("memory store never fails");

    let report = batch.run(&catalog, &mut store);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.generated, catalog.len() - 1);
    assert!(store.exists("water"));
}

#[test]
fn coal_stays_near_its_ore_color() {
    let coal = descriptor(
        "coal",
        Rgb::new(30, 30, 30),
        15.0,
        Pattern::Ore {
            ore_color: Rgb::new(10, 10, 10),
        },
    );

    for seed in 0..8 {
        let mut random = XoroshiroSplitter::from_seed(seed).with_hash_of("coal");
        let texture = compose(&coal, TEXTURE_SIZE, TEXTURE_SIZE, &mut random);
        for pixel in texture.pixels() {
            assert!(pixel.0.iter().all(|&c| c <= 25), "{pixel:?} strays from the ore color");
        }
    }
}

#[test]
fn crystal_without_sparkle_uses_three_tiers() {
    let base = Rgb::new(180, 220, 255);
    let ice = descriptor("ice", base, 10.0, Pattern::Crystalline { sparkle: false });
    let tiers = [0.8, 1.0, 1.3].map(|b| base.map_channels(|c| c * b));
    let sparkle = base.map_channels(|c| c * 1.8);

    let mut random = XoroshiroSplitter::from_seed(3).with_hash_of("ice");
    let texture = compose(&ice, TEXTURE_SIZE, TEXTURE_SIZE, &mut random);
    for pixel in texture.pixels() {
        assert!(tiers.contains(pixel), "{pixel:?} is not a facet tier");
        assert_ne!(*pixel, sparkle);
    }
}
