//! Binary codec for a 2D sandbox game's world-save format: the section
//! table, the version-gated properties header, the run-length-encoded tile
//! matrix, and every auxiliary section (chests, signs, NPCs, pets, tile
//! entities, pressure plates, town elements, the bestiary, creative
//! powers), plus the deterministic PRNG the reference generator relies on.

pub mod cursor;
pub mod error;
pub mod header;
pub mod info_header;
pub mod logging;
pub mod rng;
pub mod sections;
pub mod tile;
pub mod world;
pub mod worldgen;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use header::{Header, Rect};
pub use info_header::InfoHeader;
pub use rng::Rng;
pub use sections::{
    Bestiary, Chest, Item, Kill, Npc, Pet, PressurePlate, Sign, TileEntity, Tracker, TownElement,
};
pub use tile::{Tile, TileMatrix};
pub use world::{LoadState, World};
pub use worldgen::{detect_seed_modes, generate, SeedModes};
