//! Orchestrates a whole world file: the fixed info header, the version-gated
//! properties block, the tile matrix, and every auxiliary section, plus the
//! offset bookkeeping that ties them together.

use std::path::Path;

use crate::cursor::{self, Cursor};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::info_header::{InfoHeader, SIGNATURE};
use crate::sections::{
    self, Bestiary, Chest, Npc, Pet, PressurePlate, Sign, TileEntity, TownElement,
};
use crate::tile::TileMatrix;
use crate::worldgen;

/// How many entries the section-offset table carries: one end-offset per
/// section from the properties header through the creative-powers blob.
const SECTION_COUNT: usize = 11;

/// World versions this codec has fixtures or a known-correct field script
/// for. Anything else is rejected rather than silently misparsed.
const SUPPORTED_VERSIONS: &[i32] = &[244, 245, 246, 279];

/// Coarse load/save bookkeeping, mirroring the orchestrator's own
/// understanding of where a world currently stands; not required for
/// correctness, but cheap insurance against writing a world that was never
/// actually finished loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loaded,
    New,
}

pub struct World {
    pub state: LoadState,
    pub info: InfoHeader,
    pub header: Header,
    pub tiles: TileMatrix,
    pub chests: Vec<Chest>,
    pub signs: Vec<Sign>,
    pub npcs: Vec<Npc>,
    pub pets: Vec<Pet>,
    pub tile_entities: Vec<TileEntity>,
    pub pressure_plates: Vec<PressurePlate>,
    pub town_elements: Vec<TownElement>,
    pub bestiary: Bestiary,
    pub creative_powers: Vec<u8>,
    pub footer_name: Option<String>,
}

impl World {
    /// Parses a whole file already slurped into a [`Cursor`], accepting any
    /// version in the built-in allow-list.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_versions(path, SUPPORTED_VERSIONS)
    }

    /// Like [`World::open`], but checks `info.version` against a
    /// caller-supplied allow-list instead of the built-in one — how the
    /// example driver honors a config-file override of which versions to
    /// accept.
    pub fn open_with_versions<P: AsRef<Path>>(path: P, allowed_versions: &[i32]) -> Result<Self> {
        let mut cursor = Cursor::open(path)?;
        let info = InfoHeader::read(&mut cursor)?;
        if info.signature != SIGNATURE {
            return Err(Error::InvariantViolation(format!(
                "bad signature: {:?}",
                info.signature
            )));
        }

        let ver = info.version;
        if !allowed_versions.contains(&ver) {
            return Err(Error::UnsupportedVersion(ver));
        }
        let section_end = |i: usize| -> usize { *info.sections.get(i).unwrap_or(&0) as usize };

        let header = Header::read(&mut cursor, ver)?;
        let tiles = TileMatrix::read(
            &mut cursor,
            &info,
            ver,
            header.width.max(0) as usize,
            header.height.max(0) as usize,
        )?;
        let chests = sections::read_chests(&mut cursor, section_end(3))?;
        let signs = sections::read_signs(&mut cursor, section_end(4))?;
        let (npcs, pets) = sections::read_npcs_and_pets(&mut cursor, ver, section_end(5))?;
        let tile_entities = sections::read_tile_entities(&mut cursor, ver, section_end(6))?;
        let pressure_plates = sections::read_pressure_plates(&mut cursor, ver, section_end(7))?;
        let town_elements = sections::read_town_elements(&mut cursor, ver, section_end(8))?;
        let bestiary = sections::read_bestiary(&mut cursor, ver, section_end(9))?;
        let creative_powers = sections::read_creative_powers(&mut cursor, section_end(10))?;
        let footer_name = read_footer(&mut cursor)?;

        Ok(World {
            state: LoadState::Loaded,
            info,
            header,
            tiles,
            chests,
            signs,
            npcs,
            pets,
            tile_entities,
            pressure_plates,
            town_elements,
            bestiary,
            creative_powers,
            footer_name,
        })
    }

    /// Builds a brand-new world of the given size, deriving the handful of
    /// header fields the seed determines (special mode flags, reseed, spawn
    /// position); everything else is left at its zeroed default, matching a
    /// freshly allocated tile plane (`tile = -1, wall = -1`).
    pub fn new(width: i32, height: i32, name: &str, seed_text: &str) -> Self {
        let generated = worldgen::generate(seed_text, width, height);
        let modes = generated.modes;

        let mut header = Header::default();
        header.name = Some(name.to_string());
        header.seed = Some(generated.seed.to_string());
        header.width = width;
        header.height = height;
        header.spawn_x = generated.spawn_x;
        header.spawn_y = generated.spawn_y;
        header.drunk = modes.drunk as u8;
        header.bees = modes.bees as u8;
        header.no_traps = modes.no_traps as u8;
        header.ftw = modes.ftw as u8;
        header.tenth = modes.tenth as u8;
        header.dont_starve = modes.dont_starve as u8;
        header.remix = modes.remix as u8;
        header.zenith = modes.zenith as u8;

        let info = InfoHeader {
            version: 279,
            signature: SIGNATURE,
            world_type: 0,
            revisions: 0,
            favorite: 0,
            sections: vec![0; SECTION_COUNT],
            tile_mask: 0,
            uvs: Vec::new(),
        };

        World {
            state: LoadState::New,
            info,
            header,
            tiles: TileMatrix::new(width.max(0) as usize, height.max(0) as usize),
            chests: Vec::new(),
            signs: Vec::new(),
            npcs: Vec::new(),
            pets: Vec::new(),
            tile_entities: Vec::new(),
            pressure_plates: Vec::new(),
            town_elements: Vec::new(),
            bestiary: Bestiary::default(),
            creative_powers: sections::DEFAULT_CREATIVE_POWERS.to_vec(),
            footer_name: Some(name.to_string()),
        }
    }

    /// Serializes the whole world and writes it to `path`.
    ///
    /// Every section is built into its own buffer first so its length is
    /// known before the offset table is finalized, then the info header is
    /// re-serialized with those offsets and everything is concatenated in
    /// order, matching the reference writer's two-pass shape.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let ver = self.info.version;

        let mut header_buf = Cursor::empty();
        self.header.write(&mut header_buf, ver);

        let mut tiles_buf = Cursor::empty();
        self.tiles.write(&mut tiles_buf, &self.info, ver);

        let mut chests_buf = Cursor::empty();
        sections::write_chests(&mut chests_buf, &self.chests);

        let mut signs_buf = Cursor::empty();
        sections::write_signs(&mut signs_buf, &self.signs);

        let mut npcs_buf = Cursor::empty();
        sections::write_npcs_and_pets(&mut npcs_buf, ver, &self.npcs, &self.pets);

        let mut te_buf = Cursor::empty();
        sections::write_tile_entities(&mut te_buf, ver, &self.tile_entities);

        let mut pp_buf = Cursor::empty();
        sections::write_pressure_plates(&mut pp_buf, ver, &self.pressure_plates);

        let mut town_buf = Cursor::empty();
        sections::write_town_elements(&mut town_buf, ver, &self.town_elements);

        let mut best_buf = Cursor::empty();
        sections::write_bestiary(&mut best_buf, ver, &self.bestiary);

        let mut cp_buf = Cursor::empty();
        sections::write_creative_powers(&mut cp_buf, &self.creative_powers);

        let mut footer_buf = Cursor::empty();
        write_footer(&mut footer_buf, self.footer_name.as_deref(), self.header.id);

        let mut info = self.info.clone();
        info.sections = vec![0; SECTION_COUNT];

        let info_header_size = info_header_encoded_len(&info);
        info.sections[0] = info_header_size as i32;
        let mut cumulative = info_header_size;
        let sizes = [
            header_buf.len(),
            tiles_buf.len(),
            chests_buf.len(),
            signs_buf.len(),
            npcs_buf.len(),
            te_buf.len(),
            pp_buf.len(),
            town_buf.len(),
            best_buf.len(),
            cp_buf.len(),
        ];
        for (i, size) in sizes.iter().enumerate() {
            cumulative += size;
            info.sections[i + 1] = cumulative as i32;
        }

        let mut out = Cursor::empty();
        info.write(&mut out);
        debug_assert_eq!(out.len(), info_header_size, "info header length drifted between passes");
        out.write_bytes(header_buf.as_slice());
        out.write_bytes(tiles_buf.as_slice());
        out.write_bytes(chests_buf.as_slice());
        out.write_bytes(signs_buf.as_slice());
        out.write_bytes(npcs_buf.as_slice());
        out.write_bytes(te_buf.as_slice());
        out.write_bytes(pp_buf.as_slice());
        out.write_bytes(town_buf.as_slice());
        out.write_bytes(best_buf.as_slice());
        out.write_bytes(cp_buf.as_slice());
        out.write_bytes(footer_buf.as_slice());

        out.save(path)
    }
}

fn info_header_encoded_len(info: &InfoHeader) -> usize {
    4 + 7 + 1 + 4 + 8 + 2 + info.sections.len() * 4 + 2 + info.uvs.len()
}

fn read_footer(cursor: &mut Cursor) -> Result<Option<String>> {
    if cursor.remaining() == 0 {
        return Ok(None);
    }
    let present = cursor.read_u8()? != 0;
    if !present {
        return Ok(None);
    }
    let name = cursor::parse_string(cursor)?;
    if cursor.remaining() >= 4 {
        cursor.read_i32()?; // world id, already captured in the header proper
    }
    Ok(name)
}

fn write_footer(cursor: &mut Cursor, name: Option<&str>, world_id: i32) {
    cursor.write_u8(1);
    cursor::emit_string(cursor, name);
    cursor.write_i32(world_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_has_centered_spawn() {
        let w = World::new(4200, 1200, "Test World", "ordinary seed");
        assert_eq!(w.header.spawn_x, 2100);
        assert_eq!(w.header.spawn_y, 600);
        assert_eq!(w.tiles.width, 4200);
        assert_eq!(w.tiles.height, 1200);
    }

    #[test]
    fn round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.wld");

        let mut w = World::new(10, 10, "Roundtrip", "42");
        w.signs.push(Sign {
            text: Some("Hi".into()),
            x: 1,
            y: 1,
        });
        w.write(&path).unwrap();

        let back = World::open(&path).unwrap();
        assert_eq!(back.header.name.as_deref(), Some("Roundtrip"));
        assert_eq!(back.signs, w.signs);
        assert_eq!(back.tiles.width, 10);
        assert_eq!(back.tiles.height, 10);
    }
}
