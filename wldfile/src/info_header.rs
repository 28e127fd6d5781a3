//! The file's leading info block: version, signature, section offsets, and
//! the "important tile" bitmap.

use crate::cursor::Cursor;
use crate::error::Result;

pub const SIGNATURE: [u8; 7] = *b"relogic";

/// Fixed layout preceding the version-gated [`crate::header::Header`].
#[derive(Clone, Debug)]
pub struct InfoHeader {
    pub version: i32,
    pub signature: [u8; 7],
    pub world_type: u8,
    pub revisions: i32,
    pub favorite: u64,
    /// Section offsets, finalized only by the orchestrator on write; the
    /// value read back from disk is authoritative only for `open`.
    pub sections: Vec<i32>,
    pub tile_mask: u16,
    /// `ceil(tile_mask / 8)` bytes; bit `id % 8` of byte `id / 8` marks tile
    /// id `id` as "important" (it carries extra u/v fields on disk).
    pub uvs: Vec<u8>,
}

impl InfoHeader {
    pub fn read(cursor: &mut Cursor) -> Result<Self> {
        let version = cursor.read_i32()?;
        let mut signature = [0u8; 7];
        signature.copy_from_slice(&cursor.read_bytes(7)?);
        let world_type = cursor.read_u8()?;
        let revisions = cursor.read_i32()?;
        let favorite = cursor.read_i64()? as u64;
        let numsections = cursor.read_i16()? as usize;
        let sections = cursor.read_array_i32(numsections)?;
        let tile_mask = cursor.read_u16()?;
        let uv_bytes = (tile_mask as usize + 7) / 8;
        let uvs = cursor.read_bytes(uv_bytes)?;

        Ok(InfoHeader {
            version,
            signature,
            world_type,
            revisions,
            favorite,
            sections,
            tile_mask,
            uvs,
        })
    }

    pub fn write(&self, cursor: &mut Cursor) {
        cursor.write_i32(self.version);
        cursor.write_bytes(&self.signature);
        cursor.write_u8(self.world_type);
        cursor.write_i32(self.revisions);
        cursor.write_i64(self.favorite as i64);
        cursor.write_i16(self.sections.len() as i16);
        cursor.write_array_i32(&self.sections);
        cursor.write_u16(self.tile_mask);
        cursor.write_bytes(&self.uvs);
    }

    /// `important(id) = uvs[id/8] & (1 << (id%8))`.
    pub fn is_important(&self, tile_id: i16) -> bool {
        if tile_id < 0 {
            return false;
        }
        let id = tile_id as usize;
        let byte = id / 8;
        byte < self.uvs.len() && self.uvs[byte] & (1 << (id % 8)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InfoHeader {
        InfoHeader {
            version: 279,
            signature: SIGNATURE,
            world_type: 2,
            revisions: 1,
            favorite: 0,
            sections: vec![10, 20, 30],
            tile_mask: 8,
            uvs: vec![0b0000_0100],
        }
    }

    #[test]
    fn round_trip() {
        let info = sample();
        let mut c = Cursor::empty();
        info.write(&mut c);
        c.seek(0);
        let back = InfoHeader::read(&mut c).unwrap();
        assert_eq!(back.version, info.version);
        assert_eq!(back.sections, info.sections);
        assert_eq!(back.uvs, info.uvs);
    }

    #[test]
    fn important_bit_lookup() {
        let info = sample();
        for id in 0..(8 * info.uvs.len() as i16) {
            let expected = info.uvs[(id / 8) as usize] & (1 << (id % 8)) != 0;
            assert_eq!(info.is_important(id), expected);
        }
    }
}
