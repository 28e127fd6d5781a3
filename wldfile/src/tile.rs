//! Run-length-encoded tile matrix.
//!
//! Each cell is prefixed by up to four dispatch-flag bytes (A/L/H/X) whose
//! bits select which optional fields follow, then the fields themselves,
//! then an optional RLE repeat count for identical neighboring cells below.

use crate::cursor::{self, Cursor};
use crate::error::Result;
use crate::info_header::InfoHeader;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub tile_id: i16,
    pub u: i16,
    pub v: i16,
    pub wall_id: i16,
    pub liquid_type: u8,
    pub liquid_amount: u8,
    pub wiring: u8,
    pub orientation: u8,
    pub tile_paint: u8,
    pub wall_paint: u8,
}

impl Tile {
    fn active(&self) -> bool {
        self.tile_id >= 0
    }

    fn has_wall(&self) -> bool {
        self.wall_id >= 0
    }

    fn has_liquid(&self) -> bool {
        self.liquid_amount > 0
    }
}

pub struct TileMatrix {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
}

impl TileMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        TileMatrix {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    pub fn get(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let i = self.index(x, y);
        &mut self.tiles[i]
    }

    pub fn read(cursor: &mut Cursor, info: &InfoHeader, ver: i32, width: usize, height: usize) -> Result<Self> {
        let mut matrix = TileMatrix::new(width, height);
        let mut x = 0usize;
        while x < width {
            let mut y = 0usize;
            while y < height {
                let (tile, repeat) = read_cell(cursor, info, ver)?;
                *matrix.get_mut(x, y) = tile;
                for r in 1..=repeat {
                    if y + r >= height {
                        break;
                    }
                    *matrix.get_mut(x, y + r) = tile;
                }
                y += repeat + 1;
            }
            x += 1;
        }
        Ok(matrix)
    }

    pub fn write(&self, cursor: &mut Cursor, info: &InfoHeader, ver: i32) {
        for x in 0..self.width {
            let mut y = 0usize;
            while y < self.height {
                let t = self.get(x, y);
                // Bound the run so it never reads past the column's end,
                // fixing the reference encoder's unchecked `y + i` access.
                let mut copies = 0usize;
                while y + 1 + copies < self.height && self.get(x, y + 1 + copies) == t {
                    copies += 1;
                }
                write_cell(cursor, info, ver, t, copies);
                y += copies + 1;
            }
        }
    }
}

const WIRE_RED: u8 = 1;
const WIRE_BLUE: u8 = 2;
const WIRE_GREEN: u8 = 4;
const WIRE_YELLOW: u8 = 8;
const WIRE_ACTUATOR: u8 = 16;
const WIRE_ACTIVE_ACTUATOR: u8 = 32;

fn read_cell(cursor: &mut Cursor, info: &InfoHeader, _ver: i32) -> Result<(Tile, usize)> {
    let a = cursor.read_u8()?;
    let l = if cursor::bit(a, 0) { cursor.read_u8()? } else { 0 };
    let h = if cursor::bit(l, 0) { cursor.read_u8()? } else { 0 };
    // The fourth dispatch byte is never produced by a real writer (no path
    // sets H.bit0); read only to stay aligned if one somehow arrives.
    if cursor::bit(h, 0) {
        cursor.read_u8()?;
    }

    let mut t = Tile::default();
    t.tile_id = -1;
    t.wall_id = -1;

    if cursor::bit(a, 1) {
        let id = if cursor::bit(a, 5) {
            cursor.read_u16()? as i16
        } else {
            cursor.read_u8()? as i16
        };
        t.tile_id = id;

        if info.is_important(id) {
            t.u = cursor.read_i16()?;
            t.v = cursor.read_i16()?;
        }

        if cursor::bit(h, 3) {
            t.tile_paint = cursor.read_u8()?;
        }
    }

    if cursor::bit(a, 2) {
        t.wall_id = cursor.read_u8()? as i16;
        if cursor::bit(h, 4) {
            t.wall_paint = cursor.read_u8()?;
        }
    }

    let liquid_bits = cursor::field(a, 3, 4);
    if liquid_bits != 0 {
        t.liquid_amount = cursor.read_u8()?;
        t.liquid_type = liquid_bits;
    }

    if cursor::bit(l, 1) {
        t.wiring |= WIRE_RED;
    }
    if cursor::bit(l, 2) {
        t.wiring |= WIRE_BLUE;
    }
    if cursor::bit(l, 3) {
        t.wiring |= WIRE_GREEN;
    }
    let orientation_bits = cursor::field(l, 4, 6);
    if orientation_bits != 0 {
        t.orientation = orientation_bits;
    }

    if cursor::bit(h, 1) {
        t.wiring |= WIRE_ACTUATOR;
    }
    if cursor::bit(h, 2) {
        t.wiring |= WIRE_ACTIVE_ACTUATOR;
    }
    if cursor::bit(h, 5) {
        t.wiring |= WIRE_YELLOW;
    }
    if cursor::bit(h, 6) {
        t.wall_id |= (cursor.read_u8()? as i16) << 8;
    }

    let repeat = match cursor::field(a, 6, 7) {
        1 => cursor.read_u8()? as usize,
        2 => cursor.read_i16()? as usize,
        _ => 0,
    };

    Ok((t, repeat))
}

fn write_cell(cursor: &mut Cursor, info: &InfoHeader, _ver: i32, t: &Tile, repeat: usize) {
    let mut a = 0u8;
    let mut l = 0u8;
    let mut h = 0u8;

    let active = t.active();
    let wide_id = active && (t.tile_id as u16) & 0xFF00 != 0;
    if active {
        a |= 1 << 1;
        if wide_id {
            a |= 1 << 5;
        }
        if t.tile_paint != 0 {
            h |= 1 << 3;
        }
    }
    let wall = t.has_wall();
    let wide_wall = wall && (t.wall_id as u16) & 0xFF00 != 0;
    if wall {
        a |= 1 << 2;
        if wide_wall {
            h |= 1 << 6;
        }
        if t.wall_paint != 0 {
            h |= 1 << 4;
        }
    }
    if t.orientation != 0 {
        l |= (t.orientation & 0x7) << 4;
    }
    if t.has_liquid() {
        a |= (t.liquid_type & 0x3) << 3;
    }

    if t.wiring & WIRE_RED != 0 {
        l |= 1 << 1;
    }
    if t.wiring & WIRE_BLUE != 0 {
        l |= 1 << 2;
    }
    if t.wiring & WIRE_GREEN != 0 {
        l |= 1 << 3;
    }
    if t.wiring & WIRE_YELLOW != 0 {
        h |= 1 << 5;
    }
    if t.wiring & WIRE_ACTUATOR != 0 {
        h |= 1 << 1;
    }
    if t.wiring & WIRE_ACTIVE_ACTUATOR != 0 {
        h |= 1 << 2;
    }

    if repeat > 0 {
        if repeat <= 0xFF {
            a |= 1 << 6;
        } else {
            a |= 1 << 7;
        }
    }

    if h != 0 {
        l |= 1 << 0;
    }
    if l != 0 {
        a |= 1 << 0;
    }

    cursor.write_u8(a);
    if cursor::bit(a, 0) {
        cursor.write_u8(l);
    }
    if cursor::bit(l, 0) {
        cursor.write_u8(h);
    }

    if active {
        // The high id byte is only emitted when the id doesn't fit in one
        // byte, so a round trip can change which width is chosen for ids
        // <= 0xFF even though the decoded value is unaffected.
        if wide_id {
            cursor.write_u16(t.tile_id as u16);
        } else {
            cursor.write_u8(t.tile_id as u8);
        }
        if info.is_important(t.tile_id) {
            cursor.write_i16(t.u);
            cursor.write_i16(t.v);
        }
        if cursor::bit(h, 3) {
            cursor.write_u8(t.tile_paint);
        }
    }

    if wall {
        cursor.write_u8(t.wall_id as u8);
        if cursor::bit(h, 4) {
            cursor.write_u8(t.wall_paint);
        }
    }

    if t.has_liquid() {
        cursor.write_u8(t.liquid_amount);
    }

    if wide_wall {
        cursor.write_u8((t.wall_id >> 8) as u8);
    }

    if repeat > 0 {
        if repeat <= 0xFF {
            cursor.write_u8(repeat as u8);
        } else {
            cursor.write_i16(repeat as i16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_for(mask: u16) -> InfoHeader {
        InfoHeader {
            version: 279,
            signature: crate::info_header::SIGNATURE,
            world_type: 2,
            revisions: 0,
            favorite: 0,
            sections: vec![],
            tile_mask: mask,
            uvs: vec![0xFF; ((mask as usize) + 7) / 8],
        }
    }

    #[test]
    fn round_trip_plain_matrix() {
        let info = info_for(8);
        let ver = 279;
        let mut m = TileMatrix::new(3, 4);
        for x in 0..3 {
            for y in 0..4 {
                let t = m.get_mut(x, y);
                t.tile_id = ((x + y) % 3) as i16;
                t.wall_id = -1;
            }
        }

        let mut c = Cursor::empty();
        m.write(&mut c, &info, ver);
        c.seek(0);
        let back = TileMatrix::read(&mut c, &info, ver, 3, 4).unwrap();

        for x in 0..3 {
            for y in 0..4 {
                assert_eq!(back.get(x, y).tile_id, m.get(x, y).tile_id);
            }
        }
    }

    #[test]
    fn run_exactly_to_column_end_does_not_overrun() {
        let info = info_for(8);
        let ver = 279;
        let mut m = TileMatrix::new(1, 5);
        for y in 0..5 {
            m.get_mut(0, y).tile_id = 7;
        }

        let mut c = Cursor::empty();
        m.write(&mut c, &info, ver);
        c.seek(0);
        let back = TileMatrix::read(&mut c, &info, ver, 1, 5).unwrap();
        for y in 0..5 {
            assert_eq!(back.get(0, y).tile_id, 7);
        }
    }

    #[test]
    fn important_tile_carries_uv() {
        let info = info_for(8);
        let ver = 279;
        let mut m = TileMatrix::new(1, 1);
        let t = m.get_mut(0, 0);
        t.tile_id = 3;
        t.u = 16;
        t.v = 32;
        t.wall_id = -1;

        let mut c = Cursor::empty();
        m.write(&mut c, &info, ver);
        c.seek(0);
        let back = TileMatrix::read(&mut c, &info, ver, 1, 1).unwrap();
        assert_eq!(back.get(0, 0).u, 16);
        assert_eq!(back.get(0, 0).v, 32);
    }
}
