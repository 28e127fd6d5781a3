//! The large, version-gated world-properties block.
//!
//! Field order and version gates are transcribed directly from the
//! reference `wld_header_parse` routine and are load-bearing: this module
//! is a single linear script, executed identically by [`Header::read`] and
//! [`Header::write`], so that a file opened and written back unchanged is
//! byte-identical.

use crate::cursor::{self, Cursor};
use crate::error::Result;

/// `(x0, x, y0, y)` world bounding rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub x: i32,
    pub y0: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Default)]
pub struct Header {
    pub name: Option<String>,
    pub seed: Option<String>,
    pub generator_ver: i64,
    pub guid: [u8; 16],
    pub id: i32,
    pub bounds: Rect,
    pub height: i32,
    pub width: i32,

    pub gamemode: i32,
    pub drunk: u8,
    pub ftw: u8,
    pub tenth: u8,
    pub dont_starve: u8,
    pub bees: u8,
    pub remix: u8,
    pub no_traps: u8,
    pub zenith: u8,

    pub creation_time: i64,
    pub moon_type: u8,
    pub tree_x: [i32; 3],
    pub tree_styles: [i32; 4],
    pub cave_back_x: [i32; 3],
    pub cave_back_style: [i32; 4],
    pub ice_back_style: i32,
    pub jungle_back_style: i32,
    pub hell_back_style: i32,

    pub spawn_x: i32,
    pub spawn_y: i32,
    pub ground_level: f64,
    pub rock_level: f64,
    pub time: f64,
    pub day: u8,
    pub moon_phase: i32,
    pub blood_moon: u8,
    pub eclipse: u8,

    pub dungeon_x: i32,
    pub dungeon_y: i32,
    pub crimson: u8,

    pub kill_eoc: u8,
    pub kill_evil_boss: u8,
    pub kill_skeletron: u8,
    pub kill_queen_bee: u8,
    pub kill_destroyer: u8,
    pub kill_twins: u8,
    pub kill_skeletron_prime: u8,
    pub kill_hm_boss: u8,
    pub kill_plantera: u8,
    pub kill_golem: u8,
    pub kill_king_slime: u8,

    pub saved_tinkerer: u8,
    pub saved_wizard: u8,
    pub saved_mechanic: u8,
    pub kill_goblin: u8,
    pub kill_clown: u8,
    pub kill_frost: u8,
    pub kill_pirate: u8,

    pub broke_orb: u8,
    pub meteor: u8,
    pub orb_smashed: u8,
    pub altar_count: i32,
    pub hardmode: u8,
    pub after_doom_party: u8,

    pub invasion_delay: i32,
    pub invasion_size: i32,
    pub invasion_type: i32,
    pub invasion_x: f64,
    pub slime_rain_time: f64,
    pub sundial_cooldown: u8,

    pub is_raining: u8,
    pub rain_time: i32,
    pub max_rain: f32,

    pub ore_tier_1: i32,
    pub ore_tier_2: i32,
    pub ore_tier_3: i32,

    pub tree_style: u8,
    pub corruption_style: u8,
    pub jungle_style: u8,
    pub snow_style: u8,
    pub hallow_style: u8,
    pub crimson_style: u8,
    pub desert_style: u8,
    pub ocean_style: u8,
    pub cloud_bg: i32,
    pub num_clouds: i16,
    pub wind_speed: f32,

    pub player_names: Vec<String>,

    pub saved_angler: u8,
    pub angler_quest: i32,
    pub saved_stylist: u8,
    pub saved_tax_collector: u8,
    pub saved_golfer: u8,

    pub invasion_start_size: i32,
    pub cultist_delay: i32,

    pub kill_counts: Vec<i32>,

    pub fast_forward_time: u8,

    pub kill_fishron: u8,
    pub kill_martian: u8,
    pub kill_cultist: u8,
    pub kill_moonlord: u8,
    pub kill_pumpking: u8,
    pub kill_wood: u8,
    pub kill_ice_queen: u8,
    pub kill_tank: u8,
    pub kill_everscream: u8,

    pub kill_solar: u8,
    pub kill_vortex: u8,
    pub kill_nebula: u8,
    pub kill_stardust: u8,
    pub active_solar: u8,
    pub active_vortex: u8,
    pub active_nebula: u8,
    pub active_stardust: u8,
    pub active_lunar: u8,

    pub manual_party: u8,
    pub invite_party: u8,
    pub party_cooldown: i32,
    pub partiers: Vec<i32>,

    pub active_sandstorm: u8,
    pub sandstorm_time: i32,
    pub sandstorm_severity: f32,
    pub sandstorm_max_severity: f32,

    pub saved_bartender: u8,
    pub kill_dd2_1: u8,
    pub kill_dd2_2: u8,
    pub kill_dd2_3: u8,

    pub style_8: u8,
    pub style_9: u8,
    pub style_10: u8,
    pub style_11: u8,
    pub style_12: u8,

    pub combat_book: u8,

    pub lantern_night_cooldown: i32,
    pub lantern_night: u8,
    pub manual_lantern_night: u8,
    pub next_lantern_real: u8,

    pub tree_tops: Vec<i32>,

    pub forced_halloween: u8,
    pub forced_christmas: u8,

    pub copper_id: i32,
    pub iron_id: i32,
    pub silver_id: i32,
    pub gold_id: i32,

    pub bought_cat: u8,
    pub bought_dog: u8,
    pub bought_bunny: u8,

    pub kill_eol: u8,
    pub kill_queen_slime: u8,
    pub kill_deer: u8,
    pub blue_slime: u8,

    pub unlocked_merchant: u8,
    pub unlocked_demo: u8,
    pub unlocked_party: u8,
    pub unlocked_dye: u8,
    pub unlocked_truffle: u8,
    pub unlocked_arms_dealer: u8,
    pub unlocked_nurse: u8,
    pub unlocked_princess: u8,

    pub combat_book_2: u8,
    pub peddler_satchel: u8,

    pub green_slime: u8,
    pub old_slime: u8,
    pub purple_slime: u8,
    pub rainbow_slime: u8,
    pub red_slime: u8,
    pub yellow_slime: u8,
    pub copper_slime: u8,

    pub moondial_active: u8,
    pub moondial_cooldown: u8,
}

impl Header {
    pub fn read(cursor: &mut Cursor, ver: i32) -> Result<Self> {
        let mut h = Header::default();

        h.name = cursor::parse_string(cursor)?;

        if ver >= 179 {
            h.seed = cursor::parse_string(cursor)?;
            h.generator_ver = cursor.read_i64()?;
        }

        if ver >= 181 {
            h.guid.copy_from_slice(&cursor.read_bytes(16)?);
        }

        h.id = cursor.read_i32()?;
        h.bounds = Rect {
            x0: cursor.read_i32()?,
            x: cursor.read_i32()?,
            y0: cursor.read_i32()?,
            y: cursor.read_i32()?,
        };
        h.height = cursor.read_i32()?;
        h.width = cursor.read_i32()?;

        if ver >= 209 {
            h.gamemode = cursor.read_i32()?;
            if ver >= 222 {
                h.drunk = cursor.read_u8()?;
            }
            if ver >= 227 {
                h.ftw = cursor.read_u8()?;
            }
            if ver >= 238 {
                h.tenth = cursor.read_u8()?;
            }
            if ver >= 239 {
                h.dont_starve = cursor.read_u8()?;
            }
            if ver >= 241 {
                h.bees = cursor.read_u8()?;
            }
            if ver >= 249 {
                h.remix = cursor.read_u8()?;
            }
            if ver >= 266 {
                h.no_traps = cursor.read_u8()?;
            }
            if ver >= 267 {
                h.zenith = cursor.read_u8()?;
            } else {
                h.zenith = (h.remix != 0 && h.drunk != 0) as u8;
            }
        } else {
            if ver >= 112 {
                h.gamemode = cursor.read_u8()? as i32;
            } else {
                h.gamemode = 0;
            }

            // Versions in [208, 209) peek the next byte without consuming
            // it: if nonzero, gamemode is forced to the "expert" value, but
            // whatever field the v<209 script reads next still consumes
            // that same byte.
            if ver >= 208 && cursor.peek_byte()? != 0 {
                h.gamemode = 2;
            }
        }

        if ver >= 141 {
            h.creation_time = cursor.read_i64()?;
        }
        if ver >= 63 {
            h.moon_type = cursor.read_u8()?;
        }
        if ver >= 44 {
            for x in h.tree_x.iter_mut() {
                *x = cursor.read_i32()?;
            }
            for s in h.tree_styles.iter_mut() {
                *s = cursor.read_i32()?;
            }
        }
        if ver >= 60 {
            for x in h.cave_back_x.iter_mut() {
                *x = cursor.read_i32()?;
            }
            for s in h.cave_back_style.iter_mut() {
                *s = cursor.read_i32()?;
            }
            h.ice_back_style = cursor.read_i32()?;
        }
        if ver >= 61 {
            h.jungle_back_style = cursor.read_i32()?;
            h.hell_back_style = cursor.read_i32()?;
        }

        h.spawn_x = cursor.read_i32()?;
        h.spawn_y = cursor.read_i32()?;
        h.ground_level = cursor.read_f64()?;
        h.rock_level = cursor.read_f64()?;
        h.time = cursor.read_f64()?;
        h.day = cursor.read_u8()?;
        h.moon_phase = cursor.read_i32()?;
        h.blood_moon = cursor.read_u8()?;

        if ver >= 63 {
            h.eclipse = cursor.read_u8()?;
        }

        h.dungeon_x = cursor.read_i32()?;
        h.dungeon_y = cursor.read_i32()?;

        if ver >= 56 {
            h.crimson = cursor.read_u8()?;
        }

        h.kill_eoc = cursor.read_u8()?;
        h.kill_evil_boss = cursor.read_u8()?;
        h.kill_skeletron = cursor.read_u8()?;

        if ver >= 66 {
            h.kill_queen_bee = cursor.read_u8()?;
        }
        if ver >= 44 {
            h.kill_destroyer = cursor.read_u8()?;
            h.kill_twins = cursor.read_u8()?;
            h.kill_skeletron_prime = cursor.read_u8()?;
            h.kill_hm_boss = cursor.read_u8()?;
        }
        if ver >= 64 {
            h.kill_plantera = cursor.read_u8()?;
            h.kill_golem = cursor.read_u8()?;
        }
        if ver >= 118 {
            h.kill_king_slime = cursor.read_u8()?;
        }
        if ver >= 29 {
            h.saved_tinkerer = cursor.read_u8()?;
            h.saved_wizard = cursor.read_u8()?;
        }
        if ver >= 34 {
            h.saved_mechanic = cursor.read_u8()?;
        }
        if ver >= 29 {
            h.kill_goblin = cursor.read_u8()?;
        }
        if ver >= 32 {
            h.kill_clown = cursor.read_u8()?;
        }
        if ver >= 37 {
            h.kill_frost = cursor.read_u8()?;
        }
        if ver >= 56 {
            h.kill_pirate = cursor.read_u8()?;
        }

        h.broke_orb = cursor.read_u8()?;
        h.meteor = cursor.read_u8()?;
        h.orb_smashed = cursor.read_u8()?;

        if ver >= 23 {
            h.altar_count = cursor.read_i32()?;
            h.hardmode = cursor.read_u8()?;
        }
        if ver >= 257 {
            h.after_doom_party = cursor.read_u8()?;
        }

        h.invasion_delay = cursor.read_i32()?;
        h.invasion_size = cursor.read_i32()?;
        h.invasion_type = cursor.read_i32()?;
        h.invasion_x = cursor.read_f64()?;

        if ver >= 118 {
            h.slime_rain_time = cursor.read_f64()?;
        }
        if ver >= 113 {
            h.sundial_cooldown = cursor.read_u8()?;
        }
        if ver >= 53 {
            h.is_raining = cursor.read_u8()?;
            h.rain_time = cursor.read_i32()?;
            h.max_rain = cursor.read_f32()?;
        }
        if ver >= 54 {
            h.ore_tier_1 = cursor.read_i32()?;
            h.ore_tier_2 = cursor.read_i32()?;
            h.ore_tier_3 = cursor.read_i32()?;
        }
        if ver >= 55 {
            h.tree_style = cursor.read_u8()?;
            h.corruption_style = cursor.read_u8()?;
            h.jungle_style = cursor.read_u8()?;
        }
        if ver >= 60 {
            h.snow_style = cursor.read_u8()?;
            h.hallow_style = cursor.read_u8()?;
            h.crimson_style = cursor.read_u8()?;
            h.desert_style = cursor.read_u8()?;
            h.ocean_style = cursor.read_u8()?;
            h.cloud_bg = cursor.read_i32()?;
        }
        if ver >= 62 {
            h.num_clouds = cursor.read_i16()?;
            h.wind_speed = cursor.read_f32()?;
        }

        if ver >= 95 {
            let players = cursor.read_i32()? as usize;
            h.player_names = cursor::try_reserve_vec(players)?;
            for _ in 0..players {
                h.player_names.push(cursor::parse_string(cursor)?.unwrap_or_default());
            }
        }

        if ver >= 99 {
            h.saved_angler = cursor.read_u8()?;
        }
        if ver >= 101 {
            h.angler_quest = cursor.read_i32()?;
        }
        if ver >= 104 {
            h.saved_stylist = cursor.read_u8()?;
        }
        if ver >= 129 {
            h.saved_tax_collector = cursor.read_u8()?;
        }
        if ver >= 201 {
            h.saved_golfer = cursor.read_u8()?;
        }
        if ver >= 107 {
            h.invasion_start_size = cursor.read_i32()?;
        }
        if ver >= 108 {
            h.cultist_delay = cursor.read_i32()?;
        }

        if ver >= 109 {
            let n = cursor.read_i16()? as usize;
            h.kill_counts = cursor.read_array_i32(n)?;
        }

        if ver >= 128 {
            h.fast_forward_time = cursor.read_u8()?;
        }

        if ver >= 131 {
            h.kill_fishron = cursor.read_u8()?;
            h.kill_martian = cursor.read_u8()?;
            h.kill_cultist = cursor.read_u8()?;
            h.kill_moonlord = cursor.read_u8()?;
            h.kill_pumpking = cursor.read_u8()?;
            h.kill_wood = cursor.read_u8()?;
            h.kill_ice_queen = cursor.read_u8()?;
            h.kill_tank = cursor.read_u8()?;
            h.kill_everscream = cursor.read_u8()?;
        }

        if ver >= 140 {
            h.kill_solar = cursor.read_u8()?;
            h.kill_vortex = cursor.read_u8()?;
            h.kill_nebula = cursor.read_u8()?;
            h.kill_stardust = cursor.read_u8()?;
            h.active_solar = cursor.read_u8()?;
            h.active_vortex = cursor.read_u8()?;
            h.active_nebula = cursor.read_u8()?;
            h.active_stardust = cursor.read_u8()?;
            h.active_lunar = cursor.read_u8()?;
        }

        if ver >= 170 {
            h.manual_party = cursor.read_u8()?;
            h.invite_party = cursor.read_u8()?;
            h.party_cooldown = cursor.read_i32()?;
            let n = cursor.read_i32()? as usize;
            h.partiers = cursor.read_array_i32(n)?;
        }

        if ver >= 174 {
            h.active_sandstorm = cursor.read_u8()?;
            h.sandstorm_time = cursor.read_i32()?;
            h.sandstorm_severity = cursor.read_f32()?;
            h.sandstorm_max_severity = cursor.read_f32()?;
        }

        if ver >= 178 {
            h.saved_bartender = cursor.read_u8()?;
            h.kill_dd2_1 = cursor.read_u8()?;
            h.kill_dd2_2 = cursor.read_u8()?;
            h.kill_dd2_3 = cursor.read_u8()?;
        }

        if ver >= 194 {
            h.style_8 = cursor.read_u8()?;
        }
        if ver >= 215 {
            h.style_9 = cursor.read_u8()?;
        }
        if ver >= 195 {
            h.style_10 = cursor.read_u8()?;
            h.style_11 = cursor.read_u8()?;
            h.style_12 = cursor.read_u8()?;
        }
        if ver >= 204 {
            h.combat_book = cursor.read_u8()?;
        }
        if ver >= 207 {
            h.lantern_night_cooldown = cursor.read_i32()?;
            h.lantern_night = cursor.read_u8()?;
            h.manual_lantern_night = cursor.read_u8()?;
            h.next_lantern_real = cursor.read_u8()?;
        }
        if ver >= 211 {
            let n = cursor.read_i32()? as usize;
            h.tree_tops = cursor.read_array_i32(n)?;
        }
        if ver >= 212 {
            h.forced_halloween = cursor.read_u8()?;
            h.forced_christmas = cursor.read_u8()?;
        }
        if ver >= 216 {
            h.copper_id = cursor.read_i32()?;
            h.iron_id = cursor.read_i32()?;
            h.silver_id = cursor.read_i32()?;
            h.gold_id = cursor.read_i32()?;
        }
        if ver >= 217 {
            h.bought_cat = cursor.read_u8()?;
            h.bought_dog = cursor.read_u8()?;
            h.bought_bunny = cursor.read_u8()?;
        }
        if ver >= 223 {
            h.kill_eol = cursor.read_u8()?;
            h.kill_queen_slime = cursor.read_u8()?;
        }
        if ver >= 240 {
            h.kill_deer = cursor.read_u8()?;
        }
        if ver >= 250 {
            h.blue_slime = cursor.read_u8()?;
        }
        if ver >= 251 {
            h.unlocked_merchant = cursor.read_u8()?;
            h.unlocked_demo = cursor.read_u8()?;
            h.unlocked_party = cursor.read_u8()?;
            h.unlocked_dye = cursor.read_u8()?;
            h.unlocked_truffle = cursor.read_u8()?;
            h.unlocked_arms_dealer = cursor.read_u8()?;
            h.unlocked_nurse = cursor.read_u8()?;
            h.unlocked_princess = cursor.read_u8()?;
        }
        if ver >= 259 {
            h.combat_book_2 = cursor.read_u8()?;
        }
        if ver >= 260 {
            h.peddler_satchel = cursor.read_u8()?;
        }
        if ver >= 261 {
            h.green_slime = cursor.read_u8()?;
            h.old_slime = cursor.read_u8()?;
            h.purple_slime = cursor.read_u8()?;
            h.rainbow_slime = cursor.read_u8()?;
            h.red_slime = cursor.read_u8()?;
            h.yellow_slime = cursor.read_u8()?;
            h.copper_slime = cursor.read_u8()?;
        }
        if ver >= 264 {
            h.moondial_active = cursor.read_u8()?;
            h.moondial_cooldown = cursor.read_u8()?;
        }

        Ok(h)
    }

    pub fn write(&self, cursor: &mut Cursor, ver: i32) {
        let h = self;

        cursor::emit_string(cursor, h.name.as_deref());

        if ver >= 179 {
            cursor::emit_string(cursor, h.seed.as_deref());
            cursor.write_i64(h.generator_ver);
        }

        if ver >= 181 {
            cursor.write_bytes(&h.guid);
        }

        cursor.write_i32(h.id);
        cursor.write_i32(h.bounds.x0);
        cursor.write_i32(h.bounds.x);
        cursor.write_i32(h.bounds.y0);
        cursor.write_i32(h.bounds.y);
        cursor.write_i32(h.height);
        cursor.write_i32(h.width);

        if ver >= 209 {
            cursor.write_i32(h.gamemode);
            if ver >= 222 {
                cursor.write_u8(h.drunk);
            }
            if ver >= 227 {
                cursor.write_u8(h.ftw);
            }
            if ver >= 238 {
                cursor.write_u8(h.tenth);
            }
            if ver >= 239 {
                cursor.write_u8(h.dont_starve);
            }
            if ver >= 241 {
                cursor.write_u8(h.bees);
            }
            if ver >= 249 {
                cursor.write_u8(h.remix);
            }
            if ver >= 266 {
                cursor.write_u8(h.no_traps);
            }
            if ver >= 267 {
                cursor.write_u8(h.zenith);
            }
        } else {
            if ver >= 112 {
                cursor.write_u8(h.gamemode as u8);
            }
        }

        if ver >= 141 {
            cursor.write_i64(h.creation_time);
        }
        if ver >= 63 {
            cursor.write_u8(h.moon_type);
        }
        if ver >= 44 {
            for &x in h.tree_x.iter() {
                cursor.write_i32(x);
            }
            for &s in h.tree_styles.iter() {
                cursor.write_i32(s);
            }
        }
        if ver >= 60 {
            for &x in h.cave_back_x.iter() {
                cursor.write_i32(x);
            }
            for &s in h.cave_back_style.iter() {
                cursor.write_i32(s);
            }
            cursor.write_i32(h.ice_back_style);
        }
        if ver >= 61 {
            cursor.write_i32(h.jungle_back_style);
            cursor.write_i32(h.hell_back_style);
        }

        cursor.write_i32(h.spawn_x);
        cursor.write_i32(h.spawn_y);
        cursor.write_f64(h.ground_level);
        cursor.write_f64(h.rock_level);
        cursor.write_f64(h.time);
        cursor.write_u8(h.day);
        cursor.write_i32(h.moon_phase);
        cursor.write_u8(h.blood_moon);

        if ver >= 63 {
            cursor.write_u8(h.eclipse);
        }

        cursor.write_i32(h.dungeon_x);
        cursor.write_i32(h.dungeon_y);

        if ver >= 56 {
            cursor.write_u8(h.crimson);
        }

        cursor.write_u8(h.kill_eoc);
        cursor.write_u8(h.kill_evil_boss);
        cursor.write_u8(h.kill_skeletron);

        if ver >= 66 {
            cursor.write_u8(h.kill_queen_bee);
        }
        if ver >= 44 {
            cursor.write_u8(h.kill_destroyer);
            cursor.write_u8(h.kill_twins);
            cursor.write_u8(h.kill_skeletron_prime);
            cursor.write_u8(h.kill_hm_boss);
        }
        if ver >= 64 {
            cursor.write_u8(h.kill_plantera);
            cursor.write_u8(h.kill_golem);
        }
        if ver >= 118 {
            cursor.write_u8(h.kill_king_slime);
        }
        if ver >= 29 {
            cursor.write_u8(h.saved_tinkerer);
            cursor.write_u8(h.saved_wizard);
        }
        if ver >= 34 {
            cursor.write_u8(h.saved_mechanic);
        }
        if ver >= 29 {
            cursor.write_u8(h.kill_goblin);
        }
        if ver >= 32 {
            cursor.write_u8(h.kill_clown);
        }
        if ver >= 37 {
            cursor.write_u8(h.kill_frost);
        }
        if ver >= 56 {
            cursor.write_u8(h.kill_pirate);
        }

        cursor.write_u8(h.broke_orb);
        cursor.write_u8(h.meteor);
        cursor.write_u8(h.orb_smashed);

        if ver >= 23 {
            cursor.write_i32(h.altar_count);
            cursor.write_u8(h.hardmode);
        }
        if ver >= 257 {
            cursor.write_u8(h.after_doom_party);
        }

        cursor.write_i32(h.invasion_delay);
        cursor.write_i32(h.invasion_size);
        cursor.write_i32(h.invasion_type);
        cursor.write_f64(h.invasion_x);

        if ver >= 118 {
            cursor.write_f64(h.slime_rain_time);
        }
        if ver >= 113 {
            cursor.write_u8(h.sundial_cooldown);
        }
        if ver >= 53 {
            cursor.write_u8(h.is_raining);
            cursor.write_i32(h.rain_time);
            cursor.write_f32(h.max_rain);
        }
        if ver >= 54 {
            cursor.write_i32(h.ore_tier_1);
            cursor.write_i32(h.ore_tier_2);
            cursor.write_i32(h.ore_tier_3);
        }
        if ver >= 55 {
            cursor.write_u8(h.tree_style);
            cursor.write_u8(h.corruption_style);
            cursor.write_u8(h.jungle_style);
        }
        if ver >= 60 {
            cursor.write_u8(h.snow_style);
            cursor.write_u8(h.hallow_style);
            cursor.write_u8(h.crimson_style);
            cursor.write_u8(h.desert_style);
            cursor.write_u8(h.ocean_style);
            cursor.write_i32(h.cloud_bg);
        }
        if ver >= 62 {
            cursor.write_i16(h.num_clouds);
            cursor.write_f32(h.wind_speed);
        }

        if ver >= 95 {
            cursor.write_i32(h.player_names.len() as i32);
            for name in &h.player_names {
                cursor::emit_string(cursor, Some(name));
            }
        }

        if ver >= 99 {
            cursor.write_u8(h.saved_angler);
        }
        if ver >= 101 {
            cursor.write_i32(h.angler_quest);
        }
        if ver >= 104 {
            cursor.write_u8(h.saved_stylist);
        }
        if ver >= 129 {
            cursor.write_u8(h.saved_tax_collector);
        }
        if ver >= 201 {
            cursor.write_u8(h.saved_golfer);
        }
        if ver >= 107 {
            cursor.write_i32(h.invasion_start_size);
        }
        if ver >= 108 {
            cursor.write_i32(h.cultist_delay);
        }

        if ver >= 109 {
            cursor.write_i16(h.kill_counts.len() as i16);
            cursor.write_array_i32(&h.kill_counts);
        }

        if ver >= 128 {
            cursor.write_u8(h.fast_forward_time);
        }

        if ver >= 131 {
            cursor.write_u8(h.kill_fishron);
            cursor.write_u8(h.kill_martian);
            cursor.write_u8(h.kill_cultist);
            cursor.write_u8(h.kill_moonlord);
            cursor.write_u8(h.kill_pumpking);
            cursor.write_u8(h.kill_wood);
            cursor.write_u8(h.kill_ice_queen);
            cursor.write_u8(h.kill_tank);
            cursor.write_u8(h.kill_everscream);
        }

        if ver >= 140 {
            cursor.write_u8(h.kill_solar);
            cursor.write_u8(h.kill_vortex);
            cursor.write_u8(h.kill_nebula);
            cursor.write_u8(h.kill_stardust);
            cursor.write_u8(h.active_solar);
            cursor.write_u8(h.active_vortex);
            cursor.write_u8(h.active_nebula);
            cursor.write_u8(h.active_stardust);
            cursor.write_u8(h.active_lunar);
        }

        if ver >= 170 {
            cursor.write_u8(h.manual_party);
            cursor.write_u8(h.invite_party);
            cursor.write_i32(h.party_cooldown);
            cursor.write_i32(h.partiers.len() as i32);
            cursor.write_array_i32(&h.partiers);
        }

        if ver >= 174 {
            cursor.write_u8(h.active_sandstorm);
            cursor.write_i32(h.sandstorm_time);
            cursor.write_f32(h.sandstorm_severity);
            cursor.write_f32(h.sandstorm_max_severity);
        }

        if ver >= 178 {
            cursor.write_u8(h.saved_bartender);
            cursor.write_u8(h.kill_dd2_1);
            cursor.write_u8(h.kill_dd2_2);
            cursor.write_u8(h.kill_dd2_3);
        }

        if ver >= 194 {
            cursor.write_u8(h.style_8);
        }
        if ver >= 215 {
            cursor.write_u8(h.style_9);
        }
        if ver >= 195 {
            cursor.write_u8(h.style_10);
            cursor.write_u8(h.style_11);
            cursor.write_u8(h.style_12);
        }
        if ver >= 204 {
            cursor.write_u8(h.combat_book);
        }
        if ver >= 207 {
            cursor.write_i32(h.lantern_night_cooldown);
            cursor.write_u8(h.lantern_night);
            cursor.write_u8(h.manual_lantern_night);
            cursor.write_u8(h.next_lantern_real);
        }
        if ver >= 211 {
            cursor.write_i32(h.tree_tops.len() as i32);
            cursor.write_array_i32(&h.tree_tops);
        }
        if ver >= 212 {
            cursor.write_u8(h.forced_halloween);
            cursor.write_u8(h.forced_christmas);
        }
        if ver >= 216 {
            cursor.write_i32(h.copper_id);
            cursor.write_i32(h.iron_id);
            cursor.write_i32(h.silver_id);
            cursor.write_i32(h.gold_id);
        }
        if ver >= 217 {
            cursor.write_u8(h.bought_cat);
            cursor.write_u8(h.bought_dog);
            cursor.write_u8(h.bought_bunny);
        }
        if ver >= 223 {
            cursor.write_u8(h.kill_eol);
            cursor.write_u8(h.kill_queen_slime);
        }
        if ver >= 240 {
            cursor.write_u8(h.kill_deer);
        }
        if ver >= 250 {
            cursor.write_u8(h.blue_slime);
        }
        if ver >= 251 {
            cursor.write_u8(h.unlocked_merchant);
            cursor.write_u8(h.unlocked_demo);
            cursor.write_u8(h.unlocked_party);
            cursor.write_u8(h.unlocked_dye);
            cursor.write_u8(h.unlocked_truffle);
            cursor.write_u8(h.unlocked_arms_dealer);
            cursor.write_u8(h.unlocked_nurse);
            cursor.write_u8(h.unlocked_princess);
        }
        if ver >= 259 {
            cursor.write_u8(h.combat_book_2);
        }
        if ver >= 260 {
            cursor.write_u8(h.peddler_satchel);
        }
        if ver >= 261 {
            cursor.write_u8(h.green_slime);
            cursor.write_u8(h.old_slime);
            cursor.write_u8(h.purple_slime);
            cursor.write_u8(h.rainbow_slime);
            cursor.write_u8(h.red_slime);
            cursor.write_u8(h.yellow_slime);
            cursor.write_u8(h.copper_slime);
        }
        if ver >= 264 {
            cursor.write_u8(h.moondial_active);
            cursor.write_u8(h.moondial_cooldown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_modern_version() {
        let mut h = Header::default();
        h.name = Some("My World".into());
        h.seed = Some("12345".into());
        h.width = 4200;
        h.height = 1200;
        h.zenith = 1;
        h.remix = 1;
        h.drunk = 1;
        h.player_names = vec!["Alice".into(), "Bob".into()];
        h.kill_counts = vec![1, 2, 3];

        let ver = 279;
        let mut c = Cursor::empty();
        h.write(&mut c, ver);
        c.seek(0);
        let back = Header::read(&mut c, ver).unwrap();

        assert_eq!(back.name, h.name);
        assert_eq!(back.seed, h.seed);
        assert_eq!(back.width, h.width);
        assert_eq!(back.player_names, h.player_names);
        assert_eq!(back.kill_counts, h.kill_counts);
        assert_eq!(back.zenith, 1);
    }

    #[test]
    fn zenith_derived_when_absent() {
        let mut h = Header::default();
        h.name = None;
        h.remix = 1;
        h.drunk = 1;

        let ver = 244; // < 267, zenith field absent from the wire
        let mut c = Cursor::empty();
        h.write(&mut c, ver);
        c.seek(0);
        let back = Header::read(&mut c, ver).unwrap();
        assert_eq!(back.zenith, 1);
    }

    #[test]
    fn remix_absent_before_gate() {
        let mut h = Header::default();
        h.name = None;
        h.remix = 1; // would be written at v>=249, but ver is below the gate

        let ver = 244;
        let mut c = Cursor::empty();
        h.write(&mut c, ver);
        c.seek(0);
        let back = Header::read(&mut c, ver).unwrap();
        assert_eq!(back.remix, 0);
    }
}
