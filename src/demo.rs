//! Demo snapshot producer
//!
//! Stand-in for the simulation so the binary can exercise the whole pipeline.
//! Layouts are deterministic per (seed, stage index).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{BLOCK_SIZE, BRICK_SIZE, FIELD_BLOCKS, STEEL_SIZE};
use crate::snapshot::{
    BulletRecord, Direction, EagleRecord, FlickerRecord, GameStatus, HudState, MapState,
    PlayerHud, PowerUpKind, PowerUpRecord, Rect, Snapshot, TankColor, TankLevel, TankRecord,
    TankSide, TextRecord,
};
use crate::stage::StageCatalog;

/// Bots per stage
pub const STAGE_ENEMY_COUNT: u32 = 20;
/// Spawn shield for the player, in milliseconds
pub const SPAWN_HELMET_MS: u32 = 3000;

const EAGLE_BLOCK: (u32, u32) = (6, 12);
const PLAYER_SPAWN: (u32, u32) = (4, 12);
const BOT_SPAWNS: [(u32, u32); 3] = [(0, 0), (6, 0), (12, 0)];

fn block_pos(col: u32, row: u32) -> Vec2 {
    Vec2::new(col as f32, row as f32) * BLOCK_SIZE
}

/// Cell origins covering one block with cells of `cell_size`
fn fill_block(col: u32, row: u32, cell_size: f32) -> Vec<Vec2> {
    let per_side = (BLOCK_SIZE / cell_size) as u32;
    let origin = block_pos(col, row);
    (0..per_side * per_side)
        .map(|i| origin + Vec2::new((i % per_side) as f32, (i / per_side) as f32) * cell_size)
        .collect()
}

/// Blocks kept clear of random terrain (spawns and the eagle fortress)
fn is_reserved(col: u32, row: u32) -> bool {
    let near = |(c, r): (u32, u32)| col.abs_diff(c) <= 1 && row.abs_diff(r) <= 1;
    near(EAGLE_BLOCK) || near(PLAYER_SPAWN) || BOT_SPAWNS.contains(&(col, row))
}

fn generate_map(rng: &mut Pcg32) -> MapState {
    let mut map = MapState::default();

    // Brick fortress around the eagle
    let (eagle_col, eagle_row) = EAGLE_BLOCK;
    for (col, row) in [
        (eagle_col - 1, eagle_row - 1),
        (eagle_col, eagle_row - 1),
        (eagle_col + 1, eagle_row - 1),
        (eagle_col - 1, eagle_row),
        (eagle_col + 1, eagle_row),
    ] {
        map.bricks.extend(fill_block(col, row, BRICK_SIZE));
    }
    map.eagle = Some(EagleRecord {
        pos: block_pos(eagle_col, eagle_row),
        broken: false,
    });
    map.restricted_areas.insert(
        1,
        Rect::new(
            (eagle_col - 1) as f32 * BLOCK_SIZE,
            (eagle_row - 1) as f32 * BLOCK_SIZE,
            3.0 * BLOCK_SIZE,
            2.0 * BLOCK_SIZE,
        ),
    );

    for row in 1..FIELD_BLOCKS - 1 {
        for col in 0..FIELD_BLOCKS {
            if is_reserved(col, row) {
                continue;
            }
            match rng.random_range(0..100u32) {
                0..14 => map.bricks.extend(fill_block(col, row, BRICK_SIZE)),
                14..18 => map.steels.extend(fill_block(col, row, STEEL_SIZE)),
                18..22 => map.rivers.push(block_pos(col, row)),
                22..27 => map.forests.push(block_pos(col, row)),
                27..30 => map.snows.push(block_pos(col, row)),
                _ => {}
            }
        }
    }

    map
}

fn random_bot(rng: &mut Pcg32, pos: Vec2) -> TankRecord {
    let mut tank = TankRecord::new(pos, TankSide::Bot);
    tank.level = match rng.random_range(0..4u32) {
        0 => TankLevel::Basic,
        1 => TankLevel::Fast,
        2 => TankLevel::Power,
        _ => TankLevel::Armor,
    };
    tank.hp = if tank.level == TankLevel::Armor { 4 } else { 1 };
    tank.with_power_up = rng.random_bool(0.25);
    if tank.with_power_up {
        tank.color = TankColor::Red;
    }
    tank.moving = true;
    tank
}

/// Snapshot right after a stage starts
pub fn start_stage(seed: u64, catalog: &StageCatalog, stage_index: usize, version: u64) -> Snapshot {
    let stage_seed = seed.wrapping_add((stage_index as u64).wrapping_mul(2654435761));
    let mut rng = Pcg32::seed_from_u64(stage_seed);
    let stage_name = catalog.name(stage_index).map(str::to_owned);
    log::info!(
        "Demo stage {} ({:?}) seed {}",
        stage_index,
        stage_name,
        stage_seed
    );

    let mut snapshot = Snapshot::new(GameStatus::On);
    snapshot.version = version;
    snapshot.current_stage = stage_name.clone();
    snapshot.map = generate_map(&mut rng);

    let mut player = TankRecord::new(block_pos(PLAYER_SPAWN.0, PLAYER_SPAWN.1), TankSide::Human);
    player.helmet_duration = SPAWN_HELMET_MS;
    snapshot.tanks.insert(1, player);

    // The last spawn point is still blinking; its bot is not on the field yet
    for (i, &(col, row)) in BOT_SPAWNS.iter().enumerate() {
        let id = i as u32 + 2;
        let mut bot = random_bot(&mut rng, block_pos(col, row));
        if i == BOT_SPAWNS.len() - 1 {
            bot.active = false;
            snapshot.flickers.insert(
                1,
                FlickerRecord {
                    pos: bot.pos,
                    shape: rng.random_range(0..4u8),
                },
            );
        }
        snapshot.tanks.insert(id, bot);
    }

    snapshot.bullets.insert(
        1,
        BulletRecord {
            pos: block_pos(BOT_SPAWNS[0].0, BOT_SPAWNS[0].1 + 1),
            direction: Direction::Down,
            speed: 0.12,
            owner: 2,
        },
    );

    let kinds = [
        PowerUpKind::Tank,
        PowerUpKind::Star,
        PowerUpKind::Grenade,
        PowerUpKind::Timer,
        PowerUpKind::Helmet,
        PowerUpKind::Shovel,
    ];
    snapshot.power_ups.insert(
        1,
        PowerUpRecord {
            pos: block_pos(rng.random_range(0..FIELD_BLOCKS), rng.random_range(2..10)),
            kind: kinds[rng.random_range(0..kinds.len())],
            visible: true,
        },
    );

    snapshot.hud = HudState {
        remaining_enemies: STAGE_ENEMY_COUNT - BOT_SPAWNS.len() as u32,
        players: vec![PlayerHud { lives: 3, score: 0 }],
        stage_label: stage_name,
    };

    snapshot
}

/// Snapshot after the eagle falls
pub fn game_over(previous: &Snapshot) -> Snapshot {
    let mut snapshot = previous.clone();
    snapshot.version += 1;
    snapshot.status = GameStatus::GameOver;
    if let Some(eagle) = snapshot.map.eagle.as_mut() {
        eagle.broken = true;
    }
    for tank in snapshot.tanks.values_mut() {
        tank.moving = false;
    }
    snapshot.bullets.clear();
    snapshot.texts.insert(
        1,
        TextRecord {
            pos: Vec2::new(5.0 * BLOCK_SIZE, 7.0 * BLOCK_SIZE),
            content: "GAME OVER".to_string(),
            fill: "#e44437".to_string(),
        },
    );
    snapshot
}
