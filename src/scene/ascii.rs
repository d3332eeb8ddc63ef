//! Character-grid debug view of a scene
//!
//! One glyph per battlefield block. Later layers overwrite earlier ones, so
//! the view shows the same occlusion as the real scene: a tank under a
//! forest block prints as forest.

use std::fmt;

use glam::Vec2;

use super::compose::SceneRenderer;
use super::layer::{RenderCall, SceneGroup};
use crate::consts::{BLOCK_SIZE, FIELD_BLOCKS};
use crate::snapshot::{HudState, TankSide};

/// Glyphs per layer
pub mod glyphs {
    pub const EMPTY: char = ' ';
    pub const RIVER: char = '~';
    pub const STEEL: char = '#';
    pub const BRICK: char = '=';
    pub const SNOW: char = '.';
    pub const EAGLE: char = 'E';
    pub const EAGLE_BROKEN: char = 'X';
    pub const BULLET: char = '*';
    pub const PLAYER: char = 'P';
    pub const BOT: char = 'B';
    pub const HELMET: char = '@';
    pub const FOREST: char = '%';
    pub const RESTRICTED: char = '!';
    pub const POWER_UP: char = '+';
    pub const EXPLOSION: char = 'x';
    pub const FLICKER: char = '?';
    pub const SCORE: char = '$';
}

const SIDE: usize = FIELD_BLOCKS as usize;

pub struct AsciiCanvas {
    cells: [[char; SIDE]; SIDE],
    hud: String,
    origin: Vec2,
    show_diagnostics: bool,
}

impl Default for AsciiCanvas {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AsciiCanvas {
    pub fn new(show_diagnostics: bool) -> Self {
        Self {
            cells: [[glyphs::EMPTY; SIDE]; SIDE],
            hud: String::new(),
            origin: Vec2::splat(BLOCK_SIZE),
            show_diagnostics,
        }
    }

    /// Glyph at block coordinates
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn hud_line(&self) -> &str {
        &self.hud
    }

    fn cell_of(pos: Vec2) -> Option<(usize, usize)> {
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / BLOCK_SIZE).floor() as usize;
        let row = (pos.y / BLOCK_SIZE).floor() as usize;
        (col < SIDE && row < SIDE).then_some((col, row))
    }

    fn plot(&mut self, pos: Vec2, glyph: char) {
        if let Some((col, row)) = Self::cell_of(pos) {
            self.cells[row][col] = glyph;
        }
    }

    fn plot_all<'p>(&mut self, positions: impl IntoIterator<Item = &'p Vec2>, glyph: char) {
        for pos in positions {
            self.plot(*pos, glyph);
        }
    }

    fn plot_text(&mut self, pos: Vec2, content: &str) {
        // Text lives in scene coordinates; shift into the battlefield grid
        let Some((col, row)) = Self::cell_of(pos - self.origin) else {
            return;
        };
        for (offset, ch) in content.chars().enumerate() {
            if col + offset >= SIDE {
                break;
            }
            self.cells[row][col + offset] = ch;
        }
    }

    fn format_hud(hud: &HudState) -> String {
        let lives: Vec<String> = hud.players.iter().map(|p| p.lives.to_string()).collect();
        format!(
            "stage {} | enemies {} | lives {}",
            hud.stage_label.as_deref().unwrap_or("-"),
            hud.remaining_enemies,
            if lives.is_empty() {
                "-".to_string()
            } else {
                lives.join("/")
            }
        )
    }
}

impl SceneRenderer for AsciiCanvas {
    fn begin_group(&mut self, group: SceneGroup, origin: Vec2) {
        if group == SceneGroup::Battlefield {
            self.origin = origin;
        }
    }

    fn draw(&mut self, call: &RenderCall<'_>) {
        if call.kind().is_diagnostic() && !self.show_diagnostics {
            return;
        }
        match call {
            RenderCall::Hud(hud) => self.hud = Self::format_hud(hud),
            RenderCall::Background { .. } => self.cells = [[glyphs::EMPTY; SIDE]; SIDE],
            RenderCall::River(cells) => self.plot_all(cells.iter(), glyphs::RIVER),
            RenderCall::Steel(cells) => self.plot_all(cells.iter(), glyphs::STEEL),
            RenderCall::Brick(cells) => self.plot_all(cells.iter(), glyphs::BRICK),
            RenderCall::Snow(cells) => self.plot_all(cells.iter(), glyphs::SNOW),
            RenderCall::Forest(cells) => self.plot_all(cells.iter(), glyphs::FOREST),
            RenderCall::Eagle(Some(eagle)) => {
                let glyph = if eagle.broken {
                    glyphs::EAGLE_BROKEN
                } else {
                    glyphs::EAGLE
                };
                self.plot(eagle.pos, glyph);
            }
            RenderCall::Eagle(None) => {}
            RenderCall::Bullets(bullets) => {
                self.plot_all(bullets.iter().map(|b| &b.item.pos), glyphs::BULLET)
            }
            RenderCall::Tanks(tanks) => {
                for tank in tanks {
                    let glyph = match tank.item.side {
                        TankSide::Human => glyphs::PLAYER,
                        TankSide::Bot => glyphs::BOT,
                    };
                    self.plot(tank.item.pos, glyph);
                }
            }
            RenderCall::Helmets(tanks) => {
                self.plot_all(tanks.iter().map(|t| &t.item.pos), glyphs::HELMET)
            }
            RenderCall::RestrictedAreas(areas) => {
                self.plot_all(areas.iter().map(|a| &a.item.pos), glyphs::RESTRICTED)
            }
            RenderCall::PowerUps(power_ups) => self.plot_all(
                power_ups
                    .iter()
                    .filter(|p| p.item.visible)
                    .map(|p| &p.item.pos),
                glyphs::POWER_UP,
            ),
            RenderCall::Explosions(explosions) => {
                self.plot_all(explosions.iter().map(|e| &e.item.pos), glyphs::EXPLOSION)
            }
            RenderCall::Flickers(flickers) => {
                self.plot_all(flickers.iter().map(|f| &f.item.pos), glyphs::FLICKER)
            }
            RenderCall::Scores(scores) => {
                self.plot_all(scores.iter().map(|s| &s.item.pos), glyphs::SCORE)
            }
            RenderCall::Texts(texts) => {
                for text in texts {
                    self.plot_text(text.item.pos, &text.item.content);
                }
            }
        }
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.hud)?;
        let border: String = std::iter::repeat_n('-', SIDE).collect();
        writeln!(f, "+{}+", border)?;
        for row in &self.cells {
            let line: String = row.iter().collect();
            writeln!(f, "|{}|", line)?;
        }
        write!(f, "+{}+", border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::compose;
    use crate::snapshot::{
        EagleRecord, GameStatus, PlayerHud, Rect, Snapshot, TankRecord, TextRecord,
    };

    fn block(col: f32, row: f32) -> Vec2 {
        Vec2::new(col * BLOCK_SIZE, row * BLOCK_SIZE)
    }

    fn render(snapshot: &Snapshot, show_diagnostics: bool) -> AsciiCanvas {
        let mut canvas = AsciiCanvas::new(show_diagnostics);
        compose(snapshot).render(&mut canvas);
        canvas
    }

    #[test]
    fn test_forest_hides_tank() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        snapshot.tanks.insert(1, TankRecord::new(block(2.0, 3.0), TankSide::Human));
        snapshot.tanks.insert(2, TankRecord::new(block(5.0, 3.0), TankSide::Bot));
        snapshot.map.forests = vec![block(2.0, 3.0)];

        let canvas = render(&snapshot, false);
        assert_eq!(canvas.glyph(2, 3), Some(glyphs::FOREST));
        assert_eq!(canvas.glyph(5, 3), Some(glyphs::BOT));
    }

    #[test]
    fn test_helmet_over_tank_and_inactive_hidden() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        let mut shielded = TankRecord::new(block(4.0, 12.0), TankSide::Human);
        shielded.helmet_duration = 1500;
        snapshot.tanks.insert(1, shielded);
        let mut parked = TankRecord::new(block(8.0, 0.0), TankSide::Bot);
        parked.active = false;
        snapshot.tanks.insert(2, parked);

        let canvas = render(&snapshot, false);
        assert_eq!(canvas.glyph(4, 12), Some(glyphs::HELMET));
        assert_eq!(canvas.glyph(8, 0), Some(glyphs::EMPTY));
    }

    #[test]
    fn test_eagle_and_terrain() {
        let mut snapshot = Snapshot::new(GameStatus::GameOver);
        snapshot.map.eagle = Some(EagleRecord {
            pos: block(6.0, 12.0),
            broken: true,
        });
        snapshot.map.rivers = vec![block(0.0, 6.0)];
        snapshot.map.steels = vec![block(1.0, 6.0)];
        // Quarter-block bricks collapse into one cell
        snapshot.map.bricks = vec![block(2.0, 6.0), block(2.0, 6.0) + Vec2::splat(4.0)];

        let canvas = render(&snapshot, false);
        assert_eq!(canvas.glyph(6, 12), Some(glyphs::EAGLE_BROKEN));
        assert_eq!(canvas.glyph(0, 6), Some(glyphs::RIVER));
        assert_eq!(canvas.glyph(1, 6), Some(glyphs::STEEL));
        assert_eq!(canvas.glyph(2, 6), Some(glyphs::BRICK));
    }

    #[test]
    fn test_diagnostics_toggle() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        snapshot
            .map
            .restricted_areas
            .insert(1, Rect::new(0.0, 0.0, BLOCK_SIZE, BLOCK_SIZE));

        assert_eq!(render(&snapshot, false).glyph(0, 0), Some(glyphs::EMPTY));
        assert_eq!(render(&snapshot, true).glyph(0, 0), Some(glyphs::RESTRICTED));
    }

    #[test]
    fn test_non_finite_positions_are_skipped() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        snapshot
            .tanks
            .insert(1, TankRecord::new(Vec2::new(f32::NAN, 0.0), TankSide::Human));
        snapshot
            .tanks
            .insert(2, TankRecord::new(Vec2::new(0.0, f32::INFINITY), TankSide::Bot));
        snapshot.map.forests = vec![Vec2::splat(f32::NAN)];

        let canvas = render(&snapshot, false);
        assert_eq!(canvas.glyph(0, 0), Some(glyphs::EMPTY));
        assert_eq!(AsciiCanvas::cell_of(Vec2::new(f32::NAN, 16.0)), None);
    }

    #[test]
    fn test_text_uses_scene_coordinates() {
        let mut snapshot = Snapshot::new(GameStatus::GameOver);
        snapshot.texts.insert(
            1,
            TextRecord {
                // One block in from the scene edge is battlefield column 0
                pos: Vec2::new(BLOCK_SIZE, 7.0 * BLOCK_SIZE),
                content: "GAME OVER".to_string(),
                fill: "#e44437".to_string(),
            },
        );
        let canvas = render(&snapshot, false);
        let row: String = (0..9).filter_map(|c| canvas.glyph(c, 6)).collect();
        assert_eq!(row, "GAME OVER");
    }

    #[test]
    fn test_hud_line_and_display() {
        let mut snapshot = Snapshot::new(GameStatus::On);
        snapshot.hud.remaining_enemies = 18;
        snapshot.hud.players = vec![PlayerHud { lives: 3, score: 0 }];
        snapshot.hud.stage_label = Some("4".to_string());

        let canvas = render(&snapshot, false);
        assert_eq!(canvas.hud_line(), "stage 4 | enemies 18 | lives 3");
        let text = canvas.to_string();
        assert_eq!(text.lines().count(), 1 + 2 + SIDE);
        assert!(text.lines().all(|l| l.chars().count() == SIDE + 2 || !l.starts_with('|')));
    }
}
