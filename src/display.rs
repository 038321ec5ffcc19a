/// Rendering layer: all terminal I/O lives here.
///
/// `TerminalSurface` is handed to the simulation as both its `Surface` and its
/// `HudSink`.  Sprites arrive in playfield units and are scaled onto the
/// character grid inside the border.  The HUD snapshot is only stored when
/// pushed; `present` paints it together with any state overlay and flushes.
/// Queue errors cannot travel through the `Surface` trait, so the first one
/// is parked and returned by `present`.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;
use sky_assault::boss::BossKind;
use sky_assault::compute::GameStatus;
use sky_assault::effects::EffectKind;
use sky_assault::entities::{BulletOwner, EnemyKind, Playfield};
use sky_assault::hud::{HudSink, HudSnapshot};
use sky_assault::render::{Sprite, Surface};
use sky_assault::stage::Theme;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_EXP: Color = Color::Green;
const C_HUD_WEAPON: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELD: Color = Color::Cyan;
const C_PLAYER_FLASH: Color = Color::Yellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_BULLET_BOSS: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn theme_color(theme: Theme) -> Color {
    match theme {
        Theme::Classic => Color::DarkBlue,
        Theme::Forest => Color::DarkGreen,
        Theme::Desert => Color::DarkYellow,
        Theme::Ocean => Color::Blue,
        Theme::Volcano => Color::DarkRed,
        Theme::Space => Color::DarkMagenta,
        Theme::Abyss => Color::DarkGrey,
        Theme::Energy => Color::DarkCyan,
        Theme::Time => Color::Grey,
        Theme::Ultimate => Color::Magenta,
    }
}

fn boss_color(kind: BossKind) -> Color {
    match kind {
        BossKind::Scout | BossKind::Guard => Color::Green,
        BossKind::Tank | BossKind::Battleship => Color::Blue,
        BossKind::Fire => Color::DarkYellow,
        BossKind::Mothership | BossKind::Void => Color::Magenta,
        BossKind::Energy | BossKind::Time => Color::Cyan,
        BossKind::Ultimate => Color::Red,
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    field: Playfield,
    width: u16,
    height: u16,
    frame: u64,
    shake: f32,
    hud: Option<HudSnapshot>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, field: Playfield, width: u16, height: u16) -> Self {
        Self {
            out,
            field,
            width,
            height,
            frame: 0,
            shake: 0.0,
            hud: None,
            error: None,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    /// Map a playfield point onto the grid inside the border.
    fn cell(&self, at: Vec2) -> Option<(u16, u16)> {
        let inner_w = self.width.saturating_sub(2) as f32;
        let inner_h = self.height.saturating_sub(4) as f32;
        if inner_w < 1.0 || inner_h < 1.0 || !at.is_finite() {
            return None;
        }
        // Shake nudges the whole scene sideways on alternate frames.
        let jitter = (self.shake / 10.0).round().min(2.0);
        let jitter = if self.frame % 2 == 0 { jitter } else { -jitter };

        let x = (at.x / self.field.width * inner_w + jitter).floor();
        let y = (at.y / self.field.height * inner_h).floor();
        if x < 0.0 || x >= inner_w || y < 0.0 || y >= inner_h {
            return None;
        }
        Some((1 + x as u16, 2 + y as u16))
    }

    fn put(&mut self, col: u16, row: u16, color: Color, text: &str) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    /// Print `text` centred on `at`, clipped to the playfield rows.
    fn put_centred(&mut self, at: Vec2, color: Color, text: &str) -> io::Result<()> {
        let Some((col, row)) = self.cell(at) else {
            return Ok(());
        };
        let half = text.chars().count() as u16 / 2;
        let col = col.saturating_sub(half).max(1);
        self.put(col, row, color, text)
    }

    /// Multi-row sprite centred on `at`, skipping rows that fall off the field.
    fn put_rows(&mut self, at: Vec2, color: Color, rows: &[&str]) -> io::Result<()> {
        let Some((col, row)) = self.cell(at) else {
            return Ok(());
        };
        let bottom = self.height.saturating_sub(2);
        for (i, line) in rows.iter().enumerate() {
            let r = row + i as u16;
            if r >= bottom {
                break;
            }
            let half = line.chars().count() as u16 / 2;
            self.put(col.saturating_sub(half).max(1), r, color, line)?;
        }
        Ok(())
    }

    fn draw_sprite(&mut self, at: Vec2, sprite: Sprite<'_>) -> io::Result<()> {
        match sprite {
            Sprite::Player {
                tier,
                shielded,
                flashing,
            } => {
                let color = if shielded {
                    C_PLAYER_SHIELD
                } else if flashing {
                    C_PLAYER_FLASH
                } else {
                    C_PLAYER
                };
                let body = if tier >= 5 { "/◆\\" } else { "/█\\" };
                self.put_rows(at, color, &["▲", body])?;
                if shielded {
                    self.put_centred(at + Vec2::new(0.0, 40.0), C_PLAYER_SHIELD, "(   )")?;
                }
            }
            Sprite::Enemy { kind, health_ratio } => {
                let (rows, color): (&[&str], Color) = match kind {
                    EnemyKind::Normal => (&["«▼»"][..], Color::Green),
                    EnemyKind::Fighter => (&["<V>"][..], Color::Red),
                    EnemyKind::Scout => (&["·v·"][..], Color::Cyan),
                    EnemyKind::Bomber => (&["[▼]"][..], Color::DarkYellow),
                    EnemyKind::Interceptor => (&["≫▼≪"][..], Color::Magenta),
                    EnemyKind::BossLite => (&["╔▼▼╗", "╚══╝"][..], Color::Red),
                };
                let color = if health_ratio < 0.5 { Color::DarkRed } else { color };
                self.put_rows(at, color, rows)?;
            }
            Sprite::Boss {
                kind,
                phase,
                health_ratio: _,
            } => {
                let color = if phase >= 2 { Color::Red } else { boss_color(kind) };
                self.put_rows(
                    at - Vec2::new(0.0, 30.0),
                    color,
                    &["╔═╤═══╤═╗", "║◉ ███ ◉║", "╚╦╧═▼═╧╦╝"],
                )?;
            }
            Sprite::Bullet { owner } => {
                let (glyph, color) = match owner {
                    BulletOwner::Player => ("║", C_BULLET_PLAYER),
                    BulletOwner::Enemy => ("↓", C_BULLET_ENEMY),
                    BulletOwner::Boss => ("●", C_BULLET_BOSS),
                };
                self.put_centred(at, color, glyph)?;
            }
            Sprite::Powerup { kind } => {
                let (glyph, color) = match kind {
                    EffectKind::Speed => ("»", Color::Green),
                    EffectKind::Health => ("♥", Color::Magenta),
                    EffectKind::Weapon => ("★", Color::Yellow),
                    EffectKind::Shield => ("◎", Color::Cyan),
                };
                self.put_centred(at, color, glyph)?;
            }
            Sprite::Particle { life } => {
                let glyph = if life > 0.5 { "*" } else { "·" };
                self.put_centred(at, Color::DarkYellow, glyph)?;
            }
            Sprite::Explosion { radius, life } => {
                let color = if life > 0.5 { Color::Yellow } else { Color::Red };
                let glyph = if radius > 40.0 {
                    "✺✺✺"
                } else if radius > 15.0 {
                    "✺"
                } else {
                    "*"
                };
                self.put_centred(at, color, glyph)?;
            }
            Sprite::Text { text, life } => {
                let color = if life > 0.4 { Color::White } else { Color::DarkGrey };
                self.put_centred(at, color, text)?;
            }
        }
        Ok(())
    }

    /// Paint the HUD and overlays, then flush the frame.
    pub fn present(&mut self) -> io::Result<()> {
        self.frame += 1;
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        if let Some(hud) = self.hud.take() {
            self.draw_hud(&hud)?;
            match hud.status {
                GameStatus::Menu => self.draw_menu()?,
                GameStatus::Paused => self.draw_banner(&["PAUSED", "P - Resume  Q - Quit"])?,
                GameStatus::GameOver => self.draw_summary(&hud, "GAME  OVER", Color::Red)?,
                GameStatus::Victory => self.draw_summary(&hud, "VICTORY", Color::Yellow)?,
                GameStatus::Playing => {}
            }
            self.hud = Some(hud);
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self, color: Color) -> io::Result<()> {
        let w = self.width as usize;
        let h = self.height;

        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── HUD (top and bottom rows) ─────────────────────────────────────────────

    fn draw_hud(&mut self, hud: &HudSnapshot) -> io::Result<()> {
        // Score, level and XP on the left
        self.put(1, 0, C_HUD_SCORE, &format!("Score:{:>7}", hud.score))?;
        self.put(
            16,
            0,
            C_HUD_EXP,
            &format!("Lv{} XP {}/{}", hud.level, hud.exp, hud.max_exp),
        )?;

        // Stage in the centre
        let stage = if hud.required_kills > 0 {
            format!("{}  [{}/{}]", hud.stage_name, hud.stage_kills, hud.required_kills)
        } else {
            hud.stage_name.to_string()
        };
        let sx = (self.width / 2).saturating_sub(stage.chars().count() as u16 / 2);
        self.put(sx, 0, Color::White, &stage)?;

        // Health on the right
        let health = format!("HP {}/{}", hud.health, hud.max_health);
        let hx = self
            .width
            .saturating_sub(health.chars().count() as u16 + 1);
        self.put(hx, 0, C_HUD_HEALTH, &health)?;

        // Weapon and effects on the bottom row
        let mut weapon = format!(
            "Weapon T{}  held {:.1}s",
            hud.weapon_tier,
            hud.fire_held_ms / 1000.0
        );
        if let Some(ms) = hud.next_tier_in_ms {
            weapon.push_str(&format!("  next {:.1}s", ms / 1000.0));
        }
        let bottom = self.height.saturating_sub(1);
        self.put(1, bottom, C_HUD_WEAPON, &weapon)?;

        let effects: Vec<String> = hud
            .effects
            .iter()
            .map(|e| format!("[{} {:>2}s]", e.kind.label(), e.seconds_left))
            .collect();
        let effects = effects.join(" ");
        if !effects.is_empty() {
            let ex = self
                .width
                .saturating_sub(effects.chars().count() as u16 + 1);
            self.put(ex, bottom, Color::Yellow, &effects)?;
        }

        // Boss bar on the first playfield row
        if let Some(bar) = &hud.boss {
            const BAR: usize = 20;
            let filled = if bar.max_health == 0 {
                0
            } else {
                (bar.health as usize * BAR).div_ceil(bar.max_health as usize)
            };
            let line = format!(
                "{} P{} [{}{}] {}/{}",
                bar.name,
                bar.phase,
                "█".repeat(filled.min(BAR)),
                "─".repeat(BAR - filled.min(BAR)),
                bar.health,
                bar.max_health
            );
            let bx = (self.width / 2).saturating_sub(line.chars().count() as u16 / 2);
            let color = if bar.phase >= 2 { Color::Red } else { boss_color(bar.kind) };
            self.put(bx, 2, color, &line)?;
        }
        Ok(())
    }

    // ── Overlays ──────────────────────────────────────────────────────────────

    fn draw_lines(&mut self, lines: &[(String, Color)]) -> io::Result<()> {
        let cx = self.width / 2;
        let start = (self.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (text, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(text.chars().count() as u16 / 2);
            self.put(col, start + i as u16, *color, text)?;
        }
        Ok(())
    }

    fn draw_menu(&mut self) -> io::Result<()> {
        let lines = [
            ("★  SKY  ASSAULT  ★".to_string(), Color::Cyan),
            (String::new(), C_HINT),
            ("Ten stages. Four bosses. One pilot.".to_string(), Color::White),
            (String::new(), C_HINT),
            ("Hold SPACE to charge your weapon:".to_string(), C_HINT),
            ("3s triple  5s five-way  10s full spread".to_string(), C_HINT),
            ("»  speed   ♥  heal   ★  firepower   ◎  shield".to_string(), Color::Yellow),
            (String::new(), C_HINT),
            ("← → ↑ ↓ / WASD : Move   SPACE : Fire   Z : Boost".to_string(), C_HINT),
            ("P : Pause   R : Restart   Q : Quit".to_string(), C_HINT),
            (String::new(), C_HINT),
            ("Press ENTER to start".to_string(), Color::Green),
        ];
        self.draw_lines(&lines)
    }

    fn draw_banner(&mut self, text: &[&str]) -> io::Result<()> {
        let lines: Vec<(String, Color)> = text
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), if i == 0 { Color::Yellow } else { C_HINT }))
            .collect();
        self.draw_lines(&lines)
    }

    fn draw_summary(&mut self, hud: &HudSnapshot, title: &str, color: Color) -> io::Result<()> {
        let lines = [
            ("╔════════════════════╗".to_string(), color),
            (format!("║{title:^20}║"), color),
            ("╚════════════════════╝".to_string(), color),
            (format!("Final Score: {:>7}", hud.score), Color::Yellow),
            (format!("Level reached: {:>5}", hud.level), Color::Green),
            (format!("Enemies defeated: {:>3}", hud.enemies_defeated), Color::White),
            (format!("Stage: {}", hud.stage), C_HINT),
            ("R - Play Again  Q - Quit".to_string(), Color::White),
        ];
        self.draw_lines(&lines)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn begin(&mut self, theme: Theme, shake: f32) {
        self.shake = shake;
        let result = self
            .out
            .queue(terminal::Clear(terminal::ClearType::All))
            .map(|_| ());
        self.keep(result);
        let result = self.draw_border(theme_color(theme));
        self.keep(result);
    }

    fn draw(&mut self, at: Vec2, sprite: Sprite<'_>) {
        let result = self.draw_sprite(at, sprite);
        self.keep(result);
    }
}

impl<W: Write> HudSink for TerminalSurface<W> {
    fn push(&mut self, snapshot: &HudSnapshot) {
        self.hud = Some(snapshot.clone());
    }
}
