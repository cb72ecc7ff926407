//! Ambient decoration: matrix rain, fake system load, title glitch,
//! scanlines and the blinking cursor. Nothing here touches the transcript.

use crate::constants::{APP_TITLE, RAIN_GLYPHS, SPINNER_FRAMES};
use chrono::{DateTime, Local};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use std::time::{Duration, Instant};

fn random_glyph(rng: &mut StdRng) -> char {
    RAIN_GLYPHS[rng.random_range(0..RAIN_GLYPHS.len())]
}

#[derive(Debug, Clone)]
struct RainDrop {
    x: u16,
    // row of the leading glyph; negative while still above the area
    head: i32,
    speed: i32,
    glyphs: Vec<char>,
}

impl RainDrop {
    fn spawn(x: u16, height: u16, rng: &mut StdRng, above: bool) -> Self {
        let length = rng.random_range(4..=(height.max(5) as usize).min(18));
        let head = if above {
            -rng.random_range(0..=height as i32)
        } else {
            rng.random_range(0..=height as i32)
        };
        Self {
            x,
            head,
            speed: rng.random_range(1..=2),
            glyphs: (0..length).map(|_| random_glyph(rng)).collect(),
        }
    }

    fn length(&self) -> i32 {
        self.glyphs.len() as i32
    }
}

/// Falling columns of katakana. Sized lazily to whatever area it is drawn in.
#[derive(Debug)]
pub struct MatrixRain {
    density: f32,
    width: u16,
    height: u16,
    drops: Vec<RainDrop>,
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(density: f32, rng: StdRng) -> Self {
        Self {
            density: density.clamp(0.0, 1.0),
            width: 0,
            height: 0,
            drops: Vec::new(),
            rng,
        }
    }

    pub fn drop_count(&self) -> usize {
        self.drops.len()
    }

    /// Re-seeds the columns when the area changes size.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.drops.clear();
        if height == 0 {
            return;
        }
        for x in 0..width {
            if self.rng.random_bool(self.density as f64) {
                let drop = RainDrop::spawn(x, height, &mut self.rng, false);
                self.drops.push(drop);
            }
        }
    }

    pub fn step(&mut self) {
        let height = self.height as i32;
        for drop in self.drops.iter_mut() {
            drop.head += drop.speed;
            let flicker = self.rng.random_range(0..drop.glyphs.len());
            drop.glyphs[flicker] = random_glyph(&mut self.rng);
            if drop.head - drop.length() > height {
                *drop = RainDrop::spawn(drop.x, self.height, &mut self.rng, true);
            }
        }
    }
}

impl Widget for &MatrixRain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for drop in &self.drops {
            if drop.x >= area.width {
                continue;
            }
            for (i, glyph) in drop.glyphs.iter().enumerate() {
                let y = drop.head - i as i32;
                if y < 0 || y >= area.height as i32 {
                    continue;
                }
                let style = match i {
                    0 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    1..=2 => Style::default().fg(Color::LightGreen),
                    _ if i * 3 < drop.glyphs.len() * 2 => Style::default().fg(Color::Green),
                    _ => Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
                };
                if let Some(cell) = buf.cell_mut((area.x + drop.x, area.y + y as u16)) {
                    cell.set_char(*glyph).set_style(style);
                }
            }
        }
    }
}

/// Made-up load figures for the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemMetrics {
    pub cpu: u8,
    pub memory: u8,
    pub network_kbps: u32,
}

impl SystemMetrics {
    pub fn sample(rng: &mut StdRng) -> Self {
        Self {
            cpu: rng.random_range(12..=97),
            memory: rng.random_range(30..=90),
            network_kbps: rng.random_range(100..=9999),
        }
    }
}

/// Dims every other row of `area`.
pub fn apply_scanlines(buf: &mut Buffer, area: Rect) {
    for y in (area.y..area.y + area.height).filter(|y| (y - area.y) % 2 == 1) {
        buf.set_style(
            Rect::new(area.x, y, area.width, 1),
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}

pub fn clock_text(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Replaces roughly `ratio` of the non-space characters with rain glyphs.
pub fn glitch_text(text: &str, ratio: f64, rng: &mut StdRng) -> String {
    text.chars()
        .map(|c| {
            if !c.is_whitespace() && rng.random_bool(ratio) {
                random_glyph(rng)
            } else {
                c
            }
        })
        .collect()
}

/// Tick-driven state for all decorative elements.
#[derive(Debug)]
pub struct Effects {
    pub rain: MatrixRain,
    pub metrics: SystemMetrics,
    metrics_refresh: Duration,
    last_refresh: Instant,
    frame: usize,
    title: String,
    rng: StdRng,
}

impl Effects {
    pub fn new(rain_density: f32, metrics_refresh: Duration, seed: Option<u64>, now: Instant) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let rain_rng = StdRng::seed_from_u64(rng.random());
        Self {
            rain: MatrixRain::new(rain_density, rain_rng),
            metrics: SystemMetrics::sample(&mut rng),
            metrics_refresh,
            last_refresh: now,
            frame: 0,
            title: APP_TITLE.to_string(),
            rng,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.frame = self.frame.wrapping_add(1);
        self.rain.step();

        if now.duration_since(self.last_refresh) >= self.metrics_refresh {
            self.metrics = SystemMetrics::sample(&mut self.rng);
            self.last_refresh = now;
        }

        // glitch for a single frame now and then
        self.title = if self.rng.random_ratio(1, 15) {
            glitch_text(APP_TITLE, 0.2, &mut self.rng)
        } else {
            APP_TITLE.to_string()
        };
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cursor_visible(&self) -> bool {
        (self.frame / 5) % 2 == 0
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn test_rain_respects_density() {
        let mut empty = MatrixRain::new(0.0, rng());
        empty.resize(40, 20);
        assert_eq!(empty.drop_count(), 0);

        let mut full = MatrixRain::new(1.0, rng());
        full.resize(40, 20);
        assert_eq!(full.drop_count(), 40);
    }

    #[test]
    fn test_rain_stays_inside_area() {
        let mut rain = MatrixRain::new(1.0, rng());
        rain.resize(10, 6);
        for _ in 0..50 {
            rain.step();
        }

        let area = Rect::new(2, 3, 10, 6);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 12));
        (&rain).render(area, &mut buf);

        for y in 0..12 {
            for x in 0..20 {
                let inside = area.x <= x && x < area.right() && area.y <= y && y < area.bottom();
                if !inside {
                    assert_eq!(buf[(x, y)].symbol(), " ", "glyph leaked at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_metrics_refresh_on_interval() {
        let start = Instant::now();
        let mut effects = Effects::new(0.5, Duration::from_millis(2000), Some(5), start);
        let before = effects.last_refresh;

        effects.on_tick(start + Duration::from_millis(100));
        assert_eq!(effects.last_refresh, before);

        effects.on_tick(start + Duration::from_millis(2000));
        assert_eq!(effects.last_refresh, start + Duration::from_millis(2000));
    }

    #[test]
    fn test_metrics_ranges() {
        let mut r = rng();
        for _ in 0..100 {
            let m = SystemMetrics::sample(&mut r);
            assert!((12..=97).contains(&m.cpu));
            assert!((30..=90).contains(&m.memory));
            assert!((100..=9999).contains(&m.network_kbps));
        }
    }

    #[test]
    fn test_glitch_keeps_shape() {
        let mut r = rng();
        let out = glitch_text("NEURAL INTERFACE", 1.0, &mut r);
        assert_eq!(out.chars().count(), "NEURAL INTERFACE".chars().count());
        assert_eq!(out.chars().nth(6), Some(' '));
        assert_eq!(glitch_text("NEURAL", 0.0, &mut r), "NEURAL");
    }

    #[test]
    fn test_scanlines_dim_odd_rows() {
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        apply_scanlines(&mut buf, area);

        assert!(!buf[(0, 0)].modifier.contains(Modifier::DIM));
        assert!(buf[(0, 1)].modifier.contains(Modifier::DIM));
        assert!(!buf[(3, 2)].modifier.contains(Modifier::DIM));
        assert!(buf[(3, 3)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_cursor_blinks() {
        let start = Instant::now();
        let mut effects = Effects::new(0.0, Duration::from_secs(60), Some(1), start);
        assert!(effects.cursor_visible());
        for _ in 0..5 {
            effects.on_tick(start);
        }
        assert!(!effects.cursor_visible());
    }
}
