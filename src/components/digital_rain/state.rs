use rand::Rng;

pub const GLYPHS: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン\
	0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$%^&*()";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainConfig {
	pub font_size: f64,
	/// Rows a drop falls per step.
	pub fall_rate: f64,
	pub reset_chance: f64,
	pub step_ms: f64,
}

impl Default for RainConfig {
	fn default() -> Self {
		Self {
			font_size: 14.0,
			fall_rate: 0.3,
			reset_chance: 0.005,
			step_ms: 100.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
	pub ch: char,
	pub x: f64,
	pub y: f64,
	pub alpha: f64,
}

pub struct DigitalRain {
	pub config: RainConfig,
	pub width: f64,
	pub height: f64,
	glyphs: Vec<char>,
	drops: Vec<f64>,
	last_step: Option<f64>,
}

impl DigitalRain {
	pub fn new(config: RainConfig, width: f64, height: f64, rng: &mut impl Rng) -> Self {
		let mut rain = Self {
			config,
			width,
			height,
			glyphs: GLYPHS.chars().collect(),
			drops: Vec::new(),
			last_step: None,
		};
		rain.resize(width, height, rng);
		rain
	}

	/// One drop per font-width column, each starting somewhere above the top edge.
	pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Rng) {
		self.width = width;
		self.height = height;
		let columns = if self.config.font_size > 0.0 {
			(width.max(0.0) / self.config.font_size).floor() as usize
		} else {
			0
		};
		self.drops = (0..columns).map(|_| rng.gen_range(-100.0..0.0)).collect();
	}

	#[cfg(test)]
	pub fn drops(&self) -> &[f64] {
		&self.drops
	}

	/// Step if `step_ms` has passed since the last step.
	pub fn advance(&mut self, now: f64, rng: &mut impl Rng) -> Option<Vec<Glyph>> {
		if let Some(last) = self.last_step {
			if now - last < self.config.step_ms {
				return None;
			}
		}
		self.last_step = Some(now);
		Some(self.step(rng))
	}

	pub fn step(&mut self, rng: &mut impl Rng) -> Vec<Glyph> {
		let RainConfig {
			font_size,
			fall_rate,
			reset_chance,
			..
		} = self.config;
		let mut frame = Vec::with_capacity(self.drops.len());
		for (i, drop) in self.drops.iter_mut().enumerate() {
			frame.push(Glyph {
				ch: self.glyphs[rng.gen_range(0..self.glyphs.len())],
				x: i as f64 * font_size,
				y: *drop * font_size,
				alpha: rng.gen_range(0.2..1.0),
			});
			*drop += fall_rate;
			if *drop * font_size > self.height || rng.gen_bool(reset_chance.clamp(0.0, 1.0)) {
				*drop = rng.gen_range(-20.0..0.0);
			}
		}
		frame
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn one_drop_per_column_above_the_top() {
		let mut rng = SmallRng::seed_from_u64(1);
		let rain = DigitalRain::new(RainConfig::default(), 700.0, 400.0, &mut rng);
		assert_eq!(rain.drops().len(), 50);
		assert!(rain.drops().iter().all(|&d| (-100.0..0.0).contains(&d)));
	}

	#[test]
	fn drops_reset_after_leaving_region() {
		let mut rng = SmallRng::seed_from_u64(2);
		let config = RainConfig {
			reset_chance: 0.0,
			..Default::default()
		};
		let mut rain = DigitalRain::new(config, 140.0, 28.0, &mut rng);
		let mut reset_seen = false;
		for _ in 0..2000 {
			let before = rain.drops().to_vec();
			rain.step(&mut rng);
			for (b, a) in before.iter().zip(rain.drops()) {
				if *a < *b {
					reset_seen = true;
					assert!((-20.0..0.0).contains(a));
					assert!((b + 0.3) * 14.0 > 28.0);
				}
			}
			assert!(rain.drops().iter().all(|&d| d * 14.0 <= 28.0 + 0.3 * 14.0));
		}
		assert!(reset_seen);
	}

	#[test]
	fn glyph_frame_covers_columns() {
		let mut rng = SmallRng::seed_from_u64(3);
		let mut rain = DigitalRain::new(RainConfig::default(), 280.0, 300.0, &mut rng);
		let frame = rain.step(&mut rng);
		assert_eq!(frame.len(), 20);
		for (i, g) in frame.iter().enumerate() {
			assert_eq!(g.x, i as f64 * 14.0);
			assert!((0.2..1.0).contains(&g.alpha));
			assert!(GLYPHS.contains(g.ch));
		}
	}

	#[test]
	fn steps_are_throttled() {
		let mut rng = SmallRng::seed_from_u64(4);
		let mut rain = DigitalRain::new(RainConfig::default(), 140.0, 100.0, &mut rng);
		assert!(rain.advance(0.0, &mut rng).is_some());
		assert!(rain.advance(50.0, &mut rng).is_none());
		assert!(rain.advance(99.0, &mut rng).is_none());
		assert!(rain.advance(100.0, &mut rng).is_some());
	}

	#[test]
	fn zero_width_has_no_columns() {
		let mut rng = SmallRng::seed_from_u64(5);
		let mut rain = DigitalRain::new(RainConfig::default(), 0.0, 100.0, &mut rng);
		assert!(rain.step(&mut rng).is_empty());
	}
}
