use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
	pub count: usize,
	pub link_distance: f64,
	pub mouse_radius: f64,
	pub mouse_force: f64,
	pub damping: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			count: 80,
			link_distance: 150.0,
			mouse_radius: 150.0,
			mouse_force: 0.2,
			damping: 0.99,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub opacity: f64,
}

impl Particle {
	fn random(width: f64, height: f64, rng: &mut impl Rng) -> Self {
		Self {
			x: rng.gen_range(0.0..=width.max(0.0)),
			y: rng.gen_range(0.0..=height.max(0.0)),
			vx: rng.gen_range(-0.25..0.25),
			vy: rng.gen_range(-0.25..0.25),
			radius: rng.gen_range(1.0..3.0),
			opacity: rng.gen_range(0.3..0.8),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub opacity: f64,
}

pub struct ParticleField {
	pub config: ParticleConfig,
	pub particles: Vec<Particle>,
	pub width: f64,
	pub height: f64,
	pub mouse: Option<(f64, f64)>,
}

impl ParticleField {
	pub fn new(config: ParticleConfig, width: f64, height: f64, rng: &mut impl Rng) -> Self {
		let particles = (0..config.count)
			.map(|_| Particle::random(width, height, rng))
			.collect();
		Self {
			config,
			particles,
			width,
			height,
			mouse: None,
		}
	}

	/// Particles keep their positions and drift back in by bouncing.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn update(&mut self) {
		let ParticleConfig {
			mouse_radius,
			mouse_force,
			damping,
			..
		} = self.config;
		for p in &mut self.particles {
			if p.x < 0.0 || p.x > self.width {
				p.vx = -p.vx;
			}
			if p.y < 0.0 || p.y > self.height {
				p.vy = -p.vy;
			}
			p.x += p.vx;
			p.y += p.vy;

			if let Some((mx, my)) = self.mouse {
				let (dx, dy) = (mx - p.x, my - p.y);
				let distance = (dx * dx + dy * dy).sqrt();
				if distance < mouse_radius {
					let force = (mouse_radius - distance) / mouse_radius;
					let angle = dy.atan2(dx);
					p.vx -= angle.cos() * force * mouse_force;
					p.vy -= angle.sin() * force * mouse_force;
				}
			}

			p.vx *= damping;
			p.vy *= damping;
		}
	}

	/// Pairs closer than the link distance, fading out with distance.
	pub fn links(&self) -> Vec<Link> {
		let max = self.config.link_distance;
		let mut links = Vec::new();
		for (a, p) in self.particles.iter().enumerate() {
			for (b, q) in self.particles.iter().enumerate().skip(a + 1) {
				let distance = ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();
				if distance < max {
					links.push(Link {
						a,
						b,
						opacity: (1.0 - distance / max) * 0.3,
					});
				}
			}
		}
		links
	}
}
