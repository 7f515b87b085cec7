use leptos::prelude::*;

use crate::components::counter::AnimatedCounter;
use crate::components::digital_rain::DigitalRainCanvas;
use crate::components::neural_network::{NetworkVariant, NeuralNetworkCanvas};
use crate::components::particle_field::ParticleCanvas;
use crate::components::scroll::{Parallax, Reveal};

const STATS: &[(u64, &str, &str)] = &[
	(150, "+", "Projects delivered"),
	(99, "%", "Uptime achieved"),
	(24, "/7", "Monitoring"),
	(15, "+", "Years of experience"),
];

/// Landing page: hero network over digital rain, a page-height background
/// network, the particle field and stats that count up as they scroll in.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="page">
			<div class="page-background">
				<NeuralNetworkCanvas variant=NetworkVariant::Background />
			</div>
			<ParticleCanvas />

			<Parallax id="hero" class="hero">
				<DigitalRainCanvas />
				<NeuralNetworkCanvas variant=NetworkVariant::Hero class="hero-network" />
				<div class="hero-content">
					<h1>"Secure infrastructure, engineered"</h1>
					<p class="subtitle">"Networks, compliance and cloud for mission-critical teams."</p>
				</div>
			</Parallax>

			<section class="stats">
				{STATS
					.iter()
					.map(|&(target, suffix, label)| {
						view! {
							<Reveal class="stat">
								<AnimatedCounter target=target suffix=suffix />
								<p>{label}</p>
							</Reveal>
						}
					})
					.collect_view()}
			</section>
		</div>
	}
}
