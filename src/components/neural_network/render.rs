use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::surface::Scene;

pub const NODE_RADIUS: f64 = 3.0;
const GLOW_RADIUS: f64 = 14.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, scene.region.width, scene.region.height);
	draw_edges(scene, ctx);
	draw_nodes(scene, ctx);
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	// idle edges first so active ones paint on top
	for pass_active in [false, true] {
		for edge in scene.edges.iter().filter(|e| e.active == pass_active) {
			let Some((p1, p2)) = scene.endpoints(edge) else {
				continue;
			};
			if p1.distance(p2) < 0.001 {
				continue;
			}
			let (alpha, width) = if edge.active { (0.85, 1.6) } else { (0.12, 0.6) };
			ctx.set_stroke_style_str(&format!("rgba(6, 182, 212, {})", alpha));
			ctx.set_line_width(width);
			if edge.active {
				ctx.set_shadow_blur(8.0);
				ctx.set_shadow_color("rgba(6, 182, 212, 0.6)");
			}
			ctx.begin_path();
			ctx.move_to(p1.x, p1.y);
			ctx.line_to(p2.x, p2.y);
			ctx.stroke();
			ctx.set_shadow_blur(0.0);
		}
	}
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for node in &scene.nodes {
		let (x, y) = (node.position.x, node.position.y);
		let t = ease_out_cubic(node.flash_t);

		if node.glow || t > 0.01 {
			let strength = if node.glow { 1.0 } else { t };
			let glow_radius = GLOW_RADIUS * (0.6 + 0.4 * strength);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, NODE_RADIUS * 0.3, x, y, glow_radius)
			{
				let alpha = 0.45 * strength;
				let _ = gradient.add_color_stop(0.0, &format!("rgba(103, 232, 249, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(168, 85, 247, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(6, 182, 212, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		let (alpha, radius) = if node.glow {
			(1.0, NODE_RADIUS * 1.5)
		} else {
			(0.45 + 0.4 * t, NODE_RADIUS * (1.0 + 0.3 * t))
		};
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&format!("rgba(6, 182, 212, {})", alpha));
		ctx.fill();
	}
}
