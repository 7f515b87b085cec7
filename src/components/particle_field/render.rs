use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ParticleField;

pub fn render(field: &ParticleField, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, field.width, field.height);

	for p in &field.particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&format!("rgba(6, 182, 212, {})", p.opacity));
		ctx.fill();
		ctx.set_shadow_blur(10.0);
		ctx.set_shadow_color("rgba(6, 182, 212, 0.5)");
		ctx.fill();
		ctx.set_shadow_blur(0.0);
	}

	ctx.set_line_width(0.5);
	for link in field.links() {
		let (p, q) = (&field.particles[link.a], &field.particles[link.b]);
		let gradient = ctx.create_linear_gradient(p.x, p.y, q.x, q.y);
		let o = link.opacity;
		let _ = gradient.add_color_stop(0.0, &format!("rgba(6, 182, 212, {})", o));
		let _ = gradient.add_color_stop(0.5, &format!("rgba(168, 85, 247, {})", o * 0.5));
		let _ = gradient.add_color_stop(1.0, &format!("rgba(6, 182, 212, {})", o));
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.begin_path();
		ctx.move_to(p.x, p.y);
		ctx.line_to(q.x, q.y);
		ctx.stroke();
	}
}
