use web_sys::CanvasRenderingContext2d;

use super::state::{DigitalRain, Glyph};

/// Paint one step over a translucent fill so older glyphs fade into a trail.
pub fn render(rain: &DigitalRain, frame: &[Glyph], ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.05)");
	ctx.fill_rect(0.0, 0.0, rain.width, rain.height);
	ctx.set_font(&format!("{}px monospace", rain.config.font_size));

	let mut buf = [0u8; 4];
	for glyph in frame {
		ctx.set_fill_style_str(&format!("rgba(6, 182, 212, {})", glyph.alpha));
		let _ = ctx.fill_text(glyph.ch.encode_utf8(&mut buf), glyph.x, glyph.y);
	}
}
