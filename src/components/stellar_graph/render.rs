use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::StellarGraphState;

const BACKGROUND: &str = "#0b1120";
const EDGE_COLOR: &str = "#475569";
const EDGE_SELECTED_COLOR: &str = "#8b5cf6";
const LABEL_COLOR: &str = "#cbd5e1";
const LABEL_SELECTED_COLOR: &str = "#ffffff";

pub fn render(state: &StellarGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.set_global_alpha(1.0);
}

fn draw_edges(state: &StellarGraphState, ctx: &CanvasRenderingContext2d) {
	let paths = state.sim.edge_paths(state.curvature);
	for (&(source, target), path) in state.sim.edges().iter().zip(paths) {
		let (color, width, alpha) = if state.edge_touches_selection(source, target) {
			(EDGE_SELECTED_COLOR, 2.0, 1.0)
		} else {
			(EDGE_COLOR, 1.0, 0.4)
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(path.start.x, path.start.y);
		ctx.quadratic_curve_to(path.control.x, path.control.y, path.end.x, path.end.y);
		ctx.stroke();

		// A small marker rides along selected connections.
		if alpha >= 1.0 {
			let mid = path.point_at(0.5);
			ctx.set_fill_style_str(EDGE_SELECTED_COLOR);
			ctx.begin_path();
			let _ = ctx.arc(mid.x, mid.y, 2.0, 0.0, 2.0 * PI);
			ctx.fill();
		}
	}
}

fn draw_nodes(state: &StellarGraphState, ctx: &CanvasRenderingContext2d) {
	let has_selection = state.has_selection();
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");

	let readout = state.sim.positions().zip(state.sim.nodes());
	for (idx, (pos, node)) in readout.enumerate() {
		let (x, y, radius) = (pos.x, pos.y, node.radius());
		let is_selected = state.is_selected(idx);
		let is_connected = state.is_connected_to_selection(idx);
		let is_hovered = state.hovered == Some(idx);

		let alpha = match (has_selection, is_selected || is_connected) {
			(false, _) => 0.7,
			(true, true) => 1.0,
			(true, false) => 0.3,
		};

		ctx.set_global_alpha(if is_hovered { 1.0 } else { alpha });
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data().color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if is_selected {
			ctx.set_stroke_style_str("#ffffff");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		if !has_selection || is_selected || is_connected {
			ctx.set_fill_style_str(if is_selected {
				LABEL_SELECTED_COLOR
			} else {
				LABEL_COLOR
			});
			ctx.set_font(if is_selected {
				"bold 12px sans-serif"
			} else {
				"12px sans-serif"
			});
			let _ = ctx.fill_text(&node.data().name, x, y - radius - 5.0);
		}
	}
}
