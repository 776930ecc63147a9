//! SVG output for separations and printable tiles.
//!
//! Dots stay in their rotated sampling frame; each layer group carries the
//! transform back to image space, so the tile SVGs only change the viewBox.

use std::fmt::Write;

use halftone_core::{DotShape, HalftoneShape, RotationSolution, Separation, Tile};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stroke colour of the tile outlines drawn over previews
pub const TILE_OUTLINE_STROKE: &str = "red";

/// Full-image SVG with every layer stacked in channel order.
///
/// `background` fills the whole canvas first. `outlines` draws the tile
/// rectangles on top.
pub fn halftone_svg(
    separation: &Separation,
    background: Option<&str>,
    outlines: Option<&[Tile]>,
) -> String {
    let (w, h) = (separation.width as f64, separation.height as f64);
    let mut out = open_svg(w, h, 0.0, 0.0, w, h);

    if let Some(fill) = background {
        let _ = writeln!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            num(w),
            num(h),
            escape(fill)
        );
    }

    for layer in &separation.layers {
        write_layer(
            &mut out,
            &layer.id,
            &layer.fill,
            &layer.rotation,
            &layer.shapes,
        );
    }

    if let Some(tiles) = outlines {
        write_outlines(&mut out, tiles);
    }

    out.push_str("</svg>\n");
    out
}

/// SVG for one layer of one tile, or `None` if the tile has no layer with
/// that id.
///
/// The document is sized to the tile and its viewBox is the tile's pixel
/// rectangle in image space.
pub fn tile_svg(tile: &Tile, layer_id: &str) -> Option<String> {
    let layer = tile.layer(layer_id)?;
    let b = tile.bounds;
    let mut out = open_svg(b.width, b.height, b.x, b.y, b.width, b.height);
    write_layer(
        &mut out,
        &layer.id,
        &layer.fill,
        &layer.rotation,
        &layer.shapes,
    );
    out.push_str("</svg>\n");
    Some(out)
}

/// File name of one tile SVG
pub fn tile_file_name(layer_id: &str, column: u32, row: u32) -> String {
    format!("{layer_id}-chop-{column}-{row}.svg")
}

fn open_svg(width: f64, height: f64, vx: f64, vy: f64, vw: f64, vh: f64) -> String {
    format!(
        r#"<svg xmlns="{SVG_NS}" version="1.1" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        num(width),
        num(height),
        num(vx),
        num(vy),
        num(vw),
        num(vh),
    ) + "\n"
}

fn write_layer(
    out: &mut String,
    id: &str,
    fill: &str,
    rotation: &RotationSolution,
    shapes: &[HalftoneShape],
) {
    let _ = writeln!(
        out,
        r#"<g id="layer-{id}" fill="{}" transform="rotate({}) translate({} {})">"#,
        escape(fill),
        num(-rotation.angle_degrees),
        num(-rotation.origin_x),
        num(-rotation.origin_y),
    );
    for shape in shapes {
        match shape.shape {
            DotShape::Circle => {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                    num(shape.x),
                    num(shape.y),
                    num(shape.size)
                );
            }
            DotShape::Square => {
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
                    num(shape.x),
                    num(shape.y),
                    num(shape.size),
                    num(shape.size)
                );
            }
        }
    }
    out.push_str("</g>\n");
}

fn write_outlines(out: &mut String, tiles: &[Tile]) {
    let _ = writeln!(
        out,
        r#"<g id="tiles" fill="none" stroke="{TILE_OUTLINE_STROKE}" stroke-width="1">"#
    );
    for tile in tiles {
        let b = tile.bounds;
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
            num(b.x),
            num(b.y),
            num(b.width),
            num(b.height)
        );
    }
    out.push_str("</g>\n");
}

/// Four decimals, trailing zeros dropped.
fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
