//! DXF export of laid-out plans.
//!
//! Writes ASCII DXF R12 (AC1009), which every CAD package reads. Units are
//! metres. The TABLES section declares the linetypes and the full layer
//! table from [`crate::layers`], so empty layers exist in the file too.
//!
//! - Polygons: closed `POLYLINE` / `VERTEX` / `SEQEND`
//! - Lines: `LINE`
//! - Labels: one centred `TEXT` per text line, stacked around the anchor

use std::fmt::Display;
use std::io::{self, Write};

use crate::drawing::Primitive;
use crate::geometry::Point;
use crate::layers::{LineStyle, LAYERS};

/// Distance between stacked label lines, in text heights
const LINE_SPACING: f64 = 1.5;

/// Write a complete DXF document for `primitives`.
pub fn write_dxf(writer: &mut impl Write, primitives: &[Primitive]) -> io::Result<()> {
    write_header(writer)?;
    write_tables(writer)?;

    section(writer, "ENTITIES")?;
    for primitive in primitives {
        match primitive {
            Primitive::Polygon { layer, polygon } => write_polyline(writer, layer.name, polygon.points())?,
            Primitive::Line { layer, start, end } => write_line(writer, layer.name, *start, *end)?,
            Primitive::Label {
                layer,
                position,
                text,
                char_height,
            } => write_label(writer, layer.name, *position, text, *char_height)?,
        }
    }
    end_section(writer)?;

    pair(writer, 0, "EOF")?;
    writer.flush()
}

/// Render a DXF document to a string
pub fn to_dxf_string(primitives: &[Primitive]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_dxf(&mut buf, primitives);
    String::from_utf8_lossy(&buf).into_owned()
}

fn pair(writer: &mut impl Write, code: u16, value: impl Display) -> io::Result<()> {
    writeln!(writer, "{:>3}", code)?;
    writeln!(writer, "{}", value)
}

fn coord(writer: &mut impl Write, base: u16, p: Point) -> io::Result<()> {
    pair(writer, base, format_args!("{:.6}", p.x))?;
    pair(writer, base + 10, format_args!("{:.6}", p.y))?;
    pair(writer, base + 20, "0.0")
}

fn section(writer: &mut impl Write, name: &str) -> io::Result<()> {
    pair(writer, 0, "SECTION")?;
    pair(writer, 2, name)
}

fn end_section(writer: &mut impl Write) -> io::Result<()> {
    pair(writer, 0, "ENDSEC")
}

fn write_header(writer: &mut impl Write) -> io::Result<()> {
    section(writer, "HEADER")?;
    pair(writer, 9, "$ACADVER")?;
    pair(writer, 1, "AC1009")?;
    pair(writer, 9, "$INSUNITS")?;
    pair(writer, 70, 6)?; // metres
    pair(writer, 9, "$MEASUREMENT")?;
    pair(writer, 70, 1)?; // metric
    end_section(writer)
}

fn write_tables(writer: &mut impl Write) -> io::Result<()> {
    section(writer, "TABLES")?;

    pair(writer, 0, "TABLE")?;
    pair(writer, 2, "LTYPE")?;
    pair(writer, 70, LineStyle::ALL.len())?;
    for style in LineStyle::ALL {
        let pattern = style.pattern();
        pair(writer, 0, "LTYPE")?;
        pair(writer, 2, style.dxf_name())?;
        pair(writer, 70, 0)?;
        pair(writer, 3, style.description())?;
        pair(writer, 72, 65)?;
        pair(writer, 73, pattern.len())?;
        pair(writer, 40, format_args!("{:.6}", pattern.iter().map(|d| d.abs()).sum::<f64>()))?;
        for dash in pattern {
            pair(writer, 49, format_args!("{:.6}", dash))?;
        }
    }
    pair(writer, 0, "ENDTAB")?;

    pair(writer, 0, "TABLE")?;
    pair(writer, 2, "LAYER")?;
    pair(writer, 70, LAYERS.len())?;
    for layer in LAYERS {
        pair(writer, 0, "LAYER")?;
        pair(writer, 2, layer.name)?;
        pair(writer, 70, 0)?;
        pair(writer, 62, layer.color)?;
        pair(writer, 6, layer.line_style.dxf_name())?;
    }
    pair(writer, 0, "ENDTAB")?;

    end_section(writer)
}

fn write_polyline(writer: &mut impl Write, layer: &str, points: &[Point]) -> io::Result<()> {
    pair(writer, 0, "POLYLINE")?;
    pair(writer, 8, layer)?;
    pair(writer, 66, 1)?; // vertices follow
    coord(writer, 10, Point::default())?;
    pair(writer, 70, 1)?; // closed
    for p in points {
        pair(writer, 0, "VERTEX")?;
        pair(writer, 8, layer)?;
        coord(writer, 10, *p)?;
    }
    pair(writer, 0, "SEQEND")?;
    pair(writer, 8, layer)
}

fn write_line(writer: &mut impl Write, layer: &str, start: Point, end: Point) -> io::Result<()> {
    pair(writer, 0, "LINE")?;
    pair(writer, 8, layer)?;
    coord(writer, 10, start)?;
    coord(writer, 11, end)
}

fn write_label(writer: &mut impl Write, layer: &str, anchor: Point, text: &str, height: f64) -> io::Result<()> {
    let lines: Vec<&str> = text.lines().collect();
    let spacing = height * LINE_SPACING;
    let top = (lines.len().saturating_sub(1)) as f64 / 2.0 * spacing;

    for (i, line) in lines.iter().enumerate() {
        let p = Point::new(anchor.x, anchor.y + top - i as f64 * spacing);
        pair(writer, 0, "TEXT")?;
        pair(writer, 8, layer)?;
        coord(writer, 10, p)?;
        pair(writer, 40, format_args!("{:.6}", height))?;
        pair(writer, 1, line)?;
        pair(writer, 72, 1)?; // centre
        pair(writer, 73, 2)?; // middle
        coord(writer, 11, p)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{layout, LayoutOptions};
    use crate::plan::Plan;

    fn salon_dxf() -> String {
        let plan = Plan::from_json(
            r#"{"terrain":{"width":15,"height":25},
                "rooms":[{"name":"Salon","x":0,"y":0,"width":5,"height":4}],
                "doors":[{"x":2,"y":0}]}"#,
        )
        .unwrap();
        to_dxf_string(&layout(&plan, &LayoutOptions::default()))
    }

    fn count(haystack: &str, entity: &str) -> usize {
        haystack.lines().filter(|l| *l == entity).count()
    }

    #[test]
    fn test_document_frame() {
        let dxf = salon_dxf();
        assert!(dxf.starts_with("  0\nSECTION\n  2\nHEADER\n"));
        assert!(dxf.contains("AC1009"));
        assert!(dxf.ends_with("  0\nEOF\n"));
        assert_eq!(count(&dxf, "ENDSEC"), 3);
    }

    #[test]
    fn test_layer_table_lists_all_layers() {
        let dxf = salon_dxf();
        assert_eq!(count(&dxf, "LAYER"), 1 + LAYERS.len());
        for layer in LAYERS {
            assert!(dxf.contains(&format!("  2\n{}\n", layer.name)), "missing {}", layer.name);
        }
        assert!(dxf.contains("  2\nTERRAIN\n 70\n0\n 62\n30\n  6\nDASHDOT\n"));
    }

    #[test]
    fn test_entities() {
        let dxf = salon_dxf();
        // terrain + outer + inner
        assert_eq!(count(&dxf, "POLYLINE"), 3);
        assert_eq!(count(&dxf, "VERTEX"), 12);
        assert_eq!(count(&dxf, "SEQEND"), 3);
        assert_eq!(count(&dxf, "LINE"), 1);
        // two-line label
        assert_eq!(count(&dxf, "TEXT"), 2);
        assert!(dxf.contains("  1\nSalon\n"));
        assert!(dxf.contains("  1\n16.6 m²\n"));
    }

    #[test]
    fn test_label_lines_are_stacked_around_anchor() {
        let mut buf = Vec::new();
        write_label(&mut buf, "TEXTE", Point::new(2.5, 2.0), "A\nB", 0.2).unwrap();
        let out = String::from_utf8(buf).unwrap();
        // spacing 0.3, first line 0.15 above, second 0.15 below
        assert!(out.contains(" 20\n2.150000\n"));
        assert!(out.contains(" 20\n1.850000\n"));
    }

    #[test]
    fn test_empty_drawing_still_has_tables() {
        let dxf = to_dxf_string(&[]);
        assert!(dxf.contains("TABLES"));
        assert_eq!(count(&dxf, "POLYLINE"), 0);
    }
}
