//! SVG rendering of harmonic levels.
//!
//! Every level of a table becomes one path, shifted right by 1.5 cycles
//! per level, with grey reference lines at -1, 0 and +1.

// Based on GPL-3.0-licensed code (c) 2013-2017 by Matt Tytel

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::table::WaveTable;

use super::WaveformSink;

/// Horizontal distance between consecutive levels, in cycles.
pub const LEVEL_SPACING: f64 = 1.5;

const HEADER: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg
   xmlns:svg="http://www.w3.org/2000/svg"
   xmlns="http://www.w3.org/2000/svg"
   xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
   version="1.1"
   width="744.09448"
   height="1052.3622">
  <defs>
    <marker
       orient="auto"
       refY="0.0"
       refX="0.0"
       id="Arrow1Mend"
       style="overflow:visible;">
      <path
         d="M 0.0,0.0 L 5.0,-5.0 L -12.5,0.0 L 5.0,5.0 L 0.0,0.0 z "
         style="fill-rule:evenodd;stroke:#000000;stroke-width:1.0pt;stroke-opacity:0.7;fill-opacity:0.0;"
         transform="scale(0.4) rotate(180) translate(10,0)" />
    </marker>
  </defs>
"##;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Colour {
    red: u8,
    green: u8,
    blue: u8,
    opacity: f64,
}

impl Colour {
    fn new(rgb: u32, opacity: f64) -> Self {
        Self {
            red: ((rgb & 0xff0000) >> 16) as u8,
            green: ((rgb & 0x00ff00) >> 8) as u8,
            blue: (rgb & 0x0000ff) as u8,
            opacity,
        }
    }

    fn style(&self, kind: &str) -> String {
        format!(
            "{kind}:rgb({},{},{});{kind}-opacity:{}",
            self.red, self.green, self.blue, self.opacity
        )
    }
}

/// Streaming SVG writer. Call [`SvgDocument::finish`] to close open
/// groups and the document.
#[derive(Debug)]
pub struct SvgDocument<W: Write> {
    out: W,
    scale: f64,
    flip: f64,
    clip: Option<f64>,
    layer: usize,
    level: usize,
    stroke: Colour,
    stroke_width: f64,
    arrow: bool,
    fill: Colour,
}

impl<W: Write> SvgDocument<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        out.write_all(HEADER.as_bytes())?;
        Ok(Self {
            out,
            scale: 1.0,
            flip: 1.0,
            clip: None,
            layer: 1,
            level: 0,
            stroke: Colour::new(0x000000, 1.0),
            stroke_width: 2.0,
            arrow: false,
            fill: Colour::new(0x000000, 0.0),
        })
    }

    /// Multiplies all coordinates by `scale`, negating y if `flip_y`.
    pub fn set_scale(&mut self, scale: f64, flip_y: bool) {
        self.scale = scale;
        self.flip = if flip_y { -1.0 } else { 1.0 };
    }

    /// Clamps scaled coordinates to `±limit`. `None` disables clipping.
    pub fn set_clip(&mut self, limit: Option<f64>) {
        self.clip = limit.filter(|l| *l > 0.0);
    }

    pub fn set_stroke(&mut self, rgb: u32, opacity: f64, width: f64) {
        self.stroke = Colour::new(rgb, opacity);
        self.stroke_width = width;
    }

    /// Puts an arrow head at the end of subsequent lines and paths.
    pub fn set_arrow(&mut self, arrow: bool) {
        self.arrow = arrow;
    }

    pub fn set_fill(&mut self, rgb: u32, opacity: f64) {
        self.fill = Colour::new(rgb, opacity);
    }

    /// Closes any open groups and starts a new top-level layer.
    pub fn open_layer(&mut self, name: &str) -> io::Result<()> {
        while self.level > 0 {
            self.close_level()?;
        }
        writeln!(
            self.out,
            "  <g id=\"layer{}\" inkscape:groupmode=\"layer\" inkscape:label=\"{name}\">",
            self.layer
        )?;
        self.layer += 1;
        self.level += 1;
        Ok(())
    }

    pub fn open_group(&mut self, id: &str) -> io::Result<()> {
        writeln!(self.out, "  <g id=\"{id}\">")?;
        self.level += 1;
        Ok(())
    }

    pub fn close_level(&mut self) -> io::Result<()> {
        if self.level > 0 {
            writeln!(self.out, "  </g>")?;
            self.level -= 1;
        }
        Ok(())
    }

    fn clip_value(&self, v: f64) -> f64 {
        match self.clip {
            Some(limit) => v.clamp(-limit, limit),
            None => v,
        }
    }

    fn prepare(&self, point: Point) -> Point {
        Point::new(
            self.clip_value(point.x * self.scale),
            self.clip_value(point.y * self.scale * self.flip),
        )
    }

    fn arrow_style(&self) -> &'static str {
        if self.arrow {
            "marker-end:url(#Arrow1Mend)"
        } else {
            ""
        }
    }

    pub fn write_line(&mut self, id: &str, start: Point, end: Point) -> io::Result<()> {
        let start = self.prepare(start);
        let end = self.prepare(end);
        writeln!(
            self.out,
            "    <line id=\"{id}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"\n      style=\"{};stroke-width:{};{}\"/>",
            start.x,
            start.y,
            end.x,
            end.y,
            self.stroke.style("stroke"),
            self.stroke_width,
            self.arrow_style()
        )
    }

    pub fn write_path(&mut self, id: &str, points: &[Point]) -> io::Result<()> {
        let mut d = String::from("M ");
        for point in points {
            let p = self.prepare(*point);
            // Writing into a String cannot fail.
            let _ = write!(d, "{},{} ", p.x, p.y);
        }
        writeln!(
            self.out,
            "    <path id=\"{id}\" d=\"{d}\"\n      style=\"{};stroke-width:{};{};{}\"/>",
            self.stroke.style("stroke"),
            self.stroke_width,
            self.fill.style("fill"),
            self.arrow_style()
        )
    }

    /// Polyline connector between the elements with ids `from` and `to`.
    /// Inkscape routes it when the document is opened.
    pub fn write_connector(&mut self, id: &str, from: &str, to: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "    <path id=\"{id}\" d=\"M 0,0 0,0\"\n      style=\"{};stroke-width:{};{}\"\n      inkscape:connector-type=\"polyline\"\n      inkscape:connector-curvature=\"0\"\n      inkscape:connection-start=\"#{from}\"\n      inkscape:connection-start-point=\"d4\"\n      inkscape:connection-end=\"#{to}\"\n      inkscape:connection-end-point=\"d4\" />",
            self.stroke.style("stroke"),
            self.stroke_width,
            self.arrow_style()
        )
    }

    pub fn write_circle(&mut self, id: &str, centre: Point, radius: f64) -> io::Result<()> {
        let centre = self.prepare(centre);
        let mut radius = radius * self.scale;
        if let Some(limit) = self.clip {
            if radius.abs() > limit {
                radius = limit;
            }
        }
        writeln!(
            self.out,
            "    <circle id=\"{id}\" cx=\"{}\" cy=\"{}\" r=\"{radius}\"\n      style=\"{};stroke-width:{};{}\"/>",
            centre.x,
            centre.y,
            self.stroke.style("stroke"),
            self.stroke_width,
            self.fill.style("fill")
        )
    }

    /// Closes open groups and the root element, returning the writer.
    pub fn finish(mut self) -> io::Result<W> {
        while self.level > 0 {
            self.close_level()?;
        }
        writeln!(self.out, "</svg>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Renders `table` into an SVG document written to `out`.
pub fn render_table<W: Write>(out: W, table: &WaveTable) -> io::Result<W> {
    let mut svg = SvgDocument::new(out)?;
    svg.set_scale(100.0, true);
    svg.set_stroke(0x000000, 1.0, 0.5);
    svg.set_fill(0x000000, 0.0);

    let size = table.size();
    for level in 0..table.num_levels() {
        let offset = LEVEL_SPACING * level as f64;
        let points: Vec<Point> = table
            .samples(level)
            .iter()
            .enumerate()
            .map(|(i, &y)| Point::new(i as f64 / size as f64 + offset, y as f64))
            .collect();
        svg.write_path(&format!("h{level}"), &points)?;
    }

    let width = LEVEL_SPACING * table.num_levels() as f64;
    svg.set_stroke(0x999999, 1.0, 1.0);
    svg.write_line("plus_one", Point::new(0.0, 1.0), Point::new(width, 1.0))?;
    svg.write_line("zero", Point::new(0.0, 0.0), Point::new(width, 0.0))?;
    svg.write_line("minus_one", Point::new(0.0, -1.0), Point::new(width, -1.0))?;

    svg.finish()
}

/// Renders `table` to a file at `path`.
pub fn write_table(path: impl AsRef<Path>, table: &WaveTable) -> io::Result<()> {
    let file = File::create(path)?;
    render_table(BufWriter::new(file), table)?;
    Ok(())
}

/// Writes each exported table to `<directory>/<name>.svg`.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    directory: PathBuf,
}

impl SvgExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.svg"))
    }
}

impl WaveformSink for SvgExporter {
    fn export(&mut self, name: &str, table: &WaveTable) {
        let path = self.path_for(name);
        log::debug!("writing {}", path.display());
        if let Err(err) = write_table(&path, table) {
            log::warn!("could not write {}: {err}", path.display());
        }
    }
}
