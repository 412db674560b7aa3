use crate::figure::{Figure, Wedge, AXIS_LABELS, PIE_TITLE, SCATTER_TITLE};
use crate::runner::FigureRenderer;
use domain::language::Rgb;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use shared::error::SemanticMapError;
use shared::types::Result;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 1300;
pub const HEIGHT: u32 = 800;
const HEADER_HEIGHT: i32 = 80;
const SUMMARY_LINE_HEIGHT: i32 = 19;
const PIE_LABEL_LINE_HEIGHT: i32 = 13;

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Writes each figure as `semantic_map_{lang}.svg` under a directory.
pub struct SvgRenderer {
    output_dir: PathBuf,
}

impl SvgRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, figure: &Figure) -> PathBuf {
        self.output_dir
            .join(format!("semantic_map_{}.svg", figure.language.code()))
    }

    pub fn render_to(&self, figure: &Figure, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut svg = draw_figure(figure).map_err(|e| SemanticMapError::render(e.to_string()))?;
        if let Some(font) = &figure.font_file {
            svg = with_font_face(svg, &figure.font_family, font);
        }
        std::fs::write(path, svg)?;
        Ok(())
    }
}

impl FigureRenderer for SvgRenderer {
    fn render(&self, figure: &Figure) -> Result<()> {
        let path = self.path_for(figure);
        self.render_to(figure, &path)?;
        tracing::info!(path = %path.display(), "figure saved");
        Ok(())
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn text_style<'a>(family: &'a str, size: f64, fill: &RGBColor, pos: Pos) -> TextStyle<'a> {
    (family, size).into_font().color(fill).pos(pos)
}

fn bold_style<'a>(family: &'a str, size: f64, fill: &RGBColor, pos: Pos) -> TextStyle<'a> {
    (family, size, FontStyle::Bold).into_font().color(fill).pos(pos)
}

fn draw_figure(figure: &Figure) -> DrawResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&color(figure.background))?;

        let (header, body) = root.split_vertically(HEADER_HEIGHT);
        draw_header(&header, figure)?;

        let (top, summary) = body.split_vertically((HEIGHT as i32 - HEADER_HEIGHT) / 2);
        let (scatter, pie) = top.split_horizontally(WIDTH as i32 / 2);
        draw_scatter(&scatter, figure)?;
        draw_pie(&pie, figure)?;
        draw_summary(&summary, figure)?;

        root.present()?;
    }
    Ok(svg)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Inserts an `@font-face` rule right after the opening `<svg>` tag so the
/// configured font file is used wherever the figure is opened.
fn with_font_face(svg: String, family: &str, font: &Path) -> String {
    let absolute = std::fs::canonicalize(font).unwrap_or_else(|_| font.to_path_buf());
    let url = format!("file://{}", absolute.display()).replace(' ', "%20");
    let rule = format!(
        "<defs><style>@font-face {{ font-family: \"{}\"; src: url(\"{}\"); }}</style></defs>",
        escape_xml(family),
        escape_xml(&url)
    );
    let insert_at = svg
        .find("<svg")
        .and_then(|start| svg[start..].find('>').map(|end| start + end + 1));
    match insert_at {
        Some(at) => {
            let mut svg = svg;
            svg.insert_str(at, &rule);
            svg
        }
        None => svg,
    }
}

fn draw_header(area: &DrawingArea<SVGBackend, Shift>, figure: &Figure) -> DrawResult<()> {
    let family = figure.font_family.as_str();
    let center = Pos::new(HPos::Center, VPos::Top);
    let title = bold_style(family, 26.0, &color(figure.accent), center);
    area.draw_text(&figure.title, &title, (WIDTH as i32 / 2, 14))?;
    let subtitle = text_style(family, 16.0, &RGBColor(0xd3, 0xd3, 0xd3), center);
    area.draw_text(&figure.subtitle, &subtitle, (WIDTH as i32 / 2, 50))?;
    Ok(())
}

fn draw_scatter(area: &DrawingArea<SVGBackend, Shift>, figure: &Figure) -> DrawResult<()> {
    let family = figure.font_family.as_str();
    let [(x0, x1), (y0, y1), (z0, z1)] = figure.bounds;
    let caption = text_style(family, 18.0, &WHITE, Pos::new(HPos::Center, VPos::Top));

    let mut chart = ChartBuilder::on(area)
        .caption(SCATTER_TITLE, caption)
        .margin(20)
        .build_cartesian_3d(x0..x1, y0..y1, z0..z1)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.7;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    let grey = RGBColor(0x80, 0x80, 0x80);
    chart
        .configure_axes()
        .label_style(text_style(family, 10.0, &grey, Pos::new(HPos::Center, VPos::Center)))
        .axis_panel_style(color(figure.background).mix(0.0))
        .bold_grid_style(grey.mix(0.3))
        .light_grid_style(grey.mix(0.0))
        .max_light_lines(0)
        .draw()?;

    let axis_label = text_style(family, 12.0, &WHITE, Pos::new(HPos::Center, VPos::Center));
    let ends = [(x1, y0, z0), (x0, y1, z0), (x0, y0, z1)];
    chart.draw_series(
        AXIS_LABELS
            .iter()
            .zip(ends)
            .map(|(label, end)| Text::new(label.to_string(), end, axis_label.clone())),
    )?;

    chart.draw_series(figure.points.iter().map(|p| {
        let [x, y, z] = p.coords;
        Circle::new((x, y, z), 7, color(p.color).mix(0.85).filled())
    }))?;
    chart.draw_series(figure.points.iter().map(|p| {
        let [x, y, z] = p.coords;
        Circle::new((x, y, z), 7, WHITE.stroke_width(1))
    }))?;

    let index_style = text_style(family, 9.0, &WHITE, Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(figure.points.iter().map(|p| {
        let [x, y, z] = p.coords;
        Text::new(p.index.to_string(), (x, y, z), index_style.clone())
    }))?;
    Ok(())
}

/// Points along the outline of one wedge, starting and ending at the centre.
/// Angles are in radians, counter-clockwise from the positive x axis.
fn wedge_outline(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) / (PI / 90.0)).ceil() as usize).max(1);
    let mut outline = Vec::with_capacity(steps + 3);
    outline.push(center);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        outline.push(polar(center, radius, angle));
    }
    outline.push(center);
    outline
}

fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

fn draw_pie(area: &DrawingArea<SVGBackend, Shift>, figure: &Figure) -> DrawResult<()> {
    let family = figure.font_family.as_str();
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);
    let caption = text_style(family, 18.0, &WHITE, Pos::new(HPos::Center, VPos::Top));
    area.draw_text(PIE_TITLE, &caption, (width / 2, 20))?;

    let center = (width / 2, height / 2 + 15);
    let radius = (width.min(height) as f64 * 0.28).max(10.0);
    let mut start = 0.0;
    for wedge in &figure.wedges {
        let end = start + wedge.share * 2.0 * PI;
        let outline = wedge_outline(center, radius, start, end);
        area.draw(&Polygon::new(outline.clone(), color(wedge.color).filled()))?;
        area.draw(&PathElement::new(outline, WHITE.stroke_width(1)))?;
        draw_wedge_label(area, family, center, radius, (start + end) / 2.0, wedge)?;
        start = end;
    }
    Ok(())
}

fn draw_wedge_label(
    area: &DrawingArea<SVGBackend, Shift>,
    family: &str,
    center: (i32, i32),
    radius: f64,
    angle: f64,
    wedge: &Wedge,
) -> DrawResult<()> {
    let anchor = polar(center, radius * 1.18, angle);
    let hpos = if angle.cos() >= 0.0 { HPos::Left } else { HPos::Right };
    let style = text_style(family, 11.0, &WHITE, Pos::new(hpos, VPos::Center));
    let lines = wedge.label_lines.len() as i32;
    let first_y = anchor.1 - (lines - 1) * PIE_LABEL_LINE_HEIGHT / 2;
    for (i, line) in wedge.label_lines.iter().enumerate() {
        area.draw_text(line, &style, (anchor.0, first_y + i as i32 * PIE_LABEL_LINE_HEIGHT))?;
    }
    Ok(())
}

fn draw_summary(area: &DrawingArea<SVGBackend, Shift>, figure: &Figure) -> DrawResult<()> {
    let family = figure.font_family.as_str();
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);
    let left = Pos::new(HPos::Left, VPos::Top);

    let title = bold_style(family, 18.0, &WHITE, left);
    area.draw_text(&figure.summary_title, &title, (30, 8))?;

    area.draw(&Rectangle::new(
        [(24, 38), (width - 24, height - 12)],
        RGBColor(0x11, 0x11, 0x11).mix(0.15).filled(),
    ))?;
    area.draw(&Rectangle::new(
        [(24, 38), (width - 24, height - 12)],
        WHITE.mix(0.15).stroke_width(1),
    ))?;

    let body = text_style(family, 13.0, &WHITE, left);
    let text = figure.summary_text();
    let mut y = 50;
    for line in text.lines() {
        if y + SUMMARY_LINE_HEIGHT > height - 12 {
            tracing::warn!("summary longer than the panel; remaining lines clipped");
            break;
        }
        if !line.is_empty() {
            area.draw_text(line, &body, (40, y))?;
        }
        y += SUMMARY_LINE_HEIGHT;
    }
    Ok(())
}
