use crate::figure::{Figure, AXIS_LABELS, PIE_TITLE, SCATTER_TITLE};
use crate::runner::FigureRenderer;
use colored::{ColoredString, Colorize};
use domain::language::Rgb;
use shared::types::Result;
use std::io::{self, Write};

const BAR_WIDTH: usize = 30;

/// Prints the figure's panels to the terminal.
pub struct TerminalRenderer;

fn paint(text: &str, rgb: Rgb) -> ColoredString {
    text.truecolor(rgb.0, rgb.1, rgb.2)
}

impl TerminalRenderer {
    pub fn render_to<W: Write>(&self, figure: &Figure, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", paint(&figure.title, figure.accent).bold())?;
        writeln!(out, "{}", figure.subtitle.bright_black())?;

        writeln!(out, "\n{}", SCATTER_TITLE.bold())?;
        writeln!(
            out,
            "  {:>3}  {:>9} {:>9} {:>9}  cluster",
            "#", AXIS_LABELS[0], AXIS_LABELS[1], AXIS_LABELS[2]
        )?;
        for point in &figure.points {
            let [x, y, z] = point.coords;
            let marker = paint("●", point.color);
            writeln!(
                out,
                "{} {:>3}  {:>9.4} {:>9.4} {:>9.4}  {}",
                marker, point.index, x, y, z, point.cluster
            )?;
        }

        writeln!(out, "\n{}", PIE_TITLE.bold())?;
        for wedge in &figure.wedges {
            let filled = ((wedge.share * BAR_WIDTH as f64).round() as usize).clamp(1, BAR_WIDTH);
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
            let mut lines = wedge.label_lines.iter();
            let first = lines.next().map(String::as_str).unwrap_or("");
            writeln!(out, "  {} {}", paint(&bar, wedge.color), first)?;
            for line in lines {
                writeln!(out, "  {} {}", " ".repeat(BAR_WIDTH), line)?;
            }
        }

        writeln!(out, "\n{}", figure.summary_title.bold())?;
        for line in figure.summary_text().lines() {
            writeln!(out, "  {}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl FigureRenderer for TerminalRenderer {
    fn render(&self, figure: &Figure) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.render_to(figure, &mut handle)
    }
}
