//! Plain-text presenter for the command-line binary.

use std::io::{self, Write};

use crate::port::PresentationPort;
use crate::view_model::ViewModel;

/// Writes busy state, results and errors as text to any [`Write`] sink.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_results(&mut self, view: &ViewModel) -> io::Result<()> {
        let out = &mut self.out;

        writeln!(out)?;
        writeln!(out, "Homagama forecast ({})", view.theme)?;
        writeln!(out, "  Predicted temperature  {}", view.predicted_temp)?;
        writeln!(out, "  Predicted rain chance  {}", view.predicted_rain)?;

        writeln!(out)?;
        writeln!(out, "Today")?;
        writeln!(
            out,
            "  Max {}  Min {}  Avg {}  Precipitation {}",
            view.today_max, view.today_min, view.today_avg, view.today_precipitation
        )?;

        writeln!(out)?;
        writeln!(out, "{} ({}, {})", view.api_date, view.latitude, view.longitude)?;
        writeln!(out, "  Condition    {}", view.condition)?;
        writeln!(out, "  Mean temp    {}", view.api_temp)?;
        writeln!(out, "  Wind         {}", view.wind)?;
        writeln!(out, "  Humidity     {}", view.humidity)?;
        writeln!(out, "  UV index     {}", view.uv_index)?;
        writeln!(out, "  Rain chance  {}", view.rain_probability)?;

        if !view.hourly.is_empty() {
            writeln!(out)?;
            writeln!(out, "Hourly")?;
            for row in &view.hourly {
                writeln!(
                    out,
                    "  {}  {:>8}  {:>4}  {:>10}  {:>4}",
                    row.hour, row.temperature, row.rain, row.wind, row.humidity
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{}", view.status)?;
        out.flush()
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> PresentationPort for TerminalPresenter<W> {
    fn show_busy(&mut self) {
        self.write_line("Fetching forecast...");
    }

    fn hide_busy(&mut self) {}

    fn show_results(&mut self, view: &ViewModel) {
        if let Err(e) = self.write_results(view) {
            tracing::warn!("Failed to write results to terminal: {}", e);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.write_line(&format!("Error: {}", message));
    }
}
