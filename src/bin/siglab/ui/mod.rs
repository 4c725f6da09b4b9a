//! Terminal explorer for siglab
//!
//! Three views over the pure generators: elementary signals, the
//! flip-shift-multiply convolution walk, and Fourier partial sums.

mod chart;
pub mod state;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use signal_lab::dsp::analysis::{average_power, energy};

use chart::{render_chart, Series};
use state::{ExplorerState, View};

pub fn run() -> EyreResult<()> {
    let mut terminal = ratatui::init();
    let result = Explorer::default().run(&mut terminal);
    ratatui::restore();
    result
}

#[derive(Default)]
pub struct Explorer {
    state: ExplorerState,
}

impl Explorer {
    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.state.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            // Nothing animates; block until the next key or resize.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.state.handle_key(key.code);
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Charts
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let outcome = match self.state.view {
            View::Signals => self.render_signals(frame, chunks[0], chunks[1]),
            View::Convolution => self.render_convolution(frame, chunks[0], chunks[1]),
            View::Fourier => self.render_fourier(frame, chunks[0], chunks[1]),
        };
        if let Err(err) = outcome {
            let message = Paragraph::new(err.to_string())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
        }

        let help = match self.state.view {
            View::Signals => " [Tab] View  [↑/↓] Signal  [←/→] Parameter  [Q] Quit",
            View::Convolution => {
                " [Tab] View  [←/→] Shift  [PgUp/PgDn] Shift ×10  [I] Input  [H] Impulse  [Q] Quit"
            }
            View::Fourier => " [Tab] View  [←/→] Harmonics  [PgUp/PgDn] ×10  [T] Target  [Q] Quit",
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, spans: Vec<Span<'static>>) {
        let block = Block::default()
            .title(format!(" siglab · {} ", self.state.view.title()))
            .borders(Borders::ALL);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_signals(&self, frame: &mut Frame, status: Rect, body: Rect) -> signal_lab::Result<()> {
        let seq = self.state.sampled_signal()?;
        let kind = self.state.kind();

        let mut spans = vec![Span::styled(
            format!(" {}  ", self.state.signal()),
            Style::default().fg(Color::Cyan),
        )];
        if let Some(info) = kind.parameter_info() {
            spans.push(Span::styled(
                format!("{} = {:.2}  ", info.label, self.state.parameter),
                Style::default().fg(Color::White),
            ));
        }
        spans.push(Span::styled(
            format!("E ≈ {:.3}  P ≈ {:.3}", energy(&seq), average_power(&seq)),
            Style::default().fg(Color::Magenta),
        ));
        self.render_status(frame, status, spans);

        let series = [Series::new(kind.name(), seq.points(), Color::Cyan)];
        render_chart(frame, body, "x(t)", &series);
        Ok(())
    }

    fn render_convolution(
        &self,
        frame: &mut Frame,
        status: Rect,
        body: Rect,
    ) -> signal_lab::Result<()> {
        let scene = self.state.convolution()?;

        self.render_status(
            frame,
            status,
            vec![
                Span::styled(
                    format!(
                        " x = {}  h = {}  ",
                        self.state.input_shape, self.state.impulse_shape
                    ),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("shift = {:.0}  ", scene.slice.shift),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("area = {:.1}  y(shift) = {:.1}", scene.slice.area, scene.output_at_shift()),
                    Style::default().fg(Color::Magenta),
                ),
            ],
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);

        let slice = [
            Series::new("x(τ)", scene.input.points(), Color::Cyan),
            Series::new("h(t-τ)", scene.slice.shifted_impulse.points(), Color::Yellow),
            Series::new("x·h", scene.slice.product.points(), Color::Magenta),
        ];
        render_chart(frame, rows[0], "flip, shift, multiply", &slice);

        let (_, y_max) = scene.display_output.value_range().unwrap_or((0.0, 1.0));
        let cursor = vec![(scene.slice.shift, 0.0), (scene.slice.shift, y_max)];
        let output = [
            Series::new("y(t) / 20", scene.display_output.points(), Color::Green),
            Series::new("shift", cursor, Color::DarkGray),
        ];
        render_chart(frame, rows[1], "output", &output);
        Ok(())
    }

    fn render_fourier(&self, frame: &mut Frame, status: Rect, body: Rect) -> signal_lab::Result<()> {
        let sum = self.state.fourier()?;

        self.render_status(
            frame,
            status,
            vec![
                Span::styled(
                    format!(" {}  ", sum.target()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("N = {}  ", sum.harmonics()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!(
                        "peak = {:.3}  max error = {:.3}  rms error = {:.3}",
                        sum.peak(),
                        sum.max_error(),
                        sum.rms_error()
                    ),
                    Style::default().fg(Color::Magenta),
                ),
            ],
        );

        let series = [
            Series::new("ideal", sum.ideal().points(), Color::DarkGray),
            Series::new("partial sum", sum.approximation().points(), Color::Cyan),
        ];
        render_chart(frame, body, "one period", &series);
        Ok(())
    }
}
