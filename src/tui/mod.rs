//! Ratatui-based terminal UI.
//!
//! The TUI mirrors the dashboard's tab layout: a Yields tab with the clickable
//! time series + the selected date's yield curve, and one tab each for
//! outrights, spreads, flies, and condors with Bollinger-style overlays.
//!
//! All date navigation funnels through `nav::Cursor`: raw key and mouse
//! events are translated into `NavEvent`s, queued events from one poll pass
//! form a single `CycleInput`, and the cursor applies the winner by
//! precedence (buttons beat clicks beat the slider beat the date picker).

use std::io;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};

use crate::app::pipeline::{self, ComboView, RunOutput};
use crate::combo;
use crate::domain::{ComboSpec, DashConfig, Tenor};
use crate::error::AppError;
use crate::nav::{Cursor, CycleInput, Direction as NavDirection};
use crate::report;

mod plotters_chart;

use plotters_chart::{DashPlottersChart, LineSpec};

/// Dashboard tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Yields,
    Outrights,
    Spreads,
    Flies,
    Condors,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Yields,
        Tab::Outrights,
        Tab::Spreads,
        Tab::Flies,
        Tab::Condors,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Yields => "Yields & Curve",
            Tab::Outrights => "Outrights",
            Tab::Spreads => "Spreads",
            Tab::Flies => "Flies",
            Tab::Condors => "Condors",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Which text field is being edited, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditField {
    ChartStart,
    ChartEnd,
    StatsStart,
    StatsEnd,
    CursorDate,
}

impl EditField {
    fn prompt(self) -> &'static str {
        match self {
            EditField::ChartStart => "chart start",
            EditField::ChartEnd => "chart end",
            EditField::StatsStart => "stats start",
            EditField::StatsEnd => "stats end",
            EditField::CursorDate => "go to date",
        }
    }
}

/// Start the TUI.
pub fn run(config: DashConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse
/// capture) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

struct App {
    config: DashConfig,
    run: RunOutput,
    cursor: Cursor,
    tab: Tab,

    // Per-tab selections.
    outright_idx: usize,
    spread_idx: usize,
    fly_idx: usize,
    condor_idx: usize,
    spreads: Vec<ComboSpec>,
    flies: Vec<ComboSpec>,
    condors: Vec<ComboSpec>,

    editing: Option<EditField>,
    input: String,
    status: String,

    // Last drawn hit-test areas for mouse mapping (Yields tab only).
    chart_rect: Option<Rect>,
    slider_rect: Option<Rect>,
}

impl App {
    fn new(config: DashConfig) -> Result<Self, AppError> {
        let run = pipeline::run(&config)?;
        let cursor = Cursor::new(run.filtered.len());
        Ok(Self {
            config,
            run,
            cursor,
            tab: Tab::Yields,
            outright_idx: 0,
            spread_idx: 0,
            fly_idx: 0,
            condor_idx: 0,
            spreads: combo::all_spreads(),
            flies: combo::all_flies(),
            condors: combo::all_condors(),
            editing: None,
            input: String::new(),
            status: "Ready. Tab switches panels, q quits.".to_string(),
            chart_rect: None,
            slider_rect: None,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            // Drain everything queued right now into one interaction cycle so
            // competing navigation inputs resolve by precedence, not arrival
            // order.
            let mut cycle = CycleInput::default();
            let mut quit = false;
            loop {
                match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))?
                {
                    Event::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.editing.is_some() {
                            self.handle_edit_key(key.code, &mut cycle);
                        } else if self.handle_key(key.code, &mut cycle) {
                            quit = true;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, &mut cycle),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
                if !event::poll(Duration::ZERO)
                    .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
                {
                    break;
                }
            }
            if quit {
                break;
            }

            self.apply_nav_cycle(cycle);
            needs_redraw = true;
        }
        Ok(())
    }

    /// Handle a key outside edit mode. Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode, cycle: &mut CycleInput) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                let next = (self.tab.index() + 1) % Tab::ALL.len();
                self.tab = Tab::ALL[next];
            }
            KeyCode::BackTab => {
                let prev = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
                self.tab = Tab::ALL[prev];
            }
            KeyCode::Left if self.tab == Tab::Yields => {
                cycle.button = Some(NavDirection::Previous);
            }
            KeyCode::Right if self.tab == Tab::Yields => {
                cycle.button = Some(NavDirection::Next);
            }
            KeyCode::Home if self.tab == Tab::Yields => {
                cycle.slider = Some(0);
            }
            KeyCode::End if self.tab == Tab::Yields => {
                cycle.slider = Some(self.run.filtered.len() - 1);
            }
            KeyCode::Up => self.adjust_selection(-1),
            KeyCode::Down => self.adjust_selection(1),
            KeyCode::Char('g') if self.tab == Tab::Yields => {
                self.begin_edit(EditField::CursorDate);
            }
            KeyCode::Char('s') => self.begin_edit(EditField::ChartStart),
            KeyCode::Char('e') => self.begin_edit(EditField::ChartEnd),
            KeyCode::Char('S') => self.begin_edit(EditField::StatsStart),
            KeyCode::Char('E') => self.begin_edit(EditField::StatsEnd),
            KeyCode::Char('[') => {
                self.config.window = self.config.window.saturating_sub(1).max(1);
                self.status = format!("window: {}", self.config.window);
            }
            KeyCode::Char(']') => {
                self.config.window += 1;
                self.status = format!("window: {}", self.config.window);
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, code: KeyCode, cycle: &mut CycleInput) {
        let Some(field) = self.editing else { return };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.input.clear();
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = None;
                let text = std::mem::take(&mut self.input);
                self.apply_edit(field, text.trim(), cycle);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_edit(&mut self, field: EditField, text: &str, cycle: &mut CycleInput) {
        let parsed = if text.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    self.status = format!("Invalid date '{text}': {e}");
                    return;
                }
            }
        };

        match field {
            EditField::CursorDate => {
                // Feed the picker through the same cycle as other nav inputs.
                cycle.date = parsed;
                if parsed.is_none() {
                    self.status = "No date entered.".to_string();
                }
            }
            EditField::ChartStart => self.apply_config_change(|c| c.start = parsed),
            EditField::ChartEnd => self.apply_config_change(|c| c.end = parsed),
            EditField::StatsStart => self.apply_config_change(|c| c.stats_start = parsed),
            EditField::StatsEnd => self.apply_config_change(|c| c.stats_end = parsed),
        }
    }

    /// Apply a config mutation, recompute, and roll back if the new windows
    /// don't validate (start > end stays a blocking error, never a warning).
    fn apply_config_change(&mut self, mutate: impl FnOnce(&mut DashConfig)) {
        let previous = self.config.clone();
        mutate(&mut self.config);

        match pipeline::run_with_series(&self.config, self.run.full.clone()) {
            Ok(run) => {
                self.run = run;
                self.cursor.reclamp(self.run.filtered.len());
                self.status = format!(
                    "Window: {} .. {} ({} obs)",
                    self.run.chart_window.start(),
                    self.run.chart_window.end(),
                    self.run.filtered.len()
                );
            }
            Err(err) => {
                self.config = previous;
                self.status = err.to_string();
            }
        }
    }

    fn adjust_selection(&mut self, delta: i32) {
        let (idx, len) = match self.tab {
            Tab::Yields => return,
            Tab::Outrights => (&mut self.outright_idx, Tenor::ALL.len()),
            Tab::Spreads => (&mut self.spread_idx, self.spreads.len()),
            Tab::Flies => (&mut self.fly_idx, self.flies.len()),
            Tab::Condors => (&mut self.condor_idx, self.condors.len()),
        };
        let len = len as i32;
        let next = (*idx as i32 + delta).rem_euclid(len);
        *idx = next as usize;
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, cycle: &mut CycleInput) {
        if self.tab != Tab::Yields {
            return;
        }
        let n = self.run.filtered.len();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = hit_index(self.chart_rect, mouse.column, mouse.row, n) {
                    cycle.click = Some(index);
                } else if let Some(index) = hit_index(self.slider_rect, mouse.column, mouse.row, n)
                {
                    cycle.slider = Some(index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = hit_index(self.slider_rect, mouse.column, mouse.row, n) {
                    cycle.slider = Some(index);
                }
            }
            _ => {}
        }
    }

    fn apply_nav_cycle(&mut self, cycle: CycleInput) {
        match self.cursor.apply_cycle(cycle, &self.run.filtered) {
            Ok(index) => {
                if let Some(observation) = self.run.filtered.observations().get(index) {
                    self.status = format!("Curve date: {}", observation.date);
                }
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn reload(&mut self) {
        self.status = "Reloading data...".to_string();
        match pipeline::run(&self.config) {
            Ok(run) => {
                self.run = run;
                self.cursor.reclamp(self.run.filtered.len());
                self.status = format!("Loaded {} observations.", self.run.full.len());
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    /// The combination shown on the current tab, if it is a combo tab.
    fn current_spec(&self) -> Option<&ComboSpec> {
        match self.tab {
            Tab::Yields => None,
            Tab::Outrights => None,
            Tab::Spreads => self.spreads.get(self.spread_idx),
            Tab::Flies => self.flies.get(self.fly_idx),
            Tab::Condors => self.condors.get(self.condor_idx),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("yc — US Treasury yields"),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        // Hit-test areas are only valid for the Yields tab; reset every frame.
        self.chart_rect = None;
        self.slider_rect = None;

        match self.tab {
            Tab::Yields => self.draw_yields_tab(frame, area),
            _ => self.draw_combo_tab(frame, area),
        }
    }

    fn draw_yields_tab(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(12),
            ])
            .split(area);

        self.draw_yields_chart(frame, chunks[0]);
        self.draw_slider(frame, chunks[1]);
        self.draw_curve_panel(frame, chunks[2]);
    }

    fn draw_yields_chart(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Click a date (or use arrows / slider)")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);
        self.chart_rect = Some(inner);

        let filtered = &self.run.filtered;
        let series: Vec<(Tenor, Vec<(f64, f64)>)> = Tenor::ALL
            .iter()
            .map(|&tenor| {
                (
                    tenor,
                    filtered
                        .outright(tenor)
                        .into_iter()
                        .map(|(d, v)| (date_x(d), v))
                        .collect(),
                )
            })
            .collect();

        let lines: Vec<LineSpec> = series
            .iter()
            .map(|(tenor, points)| LineSpec {
                color: tenor_color(*tenor),
                points,
            })
            .collect();

        let x_bounds = [
            date_x(self.run.chart_window.start()),
            date_x(self.run.chart_window.end()).max(date_x(self.run.chart_window.start()) + 1.0),
        ];
        let y_bounds = y_bounds_of(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

        let cursor_x = filtered
            .observations()
            .get(self.cursor.index())
            .map(|o| date_x(o.date));

        let widget = DashPlottersChart {
            lines: &lines,
            markers: &[],
            cursor_x,
            x_bounds,
            y_bounds,
            x_label: "date",
            y_label: "yield (%)".to_string(),
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_slider(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        self.slider_rect = Some(area);

        let n = self.run.filtered.len();
        let width = area.width as usize;
        if width < 3 || n == 0 {
            return;
        }

        // A simple one-line scrub track: filled up to the cursor position.
        let pos = if n == 1 {
            0
        } else {
            self.cursor.index() * (width - 1) / (n - 1)
        };
        let mut track: String = String::with_capacity(width);
        for i in 0..width {
            track.push(if i == pos { '#' } else { '-' });
        }
        let p = Paragraph::new(track).style(Style::default().fg(Color::Gray));
        frame.render_widget(p, area);
    }

    fn draw_curve_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(observation) = self
            .run
            .filtered
            .observations()
            .get(self.cursor.index())
            .copied()
        else {
            return;
        };

        let block = Block::default()
            .title(format!("Yield curve on {}", observation.date))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(34)])
            .split(inner);

        let points: Vec<(f64, f64)> = observation.curve_points().to_vec();
        let y_bounds = y_bounds_of(points.iter().map(|p| p.1));
        let widget = DashPlottersChart {
            lines: &[LineSpec {
                color: RGBColor(255, 255, 255),
                points: &points,
            }],
            markers: &points,
            cursor_x: None,
            x_bounds: [0.0, 31.0],
            y_bounds,
            x_label: "maturity (yrs)",
            y_label: "yield (%)".to_string(),
            fmt_x: fmt_axis_years,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, chunks[0]);

        // Per-maturity stats over the stats window, next to the curve.
        let rows: Vec<(String, _)> = self
            .run
            .maturity_stats
            .iter()
            .map(|(tenor, stats)| (tenor.label().to_string(), *stats))
            .collect();
        let table = report::format_stats_table(self.run.stats_window, &rows);
        let p = Paragraph::new(Text::from(table)).style(Style::default().fg(Color::Gray));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_combo_tab(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec_owned;
        let spec = match self.tab {
            Tab::Outrights => {
                spec_owned = ComboSpec::outright(Tenor::ALL[self.outright_idx]);
                &spec_owned
            }
            _ => match self.current_spec() {
                Some(spec) => spec,
                None => return,
            },
        };

        let view = match pipeline::combo_view(&self.run, spec, self.config.window, self.config.band_k)
        {
            Ok(view) => view,
            Err(err) => {
                let p = Paragraph::new(err.to_string()).style(Style::default().fg(Color::Yellow));
                frame.render_widget(p, area);
                return;
            }
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(5)])
            .split(area);

        self.draw_combo_chart(frame, chunks[0], &view);
        self.draw_combo_stats(frame, chunks[1], &view);
    }

    fn draw_combo_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &ComboView) {
        let block = Block::default()
            .title(format!(
                "{} — MA({}) ± {:.1}σ  (↑/↓ to change legs)",
                view.label, self.config.window, self.config.band_k
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let value_points: Vec<(f64, f64)> = view
            .points
            .iter()
            .map(|&(d, v)| (date_x(d), v))
            .collect();

        let mut ma = Vec::new();
        let mut upper = Vec::new();
        let mut lower = Vec::new();
        for band in &view.bands {
            if let Some(b) = band.bands {
                let x = date_x(band.date);
                ma.push((x, b.moving_average));
                upper.push((x, b.upper));
                lower.push((x, b.lower));
            }
        }

        let lines = [
            LineSpec {
                color: RGBColor(255, 255, 0),
                points: &upper,
            },
            LineSpec {
                color: RGBColor(255, 255, 0),
                points: &lower,
            },
            LineSpec {
                color: RGBColor(255, 165, 0),
                points: &ma,
            },
            LineSpec {
                color: RGBColor(0, 255, 255),
                points: &value_points,
            },
        ];

        let x_bounds = [
            date_x(self.run.chart_window.start()),
            date_x(self.run.chart_window.end()).max(date_x(self.run.chart_window.start()) + 1.0),
        ];
        let y_bounds = y_bounds_of(
            value_points
                .iter()
                .map(|p| p.1)
                .chain(upper.iter().map(|p| p.1))
                .chain(lower.iter().map(|p| p.1)),
        );

        let widget = DashPlottersChart {
            lines: &lines,
            markers: &[],
            cursor_x: None,
            x_bounds,
            y_bounds,
            x_label: "date",
            y_label: "value (%)".to_string(),
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_combo_stats(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &ComboView) {
        let rows = vec![(view.label.clone(), view.stats)];
        let mut text = report::format_stats_table(self.run.stats_window, &rows);
        text.push_str(&format!("n = {}\n", view.stats_n));
        let p = Paragraph::new(Text::from(text))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("Statistics").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.tab {
            Tab::Yields => "←/→ prev/next  click/drag navigate  g go-to-date  s/e window  S/E stats window  [/] MA window  r reload  Tab panel  q quit",
            _ => "↑/↓ legs  s/e window  S/E stats window  [/] MA window  r reload  Tab panel  q quit",
        };

        let status = if let Some(field) = self.editing {
            format!("{} (YYYY-MM-DD): {}_", field.prompt(), self.input)
        } else {
            self.status.clone()
        };

        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn begin_edit(&mut self, field: EditField) {
        self.editing = Some(field);
        self.input.clear();
        self.status = format!("Editing {} (Enter to apply, Esc to cancel).", field.prompt());
    }
}

/// Map a chart-relative mouse position to an observation index.
///
/// The mapping is linear across the rect's width; precise enough for point
/// selection on a terminal grid.
fn hit_index(rect: Option<Rect>, column: u16, row: u16, n: usize) -> Option<usize> {
    let rect = rect?;
    if n == 0
        || column < rect.x
        || column >= rect.x + rect.width
        || row < rect.y
        || row >= rect.y + rect.height
    {
        return None;
    }
    if rect.width <= 1 {
        return Some(0);
    }
    let frac = (column - rect.x) as f64 / (rect.width - 1) as f64;
    let index = (frac * (n - 1) as f64).round() as usize;
    Some(index.min(n - 1))
}

/// Date -> chart x coordinate (days since the common era).
fn date_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn tenor_color(tenor: Tenor) -> RGBColor {
    match tenor {
        Tenor::Y2 => RGBColor(31, 119, 180),
        Tenor::Y5 => RGBColor(255, 127, 14),
        Tenor::Y10 => RGBColor(44, 160, 44),
        Tenor::Y30 => RGBColor(214, 39, 40),
    }
}

fn y_bounds_of(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = if y_min.is_finite() { y_min - 0.5 } else { 0.0 };
        y_max = y_min + 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    [y_min - pad, y_max + pad]
}

fn fmt_axis_date(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v as i32)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

fn fmt_axis_pct(v: f64) -> String {
    format!("{v:.2}")
}

fn fmt_axis_years(v: f64) -> String {
    format!("{v:.0}y")
}
