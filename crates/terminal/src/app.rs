use cpustat_core::{CategoryMode, CounterSnapshot, Message, Result};
use cpustat_renderer::{ChartConfig, StackedBarChart};
use cpustat_system::{capacity_for, delta, CounterSource, HistoryBuffer};
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use tracing::{debug, info};

/// What the loop should do after a message has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Owns every piece of mutable state the refresh loop works on: the counter
/// source, the last snapshot, the bar history and the chart geometry.
pub struct App<S> {
    source:   S,
    mode:     CategoryMode,
    chart:    ChartConfig,
    previous: CounterSnapshot,
    history:  HistoryBuffer,
    /// Whole chart rectangle, border included.
    area:     Rect,
    max_bars: usize,
    running:  bool,
}

impl<S: CounterSource> App<S> {
    /// Takes the first snapshot right away so the first tick has a baseline.
    pub fn new(mut source: S, mode: CategoryMode, chart: ChartConfig) -> Result<Self> {
        let previous = source.snapshot()?;
        Ok(Self {
            source,
            mode,
            chart,
            previous,
            history: HistoryBuffer::new(),
            area: Rect::default(),
            max_bars: 0,
            running: true,
        })
    }

    /// Apply one message.  Never draws; see [`step`].
    pub fn update(&mut self, message: Message) -> Result<Flow> {
        if !self.running {
            return Ok(Flow::Stop);
        }
        match message {
            Message::Tick => self.sample()?,
            Message::Resize { width, height } => self.resize(width, height),
            Message::Quit => {
                info!("Quit requested");
                self.running = false;
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    fn sample(&mut self) -> Result<()> {
        let current = self.source.snapshot()?;
        let usage = delta(&self.previous, &current, self.mode);
        debug!(?usage, "sample");

        self.history.append(usage);
        self.history.truncate(self.max_bars);
        self.previous = current;
        Ok(())
    }

    /// Recompute the chart rectangle and capacity; history is only truncated.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        let inner = self.chart.inner(self.area);
        self.max_bars = capacity_for(inner.width, self.chart.bar_width);
        self.history.truncate(self.max_bars);
        debug!(width, height, max_bars = self.max_bars, "resize");
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = self.area.intersection(frame.area());
        let footer = self.previous.taken_at.format("%H:%M:%S").to_string();
        frame.render_widget(
            StackedBarChart::new(&self.chart, self.history.iter()).footer(footer),
            area,
        );
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn max_bars(&self) -> usize {
        self.max_bars
    }

    pub fn mode(&self) -> CategoryMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Handle one message and repaint as it requires: a sample redraws, a resize
/// clears and redraws, quit leaves the screen alone.
pub fn step<S, B>(app: &mut App<S>, terminal: &mut Terminal<B>, message: Message) -> Result<Flow>
where
    S: CounterSource,
    B: Backend,
{
    let flow = app.update(message)?;
    match message {
        Message::Tick => {
            terminal.draw(|frame| app.draw(frame))?;
        }
        Message::Resize { .. } => {
            terminal.clear()?;
            terminal.draw(|frame| app.draw(frame))?;
        }
        Message::Quit => {}
    }
    Ok(flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpustat_core::CpuStatError;
    use cpustat_renderer::format_label;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use std::collections::VecDeque;

    /// Replays a fixed list of readings; errors once it runs out.
    struct Scripted {
        readings: VecDeque<CounterSnapshot>,
        reads:    usize,
    }

    impl Scripted {
        /// Cumulative snapshots where each step adds `user`, `system`, `idle`.
        fn steps(steps: &[(f64, f64, f64)]) -> Self {
            let mut current = CounterSnapshot::default();
            let mut readings = VecDeque::from([current.clone()]);
            for &(user, system, idle) in steps {
                current.user += user;
                current.system += system;
                current.idle += idle;
                readings.push_back(current.clone());
            }
            Self { readings, reads: 0 }
        }
    }

    impl CounterSource for Scripted {
        fn snapshot(&mut self) -> Result<CounterSnapshot> {
            self.reads += 1;
            self.readings
                .pop_front()
                .ok_or_else(|| CpuStatError::Source("script exhausted".into()))
        }
    }

    fn chart() -> ChartConfig {
        ChartConfig {
            title:     "cpu".into(),
            colors:    vec![Color::Green, Color::Red, Color::Blue],
            bar_width: 3,
            max:       100.0,
            border:    true,
            formatter: format_label,
        }
    }

    fn app(steps: &[(f64, f64, f64)], width: u16) -> App<Scripted> {
        let mut app = App::new(Scripted::steps(steps), CategoryMode::Compact, chart()).unwrap();
        app.resize(width, 10);
        app
    }

    #[test]
    fn new_reads_baseline() {
        let app = app(&[], 42);
        assert_eq!(app.source.reads, 1);
        assert!(app.history().is_empty());
        assert!(app.is_running());
        assert_eq!(app.mode(), CategoryMode::Compact);
    }

    #[test]
    fn tick_appends_usage() {
        let mut app = app(&[(10.0, 10.0, 30.0)], 42);
        assert_eq!(app.update(Message::Tick).unwrap(), Flow::Continue);

        let latest = app.history().latest().unwrap();
        assert!((latest[0] - 40.0).abs() < 1e-9);
        assert_eq!(latest[1], 0.0);
        assert!((latest[2] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn history_tracks_capacity() {
        // 42 columns minus the border = 40 → 10 bars of 3 + gap.
        let steps: Vec<_> = (0..20).map(|n| (n as f64, 0.0, 100.0 - n as f64)).collect();
        let mut app = app(&steps, 42);
        assert_eq!(app.max_bars(), 10);

        for _ in 0..20 {
            app.update(Message::Tick).unwrap();
            assert!(app.history().len() <= 10);
        }
        let first = app.history().iter().next().unwrap();
        assert!((first[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn resize_truncates_without_sampling() {
        let steps = vec![(1.0, 1.0, 8.0); 6];
        let mut app = app(&steps, 42);
        for _ in 0..6 {
            app.update(Message::Tick).unwrap();
        }
        let reads = app.source.reads;

        app.update(Message::Resize { width: 14, height: 10 }).unwrap();
        assert_eq!(app.max_bars(), 3);
        assert_eq!(app.history().len(), 3);

        app.update(Message::Resize { width: 200, height: 50 }).unwrap();
        assert_eq!(app.history().len(), 3);
        assert_eq!(app.source.reads, reads);
    }

    #[test]
    fn too_narrow_degrades_to_empty() {
        let mut app = app(&[(1.0, 1.0, 1.0)], 4);
        assert_eq!(app.max_bars(), 0);
        app.update(Message::Tick).unwrap();
        assert!(app.history().is_empty());
    }

    #[test]
    fn quit_stops_for_good() {
        let mut app = app(&[(1.0, 1.0, 1.0)], 42);
        assert_eq!(app.update(Message::Quit).unwrap(), Flow::Stop);
        assert!(!app.is_running());
        assert_eq!(app.update(Message::Tick).unwrap(), Flow::Stop);
        assert_eq!(app.source.reads, 1);
    }

    #[test]
    fn source_failure_is_fatal() {
        let mut app = app(&[], 42);
        assert!(matches!(app.update(Message::Tick), Err(CpuStatError::Source(_))));
    }

    #[test]
    fn step_draws_latest_bar() {
        let mut app = app(&[(20.0, 20.0, 60.0)], 12);
        let mut terminal = Terminal::new(TestBackend::new(12, 12)).unwrap();

        step(&mut app, &mut terminal, Message::Resize { width: 12, height: 12 }).unwrap();
        step(&mut app, &mut terminal, Message::Tick).unwrap();

        let buf = terminal.backend().buffer();
        let (x, bottom, top): (u16, u16, u16) = (1, 10, 1);
        assert_eq!(buf[(x, bottom)].bg, Color::Green);
        assert_eq!(buf[(x, top)].bg, Color::Blue);
    }

    #[test]
    fn step_quit_does_not_draw() {
        let mut app = app(&[(1.0, 1.0, 1.0)], 12);
        let mut terminal = Terminal::new(TestBackend::new(12, 12)).unwrap();
        assert_eq!(step(&mut app, &mut terminal, Message::Quit).unwrap(), Flow::Stop);
        assert_eq!(terminal.backend().buffer()[(0u16, 0u16)].symbol(), " ");
    }
}
