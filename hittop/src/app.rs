//! App state and main loop: input handling, polling the metrics source, and drawing.

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
    task::JoinHandle,
    time::sleep,
};

use crate::api::MetricsSource;
use crate::dashboard::Dashboard;
use crate::scheduler::PollingScheduler;
use crate::ui::{
    header::draw_header, pageviews::draw_pageviews_chart, tiles::draw_tiles,
    top_pages::draw_top_pages_chart,
};

// How long the loop waits for the scheduler before redrawing
const UI_TICK: Duration = Duration::from_millis(200);
// Reader thread notices a closed channel within this long
const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputAction {
    Quit,
    Redraw,
    Ignore,
}

fn classify(ev: &Event) -> InputAction {
    match ev {
        Event::Key(KeyEvent { code, modifiers, .. }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            // Raw mode swallows SIGINT, so Ctrl-C arrives as a key
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
            _ => InputAction::Ignore,
        },
        Event::Resize(_, _) => InputAction::Redraw,
        _ => InputAction::Ignore,
    }
}

// Blocking crossterm reads live on their own thread so a slow request never hides a keypress
fn spawn_input_reader() -> (UnboundedReceiver<Event>, JoinHandle<()>) {
    let (tx, rx) = unbounded_channel();
    let handle = tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
    (rx, handle)
}

enum Wake {
    Input(Option<Event>),
    Tick,
    Idle,
}

pub struct App {
    dashboard: Dashboard,
    scheduler: PollingScheduler,
    site: String,

    // Quit flag
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, refresh_interval: Duration, site: &str) -> Self {
        Self {
            dashboard,
            scheduler: PollingScheduler::new(refresh_interval),
            site: site.to_string(),
            should_quit: false,
        }
    }

    pub async fn run<S>(&mut self, source: &S) -> anyhow::Result<()>
    where
        S: MetricsSource + ?Sized,
    {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let (mut input, reader) = spawn_input_reader();
        let res = self.event_loop(&mut terminal, source, &mut input).await;
        drop(input);
        let _ = reader.await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!(
            cycles = self.scheduler.cycles(),
            failures = self.scheduler.diagnostics().total(),
            "dashboard closed"
        );
        res
    }

    async fn event_loop<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        source: &S,
        input: &mut UnboundedReceiver<Event>,
    ) -> anyhow::Result<()>
    where
        B: ratatui::backend::Backend,
        S: MetricsSource + ?Sized,
    {
        let mut needs_draw = true;
        loop {
            let wake = tokio::select! {
                ev = input.recv() => Wake::Input(ev),
                _ = self.scheduler.tick() => Wake::Tick,
                _ = sleep(UI_TICK) => Wake::Idle,
            };

            match wake {
                // Reader gone means no way to ever quit; stop now
                Wake::Input(None) => self.should_quit = true,
                Wake::Input(Some(ev)) => match classify(&ev) {
                    InputAction::Quit => self.should_quit = true,
                    InputAction::Redraw => needs_draw = true,
                    InputAction::Ignore => {}
                },
                Wake::Tick => {
                    // Keep reading input while the request is in flight; quitting drops the cycle
                    let cycle = self.scheduler.run_cycle(source, &mut self.dashboard);
                    tokio::pin!(cycle);
                    let mut quit = false;
                    loop {
                        tokio::select! {
                            _ = &mut cycle => break,
                            ev = input.recv() => match ev.as_ref().map(classify) {
                                None | Some(InputAction::Quit) => {
                                    quit = true;
                                    break;
                                }
                                Some(InputAction::Redraw) => needs_draw = true,
                                Some(InputAction::Ignore) => {}
                            },
                        }
                    }
                    if quit {
                        tracing::info!("quit while a cycle was in flight");
                        self.should_quit = true;
                    }
                }
                Wake::Idle => {}
            }
            if self.should_quit {
                break;
            }

            // Both flags must be consumed, so no short-circuit
            let charts_dirty = self.dashboard.pageviews_chart.take_dirty()
                | self.dashboard.top_pages_chart.take_dirty();
            if needs_draw || charts_dirty {
                terminal.draw(|f| self.draw(f))?;
                needs_draw = false;
            }
        }

        Ok(())
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, scalar tiles, charts
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // tiles
                Constraint::Min(10),   // charts
            ])
            .split(area);

        draw_header(f, rows[0], &self.dashboard, &self.site);
        draw_tiles(f, rows[1], self.dashboard.surface());

        // Charts: page views over time (left), top pages (right)
        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);

        draw_pageviews_chart(f, charts[0], &self.dashboard.pageviews_chart);
        draw_top_pages_chart(f, charts[1], &self.dashboard.top_pages_chart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Surface, MOUNT_PAGEVIEWS, MOUNT_TOP_PAGES, SLOT_AVG_TIME};
    use crate::demo::synth_snapshot;
    use crate::error::MetricsError;
    use crate::types::MetricsSnapshot;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // Accepts the request and never answers, like a server that hangs after connect
    #[derive(Default)]
    struct StalledSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetricsSource for StalledSource {
        async fn fetch_metrics(&self) -> Result<MetricsSnapshot, MetricsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn draws_placeholders_before_first_refresh() {
        let d = Dashboard::new(Surface::standard()).unwrap();
        let app = App::new(d, Duration::from_secs(30), "site-1");
        let screen = render(&app);
        assert!(screen.contains("loading..."));
        assert!(screen.contains("Realtime Visitors"));
        assert!(screen.contains("waiting for data..."));
    }

    #[test]
    fn draws_only_present_slots_and_both_charts() {
        let mut d = Dashboard::new(Surface::with_panels([
            SLOT_AVG_TIME,
            MOUNT_PAGEVIEWS,
            MOUNT_TOP_PAGES,
        ]))
        .unwrap();
        d.apply(&synth_snapshot(0));
        let app = App::new(d, Duration::from_secs(30), "site-1");
        let screen = render(&app);
        assert!(screen.contains("Avg. Time"));
        assert!(!screen.contains("Unique Visitors"));
        assert!(screen.contains("updated"));
        assert!(screen.contains("Top Pages (Views)"));
        assert!(screen.contains("/blog"));
    }

    #[test]
    fn quit_keys_and_resize() {
        assert_eq!(classify(&key(KeyCode::Char('q'), KeyModifiers::NONE)), InputAction::Quit);
        assert_eq!(classify(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)), InputAction::Quit);
        assert_eq!(classify(&key(KeyCode::Esc, KeyModifiers::NONE)), InputAction::Quit);
        assert_eq!(classify(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), InputAction::Quit);
        assert_eq!(classify(&key(KeyCode::Char('c'), KeyModifiers::NONE)), InputAction::Ignore);
        assert_eq!(classify(&Event::Resize(80, 24)), InputAction::Redraw);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_is_honored_while_a_fetch_hangs() {
        let source = Arc::new(StalledSource::default());
        let d = Dashboard::new(Surface::standard()).unwrap();
        let mut app = App::new(d, Duration::from_secs(30), "site-1");
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        let (tx, mut rx) = unbounded_channel();
        tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            let _ = tx.send(key(KeyCode::Char('q'), KeyModifiers::NONE));
        });

        let res = tokio::time::timeout(
            Duration::from_secs(2),
            app.event_loop(&mut terminal, source.as_ref(), &mut rx),
        )
        .await;
        assert!(res.expect("loop returns while the fetch is pending").is_ok());
        assert!(app.should_quit);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_ends_the_loop() {
        let source = StalledSource::default();
        let d = Dashboard::new(Surface::standard()).unwrap();
        let mut app = App::new(d, Duration::from_secs(30), "site-1");
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let (tx, mut rx) = unbounded_channel::<Event>();
        drop(tx);

        let res = tokio::time::timeout(
            Duration::from_secs(2),
            app.event_loop(&mut terminal, &source, &mut rx),
        )
        .await;
        assert!(res.expect("loop returns once input is gone").is_ok());
    }
}
