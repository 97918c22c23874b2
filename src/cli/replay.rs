//! Offline replay of host events through the theming engine
//!
//! Runs the engine on a virtual clock so a scripted sequence of page
//! lifecycle and scroll events shows exactly when the status bar would
//! have been recolored.

use std::path::Path;
use std::time::Duration;

use crate::cli::commands::{load_config, ReplayArgs};
use crate::error::{Result, ShellError};
use crate::theme::engine::{ColorChange, SamplingStats, ThemeEngine, ThemeEvent};
use crate::theme::sampler::RenderSurface;
use crate::theme::scheduler::ManualScheduler;
use crate::theme::surface::ImageSurface;

/// Event the script can name; timer firings are produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedEvent {
    pub at: Duration,
    pub event: ThemeEvent,
}

/// Parse `"<ms>:<event>,..."`
pub fn parse_script(script: &str) -> Result<Vec<ScriptedEvent>> {
    let mut events = Vec::new();
    let mut last = Duration::ZERO;

    for item in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (time, name) = item
            .split_once(':')
            .ok_or_else(|| invalid(item, "expected <ms>:<event>"))?;
        let ms: u64 = time
            .trim()
            .parse()
            .map_err(|_| invalid(item, "time must be whole milliseconds"))?;
        let at = Duration::from_millis(ms);
        if at < last {
            return Err(invalid(item, "events must be in time order"));
        }
        last = at;

        events.push(ScriptedEvent {
            at,
            event: parse_event(name.trim()).ok_or_else(|| invalid(item, "unknown event"))?,
        });
    }

    if events.is_empty() {
        return Err(ShellError::InvalidInput("Event script is empty".into()));
    }
    Ok(events)
}

fn parse_event(name: &str) -> Option<ThemeEvent> {
    let (kind, value) = match name.split_once('=') {
        Some((kind, value)) => (kind, Some(value)),
        None => (name, None),
    };

    match (kind, value) {
        ("started", None) => Some(ThemeEvent::LoadStarted),
        ("finished", None) => Some(ThemeEvent::LoadFinished),
        ("scroll", None) => Some(ThemeEvent::Scroll),
        ("teardown", None) => Some(ThemeEvent::Teardown),
        ("progress", Some(v)) => v
            .parse::<u8>()
            .ok()
            .filter(|p| *p <= 100)
            .map(ThemeEvent::ProgressChanged),
        ("insets", Some(v)) => v.parse().ok().map(ThemeEvent::InsetsChanged),
        _ => None,
    }
}

fn invalid(item: &str, reason: &str) -> ShellError {
    ShellError::InvalidInput(format!("Invalid event '{}': {}", item, reason))
}

/// Feed the script through a fresh engine; returns every color change with
/// the virtual time it happened at
pub fn replay<R: RenderSurface + ?Sized>(
    surface: &R,
    offset: u32,
    debounce: Duration,
    script: &[ScriptedEvent],
) -> (Vec<(Duration, ColorChange)>, SamplingStats) {
    let mut engine = ThemeEngine::new(ManualScheduler::new())
        .with_offset(offset)
        .with_debounce(debounce);
    let mut changes = Vec::new();

    for scripted in script {
        fire_due(&mut engine, surface, scripted.at, &mut changes);
        if let Some(change) = engine.handle(scripted.event, surface) {
            changes.push((scripted.at, change));
        }
    }

    // Let the trailing debounce settle.
    while let Some(deadline) = engine.scheduler().next_deadline() {
        fire_due(&mut engine, surface, deadline, &mut changes);
    }

    (changes, engine.stats())
}

fn fire_due<R: RenderSurface + ?Sized>(
    engine: &mut ThemeEngine<ManualScheduler>,
    surface: &R,
    until: Duration,
    changes: &mut Vec<(Duration, ColorChange)>,
) {
    for (at, token) in engine.scheduler_mut().advance_to(until) {
        if let Some(change) = engine.handle(ThemeEvent::DeferredSample(token), surface) {
            changes.push((at, change));
        }
    }
}

/// Handle `tint replay`
pub fn handle_replay(args: ReplayArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let offset = args.offset.unwrap_or(config.status_bar_inset);
    let script = parse_script(&args.events)?;
    let surface = ImageSurface::open(&args.image)?;

    let (changes, stats) = replay(&surface, offset, config.scroll_debounce(), &script);

    if changes.is_empty() {
        println!("No status bar changes.");
    }
    for (at, change) in &changes {
        println!(
            "{:>6}ms  {}  {}",
            at.as_millis(),
            change.color,
            change.appearance
        );
    }
    println!();
    println!(
        "{} sample(s), {} skipped, {} change(s)",
        stats.samples, stats.skipped, stats.changes
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::color::Rgb;
    use crate::theme::sampler::tests::StripSurface;

    #[test]
    fn test_parse_script() {
        let script =
            parse_script("0:started, 5:progress=40,9:scroll,12:insets=24,30:finished").unwrap();
        let events: Vec<ThemeEvent> = script.iter().map(|s| s.event).collect();
        assert_eq!(
            events,
            vec![
                ThemeEvent::LoadStarted,
                ThemeEvent::ProgressChanged(40),
                ThemeEvent::Scroll,
                ThemeEvent::InsetsChanged(24),
                ThemeEvent::LoadFinished,
            ]
        );
        assert_eq!(script[1].at, Duration::from_millis(5));
    }

    #[test]
    fn test_parse_script_errors() {
        assert!(parse_script("").is_err());
        assert!(parse_script("5:scroll,3:scroll").is_err());
        assert!(parse_script("x:scroll").is_err());
        assert!(parse_script("0:jump").is_err());
        assert!(parse_script("0:progress=101").is_err());
        assert!(parse_script("0:scroll=1").is_err());
    }

    #[test]
    fn test_replay_scroll_burst() {
        let surface = StripSurface::solid(Rgb::new(0, 90, 200), 8);
        let script = parse_script("0:scroll,3:scroll,6:scroll").unwrap();

        let (changes, stats) = replay(&surface, 0, Duration::from_millis(10), &script);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, Duration::from_millis(16));
        assert_eq!(stats.samples, 1);
    }

    #[test]
    fn test_replay_teardown_drops_pending() {
        let surface = StripSurface::solid(Rgb::WHITE, 8);
        let script = parse_script("0:scroll,4:teardown").unwrap();

        let (changes, stats) = replay(&surface, 0, Duration::from_millis(10), &script);
        assert!(changes.is_empty());
        assert_eq!(stats.samples, 0);
    }

    #[test]
    fn test_replay_load_then_separate_scrolls() {
        let surface = StripSurface::solid(Rgb::WHITE, 8);
        let script = parse_script("0:started,50:scroll,80:scroll").unwrap();

        let (changes, stats) = replay(&surface, 0, Duration::from_millis(10), &script);
        // Only the first sample differs from the initial black.
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, Duration::ZERO);
        assert_eq!(stats.samples, 3);
    }
}
