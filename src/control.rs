use std::collections::VecDeque;

use crate::input::{InputEvent, InputHandler, Outcome};
use crate::rng::RandomSource;
use crate::surface::Surface;
use crate::view::View;

/// Blocking supplier of input events.
pub trait EventSource {
    fn next_event(&mut self) -> InputEvent;
}

/// In-memory event queue. Yields `Quit` forever once drained.
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> InputEvent {
        self.queue.pop_front().unwrap_or(InputEvent::Quit)
    }
}

/// Counters for one run of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopSummary {
    /// Events read, including the one that ended the loop.
    pub events: usize,
    /// Render passes, including the initial one.
    pub renders: usize,
    /// Unhandled-input diagnostics emitted.
    pub diagnostics: usize,
    /// Tiles the surface refused across all passes.
    pub draw_failures: usize,
}

/// Render once, then read and fully handle events one at a time until a quit
/// signal arrives.
pub fn run<E, S, R>(
    events: &mut E,
    handler: &InputHandler,
    view: &mut View<'_>,
    surface: &mut S,
    rng: &mut R,
) -> LoopSummary
where
    E: EventSource + ?Sized,
    S: Surface + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut summary = LoopSummary::default();

    let stats = view.render(surface);
    surface.present();
    summary.renders += 1;
    summary.draw_failures += stats.failed;

    loop {
        let event = events.next_event();
        summary.events += 1;
        match handler.handle(&event, view, surface, rng) {
            Ok(Outcome::Rendered(stats)) => {
                summary.renders += 1;
                summary.draw_failures += stats.failed;
            }
            Ok(Outcome::Quit) => break,
            Err(e) => {
                log::warn!("{e}");
                summary.diagnostics += 1;
            }
        }
    }

    log::info!(
        "control loop done: {} events, {} renders, {} diagnostics",
        summary.events,
        summary.renders,
        summary.diagnostics
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn scripted_events_drain_then_quit() {
        let mut src = ScriptedEvents::new([InputEvent::KeyDown(Key::Up)]);
        assert_eq!(src.remaining(), 1);
        assert_eq!(src.next_event(), InputEvent::KeyDown(Key::Up));
        assert_eq!(src.next_event(), InputEvent::Quit);
        assert_eq!(src.next_event(), InputEvent::Quit);
    }

    #[test]
    fn push_appends() {
        let mut src = ScriptedEvents::default();
        src.push(InputEvent::Other("a".into()));
        src.push(InputEvent::KeyDown(Key::Left));
        assert_eq!(src.next_event(), InputEvent::Other("a".into()));
        assert_eq!(src.next_event(), InputEvent::KeyDown(Key::Left));
    }
}
