use std::collections::HashMap;
use std::fmt;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::error::{Error, Result};
use crate::render::RenderStats;
use crate::rng::RandomSource;
use crate::surface::Surface;
use crate::view::View;

/// Keys the handler can bind, independent of the windowing backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Char(char),
    Other(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Escape => f.write_str("Esc"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

impl Key {
    /// Translate a winit logical key. Letters are lowercased so bindings do
    /// not depend on Shift or Caps Lock.
    pub fn from_winit(key: &WinitKey) -> Self {
        match key {
            WinitKey::Named(NamedKey::ArrowLeft) => Key::Left,
            WinitKey::Named(NamedKey::ArrowRight) => Key::Right,
            WinitKey::Named(NamedKey::ArrowUp) => Key::Up,
            WinitKey::Named(NamedKey::ArrowDown) => Key::Down,
            WinitKey::Named(NamedKey::Escape) => Key::Escape,
            WinitKey::Character(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other(s.to_string()),
                }
            }
            other => Key::Other(format!("{other:?}")),
        }
    }

    /// Parse a key from a script token such as `left`, `esc` or `+`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "esc" | "escape" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

/// One input event, as delivered by an event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Quit,
    Other(String),
}

impl InputEvent {
    /// Translate a window event for the input handler.
    ///
    /// Returns `None` for events the window layer consumes itself (redraws,
    /// resizes, key releases). Anything else without a binding comes back as
    /// [`InputEvent::Other`] so it is reported like an unbound key.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. } => (event.state == ElementState::Pressed)
                .then(|| InputEvent::KeyDown(Key::from_winit(&event.logical_key))),
            WindowEvent::RedrawRequested | WindowEvent::Resized(_) => None,
            other => Some(InputEvent::Other(format!("{other:?}"))),
        }
    }
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pan by `(dx, dy)` steps; one step is `pan_step * edge` pixels.
    Pan { dx: i64, dy: i64 },
    ZoomIn,
    ZoomOut,
    Recolor,
    Quit,
}

/// Key to action map.
pub struct KeyBindings {
    map: HashMap<Key, Action>,
}

impl KeyBindings {
    pub fn defaults() -> Self {
        Self::from_pairs([
            (Key::Left, Action::Pan { dx: 1, dy: 0 }),
            (Key::Right, Action::Pan { dx: -1, dy: 0 }),
            (Key::Up, Action::Pan { dx: 0, dy: 1 }),
            (Key::Down, Action::Pan { dx: 0, dy: -1 }),
            (Key::Char('+'), Action::ZoomIn),
            (Key::Char('='), Action::ZoomIn),
            (Key::Char('-'), Action::ZoomOut),
            (Key::Char('r'), Action::Recolor),
            (Key::Char('q'), Action::Quit),
            (Key::Escape, Action::Quit),
        ])
    }

    /// Build from `(key, action)` pairs. Later pairs override earlier ones for
    /// the same key.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Key, Action)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub fn lookup(&self, key: &Key) -> Option<Action> {
        self.map.get(key).copied()
    }
}

/// Result of one handled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State was updated and exactly one render pass ran.
    Rendered(RenderStats),
    /// The control loop should stop.
    Quit,
}

/// Applies bound actions to a view and its world, then re-renders.
pub struct InputHandler {
    bindings: KeyBindings,
    pan_step: i64,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings, pan_step: i64) -> Self {
        Self { bindings, pan_step }
    }

    /// Handle one event to completion.
    ///
    /// Unbound keys and unknown events return [`Error::UnhandledInput`] and
    /// leave every piece of state untouched.
    pub fn handle<S, R>(
        &self,
        event: &InputEvent,
        view: &mut View<'_>,
        surface: &mut S,
        rng: &mut R,
    ) -> Result<Outcome>
    where
        S: Surface + ?Sized,
        R: RandomSource + ?Sized,
    {
        let action = match event {
            InputEvent::Quit => return Ok(Outcome::Quit),
            InputEvent::Other(what) => {
                return Err(Error::UnhandledInput(format!("event {what}")));
            }
            InputEvent::KeyDown(key) => self
                .bindings
                .lookup(key)
                .ok_or_else(|| Error::UnhandledInput(format!("key {key}")))?,
        };

        match action {
            Action::Pan { dx, dy } => {
                let step = self.pan_step * view.edge() as i64;
                view.pan(dx * step, dy * step);
            }
            Action::ZoomIn => {
                view.zoom_in();
            }
            Action::ZoomOut => {
                view.zoom_out();
            }
            Action::Recolor => view.world().borrow_mut().recolor_all(rng),
            Action::Quit => return Ok(Outcome::Quit),
        }

        let stats = view.render(surface);
        surface.present();
        Ok(Outcome::Rendered(stats))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::rng::create_rng;
    use crate::surface::FrameBuffer;
    use crate::world::World;

    #[test]
    fn default_bindings_exist() {
        let kb = KeyBindings::defaults();
        assert_eq!(kb.lookup(&Key::Left), Some(Action::Pan { dx: 1, dy: 0 }));
        assert_eq!(kb.lookup(&Key::Down), Some(Action::Pan { dx: 0, dy: -1 }));
        assert_eq!(kb.lookup(&Key::Char('+')), Some(Action::ZoomIn));
        assert_eq!(kb.lookup(&Key::Char('=')), Some(Action::ZoomIn));
        assert_eq!(kb.lookup(&Key::Char('-')), Some(Action::ZoomOut));
        assert_eq!(kb.lookup(&Key::Char('r')), Some(Action::Recolor));
        assert_eq!(kb.lookup(&Key::Escape), Some(Action::Quit));
    }

    #[test]
    fn unbound_key_returns_none() {
        let kb = KeyBindings::defaults();
        assert_eq!(kb.lookup(&Key::Char('z')), None);
        assert_eq!(kb.lookup(&Key::Other("F1".into())), None);
    }

    #[test]
    fn from_winit_maps_arrows_and_characters() {
        assert_eq!(Key::from_winit(&WinitKey::Named(NamedKey::ArrowLeft)), Key::Left);
        assert_eq!(Key::from_winit(&WinitKey::Named(NamedKey::Escape)), Key::Escape);
        assert_eq!(Key::from_winit(&WinitKey::Character("R".into())), Key::Char('r'));
        assert_eq!(Key::from_winit(&WinitKey::Character("+".into())), Key::Char('+'));
        assert!(matches!(
            Key::from_winit(&WinitKey::Named(NamedKey::F1)),
            Key::Other(_)
        ));
    }

    #[test]
    fn window_events_translate() {
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::CloseRequested),
            Some(InputEvent::Quit)
        );
        assert_eq!(InputEvent::from_window_event(&WindowEvent::RedrawRequested), None);
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Resized(
                winit::dpi::PhysicalSize::new(640, 480)
            )),
            None
        );
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Focused(true)),
            Some(InputEvent::Other("Focused(true)".into()))
        );
    }

    #[test]
    fn from_name_parses_script_tokens() {
        assert_eq!(Key::from_name("Left"), Key::Left);
        assert_eq!(Key::from_name("esc"), Key::Escape);
        assert_eq!(Key::from_name("R"), Key::Char('r'));
        assert_eq!(Key::from_name("-"), Key::Char('-'));
        assert_eq!(Key::from_name("F1"), Key::Other("F1".into()));
    }

    #[test]
    fn pan_key_moves_by_step_times_edge() {
        let world = RefCell::new(World::init(8, 8, &mut create_rng(5)).expect("alloc"));
        let mut view = View::attach(&world, 64, 64, 4, 0, 0);
        let mut fb = FrameBuffer::new(64, 64);
        let handler = InputHandler::new(KeyBindings::defaults(), 3);

        let out = handler
            .handle(&InputEvent::KeyDown(Key::Left), &mut view, &mut fb, &mut create_rng(1))
            .expect("handled");
        assert!(matches!(out, Outcome::Rendered(_)));
        assert_eq!(view.offset(), (12, 0));

        handler
            .handle(&InputEvent::KeyDown(Key::Down), &mut view, &mut fb, &mut create_rng(1))
            .expect("handled");
        assert_eq!(view.offset(), (12, -12));
        assert_eq!(fb.frames_presented(), 2);
    }

    #[test]
    fn quit_key_and_event_do_not_render() {
        let world = RefCell::new(World::init(2, 2, &mut create_rng(5)).expect("alloc"));
        let mut view = View::attach(&world, 16, 16, 4, 0, 0);
        let mut fb = FrameBuffer::new(16, 16);
        let handler = InputHandler::new(KeyBindings::defaults(), 1);
        let mut rng = create_rng(1);

        let out = handler
            .handle(&InputEvent::KeyDown(Key::Char('q')), &mut view, &mut fb, &mut rng)
            .expect("handled");
        assert_eq!(out, Outcome::Quit);
        let out = handler
            .handle(&InputEvent::Quit, &mut view, &mut fb, &mut rng)
            .expect("handled");
        assert_eq!(out, Outcome::Quit);
        assert_eq!(fb.frames_presented(), 0);
    }

    #[test]
    fn unknown_event_is_unhandled() {
        let world = RefCell::new(World::init(2, 2, &mut create_rng(5)).expect("alloc"));
        let mut view = View::attach(&world, 16, 16, 4, 0, 0);
        let mut fb = FrameBuffer::new(16, 16);
        let handler = InputHandler::new(KeyBindings::defaults(), 1);

        let err = handler
            .handle(
                &InputEvent::Other("focus".into()),
                &mut view,
                &mut fb,
                &mut create_rng(1),
            )
            .expect_err("unhandled");
        assert_eq!(err, Error::UnhandledInput("event focus".into()));
    }
}
