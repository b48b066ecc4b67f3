use std::path::Path;

use super::{Canvas, Event, EventHandler, Flow, Hit, MouseButton, Pane, Result, SessionError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptAction {
    Click {
        button: MouseButton,
        position: [f64; 2],
    },
    Key(char),
    Pick(f64),
}

/// Recorded canvas input, one action per line:
///
/// ```text
/// click left 10.5 20
/// click right 0 0
/// key w
/// pick 0.35
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventScript {
    actions: Vec<ScriptAction>,
}

impl EventScript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut actions = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            actions.push(parse_action(line).map_err(|reason| SessionError::Script {
                line: index + 1,
                reason,
            })?);
        }
        Ok(Self { actions })
    }

    pub fn actions(&self) -> &[ScriptAction] {
        &self.actions
    }

    /// Feeds the actions to `handler` until it asks to quit. Clicks are
    /// resolved to a `Hit` by `resolve`, the way a canvas would.
    pub fn replay<H: EventHandler>(
        &self,
        handler: &mut H,
        canvas: &mut dyn Canvas,
        mut resolve: impl FnMut(&H, [f64; 2]) -> Hit,
    ) -> Flow {
        for action in &self.actions {
            let event = match *action {
                ScriptAction::Click { button, position } => Event::Click {
                    button,
                    position,
                    hit: resolve(handler, position),
                },
                ScriptAction::Key(key) => Event::KeyPress(key),
                ScriptAction::Pick(value) => Event::Pick {
                    value,
                    pane: Pane::Histogram,
                },
            };
            if handler.handle(&event, canvas) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }
}

fn parse_action(line: &str) -> std::result::Result<ScriptAction, String> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    match tokens.as_slice() {
        ["click", button, x, y] => {
            let button = match *button {
                "left" => MouseButton::Left,
                "right" => MouseButton::Right,
                other => return Err(format!("unknown mouse button `{other}`")),
            };
            Ok(ScriptAction::Click {
                button,
                position: [parse_number(x)?, parse_number(y)?],
            })
        }
        ["key", key] => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => Ok(ScriptAction::Key(key)),
                _ => Err(format!("expected a single key, got `{key}`")),
            }
        }
        ["pick", value] => Ok(ScriptAction::Pick(parse_number(value)?)),
        _ => Err(format!("unrecognised action `{line}`")),
    }
}

fn parse_number(token: &str) -> std::result::Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("`{token}` is not a number"))
}
