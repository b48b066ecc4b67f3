mod canvas;
mod controller;
mod error;
mod event;
mod explorer;
mod script;

#[cfg(test)]
mod tests;

pub use canvas::{
    BackgroundLayer, Canvas, DisplayHandle, DisplayItem, DisplayList, RecordingCanvas, Status,
    StatusLevel,
};
pub use controller::{AnnotationController, INSTRUCTIONS};
pub use error::{Result, SessionError};
pub use event::{Event, EventHandler, Flow, Hit, MouseButton, Pane, hit_test};
pub use explorer::{ThresholdExplorer, ThresholdState};
pub use script::{EventScript, ScriptAction};
