use std::collections::VecDeque;
use std::path::PathBuf;

/// Something that happened on the host side that the emulator should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key in the range 0..=0xF went down.
    KeyDown(u8),
    /// A key in the range 0..=0xF went up.
    KeyUp(u8),
    /// Reset the machine and run the program at this path.
    Load(PathBuf),
    Quit,
}

/// Represents an input device, polled by the host between steps.
pub trait EmulatorInput {
    /// Get the next pending event, if any. Must not block.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> Option<InputEvent> {
        None
    }
}

/// An input device that replays a fixed sequence of events, one batch per poll round.
pub struct ScriptedInput {
    events: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    /// `None` entries end a poll round, so events can be spread over several steps.
    pub fn new<T: IntoIterator<Item = Option<InputEvent>>>(events: T) -> ScriptedInput {
        ScriptedInput {
            events: events.into_iter().collect(),
        }
    }
}

impl EmulatorInput for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.events.pop_front().flatten()
    }
}
