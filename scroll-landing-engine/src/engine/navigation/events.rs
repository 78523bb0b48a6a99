use bevy::prelude::*;

/// Where a seek should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekTarget {
    /// Absolute section index; clamped by the navigator.
    Index(isize),
    Next,
    Previous,
    /// Programmatic skip to the last section.
    Final,
}

/// Origin of a seek request, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekSource {
    Rpc,
    SkipButton,
    Keyboard,
}

/// Request to move to a section, from the shell, keyboard or RPC.
#[derive(Event, Debug, Clone, Copy)]
pub struct SeekRequestEvent {
    pub target: SeekTarget,
    pub source: SeekSource,
}

/// The scroll container offset moved this frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContainerScrolled {
    pub scroll_top: f32,
}

/// The navigator's current section changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChangedEvent {
    pub index: usize,
    pub count: usize,
    pub is_final: bool,
}
