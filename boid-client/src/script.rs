use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::{PointerSignal, PointerSource, Vector2D};
use boid_shared::{PointerEvent, PointerState};

/// Convert a wire pointer state into the signal the flock consumes.
pub fn to_signal(state: &PointerState) -> PointerSignal {
    match state.position {
        Some(position) if state.is_active() => PointerSignal {
            position: Vector2D::new(position.x, position.y),
            attract: state.attract,
            repel: state.repel,
            repel_radius: state.repel_radius,
        },
        _ => PointerSignal::idle(),
    }
}

/// A timeline of pointer changes replayed frame by frame.
///
/// Each event holds from its frame until the next event. Before the first
/// event the pointer is idle.
#[derive(Debug, Clone, Default)]
pub struct PointerScript {
    events: Vec<PointerEvent>,
    cursor: usize,
    frame: u64,
}

impl PointerScript {
    pub fn new(mut events: Vec<PointerEvent>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self {
            events,
            cursor: 0,
            frame: 0,
        }
    }

    /// Parse JSON lines, one [`PointerEvent`] per line. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut events = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let event: PointerEvent = serde_json::from_str(line)
                .with_context(|| format!("Invalid pointer event on line {}", number + 1))?;
            events.push(event);
        }
        Ok(Self::new(events))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pointer script {}", path.display()))?;
        let script = Self::parse(&text)
            .with_context(|| format!("Invalid pointer script {}", path.display()))?;
        log::info!(
            "Loaded {} pointer events from {}",
            script.events.len(),
            path.display()
        );
        Ok(script)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pointer state in effect at `frame`, without advancing the replay.
    pub fn pointer_at(&self, frame: u64) -> PointerSignal {
        self.events
            .iter()
            .take_while(|event| event.frame <= frame)
            .last()
            .map(|event| to_signal(&event.pointer))
            .unwrap_or_else(PointerSignal::idle)
    }
}

impl PointerSource for PointerScript {
    /// Return the pointer for the current frame and move to the next one.
    fn sample(&mut self) -> PointerSignal {
        while self
            .events
            .get(self.cursor + 1)
            .is_some_and(|next| next.frame <= self.frame)
        {
            self.cursor += 1;
        }
        let signal = match self.events.get(self.cursor) {
            Some(event) if event.frame <= self.frame => to_signal(&event.pointer),
            _ => PointerSignal::idle(),
        };
        self.frame += 1;
        signal
    }
}
