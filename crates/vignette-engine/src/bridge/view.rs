use bytemuck::{Pod, Zeroable};

use crate::bridge::protocol::{
    ViewLayout, CH_EVENT_COUNT, CH_VERSION, EVENT_FLOATS, SPARKLE_FLOATS, VIEW_VERSION,
};

/// A discrete notification for the DOM layer (stage changed, box opened).
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct UiEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl UiEvent {
    pub const FLOATS: usize = EVENT_FLOATS;

    pub fn new(kind: u32) -> Self {
        Self {
            kind: kind as f32,
            ..Self::default()
        }
    }

    pub fn with_a(mut self, a: f32) -> Self {
        self.a = a;
        self
    }
}

/// The flat f32 buffer the DOM layer reads every frame: named header
/// channels, per-line alphas, sparkle records, and the frame's events.
#[derive(Debug)]
pub struct ViewBuffer {
    data: Vec<f32>,
    layout: ViewLayout,
    event_count: usize,
}

impl ViewBuffer {
    pub fn new(layout: ViewLayout) -> Self {
        let mut buffer = Self {
            data: vec![0.0; layout.total_floats],
            layout,
            event_count: 0,
        };
        buffer.set(CH_VERSION, VIEW_VERSION);
        buffer
    }

    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    /// Write one channel. Out-of-range indices are dropped rather than
    /// panicking mid-frame.
    pub fn set(&mut self, channel: usize, value: f32) {
        if let Some(slot) = self.data.get_mut(channel) {
            *slot = value;
        }
    }

    pub fn get(&self, channel: usize) -> f32 {
        self.data.get(channel).copied().unwrap_or(0.0)
    }

    /// Buffer index of line `i`'s alpha slot, if within capacity.
    pub fn line_channel(&self, i: usize) -> Option<usize> {
        (i < self.layout.max_lines).then(|| self.layout.line_offset + i)
    }

    /// Write one sparkle record. Out-of-capacity indices are dropped.
    pub fn set_sparkle(&mut self, i: usize, x: f32, y: f32, scale: f32, alpha: f32) {
        if i >= self.layout.max_sparkles {
            return;
        }
        let base = self.layout.sparkle_offset + i * SPARKLE_FLOATS;
        self.data[base] = x;
        self.data[base + 1] = y;
        self.data[base + 2] = scale;
        self.data[base + 3] = alpha;
    }

    /// Queue an event for this frame. Returns false when the event
    /// section is full.
    pub fn push_event(&mut self, event: UiEvent) -> bool {
        if self.event_count >= self.layout.max_events {
            return false;
        }
        let base = self.layout.event_offset + self.event_count * EVENT_FLOATS;
        self.data[base] = event.kind;
        self.data[base + 1] = event.a;
        self.data[base + 2] = event.b;
        self.data[base + 3] = event.c;
        self.event_count += 1;
        self.data[CH_EVENT_COUNT] = self.event_count as f32;
        true
    }

    /// Drop this frame's events. Called by the runner at the top of each
    /// tick so the DOM layer only ever sees fresh notifications.
    pub fn clear_events(&mut self) {
        self.event_count = 0;
        self.data[CH_EVENT_COUNT] = 0.0;
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// Event record `i` of the current frame, if present.
    pub fn event(&self, i: usize) -> Option<UiEvent> {
        if i >= self.event_count {
            return None;
        }
        let base = self.layout.event_offset + i * EVENT_FLOATS;
        Some(UiEvent {
            kind: self.data[base],
            a: self.data[base + 1],
            b: self.data[base + 2],
            c: self.data[base + 3],
        })
    }

    // ---- Raw access for the WASM bridge ----

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn len_floats(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::CH_STAGE;

    fn buffer() -> ViewBuffer {
        ViewBuffer::new(ViewLayout::new(4, 2, 2))
    }

    #[test]
    fn set_and_get_channels() {
        let mut view = buffer();
        view.set(CH_STAGE, 2.0);
        assert_eq!(view.get(CH_STAGE), 2.0);
        assert_eq!(view.get(CH_VERSION), VIEW_VERSION);
    }

    #[test]
    fn line_channel_respects_capacity() {
        let view = buffer();
        assert_eq!(view.line_channel(0), Some(view.layout().line_offset));
        assert_eq!(view.line_channel(3), Some(view.layout().line_offset + 3));
        assert_eq!(view.line_channel(4), None);
    }

    #[test]
    fn sparkle_write_lands_in_section() {
        let mut view = buffer();
        view.set_sparkle(1, 0.25, 0.75, 1.2, 0.5);
        let base = view.layout().sparkle_offset + SPARKLE_FLOATS;
        assert_eq!(view.get(base), 0.25);
        assert_eq!(view.get(base + 3), 0.5);
        // Beyond capacity: silently dropped.
        view.set_sparkle(2, 1.0, 1.0, 1.0, 1.0);
    }

    #[test]
    fn events_fill_and_overflow() {
        let mut view = buffer();
        assert!(view.push_event(UiEvent::new(1)));
        assert!(view.push_event(UiEvent::new(2).with_a(3.0)));
        assert!(!view.push_event(UiEvent::new(3)));
        assert_eq!(view.event_count(), 2);
        assert_eq!(view.get(CH_EVENT_COUNT), 2.0);

        let second = view.event(1).unwrap();
        assert_eq!(second.kind, 2.0);
        assert_eq!(second.a, 3.0);
        assert!(view.event(2).is_none());

        view.clear_events();
        assert_eq!(view.event_count(), 0);
        assert_eq!(view.get(CH_EVENT_COUNT), 0.0);
        assert!(view.push_event(UiEvent::new(4)));
    }
}
