/// Diagnostic record for traceability.
///
/// Non-fatal failures (a fetch that failed, a response that arrived too late)
/// land here so callers can inspect them without scraping logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Monotonic index of the event within the bus.
    pub index: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    next_index: u64,
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        let index = self.next_index;
        self.next_index += 1;
        self.events.push(Event {
            index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
