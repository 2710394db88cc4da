//! Board notifications
//!
//! Zero-argument signals broadcast synchronously to every connected listener,
//! in the order the listeners were connected.

/// Handle returned by [`Signal::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Ordered list of listeners for one notification
#[derive(Default)]
pub struct Signal {
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
    next_id: u32,
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn broadcast(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// The three notifications a board publishes
#[derive(Debug, Default)]
pub struct BoardSignals {
    /// Buttons changed position
    pub grid_updated: Signal,
    pub buttons_activated: Signal,
    pub buttons_deactivated: Signal,
}
