//! Last-issued-wins bookkeeping for refetches of a single screen.

/// Ticket for one refetch. Only the newest ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct RefreshSequence {
    latest: u64,
    mounted: bool,
}

impl Default for RefreshSequence {
    fn default() -> Self {
        Self {
            latest: 0,
            mounted: true,
        }
    }
}

impl RefreshSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RefreshTicket {
        self.latest += 1;
        RefreshTicket(self.latest)
    }

    /// True only for the most recently issued ticket of a still-mounted view.
    pub fn accepts(&self, ticket: RefreshTicket) -> bool {
        self.mounted && ticket.0 == self.latest
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}
