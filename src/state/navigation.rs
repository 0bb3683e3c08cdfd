//! Navigation-related state types.
//!
//! This module contains enums describing which tab is active and where the
//! focus sits within the events and address tabs.

/// Specifying the top-level tabs.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Tab {
    Events,
    Address,
    Modals,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Events, Tab::Address, Tab::Modals];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Events => "Events",
            Tab::Address => "Address",
            Tab::Modals => "Modals",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Events => 0,
            Tab::Address => 1,
            Tab::Modals => 2,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Events => Tab::Address,
            Tab::Address => Tab::Modals,
            Tab::Modals => Tab::Events,
        }
    }

    pub fn previous(&self) -> Tab {
        match self {
            Tab::Events => Tab::Modals,
            Tab::Address => Tab::Events,
            Tab::Modals => Tab::Address,
        }
    }
}

/// Specifying the different views within the events tab.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventsView {
    List,
    Create,
}

/// Specifying focus within the address tab.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AddressFocus {
    Search,
    Predictions,
    Form,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Events.next(), Tab::Address);
        assert_eq!(Tab::Address.next(), Tab::Modals);
        assert_eq!(Tab::Modals.next(), Tab::Events);

        for tab in Tab::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
    }

    #[test]
    fn test_tab_titles() {
        assert_eq!(Tab::Events.title(), "Events");
        assert_eq!(Tab::Address.title(), "Address");
        assert_eq!(Tab::Modals.title(), "Modals");
    }

    #[test]
    fn test_events_view() {
        assert_ne!(EventsView::List, EventsView::Create);
    }

    #[test]
    fn test_address_focus() {
        assert_ne!(AddressFocus::Search, AddressFocus::Form);
        assert_ne!(AddressFocus::Search, AddressFocus::Predictions);
    }
}
