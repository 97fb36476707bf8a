/// The closed set of labels a journal line can carry. These strings never
/// change with the UI language; a journal written under `--lang de` must stay
/// readable under `--lang en` and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    Arrive,
    Leave,
    LeaveHibernation,
    ArriveHibernation,
    LeaveClosed,
    LeaveTerminated,
}

impl LogEvent {
    pub fn label(&self) -> &'static str {
        match self {
            LogEvent::Arrive => "ARRIVE",
            LogEvent::Leave => "LEAVE",
            LogEvent::LeaveHibernation => "LEAVE (app hibernation)",
            LogEvent::ArriveHibernation => "ARRIVE (from hibernation)",
            LogEvent::LeaveClosed => "LEAVE (app closed)",
            LogEvent::LeaveTerminated => "LEAVE (app forcefully terminated)",
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            LogEvent::Arrive | LogEvent::ArriveHibernation => EventKind::Arrive,
            LogEvent::Leave
            | LogEvent::LeaveHibernation
            | LogEvent::LeaveClosed
            | LogEvent::LeaveTerminated => EventKind::Leave,
        }
    }
}

/// How a label participates in session pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Arrive,
    Leave,
}

impl EventKind {
    /// Keyword scan over the label field. Arrive wins when both keywords are
    /// present; labels outside the known set still classify as long as they
    /// carry one of the keywords, so hand-edited journals keep working.
    pub fn classify(label: &str) -> Option<EventKind> {
        if label.contains("ARRIVE") {
            Some(EventKind::Arrive)
        } else if label.contains("LEAVE") {
            Some(EventKind::Leave)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventKind, LogEvent};

    #[test]
    fn every_label_classifies_as_its_own_kind() {
        for event in [
            LogEvent::Arrive,
            LogEvent::Leave,
            LogEvent::LeaveHibernation,
            LogEvent::ArriveHibernation,
            LogEvent::LeaveClosed,
            LogEvent::LeaveTerminated,
        ] {
            assert_eq!(EventKind::classify(event.label()), Some(event.kind()));
        }
    }

    #[test]
    fn unknown_labels_do_not_classify() {
        assert_eq!(EventKind::classify("LUNCH"), None);
        assert_eq!(EventKind::classify(""), None);
    }
}
