use inbox_core::TaskStatus;

/// Maps a free-form action label to the status it implies.
pub fn classify(action: &str) -> TaskStatus {
    let normalized = action.trim().to_lowercase();

    match normalized.as_str() {
        "archive" => return TaskStatus::Archived,
        "done" | "complete" | "mark as done" | "mark as complete" => return TaskStatus::Done,
        "hold" | "mark as pending" => return TaskStatus::Pending,
        "start" | "in progress" | "mark as in progress" => return TaskStatus::InProgress,
        _ => {}
    }

    if normalized.contains("done") || normalized.contains("complete") {
        TaskStatus::Done
    } else if normalized.contains("start") || normalized.contains("progress") {
        TaskStatus::InProgress
    } else {
        TaskStatus::Pending
    }
}

/// Decides the status a confirmed action resolves to, and with it whether the
/// task leaves the active list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerminalRule {
    /// Every confirmed action completes the task.
    #[default]
    AlwaysAfterConfirm,
    /// The action resolves to whatever [`classify`] says.
    ByClassifiedStatus,
}

impl TerminalRule {
    pub fn resolve(self, action: &str) -> TaskStatus {
        match self {
            Self::AlwaysAfterConfirm => TaskStatus::Done,
            Self::ByClassifiedStatus => classify(action),
        }
    }

    pub fn is_terminal(self, action: &str) -> bool {
        self.resolve(action).is_done()
    }
}
