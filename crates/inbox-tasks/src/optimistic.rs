use crate::TerminalRule;
use inbox_core::{Task, TaskStatus};

/// What an optimistic change did to one task, kept until the backend answers
/// so a rejected change can be undone exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub task_id: String,
    pub pre_image: Task,
    pub index: usize,
    pub resolved_status: TaskStatus,
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticUpdate {
    pub tasks: Vec<Task>,
    /// `None` when `task_id` was not in the list.
    pub pending: Option<PendingChange>,
}

pub fn plan_optimistic(
    tasks: &[Task],
    task_id: &str,
    action: &str,
    rule: TerminalRule,
) -> OptimisticUpdate {
    let Some(index) = tasks.iter().position(|task| task.id == task_id) else {
        return OptimisticUpdate {
            tasks: tasks.to_vec(),
            pending: None,
        };
    };

    let status = rule.resolve(action);
    let removed = status.is_done();
    let mut next = tasks.to_vec();
    let pre_image = if removed {
        next.remove(index)
    } else {
        let pre_image = next[index].clone();
        next[index].status = status.clone();
        pre_image
    };

    OptimisticUpdate {
        tasks: next,
        pending: Some(PendingChange {
            task_id: task_id.to_string(),
            pre_image,
            index,
            resolved_status: status,
            removed,
        }),
    }
}

/// The list as it should look before the backend confirms `action`.
pub fn apply_optimistic(
    tasks: &[Task],
    task_id: &str,
    action: &str,
    rule: TerminalRule,
) -> Vec<Task> {
    plan_optimistic(tasks, task_id, action, rule).tasks
}

/// Forces the task back to `pending`. Cannot bring back a task that was
/// already removed; use [`restore`] for that.
pub fn revert(tasks: &[Task], task_id: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == task_id {
                Task {
                    status: TaskStatus::Pending,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Undoes `change`: a removed task is re-inserted at its old position, a task
/// that is still listed gets its pre-image back.
pub fn restore(tasks: &[Task], change: &PendingChange) -> Vec<Task> {
    let mut next = tasks.to_vec();
    match next.iter().position(|task| task.id == change.task_id) {
        Some(index) => next[index] = change.pre_image.clone(),
        None if change.removed => {
            let index = change.index.min(next.len());
            next.insert(index, change.pre_image.clone());
        }
        None => {}
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            user_id: "default".to_string(),
            sender: None,
            subject: Some(format!("subject {id}")),
            summary: Some(format!("summary {id}")),
            context: None,
            actions: vec!["Reply".to_string(), "Archive".to_string()],
            status,
            action_taken: None,
            email: None,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("t1", TaskStatus::Pending),
            task("t2", TaskStatus::Pending),
            task("t3", TaskStatus::InProgress),
        ]
    }

    #[test]
    fn terminal_action_removes_only_the_target() {
        let tasks = sample();
        let next = apply_optimistic(&tasks, "t2", "Mark as Done", TerminalRule::ByClassifiedStatus);
        assert_eq!(next, vec![tasks[0].clone(), tasks[2].clone()]);
    }

    #[test]
    fn non_terminal_action_changes_only_the_status() {
        let tasks = sample();
        let next = apply_optimistic(&tasks, "t1", "Start", TerminalRule::ByClassifiedStatus);
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].status, TaskStatus::InProgress);
        assert_eq!(
            Task {
                status: TaskStatus::Pending,
                ..next[0].clone()
            },
            tasks[0]
        );
        assert_eq!(&next[1..], &tasks[1..]);
    }

    #[test]
    fn archive_is_removed_under_the_current_terminal_rule() {
        let tasks = sample();
        let next = apply_optimistic(&tasks, "t1", "Archive", TerminalRule::AlwaysAfterConfirm);
        assert!(next.iter().all(|task| task.id != "t1"));
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn archive_is_kept_as_archived_under_the_classified_rule() {
        let tasks = sample();
        let next = apply_optimistic(&tasks, "t1", "Archive", TerminalRule::ByClassifiedStatus);
        assert_eq!(next[0].id, "t1");
        assert_eq!(next[0].status, TaskStatus::Archived);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let tasks = sample();
        let update =
            plan_optimistic(&tasks, "missing", "Archive", TerminalRule::AlwaysAfterConfirm);
        assert_eq!(update.tasks, tasks);
        assert!(update.pending.is_none());
        assert_eq!(revert(&tasks, "missing"), tasks);
    }

    #[test]
    fn revert_resets_status_and_is_idempotent() {
        let tasks = apply_optimistic(&sample(), "t1", "Start", TerminalRule::ByClassifiedStatus);
        let once = revert(&tasks, "t1");
        assert_eq!(once[0].status, TaskStatus::Pending);
        assert_eq!(revert(&once, "t1"), once);
    }

    #[test]
    fn revert_cannot_resurrect_a_removed_task() {
        let tasks = apply_optimistic(&sample(), "t2", "Reply", TerminalRule::AlwaysAfterConfirm);
        assert!(revert(&tasks, "t2").iter().all(|task| task.id != "t2"));
    }

    #[test]
    fn restore_reinserts_removed_task_at_its_position() {
        let tasks = sample();
        let update = plan_optimistic(&tasks, "t2", "Reply", TerminalRule::AlwaysAfterConfirm);
        let change = update.pending.expect("pending change");
        assert!(change.removed);

        let restored = restore(&update.tasks, &change);
        assert_eq!(restored, tasks);
        assert_eq!(restore(&restored, &change), tasks);
    }

    #[test]
    fn restore_puts_back_the_pre_image_status() {
        let tasks = sample();
        let update = plan_optimistic(&tasks, "t3", "Hold", TerminalRule::ByClassifiedStatus);
        assert_eq!(update.tasks[2].status, TaskStatus::Pending);

        let restored = restore(&update.tasks, &update.pending.expect("pending change"));
        assert_eq!(restored[2].status, TaskStatus::InProgress);
    }

    #[test]
    fn restore_clamps_index_when_list_shrank() {
        let tasks = sample();
        let update = plan_optimistic(&tasks, "t3", "Reply", TerminalRule::AlwaysAfterConfirm);
        let change = update.pending.expect("pending change");

        let restored = restore(&[], &change);
        assert_eq!(restored, vec![tasks[2].clone()]);
    }
}
