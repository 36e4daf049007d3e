use inbox_core::{category_icon, Task, UserSettings, WebhookSecurity};
use inbox_email::SpamAlert;
use inbox_settings::{
    mailbox_address_line, SettingToggle, FORWARDING_GUIDES, FORWARDING_TIPS,
};
use inbox_tasks::{ListPhase, TaskListSnapshot};
use std::fmt::Write;

pub fn task_card(task: &Task, enabled: bool, processing: bool) -> String {
    let mut out = String::new();
    let context = task.context.as_deref().unwrap_or("Email");
    let _ = writeln!(out, "{} {}  [{}]", category_icon(task.context.as_deref()), context, task.id);
    let _ = writeln!(out, "   {}", task.display_subject());
    if let Some(sender) = task.display_sender() {
        let _ = writeln!(out, "   from {sender}");
    }
    if let Some(summary) = task.summary.as_deref() {
        let _ = writeln!(out, "   {summary}");
    }

    let actions = task
        .display_actions()
        .iter()
        .map(|action| format!("[{action}]"))
        .collect::<Vec<_>>()
        .join(" ");
    let marker = if processing {
        "  (processing...)"
    } else if !enabled {
        "  (disabled)"
    } else {
        ""
    };
    let _ = writeln!(out, "   {actions}{marker}");
    out
}

pub fn task_list(snapshot: &TaskListSnapshot) -> String {
    let mut out = String::new();

    if let Some(notice) = &snapshot.notice {
        let prefix = if notice.is_error() { "!" } else { "*" };
        let _ = writeln!(out, "{prefix} {}", notice.message());
    }

    match &snapshot.phase {
        ListPhase::Loading => {
            let _ = writeln!(out, "Loading tasks...");
        }
        ListPhase::Error(message) => {
            let _ = writeln!(out, "Could not load tasks: {message}");
            let _ = writeln!(out, "Run `inbox tasks list` again to retry.");
        }
        ListPhase::Ready if snapshot.tasks.is_empty() => {
            let _ = writeln!(out, "No tasks found.");
        }
        ListPhase::Ready => {
            for task in &snapshot.tasks {
                out.push_str(&task_card(
                    task,
                    snapshot.can_act(&task.id),
                    snapshot.is_processing(&task.id),
                ));
            }
        }
    }

    out
}

pub fn spam_alert(alert: &SpamAlert) -> String {
    if !alert.is_visible() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} Review:", alert.headline());
    for email in alert.flagged() {
        let _ = writeln!(
            out,
            "   {}  {} - {}",
            email.id,
            email.sender.as_deref().unwrap_or("(unknown sender)"),
            email.subject.as_deref().unwrap_or("(no subject)")
        );
    }
    out
}

pub fn settings(settings: &UserSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Settings for {}", settings.user_id);
    for toggle in SettingToggle::ALL {
        let state = if toggle.current(settings) { "on " } else { "off" };
        let _ = writeln!(out, "  [{state}] {}: {}", toggle.label(), toggle.description());
    }
    let _ = writeln!(out, "{}", mailbox_address_line(settings));
    out
}

pub fn forwarding() -> String {
    let mut out = String::from("How to Forward Emails\n");
    for guide in FORWARDING_GUIDES {
        let _ = writeln!(out, "\n{}", guide.provider);
        for (index, step) in guide.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {step}", index + 1);
        }
        let _ = writeln!(out, "  Guide: {}", guide.guide_url);
    }
    let _ = writeln!(out, "\nTips:");
    for tip in FORWARDING_TIPS {
        let _ = writeln!(out, "  - {tip}");
    }
    out
}

pub fn webhook_security(security: &WebhookSecurity) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "API key: {}", security.api_key);
    let _ = writeln!(out, "Active: {}", if security.active { "yes" } else { "no" });
    if security.allowed_ips.is_empty() {
        let _ = writeln!(out, "Allowed IPs: any");
    } else {
        let _ = writeln!(out, "Allowed IPs:");
        for ip in &security.allowed_ips {
            let _ = writeln!(out, "  - {ip}");
        }
    }
    out
}
