use crate::cli::{AdminCommand, SettingsCommand, SpamCommand, TasksCommand, UserCommand};
use crate::render;
use crate::state::AppState;
use anyhow::{anyhow, Context};
use inbox_core::UserId;
use inbox_email::SpamAlert;
use inbox_settings::{SettingToggle, WebhookSecurityDraft};
use inbox_tasks::{classify, TaskListController};

pub async fn tasks(state: &AppState, command: TasksCommand) -> anyhow::Result<()> {
    match command {
        TasksCommand::List { listing, offline } => {
            let controller = state.task_controller(state.task_query(listing.status, listing.spam));
            load_or_go_offline(&controller, offline).await;

            let snapshot = controller.snapshot().await;
            print!("{}", render::task_list(&snapshot));
            if !snapshot.read_only {
                let alert = SpamAlert::new(state.email.list_spam(&state.user).await);
                print!("{}", render::spam_alert(&alert));
            }
            Ok(())
        }
        TasksCommand::Act {
            task_id,
            action,
            listing,
        } => {
            let controller = state.task_controller(state.task_query(listing.status, listing.spam));
            controller.load().await.context("load tasks")?;

            let result = controller.perform_action(&task_id, &action).await;
            print!("{}", render::task_list(&controller.snapshot().await));
            let outcome = result.with_context(|| format!("{action} on task {task_id}"))?;
            tracing::debug!(?outcome, "action finished");
            Ok(())
        }
        TasksCommand::Classify { action } => {
            let rule = state.terminal_rule();
            println!("{action:?} -> {}", classify(&action));
            println!(
                "confirming it resolves to {} ({})",
                rule.resolve(&action),
                if rule.is_terminal(&action) {
                    "task leaves the active list"
                } else {
                    "task stays listed"
                }
            );
            Ok(())
        }
        TasksCommand::Cached => {
            match state.cache.read().context("read task cache")? {
                Some(tasks) if tasks.is_empty() => println!("Cached list is empty."),
                Some(tasks) => {
                    for task in &tasks {
                        print!("{}", render::task_card(task, false, false));
                    }
                }
                None => println!("No cached tasks."),
            }
            Ok(())
        }
    }
}

/// A transport failure counts as losing connectivity; the controller then
/// falls back to the cached list.
async fn load_or_go_offline(controller: &TaskListController, offline: bool) {
    if offline {
        controller.connectivity_lost().await;
        return;
    }

    if let Err(err) = controller.load().await {
        if err.is_connectivity() {
            tracing::info!("backend unreachable, switching to cached tasks");
            controller.connectivity_lost().await;
        }
    }
}

pub async fn spam(state: &AppState, command: SpamCommand) -> anyhow::Result<()> {
    match command {
        SpamCommand::List => {
            let alert = SpamAlert::new(state.email.list_spam(&state.user).await);
            if alert.is_visible() {
                print!("{}", render::spam_alert(&alert));
            } else {
                println!("No emails flagged as spam.");
            }
        }
        SpamCommand::NotSpam { email_id } => {
            state
                .email
                .mark_not_spam(&state.user, &email_id)
                .await
                .context("mark email as not spam")?;
            println!("Marked {email_id} as not spam.");
        }
        SpamCommand::Archive { email_id } => {
            state
                .email
                .archive_spam(&state.user, &email_id)
                .await
                .context("archive spam email")?;
            println!("Archived {email_id}.");
        }
    }
    Ok(())
}

pub async fn settings(state: &AppState, command: SettingsCommand) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show => {
            let current = state
                .settings
                .fetch(&state.user)
                .await
                .context("fetch user settings")?;
            print!("{}", render::settings(&current));
        }
        SettingsCommand::Toggle { key } => {
            let toggle = SettingToggle::parse(&key)
                .ok_or_else(|| anyhow!("unknown setting {key:?}"))?;
            let current = state
                .settings
                .fetch(&state.user)
                .await
                .context("fetch user settings")?;
            let updated = state
                .settings
                .update(&state.user, &toggle.flip(&current))
                .await
                .context("update user settings")?;
            println!("Settings updated successfully!");
            print!("{}", render::settings(&updated));
        }
        SettingsCommand::Forwarding => print!("{}", render::forwarding()),
    }
    Ok(())
}

pub async fn admin(state: &AppState, command: AdminCommand) -> anyhow::Result<()> {
    let current = state
        .admin
        .fetch_webhook_security()
        .await
        .context("load webhook security settings")?;
    let mut draft = WebhookSecurityDraft::new(current);

    let changed = match command {
        AdminCommand::Show => false,
        AdminCommand::AddIp { ip } => {
            if !draft.add_ip(&ip) {
                println!("{ip:?} is blank or already allowed.");
            }
            true
        }
        AdminCommand::RemoveIp { ip } => {
            if !draft.remove_ip(&ip) {
                return Err(anyhow!("{ip} is not in the allowlist"));
            }
            true
        }
        AdminCommand::RotateKey => {
            draft.generate_api_key();
            true
        }
        AdminCommand::SetActive { active } => {
            draft.set_active(active);
            true
        }
    };

    let security = if changed {
        let saved = state
            .admin
            .update_webhook_security(draft.security())
            .await
            .context("save webhook security settings")?;
        println!("Webhook security settings saved.");
        saved
    } else {
        draft.into_security()
    };
    print!("{}", render::webhook_security(&security));
    Ok(())
}

pub fn user(state: &AppState, command: UserCommand) -> anyhow::Result<()> {
    match command {
        UserCommand::Show => {
            println!("Current user: {}", state.user);
            if let Some(profile) = state.identity.profile(&state.user) {
                println!("  {} <{}>", profile.name, profile.email);
            }
        }
        UserCommand::Set { user_id } => {
            state
                .identity
                .set(&UserId::new(user_id.trim()))
                .context("store current user")?;
            println!("Current user: {}", state.identity.current()?);
        }
        UserCommand::Clear => {
            state.identity.clear().context("clear current user")?;
            println!("Current user: {}", state.identity.current()?);
        }
        UserCommand::Demo => {
            let users = state.identity.demo_users();
            if users.is_empty() {
                println!("Demo users are only available in dev mode.");
            }
            for user in users {
                let marker = if user == state.user { "*" } else { " " };
                println!("{marker} {user}");
            }
        }
    }
    Ok(())
}
