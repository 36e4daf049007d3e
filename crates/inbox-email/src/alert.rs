use inbox_core::SpamEmail;

/// Dismissible banner listing emails flagged as spam.
#[derive(Debug, Clone, Default)]
pub struct SpamAlert {
    flagged: Vec<SpamEmail>,
    dismissed: bool,
}

impl SpamAlert {
    pub fn new(flagged: Vec<SpamEmail>) -> Self {
        Self {
            flagged,
            dismissed: false,
        }
    }

    pub fn flagged(&self) -> &[SpamEmail] {
        &self.flagged
    }

    pub fn is_visible(&self) -> bool {
        !self.dismissed && !self.flagged.is_empty()
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn headline(&self) -> String {
        format!("⚠️ {} emails flagged as spam.", self.flagged.len())
    }

    /// Drops an email once it was marked not-spam or archived.
    pub fn resolve(&mut self, email_id: &str) -> Option<SpamEmail> {
        let index = self.flagged.iter().position(|email| email.id == email_id)?;
        Some(self.flagged.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::SpamAlert;
    use inbox_core::SpamEmail;

    fn spam(id: &str) -> SpamEmail {
        SpamEmail {
            id: id.to_string(),
            sender: Some("promo@shop.test".to_string()),
            subject: Some("Deal".to_string()),
            user_id: "default".to_string(),
        }
    }

    #[test]
    fn hidden_when_empty_or_dismissed() {
        assert!(!SpamAlert::new(Vec::new()).is_visible());

        let mut alert = SpamAlert::new(vec![spam("e1")]);
        assert!(alert.is_visible());
        alert.dismiss();
        assert!(!alert.is_visible());
    }

    #[test]
    fn resolving_last_email_hides_alert() {
        let mut alert = SpamAlert::new(vec![spam("e1"), spam("e2")]);
        assert_eq!(alert.headline(), "⚠️ 2 emails flagged as spam.");

        assert!(alert.resolve("e1").is_some());
        assert!(alert.resolve("e1").is_none());
        assert_eq!(alert.flagged().len(), 1);

        alert.resolve("e2");
        assert!(!alert.is_visible());
    }
}
