#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingGuide {
    pub provider: &'static str,
    pub steps: &'static [&'static str],
    pub guide_url: &'static str,
}

pub const FORWARDING_GUIDES: [ForwardingGuide; 3] = [
    ForwardingGuide {
        provider: "Gmail",
        steps: &[
            "Open Gmail and go to Settings (gear icon)",
            "Select \"See all settings\"",
            "Go to the \"Forwarding and POP/IMAP\" tab",
            "Click \"Add a forwarding address\"",
            "Enter your assistant mailbox address",
            "Gmail will send a confirmation code - check your assistant's inbox",
            "Return to Gmail settings and enter the verification code",
            "Choose \"Forward a copy of incoming mail\" and save changes",
        ],
        guide_url: "https://support.google.com/mail/answer/10957?hl=en",
    },
    ForwardingGuide {
        provider: "Outlook",
        steps: &[
            "Open Outlook and go to Settings (gear icon)",
            "Search for \"forwarding\" in the settings search",
            "Select \"Forwarding\" from the results",
            "Check \"Enable forwarding\"",
            "Enter your assistant mailbox address",
            "Choose whether to keep a copy of forwarded messages",
            "Save your changes",
        ],
        guide_url: "https://support.microsoft.com/en-us/office/forward-email-from-outlook-to-another-email-account-1ed4ee1e-74f8-4f53-a174-86b748ff6a0e",
    },
    ForwardingGuide {
        provider: "Apple Mail (iCloud)",
        steps: &[
            "Go to iCloud.com and sign in",
            "Click on Mail",
            "Click on the gear icon and select \"Preferences\"",
            "Go to the \"Rules\" tab",
            "Click \"Add a Rule\"",
            "Set condition to \"If a message is received from any sender\"",
            "Set action to \"Forward to\" and enter your assistant mailbox address",
            "Click \"Done\" to save the rule",
        ],
        guide_url: "https://support.apple.com/guide/icloud/create-rules-mmdd8251e3/icloud",
    },
];

pub const FORWARDING_TIPS: [&str; 3] = [
    "Consider creating a filter to only forward specific emails",
    "Check both inboxes initially to verify forwarding is working",
    "Make sure to select whether to keep copies of forwarded emails in your original inbox",
];
