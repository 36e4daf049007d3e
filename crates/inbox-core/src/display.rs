pub const DEFAULT_ACTIONS: [&str; 3] = ["Reply", "Forward", "Archive"];

pub fn category_icon(category: Option<&str>) -> &'static str {
    match category.unwrap_or_default().to_ascii_lowercase().as_str() {
        "scheduling" => "📅",
        "sales" => "💼",
        "support" => "🛠️",
        "partner" => "🤝",
        "personal" => "👤",
        "internal" => "🏢",
        "other" => "✉️",
        _ => "📧",
    }
}
