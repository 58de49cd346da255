use uploader_core::AppViewModel;

pub const TITLE: &str = "Upload to S3";
pub const LISTING_TITLE: &str = "Files in bucket";

/// Renders the whole view as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("== {TITLE} =="));
    lines.push(format!(
        "Selected: {}",
        view.selected_name.as_deref().unwrap_or("(none)")
    ));

    let button = if view.loading { "Sending..." } else { "Send" };
    if view.upload_enabled {
        lines.push(format!("[ {button} ]"));
    } else {
        lines.push(format!("[ {button} ] (disabled)"));
    }

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }
    if let Some(success) = &view.success {
        lines.push(format!("OK: {success}"));
    }

    lines.push(String::new());
    lines.push(format!("== {LISTING_TITLE} =="));
    if view.loading && view.files.is_empty() {
        lines.push("Loading file list...".to_string());
    } else if view.files.is_empty() {
        lines.push("No files found.".to_string());
    } else {
        lines.extend(view.files.iter().map(|name| format!("  - {name}")));
    }
    if let Some(fetched) = &view.listing_fetched_utc {
        lines.push(format!("(updated {fetched})"));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_loading_placeholder_before_first_listing() {
        let view = AppViewModel {
            loading: true,
            ..AppViewModel::default()
        };
        let lines = render(&view);

        assert!(lines.contains(&"[ Sending... ] (disabled)".to_string()));
        assert!(lines.contains(&"Loading file list...".to_string()));
    }

    #[test]
    fn renders_files_in_order_with_messages() {
        let view = AppViewModel {
            success: Some("ok".to_string()),
            selected_name: Some("next.txt".to_string()),
            upload_enabled: true,
            files: vec!["b.txt".to_string(), "a.txt".to_string()],
            listing_fetched_utc: Some("2026-10-16T09:00:00+00:00".to_string()),
            ..AppViewModel::default()
        };
        let lines = render(&view);

        assert_eq!(
            lines,
            vec![
                "== Upload to S3 ==".to_string(),
                "Selected: next.txt".to_string(),
                "[ Send ]".to_string(),
                "OK: ok".to_string(),
                String::new(),
                "== Files in bucket ==".to_string(),
                "  - b.txt".to_string(),
                "  - a.txt".to_string(),
                "(updated 2026-10-16T09:00:00+00:00)".to_string(),
            ]
        );
    }

    #[test]
    fn renders_empty_listing_and_error() {
        let view = AppViewModel {
            error: Some("Could not load the file list.".to_string()),
            ..AppViewModel::default()
        };
        let lines = render(&view);

        assert!(lines.contains(&"Error: Could not load the file list.".to_string()));
        assert!(lines.contains(&"No files found.".to_string()));
        assert!(lines.contains(&"[ Send ] (disabled)".to_string()));
    }
}
