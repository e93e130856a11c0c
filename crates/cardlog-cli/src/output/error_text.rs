use cardlog_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Could not complete the command.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(|issues| issues.as_array());
    if let Some(issues) = issues
        && !issues.is_empty()
    {
        lines.push(String::new());
        lines.push("Fields to fix:".to_string());
        for issue in issues {
            let field = issue["field"].as_str().unwrap_or("?");
            let description = issue["description"].as_str().unwrap_or("");
            lines.push(format!("  - {field}: {description}"));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
