use anyhow::{Result, bail};

/// Verifies every configured external tool resolves on PATH. All missing
/// names are reported together in a single error. Runs before any network
/// or filesystem side effect.
pub fn check_tools(tools: &[String]) -> Result<()> {
    let missing: Vec<&str> = tools
        .iter()
        .filter(|tool| which::which(tool.as_str()).is_err())
        .map(|tool| tool.as_str())
        .collect();

    if !missing.is_empty() {
        bail!("missing required tools: {}", missing.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tool_list_passes() {
        check_tools(&[]).unwrap();
    }

    #[test]
    fn present_tool_passes() {
        // sh is guaranteed on any Unix test host
        check_tools(&["sh".to_string()]).unwrap();
    }

    #[test]
    fn reports_all_missing_tools_together() {
        let tools = vec![
            "sh".to_string(),
            "discordup-no-such-tool-a".to_string(),
            "discordup-no-such-tool-b".to_string(),
        ];
        let err = check_tools(&tools).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("discordup-no-such-tool-a"));
        assert!(msg.contains("discordup-no-such-tool-b"));
        assert!(!msg.contains("sh,"));
    }
}
