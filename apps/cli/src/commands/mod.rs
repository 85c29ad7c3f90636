//! Command implementations for the Kiln CLI.

pub mod merge;
pub mod models;
pub mod predict;
pub mod train;
pub mod upload;

use kiln_training::ToolArgs;

/// Parse `--opt KEY=VALUE` flags into pass-through tool arguments.
pub fn parse_tool_args(opts: &[String]) -> anyhow::Result<ToolArgs> {
    let mut args = ToolArgs::new();
    for opt in opts {
        let Some((key, value)) = opt.split_once('=') else {
            anyhow::bail!("invalid --opt '{opt}': expected KEY=VALUE");
        };
        args.insert(key.to_string(), value.to_string());
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_args() {
        let args =
            parse_tool_args(&["epochs=50".to_string(), "imgsz=640".to_string()]).unwrap();
        assert_eq!(args.get("epochs").map(String::as_str), Some("50"));
        assert_eq!(args.get("imgsz").map(String::as_str), Some("640"));
    }

    #[test]
    fn test_parse_tool_args_rejects_bare_flag() {
        assert!(parse_tool_args(&["epochs".to_string()]).is_err());
    }
}
