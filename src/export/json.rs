//! JSON rendering

use crate::core::error::Result;
use crate::core::types::TraversalResult;

/// Pretty JSON with two-space indentation and a trailing newline
pub fn render(result: &TraversalResult) -> Result<String> {
    let mut output = serde_json::to_string_pretty(result)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FileRecord;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn test_json_shape() -> Result<()> {
        let result = TraversalResult::new(
            "root/\na.py\n".to_string(),
            vec![FileRecord::new("a.py", b"print(1)\n".to_vec())],
        );

        let output = render(&result)?;
        let value: Value = serde_json::from_str(&output)?;

        assert_eq!(value["tree"], "root/\na.py\n");
        assert_eq!(value["files"][0]["relative_path"], "a.py");
        assert_eq!(value["files"][0]["content"], "print(1)\n");
        assert!(output.starts_with("{\n  \"tree\""));
        assert!(output.ends_with("}\n"));

        Ok(())
    }

    #[test]
    fn test_empty_result_has_empty_file_list() -> Result<()> {
        let output = render(&TraversalResult::default())?;
        let value: Value = serde_json::from_str(&output)?;

        assert_eq!(value["files"], Value::Array(Vec::new()));

        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_replaced() -> Result<()> {
        let result = TraversalResult::new(
            String::new(),
            vec![FileRecord::new("blob.bin", vec![0x66, 0xff, 0x6f])],
        );

        let value: Value = serde_json::from_str(&render(&result)?)?;
        assert_eq!(value["files"][0]["content"], "f\u{fffd}o");

        Ok(())
    }
}
