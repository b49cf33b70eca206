//! Response sanitization before JSON parsing.
//!
//! Models frequently wrap JSON replies in markdown code fences despite
//! instructions not to. Fence removal is its own stage, independent of
//! prompt construction, so it can be tested over fenced, unfenced, and
//! malformed inputs.

/// Strip markdown code-fence markers (```json and bare ```) and trim.
///
/// Removes the markers wherever they appear; the content between them is
/// untouched. Non-fenced input passes through (modulo trimming).
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fence_removed() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_bare_fence_removed() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_passthrough() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(strip_code_fences("  \n{\"a\": 1}\n  "), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_without_newline() {
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_malformed_input_unchanged_semantics() {
        // Sanitizing never repairs broken JSON, it only removes fences.
        assert_eq!(strip_code_fences("```json\nnot json\n```"), "not json");
    }
}
