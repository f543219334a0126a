use serde_json::Value;

/// Why Claude Desktop would likely refuse this entry, if it would.
///
/// Only used for warnings while listing; entries are never rejected here.
pub fn entry_problem(spec: &Value) -> Option<String> {
    let Some(obj) = spec.as_object() else {
        return Some("entry is not a JSON object".into());
    };
    let non_blank = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };
    match obj.get("type").and_then(Value::as_str) {
        None | Some("stdio") if !non_blank("command") => Some("missing command".into()),
        None | Some("stdio") => None,
        Some(t @ ("http" | "sse")) if !non_blank("url") => Some(format!("{t} entry missing url")),
        Some("http" | "sse") => None,
        Some(other) => Some(format!("unknown transport type '{other}'")),
    }
}
