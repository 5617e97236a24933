/// Size of a document's textual representation in bytes (UTF-8).
pub fn byte_len(text: &str) -> usize {
    text.len()
}

/// Render a byte count for display, e.g. `1536` -> `"1.5 KB"`.
pub fn human_readable_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
