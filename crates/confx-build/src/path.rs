/// Joins path segments into a path inside the container filesystem.
///
/// Containers built from the generated Dockerfile are Linux images, so the
/// result always uses `/` whatever the host separator is: `\` in any
/// segment is treated as a separator. Empty and `.` elements are dropped,
/// `..` removes the previous element, and a trailing separator is trimmed.
/// All-empty input yields an empty string.
pub fn container_path(segments: &[&str]) -> String {
    let Some(first) = segments.iter().find(|s| !s.is_empty()) else {
        return String::new();
    };
    let absolute = first.starts_with(['/', '\\']);

    let mut parts: Vec<&str> = Vec::new();
    for segment in segments {
        for part in segment.split(['/', '\\']) {
            match part {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    // `..` above the root is the root
                    _ if absolute => {}
                    _ => parts.push(".."),
                },
                part => parts.push(part),
            }
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_owned(),
        (false, false) => joined,
    }
}
