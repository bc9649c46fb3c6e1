pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Plain text of an inline-HTML fragment, for titles and empty checks.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Pull the video id out of a pasted YouTube URL, or accept a bare id.
pub(crate) fn youtube_video_id(input: &str) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let candidate = if let Some(pos) = s.find("v=") {
        &s[pos + 2..]
    } else if let Some(pos) = s.find("youtu.be/") {
        &s[pos + "youtu.be/".len()..]
    } else if let Some(pos) = s.find("/embed/") {
        &s[pos + "/embed/".len()..]
    } else {
        s
    };

    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Hello</b> <i>world</i>"), "Hello world");
        assert_eq!(strip_tags("a&nbsp;&amp;&nbsp;b"), "a & b");
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_youtube_video_id() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            youtube_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(youtube_video_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
        assert_eq!(youtube_video_id("   "), None);
    }
}
