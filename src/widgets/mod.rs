pub mod banner;
pub mod chrome;
pub mod confirm;
pub mod form;
pub mod status_bar;
pub mod table;

/// Neutralize server-sourced text before it reaches the terminal.
/// Control characters (ESC included) would be interpreted by the
/// emulator instead of displayed, so they are stripped outright.
pub fn sanitize_text(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_text("Widget"), "Widget");
        assert_eq!(sanitize_text("Wid\x1b[31mget"), "Wid[31mget");
        assert_eq!(sanitize_text("a\x07b\r\nc"), "abc");
        assert_eq!(sanitize_text("\x1b]0;evil\x07"), "]0;evil");
    }
}
