use regex::Regex;
use std::sync::LazyLock;

/// CSI sequences (SGR colors, cursor movement, line clears), OSC strings,
/// charset selection and any stray ESC byte left behind.
static ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\x1b\[[0-9;?]*[ -/]*[@-~]",
        r"|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?",
        r"|\x1b[()][0-9A-Za-z]",
        r"|\x1b",
    ))
    .expect("valid regex")
});

/// Control sequences whose ESC byte was eaten by the capture (`TERM=dumb`
/// through `script` still leaves `[2K` line clears in the log).
static ORPHAN_CSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-2][KJ]").expect("valid regex"));

/// Strip terminal control sequences from captured output.
///
/// Carriage returns become line breaks so progress-bar redraws turn into
/// separate lines. Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut current = text.replace("\r\n", "\n").replace('\r', "\n");
    // Removing one sequence can splice the halves of another back together.
    loop {
        let stripped = ORPHAN_CSI_RE
            .replace_all(&ESCAPE_RE.replace_all(&current, ""), "")
            .into_owned();
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_sgr_colors() {
        let raw = "\x1b[32m✓\x1b[0m User app cache \x1b[1;33m2.01GB\x1b[0m";
        assert_eq!(normalize(raw), "✓ User app cache 2.01GB");
    }

    #[test]
    fn test_strips_cursor_controls() {
        let raw = "\x1b[2K\x1b[1GScanning...\x1b[?25l done\x1b[?25h";
        assert_eq!(normalize(raw), "Scanning... done");
    }

    #[test]
    fn test_strips_orphaned_line_clear() {
        assert_eq!(normalize("[2K  → ~/Library/Caches 1GB"), "  → ~/Library/Caches 1GB");
    }

    #[test]
    fn test_carriage_returns_split_lines() {
        assert_eq!(normalize("10%\r50%\r\ndone"), "10%\n50%\ndone");
    }

    #[test]
    fn test_no_escape_remains() {
        let raw = "\x1b]0;title\x07\x1b(Bplain\x1b[38;5;208mtext\x1b";
        let out = normalize(raw);
        assert!(!out.contains('\x1b'));
        assert_eq!(out, "plaintext");
    }

    #[test]
    fn test_idempotent_on_spliced_sequences() {
        let samples = [
            "\x1b[\x1b[31mm red",
            "[[2K2K tail",
            "\x1b[1m\x1b[0mbold\r\n",
            "plain text with [brackets] and 2K files",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", raw);
            assert!(!once.contains('\x1b'));
        }
    }

    #[test]
    fn test_bracketed_text_survives() {
        let text = "→ ~/Pictures/[Japan trip] and [Kids] [J] [K]";
        assert_eq!(normalize(text), text);
        assert_eq!(normalize("[0K[1J[2Kdone"), "done");
    }
}
