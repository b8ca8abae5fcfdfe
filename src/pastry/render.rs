//! # Rendering Module
//!
//! Plain-text tables written back on the command port. The output is meant to
//! be read in a terminal after `nc` and to survive `cut -f`, so columns are
//! tab separated and the age column is padded to a fixed width.
//!
//! ```text
//! #  0	3 minutes ago       	one apple
//! #  1	  2	1 minute ago        	second line of a snippet
//! ```

use crate::model::{GrepMatch, ListedSnippet};
use unicode_width::UnicodeWidthStr;

pub const AGE_WIDTH: usize = 20;
pub const UNKNOWN_COMMAND: &str = "# Unknown command\n";

fn pad_age(age: &str) -> String {
    let padding = AGE_WIDTH.saturating_sub(age.width());
    format!("{}{}", age, " ".repeat(padding))
}

/// One line per snippet; surrounding newlines of the text are trimmed.
pub fn render_list(rows: &[ListedSnippet]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "#{:>3}\t{}\t{}\n",
            row.index,
            pad_age(&row.relative_age),
            row.text.trim_matches('\n')
        ));
    }
    out
}

/// One line per matching line, with its line number.
pub fn render_grep(matches: &[GrepMatch]) -> String {
    let mut out = String::new();
    for m in matches {
        out.push_str(&format!(
            "#{:>3}\t{:>3}\t{}\t{}\n",
            m.index,
            m.line_number,
            pad_age(&m.relative_age),
            m.line
        ));
    }
    out
}
