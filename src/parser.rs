/// Parser for password file text
///
/// Lines are `host:port:dbname:user:password`. A `\:` pair does not end a
/// field. Blank lines, `#` comments and lines without exactly five fields are
/// skipped; a line with five fields whose content fails validation is an error.

use crate::config::{COMMENT_PREFIX, ESCAPE_CHAR, FIELD_COUNT, FIELD_SEPARATOR};
use crate::entry::Entry;
use crate::error::PgPassError;

/// Parse password file contents into entries, in file order
pub fn parse(raw: &str) -> Result<Vec<Entry>, PgPassError> {
    let mut entries = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        let line_number = index + 1;

        let Some(fields) = split_fields(line) else {
            continue;
        };

        let entry = Entry::new(fields[0], fields[1], fields[2], fields[3], fields[4])
            .map_err(|e| e.at_line(line_number))?;
        entries.push(entry.with_line_number(line_number));
    }

    Ok(entries)
}

/// Split a line on unescaped separators. Returns `None` for comments, blank
/// lines and lines that do not have exactly five fields.
pub fn split_fields(line: &str) -> Option<Vec<&str>> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return None;
    }

    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut field_start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c == ESCAPE_CHAR {
            // Keep the escaped separator inside the field
            if let Some(&(_, FIELD_SEPARATOR)) = chars.peek() {
                chars.next();
            }
        } else if c == FIELD_SEPARATOR {
            fields.push(&line[field_start..pos]);
            field_start = pos + c.len_utf8();
        }
    }
    fields.push(&line[field_start..]);

    if fields.len() == FIELD_COUNT {
        Some(fields)
    } else {
        None
    }
}
