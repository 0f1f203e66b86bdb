use crate::writer::WriteError;

/// Code points that routinely show up in wiki markup and have a known
/// replacement.
const KNOWN_SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{014d}', "o"),
    ('\u{200a}', ""),
    ('\u{200c}', ""),
    ('\u{200b}', ""),
    ('\u{200d}', ""),
];

/// Revise `line` after a failed write so that a second attempt can succeed.
pub fn repair_line(line: &str, err: &WriteError) -> String {
    match err {
        WriteError::UnsupportedCodePoint { .. } => substitute_known(line),
        WriteError::Unencodable { .. } => strip_non_ascii(line),
    }
}

fn substitute_known(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match KNOWN_SUBSTITUTIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }
    out
}

fn strip_non_ascii(line: &str) -> String {
    line.chars().filter(char::is_ascii).collect()
}
