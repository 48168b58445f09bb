//! Hash verification utilities
//!
//! Streaming SHA-256 digests for the shared file and downloaded copies.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Read buffer used while hashing
const CHUNK_SIZE: usize = 64 * 1024;

/// Calculate the SHA-256 of everything a reader yields, as lowercase hex
pub fn sha256_reader<R: Read>(reader: R) -> io::Result<String> {
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, reader);
    let mut hasher = Sha256::new();

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        hasher.update(buf);
        let len = buf.len();
        reader.consume(len);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Calculate SHA-256 hash of a file
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Can't open {}", path.display()))?;
    sha256_reader(file).with_context(|| format!("Can't hash {}", path.display()))
}

/// Verify file hash matches expected
pub fn verify_sha256(path: &Path, expected: &str) -> Result<bool> {
    let actual = sha256_file(path)?;
    Ok(digest_matches(&actual, expected))
}

/// Compare two hex digests, ignoring case and surrounding whitespace
pub fn digest_matches(actual: &str, expected: &str) -> bool {
    actual.trim().eq_ignore_ascii_case(expected.trim())
}

/// Format a `sha256sum`-style line. Names with a backslash, CR or LF are
/// escaped and the line gets a leading backslash, as coreutils does.
pub fn checksum_line(digest: &str, name: &str) -> String {
    if !name.contains(['\\', '\n', '\r']) {
        return format!("{}  {}\n", digest, name);
    }

    let mut escaped = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    format!("\\{}  {}\n", digest, escaped)
}

/// Split a `sha256sum`-style line into its digest and file name
pub fn parse_checksum_line(text: &str) -> Option<(&str, Cow<'_, str>)> {
    let line = text.lines().next()?;
    let (escaped, line) = match line.strip_prefix('\\') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let (digest, rest) = line.split_once(' ')?;
    let name = rest.strip_prefix(' ').or_else(|| rest.strip_prefix('*'))?;

    let is_digest = digest.len() == 64 && digest.bytes().all(|b| b.is_ascii_hexdigit());
    if !is_digest || name.is_empty() {
        return None;
    }

    let name = if escaped {
        Cow::Owned(unescape_name(name)?)
    } else {
        Cow::Borrowed(name)
    };
    Some((digest, name))
}

fn unescape_name(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_known_digests() {
        assert_eq!(sha256_reader(&b""[..]).unwrap(), EMPTY);
        assert_eq!(sha256_reader(&b"abc"[..]).unwrap(), ABC);
    }

    #[test]
    fn test_file_larger_than_chunk() {
        let data = vec![0x5a_u8; CHUNK_SIZE * 3 + 17];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let expected = format!("{:x}", Sha256::digest(&data));
        assert_eq!(sha256_file(file.path()).unwrap(), expected);
    }

    #[test]
    fn test_verify() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        assert!(verify_sha256(file.path(), ABC).unwrap());
        assert!(verify_sha256(file.path(), &format!("  {}\n", ABC.to_uppercase())).unwrap());
        assert!(!verify_sha256(file.path(), EMPTY).unwrap());
    }

    #[test]
    fn test_parse_checksum_line() {
        let line = checksum_line(ABC, "report.pdf");
        assert_eq!(line, format!("{}  report.pdf\n", ABC));
        assert_eq!(parse_checksum_line(&line), Some((ABC, "report.pdf".into())));

        let binary = format!("{} *a b.bin", EMPTY);
        assert_eq!(parse_checksum_line(&binary), Some((EMPTY, "a b.bin".into())));

        assert_eq!(parse_checksum_line("abc  file"), None);
        assert_eq!(parse_checksum_line(&format!("{}  ", ABC)), None);
        assert_eq!(parse_checksum_line(""), None);
    }

    #[test]
    fn test_escaped_names() {
        let line = checksum_line(ABC, "dir\\a\nb\rc");
        assert_eq!(line, format!("\\{}  dir\\\\a\\nb\\rc\n", ABC));
        assert_eq!(
            parse_checksum_line(&line),
            Some((ABC, "dir\\a\nb\rc".into()))
        );

        // A raw newline in an unescaped line cuts the name short.
        assert_eq!(
            parse_checksum_line(&format!("{}  a\nb.txt\n", ABC)),
            Some((ABC, "a".into()))
        );
        assert_eq!(parse_checksum_line(&format!("\\{}  bad\\x", ABC)), None);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sha256_file(&dir.path().join("nope")).is_err());
    }
}
