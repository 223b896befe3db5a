use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;

pub fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn decode_best_effort(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => {
            let (res, _, _) = WINDOWS_1252.decode(err.as_bytes());
            res.into_owned()
        }
    }
}

pub fn normalize_eol(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Reads a document as UTF-8, falling back to Windows-1252. `-` is stdin.
pub fn read_text_best_effort(path: &Path, normalize: bool) -> Result<String> {
    let bytes = if is_stdin(path) {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("Failed to read document {}", path.display()))?
    };

    let content = decode_best_effort(bytes);
    if normalize {
        Ok(normalize_eol(&content))
    } else {
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_fallback() {
        // "café" in Windows-1252
        let bytes = vec![0x63, 0x61, 0x66, 0xE9];
        assert_eq!(decode_best_effort(bytes), "café");
    }

    #[test]
    fn utf8_passthrough() {
        assert_eq!(decode_best_effort("• Apple".as_bytes().to_vec()), "• Apple");
    }

    #[test]
    fn eol_normalization() {
        assert_eq!(normalize_eol("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("sectdiff-utils-{}.txt", std::process::id()));
        fs::write(&path, b"Include:\r\n- a\r\n").unwrap();
        let text = read_text_best_effort(&path, true).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(text, "Include:\n- a\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/definitely/not/here/sectdiff.txt");
        let err = read_text_best_effort(path, false).unwrap_err();
        assert!(err.to_string().contains("Failed to read document"));
    }
}
