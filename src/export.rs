use crate::scrape::StreamerRecord;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Rewrite the CSV file from the full accumulated record list.
///
/// Truncates any prior content. Header row first whenever at least one record
/// exists; an empty list produces an empty file (no header is determinable
/// without a first record). No temp-file swap: a crash mid-write can leave a
/// truncated file, which the next call repairs.
pub fn write_csv(path: &Path, records: &[StreamerRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    if !records.is_empty() {
        write_row(&mut out, &StreamerRecord::FIELDS)?;
        for record in records {
            write_row(&mut out, &record.values())?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        write_field(out, field)?;
    }
    out.write_all(b"\r\n")
}

/// Quote a field only when it contains the delimiter, a quote or a newline.
fn write_field<W: Write>(out: &mut W, field: &str) -> std::io::Result<()> {
    if field.contains([',', '"', '\n', '\r']) {
        out.write_all(b"\"")?;
        out.write_all(field.replace('"', "\"\"").as_bytes())?;
        out.write_all(b"\"")
    } else {
        out.write_all(field.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, donation: &str) -> StreamerRecord {
        StreamerRecord {
            username: username.into(),
            donation: donation.into(),
            location: "Paris".into(),
            twitch_url: format!("https://twitch.tv/{username}"),
            avatar: format!("avatars/{username}.png"),
            avatar_online_url: format!("https://cdn.example.com/{username}.png"),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[record("alpha", "12345"), record("beta", "N/A")]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "username,donation,location,twitch_url,avatar,avatar_online_url"
        );
        assert!(lines[1].starts_with("alpha,12345,Paris,"));
        assert!(lines[2].starts_with("beta,N/A,Paris,"));
    }

    #[test]
    fn test_empty_list_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.is_empty());
    }

    #[test]
    fn test_rewrite_truncates_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[record("alpha", "1"), record("beta", "2")]).unwrap();
        write_csv(&path, &[record("alpha", "1")]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_idempotent_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = [record("alpha", "12345"), record("beta", "N/A")];

        write_csv(&path, &records).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_csv(&path, &records).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_field_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut r = record("alpha", "N/A");
        r.location = "Lyon, France".into();
        r.username = "a\"b".into();
        write_csv(&path, &[r]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert!(row.starts_with(r#""a""b",N/A,"Lyon, France","#));
    }

    #[test]
    fn test_all_columns_present_with_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let r = StreamerRecord {
            username: "gamma".into(),
            donation: "N/A".into(),
            location: "N/A".into(),
            twitch_url: String::new(),
            avatar: "avatars/gamma.png".into(),
            avatar_online_url: String::new(),
        };
        write_csv(&path, &[r]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), StreamerRecord::FIELDS.len());
        assert_eq!(row, "gamma,N/A,N/A,,avatars/gamma.png,");
    }
}
