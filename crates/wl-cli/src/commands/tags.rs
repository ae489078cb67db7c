//! Tags command for listing every tag in use.

use std::io::Write;

use anyhow::Result;
use wl_core::{WorkLog, all_tags};

use super::util::open_database;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    render(writer, &db.list_logs()?)
}

pub fn render<W: Write>(writer: &mut W, logs: &[WorkLog]) -> Result<()> {
    let tags = all_tags(logs);
    if tags.is_empty() {
        writeln!(writer, "No tags recorded.")?;
        return Ok(());
    }
    for tag in tags {
        let count = logs.iter().filter(|log| log.has_tag(&tag)).count();
        writeln!(writer, "{tag} ({count})")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wl_core::NewWorkLog;
    use wl_db::Database;

    use super::*;

    #[test]
    fn tags_are_listed_alphabetically_with_counts() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("wl.db"),
            ..Config::default()
        };
        let mut db = Database::open(&config.database_path).unwrap();
        for tags in [&["web", "api"][..], &["api"][..]] {
            let draft = NewWorkLog::new(
                "2026-01-10T09:00:00Z".parse().unwrap(),
                "work",
                tags.iter().copied(),
                None,
            )
            .unwrap();
            db.create_log(&draft).unwrap();
        }

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "api (2)\nweb (1)\n");
    }

    #[test]
    fn no_tags_message() {
        let mut output = Vec::new();
        render(&mut output, &[]).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No tags recorded.\n");
    }
}
