//! Human-readable decision report.
//!
//! Renders the per-episode classification table for review before anything
//! is deleted. Writes to any `io::Write`; the CLI hands it stdout. Not part
//! of the core contract, so the format favors eyeballing over parsing.

use std::io::{self, Write};

use crate::classify::EpisodeRecord;
use crate::config::ShowPolicy;

fn unbounded(threshold: Option<usize>) -> String {
    match threshold {
        Some(n) => n.to_string(),
        None => "unbounded".to_string(),
    }
}

/// Renders classification decisions for human review.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Show banner plus the effective policy.
    pub fn show_header(&mut self, policy: &ShowPolicy) -> io::Result<()> {
        writeln!(self.out, "\n== {} ==", policy.title)?;
        writeln!(self.out, " rating_key:       {}", policy.rating_key)?;
        writeln!(self.out, " delete_unwatched: {}", policy.delete_unwatched)?;
        writeln!(
            self.out,
            " stale_unwatched:  {}",
            unbounded(policy.stale_unwatched)
        )?;
        writeln!(
            self.out,
            " stale_watched:    {}",
            unbounded(policy.stale_watched)
        )
    }

    /// One line per episode: trash marker, state letter, season/episode
    /// numbers, air date, title, file count.
    pub fn episodes(&mut self, records: &[EpisodeRecord]) -> io::Result<()> {
        for record in records {
            let episode = &record.episode;
            let air_date = episode
                .air_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "----------".to_string());
            writeln!(
                self.out,
                "{}[{}] {:2} {:3}. {}: \"{}\". {} file(s).",
                if record.trash { '!' } else { ' ' },
                record.state.letter(),
                episode.season_number,
                episode.number,
                air_date,
                episode.title,
                episode.file_paths.len(),
            )?;
        }
        Ok(())
    }

    /// Final line of the decision phase.
    pub fn footer(&mut self, trash_files: usize) -> io::Result<()> {
        writeln!(self.out, "\nFound {} file(s) to delete.", trash_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, RetentionState};
    use crate::media::Episode;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn policy() -> ShowPolicy {
        ShowPolicy {
            name: "news".to_string(),
            rating_key: "42".to_string(),
            title: "Nightly News".to_string(),
            delete_unwatched: true,
            stale_watched: Some(2),
            stale_unwatched: None,
        }
    }

    fn ep(number: u32, watch_count: u32) -> Episode {
        Episode {
            season_number: 1,
            number,
            title: format!("Episode {number}"),
            watch_count,
            air_date: NaiveDate::from_ymd_opt(2024, 5, number),
            file_paths: vec![PathBuf::from(format!("/tv/News/Season 01/e{number}.mkv"))],
        }
    }

    fn render(records: &[EpisodeRecord]) -> String {
        let mut buf = Vec::new();
        let mut reporter = Reporter::new(&mut buf);
        reporter.show_header(&policy()).unwrap();
        reporter.episodes(records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_spells_out_policy() {
        let output = render(&[]);
        assert!(output.contains("== Nightly News =="));
        assert!(output.contains("delete_unwatched: true"));
        assert!(output.contains("stale_unwatched:  unbounded"));
        assert!(output.contains("stale_watched:    2"));
    }

    #[test]
    fn test_trashed_episode_marked_with_bang() {
        let records = classify(vec![ep(1, 1), ep(2, 1), ep(3, 1), ep(4, 0)], &policy());
        assert_eq!(records[0].state, RetentionState::Stale);

        let output = render(&records);
        assert!(output.contains("![S]  1   1. 2024-05-01: \"Episode 1\". 1 file(s)."));
        assert!(output.contains(" [W]  1   3."));
        assert!(output.contains(" [K]  1   4."));
    }

    #[test]
    fn test_missing_air_date_renders_placeholder() {
        let mut episode = ep(1, 0);
        episode.air_date = None;
        let records = classify(vec![episode], &policy());

        let output = render(&records);
        assert!(output.contains("----------"));
    }

    #[test]
    fn test_footer_counts_files() {
        let mut buf = Vec::new();
        Reporter::new(&mut buf).footer(7).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Found 7 file(s) to delete."));
    }
}
