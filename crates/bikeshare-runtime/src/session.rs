//! Interactive analysis session.
//!
//! One iteration asks for a selection, loads and filters the city table, prints
//! the four reports, optionally pages through raw rows and then asks whether to
//! start over. Data errors end the iteration, not the session.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{DatasetCatalog, Selection, TripTable};
use bikeshare_core::selection::{parse_city, parse_day_filter, parse_month_filter, parse_yes_no};
use bikeshare_data::analysis::analyze_trips;
use bikeshare_data::browser::{RowBrowser, PAGE_SIZE};
use bikeshare_data::reader::load_data;
use bikeshare_ui::report_view::{render_report, separator};
use bikeshare_ui::table_view::render_page;
use tracing::{error, info};

use crate::prompt::Prompter;

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_PROMPT: &str = "Enter city (chicago, new york city, washington): ";
const MONTH_PROMPT: &str = "Enter month (january to june) or 'all': ";
const DAY_PROMPT: &str = "Enter day of week or 'all': ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";
const NO_MORE_ROWS: &str = "No more data to display.";

/// Drives repeated analysis runs over one input/output pair.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    catalog: DatasetCatalog,
    runs: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, catalog: DatasetCatalog) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            catalog,
            runs: 0,
        }
    }

    /// Loop until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        match self.run_loop() {
            Err(BikeshareError::InputClosed) => {
                info!("Input closed after {} run(s); ending session", self.runs);
                Ok(())
            }
            other => other,
        }
    }

    /// Number of analysis iterations started so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn run_loop(&mut self) -> Result<()> {
        loop {
            self.runs += 1;
            match self.run_once() {
                Ok(()) => {}
                Err(e) if e.is_data_error() => {
                    error!("Analysis run {} aborted: {}", self.runs, e);
                    self.prompter.say(&format!("\nCould not analyse this selection: {}", e))?;
                }
                Err(e) => return Err(e),
            }

            if !self.prompter.ask(RESTART_PROMPT, parse_yes_no)? {
                info!("User ended the session after {} run(s)", self.runs);
                return Ok(());
            }
        }
    }

    fn run_once(&mut self) -> Result<()> {
        let selection = self.prompt_selection()?;
        info!("Analysing {}", selection);

        let table = load_data(&self.catalog, &selection)?;
        let report = analyze_trips(&table);
        self.prompter.say(&render_report(&report))?;

        self.browse_rows(&table)
    }

    fn prompt_selection(&mut self) -> Result<Selection> {
        self.prompter.say(GREETING)?;
        let city = self.prompter.ask(CITY_PROMPT, parse_city)?;
        let month = self.prompter.ask(MONTH_PROMPT, parse_month_filter)?;
        let day = self.prompter.ask(DAY_PROMPT, parse_day_filter)?;
        self.prompter.say(&separator())?;
        Ok(Selection { city, month, day })
    }

    fn browse_rows(&mut self, table: &TripTable) -> Result<()> {
        let first = format!(
            "Do you want to see the first {} rows of raw data? (yes/no): ",
            PAGE_SIZE
        );
        if !self.prompter.ask(&first, parse_yes_no)? {
            return Ok(());
        }
        self.prompter.say("Data:\n")?;

        let next = format!(
            "\nDo you want to see the next {} rows of raw data? (yes/no): ",
            PAGE_SIZE
        );
        let mut browser = RowBrowser::new(table);
        loop {
            let Some(page) = browser.next_page() else {
                self.prompter.say(NO_MORE_ROWS)?;
                return Ok(());
            };
            self.prompter
                .say(&render_page(&page, table.capabilities()))?;

            if browser.is_exhausted() {
                self.prompter.say(NO_MORE_ROWS)?;
                return Ok(());
            }
            if !self.prompter.ask(&next, parse_yes_no)? {
                return Ok(());
            }
            self.prompter.say(&separator())?;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

    /// Twelve March 2017 trips plus two February ones.
    fn write_chicago(dir: &Path) {
        let mut lines = vec![HEADER.to_string()];
        for day in 1..=12 {
            lines.push(format!(
                "{day},2017-03-{day:02} 08:00:00,2017-03-{day:02} 08:10:00,600,Station {day},Lake St,Subscriber,Male,1990"
            ));
        }
        lines.push("13,2017-02-01 17:00:00,,300,A,B,Customer,,".to_string());
        lines.push("14,2017-02-02 17:00:00,,300,A,B,Customer,,".to_string());
        std::fs::write(dir.join("chicago.csv"), lines.join("\n")).unwrap();
    }

    fn run_session(dir: &Path, input: &str) -> (Result<()>, String, usize) {
        let mut session = Session::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            DatasetCatalog::standard(dir),
        );
        let result = session.run();
        let runs = session.runs();
        let out = String::from_utf8(session.into_output()).unwrap();
        (result, out, runs)
    }

    #[test]
    fn test_single_run_without_raw_rows() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, runs) = run_session(dir.path(), "chicago\nfebruary\nall\nno\nno\n");
        result.unwrap();
        assert_eq!(runs, 1);
        assert!(out.contains(GREETING));
        assert!(out.contains("Most common month: February"));
        assert!(out.contains("Most common start hour: 17"));
        assert!(out.contains("Most frequent trip: A -> B"));
        assert!(!out.contains("Data:"));
    }

    #[test]
    fn test_invalid_answers_are_reprompted() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, _) = run_session(
            dir.path(),
            "boston\nchicago\njuly\nmarch\nfunday\nall\nno\nno\n",
        );
        result.unwrap();
        assert_eq!(out.matches("Check your input, try again.").count(), 3);
        assert!(out.contains("Most common month: March"));
    }

    #[test]
    fn test_paging_twelve_rows_until_exhausted() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, _) = run_session(dir.path(), "chicago\nmarch\nall\nyes\nyes\nyes\nno\n");
        result.unwrap();
        assert_eq!(out.matches("Do you want to see the next 5 rows").count(), 2);
        assert_eq!(out.matches(NO_MORE_ROWS).count(), 1);
        // Every March row rendered exactly once.
        assert!(out.contains("Station 12"));
        assert_eq!(out.matches("Subscriber  Male").count(), 12);
    }

    #[test]
    fn test_paging_stops_when_user_declines() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, _) = run_session(dir.path(), "chicago\nmarch\nall\nyes\nno\nno\n");
        result.unwrap();
        assert_eq!(out.matches("Subscriber  Male").count(), 5);
        assert!(!out.contains(NO_MORE_ROWS));
    }

    #[test]
    fn test_empty_selection_reports_neutral_values() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, _) = run_session(dir.path(), "chicago\njune\nall\nyes\nno\n");
        result.unwrap();
        assert!(out.contains("No trips match this selection."));
        assert!(out.contains("Average travel time (seconds): no data"));
        assert!(out.contains(NO_MORE_ROWS));
    }

    #[test]
    fn test_restart_runs_again() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, runs) = run_session(
            dir.path(),
            "chicago\nall\nall\nno\nyes\nchicago\nfebruary\nall\nno\nno\n",
        );
        result.unwrap();
        assert_eq!(runs, 2);
        assert_eq!(out.matches(GREETING).count(), 2);
    }

    #[test]
    fn test_missing_dataset_aborts_iteration_only() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, out, runs) = run_session(
            dir.path(),
            "washington\nall\nall\nyes\nchicago\nall\nall\nno\nno\n",
        );
        result.unwrap();
        assert_eq!(runs, 2);
        assert!(out.contains("Could not analyse this selection: Dataset not found"));
        assert!(out.contains("Most common month: March"));
    }

    #[test]
    fn test_malformed_dataset_aborts_iteration_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("washington.csv"),
            ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n1,garbage,,60,A,B,Subscriber\n",
        )
        .unwrap();

        let (result, out, _) = run_session(dir.path(), "washington\nall\nall\nno\n");
        result.unwrap();
        assert!(out.contains("Malformed record"));
    }

    #[test]
    fn test_end_of_input_ends_session_cleanly() {
        let dir = TempDir::new().unwrap();
        write_chicago(dir.path());

        let (result, _, runs) = run_session(dir.path(), "chicago\n");
        result.unwrap();
        assert_eq!(runs, 1);
    }
}
