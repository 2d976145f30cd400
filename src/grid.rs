// File: ./src/grid.rs
/*! Reads the weekly timetable grid out of an HTML document.

The page is a run of day sections. Each section is a weekday label
(`<span class="labelone">Monday</span>`) followed by exactly one data
table (`<table class="spreadsheet">`). The first row of a table is a
header; every other row describes one activity with fixed columns:

| 0    | 1 | 2    | 3     | 4   | 5     | 6        | 7     |
|------|---|------|-------|-----|-------|----------|-------|
| name | - | type | start | end | weeks | location | staff |

Labels and tables are walked together in document order, so a label
without a table (or a table without a label) is an error instead of
silently shifting every following day.
*/

use crate::error::{ConvertError, Result};
use crate::model::clock::parse_clock_time;
use crate::model::item::{ActivityRecord, Weekday};
use scraper::{ElementRef, Html, Selector};

const COL_NAME: usize = 0;
const COL_TYPE: usize = 2;
const COL_START: usize = 3;
const COL_END: usize = 4;
const COL_WEEKS: usize = 5;
const COL_LOCATION: usize = 6;
const COL_STAFF: usize = 7;
const MIN_COLUMNS: usize = 8;

/// Where the day sections live in the page and how cells are cleaned up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSchema {
    pub label_selector: String,
    pub table_selector: String,
    /// Literal removed from the front of the location cell.
    pub location_prefix: String,
}

impl Default for GridSchema {
    fn default() -> Self {
        Self {
            label_selector: "span.labelone".to_string(),
            table_selector: "table.spreadsheet".to_string(),
            location_prefix: "Location: ".to_string(),
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ConvertError::extraction(format!("Invalid selector '{}': {:?}", css, e)))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// One weekday label together with the table it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    pub weekday: Weekday,
    /// Cell text of every data row, header excluded.
    pub rows: Vec<Vec<String>>,
}

impl DaySection {
    fn from_table(weekday: Weekday, table: ElementRef) -> Result<Self> {
        let row_sel = selector("tr")?;
        let cell_sel = selector("td")?;

        let rows = table
            .select(&row_sel)
            .skip(1)
            .map(|row| row.select(&cell_sel).map(|c| element_text(&c)).collect())
            .collect();

        Ok(Self { weekday, rows })
    }

    pub fn records(&self, schema: &GridSchema) -> Result<Vec<ActivityRecord>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, cells)| self.record(i + 1, cells, schema))
            .collect()
    }

    fn record(&self, row: usize, cells: &[String], schema: &GridSchema) -> Result<ActivityRecord> {
        if cells.len() < MIN_COLUMNS {
            return Err(ConvertError::extraction(format!(
                "{} row {} has {} column(s), expected at least {}",
                self.weekday,
                row,
                cells.len(),
                MIN_COLUMNS
            )));
        }

        let location = cells[COL_LOCATION].as_str();
        let location = location
            .strip_prefix(schema.location_prefix.as_str())
            .unwrap_or(location)
            .trim();

        ActivityRecord::new(
            self.weekday,
            cells[COL_NAME].as_str(),
            cells[COL_TYPE].as_str(),
            parse_clock_time(&cells[COL_START])?,
            parse_clock_time(&cells[COL_END])?,
            cells[COL_WEEKS].as_str(),
            location,
            cells[COL_STAFF].as_str(),
        )
    }
}

/// A fetched timetable page, parsed once and queried per run.
pub struct TimetableDocument {
    html: Html,
}

impl TimetableDocument {
    pub fn parse(raw_html: &str) -> Self {
        Self {
            html: Html::parse_document(raw_html),
        }
    }

    /// Pairs each weekday label with the single table that follows it.
    pub fn day_sections(&self, schema: &GridSchema) -> Result<Vec<DaySection>> {
        let label_sel = selector(&schema.label_selector)?;
        let table_sel = selector(&schema.table_selector)?;
        let walk_sel = selector(&format!(
            "{}, {}",
            schema.label_selector, schema.table_selector
        ))?;

        let mut sections = Vec::new();
        let mut open: Option<Weekday> = None;

        for element in self.html.select(&walk_sel) {
            if label_sel.matches(&element) {
                if let Some(day) = open {
                    return Err(ConvertError::extraction(format!(
                        "Day label '{}' is not followed by a table",
                        day
                    )));
                }
                open = Some(Weekday::from_label(&element_text(&element))?);
            } else if table_sel.matches(&element) {
                let Some(day) = open.take() else {
                    return Err(ConvertError::extraction(format!(
                        "Table {} has no day label before it",
                        sections.len() + 1
                    )));
                };
                let section = DaySection::from_table(day, element)?;
                log::debug!("{}: {} row(s)", day, section.rows.len());
                sections.push(section);
            }
        }

        if let Some(day) = open {
            return Err(ConvertError::extraction(format!(
                "Day label '{}' is not followed by a table",
                day
            )));
        }

        Ok(sections)
    }

    /// Every activity row of the page, in document order.
    pub fn activities(&self, schema: &GridSchema) -> Result<Vec<ActivityRecord>> {
        let mut records = Vec::new();
        for section in self.day_sections(schema)? {
            records.extend(section.records(schema)?);
        }
        Ok(records)
    }
}
