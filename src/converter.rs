// File: ./src/converter.rs
// The conversion run: grid -> records -> weeks -> dates -> events -> calendar text.
use crate::error::{ConvertError, Result};
use crate::grid::{GridSchema, TimetableDocument};
use crate::model::adapter::{ExportOptions, to_ics_string};
use crate::model::item::{CalendarEvent, TermAnchor};
use crate::model::resolver::DateResolver;
use crate::model::weeks::expand_weeks;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    #[default]
    Plain,
    Base64,
}

/// What the boundary layer hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn success(payload: String) -> Self {
        Self {
            ok: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(err: &ConvertError) -> Self {
        Self {
            ok: false,
            payload: None,
            error: Some(err.to_string()),
        }
    }
}

/// Holds everything a run needs. Build one per request; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct Converter {
    resolver: DateResolver,
    schema: GridSchema,
    export: ExportOptions,
    encoding: PayloadEncoding,
}

impl Converter {
    pub fn new(anchor: TermAnchor) -> Self {
        Self {
            resolver: DateResolver::new(anchor),
            schema: GridSchema::default(),
            export: ExportOptions::default(),
            encoding: PayloadEncoding::default(),
        }
    }

    pub fn with_schema(mut self, schema: GridSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_export_options(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    pub fn with_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Extracts and materializes every event of the document.
    /// The first failing row aborts the whole run.
    pub fn events(&self, document: &TimetableDocument) -> Result<Vec<CalendarEvent>> {
        let records = document.activities(&self.schema)?;

        let mut events = Vec::new();
        for record in &records {
            let weeks = expand_weeks(&record.weeks)?;
            events.extend(record.materialize(&weeks, &self.resolver)?);
        }

        if records.is_empty() {
            log::warn!("No activities found in the timetable, the calendar will be empty");
        }
        log::info!(
            "Converted {} activity row(s) into {} event(s)",
            records.len(),
            events.len()
        );
        Ok(events)
    }

    /// Plain calendar text, regardless of the configured payload encoding.
    pub fn convert_document(&self, document: &TimetableDocument) -> Result<String> {
        let events = self.events(document)?;
        Ok(to_ics_string(&events, &self.export))
    }

    pub fn convert(&self, raw_html: &str) -> Result<String> {
        self.convert_document(&TimetableDocument::parse(raw_html))
    }

    /// Runs the conversion and folds the outcome into a `ConversionResult`,
    /// applying the payload encoding.
    pub fn run(&self, raw_html: &str) -> ConversionResult {
        match self.convert(raw_html) {
            Ok(ics) => {
                let payload = match self.encoding {
                    PayloadEncoding::Plain => ics,
                    PayloadEncoding::Base64 => STANDARD.encode(ics.as_bytes()),
                };
                ConversionResult::success(payload)
            }
            Err(e) => {
                log::error!("Conversion failed: {}", e);
                ConversionResult::failure(&e)
            }
        }
    }
}
