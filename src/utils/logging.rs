use crate::core::message::QaPair;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only transcript of completed exchanges.
pub struct LoggingState {
    file_path: Option<String>,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = &log_file {
            test_file_access(path)?;
        }

        Ok(LoggingState {
            file_path: log_file,
        })
    }

    pub fn is_active(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn log_session_start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.write_to_log(&format!("## Session started {stamp}"))
    }

    pub fn log_exchange(&self, pair: &QaPair) -> Result<(), Box<dyn std::error::Error>> {
        let stamp = Local::now().format("%H:%M:%S");
        let entry = format!(
            "## {stamp}\nQ: {}\n\nA: {}",
            pair.question(),
            pair.answer()
        );
        self.write_to_log(&entry)
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn get_status_string(&self) -> String {
        match &self.file_path {
            None => "off".to_string(),
            Some(path) => Path::new(path)
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
        }
    }
}

fn test_file_access(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.flush()?;
    Ok(())
}
