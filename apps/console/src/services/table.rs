use crate::models::{Priority, Report, ReportStatus};

pub const NO_COMPLAINTS: &str = "No complaints found";
const TITLE_LIMIT: usize = 50;
const NO_LOCATION: &str = "No location";

#[derive(Clone, Debug, PartialEq)]
pub struct ComplaintRow {
    pub report_id: String,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub department: String,
    pub status: ReportStatus,
    pub location: String,
    pub image_file: Option<String>,
    pub submitted_on: String,
}

impl ComplaintRow {
    pub fn from_report(report: &Report) -> Self {
        Self {
            report_id: report.report_id.clone(),
            title: truncate_title(&report.description),
            category: report.category.clone(),
            priority: report.priority,
            department: report.department.clone(),
            status: report.status,
            location: location_text(report),
            image_file: report.image_path.as_deref().and_then(file_name),
            submitted_on: report
                .created_at
                .as_deref()
                .map(date_part)
                .unwrap_or("-")
                .to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableBody {
    Rows(Vec<ComplaintRow>),
    Empty,
}

pub fn table_body(reports: &[Report]) -> TableBody {
    if reports.is_empty() {
        TableBody::Empty
    } else {
        TableBody::Rows(reports.iter().map(ComplaintRow::from_report).collect())
    }
}

/// First line of the description, cut at a char boundary.
pub fn truncate_title(description: &str) -> String {
    let first_line = description.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return "Untitled complaint".to_string();
    }
    if first_line.chars().count() <= TITLE_LIMIT {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(TITLE_LIMIT).collect();
    format!("{}...", cut.trim_end())
}

/// `uploads/abc.jpg` and `C:\uploads\abc.jpg` both yield `abc.jpg`.
pub fn file_name(path: &str) -> Option<String> {
    path.rsplit(&['/', '\\'][..])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

pub fn location_text(report: &Report) -> String {
    if let Some(address) = report
        .address_extracted
        .as_deref()
        .map(str::trim)
        .filter(|address| !address.is_empty() && *address != NO_LOCATION)
    {
        return address.to_string();
    }

    let coordinates = report
        .coordinates
        .map(|c| (c.lat, c.lng))
        .or_else(|| report.location_lat.zip(report.location_lon));

    match coordinates {
        Some((lat, lng)) if lat.is_finite() && lng.is_finite() => format!("{lat:.4}, {lng:.4}"),
        _ => NO_LOCATION.to_string(),
    }
}

fn date_part(timestamp: &str) -> &str {
    timestamp
        .split(&['T', ' '][..])
        .next()
        .filter(|part| !part.is_empty())
        .unwrap_or(timestamp)
}
