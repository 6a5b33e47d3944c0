//! Lenient parser for assistant replies.
//!
//! The chatbot lists query results as `Complaint N:` headings followed by
//! `• Field Name: value` lines. Replies in that shape become structured cards;
//! anything else is shown verbatim. Parsing never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*complaint[ \t]+#?(\d+)[ \t]*:[ \t]*$").expect("heading regex is valid")
});

static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[•\-*]\s*)?([A-Za-z][A-Za-z _]{0,40}?)\s*:\s*(.*)$")
        .expect("field regex is valid")
});

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplaintEntry {
    pub number: u32,
    pub report_id: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    /// Labelled fields without a dedicated slot, in reply order.
    pub extra: Vec<(String, String)>,
    /// Free text that follows this entry's fields before the next heading.
    pub note: Option<String>,
}

impl ComplaintEntry {
    fn has_fields(&self) -> bool {
        self.report_id.is_some()
            || self.category.is_some()
            || self.priority.is_some()
            || self.status.is_some()
            || self.description.is_some()
            || !self.extra.is_empty()
    }

    fn assign(&mut self, label: &str, value: String) -> FieldSlot {
        let key: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let slot = match key.as_str() {
            "reportid" | "id" => &mut self.report_id,
            "category" => &mut self.category,
            "priority" => &mut self.priority,
            "status" => &mut self.status,
            "description" => &mut self.description,
            _ => {
                self.extra.push((label.trim().to_string(), value));
                return FieldSlot::Extra(self.extra.len() - 1);
            }
        };
        *slot = Some(value);
        FieldSlot::Named(key)
    }

    fn append(&mut self, slot: &FieldSlot, line: &str) {
        let target = match slot {
            FieldSlot::Named(key) => match key.as_str() {
                "reportid" | "id" => self.report_id.as_mut(),
                "category" => self.category.as_mut(),
                "priority" => self.priority.as_mut(),
                "status" => self.status.as_mut(),
                _ => self.description.as_mut(),
            },
            FieldSlot::Extra(idx) => self.extra.get_mut(*idx).map(|(_, value)| value),
        };
        if let Some(value) = target {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(line.trim());
        }
    }
}

enum FieldSlot {
    Named(String),
    Extra(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParsedReply {
    Structured {
        preamble: Option<String>,
        entries: Vec<ComplaintEntry>,
        trailer: Option<String>,
    },
    Plain(String),
}

pub fn parse_reply(text: &str) -> ParsedReply {
    let headings: Vec<_> = HEADING.captures_iter(text).collect();
    if headings.is_empty() {
        return ParsedReply::Plain(text.to_string());
    }

    let Some(first) = headings.first().and_then(|caps| caps.get(0)) else {
        return ParsedReply::Plain(text.to_string());
    };
    let preamble = non_blank(&text[..first.start()]);

    let mut entries = Vec::with_capacity(headings.len());
    let mut trailer = None;

    for (idx, caps) in headings.iter().enumerate() {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let body_end = headings
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let body = &text[whole.end()..body_end];
        let is_last = idx + 1 == headings.len();

        let mut entry = ComplaintEntry {
            number: number.as_str().parse().unwrap_or(idx as u32 + 1),
            ..ComplaintEntry::default()
        };
        let leftover = parse_fields(&mut entry, body);
        if is_last {
            trailer = leftover;
        } else {
            entry.note = leftover;
        }
        entries.push(entry);
    }

    if !entries.iter().any(ComplaintEntry::has_fields) {
        return ParsedReply::Plain(text.to_string());
    }

    ParsedReply::Structured {
        preamble,
        entries,
        trailer,
    }
}

/// Fills `entry` from a section body. Returns free text found after a blank
/// line once fields have started.
fn parse_fields(entry: &mut ComplaintEntry, body: &str) -> Option<String> {
    let mut last_slot: Option<FieldSlot> = None;
    let mut saw_blank = false;
    let mut fields = 0usize;
    let mut lines = body.lines();

    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            saw_blank = fields > 0;
            continue;
        }

        if let Some(caps) = FIELD.captures(line) {
            if !saw_blank {
                let label = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
                last_slot = Some(entry.assign(label, value.to_string()));
                fields += 1;
                continue;
            }
        }

        if saw_blank {
            let rest: Vec<&str> = std::iter::once(line).chain(lines).collect();
            return non_blank(&rest.join("\n"));
        }

        match last_slot.as_ref() {
            Some(slot) => entry.append(slot, line),
            None => continue,
        }
    }

    None
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
