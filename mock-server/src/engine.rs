//! Stand-ins for the parsing, geocoding, matching and taxonomy engines.
//!
//! Documents are plain text: the first non-empty line is the candidate name
//! (or job title), a `Skills:` line lists comma-separated skills and a
//! `Location:` line gives `city, region, country`.

use serde_json::{json, Map, Value};

use crate::store::IndexKind;

#[derive(Debug, Default, PartialEq)]
pub struct TextDocument {
    pub title: String,
    pub skills: Vec<String>,
    pub location: Option<Value>,
}

pub fn read_text(text: &str) -> TextDocument {
    let mut doc = TextDocument::default();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = strip_label(line, "skills:") {
            doc.skills = split_list(rest);
        } else if let Some(rest) = strip_label(line, "location:") {
            doc.location = location_from_parts(&split_list(rest));
        } else if doc.title.is_empty() {
            doc.title = line.to_string();
        }
    }
    doc
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label).then(|| &line[label.len()..])
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn location_from_parts(parts: &[String]) -> Option<Value> {
    let (municipality, rest) = parts.split_first()?;
    let mut location = Map::new();
    location.insert("Municipality".into(), json!(municipality));
    match rest {
        [region, country, ..] => {
            location.insert("Regions".into(), json!([region]));
            location.insert("CountryCode".into(), json!(country));
        }
        [country] => {
            location.insert("CountryCode".into(), json!(country));
        }
        [] => {}
    }
    Some(Value::Object(location))
}

pub fn resume_data(text: &str, doc: &TextDocument) -> Value {
    let mut contact = json!({ "CandidateName": { "FormattedName": doc.title } });
    if let Some(location) = &doc.location {
        contact["Location"] = location.clone();
    }
    let raw: Vec<Value> = doc
        .skills
        .iter()
        .map(|name| json!({ "Name": name, "MonthsExperience": { "Value": 12.0 } }))
        .collect();
    json!({
        "ContactInformation": contact,
        "Skills": { "Raw": raw },
        "ResumeMetadata": { "PlainText": text },
    })
}

pub fn job_data(text: &str, doc: &TextDocument) -> Value {
    let raw: Vec<Value> = doc
        .skills
        .iter()
        .map(|name| json!({ "Name": name, "Required": true }))
        .collect();
    let mut job = json!({
        "JobTitles": { "MainJobTitle": doc.title, "JobTitle": [doc.title] },
        "Skills": { "Raw": raw },
        "JobMetadata": { "PlainText": text },
    });
    if let Some(location) = &doc.location {
        job["CurrentLocation"] = location.clone();
    }
    job
}

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

fn location_mut(kind: IndexKind, data: &mut Value) -> &mut Value {
    match kind {
        IndexKind::Resume => &mut data["ContactInformation"]["Location"],
        IndexKind::Job => &mut data["CurrentLocation"],
    }
}

fn has_address(location: &Value) -> bool {
    ["Municipality", "CountryCode", "PostalCode"]
        .iter()
        .any(|key| location.get(key).and_then(Value::as_str).is_some_and(|s| !s.is_empty()))
}

/// Deterministic coordinates so repeated runs agree.
fn fake_coordinates(location: &Value) -> (f64, f64) {
    let seed: u32 = location.to_string().bytes().map(u32::from).sum();
    let latitude = f64::from(seed % 170) - 85.0 + 0.25;
    let longitude = f64::from((seed / 7) % 350) - 175.0 + 0.5;
    (latitude, longitude)
}

/// Geocode the document in place.
///
/// `options` is the request's geocode options: explicit `GeoCoordinates` win,
/// then `PostalAddress`, then the address already in the document.
pub fn geocode(kind: IndexKind, data: &mut Value, options: &Value) -> Result<(), String> {
    if !data.is_object() {
        return Err("No document data was supplied.".to_string());
    }
    let provider = match options.get("Provider").and_then(Value::as_str) {
        Some(p @ ("Google" | "Bing")) => p,
        _ => "Cached",
    };

    if let Some(coordinates) = options.get("GeoCoordinates").filter(|c| c.is_object()) {
        let mut coordinates = coordinates.clone();
        coordinates["Source"] = json!("Raw");
        location_mut(kind, data)["GeoCoordinates"] = coordinates;
        return Ok(());
    }

    if let Some(address) = options.get("PostalAddress").filter(|a| a.is_object()) {
        let mut location = Map::new();
        for (from, to) in [
            ("Municipality", "Municipality"),
            ("CountryCode", "CountryCode"),
            ("PostalCode", "PostalCode"),
        ] {
            if let Some(v) = address.get(from) {
                location.insert(to.into(), v.clone());
            }
        }
        if let Some(region) = address.get("Region") {
            location.insert("Regions".into(), json!([region]));
        }
        *location_mut(kind, data) = Value::Object(location);
    }

    let location = location_mut(kind, data);
    if !has_address(location) {
        return Err("No address was found to geocode.".to_string());
    }
    let (latitude, longitude) = fake_coordinates(location);
    location["GeoCoordinates"] = json!({ "Latitude": latitude, "Longitude": longitude, "Source": provider });
    Ok(())
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

pub fn skill_names(data: &Value) -> Vec<String> {
    data["Skills"]["Raw"]
        .as_array()
        .map(|raw| {
            raw.iter()
                .filter_map(|s| s["Name"].as_str())
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}

/// Share of the source's skills found in the target, 0 to 100.
pub fn skill_score(source: &[String], target: &[String]) -> f64 {
    if source.is_empty() {
        return 0.0;
    }
    let shared = source.iter().filter(|s| target.contains(s)).count();
    shared as f64 * 100.0 / source.len() as f64
}

pub fn matches_expression(data: &Value, expression: &str) -> bool {
    let expression = expression.trim().to_lowercase();
    expression.is_empty() || data.to_string().to_lowercase().contains(&expression)
}

// ---------------------------------------------------------------------------
// Taxonomies
// ---------------------------------------------------------------------------

pub struct TaxonomySkill {
    pub id: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    /// Lowercase ASCII term that triggers the skill in free text.
    pub term: &'static str,
}

pub const SKILLS: &[TaxonomySkill] = &[
    TaxonomySkill {
        id: "KS120P86XDXZJT3B7KVJ",
        description: "Rust (Programming Language)",
        kind: "Specialized Skill",
        term: "rust",
    },
    TaxonomySkill {
        id: "KS125LS6N7WP4S6SFTCK",
        description: "Python (Programming Language)",
        kind: "Specialized Skill",
        term: "python",
    },
    TaxonomySkill {
        id: "KS440W865GC4VRBW6LJP",
        description: "SQL (Programming Language)",
        kind: "Specialized Skill",
        term: "sql",
    },
    TaxonomySkill {
        id: "KS1218W78FGVPVP2KXPX",
        description: "Project Management",
        kind: "Common Skill",
        term: "project management",
    },
    TaxonomySkill {
        id: "KS1200364C9C1LK3V5Q1",
        description: "Communication",
        kind: "Common Skill",
        term: "communication",
    },
];

impl TaxonomySkill {
    pub fn to_json(&self) -> Value {
        json!({ "Id": self.id, "Description": self.description, "Type": self.kind })
    }

    fn matches(&self, input: &str) -> bool {
        let input = input.trim().to_lowercase();
        !input.is_empty() && (input == self.term || self.description.to_lowercase().contains(&input))
    }
}

pub fn autocomplete(prefix: &str, limit: usize) -> Vec<&'static TaxonomySkill> {
    let prefix = prefix.to_lowercase();
    SKILLS
        .iter()
        .filter(|s| s.description.to_lowercase().starts_with(&prefix))
        .take(limit)
        .collect()
}

pub fn lookup(id: &str) -> Option<&'static TaxonomySkill> {
    SKILLS.iter().find(|s| s.id == id)
}

pub fn normalize(input: &str) -> Option<&'static TaxonomySkill> {
    SKILLS.iter().find(|s| s.matches(input))
}

/// Skills found in `text` with the byte offsets of each occurrence.
pub fn extract(text: &str) -> Vec<(&'static TaxonomySkill, Vec<(usize, usize)>)> {
    let lower = text.to_ascii_lowercase();
    SKILLS
        .iter()
        .filter_map(|skill| {
            let spans: Vec<(usize, usize)> = lower
                .match_indices(skill.term)
                .map(|(start, m)| (start, start + m.len()))
                .collect();
            (!spans.is_empty()).then_some((skill, spans))
        })
        .collect()
}

pub struct Profession {
    pub code_id: u32,
    pub description: &'static str,
    keywords: &'static [&'static str],
}

pub const PROFESSIONS: &[Profession] = &[
    Profession {
        code_id: 2001,
        description: "Software Developer",
        keywords: &["developer", "engineer", "programmer"],
    },
    Profession {
        code_id: 3105,
        description: "Data Analyst",
        keywords: &["analyst"],
    },
    Profession {
        code_id: 4410,
        description: "Project Manager",
        keywords: &["manager"],
    },
];

pub fn classify_profession(title: &str) -> Option<&'static Profession> {
    let title = title.to_lowercase();
    PROFESSIONS
        .iter()
        .find(|p| p.keywords.iter().any(|k| title.contains(k)))
}
