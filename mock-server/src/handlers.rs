use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use crate::engine;
use crate::store::{IndexKind, IndexRejection, Store, StoredIndex};
use crate::{failure, info, success, AppState, Reply};

type Outcome = Result<Reply, Reply>;

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Reply> {
    serde_json::from_slice(body).map_err(|e| {
        failure(
            StatusCode::BAD_REQUEST,
            "InvalidParameter",
            &format!("The request body could not be read: {e}"),
        )
    })
}

fn missing(parameter: &str) -> Reply {
    failure(
        StatusCode::BAD_REQUEST,
        "MissingParameter",
        &format!("{parameter} is required."),
    )
}

fn stage(code: &str, message: &str) -> Value {
    json!({ "Code": code, "Message": message })
}

fn no_index() -> Reply {
    failure(
        StatusCode::NOT_FOUND,
        "DataNotFound",
        &IndexRejection::MissingIndex.message(),
    )
}

fn no_document() -> Reply {
    failure(
        StatusCode::NOT_FOUND,
        "DataNotFound",
        "No document found with the given id.",
    )
}

fn rejection(r: IndexRejection) -> Reply {
    let status = match r {
        IndexRejection::MissingIndex => StatusCode::NOT_FOUND,
        IndexRejection::WrongKind(_) => StatusCode::BAD_REQUEST,
    };
    failure(status, r.code(), &r.message())
}

/// Document payload under `ResumeData` or `JobData`.
fn document_payload(body: &Value, kind: IndexKind) -> Result<Value, Reply> {
    body.get(kind.data_key())
        .filter(|d| d.is_object())
        .cloned()
        .ok_or_else(|| missing(kind.data_key()))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IndexingOptions {
    index_id: String,
    document_id: String,
    #[serde(default)]
    user_defined_tags: Vec<String>,
}

fn index_stage(store: &mut Store, kind: IndexKind, data: &Value, options: IndexingOptions) -> Value {
    match store.put(
        &options.index_id,
        &options.document_id,
        kind,
        data.clone(),
        options.user_defined_tags,
    ) {
        Ok(()) => stage("Success", "Successfully indexed the document."),
        Err(r) => stage(r.code(), &r.message()),
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

pub async fn account(State(state): State<AppState>) -> Reply {
    let used = state.store.read().await.credits_used;
    let mut details = info("Success", "Success");
    details["CustomerDetails"] = json!({
        "AccountId": state.config.account_id,
        "Name": "Mock Account",
        "IPAddress": "127.0.0.1",
        "Region": "Local",
        "CreditsRemaining": state.config.credits_remaining - used as f64,
        "CreditsUsed": used as f64,
        "MaximumConcurrentRequests": 4.0,
        "ExpirationDate": "2099-12-31",
    });
    (StatusCode::OK, Json(json!({ "Info": details })))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParseBody {
    #[serde(default)]
    document_as_base64_string: String,
    #[serde(default)]
    document_last_modified: Option<String>,
    #[serde(default)]
    geocode_options: Option<Value>,
    #[serde(default)]
    indexing_options: Option<IndexingOptions>,
}

pub async fn parse_resume(State(state): State<AppState>, body: Bytes) -> Outcome {
    parse(state, IndexKind::Resume, &body).await
}

pub async fn parse_job(State(state): State<AppState>, body: Bytes) -> Outcome {
    parse(state, IndexKind::Job, &body).await
}

async fn parse(state: AppState, kind: IndexKind, body: &[u8]) -> Outcome {
    let req: ParseBody = parse_json(body)?;
    if req.document_as_base64_string.is_empty() {
        return Err(missing("DocumentAsBase64String"));
    }
    if req.document_last_modified.is_none() {
        return Err(missing("DocumentLastModified"));
    }
    let bytes = STANDARD.decode(&req.document_as_base64_string).map_err(|_| {
        failure(
            StatusCode::BAD_REQUEST,
            "InvalidParameter",
            "DocumentAsBase64String is not valid base64.",
        )
    })?;
    let text = String::from_utf8(bytes)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            failure(
                StatusCode::UNPROCESSABLE_ENTITY,
                "ConversionException",
                "The document could not be converted to text.",
            )
        })?;

    let doc = engine::read_text(&text);
    let mut data = match kind {
        IndexKind::Resume => engine::resume_data(&text, &doc),
        IndexKind::Job => engine::job_data(&text, &doc),
    };
    let mut value = json!({
        "ParsingResponse": stage("Success", "Successfully parsed the document."),
        "ParsingMetadata": { "ElapsedMilliseconds": 2.0, "TimedOut": false },
    });

    let geocode = req
        .geocode_options
        .filter(|o| o.get("IncludeGeocoding").and_then(Value::as_bool) == Some(true));
    if let Some(options) = geocode {
        value["GeocodeResponse"] = match engine::geocode(kind, &mut data, &options) {
            Ok(()) => stage("Success", "Successfully geocoded the document."),
            Err(message) => stage("InsufficientData", &message),
        };
    }

    let mut store = state.store.write().await;
    store.credits_used += 1;
    if let Some(options) = req.indexing_options {
        value["IndexingResponse"] = index_stage(&mut store, kind, &data, options);
    }
    value[kind.data_key()] = data;
    Ok(success(Some(value)))
}

// ---------------------------------------------------------------------------
// Indexes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateIndexBody {
    #[serde(default)]
    index_type: String,
}

pub async fn create_index(State(state): State<AppState>, Path(index_id): Path<String>, body: Bytes) -> Outcome {
    let req: CreateIndexBody = parse_json(&body)?;
    let kind = IndexKind::from_wire(&req.index_type).ok_or_else(|| {
        failure(
            StatusCode::BAD_REQUEST,
            "InvalidParameter",
            "IndexType must be Resume or Job.",
        )
    })?;
    let mut store = state.store.write().await;
    if store.indexes.contains_key(&index_id) {
        return Err(failure(
            StatusCode::CONFLICT,
            "DuplicateAsset",
            "An index with that id already exists.",
        ));
    }
    store.indexes.insert(
        index_id,
        StoredIndex {
            kind,
            documents: Default::default(),
        },
    );
    Ok(success(None))
}

pub async fn delete_index(State(state): State<AppState>, Path(index_id): Path<String>) -> Outcome {
    let mut store = state.store.write().await;
    store.indexes.remove(&index_id).ok_or_else(no_index)?;
    Ok(success(None))
}

pub async fn list_indexes(State(state): State<AppState>) -> Reply {
    let store = state.store.read().await;
    let indexes: Vec<Value> = store
        .indexes
        .iter()
        .map(|(name, index)| {
            json!({ "OwnerId": state.config.account_id, "Name": name, "IndexType": index.kind })
        })
        .collect();
    success(Some(Value::Array(indexes)))
}

pub async fn index_document(
    State(state): State<AppState>,
    Path((index_id, document_id)): Path<(String, String)>,
    body: Bytes,
) -> Outcome {
    let req: Value = parse_json(&body)?;
    let kind = if req.get("ResumeData").is_some() {
        IndexKind::Resume
    } else if req.get("JobData").is_some() {
        IndexKind::Job
    } else {
        return Err(missing("ResumeData or JobData"));
    };
    let data = document_payload(&req, kind)?;
    let tags = req
        .get("UserDefinedTags")
        .cloned()
        .map(serde_json::from_value::<Vec<String>>)
        .transpose()
        .map_err(|_| {
            failure(
                StatusCode::BAD_REQUEST,
                "InvalidParameter",
                "UserDefinedTags must be a list of strings.",
            )
        })?
        .unwrap_or_default();

    let mut store = state.store.write().await;
    store
        .put(&index_id, &document_id, kind, data, tags)
        .map_err(rejection)?;
    Ok(success(None))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path((index_id, document_id)): Path<(String, String)>,
) -> Outcome {
    let store = state.store.read().await;
    if !store.indexes.contains_key(&index_id) {
        return Err(no_index());
    }
    let (kind, doc) = store.document(&index_id, &document_id).ok_or_else(no_document)?;
    let mut value = json!({ "UserDefinedTags": doc.tags });
    value[kind.data_key()] = doc.data.clone();
    Ok(success(Some(value)))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path((index_id, document_id)): Path<(String, String)>,
) -> Outcome {
    let mut store = state.store.write().await;
    let index = store.indexes.get_mut(&index_id).ok_or_else(no_index)?;
    index.documents.remove(&document_id).ok_or_else(no_document)?;
    Ok(success(None))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeleteDocumentsBody {
    #[serde(default)]
    document_ids: Vec<String>,
}

pub async fn delete_documents(State(state): State<AppState>, Path(index_id): Path<String>, body: Bytes) -> Outcome {
    let req: DeleteDocumentsBody = parse_json(&body)?;
    if req.document_ids.is_empty() {
        return Err(missing("DocumentIds"));
    }
    let mut store = state.store.write().await;
    let index = store.indexes.get_mut(&index_id).ok_or_else(no_index)?;
    for id in &req.document_ids {
        index.documents.remove(id);
    }
    Ok(success(None))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateTagsBody {
    #[serde(default)]
    user_defined_tags: Vec<String>,
    #[serde(default)]
    method: String,
}

pub async fn update_tags(
    State(state): State<AppState>,
    Path((index_id, document_id)): Path<(String, String)>,
    body: Bytes,
) -> Outcome {
    let req: UpdateTagsBody = parse_json(&body)?;
    let mut store = state.store.write().await;
    let index = store.indexes.get_mut(&index_id).ok_or_else(no_index)?;
    let doc = index.documents.get_mut(&document_id).ok_or_else(no_document)?;
    match req.method.as_str() {
        "Add" => {
            for tag in req.user_defined_tags {
                if !doc.tags.contains(&tag) {
                    doc.tags.push(tag);
                }
            }
        }
        "Remove" => doc.tags.retain(|t| !req.user_defined_tags.contains(t)),
        "Overwrite" => doc.tags = req.user_defined_tags,
        "Delete" => doc.tags.clear(),
        _ => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "InvalidParameter",
                "Method must be Add, Remove, Overwrite or Delete.",
            ))
        }
    }
    Ok(success(None))
}

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

pub async fn geocode_resume(body: Bytes) -> Outcome {
    geocode_only(IndexKind::Resume, &body)
}

pub async fn geocode_job(body: Bytes) -> Outcome {
    geocode_only(IndexKind::Job, &body)
}

fn geocode_only(kind: IndexKind, body: &[u8]) -> Outcome {
    let req: Value = parse_json(body)?;
    let mut data = document_payload(&req, kind)?;
    engine::geocode(kind, &mut data, &req)
        .map_err(|message| failure(StatusCode::BAD_REQUEST, "InsufficientData", &message))?;
    let mut value = json!({});
    value[kind.data_key()] = data;
    Ok(success(Some(value)))
}

pub async fn geocode_and_index_resume(State(state): State<AppState>, body: Bytes) -> Outcome {
    geocode_and_index(state, IndexKind::Resume, &body).await
}

pub async fn geocode_and_index_job(State(state): State<AppState>, body: Bytes) -> Outcome {
    geocode_and_index(state, IndexKind::Job, &body).await
}

async fn geocode_and_index(state: AppState, kind: IndexKind, body: &[u8]) -> Outcome {
    let req: Value = parse_json(body)?;
    let mut data = document_payload(&req, kind)?;
    let options: IndexingOptions = req
        .get("IndexingOptions")
        .cloned()
        .ok_or_else(|| missing("IndexingOptions"))
        .and_then(|o| serde_json::from_value(o).map_err(|_| missing("IndexingOptions.IndexId")))?;
    let index_if_geocode_fails = req
        .get("IndexIfGeocodeFails")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let geocode_options = req.get("GeocodeOptions").cloned().unwrap_or(Value::Null);

    let geocoded = engine::geocode(kind, &mut data, &geocode_options);
    let mut value = json!({
        "GeocodeResponse": match &geocoded {
            Ok(()) => stage("Success", "Successfully geocoded the document."),
            Err(message) => stage("InsufficientData", message),
        },
    });
    if geocoded.is_ok() || index_if_geocode_fails {
        let mut store = state.store.write().await;
        value["IndexingResponse"] = index_stage(&mut store, kind, &data, options);
    }
    value[kind.data_key()] = data;
    Ok(success(Some(value)))
}

// ---------------------------------------------------------------------------
// Search and match
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct Pagination {
    #[serde(default)]
    skip: usize,
    #[serde(default)]
    take: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchBody {
    #[serde(default)]
    index_ids_to_search_into: Vec<String>,
    #[serde(default)]
    query: Value,
    #[serde(default)]
    pagination_settings: Option<Pagination>,
}

pub async fn search(State(state): State<AppState>, body: Bytes) -> Outcome {
    let req: SearchBody = parse_json(&body)?;
    if req.index_ids_to_search_into.is_empty() {
        return Err(missing("IndexIdsToSearchInto"));
    }
    let expression = req
        .query
        .get("SearchExpression")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let store = state.store.read().await;
    let mut hits = Vec::new();
    for index_id in &req.index_ids_to_search_into {
        let index = store.indexes.get(index_id).ok_or_else(no_index)?;
        let mut ids: Vec<&String> = index
            .documents
            .iter()
            .filter(|(_, doc)| engine::matches_expression(&doc.data, expression))
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        hits.extend(ids.into_iter().map(|id| json!({ "Id": id, "IndexId": index_id })));
    }

    let page = req.pagination_settings.unwrap_or_default();
    let total = hits.len();
    let matches: Vec<Value> = hits
        .into_iter()
        .skip(page.skip)
        .take(page.take.unwrap_or(50))
        .collect();
    Ok(success(Some(json!({
        "CurrentCount": matches.len() as f64,
        "TotalCount": total as f64,
        "Matches": matches,
    }))))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MatchBody {
    #[serde(default)]
    index_ids_to_search_into: Vec<String>,
    #[serde(default)]
    take: Option<usize>,
}

fn skills_category(score: f64) -> Value {
    json!([{ "Category": "Skills", "UnweightedScore": score, "WeightedScore": score }])
}

/// Score every document in the given indexes against `source_skills`.
fn rank(
    store: &Store,
    req: &MatchBody,
    source_skills: &[String],
    exclude: Option<(&str, &str)>,
) -> Outcome {
    if req.index_ids_to_search_into.is_empty() {
        return Err(missing("IndexIdsToSearchInto"));
    }
    let mut scored = Vec::new();
    for index_id in &req.index_ids_to_search_into {
        let index = store.indexes.get(index_id).ok_or_else(no_index)?;
        for (doc_id, doc) in &index.documents {
            if exclude == Some((index_id.as_str(), doc_id.as_str())) {
                continue;
            }
            let score = engine::skill_score(source_skills, &engine::skill_names(&doc.data));
            scored.push((score, index_id.clone(), doc_id.clone()));
        }
    }
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| (&a.1, &a.2).cmp(&(&b.1, &b.2))));

    let total = scored.len();
    let matches: Vec<Value> = scored
        .into_iter()
        .take(req.take.unwrap_or(10))
        .map(|(score, index_id, id)| {
            json!({
                "Id": id,
                "IndexId": index_id,
                "WeightedScore": score,
                "CategoryScores": skills_category(score),
            })
        })
        .collect();
    Ok(success(Some(json!({
        "CurrentCount": matches.len() as f64,
        "TotalCount": total as f64,
        "Matches": matches,
        "AppliedCategoryWeights": [{ "Category": "Skills", "Weight": 1.0 }],
    }))))
}

pub async fn match_resume(State(state): State<AppState>, body: Bytes) -> Outcome {
    match_document(state, IndexKind::Resume, &body).await
}

pub async fn match_job(State(state): State<AppState>, body: Bytes) -> Outcome {
    match_document(state, IndexKind::Job, &body).await
}

async fn match_document(state: AppState, kind: IndexKind, body: &[u8]) -> Outcome {
    let raw: Value = parse_json(body)?;
    let source = document_payload(&raw, kind)?;
    let req: MatchBody = parse_json(body)?;
    let store = state.store.read().await;
    rank(&store, &req, &engine::skill_names(&source), None)
}

pub async fn match_indexed_document(
    State(state): State<AppState>,
    Path((index_id, document_id)): Path<(String, String)>,
    body: Bytes,
) -> Outcome {
    let req: MatchBody = parse_json(&body)?;
    let store = state.store.read().await;
    if !store.indexes.contains_key(&index_id) {
        return Err(no_index());
    }
    let (_, source) = store.document(&index_id, &document_id).ok_or_else(no_document)?;
    let skills = engine::skill_names(&source.data);
    rank(&store, &req, &skills, Some((index_id.as_str(), document_id.as_str())))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ScoredResume {
    id: String,
    #[serde(default)]
    resume_data: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BimetricBody {
    source_resume: Option<ScoredResume>,
    #[serde(default)]
    target_resumes: Vec<ScoredResume>,
}

pub async fn bimetric_score(body: Bytes) -> Outcome {
    let req: BimetricBody = parse_json(&body)?;
    let source = req.source_resume.ok_or_else(|| missing("SourceResume"))?;
    if req.target_resumes.is_empty() {
        return Err(missing("TargetResumes"));
    }
    let source_skills = engine::skill_names(&source.resume_data);
    let matches: Vec<Value> = req
        .target_resumes
        .iter()
        .map(|target| {
            let score = engine::skill_score(&source_skills, &engine::skill_names(&target.resume_data));
            json!({ "Id": target.id, "WeightedScore": score, "CategoryScores": skills_category(score) })
        })
        .collect();
    Ok(success(Some(json!({
        "Matches": matches,
        "AppliedCategoryWeights": [{ "Category": "Skills", "Weight": 1.0 }],
    }))))
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

pub async fn format_resume(body: Bytes) -> Outcome {
    let req: Value = parse_json(&body)?;
    let resume = document_payload(&req, IndexKind::Resume)?;
    let name = resume["ContactInformation"]["CandidateName"]["FormattedName"]
        .as_str()
        .unwrap_or("Unknown Candidate");
    let document = match req.get("DesiredDocumentType").and_then(Value::as_str) {
        None | Some("") | Some("DOCX") => format!("PK\u{3}\u{4}mock docx: {name}"),
        Some("PDF") => format!("%PDF-1.4\n% mock resume: {name}\n"),
        Some(_) => {
            return Err(failure(
                StatusCode::BAD_REQUEST,
                "InvalidParameter",
                "DesiredDocumentType must be DOCX or PDF.",
            ))
        }
    };
    Ok(success(Some(json!({ "DocumentAsBase64String": STANDARD.encode(document) }))))
}

// ---------------------------------------------------------------------------
// Taxonomies
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AutocompleteBody {
    #[serde(default)]
    prefix: String,
    #[serde(default)]
    limit: Option<usize>,
}

pub async fn skills_autocomplete(body: Bytes) -> Outcome {
    let req: AutocompleteBody = parse_json(&body)?;
    if req.prefix.trim().is_empty() {
        return Err(missing("Prefix"));
    }
    let skills: Vec<Value> = engine::autocomplete(&req.prefix, req.limit.unwrap_or(10))
        .into_iter()
        .map(engine::TaxonomySkill::to_json)
        .collect();
    Ok(success(Some(json!({ "Skills": skills }))))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LookupBody {
    #[serde(default)]
    skill_ids: Vec<String>,
}

pub async fn skills_lookup(body: Bytes) -> Outcome {
    let req: LookupBody = parse_json(&body)?;
    if req.skill_ids.is_empty() {
        return Err(missing("SkillIds"));
    }
    let skills: Vec<Value> = req
        .skill_ids
        .iter()
        .filter_map(|id| engine::lookup(id))
        .map(engine::TaxonomySkill::to_json)
        .collect();
    Ok(success(Some(json!({ "Skills": skills }))))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NormalizeSkillsBody {
    #[serde(default)]
    skills: Vec<String>,
}

pub async fn skills_normalize(body: Bytes) -> Outcome {
    let req: NormalizeSkillsBody = parse_json(&body)?;
    if req.skills.is_empty() {
        return Err(missing("Skills"));
    }
    let mut grouped: Vec<(&engine::TaxonomySkill, Vec<String>)> = Vec::new();
    for input in req.skills {
        let Some(skill) = engine::normalize(&input) else {
            continue;
        };
        match grouped.iter_mut().find(|(s, _)| s.id == skill.id) {
            Some((_, raw)) => raw.push(input),
            None => grouped.push((skill, vec![input])),
        }
    }
    let skills: Vec<Value> = grouped
        .into_iter()
        .map(|(skill, raw)| {
            let mut v = skill.to_json();
            v["RawSkills"] = json!(raw);
            v
        })
        .collect();
    Ok(success(Some(json!({ "Skills": skills }))))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExtractBody {
    #[serde(default)]
    text: String,
}

pub async fn skills_extract(body: Bytes) -> Outcome {
    let req: ExtractBody = parse_json(&body)?;
    if req.text.trim().is_empty() {
        return Err(missing("Text"));
    }
    let skills: Vec<Value> = engine::extract(&req.text)
        .into_iter()
        .map(|(skill, spans)| {
            let raw: Vec<Value> = spans
                .into_iter()
                .map(|(start, end)| {
                    json!({ "Value": &req.text[start..end], "StartOffset": start as f64, "EndOffset": end })
                })
                .collect();
            let mut v = skill.to_json();
            v["Score"] = json!(1.0);
            v["RawSkills"] = json!(raw);
            v
        })
        .collect();
    Ok(success(Some(json!({ "Skills": skills }))))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NormalizeProfessionsBody {
    #[serde(default)]
    job_titles: Vec<String>,
}

pub async fn professions_normalize(body: Bytes) -> Outcome {
    let req: NormalizeProfessionsBody = parse_json(&body)?;
    if req.job_titles.is_empty() {
        return Err(missing("JobTitles"));
    }
    let professions: Vec<Value> = req
        .job_titles
        .iter()
        .map(|title| match engine::classify_profession(title) {
            Some(p) => json!({
                "InputJobTitle": title,
                "Profession": { "CodeId": f64::from(p.code_id), "Description": p.description },
                "Confidence": 0.9,
            }),
            None => json!({ "InputJobTitle": title, "Confidence": 0.0 }),
        })
        .collect();
    Ok(success(Some(json!({ "Professions": professions }))))
}
