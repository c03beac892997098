//! Neo4j-backed store over the HTTP transaction API.
//!
//! One Cypher statement per contract method, committed through
//! `POST {base}/db/{database}/tx/commit` with basic auth. The engine is
//! strictly read-only against the graph.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::models::{ContraindicationMap, HerbFact, HerbSummary};

use super::{KnowledgeStore, StoreError};

const ALL_SYMPTOMS: &str = "MATCH (s:Symptom) RETURN s.name AS name ORDER BY name";

const HERBS_FOR_SYMPTOMS: &str = "\
WITH $symptoms AS symptoms \
MATCH (c:Condition)-[:HAS_SYMPTOM]->(s:Symptom) \
WHERE toLower(s.name) IN [x IN symptoms | toLower(x)] \
MATCH (h:Herb)-[r:HELPS_WITH]->(c) \
RETURN h.name AS herb, c.name AS condition, r.evidence AS evidence, h.properties AS properties";

const CONTRAINDICATIONS: &str = "\
MATCH (h1:Herb)-[:INTERACTS_WITH]->(h2:Herb) \
WHERE toLower(h1.name) IN [x IN $herbs | toLower(x)] \
RETURN h1.name AS herb, collect(DISTINCT h2.name) AS avoid";

const CONDITIONS_FROM_SYMPTOMS: &str = "\
WITH $symptoms AS symptoms \
MATCH (c:Condition)-[:HAS_SYMPTOM]->(s:Symptom) \
WHERE toLower(s.name) IN [x IN symptoms | toLower(x)] \
RETURN DISTINCT c.name AS condition LIMIT 10";

const SEARCH_HERBS: &str = "\
MATCH (h:Herb) \
WHERE toLower(h.name) CONTAINS toLower($q) OR $q = '' \
RETURN h.name AS name, h.properties AS properties ORDER BY name LIMIT 50";

/// Blocking HTTP client for a Neo4j graph store.
pub struct HttpGraphStore {
    base_url: String,
    database: String,
    user: String,
    password: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpGraphStore {
    pub fn new(
        base_url: &str,
        database: &str,
        user: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            database: database.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.graph_url,
            &settings.graph_database,
            &settings.graph_user,
            &settings.graph_password,
            settings.graph_timeout_secs,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Commit a single statement and return its rows.
    fn commit(&self, statement: &str, parameters: Value) -> Result<Vec<Vec<Value>>, StoreError> {
        let url = format!("{}/db/{}/tx/commit", self.base_url, self.database);
        let body = TxRequest {
            statements: vec![TxStatement {
                statement,
                parameters,
            }],
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    StoreError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    StoreError::Timeout(self.timeout_secs)
                } else {
                    StoreError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TxResponse = response
            .json()
            .map_err(|e| StoreError::ResponseParsing(e.to_string()))?;

        if let Some(err) = parsed.errors.into_iter().next() {
            return Err(StoreError::Query(format!("{}: {}", err.code, err.message)));
        }

        let rows = parsed
            .results
            .into_iter()
            .next()
            .map(|r| r.data.into_iter().map(|d| d.row).collect())
            .unwrap_or_default();

        tracing::debug!(statement_head = statement_head(statement), "Graph query committed");
        Ok(rows)
    }
}

impl KnowledgeStore for HttpGraphStore {
    fn all_symptoms(&self) -> Result<Vec<String>, StoreError> {
        let rows = self.commit(ALL_SYMPTOMS, json!({}))?;
        Ok(rows.iter().map(|row| string_at(row, 0)).collect())
    }

    fn herbs_for_symptoms(&self, symptoms: &[String]) -> Result<Vec<HerbFact>, StoreError> {
        let rows = self.commit(HERBS_FOR_SYMPTOMS, json!({ "symptoms": symptoms }))?;
        Ok(rows
            .iter()
            .map(|row| HerbFact {
                herb: string_at(row, 0),
                condition: string_at(row, 1),
                evidence: opt_string_at(row, 2),
                properties: list_at(row, 3),
            })
            .collect())
    }

    fn contraindications(&self, herbs: &[String]) -> Result<ContraindicationMap, StoreError> {
        let rows = self.commit(CONTRAINDICATIONS, json!({ "herbs": herbs }))?;
        let mut map = ContraindicationMap::new();
        for row in &rows {
            map.insert(string_at(row, 0), list_at(row, 1));
        }
        Ok(map)
    }

    fn conditions_from_symptoms(&self, symptoms: &[String]) -> Result<Vec<String>, StoreError> {
        let rows = self.commit(CONDITIONS_FROM_SYMPTOMS, json!({ "symptoms": symptoms }))?;
        Ok(rows.iter().map(|row| string_at(row, 0)).collect())
    }

    fn search_herbs(&self, query: &str) -> Result<Vec<HerbSummary>, StoreError> {
        let rows = self.commit(SEARCH_HERBS, json!({ "q": query }))?;
        Ok(rows
            .iter()
            .map(|row| HerbSummary {
                name: string_at(row, 0),
                properties: list_at(row, 1),
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Transaction API wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TxRequest<'a> {
    statements: Vec<TxStatement<'a>>,
}

#[derive(Serialize)]
struct TxStatement<'a> {
    statement: &'a str,
    parameters: Value,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Row accessors
// ---------------------------------------------------------------------------

fn string_at(row: &[Value], idx: usize) -> String {
    row.get(idx)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Null and empty-string cells both map to `None`.
fn opt_string_at(row: &[Value], idx: usize) -> Option<String> {
    row.get(idx)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn list_at(row: &[Value], idx: usize) -> Vec<String> {
    row.get(idx)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn statement_head(statement: &str) -> &str {
    let end = statement
        .char_indices()
        .nth(24)
        .map(|(i, _)| i)
        .unwrap_or(statement.len());
    &statement[..end]
}
