//! Engine entrypoint: load the trained bundle, then score newline-delimited
//! JSON requests from stdin, one JSON result per line on stdout. Every
//! decision is recorded in the encrypted audit store. Transport (HTTP, queue)
//! belongs to the serving layer in front of this binary.

use mshiyane_credit::{
    business::BusinessRiskEngine,
    config::EngineConfig,
    fraud::FraudDetector,
    logging::StructuredLogger,
    model::ModelBundle,
    record::{ApplicantRecord, BusinessRecord, TransactionRecord},
    scoring::ScoringEngine,
    storage::DecisionStore,
};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScoreRequest {
    Credit { record: ApplicantRecord },
    Fraud { transaction: TransactionRecord },
    Business { business: BusinessRecord },
}

#[derive(Serialize)]
#[serde(untagged)]
enum ScoreResponse {
    Credit(mshiyane_credit::CreditScoreResult),
    Fraud(mshiyane_credit::FraudAssessment),
    Business(mshiyane_credit::BusinessRiskAssessment),
}

fn process_request(
    line: &str,
    scoring: &ScoringEngine,
    fraud: &FraudDetector,
    business: &BusinessRiskEngine,
    store: &DecisionStore,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let request: ScoreRequest = serde_json::from_str(line)?;
    let decision_id = uuid::Uuid::new_v4().to_string();
    let ts = chrono::Utc::now().timestamp_millis();

    let (kind, response, score) = match request {
        ScoreRequest::Credit { record } => {
            let result = scoring.score(&record)?;
            let score = result.credit_score;
            ("credit", ScoreResponse::Credit(result), score)
        }
        ScoreRequest::Fraud { transaction } => {
            let assessment = fraud.assess(&transaction)?;
            let probability = assessment.fraud_probability;
            ("fraud", ScoreResponse::Fraud(assessment), probability)
        }
        ScoreRequest::Business { business: record } => {
            let assessment = business.assess(&record);
            let score = f64::from(assessment.risk_score);
            ("business", ScoreResponse::Business(assessment), score)
        }
    };

    let payload = serde_json::to_string(&response)?;
    store.record(&decision_id, ts, kind, &payload, Some(score))?;
    info!(decision_id = %decision_id, kind, score, "decision recorded");
    Ok(payload)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("MSHIYANE_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = EngineConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(
        data_dir = ?config.data_dir,
        bundle_dir = ?config.bundle_dir,
        "credit engine starting"
    );

    std::fs::create_dir_all(&config.data_dir)?;
    let store_path = config.data_dir.join("decisions.db");
    // In production: KMS / vault-managed secret
    let secret = std::env::var("MSHIYANE_STORE_SECRET")
        .unwrap_or_else(|_| "store-secret-placeholder".to_string());
    let store = Arc::new(DecisionStore::open(&store_path, secret.as_bytes())?);

    // Artifact problems abort startup; the engine never serves degraded.
    let bundle = Arc::new(ModelBundle::load(&config.bundle_dir, config.scoring.variant)?);
    info!(
        version = bundle.model_version(),
        variant = ?bundle.variant(),
        fraud_model = bundle.has_fraud_model(),
        "model bundle loaded"
    );

    let scoring = ScoringEngine::new(Arc::clone(&bundle));
    let fraud = FraudDetector::new(Arc::clone(&bundle), config.fraud.clone());
    let business = BusinessRiskEngine::new();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match process_request(&line, &scoring, &fraud, &business, &store) {
            Ok(result) => writeln!(out, "{}", result)?,
            Err(e) => {
                warn!(error = %e, "request failed");
                writeln!(out, "{}", serde_json::json!({ "error": e.to_string() }))?;
            }
        }
    }

    info!("input drained, credit engine stopping");
    Ok(())
}
