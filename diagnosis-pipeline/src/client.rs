//! Sequential HTTP client for the three remote medical services.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// The outcome of one full pipeline traversal.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// The text the pipeline operated on (typed directly or transcribed)
    pub input_text: String,
    /// Whole response body of the extraction service
    pub extracted_data: Value,
    /// Whole response body of the diagnosis service
    pub diagnosis: Value,
}

/// Client for the remote transcription, extraction, and diagnosis services.
///
/// Calls are strictly sequential with no retries; the first failure aborts
/// the run. Non-2xx statuses are errors.
#[derive(Debug, Clone)]
pub struct PipelineClient {
    config: PipelineConfig,
    client: reqwest::Client,
}

impl PipelineClient {
    /// Create a client with a per-request timeout from the configuration.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Transcribe audio reachable at a URL.
    pub async fn transcribe_url(&self, audio_url: &str) -> PipelineResult<String> {
        self.transcribe(json!({ "audioUrl": audio_url })).await
    }

    /// Transcribe a recorded clip supplied as base64-encoded audio bytes.
    pub async fn transcribe_recording(&self, audio_base64: &str) -> PipelineResult<String> {
        self.transcribe(json!({ "audioBase64": audio_base64 })).await
    }

    async fn transcribe(&self, payload: Value) -> PipelineResult<String> {
        debug!(url = %self.config.transcribe_url, "Requesting transcription");

        let response = self
            .client
            .post(&self.config.transcribe_url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let text = body
            .get("transcription")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            warn!("Transcription service returned no usable text");
            return Err(PipelineError::EmptyTranscription);
        }

        info!(chars = text.len(), "Transcription completed");
        Ok(text)
    }

    /// Extract structured medical fields from free text.
    ///
    /// The whole response body is the extraction result; its schema belongs
    /// to the remote service and is not inspected here.
    pub async fn extract(&self, text: &str) -> PipelineResult<Value> {
        debug!(url = %self.config.extract_url, "Requesting medical extraction");

        let response = self
            .client
            .post(&self.config.extract_url)
            .json(&json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?;

        let extracted: Value = response.json().await?;
        if is_empty_json(&extracted) {
            warn!("Extraction service returned no medical information");
            return Err(PipelineError::EmptyExtraction);
        }

        Ok(extracted)
    }

    /// Generate a diagnosis from an extraction result.
    ///
    /// The extraction body is forwarded verbatim as the request body.
    pub async fn diagnose(&self, extracted: &Value) -> PipelineResult<Value> {
        debug!(url = %self.config.diagnosis_url, "Requesting diagnosis");

        let response = self
            .client
            .post(&self.config.diagnosis_url)
            .json(extracted)
            .send()
            .await?
            .error_for_status()?;

        let diagnosis: Value = response.json().await?;
        if is_empty_json(&diagnosis) {
            warn!("Diagnosis service returned no diagnosis");
            return Err(PipelineError::EmptyDiagnosis);
        }

        Ok(diagnosis)
    }

    /// Run extraction then diagnosis over already-transcribed text.
    ///
    /// The first error aborts the run; callers record nothing for aborted
    /// runs.
    pub async fn run(&self, input_text: &str) -> PipelineResult<PipelineRun> {
        let extracted_data = self.extract(input_text).await?;
        let diagnosis = self.diagnose(&extracted_data).await?;

        info!("Pipeline run completed");
        Ok(PipelineRun {
            input_text: input_text.to_string(),
            extracted_data,
            diagnosis,
        })
    }
}

/// Emptiness as the remote contract sees it: null, `{}`, `[]`, or `""`.
fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_config(base: &str) -> PipelineConfig {
        PipelineConfig {
            transcribe_url: format!("{}/transcribe", base),
            extract_url: format!("{}/extract", base),
            diagnosis_url: format!("{}/diagnose", base),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn transcribe_url_sends_audio_url_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/transcribe")
            .match_body(Matcher::Json(json!({ "audioUrl": "https://cdn.example/visit.mp3" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transcription": "  patient reports headache  "}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let text = client
            .transcribe_url("https://cdn.example/visit.mp3")
            .await
            .unwrap();

        assert_eq!(text, "patient reports headache");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transcribe_recording_sends_base64_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/transcribe")
            .match_body(Matcher::Json(json!({ "audioBase64": "UklGRg==" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transcription": "dizziness since monday"}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let text = client.transcribe_recording("UklGRg==").await.unwrap();

        assert_eq!(text, "dizziness since monday");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_transcription_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/transcribe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transcription": "   "}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let err = client.transcribe_url("https://cdn.example/a.wav").await;

        assert!(matches!(err, Err(PipelineError::EmptyTranscription)));
    }

    #[tokio::test]
    async fn missing_transcription_field_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/transcribe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "done"}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let err = client.transcribe_url("https://cdn.example/a.wav").await;

        assert!(matches!(err, Err(PipelineError::EmptyTranscription)));
    }

    #[tokio::test]
    async fn extract_sends_text_payload_and_keeps_whole_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/extract")
            .match_body(Matcher::Json(json!({ "text": "fever and cough" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sintomas": ["fever", "cough"], "motivo_consulta": "control"}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let extracted = client.extract("fever and cough").await.unwrap();

        assert_eq!(extracted["sintomas"][0], "fever");
        assert_eq!(extracted["motivo_consulta"], "control");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_extraction_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/extract")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let err = client.extract("fever").await;

        assert!(matches!(err, Err(PipelineError::EmptyExtraction)));
    }

    #[tokio::test]
    async fn diagnose_forwards_extraction_body_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let extracted = json!({
            "sintomas": ["fever"],
            "paciente": { "nombre": "Ana", "edad": 41 }
        });
        let mock = server
            .mock("POST", "/diagnose")
            .match_body(Matcher::Json(extracted.clone()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"diagnostico": "viral infection", "tratamiento": "rest"}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let diagnosis = client.diagnose(&extracted).await.unwrap();

        assert_eq!(diagnosis["diagnostico"], "viral infection");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_status_aborts_the_call() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/extract")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let err = client.extract("fever").await;

        assert!(matches!(err, Err(PipelineError::Network(_))));
    }

    #[tokio::test]
    async fn run_chains_extraction_into_diagnosis() {
        let mut server = mockito::Server::new_async().await;
        let extract_mock = server
            .mock("POST", "/extract")
            .match_body(Matcher::Json(json!({ "text": "chest pain" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sintomas": ["chest pain"]}"#)
            .create_async()
            .await;
        let diagnose_mock = server
            .mock("POST", "/diagnose")
            .match_body(Matcher::Json(json!({ "sintomas": ["chest pain"] })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"diagnostico": "angina"}"#)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let run = client.run("chest pain").await.unwrap();

        assert_eq!(run.input_text, "chest pain");
        assert_eq!(run.extracted_data["sintomas"][0], "chest pain");
        assert_eq!(run.diagnosis["diagnostico"], "angina");
        extract_mock.assert_async().await;
        diagnose_mock.assert_async().await;
    }

    #[tokio::test]
    async fn run_stops_before_diagnosis_when_extraction_fails() {
        let mut server = mockito::Server::new_async().await;
        let _extract_mock = server
            .mock("POST", "/extract")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("null")
            .create_async()
            .await;
        let diagnose_mock = server
            .mock("POST", "/diagnose")
            .expect(0)
            .create_async()
            .await;

        let client = PipelineClient::new(test_config(&server.url())).unwrap();
        let err = client.run("chest pain").await;

        assert!(matches!(err, Err(PipelineError::EmptyExtraction)));
        diagnose_mock.assert_async().await;
    }

    #[test]
    fn json_emptiness_matches_the_remote_contract() {
        assert!(is_empty_json(&Value::Null));
        assert!(is_empty_json(&json!({})));
        assert!(is_empty_json(&json!([])));
        assert!(is_empty_json(&json!("  ")));
        assert!(!is_empty_json(&json!({"a": 1})));
        assert!(!is_empty_json(&json!([1])));
        assert!(!is_empty_json(&json!(0)));
        assert!(!is_empty_json(&json!(false)));
    }
}
