use serde::Serialize;
use wasm_bindgen::prelude::*;

use harmoniq::{ChordTable, HarmoniqError, MidiFile, Progression, ProgressionStep};

fn error_kind(e: &HarmoniqError) -> &'static str {
    match e {
        HarmoniqError::InvalidTempo { .. } | HarmoniqError::TempoOutOfRange { .. } => "tempo",
        HarmoniqError::ParseError(_) => "parse",
        _ => "encode",
    }
}

/// Error payload handed to JavaScript as a JSON string.
#[derive(Serialize)]
struct ErrorPayload {
    kind: &'static str,
    message: String,
}

impl ErrorPayload {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"kind\":\"{}\"}}", self.kind))
    }
}

fn error_json(e: &HarmoniqError) -> String {
    ErrorPayload {
        kind: error_kind(e),
        message: e.to_string(),
    }
    .to_json()
}

fn to_js_error(e: HarmoniqError) -> JsValue {
    JsValue::from_str(&error_json(&e))
}

fn encode_document_json(progression_json: &str, tempo_bpm: f64) -> Result<Vec<u8>, HarmoniqError> {
    let document = Progression::parse(progression_json)?;
    Ok(harmoniq::generate(document.steps(), tempo_bpm)?.into_bytes())
}

/// Encode a progression document (`{"progression": [...]}`, as returned by the
/// suggestion service) to `.mid` bytes. Arrives in JavaScript as a `Uint8Array`.
#[wasm_bindgen]
pub fn generate_midi(progression_json: &str, tempo_bpm: f64) -> Result<Vec<u8>, JsValue> {
    encode_document_json(progression_json, tempo_bpm).map_err(to_js_error)
}

/// Encode an array of `{root, variety, numeral}` objects straight from UI state.
#[wasm_bindgen]
pub fn generate_midi_from_steps(steps: JsValue, tempo_bpm: f64) -> Result<Vec<u8>, JsValue> {
    let steps: Vec<ProgressionStep> = serde_wasm_bindgen::from_value(steps).map_err(|e| {
        let payload = ErrorPayload {
            kind: "parse",
            message: e.to_string(),
        };
        JsValue::from_str(&payload.to_json())
    })?;
    harmoniq::generate(&steps, tempo_bpm)
        .map(MidiFile::into_bytes)
        .map_err(to_js_error)
}

/// Chord-quality labels the encoder recognises, as a JSON array.
#[wasm_bindgen]
pub fn chord_qualities() -> String {
    let labels: Vec<&str> = ChordTable::standard().labels().collect();
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}

/// MIME type for the download `Blob`.
#[wasm_bindgen]
pub fn midi_mime_type() -> String {
    MidiFile::MIME_TYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_document_json() {
        let bytes = encode_document_json(
            r#"{"progression": [{"root": "C", "variety": "Major", "numeral": "I"}]}"#,
            120.0,
        )
        .unwrap();
        assert_eq!(&bytes[..4], b"MThd");
        assert_eq!(bytes.len(), 66);
    }

    #[test]
    fn test_error_payloads() {
        let err = encode_document_json(r#"{"progression": []}"#, 0.0).unwrap_err();
        let payload: serde_json::Value = serde_json::from_str(&error_json(&err)).unwrap();
        assert_eq!(payload["kind"], "tempo");
        assert_eq!(
            payload["message"],
            "Invalid tempo: 0 bpm (must be positive and finite)"
        );

        let err = encode_document_json("{\"progression\": 5}", 120.0).unwrap_err();
        assert_eq!(error_kind(&err), "parse");
    }

    #[test]
    fn test_chord_qualities_json() {
        let labels: Vec<String> = serde_json::from_str(&chord_qualities()).unwrap();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], "Major");
        assert_eq!(midi_mime_type(), "audio/midi");
    }
}
