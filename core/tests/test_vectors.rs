//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use transaction_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Transaction, TransactionClient,
    TransactionInput,
};

const BASE_URL: &str = "http://localhost:8080";

fn client() -> TransactionClient {
    TransactionClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check method, URL and (when the vector lists them) headers and body.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    match expected.get("headers") {
        Some(headers) => {
            let expected_headers: Vec<(String, String)> = headers
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
        }
        None => assert!(req.headers.is_empty(), "{name}: headers should be empty"),
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Check a parse outcome against `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &Value, result: Result<T, ApiError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = match result {
            Ok(value) => panic!("{name}: expected error, got {value:?}"),
            Err(err) => err,
        };
        match expected_error.as_str().unwrap() {
            "RequestFailure" => {
                let sim = &case["simulated_response"];
                match &err {
                    ApiError::RequestFailure { status, body, .. } => {
                        assert_eq!(u64::from(*status), sim["status"].as_u64().unwrap(), "{name}: status");
                        assert_eq!(body, sim["body"].as_str().unwrap(), "{name}: body");
                    }
                    other => panic!("{name}: expected RequestFailure, got {other:?}"),
                }
                assert_eq!(err.to_string(), case["expected_message"].as_str().unwrap(), "{name}: message");
            }
            "Decode" => assert!(matches!(err, ApiError::Decode { .. }), "{name}: expected Decode, got {err:?}"),
            other => panic!("{name}: unknown expected_error: {other}"),
        }
    } else {
        let value = result.unwrap_or_else(|err| panic!("{name}: unexpected error {err:?}"));
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(value, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: TransactionInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_create(simulated_response(&case));
        assert_outcome::<Transaction>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_all();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_all(simulated_response(&case));
        assert_outcome::<Vec<Transaction>>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_by_id(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_by_id(simulated_response(&case));
        assert_outcome::<Transaction>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: TransactionInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update(simulated_response(&case));
        assert_outcome::<Transaction>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_delete_by_id(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_by_id(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_eq!(expected_error, "RequestFailure", "{name}");
            let err = result.unwrap_err();
            assert_eq!(err.to_string(), case["expected_message"].as_str().unwrap(), "{name}: message");
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
