use carbonlink::executor::{EventExtractor, ExtractError, LedgerEvent};
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// FIXTURES
// ============================================================================

fn events() -> Vec<LedgerEvent> {
    vec![
        LedgerEvent::new(
            "0xpkg::carbon_marketplace::ClaimCreated",
            json!({"claim_id": "0xclaim1"}),
        ),
        LedgerEvent::new(
            "0xpkg::carbon_marketplace::VoteCast",
            json!({"claim_id": "0xclaim1", "vote": 1}),
        ),
        LedgerEvent::new(
            "0xpkg::carbon_marketplace::ClaimCreated",
            json!({"claim_id": "0xclaim2"}),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ClaimCreatedPayload {
    claim_id: String,
}

// ============================================================================
// SUFFIX MATCHING TESTS
// ============================================================================

/// Test: a namespace-qualified suffix matches regardless of package id
#[test]
fn test_match_qualified_suffix() {
    let list = events();
    let event = EventExtractor::find_by_suffix(&list, "::carbon_marketplace::VoteCast")
        .expect("Should match");
    assert_eq!(event.event_type(), "0xpkg::carbon_marketplace::VoteCast");
}

/// Test: a bare local name matches only on a namespace boundary
#[test]
fn test_bare_name_boundary() {
    let list = vec![
        LedgerEvent::new("0xpkg::market::NotClaimCreated", json!({})),
        LedgerEvent::new("0xpkg::market::ClaimCreated", json!({"claim_id": "0x1"})),
    ];

    let event = EventExtractor::find_by_suffix(&list, "ClaimCreated").expect("Should match");
    assert_eq!(
        event.event_type(),
        "0xpkg::market::ClaimCreated",
        "A longer type name must not match a bare suffix"
    );
}

/// Test: an unqualified type name matches itself exactly
#[test]
fn test_bare_name_exact() {
    let list = vec![LedgerEvent::new("ClaimCreated", json!({}))];
    assert!(EventExtractor::find_by_suffix(&list, "ClaimCreated").is_some());
}

/// Test: the first matching event wins when several match
#[test]
fn test_first_match_wins() {
    let list = events();
    let event = EventExtractor::find_by_suffix(&list, "ClaimCreated").expect("Should match");
    assert_eq!(event.payload()["claim_id"], "0xclaim1");
}

/// Test: no match yields None / NotFound
#[test]
fn test_no_match() {
    let list = events();
    assert!(EventExtractor::find_by_suffix(&list, "OrganisationCreated").is_none());

    let result: Result<ClaimCreatedPayload, _> =
        EventExtractor::extract(&list, "OrganisationCreated");
    assert!(matches!(result, Err(ExtractError::NotFound(_))));
}

// ============================================================================
// PAYLOAD DECODING TESTS
// ============================================================================

/// Test: extract finds and decodes in one step
#[test]
fn test_extract_typed_payload() {
    let list = events();
    let payload: ClaimCreatedPayload =
        EventExtractor::extract(&list, "ClaimCreated").expect("Should decode");
    assert_eq!(payload.claim_id, "0xclaim1");
}

/// Test: a payload that does not fit the target shape reports BadShape
#[test]
fn test_extract_bad_shape() {
    let list = vec![LedgerEvent::new(
        "0xpkg::m::ClaimCreated",
        json!({"unexpected": true}),
    )];
    let result: Result<ClaimCreatedPayload, _> = EventExtractor::extract(&list, "ClaimCreated");
    assert!(matches!(result, Err(ExtractError::BadShape(_))));
}
