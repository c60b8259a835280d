//! Reference fixtures: lowering of the two-state counter machine with
//! numeric, symbolic, mixed and alphanumeric state ids.

use fsm_ir::interchange::{machine_from_json, to_json};
use fsm_ir::{lower, LowerError, Machine};
use serde_json::{json, Value};

fn two_state_machine(first: Value, second: Value) -> Value {
    json!({
        "timers": [],
        "states": [{
            "state": first,
            "statements": [{ "left": "X", "right": 1, "operator": "+", "out": "X" }],
            "transitions": [{
                "condition": {
                    "left": { "left": "X", "right": 3, "operator": "%" },
                    "right": 0,
                    "operator": "="
                },
                "goto": second
            }, {
                "goto": first
            }]
        }, {
            "state": second,
            "statements": [{ "left": "Y", "right": 1, "operator": "+", "out": "Y" }],
            "transitions": [{ "goto": first }]
        }]
    })
}

/// Expected lowering given the resolved addresses of both states.
fn expected(first: u32, second: u32) -> Value {
    json!({
        "timers": [],
        "states": [{
            "state": first,
            "statements": [{
                "start": first,
                "operations": [
                    [{ "guard": true }],
                    [{ "left": "GUARD", "right": 1, "operator": "*", "out": "signal_X" }]
                ]
            }, {
                "start": first + 2,
                "operations": [
                    [{ "left": "signal_X", "right": 3, "operator": "%", "out": "INT_A" }],
                    [
                        { "left": "INT_A", "right": 0, "operator": "=", "countFromInput": false, "out": "INT_A" },
                        { "guard": true }
                    ],
                    [{ "left": "INT_A", "right": "GUARD", "operator": "*", "out": "INT_A" }],
                    [{ "branch": "INT_A", "goto": second }]
                ]
            }, {
                "start": first + 6,
                "operations": [
                    [{ "guard": true }],
                    [{ "branch": "GUARD", "goto": first }]
                ]
            }]
        }, {
            "state": second,
            "statements": [{
                "start": second,
                "operations": [
                    [{ "guard": true }],
                    [{ "left": "GUARD", "right": 1, "operator": "*", "out": "signal_Y" }]
                ]
            }, {
                "start": second + 2,
                "operations": [
                    // guards are not shared between blocks
                    [{ "guard": true }],
                    [{ "branch": "GUARD", "goto": first }]
                ]
            }]
        }]
    })
}

fn lower_value(input: Value) -> Result<Value, LowerError> {
    let machine: Machine = serde_json::from_value(input).unwrap();
    let ir = lower(&machine)?;
    Ok(serde_json::to_value(&ir).unwrap())
}

#[test]
fn numeric_states_keep_their_addresses() {
    let output = lower_value(two_state_machine(json!(10), json!(20))).unwrap();
    assert_eq!(output, expected(10, 20));
}

#[test]
fn symbolic_states_are_packed_from_zero() {
    let output = lower_value(two_state_machine(json!("start"), json!("end"))).unwrap();
    assert_eq!(output, expected(0, 9));
}

#[test]
fn symbolic_states_follow_numeric_ones() {
    let output = lower_value(two_state_machine(json!("start"), json!(100))).unwrap();
    assert_eq!(output, expected(105, 100));
}

#[test]
fn label_spelling_does_not_matter() {
    let output = lower_value(two_state_machine(json!("state1"), json!("state2"))).unwrap();
    assert_eq!(output, expected(0, 9));
}

#[test]
fn timers_are_passed_through() {
    let mut input = two_state_machine(json!(10), json!(20));
    input["timers"] = json!([{ "id": "t0", "ticks": 30 }, 7]);

    let output = lower_value(input.clone()).unwrap();

    assert_eq!(output["timers"], input["timers"]);
}

#[test]
fn unknown_goto_aborts_lowering() {
    let mut input = two_state_machine(json!("start"), json!("end"));
    input["states"][1]["transitions"][0]["goto"] = json!("finish");

    assert_eq!(
        lower_value(input),
        Err(LowerError::UnresolvedLabel {
            label: "finish".into(),
            state: "end".into(),
        })
    );
}

#[test]
fn overlapping_explicit_addresses_collide() {
    let output = lower_value(two_state_machine(json!(10), json!(13)));

    assert_eq!(
        output,
        Err(LowerError::AddressCollision {
            first: 10.into(),
            second: 13.into(),
            address: 13,
        })
    );
}

#[test]
fn compound_increment_is_rejected() {
    let mut input = two_state_machine(json!(10), json!(20));
    input["states"][0]["statements"][0]["right"] = json!({ "left": "X", "right": 1, "operator": "+" });

    assert!(matches!(
        lower_value(input),
        Err(LowerError::MalformedExpression { .. })
    ));
}

#[test]
fn json_round_trip_through_interchange() {
    let text = two_state_machine(json!("start"), json!("end")).to_string();
    let machine: Machine = machine_from_json(&text).unwrap();

    let rendered = to_json(&lower(&machine).unwrap()).unwrap();
    let rendered: Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(rendered, expected(0, 9));
}

#[test]
fn empty_condition_leaf_is_rejected() {
    let mut input = two_state_machine(json!(10), json!(20));
    input["states"][0]["transitions"][0]["condition"]["left"]["left"] = json!("");

    assert!(matches!(
        lower_value(input),
        Err(LowerError::MalformedExpression { .. })
    ));
}

#[test]
fn unlisted_operators_are_copied_through() {
    let mut input = two_state_machine(json!(10), json!(20));
    input["states"][0]["statements"][0]["operator"] = json!("XOR");
    input["states"][0]["transitions"][0]["condition"]["left"]["operator"] = json!("^");

    let output = lower_value(input).unwrap();

    let mut want = expected(10, 20);
    want["states"][0]["statements"][1]["operations"][0][0]["operator"] = json!("^");
    assert_eq!(output, want);
}

#[test]
fn names_are_taken_as_written() {
    let mut input = two_state_machine(json!(10), json!(20));
    input["states"][0]["statements"][0]["out"] = json!("signal-A");
    input["states"][0]["statements"][0]["left"] = json!("signal-A");
    input["states"][0]["transitions"][0]["condition"]["left"]["left"] = json!("signal-A");

    let output = lower_value(input).unwrap();

    let blocks = &output["states"][0]["statements"];
    assert_eq!(blocks[0]["operations"][1][0]["out"], json!("signal_signal-A"));
    assert_eq!(blocks[1]["operations"][0][0]["left"], json!("signal_signal-A"));
}
