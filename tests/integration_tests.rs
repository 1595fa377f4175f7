//! Integration tests for lockbox.
//!
//! These tests drive the public API: the generator and estimator, the backend
//! client over a scripted transport, and complete shell sessions.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use tempfile::TempDir;

use lockbox::api::{ApiClient, ApiError, Transport};
use lockbox::generator::{
    CharacterPool, GeneratorError, GeneratorPanel, GeneratorPolicy, LOWERCASE, generate,
    generate_with,
};
use lockbox::session::Session;
use lockbox::shell::Shell;
use lockbox::shell::command::{CommandResult, ShellState};
use lockbox::strength::{StrengthLabel, classify, estimate_strength};

/// Plays back canned backend responses and keeps every request.
#[derive(Default)]
struct ScriptedTransport {
    responses: RefCell<VecDeque<Value>>,
    requests: RefCell<Vec<Value>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Value>) -> Rc<Self> {
        Rc::new(Self {
            responses: RefCell::new(responses.into()),
            ..Default::default()
        })
    }

    fn selectors(&self) -> Vec<String> {
        const SELECTORS: [&str; 11] = [
            "validate",
            "add_user",
            "check_session",
            "logout",
            "add_pass",
            "get_pass",
            "update_password",
            "delete_password",
            "import_passwords",
            "generate_password",
            "send_mail_otp",
        ];
        self.requests
            .borrow()
            .iter()
            .filter_map(|r| SELECTORS.iter().find(|s| r.get(**s) == Some(&Value::Bool(true))))
            .map(|s| s.to_string())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn post_json(&self, body: &Value) -> Result<Value, ApiError> {
        self.requests.borrow_mut().push(body.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ApiError::UnexpectedPayload("script exhausted".to_string()))
    }

    fn post_form(&self, _fields: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        Err(ApiError::UnexpectedPayload("downloads are not scripted".to_string()))
    }
}

fn client_with(responses: Vec<Value>) -> (ApiClient, Rc<ScriptedTransport>) {
    let transport = ScriptedTransport::new(responses);
    let client = ApiClient::new(Box::new(Rc::clone(&transport)), "lock123");
    (client, transport)
}

fn all_policies() -> Vec<GeneratorPolicy> {
    let mut policies = Vec::new();
    for length in [8, 12, 20, 32] {
        for mask in 0..8u8 {
            policies.push(
                GeneratorPolicy::lowercase_only(length)
                    .with_uppercase(mask & 1 != 0)
                    .with_numbers(mask & 2 != 0)
                    .with_symbols(mask & 4 != 0),
            );
        }
    }
    policies
}

fn success_message(result: CommandResult) -> String {
    match result {
        CommandResult::Success(Some(msg)) => msg,
        other => panic!("Expected success with message, got {:?}", other),
    }
}

// ============================================================================
// Generator Tests
// ============================================================================

#[test]
fn test_generated_length_matches_policy() {
    for policy in all_policies() {
        let password = generate(&policy).expect("valid policy");
        assert_eq!(password.chars().count(), policy.length, "policy {:?}", policy);
    }
}

#[test]
fn test_generated_characters_belong_to_pool() {
    let mut rng = StdRng::seed_from_u64(7);
    for policy in all_policies() {
        let pool = CharacterPool::for_policy(&policy);
        for _ in 0..20 {
            let password = generate_with(&policy, &mut rng).unwrap();
            assert!(password.chars().all(|c| pool.contains(c)), "{:?} -> {}", policy, password);
        }
    }
}

#[test]
fn test_lowercase_only_policy() {
    let policy = GeneratorPolicy::lowercase_only(32);
    for _ in 0..50 {
        let password = generate(&policy).unwrap();
        assert!(password.chars().all(|c| LOWERCASE.contains(c)));
    }
}

#[test]
fn test_invalid_lengths_rejected() {
    assert!(matches!(
        generate(&GeneratorPolicy::lowercase_only(0)),
        Err(GeneratorError::InvalidPolicy(_))
    ));
    assert!(matches!(
        generate(&GeneratorPolicy::lowercase_only(33)),
        Err(GeneratorError::OutOfRange { length: 33, .. })
    ));
}

#[test]
fn test_distribution_is_near_uniform() {
    const SAMPLES: usize = 10_000;
    const LENGTH: usize = 12;

    let policy = GeneratorPolicy::default();
    assert_eq!(policy.length, LENGTH);
    let pool = CharacterPool::for_policy(&policy);
    assert_eq!(pool.len(), 88);

    let mut counts = vec![vec![0usize; pool.len()]; LENGTH];
    let mut rng = StdRng::seed_from_u64(0x10c6b0c5);
    for _ in 0..SAMPLES {
        let password = generate_with(&policy, &mut rng).unwrap();
        for (position, c) in password.chars().enumerate() {
            let index = pool.index_of(c).expect("character outside pool");
            counts[position][index] += 1;
        }
    }

    let p = 1.0 / pool.len() as f64;
    let expected = SAMPLES as f64 * p;
    let sigma = (SAMPLES as f64 * p * (1.0 - p)).sqrt();
    let tolerance = 6.0 * sigma;

    for (position, row) in counts.iter().enumerate() {
        assert_eq!(row.iter().sum::<usize>(), SAMPLES);
        for (index, &count) in row.iter().enumerate() {
            let deviation = (count as f64 - expected).abs();
            assert!(
                deviation <= tolerance,
                "position {} char {:?}: {} draws, expected {:.1} +/- {:.1}",
                position,
                pool.as_slice()[index],
                count,
                expected,
                tolerance
            );
        }
    }
}

#[test]
fn test_panel_generate_then_take() {
    let mut panel = GeneratorPanel::new(GeneratorPolicy::default().with_symbols(false));
    let value = panel.generate().unwrap().value.clone();
    assert!(!value.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)));

    let taken = panel.take().unwrap();
    assert_eq!(taken.value, value);
    assert_eq!(taken.strength, estimate_strength(&value));
    assert!(panel.is_idle());
}

// ============================================================================
// Strength Tests
// ============================================================================

#[test]
fn test_strength_is_deterministic() {
    for value in ["", "a", "hunter2", "Tr0ub4dor&3", "correct horse battery staple"] {
        assert_eq!(estimate_strength(value), estimate_strength(value));
    }
}

#[test]
fn test_classify_boundaries() {
    let cases = [
        (10, StrengthLabel::Weak),
        (25, StrengthLabel::Weak),
        (26, StrengthLabel::Fair),
        (50, StrengthLabel::Fair),
        (51, StrengthLabel::Good),
        (75, StrengthLabel::Good),
        (76, StrengthLabel::Strong),
        (100, StrengthLabel::Strong),
    ];
    for (score, label) in cases {
        assert_eq!(classify(score), label, "score {}", score);
    }
}

#[test]
fn test_strength_monotonic_in_variety_and_length() {
    assert!(estimate_strength("aaaaaaaa") <= estimate_strength("aA1aaaaa"));
    assert!(estimate_strength("aA1aaaaa") <= estimate_strength("aA1!aaaa"));
    assert!(estimate_strength("aA1!") <= estimate_strength("aA1!aA1!"));
}

// ============================================================================
// Client Tests
// ============================================================================

#[test]
fn test_client_round_trip_selectors() {
    let (client, transport) = client_with(vec![
        json!({"code": 1, "data": {"id": 3, "email": "ada@example.com", "name": "Ada"}}),
        json!({"code": "11", "data": {"id": "21"}}),
        json!({"code": 130, "data": [
            {"id": "21", "name": "GitHub", "email": "ada", "password": "hunter2", "created_at": "2024-06-01 10:00:00"}
        ]}),
        json!({"code": 150}),
        json!({"code": 160}),
        json!({"code": 1}),
    ]);

    let user = client.login("ada@example.com", "pw").unwrap();
    let id = client.add_password(&user, "GitHub", "ada", "hunter2").unwrap();
    let records = client.list_passwords(&user).unwrap();
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].created_at.as_deref(), Some("2024-06-01 10:00:00"));
    client.update_password(id, "GitHub", "n3w!").unwrap();
    client.delete_password(id).unwrap();
    client.logout().unwrap();

    assert_eq!(
        transport.selectors(),
        vec!["validate", "add_pass", "get_pass", "update_password", "delete_password", "logout"]
    );
    assert!(transport.requests.borrow().iter().all(|r| r["api_key"] == "lock123"));
}

#[test]
fn test_client_session_expired() {
    let (client, _) = client_with(vec![json!({"code": "401"})]);
    let user = lockbox::User {
        id: 1,
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
    };
    let err = client.list_passwords(&user).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(err.to_string(), "Session expired. Please login again.");
}

// ============================================================================
// Shell Workflow Tests
// ============================================================================

#[test]
fn test_shell_workflow() {
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");

    let (client, transport) = client_with(vec![
        // login, then the list fetched after it
        json!({"code": 1, "data": {"id": 3, "email": "ada@example.com", "name": "Ada"}}),
        json!({"code": 130, "data": null}),
        // add with the generated password
        json!({"code": 11, "data": {"id": 40}}),
        // list
        json!({"code": 130, "data": [
            {"id": 40, "name": "GitHub", "email": "ada", "password": "placeholder"}
        ]}),
        // delete
        json!({"code": 160}),
        // logout
        json!({"code": 1}),
    ]);

    let shell = Shell::new();
    let mut state = ShellState::new(Session::load(&session_path), GeneratorPanel::default());
    let run = |line: &str, state: &mut ShellState| {
        let outcome = shell.execute_line(line, &client, state).unwrap();
        if outcome.session_changed {
            state.session.persist().unwrap();
        }
        outcome.result
    };

    let msg = success_message(run("login ada@example.com pw", &mut state));
    assert!(msg.contains("Welcome, Ada"));
    assert!(session_path.exists());
    assert!(Session::load(&session_path).is_authenticated());

    let generated = success_message(run("generate 16 --no-symbols", &mut state));
    let value = generated.lines().next().unwrap().to_string();
    assert_eq!(value.len(), 16);

    success_message(run("add GitHub ada", &mut state));
    assert!(state.panel.is_idle());

    let listing = success_message(run("ls", &mut state));
    assert!(listing.contains("GitHub"));
    assert!(!listing.contains("placeholder"));

    let shown = success_message(run("get github", &mut state));
    assert!(shown.contains("placeholder"));

    success_message(run("rm 40", &mut state));
    assert!(state.vault.is_empty());

    success_message(run("logout", &mut state));
    assert!(!session_path.exists());

    let requests = transport.requests.borrow();
    assert_eq!(requests[2]["pass"], value.as_str());
    assert_eq!(requests[2]["user_id"], 3);
}

#[test]
fn test_shell_session_expiry_signs_out() {
    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("session.json");

    let mut session = Session::load(&session_path);
    session.establish(lockbox::User {
        id: 3,
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
    });
    session.persist().unwrap();

    let (client, _) = client_with(vec![json!({"code": 401})]);
    let shell = Shell::new();
    let mut state = ShellState::new(Session::load(&session_path), GeneratorPanel::default());

    let outcome = shell.execute_line("list", &client, &mut state).unwrap();
    match outcome.result {
        CommandResult::Error(msg) => assert_eq!(msg, "Session expired. Please login again."),
        other => panic!("Expected expiry error, got {:?}", other),
    }
    assert!(outcome.session_changed);
    state.session.persist().unwrap();
    assert!(!session_path.exists());

    let outcome = shell.execute_line("list", &client, &mut state).unwrap();
    match outcome.result {
        CommandResult::Error(msg) => assert!(msg.contains("Not logged in")),
        other => panic!("Expected login error, got {:?}", other),
    }
}

#[test]
fn test_shell_generate_rejects_out_of_range() {
    let (client, transport) = client_with(vec![]);
    let shell = Shell::new();
    let mut state = ShellState::new(Session::in_memory(), GeneratorPanel::default());

    let outcome = shell.execute_line("generate 7", &client, &mut state).unwrap();
    assert!(matches!(outcome.result, CommandResult::Error(_)));
    assert!(state.panel.is_idle());
    assert!(transport.requests.borrow().is_empty());
}
