// Test helpers are intentionally partially used
#![allow(dead_code)]

use anyhow::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use ebios_login::domain::{
    ClientParameter, Clock, Company, CompanyDirectory, IssuedUser, ParameterStore, TokenIssuer,
    TokenRequest, TokenResponse,
};
use ebios_login::login::{LoginScreen, LoginServices, LoginSettings};
use ebios_login::{create_noop_metrics, InMemorySessionStore, RecordingNavigator};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Tokens
// ============================================================================

/// A structurally valid bearer token whose payload carries `exp`.
pub fn token_with_exp(exp: i64) -> String {
    // ---
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"alice","exp":{exp}}}"#))
    )
}

pub fn accepted(token: String) -> TokenResponse {
    // ---
    TokenResponse {
        token: Some(token),
        user: IssuedUser {
            user_id: 42,
            admin_yn: "N".to_string(),
            user_name: "alice".to_string(),
            error_message: None,
        },
    }
}

pub fn rejected(message: Option<&str>) -> TokenResponse {
    // ---
    TokenResponse {
        token: None,
        user: IssuedUser {
            error_message: message.map(str::to_string),
            ..IssuedUser::default()
        },
    }
}

// ============================================================================
// Fakes
// ============================================================================

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    // ---
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Company directory returning a fixed list, or failing.
pub struct FakeDirectory {
    companies: Option<Vec<Company>>,
    gate: Option<Arc<Notify>>,
}

impl FakeDirectory {
    // ---
    pub fn with(companies: Vec<Company>) -> Self {
        Self {
            companies: Some(companies),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            companies: None,
            gate: None,
        }
    }

    /// Holds the answer back until `gate` is notified.
    pub fn gated(companies: Vec<Company>, gate: Arc<Notify>) -> Self {
        Self {
            companies: Some(companies),
            gate: Some(gate),
        }
    }
}

#[async_trait::async_trait]
impl CompanyDirectory for FakeDirectory {
    async fn get_companies(&self) -> Result<Vec<Company>> {
        // ---
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.companies
            .clone()
            .ok_or_else(|| anyhow::anyhow!("directory unavailable"))
    }
}

/// Parameter store answering AMCSUP / CINLIC with fixed dates.
pub struct FakeParameters {
    amc: String,
    license: String,
    fail: bool,
}

impl FakeParameters {
    // ---
    pub fn new(amc: &str, license: &str) -> Self {
        Self {
            amc: amc.to_string(),
            license: license.to_string(),
            fail: false,
        }
    }

    /// Both dates far in the future: no notices.
    pub fn healthy() -> Self {
        Self::new("31/12/2099", "31/12/2099")
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::healthy()
        }
    }
}

#[async_trait::async_trait]
impl ParameterStore for FakeParameters {
    async fn get_parameter(&self, code: &str) -> Result<Vec<ClientParameter>> {
        // ---
        if self.fail {
            anyhow::bail!("parameter service unavailable");
        }
        let value = match code {
            "AMCSUP" => self.amc.clone(),
            "CINLIC" => self.license.clone(),
            other => anyhow::bail!("unexpected parameter {other}"),
        };
        Ok(vec![ClientParameter {
            code: code.to_string(),
            value,
        }])
    }
}

/// Token issuer replaying scripted answers and counting calls.
#[derive(Default)]
pub struct ScriptedIssuer {
    script: Mutex<VecDeque<std::result::Result<TokenResponse, String>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<TokenRequest>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedIssuer {
    // ---
    pub fn push(&self, response: TokenResponse) {
        self.script.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_fault(&self, message: &str) {
        self.script.lock().unwrap().push_back(Err(message.to_string()));
    }

    /// Hold every answer back until `gate` is notified.
    pub fn hold_until(&self, gate: Arc<Notify>) {
        *self.gate.lock().unwrap() = Some(gate);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TokenRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TokenIssuer for ScriptedIssuer {
    async fn generate_token(&self, request: TokenRequest) -> Result<TokenResponse> {
        // ---
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("no scripted response left")),
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

pub fn main_hospital() -> Company {
    Company::new("1", "MAIN", "Main Hospital")
}

pub fn east_clinic() -> Company {
    Company::new("2", "EAST", "East Clinic")
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub struct Harness {
    pub screen: LoginScreen,
    pub issuer: Arc<ScriptedIssuer>,
    pub clock: Arc<ManualClock>,
    pub navigator: Arc<RecordingNavigator>,
    pub sessions: Arc<InMemorySessionStore>,
}

impl Harness {
    // ---
    pub fn new(directory: FakeDirectory, parameters: FakeParameters) -> Self {
        // ---
        let issuer = Arc::new(ScriptedIssuer::default());
        let clock = Arc::new(ManualClock::new(start_time()));
        let navigator = Arc::new(RecordingNavigator::new());
        let sessions = Arc::new(InMemorySessionStore::new());

        let services = LoginServices::new(
            Arc::new(directory),
            Arc::new(parameters),
            issuer.clone(),
            sessions.clone(),
            navigator.clone(),
            create_noop_metrics().expect("noop metrics"),
            clock.clone(),
        );

        Self {
            screen: LoginScreen::new(services, LoginSettings::default()),
            issuer,
            clock,
            navigator,
            sessions,
        }
    }

    /// Two companies, healthy parameters, already mounted.
    pub async fn mounted() -> Self {
        // ---
        let harness = Self::new(
            FakeDirectory::with(vec![main_hospital(), east_clinic()]),
            FakeParameters::healthy(),
        );
        harness.screen.mount().await;
        harness
    }

    /// Fill the form with a valid company and credentials.
    pub async fn fill(&self, username: &str, password: &str) {
        // ---
        self.screen.select_company("1,MAIN").await;
        self.screen.set_username(username).await;
        self.screen.set_password(password).await;
    }
}
