//! Login attempt orchestration.
//!
//! [`LoginScreen`] owns the form and the attempt bookkeeping of one
//! mounted login screen and drives the mount and submit flows.
//!
//! # Submit order
//! 1. Rate limiter (active lockout rejects)
//! 2. Blocking license notice
//! 3. Company, username, password
//! 4. Credential exchange
//! 5. Session bootstrap and navigation on success
//!
//! The first failing check wins and no network call is made after it.
//!
//! # Teardown
//! Fetches are never cancelled. Results that arrive after
//! [`LoginScreen::teardown`] are dropped instead of being applied to the
//! discarded screen. A submit started after teardown is rejected with
//! [`LoginError::Discarded`] before any network call.

use super::company::{self, resolve_selection};
use super::error::{LoginError, ValidationError, COMPANY_LOAD_FAILED_MESSAGE};
use super::exchange::{CredentialExchange, TokenResult};
use super::expiry::{self, ExpiryError, ExpiryStatus, AMC_PARAMETER_CODE, LICENSE_PARAMETER_CODE};
use super::form::FormState;
use super::rate_limit::{LoginAttemptState, RateLimiter};
use super::services::{LoginServices, LoginSettings};
use crate::domain::{ClientParameter, Company, SessionRecord, TokenRequest};
use crate::session::{IssuedSession, SessionBootstrapper};
use anyhow::{Context, Result};
use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

struct ScreenState {
    form: FormState,
    limiter: RateLimiter,
}

struct Inner {
    services: LoginServices,
    settings: LoginSettings,
    exchange: CredentialExchange,
    bootstrapper: SessionBootstrapper,
    state: Mutex<ScreenState>,
    mounted: AtomicBool,
}

/// Handle to one login screen instance. Clones share the same screen.
#[derive(Clone)]
pub struct LoginScreen {
    inner: Arc<Inner>,
}

impl LoginScreen {
    // ---

    pub fn new(services: LoginServices, settings: LoginSettings) -> Self {
        // ---
        let exchange = CredentialExchange::new(services.issuer().clone());
        let bootstrapper = SessionBootstrapper::new(services.sessions().clone());
        let limiter = RateLimiter::new(settings.lockout);

        Self {
            inner: Arc::new(Inner {
                services,
                settings,
                exchange,
                bootstrapper,
                state: Mutex::new(ScreenState {
                    form: FormState::default(),
                    limiter,
                }),
                mounted: AtomicBool::new(true),
            }),
        }
    }

    /// Load the company list and the expiry notices concurrently.
    ///
    /// Neither load fails the mount; failures end up in the form.
    pub async fn mount(&self) {
        // ---
        futures::join!(self.load_companies(), self.load_expiry_notices());
    }

    /// Mark the screen as discarded. Late results are ignored from now on.
    pub fn teardown(&self) {
        // ---
        tracing::debug!("Login screen torn down");
        self.inner.mounted.store(false, Ordering::SeqCst);
    }

    /// Collaborators this screen was built with.
    pub fn services(&self) -> &LoginServices {
        &self.inner.services
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Snapshot of the form.
    pub async fn form(&self) -> FormState {
        self.inner.state.lock().await.form.clone()
    }

    /// Snapshot of the attempt bookkeeping.
    pub async fn attempt_state(&self) -> LoginAttemptState {
        self.inner.state.lock().await.limiter.state().clone()
    }

    /// Whether submitting is currently disabled by a lockout.
    pub async fn is_locked(&self) -> bool {
        // ---
        let now = self.inner.services.clock().now();
        self.inner.state.lock().await.limiter.is_locked(now)
    }

    pub async fn set_username(&self, username: impl Into<String>) {
        self.inner.state.lock().await.form.username = username.into();
    }

    pub async fn set_password(&self, password: impl Into<String>) {
        self.inner.state.lock().await.form.password = password.into();
    }

    /// Select a company by composite key (`"id,code"`).
    pub async fn select_company(&self, composite_key: &str) {
        // ---
        let selection = resolve_selection(composite_key);
        self.inner.state.lock().await.form.apply_selection(selection);
    }

    /// Run one login attempt.
    ///
    /// The outcome is also reflected in the form: any error sets
    /// `error_message` and leaves `is_submitting` false.
    pub async fn submit(&self) -> Result<SessionRecord, LoginError> {
        // ---
        let attempt_id = Uuid::new_v4();
        self.submit_attempt()
            .instrument(tracing::info_span!("login_submit", %attempt_id))
            .await
    }

    async fn submit_attempt(&self) -> Result<SessionRecord, LoginError> {
        // ---
        let (request, company_name) = self.begin_submit().await?;

        let start = Instant::now();
        let outcome = self.inner.exchange.submit(request.clone()).await;
        self.inner.services.metrics().record_submit_duration(start);

        let result = match outcome {
            Ok(TokenResult::Success {
                token,
                user_id,
                is_admin,
                user_name,
            }) => {
                let issued = IssuedSession {
                    token,
                    user_id,
                    is_admin,
                    user_name,
                    company_id: request.company_id,
                    company_code: request.company_code,
                    company_name,
                };
                self.inner
                    .bootstrapper
                    .bootstrap(issued)
                    .await
                    .context("bootstrapping session from issued token")
                    .map_err(LoginError::Transport)
            }
            Ok(TokenResult::Failure { message }) => Err(LoginError::Credential { message }),
            Err(err) => Err(LoginError::Transport(err)),
        };

        self.finish_submit(result).await
    }

    /// Run the local checks and mark the form as submitting.
    async fn begin_submit(&self) -> Result<(TokenRequest, String), LoginError> {
        // ---
        if !self.is_mounted() {
            return Err(LoginError::Discarded);
        }

        let now = self.inner.services.clock().now();
        let mut state = self.inner.state.lock().await;
        let ScreenState { form, limiter } = &mut *state;

        if form.is_submitting {
            return Err(LoginError::Busy);
        }

        let checked = limiter
            .check(now)
            .and_then(|()| {
                if form.license_blocked {
                    Err(ValidationError::LicenseExpired.into())
                } else {
                    Ok(())
                }
            })
            .and_then(|()| form.validate().map_err(LoginError::from));

        let company_id = match checked {
            Ok(company_id) => company_id,
            Err(err) => {
                tracing::debug!("Submit rejected before exchange: {}", err);
                form.error_message = err.to_string();
                return Err(err);
            }
        };

        form.is_submitting = true;
        form.error_message.clear();

        let company_name = form.selected_company_name().to_string();
        let request = TokenRequest {
            username: form.username.clone(),
            password: form.password.clone(),
            company_id,
            company_code: form.selected_company_code.clone(),
            company_name: company_name.clone(),
        };

        Ok((request, company_name))
    }

    /// Apply the exchange outcome to the form and the limiter.
    async fn finish_submit(
        &self,
        result: Result<SessionRecord, LoginError>,
    ) -> Result<SessionRecord, LoginError> {
        // ---
        let metrics = self.inner.services.metrics();

        match &result {
            Ok(record) => {
                metrics.record_login_succeeded();
                tracing::info!("User '{}' logged in", record.user_name);
            }
            Err(LoginError::Credential { message }) => {
                metrics.record_login_rejected();
                tracing::warn!("Credentials rejected: {}", message);
            }
            Err(err) => {
                metrics.record_transport_fault();
                tracing::error!("Login failed: {:?}", err);
            }
        }

        if !self.is_mounted() {
            tracing::debug!("Screen discarded, dropping submit outcome");
            self.inner.state.lock().await.form.is_submitting = false;
            return result;
        }

        let now = self.inner.services.clock().now();
        {
            let mut state = self.inner.state.lock().await;
            state.form.is_submitting = false;

            if let Err(err) = &result {
                if err.counts_toward_lockout() && state.limiter.record_failure(now) {
                    metrics.record_lockout();
                    tracing::info!(
                        failures = state.limiter.state().consecutive_failures,
                        "Login locked until {:?}",
                        state.limiter.state().lockout_ends_at
                    );
                }
                state.form.error_message = err.to_string();
            }
        }

        if result.is_ok() {
            self.inner
                .services
                .navigator()
                .navigate(&self.inner.settings.post_login_destination);
        }

        result
    }

    async fn load_companies(&self) {
        // ---
        let fetched = self.inner.services.companies().get_companies().await;

        if !self.is_mounted() {
            return;
        }

        let mut state = self.inner.state.lock().await;
        match fetched {
            Ok(companies) => {
                tracing::debug!("Loaded {} companies", companies.len());
                let auto = company::auto_selection(&companies).map(resolve_selection);
                state.form.companies = companies;
                if let Some(selection) = auto {
                    state.form.apply_selection(selection);
                }
            }
            Err(err) => {
                tracing::warn!("Fetching companies failed: {:?}", err);
                state.form.error_message = COMPANY_LOAD_FAILED_MESSAGE.to_string();
            }
        }
    }

    async fn load_expiry_notices(&self) {
        // ---
        let evaluated = self.evaluate_expiry().await;

        if !self.is_mounted() {
            return;
        }

        match evaluated {
            Ok(status) => self.inner.state.lock().await.form.apply_expiry(&status),
            Err(err) => tracing::warn!("Failed to evaluate expiry parameters: {:?}", err),
        }
    }

    async fn evaluate_expiry(&self) -> Result<ExpiryStatus> {
        // ---
        let parameters = self.inner.services.parameters();
        let (amc, license) = futures::try_join!(
            parameters.get_parameter(AMC_PARAMETER_CODE),
            parameters.get_parameter(LICENSE_PARAMETER_CODE),
        )?;

        let amc_date = first_value(&amc, AMC_PARAMETER_CODE)?;
        let license_date = first_value(&license, LICENSE_PARAMETER_CODE)?;

        let today = self.inner.services.clock().now().with_timezone(&Local).naive_local();
        let status = expiry::evaluate(
            amc_date,
            license_date,
            today,
            self.inner.settings.expiry_warning_days,
        )?;

        Ok(status)
    }

    /// Companies currently offered.
    pub async fn companies(&self) -> Vec<Company> {
        self.inner.state.lock().await.form.companies.clone()
    }
}

fn first_value<'a>(rows: &'a [ClientParameter], code: &'static str) -> Result<&'a str, ExpiryError> {
    rows.first()
        .map(|row| row.value.as_str())
        .ok_or(ExpiryError::MissingParameter(code))
}
