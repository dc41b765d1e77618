use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::Config;
use crate::http::{ApiError, HttpClient};
use crate::model::{Credentials, Entity, Product, User};
use crate::service::{AuthService, ProductService, UserService};
use crate::session::TokenStore;
use crate::store::entity::{EntityIntent, EntityOperation, EntitySlice};
use crate::store::mvi::Reducer;
use crate::store::notification::{Notification, NotificationQueue};
use crate::store::root::{AppIntent, AppReducer, AppState};
use crate::store::session::{SessionIntent, SessionOperation, SessionState};
use crate::store::status::OperationStatus;

/// Ties an entity type to its slice inside [`AppState`].
struct Scope<T> {
    wrap: fn(EntityIntent<T>) -> AppIntent,
    select: fn(&AppState) -> &EntitySlice<T>,
}

const PRODUCTS: Scope<Product> = Scope {
    wrap: AppIntent::Products,
    select: products_slice,
};

const USERS: Scope<User> = Scope {
    wrap: AppIntent::Users,
    select: users_slice,
};

fn products_slice(state: &AppState) -> &EntitySlice<Product> {
    &state.products
}

fn users_slice(state: &AppState) -> &EntitySlice<User> {
    &state.users
}

/// Application store: every slice, the services that feed them, and the
/// notification queue.
///
/// Construct once at startup and share by reference (or `Arc`). Each
/// operation marks its slot pending, awaits the service, then settles the
/// slot; readers either poll [`Store::state`] or follow [`Store::subscribe`].
pub struct Store {
    state: Mutex<AppState>,
    publisher: watch::Sender<AppState>,
    generation: AtomicU64,
    notifications: Mutex<NotificationQueue>,
    products: ProductService,
    users: UserService,
    auth: AuthService,
}

impl Store {
    /// Build a store over an existing client. Login state is seeded from
    /// the client's token store.
    pub fn new(http: Arc<HttpClient>, expires_in_mins: u32) -> Self {
        let initial = AppState {
            session: SessionState::restored(http.tokens().is_present()),
            ..AppState::default()
        };
        let (publisher, _) = watch::channel(initial.clone());

        tracing::debug!(
            base_url = %http.base_url(),
            logged_in = initial.session.is_logged,
            "Store created"
        );

        Self {
            state: Mutex::new(initial),
            publisher,
            generation: AtomicU64::new(0),
            notifications: Mutex::new(NotificationQueue::default()),
            products: ProductService::new(Arc::clone(&http)),
            users: UserService::new(Arc::clone(&http)),
            auth: AuthService::new(http, expires_in_mins),
        }
    }

    pub fn from_config(config: &Config, tokens: TokenStore) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config.api, tokens)?;
        Ok(Self::new(Arc::new(http), config.session.expires_in_mins))
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.lock().clone()
    }

    /// Receiver that sees every state published after a dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.publisher.subscribe()
    }

    pub fn is_logged(&self) -> bool {
        self.state.lock().session.is_logged
    }

    /// Take all pending notifications.
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().drain()
    }

    /// Run one intent through the reducer and publish the result.
    pub fn dispatch(&self, intent: AppIntent) {
        let mut state = self.state.lock();
        self.apply(&mut state, intent);
    }

    fn apply(&self, state: &mut AppState, intent: AppIntent) {
        *state = AppReducer::reduce(std::mem::take(state), intent);
        self.publisher.send_replace(state.clone());
    }

    /// Apply a settle intent, returning whether it belonged to the latest
    /// dispatch. The check and the reduction happen under one lock.
    fn settle(&self, intent: AppIntent, current: impl FnOnce(&AppState) -> bool) -> bool {
        let mut state = self.state.lock();
        let accepted = current(&state);
        self.apply(&mut state, intent);
        accepted
    }

    fn session_status(&self, operation: SessionOperation) -> OperationStatus {
        self.state.lock().session.status(operation)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }

    // -- Products --------------------------------------------------------------

    pub async fn count_products(&self) -> OperationStatus {
        self.track(PRODUCTS, EntityOperation::Count, self.products.count(), |generation, total| {
            EntityIntent::Counted { generation, total }
        })
        .await
    }

    pub async fn list_products(&self, page: i64, per_page: u32) -> OperationStatus {
        self.track(
            PRODUCTS,
            EntityOperation::List,
            self.products.list(page, per_page),
            |generation, page| EntityIntent::Listed { generation, page },
        )
        .await
    }

    pub async fn fetch_product(&self, id: u64) -> OperationStatus {
        self.track(PRODUCTS, EntityOperation::Fetch, self.products.fetch(id), |generation, entity| {
            EntityIntent::Fetched { generation, entity }
        })
        .await
    }

    pub async fn create_product(&self, product: &Product) -> OperationStatus {
        self.track(
            PRODUCTS,
            EntityOperation::Create,
            self.products.create(product),
            |generation, entity| EntityIntent::Created { generation, entity },
        )
        .await
    }

    pub async fn update_product(&self, id: u64, product: &Product) -> OperationStatus {
        self.track(
            PRODUCTS,
            EntityOperation::Update,
            self.products.update(id, product),
            |generation, entity| EntityIntent::Updated { generation, entity },
        )
        .await
    }

    pub async fn delete_product(&self, id: u64) -> OperationStatus {
        self.track(
            PRODUCTS,
            EntityOperation::Delete,
            self.products.delete_entity(id),
            |generation, id| EntityIntent::Deleted { generation, id },
        )
        .await
    }

    // -- Users -----------------------------------------------------------------

    pub async fn count_users(&self) -> OperationStatus {
        self.track(USERS, EntityOperation::Count, self.users.count(), |generation, total| {
            EntityIntent::Counted { generation, total }
        })
        .await
    }

    pub async fn list_users(&self, page: i64, per_page: u32) -> OperationStatus {
        self.track(
            USERS,
            EntityOperation::List,
            self.users.list(page, per_page),
            |generation, page| EntityIntent::Listed { generation, page },
        )
        .await
    }

    pub async fn fetch_user(&self, id: u64) -> OperationStatus {
        self.track(USERS, EntityOperation::Fetch, self.users.fetch(id), |generation, entity| {
            EntityIntent::Fetched { generation, entity }
        })
        .await
    }

    pub async fn create_user(&self, user: &User) -> OperationStatus {
        self.track(USERS, EntityOperation::Create, self.users.create(user), |generation, entity| {
            EntityIntent::Created { generation, entity }
        })
        .await
    }

    pub async fn update_user(&self, id: u64, user: &User) -> OperationStatus {
        self.track(
            USERS,
            EntityOperation::Update,
            self.users.update(id, user),
            |generation, entity| EntityIntent::Updated { generation, entity },
        )
        .await
    }

    // -- Session ---------------------------------------------------------------

    /// Sign in. The token is persisted only if this sign-in is still the
    /// latest one when it resolves.
    pub async fn sign_in(&self, credentials: &Credentials) -> OperationStatus {
        let generation = self.start_session(SessionOperation::SignIn);
        let (token, user) = match self.auth.authenticate(credentials).await {
            Ok(login) => login,
            Err(e) => return self.fail_session(SessionOperation::SignIn, generation, e),
        };

        let mut state = self.state.lock();
        if !state.session.slot(SessionOperation::SignIn).accepts(generation) {
            drop(state);
            tracing::debug!(generation, "Discarding result of superseded sign-in");
            return self.session_status(SessionOperation::SignIn);
        }
        if let Err(e) = self.auth.persist(&token) {
            drop(state);
            return self.fail_session(SessionOperation::SignIn, generation, e);
        }
        let message = format!("Signed in as {}", user.username);
        self.apply(&mut state, AppIntent::Session(SessionIntent::SignedIn { generation, user }));
        drop(state);

        self.notify(Notification::success(message));
        OperationStatus::Succeeded
    }

    pub async fn sign_out(&self) -> OperationStatus {
        let generation = self.start_session(SessionOperation::SignOut);

        let mut state = self.state.lock();
        if !state.session.slot(SessionOperation::SignOut).accepts(generation) {
            drop(state);
            tracing::debug!(generation, "Discarding superseded sign-out");
            return self.session_status(SessionOperation::SignOut);
        }
        if let Err(e) = self.auth.forget() {
            drop(state);
            return self.fail_session(SessionOperation::SignOut, generation, e);
        }
        self.apply(&mut state, AppIntent::Session(SessionIntent::SignedOut { generation }));
        drop(state);

        self.notify(Notification::success("Signed out"));
        OperationStatus::Succeeded
    }

    /// Load the profile behind the stored token.
    pub async fn load_profile(&self) -> OperationStatus {
        let generation = self.start_session(SessionOperation::Profile);
        match self.auth.me().await {
            Ok(user) => {
                let accepted = self.settle(
                    AppIntent::Session(SessionIntent::ProfileLoaded { generation, user }),
                    |state| state.session.slot(SessionOperation::Profile).accepts(generation),
                );
                if !accepted {
                    tracing::debug!(generation, "Discarding result of superseded profile load");
                    return self.session_status(SessionOperation::Profile);
                }
                OperationStatus::Succeeded
            }
            Err(e) => self.fail_session(SessionOperation::Profile, generation, e),
        }
    }

    // -- Lifecycle plumbing ----------------------------------------------------

    async fn track<T, R, Fut>(
        &self,
        scope: Scope<T>,
        operation: EntityOperation,
        call: Fut,
        settle: impl FnOnce(u64, R) -> EntityIntent<T>,
    ) -> OperationStatus
    where
        T: Entity,
        Fut: Future<Output = Result<R, ApiError>>,
    {
        let generation = self.next_generation();
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            kind = T::KIND,
            operation = operation.as_str(),
            generation,
            "Operation dispatched"
        );
        self.dispatch((scope.wrap)(EntityIntent::Started {
            operation,
            generation,
        }));

        let result = call.await;

        let (intent, error) = match result {
            Ok(value) => (settle(generation, value), None),
            Err(e) => {
                let intent = EntityIntent::Failed {
                    operation,
                    generation,
                    message: e.to_string(),
                };
                (intent, Some(e))
            }
        };
        let accepted = self.settle((scope.wrap)(intent), |state| {
            (scope.select)(state).slot(operation).accepts(generation)
        });

        if !accepted {
            tracing::debug!(
                %request_id,
                kind = T::KIND,
                operation = operation.as_str(),
                generation,
                failed = error.is_some(),
                "Result of superseded operation not reported"
            );
            return (scope.select)(&self.state.lock()).status(operation);
        }

        match error {
            None => {
                if let Some(message) = success_message(T::KIND, operation) {
                    self.notify(Notification::success(message));
                }
                tracing::debug!(%request_id, kind = T::KIND, operation = operation.as_str(), "Operation succeeded");
                OperationStatus::Succeeded
            }
            Some(e) => {
                tracing::warn!(
                    %request_id,
                    kind = T::KIND,
                    operation = operation.as_str(),
                    error_type = e.error_type(),
                    error = %e,
                    "Operation failed"
                );
                self.notify(Notification::error(format!(
                    "Could not {} {}: {}",
                    failure_verb(operation),
                    plural_kind(T::KIND, operation),
                    e
                )));
                OperationStatus::Failed
            }
        }
    }

    fn start_session(&self, operation: SessionOperation) -> u64 {
        let generation = self.next_generation();
        tracing::debug!(operation = operation.as_str(), generation, "Session operation dispatched");
        self.dispatch(AppIntent::Session(SessionIntent::Started {
            operation,
            generation,
        }));
        generation
    }

    fn fail_session(&self, operation: SessionOperation, generation: u64, e: ApiError) -> OperationStatus {
        let accepted = self.settle(
            AppIntent::Session(SessionIntent::Failed {
                operation,
                generation,
                message: e.to_string(),
            }),
            |state| state.session.slot(operation).accepts(generation),
        );
        if !accepted {
            tracing::debug!(
                operation = operation.as_str(),
                generation,
                error = %e,
                "Failure of superseded session operation not reported"
            );
            return self.session_status(operation);
        }

        tracing::warn!(
            operation = operation.as_str(),
            error_type = e.error_type(),
            error = %e,
            "Session operation failed"
        );
        let message = match operation {
            SessionOperation::SignIn => format!("Sign-in failed: {}", e),
            SessionOperation::SignOut => format!("Sign-out failed: {}", e),
            SessionOperation::Profile => format!("Could not load profile: {}", e),
        };
        self.notify(Notification::error(message));
        OperationStatus::Failed
    }
}

fn success_message(kind: &str, operation: EntityOperation) -> Option<String> {
    let past = match operation {
        EntityOperation::Create => "created",
        EntityOperation::Update => "updated",
        EntityOperation::Delete => "deleted",
        EntityOperation::Count | EntityOperation::List | EntityOperation::Fetch => return None,
    };
    Some(format!("{} {}", capitalize(kind), past))
}

fn failure_verb(operation: EntityOperation) -> &'static str {
    match operation {
        EntityOperation::Count => "count",
        EntityOperation::List | EntityOperation::Fetch => "load",
        EntityOperation::Create => "create",
        EntityOperation::Update => "update",
        EntityOperation::Delete => "delete",
    }
}

fn plural_kind(kind: &str, operation: EntityOperation) -> String {
    match operation {
        EntityOperation::Count | EntityOperation::List => format!("{}s", kind),
        _ => kind.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
