//! End-to-end sign-up / sign-in / gated town scenarios against the
//! in-memory credential store.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use server::AppError;
use server::AppState;
use server::auth::{
    Argon2Hasher, AuthService, AuthorizationDecision, PasswordHasher, RejectReason, TokenService,
};
use server::database::{CredentialStore, MemoryCredentialStore, NewCredential};
use shared::types::{TownCreateData, TownJoinData};

const SECRET: &str = "integration-secret-0123456789abcdef";

struct Harness {
    store: Arc<MemoryCredentialStore>,
    tokens: Arc<TokenService>,
    state: AppState,
}

fn harness() -> Harness {
    harness_with_hasher(Arc::new(Argon2Hasher))
}

fn harness_with_hasher(hasher: Arc<dyn PasswordHasher>) -> Harness {
    let store = Arc::new(MemoryCredentialStore::new());
    let tokens = Arc::new(TokenService::new(SECRET).unwrap());
    let state = AppState::new(store.clone(), hasher, tokens.clone());
    Harness {
        store,
        tokens,
        state,
    }
}

async fn sign_up_frank(auth: &AuthService) {
    auth.sign_up("frank", "frank@example.com", "123456abc")
        .await
        .unwrap();
}

struct BrokenHasher;

impl PasswordHasher for BrokenHasher {
    fn hash(&self, _password: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("hasher offline"))
    }

    fn verify(&self, _password: &str, _hash: &str) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("hasher offline"))
    }
}

/// Argon2 underneath, with a count of verify calls.
#[derive(Default)]
struct CountingHasher {
    verifies: AtomicUsize,
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Argon2Hasher.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        Argon2Hasher.verify(password, hash)
    }
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sign_up_stores_one_record_then_conflicts() {
    let h = harness();
    let credential = h
        .state
        .auth
        .sign_up("frank", "frank@example.com", "123456abc")
        .await
        .unwrap();

    assert_eq!(credential.username, "frank");
    assert_eq!(credential.email, "frank@example.com");
    assert_ne!(credential.password_hash, "123456abc");
    assert!(!credential.banned);
    assert_eq!(h.store.len().await, 1);

    let second = h
        .state
        .auth
        .sign_up("frank2", "frank@example.com", "123456abc")
        .await;
    assert!(matches!(second, Err(AppError::Conflict)));
    assert_eq!(h.store.len().await, 1);
}

#[tokio::test]
async fn empty_fields_are_validation_errors_without_mutation() {
    let h = harness();
    let auth = &h.state.auth;

    assert!(matches!(
        auth.sign_up("", "frank@example.com", "123456").await,
        Err(AppError::Validation("userName"))
    ));
    assert!(matches!(
        auth.sign_up("frank", "", "123456").await,
        Err(AppError::Validation("email"))
    ));
    assert!(matches!(
        auth.sign_up("frank", "frank@example.com", "").await,
        Err(AppError::Validation("password"))
    ));
    assert!(matches!(
        auth.sign_up("   ", "frank@example.com", "123456").await,
        Err(AppError::Validation("userName"))
    ));
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn hasher_failure_creates_nothing() {
    let h = harness_with_hasher(Arc::new(BrokenHasher));
    let result = h
        .state
        .auth
        .sign_up("frank", "frank@example.com", "123456abc")
        .await;
    assert!(matches!(result, Err(AppError::Internal(_))));
    assert!(h.store.is_empty().await);
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sign_in_issues_a_verifiable_token() {
    let h = harness();
    sign_up_frank(&h.state.auth).await;

    let signed_in = h
        .state
        .auth
        .sign_in("frank@example.com", "123456abc")
        .await
        .unwrap();
    assert_eq!(signed_in.username, "frank");

    let token = signed_in.access_token;
    assert_eq!(
        h.state.gate.authorize(Some(&token), true),
        AuthorizationDecision::verified("frank".into())
    );
    assert_eq!(
        h.state.gate.authorize(Some(&format!("{}x", token)), true),
        AuthorizationDecision::rejected(RejectReason::InvalidToken)
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let h = harness();
    sign_up_frank(&h.state.auth).await;

    let wrong_password = h
        .state
        .auth
        .sign_in("frank@example.com", "not-it")
        .await
        .unwrap_err();
    let unknown_email = h
        .state
        .auth
        .sign_in("nobody@example.com", "123456abc")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::Authentication));
    assert!(matches!(unknown_email, AppError::Authentication));
    assert_eq!(wrong_password.to_response(), unknown_email.to_response());
    assert_eq!(wrong_password.status(), unknown_email.status());
}

#[tokio::test]
async fn unknown_email_still_runs_a_password_check() {
    let hasher = Arc::new(CountingHasher::default());
    let h = harness_with_hasher(hasher.clone());
    sign_up_frank(&h.state.auth).await;

    let unknown = h.state.auth.sign_in("nobody@example.com", "123456abc").await;
    assert!(matches!(unknown, Err(AppError::Authentication)));
    assert_eq!(hasher.verifies.load(Ordering::SeqCst), 1);

    let wrong = h.state.auth.sign_in("frank@example.com", "not-it").await;
    assert!(matches!(wrong, Err(AppError::Authentication)));
    assert_eq!(hasher.verifies.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn sign_in_requires_both_fields() {
    let h = harness();
    assert!(matches!(
        h.state.auth.sign_in("", "pw").await,
        Err(AppError::Validation("email"))
    ));
    assert!(matches!(
        h.state.auth.sign_in("frank@example.com", "").await,
        Err(AppError::Validation("password"))
    ));
}

#[tokio::test]
async fn banned_user_gets_no_token() {
    let h = harness();
    let hash = Argon2Hasher.hash("123456abc").unwrap();
    h.store
        .create_user(NewCredential {
            banned: true,
            ..NewCredential::new("tom".into(), "tom@example.com".into(), hash)
        })
        .await
        .unwrap();

    assert!(matches!(
        h.state.auth.sign_in("tom@example.com", "123456abc").await,
        Err(AppError::Banned)
    ));
    // Without the right password a banned account looks like any other miss.
    assert!(matches!(
        h.state.auth.sign_in("tom@example.com", "guess").await,
        Err(AppError::Authentication)
    ));
}

// ---------------------------------------------------------------------------
// Gated town operations
// ---------------------------------------------------------------------------

fn create_request(token: Option<String>) -> TownCreateData {
    TownCreateData {
        friendly_name: "plaza".into(),
        is_publicly_listed: true,
        access_token: token,
    }
}

#[tokio::test]
async fn create_town_with_verified_token_records_the_creator() {
    let h = harness();
    let token = h.tokens.sign("frank").unwrap();

    let created = h
        .state
        .towns
        .create_town(create_request(Some(token)))
        .await
        .unwrap();

    let town = h.state.towns.towns().get(&created.town_id).await.unwrap();
    assert_eq!(town.created_by, "frank");
    assert_eq!(town.update_password, created.town_password);
}

#[tokio::test]
async fn stale_secret_token_creates_no_town() {
    let h = harness();
    let stale = TokenService::new("the-secret-before-the-restart-0000").unwrap();
    let token = stale.sign("frank").unwrap();

    let result = h.state.towns.create_town(create_request(Some(token))).await;
    assert!(matches!(result, Err(AppError::Authentication)));
    assert!(h.state.towns.towns().is_empty().await);
}

#[tokio::test]
async fn missing_or_empty_token_creates_no_town() {
    let h = harness();
    let towns = &h.state.towns;

    assert!(matches!(
        towns.create_town(create_request(None)).await,
        Err(AppError::Authentication)
    ));
    assert!(matches!(
        towns.create_town(create_request(Some(String::new()))).await,
        Err(AppError::Authentication)
    ));
    assert!(towns.towns().is_empty().await);
}

#[tokio::test]
async fn join_town_adds_verified_identity() {
    let h = harness();
    let token = h.tokens.sign("frank").unwrap();
    let created = h
        .state
        .towns
        .create_town(create_request(Some(token.clone())))
        .await
        .unwrap();

    let joiner = h.tokens.sign("tom").unwrap();
    let joined = h
        .state
        .towns
        .join_town(TownJoinData {
            user_name: "Tommy".into(),
            town_id: created.town_id.clone(),
            access_token: Some(joiner),
        })
        .await
        .unwrap();

    assert_eq!(joined.town_id, created.town_id);
    assert_eq!(joined.friendly_name, "plaza");
    assert_eq!(joined.occupants, vec!["tom".to_string()]);
}

#[tokio::test]
async fn join_town_rejects_bad_token_before_touching_the_town() {
    let h = harness();
    let token = h.tokens.sign("frank").unwrap();
    let created = h
        .state
        .towns
        .create_town(create_request(Some(token)))
        .await
        .unwrap();

    let result = h
        .state
        .towns
        .join_town(TownJoinData {
            user_name: "tom".into(),
            town_id: created.town_id.clone(),
            access_token: Some("not-a-token".into()),
        })
        .await;
    assert!(matches!(result, Err(AppError::Authentication)));

    let town = h.state.towns.towns().get(&created.town_id).await.unwrap();
    assert!(town.occupants.is_empty());
}

#[tokio::test]
async fn join_unknown_town_is_not_found() {
    let h = harness();
    let token = h.tokens.sign("frank").unwrap();
    let result = h
        .state
        .towns
        .join_town(TownJoinData {
            user_name: "frank".into(),
            town_id: "nowhere".into(),
            access_token: Some(token),
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound("town"))));
}

#[tokio::test]
async fn listing_is_anonymous_but_checks_presented_tokens() {
    let h = harness();
    let token = h.tokens.sign("frank").unwrap();
    h.state
        .towns
        .create_town(create_request(Some(token.clone())))
        .await
        .unwrap();

    let anonymous = h.state.towns.list_towns(None).await.unwrap();
    assert_eq!(anonymous.towns.len(), 1);

    let identified = h.state.towns.list_towns(Some(&token)).await.unwrap();
    assert_eq!(identified, anonymous);

    assert!(matches!(
        h.state.towns.list_towns(Some("garbage")).await,
        Err(AppError::Authentication)
    ));
}

#[tokio::test]
async fn concurrent_sign_ins_do_not_interfere() {
    let h = harness();
    for (name, email) in [("frank", "frank@example.com"), ("tom", "tom@example.com")] {
        h.state.auth.sign_up(name, email, "123456abc").await.unwrap();
    }

    let a = {
        let auth = h.state.auth.clone();
        tokio::spawn(async move { auth.sign_in("frank@example.com", "123456abc").await })
    };
    let b = {
        let auth = h.state.auth.clone();
        tokio::spawn(async move { auth.sign_in("tom@example.com", "123456abc").await })
    };

    let a = a.await.unwrap().unwrap();
    let b = b.await.unwrap().unwrap();
    assert_eq!(h.tokens.verify(&a.access_token).unwrap(), "frank");
    assert_eq!(h.tokens.verify(&b.access_token).unwrap(), "tom");
}
