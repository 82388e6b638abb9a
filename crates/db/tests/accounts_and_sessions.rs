//! Integration tests for account updates, the agent listing, and session
//! storage (token lookup, CSRF compare-and-swap, cascade on delete).

use chrono::{Duration, Utc};
use fasl_db::models::account::UpdateAccount;
use fasl_db::models::agent::NewAgentProfile;
use fasl_db::models::session::CreateSession;
use fasl_db::provisioning::{self, NewAccount, RoleProfileInput};
use fasl_db::repositories::{AccountRepo, SessionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_account(username: &str, profile: RoleProfileInput) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$fake$hash".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: None,
        address: None,
        date_of_birth: None,
        profile,
    }
}

fn agent_input() -> RoleProfileInput {
    RoleProfileInput::Agent(NewAgentProfile {
        license_number: None,
        years_experience: 0,
        specialization: None,
    })
}

fn new_session(account_id: i64, token_hash: &str, csrf: &str) -> CreateSession {
    CreateSession {
        account_id,
        token_hash: token_hash.to_string(),
        csrf_token: csrf.to_string(),
        expires_at: Utc::now() + Duration::hours(24),
    }
}

// ---------------------------------------------------------------------------
// Test: partial update leaves untouched fields alone
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_preserves_other_fields(pool: PgPool) {
    let account = provisioning::create_account(&pool, new_account("updatee", RoleProfileInput::Admin))
        .await
        .unwrap();

    let updated = AccountRepo::update(
        &pool,
        account.id,
        &UpdateAccount {
            phone: Some("+232 76 123456".to_string()),
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");

    assert_eq!(updated.phone.as_deref(), Some("+232 76 123456"));
    assert!(!updated.is_active);
    // Everything else untouched.
    assert_eq!(updated.username, account.username);
    assert_eq!(updated.email, account.email);
    assert_eq!(updated.role, account.role);
    assert_eq!(updated.password_hash, account.password_hash);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let result = AccountRepo::update(
        &pool,
        999_999,
        &UpdateAccount {
            first_name: Some("Ghost".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: agent listing only shows active agents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_agents_excludes_inactive_and_other_roles(pool: PgPool) {
    provisioning::create_account(&pool, new_account("admin1", RoleProfileInput::Admin))
        .await
        .unwrap();
    let active = provisioning::create_account(&pool, new_account("agent_a", agent_input()))
        .await
        .unwrap();
    let benched = provisioning::create_account(&pool, new_account("agent_b", agent_input()))
        .await
        .unwrap();

    AccountRepo::update(
        &pool,
        benched.id,
        &UpdateAccount {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let agents = AccountRepo::list_agents(&pool).await.unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].id, active.id);
}

// ---------------------------------------------------------------------------
// Test: session lookup ignores expired rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_not_found(pool: PgPool) {
    let account = provisioning::create_account(&pool, new_account("sess1", RoleProfileInput::Admin))
        .await
        .unwrap();

    let mut input = new_session(account.id, "hash_expired", "csrf1");
    input.expires_at = Utc::now() - Duration::hours(1);
    SessionRepo::create(&pool, &input).await.unwrap();

    assert!(SessionRepo::find_valid_by_token_hash(&pool, "hash_expired")
        .await
        .unwrap()
        .is_none());

    let swept = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(swept, 1);
}

// ---------------------------------------------------------------------------
// Test: CSRF compare-and-swap is single-use
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_csrf_token_spent_exactly_once(pool: PgPool) {
    let account = provisioning::create_account(&pool, new_account("sess2", RoleProfileInput::Admin))
        .await
        .unwrap();
    let session = SessionRepo::create(&pool, &new_session(account.id, "hash_csrf", "token_one"))
        .await
        .unwrap();

    // Wrong token: no swap, no side effect.
    assert!(!SessionRepo::consume_csrf(&pool, session.id, "wrong", "token_two")
        .await
        .unwrap());

    // Right token: consumed and replaced.
    assert!(SessionRepo::consume_csrf(&pool, session.id, "token_one", "token_two")
        .await
        .unwrap());

    // Replay of the spent token fails.
    assert!(!SessionRepo::consume_csrf(&pool, session.id, "token_one", "token_three")
        .await
        .unwrap());

    // The replacement is live.
    assert!(SessionRepo::consume_csrf(&pool, session.id, "token_two", "token_three")
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: deleting the account removes its sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_delete_cascades_sessions(pool: PgPool) {
    let admin = provisioning::create_account(&pool, new_account("boss2", RoleProfileInput::Admin))
        .await
        .unwrap();
    let victim = provisioning::create_account(&pool, new_account("victim", RoleProfileInput::Admin))
        .await
        .unwrap();
    SessionRepo::create(&pool, &new_session(victim.id, "hash_victim", "csrf"))
        .await
        .unwrap();

    provisioning::delete_account(&pool, victim.id, admin.id)
        .await
        .unwrap();

    assert!(SessionRepo::find_valid_by_token_hash(&pool, "hash_victim")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_all_sessions_for_account(pool: PgPool) {
    let account = provisioning::create_account(&pool, new_account("multi", RoleProfileInput::Admin))
        .await
        .unwrap();
    SessionRepo::create(&pool, &new_session(account.id, "hash_a", "c1"))
        .await
        .unwrap();
    SessionRepo::create(&pool, &new_session(account.id, "hash_b", "c2"))
        .await
        .unwrap();

    let removed = SessionRepo::delete_all_for_account(&pool, account.id)
        .await
        .unwrap();
    assert_eq!(removed, 2);
}
