mod common;

use account_client::account::{
    ChangePasswordForm, FlowError, SignInForm, SignUpForm, UpdateProfileForm,
};
use account_client::api::ApiError;
use account_client::state::authentication::AuthenticationState;
use account_client::state::user::UserState;
use account_client::state::AppState;
use common::{boot, boot_account, MockApi, MockResponse};
use serde_json::json;

fn session() -> AppState {
    AppState {
        authentication: AuthenticationState {
            is_authenticated: true,
            access_token: Some("tok".to_string()),
        },
        user: UserState {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        },
    }
}

#[tokio::test]
async fn sign_in_stores_token_and_user() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::authenticated(
        "tok123",
        json!({ "_id": "u1", "email": "ada@example.com", "firstName": "Ada", "lastName": "Lovelace" }),
    ))
    .await;
    let (context, _) = boot(&mock, None).await;
    let account = account_client::account::Account::new(context.clone());

    let user = account
        .sign_in(SignInForm {
            email: "  Ada@Example.com ".to_string(),
            password: " secret ".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert!(account.is_authenticated());
    assert_eq!(context.api().credential().unwrap().expose(), "tok123");

    let requests = mock.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/user/sign-in");
    assert_eq!(
        requests[0].json(),
        json!({ "email": "ada@example.com", "password": "secret" })
    );
}

#[tokio::test]
async fn sign_in_requires_every_field() {
    let mock = MockApi::start().await;
    let account = boot_account(&mock, None).await;

    let err = account
        .sign_in(SignInForm {
            email: "ada@example.com".to_string(),
            password: "   ".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::Validation(ref msg) if msg == "All fields are required"));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn unauthorized_sign_in_is_invalid_credentials() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::rejected(401, "Unauthorized")).await;
    let account = boot_account(&mock, None).await;

    let err = account
        .sign_in(SignInForm {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::InvalidCredentials));
    assert_eq!(err.to_string(), "Your credentials are invalid");
    assert!(!account.is_authenticated());
}

#[tokio::test]
async fn other_rejections_surface_the_server_message() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::rejected(409, "Email already taken")).await;
    let account = boot_account(&mock, None).await;

    let err = account
        .sign_up(SignUpForm {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        FlowError::Api(api) => {
            assert_eq!(api.status(), Some(409));
            assert_eq!(api.first_message(), Some("Email already taken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn sign_up_rejects_malformed_email() {
    let mock = MockApi::start().await;
    let account = boot_account(&mock, None).await;

    let err = account
        .sign_up(SignUpForm {
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Please enter valid E-Mail Address");
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn sign_up_signs_in() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::authenticated(
        "fresh",
        json!({ "_id": "u2", "email": "grace@example.com", "firstName": "Grace", "lastName": "Hopper" }),
    ))
    .await;
    let account = boot_account(&mock, None).await;

    let user = account
        .sign_up(SignUpForm {
            email: "Grace@Example.com".to_string(),
            password: "pw".to_string(),
            first_name: " Grace ".to_string(),
            last_name: "Hopper".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.display_name(), "Grace Hopper");
    let body = mock.requests().await[0].json();
    assert_eq!(body["email"], "grace@example.com");
    assert_eq!(body["firstName"], "Grace");
}

#[tokio::test]
async fn sign_out_clears_session_even_when_the_request_fails() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::rejected(500, "Internal Server Error")).await;
    let (context, _) = boot(&mock, Some(session())).await;
    let account = account_client::account::Account::new(context.clone());

    account.sign_out().await.unwrap();

    assert_eq!(context.store().get_state(), AppState::default());
    assert!(context.api().credential().is_none());

    let requests = mock.requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/user/sign-out");
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn repeated_sign_out_is_harmless() {
    let mock = MockApi::start().await;
    let account = boot_account(&mock, Some(session())).await;

    account.sign_out().await.unwrap();
    account.sign_out().await.unwrap();

    assert!(!account.is_authenticated());
    assert!(account.profile().is_empty());
}

#[tokio::test]
async fn update_profile_sends_id_and_merges() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(200, r#"{"ok":true}"#)).await;
    let account = boot_account(&mock, Some(session())).await;

    let user = account
        .update_profile(UpdateProfileForm {
            email: "ADA@example.com".to_string(),
            first_name: "Augusta".to_string(),
            last_name: "King".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name, "Augusta");
    assert_eq!(user.last_name, "King");

    let request = &mock.requests().await[0];
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/user/update");
    assert_eq!(request.json()["_id"], "u1");
}

#[tokio::test]
async fn profile_changes_need_a_session() {
    let mock = MockApi::start().await;
    let account = boot_account(&mock, None).await;

    let err = account
        .update_profile(UpdateProfileForm {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::NotSignedIn));

    let err = account
        .change_password(ChangePasswordForm {
            old_password: "a".to_string(),
            new_password: "b".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::NotSignedIn));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn wrong_old_password_is_reported() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::rejected(400, "Bad Request")).await;
    let account = boot_account(&mock, Some(session())).await;

    let err = account
        .change_password(ChangePasswordForm {
            old_password: "wrong".to_string(),
            new_password: "new".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::IncorrectPassword));
    let body = mock.requests().await[0].json();
    assert_eq!(body["_id"], "u1");
    assert_eq!(body["oldPassword"], "wrong");
}

#[tokio::test]
async fn concurrent_call_is_refused_while_in_flight() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(200, "{}").with_delay(200)).await;
    let account = boot_account(&mock, Some(session())).await;

    let slow = account.clone();
    let first = tokio::spawn(async move {
        slow.change_password(ChangePasswordForm {
            old_password: "old".to_string(),
            new_password: "new".to_string(),
        })
        .await
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let err = account.sign_out().await.unwrap_err();
    assert!(matches!(err, FlowError::InFlight));

    first.await.unwrap().unwrap();
    account.sign_out().await.unwrap();
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let (_, persisted) = common::memory_persisted();
    let context = account_client::bootstrap::Bootstrap::new(
        persisted,
        common::api_client("http://127.0.0.1:9"),
    )
    .run()
    .await;
    let account = account_client::account::Account::new(context);

    let err = account
        .sign_in(SignInForm {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::Api(ApiError::Connection { .. })));
}
