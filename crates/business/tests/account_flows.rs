//! Authentication, beneficiary resolution, password change, history reads
//! and provisioning flows.

mod common;

use common::{balance_of, open_account, setup};
use netbank_business::{
    AccountError, AuthError, AuthService, BeneficiaryService, HistoryService, OnboardError,
    OnboardingService, OpenAccountRequest, PasswordError, ResolveError, TransferService,
};
use netbank_core::{Direction, TransferMode};
use rust_decimal_macros::dec;

#[tokio::test]
async fn authenticate_matches_all_three_identity_keys() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;

    let auth = AuthService::new(&ctx);
    for identity in [
        "user_1000000001",
        "1000000001@example.com",
        "1000000001",
    ] {
        let account = auth.authenticate(identity, "opening-secret").await.unwrap();
        assert_eq!(account, "1000000001");
    }
}

#[tokio::test]
async fn bad_password_and_unknown_identity_are_indistinguishable() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;

    let auth = AuthService::new(&ctx);

    let err = auth
        .authenticate("user_1000000001", "wrong-secret")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let err = auth
        .authenticate("no-such-user", "opening-secret")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    assert_eq!(
        AuthError::InvalidCredentials.to_string(),
        auth.authenticate("no-such-user", "opening-secret")
            .await
            .unwrap_err()
            .to_string()
    );
}

#[tokio::test]
async fn change_password_rotates_the_credential() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;

    let auth = AuthService::new(&ctx);
    auth.change_password("1000000001", "new-secret").await.unwrap();

    let err = auth
        .authenticate("1000000001", "opening-secret")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let account = auth.authenticate("1000000001", "new-secret").await.unwrap();
    assert_eq!(account, "1000000001");
}

#[tokio::test]
async fn change_password_for_missing_account_is_not_found() {
    let (_dir, ctx) = setup().await;

    let err = AuthService::new(&ctx)
        .change_password("9999999999", "whatever")
        .await
        .unwrap_err();
    assert!(matches!(err, PasswordError::NotFound(ref n) if n == "9999999999"));
}

#[tokio::test]
async fn resolve_by_account_number_and_by_alias() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", Some("asha@netbank"), dec!(100.00)).await;
    open_account(
        &ctx,
        "2000000002",
        "Vikram Shah",
        Some("vikram@netbank"),
        dec!(100.00),
    )
    .await;

    let resolver = BeneficiaryService::new(&ctx);

    let direct = resolver
        .resolve("1000000001", TransferMode::Imps, "2000000002")
        .await
        .unwrap();
    assert_eq!(direct.account_number, "2000000002");
    assert_eq!(direct.holder_name, "Vikram Shah");
    assert_eq!(direct.branch, "MG Road");

    let aliased = resolver
        .resolve("1000000001", TransferMode::Upi, "vikram@netbank")
        .await
        .unwrap();
    assert_eq!(aliased.account_number, "2000000002");
}

#[tokio::test]
async fn resolve_rejects_self_in_both_modes() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", Some("asha@netbank"), dec!(100.00)).await;

    let resolver = BeneficiaryService::new(&ctx);

    let err = resolver
        .resolve("1000000001", TransferMode::Imps, "1000000001")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::SelfTransfer));

    let err = resolver
        .resolve("1000000001", TransferMode::Upi, "asha@netbank")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::SelfTransfer));
}

#[tokio::test]
async fn resolve_miss_is_not_found_not_self_transfer() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;

    let resolver = BeneficiaryService::new(&ctx);

    let err = resolver
        .resolve("1000000001", TransferMode::Imps, "7777777777")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::NotFound));

    let err = resolver
        .resolve("1000000001", TransferMode::Upi, "ghost@netbank")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::NotFound));
}

#[tokio::test]
async fn history_is_newest_first_and_stable_across_reads() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;
    open_account(&ctx, "2000000002", "Vikram Shah", None, dec!(100.00)).await;

    let transfers = TransferService::new(&ctx);
    let first = transfers
        .transfer(
            "1000000001",
            "2000000002",
            dec!(10.00),
            TransferMode::Imps,
            Some("first"),
        )
        .await
        .unwrap();
    let second = transfers
        .transfer(
            "2000000002",
            "1000000001",
            dec!(5.00),
            TransferMode::Imps,
            Some("second"),
        )
        .await
        .unwrap();

    let history = HistoryService::new(&ctx);
    let view = history.history("1000000001").await.unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].entry.transaction_id, second.transaction_id);
    assert_eq!(view[0].direction, Direction::Credit);
    assert_eq!(view[1].entry.transaction_id, first.transaction_id);
    assert_eq!(view[1].direction, Direction::Debit);

    // Same question, same answer.
    let again = history.history("1000000001").await.unwrap();
    assert_eq!(again.len(), view.len());
    for (a, b) in view.iter().zip(again.iter()) {
        assert_eq!(a.entry.transaction_id, b.entry.transaction_id);
        assert_eq!(a.direction, b.direction);
    }
}

#[tokio::test]
async fn history_of_unused_account_is_empty() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;

    let view = HistoryService::new(&ctx).history("1000000001").await.unwrap();
    assert!(view.is_empty());
}

#[tokio::test]
async fn account_details_returns_the_snapshot() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", Some("asha@netbank"), dec!(42.50)).await;

    let profile = HistoryService::new(&ctx)
        .account_details("1000000001")
        .await
        .unwrap();
    assert_eq!(profile.account.account_holder_name, "Asha Rao");
    assert_eq!(profile.account.upi_id.as_deref(), Some("asha@netbank"));
    assert_eq!(profile.account.account_balance, dec!(42.50));
    assert_eq!(profile.user_id.as_deref(), Some("user_1000000001"));
    assert_eq!(profile.email.as_deref(), Some("1000000001@example.com"));

    let err = HistoryService::new(&ctx)
        .account_details("9999999999")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::NotFound(_)));
}

#[tokio::test]
async fn provisioning_is_all_or_nothing() {
    let (_dir, ctx) = setup().await;
    open_account(&ctx, "1000000001", "Asha Rao", None, dec!(100.00)).await;

    // Fresh account number, but the user id collides: nothing may remain
    // of the half-written account row.
    let err = OnboardingService::new(&ctx)
        .open_account(OpenAccountRequest {
            holder_name: "Imposter".to_string(),
            branch: "MG Road".to_string(),
            ifsc_code: "NETB0000001".to_string(),
            upi_id: None,
            opening_balance: dec!(0.00),
            user_id: "user_1000000001".to_string(),
            email: None,
            password: "secret".to_string(),
            account_number: Some("5000000005".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardError::AlreadyExists(_)));

    let err = HistoryService::new(&ctx)
        .account_details("5000000005")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::NotFound(_)));

    // The original account is untouched.
    assert_eq!(balance_of(&ctx, "1000000001").await, dec!(100.00));
}
