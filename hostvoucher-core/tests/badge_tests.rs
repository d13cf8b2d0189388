// File: hostvoucher-core/tests/badge_tests.rs

use hostvoucher_core::{
    catalog::catalog,
    models::{BadgeTier, ChangeCause},
    eventbus::GamificationEvent,
    services::BadgeService,
    test_utils::helpers::{activate_with_points, build_test_store, open_store_with},
    Error,
};

#[tokio::test]
async fn test_buy_daily_bronze_then_already_owned() -> Result<(), Error> {
    let (store, _clock, _repo) = build_test_store(0).await;
    activate_with_points(&store, 30_000_000).await?;
    let svc = BadgeService::new(store.clone());

    let receipt = svc.purchase("Daily Bronze").await?;
    assert_eq!(receipt.points_debited, 10_000_000);
    assert_eq!(receipt.total_points, 20_000_000);
    assert_eq!(receipt.tier, BadgeTier::Daily);

    let st = store.read().await.unwrap();
    assert_eq!(st.points, 20_000_000);
    assert!(st.owns("Daily Bronze"));

    match svc.purchase("Daily Bronze").await {
        Err(Error::AlreadyOwned(name)) => assert_eq!(name, "Daily Bronze"),
        other => panic!("expected AlreadyOwned, got {other:?}"),
    }
    assert_eq!(store.read().await.unwrap().points, 20_000_000);
    Ok(())
}

#[tokio::test]
async fn test_insufficient_points_leaves_state_untouched() -> Result<(), Error> {
    let (store, _clock, repo) = build_test_store(0).await;
    activate_with_points(&store, 9_999_999).await?;
    let before = store.read().await.unwrap();
    let saves = repo.save_count();
    let svc = BadgeService::new(store.clone());

    match svc.purchase("Daily Bronze").await {
        Err(Error::InsufficientPoints { badge, price, available }) => {
            assert_eq!(badge, "Daily Bronze");
            assert_eq!(price, 10_000_000);
            assert_eq!(available, 9_999_999);
        }
        other => panic!("expected InsufficientPoints, got {other:?}"),
    }
    assert_eq!(store.read().await.unwrap(), before);
    assert_eq!(repo.save_count(), saves);
    Ok(())
}

#[tokio::test]
async fn test_exact_price_empties_balance() -> Result<(), Error> {
    let (store, _clock, _repo) = build_test_store(0).await;
    let price = catalog().find("Yearly Silver").unwrap().price_points;
    activate_with_points(&store, price).await?;

    let receipt = BadgeService::new(store.clone()).purchase("yearly silver").await?;
    assert_eq!(receipt.badge, "Yearly Silver");
    assert_eq!(receipt.total_points, 0);
    Ok(())
}

#[tokio::test]
async fn test_purchase_requires_activation() -> Result<(), Error> {
    let (store, _clock, _repo) = build_test_store(0).await;
    let svc = BadgeService::new(store.clone());
    assert!(matches!(svc.purchase("Daily Bronze").await, Err(Error::NotActivated)));
    assert!(store.read().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_purchase_survives_reload() -> Result<(), Error> {
    let (store, clock, repo) = build_test_store(0).await;
    activate_with_points(&store, 100_000_000).await?;
    BadgeService::new(store.clone()).purchase("Daily Gold").await?;
    drop(store);

    let store = open_store_with(repo, clock).await;
    let svc = BadgeService::new(store.clone());
    let owned: Vec<String> = svc.owned().await.into_iter().map(|b| b.name).collect();
    assert_eq!(owned, vec!["Daily Gold".to_string()]);
    assert_eq!(store.read().await.unwrap().points, 70_000_000);
    Ok(())
}

#[tokio::test]
async fn test_special_badge_credits_once() -> Result<(), Error> {
    let (store, _clock, _repo) = build_test_store(0).await;
    activate_with_points(&store, 0).await?;
    let mut rx = store.event_bus().subscribe(Some(8)).await;
    let svc = BadgeService::new(store.clone());

    let receipt = svc.grant_special("Verified Buyer").await?;
    assert_eq!(receipt.points_credited, 50_000_000);
    assert_eq!(receipt.tier, BadgeTier::Special);
    assert!(matches!(svc.grant_special("Verified Buyer").await, Err(Error::AlreadyOwned(_))));
    assert_eq!(store.read().await.unwrap().points, 50_000_000);

    match rx.recv().await {
        Some(GamificationEvent::StateChanged { cause, .. }) => assert_eq!(
            cause,
            ChangeCause::SpecialBadgeGranted { badge: "Verified Buyer".into(), points: 50_000_000 }
        ),
        other => panic!("expected StateChanged, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_owned_listing_follows_catalog_order() -> Result<(), Error> {
    let (store, _clock, _repo) = build_test_store(0).await;
    activate_with_points(&store, 1_000_000_000).await?;
    let svc = BadgeService::new(store.clone());

    svc.purchase("Weekly Bronze").await?;
    svc.purchase("Daily Silver").await?;
    svc.grant_special("Trusted Reviewer").await?;

    let owned: Vec<String> = svc.owned().await.into_iter().map(|b| b.name).collect();
    assert_eq!(owned, vec!["Daily Silver", "Weekly Bronze", "Trusted Reviewer"]);
    Ok(())
}
