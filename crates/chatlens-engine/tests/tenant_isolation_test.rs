mod helpers;

use chatlens_core::models::{UploadListQuery, UploadStatus};
use chatlens_core::LifecycleError;
use helpers::{coordinator, json_upload, two_message_transcript, wait_for_terminal};

/// Tenant A submits an upload; tenant B must never see it through any
/// read or mutation path, and must not be able to tell it exists.
#[tokio::test]
async fn test_cross_tenant_status_is_not_found() {
    let coordinator = coordinator();
    let created = coordinator
        .submit("t1", vec![json_upload(two_message_transcript())])
        .await
        .unwrap();
    let id = created[0].id;

    let err = coordinator.status(id, "t2").await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound));
    // The owner still sees it.
    assert!(coordinator.status(id, "t1").await.is_ok());
}

#[tokio::test]
async fn test_cross_tenant_results_are_not_found() {
    let coordinator = coordinator();
    let created = coordinator
        .submit("t1", vec![json_upload(two_message_transcript())])
        .await
        .unwrap();
    let id = created[0].id;
    wait_for_terminal(&coordinator, id, "t1").await;

    assert!(matches!(
        coordinator.results(id, "t2").await.unwrap_err(),
        LifecycleError::NotFound
    ));
    assert!(!coordinator.results(id, "t1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_never_mixes_tenants() {
    let coordinator = coordinator();
    coordinator
        .submit("t1", vec![json_upload(two_message_transcript())])
        .await
        .unwrap();
    coordinator
        .submit(
            "t2",
            vec![
                json_upload(two_message_transcript()),
                json_upload(two_message_transcript()),
            ],
        )
        .await
        .unwrap();

    let t1_uploads = coordinator.list("t1", UploadListQuery::default()).await;
    assert_eq!(t1_uploads.len(), 1);
    assert!(t1_uploads.iter().all(|u| u.tenant_id == "t1"));

    let t2_uploads = coordinator.list("t2", UploadListQuery::default()).await;
    assert_eq!(t2_uploads.len(), 2);
    assert!(t2_uploads.iter().all(|u| u.tenant_id == "t2"));

    assert!(coordinator
        .list("t3", UploadListQuery::default())
        .await
        .is_empty());
}

#[tokio::test]
async fn test_cross_tenant_delete_is_rejected_and_leaves_upload_intact() {
    let coordinator = coordinator();
    let created = coordinator
        .submit("t1", vec![json_upload(two_message_transcript())])
        .await
        .unwrap();
    let id = created[0].id;

    let err = coordinator.cancel_or_delete(id, "t2").await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotFound));

    // Upload keeps processing for its owner as if nothing happened.
    let terminal = wait_for_terminal(&coordinator, id, "t1").await;
    assert_eq!(terminal.status, UploadStatus::Completed);
}

#[tokio::test]
async fn test_summary_only_counts_own_tenant() {
    let coordinator = coordinator();
    let t1 = coordinator
        .submit("t1", vec![json_upload(two_message_transcript())])
        .await
        .unwrap();
    let t2 = coordinator
        .submit(
            "t2",
            vec![
                json_upload(two_message_transcript()),
                json_upload(two_message_transcript()),
            ],
        )
        .await
        .unwrap();
    for record in t1.iter().chain(t2.iter()) {
        wait_for_terminal(&coordinator, record.id, &record.tenant_id).await;
    }

    assert_eq!(coordinator.summary("t1").await.total_uploads, 1);
    assert_eq!(coordinator.summary("t2").await.total_uploads, 2);
    assert_eq!(coordinator.summary("t3").await.total_uploads, 0);
}
