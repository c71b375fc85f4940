//! 存储层集成测试
//!
//! Runs against the seeded SQLite database shared with the route tests.

mod common;

use chrono::{Datelike, Utc};

use common::setup;
use openoversight::errors::OversightError;
use openoversight::storage::{NewFace, NewImage, OfficerFilter};

#[tokio::test]
async fn test_list_officers_by_department() {
    let ctx = setup().await;
    let filter = OfficerFilter {
        department_id: Some(1),
        ..Default::default()
    };
    let (officers, total) = ctx.storage().list_officers(&filter, 1, 50).await.unwrap();
    assert_eq!(total, 6);
    assert!(officers.iter().all(|o| o.department_id == 1));
}

#[tokio::test]
async fn test_list_officers_name_is_case_insensitive_substring() {
    let ctx = setup().await;
    let filter = OfficerFilter {
        name: Some("butz".to_string()),
        ..Default::default()
    };
    let (officers, total) = ctx.storage().list_officers(&filter, 1, 50).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(officers[0].last_name, "BUTZ");
}

#[tokio::test]
async fn test_list_officers_demographic_filters() {
    let ctx = setup().await;
    let storage = ctx.storage();

    let by_race = OfficerFilter {
        race: Some("BLACK".to_string()),
        ..Default::default()
    };
    let (officers, total) = storage.list_officers(&by_race, 1, 50).await.unwrap();
    assert_eq!(total, 3);
    assert!(officers.iter().all(|o| o.race.as_deref() == Some("BLACK")));

    let by_gender = OfficerFilter {
        department_id: Some(1),
        gender: Some("F".to_string()),
        ..Default::default()
    };
    let (_, total) = storage.list_officers(&by_gender, 1, 50).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_list_officers_age_range() {
    let ctx = setup().await;
    // 出生年份 >= 1980 的只有最后两名警员
    let filter = OfficerFilter {
        max_age: Some(Utc::now().year() - 1980),
        ..Default::default()
    };
    let (officers, total) = ctx.storage().list_officers(&filter, 1, 50).await.unwrap();
    assert_eq!(total, 2);
    let mut ids: Vec<i32> = officers.iter().map(|o| o.id).collect();
    ids.sort();
    assert_eq!(ids, vec![11, 12]);
}

#[tokio::test]
async fn test_list_officers_assignment_filters() {
    let ctx = setup().await;
    let storage = ctx.storage();

    let by_badge = OfficerFilter {
        badge: Some("191".to_string()),
        ..Default::default()
    };
    let (_, total) = storage.list_officers(&by_badge, 1, 50).await.unwrap();
    assert_eq!(total, 3);

    let by_rank = OfficerFilter {
        rank: Some("PO".to_string()),
        ..Default::default()
    };
    let (_, total) = storage.list_officers(&by_rank, 1, 50).await.unwrap();
    assert_eq!(total, 12);

    // Traffic 单位没有人
    let by_unit = OfficerFilter {
        unit_id: Some(2),
        ..Default::default()
    };
    let (officers, total) = storage.list_officers(&by_unit, 1, 50).await.unwrap();
    assert_eq!(total, 0);
    assert!(officers.is_empty());
}

#[tokio::test]
async fn test_list_officers_pagination_and_order() {
    let ctx = setup().await;
    let storage = ctx.storage();
    let filter = OfficerFilter::default();

    let (first, total) = storage.list_officers(&filter, 1, 5).await.unwrap();
    assert_eq!(total, 12);
    assert_eq!(first.len(), 5);
    assert_eq!(first[0].last_name, "ALVAREZ");

    let (last, _) = storage.list_officers(&filter, 3, 5).await.unwrap();
    assert_eq!(last.len(), 2);

    let (beyond, total) = storage.list_officers(&filter, 9, 5).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 12);
}

#[tokio::test]
async fn test_list_officers_page_far_past_the_end() {
    let ctx = setup().await;
    let storage = ctx.storage();
    let filter = OfficerFilter::default();

    let (officers, total) = storage
        .list_officers(&filter, 1_000_000_000_000_000_000, 20)
        .await
        .unwrap();
    assert!(officers.is_empty());
    assert_eq!(total, 12);

    let (officers, total) = storage.list_officers(&filter, u64::MAX, u64::MAX).await.unwrap();
    assert!(officers.is_empty());
    assert_eq!(total, 12);
}

#[tokio::test]
async fn test_list_officers_overflowing_ages_are_ignored() {
    let ctx = setup().await;
    let filter = OfficerFilter {
        min_age: Some(i32::MIN),
        max_age: Some(i32::MIN),
        ..Default::default()
    };
    let (_, total) = ctx.storage().list_officers(&filter, 1, 50).await.unwrap();
    assert_eq!(total, 12);
}

#[tokio::test]
async fn test_list_officers_wildcards_match_literally() {
    let ctx = setup().await;
    let storage = ctx.storage();

    for term in ["_", "%", "\\"] {
        let by_name = OfficerFilter {
            name: Some(term.to_string()),
            ..Default::default()
        };
        let (_, total) = storage.list_officers(&by_name, 1, 50).await.unwrap();
        assert_eq!(total, 0, "name {:?}", term);

        let by_badge = OfficerFilter {
            badge: Some(term.to_string()),
            ..Default::default()
        };
        let (_, total) = storage.list_officers(&by_badge, 1, 50).await.unwrap();
        assert_eq!(total, 0, "badge {:?}", term);
    }

    // 普通子串不受影响
    let by_badge = OfficerFilter {
        badge: Some("1912".to_string()),
        ..Default::default()
    };
    let (officers, _) = storage.list_officers(&by_badge, 1, 50).await.unwrap();
    assert_eq!(officers.len(), 1);
    assert_eq!(officers[0].last_name, "HOLLOWAY");
}

#[tokio::test]
async fn test_create_image_dedupes_within_department() {
    let ctx = setup().await;
    let storage = ctx.storage();
    let new_image = |department_id| NewImage {
        filepath: "uploads/abc.png".to_string(),
        hash_img: "feedface".to_string(),
        department_id,
        user_id: Some(1),
        date_image_taken: None,
    };

    let (first, created) = storage.create_image(new_image(1)).await.unwrap();
    assert!(created);
    let (again, created) = storage.create_image(new_image(1)).await.unwrap();
    assert!(!created);
    assert_eq!(again.id, first.id);

    let (other, created) = storage.create_image(new_image(2)).await.unwrap();
    assert!(created);
    assert_ne!(other.id, first.id);
}

#[tokio::test]
async fn test_sorting_queue_advances() {
    let ctx = setup().await;
    let storage = ctx.storage();

    let next = storage.next_unsorted_image(1).await.unwrap().unwrap();
    assert_eq!(next.id, 3);
    storage.classify_image(3, false, 1).await.unwrap();
    let next = storage.next_unsorted_image(1).await.unwrap().unwrap();
    assert_eq!(next.id, 4);
    storage.classify_image(4, true, 1).await.unwrap();
    assert!(storage.next_unsorted_image(1).await.unwrap().is_none());

    let err = storage.classify_image(99, true, 1).await.unwrap_err();
    assert!(matches!(err, OversightError::NotFound(_)));
}

#[tokio::test]
async fn test_tagging_queue_skips_completed_images() {
    let ctx = setup().await;
    let storage = ctx.storage();

    let next = storage.next_untagged_image(None).await.unwrap().unwrap();
    assert_eq!(next.id, 1);
    storage.mark_image_tagged(1).await.unwrap();
    let next = storage.next_untagged_image(None).await.unwrap().unwrap();
    assert_eq!(next.id, 2);

    let next = storage.next_untagged_image(Some(2)).await.unwrap().unwrap();
    assert_eq!(next.id, 5);
}

#[tokio::test]
async fn test_faces_and_delete() {
    let ctx = setup().await;
    let storage = ctx.storage();

    assert!(storage.find_face(3, 2).await.unwrap().is_some());
    assert!(storage.find_face(3, 5).await.unwrap().is_none());

    let face = storage
        .create_face(NewFace {
            officer_id: 3,
            img_id: 1,
            original_image_id: Some(1),
            face_position_x: 0,
            face_position_y: 0,
            face_width: 10,
            face_height: 10,
            user_id: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(storage.faces_for_officer(3).await.unwrap().len(), 2);

    storage.delete_face(face.id).await.unwrap();
    assert!(storage.get_face(face.id).await.unwrap().is_none());
    let err = storage.delete_face(face.id).await.unwrap_err();
    assert!(matches!(err, OversightError::NotFound(_)));
}

#[tokio::test]
async fn test_leaderboards() {
    let ctx = setup().await;
    let storage = ctx.storage();

    let sorters = storage.top_sorters(10).await.unwrap();
    assert_eq!(sorters.len(), 2);
    assert_eq!(sorters[0].user.username, "test_user");
    assert_eq!(sorters[0].count, 2);
    assert_eq!(sorters[1].user.username, "testadmin");

    let taggers = storage.top_taggers(10).await.unwrap();
    assert_eq!(taggers.len(), 1);
    assert_eq!(taggers[0].user.username, "test_user");
    assert_eq!(taggers[0].count, 3);

    assert_eq!(storage.top_sorters(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_department_is_rejected() {
    let ctx = setup().await;
    let err = ctx
        .storage()
        .create_department("Springfield Police Department", "SPD2")
        .await
        .unwrap_err();
    assert!(matches!(err, OversightError::Validation(_)));
    assert_eq!(ctx.storage().list_departments().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_emails_are_stored_lowercase() {
    let ctx = setup().await;
    let user = ctx
        .storage()
        .find_user_by_email("JEN@example.org")
        .await
        .unwrap();
    // 查询时同样做规范化
    assert!(user.is_some());
}
