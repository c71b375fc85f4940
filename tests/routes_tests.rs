//! 主站路由集成测试

mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;

use common::{Client, init_app, setup};

// =============================================================================
// 访问控制
// =============================================================================

#[actix_web::test]
async fn test_public_routes_ok() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    for route in [
        "/",
        "/index",
        "/browse",
        "/find",
        "/about",
        "/privacy",
        "/tutorial",
        "/label",
        "/tagger_find",
        "/submit",
        "/submit/department/1",
        "/department/1",
        "/officer/3",
        "/auth/login",
        "/auth/register",
        "/auth/reset",
        "/complaint?officer_star=1901&officer_first_name=HUGH&officer_last_name=BUTZ&officer_middle_initial=J&officer_image=static/images/test_cop2.png",
    ] {
        let (status, _) = client.get_raw(route).await;
        assert_eq!(status, StatusCode::OK, "GET {}", route);
    }
}

#[actix_web::test]
async fn test_login_required_routes_redirect() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    for route in [
        "/auth/unconfirmed",
        "/sort/department/1",
        "/cop_face/",
        "/cop_face/department/1",
        "/image/1",
        "/image/tagged/1",
        "/tag/1",
        "/leaderboard",
        "/department/new",
        "/officer/new",
        "/unit/new",
        "/user/test_user",
        "/auth/logout",
        "/auth/confirm/abcd1234",
        "/auth/confirm",
        "/auth/change-password",
        "/auth/change-email",
        "/auth/change-email/abcd1234",
    ] {
        let (status, _) = client.get_raw(route).await;
        assert_eq!(status, StatusCode::FOUND, "GET {}", route);
    }

    let (_, location) = client.get_raw("/officer/new").await;
    assert_eq!(location.as_deref(), Some("/auth/login?next=%2Fofficer%2Fnew"));
}

#[actix_web::test]
async fn test_post_only_routes_reject_get() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    for route in [
        "/officer/3/assignment/new",
        "/tag/delete/1",
        "/image/classify/1/1",
        "/user/toggle/1",
        "/upload/department/1",
        "/tagger_gallery",
    ] {
        let (status, _) = client.get_raw(route).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "GET {}", route);
    }
}

#[actix_web::test]
async fn test_unknown_pages_are_404() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    assert_eq!(client.get("/officer/9999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/no/such/page").await.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unconfirmed_user_is_sent_to_unconfirmed_page() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client
        .login(common::UNCONFIRMED_EMAIL, common::UNCONFIRMED_PASSWORD)
        .await;

    let (status, location) = client.get_raw("/leaderboard").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/auth/unconfirmed"));

    let page = client.get("/auth/unconfirmed").await;
    assert!(page.contains("Please Confirm Your Account"));
}

#[actix_web::test]
async fn test_cross_origin_post_rejected() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let (status, _, _) = client
        .send(
            TestRequest::post()
                .uri("/department/new")
                .insert_header(("Origin", "https://evil.example"))
                .set_form([("name", "Evil PD"), ("short_name", "EPD")]),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        ctx.storage()
            .find_department_by_name("Evil PD")
            .await
            .unwrap()
            .is_none()
    );
}

// =============================================================================
// 搜索
// =============================================================================

#[actix_web::test]
async fn test_find_redirects_to_filtered_list() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    let (status, location) = client
        .post_raw(
            "/find",
            &[
                ("dept", "1"),
                ("name", "BUTZ"),
                ("rank", "Not Sure"),
                ("race", "Not Sure"),
                ("gender", "Not Sure"),
                ("min_age", "16"),
                ("max_age", "85"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::FOUND);
    let location = location.unwrap();
    assert!(location.starts_with("/department/1?"), "{}", location);

    let page = client.get(&location).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("Springfield Police Department Officers"));
    assert!(page.contains("BUTZ"));
    assert!(!page.contains("KOWALSKI"));
}

#[actix_web::test]
async fn test_find_invalid_form_rerenders() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    let page = client.post("/find", &[("dept", "1"), ("min_age", "5")]).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("Find an Officer"));
}

#[actix_web::test]
async fn test_tagger_find_leads_to_gallery() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    let (status, location) = client
        .post_raw("/tagger_find", &[("name", "KOWALSKI"), ("dept", "1")])
        .await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/tagger_gallery"));

    let page = client
        .post("/tagger_find", &[("name", "KOWALSKI"), ("dept", "1")])
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.path, "/tagger_gallery");
    assert!(page.contains("OpenOversight ID: <strong>3</strong>"));
}

#[actix_web::test]
async fn test_tagger_gallery_invalid_goes_back() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    let (status, location) = client
        .post_raw("/tagger_gallery", &[("badge", "not a badge!")])
        .await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/tagger_find"));
}

#[actix_web::test]
async fn test_department_list_odd_page_numbers() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    // 超出最后一页：空表格，总数不变
    let page = client.get("/department/1?page=1000000000000000000").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("6 officers found."));
    assert!(!page.contains("BUTZ"));

    for route in ["/department/1?page=0", "/department/1?page=abc"] {
        let page = client.get(route).await;
        assert_eq!(page.status, StatusCode::OK, "GET {}", route);
        assert!(page.contains("BUTZ"), "GET {}", route);
        assert!(page.contains("Page 1 of 1"), "GET {}", route);
    }
}

#[actix_web::test]
async fn test_department_list_extreme_ages() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    for route in [
        "/department/1?min_age=-2147483648",
        "/department/1?max_age=2147483647",
        "/department/1?min_age=-2147483648&max_age=2147483647",
    ] {
        let page = client.get(route).await;
        assert_eq!(page.status, StatusCode::OK, "GET {}", route);
        assert!(page.contains("6 officers found."), "GET {}", route);
    }

    let page = client.get("/department/1?min_age=80&max_age=20").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("0 officers found."));
    assert!(!page.contains("BUTZ"));
}

#[actix_web::test]
async fn test_department_list_wildcards_are_literal() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    for route in ["/department/1?name=_", "/department/1?name=%25", "/department/1?badge=_"] {
        let page = client.get(route).await;
        assert_eq!(page.status, StatusCode::OK, "GET {}", route);
        assert!(page.contains("0 officers found."), "GET {}", route);
    }
}

// =============================================================================
// 部门与单位
// =============================================================================

#[actix_web::test]
async fn test_admin_adds_department() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let page = client
        .post("/department/new", &[("name", "Test Police Department"), ("short_name", "TPD")])
        .await;
    assert!(page.contains("New department Test Police Department added!"));
    assert!(
        ctx.storage()
            .find_department_by_name("Test Police Department")
            .await
            .unwrap()
            .is_some()
    );

    let page = client
        .post("/department/new", &[("name", "Test Police Department"), ("short_name", "TPD")])
        .await;
    assert!(page.contains("Department Test Police Department already exists"));
}

#[actix_web::test]
async fn test_non_admin_cannot_add_department() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_ac().await;

    let page = client
        .post("/department/new", &[("name", "AC PD"), ("short_name", "ACPD")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_ac_adds_unit_only_in_own_department() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_ac().await;

    let page = client
        .post("/unit/new", &[("descrip", "Canine"), ("department", "1")])
        .await;
    assert!(page.contains("New unit Canine added!"));

    let page = client
        .post("/unit/new", &[("descrip", "Canine"), ("department", "2")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

// =============================================================================
// 警员
// =============================================================================

#[actix_web::test]
async fn test_admin_adds_officer() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let page = client
        .post(
            "/officer/new",
            &[
                ("first_name", "Test"),
                ("last_name", "McTesterson"),
                ("middle_initial", "T"),
                ("race", "WHITE"),
                ("gender", "M"),
                ("star_no", "666"),
                ("rank", "COMMANDER"),
                ("department", "1"),
                ("birth_year", "1990"),
            ],
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("New Officer McTesterson added!"));
    assert!(page.contains("McTesterson"));

    let officer_id = page.path.trim_start_matches("/officer/").to_string();
    assert!(page.contains(&format!("<td>{}</td>", officer_id)));
}

#[actix_web::test]
async fn test_ac_cannot_add_officer_in_other_department() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_ac().await;

    let page = client
        .post(
            "/officer/new",
            &[("last_name", "Outsider"), ("department", "2")],
        )
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);

    let page = client
        .post(
            "/officer/new",
            &[("last_name", "Insider"), ("department", "1")],
        )
        .await;
    assert!(page.contains("New Officer Insider added!"));
}

#[actix_web::test]
async fn test_admin_edits_officer() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let page = client
        .post(
            "/officer/1/edit",
            &[("first_name", "HUGH"), ("last_name", "Changed"), ("department", "1")],
        )
        .await;
    assert!(page.contains("Officer Changed edited"));
    assert!(!page.contains("BUTZ"));

    let officer = ctx.storage().get_officer(1).await.unwrap().unwrap();
    assert_eq!(officer.last_name, "Changed");
    assert_eq!(officer.middle_initial, "J");
}

#[actix_web::test]
async fn test_ac_cannot_edit_officer_in_other_department() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_ac().await;

    // officer 2 belongs to department 2
    let page = client
        .post("/officer/2/edit", &[("last_name", "Hijacked")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
    let officer = ctx.storage().get_officer(2).await.unwrap().unwrap();
    assert_eq!(officer.last_name, "ALVAREZ");

    // moving an own officer elsewhere is also refused
    let page = client
        .post("/officer/1/edit", &[("department", "2")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_only_section_visibility() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    let page = client.get("/officer/3").await;
    assert!(page.contains("Officer Detail"));
    assert!(page.contains("OpenOversight ID"));
    assert!(!page.contains("Admin only"));

    client.login_ac().await;
    assert!(client.get("/officer/3").await.contains("Admin only"));
    assert!(!client.get("/officer/2").await.contains("Admin only"));
}

#[actix_web::test]
async fn test_officer_profile_post_behaves_as_get() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let page = client
        .post("/officer/3", &[("star_no", "1234"), ("rank", "COMMANDER")])
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("Officer Detail"));
    assert_eq!(
        ctx.storage().assignments_for_officer(3).await.unwrap().len(),
        1
    );
}

#[actix_web::test]
async fn test_add_and_edit_assignment() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let page = client
        .post(
            "/officer/3/assignment/new",
            &[("star_no", "1234"), ("rank", "COMMANDER"), ("star_date", "2019-04-01")],
        )
        .await;
    assert!(page.contains("Added new assignment!"));
    let assignments = ctx.storage().assignments_for_officer(3).await.unwrap();
    assert_eq!(assignments.len(), 2);
    let added = assignments.last().unwrap();
    assert_eq!(added.star_no.as_deref(), Some("1234"));

    let page = client
        .post(
            &format!("/officer/3/assignment/{}", added.id),
            &[("star_no", "12345")],
        )
        .await;
    assert!(page.contains("Edited officer assignment"));
    let edited = ctx.storage().get_assignment(added.id).await.unwrap().unwrap();
    assert_eq!(edited.star_no.as_deref(), Some("12345"));
    assert_eq!(edited.rank.as_deref(), Some("COMMANDER"));
}

#[actix_web::test]
async fn test_ac_cannot_touch_assignments_outside_department() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_ac().await;

    let page = client
        .post("/officer/2/assignment/new", &[("star_no", "1")])
        .await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);

    let page = client.post("/officer/2/assignment/2", &[("star_no", "1")]).await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);

    // an assignment of another officer is not found under this officer
    let page = client.get("/officer/1/assignment/3").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// 图片分拣与标注
// =============================================================================

#[actix_web::test]
async fn test_sort_and_classify() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let page = client.get("/sort/department/1").await;
    assert!(page.contains("Do you see police officers in the photo"));

    let page = client.post("/image/classify/3/1", &[]).await;
    assert_eq!(page.path, "/sort/department/1");
    assert!(page.contains("Updated image classification"));
    let image = ctx.storage().get_image(3).await.unwrap().unwrap();
    assert_eq!(image.contains_cops, Some(true));

    client.post("/image/classify/4/0", &[]).await;
    let page = client.get("/sort/department/1").await;
    assert!(page.contains("All images have been sorted!"));
}

#[actix_web::test]
async fn test_add_tag() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let tag = |officer: &'static str, image: &'static str| {
        [
            ("officer_id", officer),
            ("image_id", image),
            ("dataX", "34"),
            ("dataY", "32"),
            ("dataWidth", "3"),
            ("dataHeight", "33"),
        ]
    };

    let page = client.post("/cop_face/image/1", &tag("1", "1")).await;
    assert!(page.contains("Tag added to database"));
    assert!(ctx.storage().find_face(1, 1).await.unwrap().is_some());

    // face 1 already links officer 3 and image 2
    let page = client.post("/cop_face/image/2", &tag("3", "2")).await;
    assert!(page.contains("Tag already exists between this officer and image! Tag not added."));

    let page = client
        .post("/cop_face/image/1", &tag("999999999999999999", "1"))
        .await;
    assert!(page.contains("Invalid officer ID. Please select a valid OpenOversight ID!"));

    let page = client.post("/cop_face/image/1", &tag("4242", "1")).await;
    assert!(page.contains("Invalid officer ID"));
}

#[actix_web::test]
async fn test_tag_path_image_wins_over_form() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let page = client
        .post(
            "/cop_face/department/1/image/1",
            &[
                ("officer_id", "7"),
                ("image_id", "2"),
                ("dataX", "1"),
                ("dataY", "1"),
                ("dataWidth", "10"),
                ("dataHeight", "10"),
            ],
        )
        .await;
    assert!(page.contains("Tag added to database"));
    assert_eq!(page.path, "/cop_face/department/1/image/1");
    assert!(ctx.storage().find_face(7, 1).await.unwrap().is_some());
    assert!(ctx.storage().find_face(7, 2).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_complete_tagging() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let page = client.get("/image/tagged/6?department_id=2").await;
    assert_eq!(page.path, "/cop_face/department/2");
    assert!(page.contains("Marked image as completed."));
    assert!(page.contains("Shelbyville Police Department"));
    assert!(ctx.storage().get_image(6).await.unwrap().unwrap().is_tagged);

    let page = client.get("/image/tagged/4").await;
    assert_eq!(page.path, "/cop_face/");
    assert!(page.contains("Marked image as completed."));
}

#[actix_web::test]
async fn test_tag_and_image_detail_pages() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let page = client.get("/tag/1").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains("Tag"));
    assert!(!page.contains("Delete tag"));

    let page = client.get("/image/2").await;
    assert!(page.contains("Image ID"));
    assert!(page.contains("/tag/1"));
}

#[actix_web::test]
async fn test_delete_tag_permissions() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    // face 2 shows officer 2 of department 2
    client.login_ac().await;
    let page = client.post("/tag/delete/2", &[]).await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
    assert!(ctx.storage().get_face(2).await.unwrap().is_some());

    client.logout().await;
    client.login_admin().await;
    let page = client.post("/tag/delete/2", &[]).await;
    assert!(page.contains("Deleted this tag"));
    assert!(ctx.storage().get_face(2).await.unwrap().is_none());
}

// =============================================================================
// 用户与排行榜
// =============================================================================

#[actix_web::test]
async fn test_profile_admin_fields() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    client.login_user().await;
    let page = client.get("/user/test_user").await;
    assert!(page.contains("test_user"));
    assert!(!page.contains("User Email"));
    assert!(!page.contains("Toggle (Disable/Enable) User"));

    client.logout().await;
    client.login_admin().await;
    let page = client.get("/user/test_user").await;
    assert!(page.contains("User Email"));
    assert!(page.contains("Toggle (Disable/Enable) User"));
}

#[actix_web::test]
async fn test_admin_toggles_user() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_admin().await;

    let page = client.post("/user/toggle/1", &[]).await;
    assert_eq!(page.path, "/user/test_user");
    assert!(page.contains("Disabled"));
    assert!(ctx.storage().get_user(1).await.unwrap().unwrap().is_disabled);

    let page = client.post("/user/toggle/1", &[]).await;
    assert!(page.contains("Active"));
}

#[actix_web::test]
async fn test_non_admin_cannot_toggle() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_ac().await;

    let page = client.post("/user/toggle/1", &[]).await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_leaderboard() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let page = client.get("/leaderboard").await;
    assert!(page.contains("Top Users by Number of Images Sorted"));
    assert!(page.contains("Top Users by Number of Images Tagged"));
    assert!(page.contains("test_user"));
}

// =============================================================================
// 上传
// =============================================================================

fn multipart(filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----openoversight-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}

#[actix_web::test]
async fn test_upload_image() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let (content_type, body) = multipart("cop.png", b"\x89PNG fake image bytes");
    let (status, _, json) = client
        .send(
            TestRequest::post()
                .uri("/upload/department/1")
                .insert_header(("Content-Type", content_type.clone()))
                .set_payload(body.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["duplicate"], false);
    let image_id = value["image_id"].as_i64().unwrap() as i32;

    let image = ctx.storage().get_image(image_id).await.unwrap().unwrap();
    assert_eq!(image.department_id, 1);
    let (status, _) = client.get_raw(&format!("/uploads/{}", image.filepath)).await;
    assert_eq!(status, StatusCode::OK);

    // 相同内容再次上传视为重复
    let (_, _, json) = client
        .send(
            TestRequest::post()
                .uri("/upload/department/1")
                .insert_header(("Content-Type", content_type))
                .set_payload(body),
        )
        .await;
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["duplicate"], true);
    assert_eq!(value["image_id"].as_i64().unwrap() as i32, image_id);
}

#[actix_web::test]
async fn test_upload_rejects_bad_files() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let (content_type, body) = multipart("notes.txt", b"hello");
    let (status, _, _) = client
        .send(
            TestRequest::post()
                .uri("/upload/department/1")
                .insert_header(("Content-Type", content_type))
                .set_payload(body),
        )
        .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let big = vec![0u8; 1024 * 1024 + 1];
    let (content_type, body) = multipart("big.jpg", &big);
    let (status, _, _) = client
        .send(
            TestRequest::post()
                .uri("/upload/department/1")
                .insert_header(("Content-Type", content_type))
                .set_payload(body),
        )
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn test_static_assets_served() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);

    let (status, _) = client.get_raw("/static/css/openoversight.css").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = client.get_raw("/static/css/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = client.get_raw("/uploads/..secret").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_seeded_images_are_served() {
    let ctx = setup().await;
    let mut client = Client::new(init_app(&ctx).await);
    client.login_user().await;

    let page = client.get("/image/1").await;
    assert!(page.contains("/static/images/test_cop1.png"));
    for n in 1..=8 {
        let route = format!("/static/images/test_cop{}.png", n);
        let (status, _) = client.get_raw(&route).await;
        assert_eq!(status, StatusCode::OK, "GET {}", route);
    }
}
