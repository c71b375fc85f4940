//! 主站路由
//!
//! Each path is a single resource so unsupported methods answer 405.
//! Numeric segments are constrained so `/officer/new` never reaches the
//! profile handler.

use actix_web::web;

use super::departments::{
    list_officers, new_department, new_department_page, new_unit, new_unit_page,
};
use super::find::{find, find_page, tagger_find, tagger_find_page, tagger_gallery};
use super::images::{
    classify, complete_tagging, display_submission, sort_images, submit, submit_department,
    upload,
};
use super::officers::{
    add_assignment, edit_assignment, edit_assignment_page, edit_officer, edit_officer_page,
    new_officer, new_officer_page, officer_profile,
};
use super::pages::{about, browse, complaint, index, label, privacy, tutorial};
use super::tags::{
    delete_tag, display_tag, label_any, label_department, label_department_image, label_image,
    tag_department_image, tag_image,
};
use super::users::{leaderboard, profile, toggle_user};

pub fn main_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/index").route(web::get().to(index)))
        .service(web::resource("/browse").route(web::get().to(browse)))
        .service(web::resource("/about").route(web::get().to(about)))
        .service(web::resource("/privacy").route(web::get().to(privacy)))
        .service(web::resource("/tutorial").route(web::get().to(tutorial)))
        .service(web::resource("/label").route(web::get().to(label)))
        .service(web::resource("/complaint").route(web::get().to(complaint)))
        .service(
            web::resource("/find")
                .route(web::get().to(find_page))
                .route(web::post().to(find)),
        )
        .service(
            web::resource("/tagger_find")
                .route(web::get().to(tagger_find_page))
                .route(web::post().to(tagger_find)),
        )
        .service(web::resource("/tagger_gallery").route(web::post().to(tagger_gallery)))
        // departments and units
        .service(
            web::resource("/department/new")
                .route(web::get().to(new_department_page))
                .route(web::post().to(new_department)),
        )
        .service(web::resource("/department/{id:\\d+}").route(web::get().to(list_officers)))
        .service(
            web::resource("/unit/new")
                .route(web::get().to(new_unit_page))
                .route(web::post().to(new_unit)),
        )
        // officers
        .service(
            web::resource("/officer/new")
                .route(web::get().to(new_officer_page))
                .route(web::post().to(new_officer)),
        )
        .service(
            web::resource("/officer/{id:\\d+}")
                .route(web::get().to(officer_profile))
                .route(web::post().to(officer_profile)),
        )
        .service(
            web::resource("/officer/{id:\\d+}/edit")
                .route(web::get().to(edit_officer_page))
                .route(web::post().to(edit_officer)),
        )
        .service(
            web::resource("/officer/{id:\\d+}/assignment/new")
                .route(web::post().to(add_assignment)),
        )
        .service(
            web::resource("/officer/{id:\\d+}/assignment/{assignment_id:\\d+}")
                .route(web::get().to(edit_assignment_page))
                .route(web::post().to(edit_assignment)),
        )
        // image submission and sorting
        .service(web::resource("/submit").route(web::get().to(submit)))
        .service(
            web::resource("/submit/department/{id:\\d+}").route(web::get().to(submit_department)),
        )
        .service(web::resource("/upload/department/{id:\\d+}").route(web::post().to(upload)))
        .service(web::resource("/sort/department/{id:\\d+}").route(web::get().to(sort_images)))
        .service(
            web::resource("/image/classify/{image_id:\\d+}/{contains_cops:[01]}")
                .route(web::post().to(classify)),
        )
        .service(web::resource("/image/{id:\\d+}").route(web::get().to(display_submission)))
        .service(
            web::resource("/image/tagged/{id:\\d+}").route(web::get().to(complete_tagging)),
        )
        // tagging
        .service(web::resource(["/cop_face", "/cop_face/"]).route(web::get().to(label_any)))
        .service(
            web::resource("/cop_face/department/{id:\\d+}")
                .route(web::get().to(label_department)),
        )
        .service(
            web::resource("/cop_face/image/{image_id:\\d+}")
                .route(web::get().to(label_image))
                .route(web::post().to(tag_image)),
        )
        .service(
            web::resource("/cop_face/department/{id:\\d+}/image/{image_id:\\d+}")
                .route(web::get().to(label_department_image))
                .route(web::post().to(tag_department_image)),
        )
        .service(web::resource("/tag/{id:\\d+}").route(web::get().to(display_tag)))
        .service(web::resource("/tag/delete/{id:\\d+}").route(web::post().to(delete_tag)))
        // users
        .service(web::resource("/leaderboard").route(web::get().to(leaderboard)))
        .service(web::resource("/user/toggle/{id:\\d+}").route(web::post().to(toggle_user)))
        .service(web::resource("/user/{username}").route(web::get().to(profile)));
}
