//! Face tagging

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, info};

use migration::entities::image;

use crate::api::extractors::CurrentUser;
use crate::api::flash::{self, FlashMessage};
use crate::api::forms::main::FaceTagForm;
use crate::api::permissions::require_department;
use crate::api::services::helpers::{
    department_or_404, face_or_404, image_or_404, image_tag, officer_or_404,
};
use crate::api::state::AppState;
use crate::api::views::html::{self, escape, link};
use crate::api::views::{Page, render};
use crate::errors::Result;
use crate::storage::NewFace;

/// Where the tagging page for an image lives
fn tagging_path(department_id: Option<i32>, image_id: i32) -> String {
    match department_id {
        Some(dept) => format!("/cop_face/department/{}/image/{}", dept, image_id),
        None => format!("/cop_face/image/{}", image_id),
    }
}

fn tag_form(department_id: Option<i32>, image: &image::Model) -> String {
    let mut fields = html::text_input("officer_id", "OpenOversight ID", "", &[]);
    fields.push_str(&html::hidden("image_id", &image.id.to_string()));
    fields.push_str(&html::input("number", "dataX", "Left", "", &[]));
    fields.push_str(&html::input("number", "dataY", "Top", "", &[]));
    fields.push_str(&html::input("number", "dataWidth", "Width", "", &[]));
    fields.push_str(&html::input("number", "dataHeight", "Height", "", &[]));
    html::form(&tagging_path(department_id, image.id), &fields, "Add identified face")
}

async fn tagging_page(
    req: &HttpRequest,
    user: &CurrentUser,
    state: &AppState,
    department_id: Option<i32>,
    image_id: Option<i32>,
) -> Result<HttpResponse> {
    // 未指定部门时使用用户的默认部门
    let department_id = department_id.or(user.dept_pref);
    let department = match department_id {
        Some(id) => Some(department_or_404(state, id).await?),
        None => None,
    };

    let image = match image_id {
        Some(id) => Some(image_or_404(state, id).await?),
        None => {
            state
                .storage
                .next_untagged_image(department.as_ref().map(|d| d.id))
                .await?
        }
    };

    let heading = match &department {
        Some(d) => format!("<h1>Tag faces: {}</h1>", escape(&d.name)),
        None => "<h1>Tag faces</h1>".to_string(),
    };

    let content = match image {
        Some(image) => {
            let done = match department_id {
                Some(dept) => format!("/image/tagged/{}?department_id={}", image.id, dept),
                None => format!("/image/tagged/{}", image.id),
            };
            format!(
                "<p>Draw a box around each face and enter the officer's OpenOversight ID. \
                 Look the ID up with {}.</p>{}{}<p>{}</p>",
                link("/tagger_find", "the officer finder"),
                image_tag(&image, "Image to tag"),
                tag_form(department_id, &image),
                link(&done, "All officers have been identified in this image")
            )
        }
        None => "<p>All images have been tagged!</p>".to_string(),
    };

    Ok(render(
        req,
        &user.viewer(),
        Page::new("Identify Officers", format!("{}{}", heading, content)),
    ))
}

pub async fn label_any(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    tagging_page(&req, &user, &state, None, None).await
}

pub async fn label_department(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    tagging_page(&req, &user, &state, Some(path.into_inner()), None).await
}

pub async fn label_image(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    tagging_page(&req, &user, &state, None, Some(path.into_inner())).await
}

pub async fn label_department_image(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    let (dept, image_id) = path.into_inner();
    tagging_page(&req, &user, &state, Some(dept), Some(image_id)).await
}

async fn add_tag(
    req: &HttpRequest,
    user: &CurrentUser,
    state: &AppState,
    department_id: Option<i32>,
    image_id: i32,
    form: &FaceTagForm,
) -> Result<HttpResponse> {
    let image = image_or_404(state, image_id).await?;
    let back = tagging_path(department_id, image.id);

    let tag = match form.validate() {
        Ok(tag) => tag,
        Err(errors) => {
            debug!("Rejected face tag: {:?}", errors);
            return Ok(flash::redirect(
                req,
                &back,
                vec![FlashMessage::danger("Invalid tag data. Please draw a box around the face.")],
            ));
        }
    };

    let officer = match i32::try_from(tag.officer_id) {
        Ok(id) => state.storage.get_officer(id).await?,
        Err(_) => None,
    };
    let Some(officer) = officer else {
        return Ok(flash::redirect(
            req,
            &back,
            vec![FlashMessage::danger(
                "Invalid officer ID. Please select a valid OpenOversight ID!",
            )],
        ));
    };

    if state.storage.find_face(officer.id, image.id).await?.is_some() {
        return Ok(flash::redirect(
            req,
            &back,
            vec![FlashMessage::warning(
                "Tag already exists between this officer and image! Tag not added.",
            )],
        ));
    }

    let face = state
        .storage
        .create_face(NewFace {
            officer_id: officer.id,
            img_id: image.id,
            original_image_id: Some(image.id),
            face_position_x: tag.x,
            face_position_y: tag.y,
            face_width: tag.width,
            face_height: tag.height,
            user_id: Some(user.id()),
        })
        .await?;
    info!("User {} added tag {}", user.username, face.id);

    Ok(flash::redirect(
        req,
        &back,
        vec![FlashMessage::success("Tag added to database")],
    ))
}

/// The image in the path wins over the one in the form
pub async fn tag_image(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<FaceTagForm>,
) -> Result<HttpResponse> {
    add_tag(&req, &user, &state, None, path.into_inner(), &form).await
}

pub async fn tag_department_image(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    form: web::Form<FaceTagForm>,
) -> Result<HttpResponse> {
    let (dept, image_id) = path.into_inner();
    add_tag(&req, &user, &state, Some(dept), image_id, &form).await
}

pub async fn display_tag(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let face = face_or_404(&state, path.into_inner()).await?;
    let officer = officer_or_404(&state, face.officer_id).await?;
    let image = image_or_404(&state, face.img_id).await?;

    let details = html::table(
        &["Field", "Value"],
        &[
            vec!["Tag ID".into(), face.id.to_string()],
            vec![
                "Officer".into(),
                link(&format!("/officer/{}", officer.id), &officer.full_name()),
            ],
            vec![
                "Image".into(),
                link(&format!("/image/{}", image.id), &image.id.to_string()),
            ],
            vec![
                "Position".into(),
                format!(
                    "x={} y={} width={} height={}",
                    face.face_position_x, face.face_position_y, face.face_width, face.face_height
                ),
            ],
        ],
    );
    let mut body = format!(
        "<h1>Tag {}</h1>{}{}",
        face.id,
        image_tag(&image, &officer.full_name()),
        details
    );
    if user.viewer().can_manage(officer.department_id) {
        body.push_str(&html::button_form(
            &format!("/tag/delete/{}", face.id),
            "Delete tag",
        ));
    }
    Ok(render(&req, &user.viewer(), Page::new("Tag", body)))
}

/// POST only
pub async fn delete_tag(
    req: HttpRequest,
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let face = face_or_404(&state, path.into_inner()).await?;
    let officer = officer_or_404(&state, face.officer_id).await?;
    require_department(&user, officer.department_id)?;

    state.storage.delete_face(face.id).await?;
    info!("User {} deleted tag {}", user.username, face.id);

    Ok(flash::redirect(
        &req,
        "/index",
        vec![FlashMessage::success("Deleted this tag")],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagging_path() {
        assert_eq!(tagging_path(None, 4), "/cop_face/image/4");
        assert_eq!(tagging_path(Some(2), 4), "/cop_face/department/2/image/4");
    }
}
