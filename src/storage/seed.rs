//! Demo data set
//!
//! Used by the `seed-demo` command and as the fixture of the integration
//! tests. Ids are assigned in insertion order on an empty database:
//!
//! - departments 1 (Springfield, area coordinator department) and 2 (Shelbyville)
//! - officers 1..=12, odd ids in department 1, even ids in department 2
//! - images 1-4 in department 1, 5-8 in department 2; the first two of
//!   each department show officers, the rest are unsorted
//! - tags on images 2, 3 and 5
//! - users `test_user`, `testadmin`, `bee_mason` (unconfirmed), `raq929` (AC)

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use super::SeaOrmStorage;
use super::models::{NewFace, NewImage, NewOfficer, NewUser};
use crate::errors::Result;
use crate::utils::password::PasswordHasher;

/// Department managed by the seeded area coordinator
pub const AC_DEPT: i32 = 1;

const OFFICER_NAMES: [(&str, &str, &str); 12] = [
    ("HUGH", "BUTZ", "J"),
    ("MARIA", "ALVAREZ", ""),
    ("JOHN", "KOWALSKI", "P"),
    ("DENISE", "OKAFOR", "A"),
    ("ROBERT", "NGUYEN", ""),
    ("SARAH", "MCALLISTER", "K"),
    ("JAMES", "WASHINGTON", "T"),
    ("LINDA", "BECKER", ""),
    ("CARLOS", "REYES", "M"),
    ("EMILY", "FITZGERALD", "R"),
    ("MICHAEL", "OSTROWSKI", ""),
    ("PATRICIA", "HOLLOWAY", "L"),
];

const RACES: [&str; 4] = ["WHITE", "BLACK", "HISPANIC", "ASIAN"];
const GENDERS: [&str; 2] = ["M", "F"];

/// Populate an empty database with the demo data set
///
/// Does nothing when departments already exist.
pub async fn seed_demo_data(storage: &SeaOrmStorage, hasher: &PasswordHasher) -> Result<()> {
    if !storage.list_departments().await?.is_empty() {
        warn!("Database already contains departments, skipping demo data");
        return Ok(());
    }

    let springfield = storage
        .create_department("Springfield Police Department", "SPD")
        .await?;
    let shelbyville = storage
        .create_department("Shelbyville Police Department", "ShPD")
        .await?;
    let departments = [springfield.id, shelbyville.id];

    let mut units = Vec::new();
    for (dept, descrip) in [
        (springfield.id, "Patrol"),
        (springfield.id, "Traffic"),
        (shelbyville.id, "Patrol"),
    ] {
        units.push(storage.create_unit(descrip, dept).await?);
    }

    for (i, (first, last, middle)) in OFFICER_NAMES.iter().enumerate() {
        let department_id = departments[i % 2];
        let unit_id = units
            .iter()
            .find(|u| u.department_id == department_id)
            .map(|u| u.id);
        storage
            .create_officer(NewOfficer {
                first_name: first.to_string(),
                last_name: last.to_string(),
                middle_initial: middle.to_string(),
                race: Some(RACES[i % RACES.len()].to_string()),
                gender: Some(GENDERS[i % GENDERS.len()].to_string()),
                employment_date: NaiveDate::from_ymd_opt(2000 + i as i32, 1, 15),
                birth_year: Some(1960 + (i as i32) * 2),
                department_id,
                unique_internal_identifier: None,
                star_no: Some(format!("{}", 1900 + i + 1)),
                rank: Some("PO".to_string()),
                unit_id,
            })
            .await?;
    }

    let hash = |password: &str| hasher.hash(password);
    let test_user = storage
        .create_user(NewUser {
            email: "jen@example.org".to_string(),
            username: "test_user".to_string(),
            password_hash: hash("dog")?,
            confirmed: true,
            is_administrator: false,
            is_area_coordinator: false,
            ac_department_id: None,
        })
        .await?;
    let admin = storage
        .create_user(NewUser {
            email: "redshiftzero@example.org".to_string(),
            username: "testadmin".to_string(),
            password_hash: hash("cat")?,
            confirmed: true,
            is_administrator: true,
            is_area_coordinator: false,
            ac_department_id: None,
        })
        .await?;
    storage
        .create_user(NewUser {
            email: "freddy@example.org".to_string(),
            username: "bee_mason".to_string(),
            password_hash: hash("dog")?,
            confirmed: false,
            is_administrator: false,
            is_area_coordinator: false,
            ac_department_id: None,
        })
        .await?;
    storage
        .create_user(NewUser {
            email: "raq929@example.org".to_string(),
            username: "raq929".to_string(),
            password_hash: hash("horse")?,
            confirmed: true,
            is_administrator: false,
            is_area_coordinator: true,
            ac_department_id: Some(AC_DEPT),
        })
        .await?;

    let mut images = Vec::new();
    for n in 1..=8 {
        let department_id = if n <= 4 { springfield.id } else { shelbyville.id };
        let (image, _) = storage
            .create_image(NewImage {
                filepath: format!("static/images/test_cop{}.png", n),
                hash_img: format!("{:016x}", n),
                department_id,
                user_id: None,
                date_image_taken: Some(Utc::now()),
            })
            .await?;
        images.push(image);
    }

    // 每个部门的前两张已分类为含警员
    for (idx, image) in images.iter().enumerate() {
        if idx % 4 < 2 {
            let sorter = if image.department_id == springfield.id {
                test_user.id
            } else {
                admin.id
            };
            storage.classify_image(image.id, true, sorter).await?;
        }
    }

    for (officer_id, img_id) in [(3, 2), (2, 5), (5, 3)] {
        storage
            .create_face(NewFace {
                officer_id,
                img_id,
                original_image_id: Some(img_id),
                face_position_x: 10,
                face_position_y: 20,
                face_width: 100,
                face_height: 120,
                user_id: Some(test_user.id),
            })
            .await?;
    }

    info!(
        "Demo data seeded: {} departments, {} officers, {} images",
        departments.len(),
        OFFICER_NAMES.len(),
        images.len()
    );
    Ok(())
}
