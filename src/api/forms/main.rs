//! Officer, department and tagging forms

use chrono::NaiveDate;
use serde::Deserialize;

use super::choices::{Gender, Race, Rank, is_not_sure};
use super::validators::present;
use super::{FormErrors, REQUIRED};
use crate::storage::{NewOfficer, OfficerUpdate};

pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 100;
const DEFAULT_MAX_AGE: i32 = 85;

fn text(
    errors: &mut FormErrors,
    field: &'static str,
    value: &Option<String>,
    max: usize,
) -> Option<String> {
    let v = present(value)?;
    errors.length(field, v, 0, max);
    Some(v.to_string())
}

fn age(errors: &mut FormErrors, field: &'static str, value: &Option<String>, default: i32) -> i32 {
    let parsed = errors.optional_int::<i32>(field, value).unwrap_or(default);
    if !(MIN_AGE..=MAX_AGE).contains(&parsed) {
        errors.add(field, format!("Number must be between {MIN_AGE} and {MAX_AGE}."));
    }
    parsed
}

/// Search filters; "Not Sure" is treated as no filter
fn filter_choice<C: super::Choice>(
    errors: &mut FormErrors,
    field: &'static str,
    value: &Option<String>,
) -> Option<String> {
    errors
        .optional_choice::<C>(field, value)
        .filter(|v| !is_not_sure(v))
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FindOfficerForm {
    pub name: Option<String>,
    pub badge: Option<String>,
    pub dept: Option<String>,
    pub rank: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerSearch {
    pub dept: i32,
    pub name: Option<String>,
    pub badge: Option<String>,
    pub rank: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub min_age: i32,
    pub max_age: i32,
}

impl FindOfficerForm {
    pub fn validate(&self) -> Result<OfficerSearch, FormErrors> {
        let mut errors = FormErrors::new();
        let dept = errors.required_int("dept", &self.dept);
        let name = text(&mut errors, "name", &self.name, 50);
        let badge = errors.word("badge", &self.badge, 10);
        let rank = filter_choice::<Rank>(&mut errors, "rank", &self.rank);
        let race = filter_choice::<Race>(&mut errors, "race", &self.race);
        let gender = filter_choice::<Gender>(&mut errors, "gender", &self.gender);
        let min_age = age(&mut errors, "min_age", &self.min_age, MIN_AGE);
        let max_age = age(&mut errors, "max_age", &self.max_age, DEFAULT_MAX_AGE);
        if min_age > max_age {
            errors.add("max_age", "Maximum age must not be below the minimum age.");
        }
        match dept {
            Some(dept) => errors.finish(OfficerSearch {
                dept,
                name,
                badge,
                rank,
                race,
                gender,
                min_age,
                max_age,
            }),
            None => Err(errors),
        }
    }
}

impl OfficerSearch {
    /// Query string understood by the department officer list
    pub fn query_string(&self) -> String {
        let mut params = vec![
            ("min_age".to_string(), self.min_age.to_string()),
            ("max_age".to_string(), self.max_age.to_string()),
        ];
        let optional = [
            ("name", &self.name),
            ("badge", &self.badge),
            ("rank", &self.rank),
            ("race", &self.race),
            ("gender", &self.gender),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                params.push((key.to_string(), v.clone()));
            }
        }
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FindOfficerIdForm {
    pub name: Option<String>,
    pub badge: Option<String>,
    pub dept: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggerSearch {
    pub name: Option<String>,
    pub badge: Option<String>,
    pub dept: Option<i32>,
}

impl FindOfficerIdForm {
    pub fn validate(&self) -> Result<TaggerSearch, FormErrors> {
        let mut errors = FormErrors::new();
        let name = text(&mut errors, "name", &self.name, 50);
        let badge = errors.word("badge", &self.badge, 10);
        let dept = errors.optional_int("dept", &self.dept);
        errors.finish(TaggerSearch { name, badge, dept })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AssignmentForm {
    pub star_no: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub star_date: Option<String>,
}

/// Assignment fields; `None` means not given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFields {
    pub star_no: Option<String>,
    pub rank: Option<String>,
    pub unit_id: Option<i32>,
    pub star_date: Option<NaiveDate>,
}

impl AssignmentForm {
    pub fn validate(&self) -> Result<AssignmentFields, FormErrors> {
        let mut errors = FormErrors::new();
        let fields = AssignmentFields {
            star_no: errors.word("star_no", &self.star_no, 50),
            rank: errors.optional_choice::<Rank>("rank", &self.rank),
            unit_id: errors.optional_int("unit", &self.unit),
            star_date: errors.optional_date("star_date", &self.star_date),
        };
        errors.finish(fields)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FaceTagForm {
    pub officer_id: Option<String>,
    pub image_id: Option<String>,
    #[serde(rename = "dataX")]
    pub data_x: Option<String>,
    #[serde(rename = "dataY")]
    pub data_y: Option<String>,
    #[serde(rename = "dataWidth")]
    pub data_width: Option<String>,
    #[serde(rename = "dataHeight")]
    pub data_height: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceTag {
    /// Wider than the id column so out-of-range ids reach the lookup
    pub officer_id: i64,
    pub image_id: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceTagForm {
    pub fn validate(&self) -> Result<FaceTag, FormErrors> {
        let mut errors = FormErrors::new();
        let officer_id = errors.required_int::<i64>("officer_id", &self.officer_id);
        let image_id = errors.required_int::<i32>("image_id", &self.image_id);
        let x = errors.required_int::<i32>("dataX", &self.data_x);
        let y = errors.required_int::<i32>("dataY", &self.data_y);
        let width = errors.required_int::<i32>("dataWidth", &self.data_width);
        let height = errors.required_int::<i32>("dataHeight", &self.data_height);
        match (officer_id, image_id, x, y, width, height) {
            (Some(officer_id), Some(image_id), Some(x), Some(y), Some(width), Some(height)) => {
                errors.finish(FaceTag {
                    officer_id,
                    image_id,
                    x,
                    y,
                    width,
                    height,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DepartmentForm {
    pub name: Option<String>,
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
    pub short_name: String,
}

impl DepartmentForm {
    pub fn validate(&self) -> Result<NewDepartment, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        let short_name = errors.required("short_name", &self.short_name);
        if let Some(name) = name {
            errors.length("name", name, 1, 255);
        }
        if let Some(short_name) = short_name {
            errors.length("short_name", short_name, 1, 100);
        }
        match (name, short_name) {
            (Some(name), Some(short_name)) => errors.finish(NewDepartment {
                name: name.to_string(),
                short_name: short_name.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddUnitForm {
    pub descrip: Option<String>,
    pub department: Option<String>,
}

impl AddUnitForm {
    /// Returns (description, department id)
    pub fn validate(&self) -> Result<(String, i32), FormErrors> {
        let mut errors = FormErrors::new();
        let descrip = errors.required("descrip", &self.descrip);
        if let Some(d) = descrip {
            errors.length("descrip", d, 1, 120);
        }
        let department = errors.required_int("department", &self.department);
        match (descrip, department) {
            (Some(d), Some(dept)) => errors.finish((d.to_string(), dept)),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddOfficerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_initial: Option<String>,
    pub star_no: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub employment_date: Option<String>,
    pub birth_year: Option<String>,
    pub department: Option<String>,
    pub unique_internal_identifier: Option<String>,
}

impl AddOfficerForm {
    pub fn validate(&self) -> Result<NewOfficer, FormErrors> {
        let mut errors = FormErrors::new();
        let last_name = errors.required("last_name", &self.last_name).map(str::to_string);
        if let Some(last) = &last_name {
            errors.length("last_name", last, 1, 50);
        }
        let first_name = text(&mut errors, "first_name", &self.first_name, 50).unwrap_or_default();
        let middle_initial =
            text(&mut errors, "middle_initial", &self.middle_initial, 50).unwrap_or_default();
        let star_no = errors.word("star_no", &self.star_no, 50);
        let race = errors.optional_choice::<Race>("race", &self.race);
        let gender = errors.optional_choice::<Gender>("gender", &self.gender);
        let rank = errors.optional_choice::<Rank>("rank", &self.rank);
        let unit_id = errors.optional_int("unit", &self.unit);
        let employment_date = errors.optional_date("employment_date", &self.employment_date);
        let birth_year = errors.optional_int("birth_year", &self.birth_year);
        let department_id = errors.required_int("department", &self.department);
        let unique_internal_identifier = text(
            &mut errors,
            "unique_internal_identifier",
            &self.unique_internal_identifier,
            50,
        );

        match (last_name, department_id) {
            (Some(last_name), Some(department_id)) => errors.finish(NewOfficer {
                first_name,
                last_name,
                middle_initial,
                race,
                gender,
                employment_date,
                birth_year,
                department_id,
                unique_internal_identifier,
                star_no,
                rank,
                unit_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EditOfficerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_initial: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub employment_date: Option<String>,
    pub birth_year: Option<String>,
    pub unique_internal_identifier: Option<String>,
    pub department: Option<String>,
}

impl EditOfficerForm {
    /// Only the fields that were sent are changed
    pub fn validate(&self) -> Result<OfficerUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        if matches!(&self.last_name, Some(v) if v.trim().is_empty()) {
            errors.add("last_name", REQUIRED);
        }
        let update = OfficerUpdate {
            first_name: text(&mut errors, "first_name", &self.first_name, 50),
            last_name: text(&mut errors, "last_name", &self.last_name, 50),
            // an empty middle initial clears it
            middle_initial: self.middle_initial.as_ref().map(|v| v.trim().to_string()),
            race: errors.optional_choice::<Race>("race", &self.race),
            gender: errors.optional_choice::<Gender>("gender", &self.gender),
            employment_date: errors.optional_date("employment_date", &self.employment_date),
            birth_year: errors.optional_int("birth_year", &self.birth_year),
            department_id: errors.optional_int("department", &self.department),
            unique_internal_identifier: text(
                &mut errors,
                "unique_internal_identifier",
                &self.unique_internal_identifier,
                50,
            ),
        };
        errors.finish(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_find_officer_defaults_and_query() {
        let form = FindOfficerForm {
            name: s("J"),
            dept: s("1"),
            rank: s("Not Sure"),
            race: s("WHITE"),
            ..Default::default()
        };
        let search = form.validate().unwrap();
        assert_eq!(search.min_age, 16);
        assert_eq!(search.max_age, 85);
        assert_eq!(search.rank, None);
        assert_eq!(
            search.query_string(),
            "min_age=16&max_age=85&name=J&race=WHITE"
        );
    }

    #[test]
    fn test_find_officer_requires_department() {
        let errors = FindOfficerForm::default().validate().unwrap_err();
        assert_eq!(errors.field("dept"), [REQUIRED.to_string()]);
    }

    #[test]
    fn test_find_officer_age_range() {
        let form = FindOfficerForm {
            dept: s("1"),
            min_age: s("12"),
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().contains("min_age"));
    }

    #[test]
    fn test_tagger_search() {
        let ok = FindOfficerIdForm {
            dept: s(""),
            ..Default::default()
        };
        assert_eq!(ok.validate().unwrap(), TaggerSearch::default());

        let bad = FindOfficerIdForm {
            badge: s("THIS IS NOT VALID"),
            ..Default::default()
        };
        assert!(bad.validate().unwrap_err().contains("badge"));
    }

    #[test]
    fn test_face_tag_keeps_wide_officer_id() {
        let form = FaceTagForm {
            officer_id: s("999999999999999999"),
            image_id: s("1"),
            data_x: s("34"),
            data_y: s("32"),
            data_width: s("3"),
            data_height: s("33"),
        };
        let tag = form.validate().unwrap();
        assert_eq!(tag.officer_id, 999_999_999_999_999_999);
        assert!(i32::try_from(tag.officer_id).is_err());
    }

    #[test]
    fn test_add_officer_minimal() {
        let form = AddOfficerForm {
            last_name: s("Testersly"),
            star_no: s("T666"),
            race: s("NATIVE AMERICAN"),
            gender: s("Not Sure"),
            rank: s("PO"),
            department: s("1"),
            ..Default::default()
        };
        let new = form.validate().unwrap();
        assert_eq!(new.middle_initial, "");
        assert_eq!(new.first_name, "");
        assert_eq!(new.star_no.as_deref(), Some("T666"));
        assert_eq!(new.gender.as_deref(), Some("Not Sure"));
    }

    #[test]
    fn test_add_officer_rejects_unknown_race() {
        let form = AddOfficerForm {
            last_name: s("Testersly"),
            race: s("MARTIAN"),
            department: s("1"),
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().contains("race"));
    }

    #[test]
    fn test_edit_officer_is_partial() {
        let form = EditOfficerForm {
            last_name: s("Changed"),
            ..Default::default()
        };
        let update = form.validate().unwrap();
        assert_eq!(update.last_name.as_deref(), Some("Changed"));
        assert!(update.first_name.is_none());
        assert!(update.department_id.is_none());

        let blank = EditOfficerForm {
            last_name: s(" "),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_assignment_form() {
        let form = AssignmentForm {
            star_no: s("1234"),
            rank: s("COMMANDER"),
            star_date: s("2018-01-01"),
            ..Default::default()
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.rank.as_deref(), Some("COMMANDER"));
        assert!(fields.unit_id.is_none());
    }

    #[test]
    fn test_department_form() {
        let form = DepartmentForm {
            name: s("Test"),
            short_name: s("TPD"),
        };
        assert_eq!(
            form.validate().unwrap(),
            NewDepartment {
                name: "Test".into(),
                short_name: "TPD".into()
            }
        );
        assert!(DepartmentForm::default().validate().is_err());
    }
}
