use crate::domain::documents::{Document, Filter, Stage};
use crate::shared::error::AppError;
use crate::shared::validation::{Rule, ValidationFailure, not_blank, not_in_enum};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

time::serde::format_description!(birth_date, Date, "[year]-[month]-[day]");

/// Document paths of the administrator fields that are filtered on.
pub mod fields {
    pub const ID: &str = "id";
    pub const USER_REF: &str = "userRef";
    pub const DESIGNATION: &str = "designation";
    pub const FIRST_NAME: &str = "name.firstName";
    pub const LAST_NAME: &str = "name.lastName";
    pub const EMAIL: &str = "email";
    pub const GENDER: &str = "gender";
    pub const BLOOD_GROUP: &str = "bloodGroup";
    pub const IS_DELETED: &str = "isDeleted";
}

/// Fields the store must keep unique across every record, soft-deleted ones included.
pub const UNIQUE_FIELDS: [&str; 2] = [fields::EMAIL, fields::USER_REF];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value} is not a valid {kind}")]
pub struct ParseEnumError {
    field: &'static str,
    kind: &'static str,
    value: String,
}

impl From<ParseEnumError> for ValidationFailure {
    fn from(err: ParseEnumError) -> Self {
        ValidationFailure::single(err.field, Rule::NotInEnum, err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                field: fields::GENDER,
                kind: "gender",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                field: fields::BLOOD_GROUP,
                kind: "blood group",
                value: s.to_string(),
            })
    }
}

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|e| not_in_enum(&e.value, e.kind))
}

fn validate_blood_group(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BloodGroup>()
        .map(|_| ())
        .map_err(|e| not_in_enum(&e.value, e.kind))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// `firstName + " " + lastName`. A missing part contributes an empty string.
pub fn full_name(name: &UserName) -> String {
    format!("{} {}", name.first_name, name.last_name)
}

/// An administrator as stored in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Administrator {
    pub id: Uuid,
    pub user_ref: Uuid,
    pub designation: String,
    pub name: UserName,
    pub email: String,
    pub gender: Gender,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "birth_date::option"
    )]
    pub date_of_birth: Option<Date>,
    pub contact_no: String,
    pub emergency_contact_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    #[serde(default)]
    pub profile_img: String,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Administrator {
    pub fn full_name(&self) -> String {
        full_name(&self.name)
    }
}

/// The external representation of an administrator, carrying the derived
/// `fullName`. Never written back to the store.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorView {
    pub id: Uuid,
    pub user_ref: Uuid,
    pub designation: String,
    pub name: UserName,
    pub full_name: String,
    pub email: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none", with = "birth_date::option")]
    #[schema(value_type = Option<String>, example = "1990-05-17")]
    pub date_of_birth: Option<Date>,
    pub contact_no: String,
    pub emergency_contact_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    pub present_address: String,
    pub permanent_address: String,
    pub profile_img: String,
    pub is_deleted: bool,
}

impl From<Administrator> for AdministratorView {
    fn from(admin: Administrator) -> Self {
        Self {
            full_name: admin.full_name(),
            id: admin.id,
            user_ref: admin.user_ref,
            designation: admin.designation,
            name: admin.name,
            email: admin.email,
            gender: admin.gender,
            date_of_birth: admin.date_of_birth,
            contact_no: admin.contact_no,
            emergency_contact_no: admin.emergency_contact_no,
            blood_group: admin.blood_group,
            present_address: admin.present_address,
            permanent_address: admin.permanent_address,
            profile_img: admin.profile_img,
            is_deleted: admin.is_deleted,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserName {
    #[validate(
        required(message = "First Name is required"),
        length(max = 30, message = "Name can not be more than 30 characters"),
        custom(function = "not_blank")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Last Name is required"),
        length(max = 30, message = "Name can not be more than 30 characters"),
        custom(function = "not_blank")
    )]
    pub last_name: Option<String>,
}

/// A candidate administrator. Every field is optional at the type level so that
/// a missing value is reported as a field-level validation failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAdministrator {
    #[validate(required(message = "User id is required"))]
    pub user_ref: Option<Uuid>,
    #[validate(
        required(message = "Designation is required"),
        custom(function = "not_blank")
    )]
    pub designation: Option<String>,
    #[validate(required(message = "Name is required"), nested)]
    pub name: Option<NewUserName>,
    #[validate(required(message = "Email is required"), custom(function = "not_blank"))]
    pub email: Option<String>,
    #[validate(
        required(message = "Gender is required"),
        custom(function = "validate_gender")
    )]
    #[schema(example = "Female")]
    pub gender: Option<String>,
    #[serde(default, with = "birth_date::option")]
    #[schema(value_type = Option<String>, example = "1990-05-17")]
    pub date_of_birth: Option<Date>,
    #[validate(
        required(message = "Contact number is required"),
        custom(function = "not_blank")
    )]
    pub contact_no: Option<String>,
    #[validate(
        required(message = "Emergency contact number is required"),
        custom(function = "not_blank")
    )]
    pub emergency_contact_no: Option<String>,
    #[validate(custom(function = "validate_blood_group"))]
    #[schema(example = "O+")]
    pub blood_group: Option<String>,
    #[validate(
        required(message = "Present address is required"),
        custom(function = "not_blank")
    )]
    pub present_address: Option<String>,
    #[validate(
        required(message = "Permanent address is required"),
        custom(function = "not_blank")
    )]
    pub permanent_address: Option<String>,
    pub profile_img: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationFailure> {
    value.ok_or_else(|| ValidationFailure::required(field))
}

fn trim(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        *v = v.trim().to_string();
    }
}

impl NewAdministrator {
    /// Validates the candidate and turns it into a storable record with a
    /// fresh id. Names are trimmed first.
    pub fn validated(mut self) -> Result<Administrator, ValidationFailure> {
        if let Some(name) = self.name.as_mut() {
            trim(&mut name.first_name);
            trim(&mut name.last_name);
        }
        self.validate()?;

        let name = required(self.name, "name")?;
        Ok(Administrator {
            id: Uuid::new_v4(),
            user_ref: required(self.user_ref, fields::USER_REF)?,
            designation: required(self.designation, fields::DESIGNATION)?,
            name: UserName {
                first_name: required(name.first_name, fields::FIRST_NAME)?,
                last_name: required(name.last_name, fields::LAST_NAME)?,
            },
            email: required(self.email, fields::EMAIL)?,
            gender: required(self.gender, fields::GENDER)?.parse()?,
            date_of_birth: self.date_of_birth,
            contact_no: required(self.contact_no, "contactNo")?,
            emergency_contact_no: required(self.emergency_contact_no, "emergencyContactNo")?,
            blood_group: self.blood_group.map(|b| b.parse()).transpose()?,
            present_address: required(self.present_address, "presentAddress")?,
            permanent_address: required(self.permanent_address, "permanentAddress")?,
            profile_img: self.profile_img.unwrap_or_default(),
            is_deleted: false,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserName {
    #[validate(
        length(max = 30, message = "Name can not be more than 30 characters"),
        custom(function = "not_blank")
    )]
    pub first_name: Option<String>,
    #[validate(
        length(max = 30, message = "Name can not be more than 30 characters"),
        custom(function = "not_blank")
    )]
    pub last_name: Option<String>,
}

/// A partial update. Only the fields that are present are validated and
/// written. `id`, `userRef` and `isDeleted` are not updatable here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdministrator {
    #[validate(custom(function = "not_blank"))]
    pub designation: Option<String>,
    #[validate(nested)]
    pub name: Option<UpdateUserName>,
    #[validate(custom(function = "not_blank"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    #[serde(default, with = "birth_date::option")]
    #[schema(value_type = Option<String>, example = "1990-05-17")]
    pub date_of_birth: Option<Date>,
    #[validate(custom(function = "not_blank"))]
    pub contact_no: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub emergency_contact_no: Option<String>,
    #[validate(custom(function = "validate_blood_group"))]
    pub blood_group: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub present_address: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub permanent_address: Option<String>,
    pub profile_img: Option<String>,
}

impl UpdateAdministrator {
    pub fn validated(mut self) -> Result<AdministratorPatch, ValidationFailure> {
        if let Some(name) = self.name.as_mut() {
            trim(&mut name.first_name);
            trim(&mut name.last_name);
        }
        self.validate()?;

        Ok(AdministratorPatch {
            designation: self.designation,
            name: self.name.map(|n| UserNamePatch {
                first_name: n.first_name,
                last_name: n.last_name,
            }),
            email: self.email,
            gender: self.gender.map(|g| g.parse()).transpose()?,
            date_of_birth: self.date_of_birth,
            contact_no: self.contact_no,
            emergency_contact_no: self.emergency_contact_no,
            blood_group: self.blood_group.map(|b| b.parse()).transpose()?,
            present_address: self.present_address,
            permanent_address: self.permanent_address,
            profile_img: self.profile_img,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNamePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// The validated, touched-fields-only form of an update. Serializes to the
/// merge patch handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<UserNamePatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none", with = "birth_date::option")]
    pub date_of_birth: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_img: Option<String>,
}

#[async_trait]
pub trait AdministratorRepository: Send + Sync {
    async fn create(&self, candidate: NewAdministrator) -> Result<Administrator, AppError>;
    /// Applies to soft-deleted records too.
    async fn update(
        &self,
        id: Uuid,
        update: UpdateAdministrator,
    ) -> Result<Option<Administrator>, AppError>;
    async fn find_many(&self, filter: Filter) -> Result<Vec<Administrator>, AppError>;
    async fn find_one(&self, filter: Filter) -> Result<Option<Administrator>, AppError>;
    async fn aggregate(&self, pipeline: Vec<Stage>) -> Result<Vec<Document>, AppError>;
    async fn exists_by_email(&self, email: &str) -> Result<Option<Administrator>, AppError>;
    async fn exists_by_id(&self, id: Uuid) -> Result<Option<Administrator>, AppError>;
    async fn set_deleted(
        &self,
        id: Uuid,
        deleted: bool,
    ) -> Result<Option<Administrator>, AppError>;
}
