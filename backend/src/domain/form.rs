//! Acceptance rules for the add/edit user form.
//!
//! Form state is raw text. [`UserForm::validate`] checks every field and, only
//! when all pass, yields a typed [`ValidatedUser`]. Each field check returns
//! the typed value it accepted, so there is no separate parse step that could
//! disagree with the rules.
//!
//! The age ceiling depends on the gender field; re-run the age check whenever
//! gender changes (see [`UserForm::set_gender`]).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::{Gender, NewUser, User, UserId, UserPatch};

/// Youngest accepted age.
pub const MIN_AGE: u32 = 18;
/// Oldest accepted age when gender is `Male`.
pub const MAX_AGE_MALE: u32 = 112;
/// Oldest accepted age for any other gender value.
pub const MAX_AGE_FEMALE: u32 = 117;
/// Shortest accepted first or last name, in characters.
pub const NAME_MIN_LEN: usize = 5;
/// Longest accepted first or last name, in characters.
pub const NAME_MAX_LEN: usize = 20;

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Length is checked separately; this only constrains the alphabet.
        Regex::new(r"^[a-zA-Z\-'\s]*$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

/// The user-editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Gender select.
    Gender,
    /// First name input.
    Firstname,
    /// Last name input.
    Lastname,
    /// Age input.
    Age,
}

impl FormField {
    /// Every field, in display order.
    pub const ALL: [Self; 4] = [Self::Gender, Self::Firstname, Self::Lastname, Self::Age];

    /// Wire/form key for the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Firstname => "firstname",
            Self::Lastname => "lastname",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which name field a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// First name.
    First,
    /// Last name.
    Last,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("First name"),
            Self::Last => f.write_str("Last name"),
        }
    }
}

/// Age ceiling derived from the current gender value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeLimit {
    audience: Gender,
    max: u32,
}

impl AgeLimit {
    /// Highest accepted age.
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Gender whose ceiling applies.
    #[must_use]
    pub const fn audience(self) -> Gender {
        self.audience
    }

    fn audience_label(self) -> &'static str {
        match self.audience {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Ceiling for the age field given the raw gender value.
///
/// Only the exact literal `Male` selects the male ceiling; everything else,
/// including an empty selection, uses the female one.
///
/// # Examples
/// ```
/// use roster::domain::form::age_limit;
///
/// assert_eq!(age_limit("Male").max(), 112);
/// assert_eq!(age_limit("").max(), 117);
/// ```
#[must_use]
pub fn age_limit(gender: &str) -> AgeLimit {
    if gender == Gender::Male.as_str() {
        AgeLimit {
            audience: Gender::Male,
            max: MAX_AGE_MALE,
        }
    } else {
        AgeLimit {
            audience: Gender::Female,
            max: MAX_AGE_FEMALE,
        }
    }
}

/// A single field-level failure. `Display` yields the message shown next to
/// the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field was left empty.
    #[error("Required")]
    Required,
    /// Gender other than the two accepted literals.
    #[error("Gender must be Male or Female")]
    UnknownGender,
    /// Name shorter than [`NAME_MIN_LEN`].
    #[error("{0}s must be longer than {min} characters", min = NAME_MIN_LEN)]
    NameTooShort(NameKind),
    /// Name longer than [`NAME_MAX_LEN`].
    #[error("{0}s must be shorter than {max} characters", max = NAME_MAX_LEN)]
    NameTooLong(NameKind),
    /// Name with characters outside letters, hyphens, apostrophes and spaces.
    #[error("{0}s can only contain letters, hyphens (-), and apostrophes (')")]
    NameInvalidCharacters(NameKind),
    /// Age with non-digit characters.
    #[error("Age must be a number")]
    AgeNotANumber,
    /// Age below [`MIN_AGE`].
    #[error("Users must be {min} or over", min = MIN_AGE)]
    AgeTooYoung,
    /// Age above the gender-derived ceiling.
    #[error("The maximum age for {} users is {}", .0.audience_label(), .0.max())]
    AgeTooOld(AgeLimit),
}

/// Field-level failures keyed by field; at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} form field(s) failed validation", .0.len())]
pub struct FormErrors(BTreeMap<FormField, FieldError>);

impl FormErrors {
    /// Failure recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Message to display next to `field`, if any.
    #[must_use]
    pub fn message(&self, field: FormField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Failures in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn record<T>(&mut self, field: FormField, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.insert(field, error);
                None
            }
        }
    }
}

fn check_gender(raw: &str) -> Result<Gender, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    raw.parse().map_err(|_| FieldError::UnknownGender)
}

fn check_name(raw: &str, kind: NameKind) -> Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    let length = raw.chars().count();
    if length < NAME_MIN_LEN {
        return Err(FieldError::NameTooShort(kind));
    }
    if length > NAME_MAX_LEN {
        return Err(FieldError::NameTooLong(kind));
    }
    if !name_regex().is_match(raw) {
        return Err(FieldError::NameInvalidCharacters(kind));
    }
    Ok(raw.to_owned())
}

fn check_age(raw: &str, limit: AgeLimit) -> Result<u32, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    // Range runs on any numeric reading ("-5", "17.5", "1e3") before the
    // digits-only pattern.
    if let Ok(value) = raw.trim().parse::<f64>() {
        if value < f64::from(MIN_AGE) {
            return Err(FieldError::AgeTooYoung);
        }
        if value > f64::from(limit.max()) {
            return Err(FieldError::AgeTooOld(limit));
        }
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::AgeNotANumber);
    }
    raw.parse().map_err(|_| FieldError::AgeTooOld(limit))
}

/// Raw add/edit form state. An empty `id` means "new user".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    /// Identifier of the user being edited, or empty.
    pub id: String,
    /// Selected gender literal.
    pub gender: String,
    /// First name as typed.
    pub firstname: String,
    /// Last name as typed.
    pub lastname: String,
    /// Age as typed.
    pub age: String,
}

impl UserForm {
    /// An empty "add user" form.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// A form pre-filled for editing `user`.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            gender: user.gender().to_string(),
            firstname: user.firstname().to_owned(),
            lastname: user.lastname().to_owned(),
            age: user.age().to_string(),
        }
    }

    /// Update the gender and return the age field's status under the new
    /// ceiling.
    pub fn set_gender(&mut self, gender: impl Into<String>) -> Result<(), FieldError> {
        self.gender = gender.into();
        self.validate_field(FormField::Age)
    }

    /// Check a single field against the current form state.
    pub fn validate_field(&self, field: FormField) -> Result<(), FieldError> {
        match field {
            FormField::Gender => check_gender(&self.gender).map(drop),
            FormField::Firstname => check_name(&self.firstname, NameKind::First).map(drop),
            FormField::Lastname => check_name(&self.lastname, NameKind::Last).map(drop),
            FormField::Age => check_age(&self.age, age_limit(&self.gender)).map(drop),
        }
    }

    /// Check every field; on success return the typed record.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::form::{FormField, UserForm};
    ///
    /// let form = UserForm {
    ///     gender: "Male".into(),
    ///     firstname: "Johnny".into(),
    ///     lastname: "Maverick".into(),
    ///     age: "113".into(),
    ///     ..UserForm::blank()
    /// };
    /// let errors = form.validate().expect_err("too old");
    /// assert_eq!(
    ///     errors.message(FormField::Age).as_deref(),
    ///     Some("The maximum age for male users is 112")
    /// );
    /// ```
    pub fn validate(&self) -> Result<ValidatedUser, FormErrors> {
        let mut errors = FormErrors::default();
        let gender = errors.record(FormField::Gender, check_gender(&self.gender));
        let firstname = errors.record(
            FormField::Firstname,
            check_name(&self.firstname, NameKind::First),
        );
        let lastname = errors.record(
            FormField::Lastname,
            check_name(&self.lastname, NameKind::Last),
        );
        let age = errors.record(FormField::Age, check_age(&self.age, age_limit(&self.gender)));

        match (gender, firstname, lastname, age) {
            (Some(gender), Some(firstname), Some(lastname), Some(age)) => Ok(ValidatedUser {
                id: UserId::new(self.id.as_str()).ok(),
                fields: NewUser {
                    firstname,
                    lastname,
                    age,
                    gender,
                },
            }),
            _ => Err(errors),
        }
    }
}

/// Form data that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    id: Option<UserId>,
    fields: NewUser,
}

impl ValidatedUser {
    /// Identifier of the edited user; `None` for a new user.
    #[must_use]
    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    /// The typed field values.
    #[must_use]
    pub fn fields(&self) -> &NewUser {
        &self.fields
    }

    /// The request this form submits.
    #[must_use]
    pub fn into_submission(self) -> Submission {
        match self.id {
            None => Submission::Create(self.fields),
            Some(id) => Submission::Update {
                id,
                patch: UserPatch::from(self.fields),
            },
        }
    }
}

/// Request produced by a validated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// `POST /api/users`.
    Create(NewUser),
    /// `PATCH /api/users/{id}` carrying every field.
    Update {
        /// User being edited.
        id: UserId,
        /// Full replacement of the editable fields.
        patch: UserPatch,
    },
}
