//! Behaviour of user records, patches, and filters.

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse("email", raw).expect("valid email")
}

const STORED_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn password(raw: &str) -> Password {
    Password::new("password", raw.to_owned()).expect("valid password")
}

#[fixture]
fn user() -> User {
    User {
        id: Uuid::nil(),
        user_id: SequentialId::new("USR001").expect("valid id"),
        full_name: "Ada Lovelace".to_owned(),
        email: email("ada@example.org"),
        password_hash: PasswordHash::from_phc(STORED_HASH.to_owned()).expect("valid PHC"),
        role: Role::User,
        is_active: true,
        profile: UserProfile {
            location: "London".to_owned(),
            ..UserProfile::default()
        },
        created_at: at(9),
        updated_at: at(9),
    }
}

#[rstest]
#[case(-1)]
#[case(121)]
fn age_outside_bounds_is_rejected(#[case] years: i64) {
    assert!(Age::new(years).is_err());
}

#[test]
fn age_accepts_bounds() {
    assert_eq!(Age::new(0).map(Age::years), Ok(0));
    assert_eq!(Age::new(120).map(Age::years), Ok(120));
}

#[rstest]
#[case("user", Role::User)]
#[case("admin", Role::Admin)]
fn roles_parse_from_wire_labels(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>(), Ok(expected));
}

#[test]
fn gender_labels_keep_spaces() {
    assert_eq!(Gender::PreferNotToSay.as_str(), "Prefer not to say");
    assert_eq!(
        "Prefer not to say".parse::<Gender>(),
        Ok(Gender::PreferNotToSay)
    );
}

#[test]
fn new_users_number_by_role() {
    let draft = NewUser {
        user_id: None,
        full_name: "Grace Hopper".to_owned(),
        email: email("grace@example.org"),
        password: password("cobol"),
        role: Role::Admin,
        is_active: true,
        profile: UserProfile::default(),
    };
    assert_eq!(draft.sequence_kind(), SequenceKind::User(Role::Admin));
}

#[test]
fn into_user_requires_an_identifier() {
    let draft = NewUser {
        user_id: None,
        full_name: "Grace Hopper".to_owned(),
        email: email("grace@example.org"),
        password: password("cobol"),
        role: Role::Admin,
        is_active: true,
        profile: UserProfile::default(),
    };
    let hash = PasswordHash::from_phc(STORED_HASH.to_owned()).expect("valid PHC");
    assert!(draft.into_user(Uuid::nil(), hash, at(8)).is_none());
}

#[rstest]
fn patch_keeps_identifier_and_unspecified_fields(mut user: User) {
    let patch = UserPatch {
        full_name: Some("Ada King".to_owned()),
        role: Some(Role::Admin),
        age: Some(Age::new(36).expect("valid age")),
        ..UserPatch::default()
    };

    user.apply(patch, at(10));

    assert_eq!(user.user_id.as_str(), "USR001");
    assert_eq!(user.full_name, "Ada King");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.email.as_str(), "ada@example.org");
    assert_eq!(user.profile.location, "London");
    assert_eq!(user.profile.age.map(Age::years), Some(36));
    assert_eq!(user.updated_at - user.created_at, Duration::hours(1));
}

#[rstest]
#[case(UserFilter::default(), true)]
#[case(UserFilter { search: Some("LOVE".to_owned()), ..UserFilter::default() }, true)]
#[case(UserFilter { search: Some("lond".to_owned()), ..UserFilter::default() }, true)]
#[case(UserFilter { search: Some("example.org".to_owned()), ..UserFilter::default() }, true)]
#[case(UserFilter { search: Some("babbage".to_owned()), ..UserFilter::default() }, false)]
#[case(UserFilter { role: Some(Role::Admin), ..UserFilter::default() }, false)]
#[case(UserFilter { active: Some(false), ..UserFilter::default() }, false)]
#[case(UserFilter { active: Some(true), role: Some(Role::User), ..UserFilter::default() }, true)]
fn filter_matches(user: User, #[case] filter: UserFilter, #[case] expected: bool) {
    assert_eq!(filter.matches(&user), expected);
}
