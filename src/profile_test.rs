use super::*;
use crate::testing::{sample_profile, Call, FakeApi};

async fn loaded_view(api: &FakeApi) -> ProfileView {
    let mut view = ProfileView::new("user123");
    view.load(api).await;
    view
}

// =============================================================
// Loading
// =============================================================

#[tokio::test]
async fn load_fetches_by_user_id() {
    let api = FakeApi::default();
    let view = loaded_view(&api).await;
    assert_eq!(api.calls(), vec![Call::User("user123".into())]);
    assert_eq!(view.user, Some(sample_profile()));
    assert!(!view.loading);
}

#[tokio::test]
async fn load_failure_sets_error_text() {
    let api = FakeApi { profile: Err(ApiError::Status { status: 404 }), ..FakeApi::default() };
    let view = loaded_view(&api).await;
    assert_eq!(view.user, None);
    assert_eq!(view.load_error.as_deref(), Some(PROFILE_LOAD_FAILURE));
}

// =============================================================
// Form
// =============================================================

#[test]
fn form_prefills_from_profile() {
    let form = ProfileForm::from_profile(&sample_profile());
    assert_eq!(form.name, "Test User");
    assert_eq!(form.age, "25");
    assert!(form.missing_fields().is_empty());
}

#[test]
fn set_ignores_unknown_fields() {
    let mut form = ProfileForm::default();
    form.set("bio", "Hello");
    form.set("shoe_size", "44");
    assert_eq!(form.bio, "Hello");
    assert_eq!(form.get("shoe_size"), None);
}

#[test]
fn fields_are_in_form_order_and_trimmed() {
    let mut form = ProfileForm::from_profile(&sample_profile());
    form.set("name", "  Avanti  ");
    let fields = form.fields();
    let names: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, ProfileForm::FIELD_NAMES.to_vec());
    assert_eq!(fields[0].1, "Avanti");
}

#[test]
fn blank_inputs_block_the_save() {
    let mut view = ProfileView::new("user123");
    view.apply_loaded(Ok(sample_profile()));
    view.start_editing();
    view.form.set("age", " ");
    view.form.set("bio", "");

    assert_eq!(view.begin_save(), None);
    assert_eq!(view.missing, vec!["bio", "age"]);
    assert!(!view.saving);
}

#[test]
fn second_save_is_refused_while_one_is_running() {
    let mut view = ProfileView::new("user123");
    view.apply_loaded(Ok(sample_profile()));
    view.start_editing();
    assert!(view.begin_save().is_some());
    assert!(view.begin_save().is_none());
}

// =============================================================
// Saving
// =============================================================

#[tokio::test]
async fn successful_update_replaces_record_and_exits_edit_mode() {
    let server_copy = UserProfile {
        name: "Avanti Singh".into(),
        profile_picture: Some("uploads/abc_me.png".into()),
        trips: 24,
        ..sample_profile()
    };
    let api = FakeApi { update: Ok(server_copy.clone()), ..FakeApi::default() };
    let mut view = loaded_view(&api).await;

    view.start_editing();
    view.form.set("name", "Avanti Singh");
    view.picture = Some(PictureUpload {
        file_name: "me.png".into(),
        content_type: Some("image/png".into()),
        bytes: vec![1, 2, 3],
    });
    assert!(view.save(&api).await);

    assert_eq!(view.user, Some(server_copy));
    assert!(!view.editing);
    assert!(view.picture.is_none());

    let Some(Call::Update(user_id, update)) = api.calls().pop() else {
        panic!("expected an update call");
    };
    assert_eq!(user_id, "user123");
    assert_eq!(update.fields[0], ("name", "Avanti Singh".to_string()));
    assert_eq!(update.picture.unwrap().file_name, "me.png");
}

#[tokio::test]
async fn failed_update_leaves_the_form_open() {
    let api = FakeApi { update: Err(ApiError::Status { status: 422 }), ..FakeApi::default() };
    let mut view = loaded_view(&api).await;
    view.start_editing();
    view.form.set("name", "New Name");

    assert!(!view.save(&api).await);
    assert!(view.editing);
    assert!(!view.saving);
    assert_eq!(view.form.name, "New Name");
    assert_eq!(view.user, Some(sample_profile()));
}

#[test]
fn cancel_discards_pending_picture() {
    let mut view = ProfileView::new("user123");
    view.apply_loaded(Ok(sample_profile()));
    view.start_editing();
    view.picture = Some(PictureUpload { file_name: "a.png".into(), content_type: None, bytes: vec![] });
    view.cancel_editing();
    assert!(!view.editing);
    assert!(view.picture.is_none());
}
