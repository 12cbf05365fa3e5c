//! End-to-end flows through the real store with scripted collaborators.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use annotator_app::actions::{Actions, AnnotateActions, AuthActions, SearchActions};
use annotator_app::error::ApiError;
use annotator_app::mocks::{InMemoryStorage, MockPhotoApi, TEST_SESSION_KEY, mock_environment};
use annotator_app::models::{
    Annotation, AnnotationStatus, Image, ImageId, License, Search, SearchPage, Session,
};
use annotator_app::session::SessionStorage;
use annotator_app::{AppStore, build_store, selectors};
use annotator_core::action::Action;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(2);

fn page_of(ids: &[&str], page: u32) -> SearchPage {
    SearchPage {
        total: ids.len() as u64,
        left: Some(ids.len() as u64),
        images: ids.iter().map(|id| Image::new(*id)).collect(),
        ..SearchPage::empty(page)
    }
}

fn store_with(api: &Arc<MockPhotoApi>, storage: &InMemoryStorage) -> AppStore {
    build_store(mock_environment(Arc::clone(api), storage.clone()))
}

async fn result_ids(store: &AppStore) -> Vec<String> {
    store
        .state(|state| {
            selectors::search_results(state)
                .iter()
                .map(|image| image.id.as_str().to_string())
                .collect()
        })
        .await
}

#[tokio::test]
async fn out_of_order_search_responses_keep_the_latest_request() {
    let api = Arc::new(MockPhotoApi::new());
    let first_gate = api.reply_search_after(Ok(page_of(&["first"], 1)));
    let second_gate = api.reply_search_after(Ok(page_of(&["second"], 2)));
    let store = store_with(&api, &InMemoryStorage::new());
    let search = Search::new("beach");

    let mut first = store.send(SearchActions.search(&search, 1)).await.unwrap();
    assert!(api.wait_for_calls(1, WAIT).await);
    let mut second = store.send(SearchActions.search(&search, 2)).await.unwrap();
    assert!(api.wait_for_calls(2, WAIT).await);

    // The second request is answered first
    second_gate.send(()).unwrap();
    second.wait_with_timeout(WAIT).await.unwrap();
    assert_eq!(result_ids(&store).await, vec!["second"]);

    first_gate.send(()).unwrap();
    first.wait_with_timeout(WAIT).await.unwrap();

    assert_eq!(result_ids(&store).await, vec!["second"]);
    let (loading, page) = store.state(|state| (state.search.loading, state.search.page)).await;
    assert!(!loading);
    assert_eq!(page, 2);
}

#[tokio::test]
async fn untokened_completions_apply_last_response_wins() {
    let api = Arc::new(MockPhotoApi::new());
    let store = store_with(&api, &InMemoryStorage::new());

    store.send(SearchActions.search_complete(&page_of(&["second"], 2))).await.unwrap();
    store.send(SearchActions.search_complete(&page_of(&["first"], 1))).await.unwrap();

    assert_eq!(result_ids(&store).await, vec!["first"]);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn follow_up_is_observed_after_its_trigger() {
    let api = Arc::new(MockPhotoApi::new());
    let licenses = vec![License {
        id: 4,
        name: "CC BY".to_string(),
    }];
    api.reply_licenses(Ok(licenses.clone()));
    let store = store_with(&api, &InMemoryStorage::new());
    let mut observed = store.subscribe_actions();

    let applied = store
        .send_and_wait_for(
            SearchActions.request_licenses(),
            |action| action.action_type() == SearchActions::REQUEST_LICENSES_COMPLETE,
            WAIT,
        )
        .await
        .unwrap();
    assert_eq!(applied, SearchActions.request_licenses_complete(&licenses));

    assert_eq!(observed.recv().await.unwrap().action_type(), SearchActions::REQUEST_LICENSES);
    assert_eq!(
        observed.recv().await.unwrap().action_type(),
        SearchActions::REQUEST_LICENSES_COMPLETE
    );

    let (loaded, loading) = store
        .state(|state| (state.search.licenses.clone(), state.search.loading_licenses))
        .await;
    assert_eq!(loaded, licenses);
    assert!(!loading);
}

#[tokio::test]
async fn failed_request_keeps_previous_data() {
    let api = Arc::new(MockPhotoApi::new());
    let licenses = vec![License {
        id: 1,
        name: "CC BY-NC-SA".to_string(),
    }];
    api.reply_licenses(Ok(licenses.clone()))
        .reply_licenses(Err(ApiError::Transport("connection reset".to_string())));
    let store = store_with(&api, &InMemoryStorage::new());

    for _ in 0..2 {
        let mut handle = store.send(SearchActions.request_licenses()).await.unwrap();
        handle.wait_with_timeout(WAIT).await.unwrap();
    }

    let (loaded, loading, error) = store
        .state(|state| {
            (
                state.search.licenses.clone(),
                state.search.loading_licenses,
                state.search.error.clone(),
            )
        })
        .await;
    assert_eq!(loaded, licenses);
    assert!(!loading);
    assert_eq!(error.as_deref(), Some("Request failed: connection reset"));
}

#[tokio::test]
async fn save_annotation_marks_image_saved() {
    let api = Arc::new(MockPhotoApi::new());
    let record = Annotation::new("5").with_id(21);
    let gate = api.reply_save_annotation_after(Ok(record.clone()));
    let store = store_with(&api, &InMemoryStorage::new());
    let image = Image::new("5");
    let id = ImageId::from("5");

    store
        .send(AnnotateActions.request_images_complete(std::slice::from_ref(&image), 1))
        .await
        .unwrap();
    store.send(AnnotateActions.select_image(&image)).await.unwrap();
    let mut saving = store.send(AnnotateActions.save_annotation(&image, "QUJD")).await.unwrap();

    let status = store.state(|state| selectors::annotation_status(state, &id)).await;
    assert_eq!(status, AnnotationStatus::InProgress);

    gate.send(()).unwrap();
    saving.wait_with_timeout(WAIT).await.unwrap();

    let (status, stored, saving_flag) = store
        .state(|state| {
            (
                selectors::annotation_status(state, &id),
                state.annotate.annotations.get(&id).cloned(),
                state.annotate.saving,
            )
        })
        .await;
    assert_eq!(status, AnnotationStatus::Saved);
    assert_eq!(stored, Some(record));
    assert!(!saving_flag);
}

#[tokio::test]
async fn login_and_logout_manage_the_stored_session() {
    let api = Arc::new(MockPhotoApi::new());
    api.reply_login(Ok(Session::new("abc").with_username("ana")))
        .reply_logout(Ok(()));
    let storage = InMemoryStorage::new();
    let store = store_with(&api, &storage);
    let actions = Actions::default();

    let mut login = store.send(actions.auth.login("ana", "secret")).await.unwrap();
    login.wait_with_timeout(WAIT).await.unwrap();

    assert!(store.state(selectors::is_authenticated).await);
    assert_eq!(
        store.state(|state| selectors::current_user(state).map(str::to_string)).await.as_deref(),
        Some("ana")
    );
    assert!(storage.get_item(TEST_SESSION_KEY).await.unwrap().is_some());

    let mut logout = store.send(actions.auth.logout()).await.unwrap();
    logout.wait_with_timeout(WAIT).await.unwrap();

    assert!(!store.state(selectors::is_authenticated).await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn restored_session_is_reflected_in_state() {
    let api = Arc::new(MockPhotoApi::new());
    let storage = InMemoryStorage::new().with_item(TEST_SESSION_KEY, r#"{"token":"abc","username":"ana"}"#);
    let store = store_with(&api, &storage);

    let restored = store
        .send_and_wait_for(
            AuthActions.restore_session(),
            |action| action.action_type() == AuthActions::SESSION_RESTORED,
            WAIT,
        )
        .await
        .unwrap();
    assert_eq!(
        restored,
        AuthActions.session_restored(Some(&Session::new("abc").with_username("ana")))
    );
    assert!(store.state(selectors::is_authenticated).await);
}

#[tokio::test]
async fn state_subscribers_see_each_snapshot() {
    let api = Arc::new(MockPhotoApi::new());
    let store = store_with(&api, &InMemoryStorage::new());
    let mut snapshots = store.subscribe_state();
    let before = snapshots.borrow().clone();

    store.send(AnnotateActions.select_step(3)).await.unwrap();
    snapshots.changed().await.unwrap();

    let after = snapshots.borrow().clone();
    assert_eq!(before.annotate.step, 0);
    assert_eq!(after.annotate.step, 3);
    assert!(Arc::ptr_eq(&before.search, &after.search));
}

#[tokio::test]
async fn shutdown_rejects_new_actions() {
    let api = Arc::new(MockPhotoApi::new());
    let store = store_with(&api, &InMemoryStorage::new());

    store.shutdown(WAIT).await.unwrap();
    let rejected = store.send(AnnotateActions.deselect_image()).await;
    assert!(rejected.is_err());
}
