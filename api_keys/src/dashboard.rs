//! The dashboard session: the key book plus the list and visibility state
//! the UI works against.
use std::sync::Arc;

use common::error::Res;
use db::{
    models::key::{ApiKey, KeyStatus},
    store::KeyStore,
};
use uuid::Uuid;

use crate::{
    dtos::key::{ApiKeyListItem, KeyForm, PageStep, PageView, list_item},
    notice::Notice,
    service::{
        key::KeyBook,
        stats::{KeyStats, key_stats},
    },
    view::{ListState, StatusFilter},
    visibility::Visibility,
};

pub struct Dashboard {
    book: KeyBook,
    list: ListState,
    visibility: Visibility,
    page_size: usize,
}

impl Dashboard {
    pub fn new(store: Arc<dyn KeyStore>, page_size: usize) -> Self {
        Self {
            book: KeyBook::new(store),
            list: ListState::default(),
            visibility: Visibility::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn list_state(&self) -> &ListState {
        &self.list
    }

    pub fn records(&self) -> &[ApiKey] {
        self.book.records()
    }

    pub async fn load(&mut self) -> Res<Notice> {
        let count = self.book.load().await?.len();
        self.list.reset_page();
        Ok(Notice::info(format!("Loaded {} API keys", count)))
    }

    pub fn page(&self) -> PageView {
        let page = self.list.derive(self.book.records(), self.page_size);
        PageView {
            state: self.list.clone(),
            total_pages: page.total_pages,
            total_filtered: page.total_filtered,
            keys: page.visible_page.into_iter().map(|r| self.item(r)).collect(),
        }
    }

    pub fn stats(&self) -> KeyStats {
        key_stats(self.book.records())
    }

    pub async fn create(&mut self, form: KeyForm) -> Res<(ApiKeyListItem, Notice)> {
        let record = self.book.create(form).await?.clone();
        self.list.reset_page();
        Ok((
            self.item(&record),
            Notice::success("API key created successfully!"),
        ))
    }

    pub async fn update(&mut self, key_id: Uuid, form: KeyForm) -> Res<(ApiKeyListItem, Notice)> {
        let record = self.book.update(key_id, form).await?.clone();
        self.list.reset_page();
        Ok((
            self.item(&record),
            Notice::success("API key updated successfully!"),
        ))
    }

    pub async fn remove(&mut self, key_id: Uuid) -> Res<Notice> {
        self.book.remove(key_id).await?;
        self.visibility.forget(&key_id);
        self.list.reset_page();
        Ok(Notice::success("API key deleted successfully!"))
    }

    pub async fn toggle_status(
        &mut self,
        key_id: Uuid,
    ) -> Res<(ApiKeyListItem, KeyStatus, Notice)> {
        let (record, new_status) = self.book.toggle_status(key_id).await?;
        let record = record.clone();
        self.list.reset_page();
        Ok((
            self.item(&record),
            new_status,
            Notice::success(format!("Status changed to {}", new_status)),
        ))
    }

    pub async fn record_usage(&mut self, key_id: Uuid) -> Res<ApiKeyListItem> {
        let record = self.book.record_usage(key_id).await?.clone();
        self.list.reset_page();
        Ok(self.item(&record))
    }

    pub fn search(&mut self, search_term: impl Into<String>) {
        self.list.set_search_term(search_term);
    }

    pub fn filter(&mut self, status_filter: StatusFilter) {
        self.list.set_status_filter(status_filter);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    pub fn step_page(&mut self, step: PageStep) {
        match step {
            PageStep::Next => {
                let total = self.list.derive(self.book.records(), self.page_size).total_pages;
                self.list.next_page(total);
            }
            PageStep::Prev => self.list.prev_page(),
        }
    }

    /// Reveals or hides one key. Revealing comes with the security advisory.
    pub fn toggle_visibility(&mut self, key_id: Uuid) -> Res<(ApiKeyListItem, Option<Notice>)> {
        let record = self.book.find(key_id)?;
        let notice = self.visibility.toggle(key_id);
        Ok((self.item(record), notice))
    }

    /// The real secret, whether or not the key is currently masked.
    pub fn copy(&self, key_id: Uuid) -> Res<(String, Notice)> {
        let record = self.book.find(key_id)?;
        Ok((
            record.key.clone(),
            Notice::success("Key copied to clipboard!"),
        ))
    }

    fn item(&self, record: &ApiKey) -> ApiKeyListItem {
        list_item(
            record,
            self.visibility.display(record),
            self.visibility.is_visible(&record.id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryKeyStore, form, key};
    use crate::visibility::mask;
    use db::models::key::Permission;

    async fn dashboard(count: usize, page_size: usize) -> (Dashboard, Arc<MemoryKeyStore>) {
        let records = (0..count)
            .map(|i| {
                let status = if i % 2 == 0 { KeyStatus::Active } else { KeyStatus::Inactive };
                key(&format!("key {}", i), "", &format!("sk-{:020}", i), status)
            })
            .collect();
        let store = Arc::new(MemoryKeyStore::with_records(records));
        let mut dashboard = Dashboard::new(store.clone(), page_size);
        dashboard.load().await.unwrap();
        (dashboard, store)
    }

    #[actix_web::test]
    async fn page_masks_keys_until_revealed() {
        let (mut dashboard, _) = dashboard(3, 10).await;
        let first = dashboard.records()[0].clone();

        let page = dashboard.page();
        assert_eq!(page.keys[0].key, mask(&first.key));
        assert!(!page.keys[0].visible);

        let (item, notice) = dashboard.toggle_visibility(first.id).unwrap();
        assert!(notice.is_some());
        assert_eq!(item.key, first.key);
        assert_eq!(dashboard.page().keys[0].key, first.key);

        let (item, notice) = dashboard.toggle_visibility(first.id).unwrap();
        assert!(notice.is_none());
        assert_eq!(item.key, mask(&first.key));
    }

    #[actix_web::test]
    async fn copy_returns_the_secret_while_masked() {
        let (dashboard, _) = dashboard(1, 10).await;
        let record = dashboard.records()[0].clone();

        let (text, _) = dashboard.copy(record.id).unwrap();
        assert_eq!(text, record.key);
        assert_ne!(dashboard.page().keys[0].key, record.key);
    }

    #[actix_web::test]
    async fn mutations_reset_the_page() {
        let (mut dashboard, _) = dashboard(25, 10).await;
        dashboard.go_to_page(3);
        assert_eq!(dashboard.page().keys.len(), 5);

        dashboard.create(form("New", "", &[Permission::Write])).await.unwrap();
        assert_eq!(dashboard.list_state().page(), 1);
        assert_eq!(dashboard.page().keys[0].name, "New");
    }

    #[actix_web::test]
    async fn failed_mutation_keeps_the_page() {
        let (mut dashboard, store) = dashboard(25, 10).await;
        dashboard.go_to_page(2);

        store.fail_next("unreachable").await;
        let id = dashboard.records()[0].id;
        assert!(dashboard.remove(id).await.is_err());
        assert_eq!(dashboard.list_state().page(), 2);
        assert_eq!(dashboard.records().len(), 25);
    }

    #[actix_web::test]
    async fn search_and_filter_reset_the_page() {
        let (mut dashboard, _) = dashboard(25, 10).await;
        dashboard.go_to_page(2);
        dashboard.filter(StatusFilter::Inactive);
        assert_eq!(dashboard.list_state().page(), 1);

        let page = dashboard.page();
        assert_eq!(page.total_filtered, 12);
        assert_eq!(page.total_pages, 2);
        assert!(page.keys.iter().all(|k| k.status == KeyStatus::Inactive));

        dashboard.go_to_page(2);
        dashboard.search("key 1");
        assert_eq!(dashboard.list_state().page(), 1);
    }

    #[actix_web::test]
    async fn stepping_stays_within_the_pages() {
        let (mut dashboard, _) = dashboard(25, 10).await;
        for _ in 0..5 {
            dashboard.step_page(PageStep::Next);
        }
        assert_eq!(dashboard.list_state().page(), 3);
        dashboard.step_page(PageStep::Prev);
        assert_eq!(dashboard.list_state().page(), 2);
    }

    #[actix_web::test]
    async fn toggle_reports_the_new_status() {
        let (mut dashboard, _) = dashboard(1, 10).await;
        let id = dashboard.records()[0].id;

        let (item, new_status, notice) = dashboard.toggle_status(id).await.unwrap();
        assert_eq!(new_status, KeyStatus::Inactive);
        assert_eq!(item.status, KeyStatus::Inactive);
        assert_eq!(notice.message, "Status changed to inactive");
        assert_eq!(dashboard.stats().active, 0);
    }

    #[actix_web::test]
    async fn revealing_an_unknown_key_changes_nothing() {
        let (mut dashboard, _) = dashboard(1, 10).await;
        let unknown = Uuid::new_v4();

        assert!(dashboard.toggle_visibility(unknown).is_err());
        assert!(dashboard.toggle_visibility(unknown).is_err());
        assert!(dashboard.page().keys.iter().all(|k| !k.visible));
    }

    #[actix_web::test]
    async fn deleting_a_revealed_key_forgets_it() {
        let (mut dashboard, _) = dashboard(2, 10).await;
        let id = dashboard.records()[0].id;
        dashboard.toggle_visibility(id).unwrap();

        dashboard.remove(id).await.unwrap();
        assert!(dashboard.toggle_visibility(id).is_err());
        assert!(dashboard.copy(id).is_err());
    }
}
