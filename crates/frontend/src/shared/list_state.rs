//! Client-side list state shared by every table page.
//!
//! The full list is fetched once; search, sort and paging run over it in memory
//! through [`TableQuery`].

use crate::shared::api::fetch_list_or_empty;
use contracts::shared::list::{Page, Searchable, Sortable, TableQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub query: TableQuery,
    pub is_loaded: bool,
}

impl<T> ListState<T> {
    pub fn new(query: TableQuery) -> Self {
        Self {
            items: Vec::new(),
            query,
            is_loaded: false,
        }
    }
}

/// Signals of one table page plus the handlers its header and pager need.
pub struct ListController<T: Send + Sync + 'static> {
    pub state: RwSignal<ListState<T>>,
    pub loading: RwSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListController<T> {}

impl<T> ListController<T>
where
    T: Clone + PartialEq + Searchable + Sortable + Send + Sync + 'static,
{
    pub fn new(query: TableQuery) -> Self {
        Self {
            state: RwSignal::new(ListState::new(query)),
            loading: RwSignal::new(false),
        }
    }

    /// Replaces the items with the full list behind `endpoint`.
    pub fn load(&self, endpoint: &'static str, take: usize)
    where
        T: DeserializeOwned,
    {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            let items = fetch_list_or_empty::<T>(endpoint, take).await;
            log::debug!("{}: {} records", endpoint, items.len());
            this.set_items(items);
            this.loading.set(false);
        });
    }

    pub fn set_items(&self, items: Vec<T>) {
        self.state.update(|s| {
            s.items = items;
            s.is_loaded = true;
        });
    }

    pub fn items(&self) -> Signal<Vec<T>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.items.clone()))
    }

    /// Current page after search and sort.
    pub fn page(&self) -> Memo<Page<T>> {
        self.page_where(|_| true)
    }

    /// Current page over the items accepted by `keep` (page-specific filters).
    pub fn page_where<F>(&self, keep: F) -> Memo<Page<T>>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let state = self.state;
        Memo::new(move |_| {
            state.with(|s| {
                let items = s.items.iter().filter(|item| keep(item)).cloned().collect();
                s.query.apply(items)
            })
        })
    }

    pub fn search(&self) -> Signal<String> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.query.search.clone()))
    }

    pub fn on_search(&self) -> Callback<String> {
        let state = self.state;
        Callback::new(move |value: String| state.update(|s| s.query.set_search(value)))
    }

    pub fn sort_field(&self) -> Signal<String> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.query.sort_field.clone()))
    }

    pub fn sort_ascending(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.query.sort_ascending))
    }

    pub fn on_sort(&self) -> Callback<String> {
        let state = self.state;
        Callback::new(move |field: String| state.update(|s| s.query.toggle_sort(&field)))
    }

    pub fn on_page_change(&self) -> Callback<usize> {
        let state = self.state;
        Callback::new(move |page: usize| state.update(|s| s.query.page = page))
    }

    pub fn on_page_size_change(&self) -> Callback<usize> {
        let state = self.state;
        Callback::new(move |size: usize| state.update(|s| s.query.set_page_size(size)))
    }

    /// Resets paging after a page-specific filter changed.
    pub fn reset_page(&self) {
        self.state.update(|s| s.query.page = 0);
    }
}
