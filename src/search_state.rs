use std::path::Path;

use crate::data_store::DataStore;
use crate::error::LoadError;
use crate::filter::filter_records;
use crate::paginator::{paginate, total_pages};
use crate::record_model::{PageResult, Record};
use crate::renderer;
use crate::search_config::SearchConfig;

pub struct SearchState {
    pub config: SearchConfig,
    store: DataStore,
}

impl SearchState {
    pub fn new(config: SearchConfig) -> Self {
        let store = DataStore::new(config.cache_path.clone(), config.cache_ttl());
        Self { config, store }
    }

    pub fn load(&mut self, source: &Path) -> Result<usize, LoadError> {
        Ok(self.store.load(source)?.len())
    }

    pub fn reload(&mut self, source: &Path) -> Result<usize, LoadError> {
        Ok(self.store.reload(source)?.len())
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, LoadError> {
        Ok(self.store.load_bytes(bytes)?.len())
    }

    pub fn clear_cache(&self) -> std::io::Result<()> {
        self.store.clear_cache()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn filter(&self, term: &str) -> Vec<&Record> {
        filter_records(self.store.records(), term, &self.config.search_fields)
    }

    pub fn search(&self, term: &str, page: &str) -> PageResult<&Record> {
        paginate(&self.filter(term), page, self.config.items_per_page)
    }

    pub fn total_pages(&self, term: &str) -> usize {
        total_pages(self.filter(term).len(), self.config.items_per_page)
    }

    pub fn render_results(&self, term: &str, page: &str) -> String {
        renderer::render_results(
            &self.search(term, page),
            &self.config.template,
            &self.config.no_results_message,
        )
    }

    pub fn render_pagination(&self, term: &str) -> String {
        renderer::render_pagination(
            self.total_pages(term),
            &self.config.pagination_class,
            self.config.hide_if_single_page,
        )
    }

    pub fn render_search_form(&self, term: &str) -> String {
        renderer::render_search_form(term, &self.config.search_button_label)
    }
}
