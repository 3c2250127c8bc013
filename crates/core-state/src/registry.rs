//! Named document registry shared across callers.
//!
//! Locking: the name map sits behind a `RwLock`; each document behind its own
//! `Mutex`. Handles are cloned out of the map before the document lock is
//! taken, so edits to different documents never contend on the map, and edits
//! to the same document are serialized.

use std::collections::HashMap;
use std::sync::Arc;

use core_dict::SuggestionIndex;
use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::undo::{UNDO_HISTORY_MAX, UndoEngine};
use crate::{Document, EngineError, Result};

pub type DocumentHandle = Arc<Mutex<Document>>;

#[derive(Debug)]
pub struct Workspace {
    documents: RwLock<HashMap<String, DocumentHandle>>,
    vocabulary: Arc<SuggestionIndex>,
    history_capacity: usize,
}

impl Workspace {
    pub fn new(vocabulary: Arc<SuggestionIndex>) -> Self {
        Self::with_history_capacity(vocabulary, UNDO_HISTORY_MAX)
    }

    pub fn with_history_capacity(vocabulary: Arc<SuggestionIndex>, history_capacity: usize) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            vocabulary,
            history_capacity,
        }
    }

    pub fn vocabulary(&self) -> &Arc<SuggestionIndex> {
        &self.vocabulary
    }

    /// Register a new document. Fails if `name` is taken.
    ///
    /// The document is built, and its initial text learned, before the map's
    /// write lock is taken; the name is checked again under that lock.
    pub fn create_document(&self, name: &str, initial_text: &str) -> Result<DocumentHandle> {
        if self.documents.read().contains_key(name) {
            return Err(EngineError::AlreadyExists(name.to_string()));
        }
        let doc = Document::with_history(
            name,
            initial_text,
            Arc::clone(&self.vocabulary),
            UndoEngine::with_capacity(self.history_capacity),
        );
        let handle = Arc::new(Mutex::new(doc));
        let mut documents = self.documents.write();
        if documents.contains_key(name) {
            return Err(EngineError::AlreadyExists(name.to_string()));
        }
        documents.insert(name.to_string(), Arc::clone(&handle));
        info!(target: "state.workspace", doc = name, len_chars = initial_text.chars().count(), documents = documents.len(), "document_created");
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Result<DocumentHandle> {
        self.documents
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let removed = self.documents.write().remove(name);
        match removed {
            Some(_) => {
                info!(target: "state.workspace", doc = name, "document_removed");
                Ok(())
            }
            None => Err(EngineError::NotFound(name.to_string())),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.documents.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get_text(&self, name: &str) -> Result<String> {
        Ok(self.get(name)?.lock().text())
    }

    pub fn apply_edit(&self, name: &str, new_text: &str) -> Result<bool> {
        self.get(name)?.lock().apply_edit(new_text)
    }

    pub fn insert(&self, name: &str, offset: usize, fragment: &str) -> Result<String> {
        self.get(name)?.lock().insert(offset, fragment)
    }

    pub fn delete(&self, name: &str, start: usize, end: usize) -> Result<String> {
        self.get(name)?.lock().delete(start, end)
    }

    pub fn undo(&self, name: &str) -> Result<String> {
        Ok(self.get(name)?.lock().undo())
    }

    pub fn redo(&self, name: &str) -> Result<String> {
        Ok(self.get(name)?.lock().redo())
    }

    /// Search a snapshot of the named document's text.
    pub fn search_document(&self, name: &str, pattern: &str) -> Result<Vec<usize>> {
        let text = self.get_text(name)?;
        Ok(core_search::search(&text, pattern))
    }

    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.vocabulary.autocomplete(prefix)
    }

    pub fn check_spelling(&self, text: &str) -> Vec<String> {
        self.vocabulary.check_spelling(text)
    }
}
