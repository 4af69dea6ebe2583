use std::{ops::Deref, sync::Arc};

use crate::{
    error::{ErrorVerbosity, ErrorVerbosityProvider},
    store::books::BookStore,
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, books: BookStore) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                books,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    books: BookStore,
}

impl ApiStateInner {
    pub fn books(&self) -> &BookStore {
        &self.books
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
