use crate::models::book::Book;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub query: String,
    pub total: usize,
    pub books: Vec<Book>,
}

impl BooksResponse {
    pub fn new(query: String, books: Vec<Book>) -> Self {
        Self {
            query,
            total: books.len(),
            books,
        }
    }
}
